use rocket::http::Method;
use rocket_cors::{AllowedHeaders, AllowedOrigins, Cors, CorsOptions};
use tracing::info;

use crate::config::ServerConfig;

pub fn create_cors(config: &ServerConfig) -> Result<Cors, rocket_cors::Error> {
    info!(
        "Allowing cross-origin requests from {:?}",
        config.cors_allowed_origins
    );

    CorsOptions {
        allowed_origins: AllowedOrigins::some_exact(&config.cors_allowed_origins),
        allowed_methods: [Method::Get, Method::Post, Method::Options]
            .into_iter()
            .map(From::from)
            .collect(),
        allowed_headers: AllowedHeaders::some(&["Accept", "Content-Type", "X-Requested-With"]),
        allow_credentials: true,
        ..Default::default()
    }
    .to_cors()
}
