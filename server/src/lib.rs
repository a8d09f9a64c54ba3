pub mod cleanup;
pub mod config;
pub mod cors;
pub mod logic;
pub mod routes;
pub mod session;
pub mod store;

use rocket::{Build, Rocket, routes};

use crate::{config::ServerConfig, session::Sessions, store::SharedStore};

/// Assembles the HTTP server around an empty session registry and the given score store.
pub fn build_rocket(
    config: ServerConfig,
    store: SharedStore,
) -> Result<Rocket<Build>, rocket_cors::Error> {
    let cors = cors::create_cors(&config)?;

    Ok(rocket::build()
        .attach(cors)
        .manage(Sessions::default())
        .manage(store)
        .manage(config)
        .mount(
            "/",
            routes![
                routes::new_game,
                routes::reveal,
                routes::toggle_flag,
                routes::score
            ],
        ))
}
