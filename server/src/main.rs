use std::sync::Arc;

use minesweeper_server::{
    build_rocket,
    cleanup::start_cleanup_task,
    config::ServerConfig,
    session::Sessions,
    store::{FileHighScoreStore, SharedStore},
};
use rocket::{
    Build, Rocket,
    fairing::{Fairing, Info, Kind},
};
use tracing::{info, warn};

struct CleanupFairing;

#[rocket::async_trait]
impl Fairing for CleanupFairing {
    fn info(&self) -> Info {
        Info {
            name: "Session Cleanup Task",
            kind: Kind::Ignite,
        }
    }

    async fn on_ignite(&self, rocket: Rocket<Build>) -> rocket::fairing::Result {
        match (rocket.state::<Sessions>(), rocket.state::<ServerConfig>()) {
            (Some(sessions), Some(config)) => {
                info!("Starting cleanup task for session management");
                let sessions = sessions.clone();
                let (interval, timeout) = (config.cleanup_interval, config.inactive_timeout);
                tokio::spawn(async move {
                    start_cleanup_task(sessions, interval, timeout).await;
                });
            }
            _ => warn!("Failed to get session state for cleanup task"),
        }
        Ok(rocket)
    }
}

#[rocket::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();
    info!("Starting Minesweeper server");

    let config = ServerConfig::from_env();
    let store = FileHighScoreStore::new(&config.high_score_path);
    info!("High scores are kept in {}", store.path().display());
    let store: SharedStore = Arc::new(store);

    let rocket = build_rocket(config, store)?.attach(CleanupFairing);
    info!("Endpoints: POST /new_game, POST /reveal, POST /toggle_flag, GET /score");

    rocket.launch().await?;
    Ok(())
}
