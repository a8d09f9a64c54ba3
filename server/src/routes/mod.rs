use std::sync::Arc;

use minesweeper_common::{
    models::GameStatus,
    protocol::{ActionRequest, ActionResponse, NewGameRequest, NewGameResponse, ScoreResponse},
};
use rocket::{State, get, http::Status, post, serde::json::Json};
use tokio::sync::Mutex;
use tracing::{error, info, instrument, warn};

use crate::{
    config::ServerConfig,
    logic::{self, Difficulty, GameError},
    session::{Session, Sessions},
    store::SharedStore,
};

fn find_session(sessions: &Sessions, id: &str) -> Result<Arc<Mutex<Session>>, Status> {
    sessions.get(id).ok_or_else(|| {
        warn!("Request for non-existent session: {}", id);
        Status::NotFound
    })
}

/// Seconds of play from the `time` query parameter. Missing means 0; anything that is not a
/// non-negative integer is rejected rather than scored.
fn parse_elapsed(time: Option<&str>) -> Result<u32, Status> {
    match time {
        None => Ok(0),
        Some(raw) => raw.parse().map_err(|_| {
            warn!("Rejected malformed elapsed time {:?}", raw);
            Status::BadRequest
        }),
    }
}

fn reject(error: GameError) -> Status {
    warn!("Rejected action: {}", error);
    Status::BadRequest
}

#[post("/new_game", data = "<request>")]
#[instrument(level = "trace", skip(sessions, config))]
pub async fn new_game(
    request: Json<NewGameRequest>,
    sessions: &State<Sessions>,
    config: &State<ServerConfig>,
) -> Result<Json<NewGameResponse>, Status> {
    let NewGameRequest { id, difficulty } = request.into_inner();
    let difficulty = Difficulty::from_label(difficulty.as_deref().unwrap_or_default());

    let (id, board) = match id {
        Some(id) => {
            let session = find_session(sessions, &id)?;
            let mut session = session.lock().await;
            session.restart(difficulty);
            (id, session.board_model(config.expose_hidden_cells))
        }
        None => {
            let session = Session::new(difficulty);
            let board = session.board_model(config.expose_hidden_cells);
            (sessions.register(session), board)
        }
    };

    info!("Started {} game in session {}", difficulty, id);
    Ok(Json(NewGameResponse {
        id,
        status: GameStatus::NewGame,
        difficulty: difficulty.to_string(),
        board,
    }))
}

#[post("/reveal", data = "<request>")]
#[instrument(level = "trace", skip(sessions, config))]
pub async fn reveal(
    request: Json<ActionRequest>,
    sessions: &State<Sessions>,
    config: &State<ServerConfig>,
) -> Result<Json<ActionResponse>, Status> {
    let session = find_session(sessions, &request.id)?;
    let mut session = session.lock().await;

    let status = session.reveal(request.row, request.col).map_err(reject)?;

    Ok(Json(ActionResponse {
        status,
        board: session.board_model(config.expose_hidden_cells),
    }))
}

#[post("/toggle_flag", data = "<request>")]
#[instrument(level = "trace", skip(sessions, config))]
pub async fn toggle_flag(
    request: Json<ActionRequest>,
    sessions: &State<Sessions>,
    config: &State<ServerConfig>,
) -> Result<Json<ActionResponse>, Status> {
    let session = find_session(sessions, &request.id)?;
    let mut session = session.lock().await;

    let status = session.toggle_flag(request.row, request.col).map_err(reject)?;

    Ok(Json(ActionResponse {
        status,
        board: session.board_model(config.expose_hidden_cells),
    }))
}

/// Final score for the session's board after `time` seconds of play.
#[get("/score?<id>&<time>")]
#[instrument(level = "trace", skip(sessions, store))]
pub async fn score(
    id: &str,
    time: Option<&str>,
    sessions: &State<Sessions>,
    store: &State<SharedStore>,
) -> Result<Json<ScoreResponse>, Status> {
    let time_elapsed = parse_elapsed(time)?;
    let session = find_session(sessions, id)?;
    let score = session.lock().await.final_score(time_elapsed);

    let store = store.inner().clone();
    let report = tokio::task::spawn_blocking(move || logic::record(store.as_ref(), score))
        .await
        .map_err(|e| {
            error!("High score task failed: {}", e);
            Status::InternalServerError
        })?;

    Ok(Json(ScoreResponse {
        score: report.score,
        high_score: report.high_score,
        time_elapsed,
    }))
}
