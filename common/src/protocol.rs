use serde::{Deserialize, Serialize};

use crate::models::{Board, GameStatus};

/// Body of `POST /new_game`.
///
/// Both fields are optional: a missing `difficulty` means easy, and a missing `id` opens a new
/// session instead of restarting an existing one.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct NewGameRequest {
    pub id: Option<String>,
    pub difficulty: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct NewGameResponse {
    pub id: String,
    pub status: GameStatus,
    pub difficulty: String,
    pub board: Board,
}

/// Body of `POST /reveal` and `POST /toggle_flag`.
#[derive(Debug, Deserialize, Serialize)]
pub struct ActionRequest {
    pub id: String,
    pub row: usize,
    pub col: usize,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ActionResponse {
    pub status: GameStatus,
    pub board: Board,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ScoreResponse {
    pub score: i64,
    /// `None` when the high score store could not be reached.
    pub high_score: Option<i64>,
    pub time_elapsed: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_game_request_fields_are_optional() {
        let request: NewGameRequest = serde_json::from_str("{}").unwrap();

        assert!(request.id.is_none());
        assert!(request.difficulty.is_none());
    }

    #[test]
    fn score_response_reports_missing_high_score_as_null() {
        let response = ScoreResponse {
            score: 49495,
            high_score: None,
            time_elapsed: 100,
        };

        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["high_score"], serde_json::Value::Null);
        assert_eq!(value["score"], 49495);
    }
}
