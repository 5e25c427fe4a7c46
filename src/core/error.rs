use thiserror::Error;

/// Errors surfaced by game operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("game {game_id} not found")]
    NotFound { game_id: String },
}

impl GameError {
    pub fn not_found(game_id: &str) -> Self {
        GameError::NotFound {
            game_id: game_id.to_string(),
        }
    }
}
