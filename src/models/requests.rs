use serde::{Deserialize, Serialize};

use crate::core::constants::MAX_GUESS_LENGTH;

/// Word guess submitted for a game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuessRequest {
    /// Game id
    pub game: String,
    /// The guessed word
    pub guess: String,
}

impl GuessRequest {
    /// Clean and validate the guess
    ///
    /// # Arguments
    ///
    /// * `guess` - Raw guess input
    ///
    /// # Returns
    ///
    /// Cleaned guess (trimmed and uppercased) if valid, error otherwise
    pub fn validate_guess(guess: &str) -> Result<String, String> {
        let cleaned = guess.trim().to_uppercase();

        if cleaned.is_empty() {
            return Err("Guess cannot be empty".to_string());
        }

        if cleaned.chars().count() > MAX_GUESS_LENGTH {
            return Err(format!(
                "Guess must be {} characters or less",
                MAX_GUESS_LENGTH
            ));
        }

        if !cleaned.chars().all(|c| c.is_alphabetic()) {
            return Err("Guess must contain only letters".to_string());
        }

        Ok(cleaned)
    }

    /// Check the game id is present
    pub fn validate_game(game: &str) -> Result<String, String> {
        let cleaned = game.trim();

        if cleaned.is_empty() {
            return Err("Game id cannot be empty".to_string());
        }

        Ok(cleaned.to_string())
    }

    /// Return a copy with both fields validated
    ///
    /// # Errors
    ///
    /// The first validation message that failed
    pub fn validated(self) -> Result<Self, String> {
        Ok(Self {
            game: Self::validate_game(&self.game)?,
            guess: Self::validate_guess(&self.guess)?,
        })
    }
}

/// Query string naming a game (`?name=<id>`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameQuery {
    pub name: String,
}
