pub mod constants;
pub mod dictionary;
pub mod error;
pub mod game;
pub mod game_registry;
pub mod shuffle;
pub mod tiles;

pub use constants::*;
pub use dictionary::Dictionary;
pub use error::GameError;
pub use game::{Game, GuessOutcome, InvalidGuess, ReturnPolicy};
pub use game_registry::GameRegistry;
pub use shuffle::RandomSource;
pub use tiles::Tile;
