pub mod diagnostics;
pub mod engine;

pub use engine::{EngineSettings, FinalScore, GameEngine, GuessResult, HandView};
