use serde::Serialize;

use crate::core::Tile;
use crate::services::{FinalScore, GuessResult, HandView};

/// Tile as the browser client reads it: letter as a Unicode code point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TileResponse {
    #[serde(rename = "Letter")]
    pub letter: u32,
    #[serde(rename = "Points")]
    pub points: u32,
}

impl From<&Tile> for TileResponse {
    fn from(tile: &Tile) -> Self {
        Self {
            letter: u32::from(tile.letter),
            points: tile.points,
        }
    }
}

fn tiles_response(tiles: &[Tile]) -> Vec<TileResponse> {
    tiles.iter().map(TileResponse::from).collect()
}

/// Response for StartGame and EndGame
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameResponse {
    pub game_id: String,
    pub tiles: Vec<TileResponse>,
    pub points: u32,
}

impl From<HandView> for GameResponse {
    fn from(view: HandView) -> Self {
        Self {
            tiles: tiles_response(&view.hand),
            game_id: view.game_id,
            points: view.score,
        }
    }
}

impl From<FinalScore> for GameResponse {
    fn from(result: FinalScore) -> Self {
        Self {
            tiles: tiles_response(&result.display_tiles),
            game_id: result.game_id,
            points: result.score,
        }
    }
}

/// Response for ResolveGuess and Replenish
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum GuessResponse {
    Good {
        #[serde(rename = "gameId")]
        game_id: String,
        tiles: Vec<TileResponse>,
        points: u32,
        valid: bool,
    },
    Bad {
        valid: bool,
    },
}

impl GuessResponse {
    pub fn is_valid(&self) -> bool {
        match self {
            GuessResponse::Good { valid, .. } | GuessResponse::Bad { valid } => *valid,
        }
    }
}

impl From<HandView> for GuessResponse {
    fn from(view: HandView) -> Self {
        GuessResponse::Good {
            tiles: tiles_response(&view.hand),
            game_id: view.game_id,
            points: view.score,
            valid: true,
        }
    }
}

impl From<GuessResult> for GuessResponse {
    fn from(result: GuessResult) -> Self {
        match result {
            GuessResult::Valid(view) => view.into(),
            GuessResult::Invalid(_) => GuessResponse::Bad { valid: false },
        }
    }
}
