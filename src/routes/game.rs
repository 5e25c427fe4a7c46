use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    Json,
};

use crate::{
    models::{GameQuery, GameResponse, GuessRequest, GuessResponse},
    state::AppState,
};

use super::ApiError;

/// Start a new game
///
/// # Returns
///
/// JSON with the new game id, the opening hand and a score of 0
pub async fn start_game(State(state): State<AppState>) -> Json<GameResponse> {
    Json(state.engine.start_game().into())
}

/// Submit a word for a game
///
/// # Arguments
///
/// * `state` - Shared application state
/// * `payload` - JSON body with the game id and guessed word
///
/// # Returns
///
/// The refilled hand and new score, or `{"valid": false}` when the word is
/// not playable. 400 for a malformed guess, 404 for an unknown game.
pub async fn guess_word(
    State(state): State<AppState>,
    payload: Result<Json<GuessRequest>, JsonRejection>,
) -> Result<Json<GuessResponse>, ApiError> {
    let Json(request) = payload?;
    let request = request.validated().map_err(ApiError::bad_request)?;

    let result = state.engine.resolve_guess(&request.game, &request.guess)?;

    Ok(Json(result.into()))
}

/// Swap the whole hand for fresh tiles without scoring
pub async fn get_new_tiles(
    State(state): State<AppState>,
    query: Result<Query<GameQuery>, QueryRejection>,
) -> Result<Json<GuessResponse>, ApiError> {
    let Query(query) = query?;
    let view = state.engine.replenish(query.name.trim())?;
    Ok(Json(view.into()))
}

/// End a game and report its final score
///
/// The game is gone afterwards; ending it again yields 404.
pub async fn end_game(
    State(state): State<AppState>,
    query: Result<Query<GameQuery>, QueryRejection>,
) -> Result<Json<GameResponse>, ApiError> {
    let Query(query) = query?;
    let result = state.engine.end_game(query.name.trim())?;
    Ok(Json(result.into()))
}
