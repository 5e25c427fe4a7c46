pub mod game;
pub mod health;

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::{core::GameError, state::AppState};

/// Error body returned by every handler: `{"detail": "..."}`
///
/// Extractor rejections (unparseable JSON, missing fields or query
/// parameters) are folded in as 400s so clients see one error shape.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    detail: String,
}

impl ApiError {
    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            detail: detail.into(),
        }
    }
}

impl From<GameError> for ApiError {
    fn from(err: GameError) -> Self {
        match err {
            GameError::NotFound { .. } => Self {
                status: StatusCode::NOT_FOUND,
                detail: "Game not found".to_string(),
            },
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(serde_json::json!({ "detail": self.detail })),
        )
            .into_response()
    }
}

/// Build the full application router
///
/// Game endpoints sit at the root where the browser client expects them;
/// anything else falls through to the static client when one is configured.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    let router = Router::new()
        .route("/health", get(health::health_check))
        .route("/stats", get(health::get_stats))
        .route("/start", get(game::start_game))
        .route("/guess", post(game::guess_word))
        .route("/tiles", get(game::get_new_tiles))
        .route("/end", get(game::end_game));

    let router = match &state.frontend_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir)),
        None => router,
    };

    router.with_state(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(cors),
    )
}
