use std::path::PathBuf;
use std::sync::Arc;

use crate::services::GameEngine;

/// Shared application state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<GameEngine>,
    /// Static client files served for any unmatched path
    pub frontend_dir: Option<PathBuf>,
}

impl AppState {
    pub fn new(engine: GameEngine) -> Self {
        Self {
            engine: Arc::new(engine),
            frontend_dir: None,
        }
    }

    pub fn with_frontend_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.frontend_dir = Some(dir.into());
        self
    }
}
