pub mod requests;
pub mod responses;

pub use requests::{GameQuery, GuessRequest};
pub use responses::{GameResponse, GuessResponse, TileResponse};
