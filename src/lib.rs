// Tile set, shuffle, per-game state, registry, dictionary
pub mod core;

// Game engine (business logic) and diagnostics
pub mod services;

// API models (requests/responses)
pub mod models;

// HTTP routes
pub mod routes;

// Application state
pub mod state;

// Environment configuration
pub mod config;
