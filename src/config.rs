use anyhow::{bail, Context, Result};
use std::env;
use std::str::FromStr;

use crate::core::constants::{
    CLEANUP_INTERVAL_SECONDS, DEFAULT_HAND_SIZE, GAME_TTL_SECONDS, MAX_GAME_TTL_SECONDS,
};
use crate::core::ReturnPolicy;
use crate::services::EngineSettings;

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub game: GameConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory of static client files served at the root
    pub frontend_dir: String,
}

#[derive(Debug, Clone)]
pub struct GameConfig {
    pub dictionary_path: String,
    pub allow_empty_dictionary: bool,
    pub hand_size: usize,
    pub max_word_length: usize,
    pub return_policy: ReturnPolicy,
    /// Fixed seed for reproducible shuffles; None seeds from the OS
    pub rng_seed: Option<u64>,
    pub game_ttl_seconds: u64,
    pub cleanup_interval_seconds: u64,
}

/// Read `key` through `lookup`, falling back to `default`, and parse it
fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("{}", e))
            .with_context(|| format!("{} has an invalid value '{}'", key, raw)),
        None => Ok(default),
    }
}

impl Config {
    /// Load configuration from `.env` (if present) and the process environment
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from any key/value source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let server = ServerConfig {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(&lookup, "PORT", 8080)?,
            frontend_dir: lookup("FRONTEND_DIR").unwrap_or_else(|| "frontend".to_string()),
        };

        let hand_size: usize = parse_or(&lookup, "HAND_SIZE", DEFAULT_HAND_SIZE)?;
        if hand_size == 0 {
            bail!("HAND_SIZE must be at least 1");
        }

        let rng_seed = match lookup("RNG_SEED") {
            Some(raw) => Some(
                raw.trim()
                    .parse::<u64>()
                    .with_context(|| format!("RNG_SEED has an invalid value '{}'", raw))?,
            ),
            None => None,
        };

        let game = GameConfig {
            dictionary_path: lookup("DICTIONARY_PATH")
                .unwrap_or_else(|| "static/words.json".to_string()),
            allow_empty_dictionary: parse_or(&lookup, "ALLOW_EMPTY_DICTIONARY", false)?,
            hand_size,
            max_word_length: parse_or(&lookup, "MAX_WORD_LENGTH", hand_size)?,
            return_policy: parse_or(&lookup, "TILE_RETURN_POLICY", ReturnPolicy::Append)?,
            rng_seed,
            game_ttl_seconds: parse_or(&lookup, "GAME_TTL_SECONDS", GAME_TTL_SECONDS)?,
            cleanup_interval_seconds: parse_or(
                &lookup,
                "CLEANUP_INTERVAL_SECONDS",
                CLEANUP_INTERVAL_SECONDS,
            )?,
        };

        if game.game_ttl_seconds > MAX_GAME_TTL_SECONDS {
            bail!(
                "GAME_TTL_SECONDS must be at most {} (got {})",
                MAX_GAME_TTL_SECONDS,
                game.game_ttl_seconds
            );
        }

        if game.cleanup_interval_seconds == 0 {
            bail!("CLEANUP_INTERVAL_SECONDS must be at least 1");
        }

        Ok(Config { server, game })
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            hand_size: self.game.hand_size,
            return_policy: self.game.return_policy,
        }
    }
}
