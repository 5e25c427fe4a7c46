/// Number of tiles a player holds when the bag allows it
pub const DEFAULT_HAND_SIZE: usize = 7;

/// Length of generated game identifiers
pub const GAME_ID_LENGTH: usize = 8;

/// Characters allowed in game identifiers
pub const GAME_ID_CHARSET: &[u8] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Games with no activity for this long are removed (1 hour)
pub const GAME_TTL_SECONDS: u64 = 3600;

/// Longest configurable game TTL (one year)
pub const MAX_GAME_TTL_SECONDS: u64 = 365 * 24 * 3600;

/// How often the stale game sweep runs
pub const CLEANUP_INTERVAL_SECONDS: u64 = 60;

/// Longest guess accepted from a client
pub const MAX_GUESS_LENGTH: usize = 32;
