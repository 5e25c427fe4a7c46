//! Fisher-Yates shuffling and the shared random source.
//!
//! Game code never reaches for a global generator. A `RandomSource` is
//! handed to the engine at construction; each operation forks a private
//! `StdRng` from it so the source's lock is held only while a seed is drawn.

use rand::{rngs::StdRng, Rng, SeedableRng};
use std::sync::Mutex;

use super::constants::{GAME_ID_CHARSET, GAME_ID_LENGTH};

/// Shuffle a slice in place using the Fisher-Yates algorithm
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

/// Generate a random alphanumeric game identifier
pub fn generate_game_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..GAME_ID_LENGTH)
        .map(|_| {
            let idx = rng.gen_range(0..GAME_ID_CHARSET.len());
            GAME_ID_CHARSET[idx] as char
        })
        .collect()
}

/// Process-wide source of randomness, serialized behind a mutex
#[derive(Debug)]
pub struct RandomSource {
    rng: Mutex<StdRng>,
}

impl RandomSource {
    /// Seed from the operating system
    pub fn from_entropy() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Deterministic source for reproducible runs
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Derive an independent generator for one operation
    pub fn fork(&self) -> StdRng {
        let seed: u64 = {
            // A panic while holding the lock cannot leave the generator half-updated
            let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
            rng.gen()
        };
        StdRng::seed_from_u64(seed)
    }
}

impl Default for RandomSource {
    fn default() -> Self {
        Self::from_entropy()
    }
}
