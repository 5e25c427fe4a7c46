use dashmap::{mapref::entry::Entry, DashMap};
use rand::Rng;
use time::{Duration, OffsetDateTime};

use super::error::GameError;
use super::game::Game;
use super::shuffle::generate_game_id;

/// Every live game, keyed by id
///
/// The map is sharded, so games on different shards never wait for each
/// other. All access to one game goes through its shard lock, which makes
/// each `update` an atomic read-modify-write.
#[derive(Debug, Default)]
pub struct GameRegistry {
    games: DashMap<String, Game>,
}

impl GameRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            games: DashMap::new(),
        }
    }

    /// Register a game under a fresh unique id
    ///
    /// Ids are drawn from `rng` until one is free; the check and the insert
    /// happen under the same shard lock.
    ///
    /// # Returns
    ///
    /// The id assigned to the game
    pub fn insert<R: Rng + ?Sized>(&self, mut game: Game, rng: &mut R) -> String {
        loop {
            let game_id = generate_game_id(rng);
            match self.games.entry(game_id.clone()) {
                Entry::Occupied(_) => {}
                Entry::Vacant(slot) => {
                    game.id = game_id.clone();
                    slot.insert(game);
                    return game_id;
                }
            }
            // The shard guard is released once the match ends
            tracing::debug!("Game id {} already taken, retrying", game_id);
        }
    }

    /// Run `f` against a game while holding its lock
    ///
    /// # Errors
    ///
    /// `GameError::NotFound` if no game has this id
    pub fn update<T, F>(&self, game_id: &str, f: F) -> Result<T, GameError>
    where
        F: FnOnce(&mut Game) -> T,
    {
        let mut game = self
            .games
            .get_mut(game_id)
            .ok_or_else(|| GameError::not_found(game_id))?;
        Ok(f(game.value_mut()))
    }

    /// Remove a game and hand it back
    ///
    /// # Errors
    ///
    /// `GameError::NotFound` if no game has this id
    pub fn remove(&self, game_id: &str) -> Result<Game, GameError> {
        self.games
            .remove(game_id)
            .map(|(_, game)| game)
            .ok_or_else(|| GameError::not_found(game_id))
    }

    /// Copy of a game's current state
    pub fn snapshot(&self, game_id: &str) -> Option<Game> {
        self.games.get(game_id).map(|game| game.value().clone())
    }

    pub fn contains(&self, game_id: &str) -> bool {
        self.games.contains_key(game_id)
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    /// Remove games that have been idle longer than `ttl`
    ///
    /// A `ttl` reaching back past the earliest representable time removes
    /// nothing.
    ///
    /// # Returns
    ///
    /// Number of games cleaned up
    pub fn cleanup_stale_games(&self, ttl: Duration) -> usize {
        let Some(cutoff) = OffsetDateTime::now_utc().checked_sub(ttl) else {
            return 0;
        };

        let mut removed = 0;
        self.games.retain(|_, game| {
            let keep = game.last_active >= cutoff;
            if !keep {
                removed += 1;
            }
            keep
        });
        removed
    }

    /// Get statistics about live games
    ///
    /// # Returns
    ///
    /// JSON value with game statistics
    pub fn get_stats(&self) -> serde_json::Value {
        let (tiles_in_play, words_played) = self
            .games
            .iter()
            .fold((0usize, 0usize), |(tiles, words), game| {
                (tiles + game.hand().len(), words + game.words().len())
            });

        serde_json::json!({
            "total_games": self.games.len(),
            "tiles_in_play": tiles_in_play,
            "words_played": words_played,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::{DEFAULT_HAND_SIZE, GAME_ID_LENGTH};
    use rand::{rngs::StdRng, SeedableRng};

    fn new_game(rng: &mut StdRng) -> Game {
        Game::new_shuffled(String::new(), DEFAULT_HAND_SIZE, rng)
    }

    #[test]
    fn test_insert_assigns_id() {
        let registry = GameRegistry::new();
        let mut rng = StdRng::seed_from_u64(1);

        let game_id = registry.insert(new_game(&mut rng), &mut rng);

        assert_eq!(game_id.len(), GAME_ID_LENGTH);
        assert!(game_id.chars().all(|c| c.is_ascii_alphanumeric()));
        let stored = registry.snapshot(&game_id).unwrap();
        assert_eq!(stored.id, game_id);
    }

    #[test]
    fn test_unique_game_ids() {
        let registry = GameRegistry::new();
        let mut rng = StdRng::seed_from_u64(2);

        let game_id1 = registry.insert(new_game(&mut rng), &mut rng);
        let game_id2 = registry.insert(new_game(&mut rng), &mut rng);
        let game_id3 = registry.insert(new_game(&mut rng), &mut rng);

        assert_ne!(game_id1, game_id2);
        assert_ne!(game_id2, game_id3);
        assert_ne!(game_id1, game_id3);
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_insert_retries_on_collision() {
        let registry = GameRegistry::new();
        let mut setup_rng = StdRng::seed_from_u64(10);

        // Occupy the id the seeded generator will produce first
        let taken = generate_game_id(&mut StdRng::seed_from_u64(3));
        registry
            .games
            .insert(taken.clone(), new_game(&mut setup_rng));

        let mut rng = StdRng::seed_from_u64(3);
        let game_id = registry.insert(new_game(&mut setup_rng), &mut rng);

        assert_ne!(game_id, taken);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_collision_logged_after_shard_lock_released() {
        use dashmap::try_result::TryResult;
        use std::sync::{Arc, Mutex};

        let registry = Arc::new(GameRegistry::new());
        let mut setup_rng = StdRng::seed_from_u64(12);
        let taken = generate_game_id(&mut StdRng::seed_from_u64(3));
        registry
            .games
            .insert(taken.clone(), new_game(&mut setup_rng));

        // Each log write records whether the taken id's shard was still locked
        let locked_at_log = Arc::new(Mutex::new(Vec::new()));
        let writer = {
            let registry = Arc::clone(&registry);
            let locked_at_log = Arc::clone(&locked_at_log);
            let taken = taken.clone();
            move || {
                let locked = matches!(registry.games.try_get_mut(&taken), TryResult::Locked);
                locked_at_log.lock().unwrap().push(locked);
                std::io::sink()
            }
        };
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(writer)
            .finish();

        let game_id = tracing::subscriber::with_default(subscriber, || {
            registry.insert(new_game(&mut setup_rng), &mut StdRng::seed_from_u64(3))
        });

        assert_ne!(game_id, taken);
        assert_eq!(*locked_at_log.lock().unwrap(), vec![false]);
    }

    #[test]
    fn test_update_existing_game() {
        let registry = GameRegistry::new();
        let mut rng = StdRng::seed_from_u64(4);
        let game_id = registry.insert(new_game(&mut rng), &mut rng);

        let hand_len = registry.update(&game_id, |game| game.hand().len());

        assert_eq!(hand_len, Ok(DEFAULT_HAND_SIZE));
    }

    #[test]
    fn test_update_nonexistent_game() {
        let registry = GameRegistry::new();

        let result = registry.update("nonexistent", |game| game.score());

        assert_eq!(result, Err(GameError::not_found("nonexistent")));
    }

    #[test]
    fn test_remove_game() {
        let registry = GameRegistry::new();
        let mut rng = StdRng::seed_from_u64(5);
        let game_id = registry.insert(new_game(&mut rng), &mut rng);

        assert!(registry.contains(&game_id));

        let removed = registry.remove(&game_id).unwrap();
        assert_eq!(removed.id, game_id);
        assert!(!registry.contains(&game_id));
        assert!(registry.is_empty());

        assert_eq!(
            registry.remove(&game_id).unwrap_err(),
            GameError::not_found(&game_id)
        );
    }

    #[test]
    fn test_get_stats_empty() {
        let registry = GameRegistry::new();

        let stats = registry.get_stats();
        assert_eq!(stats["total_games"], 0);
        assert_eq!(stats["tiles_in_play"], 0);
        assert_eq!(stats["words_played"], 0);
    }

    #[test]
    fn test_get_stats_with_games() {
        let registry = GameRegistry::new();
        let mut rng = StdRng::seed_from_u64(6);
        registry.insert(new_game(&mut rng), &mut rng);
        registry.insert(new_game(&mut rng), &mut rng);

        let stats = registry.get_stats();
        assert_eq!(stats["total_games"], 2);
        assert_eq!(stats["tiles_in_play"], 2 * DEFAULT_HAND_SIZE);
    }

    #[test]
    fn test_cleanup_stale_games() {
        let registry = GameRegistry::new();
        let mut rng = StdRng::seed_from_u64(7);
        let game_id = registry.insert(new_game(&mut rng), &mut rng);

        // Manually set last_active to be old (more than 1 hour ago)
        registry
            .update(&game_id, |game| {
                game.last_active = OffsetDateTime::now_utc() - Duration::hours(2);
            })
            .unwrap();

        let cleaned = registry.cleanup_stale_games(Duration::hours(1));
        assert_eq!(cleaned, 1);
        assert!(!registry.contains(&game_id));
    }

    #[test]
    fn test_cleanup_with_unrepresentable_ttl_removes_nothing() {
        let registry = GameRegistry::new();
        let mut rng = StdRng::seed_from_u64(9);
        let game_id = registry.insert(new_game(&mut rng), &mut rng);
        registry
            .update(&game_id, |game| {
                game.last_active = OffsetDateTime::now_utc() - Duration::days(30);
            })
            .unwrap();

        assert_eq!(registry.cleanup_stale_games(Duration::MAX), 0);
        assert_eq!(
            registry.cleanup_stale_games(Duration::seconds(100_000_000_000_000_000)),
            0
        );
        assert!(registry.contains(&game_id));
    }

    #[test]
    fn test_cleanup_counts_only_removed_games() {
        let registry = GameRegistry::new();
        let mut rng = StdRng::seed_from_u64(11);
        let stale: Vec<String> = (0..3)
            .map(|_| registry.insert(new_game(&mut rng), &mut rng))
            .collect();
        let fresh = registry.insert(new_game(&mut rng), &mut rng);
        for game_id in &stale {
            registry
                .update(game_id, |game| {
                    game.last_active = OffsetDateTime::now_utc() - Duration::hours(2);
                })
                .unwrap();
        }

        assert_eq!(registry.cleanup_stale_games(Duration::hours(1)), 3);
        assert_eq!(registry.len(), 1);
        assert!(registry.contains(&fresh));
        assert_eq!(registry.cleanup_stale_games(Duration::hours(1)), 0);
    }

    #[test]
    fn test_cleanup_keeps_recent_games() {
        let registry = GameRegistry::new();
        let mut rng = StdRng::seed_from_u64(8);
        let game_id = registry.insert(new_game(&mut rng), &mut rng);

        let cleaned = registry.cleanup_stale_games(Duration::hours(1));
        assert_eq!(cleaned, 0);
        assert!(registry.contains(&game_id));
    }
}
