use time::Duration;

use crate::core::{
    constants::DEFAULT_HAND_SIZE,
    tiles::{Tile, TIMES_UP_TILES},
    Dictionary, Game, GameError, GameRegistry, GuessOutcome, InvalidGuess, RandomSource,
    ReturnPolicy,
};

use super::diagnostics;

/// Knobs that are fixed for the lifetime of a server
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineSettings {
    /// Tiles in a full hand
    pub hand_size: usize,
    /// What Replenish does with returned tiles
    pub return_policy: ReturnPolicy,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            hand_size: DEFAULT_HAND_SIZE,
            return_policy: ReturnPolicy::Append,
        }
    }
}

/// A player's view of a game after an operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandView {
    pub game_id: String,
    pub hand: Vec<Tile>,
    pub score: u32,
}

impl HandView {
    fn of(game: &Game) -> Self {
        Self {
            game_id: game.id.clone(),
            hand: game.hand().to_vec(),
            score: game.score(),
        }
    }
}

/// Result of ResolveGuess
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuessResult {
    Valid(HandView),
    Invalid(InvalidGuess),
}

impl GuessResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, GuessResult::Valid(_))
    }
}

/// Result of EndGame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalScore {
    pub game_id: String,
    /// Fixed celebratory tiles, not drawn from any bag
    pub display_tiles: Vec<Tile>,
    pub score: u32,
}

/// Runs the tile economy for every live game
///
/// All operations are synchronous and lock only the shard holding the game
/// they touch. Randomness is forked from the injected source before any
/// registry lock is taken.
#[derive(Debug)]
pub struct GameEngine {
    registry: GameRegistry,
    dictionary: Dictionary,
    settings: EngineSettings,
    random: RandomSource,
}

impl GameEngine {
    /// Create an engine with an empty registry
    ///
    /// # Arguments
    ///
    /// * `dictionary` - Words players may guess
    /// * `settings` - Hand size and tile return policy
    /// * `random` - Source for shuffles and game ids
    pub fn new(dictionary: Dictionary, settings: EngineSettings, random: RandomSource) -> Self {
        Self {
            registry: GameRegistry::new(),
            dictionary,
            settings,
            random,
        }
    }

    pub fn registry(&self) -> &GameRegistry {
        &self.registry
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    pub fn settings(&self) -> EngineSettings {
        self.settings
    }

    /// Shuffle a fresh tile set, deal a hand and register the game
    ///
    /// # Returns
    ///
    /// The new game's id, opening hand and score (always 0)
    pub fn start_game(&self) -> HandView {
        let mut rng = self.random.fork();
        let game = Game::new_shuffled(String::new(), self.settings.hand_size, &mut rng);
        let hand = game.hand().to_vec();

        let game_id = self.registry.insert(game, &mut rng);
        tracing::info!(game_id = %game_id, "Game started");

        if diagnostics::enabled() {
            if let Some(game) = self.registry.snapshot(&game_id) {
                diagnostics::record(&game);
            }
        }

        HandView {
            game_id,
            hand,
            score: 0,
        }
    }

    /// Check a guess against the dictionary and the hand, and score it
    ///
    /// # Arguments
    ///
    /// * `game_id` - The game's unique identifier
    /// * `guess` - The submitted word, any case
    ///
    /// # Errors
    ///
    /// `GameError::NotFound` if the game does not exist. An unknown game is
    /// reported even when the guess itself would have been rejected.
    pub fn resolve_guess(&self, game_id: &str, guess: &str) -> Result<GuessResult, GameError> {
        let hand_size = self.settings.hand_size;
        let dictionary = &self.dictionary;

        let resolved = self.registry.update(game_id, |game| {
            match game.resolve_guess(guess, dictionary, hand_size) {
                GuessOutcome::Accepted { points } => {
                    debug_assert_eq!(game.verify_invariants(hand_size), Ok(()));
                    let dump = diagnostics::enabled().then(|| game.clone());
                    Ok((points, HandView::of(game), dump))
                }
                GuessOutcome::Rejected(reason) => Err(reason),
            }
        })?;

        match resolved {
            Ok((points, view, dump)) => {
                if let Some(game) = dump {
                    diagnostics::record(&game);
                }
                tracing::debug!(
                    game_id = %game_id,
                    guess = %guess,
                    points,
                    score = view.score,
                    "Guess accepted"
                );
                Ok(GuessResult::Valid(view))
            }
            Err(reason) => {
                tracing::debug!(game_id = %game_id, guess = %guess, ?reason, "Guess rejected");
                Ok(GuessResult::Invalid(reason))
            }
        }
    }

    /// Put the hand back in the bag and draw a new one, without scoring
    ///
    /// # Errors
    ///
    /// `GameError::NotFound` if the game does not exist
    pub fn replenish(&self, game_id: &str) -> Result<HandView, GameError> {
        let EngineSettings {
            hand_size,
            return_policy,
        } = self.settings;
        let mut rng = self.random.fork();

        let (view, dump) = self.registry.update(game_id, |game| {
            game.replenish(hand_size, return_policy, &mut rng);
            debug_assert_eq!(game.verify_invariants(hand_size), Ok(()));
            (HandView::of(game), diagnostics::enabled().then(|| game.clone()))
        })?;

        if let Some(game) = dump {
            diagnostics::record(&game);
        }
        tracing::debug!(game_id = %game_id, "Hand replenished");

        Ok(view)
    }

    /// Remove a game for good and report its final score
    ///
    /// # Errors
    ///
    /// `GameError::NotFound` if the game does not exist or already ended
    pub fn end_game(&self, game_id: &str) -> Result<FinalScore, GameError> {
        let game = self.registry.remove(game_id)?;

        tracing::info!(
            game_id = %game_id,
            score = game.score(),
            words = game.words().len(),
            "Game ended"
        );

        let score = game.score();
        Ok(FinalScore {
            game_id: game.id,
            display_tiles: TIMES_UP_TILES.to_vec(),
            score,
        })
    }

    /// Drop games nobody has touched within `ttl`
    ///
    /// # Returns
    ///
    /// Number of games removed
    pub fn cleanup_stale_games(&self, ttl: Duration) -> usize {
        let removed = self.registry.cleanup_stale_games(ttl);
        if removed > 0 {
            tracing::info!("Cleaned up {} stale games", removed);
        }
        removed
    }
}
