use rand::Rng;
use std::str::FromStr;
use time::OffsetDateTime;

use super::dictionary::Dictionary;
use super::shuffle::shuffle;
use super::tiles::{standard_tile_set, total_points, Tile, TOTAL_TILES};

/// What happens to tiles a player hands back
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReturnPolicy {
    /// Returned tiles go to the back of the bag in hand order
    #[default]
    Append,
    /// Returned tiles go to the back of the bag, then the whole bag is shuffled
    Reshuffle,
}

impl FromStr for ReturnPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "append" => Ok(ReturnPolicy::Append),
            "reshuffle" => Ok(ReturnPolicy::Reshuffle),
            other => Err(format!(
                "unknown tile return policy '{}' (expected 'append' or 'reshuffle')",
                other
            )),
        }
    }
}

/// Why a guess was turned down
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidGuess {
    NotInDictionary,
    NotInHand,
}

/// Result of resolving a guess against a game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    /// Guess was scored; `points` is what this guess earned
    Accepted { points: u32 },
    /// Guess was rejected and the game is unchanged
    Rejected(InvalidGuess),
}

impl GuessOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, GuessOutcome::Accepted { .. })
    }
}

/// Tile bookkeeping for a single game
///
/// Tiles only ever move between `bag`, `hand` and `used`, so their combined
/// length always equals the size of the tile set they were built from.
#[derive(Debug, Clone)]
pub struct Game {
    /// Unique identifier for this game
    pub id: String,
    /// Tiles not yet drawn, consumed front to back
    bag: Vec<Tile>,
    /// Tiles the player can currently guess with
    hand: Vec<Tile>,
    /// Tiles spent on accepted guesses
    used: Vec<Tile>,
    /// Accepted guesses, uppercase, in order
    words: Vec<String>,
    /// Sum of points of `used`
    score: u32,
    /// When the game was created
    pub created_at: OffsetDateTime,
    /// Last time any operation touched the game
    pub last_active: OffsetDateTime,
}

impl Game {
    /// Create a game from a freshly shuffled standard tile set
    ///
    /// # Arguments
    ///
    /// * `id` - Unique identifier for this game
    /// * `hand_size` - Number of tiles dealt into the hand
    /// * `rng` - Randomness for the shuffle
    pub fn new_shuffled<R: Rng + ?Sized>(id: String, hand_size: usize, rng: &mut R) -> Self {
        let mut tiles = standard_tile_set();
        shuffle(&mut tiles, rng);
        Self::with_tiles(id, tiles, hand_size)
    }

    /// Create a game from tiles in a known order
    ///
    /// The first `hand_size` tiles become the hand and the rest become the bag.
    pub fn with_tiles(id: String, mut tiles: Vec<Tile>, hand_size: usize) -> Self {
        let split = hand_size.min(tiles.len());
        let bag = tiles.split_off(split);
        let now = OffsetDateTime::now_utc();

        Self {
            id,
            bag,
            hand: tiles,
            used: Vec::new(),
            words: Vec::new(),
            score: 0,
            created_at: now,
            last_active: now,
        }
    }

    pub fn bag(&self) -> &[Tile] {
        &self.bag
    }

    pub fn hand(&self) -> &[Tile] {
        &self.hand
    }

    pub fn used(&self) -> &[Tile] {
        &self.used
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Tiles across bag, hand and used
    pub fn tile_count(&self) -> usize {
        self.bag.len() + self.hand.len() + self.used.len()
    }

    /// Mark the game as active now
    pub fn touch(&mut self) {
        self.last_active = OffsetDateTime::now_utc();
    }

    /// Work out which hand tiles would spell `letters`
    ///
    /// Each letter takes the first unclaimed hand tile carrying it.
    ///
    /// # Returns
    ///
    /// `(spent, remaining)` if every letter was matched, None otherwise
    pub fn match_letters(&self, letters: &str) -> Option<(Vec<Tile>, Vec<Tile>)> {
        let mut remaining = self.hand.clone();
        let mut spent = Vec::with_capacity(letters.len());

        for letter in letters.chars() {
            let idx = remaining.iter().position(|tile| tile.letter == letter)?;
            spent.push(remaining.remove(idx));
        }

        Some((spent, remaining))
    }

    /// Validate and score a guess, then top the hand back up from the bag
    ///
    /// # Arguments
    ///
    /// * `guess` - The word submitted by the player (any case)
    /// * `dictionary` - Valid words
    /// * `hand_size` - Hand capacity to refill to
    ///
    /// # Returns
    ///
    /// The outcome. A rejected guess leaves the game untouched.
    pub fn resolve_guess(
        &mut self,
        guess: &str,
        dictionary: &Dictionary,
        hand_size: usize,
    ) -> GuessOutcome {
        let word = guess.to_uppercase();
        if word.is_empty() || !dictionary.contains(&word) {
            return GuessOutcome::Rejected(InvalidGuess::NotInDictionary);
        }

        let Some((spent, remaining)) = self.match_letters(&word) else {
            return GuessOutcome::Rejected(InvalidGuess::NotInHand);
        };

        let points = total_points(&spent);
        self.score += points;
        self.used.extend(spent);
        self.words.push(word);
        self.hand = remaining;
        self.refill_hand(hand_size);
        self.touch();

        GuessOutcome::Accepted { points }
    }

    /// Return the whole hand to the bag and draw a new one
    ///
    /// # Arguments
    ///
    /// * `hand_size` - Hand capacity to draw up to
    /// * `policy` - Whether the bag is reshuffled after the tiles go back
    /// * `rng` - Randomness for `ReturnPolicy::Reshuffle`
    pub fn replenish<R: Rng + ?Sized>(
        &mut self,
        hand_size: usize,
        policy: ReturnPolicy,
        rng: &mut R,
    ) {
        self.bag.append(&mut self.hand);
        if policy == ReturnPolicy::Reshuffle {
            shuffle(&mut self.bag, rng);
        }
        self.refill_hand(hand_size);
        self.touch();
    }

    /// Draw from the front of the bag until the hand is full or the bag is empty
    fn refill_hand(&mut self, hand_size: usize) {
        let needed = hand_size.saturating_sub(self.hand.len());
        let take = needed.min(self.bag.len());
        self.hand.extend(self.bag.drain(..take));
    }

    /// Check the tile economy invariants for a game built from the standard set
    ///
    /// # Errors
    ///
    /// Describes the first invariant that does not hold
    pub fn verify_invariants(&self, hand_size: usize) -> Result<(), String> {
        if self.tile_count() != TOTAL_TILES {
            return Err(format!(
                "tile count {} != {}",
                self.tile_count(),
                TOTAL_TILES
            ));
        }

        if self.score != total_points(&self.used) {
            return Err(format!(
                "score {} != points of used tiles {}",
                self.score,
                total_points(&self.used)
            ));
        }

        if self.hand.len() > hand_size {
            return Err(format!("hand has {} tiles (max {})", self.hand.len(), hand_size));
        }

        if self.bag.len() + self.hand.len() >= hand_size && self.hand.len() != hand_size {
            return Err(format!(
                "hand has {} tiles while {} are available",
                self.hand.len(),
                self.bag.len() + self.hand.len()
            ));
        }

        let mut all: Vec<Tile> = self
            .bag
            .iter()
            .chain(&self.hand)
            .chain(&self.used)
            .copied()
            .collect();
        all.sort();
        let mut expected = standard_tile_set();
        expected.sort();
        if all != expected {
            return Err("tiles do not match the standard distribution".to_string());
        }

        Ok(())
    }
}
