//! Human readable dumps of a game's tile bookkeeping.
//!
//! Dumps go to the `speedrabble::diagnostics` tracing target at DEBUG level.
//! Callers capture the game inside the registry lock only when the target is
//! enabled, and render it after the lock is released.

use std::fmt;

use crate::core::{tiles::Tile, Game};

/// Whether anyone is listening for game dumps
pub fn enabled() -> bool {
    tracing::enabled!(target: "speedrabble::diagnostics", tracing::Level::DEBUG)
}

/// Emit a dump of `game`
pub fn record(game: &Game) {
    tracing::debug!(target: "speedrabble::diagnostics", "\n{}", GameDump(game));
}

/// Display adapter that renders a game the way an operator reads it
pub struct GameDump<'a>(pub &'a Game);

fn write_tiles(f: &mut fmt::Formatter<'_>, label: &str, tiles: &[Tile]) -> fmt::Result {
    write!(f, "{} [{}]:", label, tiles.len())?;
    for tile in tiles {
        write!(f, " {}", tile.letter)?;
    }
    writeln!(f)
}

impl fmt::Display for GameDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let game = self.0;
        writeln!(f, "===================================")?;
        writeln!(f, "GAME {}:", game.id)?;
        write_tiles(f, "BAG TILES", game.bag())?;
        write_tiles(f, "USED TILES", game.used())?;
        write_tiles(f, "PLAY TILES", game.hand())?;
        writeln!(f, "POINTS: {}", game.score())?;
        writeln!(f, "WORDS: {}", game.words().join(" "))?;
        writeln!(f, "TOTAL TILES: {}", game.tile_count())?;
        write!(f, "===================================")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{tiles::standard_tile_set, Dictionary};

    #[test]
    fn test_dump_lists_every_section() {
        let mut game = Game::with_tiles("abc123XY".to_string(), standard_tile_set(), 7);
        // Hand is EEEEEEE, bag starts with EEEEE
        let dictionary = Dictionary::from_words(["eee"], 7);
        assert!(game.resolve_guess("eee", &dictionary, 7).is_accepted());

        let dump = GameDump(&game).to_string();

        assert!(dump.contains("GAME abc123XY:"));
        assert!(dump.contains("USED TILES [3]: E E E"));
        assert!(dump.contains("PLAY TILES [7]: E E E E E E E"));
        assert!(dump.contains("BAG TILES [88]:"));
        assert!(dump.contains("POINTS: 3"));
        assert!(dump.contains("WORDS: EEE"));
        assert!(dump.contains("TOTAL TILES: 98"));
    }

    #[test]
    fn test_record_without_subscriber_is_silent() {
        let game = Game::with_tiles("g".to_string(), standard_tile_set(), 7);
        record(&game);
        assert!(!enabled());
    }
}
