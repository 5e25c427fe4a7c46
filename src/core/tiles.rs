/// A single letter tile. Tiles with the same letter and points are interchangeable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tile {
    pub letter: char,
    pub points: u32,
}

impl Tile {
    pub const fn new(letter: char, points: u32) -> Self {
        Self { letter, points }
    }
}

/// Letter, count and point value of every tile kind in a fresh bag
pub const TILE_DISTRIBUTION: [(char, usize, u32); 26] = [
    // 1 point
    ('E', 12, 1),
    ('A', 9, 1),
    ('I', 9, 1),
    ('O', 8, 1),
    ('N', 6, 1),
    ('R', 6, 1),
    ('T', 6, 1),
    ('L', 4, 1),
    ('S', 4, 1),
    ('U', 4, 1),
    // 2 points
    ('D', 4, 2),
    ('G', 3, 2),
    // 3 points
    ('B', 2, 3),
    ('C', 2, 3),
    ('M', 2, 3),
    ('P', 2, 3),
    // 4 points
    ('F', 2, 4),
    ('H', 2, 4),
    ('V', 2, 4),
    ('W', 2, 4),
    ('Y', 2, 4),
    // 5 points
    ('K', 1, 5),
    // 8 points
    ('J', 1, 8),
    ('X', 1, 8),
    // 10 points
    ('Q', 1, 10),
    ('Z', 1, 10),
];

/// Total number of tiles in one game
pub const TOTAL_TILES: usize = {
    let mut total = 0;
    let mut i = 0;
    while i < TILE_DISTRIBUTION.len() {
        total += TILE_DISTRIBUTION[i].1;
        i += 1;
    }
    total
};

/// Tiles shown to the player when a game ends. Display only, never drawn.
pub const TIMES_UP_TILES: [Tile; 7] = [
    Tile::new('T', 1),
    Tile::new('I', 1),
    Tile::new('M', 3),
    Tile::new('E', 1),
    Tile::new('S', 1),
    Tile::new('U', 1),
    Tile::new('P', 3),
];

/// Build a fresh, unshuffled copy of the full tile set
pub fn standard_tile_set() -> Vec<Tile> {
    let mut tiles = Vec::with_capacity(TOTAL_TILES);
    for &(letter, count, points) in TILE_DISTRIBUTION.iter() {
        tiles.extend(std::iter::repeat(Tile::new(letter, points)).take(count));
    }
    tiles
}

/// Point value of a letter, or None if the letter is not in the set
pub fn letter_points(letter: char) -> Option<u32> {
    let upper = letter.to_ascii_uppercase();
    TILE_DISTRIBUTION
        .iter()
        .find(|(l, _, _)| *l == upper)
        .map(|&(_, _, points)| points)
}

/// Sum of point values
pub fn total_points(tiles: &[Tile]) -> u32 {
    tiles.iter().map(|t| t.points).sum()
}
