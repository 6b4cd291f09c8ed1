//! Puzzle engine.
//!
//! Owns the tile sequence for one grid. The tile stored at index `i` always
//! occupies slot `i`, so the vector order is the visual order.

use crate::rng::SimpleRng;
use crate::{GridSize, PuzzleError, Tile};
use log::{debug, trace};
use std::fmt;

/// Game state for a single picture puzzle
pub struct PuzzleEngine {
    grid_size: GridSize,
    tiles: Vec<Tile>,
    rng: SimpleRng,
}

impl PuzzleEngine {
    /// Create a shuffled puzzle seeded from the system entropy source
    pub fn new(grid_size: GridSize) -> Self {
        Self::with_rng(grid_size, SimpleRng::new())
    }

    /// Create a shuffled puzzle with a specific seed for reproducibility
    pub fn with_seed(grid_size: GridSize, seed: u64) -> Self {
        Self::with_rng(grid_size, SimpleRng::with_seed(seed))
    }

    fn with_rng(grid_size: GridSize, rng: SimpleRng) -> Self {
        let mut engine = Self {
            grid_size,
            tiles: solved_tiles(grid_size),
            rng,
        };
        engine.shuffle();
        engine
    }

    /// Build a puzzle from an explicit layout.
    ///
    /// `ids[slot]` is the id of the tile occupying `slot`. Tiles already in
    /// their home slot start locked, the same as after a shuffle. The layout
    /// is accepted even if it is already solved.
    pub fn from_layout(grid_size: GridSize, ids: &[usize]) -> Result<Self, PuzzleError> {
        let expected = grid_size.total_tiles();
        if ids.len() != expected {
            return Err(PuzzleError::LayoutLength {
                expected,
                actual: ids.len(),
            });
        }

        let mut seen = vec![false; expected];
        for &id in ids {
            if id >= expected || seen[id] {
                return Err(PuzzleError::LayoutNotPermutation(id));
            }
            seen[id] = true;
        }

        Ok(Self {
            grid_size,
            tiles: ids
                .iter()
                .enumerate()
                .map(|(slot, &id)| Tile::with_lock(id, id, slot, id == slot))
                .collect(),
            rng: SimpleRng::new(),
        })
    }

    /// Discard every tile and start over with a freshly shuffled grid
    pub fn reset(&mut self) {
        self.tiles = solved_tiles(self.grid_size);
        self.shuffle();
    }

    pub fn grid_size(&self) -> GridSize {
        self.grid_size
    }

    pub fn total_tiles(&self) -> usize {
        self.tiles.len()
    }

    /// Tiles in slot order
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Tile at a slot, or `None` for any index outside the grid
    pub fn tile<I: TryInto<usize>>(&self, index: I) -> Option<&Tile> {
        self.slot(index).map(|slot| &self.tiles[slot])
    }

    /// Number of tiles that can no longer move
    pub fn locked_count(&self) -> usize {
        self.tiles.iter().filter(|tile| tile.is_locked()).count()
    }

    /// True when every tile sits in its home slot.
    ///
    /// Computed from positions, not from the lock flags.
    pub fn is_completed(&self) -> bool {
        self.tiles.iter().all(Tile::is_in_correct_position)
    }

    /// Whether the tiles at two slots may be exchanged.
    ///
    /// Rejects equal slots, slots outside the grid (negative included) and
    /// locked tiles. Adjacency is not required.
    pub fn can_swap<I: TryInto<usize>>(&self, first: I, second: I) -> bool {
        self.swappable(first, second).is_some()
    }

    /// Exchange the tiles at two slots and lock whichever lands home.
    ///
    /// Returns `false` and leaves the grid untouched when the swap is not
    /// allowed.
    pub fn swap<I: TryInto<usize>>(&mut self, first: I, second: I) -> bool {
        let Some((a, b)) = self.swappable(first, second) else {
            trace!("swap rejected");
            return false;
        };

        self.tiles.swap(a, b);
        self.tiles[a].set_current_position(a);
        self.tiles[b].set_current_position(b);

        for slot in [a, b] {
            if self.tiles[slot].lock_if_home() {
                trace!("tile {} locked at slot {}", self.tiles[slot].id(), slot);
            }
        }
        trace!("swapped slots {} and {}", a, b);
        true
    }

    fn slot<I: TryInto<usize>>(&self, index: I) -> Option<usize> {
        index
            .try_into()
            .ok()
            .filter(|&slot| slot < self.tiles.len())
    }

    fn swappable<I: TryInto<usize>>(&self, first: I, second: I) -> Option<(usize, usize)> {
        let a = self.slot(first)?;
        let b = self.slot(second)?;
        if a == b || self.tiles[a].is_locked() || self.tiles[b].is_locked() {
            return None;
        }
        Some((a, b))
    }

    /// Randomize positions until the grid is not solved.
    ///
    /// A 1x1 grid is always solved and is accepted as is.
    fn shuffle(&mut self) {
        if self.tiles.len() <= 1 {
            debug!("{} grid cannot be scrambled, accepting solved layout", self.grid_size);
            self.lock_settled();
            return;
        }

        let mut attempts = 0usize;
        loop {
            attempts += 1;
            self.apply_random_positions();
            if !self.is_completed() {
                break;
            }
        }

        self.lock_settled();
        debug!(
            "shuffled {} grid in {} attempt(s), {} tile(s) already home",
            self.grid_size,
            attempts,
            self.locked_count()
        );
    }

    fn apply_random_positions(&mut self) {
        let mut positions: Vec<usize> = (0..self.tiles.len()).collect();
        self.rng.shuffle(&mut positions);

        for (tile, position) in self.tiles.iter_mut().zip(positions) {
            tile.set_current_position(position);
        }
        self.tiles.sort_by_key(Tile::current_position);
    }

    fn lock_settled(&mut self) {
        for tile in &mut self.tiles {
            tile.lock_if_home();
        }
    }
}

fn solved_tiles(grid_size: GridSize) -> Vec<Tile> {
    (0..grid_size.total_tiles())
        .map(|index| Tile::new(index, index, index))
        .collect()
}

impl fmt::Display for PuzzleEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.tiles.len().saturating_sub(1).to_string().len();
        for row in self.tiles.chunks(self.grid_size.get()) {
            let cells: Vec<String> = row
                .iter()
                .map(|tile| {
                    let marker = if tile.is_locked() { '*' } else { ' ' };
                    format!("{:>width$}{}", tile.id(), marker, width = width)
                })
                .collect();
            writeln!(f, "{}", cells.join(" "))?;
        }
        Ok(())
    }
}
