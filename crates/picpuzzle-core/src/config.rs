use crate::PuzzleError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Number of tiles per row and per column.
///
/// Between 1 and [`GridSize::MAX`]. A 1x1 grid is accepted but is solved
/// from the start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct GridSize(usize);

impl GridSize {
    /// Largest supported number of tiles per side
    pub const MAX: usize = 64;

    /// Create a grid size, rejecting zero and anything above [`GridSize::MAX`]
    pub fn new(size: usize) -> Result<Self, PuzzleError> {
        if !(1..=Self::MAX).contains(&size) {
            return Err(PuzzleError::InvalidGridSize(size));
        }
        Ok(Self(size))
    }

    /// Tiles per side
    pub fn get(self) -> usize {
        self.0
    }

    /// Total number of slots (`size * size`)
    pub fn total_tiles(self) -> usize {
        self.0 * self.0
    }

    /// Row and column of a row-major slot index
    pub fn row_col(self, index: usize) -> (usize, usize) {
        (index / self.0, index % self.0)
    }

    /// Row-major slot index of a row and column
    pub fn index(self, row: usize, col: usize) -> usize {
        row * self.0 + col
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Difficulty::default().grid_size()
    }
}

impl TryFrom<usize> for GridSize {
    type Error = PuzzleError;

    fn try_from(size: usize) -> Result<Self, Self::Error> {
        Self::new(size)
    }
}

impl From<GridSize> for usize {
    fn from(size: GridSize) -> Self {
        size.0
    }
}

impl fmt::Display for GridSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.0, self.0)
    }
}

/// Difficulty presets, each mapping to a grid size
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Grid size for this preset: 3x3, 4x4 or 5x5
    pub fn grid_size(self) -> GridSize {
        match self {
            Difficulty::Easy => GridSize(3),
            Difficulty::Medium => GridSize(4),
            Difficulty::Hard => GridSize(5),
        }
    }

    /// All presets, easiest first
    pub fn all_levels() -> &'static [Difficulty] {
        &[Difficulty::Easy, Difficulty::Medium, Difficulty::Hard]
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "Easy"),
            Difficulty::Medium => write!(f, "Medium"),
            Difficulty::Hard => write!(f, "Hard"),
        }
    }
}

/// Configuration for a puzzle session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Tiles per side
    pub grid_size: GridSize,
    /// How long the whole picture is shown before play starts
    pub preview_duration: Duration,
    /// Pause between the final swap and the completion screen
    pub completion_delay: Duration,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: GridSize::default(),
            preview_duration: Duration::from_secs(5),
            completion_delay: Duration::from_millis(500),
        }
    }
}

impl GameConfig {
    pub fn easy() -> Self {
        Self::for_difficulty(Difficulty::Easy)
    }

    pub fn medium() -> Self {
        Self::for_difficulty(Difficulty::Medium)
    }

    pub fn hard() -> Self {
        Self::for_difficulty(Difficulty::Hard)
    }

    /// Default timings with the preset's grid size
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        Self {
            grid_size: difficulty.grid_size(),
            ..Self::default()
        }
    }

    /// Default timings with an explicit grid size
    pub fn with_grid_size(grid_size: GridSize) -> Self {
        Self {
            grid_size,
            ..Self::default()
        }
    }

    /// Total number of tiles for this configuration
    pub fn total_tiles(&self) -> usize {
        self.grid_size.total_tiles()
    }
}
