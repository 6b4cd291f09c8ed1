use thiserror::Error;

/// Errors raised while configuring a puzzle or decoding its picture.
///
/// Swap requests and tile lookups never produce errors; they degrade to
/// `false` and `None` respectively.
#[derive(Debug, Error)]
pub enum PuzzleError {
    /// A grid needs between 1 and `GridSize::MAX` tiles per side
    #[error("grid size must be between 1 and {max}, got {0}", max = crate::GridSize::MAX)]
    InvalidGridSize(usize),

    /// An explicit layout does not cover every slot of the grid
    #[error("layout has {actual} tiles, expected {expected}")]
    LayoutLength { expected: usize, actual: usize },

    /// An explicit layout repeats a tile id or names one outside the grid
    #[error("layout is not a permutation: tile id {0} is out of range or repeated")]
    LayoutNotPermutation(usize),

    #[error("image decode failed: {0}")]
    Decode(#[from] image::ImageError),

    #[error("failed to read image: {0}")]
    Io(#[from] std::io::Error),
}
