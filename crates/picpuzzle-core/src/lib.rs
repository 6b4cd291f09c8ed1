//! Picture tile puzzle engine.
//!
//! A picture is cut into an N x N grid of pieces, the pieces are shuffled and
//! the player swaps pairs until every piece is back home. Tiles that reach
//! their home slot lock and can no longer move.
//!
//! The engine and the slicer are independent: [`PuzzleEngine`] never sees
//! pixels, and [`slicer::slice`] knows nothing about tiles. A tile's id is the
//! index of the slice it displays.

mod config;
mod engine;
mod error;
mod rng;
mod session;
pub mod slicer;
mod tile;

pub use config::{Difficulty, GameConfig, GridSize};
pub use engine::PuzzleEngine;
pub use error::PuzzleError;
pub use session::{PuzzleSession, ScreenState};
pub use slicer::{slice, slice_bytes, Picture, Slice};
pub use tile::Tile;
