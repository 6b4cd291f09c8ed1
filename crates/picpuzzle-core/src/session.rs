use crate::slicer::{self, Picture, Slice};
use crate::{GameConfig, PuzzleEngine};
use log::{info, warn};

const LOAD_FAILED: &str = "Failed to load puzzle image. Please check the picture and try again.";

/// Where a session is in its lifecycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenState {
    /// Waiting for the picture
    Loading,
    /// Showing the whole picture before play starts
    Preview,
    /// Tiles can be swapped
    Ready,
    /// The picture could not be loaded or sliced
    Error(String),
    /// Every tile is home
    Completed,
}

impl ScreenState {
    /// Status line for the front-end
    pub fn description(&self) -> &str {
        match self {
            ScreenState::Loading => "Loading puzzle...",
            ScreenState::Preview => "Memorize the image! Game starts in a few seconds...",
            ScreenState::Ready => "Swap tiles to solve the puzzle!",
            ScreenState::Error(message) => message.as_str(),
            ScreenState::Completed => "Puzzle completed!",
        }
    }
}

/// A puzzle being played: engine, picture pieces and move counter.
///
/// Timed transitions (preview length, completion delay) are driven by the
/// caller; the session only exposes the state changes.
pub struct PuzzleSession {
    config: GameConfig,
    engine: PuzzleEngine,
    pieces: Vec<Slice>,
    moves: usize,
    state: ScreenState,
}

impl PuzzleSession {
    /// Create a session with a freshly shuffled grid, waiting for its picture
    pub fn new(config: GameConfig) -> Self {
        let engine = PuzzleEngine::new(config.grid_size);
        Self::from_engine(config, engine)
    }

    /// Create a session whose shuffles are reproducible
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        let engine = PuzzleEngine::with_seed(config.grid_size, seed);
        Self::from_engine(config, engine)
    }

    fn from_engine(config: GameConfig, engine: PuzzleEngine) -> Self {
        Self {
            config,
            engine,
            pieces: Vec::new(),
            moves: 0,
            state: ScreenState::Loading,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn engine(&self) -> &PuzzleEngine {
        &self.engine
    }

    pub fn state(&self) -> &ScreenState {
        &self.state
    }

    /// Accepted swaps since the last reset
    pub fn moves(&self) -> usize {
        self.moves
    }

    pub fn is_completed(&self) -> bool {
        self.engine.is_completed()
    }

    /// Picture piece shown by a tile
    pub fn piece_for(&self, tile_id: usize) -> Option<&Slice> {
        self.pieces.get(tile_id)
    }

    /// Hand the loaded picture (or the lack of one) to the session.
    ///
    /// On success the picture is sliced and the session moves to `Preview`.
    /// Ignored unless the session is `Loading`; returns whether it was handled.
    pub fn image_loaded(&mut self, picture: Option<&Picture>) -> bool {
        if self.state != ScreenState::Loading {
            warn!("picture delivered while {:?}, ignoring", self.state);
            return false;
        }

        let Some(picture) = picture else {
            warn!("no picture available for the puzzle");
            self.state = ScreenState::Error(LOAD_FAILED.to_string());
            return true;
        };

        let pieces = slicer::slice(picture, self.config.grid_size);
        if pieces.len() != self.engine.total_tiles() {
            warn!(
                "expected {} pieces, slicer produced {}",
                self.engine.total_tiles(),
                pieces.len()
            );
            self.state = ScreenState::Error(LOAD_FAILED.to_string());
            return true;
        }

        self.pieces = pieces;
        self.state = ScreenState::Preview;
        true
    }

    /// End the preview and allow swaps. Ignored in any other state.
    pub fn start(&mut self) -> bool {
        if self.state != ScreenState::Preview {
            return false;
        }
        // A 1x1 puzzle is solved before the first move
        self.state = if self.engine.is_completed() {
            ScreenState::Completed
        } else {
            ScreenState::Ready
        };
        true
    }

    /// Swap two slots while the game is running.
    ///
    /// Only accepted swaps count as moves.
    pub fn swap<I: TryInto<usize>>(&mut self, first: I, second: I) -> bool {
        if self.state != ScreenState::Ready || !self.engine.swap(first, second) {
            return false;
        }

        self.moves += 1;
        if self.engine.is_completed() {
            info!(
                "{} puzzle completed in {} move(s)",
                self.config.grid_size, self.moves
            );
            self.state = ScreenState::Completed;
        }
        true
    }

    /// Start over with a new grid; the picture has to be loaded again
    pub fn reset(&mut self) {
        self.engine.reset();
        self.pieces.clear();
        self.moves = 0;
        self.state = ScreenState::Loading;
    }
}
