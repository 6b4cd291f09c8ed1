use serde::{Deserialize, Serialize};

/// A single puzzle piece.
///
/// `id` doubles as the index of the image slice the tile displays and never
/// changes. `correct_position` is the slot the tile belongs in when solved.
/// `current_position` and the lock flag are only mutated by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    id: usize,
    correct_position: usize,
    current_position: usize,
    is_locked: bool,
}

impl Tile {
    /// Create an unlocked tile
    pub fn new(id: usize, correct_position: usize, current_position: usize) -> Self {
        Self {
            id,
            correct_position,
            current_position,
            is_locked: false,
        }
    }

    /// Create a tile with an explicit lock state
    pub fn with_lock(
        id: usize,
        correct_position: usize,
        current_position: usize,
        is_locked: bool,
    ) -> Self {
        Self {
            id,
            correct_position,
            current_position,
            is_locked,
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn correct_position(&self) -> usize {
        self.correct_position
    }

    pub fn current_position(&self) -> usize {
        self.current_position
    }

    pub fn is_locked(&self) -> bool {
        self.is_locked
    }

    /// Whether the tile sits in its home slot
    pub fn is_in_correct_position(&self) -> bool {
        self.current_position == self.correct_position
    }

    pub(crate) fn set_current_position(&mut self, position: usize) {
        self.current_position = position;
    }

    /// Lock the tile if it is home. Never unlocks.
    pub(crate) fn lock_if_home(&mut self) -> bool {
        if self.is_in_correct_position() {
            self.is_locked = true;
        }
        self.is_locked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_tile_is_unlocked() {
        let tile = Tile::new(4, 4, 7);
        assert_eq!(tile.id(), 4);
        assert_eq!(tile.correct_position(), 4);
        assert_eq!(tile.current_position(), 7);
        assert!(!tile.is_locked());
        assert!(!tile.is_in_correct_position());
    }

    #[test]
    fn test_in_correct_position() {
        assert!(Tile::new(2, 2, 2).is_in_correct_position());
        assert!(!Tile::new(2, 2, 3).is_in_correct_position());
    }

    #[test]
    fn test_lock_only_when_home() {
        let mut away = Tile::new(1, 1, 5);
        assert!(!away.lock_if_home());
        assert!(!away.is_locked());

        let mut home = Tile::new(1, 1, 1);
        assert!(home.lock_if_home());
        assert!(home.is_locked());

        // Moving a locked tile's position does not unlock it
        home.set_current_position(3);
        assert!(home.lock_if_home());
    }

    #[test]
    fn test_structural_equality() {
        let a = Tile::with_lock(0, 0, 0, true);
        assert_eq!(a, Tile::with_lock(0, 0, 0, true));
        assert_ne!(a, Tile::with_lock(0, 0, 0, false));
        assert_ne!(a, Tile::with_lock(0, 0, 1, true));
    }

    #[test]
    fn test_serde_field_names() {
        let tile = Tile::with_lock(3, 3, 5, false);
        let json = serde_json::to_string(&tile).unwrap();
        assert_eq!(
            json,
            r#"{"id":3,"correct_position":3,"current_position":5,"is_locked":false}"#
        );
        let back: Tile = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tile);
    }
}
