//! Property tests for the grid invariants: every id appears exactly once,
//! array index equals current position, locks never release.

use picpuzzle_core::{GridSize, PuzzleEngine, Tile};
use proptest::prelude::*;

fn assert_invariants(engine: &PuzzleEngine) -> Result<(), TestCaseError> {
    let total = engine.total_tiles();
    let mut seen = vec![false; total];
    for (slot, tile) in engine.tiles().iter().enumerate() {
        prop_assert_eq!(tile.current_position(), slot);
        prop_assert!(tile.id() < total);
        prop_assert!(!seen[tile.id()], "tile {} appears twice", tile.id());
        seen[tile.id()] = true;
    }
    prop_assert_eq!(
        engine.is_completed(),
        engine.tiles().iter().all(Tile::is_in_correct_position)
    );
    Ok(())
}

proptest! {
    #[test]
    fn prop_fresh_grid_is_unsolved_permutation(size in 2usize..=8, seed in any::<u64>()) {
        let mut engine = PuzzleEngine::with_seed(GridSize::new(size).unwrap(), seed);
        prop_assert_eq!(engine.total_tiles(), size * size);
        assert_invariants(&engine)?;
        prop_assert!(!engine.is_completed());

        engine.reset();
        assert_invariants(&engine)?;
        prop_assert!(!engine.is_completed());
    }

    /// Random swap sequences, including out-of-range and self swaps
    #[test]
    fn prop_swaps_keep_invariants_and_locks(
        size in 2usize..=5,
        seed in any::<u64>(),
        moves in prop::collection::vec((-2i64..30, -2i64..30), 0..200),
    ) {
        let mut engine = PuzzleEngine::with_seed(GridSize::new(size).unwrap(), seed);
        let mut locked: Vec<bool> = engine.tiles().iter().map(Tile::is_locked).collect();

        for (a, b) in moves {
            let before = engine.tiles().to_vec();
            let allowed = engine.can_swap(a, b);
            let swapped = engine.swap(a, b);
            prop_assert_eq!(allowed, swapped);

            if swapped {
                let (a, b) = (a as usize, b as usize);
                prop_assert_ne!(a, b);
                prop_assert_eq!(engine.tiles()[a].id(), before[b].id());
                prop_assert_eq!(engine.tiles()[b].id(), before[a].id());
            } else {
                prop_assert_eq!(engine.tiles(), &before[..]);
            }

            assert_invariants(&engine)?;

            // Locks follow the tile, and a locked tile never moves again
            for (slot, tile) in engine.tiles().iter().enumerate() {
                if locked[tile.id()] {
                    prop_assert!(tile.is_locked());
                    prop_assert_eq!(slot, tile.id());
                }
                prop_assert_eq!(tile.is_locked(), tile.is_in_correct_position());
            }
            for tile in engine.tiles() {
                locked[tile.id()] = tile.is_locked();
            }
        }
    }

    #[test]
    fn prop_locked_tiles_never_swappable(size in 2usize..=5, seed in any::<u64>()) {
        let engine = PuzzleEngine::with_seed(GridSize::new(size).unwrap(), seed);
        let total = engine.total_tiles();
        for a in 0..total {
            for b in 0..total {
                let expected = a != b
                    && !engine.tiles()[a].is_locked()
                    && !engine.tiles()[b].is_locked();
                prop_assert_eq!(engine.can_swap(a, b), expected);
            }
        }
    }
}

#[test]
fn fully_locked_grid_is_completed() {
    let size = GridSize::new(4).unwrap();
    let mut engine = PuzzleEngine::with_seed(size, 77);
    while !engine.is_completed() {
        let slot = engine
            .tiles()
            .iter()
            .position(|tile| !tile.is_in_correct_position())
            .unwrap();
        let from = engine
            .tiles()
            .iter()
            .position(|tile| tile.id() == slot)
            .unwrap();
        assert!(engine.swap(slot, from));
    }
    assert_eq!(engine.locked_count(), size.total_tiles());
}
