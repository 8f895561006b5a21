//! Property-based tests for maze regeneration.
//!
//! A save stores only `(seed, width, height)` plus progress, so every maze
//! the generator can produce has to come back identical.

use proptest::prelude::*;
use six_stones::maze::{CellContent, MAX_MAZE_SIZE, MIN_MAZE_SIZE, MazeRun, generator};
use six_stones::save::capture::capture_maze;
use six_stones::save::restore::{RestoreReport, restore_maze};

// ===========================================================================
// Generators
// ===========================================================================

fn arb_dims() -> impl Strategy<Value = (u32, u32)> {
    (MIN_MAZE_SIZE..=24u32, MIN_MAZE_SIZE..=24u32)
}

/// Moves for a random walk: 0 = forward, 1 = left, 2 = right
fn arb_walk() -> impl Strategy<Value = Vec<u8>> {
    proptest::collection::vec(0..3u8, 0..80)
}

// ===========================================================================
// Properties
// ===========================================================================

proptest! {
    #[test]
    fn same_seed_same_maze(seed in 1..u64::MAX, (width, height) in arb_dims()) {
        let a = generator::build(seed, width, height).unwrap();
        let b = generator::build(seed, width, height).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn every_maze_is_perfect(seed in any::<u64>(), (width, height) in arb_dims()) {
        let grid = generator::build(seed, width, height).unwrap();
        let openings: u32 = grid.iter().map(|(_, cell)| cell.openings()).sum();
        prop_assert_eq!(openings / 2, width * height - 1);

        let bosses = grid.iter().filter(|(_, cell)| cell.content == CellContent::Boss).count();
        prop_assert_eq!(bosses, 1);
        prop_assert_ne!(grid.start(), grid.boss());
    }

    #[test]
    fn explored_maze_restores_exactly(
        seed in 1..u64::MAX,
        (width, height) in arb_dims(),
        walk in arb_walk(),
    ) {
        let mut source = MazeRun::new();
        source.start(seed, width, height).unwrap();
        for step in walk {
            match step {
                0 => {
                    source.step_forward();
                    source.defeat_enemy_here();
                    source.collect_treasure_here();
                    source.open_secret_here();
                }
                1 => source.player.turn_left(),
                _ => source.player.turn_right(),
            }
        }

        let data = capture_maze(&source);
        let mut target = MazeRun::new();
        let mut report = RestoreReport::default();
        restore_maze(&data, &mut target, &mut report).unwrap();

        prop_assert!(report.is_clean());
        prop_assert_eq!(target.grid(), source.grid());
        prop_assert_eq!(target.player, source.player);
        prop_assert_eq!(&target.minimap, &source.minimap);
    }

    #[test]
    fn out_of_range_dimensions_rejected(seed in any::<u64>(), width in (MAX_MAZE_SIZE + 1)..200u32) {
        prop_assert!(generator::build(seed, width, 4).is_err());
        prop_assert!(generator::build(seed, 4, width).is_err());
    }
}
