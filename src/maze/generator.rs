use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::grid::{CellContent, Facing, GridPos, MazeGrid};

/// Smallest maze side length
pub const MIN_MAZE_SIZE: u32 = 2;
/// Largest maze side length
pub const MAX_MAZE_SIZE: u32 = 64;

const ENEMY_CHANCE: f64 = 0.15;
const TREASURE_CHANCE: f64 = 0.10;
const SECRET_ROOM_CHANCE: f64 = 0.25;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MazeError {
    #[error("maze dimensions {width}x{height} outside {min}..={max}", min = MIN_MAZE_SIZE, max = MAX_MAZE_SIZE)]
    InvalidDimensions { width: u32, height: u32 },
}

/// Seeded maze generator
///
/// A maze is fully determined by `(seed, width, height)`, which is what lets
/// a save store three numbers instead of the whole grid. A requested seed of
/// 0 means "pick one at random"; the seed that was actually used is kept and
/// is the one saves must record.
#[derive(Debug, Clone, Default)]
pub struct MazeGenerator {
    seed_used: u64,
    grid: Option<MazeGrid>,
}

impl MazeGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generates a new maze
    ///
    /// `requested_seed == 0` picks a random non-zero seed.
    pub fn generate(&mut self, requested_seed: u64, width: u32, height: u32) -> Result<&MazeGrid, MazeError> {
        let seed = if requested_seed == 0 {
            rand::thread_rng().gen_range(1..=u64::MAX)
        } else {
            requested_seed
        };
        tracing::debug!(requested_seed, seed, width, height, "generating maze");
        self.regenerate(seed, width, height)
    }

    /// Rebuilds the maze for an exact seed
    ///
    /// Two calls with the same arguments always produce identical grids.
    pub fn regenerate(&mut self, seed: u64, width: u32, height: u32) -> Result<&MazeGrid, MazeError> {
        let grid = build(seed, width, height)?;
        self.seed_used = seed;
        Ok(&*self.grid.insert(grid))
    }

    /// The seed the current maze was built from (never the "randomize" 0)
    pub fn seed_used(&self) -> u64 {
        self.seed_used
    }

    pub fn width(&self) -> u32 {
        self.grid.as_ref().map_or(0, MazeGrid::width)
    }

    pub fn height(&self) -> u32 {
        self.grid.as_ref().map_or(0, MazeGrid::height)
    }

    pub fn grid(&self) -> Option<&MazeGrid> {
        self.grid.as_ref()
    }

    pub fn grid_mut(&mut self) -> Option<&mut MazeGrid> {
        self.grid.as_mut()
    }
}

/// Builds a maze deterministically
///
/// Iterative recursive-backtracker carve from a random start, then the boss
/// goes in the cell farthest from the start by walking distance. Contents
/// are rolled in row-major order so the RNG stream is fixed by the seed.
pub fn build(seed: u64, width: u32, height: u32) -> Result<MazeGrid, MazeError> {
    let valid = MIN_MAZE_SIZE..=MAX_MAZE_SIZE;
    if !valid.contains(&width) || !valid.contains(&height) {
        return Err(MazeError::InvalidDimensions { width, height });
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut grid = MazeGrid::walled(width, height);

    let start = GridPos::new(rng.gen_range(0..width as i32), rng.gen_range(0..height as i32));
    carve_passages(&mut grid, start, &mut rng);

    let boss = farthest_from(&grid, start);
    grid.start = start;
    grid.boss = boss;

    let positions: Vec<GridPos> = grid.positions().collect();
    for pos in positions {
        let roll: f64 = rng.r#gen();
        let Some(cell) = grid.cell_mut(pos) else {
            continue;
        };
        cell.content = if pos == boss {
            CellContent::Boss
        } else if pos == start {
            CellContent::Empty
        } else if cell.openings() == 1 && roll < SECRET_ROOM_CHANCE {
            CellContent::SecretRoom
        } else if roll < ENEMY_CHANCE {
            CellContent::Enemy
        } else if roll < ENEMY_CHANCE + TREASURE_CHANCE {
            CellContent::Treasure
        } else {
            CellContent::Empty
        };
    }

    Ok(grid)
}

fn carve_passages(grid: &mut MazeGrid, start: GridPos, rng: &mut StdRng) {
    let mut visited = vec![false; (grid.width() * grid.height()) as usize];
    let index = |pos: GridPos, width: u32| pos.y as usize * width as usize + pos.x as usize;
    let width = grid.width();

    visited[index(start, width)] = true;
    let mut stack = vec![start];

    while let Some(&current) = stack.last() {
        let mut options: Vec<Facing> = Facing::all()
            .into_iter()
            .filter(|facing| {
                let next = current.step(*facing);
                grid.contains(next) && !visited[index(next, width)]
            })
            .collect();

        if options.is_empty() {
            stack.pop();
            continue;
        }

        options.shuffle(rng);
        let facing = options[0];
        let next = current.step(facing);
        grid.carve(current, facing);
        visited[index(next, width)] = true;
        stack.push(next);
    }
}

/// Breadth-first walk; ties go to the first cell reached
fn farthest_from(grid: &MazeGrid, start: GridPos) -> GridPos {
    let mut distance = vec![u32::MAX; (grid.width() * grid.height()) as usize];
    let index = |pos: GridPos| pos.y as usize * grid.width() as usize + pos.x as usize;

    let mut queue = VecDeque::from([start]);
    distance[index(start)] = 0;
    let mut farthest = (start, 0);

    while let Some(pos) = queue.pop_front() {
        let d = distance[index(pos)];
        if d > farthest.1 {
            farthest = (pos, d);
        }
        for facing in Facing::all() {
            if !grid.can_move(pos, facing) {
                continue;
            }
            let next = pos.step(facing);
            if distance[index(next)] == u32::MAX {
                distance[index(next)] = d + 1;
                queue.push_back(next);
            }
        }
    }

    farthest.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_maze() {
        let a = build(42, 12, 9).unwrap();
        let b = build(42, 12, 9).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_seed_different_maze() {
        let a = build(1, 16, 16).unwrap();
        let b = build(2, 16, 16).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_every_cell_reachable() {
        let grid = build(7, 10, 8).unwrap();
        let boss_distance_walk = farthest_from(&grid, grid.start());
        assert_eq!(boss_distance_walk, grid.boss());

        // A perfect maze has exactly cells - 1 passages
        let openings: u32 = grid.iter().map(|(_, cell)| cell.openings()).sum();
        assert_eq!(openings / 2, 10 * 8 - 1);
    }

    #[test]
    fn test_boss_not_on_start() {
        let grid = build(99, 5, 5).unwrap();
        assert_ne!(grid.start(), grid.boss());
        assert_eq!(grid.cell(grid.boss()).unwrap().content, CellContent::Boss);
    }

    #[test]
    fn test_invalid_dimensions() {
        assert_eq!(build(1, 1, 5), Err(MazeError::InvalidDimensions { width: 1, height: 5 }));
        assert!(build(1, 5, MAX_MAZE_SIZE + 1).is_err());
    }

    #[test]
    fn test_random_seed_is_recorded() {
        let mut generator = MazeGenerator::new();
        let first = generator.generate(0, 8, 8).unwrap().clone();
        let seed = generator.seed_used();
        assert_ne!(seed, 0);

        let again = generator.regenerate(seed, 8, 8).unwrap();
        assert_eq!(&first, again);
    }

    #[test]
    fn test_failed_regenerate_keeps_previous_maze() {
        let mut generator = MazeGenerator::new();
        generator.regenerate(5, 6, 6).unwrap();
        assert!(generator.regenerate(5, 0, 6).is_err());
        assert_eq!(generator.seed_used(), 5);
        assert_eq!(generator.width(), 6);
    }
}
