// Maze crawler module
//
// This module contains the procedurally generated maze and the things that
// live on top of it:
// - grid.rs: cells, walls, coordinates and facing
// - generator.rs: seeded, deterministic maze generation
// - player.rs: the party's position and facing inside the maze
// - minimap.rs: visited / revealed exploration tracking
// - run.rs: one crawl in progress, tying the above together

pub mod generator;
pub mod grid;
pub mod minimap;
pub mod player;
pub mod run;

pub use generator::{MAX_MAZE_SIZE, MIN_MAZE_SIZE, MazeError, MazeGenerator};
pub use grid::{Cell, CellContent, Facing, GridPos, MazeGrid};
pub use minimap::Minimap;
pub use player::MazePlayer;
pub use run::MazeRun;
