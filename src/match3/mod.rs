// Match-3 battle board
//
// Matching rules live elsewhere; this module holds what a save needs to see:
// the piece grid, per-player moves and color tallies, and whether the board
// is in the middle of animating.

pub mod board;
pub mod piece;

pub use board::{Board, BoardActivity, BoardError, BoardPhase, EMPTY_CELL, MAX_BOARD_SIZE};
pub use piece::PieceType;
