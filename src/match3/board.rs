use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::piece::PieceType;
use crate::stats::PLAYER_COUNT;

/// Code for an empty cell in a flattened board
pub const EMPTY_CELL: i32 = -1;

/// Largest board side a save may ask for
pub const MAX_BOARD_SIZE: u32 = 32;

/// Moves each player gets at the start of a battle
pub const STARTING_MOVES: u32 = 20;

/// Frames a swap animation takes
const SWAP_FRAMES: u32 = 12;
/// Frames pieces take to fall into gaps
const FALL_FRAMES: u32 = 8;

/// The one question the save gate asks a board
pub trait BoardActivity {
    /// True while pieces are swapping, falling or matches are resolving
    fn is_processing(&self) -> bool;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("board {width}x{height} exceeds {max}x{max}", max = MAX_BOARD_SIZE)]
    InvalidSize { width: u32, height: u32 },
    #[error("board array has {actual} cells, expected {expected}")]
    SizeMismatch { expected: usize, actual: usize },
    #[error("unknown piece code {code} at index {index}")]
    UnknownPiece { code: i32, index: usize },
    #[error("cell ({x}, {y}) is outside the board")]
    OutOfBounds { x: i32, y: i32 },
    #[error("board is busy")]
    Busy,
}

/// Where the board is in its animation cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoardPhase {
    #[default]
    Idle,
    Swapping { frames_left: u32, a: (i32, i32), b: (i32, i32) },
    Falling { frames_left: u32 },
}

/// Live match-3 board
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    width: u32,
    height: u32,
    cells: Vec<Option<PieceType>>,
    phase: BoardPhase,
    moves_remaining: [u32; PLAYER_COUNT],
    color_scores: [BTreeMap<PieceType, u32>; PLAYER_COUNT],
}

impl Board {
    /// An empty board
    pub fn new(width: u32, height: u32) -> Self {
        Board {
            width,
            height,
            cells: vec![None; width as usize * height as usize],
            phase: BoardPhase::Idle,
            moves_remaining: [STARTING_MOVES; PLAYER_COUNT],
            color_scores: Default::default(),
        }
    }

    /// A board filled from a seed
    pub fn seeded(width: u32, height: u32, seed: u64) -> Self {
        let mut board = Self::new(width, height);
        let mut rng = StdRng::seed_from_u64(seed);
        for cell in &mut board.cells {
            *cell = Some(PieceType::all()[rng.gen_range(0..PieceType::COUNT)]);
        }
        board
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn phase(&self) -> BoardPhase {
        self.phase
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        (x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height)
            .then(|| y as usize * self.width as usize + x as usize)
    }

    pub fn piece(&self, x: i32, y: i32) -> Option<PieceType> {
        self.index(x, y).and_then(|i| self.cells[i])
    }

    pub fn set_piece(&mut self, x: i32, y: i32, piece: Option<PieceType>) -> Result<(), BoardError> {
        let i = self.index(x, y).ok_or(BoardError::OutOfBounds { x, y })?;
        self.cells[i] = piece;
        Ok(())
    }

    /// Encodes the board as `index = y * width + x`
    ///
    /// Each entry is the piece code, or [`EMPTY_CELL`].
    pub fn flatten(&self) -> Vec<i32> {
        self.cells
            .iter()
            .map(|cell| cell.map_or(EMPTY_CELL, |piece| piece.code()))
            .collect()
    }

    /// Rebuilds the board from [`Board::flatten`] output
    ///
    /// The board is resized to `width` x `height`, each at most
    /// [`MAX_BOARD_SIZE`]. Nothing changes on error.
    pub fn restore_flat(&mut self, width: u32, height: u32, flat: &[i32]) -> Result<(), BoardError> {
        if width > MAX_BOARD_SIZE || height > MAX_BOARD_SIZE {
            return Err(BoardError::InvalidSize { width, height });
        }
        let expected = width as usize * height as usize;
        if flat.len() != expected {
            return Err(BoardError::SizeMismatch { expected, actual: flat.len() });
        }

        let cells = flat
            .iter()
            .enumerate()
            .map(|(index, &code)| match code {
                EMPTY_CELL => Ok(None),
                _ => PieceType::from_code(code)
                    .map(Some)
                    .ok_or(BoardError::UnknownPiece { code, index }),
            })
            .collect::<Result<Vec<_>, _>>()?;

        self.width = width;
        self.height = height;
        self.cells = cells;
        self.phase = BoardPhase::Idle;
        Ok(())
    }

    /// Starts a swap animation between two cells
    ///
    /// The pieces trade places when the animation finishes.
    pub fn begin_swap(&mut self, a: (i32, i32), b: (i32, i32)) -> Result<(), BoardError> {
        if self.is_processing() {
            return Err(BoardError::Busy);
        }
        for (x, y) in [a, b] {
            self.index(x, y).ok_or(BoardError::OutOfBounds { x, y })?;
        }
        self.phase = BoardPhase::Swapping { frames_left: SWAP_FRAMES, a, b };
        Ok(())
    }

    /// Starts pieces falling into empty cells
    pub fn begin_fall(&mut self) {
        self.phase = BoardPhase::Falling { frames_left: FALL_FRAMES };
    }

    /// Advances the animation by one frame
    pub fn advance_frame(&mut self) {
        self.phase = match self.phase {
            BoardPhase::Idle => BoardPhase::Idle,
            BoardPhase::Swapping { frames_left, a, b } if frames_left > 1 => {
                BoardPhase::Swapping { frames_left: frames_left - 1, a, b }
            }
            BoardPhase::Swapping { a, b, .. } => {
                if let (Some(i), Some(j)) = (self.index(a.0, a.1), self.index(b.0, b.1)) {
                    self.cells.swap(i, j);
                }
                BoardPhase::Idle
            }
            BoardPhase::Falling { frames_left } if frames_left > 1 => BoardPhase::Falling { frames_left: frames_left - 1 },
            BoardPhase::Falling { .. } => {
                self.settle_columns();
                BoardPhase::Idle
            }
        };
    }

    /// Drops pieces down so gaps end up at the top of each column
    fn settle_columns(&mut self) {
        let width = self.width as usize;
        for x in 0..width {
            let column: Vec<PieceType> = (0..self.height as usize)
                .filter_map(|y| self.cells[y * width + x])
                .collect();
            let gaps = self.height as usize - column.len();
            for y in 0..self.height as usize {
                self.cells[y * width + x] = if y < gaps { None } else { Some(column[y - gaps]) };
            }
        }
    }

    pub fn moves_remaining(&self, player: usize) -> u32 {
        self.moves_remaining.get(player).copied().unwrap_or(0)
    }

    pub fn set_moves_remaining(&mut self, player: usize, moves: u32) {
        if let Some(slot) = self.moves_remaining.get_mut(player) {
            *slot = moves;
        }
    }

    pub fn color_scores(&self, player: usize) -> BTreeMap<PieceType, u32> {
        self.color_scores.get(player).cloned().unwrap_or_default()
    }

    pub fn set_color_scores(&mut self, player: usize, scores: BTreeMap<PieceType, u32>) {
        if let Some(slot) = self.color_scores.get_mut(player) {
            *slot = scores;
        }
    }

    /// Adds to one player's tally for a color
    pub fn add_color_score(&mut self, player: usize, piece: PieceType, amount: u32) {
        if let Some(scores) = self.color_scores.get_mut(player) {
            *scores.entry(piece).or_default() += amount;
        }
    }
}

impl BoardActivity for Board {
    fn is_processing(&self) -> bool {
        self.phase != BoardPhase::Idle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flatten_index_formula() {
        let mut board = Board::new(3, 2);
        board.set_piece(2, 1, Some(PieceType::Onyx)).unwrap();
        board.set_piece(1, 0, Some(PieceType::Sapphire)).unwrap();

        let flat = board.flatten();
        let index = |x: usize, y: usize| y * 3 + x;
        assert_eq!(flat[index(2, 1)], PieceType::Onyx.code());
        assert_eq!(flat[index(1, 0)], PieceType::Sapphire.code());
        assert_eq!(flat[0], EMPTY_CELL);
    }

    #[test]
    fn test_restore_flat_resizes() {
        let source = Board::seeded(5, 4, 11);
        let mut target = Board::new(2, 2);
        target.restore_flat(5, 4, &source.flatten()).unwrap();

        assert_eq!(target.width(), 5);
        assert_eq!(target.flatten(), source.flatten());
    }

    #[test]
    fn test_restore_flat_rejects_oversized_board() {
        let mut board = Board::new(0, 0);
        assert_eq!(
            board.restore_flat(65_536, 65_536, &[]),
            Err(BoardError::InvalidSize { width: 65_536, height: 65_536 })
        );
        assert_eq!(
            board.restore_flat(MAX_BOARD_SIZE + 1, 1, &[EMPTY_CELL; 33]),
            Err(BoardError::InvalidSize { width: MAX_BOARD_SIZE + 1, height: 1 })
        );
        assert_eq!(board.width(), 0);
        assert!(board.flatten().is_empty());
    }

    #[test]
    fn test_restore_flat_rejects_bad_input() {
        let mut board = Board::seeded(2, 2, 1);
        let before = board.clone();

        assert_eq!(
            board.restore_flat(2, 2, &[0, 1, 2]),
            Err(BoardError::SizeMismatch { expected: 4, actual: 3 })
        );
        assert_eq!(
            board.restore_flat(2, 2, &[0, 1, 9, 2]),
            Err(BoardError::UnknownPiece { code: 9, index: 2 })
        );
        assert_eq!(board, before);
    }

    #[test]
    fn test_swap_is_busy_until_finished() {
        let mut board = Board::new(2, 1);
        board.set_piece(0, 0, Some(PieceType::Ruby)).unwrap();
        board.set_piece(1, 0, Some(PieceType::Topaz)).unwrap();

        board.begin_swap((0, 0), (1, 0)).unwrap();
        assert!(board.is_processing());
        assert_eq!(board.begin_swap((0, 0), (1, 0)), Err(BoardError::Busy));

        for _ in 0..SWAP_FRAMES {
            board.advance_frame();
        }
        assert!(!board.is_processing());
        assert_eq!(board.piece(0, 0), Some(PieceType::Topaz));
        assert_eq!(board.piece(1, 0), Some(PieceType::Ruby));
    }

    #[test]
    fn test_fall_settles_columns() {
        let mut board = Board::new(1, 3);
        board.set_piece(0, 0, Some(PieceType::Emerald)).unwrap();

        board.begin_fall();
        for _ in 0..FALL_FRAMES {
            board.advance_frame();
        }
        assert_eq!(board.piece(0, 2), Some(PieceType::Emerald));
        assert_eq!(board.piece(0, 0), None);
    }

    #[test]
    fn test_color_scores_per_player() {
        let mut board = Board::new(2, 2);
        board.add_color_score(0, PieceType::Ruby, 3);
        board.add_color_score(0, PieceType::Ruby, 2);
        board.add_color_score(1, PieceType::Onyx, 1);

        assert_eq!(board.color_scores(0)[&PieceType::Ruby], 5);
        assert!(board.color_scores(1).get(&PieceType::Ruby).is_none());
        assert!(board.color_scores(5).is_empty());
    }
}
