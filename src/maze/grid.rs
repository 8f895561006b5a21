use serde::{Deserialize, Serialize};

/// Integer grid coordinate
///
/// Ordered row-major (y first) so sorted collections of positions read like
/// the grid does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

impl GridPos {
    pub const fn new(x: i32, y: i32) -> Self {
        GridPos { x, y }
    }

    /// The neighbouring position one step towards `facing`
    pub fn step(&self, facing: Facing) -> GridPos {
        let (dx, dy) = facing.delta();
        GridPos::new(self.x + dx, self.y + dy)
    }
}

impl Ord for GridPos {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.y, self.x).cmp(&(other.y, other.x))
    }
}

impl PartialOrd for GridPos {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Four-way facing direction
///
/// North is towards y = 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Facing {
    #[default]
    North,
    East,
    South,
    West,
}

impl Facing {
    pub fn all() -> [Facing; 4] {
        [Self::North, Self::East, Self::South, Self::West]
    }

    pub fn delta(&self) -> (i32, i32) {
        match self {
            Self::North => (0, -1),
            Self::East => (1, 0),
            Self::South => (0, 1),
            Self::West => (-1, 0),
        }
    }

    pub fn opposite(&self) -> Facing {
        match self {
            Self::North => Self::South,
            Self::East => Self::West,
            Self::South => Self::North,
            Self::West => Self::East,
        }
    }

    pub fn turn_left(&self) -> Facing {
        match self {
            Self::North => Self::West,
            Self::West => Self::South,
            Self::South => Self::East,
            Self::East => Self::North,
        }
    }

    pub fn turn_right(&self) -> Facing {
        self.turn_left().opposite()
    }

    fn wall_bit(&self) -> u8 {
        match self {
            Self::North => 0b0001,
            Self::East => 0b0010,
            Self::South => 0b0100,
            Self::West => 0b1000,
        }
    }
}

/// What a cell holds when the maze is generated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellContent {
    Empty,
    Enemy,
    Treasure,
    SecretRoom,
    Boss,
}

/// One maze cell
///
/// `walls` and `content` come from generation and never change. The flags
/// below them are the mutable state a save has to carry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    walls: u8,
    pub content: CellContent,
    pub explored: bool,
    pub enemy_defeated: bool,
    pub treasure_collected: bool,
    pub secret_opened: bool,
}

impl Cell {
    fn walled() -> Self {
        Cell {
            walls: 0b1111,
            content: CellContent::Empty,
            explored: false,
            enemy_defeated: false,
            treasure_collected: false,
            secret_opened: false,
        }
    }

    pub fn has_wall(&self, facing: Facing) -> bool {
        self.walls & facing.wall_bit() != 0
    }

    pub(crate) fn remove_wall(&mut self, facing: Facing) {
        self.walls &= !facing.wall_bit();
    }

    /// Number of open sides
    pub fn openings(&self) -> u32 {
        4 - self.walls.count_ones()
    }

    /// True when any save-worthy flag is set
    pub fn has_progress(&self) -> bool {
        self.explored || self.enemy_defeated || self.treasure_collected
    }
}

/// A generated maze
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MazeGrid {
    width: u32,
    height: u32,
    cells: Vec<Cell>,
    pub(crate) start: GridPos,
    pub(crate) boss: GridPos,
}

impl MazeGrid {
    /// A grid with every wall standing
    pub(crate) fn walled(width: u32, height: u32) -> Self {
        MazeGrid {
            width,
            height,
            cells: vec![Cell::walled(); (width * height) as usize],
            start: GridPos::default(),
            boss: GridPos::default(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn start(&self) -> GridPos {
        self.start
    }

    pub fn boss(&self) -> GridPos {
        self.boss
    }

    pub fn contains(&self, pos: GridPos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as u32) < self.width && (pos.y as u32) < self.height
    }

    fn index(&self, pos: GridPos) -> Option<usize> {
        self.contains(pos)
            .then(|| pos.y as usize * self.width as usize + pos.x as usize)
    }

    pub fn cell(&self, pos: GridPos) -> Option<&Cell> {
        self.index(pos).map(|i| &self.cells[i])
    }

    pub fn cell_mut(&mut self, pos: GridPos) -> Option<&mut Cell> {
        self.index(pos).map(move |i| &mut self.cells[i])
    }

    /// True if the party can walk from `pos` one step towards `facing`
    pub fn can_move(&self, pos: GridPos, facing: Facing) -> bool {
        self.cell(pos).is_some_and(|cell| !cell.has_wall(facing)) && self.contains(pos.step(facing))
    }

    /// Knocks down the wall between `pos` and its neighbour towards `facing`
    pub(crate) fn carve(&mut self, pos: GridPos, facing: Facing) {
        let next = pos.step(facing);
        if !self.contains(pos) || !self.contains(next) {
            return;
        }
        if let Some(cell) = self.cell_mut(pos) {
            cell.remove_wall(facing);
        }
        if let Some(cell) = self.cell_mut(next) {
            cell.remove_wall(facing.opposite());
        }
    }

    /// Every position in row-major order
    pub fn positions(&self) -> impl Iterator<Item = GridPos> + use<> {
        let width = self.width as i32;
        let height = self.height as i32;
        (0..height).flat_map(move |y| (0..width).map(move |x| GridPos::new(x, y)))
    }

    /// Every cell with its position, row-major
    pub fn iter(&self) -> impl Iterator<Item = (GridPos, &Cell)> {
        self.positions().zip(self.cells.iter())
    }
}
