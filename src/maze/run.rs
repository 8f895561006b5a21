use super::generator::{MazeError, MazeGenerator};
use super::grid::{Cell, CellContent, GridPos, MazeGrid};
use super::minimap::Minimap;
use super::player::MazePlayer;

/// One maze crawl in progress: the generated maze, the party and the minimap
#[derive(Debug, Clone, Default)]
pub struct MazeRun {
    pub generator: MazeGenerator,
    pub player: MazePlayer,
    pub minimap: Minimap,
}

impl MazeRun {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generates a fresh maze and drops the party at its start
    ///
    /// `seed == 0` picks a random seed.
    pub fn start(&mut self, seed: u64, width: u32, height: u32) -> Result<(), MazeError> {
        self.generator.generate(seed, width, height)?;
        self.minimap.reset();
        let Some(grid) = self.generator.grid_mut() else {
            return Ok(());
        };
        self.player.place(grid.start(), Default::default());
        self.player.enter(grid, &mut self.minimap);
        Ok(())
    }

    pub fn grid(&self) -> Option<&MazeGrid> {
        self.generator.grid()
    }

    /// Walks forward, returning false if blocked or no maze exists
    pub fn step_forward(&mut self) -> bool {
        match self.generator.grid_mut() {
            Some(grid) => self.player.step_forward(grid, &mut self.minimap),
            None => false,
        }
    }

    /// Marks the enemy in the party's cell as beaten
    pub fn defeat_enemy_here(&mut self) -> bool {
        self.mark_here(CellContent::Enemy, |cell| &mut cell.enemy_defeated)
    }

    /// Picks up the treasure in the party's cell
    pub fn collect_treasure_here(&mut self) -> bool {
        self.mark_here(CellContent::Treasure, |cell| &mut cell.treasure_collected)
    }

    /// Opens the secret room the party is standing in
    pub fn open_secret_here(&mut self) -> bool {
        self.mark_here(CellContent::SecretRoom, |cell| &mut cell.secret_opened)
    }

    fn mark_here(&mut self, content: CellContent, flag: fn(&mut Cell) -> &mut bool) -> bool {
        let position = self.player.position();
        let Some(cell) = self.generator.grid_mut().and_then(|grid| grid.cell_mut(position)) else {
            return false;
        };
        if cell.content != content || *flag(cell) {
            return false;
        }
        *flag(cell) = true;
        true
    }

    /// Positions of every opened secret room, row-major
    pub fn opened_secret_rooms(&self) -> Vec<GridPos> {
        self.grid()
            .map(|grid| {
                grid.iter()
                    .filter(|(_, cell)| cell.secret_opened)
                    .map(|(pos, _)| pos)
                    .collect()
            })
            .unwrap_or_default()
    }
}
