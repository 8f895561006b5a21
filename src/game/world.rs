// GameWorld struct and live subsystem ownership
//
// The world owns every live subsystem the save engine reads from and writes
// to. Subsystems that only exist in some scenes (the maze, the battle board)
// are Options; an absent one captures as a default section.

use serde::{Deserialize, Serialize};

use crate::inventory::{Equipment, Inventory, InventoryProvider};
use crate::item::ItemCatalog;
use crate::match3::Board;
use crate::maze::{GridPos, MazeError, MazeRun};
use crate::options::GameOptions;
use crate::scene::GameScene;
use crate::spells::SpellBook;
use crate::stats::PartyStats;
use crate::status::StatusEffects;

/// Slots in a new party's pack
pub const STARTING_INVENTORY_SLOTS: usize = 20;

/// Side length of a battle board
pub const BOARD_SIZE: u32 = 8;

/// Where the party stands in the overworld
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OverworldProgress {
    pub zone: i32,
    pub subzone: i32,
    pub map: i32,
    pub position: GridPos,
}

/// All live game state
#[derive(Debug, Clone, Default)]
pub struct GameWorld {
    pub scene: GameScene,
    pub progress: OverworldProgress,
    pub stats: Option<PartyStats>,
    pub inventory: Option<Inventory>,
    pub equipment: Option<Equipment>,
    pub spells: Option<SpellBook>,
    pub status_effects: Option<StatusEffects>,
    pub maze: Option<MazeRun>,
    pub board: Option<Board>,
    pub options: Option<GameOptions>,
}

impl GameWorld {
    /// A world with nothing in it, as at the main menu
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh party standing in the first overworld zone
    pub fn new_game(catalog: &ItemCatalog) -> Self {
        let mut inventory = Inventory::new(STARTING_INVENTORY_SLOTS);
        for (item, quantity) in [("Sword", 1), ("Potion", 3)] {
            if let Err(err) = inventory.add_item(item, quantity, catalog) {
                tracing::warn!(item, error = %err, "starting item missing from catalog");
            }
        }

        GameWorld {
            scene: GameScene::Overworld,
            progress: OverworldProgress { zone: 1, subzone: 1, map: 1, position: GridPos::default() },
            stats: Some(PartyStats::new()),
            inventory: Some(inventory),
            equipment: Some(Equipment::new()),
            spells: Some(SpellBook::new()),
            status_effects: Some(StatusEffects::new()),
            maze: None,
            board: None,
            options: Some(GameOptions::new()),
        }
    }

    /// Starts a maze crawl and switches to the maze scene
    ///
    /// `seed == 0` picks a random seed.
    pub fn enter_maze(&mut self, seed: u64, width: u32, height: u32) -> Result<(), MazeError> {
        let mut run = MazeRun::new();
        run.start(seed, width, height)?;
        self.maze = Some(run);
        self.scene = GameScene::Maze;
        Ok(())
    }

    /// Leaves the maze, dropping its state
    pub fn leave_maze(&mut self) {
        self.maze = None;
        self.scene = GameScene::Overworld;
    }

    /// Opens a battle board
    pub fn start_battle(&mut self, seed: u64) {
        self.board = Some(Board::seeded(BOARD_SIZE, BOARD_SIZE, seed));
        self.scene = GameScene::Battle;
    }

    /// Closes the battle board, returning to the maze if one is running
    pub fn end_battle(&mut self) {
        self.board = None;
        self.scene = if self.maze.is_some() { GameScene::Maze } else { GameScene::Overworld };
    }

    /// Advances per-frame timers
    pub fn tick(&mut self, dt: f32) {
        if let Some(board) = &mut self.board {
            board.advance_frame();
        }
        if let Some(spells) = &mut self.spells {
            spells.tick(dt);
        }
        if let Some(effects) = &mut self.status_effects {
            effects.tick(dt);
        }
    }
}
