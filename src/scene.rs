//! Scene identifiers
//!
//! Saves record the scene the player was in as a closed enum rather than a
//! free-form name, so renaming a scene file never strands old saves. This
//! module maps that enum to scene names and back, and decides where a loaded
//! save is allowed to send the player.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Every scene the game can be in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GameScene {
    #[default]
    MainMenu,
    Loading,
    Overworld,
    Maze,
    Battle,
    Credits,
}

/// Scene a load falls back to when the recorded one can't be used
pub const SAFE_GAMEPLAY_SCENE: GameScene = GameScene::Overworld;

impl GameScene {
    /// All scenes, in build order
    pub fn all() -> [GameScene; 6] {
        [
            Self::MainMenu,
            Self::Loading,
            Self::Overworld,
            Self::Maze,
            Self::Battle,
            Self::Credits,
        ]
    }

    /// Scene name as the scene loader knows it
    pub fn name(&self) -> &'static str {
        match self {
            Self::MainMenu => "MainMenu",
            Self::Loading => "Loading",
            Self::Overworld => "Overworld",
            Self::Maze => "MazeCrawler",
            Self::Battle => "Match3Battle",
            Self::Credits => "Credits",
        }
    }

    /// Looks a scene up by its loader name
    ///
    /// Returns None for names that don't belong to any known scene.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().into_iter().find(|scene| scene.name() == name)
    }

    /// Returns true for scenes the player actually plays in
    ///
    /// Menus, loading screens and credits hold no game state worth restoring
    /// into.
    pub fn is_gameplay(&self) -> bool {
        matches!(self, Self::Overworld | Self::Maze | Self::Battle)
    }
}

impl fmt::Display for GameScene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Picks the scene a loaded save should jump into
///
/// A missing or non-gameplay scene falls back to [`SAFE_GAMEPLAY_SCENE`].
pub fn resolve_load_target(recorded: Option<GameScene>) -> GameScene {
    match recorded {
        Some(scene) if scene.is_gameplay() => scene,
        Some(scene) => {
            tracing::warn!(%scene, "saved scene is not a gameplay scene, using {}", SAFE_GAMEPLAY_SCENE);
            SAFE_GAMEPLAY_SCENE
        }
        None => SAFE_GAMEPLAY_SCENE,
    }
}
