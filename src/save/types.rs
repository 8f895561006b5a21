//! Save data types for Six Stones
//!
//! This module defines all the data structures written to a save slot. They
//! are plain data: capture fills them from the live game, restore reads them
//! back, and nothing holds on to one between operations.
//!
//! Every record is `#[serde(default)]`, so a file missing a section loads
//! with that section default-initialized instead of failing.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::maze::{Facing, GridPos};
use crate::match3::PieceType;
use crate::scene::GameScene;
use crate::stats::{AbilityScores, PLAYER_COUNT};

/// Current save schema version
pub const CURRENT_SAVE_VERSION: &str = "1.1";

/// The root save file structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SaveData {
    pub save_version: String,
    pub saved_at: DateTime<Utc>,
    pub playtime_seconds: f64,
    pub scene: GameScene,
    pub progress: PlayerProgressData,
    pub stats: PlayerStatsData,
    pub inventory: InventoryData,
    pub equipment: EquipmentData,
    pub spells: SpellSystemData,
    pub status_effects: StatusEffectsSaveData,
    pub maze: MazeStateData,
    pub match3: Match3StateData,
    pub options: GameOptionsData,
}

impl SaveData {
    /// An empty save stamped with the current version
    pub fn new(saved_at: DateTime<Utc>) -> Self {
        SaveData {
            saved_at,
            ..Default::default()
        }
    }
}

impl Default for SaveData {
    fn default() -> Self {
        SaveData {
            save_version: CURRENT_SAVE_VERSION.to_string(),
            saved_at: DateTime::<Utc>::default(),
            playtime_seconds: 0.0,
            scene: GameScene::default(),
            progress: PlayerProgressData::default(),
            stats: PlayerStatsData::default(),
            inventory: InventoryData::default(),
            equipment: EquipmentData::default(),
            spells: SpellSystemData::default(),
            status_effects: StatusEffectsSaveData::default(),
            maze: MazeStateData::default(),
            match3: Match3StateData::default(),
            options: GameOptionsData::default(),
        }
    }
}

/// Where the party is in the overworld hierarchy
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlayerProgressData {
    pub zone: i32,
    pub subzone: i32,
    pub map: i32,
    pub grid_position: GridPos,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlayerVitalsData {
    pub current_health: i32,
    pub max_health: i32,
    pub score: u32,
}

/// Party stats
///
/// `ability_bonuses` and `armor_class` are derived from equipment and
/// recorded as a snapshot. Restore never writes them back.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlayerStatsData {
    pub players: [PlayerVitalsData; PLAYER_COUNT],
    pub level: u32,
    pub experience: u64,
    pub currency: u64,
    pub ability_bonuses: AbilityScores,
    pub armor_class: i32,
}

impl PlayerStatsData {
    /// False for a section written while no party existed
    pub fn is_present(&self) -> bool {
        *self != Self::default()
    }
}

/// One inventory slot; `item_id: None` with quantity 0 is an empty slot
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InventorySlotData {
    pub item_id: Option<String>,
    pub quantity: u32,
}

impl InventorySlotData {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.item_id.is_none()
    }
}

/// Inventory in slot order, empty slots included
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InventoryData {
    pub max_slots: u32,
    pub slots: Vec<InventorySlotData>,
}

impl InventoryData {
    pub fn is_present(&self) -> bool {
        self.max_slots > 0 || !self.slots.is_empty()
    }
}

/// Worn items by name
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EquipmentData {
    pub head: Option<String>,
    pub chest: Option<String>,
    pub legs: Option<String>,
    pub feet: Option<String>,
    pub main_hand: Option<String>,
    pub off_hand: Option<String>,
    pub two_hand: Option<String>,
    pub ring: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SpellSystemData {
    pub learned_spells: Vec<String>,
    pub prepared_spells: Vec<String>,
    pub cooldowns: BTreeMap<String, f32>,
    pub charges: BTreeMap<String, u32>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StatusEffectData {
    pub effect_name: String,
    pub player_index: usize,
    pub stacks: u32,
    pub remaining_duration: f32,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StatusEffectsSaveData {
    pub active_effects: Vec<StatusEffectData>,
}

/// Mutable flags for one maze cell
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CellStateData {
    pub x: i32,
    pub y: i32,
    pub explored: bool,
    pub enemy_defeated: bool,
    pub treasure_collected: bool,
}

/// Maze state
///
/// The layout itself is not stored: `(seed, width, height)` regenerates it.
/// A width of 0 means no maze was running when the save was made.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MazeStateData {
    pub seed: u64,
    pub width: u32,
    pub height: u32,
    pub cell_states: Vec<CellStateData>,
    pub player_position: GridPos,
    pub facing: Facing,
    pub visited_cells: Vec<GridPos>,
    pub revealed_cells: Vec<GridPos>,
    pub opened_secret_rooms: Vec<GridPos>,
}

impl MazeStateData {
    pub fn is_present(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Match-3 board state
///
/// `cells[y * width + x]` holds a piece code, or -1 for an empty cell.
/// A width of 0 means no board was active.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Match3StateData {
    pub width: u32,
    pub height: u32,
    pub cells: Vec<i32>,
    pub moves_remaining: [u32; PLAYER_COUNT],
    pub color_scores: [BTreeMap<PieceType, u32>; PLAYER_COUNT],
}

impl Match3StateData {
    pub fn is_present(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameOptionsData {
    pub master_volume: f32,
    pub music_volume: f32,
    pub sfx_volume: f32,
    pub language: String,
    pub fullscreen: bool,
    pub resolution_width: u32,
    pub resolution_height: u32,
}

impl Default for GameOptionsData {
    fn default() -> Self {
        GameOptionsData {
            master_volume: 1.0,
            music_volume: 0.8,
            sfx_volume: 0.8,
            language: "en".to_string(),
            fullscreen: false,
            resolution_width: 1280,
            resolution_height: 720,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_sections_default() {
        let data: SaveData = serde_json::from_str(r#"{"saveVersion": "1.1", "playtimeSeconds": 12.5}"#).unwrap();
        assert_eq!(data.playtime_seconds, 12.5);
        assert_eq!(data.options, GameOptionsData::default());
        assert!(!data.maze.is_present());
        assert!(data.inventory.slots.is_empty());
    }

    #[test]
    fn test_field_names_are_camel_case() {
        let json = serde_json::to_value(SaveData::default()).unwrap();
        assert!(json.get("saveVersion").is_some());
        assert!(json["maze"].get("openedSecretRooms").is_some());
        assert!(json["match3"].get("movesRemaining").is_some());
    }

    #[test]
    fn test_empty_inventory_slot_serializes_null() {
        let json = serde_json::to_value(InventorySlotData::empty()).unwrap();
        assert_eq!(json, serde_json::json!({"itemId": null, "quantity": 0}));
    }

    #[test]
    fn test_color_scores_use_piece_names() {
        let mut data = Match3StateData::default();
        data.color_scores[1].insert(PieceType::Emerald, 4);

        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["colorScores"][1]["Emerald"], 4);

        let back: Match3StateData = serde_json::from_value(json).unwrap();
        assert_eq!(back, data);
    }
}
