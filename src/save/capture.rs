//! Live state → [`SaveData`]
//!
//! Each section has its own capture function that reads one subsystem
//! through its contract. Nothing here mutates the game.

use chrono::{DateTime, Utc};

use super::types::*;
use crate::game::GameWorld;
use crate::game::world::OverworldProgress;
use crate::inventory::{BASE_ARMOR_CLASS, EquipmentProvider, InventoryProvider};
use crate::item::EquipmentSlot;
use crate::match3::Board;
use crate::maze::MazeRun;
use crate::options::GameOptions;
use crate::spells::SpellBook;
use crate::stats::{PLAYER_COUNT, StatProvider};
use crate::status::StatusEffects;

/// Snapshots the whole world, stamped with the current time
pub fn capture(world: &GameWorld, playtime_seconds: f64) -> SaveData {
    capture_at(world, playtime_seconds, Utc::now())
}

/// Snapshots the whole world with an explicit timestamp
///
/// Absent subsystems leave their section at its default.
pub fn capture_at(world: &GameWorld, playtime_seconds: f64, saved_at: DateTime<Utc>) -> SaveData {
    let equipment = world.equipment.as_ref().map(|e| e as &dyn EquipmentProvider);

    SaveData {
        save_version: CURRENT_SAVE_VERSION.to_string(),
        saved_at,
        playtime_seconds,
        scene: world.scene,
        progress: capture_progress(&world.progress),
        stats: world
            .stats
            .as_ref()
            .map(|stats| capture_stats(stats, equipment))
            .unwrap_or_default(),
        inventory: world.inventory.as_ref().map(|i| capture_inventory(i)).unwrap_or_default(),
        equipment: equipment.map(capture_equipment).unwrap_or_default(),
        spells: world.spells.as_ref().map(capture_spells).unwrap_or_default(),
        status_effects: world.status_effects.as_ref().map(capture_status_effects).unwrap_or_default(),
        maze: world.maze.as_ref().map(capture_maze).unwrap_or_default(),
        match3: world.board.as_ref().map(capture_match3).unwrap_or_default(),
        options: world.options.as_ref().map(capture_options).unwrap_or_default(),
    }
}

pub fn capture_progress(progress: &OverworldProgress) -> PlayerProgressData {
    PlayerProgressData {
        zone: progress.zone,
        subzone: progress.subzone,
        map: progress.map,
        grid_position: progress.position,
    }
}

/// Stats plus the derived equipment snapshot
///
/// Without equipment the bonuses are zero and armor class is the base.
pub fn capture_stats(stats: &dyn StatProvider, equipment: Option<&dyn EquipmentProvider>) -> PlayerStatsData {
    let players = std::array::from_fn::<_, PLAYER_COUNT, _>(|player| PlayerVitalsData {
        current_health: stats.current_health(player),
        max_health: stats.max_health(player),
        score: stats.score(player),
    });

    PlayerStatsData {
        players,
        level: stats.level(),
        experience: stats.experience(),
        currency: stats.currency(),
        ability_bonuses: equipment.map(|e| e.ability_bonuses()).unwrap_or_default(),
        armor_class: equipment.map_or(BASE_ARMOR_CLASS, |e| e.armor_class()),
    }
}

/// Every slot in index order, empties included
pub fn capture_inventory(inventory: &dyn InventoryProvider) -> InventoryData {
    InventoryData {
        max_slots: inventory.capacity() as u32,
        slots: inventory
            .snapshot()
            .into_iter()
            .map(|slot| match slot {
                Some(stack) => InventorySlotData {
                    item_id: Some(stack.item_id),
                    quantity: stack.quantity,
                },
                None => InventorySlotData::empty(),
            })
            .collect(),
    }
}

pub fn capture_equipment(equipment: &dyn EquipmentProvider) -> EquipmentData {
    let name = |slot| equipment.equipped_name(slot).map(str::to_string);
    EquipmentData {
        head: name(EquipmentSlot::Head),
        chest: name(EquipmentSlot::Chest),
        legs: name(EquipmentSlot::Legs),
        feet: name(EquipmentSlot::Feet),
        main_hand: name(EquipmentSlot::MainHand),
        off_hand: name(EquipmentSlot::OffHand),
        two_hand: name(EquipmentSlot::TwoHand),
        ring: name(EquipmentSlot::Ring),
    }
}

pub fn capture_spells(spells: &SpellBook) -> SpellSystemData {
    SpellSystemData {
        learned_spells: spells.learned().iter().cloned().collect(),
        prepared_spells: spells.prepared().iter().cloned().collect(),
        cooldowns: spells.cooldowns().clone(),
        charges: spells.charges().clone(),
    }
}

pub fn capture_status_effects(effects: &StatusEffects) -> StatusEffectsSaveData {
    StatusEffectsSaveData {
        active_effects: effects
            .active()
            .iter()
            .map(|effect| StatusEffectData {
                effect_name: effect.name.clone(),
                player_index: effect.player,
                stacks: effect.stacks,
                remaining_duration: effect.remaining,
            })
            .collect(),
    }
}

/// Maze state keyed by the seed that was actually used
///
/// Only cells with progress are written, in row-major order.
pub fn capture_maze(run: &MazeRun) -> MazeStateData {
    let Some(grid) = run.grid() else {
        return MazeStateData::default();
    };

    let cell_states = grid
        .iter()
        .filter(|(_, cell)| cell.has_progress())
        .map(|(pos, cell)| CellStateData {
            x: pos.x,
            y: pos.y,
            explored: cell.explored,
            enemy_defeated: cell.enemy_defeated,
            treasure_collected: cell.treasure_collected,
        })
        .collect();

    MazeStateData {
        seed: run.generator.seed_used(),
        width: grid.width(),
        height: grid.height(),
        cell_states,
        player_position: run.player.position(),
        facing: run.player.facing(),
        visited_cells: run.minimap.visited().iter().copied().collect(),
        revealed_cells: run.minimap.revealed().iter().copied().collect(),
        opened_secret_rooms: run.opened_secret_rooms(),
    }
}

/// The board's flattened cells, copied verbatim
pub fn capture_match3(board: &Board) -> Match3StateData {
    Match3StateData {
        width: board.width(),
        height: board.height(),
        cells: board.flatten(),
        moves_remaining: std::array::from_fn(|player| board.moves_remaining(player)),
        color_scores: std::array::from_fn(|player| board.color_scores(player)),
    }
}

pub fn capture_options(options: &GameOptions) -> GameOptionsData {
    let (resolution_width, resolution_height) = options.resolution();
    GameOptionsData {
        master_volume: options.master_volume(),
        music_volume: options.music_volume(),
        sfx_volume: options.sfx_volume(),
        language: options.language.clone(),
        fullscreen: options.fullscreen,
        resolution_width,
        resolution_height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::{Equipment, Inventory};
    use crate::item::{ItemCatalog, ItemStack};
    use crate::match3::PieceType;
    use crate::stats::PartyStats;

    #[test]
    fn test_empty_world_captures_defaults() {
        let data = capture_at(&GameWorld::new(), 0.0, DateTime::<Utc>::default());
        assert_eq!(data, SaveData::default());
    }

    #[test]
    fn test_inventory_keeps_empty_slots() {
        let catalog = ItemCatalog::create_default();
        let mut inventory = Inventory::new(4);
        inventory.place_in_slot(2, ItemStack::new("Potion", 5), &catalog).unwrap();

        let data = capture_inventory(&inventory);
        assert_eq!(data.max_slots, 4);
        assert_eq!(data.slots.len(), 4);
        assert!(data.slots[0].is_empty());
        assert_eq!(data.slots[2].item_id.as_deref(), Some("Potion"));
        assert_eq!(data.slots[2].quantity, 5);
    }

    #[test]
    fn test_stats_snapshot_derived_values() {
        let catalog = ItemCatalog::create_default();
        let mut equipment = Equipment::new();
        equipment.equip(catalog.get("Ring of Insight").unwrap()).unwrap();
        let mut stats = PartyStats::new();
        stats.damage(0, 12);

        let data = capture_stats(&stats, Some(&equipment));
        assert_eq!(data.players[0].current_health, 18);
        assert_eq!(data.players[1].current_health, 30);
        assert_eq!(data.ability_bonuses.wisdom, 2);
        assert_eq!(data.armor_class, 10);
    }

    #[test]
    fn test_maze_records_effective_seed() {
        let mut run = MazeRun::new();
        run.start(0, 6, 5).unwrap();

        let data = capture_maze(&run);
        assert_ne!(data.seed, 0);
        assert_eq!(data.seed, run.generator.seed_used());
        assert_eq!((data.width, data.height), (6, 5));
        // The start cell is explored on entry
        assert_eq!(data.cell_states.len(), 1);
        assert!(data.revealed_cells.len() >= data.visited_cells.len());
    }

    #[test]
    fn test_match3_copies_board() {
        let mut board = Board::seeded(4, 3, 8);
        board.set_moves_remaining(1, 6);
        board.add_color_score(0, PieceType::Topaz, 9);

        let data = capture_match3(&board);
        assert_eq!(data.cells, board.flatten());
        assert_eq!(data.moves_remaining, [20, 6]);
        assert_eq!(data.color_scores[0][&PieceType::Topaz], 9);
    }
}
