//! [`SaveData`] → live state
//!
//! Restore runs after the target scene has loaded. Sections are pushed back
//! in a fixed order: the maze first (its layout has to exist before anything
//! can stand in it), then the board, stats, inventory, equipment and the
//! rest. A bad entry inside a section is skipped with a warning; it never
//! aborts the load.
//!
//! The maze is rebuilt from `(seed, width, height)` and then has its
//! progress laid back on top:
//!
//! 1. minimap reset
//! 2. regenerate the layout
//! 3. per-cell flags by coordinate
//! 4. visited / revealed sets
//! 5. party position and facing, last, with no "entered cell" side effects

use std::fmt;

use super::types::*;
use crate::game::GameWorld;
use crate::game::world::OverworldProgress;
use crate::inventory::{Equipment, EquipmentProvider, Inventory, InventoryError, InventoryProvider, MAX_INVENTORY_SLOTS};
use crate::item::{EquipmentSlot, ItemCatalog, ItemStack};
use crate::match3::{Board, BoardError};
use crate::maze::{GridPos, MazeError, MazeRun};
use crate::options::GameOptions;
use crate::stats::{PLAYER_COUNT, PartyStats, StatProvider};

/// A section that could not be restored at all
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RestoreError {
    #[error("maze could not be regenerated: {0}")]
    Maze(#[from] MazeError),
    #[error("board could not be rebuilt: {0}")]
    Board(#[from] BoardError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestoreSection {
    Maze,
    Match3,
    Stats,
    Inventory,
    Equipment,
    Spells,
    StatusEffects,
    Options,
    Progress,
}

impl fmt::Display for RestoreSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// One entry the restore skipped
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RestoreWarning {
    #[error("{section} skipped: {error}")]
    SectionFailed { section: RestoreSection, error: RestoreError },
    #[error("inventory slot {slot}: unknown item '{item_id}'")]
    UnknownItem { slot: usize, item_id: String },
    #[error("inventory slot {slot}: {error}")]
    InventorySlot { slot: usize, error: InventoryError },
    #[error("{slot:?} slot: unknown item '{name}'")]
    UnknownEquipment { slot: EquipmentSlot, name: String },
    #[error("{slot:?} slot: {error}")]
    Equipment { slot: EquipmentSlot, error: InventoryError },
    #[error("maze cell {pos:?} is outside the maze")]
    CellOutOfBounds { pos: GridPos },
    #[error("party position {pos:?} is outside the maze, using the start")]
    PositionOutOfBounds { pos: GridPos },
    #[error("inventory asks for {requested} slots, capped at {max}")]
    InventoryTruncated { requested: usize, max: usize },
}

/// What a restore did
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RestoreReport {
    /// Sections written back into the world
    pub restored: Vec<RestoreSection>,
    /// Sections present in the save whose restore is not supported yet
    pub deferred: Vec<RestoreSection>,
    pub warnings: Vec<RestoreWarning>,
}

impl RestoreReport {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    fn warn(&mut self, warning: RestoreWarning) {
        tracing::warn!(%warning, "restore entry skipped");
        self.warnings.push(warning);
    }
}

/// Pushes a loaded save into the world
///
/// The scene is not touched here; the caller has already loaded it.
pub fn restore(data: &SaveData, world: &mut GameWorld, catalog: &ItemCatalog) -> RestoreReport {
    let mut report = RestoreReport::default();

    // Maze
    if data.maze.is_present() {
        let mut run = world.maze.take().unwrap_or_default();
        match restore_maze(&data.maze, &mut run, &mut report) {
            Ok(()) => {
                world.maze = Some(run);
                report.restored.push(RestoreSection::Maze);
            }
            Err(error) => report.warn(RestoreWarning::SectionFailed { section: RestoreSection::Maze, error }),
        }
    } else {
        world.maze = None;
    }

    // Match-3 board
    if data.match3.is_present() {
        // Sized by restore_match3 once the saved dimensions are validated
        let board = world.board.get_or_insert_with(|| Board::new(0, 0));
        match restore_match3(&data.match3, board) {
            Ok(()) => report.restored.push(RestoreSection::Match3),
            Err(error) => {
                world.board = None;
                report.warn(RestoreWarning::SectionFailed { section: RestoreSection::Match3, error });
            }
        }
    } else {
        world.board = None;
    }

    if data.stats.is_present() {
        restore_stats(&data.stats, world.stats.get_or_insert_with(PartyStats::new));
        report.restored.push(RestoreSection::Stats);
    }

    if data.inventory.is_present() {
        let inventory = world.inventory.get_or_insert_with(|| Inventory::new(0));
        restore_inventory(&data.inventory, inventory, catalog, &mut report);
        report.restored.push(RestoreSection::Inventory);
    }

    restore_equipment(&data.equipment, world.equipment.get_or_insert_with(Equipment::new), catalog, &mut report);
    report.restored.push(RestoreSection::Equipment);

    // TODO: write spells and status effects back once SpellBook and
    // StatusEffects expose setters for cooldowns and remaining durations
    if data.spells != SpellSystemData::default() {
        tracing::warn!("spell state restore not supported yet, keeping live spells");
        report.deferred.push(RestoreSection::Spells);
    }
    if !data.status_effects.active_effects.is_empty() {
        tracing::warn!(
            count = data.status_effects.active_effects.len(),
            "status effect restore not supported yet, keeping live effects"
        );
        report.deferred.push(RestoreSection::StatusEffects);
    }

    restore_options(&data.options, world.options.get_or_insert_with(GameOptions::new));
    report.restored.push(RestoreSection::Options);

    world.progress = restore_progress(&data.progress);
    report.restored.push(RestoreSection::Progress);

    tracing::info!(
        restored = report.restored.len(),
        deferred = report.deferred.len(),
        warnings = report.warnings.len(),
        "restore finished"
    );
    report
}

/// Rebuilds a maze crawl from its seed and lays saved progress over it
pub fn restore_maze(data: &MazeStateData, run: &mut MazeRun, report: &mut RestoreReport) -> Result<(), RestoreError> {
    run.minimap.reset();
    let grid = run.generator.regenerate(data.seed, data.width, data.height)?;
    let start = grid.start();

    if let Some(grid) = run.generator.grid_mut() {
        for state in &data.cell_states {
            let pos = GridPos::new(state.x, state.y);
            match grid.cell_mut(pos) {
                Some(cell) => {
                    cell.explored = state.explored;
                    cell.enemy_defeated = state.enemy_defeated;
                    cell.treasure_collected = state.treasure_collected;
                }
                None => report.warn(RestoreWarning::CellOutOfBounds { pos }),
            }
        }
        for &pos in &data.opened_secret_rooms {
            match grid.cell_mut(pos) {
                Some(cell) => cell.secret_opened = true,
                None => report.warn(RestoreWarning::CellOutOfBounds { pos }),
            }
        }
    }

    run.minimap
        .restore(data.visited_cells.iter().copied(), data.revealed_cells.iter().copied());

    let in_bounds = run.grid().is_some_and(|grid| grid.contains(data.player_position));
    let position = if in_bounds {
        data.player_position
    } else {
        report.warn(RestoreWarning::PositionOutOfBounds { pos: data.player_position });
        start
    };
    run.player.place(position, data.facing);
    Ok(())
}

pub fn restore_match3(data: &Match3StateData, board: &mut Board) -> Result<(), RestoreError> {
    board.restore_flat(data.width, data.height, &data.cells)?;
    for player in 0..PLAYER_COUNT {
        board.set_moves_remaining(player, data.moves_remaining[player]);
        board.set_color_scores(player, data.color_scores[player].clone());
    }
    Ok(())
}

/// Writes stats back through the provider
///
/// Max health is set directly; current health is reached through heal or
/// damage so the usual events fire. Ability bonuses and armor class are
/// derived from equipment and left alone.
pub fn restore_stats(data: &PlayerStatsData, stats: &mut dyn StatProvider) {
    for (player, vitals) in data.players.iter().enumerate() {
        let max_health = vitals.max_health.max(0);
        stats.set_max_health(player, max_health);
        let target = i64::from(vitals.current_health.clamp(0, max_health));
        let delta = target - i64::from(stats.current_health(player));
        let amount = i32::try_from(delta.abs()).unwrap_or(i32::MAX);
        if delta > 0 {
            stats.heal(player, amount);
        } else if delta < 0 {
            stats.damage(player, amount);
        }
        stats.set_score(player, vitals.score);
    }
    stats.set_level(data.level);
    stats.set_experience(data.experience);
    stats.set_currency(data.currency);
}

/// Rebuilds the inventory slot by slot, keeping indices
pub fn restore_inventory(
    data: &InventoryData,
    inventory: &mut dyn InventoryProvider,
    catalog: &ItemCatalog,
    report: &mut RestoreReport,
) {
    let requested = (data.max_slots as usize).max(data.slots.len());
    if requested > MAX_INVENTORY_SLOTS {
        report.warn(RestoreWarning::InventoryTruncated { requested, max: MAX_INVENTORY_SLOTS });
    }
    let capacity = requested.min(MAX_INVENTORY_SLOTS);
    inventory.reset(capacity);

    for (slot, entry) in data.slots.iter().enumerate().take(capacity) {
        let Some(item_id) = &entry.item_id else {
            continue;
        };
        if entry.quantity == 0 {
            continue;
        }
        if !catalog.exists(item_id) {
            report.warn(RestoreWarning::UnknownItem { slot, item_id: item_id.clone() });
            continue;
        }
        match inventory.place_in_slot(slot, ItemStack::new(item_id.clone(), entry.quantity), catalog) {
            Ok(None) => {}
            Ok(Some(overflow)) => {
                tracing::warn!(slot, item_id = %item_id, overflow = overflow.quantity, "saved stack larger than max, excess dropped");
            }
            Err(error) => report.warn(RestoreWarning::InventorySlot { slot, error }),
        }
    }
}

/// Re-equips by name
///
/// Everything is unequipped first. Names the catalog doesn't know, or items
/// saved into a slot they don't fit, are skipped.
pub fn restore_equipment(
    data: &EquipmentData,
    equipment: &mut dyn EquipmentProvider,
    catalog: &ItemCatalog,
    report: &mut RestoreReport,
) {
    equipment.unequip_all();

    let saved = [
        (EquipmentSlot::Head, &data.head),
        (EquipmentSlot::Chest, &data.chest),
        (EquipmentSlot::Legs, &data.legs),
        (EquipmentSlot::Feet, &data.feet),
        (EquipmentSlot::MainHand, &data.main_hand),
        (EquipmentSlot::OffHand, &data.off_hand),
        (EquipmentSlot::TwoHand, &data.two_hand),
        (EquipmentSlot::Ring, &data.ring),
    ];

    for (slot, name) in saved {
        let Some(name) = name else {
            continue;
        };
        let Some(item) = catalog.get(name) else {
            report.warn(RestoreWarning::UnknownEquipment { slot, name: name.clone() });
            continue;
        };
        if item.equipment_slot() != Some(slot) {
            let error = InventoryError::WrongSlot { item: name.clone(), slot };
            report.warn(RestoreWarning::Equipment { slot, error });
            continue;
        }
        match equipment.equip(item) {
            Ok(displaced) => {
                for other in displaced {
                    tracing::warn!(item = %name, displaced = %other.name, "saved equipment conflicts, keeping the later slot");
                }
            }
            Err(error) => report.warn(RestoreWarning::Equipment { slot, error }),
        }
    }
}

pub fn restore_options(data: &GameOptionsData, options: &mut GameOptions) {
    options.set_volumes(data.master_volume, data.music_volume, data.sfx_volume);
    options.language = data.language.clone();
    options.fullscreen = data.fullscreen;
    options.set_resolution(data.resolution_width, data.resolution_height);
}

pub fn restore_progress(data: &PlayerProgressData) -> OverworldProgress {
    OverworldProgress {
        zone: data.zone,
        subzone: data.subzone,
        map: data.map,
        position: data.grid_position,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::StatEvent;

    #[test]
    fn test_maze_restore_rebuilds_progress() {
        let mut source = MazeRun::new();
        source.start(31, 7, 7).unwrap();
        source.player.turn_right();

        let data = crate::save::capture::capture_maze(&source);
        let mut target = MazeRun::new();
        let mut report = RestoreReport::default();
        restore_maze(&data, &mut target, &mut report).unwrap();

        assert!(report.is_clean());
        assert_eq!(target.grid(), source.grid());
        assert_eq!(target.player, source.player);
        assert_eq!(target.minimap, source.minimap);
    }

    #[test]
    fn test_maze_out_of_bounds_cell_is_skipped() {
        let mut data = MazeStateData { seed: 3, width: 4, height: 4, ..Default::default() };
        data.cell_states.push(CellStateData { x: 9, y: 0, explored: true, ..Default::default() });
        data.player_position = GridPos::new(-1, 2);

        let mut run = MazeRun::new();
        let mut report = RestoreReport::default();
        restore_maze(&data, &mut run, &mut report).unwrap();

        assert_eq!(report.warnings.len(), 2);
        assert_eq!(run.player.position(), run.grid().unwrap().start());
    }

    #[test]
    fn test_maze_invalid_dimensions() {
        let data = MazeStateData { seed: 3, width: 1, height: 400, ..Default::default() };
        let mut run = MazeRun::new();
        let mut report = RestoreReport::default();
        assert!(matches!(restore_maze(&data, &mut run, &mut report), Err(RestoreError::Maze(_))));
    }

    #[test]
    fn test_stats_restore_goes_through_heal_and_damage() {
        let mut data = PlayerStatsData { level: 4, experience: 900, currency: 55, ..Default::default() };
        data.players[0] = PlayerVitalsData { current_health: 12, max_health: 40, score: 8 };
        data.players[1] = PlayerVitalsData { current_health: 30, max_health: 30, score: 0 };

        let mut stats = PartyStats::new();
        stats.damage(1, 10);
        stats.take_events();

        restore_stats(&data, &mut stats);
        assert_eq!(stats.current_health(0), 12);
        assert_eq!(stats.max_health(0), 40);
        assert_eq!(stats.current_health(1), 30);
        assert_eq!(stats.level(), 4);
        assert_eq!(
            stats.take_events(),
            vec![
                StatEvent::Damaged { player: 0, amount: 18 },
                StatEvent::Healed { player: 1, amount: 10 },
            ]
        );
    }

    #[test]
    fn test_stats_restore_clamps_extreme_health() {
        let mut data = PlayerStatsData::default();
        data.players[0] = PlayerVitalsData { current_health: i32::MIN, max_health: 50, score: 0 };
        data.players[1] = PlayerVitalsData { current_health: i32::MAX, max_health: i32::MAX, score: 0 };

        let mut stats = PartyStats::new();
        restore_stats(&data, &mut stats);
        assert_eq!(stats.current_health(0), 0);
        assert_eq!(stats.max_health(1), i32::MAX);
        assert_eq!(stats.current_health(1), i32::MAX);
    }

    #[test]
    fn test_stats_restore_health_above_max_is_capped() {
        let mut data = PlayerStatsData::default();
        data.players[0] = PlayerVitalsData { current_health: 90, max_health: 30, score: 0 };
        data.players[1] = PlayerVitalsData { current_health: 5, max_health: -4, score: 0 };

        let mut stats = PartyStats::new();
        restore_stats(&data, &mut stats);
        assert_eq!(stats.current_health(0), 30);
        assert_eq!(stats.max_health(1), 0);
        assert_eq!(stats.current_health(1), 0);
    }

    #[test]
    fn test_oversized_inventory_is_capped() {
        let catalog = ItemCatalog::create_default();
        let mut slots = vec![InventorySlotData::empty(); MAX_INVENTORY_SLOTS + 5];
        slots[2] = InventorySlotData { item_id: Some("Potion".into()), quantity: 1 };
        slots[MAX_INVENTORY_SLOTS + 1] = InventorySlotData { item_id: Some("Potion".into()), quantity: 1 };
        let data = InventoryData { max_slots: u32::MAX, slots };

        let mut inventory = Inventory::new(10);
        let mut report = RestoreReport::default();
        restore_inventory(&data, &mut inventory, &catalog, &mut report);

        assert_eq!(inventory.capacity(), MAX_INVENTORY_SLOTS);
        assert_eq!(inventory.get(2), Some(&ItemStack::new("Potion", 1)));
        assert_eq!(
            report.warnings,
            vec![RestoreWarning::InventoryTruncated { requested: u32::MAX as usize, max: MAX_INVENTORY_SLOTS }]
        );
    }

    #[test]
    fn test_huge_board_section_is_rejected() {
        let catalog = ItemCatalog::create_default();
        let mut world = GameWorld::new();
        let mut data = SaveData::default();
        data.match3.width = 65_536;
        data.match3.height = 65_536;
        data.match3.moves_remaining = [3, 3];

        let report = restore(&data, &mut world, &catalog);
        assert!(world.board.is_none());
        assert!(matches!(
            report.warnings.as_slice(),
            [RestoreWarning::SectionFailed { section: RestoreSection::Match3, error: RestoreError::Board(BoardError::InvalidSize { .. }) }]
        ));
    }

    #[test]
    fn test_board_restored_into_fresh_world() {
        let catalog = ItemCatalog::create_default();
        let source = Board::seeded(8, 8, 5);
        let mut data = SaveData::default();
        data.match3 = Match3StateData {
            width: 8,
            height: 8,
            cells: source.flatten(),
            moves_remaining: [4, 6],
            ..Default::default()
        };

        let mut world = GameWorld::new();
        let report = restore(&data, &mut world, &catalog);
        assert!(report.restored.contains(&RestoreSection::Match3));
        let board = world.board.as_ref().unwrap();
        assert_eq!(board.flatten(), source.flatten());
        assert_eq!(board.moves_remaining(1), 6);
    }

    #[test]
    fn test_unknown_inventory_item_skipped() {
        let catalog = ItemCatalog::create_default();
        let data = InventoryData {
            max_slots: 3,
            slots: vec![
                InventorySlotData { item_id: Some("Potion".into()), quantity: 2 },
                InventorySlotData { item_id: Some("Cursed Idol".into()), quantity: 1 },
                InventorySlotData::empty(),
            ],
        };

        let mut inventory = Inventory::new(10);
        let mut report = RestoreReport::default();
        restore_inventory(&data, &mut inventory, &catalog, &mut report);

        assert_eq!(inventory.capacity(), 3);
        assert_eq!(inventory.get(0), Some(&ItemStack::new("Potion", 2)));
        assert_eq!(inventory.get(1), None);
        assert_eq!(
            report.warnings,
            vec![RestoreWarning::UnknownItem { slot: 1, item_id: "Cursed Idol".into() }]
        );
    }

    #[test]
    fn test_equipment_wrong_slot_skipped() {
        let catalog = ItemCatalog::create_default();
        let data = EquipmentData {
            head: Some("Sword".into()),
            off_hand: Some("Shield".into()),
            ring: Some("Ring of Nowhere".into()),
            ..Default::default()
        };

        let mut equipment = Equipment::new();
        equipment.equip(catalog.get("Greaves").unwrap()).unwrap();
        let mut report = RestoreReport::default();
        restore_equipment(&data, &mut equipment, &catalog, &mut report);

        assert_eq!(equipment.equipped_name(EquipmentSlot::OffHand), Some("Shield"));
        assert_eq!(equipment.equipped_name(EquipmentSlot::Head), None);
        assert_eq!(equipment.equipped_name(EquipmentSlot::Legs), None);
        assert_eq!(report.warnings.len(), 2);
    }

    #[test]
    fn test_absent_sections_leave_live_state() {
        let catalog = ItemCatalog::create_default();
        let mut world = GameWorld::new_game(&catalog);
        let before = world.stats.as_ref().map(|s| s.current_health(0));

        let report = restore(&SaveData::default(), &mut world, &catalog);
        assert!(!report.restored.contains(&RestoreSection::Stats));
        assert!(!report.restored.contains(&RestoreSection::Inventory));
        assert_eq!(world.stats.as_ref().map(|s| s.current_health(0)), before);
        assert!(report.deferred.is_empty());
    }

    #[test]
    fn test_spells_are_deferred() {
        let catalog = ItemCatalog::create_default();
        let mut world = GameWorld::new();
        let mut data = SaveData::default();
        data.spells.learned_spells.push("Firebolt".into());

        let report = restore(&data, &mut world, &catalog);
        assert_eq!(report.deferred, vec![RestoreSection::Spells]);
        assert!(world.spells.is_none());
    }
}
