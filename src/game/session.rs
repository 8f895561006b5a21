// Game session
//
// Owns the live world and everything that saves or loads it: the slot
// manager, the item catalog, the trigger shims and the scene loader. The
// host calls `handle` for player actions and `update` once per frame.

use std::time::Duration;

use super::scene_loader::{FrameSceneLoader, SceneLoader};
use super::triggers::{Notification, SaveTriggers, TriggerEvent};
use super::world::GameWorld;
use crate::config::SaveConfig;
use crate::input_system::GameAction;
use crate::item::ItemCatalog;
use crate::match3::BoardActivity;
use crate::save::{self, BoardSafetyGate, RestoreReport, SaveData, SaveError, SaveOutcome, SlotManager};
use crate::scene::resolve_load_target;

pub struct GameSession {
    config: SaveConfig,
    manager: SlotManager,
    catalog: ItemCatalog,
    loader: Box<dyn SceneLoader>,
    triggers: SaveTriggers,
    pub world: GameWorld,
    playtime_seconds: f64,
    /// Save waiting for its scene to finish loading
    pending_load: Option<SaveData>,
    notifications: Vec<Notification>,
    last_restore: Option<RestoreReport>,
}

impl GameSession {
    pub fn new(config: SaveConfig, catalog: ItemCatalog) -> Result<Self, SaveError> {
        Self::with_loader(config, catalog, Box::new(FrameSceneLoader::default()))
    }

    pub fn with_loader(
        config: SaveConfig,
        catalog: ItemCatalog,
        loader: Box<dyn SceneLoader>,
    ) -> Result<Self, SaveError> {
        let manager = SlotManager::new(&config)?;
        Ok(GameSession {
            triggers: SaveTriggers::new(config.settle_timeout),
            config,
            manager,
            catalog,
            loader,
            world: GameWorld::new(),
            playtime_seconds: 0.0,
            pending_load: None,
            notifications: Vec::new(),
            last_restore: None,
        })
    }

    pub fn manager(&self) -> &SlotManager {
        &self.manager
    }

    pub fn catalog(&self) -> &ItemCatalog {
        &self.catalog
    }

    pub fn playtime_seconds(&self) -> f64 {
        self.playtime_seconds
    }

    /// True while a hotkey save is waiting or a load is in flight
    pub fn is_busy(&self) -> bool {
        self.triggers.is_busy() || self.pending_load.is_some()
    }

    /// Report from the most recent restore
    pub fn last_restore(&self) -> Option<&RestoreReport> {
        self.last_restore.as_ref()
    }

    /// Drains notifications raised since the last call
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    fn notify(&mut self, notification: Notification) {
        tracing::info!(%notification, "notification");
        self.notifications.push(notification);
    }

    pub fn handle(&mut self, action: GameAction) {
        tracing::debug!(?action, "action");
        match action {
            GameAction::QuickSave => self.quick_save(),
            GameAction::QuickLoad => self.load_slot(self.config.quick_save_slot),
            GameAction::SaveToSlot(slot) => self.save_to_slot(slot),
            GameAction::LoadSlot(slot) => self.load_slot(slot),
            GameAction::DeleteSlot(slot) => {
                if let Err(err) = self.manager.delete(slot) {
                    tracing::error!(error = %err, "delete refused");
                }
            }
            GameAction::ContinueGame => self.continue_game(),
            GameAction::NewGame => self.new_game(),
        }
    }

    /// Starts over with a fresh party in the overworld
    pub fn new_game(&mut self) {
        if self.is_busy() {
            tracing::info!("busy, new game ignored");
            return;
        }
        self.world = GameWorld::new_game(&self.catalog);
        self.playtime_seconds = 0.0;
        self.loader.load(self.world.scene);
    }

    /// Hotkey save: waits for the board to settle, then saves
    pub fn quick_save(&mut self) {
        if self.pending_load.is_some() {
            tracing::info!("load in progress, quick save ignored");
            return;
        }
        self.triggers.request_save(self.config.quick_save_slot);
    }

    /// Menu save: saves now, or reports a deferral if the board is busy
    pub fn save_to_slot(&mut self, slot: u32) {
        if self.is_busy() {
            tracing::info!(slot, "busy, save ignored");
            return;
        }
        self.write_save(slot);
    }

    fn write_save(&mut self, slot: u32) {
        let board = self.world.board.as_ref().map(|b| b as &dyn BoardActivity);
        let gate = BoardSafetyGate::new(board);
        let world = &self.world;
        let playtime = self.playtime_seconds;

        let notification = match self.manager.save(slot, &gate, || save::capture(world, playtime)) {
            Ok(SaveOutcome::Saved) => Notification::GameSaved,
            Ok(SaveOutcome::Deferred) => Notification::SaveDeferred,
            Ok(SaveOutcome::Failed(_)) => Notification::SaveFailed,
            Err(err) => {
                tracing::error!(error = %err, "save refused");
                Notification::SaveFailed
            }
        };
        self.notify(notification);
    }

    /// Loads a slot and jumps to the scene it was saved in
    ///
    /// The restore itself happens once the scene reports loaded.
    pub fn load_slot(&mut self, slot: u32) {
        if self.is_busy() {
            tracing::info!(slot, "busy, load ignored");
            return;
        }

        let data = match self.manager.load(slot) {
            Ok(Some(data)) => data,
            Ok(None) => {
                let exists = self.manager.has_save(slot).unwrap_or(false)
                    || self.manager.backup_path(slot).is_ok_and(|path| path.exists());
                self.notify(if exists { Notification::LoadFailed } else { Notification::NoSaveFound });
                return;
            }
            Err(err) => {
                tracing::error!(error = %err, "load refused");
                self.notify(Notification::LoadFailed);
                return;
            }
        };

        let target = resolve_load_target(Some(data.scene));
        tracing::info!(slot, scene = target.name(), "loading save");
        self.playtime_seconds = data.playtime_seconds;
        self.pending_load = Some(data);
        self.loader.load(target);
    }

    /// Loads whichever slot was saved most recently
    pub fn continue_game(&mut self) {
        match self.manager.most_recent_slot() {
            Some(slot) => self.load_slot(slot),
            None => self.notify(Notification::NoSaveFound),
        }
    }

    /// Advances one frame
    pub fn update(&mut self, dt: Duration) {
        if self.world.scene.is_gameplay() && self.pending_load.is_none() {
            self.playtime_seconds += dt.as_secs_f64();
        }
        self.world.tick(dt.as_secs_f32());

        let board = self.world.board.as_ref().map(|b| b as &dyn BoardActivity);
        let event = self.triggers.update(dt, &BoardSafetyGate::new(board));
        match event {
            Some(TriggerEvent::SaveNow(slot)) => self.write_save(slot),
            Some(TriggerEvent::TimedOut(slot)) => {
                tracing::warn!(slot, "hotkey save timed out");
                self.notify(Notification::SaveFailed);
            }
            None => {}
        }

        if let Some(scene) = self.loader.poll_loaded() {
            self.world.scene = scene;
            if let Some(data) = self.pending_load.take() {
                let report = save::restore(&data, &mut self.world, &self.catalog);
                self.last_restore = Some(report);
                self.notify(Notification::GameLoaded);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::GameScene;
    use std::time::{SystemTime, UNIX_EPOCH};

    const FRAME: Duration = Duration::from_millis(16);

    fn temp_session(name: &str) -> GameSession {
        let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_nanos();
        let dir = std::env::temp_dir().join(format!("six_stones_session_{name}_{}_{nanos}", std::process::id()));
        GameSession::new(SaveConfig::default().with_save_dir(dir), ItemCatalog::create_default()).unwrap()
    }

    fn run_frames(session: &mut GameSession, frames: usize) {
        for _ in 0..frames {
            session.update(FRAME);
        }
    }

    #[test]
    fn test_continue_without_saves() {
        let mut session = temp_session("continue_empty");
        session.handle(GameAction::ContinueGame);
        assert_eq!(session.take_notifications(), vec![Notification::NoSaveFound]);
    }

    #[test]
    fn test_load_waits_for_scene() {
        let mut session = temp_session("load_waits");
        session.new_game();
        run_frames(&mut session, 5);
        session.world.enter_maze(12, 6, 6).unwrap();
        session.handle(GameAction::SaveToSlot(2));
        assert_eq!(session.take_notifications(), vec![Notification::GameSaved]);

        session.world.leave_maze();
        session.handle(GameAction::LoadSlot(2));
        assert!(session.world.maze.is_none());
        assert!(session.is_busy());

        run_frames(&mut session, 5);
        assert_eq!(session.world.scene, GameScene::Maze);
        assert!(session.world.maze.is_some());
        assert_eq!(session.take_notifications(), vec![Notification::GameLoaded]);
    }

    #[test]
    fn test_menu_save_deferred_while_animating() {
        let mut session = temp_session("deferred");
        session.new_game();
        session.world.start_battle(3);
        if let Some(board) = session.world.board.as_mut() {
            board.begin_fall();
        }

        session.handle(GameAction::SaveToSlot(1));
        assert_eq!(session.take_notifications(), vec![Notification::SaveDeferred]);
        assert!(!session.manager().has_save(1).unwrap());
    }

    #[test]
    fn test_quick_save_after_board_settles() {
        let mut session = temp_session("quick");
        session.new_game();
        run_frames(&mut session, 5);
        session.world.start_battle(3);
        if let Some(board) = session.world.board.as_mut() {
            board.begin_fall();
        }

        session.handle(GameAction::QuickSave);
        session.update(FRAME);
        assert!(session.take_notifications().is_empty());

        run_frames(&mut session, 20);
        assert_eq!(session.take_notifications(), vec![Notification::GameSaved]);
        assert!(session.manager().has_save(1).unwrap());
    }

    #[test]
    fn test_playtime_only_counts_gameplay() {
        let mut session = temp_session("playtime");
        run_frames(&mut session, 10);
        assert_eq!(session.playtime_seconds(), 0.0);

        session.new_game();
        run_frames(&mut session, 10);
        assert!(session.playtime_seconds() > 0.0);
    }
}
