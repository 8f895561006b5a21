// Game module - Contains the live game and the shims that save and load it
//
// This module contains:
// - world.rs: GameWorld struct owning every live subsystem
// - scene_loader.rs: frame-driven scene loading
// - triggers.rs: hotkey save wait and player notifications
// - session.rs: GameSession tying the world to the save system

pub mod scene_loader;
pub mod session;
pub mod triggers;
pub mod world;

// Re-export types for convenience
pub use scene_loader::{FrameSceneLoader, SceneLoader};
pub use session::GameSession;
pub use triggers::{Notification, SaveTriggers, TriggerEvent};
pub use world::{GameWorld, OverworldProgress};
