// Scene loading
//
// Loads are asynchronous: a request goes in, and some frames later the
// loader reports the scene as loaded. Restoring a save waits for that report
// so the restored state lands in a scene that exists.

use crate::scene::GameScene;

/// Frames a scene takes to load by default
pub const DEFAULT_LOAD_FRAMES: u32 = 3;

pub trait SceneLoader {
    /// Starts loading `scene`, replacing any load in flight
    fn load(&mut self, scene: GameScene);

    /// The scene that is fully loaded right now
    fn current(&self) -> GameScene;

    /// True while a load is in flight
    fn is_loading(&self) -> bool;

    /// Advances one frame; returns the scene that finished loading, if any
    fn poll_loaded(&mut self) -> Option<GameScene>;
}

/// Loader that finishes a fixed number of frames after the request
#[derive(Debug, Clone)]
pub struct FrameSceneLoader {
    current: GameScene,
    pending: Option<(GameScene, u32)>,
    load_frames: u32,
}

impl FrameSceneLoader {
    pub fn new(load_frames: u32) -> Self {
        FrameSceneLoader {
            current: GameScene::MainMenu,
            pending: None,
            load_frames,
        }
    }
}

impl Default for FrameSceneLoader {
    fn default() -> Self {
        Self::new(DEFAULT_LOAD_FRAMES)
    }
}

impl SceneLoader for FrameSceneLoader {
    fn load(&mut self, scene: GameScene) {
        tracing::debug!(scene = scene.name(), "loading scene");
        self.pending = Some((scene, self.load_frames));
    }

    fn current(&self) -> GameScene {
        self.current
    }

    fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    fn poll_loaded(&mut self) -> Option<GameScene> {
        let (scene, frames_left) = self.pending.take()?;
        if frames_left > 1 {
            self.pending = Some((scene, frames_left - 1));
            return None;
        }
        self.current = scene;
        tracing::info!(scene = scene.name(), "scene loaded");
        Some(scene)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_completes_after_frames() {
        let mut loader = FrameSceneLoader::new(2);
        loader.load(GameScene::Maze);

        assert!(loader.is_loading());
        assert_eq!(loader.poll_loaded(), None);
        assert_eq!(loader.current(), GameScene::MainMenu);
        assert_eq!(loader.poll_loaded(), Some(GameScene::Maze));
        assert_eq!(loader.current(), GameScene::Maze);
        assert_eq!(loader.poll_loaded(), None);
    }

    #[test]
    fn test_zero_frames_loads_next_poll() {
        let mut loader = FrameSceneLoader::new(0);
        loader.load(GameScene::Battle);
        assert_eq!(loader.poll_loaded(), Some(GameScene::Battle));
    }
}
