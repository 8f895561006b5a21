//! Player-facing game options
//!
//! Independent of gameplay. Saved alongside the game for convenience.

/// Live options, always kept in range
#[derive(Debug, Clone, PartialEq)]
pub struct GameOptions {
    master_volume: f32,
    music_volume: f32,
    sfx_volume: f32,
    pub language: String,
    pub fullscreen: bool,
    resolution: (u32, u32),
}

/// Smallest resolution the game accepts
pub const MIN_RESOLUTION: (u32, u32) = (640, 360);

impl GameOptions {
    pub fn new() -> Self {
        GameOptions {
            master_volume: 1.0,
            music_volume: 0.8,
            sfx_volume: 0.8,
            language: "en".to_string(),
            fullscreen: false,
            resolution: (1280, 720),
        }
    }

    pub fn master_volume(&self) -> f32 {
        self.master_volume
    }

    pub fn music_volume(&self) -> f32 {
        self.music_volume
    }

    pub fn sfx_volume(&self) -> f32 {
        self.sfx_volume
    }

    pub fn resolution(&self) -> (u32, u32) {
        self.resolution
    }

    /// Sets all three volumes, clamped to 0..=1
    pub fn set_volumes(&mut self, master: f32, music: f32, sfx: f32) {
        let clamp = |v: f32| if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) };
        self.master_volume = clamp(master);
        self.music_volume = clamp(music);
        self.sfx_volume = clamp(sfx);
    }

    /// Sets the resolution, raised to at least [`MIN_RESOLUTION`]
    pub fn set_resolution(&mut self, width: u32, height: u32) {
        self.resolution = (width.max(MIN_RESOLUTION.0), height.max(MIN_RESOLUTION.1));
    }
}

impl Default for GameOptions {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_volumes_clamped() {
        let mut options = GameOptions::new();
        options.set_volumes(1.5, -0.2, f32::NAN);
        assert_eq!(options.master_volume(), 1.0);
        assert_eq!(options.music_volume(), 0.0);
        assert_eq!(options.sfx_volume(), 0.0);
    }

    #[test]
    fn test_resolution_floor() {
        let mut options = GameOptions::new();
        options.set_resolution(320, 1080);
        assert_eq!(options.resolution(), (640, 1080));
    }
}
