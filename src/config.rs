use std::path::PathBuf;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::tuning::*;

// ── WindowMode ────────────────────────────────────────────────────────────────

/// Controls how the OS window is presented.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowMode {
    /// Standard decorated window at the configured size.
    #[default]
    Windowed,
    /// Borderless window covering the current monitor.
    Borderless,
}

// ── GameConfig ────────────────────────────────────────────────────────────────

/// Startup settings for a run.
///
/// - **window** dimensions are the requested OS window size in physical pixels.
/// - **logical** dimensions are the internal render resolution; the camera
///   viewport is this size in world units.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub title: String,
    pub window_width: u32,
    pub window_height: u32,
    pub logical_width: u32,
    pub logical_height: u32,
    pub mode: WindowMode,
    pub target_ups: u32,
    /// Upper bound on a single frame's delta, in seconds.
    pub max_frame_dt: f32,
    /// Fixed RNG seed. `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Directory holding the sound files named by `events::Cue::file`.
    pub audio_dir: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            title: "ELION - The Last Lightkeeper".into(),
            window_width: WINDOW_WIDTH,
            window_height: WINDOW_HEIGHT,
            logical_width: RENDER_WIDTH as u32,
            logical_height: RENDER_HEIGHT as u32,
            mode: WindowMode::Windowed,
            target_ups: TARGET_UPS,
            max_frame_dt: MAX_FRAME_DT,
            seed: None,
            audio_dir: PathBuf::from("audio"),
        }
    }
}

impl GameConfig {
    pub fn with_title(mut self, title: &str) -> Self { self.title = title.into(); self }
    pub fn with_size(mut self, width: u32, height: u32) -> Self { self.window_width = width; self.window_height = height; self }
    pub fn with_logical_size(mut self, width: u32, height: u32) -> Self { self.logical_width = width; self.logical_height = height; self }
    pub fn with_mode(mut self, mode: WindowMode) -> Self { self.mode = mode; self }
    pub fn with_ups(mut self, ups: u32) -> Self { self.target_ups = ups.max(1); self }
    pub fn with_seed(mut self, seed: u64) -> Self { self.seed = Some(seed); self }
    pub fn with_audio_dir(mut self, dir: impl Into<PathBuf>) -> Self { self.audio_dir = dir.into(); self }

    /// Camera viewport in world units.
    pub fn viewport(&self) -> Vec2 {
        Vec2::new(self.logical_width as f32, self.logical_height as f32)
    }

    /// Aspect ratio of the logical resolution.
    ///
    /// Returns `0.0` when `logical_height` is zero to avoid division by zero.
    pub fn aspect_ratio(&self) -> f32 {
        if self.logical_height == 0 {
            return 0.0;
        }
        self.logical_width as f32 / self.logical_height as f32
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_tuning() {
        let config = GameConfig::default();
        assert_eq!((config.window_width, config.window_height), (1280, 720));
        assert_eq!(config.viewport(), Vec2::new(640.0, 360.0));
        assert_eq!(config.target_ups, 60);
        assert!((config.aspect_ratio() - 16.0 / 9.0).abs() < 1e-5);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config: GameConfig = serde_json::from_str(r#"{ "seed": 7, "mode": "borderless" }"#).unwrap();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.mode, WindowMode::Borderless);
        assert_eq!(config.logical_width, 640);
    }

    #[test]
    fn builder_chains() {
        let config = GameConfig::default().with_title("t").with_ups(0).with_seed(3);
        assert_eq!(config.title, "t");
        assert_eq!(config.target_ups, 1);
        assert_eq!(config.seed, Some(3));
    }
}
