//! Game configuration (world streaming, seed, headless pacing). Loaded from config.ron at startup.

use glam::DVec3;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Rejected configuration values.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("world.chunk_size must be positive, got {0}")]
    ChunkSize(f64),
    #[error("world.resolution must be at least 1")]
    Resolution,
    #[error("world.height_scale must be positive, got {0}")]
    HeightScale(f32),
    #[error("world.render_distance must not be negative, got {0}")]
    RenderDistance(i32),
    #[error("world.exclusion_radius must not be negative, got {0}")]
    ExclusionRadius(f64),
    #[error("frame_delta must be positive, got {0}")]
    FrameDelta(f64),
}

/// How the world around the aircraft is generated and kept resident.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamingConfig {
    /// Edge length of a chunk in world units.
    pub chunk_size: f64,
    /// Quads per chunk edge.
    pub resolution: u32,
    pub height_scale: f32,
    /// Chunks kept on each side of the aircraft's chunk.
    pub render_distance: i32,
    /// Planar radius around `spawn_position` kept free of buildings.
    pub exclusion_radius: f64,
    pub spawn_position: DVec3,
}

impl Default for StreamingConfig {
    fn default() -> Self {
        Self {
            chunk_size: 200.0,
            resolution: 32,
            height_scale: 30.0,
            render_distance: 3,
            exclusion_radius: 100.0,
            spawn_position: DVec3::ZERO,
        }
    }
}

/// Persistent game settings. Loaded from `config.ron` in the current directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    #[serde(default)]
    pub world: StreamingConfig,
    /// Fixed world seed; drawn at random when absent.
    #[serde(default)]
    pub world_seed: Option<u32>,
    /// Seconds per simulated frame in the headless host.
    #[serde(default = "default_frame_delta")]
    pub frame_delta: f64,
    /// Length of the scripted flight, seconds.
    #[serde(default = "default_demo_seconds")]
    pub demo_seconds: f64,
    /// Frames between HUD log lines.
    #[serde(default = "default_hud_interval")]
    pub hud_interval_frames: u32,
}

fn default_frame_delta() -> f64 {
    1.0 / 60.0
}
fn default_demo_seconds() -> f64 {
    20.0
}
fn default_hud_interval() -> u32 {
    60
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            world: StreamingConfig::default(),
            world_seed: None,
            frame_delta: default_frame_delta(),
            demo_seconds: default_demo_seconds(),
            hud_interval_frames: default_hud_interval(),
        }
    }
}

impl GameConfig {
    /// Load config from `config.ron`. If the file is missing or invalid, returns default config.
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    /// Load from an explicit path with the same fallbacks as [`GameConfig::load`].
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(data) => match ron::from_str(&data) {
                Ok(c) => c,
                Err(e) => {
                    log::warn!("Invalid config at {:?}: {}, using defaults", path, e);
                    Self::default()
                }
            },
            Err(_) => {
                log::debug!("No config at {:?}, using defaults", path);
                Self::default()
            }
        }
    }

    /// Reject values the world generator or the host loop cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let w = &self.world;
        if !(w.chunk_size > 0.0) {
            return Err(ConfigError::ChunkSize(w.chunk_size));
        }
        if w.resolution == 0 {
            return Err(ConfigError::Resolution);
        }
        if !(w.height_scale > 0.0) {
            return Err(ConfigError::HeightScale(w.height_scale));
        }
        if w.render_distance < 0 {
            return Err(ConfigError::RenderDistance(w.render_distance));
        }
        if !(w.exclusion_radius >= 0.0) {
            return Err(ConfigError::ExclusionRadius(w.exclusion_radius));
        }
        if !(self.frame_delta > 0.0) {
            return Err(ConfigError::FrameDelta(self.frame_delta));
        }
        Ok(())
    }
}

fn config_path() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")).join("config.ron")
}
