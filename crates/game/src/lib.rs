//! OpenSky game layer: configuration, world streaming, HUD text and the
//! per-frame simulation that ties the engine crates together.

pub mod autopilot;
pub mod config;
pub mod hud;
pub mod simulation;
pub mod world;

pub use config::{ConfigError, GameConfig, StreamingConfig};
pub use simulation::Simulation;
pub use world::{ResidentChunk, StreamReport, WorldStreamer};
