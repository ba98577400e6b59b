//! Coin Blitz - a top-down arena survival shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, entities, spawning, game loop)
//! - `render`: Drawing-surface contract plus the canvas implementation
//! - `assets`: Sprite identity and best-effort image preloading
//! - `audio`: Procedural Web Audio sound and music
//! - `config`: Data-driven game balance
//! - `settings`: Player preferences

pub mod assets;
pub mod audio;
pub mod config;
pub mod render;
pub mod settings;
pub mod sim;

pub use config::{Difficulty, GameConfig};
pub use settings::Settings;

use glam::Vec2;

/// Vector of length `magnitude` pointing along `angle` radians
#[inline]
pub fn vec_from_angle(angle: f32, magnitude: f32) -> Vec2 {
    Vec2::new(angle.cos() * magnitude, angle.sin() * magnitude)
}

/// Angle of the ray from `from` to `to`
#[inline]
pub fn angle_between(from: Vec2, to: Vec2) -> f32 {
    (to.y - from.y).atan2(to.x - from.x)
}
