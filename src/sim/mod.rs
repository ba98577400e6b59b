//! Deterministic, headless simulation
//!
//! All gameplay logic lives here. This module must stay free of rendering
//! and platform dependencies:
//! - Explicit `update(dt)` calls, dt in wall-clock milliseconds
//! - Seeded RNG only
//! - Drawing goes through the `Surface` trait, sound through `GameEvent`s

pub mod entities;
pub mod game;
pub mod input;
pub mod physics;
pub mod spawn;

pub use entities::{Bullet, Coin, Monster, Particle, Player};
pub use game::{Game, GameEvent, GamePhase, MusicTrack};
pub use input::{InputState, Key};
pub use physics::{Physics, WallSpawn};
pub use spawn::SpawnManager;
