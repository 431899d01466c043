//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per frame, clock advanced by a fixed timestep
//! - Seeded RNG only
//! - Stable iteration order (grid build order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod effects;
pub mod state;
pub mod tick;
pub mod timers;

pub use collision::{Aabb, BrickRebound, WallContact};
pub use effects::{Particle, Particles};
pub use state::{
    Ball, Brick, GameEvent, GamePhase, GameState, Paddle, Powerup, PowerupKind, Session,
};
pub use tick::{
    TickInput, apply_powerup, generate_level, press_overlay_button, restart, start_game, tick,
};
pub use timers::{DeferredAction, Timers};
