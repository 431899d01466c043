//! Brick Breaker - an arcade ball-and-paddle game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, collisions, game state machine)
//! - `renderer`: Render surface abstraction and vertex batching
//! - `platform`: Input abstraction (keyboard polling, demo autopilot)
//! - `ui`: Overlay text driven by phase transitions
//! - `settings`: Data-driven field size, difficulty and quality

pub mod palette;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod ui;

pub use settings::{Difficulty, FieldSize, QualityPreset, Settings};

/// Game configuration constants
pub mod consts {
    use std::f32::consts::FRAC_PI_4;

    /// Fixed simulation timestep (one tick per animation frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Default field dimensions
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Ball defaults (speeds are units per tick)
    pub const BALL_RADIUS: f32 = 10.0;
    pub const BALL_LAUNCH_SPEED: f32 = 4.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 100.0;
    pub const PADDLE_MAX_WIDTH: f32 = 180.0;
    pub const PADDLE_HEIGHT: f32 = 15.0;
    pub const PADDLE_SPEED: f32 = 8.0;
    /// Distance from the field bottom to the paddle's top edge
    pub const PADDLE_BOTTOM_OFFSET: f32 = 30.0;
    /// Horizontal speed scale for paddle deflection
    pub const PADDLE_DEFLECT_SPEED: f32 = 5.0;
    /// Deflection at the paddle edges (radians)
    pub const MAX_DEFLECTION_ANGLE: f32 = FRAC_PI_4;

    /// Difficulty scaling on paddle hits: 1 + min(level * factor, cap)
    pub const SPEED_BOOST_PER_LEVEL: f32 = 0.1;
    pub const SPEED_BOOST_CAP: f32 = 1.3;
    /// Vertical speed ceiling after a boost. The paddle's hit window is the
    /// ball diameter plus the paddle height (a brick row's is wider), so any
    /// step shorter than that still lands an overlapping tick.
    pub const MAX_VERTICAL_SPEED: f32 = 2.0 * BALL_RADIUS + PADDLE_HEIGHT - 1.0;

    /// Brick grid layout
    pub const BRICK_ROWS: u32 = 6;
    pub const BRICK_COLS: u32 = 13;
    pub const BRICK_WIDTH: f32 = 50.0;
    pub const BRICK_HEIGHT: f32 = 20.0;
    pub const BRICK_PADDING: f32 = 10.0;
    pub const BRICK_TOP_MARGIN: f32 = 50.0;
    /// Levels above this mix in tougher bricks
    pub const MIXED_BRICKS_AFTER_LEVEL: u32 = 3;
    pub const MAX_BRICK_TIER: u8 = 3;
    pub const POINTS_PER_HIT: u64 = 10;

    /// Powerups
    pub const POWERUP_CHANCE: f32 = 0.2;
    pub const POWERUP_RADIUS: f32 = 10.0;
    pub const POWERUP_FALL_SPEED: f32 = 2.0;
    pub const PADDLE_EXPAND_FACTOR: f32 = 1.3;
    pub const SLOWDOWN_FACTOR: f32 = 0.8;

    /// Session
    pub const STARTING_LIVES: u32 = 3;

    /// Deferred action delays (seconds of simulation time)
    pub const RELAUNCH_DELAY_SECS: f64 = 1.0;
    pub const EXPAND_DURATION_SECS: f64 = 10.0;
    /// How long the paddle-to-ball link line stays visible after a hit
    pub const HIT_LINK_SECS: f64 = 1.0;

    /// Burst sizes (particle counts)
    pub const WALL_BURST: usize = 20;
    pub const PADDLE_BURST: usize = 30;
    pub const LIFE_LOST_BURST: usize = 50;
    pub const BRICK_BURST: usize = 15;
    pub const POWERUP_BURST: usize = 50;
}

/// Linearly map `value` from `[in_min, in_max]` onto `[out_min, out_max]`
#[inline]
pub fn map_range(value: f32, in_min: f32, in_max: f32, out_min: f32, out_max: f32) -> f32 {
    let t = (value - in_min) / (in_max - in_min);
    out_min + t * (out_max - out_min)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_range() {
        assert_eq!(map_range(0.5, 0.0, 1.0, -1.0, 1.0), 0.0);
        assert_eq!(map_range(0.0, 0.0, 1.0, -1.0, 1.0), -1.0);
        assert_eq!(map_range(1.0, 0.0, 1.0, -1.0, 1.0), 1.0);
    }
}
