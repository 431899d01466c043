//! Game state and core simulation types
//!
//! The `GameState` exclusively owns every entity; nothing holds a reference
//! back to it.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::effects::Particles;
use super::timers::Timers;
use crate::consts::*;
use crate::settings::{FieldSize, Settings};

/// Current phase of the game lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for the launch key
    Start,
    /// Active gameplay
    Playing,
    /// Every brick cleared, waiting for restart into the next level
    Win,
    /// Out of lives, waiting for restart
    GameOver,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Start => "start",
            GamePhase::Playing => "playing",
            GamePhase::Win => "win",
            GamePhase::GameOver => "gameover",
        }
    }
}

/// The ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    /// Units per tick
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    pub fn new(pos: Vec2, radius: f32) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            radius,
        }
    }

    /// Advance by one tick of velocity; bounds are the caller's concern
    #[inline]
    pub fn integrate(&mut self) {
        self.pos += self.vel;
    }

    /// Send the ball upward, randomly left or right
    pub fn launch<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let vx = if rng.random_bool(0.5) {
            -BALL_LAUNCH_SPEED
        } else {
            BALL_LAUNCH_SPEED
        };
        self.vel = Vec2::new(vx, -BALL_LAUNCH_SPEED);
    }

    /// Park the ball at `pos` with no velocity
    pub fn reset(&mut self, pos: Vec2) {
        self.pos = pos;
        self.vel = Vec2::ZERO;
    }

    pub fn left(&self) -> f32 {
        self.pos.x - self.radius
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.radius
    }

    pub fn top(&self) -> f32 {
        self.pos.y - self.radius
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.radius
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.pos, Vec2::splat(self.radius))
    }
}

/// The player's paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    /// Top-left corner
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Units per tick
    pub speed: f32,
}

impl Paddle {
    /// Paddle centered horizontally near the bottom of the field
    pub fn for_field(field: &FieldSize) -> Self {
        Self {
            pos: Vec2::new(
                field.center_x() - PADDLE_WIDTH / 2.0,
                field.height - PADDLE_BOTTOM_OFFSET,
            ),
            width: PADDLE_WIDTH,
            height: PADDLE_HEIGHT,
            speed: PADDLE_SPEED,
        }
    }

    /// Move by `direction * speed` (direction in -1..=1) and clamp into the field
    pub fn step(&mut self, direction: i8, field_width: f32) {
        self.pos.x += f32::from(direction.signum()) * self.speed;
        let max_x = (field_width - self.width).max(0.0);
        self.pos.x = self.pos.x.clamp(0.0, max_x);
    }

    /// Horizontal center
    pub fn center_x(&self) -> f32 {
        self.pos.x + self.width / 2.0
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.width
    }

    /// Top-center point (where pickups burst and the hit link attaches)
    pub fn top_center(&self) -> Vec2 {
        Vec2::new(self.center_x(), self.pos.y)
    }

    /// Grow by the expand factor, never past the maximum width
    pub fn expand(&mut self) {
        self.width = (self.width * PADDLE_EXPAND_FACTOR).min(PADDLE_MAX_WIDTH);
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.pos + Vec2::new(self.width, self.height))
    }
}

/// A destructible brick
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brick {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// 1..=3; fixes initial durability and theme color
    pub tier: u8,
    /// Hits remaining
    pub durability: u8,
    pub alive: bool,
}

impl Brick {
    pub fn new(pos: Vec2, size: Vec2, tier: u8) -> Self {
        let tier = tier.clamp(1, MAX_BRICK_TIER);
        Self {
            pos,
            size,
            tier,
            durability: tier,
            alive: true,
        }
    }

    /// Take one hit. Returns true if this hit destroyed the brick.
    pub fn hit(&mut self) -> bool {
        if !self.alive {
            return false;
        }
        self.durability = self.durability.saturating_sub(1);
        if self.durability == 0 {
            self.alive = false;
            return true;
        }
        false
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.pos + self.size)
    }
}

/// Powerup types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerupKind {
    /// One extra life
    Life,
    /// Temporarily wider paddle
    Expand,
    /// Slows the ball down (the name is historical)
    Speedup,
}

impl PowerupKind {
    pub const ALL: [PowerupKind; 3] = [PowerupKind::Life, PowerupKind::Expand, PowerupKind::Speedup];

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

/// A falling pickup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Powerup {
    pub kind: PowerupKind,
    /// Center
    pub pos: Vec2,
    /// Units per tick, downward
    pub fall_speed: f32,
}

impl Powerup {
    pub fn new(kind: PowerupKind, pos: Vec2) -> Self {
        Self {
            kind,
            pos,
            fall_speed: POWERUP_FALL_SPEED,
        }
    }

    pub fn fall(&mut self) {
        self.pos.y += self.fall_speed;
    }

    /// Whether the paddle catches this pickup at its current position
    pub fn caught_by(&self, paddle: &Paddle) -> bool {
        self.pos.y + POWERUP_RADIUS > paddle.pos.y
            && self.pos.x > paddle.pos.x
            && self.pos.x < paddle.right()
    }
}

/// Something that happened during a tick, for presentation layers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    WallHit,
    PaddleHit { hit_pos: f32 },
    BrickHit { destroyed: bool },
    PowerupSpawned(PowerupKind),
    PowerupCollected(PowerupKind),
    LifeLost { lives_left: u32 },
    PhaseChanged { from: GamePhase, to: GamePhase },
}

/// Score, lives and progression for the current session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub score: u64,
    pub lives: u32,
    /// 1-based
    pub level: u32,
    pub theme_index: usize,
    pub phase: GamePhase,
    /// Simulation time (seconds) of the last paddle or brick hit
    pub last_hit_secs: f64,
}

impl Session {
    pub fn new(starting_lives: u32) -> Self {
        Self {
            score: 0,
            lives: starting_lives,
            level: 1,
            theme_index: 0,
            phase: GamePhase::Start,
            last_hit_secs: 0.0,
        }
    }

    /// Points for one brick hit at the current level
    pub fn points_per_hit(&self) -> u64 {
        POINTS_PER_HIT * u64::from(self.level)
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub settings: Settings,
    pub session: Session,
    /// Simulation clock in seconds, the sum of every tick's `dt`
    pub time_secs: f64,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub ball: Ball,
    pub paddle: Paddle,
    pub bricks: Vec<Brick>,
    pub powerups: Vec<Powerup>,
    /// Visual particles (not gameplay-affecting)
    #[serde(skip)]
    pub particles: Particles,
    /// Fixed-delay actions waiting to fire
    pub timers: Timers,
    /// Events recorded during the last tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game with default settings
    pub fn new(seed: u64) -> Self {
        Self::with_settings(seed, Settings::default())
    }

    pub fn with_settings(seed: u64, settings: Settings) -> Self {
        let settings = settings.sanitized();
        let field = settings.field;
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            session: Session::new(settings.starting_lives),
            time_secs: 0.0,
            time_ticks: 0,
            ball: Ball::new(Vec2::new(field.center_x(), field.center_y()), BALL_RADIUS),
            paddle: Paddle::for_field(&field),
            bricks: Vec::new(),
            powerups: Vec::new(),
            particles: Particles::new(settings.max_particles()),
            timers: Timers::default(),
            events: Vec::new(),
            settings,
        };
        super::tick::generate_level(&mut state);
        state
    }

    pub fn field(&self) -> FieldSize {
        self.settings.field
    }

    pub fn phase(&self) -> GamePhase {
        self.session.phase
    }

    pub fn is_playing(&self) -> bool {
        self.session.phase == GamePhase::Playing
    }

    /// Bricks still standing
    pub fn live_bricks(&self) -> usize {
        self.bricks.iter().filter(|b| b.alive).count()
    }

    /// Whether the paddle-to-ball link line should be shown
    pub fn hit_link_visible(&self) -> bool {
        self.is_playing() && self.time_secs - self.session.last_hit_secs < HIT_LINK_SECS
    }

    /// Switch phase, recording the transition
    pub(crate) fn set_phase(&mut self, to: GamePhase) {
        let from = self.session.phase;
        if from == to {
            return;
        }
        log::info!(
            "Phase {} -> {} (level {}, score {}, lives {})",
            from.as_str(),
            to.as_str(),
            self.session.level,
            self.session.score,
            self.session.lives
        );
        self.session.phase = to;
        self.events.push(GameEvent::PhaseChanged { from, to });
    }

    /// Recreate paddle and ball and rebuild the grid for the current level
    pub(crate) fn reset_field(&mut self) {
        let field = self.field();
        self.paddle = Paddle::for_field(&field);
        self.ball = Ball::new(Vec2::new(field.center_x(), field.center_y()), BALL_RADIUS);
        self.powerups.clear();
        self.particles.clear();
        self.session.last_hit_secs = self.time_secs;
        super::tick::generate_level(self);
    }
}
