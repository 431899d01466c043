//! Fixed timestep simulation tick
//!
//! Core game loop that advances the simulation one frame at a time. Ball,
//! paddle and pickup motion are per tick; `dt` only drives the clock that
//! deferred actions are measured against. The clock is accumulated in f64
//! so the fixed delays land on whole ticks at 60 Hz.

use glam::Vec2;
use rand::Rng;

use super::collision::{
    apply_rebound, ball_below_field, ball_paddle_hit, ball_wall_contact, brick_rebound,
    paddle_rebound,
};
use super::state::{Brick, GameEvent, GamePhase, GameState, Powerup, PowerupKind};
use super::timers::DeferredAction;
use crate::consts::*;
use crate::palette;

/// Input commands for a single tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Move paddle left (held)
    pub left: bool,
    /// Move paddle right (held)
    pub right: bool,
    /// Launch from the start screen (space)
    pub launch: bool,
    /// Restart after a win or game over (R)
    pub restart: bool,
}

impl TickInput {
    /// Paddle direction: -1 left, 0 still, +1 right
    pub fn direction(&self) -> i8 {
        i8::from(self.right) - i8::from(self.left)
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.events.clear();
    state.time_ticks += 1;
    state.time_secs += f64::from(dt);

    // Discrete key presses drive the state machine
    if input.launch && state.phase() == GamePhase::Start {
        start_game(state);
    }
    if input.restart && matches!(state.phase(), GamePhase::Win | GamePhase::GameOver) {
        restart(state);
    }

    for action in state.timers.take_due(state.time_secs) {
        apply_deferred(state, action);
    }

    if state.is_playing() {
        let field = state.field();
        state.paddle.step(input.direction(), field.width);
        state.ball.integrate();

        resolve_walls(state);
        resolve_paddle(state);
        resolve_bricks(state);
        update_powerups(state);
        resolve_life_loss(state);
    }

    // Particles keep animating on the overlay screens
    state.particles.update();

    check_win(state);
}

/// Leave the start screen
pub fn start_game(state: &mut GameState) {
    if state.phase() != GamePhase::Start {
        return;
    }
    state.set_phase(GamePhase::Playing);
    state.ball.launch(&mut state.rng);
}

/// Start a fresh run after a win (next level) or game over (level 1)
pub fn restart(state: &mut GameState) {
    if !matches!(state.phase(), GamePhase::Win | GamePhase::GameOver) {
        return;
    }
    state.session.score = 0;
    state.session.lives = state.settings.starting_lives;
    state.reset_field();
    state.set_phase(GamePhase::Playing);
    state.ball.launch(&mut state.rng);
}

/// The overlay button: start, next level or play again depending on phase
pub fn press_overlay_button(state: &mut GameState) {
    match state.phase() {
        GamePhase::Start => start_game(state),
        GamePhase::Win | GamePhase::GameOver => restart(state),
        GamePhase::Playing => {}
    }
}

/// Run a fired timer, unless the game left `Playing` while it was pending
fn apply_deferred(state: &mut GameState, action: DeferredAction) {
    if !state.is_playing() {
        log::debug!(
            "Dropping stale {:?} (phase {})",
            action,
            state.phase().as_str()
        );
        return;
    }
    match action {
        DeferredAction::RelaunchBall => state.ball.launch(&mut state.rng),
        DeferredAction::RestorePaddleWidth => state.paddle.width = PADDLE_WIDTH,
    }
}

/// Side walls flip horizontal velocity, the ceiling flips vertical velocity
fn resolve_walls(state: &mut GameState) {
    let contact = ball_wall_contact(&state.ball, state.field().width);
    if contact.side {
        state.ball.vel.x = -state.ball.vel.x;
        state.particles.impact_burst(&mut state.rng, state.ball.pos, WALL_BURST);
        state.events.push(GameEvent::WallHit);
    }
    if contact.top {
        state.ball.vel.y = -state.ball.vel.y;
        state.particles.impact_burst(&mut state.rng, state.ball.pos, WALL_BURST);
        state.events.push(GameEvent::WallHit);
    }
}

fn resolve_paddle(state: &mut GameState) {
    let Some(hit_pos) = ball_paddle_hit(&state.ball, &state.paddle) else {
        return;
    };
    state.ball.vel = paddle_rebound(
        state.ball.vel,
        hit_pos,
        state.session.level,
        &state.settings.difficulty,
    );
    // Rest the ball on the paddle so a deep hit is not also read as a miss
    state.ball.pos.y = state.paddle.pos.y - state.ball.radius;
    state.particles.impact_burst(&mut state.rng, state.ball.pos, PADDLE_BURST);
    state.session.last_hit_secs = state.time_secs;
    state.events.push(GameEvent::PaddleHit { hit_pos });
}

/// At most one brick is processed per tick so a ball straddling two bricks
/// only scores once.
fn resolve_bricks(state: &mut GameState) {
    let ball_box = state.ball.bounds();
    let Some(index) = state
        .bricks
        .iter()
        .rposition(|b| b.alive && b.bounds().overlaps(&ball_box))
    else {
        return;
    };

    let brick = &mut state.bricks[index];
    let destroyed = brick.hit();
    let bounds = brick.bounds();
    let center = brick.center();

    if destroyed {
        if state.rng.random_bool(f64::from(state.settings.powerup_chance)) {
            let kind = PowerupKind::random(&mut state.rng);
            state.powerups.push(Powerup::new(kind, center));
            state.events.push(GameEvent::PowerupSpawned(kind));
        }
        state.particles.brick_burst(&mut state.rng, center, BRICK_BURST);
    }

    let rebound = brick_rebound(state.ball.pos, &bounds);
    state.ball.vel = apply_rebound(state.ball.vel, rebound);

    state.session.score += state.session.points_per_hit();
    state.session.last_hit_secs = state.time_secs;
    state.events.push(GameEvent::BrickHit { destroyed });
}

/// Move pickups, collect the ones the paddle caught, drop the ones that fell out
fn update_powerups(state: &mut GameState) {
    let field_height = state.field().height;
    let paddle = &state.paddle;
    let mut collected = Vec::new();

    state.powerups.retain_mut(|pickup| {
        pickup.fall();
        if pickup.caught_by(paddle) {
            collected.push(pickup.kind);
            false
        } else {
            pickup.pos.y <= field_height
        }
    });

    for kind in collected {
        apply_powerup(state, kind);
    }
}

/// Apply a collected powerup's effect
pub fn apply_powerup(state: &mut GameState, kind: PowerupKind) {
    let at = state.paddle.top_center();
    state
        .particles
        .powerup_burst(&mut state.rng, at, kind, POWERUP_BURST);

    match kind {
        PowerupKind::Life => state.session.lives += 1,
        PowerupKind::Expand => {
            state.paddle.expand();
            state.timers.schedule(
                state.time_secs,
                EXPAND_DURATION_SECS,
                DeferredAction::RestorePaddleWidth,
            );
        }
        PowerupKind::Speedup => state.ball.vel *= SLOWDOWN_FACTOR,
    }

    log::debug!("Collected {:?} powerup", kind);
    state.events.push(GameEvent::PowerupCollected(kind));
}

fn resolve_life_loss(state: &mut GameState) {
    let field = state.field();
    if !ball_below_field(&state.ball, field.height) {
        return;
    }

    debug_assert!(state.session.lives > 0, "lost a life with none left");
    state.session.lives = state.session.lives.saturating_sub(1);

    let at = Vec2::new(state.ball.pos.x, field.height);
    state
        .particles
        .impact_burst(&mut state.rng, at, LIFE_LOST_BURST);
    state
        .ball
        .reset(Vec2::new(field.center_x(), field.center_y()));
    state.events.push(GameEvent::LifeLost {
        lives_left: state.session.lives,
    });

    if state.session.lives == 0 {
        state.set_phase(GamePhase::GameOver);
        state.session.level = 1;
    } else {
        state
            .timers
            .schedule(state.time_secs, RELAUNCH_DELAY_SECS, DeferredAction::RelaunchBall);
    }
}

/// Level cleared: advance level and theme; the grid is rebuilt on restart
fn check_win(state: &mut GameState) {
    if !state.is_playing() || state.live_bricks() > 0 {
        return;
    }
    state.set_phase(GamePhase::Win);
    state.session.level += 1;
    state.session.theme_index = palette::next_theme(state.session.theme_index);
}

/// Columns of bricks that fit across the field
pub fn grid_columns(field_width: f32) -> u32 {
    let fit = ((field_width - BRICK_PADDING) / (BRICK_WIDTH + BRICK_PADDING)).floor();
    (fit.max(1.0) as u32).min(BRICK_COLS)
}

/// Build the brick grid for the current level
pub fn generate_level(state: &mut GameState) {
    let level = state.session.level;
    let cols = grid_columns(state.field().width);
    let mixed = level > MIXED_BRICKS_AFTER_LEVEL;

    state.bricks.clear();
    for c in 0..cols {
        for r in 0..BRICK_ROWS {
            let tier = if mixed {
                state.rng.random_range(1..=MAX_BRICK_TIER)
            } else {
                1
            };
            let pos = Vec2::new(
                c as f32 * (BRICK_WIDTH + BRICK_PADDING) + BRICK_PADDING,
                r as f32 * (BRICK_HEIGHT + BRICK_PADDING) + BRICK_TOP_MARGIN,
            );
            state
                .bricks
                .push(Brick::new(pos, Vec2::new(BRICK_WIDTH, BRICK_HEIGHT), tier));
        }
    }

    log::info!(
        "Level {}: {} bricks ({}x{}, {})",
        level,
        state.bricks.len(),
        cols,
        BRICK_ROWS,
        if mixed { "mixed" } else { "single-hit" }
    );
}
