//! Demo-mode player
//!
//! Tracks the ball with the paddle, detours for falling pickups while the
//! ball is safely climbing, and presses start/restart on its own. Used by the
//! headless runner and for soak-testing the simulation.

use super::{InputSource, KeyPress};
use crate::sim::{GamePhase, GameState};

/// Distance (in units) within which the paddle is considered on target
const DEADZONE: f32 = 6.0;
/// Ball is "safe" while climbing and above this fraction of the field
const SAFE_HEIGHT_FRACTION: f32 = 0.6;

/// AI input source
#[derive(Debug, Clone, Default)]
pub struct Autopilot {
    target_x: Option<f32>,
    paddle_x: f32,
    pending: Vec<KeyPress>,
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decide this frame's input from the current state
    pub fn observe(&mut self, state: &GameState) {
        self.pending.clear();
        match state.phase() {
            GamePhase::Start => self.pending.push(KeyPress::Launch),
            GamePhase::Win | GamePhase::GameOver => self.pending.push(KeyPress::Restart),
            GamePhase::Playing => {}
        }

        self.paddle_x = state.paddle.center_x();
        if !state.is_playing() {
            self.target_x = None;
            return;
        }

        let ball = &state.ball;
        let field = state.field();
        let ball_is_safe = ball.vel.y < 0.0 && ball.pos.y < field.height * SAFE_HEIGHT_FRACTION;

        // If safe, go grab the lowest pickup
        let pickup = if ball_is_safe {
            state
                .powerups
                .iter()
                .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
                .map(|p| p.pos.x)
        } else {
            None
        };

        // Vary the contact point a little so the rally doesn't loop forever
        let wobble = ((state.time_ticks as f32) * 0.01).sin() * state.paddle.width * 0.3;
        self.target_x = Some(pickup.unwrap_or(ball.pos.x + wobble));
    }
}

impl InputSource for Autopilot {
    fn left_held(&self) -> bool {
        self.target_x
            .is_some_and(|target| target < self.paddle_x - DEADZONE)
    }

    fn right_held(&self) -> bool {
        self.target_x
            .is_some_and(|target| target > self.paddle_x + DEADZONE)
    }

    fn take_presses(&mut self) -> Vec<KeyPress> {
        std::mem::take(&mut self.pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::platform::sample;
    use crate::sim::tick;
    use glam::Vec2;

    #[test]
    fn test_presses_launch_on_start_screen() {
        let state = GameState::new(1);
        let mut pilot = Autopilot::new();
        pilot.observe(&state);
        let input = sample(&mut pilot);
        assert!(input.launch);
        assert!(!input.left && !input.right);
    }

    #[test]
    fn test_chases_ball() {
        let mut state = GameState::new(1);
        state.session.phase = GamePhase::Playing;
        state.ball.pos = Vec2::new(50.0, 400.0);
        state.ball.vel = Vec2::new(0.0, 4.0);

        let mut pilot = Autopilot::new();
        pilot.observe(&state);
        assert!(pilot.left_held());
        assert!(!pilot.right_held());
    }

    #[test]
    fn test_survives_a_while() {
        let mut state = GameState::new(2024);
        let mut pilot = Autopilot::new();
        for _ in 0..3_000 {
            pilot.observe(&state);
            let input = sample(&mut pilot);
            tick(&mut state, &input, SIM_DT);
        }
        assert!(state.time_ticks == 3_000);
        assert!(state.session.score > 0);
    }
}
