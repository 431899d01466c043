//! Overlay model
//!
//! The title/message/button panel shown over the field. The core never
//! touches a DOM; it hands an `Overlay` to whatever front end is attached
//! every time the phase changes.

use serde::{Deserialize, Serialize};

use crate::sim::{GameEvent, GamePhase, GameState};

/// Contents and visibility of the overlay panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Overlay {
    pub visible: bool,
    pub title: String,
    pub message: String,
    pub button_label: String,
}

impl Overlay {
    fn shown(title: String, message: &str, button_label: &str) -> Self {
        Self {
            visible: true,
            title,
            message: message.to_string(),
            button_label: button_label.to_string(),
        }
    }

    fn hidden() -> Self {
        Self {
            visible: false,
            title: String::new(),
            message: String::new(),
            button_label: String::new(),
        }
    }

    /// Overlay for the state's current phase
    pub fn for_state(state: &GameState) -> Self {
        let session = &state.session;
        match session.phase {
            GamePhase::Start => Self::shown(
                format!("Brick Breaker - Level {}", session.level),
                "Use \u{2190} \u{2192} to move the paddle, press Space to launch",
                "Start Game",
            ),
            GamePhase::Playing => Self::hidden(),
            // The level has already advanced by the time the win shows
            GamePhase::Win => Self::shown(
                "Victory!".to_string(),
                &format!(
                    "You cleared level {}! Score: {}",
                    session.level.saturating_sub(1).max(1),
                    session.score
                ),
                "Next Level",
            ),
            GamePhase::GameOver => Self::shown(
                "Game Over".to_string(),
                &format!("Final score: {}", session.score),
                "Play Again",
            ),
        }
    }
}

/// Reports a fresh overlay whenever the last tick changed the phase
#[derive(Debug, Clone, Default)]
pub struct OverlayTracker {
    current: Option<Overlay>,
}

impl OverlayTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Call once per tick; returns the overlay to show if it changed
    pub fn observe(&mut self, state: &GameState) -> Option<&Overlay> {
        let transitioned = state
            .events
            .iter()
            .any(|e| matches!(e, GameEvent::PhaseChanged { .. }));
        if self.current.is_some() && !transitioned {
            return None;
        }
        self.current = Some(Overlay::for_state(state));
        self.current.as_ref()
    }

    pub fn current(&self) -> Option<&Overlay> {
        self.current.as_ref()
    }
}
