//! Fixed-delay deferred actions
//!
//! Timers are fire-and-forget: nothing cancels them. Whoever applies a fired
//! action must re-check the game phase, since it may have changed while the
//! timer was pending.

use serde::{Deserialize, Serialize};

/// What to do when a timer fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeferredAction {
    /// Launch the ball again after a lost life
    RelaunchBall,
    /// Shrink the paddle back after an expand pickup
    RestorePaddleWidth,
}

/// A pending action and the simulation time (seconds) it fires at
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
struct Scheduled {
    due: f64,
    action: DeferredAction,
}

/// Pending deferred actions, ordered by due time
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Timers {
    pending: Vec<Scheduled>,
}

impl Timers {
    /// Schedule `action` to fire `delay` seconds after `now`
    pub fn schedule(&mut self, now: f64, delay: f64, action: DeferredAction) {
        let entry = Scheduled {
            due: now + delay,
            action,
        };
        // Keep FIFO order among equal due times
        let idx = self.pending.partition_point(|s| s.due <= entry.due);
        self.pending.insert(idx, entry);
    }

    /// Remove and return every action due at or before `now`, oldest first
    pub fn take_due(&mut self, now: f64) -> Vec<DeferredAction> {
        let split = self.pending.partition_point(|s| s.due <= now);
        self.pending.drain(..split).map(|s| s.action).collect()
    }

    pub fn is_pending(&self, action: DeferredAction) -> bool {
        self.pending.iter().any(|s| s.action == action)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_when_due() {
        let mut timers = Timers::default();
        timers.schedule(0.0, 1.0, DeferredAction::RelaunchBall);
        assert!(timers.take_due(0.999).is_empty());
        assert_eq!(timers.take_due(1.0), vec![DeferredAction::RelaunchBall]);
        assert!(timers.is_empty());
    }

    #[test]
    fn test_due_order() {
        let mut timers = Timers::default();
        timers.schedule(0.0, 10.0, DeferredAction::RestorePaddleWidth);
        timers.schedule(0.5, 1.0, DeferredAction::RelaunchBall);
        timers.schedule(0.5, 1.0, DeferredAction::RestorePaddleWidth);
        assert_eq!(timers.len(), 3);
        assert_eq!(
            timers.take_due(20.0),
            vec![
                DeferredAction::RelaunchBall,
                DeferredAction::RestorePaddleWidth,
                DeferredAction::RestorePaddleWidth,
            ]
        );
    }

    #[test]
    fn test_partial_drain() {
        let mut timers = Timers::default();
        timers.schedule(0.0, 1.0, DeferredAction::RelaunchBall);
        timers.schedule(0.0, 10.0, DeferredAction::RestorePaddleWidth);
        assert_eq!(timers.take_due(5.0), vec![DeferredAction::RelaunchBall]);
        assert!(!timers.is_pending(DeferredAction::RelaunchBall));
        assert!(timers.is_pending(DeferredAction::RestorePaddleWidth));
    }
}
