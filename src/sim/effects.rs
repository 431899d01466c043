//! Particle bursts
//!
//! Particles never touch gameplay. The pool is capped: when a burst pushes
//! it past the cap, the oldest particles are dropped first.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::PowerupKind;
use crate::palette::{self, Rgba};

/// Lifespan of powerup collection particles, in ticks
const POWERUP_PARTICLE_LIFE: u32 = 60;

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    /// Diameter
    pub size: f32,
    /// Units per tick along `angle`
    pub speed: f32,
    /// Heading in radians
    pub angle: f32,
    /// Ticks left to live
    pub life: u32,
    pub color: Rgba,
}

impl Particle {
    /// Move along the heading and age by one tick
    pub fn update(&mut self) {
        self.pos += Vec2::from_angle(self.angle) * self.speed;
        self.life = self.life.saturating_sub(1);
    }

    pub fn is_alive(&self) -> bool {
        self.life > 0
    }
}

/// Capped particle pool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particles {
    list: Vec<Particle>,
    cap: usize,
}

impl Default for Particles {
    fn default() -> Self {
        Self::new(crate::settings::QualityPreset::default().max_particles())
    }
}

impl Particles {
    pub fn new(cap: usize) -> Self {
        Self {
            list: Vec::with_capacity(cap.min(512)),
            cap,
        }
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.list.iter()
    }

    pub fn clear(&mut self) {
        self.list.clear();
    }

    /// Advance every particle and drop the expired ones
    pub fn update(&mut self) {
        for particle in self.list.iter_mut() {
            particle.update();
        }
        self.list.retain(Particle::is_alive);
    }

    fn push(&mut self, particle: Particle) {
        if self.cap == 0 {
            return;
        }
        self.list.push(particle);
    }

    /// Drop the oldest particles beyond the cap
    fn enforce_cap(&mut self) {
        if self.list.len() > self.cap {
            let excess = self.list.len() - self.cap;
            self.list.drain(..excess);
        }
    }

    /// Sparks from a wall, paddle or life-loss impact
    pub fn impact_burst<R: Rng + ?Sized>(&mut self, rng: &mut R, at: Vec2, count: usize) {
        for _ in 0..count {
            let particle = Particle {
                pos: at,
                size: rng.random_range(2.0..6.0),
                speed: rng.random_range(1.0..4.0),
                angle: rng.random_range(0.0..TAU),
                life: rng.random_range(20..40),
                color: palette::impact_spark(rng.random_range(150.0..255.0)),
            };
            self.push(particle);
        }
        self.enforce_cap();
    }

    /// Fragments from a destroyed brick, palette cycled by index
    pub fn brick_burst<R: Rng + ?Sized>(&mut self, rng: &mut R, at: Vec2, count: usize) {
        for i in 0..count {
            let particle = Particle {
                pos: at,
                size: rng.random_range(6.0..12.0),
                speed: rng.random_range(1.0..6.0),
                angle: rng.random_range(0.0..TAU),
                life: rng.random_range(40..80),
                color: palette::BRICK_FRAGMENTS[i % palette::BRICK_FRAGMENTS.len()],
            };
            self.push(particle);
        }
        self.enforce_cap();
    }

    /// Sparkle shower when the paddle catches a powerup
    pub fn powerup_burst<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        at: Vec2,
        kind: PowerupKind,
        count: usize,
    ) {
        let color = powerup_color(kind);
        for _ in 0..count {
            let particle = Particle {
                pos: at,
                size: rng.random_range(3.0..8.0),
                speed: rng.random_range(1.0..5.0),
                angle: rng.random_range(0.0..TAU),
                life: POWERUP_PARTICLE_LIFE,
                color,
            };
            self.push(particle);
        }
        self.enforce_cap();
    }
}

/// Display color for a powerup type
pub fn powerup_color(kind: PowerupKind) -> Rgba {
    match kind {
        PowerupKind::Life => palette::POWERUP_LIFE,
        PowerupKind::Expand => palette::POWERUP_EXPAND,
        PowerupKind::Speedup => palette::POWERUP_SPEEDUP,
    }
}
