//! Game settings and tuning
//!
//! Field size and difficulty are injected into the simulation; quality only
//! affects the particle budget. Loaded from JSON by the native runner.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Maximum live particles for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 100,
            QualityPreset::Medium => 500,
            QualityPreset::High => 2000,
        }
    }
}

/// Playfield dimensions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldSize {
    pub width: f32,
    pub height: f32,
}

impl Default for FieldSize {
    fn default() -> Self {
        Self {
            width: FIELD_WIDTH,
            height: FIELD_HEIGHT,
        }
    }
}

impl FieldSize {
    /// Bottom of the brick grid, trailing padding included
    const GRID_BOTTOM: f32 =
        BRICK_TOP_MARGIN + BRICK_ROWS as f32 * (BRICK_HEIGHT + BRICK_PADDING);

    /// Smallest field that still fits a fully expanded paddle
    pub const MIN_WIDTH: f32 = PADDLE_MAX_WIDTH + 2.0 * BRICK_PADDING;
    /// Smallest field where the ball, respawning at the center, starts a
    /// full diameter below the whole grid (the paddle sits lower still)
    pub const MIN_HEIGHT: f32 = 2.0 * (Self::GRID_BOTTOM + 2.0 * BALL_RADIUS);

    pub fn center_x(&self) -> f32 {
        self.width / 2.0
    }

    pub fn center_y(&self) -> f32 {
        self.height / 2.0
    }
}

/// Paddle-hit speed scaling
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Difficulty {
    /// Boost added per level
    pub speed_boost_per_level: f32,
    /// Upper bound on the boost
    pub speed_boost_cap: f32,
    /// Vertical speed ceiling after a boost
    pub max_vertical_speed: f32,
}

impl Default for Difficulty {
    fn default() -> Self {
        Self {
            speed_boost_per_level: SPEED_BOOST_PER_LEVEL,
            speed_boost_cap: SPEED_BOOST_CAP,
            max_vertical_speed: MAX_VERTICAL_SPEED,
        }
    }
}

impl Difficulty {
    /// Multiplier applied to ball velocity on a paddle hit at `level`
    pub fn speed_multiplier(&self, level: u32) -> f32 {
        1.0 + (level as f32 * self.speed_boost_per_level).min(self.speed_boost_cap)
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Playfield dimensions
    pub field: FieldSize,
    /// Paddle-hit speed scaling
    pub difficulty: Difficulty,
    /// Graphics quality preset
    pub quality: QualityPreset,
    /// Particle effects on/off
    pub particles: bool,
    /// Lives at the start of every session
    pub starting_lives: u32,
    /// Chance that a destroyed brick drops a powerup
    pub powerup_chance: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            field: FieldSize::default(),
            difficulty: Difficulty::default(),
            quality: QualityPreset::Medium,
            particles: true,
            starting_lives: STARTING_LIVES,
            powerup_chance: POWERUP_CHANCE,
        }
    }
}

/// Failure while reading a settings file
#[derive(Debug)]
pub enum SettingsError {
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "failed to read settings: {e}"),
            SettingsError::Parse(e) => write!(f, "invalid settings JSON: {e}"),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io(e) => Some(e),
            SettingsError::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        SettingsError::Io(e)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Parse(e)
    }
}

impl Settings {
    /// Create settings from a quality preset
    pub fn from_preset(preset: QualityPreset) -> Self {
        Self {
            quality: preset,
            ..Self::default()
        }
    }

    /// Effective particle count cap
    pub fn max_particles(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.quality.max_particles()
        }
    }

    /// Parse settings from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        Ok(settings.sanitized())
    }

    /// Read settings from a JSON file
    pub fn from_file(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load settings from a file, falling back to defaults on any failure
    pub fn load(path: &Path) -> Self {
        match Self::from_file(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(SettingsError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No {}, using default settings", path.display());
                Self::default()
            }
            Err(e) => {
                log::warn!("{e}; using default settings");
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Clamp values into ranges the simulation can run with
    pub fn sanitized(mut self) -> Self {
        if self.field.width.is_nan() || self.field.width < FieldSize::MIN_WIDTH {
            log::warn!(
                "Field width {} too small, using {}",
                self.field.width,
                FieldSize::MIN_WIDTH
            );
            self.field.width = FieldSize::MIN_WIDTH;
        }
        if self.field.height.is_nan() || self.field.height < FieldSize::MIN_HEIGHT {
            log::warn!(
                "Field height {} too small, using {}",
                self.field.height,
                FieldSize::MIN_HEIGHT
            );
            self.field.height = FieldSize::MIN_HEIGHT;
        }

        let d = &mut self.difficulty;
        d.speed_boost_per_level = d.speed_boost_per_level.max(0.0);
        d.speed_boost_cap = d.speed_boost_cap.max(0.0);
        d.max_vertical_speed = if d.max_vertical_speed.is_nan() || d.max_vertical_speed <= 0.0 {
            MAX_VERTICAL_SPEED
        } else {
            d.max_vertical_speed.min(MAX_VERTICAL_SPEED)
        };

        self.powerup_chance = if self.powerup_chance.is_nan() {
            POWERUP_CHANCE
        } else {
            self.powerup_chance.clamp(0.0, 1.0)
        };
        self.starting_lives = self.starting_lives.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_classic_field() {
        let settings = Settings::default();
        assert_eq!(settings.field.width, 800.0);
        assert_eq!(settings.field.height, 600.0);
        assert_eq!(settings.starting_lives, 3);
        assert_eq!(settings.max_particles(), 500);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{ "field": { "width": 1024, "height": 768 } }"#)
            .expect("valid json");
        assert_eq!(settings.field.width, 1024.0);
        assert_eq!(settings.field.height, 768.0);
        assert_eq!(settings.difficulty, Difficulty::default());
        assert_eq!(settings.quality, QualityPreset::Medium);
    }

    #[test]
    fn test_invalid_json_is_error() {
        assert!(matches!(
            Settings::from_json("{ not json"),
            Err(SettingsError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file_falls_back() {
        let settings = Settings::load(Path::new("/definitely/not/here.json"));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_sanitize_tiny_field() {
        let settings = Settings::from_json(
            r#"{ "field": { "width": 0, "height": -5 }, "powerup_chance": 4.0, "starting_lives": 0 }"#,
        )
        .expect("valid json");
        assert_eq!(settings.field.width, FieldSize::MIN_WIDTH);
        assert_eq!(settings.field.height, FieldSize::MIN_HEIGHT);
        assert_eq!(settings.powerup_chance, 1.0);
        assert_eq!(settings.starting_lives, 1);
    }

    #[test]
    fn test_min_height_clears_grid() {
        // Six rows of 20 + 10 below a 50 margin, then a ball diameter of room
        assert_eq!(FieldSize::MIN_HEIGHT, 500.0);
        let field = FieldSize {
            width: FieldSize::MIN_WIDTH,
            height: FieldSize::MIN_HEIGHT,
        };
        assert!(field.center_y() - BALL_RADIUS > FieldSize::GRID_BOTTOM);
    }

    #[test]
    fn test_vertical_speed_ceiling_clamped() {
        let settings = Settings::from_json(r#"{ "difficulty": { "max_vertical_speed": 90.0 } }"#)
            .expect("valid json");
        assert_eq!(settings.difficulty.max_vertical_speed, MAX_VERTICAL_SPEED);
        assert_eq!(MAX_VERTICAL_SPEED, 34.0);
    }

    #[test]
    fn test_speed_multiplier_caps() {
        let d = Difficulty::default();
        assert!((d.speed_multiplier(1) - 1.1).abs() < 1e-6);
        assert!((d.speed_multiplier(5) - 1.5).abs() < 1e-6);
        assert!((d.speed_multiplier(50) - 2.3).abs() < 1e-6);
    }

    #[test]
    fn test_particles_disabled() {
        let settings = Settings {
            particles: false,
            ..Settings::from_preset(QualityPreset::High)
        };
        assert_eq!(settings.max_particles(), 0);
        assert_eq!(QualityPreset::from_str("HIGH"), Some(QualityPreset::High));
        assert_eq!(QualityPreset::Low.as_str(), "Low");
    }

    #[test]
    fn test_json_roundtrip_of_defaults() {
        let json = Settings::default().to_json().expect("serializes");
        assert_eq!(Settings::from_json(&json).expect("parses"), Settings::default());
    }
}
