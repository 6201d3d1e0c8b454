//! Game settings: phase durations, difficulty and opponent reaction table
//!
//! Loaded from JSON. Every constructor that returns `Settings` from outside
//! input validates it first, so a bad duration never reaches a running round.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_COUNTDOWN_DURATION, DEFAULT_DRAW_DURATION};
use crate::error::QuickDrawError;

/// Opponent difficulty tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" | "med" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Upper bound of the opponent's reaction time per tier (seconds after the
/// draw window opens). Thresholds are sampled uniformly from `[0, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdTable {
    pub easy: f32,
    pub medium: f32,
    pub hard: f32,
}

impl ThresholdTable {
    /// Standard table
    pub const STANDARD: ThresholdTable = ThresholdTable {
        easy: 0.8,
        medium: 0.5,
        hard: 0.3,
    };

    /// Faster opponent at every tier
    pub const TIGHT: ThresholdTable = ThresholdTable {
        easy: 0.5,
        medium: 0.3,
        hard: 0.1,
    };

    pub fn max_range(&self, tier: Difficulty) -> f32 {
        match tier {
            Difficulty::Easy => self.easy,
            Difficulty::Medium => self.medium,
            Difficulty::Hard => self.hard,
        }
    }

    fn validate(&self) -> Result<(), QuickDrawError> {
        for tier in Difficulty::ALL {
            let value = self.max_range(tier);
            if !value.is_finite() || value < 0.0 {
                return Err(QuickDrawError::InvalidThresholdRange { tier, value });
            }
        }
        Ok(())
    }
}

impl Default for ThresholdTable {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Round configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Countdown before drawing is allowed (seconds)
    pub countdown_duration: f32,
    /// Length of the draw window (seconds)
    pub draw_duration: f32,
    /// Opponent tier used for new rounds
    pub difficulty: Difficulty,
    /// Opponent reaction ranges per tier
    pub thresholds: ThresholdTable,
    /// Start the next round once the draw window of a resolved round runs out
    pub auto_restart: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            countdown_duration: DEFAULT_COUNTDOWN_DURATION,
            draw_duration: DEFAULT_DRAW_DURATION,
            difficulty: Difficulty::Medium,
            thresholds: ThresholdTable::STANDARD,
            auto_restart: true,
        }
    }
}

impl Settings {
    /// Default settings at the given difficulty
    pub fn from_difficulty(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            ..Self::default()
        }
    }

    /// Reject configurations that would make phase completion degenerate
    pub fn validate(&self) -> Result<(), QuickDrawError> {
        check_duration("countdown_duration", self.countdown_duration)?;
        check_duration("draw_duration", self.draw_duration)?;
        self.thresholds.validate()
    }

    /// Parse and validate settings from JSON. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, QuickDrawError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, QuickDrawError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, QuickDrawError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn check_duration(name: &'static str, value: f32) -> Result<(), QuickDrawError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(QuickDrawError::InvalidDuration { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.countdown_duration, 3.0);
        assert_eq!(settings.draw_duration, 1.0);
        assert_eq!(settings.thresholds.max_range(Difficulty::Medium), 0.5);
    }

    #[test]
    fn test_difficulty_from_str() {
        assert_eq!(Difficulty::from_str("HARD"), Some(Difficulty::Hard));
        assert_eq!(Difficulty::from_str("med"), Some(Difficulty::Medium));
        assert_eq!(Difficulty::from_str("nightmare"), None);
    }

    #[test]
    fn test_rejects_zero_draw_window() {
        let settings = Settings {
            draw_duration: 0.0,
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(QuickDrawError::InvalidDuration {
                name: "draw_duration",
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_negative_and_nan_values() {
        let settings = Settings {
            countdown_duration: -1.0,
            ..Settings::default()
        };
        assert!(settings.validate().is_err());

        let settings = Settings {
            thresholds: ThresholdTable {
                hard: f32::NAN,
                ..ThresholdTable::STANDARD
            },
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(QuickDrawError::InvalidThresholdRange {
                tier: Difficulty::Hard,
                ..
            })
        ));
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings =
            Settings::from_json(r#"{ "difficulty": "Hard", "draw_duration": 1.5 }"#).unwrap();
        assert_eq!(settings.difficulty, Difficulty::Hard);
        assert_eq!(settings.draw_duration, 1.5);
        assert_eq!(settings.countdown_duration, 3.0);
        assert_eq!(settings.thresholds, ThresholdTable::STANDARD);
        assert!(settings.auto_restart);
    }

    #[test]
    fn test_json_validation_runs() {
        let err = Settings::from_json(r#"{ "countdown_duration": 0.0 }"#).unwrap_err();
        assert!(matches!(err, QuickDrawError::InvalidDuration { .. }));

        let err = Settings::from_json("{ not json").unwrap_err();
        assert!(matches!(err, QuickDrawError::Parse(_)));
    }

    #[test]
    fn test_json_roundtrip_keeps_table() {
        let settings = Settings {
            thresholds: ThresholdTable::TIGHT,
            ..Settings::from_difficulty(Difficulty::Easy)
        };
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }
}
