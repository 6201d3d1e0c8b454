//! Errors raised while configuring a match
//!
//! Bad settings and an unavailable random source both stop a round from
//! ever starting; nothing here is produced mid-round.

use thiserror::Error;

use crate::settings::Difficulty;

#[derive(Debug, Error)]
pub enum QuickDrawError {
    #[error("{name} must be a positive, finite number of seconds (got {value})")]
    InvalidDuration { name: &'static str, value: f32 },
    #[error("{tier} opponent threshold range must be finite and non-negative (got {value})")]
    InvalidThresholdRange { tier: Difficulty, value: f32 },
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("random source unavailable, cannot sample opponent thresholds: {0}")]
    Entropy(String),
}
