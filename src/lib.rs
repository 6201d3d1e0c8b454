//! Quick Draw - a reaction-time duel against a simulated gunslinger
//!
//! Core modules:
//! - `sim`: Deterministic round simulation (clock, opponent timing, state machine)
//! - `score`: Win tally for both sides
//! - `settings`: Durations, difficulty and opponent threshold table
//! - `error`: Configuration and seeding errors

pub mod error;
pub mod score;
pub mod settings;
pub mod sim;

pub use error::QuickDrawError;
pub use score::ScoreLedger;
pub use settings::{Difficulty, Settings, ThresholdTable};

/// Game configuration constants
pub mod consts {
    /// Host frame step used by the headless runner (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Default countdown before the draw window opens (seconds)
    pub const DEFAULT_COUNTDOWN_DURATION: f32 = 3.0;
    /// Default length of the draw window (seconds)
    pub const DEFAULT_DRAW_DURATION: f32 = 1.0;

    /// Elapsed time within this distance of a mark counts as reaching it.
    /// Absorbs f32 drift when many small ticks sum to a phase duration.
    pub const PHASE_EPSILON: f32 = 1e-4;
}

/// True if `elapsed` has reached `mark`, within [`consts::PHASE_EPSILON`]
#[inline]
pub fn reached(elapsed: f32, mark: f32) -> bool {
    elapsed >= mark - consts::PHASE_EPSILON
}
