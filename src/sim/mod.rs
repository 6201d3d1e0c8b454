//! Deterministic round simulation
//!
//! All duel logic lives here. This module must stay pure and deterministic:
//! - Time only advances through host-supplied ticks
//! - Seeded RNG only
//! - No rendering, input devices or platform dependencies; the host reads
//!   `RoundEvent`s and draws whatever it likes

pub mod clock;
pub mod opponent;
pub mod state;
pub mod tick;

pub use clock::{ClockSegment, RoundClock};
pub use opponent::OpponentTimingModel;
pub use state::{Phase, Round, RoundEvent, RoundOutcome, Side, Winner};
pub use tick::{RoundStateMachine, TickInput};
