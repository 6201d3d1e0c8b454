//! Per-phase round timing
//!
//! Host ticks accumulate into the active segment's elapsed time, clamped to
//! the segment duration so a long frame never overshoots.

use serde::{Deserialize, Serialize};

use crate::reached;

/// Timed segment the clock is currently measuring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClockSegment {
    Countdown,
    DrawWindow,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundClock {
    countdown_duration: f32,
    draw_duration: f32,
    countdown_elapsed: f32,
    draw_elapsed: f32,
    segment: ClockSegment,
}

impl RoundClock {
    /// Durations must be positive; `Settings::validate` guarantees this for
    /// clocks built by the state machine.
    pub fn new(countdown_duration: f32, draw_duration: f32) -> Self {
        Self {
            countdown_duration,
            draw_duration,
            countdown_elapsed: 0.0,
            draw_elapsed: 0.0,
            segment: ClockSegment::Countdown,
        }
    }

    pub fn segment(&self) -> ClockSegment {
        self.segment
    }

    pub fn countdown_duration(&self) -> f32 {
        self.countdown_duration
    }

    pub fn draw_duration(&self) -> f32 {
        self.draw_duration
    }

    pub fn countdown_elapsed(&self) -> f32 {
        self.countdown_elapsed
    }

    pub fn draw_elapsed(&self) -> f32 {
        self.draw_elapsed
    }

    /// Back to the start of the countdown
    pub fn reset(&mut self) {
        self.countdown_elapsed = 0.0;
        self.draw_elapsed = 0.0;
        self.segment = ClockSegment::Countdown;
    }

    /// Switch to measuring the draw window, from zero
    pub fn begin_draw_window(&mut self) {
        self.draw_elapsed = 0.0;
        self.segment = ClockSegment::DrawWindow;
    }

    /// Add `dt` seconds to the active segment and return its new elapsed time.
    /// Negative or non-finite deltas add nothing.
    pub fn advance(&mut self, dt: f32) -> f32 {
        let dt = if dt.is_finite() && dt > 0.0 { dt } else { 0.0 };
        match self.segment {
            ClockSegment::Countdown => {
                self.countdown_elapsed = settle(self.countdown_elapsed + dt, self.countdown_duration);
                self.countdown_elapsed
            }
            ClockSegment::DrawWindow => {
                self.draw_elapsed = settle(self.draw_elapsed + dt, self.draw_duration);
                self.draw_elapsed
            }
        }
    }

    /// Active segment has run its full duration
    pub fn is_complete(&self) -> bool {
        match self.segment {
            ClockSegment::Countdown => self.countdown_elapsed >= self.countdown_duration,
            ClockSegment::DrawWindow => self.draw_elapsed >= self.draw_duration,
        }
    }

    /// Draw window has reached `mark` seconds
    pub fn draw_reached(&self, mark: f32) -> bool {
        self.segment == ClockSegment::DrawWindow && reached(self.draw_elapsed, mark)
    }

    /// Display fraction in [0, 1]: depletes during the countdown, fills during
    /// the draw window.
    pub fn progress_fraction(&self) -> f32 {
        let fraction = match self.segment {
            ClockSegment::Countdown => 1.0 - self.countdown_elapsed / self.countdown_duration,
            ClockSegment::DrawWindow => self.draw_elapsed / self.draw_duration,
        };
        fraction.clamp(0.0, 1.0)
    }
}

/// Clamp to `duration`, snapping values that fall just short of it
fn settle(elapsed: f32, duration: f32) -> f32 {
    if reached(elapsed, duration) {
        duration
    } else {
        elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_countdown_progress_depletes() {
        let mut clock = RoundClock::new(3.0, 1.0);
        assert_eq!(clock.progress_fraction(), 1.0);

        clock.advance(1.5);
        assert!((clock.progress_fraction() - 0.5).abs() < 1e-6);
        assert!(!clock.is_complete());

        clock.advance(1.5);
        assert!(clock.is_complete());
        assert_eq!(clock.progress_fraction(), 0.0);
    }

    #[test]
    fn test_advance_clamps_to_duration() {
        let mut clock = RoundClock::new(3.0, 1.0);
        assert_eq!(clock.advance(10.0), 3.0);

        clock.begin_draw_window();
        assert_eq!(clock.draw_elapsed(), 0.0);
        assert_eq!(clock.progress_fraction(), 0.0);
        assert_eq!(clock.advance(0.25), 0.25);
        assert_eq!(clock.advance(5.0), 1.0);
        assert_eq!(clock.progress_fraction(), 1.0);
        // Countdown counter untouched by draw window ticks
        assert_eq!(clock.countdown_elapsed(), 3.0);
    }

    #[test]
    fn test_small_ticks_reach_duration_exactly() {
        let mut clock = RoundClock::new(3.0, 1.0);
        for _ in 0..30 {
            clock.advance(0.1);
        }
        assert!(clock.is_complete());
        assert_eq!(clock.countdown_elapsed(), 3.0);
        assert_eq!(clock.progress_fraction(), 0.0);
    }

    #[test]
    fn test_invalid_deltas_ignored() {
        let mut clock = RoundClock::new(3.0, 1.0);
        clock.advance(-1.0);
        clock.advance(f32::NAN);
        clock.advance(f32::INFINITY);
        assert_eq!(clock.countdown_elapsed(), 0.0);
    }

    #[test]
    fn test_reset_returns_to_countdown() {
        let mut clock = RoundClock::new(3.0, 1.0);
        clock.advance(3.0);
        clock.begin_draw_window();
        clock.advance(0.4);
        assert!(clock.draw_reached(0.4));
        assert!(!clock.draw_reached(0.5));

        clock.reset();
        assert_eq!(clock.segment(), ClockSegment::Countdown);
        assert_eq!(clock.countdown_elapsed(), 0.0);
        assert_eq!(clock.draw_elapsed(), 0.0);
        assert!(!clock.draw_reached(0.0));
    }
}
