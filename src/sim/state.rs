//! Round state and the events the state machine reports to the host
//!
//! A `Round` only records facts; which transitions are legal is decided by
//! the state machine in `tick.rs`.

use serde::{Deserialize, Serialize};

use super::clock::RoundClock;

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Round created, waiting for `start_round`
    Idle,
    /// Counting down, drawing not yet allowed
    Countdown,
    /// Either side may draw
    DrawWindow,
    /// Winner decided, waiting to be replaced by a fresh round
    Resolved,
}

impl Phase {
    /// The player's draw button should be live
    pub fn accepts_draw(&self) -> bool {
        matches!(self, Phase::DrawWindow)
    }
}

/// One of the two duelists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Player,
    Opponent,
}

/// Result of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Winner {
    Player,
    Opponent,
    /// Window ran out with no draw
    Nobody,
}

impl Winner {
    /// Side credited with the round, if any
    pub fn side(&self) -> Option<Side> {
        match self {
            Winner::Player => Some(Side::Player),
            Winner::Opponent => Some(Side::Opponent),
            Winner::Nobody => None,
        }
    }
}

impl From<Side> for Winner {
    fn from(side: Side) -> Self {
        match side {
            Side::Player => Winner::Player,
            Side::Opponent => Winner::Opponent,
        }
    }
}

/// Summary reported when a round resolves
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoundOutcome {
    pub round: u32,
    pub winner: Winner,
    /// Seconds into the draw window the player drew
    pub player_time: Option<f32>,
    /// Seconds into the draw window the opponent drew
    pub opponent_time: Option<f32>,
    /// Opponent's threshold for the round
    pub opponent_threshold: f32,
}

/// Notifications for the presentation layer, drained once per frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RoundEvent {
    PhaseChanged(Phase),
    /// Countdown indicator fraction (depleting) or draw window fill
    ProgressUpdated(f32),
    RoundResolved(RoundOutcome),
    ScoreChanged { player_wins: u32, opponent_wins: u32 },
}

/// A single duel
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Round {
    /// 1-based index within the match
    number: u32,
    phase: Phase,
    clock: RoundClock,
    opponent_threshold: Option<f32>,
    player_draw_time: Option<f32>,
    opponent_draw_time: Option<f32>,
    winner: Option<Winner>,
}

impl Round {
    pub fn new(number: u32, countdown_duration: f32, draw_duration: f32) -> Self {
        Self {
            number,
            phase: Phase::Idle,
            clock: RoundClock::new(countdown_duration, draw_duration),
            opponent_threshold: None,
            player_draw_time: None,
            opponent_draw_time: None,
            winner: None,
        }
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn clock(&self) -> &RoundClock {
        &self.clock
    }

    pub fn countdown_elapsed(&self) -> f32 {
        self.clock.countdown_elapsed()
    }

    pub fn draw_window_elapsed(&self) -> f32 {
        self.clock.draw_elapsed()
    }

    /// Sampled at round start; `None` while idle
    pub fn opponent_threshold(&self) -> Option<f32> {
        self.opponent_threshold
    }

    pub fn player_draw_time(&self) -> Option<f32> {
        self.player_draw_time
    }

    pub fn opponent_draw_time(&self) -> Option<f32> {
        self.opponent_draw_time
    }

    pub fn winner(&self) -> Option<Winner> {
        self.winner
    }

    /// The opponent still has its draw to make this round
    pub fn opponent_pending(&self) -> bool {
        self.opponent_threshold.is_some() && self.opponent_draw_time.is_none()
    }

    pub(crate) fn clock_mut(&mut self) -> &mut RoundClock {
        &mut self.clock
    }

    /// Idle -> Countdown with a fresh threshold
    pub(crate) fn begin(&mut self, opponent_threshold: f32) {
        debug_assert_eq!(self.phase, Phase::Idle);
        self.clock.reset();
        self.opponent_threshold = Some(opponent_threshold);
        self.player_draw_time = None;
        self.opponent_draw_time = None;
        self.winner = None;
        self.phase = Phase::Countdown;
    }

    /// Countdown -> DrawWindow
    pub(crate) fn open_draw_window(&mut self) {
        debug_assert_eq!(self.phase, Phase::Countdown);
        self.clock.begin_draw_window();
        self.phase = Phase::DrawWindow;
    }

    /// DrawWindow -> Resolved. Records the drawing side's time at the current
    /// draw window elapsed. Returns false if the round was already decided.
    pub(crate) fn resolve(&mut self, winner: Winner) -> bool {
        if self.phase != Phase::DrawWindow || self.winner.is_some() {
            return false;
        }
        let at = self.clock.draw_elapsed();
        match winner {
            Winner::Player => self.player_draw_time = Some(at),
            Winner::Opponent => self.opponent_draw_time = Some(at),
            Winner::Nobody => {}
        }
        self.winner = Some(winner);
        self.phase = Phase::Resolved;
        true
    }

    /// Snapshot for `RoundEvent::RoundResolved`
    pub fn outcome(&self) -> Option<RoundOutcome> {
        let winner = self.winner?;
        Some(RoundOutcome {
            round: self.number,
            winner,
            player_time: self.player_draw_time,
            opponent_time: self.opponent_draw_time,
            opponent_threshold: self.opponent_threshold.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_round_is_idle_and_empty() {
        let round = Round::new(1, 3.0, 1.0);
        assert_eq!(round.phase(), Phase::Idle);
        assert_eq!(round.opponent_threshold(), None);
        assert!(!round.opponent_pending());
        assert_eq!(round.outcome(), None);
    }

    #[test]
    fn test_resolve_only_once() {
        let mut round = Round::new(1, 3.0, 1.0);
        round.begin(0.4);
        assert!(!round.resolve(Winner::Player), "cannot resolve during countdown");

        round.clock_mut().advance(3.0);
        round.open_draw_window();
        round.clock_mut().advance(0.2);
        assert!(round.resolve(Winner::Player));
        assert!(!round.resolve(Winner::Opponent));

        assert_eq!(round.winner(), Some(Winner::Player));
        assert_eq!(round.player_draw_time(), Some(0.2));
        assert_eq!(round.opponent_draw_time(), None);
        assert_eq!(round.phase(), Phase::Resolved);

        let outcome = round.outcome().unwrap();
        assert_eq!(outcome.round, 1);
        assert_eq!(outcome.opponent_threshold, 0.4);
    }

    #[test]
    fn test_winner_side_mapping() {
        assert_eq!(Winner::Nobody.side(), None);
        assert_eq!(Winner::from(Side::Opponent).side(), Some(Side::Opponent));
        assert!(Phase::DrawWindow.accepts_draw());
        assert!(!Phase::Countdown.accepts_draw());
    }
}
