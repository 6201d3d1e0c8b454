//! Round state machine
//!
//! Driven by host frames through `advance`/`tick` and by the player's draw
//! signal. Transitions only move forward:
//! Idle -> Countdown -> DrawWindow -> Resolved -> (reset) -> Countdown.

use super::opponent::OpponentTimingModel;
use super::state::{Phase, Round, RoundEvent, Winner};
use crate::error::QuickDrawError;
use crate::score::ScoreLedger;
use crate::settings::{Difficulty, Settings};

/// Input gathered for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Player pressed draw this frame
    pub draw: bool,
}

#[derive(Debug)]
pub struct RoundStateMachine {
    settings: Settings,
    opponent: OpponentTimingModel,
    round: Round,
    ledger: ScoreLedger,
    events: Vec<RoundEvent>,
}

impl RoundStateMachine {
    /// Build a machine with an idle first round. Fails on invalid settings.
    pub fn new(settings: Settings, opponent: OpponentTimingModel) -> Result<Self, QuickDrawError> {
        settings.validate()?;
        let round = Round::new(1, settings.countdown_duration, settings.draw_duration);
        Ok(Self {
            settings,
            opponent,
            round,
            ledger: ScoreLedger::new(),
            events: Vec::new(),
        })
    }

    /// Deterministic opponent seeded with `seed`
    pub fn seeded(settings: Settings, seed: u64) -> Result<Self, QuickDrawError> {
        let opponent = OpponentTimingModel::new(settings.thresholds, seed);
        Self::new(settings, opponent)
    }

    /// Opponent seeded from the OS random source
    pub fn from_entropy(settings: Settings) -> Result<Self, QuickDrawError> {
        let opponent = OpponentTimingModel::from_entropy(settings.thresholds)?;
        Self::new(settings, opponent)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn round(&self) -> &Round {
        &self.round
    }

    pub fn phase(&self) -> Phase {
        self.round.phase()
    }

    pub fn ledger(&self) -> &ScoreLedger {
        &self.ledger
    }

    pub fn difficulty(&self) -> Difficulty {
        self.settings.difficulty
    }

    pub fn opponent(&self) -> &OpponentTimingModel {
        &self.opponent
    }

    pub fn opponent_mut(&mut self) -> &mut OpponentTimingModel {
        &mut self.opponent
    }

    /// Indicator value for the current phase (1.0 while idle or resolved)
    pub fn progress_fraction(&self) -> f32 {
        match self.round.phase() {
            Phase::Countdown | Phase::DrawWindow => self.round.clock().progress_fraction(),
            Phase::Idle | Phase::Resolved => 1.0,
        }
    }

    /// Events since the last drain, oldest first.
    ///
    /// Hosts are expected to drain once per frame. Consecutive progress
    /// updates are coalesced into the newest one, but phase, result and score
    /// events accumulate until drained.
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, RoundEvent> {
        self.events.drain(..)
    }

    /// Change the opponent tier. The current round keeps its threshold.
    pub fn set_difficulty(&mut self, tier: Difficulty) {
        if self.settings.difficulty != tier {
            log::info!("Difficulty {} -> {}", self.settings.difficulty, tier);
            self.settings.difficulty = tier;
        }
    }

    /// Begin the countdown. A resolved round is discarded first. Returns false
    /// if a round is already running.
    pub fn start_round(&mut self) -> bool {
        match self.round.phase() {
            Phase::Idle => {}
            Phase::Resolved => self.reset_round(),
            phase => {
                log::debug!("start_round ignored: round {} in {:?}", self.round.number(), phase);
                return false;
            }
        }

        let threshold = self.opponent.sample_threshold(self.settings.difficulty);
        self.round.begin(threshold);
        log::debug!(
            "Round {} countdown ({} opponent, threshold {:.3}s)",
            self.round.number(),
            self.settings.difficulty,
            threshold
        );
        self.events.push(RoundEvent::PhaseChanged(Phase::Countdown));
        self.push_progress(self.round.clock().progress_fraction());
        true
    }

    /// Replace the current round with a fresh idle one
    pub fn reset_round(&mut self) {
        if self.round.phase() == Phase::Idle {
            return;
        }
        self.round = Round::new(
            self.round.number() + 1,
            self.settings.countdown_duration,
            self.settings.draw_duration,
        );
        self.events.push(RoundEvent::PhaseChanged(Phase::Idle));
    }

    /// Zero the scoreboard (match reset)
    pub fn reset_scores(&mut self) {
        self.ledger.reset();
        self.push_score();
    }

    /// Player draw signal. Ignored outside the draw window or once the round
    /// is decided. Returns true if it won the round.
    pub fn player_draw(&mut self) -> bool {
        if !self.round.phase().accepts_draw() {
            log::debug!(
                "Draw ignored: round {} in {:?}",
                self.round.number(),
                self.round.phase()
            );
            return false;
        }
        self.resolve(Winner::Player)
    }

    /// Advance by `dt` seconds with no player input
    pub fn advance(&mut self, dt: f32) {
        self.tick(&TickInput::default(), dt);
    }

    /// Advance by `dt` seconds, then apply this frame's input. A draw in the
    /// same frame the opponent's threshold is crossed goes to the player.
    pub fn tick(&mut self, input: &TickInput, dt: f32) {
        if !dt.is_finite() || dt < 0.0 {
            log::warn!("Ignoring invalid tick delta {dt}");
            return;
        }

        match self.round.phase() {
            Phase::Idle => {
                if input.draw {
                    self.player_draw();
                }
            }
            Phase::Countdown => {
                if input.draw {
                    // Too early; the window is not open yet
                    self.player_draw();
                }
                let clock = self.round.clock_mut();
                clock.advance(dt);
                let progress = clock.progress_fraction();
                let complete = clock.is_complete();
                self.push_progress(progress);
                if complete {
                    self.round.open_draw_window();
                    log::debug!("Round {} draw window open", self.round.number());
                    self.events.push(RoundEvent::PhaseChanged(Phase::DrawWindow));
                    // A zero threshold is already reached at window open
                    self.check_opponent();
                }
            }
            Phase::DrawWindow => {
                let clock = self.round.clock_mut();
                clock.advance(dt);
                let progress = clock.progress_fraction();
                self.push_progress(progress);

                if input.draw && self.player_draw() {
                    return;
                }
                if self.check_opponent() {
                    return;
                }
                if self.round.clock().is_complete() {
                    self.resolve(Winner::Nobody);
                }
            }
            Phase::Resolved => {
                if input.draw {
                    self.player_draw();
                }
                // Window keeps running so the host can show the result
                let clock = self.round.clock_mut();
                let was_complete = clock.is_complete();
                clock.advance(dt);
                if self.settings.auto_restart && (was_complete || clock.is_complete()) {
                    self.start_round();
                }
            }
        }
    }

    /// Opponent draws once its threshold has been reached
    fn check_opponent(&mut self) -> bool {
        if let Some(threshold) = self.round.opponent_threshold()
            && self.round.opponent_pending()
            && self.round.clock().draw_reached(threshold)
        {
            return self.resolve(Winner::Opponent);
        }
        false
    }

    fn resolve(&mut self, winner: Winner) -> bool {
        if !self.round.resolve(winner) {
            return false;
        }
        let Some(outcome) = self.round.outcome() else {
            return false;
        };

        match outcome.player_time {
            Some(t) => log::info!("Round {}: player draw time {:.3}s", outcome.round, t),
            None => log::info!("Round {}: player draw time: no draw", outcome.round),
        }
        if let Some(t) = outcome.opponent_time {
            log::info!("Round {}: opponent draw time {:.3}s", outcome.round, t);
        }
        log::info!("Round {} winner: {:?}", outcome.round, outcome.winner);

        self.events.push(RoundEvent::PhaseChanged(Phase::Resolved));
        self.events.push(RoundEvent::RoundResolved(outcome));
        if let Some(side) = winner.side() {
            self.ledger.record_win(side);
            self.push_score();
        }
        true
    }

    fn push_progress(&mut self, fraction: f32) {
        if let Some(RoundEvent::ProgressUpdated(last)) = self.events.last_mut() {
            *last = fraction;
        } else {
            self.events.push(RoundEvent::ProgressUpdated(fraction));
        }
    }

    fn push_score(&mut self) {
        self.events.push(RoundEvent::ScoreChanged {
            player_wins: self.ledger.player_wins(),
            opponent_wins: self.ledger.opponent_wins(),
        });
    }
}
