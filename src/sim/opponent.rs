//! Simulated opponent reaction times
//!
//! Each round the opponent gets one threshold: the number of seconds after
//! the draw window opens at which it draws. Thresholds are uniform over
//! `[0, max_range(tier)]`.

use std::collections::VecDeque;

use rand::rngs::OsRng;
use rand::{Rng, SeedableRng, TryRngCore};
use rand_pcg::Pcg32;

use crate::error::QuickDrawError;
use crate::settings::{Difficulty, ThresholdTable};

#[derive(Debug, Clone)]
pub struct OpponentTimingModel {
    table: ThresholdTable,
    seed: u64,
    rng: Pcg32,
    /// Thresholds handed out before falling back to random sampling
    scripted: VecDeque<f32>,
}

impl OpponentTimingModel {
    /// Deterministic model; the same seed yields the same threshold sequence
    pub fn new(table: ThresholdTable, seed: u64) -> Self {
        Self {
            table,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            scripted: VecDeque::new(),
        }
    }

    /// Seed from the operating system's random source
    pub fn from_entropy(table: ThresholdTable) -> Result<Self, QuickDrawError> {
        let seed = OsRng
            .try_next_u64()
            .map_err(|e| QuickDrawError::Entropy(e.to_string()))?;
        log::debug!("Opponent timing seeded with {seed:#018x}");
        Ok(Self::new(table, seed))
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn table(&self) -> &ThresholdTable {
        &self.table
    }

    pub fn max_range(&self, tier: Difficulty) -> f32 {
        self.table.max_range(tier)
    }

    /// Queue a fixed threshold for an upcoming round. Queued values are used
    /// in order, ignoring the tier, before random sampling resumes.
    pub fn push_scripted(&mut self, threshold: f32) {
        self.scripted.push_back(threshold);
    }

    /// Threshold for the next round at `tier`
    pub fn sample_threshold(&mut self, tier: Difficulty) -> f32 {
        if let Some(threshold) = self.scripted.pop_front() {
            return threshold;
        }
        let max = self.max_range(tier);
        if max <= 0.0 {
            return 0.0;
        }
        self.rng.random_range(0.0..=max)
    }
}
