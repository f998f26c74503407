//! Configuration for a brawl encounter.

use std::time::Duration;

/// Probability that the responding side throws a punch rather than grappling.
pub const DEFAULT_PUNCH_CHANCE: f64 = 0.6;

/// Configuration for an encounter.
#[derive(Debug, Clone)]
pub struct BrawlConfig {
    /// RNG seed for reproducible dice.
    pub seed: u64,
    /// Chance (0.0-1.0) that the responding side punches instead of grappling.
    pub punch_chance: f64,
    /// Pause between the first and second attack of a round. Cosmetic only.
    pub pacing_delay: Duration,
}

impl Default for BrawlConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            punch_chance: DEFAULT_PUNCH_CHANCE,
            pacing_delay: Duration::ZERO,
        }
    }
}

impl BrawlConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the punch chance (clamped to 0.0-1.0; NaN falls back to the default).
    pub fn with_punch_chance(mut self, chance: f64) -> Self {
        self.punch_chance = if chance.is_nan() {
            DEFAULT_PUNCH_CHANCE
        } else {
            chance.clamp(0.0, 1.0)
        };
        self
    }

    /// Set the pause between the two attacks of a round.
    pub fn with_pacing_delay(mut self, delay: Duration) -> Self {
        self.pacing_delay = delay;
        self
    }
}
