//! Pluggable randomness.
//!
//! Every die roll and every coin-flip decision in the engine goes through a
//! [`RandomSource`], so tests and replays can script exact outcomes.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A source of die rolls and weighted yes/no decisions.
pub trait RandomSource {
    /// Roll one die with `sides` faces, returning 1..=sides.
    fn roll_die(&mut self, sides: u32) -> u32;

    /// Returns true with the given probability (0.0-1.0).
    fn chance(&mut self, probability: f64) -> bool;
}

/// A seeded `StdRng`.
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    /// Create a source seeded for reproducible rolls.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// A fresh seed from the thread RNG, for callers that want to report it.
    pub fn random_seed() -> u64 {
        rand::random()
    }
}

impl RandomSource for SeededRandom {
    fn roll_die(&mut self, sides: u32) -> u32 {
        self.rng.random_range(1..=sides.max(1))
    }

    fn chance(&mut self, probability: f64) -> bool {
        if probability.is_nan() {
            return false;
        }
        self.rng.random_bool(probability.clamp(0.0, 1.0))
    }
}

/// Replays queued rolls and decisions in order.
///
/// Scripted rolls are clamped to the die's faces. Once a queue is empty,
/// rolls come back as 1 and decisions as `true`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandom {
    rolls: VecDeque<u32>,
    choices: VecDeque<bool>,
}

impl ScriptedRandom {
    /// An empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue die results.
    pub fn with_rolls(mut self, rolls: impl IntoIterator<Item = u32>) -> Self {
        self.rolls.extend(rolls);
        self
    }

    /// Queue yes/no decisions.
    pub fn with_choices(mut self, choices: impl IntoIterator<Item = bool>) -> Self {
        self.choices.extend(choices);
        self
    }

    /// Rolls not yet consumed.
    pub fn remaining_rolls(&self) -> usize {
        self.rolls.len()
    }
}

impl RandomSource for ScriptedRandom {
    fn roll_die(&mut self, sides: u32) -> u32 {
        self.rolls
            .pop_front()
            .map_or(1, |v| v.clamp(1, sides.max(1)))
    }

    fn chance(&mut self, _probability: f64) -> bool {
        self.choices.pop_front().unwrap_or(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_deterministic() {
        let mut a = SeededRandom::new(99);
        let mut b = SeededRandom::new(99);
        for _ in 0..20 {
            assert_eq!(a.roll_die(20), b.roll_die(20));
        }
    }

    #[test]
    fn seeded_chance_extremes() {
        let mut src = SeededRandom::new(1);
        for _ in 0..50 {
            assert!(src.chance(1.0));
            assert!(!src.chance(0.0));
        }
        assert!(!src.chance(f64::NAN));
    }

    #[test]
    fn seeded_chance_roughly_matches_probability() {
        let mut src = SeededRandom::new(7);
        let hits = (0..10_000).filter(|_| src.chance(0.6)).count();
        assert!((5_500..6_500).contains(&hits), "hits = {hits}");
    }

    #[test]
    fn scripted_replays_in_order() {
        let mut src = ScriptedRandom::new()
            .with_rolls([4, 2, 6])
            .with_choices([false, true]);
        assert_eq!(src.roll_die(6), 4);
        assert_eq!(src.roll_die(6), 2);
        assert!(!src.chance(0.6));
        assert!(src.chance(0.6));
        assert_eq!(src.remaining_rolls(), 1);
        assert_eq!(src.roll_die(6), 6);
    }

    #[test]
    fn scripted_clamps_and_falls_back() {
        let mut src = ScriptedRandom::new().with_rolls([9, 0]);
        assert_eq!(src.roll_die(6), 6);
        assert_eq!(src.roll_die(6), 1);
        assert_eq!(src.roll_die(6), 1);
        assert!(src.chance(0.0));
    }
}
