//! Unarmed attack resolution.
//!
//! An attack rolls a d6, adds the attacker's carried modifier, clamps the
//! result to 2-6, and reads the outcome off the punching or grappling table.

pub mod tables;

pub use tables::{BrawlingTable, GRAPPLING, MAX_ROLL, MIN_ROLL, OutcomeRow, PUNCHING};

use serde::{Deserialize, Serialize};

use sd_core::BodyLocation;

use crate::dice::{Die, RandomSource};

/// The two kinds of unarmed attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttackKind {
    /// A punch.
    Punch,
    /// A grapple.
    Grapple,
}

impl AttackKind {
    /// The outcome table for this attack.
    pub fn table(self) -> &'static BrawlingTable {
        match self {
            Self::Punch => &PUNCHING,
            Self::Grapple => &GRAPPLING,
        }
    }

    /// Third-person verb used in log messages.
    pub fn verb(self) -> &'static str {
        match self {
            Self::Punch => "punches",
            Self::Grapple => "grapples",
        }
    }
}

impl std::fmt::Display for AttackKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Punch => write!(f, "punch"),
            Self::Grapple => write!(f, "grapple"),
        }
    }
}

/// The resolved result of one attack. Consumed immediately, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrawlingOutcome {
    /// Clamped roll (2-6).
    pub roll: u32,
    /// Short name for the result.
    pub descriptor: &'static str,
    /// Strength the defender loses.
    pub damage: u32,
    /// Where the blow lands.
    pub location: BodyLocation,
    /// Shift applied to the attacker's next roll.
    pub next_round_modifier: i32,
}

impl BrawlingOutcome {
    /// Returns true if the attack did any damage.
    pub fn is_hit(&self) -> bool {
        self.damage > 0
    }
}

/// Apply the modifier to the base roll, then clamp to the table range.
pub fn clamp_roll(base: u32, modifier: i32) -> u32 {
    let raw = i64::from(base) + i64::from(modifier);
    // Bounded by MIN_ROLL..=MAX_ROLL after the clamp.
    raw.clamp(i64::from(MIN_ROLL), i64::from(MAX_ROLL)) as u32
}

/// Resolve one attack.
///
/// `forced_roll` replaces the d6 (for scripted scenes); the modifier is
/// still applied to it before clamping.
pub fn resolve_round(
    modifier: i32,
    kind: AttackKind,
    forced_roll: Option<u32>,
    source: &mut impl RandomSource,
) -> BrawlingOutcome {
    let base = forced_roll.unwrap_or_else(|| source.roll_die(Die::D6.sides()));
    let roll = clamp_roll(base, modifier);
    let row = kind.table().row_or_miss(roll);
    BrawlingOutcome {
        roll,
        descriptor: row.descriptor,
        damage: row.damage,
        location: row.location,
        next_round_modifier: row.next_round_modifier,
    }
}

/// Render an attack as a log line.
pub fn format_message(attacker: &str, outcome: &BrawlingOutcome, kind: AttackKind) -> String {
    format!(
        "{attacker} {} with {} (Roll: {}) dealing {} damage to {}",
        kind.verb(),
        outcome.descriptor,
        outcome.roll,
        outcome.damage,
        outcome.location,
    )
}
