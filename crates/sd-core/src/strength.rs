use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Why a character's strength changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeReason {
    /// The baseline recorded when the character was created.
    Initial,
    /// Strength lost to an attack.
    Damage,
}

/// One entry in a strength history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrengthChange {
    /// Strength before the change.
    pub previous_value: u32,
    /// Strength after the change.
    pub new_value: u32,
    /// What caused the change.
    pub reason: ChangeReason,
    /// When it happened.
    pub timestamp: DateTime<Utc>,
}

/// Append-only record of how a character's strength has moved.
///
/// `changes[0]` is always the initial baseline. Every later entry's
/// `previous_value` equals the `new_value` of the entry before it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrengthHistory {
    /// Unwounded strength.
    pub base_strength: u32,
    /// Ordered changes, oldest first.
    #[serde(default)]
    pub changes: Vec<StrengthChange>,
}

impl StrengthHistory {
    /// Start a history at `base_strength` with the character currently at `strength`.
    pub fn new(base_strength: u32, strength: u32, at: DateTime<Utc>) -> Self {
        Self {
            base_strength,
            changes: vec![StrengthChange {
                previous_value: base_strength,
                new_value: strength,
                reason: ChangeReason::Initial,
                timestamp: at,
            }],
        }
    }

    /// Returns a copy with one damage entry appended.
    ///
    /// A history without a baseline is seeded with one first, so the
    /// result always satisfies the baseline invariant.
    pub fn with_damage(&self, previous: u32, new: u32, at: DateTime<Utc>) -> Self {
        let mut next = if self.changes.is_empty() {
            Self::new(self.base_strength, previous, at)
        } else {
            self.clone()
        };
        next.changes.push(StrengthChange {
            previous_value: previous,
            new_value: new,
            reason: ChangeReason::Damage,
            timestamp: at,
        });
        next
    }

    /// The most recent recorded strength, if any change exists.
    pub fn latest(&self) -> Option<u32> {
        self.changes.last().map(|c| c.new_value)
    }

    /// Number of damage entries.
    pub fn damage_count(&self) -> usize {
        self.changes
            .iter()
            .filter(|c| c.reason == ChangeReason::Damage)
            .count()
    }

    /// Returns true if the history is non-empty, starts with a baseline,
    /// and every entry chains from the one before it.
    pub fn is_consistent(&self) -> bool {
        let Some(first) = self.changes.first() else {
            return false;
        };
        first.reason == ChangeReason::Initial
            && self
                .changes
                .windows(2)
                .all(|w| w[1].previous_value == w[0].new_value && w[1].reason == ChangeReason::Damage)
    }
}
