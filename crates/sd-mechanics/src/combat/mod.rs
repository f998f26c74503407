//! Combat round state machine and encounter orchestration.
//!
//! [`state`] holds the pure reducer over [`CombatRoundState`]. [`encounter`]
//! sequences attacks, applies damage to character records, and pushes every
//! change out through a [`CombatSink`].

pub mod encounter;
pub mod sink;
pub mod state;

pub use encounter::{AttackRecord, Encounter, RoundReport, RoundResult};
pub use sink::{CombatSink, GameUpdate, RecordingSink};
pub use state::{
    CombatMessage, CombatRoundState, FIRST_ROUND, LAST_ROUND, LogEntry, LogKind, is_valid_state,
    reduce, validate,
};

use serde::{Deserialize, Serialize};

/// One of the two fighters in an encounter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    /// The player's character.
    Player,
    /// The opposing character.
    Opponent,
}

impl Side {
    /// The side facing this one.
    pub fn other(self) -> Self {
        match self {
            Self::Player => Self::Opponent,
            Self::Opponent => Self::Player,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Player => write!(f, "player"),
            Self::Opponent => write!(f, "opponent"),
        }
    }
}
