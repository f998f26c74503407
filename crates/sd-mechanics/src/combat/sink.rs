//! Where an encounter publishes its changes.

use serde::{Deserialize, Serialize};

use sd_core::CharacterUpdate;

use super::CombatRoundState;
use crate::knockout::CombatEnd;

/// A change pushed to observers after it has been applied locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "payload", rename_all = "snake_case")]
pub enum GameUpdate {
    /// A character record took damage.
    Character(CharacterUpdate),
    /// A full snapshot of the round state after a transition.
    CombatState(CombatRoundState),
}

/// Receives updates from an encounter.
pub trait CombatSink {
    /// Called after every state transition and character update.
    fn emit(&mut self, update: GameUpdate);

    /// Called once, when a knockout ends the encounter.
    fn combat_ended(&mut self, end: &CombatEnd);
}

/// A sink that keeps everything it is sent.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    /// Every update, in emission order.
    pub updates: Vec<GameUpdate>,
    /// Every end notification received.
    pub ended: Vec<CombatEnd>,
}

impl RecordingSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Character updates only.
    pub fn character_updates(&self) -> impl Iterator<Item = &CharacterUpdate> {
        self.updates.iter().filter_map(|u| match u {
            GameUpdate::Character(c) => Some(c),
            GameUpdate::CombatState(_) => None,
        })
    }

    /// The most recent state snapshot.
    pub fn latest_state(&self) -> Option<&CombatRoundState> {
        self.updates.iter().rev().find_map(|u| match u {
            GameUpdate::CombatState(s) => Some(s),
            GameUpdate::Character(_) => None,
        })
    }
}

impl CombatSink for RecordingSink {
    fn emit(&mut self, update: GameUpdate) {
        self.updates.push(update);
    }

    fn combat_ended(&mut self, end: &CombatEnd) {
        self.ended.push(end.clone());
    }
}

