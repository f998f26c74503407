//! The round state machine.
//!
//! [`reduce`] is a pure `(state, message) -> state` function. Sequencing and
//! side effects live in the encounter; this module only records what changed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use sd_core::{BodyLocation, CharacterId};

use super::Side;
use crate::error::{MechError, MechResult};

/// The round an encounter starts in.
pub const FIRST_ROUND: u8 = 1;
/// The round an encounter settles in. Rounds never advance past it.
pub const LAST_ROUND: u8 = 2;

/// How a log line should be displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogKind {
    /// An attack that did damage.
    Hit,
    /// An attack that did nothing.
    Miss,
    /// Round bookkeeping and the final summary.
    Info,
}

impl std::fmt::Display for LogKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hit => write!(f, "hit"),
            Self::Miss => write!(f, "miss"),
            Self::Info => write!(f, "info"),
        }
    }
}

/// One line of the round log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Display text.
    pub text: String,
    /// Hit, miss, or info.
    #[serde(rename = "type")]
    pub kind: LogKind,
    /// When the entry was written.
    pub timestamp: DateTime<Utc>,
}

impl LogEntry {
    /// Create an entry with an explicit timestamp.
    pub fn at(text: impl Into<String>, kind: LogKind, timestamp: DateTime<Utc>) -> Self {
        Self {
            text: text.into(),
            kind,
            timestamp,
        }
    }

    fn same_event(&self, other: &LogEntry) -> bool {
        self.timestamp == other.timestamp && self.text == other.text
    }
}

/// Round number, carried modifiers, and the log for one encounter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombatRoundState {
    /// Current round (1 or 2).
    pub round: u8,
    /// Modifier on the player's next roll.
    pub player_modifier: i32,
    /// Modifier on the opponent's next roll.
    pub opponent_modifier: i32,
    /// The player's character record.
    pub player_character_id: CharacterId,
    /// The opponent's character record.
    pub opponent_character_id: CharacterId,
    /// Everything that has happened, oldest first.
    pub round_log: Vec<LogEntry>,
}

impl CombatRoundState {
    /// Fresh state for a new encounter.
    pub fn new(player_character_id: CharacterId, opponent_character_id: CharacterId) -> Self {
        Self {
            round: FIRST_ROUND,
            player_modifier: 0,
            opponent_modifier: 0,
            player_character_id,
            opponent_character_id,
            round_log: Vec::new(),
        }
    }

    /// The modifier one side carries into its next roll.
    pub fn modifier(&self, side: Side) -> i32 {
        match side {
            Side::Player => self.player_modifier,
            Side::Opponent => self.opponent_modifier,
        }
    }

    /// Render the log as plain text.
    pub fn export_text(&self) -> String {
        let mut out = String::from("Brawl Log\n=========\n\n");
        for entry in &self.round_log {
            match entry.kind {
                LogKind::Info => out.push_str(&format!("-- {} --\n", entry.text)),
                kind => out.push_str(&format!("[{kind}] {}\n", entry.text)),
            }
        }
        out
    }

    /// Render the log as markdown.
    pub fn export_markdown(&self) -> String {
        let mut out = String::from("# Brawl Log\n\n");
        for entry in &self.round_log {
            match entry.kind {
                LogKind::Hit => out.push_str(&format!("- **{}**\n", entry.text)),
                LogKind::Miss => out.push_str(&format!("- {}\n", entry.text)),
                LogKind::Info => out.push_str(&format!("\n*{}*\n\n", entry.text)),
            }
        }
        out
    }
}

/// A transition request for [`reduce`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CombatMessage {
    /// Damage landed on one side. Strength lives on the character record,
    /// so the round state does not change.
    ApplyDamage {
        /// The side that was hit.
        target: Side,
        /// How much damage.
        damage: u32,
        /// Where it landed.
        location: BodyLocation,
    },
    /// Append a log line unless an identical (timestamp, text) pair exists.
    AddLogEntry {
        /// The line to append.
        entry: LogEntry,
    },
    /// Replace the carried modifier of the sides given.
    UpdateModifiers {
        /// New player modifier, if changing.
        player: Option<i32>,
        /// New opponent modifier, if changing.
        opponent: Option<i32>,
    },
    /// Advance round 1 to round 2. No-op in round 2.
    EndRound,
    /// Record the final summary.
    EndCombat {
        /// The side that won.
        winner: Side,
        /// Narrative summary.
        summary: String,
        /// When the encounter ended.
        at: DateTime<Utc>,
    },
}

/// Apply one message to the state.
pub fn reduce(mut state: CombatRoundState, message: &CombatMessage) -> CombatRoundState {
    match message {
        CombatMessage::ApplyDamage { .. } => {}
        CombatMessage::AddLogEntry { entry } => {
            if !state.round_log.iter().any(|e| e.same_event(entry)) {
                state.round_log.push(entry.clone());
            }
        }
        CombatMessage::UpdateModifiers { player, opponent } => {
            if let Some(m) = player {
                state.player_modifier = *m;
            }
            if let Some(m) = opponent {
                state.opponent_modifier = *m;
            }
        }
        CombatMessage::EndRound => {
            if state.round < LAST_ROUND {
                state.round += 1;
            }
        }
        CombatMessage::EndCombat { summary, at, .. } => {
            state
                .round_log
                .push(LogEntry::at(summary.clone(), LogKind::Info, *at));
        }
    }
    state
}

/// Check that the round is 1 or 2 and the log is ordered and free of duplicates.
pub fn validate(state: &CombatRoundState) -> MechResult<()> {
    if !(FIRST_ROUND..=LAST_ROUND).contains(&state.round) {
        return Err(MechError::InvalidCombatState(format!(
            "round {} outside {FIRST_ROUND}..={LAST_ROUND}",
            state.round
        )));
    }
    for (i, pair) in state.round_log.windows(2).enumerate() {
        if pair[1].timestamp < pair[0].timestamp {
            return Err(MechError::InvalidCombatState(format!(
                "log entry {} is older than the entry before it",
                i + 1
            )));
        }
    }
    for (i, entry) in state.round_log.iter().enumerate() {
        if state.round_log[..i].iter().any(|e| e.same_event(entry)) {
            return Err(MechError::InvalidCombatState(format!(
                "log entry {i} duplicates an earlier entry"
            )));
        }
    }
    Ok(())
}

/// Returns true if [`validate`] accepts the state.
pub fn is_valid_state(state: &CombatRoundState) -> bool {
    validate(state).is_ok()
}
