//! Knockout detection and victory summaries.

use serde::{Deserialize, Serialize};

use sd_core::{BodyLocation, Character, CharacterId};

use crate::brawling::AttackKind;
use crate::combat::Side;
use crate::ledger::KNOCKOUT_FLOOR;

/// Returns true if strength after an attack sits exactly at the knockout floor.
///
/// Call this right after each attack. Damage only ever lands on one side per
/// attack, so two knockouts cannot happen at once.
pub fn is_knockout(new_strength: u32) -> bool {
    new_strength == KNOCKOUT_FLOOR
}

/// Who won an encounter and how.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatEnd {
    /// The side that landed the knockout.
    pub winner: Side,
    /// The side that went down.
    pub loser: Side,
    /// Winner's record id.
    pub winner_id: CharacterId,
    /// Loser's record id.
    pub loser_id: CharacterId,
    /// One-sentence narrative summary.
    pub summary: String,
}

/// Declare the attacker the winner of the encounter.
pub fn declare_knockout(
    attacker_side: Side,
    attacker: &Character,
    defender: &Character,
    kind: AttackKind,
    location: BodyLocation,
) -> CombatEnd {
    CombatEnd {
        winner: attacker_side,
        loser: attacker_side.other(),
        winner_id: attacker.id,
        loser_id: defender.id,
        summary: format!(
            "{} knocks {} out cold with a {kind} to the {location}!",
            attacker.name, defender.name
        ),
    }
}
