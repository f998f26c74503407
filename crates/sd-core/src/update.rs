use serde::{Deserialize, Serialize};

use crate::character::{Character, CharacterId};
use crate::error::{CoreError, CoreResult};
use crate::strength::StrengthHistory;
use crate::wound::{BodyLocation, Wound};

/// A mutation of one character record, emitted by the combat engine.
///
/// The update carries the full patch rather than a delta so applying it
/// twice leaves the record unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterUpdate {
    /// The record this update belongs to.
    pub character_id: CharacterId,
    /// Damage that caused the update.
    pub damage: u32,
    /// Where the damage landed.
    pub location: BodyLocation,
    /// Strength after the damage.
    pub strength: u32,
    /// Complete wound list, including the new wound.
    pub wounds: Vec<Wound>,
    /// Complete strength history, including the new entry.
    pub strength_history: StrengthHistory,
    /// Whether the character is now out.
    pub is_unconscious: bool,
}

impl Character {
    /// Write an engine update back onto this record.
    pub fn apply_update(&mut self, update: &CharacterUpdate) -> CoreResult<()> {
        if update.character_id != self.id {
            return Err(CoreError::CharacterMismatch {
                expected: update.character_id,
                found: self.id,
            });
        }
        self.attributes.strength = update.strength;
        self.wounds = update.wounds.clone();
        self.strength_history = update.strength_history.clone();
        self.is_unconscious = update.is_unconscious;
        Ok(())
    }
}
