use std::fmt;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::strength::StrengthHistory;
use crate::wound::Wound;

/// Unique identifier for a character record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CharacterId(pub Uuid);

impl CharacterId {
    /// Generate a new random character ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CharacterId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// A character's numeric attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Attributes {
    /// Current strength. Reaching 0 means the character is out.
    pub strength: u32,
    /// Unwounded strength.
    pub base_strength: u32,
    /// How quickly the character acts.
    pub speed: u32,
    /// Skill with firearms.
    pub gun_accuracy: u32,
    /// Skill with thrown weapons.
    pub throwing_accuracy: u32,
    /// Nerve under fire.
    pub bravery: u32,
    /// Gunfights and brawls survived.
    pub experience: u32,
}

impl Attributes {
    /// Attributes for an unhurt character with the given strength.
    pub fn with_strength(strength: u32) -> Self {
        Self {
            strength,
            base_strength: strength,
            ..Self::default()
        }
    }

    /// Check that the attributes describe a playable character.
    pub fn validate(&self) -> CoreResult<()> {
        if self.base_strength == 0 {
            return Err(CoreError::InvalidAttribute(
                "base strength must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// A character record as owned by the surrounding game.
///
/// Records deserialized without a strength history get a baseline seeded
/// from their attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "CharacterRecord")]
pub struct Character {
    /// Unique identifier.
    pub id: CharacterId,
    /// Display name.
    pub name: String,
    /// Numeric attributes.
    pub attributes: Attributes,
    /// Wounds received, oldest first.
    pub wounds: Vec<Wound>,
    /// Strength change log.
    pub strength_history: StrengthHistory,
    /// Whether the character has been knocked out.
    pub is_unconscious: bool,
}

/// The on-disk shape of a character, with everything but name and attributes optional.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CharacterRecord {
    #[serde(default)]
    id: CharacterId,
    name: String,
    attributes: Attributes,
    #[serde(default)]
    wounds: Vec<Wound>,
    #[serde(default)]
    strength_history: Option<StrengthHistory>,
    #[serde(default)]
    is_unconscious: bool,
}

impl From<CharacterRecord> for Character {
    fn from(record: CharacterRecord) -> Self {
        let strength_history = match record.strength_history {
            Some(history) if !history.changes.is_empty() => history,
            _ => StrengthHistory::new(
                record.attributes.base_strength,
                record.attributes.strength,
                Utc::now(),
            ),
        };
        Self {
            id: record.id,
            name: record.name,
            attributes: record.attributes,
            wounds: record.wounds,
            strength_history,
            is_unconscious: record.is_unconscious,
        }
    }
}

impl Character {
    /// Create a new character with a random ID and a seeded strength history.
    pub fn new(name: impl Into<String>, attributes: Attributes) -> Self {
        Self::with_id(CharacterId::new(), name, attributes)
    }

    /// Create a character with a pre-assigned ID.
    pub fn with_id(id: CharacterId, name: impl Into<String>, attributes: Attributes) -> Self {
        let strength_history =
            StrengthHistory::new(attributes.base_strength, attributes.strength, Utc::now());
        Self {
            id,
            name: name.into(),
            attributes,
            wounds: Vec::new(),
            strength_history,
            is_unconscious: false,
        }
    }

    /// Current strength.
    pub fn current_strength(&self) -> u32 {
        self.attributes.strength
    }

    /// Check that the record can enter a fight: valid attributes and a
    /// strength history that starts at the base strength and ends at the
    /// current strength.
    pub fn validate(&self) -> CoreResult<()> {
        self.attributes.validate()?;
        let history = &self.strength_history;
        if !history.is_consistent() {
            return Err(CoreError::InvalidHistory(
                "changes do not chain from an initial baseline".to_string(),
            ));
        }
        if history.base_strength != self.attributes.base_strength {
            return Err(CoreError::InvalidHistory(format!(
                "base strength {} does not match attribute {}",
                history.base_strength, self.attributes.base_strength
            )));
        }
        if history.latest() != Some(self.attributes.strength) {
            return Err(CoreError::InvalidHistory(format!(
                "history does not end at current strength {}",
                self.attributes.strength
            )));
        }
        Ok(())
    }

    /// Sum of strength reductions across all wounds.
    pub fn total_wound_reduction(&self) -> u32 {
        self.wounds.iter().map(|w| w.strength_reduction).sum()
    }
}
