use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Where on the body an attack landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BodyLocation {
    /// Head and face.
    Head,
    /// Chest and ribs.
    Chest,
    /// Belly and gut.
    Abdomen,
    /// Left arm.
    LeftArm,
    /// Right arm.
    RightArm,
    /// Left leg.
    LeftLeg,
    /// Right leg.
    RightLeg,
}

impl fmt::Display for BodyLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Head => write!(f, "head"),
            Self::Chest => write!(f, "chest"),
            Self::Abdomen => write!(f, "abdomen"),
            Self::LeftArm => write!(f, "left arm"),
            Self::RightArm => write!(f, "right arm"),
            Self::LeftLeg => write!(f, "left leg"),
            Self::RightLeg => write!(f, "right leg"),
        }
    }
}

/// How bad a wound is.
///
/// Brawling only ever inflicts `Light` wounds; the heavier tags come from
/// firearms and thrown weapons elsewhere in the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WoundSeverity {
    /// Bruises, cuts, a split lip.
    Light,
    /// Bleeding, impaired.
    Serious,
    /// Life-threatening.
    Mortal,
}

impl fmt::Display for WoundSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Light => write!(f, "light"),
            Self::Serious => write!(f, "serious"),
            Self::Mortal => write!(f, "mortal"),
        }
    }
}

/// A wound on a character. Appended, never removed, during an encounter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wound {
    /// Where the wound is.
    pub location: BodyLocation,
    /// How bad it is.
    pub severity: WoundSeverity,
    /// Raw damage of the blow that caused it.
    pub damage: u32,
    /// How much strength the wound takes away.
    pub strength_reduction: u32,
    /// When the wound was received.
    pub turn_received: DateTime<Utc>,
}

impl Wound {
    /// Create a wound whose strength reduction equals its damage.
    pub fn new(
        location: BodyLocation,
        severity: WoundSeverity,
        damage: u32,
        turn_received: DateTime<Utc>,
    ) -> Self {
        Self {
            location,
            severity,
            damage,
            strength_reduction: damage,
            turn_received,
        }
    }
}
