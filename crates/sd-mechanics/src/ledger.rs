//! Strength and wound bookkeeping.
//!
//! Two floors apply to strength and they are not interchangeable:
//! damage can drive strength down to [`KNOCKOUT_FLOOR`], while the
//! read-only [`reduced_strength`] query never reports less than
//! [`MIN_FUNCTIONAL_STRENGTH`].

use chrono::{DateTime, Utc};

use sd_core::{BodyLocation, Character, CharacterUpdate, StrengthHistory, Wound, WoundSeverity};

/// Strength after damage never drops below this. Reaching it is a knockout.
pub const KNOCKOUT_FLOOR: u32 = 0;

/// Lowest strength [`reduced_strength`] reports for a conscious character.
pub const MIN_FUNCTIONAL_STRENGTH: u32 = 1;

/// Severity of every brawling wound.
pub const BRAWLING_SEVERITY: WoundSeverity = WoundSeverity::Light;

/// The result of applying one attack's damage to a character.
#[derive(Debug, Clone, PartialEq)]
pub struct DamageApplication {
    /// Strength after the damage, floored at [`KNOCKOUT_FLOOR`].
    pub new_strength: u32,
    /// History with the damage entry appended.
    pub updated_history: StrengthHistory,
    /// The wound the attack left.
    pub wound: Wound,
}

impl DamageApplication {
    /// Build the update message that persists this damage onto `target`.
    pub fn to_update(&self, target: &Character) -> CharacterUpdate {
        let mut wounds = target.wounds.clone();
        wounds.push(self.wound.clone());
        CharacterUpdate {
            character_id: target.id,
            damage: self.wound.damage,
            location: self.wound.location,
            strength: self.new_strength,
            wounds,
            strength_history: self.updated_history.clone(),
            is_unconscious: self.new_strength == KNOCKOUT_FLOOR,
        }
    }
}

/// Compute what `damage` at `location` does to `target`. Pure: the target is untouched.
pub fn apply_damage(
    target: &Character,
    damage: u32,
    location: BodyLocation,
    now: DateTime<Utc>,
) -> DamageApplication {
    let previous = target.attributes.strength;
    // Saturation is the knockout floor.
    let new_strength = previous.saturating_sub(damage);
    DamageApplication {
        new_strength,
        updated_history: target
            .strength_history
            .with_damage(previous, new_strength, now),
        wound: Wound::new(location, BRAWLING_SEVERITY, damage, now),
    }
}

/// Strength implied by base strength minus all wound reductions.
pub fn reduced_strength(character: &Character) -> u32 {
    character
        .attributes
        .base_strength
        .saturating_sub(character.total_wound_reduction())
        .max(MIN_FUNCTIONAL_STRENGTH)
}
