pub mod brawl;
pub mod roll;
pub mod table;

use std::path::Path;

use sd_core::{Attributes, Character};

/// Load a character record from a JSON file and check it can fight.
fn load_character(path: &Path) -> Result<Character, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
    let character: Character = serde_json::from_str(&content)
        .map_err(|e| format!("invalid character in {}: {e}", path.display()))?;
    character
        .validate()
        .map_err(|e| format!("{}: {e}", path.display()))?;
    if character.is_unconscious {
        return Err(format!("{} is unconscious and cannot fight", character.name));
    }
    if character.current_strength() == 0 {
        return Err(format!("{} has no strength left and cannot fight", character.name));
    }
    Ok(character)
}

/// The player's fighter when no file is given.
fn default_player() -> Character {
    Character::new(
        "Wyatt",
        Attributes {
            speed: 6,
            gun_accuracy: 8,
            throwing_accuracy: 4,
            bravery: 9,
            experience: 5,
            ..Attributes::with_strength(10)
        },
    )
}

/// The opponent's fighter when no file is given.
fn default_opponent() -> Character {
    Character::new(
        "Ike Clanton",
        Attributes {
            speed: 5,
            gun_accuracy: 5,
            throwing_accuracy: 3,
            bravery: 4,
            experience: 3,
            ..Attributes::with_strength(9)
        },
    )
}
