//! Core types for Sundown: the character records the combat engine reads.
//!
//! The surrounding game owns these records. The engine never mutates them
//! directly; it emits [`CharacterUpdate`] messages which are written back
//! with [`Character::apply_update`].

/// Character records, identifiers, and attributes.
pub mod character;
/// Error types used throughout the crate.
pub mod error;
/// Append-only strength change history.
pub mod strength;
/// Update messages emitted by the engine and the adapter that applies them.
pub mod update;
/// Wounds, body locations, and severities.
pub mod wound;

/// Re-export character types.
pub use character::{Attributes, Character, CharacterId};
/// Re-export error types.
pub use error::{CoreError, CoreResult};
/// Re-export strength history types.
pub use strength::{ChangeReason, StrengthChange, StrengthHistory};
/// Re-export the update message.
pub use update::CharacterUpdate;
/// Re-export wound types.
pub use wound::{BodyLocation, Wound, WoundSeverity};
