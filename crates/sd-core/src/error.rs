use crate::character::CharacterId;

/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur when reading or updating character records.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// An update keyed to one character was applied to another record.
    #[error("update for character {expected} applied to character {found}")]
    CharacterMismatch {
        /// The character the update was emitted for.
        expected: CharacterId,
        /// The record it was applied to.
        found: CharacterId,
    },

    /// An attribute value is outside its allowed range.
    #[error("invalid attribute: {0}")]
    InvalidAttribute(String),

    /// A strength history breaks its baseline or chaining rules.
    #[error("invalid strength history: {0}")]
    InvalidHistory(String),
}
