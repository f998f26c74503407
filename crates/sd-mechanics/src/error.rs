//! Error types for the combat engine.

use sd_core::CoreError;

/// Errors that can occur during combat resolution.
#[derive(Debug, thiserror::Error)]
pub enum MechError {
    /// The round state is malformed (round outside 1..=2 or a disordered log).
    #[error("invalid combat state: {0}")]
    InvalidCombatState(String),

    /// A clamped roll had no row in the outcome table.
    #[error("no outcome table row for roll {roll}")]
    InvalidTableLookup {
        /// The roll that failed to resolve.
        roll: u32,
    },

    /// Another round is still being processed for this encounter.
    #[error("a round is already in progress")]
    RoundInProgress,

    /// A dice expression could not be parsed.
    #[error("invalid dice expression: {0}")]
    InvalidDiceExpression(String),

    /// A character record could not be updated.
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Convenience result type for mechanics operations.
pub type MechResult<T> = Result<T, MechError>;
