//! Combat engine for Sundown brawls.
//!
//! Resolves punches and grapples against fixed outcome tables, turns damage
//! into strength loss and wounds on character records, detects knockouts,
//! and sequences two-sided exchanges through a small round state machine.

pub mod brawling;
pub mod combat;
pub mod config;
pub mod dice;
pub mod error;
pub mod knockout;
pub mod ledger;

pub use brawling::{AttackKind, BrawlingOutcome, BrawlingTable, GRAPPLING, PUNCHING};
pub use combat::{
    CombatMessage, CombatRoundState, CombatSink, Encounter, GameUpdate, LogEntry, LogKind,
    RecordingSink, RoundReport, RoundResult, Side,
};
pub use config::BrawlConfig;
pub use dice::{DiceRoll, Die, RandomSource, RollMode, RollResult, ScriptedRandom, SeededRandom};
pub use error::{MechError, MechResult};
pub use knockout::CombatEnd;
pub use ledger::{DamageApplication, apply_damage, reduced_strength};
