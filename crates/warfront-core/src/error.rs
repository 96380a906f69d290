//! Error types for the combat engine.
//!
//! The round loop itself never fails: damage is clamped and target sampling is
//! guarded by an exhaustion pre-check. Errors only surface at the edges, when a
//! battle is configured, started, or when its mutation set is applied.

use thiserror::Error;

use crate::army::FormationId;

/// Errors surfaced by the combat engine.
#[derive(Error, Debug)]
pub enum WarError {
    /// A formation cannot take part in a battle.
    #[error("invalid formation {formation}: {reason}")]
    InvalidFormation {
        /// The rejected formation.
        formation: FormationId,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// A slot index outside the formation's fixed capacity.
    #[error("slot {slot} is out of range")]
    SlotOutOfRange {
        /// The offending index.
        slot: usize,
    },

    /// A decoded event carries a loss larger than any slot can hold.
    #[error("loss {0} does not fit a soldier count")]
    LossOutOfRange(u64),

    /// The battle configuration failed validation.
    #[error("invalid battle config: {0}")]
    InvalidConfig(String),

    /// The battle configuration could not be parsed.
    #[error("failed to parse battle config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// A mutation set was applied to a formation it was not produced for.
    #[error("mutation set belongs to formation {expected}, got {found}")]
    FormationMismatch {
        /// Formation the mutations were recorded against.
        expected: FormationId,
        /// Formation they were applied to.
        found: FormationId,
    },

    /// The unit in a slot changed between simulation and application.
    #[error("unit in slot {slot} of formation {formation} changed since the battle")]
    UnitMismatch {
        /// The formation being mutated.
        formation: FormationId,
        /// The slot whose unit no longer matches.
        slot: usize,
    },

    /// A recorded loss exceeds the persisted strength of a slot.
    #[error("slot {slot} of formation {formation} has {soldiers} soldiers, cannot lose {loss}")]
    StrengthUnderflow {
        /// The formation being mutated.
        formation: FormationId,
        /// The slot index.
        slot: usize,
        /// Persisted soldiers at application time.
        soldiers: u32,
        /// Loss recorded by the battle.
        loss: u32,
    },

    /// An outcome code outside `0..=2`.
    #[error("unknown outcome code {0}")]
    InvalidOutcomeCode(u8),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, WarError>;
