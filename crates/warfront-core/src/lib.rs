//! # Warfront Core
//!
//! Deterministic army combat resolution for Warfront.
//!
//! Two formations of up to five commanding units fight a capped number of
//! rounds. Every round an initiative draw decides which side strikes first;
//! each live slot then strikes a randomly chosen live enemy slot, killing
//! soldiers in proportion to its strength and force against the target's
//! defense. A battle ends when a headquarters falls, when a side has nobody
//! left to strike, or when the round cap is reached.
//!
//! ## Architecture
//!
//! - **Army**: formations, units, and their identifiers ([`army`])
//! - **Combat**: stat resolution, targeting, and the round engine ([`combat`])
//! - **Battle**: orchestration, outcome classification, and mutations
//!   ([`battle`], [`mutation`], [`batch`], [`engagement`])
//! - **Records**: the replayable result and war reports ([`result`], [`report`], [`hash`])
//!
//! Simulations never write to the formations they read. They return a
//! [`BattleMutations`] the caller applies once it holds whatever lock guards
//! its storage.
//!
//! ## Usage
//!
//! ```
//! use warfront_core::{Battle, BattleConfig, Formation, FormationId, Unit, UnitId};
//! use warfront_core::army::HEADQUARTERS;
//!
//! let mut attack = Formation::new(FormationId::new(1));
//! attack.place(HEADQUARTERS, Unit::new(UnitId::new(1)).with_force_defense(120, 60), 1000)?;
//! let mut defense = Formation::new(FormationId::new(2));
//! defense.place(HEADQUARTERS, Unit::new(UnitId::new(2)).with_force_defense(90, 40), 900)?;
//!
//! let battle = Battle::new(BattleConfig::default())?;
//! let report = battle.simulate_seeded(&attack, &defense, 2024)?;
//! report.mutations.apply(&mut attack, &mut defense)?;
//! # Ok::<(), warfront_core::WarError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod army;
pub mod batch;
pub mod battle;
pub mod bonus;
pub mod combat;
pub mod config;
pub mod engagement;
pub mod error;
pub mod hash;
pub mod mutation;
pub mod progression;
pub mod report;
pub mod result;

pub use army::{Formation, FormationId, Unit, UnitId};
pub use battle::{Battle, BattleReport};
pub use bonus::{BonusSource, BonusTable, NoBonuses};
pub use config::BattleConfig;
pub use engagement::{engage, Engagement};
pub use error::{Result, WarError};
pub use hash::hash_war_result;
pub use mutation::BattleMutations;
pub use report::{empty_battle_result, WarReport};
pub use result::{Outcome, WarResult};

#[cfg(test)]
mod tests;
