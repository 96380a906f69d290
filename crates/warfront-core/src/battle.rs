//! Battle orchestration.
//!
//! [`Battle`] owns the configuration and the bonus source and runs complete
//! battles:
//!
//! 1. **RESOLVE**: build per-slot combat state for both formations
//! 2. **ROUNDS**: play rounds until one ends the battle or the cap is reached
//! 3. **CLASSIFY**: derive the outcome from both headquarters' soldiers
//! 4. **REPORT**: return the [`WarResult`] with the mutations to apply
//!
//! # Determinism
//!
//! All randomness comes from the generator passed to [`Battle::simulate`].
//! The same formations, config and seed always produce the same result, which
//! is what makes war reports replayable.
//!
//! # Example
//!
//! ```
//! use warfront_core::army::{Formation, FormationId, Unit, UnitId, HEADQUARTERS};
//! use warfront_core::battle::Battle;
//! use warfront_core::config::BattleConfig;
//!
//! let mut attack = Formation::new(FormationId::new(1));
//! attack
//!     .place(HEADQUARTERS, Unit::new(UnitId::new(1)).with_force_defense(100, 50), 1000)
//!     .unwrap();
//! let mut defense = Formation::new(FormationId::new(2));
//! defense
//!     .place(HEADQUARTERS, Unit::new(UnitId::new(2)).with_force_defense(80, 40), 800)
//!     .unwrap();
//!
//! let battle = Battle::new(BattleConfig::default()).unwrap();
//! let report = battle.simulate_seeded(&attack, &defense, 42).unwrap();
//! assert!(report.result.rounds().len() <= 10);
//!
//! report.mutations.apply(&mut attack, &mut defense).unwrap();
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::fmt;
use tracing::{debug, info, warn};

use crate::army::Formation;
use crate::bonus::{BonusSource, NoBonuses};
use crate::combat::{play_round, BattleState, Side, SlotStates};
use crate::config::BattleConfig;
use crate::error::{Result, WarError};
use crate::mutation::{BattleMutations, SideMutations};
use crate::result::{Outcome, WarResult};

/// Everything a finished battle produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BattleReport {
    /// The replayable record.
    pub result: WarResult,
    /// Losses and experience for the caller to apply.
    pub mutations: BattleMutations,
    /// Side holding initiative in each round.
    pub initiative: Vec<Side>,
    /// Final combat state of the attacking formation.
    pub attack_slots: SlotStates,
    /// Final combat state of the defending formation.
    pub defense_slots: SlotStates,
}

/// Runs battles with a fixed configuration and bonus source.
pub struct Battle {
    config: BattleConfig,
    bonuses: Box<dyn BonusSource>,
}

impl fmt::Debug for Battle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Battle")
            .field("config", &self.config)
            .field("bonuses", &"<dyn BonusSource>")
            .finish()
    }
}

impl Battle {
    /// Creates a battle runner with no bonuses.
    ///
    /// # Errors
    ///
    /// Returns [`WarError::InvalidConfig`] if `config` fails validation.
    pub fn new(config: BattleConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            bonuses: Box::new(NoBonuses),
        })
    }

    /// Replaces the bonus source.
    #[must_use]
    pub fn with_bonuses(mut self, bonuses: impl BonusSource + 'static) -> Self {
        self.bonuses = Box::new(bonuses);
        self
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    /// The active bonus source.
    #[must_use]
    pub fn bonuses(&self) -> &dyn BonusSource {
        self.bonuses.as_ref()
    }

    /// Fights `attack` against `defense`.
    ///
    /// Neither formation is modified; apply [`BattleReport::mutations`] to
    /// persist the outcome.
    ///
    /// # Errors
    ///
    /// Returns [`WarError::InvalidFormation`] if either formation has no
    /// occupied slot.
    pub fn simulate<R: Rng + ?Sized>(
        &self,
        attack: &Formation,
        defense: &Formation,
        rng: &mut R,
    ) -> Result<BattleReport> {
        ensure_fieldable(attack)?;
        ensure_fieldable(defense)?;

        let mut state = BattleState::new(attack, defense, self.bonuses.as_ref());
        let mut rounds = Vec::new();
        let mut initiative = Vec::new();
        let mut ended_by = None;

        while rounds.len() < self.config.max_rounds as usize {
            let round = play_round(&mut state, &self.config, rng);
            debug!(
                round = rounds.len() + 1,
                initiative = %round.initiative,
                events = round.record.len(),
                ended = round.end.is_some(),
                "round resolved"
            );
            rounds.push(round.record);
            initiative.push(round.initiative);
            if round.end.is_some() {
                ended_by = round.end;
                break;
            }
        }

        let outcome = Outcome::classify(
            state.attack.headquarters_soldiers(),
            state.defense.headquarters_soldiers(),
        );

        info!(
            attack = %attack.id,
            defense = %defense.id,
            %outcome,
            rounds = rounds.len(),
            ?ended_by,
            "battle finished"
        );

        Ok(BattleReport {
            result: WarResult::new(rounds, outcome).with_end_reason(ended_by),
            mutations: BattleMutations {
                attack: SideMutations::from_side(&state.attack),
                defense: SideMutations::from_side(&state.defense),
            },
            initiative,
            attack_slots: *state.attack.slots(),
            defense_slots: *state.defense.slots(),
        })
    }

    /// Fights with a fresh generator seeded from `seed`.
    ///
    /// # Errors
    ///
    /// See [`simulate`](Self::simulate).
    pub fn simulate_seeded(
        &self,
        attack: &Formation,
        defense: &Formation,
        seed: u64,
    ) -> Result<BattleReport> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        self.simulate(attack, defense, &mut rng)
    }
}

pub(crate) fn ensure_fieldable(formation: &Formation) -> Result<()> {
    if formation.is_fieldable() {
        return Ok(());
    }
    warn!(formation = %formation.id, "rejecting formation with no occupied slots");
    Err(WarError::InvalidFormation {
        formation: formation.id,
        reason: "no occupied slots",
    })
}
