//! Mutations produced by a battle.
//!
//! A simulation never writes to the formations it was given. It returns a
//! [`BattleMutations`] describing soldier losses per slot and experience
//! earned per unit, and the caller applies it inside whatever transaction
//! guards its storage. [`BattleMutations::apply`] checks every precondition
//! before changing anything, so a failed application leaves both formations
//! untouched.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::army::{Formation, FormationId, UnitId, SLOT_COUNT};
use crate::combat::SideState;
use crate::error::{Result, WarError};

/// Changes to one formation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideMutations {
    /// Formation the changes belong to.
    pub formation: FormationId,
    /// Soldiers lost per slot.
    pub losses: [u32; SLOT_COUNT],
    /// Experience earned per slot.
    pub experience: [u64; SLOT_COUNT],
    /// Unit in each slot when the battle started.
    pub units: [Option<UnitId>; SLOT_COUNT],
}

impl SideMutations {
    /// Captures the changes accumulated in `side`.
    #[must_use]
    pub fn from_side(side: &SideState) -> Self {
        Self {
            formation: side.formation(),
            losses: side.losses(),
            experience: *side.experience(),
            units: *side.units(),
        }
    }

    /// Total soldiers lost.
    #[must_use]
    pub fn total_losses(&self) -> u64 {
        self.losses.iter().map(|&l| u64::from(l)).sum()
    }

    /// Experience earned, keyed by unit. Units that earned nothing are omitted.
    #[must_use]
    pub fn experience_by_unit(&self) -> BTreeMap<UnitId, u64> {
        self.units
            .into_iter()
            .zip(self.experience)
            .filter_map(|(unit, gain)| unit.filter(|_| gain > 0).map(|id| (id, gain)))
            .collect()
    }

    fn check(&self, formation: &Formation) -> Result<()> {
        if formation.id != self.formation {
            return Err(WarError::FormationMismatch {
                expected: self.formation,
                found: formation.id,
            });
        }
        for slot in 0..SLOT_COUNT {
            let current = formation.unit(slot).map(|unit| unit.id);
            let touched = self.losses[slot] > 0 || self.experience[slot] > 0;
            if touched && current != self.units[slot] {
                return Err(WarError::UnitMismatch {
                    formation: formation.id,
                    slot,
                });
            }
            if self.losses[slot] > formation.soldiers[slot] {
                return Err(WarError::StrengthUnderflow {
                    formation: formation.id,
                    slot,
                    soldiers: formation.soldiers[slot],
                    loss: self.losses[slot],
                });
            }
        }
        Ok(())
    }

    fn commit(&self, formation: &mut Formation) {
        for slot in 0..SLOT_COUNT {
            formation.soldiers[slot] -= self.losses[slot];
            if let Some(unit) = formation.slots[slot].as_mut() {
                unit.experience = unit.experience.saturating_add(self.experience[slot]);
            }
        }
    }
}

/// Changes to both formations of a battle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleMutations {
    /// Changes to the initiating formation.
    pub attack: SideMutations,
    /// Changes to the attacked formation.
    pub defense: SideMutations,
}

impl BattleMutations {
    /// Writes losses and experience into the formations.
    ///
    /// # Errors
    ///
    /// Fails without modifying either formation if a formation ID does not
    /// match, a slot's unit was swapped since the battle, or a loss exceeds the
    /// slot's current strength.
    pub fn apply(&self, attack: &mut Formation, defense: &mut Formation) -> Result<()> {
        self.attack.check(attack)?;
        self.defense.check(defense)?;
        self.attack.commit(attack);
        self.defense.commit(defense);
        Ok(())
    }

    /// Experience earned by every unit on both sides.
    #[must_use]
    pub fn experience_by_unit(&self) -> BTreeMap<UnitId, u64> {
        let mut gains = self.attack.experience_by_unit();
        for (unit, gain) in self.defense.experience_by_unit() {
            *gains.entry(unit).or_default() += gain;
        }
        gains
    }
}
