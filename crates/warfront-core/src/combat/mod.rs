//! Combat state and the per-round attack loop.
//!
//! - [`stats`]: builds effective per-slot stats from a formation and its bonuses
//! - [`targeting`]: index-based rejection sampling over live slots
//! - [`round`]: initiative, the two attack passes, and termination checks
//!
//! # State
//!
//! A [`BattleState`] holds one [`SideState`] per formation. Each side keeps
//! the live [`CombatSlot`]s alongside a local copy of the formation's persisted
//! strength counters. Every kill decrements both, so the two always agree; the
//! formation itself is never touched until the caller applies the resulting
//! [`BattleMutations`](crate::mutation::BattleMutations).

pub mod round;
pub mod stats;
pub mod targeting;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::army::{Formation, FormationId, UnitId, HEADQUARTERS, SLOT_COUNT};
use crate::bonus::BonusSource;

pub use round::{play_round, EndReason, RoundOutcome, Step};
pub use stats::{resolve_formation, CombatSlot, CombatStats, SlotStates};
pub use targeting::select_target;

/// Which formation of a battle.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    /// The formation that initiated the battle.
    Attack,
    /// The formation that was attacked.
    Defense,
}

impl Side {
    /// The other side.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::Attack => Self::Defense,
            Self::Defense => Self::Attack,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Attack => write!(f, "attack"),
            Self::Defense => write!(f, "defense"),
        }
    }
}

/// Battle-scoped state of one formation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SideState {
    formation: FormationId,
    slots: SlotStates,
    units: [Option<UnitId>; SLOT_COUNT],
    initial_strength: [u32; SLOT_COUNT],
    strength: [u32; SLOT_COUNT],
    experience: [u64; SLOT_COUNT],
}

impl SideState {
    /// Resolves `formation` into fresh combat state.
    #[must_use]
    pub fn new(formation: &Formation, bonuses: &dyn BonusSource) -> Self {
        let slots = resolve_formation(formation, bonuses);
        Self {
            formation: formation.id,
            slots,
            units: std::array::from_fn(|i| formation.unit(i).map(|unit| unit.id)),
            initial_strength: formation.soldiers,
            strength: formation.soldiers,
            experience: [0; SLOT_COUNT],
        }
    }

    /// The formation this state was built from.
    #[must_use]
    pub fn formation(&self) -> FormationId {
        self.formation
    }

    /// Live combat slots.
    #[must_use]
    pub fn slots(&self) -> &SlotStates {
        &self.slots
    }

    /// Local copy of the formation's strength counters.
    #[must_use]
    pub fn strength(&self) -> &[u32; SLOT_COUNT] {
        &self.strength
    }

    /// Soldiers left in the headquarters slot. An empty headquarters counts as zero.
    #[must_use]
    pub fn headquarters_soldiers(&self) -> u32 {
        self.slots[HEADQUARTERS].map_or(0, |slot| slot.soldiers)
    }

    /// Soldiers lost per slot since the battle started.
    #[must_use]
    pub fn losses(&self) -> [u32; SLOT_COUNT] {
        std::array::from_fn(|i| self.initial_strength[i] - self.strength[i])
    }

    /// Experience earned per slot since the battle started.
    #[must_use]
    pub fn experience(&self) -> &[u64; SLOT_COUNT] {
        &self.experience
    }

    /// Unit occupying each slot when the battle started.
    #[must_use]
    pub fn units(&self) -> &[Option<UnitId>; SLOT_COUNT] {
        &self.units
    }

    /// Removes `kill` soldiers from slot `index`, returning the soldiers left.
    ///
    /// `kill` must not exceed the slot's live soldiers.
    fn apply_kill(&mut self, index: usize, kill: u32) -> u32 {
        let Some(slot) = self.slots[index].as_mut() else {
            return 0;
        };
        slot.soldiers -= kill;
        self.strength[index] -= kill;
        debug_assert_eq!(slot.soldiers, self.strength[index]);
        slot.soldiers
    }

    fn award(&mut self, index: usize, experience: u64) {
        self.experience[index] = self.experience[index].saturating_add(experience);
    }
}

/// Both sides of a battle in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BattleState {
    /// The initiating formation.
    pub attack: SideState,
    /// The attacked formation.
    pub defense: SideState,
}

impl BattleState {
    /// Resolves both formations with the same bonus source.
    #[must_use]
    pub fn new(attack: &Formation, defense: &Formation, bonuses: &dyn BonusSource) -> Self {
        Self {
            attack: SideState::new(attack, bonuses),
            defense: SideState::new(defense, bonuses),
        }
    }

    /// Returns `(acting, opposing)` for `acting`.
    pub fn split_mut(&mut self, acting: Side) -> (&mut SideState, &mut SideState) {
        match acting {
            Side::Attack => (&mut self.attack, &mut self.defense),
            Side::Defense => (&mut self.defense, &mut self.attack),
        }
    }

    /// State of `side`.
    #[must_use]
    pub fn side(&self, side: Side) -> &SideState {
        match side {
            Side::Attack => &self.attack,
            Side::Defense => &self.defense,
        }
    }
}
