//! War report data.
//!
//! A [`WarReport`] bundles the [`WarResult`] of one battle with snapshots of
//! both formations taken before and after it. Persisting and rendering
//! reports is up to the caller; this module only gathers the data.

use serde::{Deserialize, Serialize};

use crate::army::{ArmsType, Formation, FormationId, UnitId, SLOT_COUNT};
use crate::result::{Outcome, WarResult};

/// A unit as shown in a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitSnapshot {
    /// Unit ID.
    pub id: UnitId,
    /// Level at snapshot time.
    pub level: u32,
    /// Experience at snapshot time.
    pub experience: u64,
    /// Equipped arms type.
    pub arms: ArmsType,
}

/// A formation as shown in a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormationSnapshot {
    /// Formation ID.
    pub formation: FormationId,
    /// Soldiers per slot.
    pub soldiers: [u32; SLOT_COUNT],
    /// Occupied slots' units, in slot order.
    pub units: Vec<UnitSnapshot>,
}

impl FormationSnapshot {
    /// Captures the current state of `formation`.
    #[must_use]
    pub fn capture(formation: &Formation) -> Self {
        Self {
            formation: formation.id,
            soldiers: formation.soldiers,
            units: formation
                .occupied()
                .map(|(_, unit)| UnitSnapshot {
                    id: unit.id,
                    level: unit.level,
                    experience: unit.experience,
                    arms: unit.arms,
                })
                .collect(),
        }
    }
}

/// One battle as handed to report persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarReport {
    /// Attacker before the battle.
    pub attack_before: FormationSnapshot,
    /// Attacker after the battle.
    pub attack_after: FormationSnapshot,
    /// Defender before the battle. `None` when nobody defended.
    pub defense_before: Option<FormationSnapshot>,
    /// Defender after the battle. `None` when nobody defended.
    pub defense_after: Option<FormationSnapshot>,
    /// Rounds and outcome.
    pub result: WarResult,
}

impl WarReport {
    /// Whether this report records an actual fight.
    #[must_use]
    pub fn is_contested(&self) -> bool {
        self.defense_before.is_some()
    }
}

/// Report for a formation that found no opponent at its destination.
///
/// No combat takes place and no stats are resolved: the result has no rounds,
/// outcome code `0`, and the before and after snapshots are identical.
#[must_use]
pub fn empty_battle_result(attack: &Formation) -> WarReport {
    let snapshot = FormationSnapshot::capture(attack);
    WarReport {
        attack_before: snapshot.clone(),
        attack_after: snapshot,
        defense_before: None,
        defense_after: None,
        result: WarResult::new(Vec::new(), Outcome::Defeat),
    }
}
