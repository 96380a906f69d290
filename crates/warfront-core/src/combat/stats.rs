//! Stat resolution: base unit attributes plus location and faction bonuses.

use serde::{Deserialize, Serialize};

use crate::army::{ArmsType, BaseStats, Formation, UnitId, SLOT_COUNT};
use crate::bonus::{BonusSource, LocationBonus};

/// Effective attributes for one battle.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CombatStats {
    /// Effective force.
    pub force: i32,
    /// Effective defense.
    pub defense: i32,
    /// Effective speed.
    pub speed: i32,
    /// Effective strategy.
    pub strategy: i32,
    /// Effective destructiveness. Receives the faction bonus only.
    pub destroy: i32,
}

/// Battle-scoped state for one occupied slot.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatSlot {
    /// The unit commanding this slot.
    pub unit: UnitId,
    /// Effective attributes.
    pub stats: CombatStats,
    /// Arms type, copied from the unit.
    pub arms: ArmsType,
    /// Live soldier count.
    pub soldiers: u32,
    /// Slot index within the formation.
    pub position: usize,
}

impl CombatSlot {
    /// Whether this slot still has soldiers.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.soldiers > 0
    }
}

/// Per-slot combat state, indexed like the formation.
pub type SlotStates = [Option<CombatSlot>; SLOT_COUNT];

/// Builds the combat state of every slot in `formation`.
///
/// Empty slots stay `None` so that slot indices keep identifying the same
/// position for the whole battle. The formation is only read.
#[must_use]
pub fn resolve_formation(formation: &Formation, bonuses: &dyn BonusSource) -> SlotStates {
    let location = formation
        .location
        .map(|location| bonuses.location_bonus(location))
        .unwrap_or_default();
    let faction = if formation.faction.is_aligned() {
        bonuses.faction_bonus(formation.faction)
    } else {
        0
    };

    std::array::from_fn(|position| {
        let unit = formation.unit(position)?;
        Some(CombatSlot {
            unit: unit.id,
            stats: effective_stats(&unit.stats, location, faction),
            arms: unit.arms,
            soldiers: formation.soldiers[position],
            position,
        })
    })
}

fn effective_stats(base: &BaseStats, location: LocationBonus, faction: i32) -> CombatStats {
    CombatStats {
        force: base.force.saturating_add(location.force).saturating_add(faction),
        defense: base.defense.saturating_add(location.defense).saturating_add(faction),
        speed: base.speed.saturating_add(location.speed).saturating_add(faction),
        strategy: base.strategy.saturating_add(location.strategy).saturating_add(faction),
        destroy: base.destroy.saturating_add(faction),
    }
}
