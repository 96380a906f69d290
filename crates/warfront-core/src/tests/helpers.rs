//! Formation builders and proptest strategies shared by the test modules.

use proptest::prelude::*;

use crate::army::{Formation, FormationId, Unit, UnitId, HEADQUARTERS, SLOT_COUNT};
use crate::battle::Battle;
use crate::config::BattleConfig;

// =============================================================================
// Formation Builders
// =============================================================================

/// Attributes of one slot in a generated formation.
#[derive(Debug, Clone, Copy)]
pub struct SlotSpec {
    /// Unit force.
    pub force: i32,
    /// Unit defense.
    pub defense: i32,
    /// Slot strength.
    pub soldiers: u32,
}

impl SlotSpec {
    /// Shorthand constructor.
    pub fn new(force: i32, defense: i32, soldiers: u32) -> Self {
        Self {
            force,
            defense,
            soldiers,
        }
    }
}

/// Builds formation `id` from per-slot specs.
///
/// The unit in slot `i` gets ID `id * 10 + i`, so unit IDs never collide
/// across the two sides of a battle as long as formation IDs differ.
pub fn build_formation(id: u64, slots: &[Option<SlotSpec>]) -> Formation {
    let mut army = Formation::new(FormationId::new(id));
    for (index, spec) in slots.iter().enumerate().take(SLOT_COUNT) {
        if let Some(spec) = spec {
            let unit = Unit::new(unit_id(id, index)).with_force_defense(spec.force, spec.defense);
            army.place(index, unit, spec.soldiers).unwrap();
        }
    }
    army
}

/// Formation with only a headquarters.
pub fn lone_headquarters(id: u64, force: i32, defense: i32, soldiers: u32) -> Formation {
    build_formation(id, &[Some(SlotSpec::new(force, defense, soldiers))])
}

/// Formation with every slot filled with the same unit profile.
pub fn full_formation(id: u64, force: i32, defense: i32, soldiers: u32) -> Formation {
    build_formation(id, &[Some(SlotSpec::new(force, defense, soldiers)); SLOT_COUNT])
}

/// ID of the unit placed in `slot` of formation `formation` by the builders.
pub fn unit_id(formation: u64, slot: usize) -> UnitId {
    UnitId::new(formation * 10 + slot as u64)
}

/// Battle runner with the default config and no bonuses.
pub fn default_battle() -> Battle {
    Battle::new(BattleConfig::default()).unwrap()
}

/// Soldiers in the headquarters slot, zero when it is empty.
pub fn headquarters_soldiers(formation: &Formation) -> u32 {
    formation
        .headquarters()
        .map_or(0, |_| formation.soldiers[HEADQUARTERS])
}

// =============================================================================
// Proptest Strategies
// =============================================================================

/// Generates one occupied slot.
pub fn arb_slot() -> impl Strategy<Value = SlotSpec> {
    (0i32..600, 0i32..600, 0u32..3000).prop_map(|(force, defense, soldiers)| SlotSpec {
        force,
        defense,
        soldiers,
    })
}

/// Generates slot layouts with at least one occupied slot.
pub fn arb_layout() -> impl Strategy<Value = Vec<Option<SlotSpec>>> {
    proptest::collection::vec(proptest::option::of(arb_slot()), SLOT_COUNT)
        .prop_filter("at least one occupied slot", |slots| {
            slots.iter().any(Option::is_some)
        })
}

// =============================================================================
// Tests for helpers
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_formation_keeps_slot_indices() {
        let army = build_formation(3, &[None, None, Some(SlotSpec::new(1, 2, 30))]);
        assert!(army.unit(0).is_none());
        assert_eq!(army.unit(2).unwrap().id, unit_id(3, 2));
        assert_eq!(army.soldiers[2], 30);
    }

    #[test]
    fn headquarters_soldiers_of_empty_headquarters_is_zero() {
        let army = build_formation(3, &[None, Some(SlotSpec::new(1, 2, 30))]);
        assert_eq!(headquarters_soldiers(&army), 0);
    }
}
