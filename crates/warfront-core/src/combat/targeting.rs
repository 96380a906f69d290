//! Target selection.
//!
//! Targets are drawn by index over the whole slot array, not over a compacted
//! list of live slots: a draw from `0..draw_range` is reduced modulo the slot
//! count and retried until it lands on a live slot. Headquarters detection
//! downstream depends on the returned index being the original slot index.

use rand::Rng;

use super::stats::CombatSlot;

/// Picks a live slot from `slots`, returning its index.
///
/// Returns `None` without drawing if no slot has soldiers left.
/// `draw_range` must be at least `slots.len()` so every index is reachable;
/// [`BattleConfig::validate`](crate::config::BattleConfig::validate) enforces this.
pub fn select_target<R: Rng + ?Sized>(
    slots: &[Option<CombatSlot>],
    draw_range: u32,
    rng: &mut R,
) -> Option<usize> {
    let any_alive = slots.iter().flatten().any(CombatSlot::is_alive);
    if !any_alive {
        return None;
    }

    loop {
        let index = rng.gen_range(0..draw_range) as usize % slots.len();
        if slots[index].is_some_and(|slot| slot.is_alive()) {
            return Some(index);
        }
    }
}
