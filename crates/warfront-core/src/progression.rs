//! Experience to level conversion.
//!
//! Battles only award raw experience. How experience turns into levels is a
//! game-balance table owned elsewhere; [`LevelCurve`] is the seam, and
//! [`ExperienceTable`] is the threshold table the game server ships with.

use serde::{Deserialize, Serialize};

use crate::army::Formation;

/// Converts accumulated experience into a level.
pub trait LevelCurve: Send + Sync {
    /// Returns the `(level, experience)` a unit should hold after settling
    /// `experience` points.
    fn settle(&self, experience: u64) -> (u32, u64);
}

/// Cumulative experience thresholds.
///
/// `thresholds[i]` is the total experience needed to reach level `i + 2`.
/// Units start at level 1. Past the last threshold the unit is at max level
/// and experience stops accumulating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceTable {
    thresholds: Vec<u64>,
}

impl ExperienceTable {
    /// Creates a table from cumulative thresholds. Thresholds are sorted.
    #[must_use]
    pub fn new(mut thresholds: Vec<u64>) -> Self {
        thresholds.sort_unstable();
        Self { thresholds }
    }

    /// Highest reachable level.
    #[must_use]
    pub fn max_level(&self) -> u32 {
        u32::try_from(self.thresholds.len())
            .map_or(u32::MAX, |levels| levels.saturating_add(1))
    }
}

impl LevelCurve for ExperienceTable {
    fn settle(&self, experience: u64) -> (u32, u64) {
        let reached = self.thresholds.partition_point(|&t| t <= experience);
        let level = u32::try_from(reached).map_or(u32::MAX, |r| r.saturating_add(1));
        match self.thresholds.last() {
            Some(&cap) if reached == self.thresholds.len() => (level, cap),
            _ => (level, experience),
        }
    }
}

/// Settles the experience of every unit in `formation`.
pub fn settle_formation(formation: &mut Formation, curve: &dyn LevelCurve) {
    for unit in formation.slots.iter_mut().flatten() {
        let (level, experience) = curve.settle(unit.experience);
        unit.level = level;
        unit.experience = experience;
    }
}
