//! Units: the persistent commanders that occupy formation slots.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a unit.
///
/// Unit IDs are assigned by the owning account and stay stable across
/// battles. They appear verbatim in every [`BattleEvent`](crate::result::BattleEvent).
///
/// # Example
///
/// ```
/// use warfront_core::army::UnitId;
///
/// let id = UnitId::new(1001);
/// assert_eq!(id.as_u64(), 1001);
/// ```
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnitId(u64);

impl UnitId {
    /// Creates a new `UnitId` from a raw value.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw value of this identifier.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UnitId({})", self.0)
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for UnitId {
    fn from(id: u64) -> Self {
        Self::new(id)
    }
}

/// Equipped arms type. Carried through combat unchanged.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArmsType(pub u16);

/// Base combat attributes of a unit, before any bonuses.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct BaseStats {
    /// Offensive strength per soldier.
    pub force: i32,
    /// Damage mitigation per soldier.
    pub defense: i32,
    /// Speed rating.
    pub speed: i32,
    /// Strategy rating.
    pub strategy: i32,
    /// Destructiveness against buildings.
    pub destroy: i32,
}

/// A commanding unit.
///
/// Units are owned by the player rather than by the formation they serve in.
/// A battle only ever changes their `experience`; leveling is left to a
/// [`LevelCurve`](crate::progression::LevelCurve).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    /// Stable identifier.
    pub id: UnitId,
    /// Base attributes.
    #[serde(default)]
    pub stats: BaseStats,
    /// Equipped arms type.
    #[serde(default)]
    pub arms: ArmsType,
    /// Accumulated experience.
    #[serde(default)]
    pub experience: u64,
    /// Current level.
    #[serde(default = "default_level")]
    pub level: u32,
}

fn default_level() -> u32 {
    1
}

impl Unit {
    /// Creates a level 1 unit with zeroed attributes.
    #[must_use]
    pub fn new(id: UnitId) -> Self {
        Self {
            id,
            stats: BaseStats::default(),
            arms: ArmsType::default(),
            experience: 0,
            level: default_level(),
        }
    }

    /// Sets the base attributes.
    #[must_use]
    pub fn with_stats(mut self, stats: BaseStats) -> Self {
        self.stats = stats;
        self
    }

    /// Sets force and defense, leaving the other attributes untouched.
    #[must_use]
    pub fn with_force_defense(mut self, force: i32, defense: i32) -> Self {
        self.stats.force = force;
        self.stats.defense = defense;
        self
    }

    /// Sets the arms type.
    #[must_use]
    pub fn with_arms(mut self, arms: ArmsType) -> Self {
        self.arms = arms;
        self
    }
}
