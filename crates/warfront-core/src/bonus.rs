//! Stat bonus lookups.
//!
//! Facility and faction bonus tables belong to other parts of the game server.
//! The combat engine reads them through the [`BonusSource`] trait and never
//! mutates them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::army::{FactionId, LocationId};

/// Additive bonuses granted by a location's facilities.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationBonus {
    /// Added to force.
    pub force: i32,
    /// Added to defense.
    pub defense: i32,
    /// Added to speed.
    pub speed: i32,
    /// Added to strategy.
    pub strategy: i32,
}

/// Read-only access to bonus tables.
///
/// Implementations must be cheap to call; the stat resolver queries them once
/// per formation per battle.
pub trait BonusSource: Send + Sync {
    /// Bonuses granted by `location`'s facilities.
    fn location_bonus(&self, location: LocationId) -> LocationBonus;

    /// Flat bonus for members of `faction`.
    ///
    /// Only called for aligned factions.
    fn faction_bonus(&self, faction: FactionId) -> i32;
}

/// A bonus source that grants nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoBonuses;

impl BonusSource for NoBonuses {
    fn location_bonus(&self, _location: LocationId) -> LocationBonus {
        LocationBonus::default()
    }

    fn faction_bonus(&self, _faction: FactionId) -> i32 {
        0
    }
}

/// In-memory bonus tables. Unknown keys yield no bonus.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BonusTable {
    locations: BTreeMap<LocationId, LocationBonus>,
    factions: BTreeMap<FactionId, i32>,
}

impl BonusTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the bonus for a location.
    #[must_use]
    pub fn with_location(mut self, location: LocationId, bonus: LocationBonus) -> Self {
        self.locations.insert(location, bonus);
        self
    }

    /// Sets the bonus for a faction.
    #[must_use]
    pub fn with_faction(mut self, faction: FactionId, bonus: i32) -> Self {
        self.factions.insert(faction, bonus);
        self
    }
}

impl BonusSource for BonusTable {
    fn location_bonus(&self, location: LocationId) -> LocationBonus {
        self.locations.get(&location).copied().unwrap_or_default()
    }

    fn faction_bonus(&self, faction: FactionId) -> i32 {
        self.factions.get(&faction).copied().unwrap_or(0)
    }
}

/// Flat list form of a [`BonusTable`], suitable for JSON and TOML files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BonusEntries {
    /// Per-location bonuses.
    pub locations: Vec<LocationBonusEntry>,
    /// Per-faction bonuses.
    pub factions: Vec<FactionBonusEntry>,
}

/// One row of [`BonusEntries::locations`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationBonusEntry {
    /// The location.
    pub location: LocationId,
    /// Its bonus.
    #[serde(flatten)]
    pub bonus: LocationBonus,
}

/// One row of [`BonusEntries::factions`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactionBonusEntry {
    /// The faction.
    pub faction: FactionId,
    /// Its bonus.
    pub bonus: i32,
}

impl From<BonusEntries> for BonusTable {
    fn from(entries: BonusEntries) -> Self {
        let locations = entries
            .locations
            .into_iter()
            .map(|e| (e.location, e.bonus))
            .collect();
        let factions = entries
            .factions
            .into_iter()
            .map(|e| (e.faction, e.bonus))
            .collect();
        Self {
            locations,
            factions,
        }
    }
}
