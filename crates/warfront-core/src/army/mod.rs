//! Army model: formations and the units that fill their slots.
//!
//! - [`Formation`]: one side of a battle, a fixed array of [`SLOT_COUNT`] slots
//! - [`Unit`]: a persistent commander with base attributes
//! - [`FormationId`], [`UnitId`], [`LocationId`], [`FactionId`]: identifiers
//!
//! Slot [`HEADQUARTERS`] is special: when its soldiers reach zero the battle
//! ends immediately. Slot indices are stable for the whole battle and are the
//! keys used when losses are written back to the formation.
//!
//! # Example
//!
//! ```
//! use warfront_core::army::{Formation, FormationId, Unit, UnitId, HEADQUARTERS};
//!
//! let mut army = Formation::new(FormationId::new(1));
//! army.place(HEADQUARTERS, Unit::new(UnitId::new(10)), 1000).unwrap();
//!
//! assert_eq!(army.total_soldiers(), 1000);
//! assert_eq!(army.occupied().count(), 1);
//! ```

pub mod unit;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Result, WarError};

pub use unit::{ArmsType, BaseStats, Unit, UnitId};

/// Number of slots in every formation.
pub const SLOT_COUNT: usize = 5;

/// Index of the headquarters slot.
pub const HEADQUARTERS: usize = 0;

/// Unique identifier for a formation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormationId(u64);

impl FormationId {
    /// Creates a new `FormationId` from a raw value.
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

impl fmt::Display for FormationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A location (city or stronghold) whose facilities grant stat bonuses.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationId(u64);

impl LocationId {
    /// Creates a new `LocationId` from a raw value.
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

/// Faction (camp) identifier. `0` means unaligned.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FactionId(u32);

impl FactionId {
    /// The unaligned faction; receives no faction bonus.
    pub const UNALIGNED: Self = Self(0);

    /// Creates a new `FactionId` from a raw value.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the raw value of this identifier.
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }

    /// Whether this faction is eligible for a faction bonus.
    #[must_use]
    pub const fn is_aligned(self) -> bool {
        self.0 > 0
    }
}

/// One side's fielded army.
///
/// `soldiers[i]` is the persisted strength of slot `i`. It lives on the
/// formation rather than on the unit so that losses outlive the battle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Formation {
    /// Stable identifier.
    pub id: FormationId,
    /// Slot occupants. Empty slots stay `None` so indices never shift.
    pub slots: [Option<Unit>; SLOT_COUNT],
    /// Persisted soldier count per slot.
    pub soldiers: [u32; SLOT_COUNT],
    /// Location used for facility bonuses, if the formation is tied to one.
    #[serde(default)]
    pub location: Option<LocationId>,
    /// Faction used for faction bonuses.
    #[serde(default)]
    pub faction: FactionId,
}

impl Formation {
    /// Creates an empty, unaligned formation tied to no location.
    #[must_use]
    pub fn new(id: FormationId) -> Self {
        Self {
            id,
            slots: Default::default(),
            soldiers: [0; SLOT_COUNT],
            location: None,
            faction: FactionId::UNALIGNED,
        }
    }

    /// Ties the formation to a location.
    #[must_use]
    pub fn at_location(mut self, location: LocationId) -> Self {
        self.location = Some(location);
        self
    }

    /// Assigns the formation to a faction.
    #[must_use]
    pub fn in_faction(mut self, faction: FactionId) -> Self {
        self.faction = faction;
        self
    }

    /// Places `unit` in `slot` with the given strength, replacing any occupant.
    ///
    /// # Errors
    ///
    /// Returns [`WarError::SlotOutOfRange`] if `slot >= SLOT_COUNT`.
    pub fn place(&mut self, slot: usize, unit: Unit, soldiers: u32) -> Result<()> {
        if slot >= SLOT_COUNT {
            return Err(WarError::SlotOutOfRange { slot });
        }
        self.slots[slot] = Some(unit);
        self.soldiers[slot] = soldiers;
        Ok(())
    }

    /// Returns the unit in `slot`, if any.
    #[must_use]
    pub fn unit(&self, slot: usize) -> Option<&Unit> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    /// Returns the headquarters unit, if any.
    #[must_use]
    pub fn headquarters(&self) -> Option<&Unit> {
        self.unit(HEADQUARTERS)
    }

    /// Iterates over occupied slots as `(index, unit)`.
    pub fn occupied(&self) -> impl Iterator<Item = (usize, &Unit)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_ref().map(|unit| (index, unit)))
    }

    /// Sum of persisted soldiers across all slots.
    #[must_use]
    pub fn total_soldiers(&self) -> u64 {
        self.soldiers.iter().map(|&s| u64::from(s)).sum()
    }

    /// Whether this formation can take part in a battle at all.
    ///
    /// A formation without a single occupied slot has nobody to act or to be
    /// targeted and is rejected before simulation.
    #[must_use]
    pub fn is_fieldable(&self) -> bool {
        self.occupied().next().is_some()
    }
}
