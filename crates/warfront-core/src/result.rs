//! Battle records: events, rounds, and the final result.
//!
//! The wire format is fixed by the war-report consumers:
//! - a [`BattleEvent`] is the tuple `[attacker, defender, attacker_loss, defender_loss]`
//! - a [`RoundRecord`] is `{"b": [event, ...]}`
//! - a [`WarResult`] is `{"rounds": [round, ...], "result": 0 | 1 | 2}`
//!
//! # Example
//!
//! ```
//! use warfront_core::army::UnitId;
//! use warfront_core::result::{BattleEvent, Outcome, RoundRecord, WarResult};
//!
//! let mut round = RoundRecord::default();
//! round.push(BattleEvent::new(UnitId::new(1), UnitId::new(2), 75));
//!
//! let result = WarResult::new(vec![round], Outcome::Draw);
//! assert_eq!(result.outcome().code(), 1);
//! assert_eq!(result.rounds()[0].events()[0].to_array(), [1, 2, 0, 75]);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::army::UnitId;
use crate::combat::EndReason;
use crate::error::WarError;

/// One resolved attack.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "[u64; 4]", try_from = "[u64; 4]")]
pub struct BattleEvent {
    /// The acting unit.
    pub attacker: UnitId,
    /// The unit that was struck.
    pub defender: UnitId,
    /// Soldiers lost by the acting side. Always zero.
    pub attacker_loss: u32,
    /// Soldiers killed on the struck side.
    pub defender_loss: u32,
}

impl BattleEvent {
    /// Records a strike by `attacker` on `defender` that killed `kill` soldiers.
    #[must_use]
    pub fn new(attacker: UnitId, defender: UnitId, kill: u32) -> Self {
        Self {
            attacker,
            defender,
            attacker_loss: 0,
            defender_loss: kill,
        }
    }

    /// Wire tuple `[attacker, defender, attacker_loss, defender_loss]`.
    #[must_use]
    pub fn to_array(&self) -> [u64; 4] {
        [
            self.attacker.as_u64(),
            self.defender.as_u64(),
            u64::from(self.attacker_loss),
            u64::from(self.defender_loss),
        ]
    }
}

impl From<BattleEvent> for [u64; 4] {
    fn from(event: BattleEvent) -> Self {
        event.to_array()
    }
}

impl TryFrom<[u64; 4]> for BattleEvent {
    type Error = WarError;

    fn try_from([attacker, defender, attacker_loss, defender_loss]: [u64; 4]) -> Result<Self, Self::Error> {
        let loss = |value: u64| u32::try_from(value).map_err(|_| WarError::LossOutOfRange(value));
        Ok(Self {
            attacker: UnitId::new(attacker),
            defender: UnitId::new(defender),
            attacker_loss: loss(attacker_loss)?,
            defender_loss: loss(defender_loss)?,
        })
    }
}

/// Events of one round, in resolution order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoundRecord {
    #[serde(rename = "b", default)]
    events: Vec<BattleEvent>,
}

impl RoundRecord {
    /// Appends an event.
    pub fn push(&mut self, event: BattleEvent) {
        self.events.push(event);
    }

    /// Events in resolution order.
    #[must_use]
    pub fn events(&self) -> &[BattleEvent] {
        &self.events
    }

    /// Number of events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether no attack was resolved this round.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// How a battle ended for the initiating side.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Outcome {
    /// Attacker headquarters destroyed.
    Defeat = 0,
    /// Round cap reached with both headquarters standing.
    Draw = 1,
    /// Defender headquarters destroyed.
    Victory = 2,
}

impl Outcome {
    /// Integer code used by report consumers.
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Classifies a finished battle from both headquarters' remaining soldiers.
    ///
    /// The attacker's headquarters is checked first, so a battle in which both
    /// fell counts as a defeat.
    #[must_use]
    pub const fn classify(attack_headquarters: u32, defense_headquarters: u32) -> Self {
        if attack_headquarters == 0 {
            Self::Defeat
        } else if defense_headquarters != 0 {
            Self::Draw
        } else {
            Self::Victory
        }
    }
}

impl From<Outcome> for u8 {
    fn from(outcome: Outcome) -> Self {
        outcome.code()
    }
}

impl TryFrom<u8> for Outcome {
    type Error = WarError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Defeat),
            1 => Ok(Self::Draw),
            2 => Ok(Self::Victory),
            other => Err(WarError::InvalidOutcomeCode(other)),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Defeat => write!(f, "defeat"),
            Self::Draw => write!(f, "draw"),
            Self::Victory => write!(f, "victory"),
        }
    }
}

/// The replayable record of a battle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarResult {
    rounds: Vec<RoundRecord>,
    #[serde(rename = "result")]
    outcome: Outcome,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    ended_by: Option<EndReason>,
}

impl WarResult {
    /// Creates a result from its rounds and outcome.
    #[must_use]
    pub fn new(rounds: Vec<RoundRecord>, outcome: Outcome) -> Self {
        Self {
            rounds,
            outcome,
            ended_by: None,
        }
    }

    /// Records what stopped the battle before the round cap.
    #[must_use]
    pub fn with_end_reason(mut self, reason: Option<EndReason>) -> Self {
        self.ended_by = reason;
        self
    }

    /// Rounds in the order they were fought.
    #[must_use]
    pub fn rounds(&self) -> &[RoundRecord] {
        &self.rounds
    }

    /// Outcome for the initiating side.
    #[must_use]
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// What ended the battle early, or `None` if it ran to the round cap.
    #[must_use]
    pub fn ended_by(&self) -> Option<EndReason> {
        self.ended_by
    }

    /// All events across all rounds, in order.
    pub fn events(&self) -> impl Iterator<Item = &BattleEvent> {
        self.rounds.iter().flat_map(RoundRecord::events)
    }
}
