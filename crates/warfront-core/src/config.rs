//! Battle configuration.
//!
//! The defaults reproduce the live game's balance exactly, including the
//! asymmetry between the two attack passes of a round: the first pass divides
//! damage by 1000 and awards 5 experience per kill, the second divides by
//! 10000 and awards 10.

use serde::{Deserialize, Serialize};

use crate::army::SLOT_COUNT;
use crate::error::{Result, WarError};

/// Damage and experience rules for one attack pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassRules {
    /// Divisor applied to both the raw and the mitigated damage terms.
    pub divisor: i64,
    /// Experience awarded to the acting unit per soldier killed.
    pub experience_per_kill: u64,
}

impl PassRules {
    /// Rules for the pass of the side holding initiative.
    pub const FIRST: Self = Self {
        divisor: 1000,
        experience_per_kill: 5,
    };

    /// Rules for the pass of the side answering.
    pub const SECOND: Self = Self {
        divisor: 10_000,
        experience_per_kill: 10,
    };

    /// Soldiers killed by one strike.
    ///
    /// `raw = attacker_soldiers * force / divisor`,
    /// `mitigated = defender_soldiers * defense / divisor`, and the kill is
    /// `raw - mitigated` clamped to `0..=defender_soldiers`. Division truncates
    /// toward zero.
    #[must_use]
    pub fn kill(&self, attacker_soldiers: u32, force: i32, defender_soldiers: u32, defense: i32) -> u32 {
        let raw = i64::from(attacker_soldiers) * i64::from(force) / self.divisor;
        let mitigated = i64::from(defender_soldiers) * i64::from(defense) / self.divisor;
        let kill = raw.saturating_sub(mitigated).clamp(0, i64::from(defender_soldiers));
        // Clamped to a u32 range above.
        u32::try_from(kill).unwrap_or(defender_soldiers)
    }

    /// Experience earned for `kill` soldiers.
    #[must_use]
    pub fn experience(&self, kill: u32) -> u64 {
        u64::from(kill).saturating_mul(self.experience_per_kill)
    }
}

/// Configuration for a [`Battle`](crate::battle::Battle).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    /// Hard cap on rounds; reaching it without a destroyed headquarters is a draw.
    pub max_rounds: u32,
    /// Initiative draw range. An even draw gives the defender the first pass.
    pub initiative_range: u32,
    /// Target draws are taken from `0..target_draw_range` modulo the slot count.
    pub target_draw_range: u32,
    /// Rules for the side acting first in a round.
    pub first_pass: PassRules,
    /// Rules for the side acting second in a round.
    pub second_pass: PassRules,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            max_rounds: 10,
            initiative_range: 10,
            target_draw_range: 100,
            first_pass: PassRules::FIRST,
            second_pass: PassRules::SECOND,
        }
    }
}

impl BattleConfig {
    /// Parses a config from TOML. Missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`WarError::ConfigParse`] on malformed TOML and
    /// [`WarError::InvalidConfig`] if the parsed values fail [`validate`](Self::validate).
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that a battle run with this config is bounded.
    ///
    /// # Errors
    ///
    /// Returns [`WarError::InvalidConfig`] describing the first bad value.
    pub fn validate(&self) -> Result<()> {
        if self.max_rounds == 0 {
            return Err(WarError::InvalidConfig("max_rounds must be at least 1".into()));
        }
        if self.initiative_range == 0 {
            return Err(WarError::InvalidConfig(
                "initiative_range must be at least 1".into(),
            ));
        }
        // Below SLOT_COUNT some slots can never be drawn and sampling may spin.
        if (self.target_draw_range as usize) < SLOT_COUNT {
            return Err(WarError::InvalidConfig(format!(
                "target_draw_range must be at least {SLOT_COUNT}"
            )));
        }
        for (name, rules) in [("first_pass", self.first_pass), ("second_pass", self.second_pass)] {
            if rules.divisor <= 0 {
                return Err(WarError::InvalidConfig(format!(
                    "{name}.divisor must be positive"
                )));
            }
        }
        Ok(())
    }
}
