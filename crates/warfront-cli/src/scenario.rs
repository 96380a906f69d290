//! Scenario files.
//!
//! A scenario is a JSON document naming the arriving army, the formations it
//! will fight in order, the bonus tables in effect, and optionally the level
//! thresholds used to settle experience between battles.

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use warfront_core::bonus::BonusEntries;
use warfront_core::progression::ExperienceTable;
use warfront_core::{BonusTable, Formation};

/// Input to one engagement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    /// The arriving army.
    pub attacker: Formation,
    /// Formations stationed at the destination, fought in order.
    #[serde(default)]
    pub enemies: Vec<Formation>,
    /// Facility and faction bonuses.
    #[serde(default)]
    pub bonuses: BonusEntries,
    /// Cumulative experience thresholds. Levels stay untouched when absent.
    #[serde(default)]
    pub levels: Option<Vec<u64>>,
}

impl Scenario {
    /// Parses a scenario from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        let scenario: Self = serde_json::from_str(text).context("malformed scenario")?;
        scenario.check()?;
        Ok(scenario)
    }

    /// Reads and parses a scenario file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading scenario {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("loading scenario {}", path.display()))
    }

    /// Bonus lookups for the battle runner.
    pub fn bonus_table(&self) -> BonusTable {
        self.bonuses.clone().into()
    }

    /// Level curve, if the scenario defines one.
    pub fn level_table(&self) -> Option<ExperienceTable> {
        self.levels.clone().map(ExperienceTable::new)
    }

    fn check(&self) -> Result<()> {
        for formation in std::iter::once(&self.attacker).chain(&self.enemies) {
            ensure!(
                formation.is_fieldable(),
                "formation {} has no occupied slots",
                formation.id
            );
        }
        for enemy in &self.enemies {
            ensure!(
                enemy.id != self.attacker.id,
                "formation {} cannot fight itself",
                enemy.id
            );
        }
        Ok(())
    }
}
