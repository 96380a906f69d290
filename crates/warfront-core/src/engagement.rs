//! Sequential engagements.
//!
//! An army arriving at a contested position fights every formation stationed
//! there, one after the other, carrying its losses and experience from each
//! battle into the next. Every battle produces one [`WarReport`].

use rand::Rng;
use tracing::info;

use crate::army::Formation;
use crate::battle::{ensure_fieldable, Battle};
use crate::error::Result;
use crate::progression::{settle_formation, LevelCurve};
use crate::report::{empty_battle_result, FormationSnapshot, WarReport};
use crate::result::Outcome;

/// Reports from one engagement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Engagement {
    /// One report per battle, in the order the enemies were fought.
    pub reports: Vec<WarReport>,
    /// Outcome of the final battle. `None` when there was nobody to fight.
    pub last_outcome: Option<Outcome>,
}

impl Engagement {
    /// Number of battles fought.
    #[must_use]
    pub fn battles(&self) -> usize {
        self.reports.iter().filter(|r| r.is_contested()).count()
    }
}

/// Fights `attacker` against each of `enemies` in order.
///
/// After every battle the mutations are applied to both formations, and if a
/// `curve` is given every unit on both sides is settled against it. The
/// "after" snapshots are taken before settling, so reports show the raw
/// experience earned.
///
/// With no enemies, the engagement holds the single empty-battle report.
///
/// # Errors
///
/// Returns [`WarError::InvalidFormation`](crate::error::WarError::InvalidFormation)
/// before any battle is fought if the attacker or any enemy has no occupied
/// slot. Otherwise returns the first mutation error; battles already fought
/// keep their effects on the formations.
pub fn engage<R: Rng + ?Sized>(
    battle: &Battle,
    attacker: &mut Formation,
    enemies: &mut [Formation],
    curve: Option<&dyn LevelCurve>,
    rng: &mut R,
) -> Result<Engagement> {
    ensure_fieldable(attacker)?;
    for enemy in enemies.iter() {
        ensure_fieldable(enemy)?;
    }

    if enemies.is_empty() {
        return Ok(Engagement {
            reports: vec![empty_battle_result(attacker)],
            last_outcome: None,
        });
    }

    let mut reports = Vec::with_capacity(enemies.len());
    let mut last_outcome = None;

    for enemy in enemies.iter_mut() {
        let attack_before = FormationSnapshot::capture(attacker);
        let defense_before = FormationSnapshot::capture(enemy);

        let report = battle.simulate(attacker, enemy, rng)?;
        report.mutations.apply(attacker, enemy)?;

        reports.push(WarReport {
            attack_before,
            attack_after: FormationSnapshot::capture(attacker),
            defense_before: Some(defense_before),
            defense_after: Some(FormationSnapshot::capture(enemy)),
            result: report.result.clone(),
        });

        if let Some(curve) = curve {
            settle_formation(attacker, curve);
            settle_formation(enemy, curve);
        }
        last_outcome = Some(report.result.outcome());
    }

    info!(
        attacker = %attacker.id,
        battles = reports.len(),
        ?last_outcome,
        "engagement finished"
    );

    Ok(Engagement {
        reports,
        last_outcome,
    })
}
