//! The round engine.
//!
//! A round is two ordered passes. An initiative draw picks the side that acts
//! first; every live slot of that side strikes once in slot order, then every
//! live slot of the other side does the same. The passes use different
//! [`PassRules`]: with the default config the answering side deals a tenth of
//! the damage and earns twice the experience per kill.
//!
//! Each strike yields a [`Step`]. The round stops at the first
//! [`Step::Terminate`], which happens when the struck side has no live slot
//! left or when its headquarters has just been emptied.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::army::{HEADQUARTERS, SLOT_COUNT};
use crate::config::{BattleConfig, PassRules};
use crate::result::{BattleEvent, RoundRecord};

use super::stats::CombatSlot;
use super::targeting::select_target;
use super::{BattleState, Side};

/// Why a battle stopped before the round cap.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    /// `side` had no live slot left to strike.
    NoTarget {
        /// The exhausted side.
        side: Side,
    },
    /// `side` lost its headquarters.
    HeadquartersDestroyed {
        /// The side whose headquarters fell.
        side: Side,
    },
}

/// Result of one attack attempt.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Step {
    /// Keep resolving attacks.
    Continue,
    /// The battle is over.
    Terminate(EndReason),
}

/// Everything a single round produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundOutcome {
    /// Events in resolution order.
    pub record: RoundRecord,
    /// The side that took the first pass.
    pub initiative: Side,
    /// Set when this round ended the battle.
    pub end: Option<EndReason>,
}

/// Plays one round against `state`.
pub fn play_round<R: Rng + ?Sized>(
    state: &mut BattleState,
    config: &BattleConfig,
    rng: &mut R,
) -> RoundOutcome {
    let initiative = if rng.gen_range(0..config.initiative_range) % 2 == 0 {
        Side::Defense
    } else {
        Side::Attack
    };

    let mut record = RoundRecord::default();
    let mut end = run_pass(
        state,
        initiative,
        &config.first_pass,
        config.target_draw_range,
        rng,
        &mut record,
    );
    if end.is_none() {
        end = run_pass(
            state,
            initiative.opponent(),
            &config.second_pass,
            config.target_draw_range,
            rng,
            &mut record,
        );
    }

    RoundOutcome {
        record,
        initiative,
        end,
    }
}

fn run_pass<R: Rng + ?Sized>(
    state: &mut BattleState,
    acting: Side,
    rules: &PassRules,
    draw_range: u32,
    rng: &mut R,
    record: &mut RoundRecord,
) -> Option<EndReason> {
    for position in 0..SLOT_COUNT {
        match strike(state, acting, position, rules, draw_range, rng, record) {
            Step::Continue => {}
            Step::Terminate(reason) => return Some(reason),
        }
    }
    None
}

/// Resolves one strike by slot `position` of `acting`.
///
/// Empty and depleted slots do nothing. Losses are written to the struck
/// slot and to the struck side's strength counters together.
fn strike<R: Rng + ?Sized>(
    state: &mut BattleState,
    acting: Side,
    position: usize,
    rules: &PassRules,
    draw_range: u32,
    rng: &mut R,
    record: &mut RoundRecord,
) -> Step {
    let target_side = acting.opponent();
    let (attackers, defenders) = state.split_mut(acting);

    let Some(attacker) = attackers.slots[position].filter(CombatSlot::is_alive) else {
        return Step::Continue;
    };
    let Some(target) = select_target(&defenders.slots, draw_range, rng) else {
        return Step::Terminate(EndReason::NoTarget { side: target_side });
    };
    let Some(defender) = defenders.slots[target] else {
        return Step::Terminate(EndReason::NoTarget { side: target_side });
    };

    let kill = rules.kill(
        attacker.soldiers,
        attacker.stats.force,
        defender.soldiers,
        defender.stats.defense,
    );
    let remaining = defenders.apply_kill(target, kill);
    attackers.award(position, rules.experience(kill));
    record.push(BattleEvent::new(attacker.unit, defender.unit, kill));

    trace!(
        attacker = %attacker.unit,
        defender = %defender.unit,
        target,
        kill,
        remaining,
        "strike"
    );

    if target == HEADQUARTERS && remaining == 0 {
        Step::Terminate(EndReason::HeadquartersDestroyed { side: target_side })
    } else {
        Step::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::army::{Formation, FormationId, Unit, UnitId};
    use crate::bonus::NoBonuses;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn lone_headquarters(id: u64, force: i32, defense: i32, soldiers: u32) -> Formation {
        let mut army = Formation::new(FormationId::new(id));
        army.place(
            HEADQUARTERS,
            Unit::new(UnitId::new(id)).with_force_defense(force, defense),
            soldiers,
        )
        .unwrap();
        army
    }

    #[test]
    fn first_pass_uses_first_rules_and_second_pass_second_rules() {
        let config = BattleConfig::default();
        for seed in 0..20 {
            let attack = lone_headquarters(1, 100, 50, 1000);
            let defense = lone_headquarters(2, 100, 50, 1000);
            let mut state = BattleState::new(&attack, &defense, &NoBonuses);
            let mut rng = ChaCha8Rng::seed_from_u64(seed);

            let round = play_round(&mut state, &config, &mut rng);
            let events = round.record.events();
            assert_eq!(events.len(), 2);
            assert!(round.end.is_none());

            let first_actor = match round.initiative {
                Side::Attack => UnitId::new(1),
                Side::Defense => UnitId::new(2),
            };
            assert_eq!(events[0].attacker, first_actor);
            // 1000*100/1000 - 1000*50/1000
            assert_eq!(events[0].defender_loss, 50);
            // The struck side answers with 950 soldiers: 950*100/10000 - 1000*50/10000
            assert_eq!(events[1].defender_loss, 4);
        }
    }

    #[test]
    fn experience_follows_pass_rules() {
        let config = BattleConfig::default();
        let attack = lone_headquarters(1, 100, 50, 1000);
        let defense = lone_headquarters(2, 100, 50, 1000);
        let mut state = BattleState::new(&attack, &defense, &NoBonuses);
        let mut rng = ChaCha8Rng::seed_from_u64(5);

        let round = play_round(&mut state, &config, &mut rng);
        let first = state.side(round.initiative).experience()[HEADQUARTERS];
        let second = state.side(round.initiative.opponent()).experience()[HEADQUARTERS];
        assert_eq!(first, 50 * 5);
        assert_eq!(second, 4 * 10);
    }

    #[test]
    fn headquarters_kill_ends_round_immediately() {
        let config = BattleConfig::default();
        // Either side wipes the other's headquarters in one first-pass strike.
        let mut attack = lone_headquarters(1, 1000, 0, 1000);
        attack
            .place(1, Unit::new(UnitId::new(11)).with_force_defense(1000, 0), 1000)
            .unwrap();
        let mut defense = lone_headquarters(2, 1000, 0, 1000);
        defense
            .place(1, Unit::new(UnitId::new(21)).with_force_defense(1000, 0), 1000)
            .unwrap();

        for seed in 0..20 {
            let mut state = BattleState::new(&attack, &defense, &NoBonuses);
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let round = play_round(&mut state, &config, &mut rng);

            let target_side = round.initiative.opponent();
            let hq_unit = state.side(target_side).slots()[HEADQUARTERS].unwrap().unit;
            let events = round.record.events();
            let last = events.last().unwrap();
            match round.end {
                Some(EndReason::HeadquartersDestroyed { side }) => {
                    assert_eq!(side, target_side);
                    assert_eq!(last.defender, hq_unit);
                    assert_eq!(state.side(target_side).headquarters_soldiers(), 0);
                    // Nothing after the fatal strike.
                    assert_eq!(
                        events.iter().filter(|e| e.defender == hq_unit).count(),
                        1
                    );
                }
                Some(EndReason::NoTarget { .. }) => panic!("both slots cannot fall first"),
                None => panic!("a 1000-force strike on 1000 soldiers must empty a slot"),
            }
        }
    }

    #[test]
    fn no_live_target_ends_round() {
        let config = BattleConfig::default();
        let attack = lone_headquarters(1, 100, 0, 1000);
        let defense = lone_headquarters(2, 100, 0, 0);

        for seed in 0..10 {
            let mut state = BattleState::new(&attack, &defense, &NoBonuses);
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let round = play_round(&mut state, &config, &mut rng);

            assert!(round.record.is_empty());
            assert_eq!(
                round.end,
                Some(EndReason::NoTarget {
                    side: Side::Defense
                })
            );
        }
    }

    #[test]
    fn depleted_slots_do_not_act() {
        let config = BattleConfig::default();
        let mut attack = lone_headquarters(1, 10, 10, 1000);
        attack
            .place(3, Unit::new(UnitId::new(13)).with_force_defense(10_000, 0), 0)
            .unwrap();
        let defense = lone_headquarters(2, 10, 10, 1000);

        let mut state = BattleState::new(&attack, &defense, &NoBonuses);
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let round = play_round(&mut state, &config, &mut rng);

        assert!(round
            .record
            .events()
            .iter()
            .all(|e| e.attacker != UnitId::new(13)));
    }
}
