//! End-to-end battle tests.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::army::{FactionId, LocationId, HEADQUARTERS};
use crate::bonus::{BonusTable, LocationBonus};
use crate::combat::{EndReason, Side};
use crate::config::BattleConfig;
use crate::battle::Battle;
use crate::engagement::engage;
use crate::progression::ExperienceTable;
use crate::report::empty_battle_result;
use crate::result::Outcome;

use super::helpers::{
    build_formation, default_battle, full_formation, headquarters_soldiers, lone_headquarters,
    unit_id, SlotSpec,
};

// =============================================================================
// Damage
// =============================================================================

mod damage {
    use super::*;

    #[test]
    fn opening_strike_kills_seventy_five() {
        let battle = default_battle();
        // A harmless defender keeps the attacker at full strength.
        let attack = lone_headquarters(1, 100, 0, 1000);
        let defense = lone_headquarters(2, 0, 50, 500);
        let striker = unit_id(1, HEADQUARTERS);

        for seed in 0..20 {
            let report = battle.simulate_seeded(&attack, &defense, seed).unwrap();
            let first_round = &report.result.rounds()[0];
            let strike = first_round
                .events()
                .iter()
                .find(|e| e.attacker == striker)
                .unwrap();

            match report.initiative[0] {
                // 1000*100/1000 - 500*50/1000
                Side::Attack => assert_eq!(strike.defender_loss, 75),
                // 1000*100/10000 - 500*50/10000
                Side::Defense => assert_eq!(strike.defender_loss, 8),
            }
            assert_eq!(strike.attacker_loss, 0);
        }
    }

    #[test]
    fn headquarters_at_zero_ends_first_round() {
        let battle = default_battle();
        let attack = lone_headquarters(1, 100, 50, 1000);
        let defense = lone_headquarters(2, 100, 50, 0);

        for seed in 0..20 {
            let report = battle.simulate_seeded(&attack, &defense, seed).unwrap();
            assert_eq!(report.result.rounds().len(), 1);
            assert!(report.result.rounds()[0].is_empty());
            assert_eq!(
                report.result.ended_by(),
                Some(EndReason::NoTarget {
                    side: Side::Defense
                })
            );
            assert_eq!(report.result.outcome(), Outcome::Victory);
        }
    }

    #[test]
    fn evenly_matched_walls_draw() {
        let battle = default_battle();
        // Defense cancels force entirely, so nobody ever dies.
        let attack = full_formation(1, 50, 50, 1000);
        let defense = full_formation(2, 50, 50, 1000);

        let report = battle.simulate_seeded(&attack, &defense, 31).unwrap();
        assert_eq!(report.result.rounds().len(), 10);
        assert_eq!(report.result.outcome(), Outcome::Draw);
        assert_eq!(report.result.outcome().code(), 1);
        assert!(report.result.events().all(|e| e.defender_loss == 0));
    }

    #[test]
    fn faction_bonus_uses_each_formations_own_faction() {
        let bonuses = BonusTable::new().with_faction(FactionId::new(7), 1000);
        let battle = Battle::new(BattleConfig::default())
            .unwrap()
            .with_bonuses(bonuses);
        let attack = lone_headquarters(1, 0, 0, 1000).in_faction(FactionId::new(7));
        let defense = lone_headquarters(2, 0, 0, 1000).in_faction(FactionId::new(8));

        let report = battle.simulate_seeded(&attack, &defense, 6).unwrap();
        // Only the attacker is boosted, so only the defender bleeds.
        assert!(report.mutations.defense.total_losses() > 0);
        assert_eq!(report.mutations.attack.total_losses(), 0);
    }

    #[test]
    fn location_bonus_applies_to_defense_too() {
        let bonuses = BonusTable::new().with_location(
            LocationId::new(3),
            LocationBonus {
                defense: 10_000,
                ..LocationBonus::default()
            },
        );
        let battle = Battle::new(BattleConfig::default())
            .unwrap()
            .with_bonuses(bonuses);
        let attack = lone_headquarters(1, 500, 0, 1000);
        let defense = lone_headquarters(2, 0, 0, 1000).at_location(LocationId::new(3));

        let report = battle.simulate_seeded(&attack, &defense, 6).unwrap();
        assert_eq!(report.mutations.defense.total_losses(), 0);
        assert_eq!(report.result.outcome(), Outcome::Draw);
    }
}

// =============================================================================
// Outcomes
// =============================================================================

mod outcomes {
    use super::*;

    #[test]
    fn outcome_matches_applied_headquarters() {
        let battle = default_battle();
        for seed in 0..30 {
            let mut attack = full_formation(1, 300, 40, 600);
            let mut defense = full_formation(2, 280, 50, 650);
            let report = battle.simulate_seeded(&attack, &defense, seed).unwrap();
            report.mutations.apply(&mut attack, &mut defense).unwrap();

            assert_eq!(
                report.result.outcome(),
                Outcome::classify(
                    headquarters_soldiers(&attack),
                    headquarters_soldiers(&defense)
                )
            );
        }
    }

    #[test]
    fn missing_headquarters_is_an_immediate_loss() {
        let battle = default_battle();
        let attack = build_formation(1, &[None, Some(SlotSpec::new(5000, 0, 1000))]);
        let defense = lone_headquarters(2, 1, 1, 10);

        let report = battle.simulate_seeded(&attack, &defense, 4).unwrap();
        assert_eq!(report.result.outcome(), Outcome::Defeat);
    }
}

// =============================================================================
// Engagements
// =============================================================================

mod engagements {
    use super::*;

    #[test]
    fn empty_position_reports_without_fighting() {
        let attacker = full_formation(1, 100, 40, 500);
        let report = empty_battle_result(&attacker);

        assert!(report.result.rounds().is_empty());
        assert_eq!(report.result.outcome().code(), 0);
        assert!(report.defense_before.is_none());
        assert_eq!(report.attack_before.soldiers, attacker.soldiers);
    }

    #[test]
    fn attacker_fights_every_enemy_and_levels_up() {
        let battle = default_battle();
        let mut attacker = full_formation(1, 400, 80, 2000);
        let mut enemies = vec![
            lone_headquarters(2, 10, 10, 300),
            lone_headquarters(3, 10, 10, 300),
            lone_headquarters(4, 10, 10, 300),
        ];
        let table = ExperienceTable::new(vec![100, 1000, 10_000]);
        let mut rng = ChaCha8Rng::seed_from_u64(17);

        let engagement = engage(
            &battle,
            &mut attacker,
            &mut enemies,
            Some(&table),
            &mut rng,
        )
        .unwrap();

        assert_eq!(engagement.battles(), 3);
        assert_eq!(engagement.last_outcome, Some(Outcome::Victory));
        assert!(engagement
            .reports
            .iter()
            .all(|r| r.result.outcome() == Outcome::Victory));
        assert!(enemies.iter().all(|e| headquarters_soldiers(e) == 0));
        assert!(attacker.occupied().any(|(_, unit)| unit.level > 1));
    }
}
