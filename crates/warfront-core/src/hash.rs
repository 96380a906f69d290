//! Result hashing for replay verification.
//!
//! Two runs of the same battle from the same seed must produce the same
//! digest. Stored reports can be re-simulated and compared by digest alone.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::result::{RoundRecord, WarResult};

/// Computes a deterministic digest of a battle result.
///
/// The digest covers:
/// - the number of rounds and events per round
/// - every event tuple in resolution order
/// - the outcome code and end reason
#[must_use]
pub fn hash_war_result(result: &WarResult) -> u64 {
    let mut hasher = DefaultHasher::new();

    result.rounds().len().hash(&mut hasher);
    for (index, round) in result.rounds().iter().enumerate() {
        index.hash(&mut hasher);
        hash_round(round, &mut hasher);
    }

    result.outcome().code().hash(&mut hasher);
    result.ended_by().hash(&mut hasher);

    hasher.finish()
}

fn hash_round<H: Hasher>(round: &RoundRecord, hasher: &mut H) {
    round.len().hash(hasher);
    for event in round.events() {
        event.to_array().hash(hasher);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::army::UnitId;
    use crate::result::{BattleEvent, Outcome};

    fn result(kill: u32, outcome: Outcome) -> WarResult {
        let mut round = RoundRecord::default();
        round.push(BattleEvent::new(UnitId::new(1), UnitId::new(2), kill));
        WarResult::new(vec![round], outcome)
    }

    #[test]
    fn equal_results_hash_equal() {
        assert_eq!(
            hash_war_result(&result(75, Outcome::Draw)),
            hash_war_result(&result(75, Outcome::Draw))
        );
    }

    #[test]
    fn any_change_changes_hash() {
        let base = hash_war_result(&result(75, Outcome::Draw));
        assert_ne!(base, hash_war_result(&result(76, Outcome::Draw)));
        assert_ne!(base, hash_war_result(&result(75, Outcome::Victory)));
    }

    #[test]
    fn round_boundaries_are_hashed() {
        let mut joined = RoundRecord::default();
        joined.push(BattleEvent::new(UnitId::new(1), UnitId::new(2), 5));
        joined.push(BattleEvent::new(UnitId::new(2), UnitId::new(1), 5));

        let mut first = RoundRecord::default();
        first.push(BattleEvent::new(UnitId::new(1), UnitId::new(2), 5));
        let mut second = RoundRecord::default();
        second.push(BattleEvent::new(UnitId::new(2), UnitId::new(1), 5));

        assert_ne!(
            hash_war_result(&WarResult::new(vec![joined], Outcome::Draw)),
            hash_war_result(&WarResult::new(vec![first, second], Outcome::Draw))
        );
    }
}
