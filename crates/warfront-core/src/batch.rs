//! Parallel batch simulation.
//!
//! Independent battles share nothing, so a batch fans out over rayon's
//! global pool. Each pair gets its own generator derived from the master seed
//! and the pair's index, which keeps every result independent of thread
//! scheduling and of the other pairs in the batch.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use tracing::debug;

use crate::army::Formation;
use crate::battle::{Battle, BattleReport};
use crate::error::Result;

/// Derives the seed used for pair `index` of a batch.
#[must_use]
pub fn pair_seed(master_seed: u64, index: usize) -> u64 {
    let mut hasher = DefaultHasher::new();
    master_seed.hash(&mut hasher);
    (index as u64).hash(&mut hasher);
    hasher.finish()
}

impl Battle {
    /// Fights every `(attack, defense)` pair in parallel.
    ///
    /// Results are returned in input order. Pair `i` is fought with a
    /// [`ChaCha8Rng`] seeded from [`pair_seed`]`(master_seed, i)`, so
    /// re-running a single pair with [`Battle::simulate_seeded`] reproduces
    /// its entry exactly.
    #[must_use]
    pub fn simulate_batch(
        &self,
        pairs: &[(Formation, Formation)],
        master_seed: u64,
    ) -> Vec<Result<BattleReport>> {
        debug!(pairs = pairs.len(), master_seed, "simulating batch");
        pairs
            .par_iter()
            .enumerate()
            .map(|(index, (attack, defense))| {
                let mut rng = ChaCha8Rng::seed_from_u64(pair_seed(master_seed, index));
                self.simulate(attack, defense, &mut rng)
            })
            .collect()
    }
}
