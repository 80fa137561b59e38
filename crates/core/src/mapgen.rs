//! Board generation with safe-spawn distance preferences.

mod spawns;

use std::collections::BTreeSet;

use rand_chacha::ChaCha8Rng;

use crate::types::Pos;

use spawns::{GOLD_DISTANCES, PIT_MIN_DISTANCE, SpawnPool, WUMPUS_DISTANCES};

/// Where everything but the player starts. The player always spawns at [`Pos::ORIGIN`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpawnLayout {
    pub wumpus: Pos,
    pub gold: Pos,
    pub pits: BTreeSet<Pos>,
}

/// Places the Wumpus, then the gold, then `num_pits` pits, each drawn from the
/// tiles not yet taken. Callers validate `size` and `num_pits` first.
pub fn generate_layout(size: usize, num_pits: usize, rng: &mut ChaCha8Rng) -> SpawnLayout {
    let mut pool = SpawnPool::new(size);
    let wumpus = pool.pick_preferring(WUMPUS_DISTANCES, rng);
    let gold = pool.pick_preferring(GOLD_DISTANCES, rng);
    let pits = pool.sample_preferring(num_pits, PIT_MIN_DISTANCE, rng).into_iter().collect();
    SpawnLayout { wumpus, gold, pits }
}
