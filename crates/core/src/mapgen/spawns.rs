//! Candidate pool and distance-relaxing selection for spawn placement.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::Rng;

use crate::types::Pos;

/// Minimum Manhattan distances from the origin, strictest first.
pub(super) const WUMPUS_DISTANCES: &[u32] = &[3, 2];
pub(super) const GOLD_DISTANCES: &[u32] = &[2, 1];
pub(super) const PIT_MIN_DISTANCE: u32 = 1;

/// Every board tile except the origin, in row-major order, minus tiles already taken.
pub(super) struct SpawnPool {
    candidates: Vec<Pos>,
}

impl SpawnPool {
    pub(super) fn new(size: usize) -> Self {
        let side = size as i32;
        let candidates = (0..side)
            .flat_map(|y| (0..side).map(move |x| Pos { x, y }))
            .filter(|&pos| pos != Pos::ORIGIN)
            .collect();
        Self { candidates }
    }

    /// Picks one tile at the first distance threshold that has any candidate,
    /// falling back to any remaining tile. Callers guarantee the pool is not empty.
    pub(super) fn pick_preferring(&mut self, distances: &[u32], rng: &mut ChaCha8Rng) -> Pos {
        let eligible = distances
            .iter()
            .map(|&min_distance| self.indices_at_least(min_distance))
            .find(|indices| !indices.is_empty())
            .unwrap_or_else(|| (0..self.candidates.len()).collect());
        let chosen = eligible[random_index(rng, eligible.len())];
        self.candidates.swap_remove(chosen)
    }

    /// Samples `count` distinct tiles from those at least `min_distance` away,
    /// or from the whole pool when that subset is too small.
    pub(super) fn sample_preferring(
        &mut self,
        count: usize,
        min_distance: u32,
        rng: &mut ChaCha8Rng,
    ) -> Vec<Pos> {
        let preferred = self.indices_at_least(min_distance);
        let mut eligible = if preferred.len() >= count {
            preferred
        } else {
            (0..self.candidates.len()).collect()
        };

        // Partial Fisher-Yates over the eligible indices.
        let take = count.min(eligible.len());
        for slot in 0..take {
            let pick = slot + random_index(rng, eligible.len() - slot);
            eligible.swap(slot, pick);
        }
        let mut chosen: Vec<usize> = eligible[..take].to_vec();
        let picked = chosen.iter().map(|&idx| self.candidates[idx]).collect();

        chosen.sort_unstable_by(|a, b| b.cmp(a));
        for idx in chosen {
            self.candidates.swap_remove(idx);
        }
        picked
    }

    fn indices_at_least(&self, min_distance: u32) -> Vec<usize> {
        self.candidates
            .iter()
            .enumerate()
            .filter(|(_, pos)| pos.manhattan(Pos::ORIGIN) >= min_distance)
            .map(|(idx, _)| idx)
            .collect()
    }
}

fn random_index(rng: &mut ChaCha8Rng, len: usize) -> usize {
    debug_assert!(len > 0);
    (rng.next_u64() % len as u64) as usize
}

#[cfg(test)]
mod tests {
    use rand_chacha::rand_core::SeedableRng;

    use super::*;

    #[test]
    fn pool_excludes_origin() {
        let pool = SpawnPool::new(3);
        assert_eq!(pool.candidates.len(), 8);
        assert!(!pool.candidates.contains(&Pos::ORIGIN));
    }

    #[test]
    fn pick_honours_strictest_threshold_when_available() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..50 {
            let mut pool = SpawnPool::new(5);
            let pos = pool.pick_preferring(WUMPUS_DISTANCES, &mut rng);
            assert!(pos.manhattan(Pos::ORIGIN) >= 3);
        }
    }

    #[test]
    fn pick_relaxes_when_nothing_is_far_enough() {
        // On a 2x2 board the farthest tile is at distance 2.
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut pool = SpawnPool::new(2);
        let pos = pool.pick_preferring(WUMPUS_DISTANCES, &mut rng);
        assert_eq!(pos, Pos::new(1, 1));

        let next = pool.pick_preferring(WUMPUS_DISTANCES, &mut rng);
        assert_eq!(next.manhattan(Pos::ORIGIN), 1);
        assert_eq!(pool.candidates.len(), 1);
    }

    #[test]
    fn sample_removes_picked_tiles_from_pool() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut pool = SpawnPool::new(4);
        let picked = pool.sample_preferring(5, PIT_MIN_DISTANCE, &mut rng);
        assert_eq!(picked.len(), 5);
        assert_eq!(pool.candidates.len(), 15 - 5);
        for pos in &picked {
            assert!(!pool.candidates.contains(pos));
        }
    }
}
