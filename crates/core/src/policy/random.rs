use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{Rng, SeedableRng};

use super::{Observation, ObservationInput, WumpusPolicy};
use crate::types::Direction;

/// Fallback strategy: ignores the observation and picks a direction uniformly.
#[derive(Clone, Debug)]
pub struct UniformRandomPolicy {
    rng: ChaCha8Rng,
}

impl UniformRandomPolicy {
    pub fn new(seed: u64) -> Self {
        Self { rng: ChaCha8Rng::seed_from_u64(seed) }
    }
}

impl WumpusPolicy for UniformRandomPolicy {
    fn build_observation(&self, _input: &ObservationInput) -> Observation {
        Observation::zeros()
    }

    fn decide(&mut self, _observation: &Observation) -> Direction {
        let idx = (self.rng.next_u64() % Direction::ALL.len() as u64) as usize;
        Direction::ALL[idx]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_choices() {
        let mut a = UniformRandomPolicy::new(5);
        let mut b = UniformRandomPolicy::new(5);
        let obs = Observation::zeros();
        let left: Vec<_> = (0..32).map(|_| a.decide(&obs)).collect();
        let right: Vec<_> = (0..32).map(|_| b.decide(&obs)).collect();
        assert_eq!(left, right);
    }

    #[test]
    fn every_direction_eventually_chosen() {
        let mut policy = UniformRandomPolicy::new(77);
        let obs = Observation::zeros();
        let mut seen = [false; 4];
        for _ in 0..200 {
            seen[policy.decide(&obs).action_index()] = true;
        }
        assert!(seen.iter().all(|&hit| hit));
    }
}
