use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{OBSERVATION_LEN, Observation, PolicyError, WumpusPolicy};
use crate::types::Direction;

/// On-disk form of a trained policy: one weight row and one bias per action, rows in
/// action-index order (NORTH, SOUTH, EAST, WEST).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PolicyWeights {
    pub weights: Vec<Vec<f32>>,
    pub bias: Vec<f32>,
}

/// Trained strategy: scores each action as `w · obs + b` and takes the best one.
/// Ties go to the lowest action index.
#[derive(Clone, Debug, PartialEq)]
pub struct LinearPolicy {
    weights: [[f32; OBSERVATION_LEN]; 4],
    bias: [f32; 4],
}

impl LinearPolicy {
    pub fn new(weights: [[f32; OBSERVATION_LEN]; 4], bias: [f32; 4]) -> Self {
        Self { weights, bias }
    }

    pub fn load(path: &Path) -> Result<Self, PolicyError> {
        let content = fs::read_to_string(path).map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => PolicyError::NotFound(path.to_path_buf()),
            _ => PolicyError::Io(err),
        })?;
        let raw: PolicyWeights = serde_json::from_str(&content)?;
        let policy = Self::try_from(raw)?;
        debug!(path = %path.display(), "loaded linear policy");
        Ok(policy)
    }

    pub fn scores(&self, observation: &Observation) -> [f32; 4] {
        let mut scores = self.bias;
        for (score, row) in scores.iter_mut().zip(&self.weights) {
            *score += row.iter().zip(observation.values()).map(|(w, x)| w * x).sum::<f32>();
        }
        scores
    }
}

impl TryFrom<PolicyWeights> for LinearPolicy {
    type Error = PolicyError;

    fn try_from(raw: PolicyWeights) -> Result<Self, Self::Error> {
        if raw.weights.len() != 4 || raw.bias.len() != 4 {
            return Err(PolicyError::Shape(format!(
                "expected 4 weight rows and 4 biases, got {} and {}",
                raw.weights.len(),
                raw.bias.len()
            )));
        }

        let mut weights = [[0.0; OBSERVATION_LEN]; 4];
        for (action, (dst, src)) in weights.iter_mut().zip(&raw.weights).enumerate() {
            if src.len() != OBSERVATION_LEN {
                return Err(PolicyError::Shape(format!(
                    "row {action} has {} weights, expected {OBSERVATION_LEN}",
                    src.len()
                )));
            }
            dst.copy_from_slice(src);
        }

        let mut bias = [0.0; 4];
        bias.copy_from_slice(&raw.bias);
        Ok(Self { weights, bias })
    }
}

impl WumpusPolicy for LinearPolicy {
    fn decide(&mut self, observation: &Observation) -> Direction {
        let scores = self.scores(observation);
        let mut best = 0;
        for (idx, &score) in scores.iter().enumerate().skip(1) {
            if score > scores[best] {
                best = idx;
            }
        }
        Direction::from_action_index(best).unwrap_or(Direction::North)
    }
}
