//! The Wumpus decision boundary: a fixed-shape observation in, one direction out.
//! This module exists so trained and fallback strategies plug into turn resolution
//! through one capability. It does not own model selection or retry policy.

mod linear;
mod observation;
mod random;

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::types::Direction;

pub use linear::{LinearPolicy, PolicyWeights};
pub use observation::{OBSERVATION_LEN, Observation, ObservationInput};
pub use random::UniformRandomPolicy;

/// A strategy that steers the Wumpus.
///
/// Observation index order is part of the contract: trained weights are positional, so
/// implementations must not reorder it.
pub trait WumpusPolicy {
    fn build_observation(&self, input: &ObservationInput) -> Observation {
        Observation::from_input(input)
    }

    fn decide(&mut self, observation: &Observation) -> Direction;
}

#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("model file not found: {0}")]
    NotFound(PathBuf),
    #[error("failed to read model: {0}")]
    Io(#[from] io::Error),
    #[error("failed to parse model: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("model weights have the wrong shape: {0}")]
    Shape(String),
}
