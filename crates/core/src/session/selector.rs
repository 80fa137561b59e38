//! Choice between the trained Wumpus policy and the random fallback.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::policy::{LinearPolicy, PolicyError, UniformRandomPolicy, WumpusPolicy};

/// Starts on the random fallback and tries to load the trained model on every
/// [`PolicySelector::active`] call until one load succeeds. A model that appears after
/// startup is picked up without restarting; once loaded, the trained policy is kept.
pub enum PolicySelector {
    UsingFallback { fallback: UniformRandomPolicy, model_path: PathBuf },
    UsingTrained(LinearPolicy),
}

impl PolicySelector {
    pub fn new(model_path: PathBuf, fallback_seed: u64) -> Self {
        Self::UsingFallback { fallback: UniformRandomPolicy::new(fallback_seed), model_path }
    }

    pub fn is_trained(&self) -> bool {
        matches!(self, Self::UsingTrained(_))
    }

    pub fn active(&mut self) -> &mut dyn WumpusPolicy {
        let attempt = match self {
            Self::UsingFallback { model_path, .. } => Some(Self::attempt_load(model_path)),
            Self::UsingTrained(_) => None,
        };
        if let Some(Ok(trained)) = attempt {
            *self = Self::UsingTrained(trained);
        }

        match self {
            Self::UsingFallback { fallback, .. } => fallback as &mut dyn WumpusPolicy,
            Self::UsingTrained(trained) => trained,
        }
    }

    fn attempt_load(model_path: &Path) -> Result<LinearPolicy, PolicyError> {
        let loaded = LinearPolicy::load(model_path);
        match &loaded {
            Ok(_) => info!(path = %model_path.display(), "trained wumpus policy loaded"),
            Err(PolicyError::NotFound(_)) => {
                debug!(path = %model_path.display(), "no trained model yet, using random policy");
            }
            Err(err) => warn!(path = %model_path.display(), %err, "trained model unusable"),
        }
        loaded
    }
}
