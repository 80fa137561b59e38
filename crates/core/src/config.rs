//! Game and session configuration, loadable from TOML.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::game::max_pits;
use crate::types::ConfigError;

pub const DEFAULT_GRID_SIZE: usize = 10;
pub const MIN_SESSION_GRID: usize = 4;
pub const MAX_SESSION_GRID: usize = 16;
pub const DEFAULT_MODEL_PATH: &str = "models/hunter_wumpus_model.json";
pub const MODEL_PATH_ENV: &str = "MODEL_PATH";

/// ```toml
/// grid_size = 8
/// num_pits = 3          # optional, derived from grid_size when absent
/// seed = 1234           # optional, a fresh seed per game when absent
/// model_path = "m.json" # optional, see `resolve_model_path`
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub grid_size: usize,
    pub num_pits: Option<usize>,
    pub seed: Option<u64>,
    pub model_path: Option<PathBuf>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self { grid_size: DEFAULT_GRID_SIZE, num_pits: None, seed: None, model_path: None }
    }
}

impl GameConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn pit_count(&self) -> usize {
        self.num_pits.unwrap_or_else(|| pit_count_for_grid(self.grid_size))
    }

    /// Sessions only run on boards between [`MIN_SESSION_GRID`] and [`MAX_SESSION_GRID`].
    pub fn validate_session_grid(&self) -> Result<(), ConfigError> {
        if !(MIN_SESSION_GRID..=MAX_SESSION_GRID).contains(&self.grid_size) {
            return Err(ConfigError::GridOutOfRange {
                size: self.grid_size,
                min: MIN_SESSION_GRID,
                max: MAX_SESSION_GRID,
            });
        }
        Ok(())
    }

    pub fn resolved_model_path(&self) -> PathBuf {
        resolve_model_path(self.model_path.as_deref(), env::var(MODEL_PATH_ENV).ok())
    }
}

/// A fifth of the side length, kept within 2..=8 and never more than the board holds.
pub fn pit_count_for_grid(grid_size: usize) -> usize {
    (grid_size / 5).clamp(2, 8).min(max_pits(grid_size))
}

/// Explicit path first, then a non-blank `MODEL_PATH` value, then [`DEFAULT_MODEL_PATH`].
pub fn resolve_model_path(explicit: Option<&Path>, env_value: Option<String>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    match env_value {
        Some(value) if !value.trim().is_empty() => PathBuf::from(value),
        _ => PathBuf::from(DEFAULT_MODEL_PATH),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_uses_defaults() {
        let config = GameConfig::from_toml_str("").unwrap();
        assert_eq!(config, GameConfig::default());
        assert_eq!(config.pit_count(), 2);
    }

    #[test]
    fn toml_overrides_fields() {
        let config = GameConfig::from_toml_str(
            "grid_size = 6\nnum_pits = 5\nseed = 77\nmodel_path = \"weights.json\"\n",
        )
        .unwrap();
        assert_eq!(config.grid_size, 6);
        assert_eq!(config.pit_count(), 5);
        assert_eq!(config.seed, Some(77));
        assert_eq!(config.model_path, Some(PathBuf::from("weights.json")));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        assert!(matches!(GameConfig::from_toml_str("grid_size = \"big\""), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn derived_pit_counts() {
        assert_eq!(pit_count_for_grid(4), 2);
        assert_eq!(pit_count_for_grid(10), 2);
        assert_eq!(pit_count_for_grid(15), 3);
        assert_eq!(pit_count_for_grid(16), 3);
        assert_eq!(pit_count_for_grid(60), 8);
        assert_eq!(pit_count_for_grid(2), 1);
    }

    #[test]
    fn session_grid_bounds() {
        let mut config = GameConfig::default();
        for size in [4, 10, 16] {
            config.grid_size = size;
            assert!(config.validate_session_grid().is_ok());
        }
        for size in [3, 17] {
            config.grid_size = size;
            assert!(matches!(
                config.validate_session_grid(),
                Err(ConfigError::GridOutOfRange { .. })
            ));
        }
    }

    #[test]
    fn model_path_resolution_order() {
        let explicit = Path::new("given.json");
        assert_eq!(
            resolve_model_path(Some(explicit), Some("env.json".to_string())),
            PathBuf::from("given.json")
        );
        assert_eq!(resolve_model_path(None, Some("env.json".to_string())), PathBuf::from("env.json"));
        assert_eq!(resolve_model_path(None, Some("   ".to_string())), PathBuf::from(DEFAULT_MODEL_PATH));
        assert_eq!(resolve_model_path(None, None), PathBuf::from(DEFAULT_MODEL_PATH));
    }

    #[test]
    fn load_reads_a_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hunter.toml");
        fs::write(&path, "grid_size = 8\nseed = 5\nmodel_path = \"pinned.json\"\n").unwrap();

        let config = GameConfig::load(&path).unwrap();
        assert_eq!(config.grid_size, 8);
        assert_eq!(config.seed, Some(5));
        assert_eq!(config.num_pits, None);
        assert_eq!(config.resolved_model_path(), PathBuf::from("pinned.json"));
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        assert!(matches!(GameConfig::load(&missing), Err(ConfigError::Io(_))));
    }
}
