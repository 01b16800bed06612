//! TOML run configuration
//!
//! ```toml
//! algorithm = "policy_iteration"
//!
//! [solver]
//! discount = 0.9
//! num_policy_evaluation = 10
//!
//! [rewards]
//! white = -0.04
//!
//! [maze]
//! rows = ["   g", " w b", "    "]
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use maze_mdp_core::Algorithm;
use maze_mdp_env::{MazeSpec, RewardMapping};

/// Solver parameters; missing values fall back to the defaults
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SolverSection {
    pub discount: Option<f64>,
    pub max_error: Option<f64>,
    pub num_policy_evaluation: Option<usize>,
}

/// Which layout to solve
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MazeSection {
    /// Name of a registered preset
    pub preset: Option<String>,
    /// Explicit layout, one string per row
    pub rows: Option<Vec<String>>,
    /// Random maze parameters, used with `--gen-maze`
    pub generate: Option<MazeSpec>,
    /// Seed for the random maze
    pub seed: Option<u64>,
}

/// Output locations
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputSection {
    pub datadir: Option<PathBuf>,
    pub save_filename_prefix: Option<String>,
    pub json: Option<bool>,
}

/// Contents of a `--config` file
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub algorithm: Option<Algorithm>,
    #[serde(default)]
    pub solver: SolverSection,
    pub rewards: Option<RewardMapping>,
    #[serde(default)]
    pub maze: MazeSection,
    #[serde(default)]
    pub output: OutputSection,
}

impl FileConfig {
    /// Read and parse a configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        if config.maze.preset.is_some() && config.maze.rows.is_some() {
            anyhow::bail!(
                "{}: `maze.preset` and `maze.rows` are mutually exclusive",
                path.display()
            );
        }
        Ok(config)
    }
}
