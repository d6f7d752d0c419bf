//! Configuration types for motif discovery and artifact output.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Top-level run configuration, loadable from JSON.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MotifConfig {
    /// Evolutionary search parameters.
    #[serde(default)]
    pub discovery: DiscoveryConfig,
    /// Where and how artifacts are written.
    #[serde(default)]
    pub output: OutputConfig,
}

impl MotifConfig {
    /// Parse a JSON configuration. Missing fields take their defaults.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate every section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.discovery.validate()
    }
}

/// Parameters of the evolutionary pattern search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    /// Number of patterns accepted into the table.
    #[serde(default = "default_table_capacity")]
    pub table_capacity: usize,
    /// Crossover/mutation generations per discovery round.
    #[serde(default = "default_max_generations")]
    pub max_generations: usize,
    /// Candidates drawn per tournament.
    #[serde(default = "default_tournament_size")]
    pub tournament_size: usize,
    /// Fitness multiplier applied once per related table member.
    #[serde(default = "default_similarity_penalty")]
    pub similarity_penalty: f64,
    /// Redraws allowed when the second parent equals the first.
    #[serde(default = "default_parent_retry_limit")]
    pub parent_retry_limit: usize,
    /// Population size. `None` uses the alphabet size.
    #[serde(default)]
    pub population_size: Option<usize>,
    /// Which member makes room for a newly accepted pattern.
    #[serde(default)]
    pub replacement: ReplacementPolicy,
    /// Random seed for reproducibility.
    #[serde(default)]
    pub random_seed: Option<u64>,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            table_capacity: default_table_capacity(),
            max_generations: default_max_generations(),
            tournament_size: default_tournament_size(),
            similarity_penalty: default_similarity_penalty(),
            parent_retry_limit: default_parent_retry_limit(),
            population_size: None,
            replacement: ReplacementPolicy::default(),
            random_seed: None,
        }
    }
}

fn default_table_capacity() -> usize {
    4
}
fn default_max_generations() -> usize {
    10
}
fn default_tournament_size() -> usize {
    3
}
fn default_similarity_penalty() -> f64 {
    0.5
}
fn default_parent_retry_limit() -> usize {
    64
}

impl DiscoveryConfig {
    /// Population size for an alphabet of `alphabet_len` symbols.
    #[inline]
    pub fn population_size_for(&self, alphabet_len: usize) -> usize {
        self.population_size.unwrap_or(alphabet_len)
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.table_capacity == 0 {
            return Err(ConfigError::InvalidTableCapacity);
        }
        if self.tournament_size == 0 {
            return Err(ConfigError::InvalidTournamentSize);
        }
        if !(self.similarity_penalty > 0.0 && self.similarity_penalty <= 1.0) {
            return Err(ConfigError::InvalidSimilarityPenalty(
                self.similarity_penalty,
            ));
        }
        if self.population_size == Some(0) {
            return Err(ConfigError::InvalidPopulationSize);
        }
        Ok(())
    }
}

/// Victim choice when a newly accepted pattern enters the population.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplacementPolicy {
    /// Uniformly random member, regardless of fitness.
    #[default]
    RandomVictim,
    /// Lowest-fitness member (first one on ties).
    WeakestVictim,
}

/// Compression backend for the dictionary stream.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum CompressionBackend {
    /// Zstandard at its maximum level.
    #[default]
    Zstd,
    /// LZ4 block format (requires the `lz4` feature).
    Lz4,
}

/// Artifact output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory receiving every artifact. `None` writes next to the input.
    #[serde(default)]
    pub directory: Option<PathBuf>,
    /// Dictionary stream compressor.
    #[serde(default)]
    pub backend: CompressionBackend,
    /// Write the JSON run report.
    #[serde(default = "default_write_report")]
    pub write_report: bool,
    /// Decompress and rebuild the corpus after writing, failing on mismatch.
    #[serde(default)]
    pub verify: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: None,
            backend: CompressionBackend::default(),
            write_report: default_write_report(),
            verify: false,
        }
    }
}

fn default_write_report() -> bool {
    true
}

/// Configuration validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Pattern table capacity must be non-zero")]
    InvalidTableCapacity,
    #[error("Tournament size must be non-zero")]
    InvalidTournamentSize,
    #[error("Similarity penalty must lie in (0, 1], got {0}")]
    InvalidSimilarityPenalty(f64),
    #[error("Population size must be non-zero")]
    InvalidPopulationSize,
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}
