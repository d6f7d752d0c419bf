//! Result types for discovery rounds and whole runs.

use serde::{Deserialize, Serialize};

use super::{CompressionBackend, Pattern};

/// A pattern as it entered the table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcceptedPattern {
    pub pattern: Pattern,
    /// Discovery round (0-based) that produced it.
    pub round: usize,
    /// Fitness against the table as it stood before this round.
    pub fitness: f64,
}

/// Progress reported after each discovery round.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundProgress {
    pub round: usize,
    pub table_len: usize,
    pub table_capacity: usize,
    /// Patterns appended this round (one or two).
    pub accepted: Vec<Pattern>,
    /// Best population fitness against the updated table.
    pub best_fitness: f64,
    /// Mean population fitness against the updated table.
    pub avg_fitness: f64,
}

/// Per-pattern summary in the run report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternReport {
    pub pattern: Pattern,
    pub round: usize,
    pub fitness: f64,
    /// Occurrences claimed by this pattern during encoding.
    pub occurrences: usize,
}

/// Summary of one complete run, written as JSON next to the artifacts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub alphabet_size: usize,
    pub population_size: usize,
    pub rounds: usize,
    pub random_seed: u64,
    pub patterns: Vec<PatternReport>,
    pub corpus_symbols: usize,
    pub masked_symbols: usize,
    pub residual_symbols: usize,
    pub dictionary_bytes: usize,
    pub compressed_bytes: usize,
    pub backend: CompressionBackend,
    pub elapsed_seconds: f64,
    /// Set when the run was verified by reconstruction.
    #[serde(default)]
    pub verified: Option<bool>,
}

impl RunReport {
    /// Compression ratio of the dictionary stream.
    pub fn dictionary_ratio(&self) -> f64 {
        if self.compressed_bytes == 0 {
            0.0
        } else {
            self.dictionary_bytes as f64 / self.compressed_bytes as f64
        }
    }

    /// Fraction of corpus symbols covered by accepted patterns.
    pub fn coverage(&self) -> f64 {
        if self.corpus_symbols == 0 {
            0.0
        } else {
            self.masked_symbols as f64 / self.corpus_symbols as f64
        }
    }
}
