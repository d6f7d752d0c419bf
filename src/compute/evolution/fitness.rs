//! Fitness evaluation for candidate patterns.
//!
//! Fitness rewards patterns that cover many corpus symbols:
//!
//! ```text
//! fitness = occurrences × length × penalty^k
//! ```
//!
//! where `k` counts the table members that are a substring of the pattern or
//! contain it. Each related member applies the penalty again.

use std::collections::HashMap;
use std::sync::RwLock;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::compute::Corpus;
use crate::schema::Pattern;

/// Scores candidate patterns against a read-only corpus.
///
/// Occurrence counts do not depend on the pattern table, so they are cached
/// per pattern for the lifetime of the evaluator. The corpus must not be
/// masked while an evaluator borrows it, which the borrow enforces.
pub struct FitnessEvaluator<'a> {
    corpus: &'a Corpus,
    similarity_penalty: f64,
    counts: RwLock<HashMap<Pattern, usize>>,
}

impl<'a> FitnessEvaluator<'a> {
    /// Create a new fitness evaluator.
    pub fn new(corpus: &'a Corpus, similarity_penalty: f64) -> Self {
        Self {
            corpus,
            similarity_penalty,
            counts: RwLock::new(HashMap::new()),
        }
    }

    /// Overlap-permitting occurrence count of `pattern`.
    pub fn occurrences(&self, pattern: &Pattern) -> usize {
        if let Ok(counts) = self.counts.read()
            && let Some(&n) = counts.get(pattern)
        {
            return n;
        }

        let n = self.corpus.count_occurrences(pattern.symbols());
        if let Ok(mut counts) = self.counts.write() {
            counts.insert(pattern.clone(), n);
        }
        n
    }

    /// Fitness of `pattern` given the accepted `table`.
    pub fn fitness(&self, pattern: &Pattern, table: &[Pattern]) -> f64 {
        score(
            self.occurrences(pattern),
            pattern,
            table,
            self.similarity_penalty,
        )
    }

    /// Fitness of every pattern, in input order.
    #[cfg(feature = "parallel")]
    pub fn evaluate_all(&self, patterns: &[Pattern], table: &[Pattern]) -> Vec<f64> {
        patterns
            .par_iter()
            .map(|p| self.fitness(p, table))
            .collect()
    }

    /// Fitness of every pattern, in input order.
    #[cfg(not(feature = "parallel"))]
    pub fn evaluate_all(&self, patterns: &[Pattern], table: &[Pattern]) -> Vec<f64> {
        patterns.iter().map(|p| self.fitness(p, table)).collect()
    }

    /// Number of distinct patterns counted so far.
    pub fn cached(&self) -> usize {
        self.counts.read().map(|c| c.len()).unwrap_or(0)
    }
}

/// Uncached fitness of `pattern` over `corpus`, with the default penalty of
/// one half per related table member.
pub fn fitness(pattern: &Pattern, corpus: &Corpus, table: &[Pattern]) -> f64 {
    score(
        corpus.count_occurrences(pattern.symbols()),
        pattern,
        table,
        0.5,
    )
}

fn score(occurrences: usize, pattern: &Pattern, table: &[Pattern], penalty: f64) -> f64 {
    if occurrences == 0 {
        return 0.0;
    }

    let gain = (occurrences * pattern.len()) as f64;
    table
        .iter()
        .filter(|existing| pattern.is_related(existing))
        .fold(gain, |acc, _| acc * penalty)
}
