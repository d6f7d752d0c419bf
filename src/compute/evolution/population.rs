//! Candidate population management.

use std::collections::HashSet;

use super::fitness::FitnessEvaluator;
use super::genome::PatternRng;
use crate::schema::{Alphabet, Pattern, ReplacementPolicy};

/// Fixed-size bag of candidate patterns.
#[derive(Debug, Clone)]
pub struct Population {
    members: Vec<Pattern>,
    target_size: usize,
}

impl Population {
    /// Seed `size` random patterns over `alphabet`.
    pub fn initialize(alphabet: &Alphabet, size: usize, rng: &mut PatternRng) -> Self {
        let members = (0..size).map(|_| rng.random_pattern(alphabet)).collect();
        Self {
            members,
            target_size: size,
        }
    }

    /// Build from explicit members; the target size is their count.
    pub fn from_members(members: Vec<Pattern>) -> Self {
        let target_size = members.len();
        Self {
            members,
            target_size,
        }
    }

    #[inline]
    pub fn members(&self) -> &[Pattern] {
        &self.members
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    #[inline]
    pub fn target_size(&self) -> usize {
        self.target_size
    }

    /// Number of distinct pattern values.
    pub fn distinct_count(&self) -> usize {
        self.members.iter().collect::<HashSet<_>>().len()
    }

    /// True if at least two members differ.
    pub fn has_variety(&self) -> bool {
        self.members
            .split_first()
            .is_some_and(|(first, rest)| rest.iter().any(|m| m != first))
    }

    /// Admit the patterns accepted in a round.
    ///
    /// A victim makes room for `accepted1`. `accepted2` only enters if the
    /// population is still below its target size afterwards, which never
    /// happens for a population that started the round full.
    pub fn replace_after_round(
        &mut self,
        accepted1: Pattern,
        accepted2: Pattern,
        policy: ReplacementPolicy,
        rng: &mut PatternRng,
        evaluator: &FitnessEvaluator<'_>,
        table: &[Pattern],
    ) {
        self.evict(policy, rng, evaluator, table);
        self.members.push(accepted1);

        if self.members.len() < self.target_size {
            self.evict(policy, rng, evaluator, table);
            self.members.push(accepted2);
        }
    }

    fn evict(
        &mut self,
        policy: ReplacementPolicy,
        rng: &mut PatternRng,
        evaluator: &FitnessEvaluator<'_>,
        table: &[Pattern],
    ) {
        if self.members.is_empty() {
            return;
        }

        let victim = match policy {
            ReplacementPolicy::RandomVictim => rng.index(self.members.len()),
            ReplacementPolicy::WeakestVictim => {
                let scores = evaluator.evaluate_all(&self.members, table);
                scores
                    .iter()
                    .enumerate()
                    .fold((0, f64::INFINITY), |(best_idx, best), (i, &s)| {
                        if s < best { (i, s) } else { (best_idx, best) }
                    })
                    .0
            }
        };
        self.members.remove(victim);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::Corpus;

    fn pat(s: &str) -> Pattern {
        s.parse().unwrap()
    }

    #[test]
    fn test_initialize() {
        let alphabet = Alphabet::from_chars("ACGT".chars()).unwrap();
        let mut rng = PatternRng::new(42);
        let population = Population::initialize(&alphabet, alphabet.len(), &mut rng);

        assert_eq!(population.len(), 4);
        assert_eq!(population.target_size(), 4);
        assert!(population.members().iter().all(|p| p.is_over(&alphabet)));
    }

    #[test]
    fn test_full_population_admits_only_first() {
        let corpus = Corpus::new("ACGT");
        let evaluator = FitnessEvaluator::new(&corpus, 0.5);
        let mut rng = PatternRng::new(1);
        let mut population = Population::from_members(vec![pat("AC"), pat("CG"), pat("GT")]);

        population.replace_after_round(
            pat("TT"),
            pat("AA"),
            ReplacementPolicy::RandomVictim,
            &mut rng,
            &evaluator,
            &[],
        );

        assert_eq!(population.len(), 3);
        assert!(population.members().contains(&pat("TT")));
        assert!(!population.members().contains(&pat("AA")));
    }

    #[test]
    fn test_short_population_admits_both() {
        let corpus = Corpus::new("ACGT");
        let evaluator = FitnessEvaluator::new(&corpus, 0.5);
        let mut rng = PatternRng::new(1);
        let mut population = Population {
            members: vec![pat("AC"), pat("CG")],
            target_size: 4,
        };

        population.replace_after_round(
            pat("TT"),
            pat("AA"),
            ReplacementPolicy::RandomVictim,
            &mut rng,
            &evaluator,
            &[],
        );

        // Two evictions, two insertions; the second victim may be "TT"
        assert_eq!(population.len(), 2);
        assert_eq!(population.members().last(), Some(&pat("AA")));
    }

    #[test]
    fn test_weakest_victim() {
        let corpus = Corpus::new("ACACACGT");
        let evaluator = FitnessEvaluator::new(&corpus, 0.5);
        let mut rng = PatternRng::new(1);
        let mut population = Population::from_members(vec![pat("AC"), pat("TT"), pat("CA")]);

        population.replace_after_round(
            pat("GT"),
            pat("AA"),
            ReplacementPolicy::WeakestVictim,
            &mut rng,
            &evaluator,
            &[],
        );

        assert_eq!(population.members(), &[pat("AC"), pat("CA"), pat("GT")]);
    }

    #[test]
    fn test_variety() {
        assert!(!Population::from_members(vec![pat("AA"), pat("AA")]).has_variety());
        assert!(Population::from_members(vec![pat("AA"), pat("AB")]).has_variety());
        assert!(!Population::from_members(vec![]).has_variety());
        assert_eq!(
            Population::from_members(vec![pat("AA"), pat("AB"), pat("AA")]).distinct_count(),
            2
        );
    }
}
