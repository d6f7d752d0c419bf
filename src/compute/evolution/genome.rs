//! Pattern operators for evolutionary search.
//!
//! Provides random generation, crossover, and mutation operations.

use rand::prelude::*;

use crate::schema::{Alphabet, MAX_PATTERN_LEN, MIN_PATTERN_LEN, Pattern, Symbol};

/// Random number generator wrapper for pattern operations.
///
/// The single source of randomness for a run; threaded explicitly through
/// every call that draws.
pub struct PatternRng {
    rng: StdRng,
}

impl PatternRng {
    /// Create from seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Uniform index in `0..len`.
    ///
    /// # Panics
    /// If `len` is zero.
    #[inline]
    pub fn index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }

    /// Uniform symbol from the alphabet.
    fn symbol(&mut self, alphabet: &Alphabet) -> Symbol {
        alphabet.symbols()[self.index(alphabet.len())]
    }

    /// Generate a random pattern of length 2..=4 over `alphabet`.
    pub fn random_pattern(&mut self, alphabet: &Alphabet) -> Pattern {
        let len = self.rng.gen_range(MIN_PATTERN_LEN..=MAX_PATTERN_LEN);
        let symbols = (0..len).map(|_| self.symbol(alphabet)).collect();
        Pattern::from_valid(symbols)
    }

    /// Single-point crossover.
    ///
    /// The cut is drawn from `1..=min(len1, len2)`. The first child takes the
    /// head of `parent1` and the tail of `parent2`, the second child the
    /// reverse, so each child keeps the length of the parent giving its tail.
    pub fn crossover(&mut self, parent1: &Pattern, parent2: &Pattern) -> (Pattern, Pattern) {
        let shortest = parent1.len().min(parent2.len());
        let cut = self.rng.gen_range(1..=shortest);
        (splice(parent1, parent2, cut), splice(parent2, parent1, cut))
    }

    /// Point mutation: one random locus takes a random alphabet symbol.
    pub fn mutate(&mut self, pattern: &Pattern, alphabet: &Alphabet) -> Pattern {
        let mut symbols = pattern.symbols().to_vec();
        let locus = self.index(symbols.len());
        symbols[locus] = self.symbol(alphabet);
        Pattern::from_valid(symbols)
    }
}

/// `head[..cut]` followed by `tail[cut..]`.
fn splice(head: &Pattern, tail: &Pattern, cut: usize) -> Pattern {
    let tail_start = cut.min(tail.len());
    let symbols = head.symbols()[..cut]
        .iter()
        .chain(&tail.symbols()[tail_start..])
        .copied()
        .collect();
    Pattern::from_valid(symbols)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alphabet() -> Alphabet {
        Alphabet::from_chars("ACDEFGHIKLMNPQRSTVWY".chars()).unwrap()
    }

    fn pat(s: &str) -> Pattern {
        s.parse().unwrap()
    }

    #[test]
    fn test_random_pattern_shape() {
        let mut rng = PatternRng::new(42);
        let alphabet = alphabet();

        let mut lengths = [0usize; MAX_PATTERN_LEN + 1];
        for _ in 0..500 {
            let p = rng.random_pattern(&alphabet);
            assert!((MIN_PATTERN_LEN..=MAX_PATTERN_LEN).contains(&p.len()));
            assert!(p.is_over(&alphabet));
            lengths[p.len()] += 1;
        }
        // Every allowed length shows up
        assert!(lengths[2..].iter().all(|&n| n > 0));
    }

    #[test]
    fn test_crossover_swaps_tails() {
        let mut rng = PatternRng::new(7);
        let p1 = pat("ABCD");
        let p2 = pat("WX");

        for _ in 0..50 {
            let (c1, c2) = rng.crossover(&p1, &p2);
            assert_eq!(c1.len(), p2.len());
            assert_eq!(c2.len(), p1.len());

            let cut = (1..=2)
                .find(|&cut| splice(&p1, &p2, cut) == c1)
                .expect("child matches some cut");
            assert_eq!(c2, splice(&p2, &p1, cut));
        }
    }

    #[test]
    fn test_splice() {
        assert_eq!(splice(&pat("ABCD"), &pat("WXYZ"), 1), pat("AXYZ"));
        assert_eq!(splice(&pat("ABCD"), &pat("WX"), 2), pat("AB"));
        assert_eq!(splice(&pat("WX"), &pat("ABCD"), 2), pat("WXCD"));
        assert_eq!(splice(&pat("ABC"), &pat("WXY"), 3), pat("ABC"));
    }

    #[test]
    fn test_mutation_changes_at_most_one_locus() {
        let mut rng = PatternRng::new(3);
        let alphabet = alphabet();
        let original = pat("MKVL");

        for _ in 0..100 {
            let mutated = rng.mutate(&original, &alphabet);
            assert_eq!(mutated.len(), original.len());
            assert!(mutated.is_over(&alphabet));

            let diffs = original
                .symbols()
                .iter()
                .zip(mutated.symbols())
                .filter(|(a, b)| a != b)
                .count();
            assert!(diffs <= 1);
        }
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let alphabet = alphabet();
        let mut a = PatternRng::new(99);
        let mut b = PatternRng::new(99);

        for _ in 0..20 {
            assert_eq!(a.random_pattern(&alphabet), b.random_pattern(&alphabet));
        }
    }
}
