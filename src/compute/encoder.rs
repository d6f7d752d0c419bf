//! Occurrence search, masking and delta encoding.

use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::Corpus;
use crate::schema::Pattern;

/// One dictionary line: a pattern and its delta-encoded occurrence offsets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryEntry {
    pub pattern: Pattern,
    /// First value is an absolute offset, each next one the gap to the
    /// previous offset.
    pub deltas: Vec<u64>,
}

impl DictionaryEntry {
    /// Build from strictly increasing absolute offsets.
    pub fn from_offsets(pattern: Pattern, offsets: &[u64]) -> Self {
        Self {
            pattern,
            deltas: delta_encode(offsets),
        }
    }

    /// Absolute offsets recovered from the deltas.
    pub fn offsets(&self) -> Vec<u64> {
        delta_decode(&self.deltas)
    }

    #[inline]
    pub fn occurrences(&self) -> usize {
        self.deltas.len()
    }

    /// Corpus cells claimed by this entry.
    #[inline]
    pub fn covered_symbols(&self) -> usize {
        self.deltas.len() * self.pattern.len()
    }
}

/// Successive differences of `offsets`; the first value is kept absolute.
///
/// # Panics
/// If `offsets` is not strictly increasing (checked in debug builds; release
/// builds wrap).
pub fn delta_encode(offsets: &[u64]) -> Vec<u64> {
    debug_assert!(
        offsets.windows(2).all(|w| w[0] < w[1]),
        "offsets must be strictly increasing"
    );
    let mut prev = 0;
    offsets
        .iter()
        .map(|&offset| {
            let delta = offset.wrapping_sub(prev);
            prev = offset;
            delta
        })
        .collect()
}

/// Cumulative sum of `deltas`.
///
/// # Panics
/// If the sum overflows `u64` (debug builds). Untrusted streams go through
/// [`reconstruct`](super::reconstruct), which reports overflow as an error.
pub fn delta_decode(deltas: &[u64]) -> Vec<u64> {
    deltas
        .iter()
        .scan(0u64, |acc, &d| {
            *acc += d;
            Some(*acc)
        })
        .collect()
}

/// Claims pattern occurrences from a corpus in table order.
///
/// Holds the corpus exclusively for the whole pass: each pattern's scan sees
/// the masking left by every pattern encoded before it.
pub struct OccurrenceEncoder<'a> {
    corpus: &'a mut Corpus,
    masked: usize,
}

impl<'a> OccurrenceEncoder<'a> {
    pub fn new(corpus: &'a mut Corpus) -> Self {
        Self { corpus, masked: 0 }
    }

    /// Scan the current corpus for `pattern`, masking each match as soon as
    /// it is found and resuming one cell past its start.
    ///
    /// Returns the absolute match offsets, strictly increasing.
    pub fn claim(&mut self, pattern: &Pattern) -> Vec<u64> {
        let symbols = pattern.symbols();
        let len = symbols.len();
        let mut offsets = Vec::new();
        let mut from = 0;

        while let Some(idx) = self.corpus.find_from(symbols, from) {
            offsets.push(idx as u64);
            self.corpus.mask(idx, len);
            from = idx + 1;
        }

        self.masked += offsets.len() * len;
        offsets
    }

    /// Claim and delta-encode one pattern.
    pub fn encode(&mut self, pattern: &Pattern) -> DictionaryEntry {
        let offsets = self.claim(pattern);
        debug!("Pattern {} claimed {} occurrences", pattern, offsets.len());
        DictionaryEntry::from_offsets(pattern.clone(), &offsets)
    }

    /// Encode every table pattern in order.
    pub fn encode_table(&mut self, table: &[Pattern]) -> Vec<DictionaryEntry> {
        let entries: Vec<DictionaryEntry> = table.iter().map(|p| self.encode(p)).collect();
        info!(
            "Encoded {} patterns, {} of {} symbols masked",
            entries.len(),
            self.masked,
            self.corpus.len()
        );
        entries
    }

    /// Cells masked so far by this encoder.
    #[inline]
    pub fn masked(&self) -> usize {
        self.masked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pat(s: &str) -> Pattern {
        s.parse().unwrap()
    }

    #[test]
    fn test_alternating_pattern_fully_masked() {
        let mut corpus = Corpus::new("ABABAB");
        let entry = OccurrenceEncoder::new(&mut corpus).encode(&pat("AB"));

        assert_eq!(entry.offsets(), vec![0, 2, 4]);
        assert_eq!(entry.deltas, vec![0, 2, 2]);
        assert_eq!(corpus.masked_count(), 6);
        assert_eq!(corpus.unmasked_text(), "");
    }

    #[test]
    fn test_run_is_claimed_without_overlap() {
        let mut corpus = Corpus::new("AAAA");
        let entry = OccurrenceEncoder::new(&mut corpus).encode(&pat("AA"));

        assert_eq!(entry.offsets(), vec![0, 2]);
        assert_eq!(entry.deltas, vec![0, 2]);
        assert_eq!(corpus.unmasked_text(), "");
    }

    #[test]
    fn test_absent_pattern_leaves_corpus_unchanged() {
        let mut corpus = Corpus::new("XYZXYZ");
        let before = corpus.clone();
        let entry = OccurrenceEncoder::new(&mut corpus).encode(&pat("AB"));

        assert!(entry.deltas.is_empty());
        assert_eq!(corpus, before);
        assert_eq!(corpus.unmasked_text(), "XYZXYZ");
    }

    #[test]
    fn test_later_patterns_skip_masked_spans() {
        let mut corpus = Corpus::new("ABCABC");
        let mut encoder = OccurrenceEncoder::new(&mut corpus);
        let entries = encoder.encode_table(&[pat("BC"), pat("ABC"), pat("CA")]);

        assert_eq!(entries[0].offsets(), vec![1, 4]);
        assert!(entries[1].deltas.is_empty());
        assert!(entries[2].deltas.is_empty());
        assert_eq!(encoder.masked(), 4);
        assert_eq!(corpus.unmasked_text(), "AA");
    }

    #[test]
    fn test_repeated_pattern_finds_nothing_second_time() {
        let mut corpus = Corpus::new("GATTACA");
        let entries = OccurrenceEncoder::new(&mut corpus).encode_table(&[pat("TA"), pat("TA")]);

        assert_eq!(entries[0].offsets(), vec![3]);
        assert!(entries[1].deltas.is_empty());
    }

    #[test]
    fn test_offsets_keep_absolute_positions() {
        let mut corpus = Corpus::new("xxAB\nyyAB");
        let mut encoder = OccurrenceEncoder::new(&mut corpus);
        let entries = encoder.encode_table(&[pat("yy"), pat("AB")]);

        assert_eq!(entries[0].offsets(), vec![5]);
        assert_eq!(entries[1].offsets(), vec![2, 7]);
        assert_eq!(entries[1].deltas, vec![2, 5]);
        assert_eq!(entries[1].covered_symbols(), 4);
    }

    #[test]
    fn test_delta_roundtrip() {
        let offsets = vec![3, 4, 10, 250, 251];
        let deltas = delta_encode(&offsets);
        assert_eq!(deltas, vec![3, 1, 6, 240, 1]);
        assert_eq!(delta_decode(&deltas), offsets);

        assert!(delta_encode(&[]).is_empty());
        assert!(delta_decode(&[]).is_empty());
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "strictly increasing")]
    fn test_delta_encode_rejects_unsorted_offsets() {
        delta_encode(&[5, 3]);
    }
}
