//! Working corpus buffer with in-place masking.
//!
//! Each cell holds either a corpus character or the mask marker (`None`).
//! Masking never shifts positions, so offsets found before and after a
//! masking pass refer to the same cells.

use crate::schema::Symbol;

/// Mutable symbol buffer scanned by fitness evaluation and the encoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Corpus {
    cells: Vec<Option<Symbol>>,
}

impl Corpus {
    /// Create from normalized text. Line breaks are kept as cells; no pattern
    /// can match them.
    pub fn new(text: &str) -> Self {
        Self {
            cells: text.chars().map(Some).collect(),
        }
    }

    /// Total number of cells, masked or not.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of masked cells.
    pub fn masked_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_none()).count()
    }

    /// Leftmost start of `pattern` at or after `from`.
    pub fn find_from(&self, pattern: &[Symbol], from: usize) -> Option<usize> {
        let n = pattern.len();
        if n == 0 || n > self.cells.len() {
            return None;
        }
        let last = self.cells.len() - n;
        let first = pattern[0];

        let mut i = from;
        while i <= last {
            // Skip ahead to the next cell holding the first symbol
            let offset = self.cells[i..=last]
                .iter()
                .position(|&c| c == Some(first))?;
            i += offset;
            if self.matches_at(i, pattern) {
                return Some(i);
            }
            i += 1;
        }
        None
    }

    #[inline]
    fn matches_at(&self, start: usize, pattern: &[Symbol]) -> bool {
        self.cells[start..start + pattern.len()]
            .iter()
            .zip(pattern)
            .all(|(&cell, &p)| cell == Some(p))
    }

    /// Overlap-permitting match starts, leftmost first. Each search resumes
    /// one cell past the previous match start.
    pub fn matches<'a>(&'a self, pattern: &'a [Symbol]) -> Matches<'a> {
        Matches {
            corpus: self,
            pattern,
            next: 0,
        }
    }

    /// Count overlap-permitting occurrences of `pattern`.
    pub fn count_occurrences(&self, pattern: &[Symbol]) -> usize {
        self.matches(pattern).count()
    }

    /// Overwrite `len` cells starting at `start` with the mask marker.
    ///
    /// # Panics
    /// If the span runs past the end of the buffer.
    pub fn mask(&mut self, start: usize, len: usize) {
        self.cells[start..start + len].fill(None);
    }

    /// Unmasked cells in order, as text.
    pub fn unmasked_text(&self) -> String {
        self.cells.iter().flatten().collect()
    }
}

/// Iterator returned by [`Corpus::matches`].
pub struct Matches<'a> {
    corpus: &'a Corpus,
    pattern: &'a [Symbol],
    next: usize,
}

impl Iterator for Matches<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let idx = self.corpus.find_from(self.pattern, self.next)?;
        self.next = idx + 1;
        Some(idx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sym(s: &str) -> Vec<Symbol> {
        s.chars().collect()
    }

    #[test]
    fn test_find_from() {
        let corpus = Corpus::new("XABYAB");
        assert_eq!(corpus.find_from(&sym("AB"), 0), Some(1));
        assert_eq!(corpus.find_from(&sym("AB"), 2), Some(4));
        assert_eq!(corpus.find_from(&sym("AB"), 5), None);
        assert_eq!(corpus.find_from(&sym("ZZ"), 0), None);
        assert_eq!(corpus.find_from(&sym("XABYABQ"), 0), None);
    }

    #[test]
    fn test_overlapping_matches_are_counted() {
        let corpus = Corpus::new("AAAA");
        let starts: Vec<usize> = corpus.matches(&sym("AA")).collect();
        assert_eq!(starts, vec![0, 1, 2]);
        assert_eq!(corpus.count_occurrences(&sym("AAA")), 2);
    }

    #[test]
    fn test_line_breaks_never_match() {
        let corpus = Corpus::new("AB\nAB\r\nA");
        assert_eq!(corpus.count_occurrences(&sym("AB")), 2);
        assert_eq!(corpus.count_occurrences(&sym("BA")), 0);
    }

    #[test]
    fn test_masked_cells_never_match() {
        let mut corpus = Corpus::new("ABAB");
        corpus.mask(0, 2);
        assert_eq!(corpus.cells[1], None);
        assert_eq!(corpus.cells[2], Some('A'));
        assert_eq!(corpus.masked_count(), 2);

        let starts: Vec<usize> = corpus.matches(&sym("AB")).collect();
        assert_eq!(starts, vec![2]);
        assert_eq!(corpus.count_occurrences(&sym("BA")), 0);
        assert_eq!(corpus.unmasked_text(), "AB");
        assert_eq!(corpus.len(), 4);
    }
}
