//! Symbols, patterns and the corpus alphabet.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One character unit of the corpus.
pub type Symbol = char;

/// Shortest allowed pattern.
pub const MIN_PATTERN_LEN: usize = 2;

/// Longest allowed pattern.
pub const MAX_PATTERN_LEN: usize = 4;

/// Line breaks separate records and never take part in a pattern.
#[inline]
pub fn is_symbol(c: char) -> bool {
    c != '\n' && c != '\r'
}

/// A short recurring substring sought by the evolutionary search.
///
/// Patterns are immutable once built and always hold between
/// [`MIN_PATTERN_LEN`] and [`MAX_PATTERN_LEN`] symbols.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Pattern {
    symbols: Vec<Symbol>,
}

impl Pattern {
    /// Build a pattern, checking its length and that it holds no line breaks.
    pub fn new(symbols: Vec<Symbol>) -> Result<Self, PatternError> {
        if !(MIN_PATTERN_LEN..=MAX_PATTERN_LEN).contains(&symbols.len()) {
            return Err(PatternError::InvalidLength { len: symbols.len() });
        }
        if let Some(&c) = symbols.iter().find(|&&c| !is_symbol(c)) {
            return Err(PatternError::LineBreak(c));
        }
        Ok(Self { symbols })
    }

    /// Build from symbols the genome operators already guarantee to be valid.
    pub(crate) fn from_valid(symbols: Vec<Symbol>) -> Self {
        debug_assert!((MIN_PATTERN_LEN..=MAX_PATTERN_LEN).contains(&symbols.len()));
        Self { symbols }
    }

    #[inline]
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Always false; a pattern holds at least [`MIN_PATTERN_LEN`] symbols.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// True if `other` appears as a contiguous run inside `self`.
    pub fn contains(&self, other: &Pattern) -> bool {
        other.len() <= self.len()
            && self
                .symbols
                .windows(other.len())
                .any(|w| w == other.symbols())
    }

    /// True if either pattern is a substring of the other.
    pub fn is_related(&self, other: &Pattern) -> bool {
        self.contains(other) || other.contains(self)
    }

    /// True if every symbol belongs to `alphabet`.
    pub fn is_over(&self, alphabet: &Alphabet) -> bool {
        self.symbols.iter().all(|&c| alphabet.contains(c))
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in &self.symbols {
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

impl FromStr for Pattern {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.chars().collect())
    }
}

impl TryFrom<String> for Pattern {
    type Error = PatternError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Pattern> for String {
    fn from(p: Pattern) -> Self {
        p.to_string()
    }
}

/// Pattern construction errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatternError {
    #[error(
        "Pattern length {len} outside [{min}, {max}]",
        min = MIN_PATTERN_LEN,
        max = MAX_PATTERN_LEN
    )]
    InvalidLength { len: usize },
    #[error("Pattern contains line break {0:?}")]
    LineBreak(char),
}

/// The distinct symbols of a corpus, in first-occurrence order.
///
/// Never empty: the only constructor refuses an empty symbol set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alphabet {
    symbols: Vec<Symbol>,
}

impl Alphabet {
    /// Collect the distinct symbols of `chars`, keeping the order in which
    /// they first appear and skipping line breaks.
    ///
    /// Returns `None` if no symbol is found.
    pub fn from_chars<I: IntoIterator<Item = char>>(chars: I) -> Option<Self> {
        let mut seen = HashSet::new();
        let symbols: Vec<Symbol> = chars
            .into_iter()
            .filter(|&c| is_symbol(c) && seen.insert(c))
            .collect();

        if symbols.is_empty() {
            None
        } else {
            Some(Self { symbols })
        }
    }

    #[inline]
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<Symbol> {
        self.symbols.get(index).copied()
    }

    pub fn contains(&self, c: Symbol) -> bool {
        self.symbols.contains(&c)
    }
}
