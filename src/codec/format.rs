//! Plain-text layouts of the alphabet, pattern table and dictionary stream.
//!
//! ```text
//! alphabet:    one symbol per line, extraction order
//! patterns:    one pattern per line, acceptance order
//! dictionary:  one line per table pattern, "<pattern> <d1> <d2> ...\n"
//!              (just "<pattern>\n" when it has no occurrences)
//! ```
//!
//! Patterns may contain spaces, so the dictionary is parsed against the
//! known pattern table rather than split on whitespace.

use std::fmt::Write as _;

use crate::compute::DictionaryEntry;
use crate::schema::{Alphabet, Pattern, PatternError};

/// Render the alphabet listing.
pub fn render_alphabet(alphabet: &Alphabet) -> String {
    let mut out = String::with_capacity(alphabet.len() * 2);
    for c in alphabet.symbols() {
        out.push(*c);
        out.push('\n');
    }
    out
}

/// Render the pattern table listing.
pub fn render_patterns(table: &[Pattern]) -> String {
    let mut out = String::new();
    for pattern in table {
        let _ = writeln!(out, "{pattern}");
    }
    out
}

/// Parse a pattern table listing.
pub fn parse_patterns(text: &str) -> Result<Vec<Pattern>, FormatError> {
    text.lines()
        .enumerate()
        .map(|(i, line)| {
            line.parse()
                .map_err(|source| FormatError::InvalidPattern { line: i + 1, source })
        })
        .collect()
}

/// Render one dictionary line, newline included.
pub fn render_entry(entry: &DictionaryEntry) -> String {
    let mut line = entry.pattern.to_string();
    for delta in &entry.deltas {
        let _ = write!(line, " {delta}");
    }
    line.push('\n');
    line
}

/// Render the whole dictionary stream.
pub fn render_dictionary(entries: &[DictionaryEntry]) -> String {
    entries.iter().map(render_entry).collect()
}

/// Parse a dictionary stream written for `table`.
pub fn parse_dictionary(text: &str, table: &[Pattern]) -> Result<Vec<DictionaryEntry>, FormatError> {
    let lines: Vec<&str> = text.lines().collect();
    if lines.len() != table.len() {
        return Err(FormatError::LineCount {
            expected: table.len(),
            found: lines.len(),
        });
    }

    lines
        .iter()
        .zip(table)
        .enumerate()
        .map(|(i, (line, pattern))| parse_entry(line, pattern, i + 1))
        .collect()
}

fn parse_entry(line: &str, pattern: &Pattern, line_no: usize) -> Result<DictionaryEntry, FormatError> {
    let expected = pattern.to_string();
    let rest = line
        .strip_prefix(expected.as_str())
        .ok_or_else(|| FormatError::PatternMismatch {
            line: line_no,
            expected: expected.clone(),
        })?;

    if rest.is_empty() {
        return Ok(DictionaryEntry {
            pattern: pattern.clone(),
            deltas: Vec::new(),
        });
    }

    let rest = rest.strip_prefix(' ').ok_or_else(|| FormatError::PatternMismatch {
        line: line_no,
        expected: expected.clone(),
    })?;

    let mut deltas = Vec::new();
    for token in rest.split(' ') {
        let delta: u64 = token.parse().map_err(|_| FormatError::InvalidDelta {
            line: line_no,
            token: token.to_string(),
        })?;
        // Offsets are strictly increasing, so only the first delta may be zero
        if delta == 0 && !deltas.is_empty() {
            return Err(FormatError::InvalidDelta {
                line: line_no,
                token: token.to_string(),
            });
        }
        deltas.push(delta);
    }

    Ok(DictionaryEntry {
        pattern: pattern.clone(),
        deltas,
    })
}

/// Errors reading back or reconstructing from dictionary artifacts.
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("Expected {expected} dictionary lines, found {found}")]
    LineCount { expected: usize, found: usize },
    #[error("Line {line} does not start with pattern {expected:?}")]
    PatternMismatch { line: usize, expected: String },
    #[error("Line {line} has invalid delta {token:?}")]
    InvalidDelta { line: usize, token: String },
    #[error("Line {line} holds an invalid pattern: {source}")]
    InvalidPattern {
        line: usize,
        #[source]
        source: PatternError,
    },
    #[error("Offset {offset} runs past the {total}-symbol corpus")]
    OffsetOutOfRange { offset: u64, total: usize },
    #[error("Span at offset {offset} overlaps an earlier pattern")]
    OverlappingSpan { offset: u64 },
    #[error("Residual length does not match the uncovered positions")]
    ResidualMismatch,
    #[error("Dictionary stream is not valid UTF-8")]
    InvalidUtf8,
    #[error("Reconstructed corpus differs from the input")]
    ReconstructionMismatch,
}
