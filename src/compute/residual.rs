//! Residual production and corpus reconstruction.

use super::{Corpus, DictionaryEntry};
use crate::codec::FormatError;
use crate::schema::Symbol;

/// Strip every masked cell from the final corpus, keeping the order of
/// everything else.
pub fn produce_residual(corpus: &Corpus) -> String {
    corpus.unmasked_text()
}

/// Rebuild the original corpus from its residual and dictionary entries.
///
/// Patterns are placed at their offsets in table order, then the remaining
/// cells are filled left to right from the residual.
pub fn reconstruct(residual: &str, entries: &[DictionaryEntry]) -> Result<String, FormatError> {
    let residual_len = residual.chars().count();
    let covered: usize = entries.iter().map(DictionaryEntry::covered_symbols).sum();
    let total = residual_len + covered;

    let mut cells: Vec<Option<Symbol>> = vec![None; total];

    for entry in entries {
        let symbols = entry.pattern.symbols();
        let mut offset = 0u64;
        for &delta in &entry.deltas {
            offset = offset
                .checked_add(delta)
                .ok_or(FormatError::OffsetOutOfRange { offset, total })?;
            let start = usize::try_from(offset)
                .ok()
                .filter(|&s| s.checked_add(symbols.len()).is_some_and(|end| end <= total))
                .ok_or(FormatError::OffsetOutOfRange { offset, total })?;

            let span = &mut cells[start..start + symbols.len()];
            if span.iter().any(Option::is_some) {
                return Err(FormatError::OverlappingSpan { offset });
            }
            for (cell, &c) in span.iter_mut().zip(symbols) {
                *cell = Some(c);
            }
        }
    }

    let mut fill = residual.chars();
    let text: String = cells
        .into_iter()
        .map(|cell| cell.or_else(|| fill.next()))
        .collect::<Option<String>>()
        .ok_or(FormatError::ResidualMismatch)?;

    if fill.next().is_some() {
        return Err(FormatError::ResidualMismatch);
    }
    Ok(text)
}
