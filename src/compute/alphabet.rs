//! Alphabet extraction.

use log::info;

use crate::error::{MotifError, Result};
use crate::schema::Alphabet;

/// Scan `text` once and collect its distinct symbols in first-occurrence
/// order, skipping `\n` and `\r`.
///
/// Fails with [`MotifError::EmptyInput`] if no symbol is found.
pub fn extract_alphabet(text: &str) -> Result<Alphabet> {
    let alphabet = Alphabet::from_chars(text.chars()).ok_or(MotifError::EmptyInput)?;
    info!("Extracted alphabet of {} symbols", alphabet.len());
    Ok(alphabet)
}
