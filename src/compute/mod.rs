//! Compute module - Pattern discovery and occurrence encoding.

mod alphabet;
mod corpus;
mod encoder;
pub mod evolution;
mod residual;

pub use alphabet::extract_alphabet;
pub use corpus::{Corpus, Matches};
pub use encoder::{DictionaryEntry, OccurrenceEncoder, delta_decode, delta_encode};
pub use residual::{produce_residual, reconstruct};
