//! Artifact encoding: text layouts, the compression stage and file output.
//!
//! # Artifacts
//!
//! ```text
//! <stem>_alphabet.txt        one symbol per line
//! <stem>_patterns.txt        one pattern per line, acceptance order
//! <stem>_dictionary.zst      compressed "<pattern> <d1> <d2> ..." lines
//! <stem>_residual.txt        corpus with every claimed span removed
//! <stem>_report.json         run summary
//! ```

mod compressor;
mod format;
mod writer;

#[cfg(feature = "lz4")]
pub use compressor::Lz4Compressor;
pub use compressor::{Compressor, CompressorError, ZstdCompressor, for_backend};
pub use format::{
    FormatError, parse_dictionary, parse_patterns, render_alphabet, render_dictionary,
    render_entry, render_patterns,
};
pub use writer::{ArtifactPaths, ArtifactWriter};
