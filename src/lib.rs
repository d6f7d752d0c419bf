//! Motif Dict - Evolutionary pattern discovery and dictionary encoding.
//!
//! This crate searches a text corpus for a small table of short recurring
//! patterns using a genetic algorithm, then rewrites the corpus as a
//! dictionary of delta-encoded occurrence offsets plus the residual text the
//! patterns do not cover. The dictionary stream goes through a general-purpose
//! compressor.
//!
//! # Architecture
//!
//! - `schema`: Patterns, alphabet, configuration and run reports
//! - `compute`: Corpus masking, occurrence encoding and the evolutionary search
//! - `codec`: Artifact layouts, compression backends and file output
//! - `pipeline`: The end-to-end run tying them together
//!
//! # Example
//!
//! ```rust
//! use motif_dict::{MotifConfig, Pipeline};
//!
//! let mut config = MotifConfig::default();
//! config.discovery.random_seed = Some(7);
//!
//! let pipeline = Pipeline::new(config).unwrap();
//! let text = "MKVLAAGMKVLQQMKVLAAG\nTTMKVLAAG";
//! let encoded = pipeline.encode_text(text).unwrap();
//!
//! pipeline.verify(text, &encoded).unwrap();
//! println!("Residual: {}", encoded.residual);
//! ```

pub mod codec;
pub mod compute;
pub mod error;
pub mod pipeline;
pub mod schema;

// Re-export commonly used types
pub use error::{MotifError, Result};
pub use pipeline::{EncodedCorpus, Pipeline, RunOutput};
pub use schema::{Alphabet, MotifConfig, Pattern, RunReport};
