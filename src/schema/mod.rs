//! Schema module - Configuration, pattern and report types.

mod config;
mod pattern;
mod report;

pub use config::*;
pub use pattern::*;
pub use report::*;
