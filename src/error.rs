//! Run-level error type.

use std::io;
use std::path::{Path, PathBuf};

use crate::codec::{CompressorError, FormatError};
use crate::schema::ConfigError;

/// Every way a run can fail. All kinds are terminal for the run.
#[derive(Debug, thiserror::Error)]
pub enum MotifError {
    #[error("Input corpus not found: {}", .0.display())]
    InputNotFound(PathBuf),
    #[error("Input corpus contains no symbols")]
    EmptyInput,
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Compression stage failed: {0}")]
    Compressor(#[from] CompressorError),
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("Malformed dictionary: {0}")]
    Format(#[from] FormatError),
}

impl MotifError {
    /// Attach `path` to an I/O failure.
    pub fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Process exit code reported for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InputNotFound(_) => 2,
            Self::EmptyInput => 3,
            Self::Io { .. } => 4,
            Self::Compressor(_) => 5,
            Self::Config(_) => 6,
            Self::Format(_) => 7,
        }
    }
}

pub type Result<T> = std::result::Result<T, MotifError>;
