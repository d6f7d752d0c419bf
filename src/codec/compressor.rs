//! Byte-stream compressors for the dictionary artifact.
//!
//! The encoder only relies on "bytes in, compressed bytes out" at a fixed
//! maximum-quality preset; entropy coding itself is left to the backend.

use std::io;

use log::debug;

use crate::schema::CompressionBackend;

/// A general-purpose compression stage.
pub trait Compressor {
    /// Backend name used in logs and reports.
    fn name(&self) -> &'static str;

    /// File extension of the compressed artifact.
    fn extension(&self) -> &'static str;

    fn compress(&self, data: &[u8]) -> Result<Vec<u8>, CompressorError>;

    fn decompress(&self, data: &[u8]) -> Result<Vec<u8>, CompressorError>;
}

/// Zstandard at its highest compression level.
#[derive(Debug, Clone, Copy)]
pub struct ZstdCompressor {
    level: i32,
}

impl ZstdCompressor {
    /// Maximum-compression preset.
    pub fn max() -> Self {
        Self {
            level: *zstd::compression_level_range().end(),
        }
    }

    #[inline]
    pub fn level(&self) -> i32 {
        self.level
    }
}

impl Default for ZstdCompressor {
    fn default() -> Self {
        Self::max()
    }
}

impl Compressor for ZstdCompressor {
    fn name(&self) -> &'static str {
        "zstd"
    }

    fn extension(&self) -> &'static str {
        "zst"
    }

    fn compress(&self, data: &[u8]) -> Result<Vec<u8>, CompressorError> {
        let out = zstd::stream::encode_all(data, self.level).map_err(|source| {
            CompressorError::Backend {
                backend: self.name(),
                source,
            }
        })?;
        debug!(
            "zstd level {} compressed {} -> {} bytes",
            self.level,
            data.len(),
            out.len()
        );
        Ok(out)
    }

    fn decompress(&self, data: &[u8]) -> Result<Vec<u8>, CompressorError> {
        zstd::stream::decode_all(data).map_err(|source| CompressorError::Backend {
            backend: self.name(),
            source,
        })
    }
}

/// LZ4 block format with a size prefix.
#[cfg(feature = "lz4")]
#[derive(Debug, Clone, Copy, Default)]
pub struct Lz4Compressor;

#[cfg(feature = "lz4")]
impl Compressor for Lz4Compressor {
    fn name(&self) -> &'static str {
        "lz4"
    }

    fn extension(&self) -> &'static str {
        "lz4"
    }

    fn compress(&self, data: &[u8]) -> Result<Vec<u8>, CompressorError> {
        Ok(lz4_flex::compress_prepend_size(data))
    }

    fn decompress(&self, data: &[u8]) -> Result<Vec<u8>, CompressorError> {
        lz4_flex::decompress_size_prepended(data).map_err(|e| CompressorError::Backend {
            backend: self.name(),
            source: io::Error::new(io::ErrorKind::InvalidData, e),
        })
    }
}

/// Instantiate the configured backend.
pub fn for_backend(backend: CompressionBackend) -> Result<Box<dyn Compressor>, CompressorError> {
    match backend {
        CompressionBackend::Zstd => Ok(Box::new(ZstdCompressor::max())),
        #[cfg(feature = "lz4")]
        CompressionBackend::Lz4 => Ok(Box::new(Lz4Compressor)),
        #[cfg(not(feature = "lz4"))]
        CompressionBackend::Lz4 => Err(CompressorError::Unavailable("lz4")),
    }
}

/// Compression stage errors.
#[derive(Debug, thiserror::Error)]
pub enum CompressorError {
    #[error("{backend} backend failed: {source}")]
    Backend {
        backend: &'static str,
        #[source]
        source: io::Error,
    },
    #[error("{0} backend not compiled in")]
    Unavailable(&'static str),
}
