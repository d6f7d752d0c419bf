//! Artifact writer for a finished run.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use log::info;

use crate::error::{MotifError, Result};
use crate::schema::RunReport;

/// Paths of every artifact produced for one input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub alphabet: PathBuf,
    pub patterns: PathBuf,
    pub dictionary: PathBuf,
    pub residual: PathBuf,
    pub report: PathBuf,
}

impl ArtifactPaths {
    /// Derive artifact names from the input file stem.
    ///
    /// `dictionary_ext` is the compressor's file extension.
    pub fn for_input(input: &Path, output_dir: Option<&Path>, dictionary_ext: &str) -> Self {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "corpus".to_string());
        let dir = output_dir
            .map(Path::to_path_buf)
            .or_else(|| input.parent().map(Path::to_path_buf))
            .unwrap_or_default();

        Self {
            alphabet: dir.join(format!("{stem}_alphabet.txt")),
            patterns: dir.join(format!("{stem}_patterns.txt")),
            dictionary: dir.join(format!("{stem}_dictionary.{dictionary_ext}")),
            residual: dir.join(format!("{stem}_residual.txt")),
            report: dir.join(format!("{stem}_report.json")),
        }
    }
}

/// Writes artifacts one at a time. Files already written stay on disk if a
/// later write fails.
pub struct ArtifactWriter {
    paths: ArtifactPaths,
}

impl ArtifactWriter {
    /// Create the writer, making the output directory if needed.
    pub fn new(paths: ArtifactPaths) -> Result<Self> {
        if let Some(dir) = paths.alphabet.parent()
            && !dir.as_os_str().is_empty()
        {
            fs::create_dir_all(dir).map_err(|e| MotifError::io(dir, e))?;
        }
        Ok(Self { paths })
    }

    pub fn paths(&self) -> &ArtifactPaths {
        &self.paths
    }

    pub fn write_alphabet(&self, listing: &str) -> Result<()> {
        write_file(&self.paths.alphabet, listing.as_bytes())
    }

    pub fn write_patterns(&self, listing: &str) -> Result<()> {
        write_file(&self.paths.patterns, listing.as_bytes())
    }

    pub fn write_dictionary(&self, compressed: &[u8]) -> Result<()> {
        write_file(&self.paths.dictionary, compressed)
    }

    pub fn write_residual(&self, residual: &str) -> Result<()> {
        write_file(&self.paths.residual, residual.as_bytes())
    }

    pub fn write_report(&self, report: &RunReport) -> Result<()> {
        let json = serde_json::to_string_pretty(report)
            .map_err(|e| MotifError::io(&self.paths.report, e.into()))?;
        write_file(&self.paths.report, json.as_bytes())
    }
}

fn write_file(path: &Path, data: &[u8]) -> Result<()> {
    let file = File::create(path).map_err(|e| MotifError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(data)
        .and_then(|_| writer.flush())
        .map_err(|e| MotifError::io(path, e))?;
    info!("Wrote {} ({} bytes)", path.display(), data.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_paths_from_stem() {
        let paths = ArtifactPaths::for_input(Path::new("data/PDBaa.txt"), None, "zst");
        assert_eq!(paths.alphabet, Path::new("data/PDBaa_alphabet.txt"));
        assert_eq!(paths.dictionary, Path::new("data/PDBaa_dictionary.zst"));

        let paths =
            ArtifactPaths::for_input(Path::new("data/PDBaa"), Some(Path::new("out")), "lz4");
        assert_eq!(paths.residual, Path::new("out/PDBaa_residual.txt"));
        assert_eq!(paths.dictionary, Path::new("out/PDBaa_dictionary.lz4"));
    }

    #[test]
    fn test_writer_creates_directory() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("nested").join("out");
        let paths = ArtifactPaths::for_input(Path::new("seq.txt"), Some(&out), "zst");

        let writer = ArtifactWriter::new(paths).unwrap();
        writer.write_alphabet("A\nB\n").unwrap();
        writer.write_dictionary(&[1, 2, 3]).unwrap();

        assert_eq!(fs::read_to_string(&writer.paths().alphabet).unwrap(), "A\nB\n");
        assert_eq!(fs::read(&writer.paths().dictionary).unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_write_failure_is_io_error() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, b"file, not dir").unwrap();

        let paths = ArtifactPaths {
            alphabet: blocker.join("a.txt"),
            patterns: blocker.join("p.txt"),
            dictionary: blocker.join("d.zst"),
            residual: blocker.join("r.txt"),
            report: blocker.join("r.json"),
        };
        assert!(matches!(
            ArtifactWriter::new(paths),
            Err(MotifError::Io { .. })
        ));
    }
}
