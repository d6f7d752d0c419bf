//! End-to-end run: discovery, occurrence encoding, residual and artifacts.

use std::borrow::Cow;
use std::fs;
use std::io;
use std::path::Path;
use std::time::Instant;

use log::info;

use crate::codec::{
    ArtifactPaths, ArtifactWriter, Compressor, FormatError, for_backend, parse_dictionary,
    render_alphabet, render_dictionary, render_patterns,
};
use crate::compute::evolution::{DiscoveryResult, PatternRng, discover};
use crate::compute::{
    Corpus, DictionaryEntry, OccurrenceEncoder, extract_alphabet, produce_residual, reconstruct,
};
use crate::error::{MotifError, Result};
use crate::schema::{Alphabet, MotifConfig, PatternReport, RunReport};

/// Convert `\r\n` line endings to `\n`.
pub fn normalize_newlines(text: &str) -> Cow<'_, str> {
    if text.contains("\r\n") {
        Cow::Owned(text.replace("\r\n", "\n"))
    } else {
        Cow::Borrowed(text)
    }
}

/// Everything a run produces, before any of it is written.
#[derive(Debug, Clone)]
pub struct EncodedCorpus {
    pub alphabet: Alphabet,
    pub discovery: DiscoveryResult,
    pub entries: Vec<DictionaryEntry>,
    /// Uncompressed dictionary stream.
    pub dictionary: String,
    /// Dictionary stream after the compression stage.
    pub compressed: Vec<u8>,
    pub residual: String,
    pub report: RunReport,
}

/// Artifacts and summary of a file run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub report: RunReport,
    pub paths: ArtifactPaths,
}

/// Configured run over one corpus.
pub struct Pipeline {
    config: MotifConfig,
    compressor: Box<dyn Compressor>,
}

impl Pipeline {
    /// Validate the configuration and set up the compression backend.
    pub fn new(config: MotifConfig) -> Result<Self> {
        config.validate()?;
        let compressor = for_backend(config.output.backend)?;
        Ok(Self { config, compressor })
    }

    pub fn config(&self) -> &MotifConfig {
        &self.config
    }

    pub fn compressor(&self) -> &dyn Compressor {
        self.compressor.as_ref()
    }

    /// Discover patterns in `text`, claim their occurrences and compress the
    /// dictionary stream.
    pub fn encode_text(&self, text: &str) -> Result<EncodedCorpus> {
        let start = Instant::now();
        let text = normalize_newlines(text);
        let alphabet = extract_alphabet(&text)?;

        let seed = self
            .config
            .discovery
            .random_seed
            .unwrap_or_else(rand::random);
        let mut rng = PatternRng::new(seed);
        info!("Discovery seed: {}", seed);

        let mut corpus = Corpus::new(&text);
        let discovery = discover(&self.config.discovery, &alphabet, &corpus, &mut rng);

        let mut encoder = OccurrenceEncoder::new(&mut corpus);
        let entries = encoder.encode_table(&discovery.table);
        let masked_symbols = encoder.masked();

        let residual = produce_residual(&corpus);
        let dictionary = render_dictionary(&entries);
        let compressed = self.compressor.compress(dictionary.as_bytes())?;
        info!(
            "Dictionary stream: {} bytes, {} compressed with {}",
            dictionary.len(),
            compressed.len(),
            self.compressor.name()
        );

        let patterns = discovery
            .accepted
            .iter()
            .zip(&entries)
            .map(|(accepted, entry)| PatternReport {
                pattern: accepted.pattern.clone(),
                round: accepted.round,
                fitness: accepted.fitness,
                occurrences: entry.occurrences(),
            })
            .collect();

        let report = RunReport {
            alphabet_size: alphabet.len(),
            population_size: discovery.population.target_size(),
            rounds: discovery.rounds,
            random_seed: seed,
            patterns,
            corpus_symbols: corpus.len(),
            masked_symbols,
            residual_symbols: residual.chars().count(),
            dictionary_bytes: dictionary.len(),
            compressed_bytes: compressed.len(),
            backend: self.config.output.backend,
            elapsed_seconds: start.elapsed().as_secs_f64(),
            verified: None,
        };

        Ok(EncodedCorpus {
            alphabet,
            discovery,
            entries,
            dictionary,
            compressed,
            residual,
            report,
        })
    }

    /// Decompress the dictionary stream, parse it and rebuild `text` from the
    /// residual. Fails unless the rebuild matches exactly.
    pub fn verify(&self, text: &str, encoded: &EncodedCorpus) -> Result<()> {
        let bytes = self.compressor.decompress(&encoded.compressed)?;
        let dictionary = String::from_utf8(bytes).map_err(|_| FormatError::InvalidUtf8)?;
        let entries = parse_dictionary(&dictionary, &encoded.discovery.table)?;
        let rebuilt = reconstruct(&encoded.residual, &entries)?;

        if rebuilt != normalize_newlines(text) {
            return Err(FormatError::ReconstructionMismatch.into());
        }
        info!("Verified reconstruction of {} symbols", encoded.report.corpus_symbols);
        Ok(())
    }

    /// Read `input`, encode it and write every artifact.
    pub fn run_file(&self, input: &Path) -> Result<RunOutput> {
        let text = fs::read_to_string(input).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => MotifError::InputNotFound(input.to_path_buf()),
            _ => MotifError::io(input, e),
        })?;
        info!("Read {} ({} bytes)", input.display(), text.len());

        let mut encoded = self.encode_text(&text)?;

        let paths = ArtifactPaths::for_input(
            input,
            self.config.output.directory.as_deref(),
            self.compressor.extension(),
        );
        let writer = ArtifactWriter::new(paths)?;
        writer.write_alphabet(&render_alphabet(&encoded.alphabet))?;
        writer.write_patterns(&render_patterns(&encoded.discovery.table))?;
        writer.write_dictionary(&encoded.compressed)?;
        writer.write_residual(&encoded.residual)?;

        if self.config.output.verify {
            self.verify(&text, &encoded)?;
            encoded.report.verified = Some(true);
        }
        if self.config.output.write_report {
            writer.write_report(&encoded.report)?;
        }

        Ok(RunOutput {
            report: encoded.report,
            paths: writer.paths().clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::DiscoveryConfig;

    fn seeded(seed: u64) -> Pipeline {
        Pipeline::new(MotifConfig {
            discovery: DiscoveryConfig {
                random_seed: Some(seed),
                ..Default::default()
            },
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_normalize_newlines() {
        assert_eq!(normalize_newlines("A\r\nB\r\n"), "A\nB\n");
        assert!(matches!(normalize_newlines("A\nB"), Cow::Borrowed(_)));
        assert_eq!(normalize_newlines("A\rB"), "A\rB");
    }

    #[test]
    fn test_encode_and_verify() {
        let pipeline = seeded(17);
        let text = "MKVLAAGMKVLQQMKVLAAG\r\nTTMKVLAAGMKVLWW\r\nMKVLAAQ";
        let encoded = pipeline.encode_text(text).unwrap();

        assert_eq!(encoded.discovery.table.len(), 4);
        assert_eq!(encoded.entries.len(), 4);
        assert_eq!(encoded.report.patterns.len(), 4);
        assert_eq!(
            encoded.report.corpus_symbols,
            encoded.report.masked_symbols + encoded.report.residual_symbols
        );
        assert!(!encoded.residual.contains('\r'));
        pipeline.verify(text, &encoded).unwrap();
    }

    #[test]
    fn test_empty_input() {
        let pipeline = seeded(1);
        assert!(matches!(
            pipeline.encode_text("\r\n\n"),
            Err(MotifError::EmptyInput)
        ));
    }

    #[test]
    fn test_verify_detects_tampering() {
        let pipeline = seeded(5);
        let text = "ACGTACGTTTACGA";
        let mut encoded = pipeline.encode_text(text).unwrap();
        encoded.residual.push('X');

        assert!(pipeline.verify(text, &encoded).is_err());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = MotifConfig {
            discovery: DiscoveryConfig {
                tournament_size: 0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(matches!(Pipeline::new(config), Err(MotifError::Config(_))));
    }
}
