//! Motif Dict CLI - Discover patterns in a corpus and write dictionary artifacts.

#[cfg(feature = "dhat-heap")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;

use motif_dict::{
    MotifConfig, MotifError, Pipeline, RunOutput,
    schema::{CompressionBackend, ConfigError},
};

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Text corpus to encode.
    #[arg(required_unless_present = "print_config")]
    input: Option<PathBuf>,

    /// JSON configuration file. Missing fields take their defaults.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory receiving the artifacts (default: next to the input).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Random seed for a reproducible search.
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of patterns in the table.
    #[arg(long)]
    capacity: Option<usize>,

    /// Crossover/mutation generations per round.
    #[arg(long)]
    generations: Option<usize>,

    /// Dictionary stream compressor.
    #[arg(short, long, value_enum)]
    backend: Option<CompressionBackend>,

    /// Rebuild the corpus from the artifacts and fail on any difference.
    #[arg(long)]
    verify: bool,

    /// Print the effective configuration as JSON and exit.
    #[arg(long)]
    print_config: bool,
}

fn main() {
    #[cfg(feature = "dhat-heap")]
    let _profiler = dhat::Profiler::new_heap();

    env_logger::init();

    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        eprintln!("Error: {}", err);
        std::process::exit(err.exit_code());
    }
}

fn run(cli: Cli) -> Result<(), MotifError> {
    let config = load_config(&cli)?;

    if cli.print_config {
        let json = serde_json::to_string_pretty(&config).map_err(ConfigError::Parse)?;
        println!("{}", json);
        return Ok(());
    }

    let Some(input) = cli.input.as_deref() else {
        return Ok(());
    };

    let pipeline = Pipeline::new(config)?;

    println!("Motif Dictionary");
    println!("================");
    println!("Input: {}", input.display());
    println!(
        "Table capacity: {}, generations: {}, tournament: {}",
        pipeline.config().discovery.table_capacity,
        pipeline.config().discovery.max_generations,
        pipeline.config().discovery.tournament_size
    );
    println!("Compressor: {}", pipeline.compressor().name());
    println!();

    let output = pipeline.run_file(input)?;
    print_summary(&output, pipeline.config().output.write_report);
    Ok(())
}

fn load_config(cli: &Cli) -> Result<MotifConfig, MotifError> {
    let mut config = match &cli.config {
        Some(path) => read_config(path)?,
        None => MotifConfig::default(),
    };

    if let Some(seed) = cli.seed {
        config.discovery.random_seed = Some(seed);
    }
    if let Some(capacity) = cli.capacity {
        config.discovery.table_capacity = capacity;
    }
    if let Some(generations) = cli.generations {
        config.discovery.max_generations = generations;
    }
    if let Some(backend) = cli.backend {
        config.output.backend = backend;
    }
    if let Some(dir) = &cli.output_dir {
        config.output.directory = Some(dir.clone());
    }
    if cli.verify {
        config.output.verify = true;
    }

    config.validate()?;
    Ok(config)
}

fn read_config(path: &Path) -> Result<MotifConfig, MotifError> {
    let text = fs::read_to_string(path).map_err(|e| MotifError::io(path, e))?;
    Ok(MotifConfig::from_json(&text)?)
}

fn print_summary(output: &RunOutput, report_written: bool) {
    let report = &output.report;

    println!("Alphabet: {} symbols", report.alphabet_size);
    println!("Population: {}", report.population_size);
    println!("Rounds: {}", report.rounds);
    println!("Seed: {}", report.random_seed);
    println!();
    println!("Pattern table:");
    for entry in &report.patterns {
        println!(
            "  {:?}  round {}, fitness {:.1}, {} occurrences",
            entry.pattern.to_string(),
            entry.round,
            entry.fitness,
            entry.occurrences
        );
    }
    println!();
    println!(
        "Coverage: {}/{} symbols ({:.1}%)",
        report.masked_symbols,
        report.corpus_symbols,
        report.coverage() * 100.0
    );
    println!(
        "Dictionary: {} bytes -> {} bytes ({:.2}x)",
        report.dictionary_bytes,
        report.compressed_bytes,
        report.dictionary_ratio()
    );
    println!("Residual: {} symbols", report.residual_symbols);
    if let Some(verified) = report.verified {
        println!("Verified: {}", verified);
    }
    println!("Time: {:.2}s", report.elapsed_seconds);
    println!();
    println!("Artifacts:");
    for path in [
        &output.paths.alphabet,
        &output.paths.patterns,
        &output.paths.dictionary,
        &output.paths.residual,
    ] {
        println!("  {}", path.display());
    }
    if report_written {
        println!("  {}", output.paths.report.display());
    }
}
