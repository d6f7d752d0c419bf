//! Quick discovery and encoding performance test

use motif_dict::{
    MotifConfig, Pipeline,
    compute::{
        Corpus,
        evolution::{EvolutionEngine, PatternRng, PatternTableBuilder, Population},
    },
    schema::{Alphabet, DiscoveryConfig},
};
use rand::prelude::*;
use std::time::Instant;

const RESIDUES: &str = "ACDEFGHIKLMNPQRSTVWY";

fn synthetic_corpus(len: usize, seed: u64) -> String {
    let mut rng = StdRng::seed_from_u64(seed);
    let residues: Vec<char> = RESIDUES.chars().collect();
    let motifs = ["MKVL", "AAG", "WW", "PEST"];
    let mut text = String::with_capacity(len);

    while text.len() < len {
        for _ in 0..60 {
            if rng.gen_bool(0.25) {
                text.push_str(motifs[rng.gen_range(0..motifs.len())]);
            } else {
                text.push(residues[rng.gen_range(0..residues.len())]);
            }
        }
        text.push('\n');
    }
    text
}

fn main() {
    println!("=== Pipeline Performance Test ===\n");

    for size in [10_000, 100_000, 1_000_000] {
        println!("Corpus size: {} bytes", size);

        let text = synthetic_corpus(size, 42);
        let mut config = MotifConfig::default();
        config.discovery.random_seed = Some(42);
        let pipeline = match Pipeline::new(config) {
            Ok(pipeline) => pipeline,
            Err(err) => {
                eprintln!("Error: {}", err);
                return;
            }
        };

        let start = Instant::now();
        let encoded = match pipeline.encode_text(&text) {
            Ok(encoded) => encoded,
            Err(err) => {
                eprintln!("Error: {}", err);
                return;
            }
        };
        let elapsed = start.elapsed();
        let report = &encoded.report;

        println!(
            "  Patterns:       {}",
            encoded
                .discovery
                .table
                .iter()
                .map(|p| format!("{:?}", p.to_string()))
                .collect::<Vec<_>>()
                .join(" ")
        );
        println!("  Coverage:       {:.1}%", report.coverage() * 100.0);
        println!(
            "  Dictionary:     {} -> {} bytes",
            report.dictionary_bytes, report.compressed_bytes
        );
        println!("  Residual:       {} symbols", report.residual_symbols);
        println!("  Elapsed:        {:.3}s", elapsed.as_secs_f64());
        println!();
    }

    println!("=== Population Scaling (fixed 100KB corpus) ===\n");

    let text = synthetic_corpus(100_000, 7);
    let corpus = Corpus::new(&text);
    let Some(alphabet) = Alphabet::from_chars(text.chars()) else {
        return;
    };

    for population_size in [5, 20, 80, 320] {
        let config = DiscoveryConfig {
            population_size: Some(population_size),
            table_capacity: 8,
            ..Default::default()
        };

        let mut rng = PatternRng::new(7);
        let start = Instant::now();
        let population = Population::initialize(&alphabet, population_size, &mut rng);
        let engine = EvolutionEngine::new(&config, &alphabet, &corpus);
        let mut best = 0.0_f64;
        let result = PatternTableBuilder::new(engine, population)
            .build_with_callback(&mut rng, |progress| best = best.max(progress.best_fitness));
        let elapsed = start.elapsed();

        println!(
            "  Population {:>4}: {} rounds, best population fitness {:.1}, {:.3}s",
            population_size,
            result.rounds,
            best,
            elapsed.as_secs_f64()
        );
    }
}
