//! Evolutionary search for recurring corpus patterns.
//!
//! # Overview
//!
//! The search system consists of:
//!
//! - **Pattern Operators** (`genome`): Random generation, crossover, and mutation
//! - **Fitness Evaluation** (`fitness`): Coverage score with a redundancy penalty
//! - **Population** (`population`): Fixed-size candidate pool and victim replacement
//! - **Search** (`search`): Discovery rounds and pattern table construction
//!
//! # Example
//!
//! ```rust
//! use motif_dict::compute::Corpus;
//! use motif_dict::compute::evolution::{PatternRng, discover};
//! use motif_dict::schema::{Alphabet, DiscoveryConfig};
//!
//! let text = "MKVLAAGMKVLQQMKVLAAG";
//! let corpus = Corpus::new(text);
//! let alphabet = Alphabet::from_chars(text.chars()).unwrap();
//!
//! let config = DiscoveryConfig::default();
//! let result = discover(&config, &alphabet, &corpus, &mut PatternRng::new(42));
//!
//! assert_eq!(result.table.len(), config.table_capacity);
//! ```
//!
//! # Round Structure
//!
//! Each round draws two parents by tournament, runs `max_generations` of
//! single-point crossover plus point mutation with strict-improvement
//! replacement, then appends both survivors to the table (the second only if
//! there is room) and admits them into the population.

mod fitness;
mod genome;
mod population;
mod search;

pub use fitness::{FitnessEvaluator, fitness};
pub use genome::PatternRng;
pub use population::Population;
pub use search::{DiscoveryResult, EvolutionEngine, PatternTableBuilder, discover};
