//! Discovery rounds and pattern table construction.

use log::{debug, info, warn};

use crate::compute::Corpus;
use crate::schema::{AcceptedPattern, Alphabet, DiscoveryConfig, Pattern, RoundProgress};

use super::fitness::FitnessEvaluator;
use super::genome::PatternRng;
use super::population::Population;

/// Runs discovery rounds: tournament parent selection followed by a fixed
/// number of crossover/mutation generations.
pub struct EvolutionEngine<'a> {
    config: &'a DiscoveryConfig,
    alphabet: &'a Alphabet,
    evaluator: FitnessEvaluator<'a>,
}

impl<'a> EvolutionEngine<'a> {
    /// Create a new evolution engine over an unmasked corpus.
    pub fn new(config: &'a DiscoveryConfig, alphabet: &'a Alphabet, corpus: &'a Corpus) -> Self {
        Self {
            config,
            alphabet,
            evaluator: FitnessEvaluator::new(corpus, config.similarity_penalty),
        }
    }

    pub fn config(&self) -> &DiscoveryConfig {
        self.config
    }

    pub fn evaluator(&self) -> &FitnessEvaluator<'a> {
        &self.evaluator
    }

    /// Fittest of `min(tournament_size, |population|)` uniform draws. The
    /// earliest draw wins ties.
    ///
    /// # Panics
    /// If the population is empty.
    pub fn tournament(
        &self,
        population: &Population,
        table: &[Pattern],
        rng: &mut PatternRng,
    ) -> Pattern {
        let members = population.members();
        let size = self.config.tournament_size.min(members.len());

        // Draw sequentially so the RNG stream does not depend on evaluation order
        let mut contestants: Vec<Pattern> = (0..size)
            .map(|_| members[rng.index(members.len())].clone())
            .collect();
        let scores = self.evaluator.evaluate_all(&contestants, table);

        let mut best = 0;
        for (i, &score) in scores.iter().enumerate().skip(1) {
            if score > scores[best] {
                best = i;
            }
        }
        contestants.swap_remove(best)
    }

    /// Pick two parents by tournament, redrawing the second while it equals
    /// the first.
    ///
    /// Redraws only happen while the population holds more than one distinct
    /// value, and stop after `parent_retry_limit` attempts, accepting the
    /// duplicate.
    pub fn select_parents(
        &self,
        population: &Population,
        table: &[Pattern],
        rng: &mut PatternRng,
    ) -> (Pattern, Pattern) {
        let first = self.tournament(population, table, rng);
        let mut second = self.tournament(population, table, rng);

        if second == first && population.has_variety() {
            let mut retries = 0;
            while second == first && retries < self.config.parent_retry_limit {
                second = self.tournament(population, table, rng);
                retries += 1;
            }
            if second == first {
                warn!(
                    "No distinct second parent after {} redraws, using duplicate {}",
                    retries, first
                );
            }
        }

        (first, second)
    }

    /// Generation loop: each parent is replaced by its child only on strict
    /// fitness improvement.
    pub fn evolve(
        &self,
        mut parent1: Pattern,
        mut parent2: Pattern,
        table: &[Pattern],
        rng: &mut PatternRng,
    ) -> (Pattern, Pattern) {
        for generation in 0..self.config.max_generations {
            let (child1, child2) = rng.crossover(&parent1, &parent2);
            let child1 = rng.mutate(&child1, self.alphabet);
            let child2 = rng.mutate(&child2, self.alphabet);

            let candidates = [child1, parent1.clone(), child2, parent2.clone()];
            let scores = self.evaluator.evaluate_all(&candidates, table);
            let [child1, _, child2, _] = candidates;

            if scores[0] > scores[1] {
                debug!(
                    "Generation {}: {} -> {} ({:.1} -> {:.1})",
                    generation, parent1, child1, scores[1], scores[0]
                );
                parent1 = child1;
            }
            if scores[2] > scores[3] {
                debug!(
                    "Generation {}: {} -> {} ({:.1} -> {:.1})",
                    generation, parent2, child2, scores[3], scores[2]
                );
                parent2 = child2;
            }
        }

        (parent1, parent2)
    }

    /// One discovery round: select parents, then evolve them.
    pub fn run_round(
        &self,
        population: &Population,
        table: &[Pattern],
        rng: &mut PatternRng,
    ) -> (Pattern, Pattern) {
        let (parent1, parent2) = self.select_parents(population, table, rng);
        self.evolve(parent1, parent2, table, rng)
    }
}

/// Outcome of building a pattern table.
#[derive(Debug, Clone)]
pub struct DiscoveryResult {
    /// Accepted patterns in acceptance order.
    pub table: Vec<Pattern>,
    /// Acceptance details, parallel to `table`.
    pub accepted: Vec<AcceptedPattern>,
    /// Discovery rounds run.
    pub rounds: usize,
    /// Population after the last round.
    pub population: Population,
}

/// Drives discovery rounds until the pattern table is full.
pub struct PatternTableBuilder<'a> {
    engine: EvolutionEngine<'a>,
    population: Population,
    table: Vec<Pattern>,
    accepted: Vec<AcceptedPattern>,
    round: usize,
}

impl<'a> PatternTableBuilder<'a> {
    pub fn new(engine: EvolutionEngine<'a>, population: Population) -> Self {
        let capacity = engine.config().table_capacity;
        Self {
            engine,
            population,
            table: Vec::with_capacity(capacity),
            accepted: Vec::with_capacity(capacity),
            round: 0,
        }
    }

    pub fn table(&self) -> &[Pattern] {
        &self.table
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    pub fn is_full(&self) -> bool {
        self.table.len() >= self.engine.config().table_capacity
    }

    /// Run one round and append its patterns to the table.
    pub fn step(&mut self, rng: &mut PatternRng) -> RoundProgress {
        let capacity = self.engine.config().table_capacity;
        let (first, second) = self.engine.run_round(&self.population, &self.table, rng);

        let evaluator = self.engine.evaluator();
        let scores = [
            evaluator.fitness(&first, &self.table),
            evaluator.fitness(&second, &self.table),
        ];

        let mut added = Vec::with_capacity(2);
        for (pattern, fitness) in [&first, &second].into_iter().zip(scores) {
            if self.table.len() >= capacity {
                break;
            }
            self.table.push(pattern.clone());
            self.accepted.push(AcceptedPattern {
                pattern: pattern.clone(),
                round: self.round,
                fitness,
            });
            added.push(pattern.clone());
        }

        self.population.replace_after_round(
            first,
            second,
            self.engine.config().replacement,
            rng,
            evaluator,
            &self.table,
        );

        let population_scores = evaluator.evaluate_all(self.population.members(), &self.table);
        let best_fitness = population_scores.iter().copied().fold(0.0, f64::max);
        let avg_fitness = if population_scores.is_empty() {
            0.0
        } else {
            population_scores.iter().sum::<f64>() / population_scores.len() as f64
        };

        info!(
            "Round {}: accepted {} ({}/{} patterns, population best {:.1}, avg {:.1})",
            self.round,
            added
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", "),
            self.table.len(),
            capacity,
            best_fitness,
            avg_fitness
        );
        debug!(
            "Round {}: {} distinct of {} members, {} patterns counted",
            self.round,
            self.population.distinct_count(),
            self.population.len(),
            evaluator.cached()
        );

        let progress = RoundProgress {
            round: self.round,
            table_len: self.table.len(),
            table_capacity: capacity,
            accepted: added,
            best_fitness,
            avg_fitness,
        };
        self.round += 1;
        progress
    }

    /// Build the table, reporting each round to `callback`.
    pub fn build_with_callback<F>(mut self, rng: &mut PatternRng, mut callback: F) -> DiscoveryResult
    where
        F: FnMut(&RoundProgress),
    {
        while !self.is_full() {
            let progress = self.step(rng);
            callback(&progress);
        }

        DiscoveryResult {
            table: self.table,
            accepted: self.accepted,
            rounds: self.round,
            population: self.population,
        }
    }

    /// Build the table.
    pub fn build(self, rng: &mut PatternRng) -> DiscoveryResult {
        self.build_with_callback(rng, |_| {})
    }
}

/// Discover a full pattern table for `corpus`.
///
/// The population holds `config.population_size_for(alphabet.len())` random
/// patterns.
pub fn discover(
    config: &DiscoveryConfig,
    alphabet: &Alphabet,
    corpus: &Corpus,
    rng: &mut PatternRng,
) -> DiscoveryResult {
    let size = config.population_size_for(alphabet.len());
    let population = Population::initialize(alphabet, size, rng);
    info!("Initialized population of {} patterns", population.len());

    let engine = EvolutionEngine::new(config, alphabet, corpus);
    PatternTableBuilder::new(engine, population).build(rng)
}
