//! GA evolutionary loop execution.
//!
//! [`GaRunner`] orchestrates the complete evolutionary process:
//! initialization → evaluation → selection → crossover → mutation → repeat,
//! with elitism, rate adaptation and stagnation restarts between generations.

use super::archive::EliteArchive;
use super::config::GaConfig;
use super::operators::{cycle_crossover, swap_mutation};
use super::rates::{diversity, GaRates};
use super::selection::tournament;
use super::types::Individual;
use crate::cube::{CostModel, CubeState};
use crate::engine::Algorithm;
use crate::error::Result;
use crate::random::rng_from_seed;
use crate::result::{Diagnostics, SearchResult};
use rand::Rng;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Executes the GA evolutionary loop.
///
/// # Usage
///
/// ```
/// use u_magicube::cube::{CostModel, CubeState};
/// use u_magicube::ga::{GaConfig, GaRunner};
/// use u_magicube::random::create_rng;
///
/// let mut rng = create_rng(42);
/// let cube = CubeState::random(3, &mut rng).unwrap();
/// let model = CostModel::new(3);
/// let config = GaConfig::default()
///     .with_population_size(20)
///     .with_elitism_count(2)
///     .with_tournament_size(3)
///     .with_max_generations(10)
///     .with_seed(42);
/// let result = GaRunner::run(&model, &cube, &config).unwrap();
/// assert!(result.final_cube.is_permutation());
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs the GA optimization.
    pub fn run(model: &CostModel, cube: &CubeState, config: &GaConfig) -> Result<SearchResult> {
        let mut rng = rng_from_seed(config.seed);
        Self::run_with_rng(model, cube, config, &mut rng)
    }

    pub fn run_with_rng<R: Rng + ?Sized>(
        model: &CostModel,
        cube: &CubeState,
        config: &GaConfig,
        rng: &mut R,
    ) -> Result<SearchResult> {
        config.validate()?;
        model.check(cube)?;

        let start = Instant::now();
        let deadline = config.time_limit_ms.map(Duration::from_millis);
        let order = cube.order();
        let pop_size = config.population_size;
        let elites = config.elitism_count;

        // 1. Initialize population: the caller's cube plus random cubes
        let mut population = Vec::with_capacity(pop_size);
        population.push(Individual::new(cube.clone()));
        while population.len() < pop_size {
            population.push(Individual::new(CubeState::random(order, rng)?));
        }

        // 2. Evaluate initial population
        let mut evaluations = evaluate_population(model, &mut population, config.parallel);
        sort_by_cost(&mut population);
        let initial_cost = model.cost(cube);
        let initial_best_cost = population[0].rank_cost();

        let mut best = population[0].clone();
        let mut best_cost = initial_best_cost;
        let mut archive = EliteArchive::new(config.effective_archive_size());
        let mut rates = GaRates::new(config.mutation_rate, config.crossover_rate);

        let mut cost_trace = Vec::with_capacity(config.max_generations.min(1 << 16) + 1);
        let mut average_trace = Vec::with_capacity(config.max_generations.min(1 << 16) + 1);
        cost_trace.push(best_cost);
        average_trace.push(average_cost(&population));

        let mut generations = 0usize;
        let mut stagnation = 0usize;
        let mut stagnation_restarts = 0usize;

        info!(
            order,
            initial_cost,
            initial_best_cost,
            population = pop_size,
            "genetic algorithm started"
        );

        // 3. Evolutionary loop; the population is sorted at the top of
        //    every generation.
        while generations < config.max_generations && best_cost > config.target_cost {
            if deadline.is_some_and(|limit| start.elapsed() >= limit) {
                debug!(generations, "time limit reached");
                break;
            }

            for ind in population.iter().take(archive.capacity()) {
                archive.offer(ind);
            }

            // Elite preservation
            let mut next_gen: Vec<Individual> = population[..elites].to_vec();

            // Generate offspring
            while next_gen.len() < pop_size {
                let p1 = &population[tournament(&population, config.tournament_size, rng)];
                let p2 = &population[tournament(&population, config.tournament_size, rng)];

                let (c1, c2) = if rng.random::<f64>() < rates.crossover {
                    let (a, b) = cycle_crossover(p1.cube(), p2.cube(), rng);
                    (Individual::new(a), Individual::new(b))
                } else {
                    (p1.clone(), p2.clone())
                };

                for mut child in [c1, c2] {
                    if next_gen.len() >= pop_size {
                        break;
                    }
                    if rates.mutation > 0.0 {
                        // Mutate a scratch copy so an unmutated clone keeps
                        // its cached cost.
                        let mut mutated = child.cube().clone();
                        if swap_mutation(&mut mutated, rates.mutation, rng) > 0 {
                            child = Individual::new(mutated);
                        }
                    }
                    next_gen.push(child);
                }
            }

            // Evaluate offspring (elites are already evaluated)
            evaluations += evaluate_population(model, &mut next_gen[elites..], config.parallel);
            population = next_gen;
            sort_by_cost(&mut population);
            generations += 1;

            let gen_best = population[0].rank_cost();
            if gen_best < best_cost {
                best = population[0].clone();
                best_cost = gen_best;
                stagnation = 0;
            } else {
                stagnation += 1;
            }

            if config.adaptive_rates {
                let before = rates;
                rates.adapt(diversity(&population), pop_size);
                if rates != before {
                    debug!(
                        generation = generations,
                        mutation = rates.mutation,
                        crossover = rates.crossover,
                        "rates adapted"
                    );
                }
            }

            if config.stagnation_limit > 0 && stagnation > config.stagnation_limit {
                let (replaced, reinjected) =
                    restart_worst(&mut population, &archive, config, order, rng)?;
                evaluations += evaluate_population(model, &mut population, config.parallel);
                sort_by_cost(&mut population);
                stagnation_restarts += 1;
                stagnation = 0;
                debug!(
                    generation = generations,
                    replaced,
                    reinjected,
                    best_cost,
                    "stagnation restart"
                );
            }

            cost_trace.push(best_cost);
            average_trace.push(average_cost(&population));
        }

        for ind in population.iter().take(archive.capacity()) {
            archive.offer(ind);
        }

        info!(
            final_cost = best_cost,
            generations,
            evaluations,
            stagnation_restarts,
            "genetic algorithm finished"
        );

        Ok(SearchResult {
            algorithm: Algorithm::Genetic,
            initial_cost,
            final_cube: best.into_cube(),
            final_cost: best_cost,
            duration: start.elapsed(),
            iterations: generations,
            evaluations,
            cost_trace,
            line_count: model.line_count(),
            move_log: None,
            diagnostics: Diagnostics::Genetic {
                population_size: pop_size,
                initial_best_cost,
                stagnation_restarts,
                archive: archive
                    .iter()
                    .map(|ind| (ind.rank_cost(), ind.cube().clone()))
                    .collect(),
                final_mutation_rate: rates.mutation,
                final_crossover_rate: rates.crossover,
                average_trace,
            },
        })
    }
}

/// Replaces the worst `restart_fraction` of a sorted population, never
/// touching the elites.
///
/// Archived cubes missing from the surviving part are reinjected first; the
/// remaining slots get fresh random cubes. Returns the number of slots
/// replaced and how many of them came from the archive.
fn restart_worst<R: Rng + ?Sized>(
    population: &mut [Individual],
    archive: &EliteArchive,
    config: &GaConfig,
    order: usize,
    rng: &mut R,
) -> Result<(usize, usize)> {
    let len = population.len();
    let wanted = (len as f64 * config.restart_fraction).round() as usize;
    let count = wanted.min(len - config.elitism_count);
    let (kept, replaced) = population.split_at_mut(len - count);

    let mut returning = archive
        .iter()
        .filter(|entry| kept.iter().all(|ind| ind.cube() != entry.cube()));
    let mut reinjected = 0;
    for slot in replaced.iter_mut() {
        *slot = match returning.next() {
            Some(entry) => {
                reinjected += 1;
                entry.clone()
            }
            None => Individual::new(CubeState::random(order, rng)?),
        };
    }
    Ok((count, reinjected))
}

fn sort_by_cost(population: &mut [Individual]) {
    population.sort_by_key(Individual::rank_cost);
}

fn average_cost(population: &[Individual]) -> f64 {
    let total: f64 = population.iter().map(|ind| ind.rank_cost() as f64).sum();
    total / population.len() as f64
}

/// Evaluates every individual lacking a cached cost, on the global rayon
/// pool when `parallel` is set. Returns the number of evaluations performed.
fn evaluate_population(model: &CostModel, individuals: &mut [Individual], parallel: bool) -> usize {
    #[cfg(feature = "parallel")]
    if parallel {
        use rayon::prelude::*;
        return individuals
            .par_iter_mut()
            .map(|ind| usize::from(ind.evaluate(model)))
            .sum();
    }
    #[cfg(not(feature = "parallel"))]
    let _ = parallel;

    individuals
        .iter_mut()
        .map(|ind| usize::from(ind.evaluate(model)))
        .sum()
}

// ============================================================================
// Tests
// ============================================================================
