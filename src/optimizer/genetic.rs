use super::best::BestTracker;
use super::crossover::crossover;
use super::initialization::{load_population, random_graphs};
use super::mutation::mutate_random;
use super::runner::{Progress, ProgressCallback};
use super::seeded_rng;
use crate::config::GeneticParams;
use crate::error::{RamseyError, RfResult};
use crate::graph::{GraphState, Symmetrize};
use crate::scorer::{Evaluator, Fitness};
use crate::store::GraphStore;
use fastrand::Rng;
use rayon::prelude::*;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub graph: GraphState,
    pub fitness: Fitness,
}

/// Scored graphs. After [`Population::sort`] the order is ascending fitness
/// with ties kept in their previous relative order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Population {
    members: Vec<Member>,
}

impl Population {
    pub fn from_members(members: Vec<Member>) -> Self {
        Self { members }
    }

    /// Scores `graphs` in parallel; member order follows input order.
    pub fn evaluate<E: Evaluator + Sync>(graphs: Vec<GraphState>, evaluator: &E) -> Self {
        let members = graphs
            .into_par_iter()
            .map(|graph| {
                let fitness = evaluator.evaluate(&graph);
                Member { graph, fitness }
            })
            .collect();
        Self { members }
    }

    pub fn sort(&mut self) {
        self.members.sort_by_key(|m| m.fitness);
    }

    pub fn truncate(&mut self, len: usize) {
        self.members.truncate(len);
    }

    pub fn best(&self) -> Option<&Member> {
        self.members.first()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    /// First half of the current order.
    pub fn parents(&self) -> &[Member] {
        &self.members[..self.members.len() / 2]
    }

    /// `(index, fitness)` rows in member order.
    pub fn census(&self) -> Vec<(usize, Fitness)> {
        self.members
            .iter()
            .enumerate()
            .map(|(i, m)| (i, m.fitness))
            .collect()
    }

    pub fn into_members(self) -> Vec<Member> {
        self.members
    }
}

/// How one generation's offspring are split between the two operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OffspringPlan {
    pub parents: usize,
    pub mutations: usize,
    /// Crossover slots; every two slots yield one pair of offspring.
    pub crossovers: usize,
}

impl OffspringPlan {
    pub fn new(parents: usize, crossovers: usize) -> RfResult<Self> {
        if parents < 4 {
            return Err(RamseyError::DegenerateParentSplit { parents });
        }
        let crossovers = crossovers.clamp(2, parents - 2);
        Ok(Self {
            parents,
            mutations: parents - crossovers,
            crossovers,
        })
    }

    /// Crossover share uniform in `[2, parents - 2]`.
    pub fn draw(parents: usize, rng: &mut Rng) -> RfResult<Self> {
        if parents < 4 {
            return Err(RamseyError::DegenerateParentSplit { parents });
        }
        Self::new(parents, rng.usize(2..=parents - 2))
    }

    pub fn crossover_pairs(&self) -> usize {
        self.crossovers / 2
    }

    pub fn offspring_count(&self) -> usize {
        self.mutations + 2 * self.crossover_pairs()
    }
}

#[derive(Debug, Clone)]
pub struct GeneticOptions {
    pub generations: usize,
    pub mutation_flips_max: usize,
    pub crossover_blocks_max: usize,
    pub population_cap: Option<usize>,
    pub symmetrize: Symmetrize,
}

impl Default for GeneticOptions {
    fn default() -> Self {
        Self::from(&GeneticParams::default())
    }
}

impl From<&GeneticParams> for GeneticOptions {
    fn from(params: &GeneticParams) -> Self {
        Self {
            generations: params.generations,
            mutation_flips_max: params.mutation_flips_max,
            crossover_blocks_max: params.crossover_blocks_max,
            population_cap: params.population_cap,
            symmetrize: params.symmetrize,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GeneticOutcome {
    pub best: GraphState,
    pub best_fitness: Fitness,
    pub generations: usize,
    pub solved: bool,
    pub population: Population,
}

/// Generational search: the better half of each generation survives
/// unchanged next to its mutated and recombined offspring.
pub struct GeneticSearch<'a, E: Evaluator + Sync> {
    evaluator: &'a E,
    options: GeneticOptions,
    pub rng: Rng,
}

impl<'a, E: Evaluator + Sync> GeneticSearch<'a, E> {
    pub fn new(evaluator: &'a E, options: GeneticOptions, seed: Option<u64>) -> Self {
        Self {
            evaluator,
            options,
            rng: seeded_rng(seed),
        }
    }

    pub fn options(&self) -> &GeneticOptions {
        &self.options
    }

    /// Resumes the population held by `store`, or synthesises `size` random
    /// graphs and persists them as ids `0..size`.
    pub fn initial_population<S: GraphStore>(
        &mut self,
        store: &mut S,
        n: usize,
        size: usize,
        edge_min: usize,
        edge_max: usize,
    ) -> RfResult<Population> {
        let stored = load_population(store)?;
        if !stored.is_empty() {
            if stored[0].vertex_count() != n {
                warn!(
                    "Stored population has {} vertices, ignoring requested {}",
                    stored[0].vertex_count(),
                    n
                );
            }
            return Ok(Population::evaluate(stored, self.evaluator));
        }

        let graphs = random_graphs(n, size, edge_min, edge_max, &mut self.rng);
        let population = Population::evaluate(graphs, self.evaluator);
        for (i, m) in population.members().iter().enumerate() {
            store.save_graph(&i.to_string(), &m.graph)?;
        }
        store.write_census(&population.census())?;
        info!("Synthesised a population of {}", population.len());
        Ok(population)
    }

    /// Offspring of `parents`: mutants first, then crossover pairs. Returns
    /// the drawn split alongside them.
    pub fn breed(&mut self, parents: &[Member]) -> RfResult<(OffspringPlan, Vec<GraphState>)> {
        let plan = OffspringPlan::draw(parents.len(), &mut self.rng)?;
        debug!(
            "Breeding {} mutants and {} crossover pairs from {} parents",
            plan.mutations,
            plan.crossover_pairs(),
            plan.parents
        );

        let mut offspring = Vec::with_capacity(plan.offspring_count());
        for _ in 0..plan.mutations {
            let parent = &parents[self.rng.usize(..parents.len())];
            offspring.push(mutate_random(
                &parent.graph,
                self.options.mutation_flips_max,
                self.options.symmetrize,
                &mut self.rng,
            ));
        }
        for _ in 0..plan.crossover_pairs() {
            let a = &parents[self.rng.usize(..parents.len())];
            let b = &parents[self.rng.usize(..parents.len())];
            let (h, i) = crossover(
                &a.graph,
                &b.graph,
                self.options.crossover_blocks_max,
                self.options.symmetrize,
                &mut self.rng,
            );
            offspring.push(h);
            offspring.push(i);
        }
        Ok((plan, offspring))
    }

    /// Offspring followed by the unchanged parents. `population` must be
    /// sorted.
    pub fn next_generation(
        &mut self,
        population: &Population,
    ) -> RfResult<(OffspringPlan, Population)> {
        if population.is_empty() {
            return Err(RamseyError::EmptyPopulation);
        }
        let parents = population.parents();
        let (plan, offspring) = self.breed(parents)?;
        let mut members = Population::evaluate(offspring, self.evaluator).into_members();
        members.extend(parents.iter().cloned());
        Ok((plan, Population::from_members(members)))
    }

    pub fn run<S, CB>(
        &mut self,
        initial: Population,
        store: &mut S,
        callback: &CB,
    ) -> RfResult<GeneticOutcome>
    where
        S: GraphStore,
        CB: ProgressCallback,
    {
        let mut population = initial;
        let mut stored_len = population.len();
        let mut tracker = BestTracker::new();
        let mut generation = 0;

        let solved = loop {
            population.sort();
            if let Some(cap) = self.options.population_cap {
                population.truncate(cap);
            }
            let best = population.best().ok_or(RamseyError::EmptyPopulation)?;
            store.append_best(best.fitness)?;
            tracker.offer(&best.graph, best.fitness);
            info!(
                "Generation {}: best {} (population {})",
                generation,
                best.fitness,
                population.len()
            );

            if best.fitness == 0 {
                info!("Solution found in generation {}", generation);
                break true;
            }
            if generation >= self.options.generations {
                break false;
            }

            let progress = Progress {
                iteration: generation,
                current: best.fitness,
                best: tracker.fitness().unwrap_or(best.fitness),
            };
            let best_graph = tracker.graph().unwrap_or(&best.graph);
            if !callback.on_progress(&progress, best_graph) {
                info!("Evolution cancelled at generation {}", generation);
                break false;
            }

            let (_, next) = self.next_generation(&population)?;
            population = next;
            generation += 1;
            stored_len = persist(store, &population, stored_len)?;
        };

        let (best, best_fitness) = tracker.into_inner().ok_or(RamseyError::EmptyPopulation)?;
        info!(
            "Evolution finished after {} generations: best {}",
            generation, best_fitness
        );
        Ok(GeneticOutcome {
            best,
            best_fitness,
            generations: generation,
            solved,
            population,
        })
    }
}

/// Writes members as ids `0..len`, drops ids left over from a larger
/// previous generation and rewrites the census. Returns the stored length.
fn persist<S: GraphStore>(store: &mut S, population: &Population, stored_len: usize) -> RfResult<usize> {
    for (i, m) in population.members().iter().enumerate() {
        store.save_graph(&i.to_string(), &m.graph)?;
    }
    for stale in population.len()..stored_len {
        store.remove_graph(&stale.to_string())?;
    }
    store.write_census(&population.census())?;
    Ok(population.len())
}
