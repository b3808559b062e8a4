use crate::error::{RamseyError, RfResult};
use crate::graph::{Symmetrize, MAX_VERTICES};
use clap::{parser::ValueSource, ArgMatches, Args};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    #[command(flatten)]
    pub graph: GraphParams,
    #[command(flatten)]
    pub anneal: AnnealParams,
    #[command(flatten)]
    pub genetic: GeneticParams,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphParams {
    /// Vertex count of generated graphs (43 for R(5,5)).
    #[arg(long, default_value_t = 43)]
    pub vertices: usize,
    #[arg(long, default_value_t = 5)]
    pub clique_size: usize,
}

impl Default for GraphParams {
    fn default() -> Self {
        Self {
            vertices: 43,
            clique_size: 5,
        }
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnealParams {
    #[arg(long, default_value = "5")]
    pub temp_initial: Decimal,
    /// Subtracted from the temperature after every iteration.
    #[arg(long, default_value = "0.00001")]
    pub temp_step: Decimal,
    /// Full cooling schedules to run back to back, each starting from the
    /// previous round's final graph.
    #[arg(long, default_value_t = 1)]
    pub rounds: usize,
}

impl Default for AnnealParams {
    fn default() -> Self {
        Self {
            temp_initial: Decimal::from(5),
            temp_step: Decimal::new(1, 5),
            rounds: 1,
        }
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneticParams {
    /// Size of a freshly synthesised population.
    #[arg(long, default_value_t = 1000)]
    pub population: usize,
    #[arg(long, default_value_t = 500)]
    pub generations: usize,
    /// Edge-count range of initial random graphs (kept near density 0.5).
    #[arg(long, default_value_t = 200)]
    pub edge_min: usize,
    #[arg(long, default_value_t = 703)]
    pub edge_max: usize,
    #[arg(long, default_value_t = 20)]
    pub mutation_flips_max: usize,
    #[arg(long, default_value_t = 8)]
    pub crossover_blocks_max: usize,
    /// Keep only the best N members at the start of each generation.
    #[arg(long)]
    pub population_cap: Option<usize>,
    #[arg(long, default_value = "union")]
    pub symmetrize: Symmetrize,
}

impl Default for GeneticParams {
    fn default() -> Self {
        Self {
            population: 1000,
            generations: 500,
            edge_min: 200,
            edge_max: 703,
            mutation_flips_max: 20,
            crossover_blocks_max: 8,
            population_cap: None,
            symmetrize: Symmetrize::Union,
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> RfResult<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Overlays values the user typed on the command line; defaults filled in
    /// by clap never overwrite values loaded from a file.
    pub fn merge_from_cli(&mut self, cli: &Config, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($section:ident . $field:ident) => {
                if matches.value_source(stringify!($field)) == Some(ValueSource::CommandLine) {
                    self.$section.$field = cli.$section.$field.clone();
                }
            };
        }

        update_if_present!(graph.vertices);
        update_if_present!(graph.clique_size);

        update_if_present!(anneal.temp_initial);
        update_if_present!(anneal.temp_step);
        update_if_present!(anneal.rounds);

        update_if_present!(genetic.population);
        update_if_present!(genetic.generations);
        update_if_present!(genetic.edge_min);
        update_if_present!(genetic.edge_max);
        update_if_present!(genetic.mutation_flips_max);
        update_if_present!(genetic.crossover_blocks_max);
        update_if_present!(genetic.population_cap);
        update_if_present!(genetic.symmetrize);
    }

    pub fn validate(&self) -> RfResult<()> {
        self.graph.validate()?;
        self.anneal.validate()?;
        self.genetic.validate()
    }
}

impl GraphParams {
    pub fn validate(&self) -> RfResult<()> {
        if self.vertices < 2 || self.vertices > MAX_VERTICES {
            return Err(RamseyError::Config(format!(
                "vertices must be in [2, {}], got {}",
                MAX_VERTICES, self.vertices
            )));
        }
        if self.clique_size == 0 {
            return Err(RamseyError::Config("clique_size must be positive".into()));
        }
        Ok(())
    }
}

impl AnnealParams {
    pub fn validate(&self) -> RfResult<()> {
        if self.temp_step <= Decimal::ZERO {
            return Err(RamseyError::Config(format!(
                "temp_step must be positive, got {}",
                self.temp_step
            )));
        }
        Ok(())
    }
}

impl GeneticParams {
    pub fn validate(&self) -> RfResult<()> {
        if self.edge_min > self.edge_max {
            return Err(RamseyError::Config(format!(
                "edge_min ({}) exceeds edge_max ({})",
                self.edge_min, self.edge_max
            )));
        }
        if self.mutation_flips_max == 0 {
            return Err(RamseyError::Config(
                "mutation_flips_max must be at least 1".into(),
            ));
        }
        if self.crossover_blocks_max < 2 {
            return Err(RamseyError::Config(
                "crossover_blocks_max must be at least 2".into(),
            ));
        }
        // Half the population are parents; crossover needs four of them.
        if self.population < 8 {
            return Err(RamseyError::Config(format!(
                "population must be at least 8, got {}",
                self.population
            )));
        }
        if let Some(cap) = self.population_cap {
            if cap < 8 {
                return Err(RamseyError::Config(format!(
                    "population_cap must be at least 8, got {}",
                    cap
                )));
            }
        }
        Ok(())
    }
}
