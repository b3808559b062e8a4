use crate::reports;
use clap::Args;
use ramseyforge::config::Config;
use ramseyforge::error::RfResult;
use ramseyforge::graph::GraphState;
use ramseyforge::optimizer::{GeneticOptions, GeneticSearch, Progress};
use ramseyforge::scorer::FitnessOracle;
use ramseyforge::store::{save_graph_file, DirStore};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info};

#[derive(Args, Debug, Clone)]
pub struct EvolveArgs {
    #[command(flatten)]
    pub config: Config,

    /// Run directory; an existing population under `graphs/` is resumed.
    #[arg(short, long, default_value = "run")]
    pub dir: PathBuf,
}

pub fn run(args: &EvolveArgs, config: &Config, seed: Option<u64>) -> RfResult<()> {
    let mut store = DirStore::open(&args.dir)?;
    let oracle = FitnessOracle::new(config.graph.clique_size);
    let started = Instant::now();
    let params = &config.genetic;

    info!("🧬 Run directory: {}", args.dir.display());
    let mut search = GeneticSearch::new(&oracle, GeneticOptions::from(params), seed);
    let initial = search.initial_population(
        &mut store,
        config.graph.vertices,
        params.population,
        params.edge_min,
        params.edge_max,
    )?;
    let initial_size = initial.len();

    let report = |progress: &Progress, _best: &GraphState| {
        debug!(
            "Generation {} | best {}",
            progress.iteration, progress.best
        );
        true
    };

    let outcome = search.run(initial, &mut store, &report)?;

    let target = if outcome.solved {
        args.dir.join("found.txt")
    } else {
        args.dir.join("best.txt")
    };
    save_graph_file(&target, &outcome.best)?;
    if outcome.solved {
        info!("🎉 Counterexample found, saved to {}", target.display());
    }

    reports::print_run_summary(
        "Genetic Search",
        &[
            ("Solved", outcome.solved.to_string()),
            ("Best fitness", outcome.best_fitness.to_string()),
            ("Generations", outcome.generations.to_string()),
            ("Initial population", initial_size.to_string()),
            ("Final population", outcome.population.len().to_string()),
            ("Best graph", target.display().to_string()),
            ("Elapsed", format!("{:.2?}", started.elapsed())),
        ],
    );
    Ok(())
}
