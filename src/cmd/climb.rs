use crate::reports;
use clap::Args;
use ramseyforge::config::Config;
use ramseyforge::error::RfResult;
use ramseyforge::graph::GraphState;
use ramseyforge::optimizer::{ClimbStatus, HillClimb, Progress};
use ramseyforge::scorer::FitnessOracle;
use ramseyforge::store::save_graph_file;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{error, info};

#[derive(Args, Debug, Clone)]
pub struct ClimbArgs {
    #[command(flatten)]
    pub config: Config,

    /// Starting graph; a random half-density graph when omitted.
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Rewritten after every improvement.
    #[arg(short, long, default_value = "new.txt")]
    pub output: PathBuf,

    /// Written once fitness reaches zero.
    #[arg(long, default_value = "0.txt")]
    pub solved: PathBuf,
}

pub fn run(args: &ClimbArgs, config: &Config, seed: Option<u64>) -> RfResult<()> {
    let start = super::starting_graph(args.input.as_deref(), config.graph.vertices, seed)?;
    let oracle = FitnessOracle::new(config.graph.clique_size);
    let started = Instant::now();

    let checkpoint = |progress: &Progress, graph: &GraphState| {
        info!("⛰️  Improvement #{}: {}", progress.iteration, progress.current);
        match save_graph_file(&args.output, graph) {
            Ok(()) => true,
            Err(e) => {
                error!("Could not save {}: {}", args.output.display(), e);
                false
            }
        }
    };

    let outcome = HillClimb::new(&oracle).run(start, &checkpoint);

    if outcome.status == ClimbStatus::Solved {
        info!("🎉 Counterexample found, saving to {}", args.solved.display());
        save_graph_file(&args.solved, &outcome.graph)?;
    }

    reports::print_run_summary(
        "Hill Climb",
        &[
            ("Status", outcome.status.to_string()),
            ("Fitness", outcome.fitness.to_string()),
            ("Passes", outcome.passes.to_string()),
            ("Improvements", outcome.improvements.to_string()),
            ("Evaluations", outcome.evaluations.to_string()),
            ("Edges", outcome.graph.edge_count().to_string()),
            ("Elapsed", format!("{:.2?}", started.elapsed())),
        ],
    );
    Ok(())
}
