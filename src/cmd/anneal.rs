use crate::reports;
use clap::Args;
use ramseyforge::config::Config;
use ramseyforge::error::RfResult;
use ramseyforge::graph::GraphState;
use ramseyforge::optimizer::{Annealer, CoolingSchedule, Progress};
use ramseyforge::scorer::FitnessOracle;
use ramseyforge::store::save_graph_file;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info};

#[derive(Args, Debug, Clone)]
pub struct AnnealArgs {
    #[command(flatten)]
    pub config: Config,

    /// Starting graph; a random half-density graph when omitted.
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Best graph across all rounds.
    #[arg(short, long, default_value = "best.txt")]
    pub best: PathBuf,

    /// Iterations between progress lines.
    #[arg(long, default_value_t = 10_000)]
    pub report_every: usize,
}

pub fn run(args: &AnnealArgs, config: &Config, seed: Option<u64>) -> RfResult<()> {
    let mut start = super::starting_graph(args.input.as_deref(), config.graph.vertices, seed)?;
    let oracle = FitnessOracle::new(config.graph.clique_size);
    let schedule = CoolingSchedule::from(&config.anneal);
    let started = Instant::now();

    info!(
        "🔥 Annealing {} round(s) of {} iterations",
        config.anneal.rounds,
        schedule.iterations()
    );

    let report = |progress: &Progress, _best: &GraphState| {
        debug!(
            "Iter {} | current {} | best {}",
            progress.iteration, progress.current, progress.best
        );
        true
    };

    let mut overall: Option<(GraphState, u64)> = None;
    let mut rounds_run = 0;
    let mut iterations = 0;
    let mut accepted = 0;

    for round in 0..config.anneal.rounds {
        let round_seed = seed.map(|s| s.wrapping_add(round as u64));
        let annealer = Annealer::new(&oracle, start, schedule, round_seed)?
            .with_report_interval(args.report_every);
        let outcome = annealer.run(&report);
        rounds_run += 1;
        iterations += outcome.iterations;
        accepted += outcome.accepted;

        info!(
            "Round {}: best {} | final {}",
            round + 1,
            outcome.best_fitness,
            outcome.current_fitness
        );

        let improved = overall
            .as_ref()
            .map_or(true, |(_, f)| outcome.best_fitness < *f);
        if improved {
            save_graph_file(&args.best, &outcome.best)?;
            overall = Some((outcome.best.clone(), outcome.best_fitness));
        }

        if outcome.solved {
            info!("🎉 Counterexample found, saved to {}", args.best.display());
            break;
        }
        start = outcome.current;
    }

    let best_fitness = overall.map(|(_, f)| f.to_string()).unwrap_or_else(|| "-".into());
    reports::print_run_summary(
        "Simulated Annealing",
        &[
            ("Rounds", rounds_run.to_string()),
            ("Best fitness", best_fitness),
            ("Iterations", iterations.to_string()),
            ("Accepted", accepted.to_string()),
            ("Best graph", args.best.display().to_string()),
            ("Elapsed", format!("{:.2?}", started.elapsed())),
        ],
    );
    Ok(())
}
