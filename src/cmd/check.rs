use crate::reports::{self, CheckRow};
use clap::Args;
use ramseyforge::config::Config;
use ramseyforge::error::RfResult;
use ramseyforge::scorer::FitnessOracle;
use ramseyforge::store::load_graph_file;
use rayon::prelude::*;
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    #[command(flatten)]
    pub config: Config,

    /// Adjacency-list files to score.
    #[arg(required = true, num_args = 1..)]
    pub files: Vec<PathBuf>,
}

pub fn run(args: &CheckArgs, config: &Config) -> RfResult<()> {
    let oracle = FitnessOracle::new(config.graph.clique_size);
    info!("🔎 Scoring {} file(s)", args.files.len());

    let mut rows = args
        .files
        .par_iter()
        .map(|path| -> RfResult<CheckRow> {
            let graph = load_graph_file(path)?;
            Ok(CheckRow {
                name: path.display().to_string(),
                vertices: graph.vertex_count(),
                edges: graph.edge_count(),
                census: oracle.census(&graph),
            })
        })
        .collect::<RfResult<Vec<_>>>()?;

    rows.sort_by_key(|r| r.census.total());
    reports::print_census_report(oracle.clique_size(), &rows);
    Ok(())
}
