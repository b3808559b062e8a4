pub mod anneal;
pub mod check;
pub mod climb;
pub mod evolve;

use fastrand::Rng;
use ramseyforge::error::RfResult;
use ramseyforge::graph::{pair_count, GraphState};
use ramseyforge::store::load_graph_file;
use std::path::Path;
use tracing::info;

/// Loads `input`, or draws a half-density random graph on `vertices`.
pub fn starting_graph(
    input: Option<&Path>,
    vertices: usize,
    seed: Option<u64>,
) -> RfResult<GraphState> {
    match input {
        Some(path) => {
            info!("📂 Loading graph: {}", path.display());
            load_graph_file(path)
        }
        None => {
            let mut rng = seed.map_or_else(Rng::new, Rng::with_seed);
            info!("🎲 Drawing a random graph on {} vertices", vertices);
            Ok(GraphState::random_with_edges(
                vertices,
                pair_count(vertices) / 2,
                &mut rng,
            ))
        }
    }
}
