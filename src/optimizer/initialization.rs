use crate::error::{RamseyError, RfResult};
use crate::graph::{pair_count, GraphState};
use crate::store::GraphStore;
use fastrand::Rng;
use tracing::{debug, info};

/// `size` random graphs on `n` vertices, each with an edge count drawn
/// uniformly from `[edge_min, edge_max]` (both clamped to `C(n, 2)`).
pub fn random_graphs(
    n: usize,
    size: usize,
    edge_min: usize,
    edge_max: usize,
    rng: &mut Rng,
) -> Vec<GraphState> {
    let pairs = pair_count(n);
    let hi = edge_max.min(pairs);
    let lo = edge_min.min(hi);
    debug!(
        "Synthesising {} graphs on {} vertices with {}..={} edges",
        size, n, lo, hi
    );
    (0..size)
        .map(|_| {
            let m = rng.usize(lo..=hi);
            GraphState::random_with_edges(n, m, rng)
        })
        .collect()
}

/// Reads graphs `0, 1, 2, ...` from the store until the first missing id.
/// All graphs must share one vertex count.
pub fn load_population<S: GraphStore>(store: &S) -> RfResult<Vec<GraphState>> {
    let mut graphs: Vec<GraphState> = Vec::new();
    let mut id = 0usize;
    while store.contains(&id.to_string()) {
        let g = store.load_graph(&id.to_string())?;
        if let Some(first) = graphs.first() {
            if first.vertex_count() != g.vertex_count() {
                return Err(RamseyError::Config(format!(
                    "stored graph {} has {} vertices, graph 0 has {}",
                    id,
                    g.vertex_count(),
                    first.vertex_count()
                )));
            }
        }
        graphs.push(g);
        id += 1;
    }
    if !graphs.is_empty() {
        info!("Loaded {} stored graphs", graphs.len());
    }
    Ok(graphs)
}
