use crate::graph::{all_bits, GraphState};

/// Exact number of `k`-vertex cliques in `graph`.
///
/// Every clique is reached once, through its vertices in increasing order:
/// the candidate set passed down only holds common neighbours with a larger
/// index than the last vertex picked.
pub fn count_cliques(graph: &GraphState, k: usize) -> u64 {
    if graph.vertex_count() < k {
        return 0;
    }
    extend(graph, all_bits(graph.vertex_count()), k)
}

fn extend(graph: &GraphState, candidates: u64, remaining: usize) -> u64 {
    if remaining == 0 {
        return 1;
    }
    let available = candidates.count_ones() as usize;
    if available < remaining {
        return 0;
    }
    if remaining == 1 {
        return available as u64;
    }

    let mut total = 0;
    let mut rest = candidates;
    while rest != 0 {
        let v = rest.trailing_zeros() as usize;
        rest &= rest - 1;
        // `rest` now only holds candidates above v
        total += extend(graph, rest & graph.neighbours(v), remaining - 1);
    }
    total
}
