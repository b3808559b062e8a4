use crate::graph::{AdjacencyMatrix, GraphState, Symmetrize};
use fastrand::Rng;

/// Block end rows for a `blocks`-way row split of an `n`-row matrix.
///
/// A block with `r` blocks still to place (itself included) ends uniformly in
/// `[lim + 1, n - r]`. The final block always ends at `n`. `blocks` is
/// clamped to `[1, n - 1]`.
pub fn random_cuts(rng: &mut Rng, n: usize, blocks: usize) -> Vec<usize> {
    let blocks = blocks.clamp(1, n.saturating_sub(1).max(1));
    let mut cuts = Vec::with_capacity(blocks);
    let mut lim = 0;
    for remaining in (2..=blocks).rev() {
        let cut = rng.usize(lim + 1..=n - remaining);
        cuts.push(cut);
        lim = cut;
    }
    cuts.push(n);
    cuts
}

/// Splices row blocks of `p1` and `p2` along `cuts` (block end rows, last one
/// equal to the row count). Offspring `h` takes block `k` from `p1` when the
/// number of blocks left including `k` is even; `i` takes the other parent's
/// block.
pub fn crossover_with_cuts(
    p1: &AdjacencyMatrix,
    p2: &AdjacencyMatrix,
    cuts: &[usize],
) -> (AdjacencyMatrix, AdjacencyMatrix) {
    let total = cuts.len();
    let mut h = Vec::with_capacity(total);
    let mut i = Vec::with_capacity(total);
    let mut start = 0;
    for (k, &end) in cuts.iter().enumerate() {
        let remaining = total - k;
        let (first, second) = if remaining % 2 == 0 { (p1, p2) } else { (p2, p1) };
        h.push(first.slice_rows(start..end));
        i.push(second.slice_rows(start..end));
        start = end;
    }
    (AdjacencyMatrix::stack(&h), AdjacencyMatrix::stack(&i))
}

/// Multi-point row crossover of two graphs; block count uniform in
/// `2..=blocks_max`.
pub fn crossover(
    p1: &GraphState,
    p2: &GraphState,
    blocks_max: usize,
    policy: Symmetrize,
    rng: &mut Rng,
) -> (GraphState, GraphState) {
    let n = p1.vertex_count();
    let blocks = rng.usize(2..=blocks_max.max(2));
    let cuts = random_cuts(rng, n, blocks);
    let (h, i) = crossover_with_cuts(&p1.to_matrix(), &p2.to_matrix(), &cuts);
    (h.to_graph(policy), i.to_graph(policy))
}
