use crate::graph::{GraphState, Symmetrize};
use fastrand::Rng;

/// Uniform unordered pair of distinct vertices in `0..n`.
///
/// # Panics
/// If `n < 2`.
pub fn random_pair(rng: &mut Rng, n: usize) -> (usize, usize) {
    assert!(n >= 2, "need two vertices to pick a pair, got {}", n);
    let u = rng.usize(0..n);
    let mut v = rng.usize(0..n - 1);
    if v >= u {
        v += 1;
    }
    (u, v)
}

/// Copies `parent` and applies `flips` symmetric cell flips on its matrix.
/// The same pair may be drawn twice, which cancels out.
pub fn mutate(parent: &GraphState, flips: usize, policy: Symmetrize, rng: &mut Rng) -> GraphState {
    let n = parent.vertex_count();
    if n < 2 {
        return parent.clone();
    }
    let mut matrix = parent.to_matrix();
    for _ in 0..flips {
        let (i, j) = random_pair(rng, n);
        matrix.flip(i, j);
        matrix.flip(j, i);
    }
    matrix.to_graph(policy)
}

/// Mutation with a flip count drawn uniformly from `1..=flips_max`.
pub fn mutate_random(
    parent: &GraphState,
    flips_max: usize,
    policy: Symmetrize,
    rng: &mut Rng,
) -> GraphState {
    let flips = rng.usize(1..=flips_max.max(1));
    mutate(parent, flips, policy, rng)
}
