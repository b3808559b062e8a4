pub mod adjlist;
pub mod matrix;

pub use self::matrix::{AdjacencyMatrix, Symmetrize};

use crate::error::{RamseyError, RfResult};
use fastrand::Rng;

/// Neighbour sets are `u64` bitsets, one per vertex.
pub const MAX_VERTICES: usize = 64;

#[inline(always)]
const fn bit(v: usize) -> u64 {
    1u64 << v
}

/// Mask with the lowest `n` bits set.
#[inline(always)]
pub const fn all_bits(n: usize) -> u64 {
    if n >= 64 {
        u64::MAX
    } else {
        (1u64 << n) - 1
    }
}

/// Number of unordered vertex pairs, i.e. the edge count of `K_n`.
#[inline(always)]
pub const fn pair_count(n: usize) -> usize {
    n * n.saturating_sub(1) / 2
}

/// A simple undirected graph over the vertices `0..n`.
///
/// Edge present = colour A, edge absent = colour B of a 2-coloured `K_n`.
/// Adjacency is symmetric and loop-free by construction; every mutation
/// goes through [`GraphState::toggle_edge`] or [`GraphState::set_edge`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GraphState {
    n: usize,
    adj: Vec<u64>,
}

impl GraphState {
    pub fn empty(n: usize) -> Self {
        assert!(
            n <= MAX_VERTICES,
            "graph has {} vertices, the limit is {}",
            n,
            MAX_VERTICES
        );
        Self {
            n,
            adj: vec![0; n],
        }
    }

    pub fn complete(n: usize) -> Self {
        let mut g = Self::empty(n);
        let mask = all_bits(n);
        for (v, row) in g.adj.iter_mut().enumerate() {
            *row = mask & !bit(v);
        }
        g
    }

    pub fn from_edges(n: usize, edges: &[(usize, usize)]) -> RfResult<Self> {
        let mut g = Self::empty(n);
        for &(u, v) in edges {
            g.check_pair(u, v)?;
            g.set_edge(u, v, true);
        }
        Ok(g)
    }

    /// Uniform `G(n, m)` graph: `m` distinct pairs drawn without replacement.
    /// `m` is clamped to the number of available pairs.
    pub fn random_with_edges(n: usize, m: usize, rng: &mut Rng) -> Self {
        let mut pairs: Vec<(usize, usize)> = (0..n)
            .flat_map(|u| ((u + 1)..n).map(move |v| (u, v)))
            .collect();
        let m = m.min(pairs.len());

        // Partial Fisher-Yates
        for i in 0..m {
            let j = rng.usize(i..pairs.len());
            pairs.swap(i, j);
        }

        let mut g = Self::empty(n);
        for &(u, v) in &pairs[..m] {
            g.set_edge(u, v, true);
        }
        g
    }

    #[inline(always)]
    pub fn vertex_count(&self) -> usize {
        self.n
    }

    #[inline(always)]
    pub fn has_edge(&self, u: usize, v: usize) -> bool {
        (self.adj[u] >> v) & 1 == 1
    }

    /// Neighbour bitset of `v`.
    #[inline(always)]
    pub fn neighbours(&self, v: usize) -> u64 {
        self.adj[v]
    }

    pub fn degree(&self, v: usize) -> u32 {
        self.adj[v].count_ones()
    }

    pub fn edge_count(&self) -> usize {
        let twice: u32 = self.adj.iter().map(|row| row.count_ones()).sum();
        (twice / 2) as usize
    }

    /// Edges as `(u, v)` with `u < v`, in lexicographic order.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.n).flat_map(move |u| {
            ((u + 1)..self.n)
                .filter(move |&v| self.has_edge(u, v))
                .map(move |v| (u, v))
        })
    }

    /// A fresh graph on the same vertices holding exactly the absent pairs.
    pub fn complement(&self) -> Self {
        let mask = all_bits(self.n);
        let adj = self
            .adj
            .iter()
            .enumerate()
            .map(|(v, &row)| !row & mask & !bit(v))
            .collect();
        Self { n: self.n, adj }
    }

    /// Sets the pair `(u, v)` present or absent in place.
    ///
    /// # Panics
    /// On `u == v` or an out-of-range vertex, like [`GraphState::toggle_edge`].
    pub fn set_edge(&mut self, u: usize, v: usize, present: bool) {
        if let Err(e) = self.check_pair(u, v) {
            panic!("{}", e);
        }
        if present {
            self.adj[u] |= bit(v);
            self.adj[v] |= bit(u);
        } else {
            self.adj[u] &= !bit(v);
            self.adj[v] &= !bit(u);
        }
    }

    /// Flips the pair `(u, v)` in place, reporting an invalid pair as an error.
    pub fn try_toggle(&mut self, u: usize, v: usize) -> RfResult<()> {
        self.check_pair(u, v)?;
        self.adj[u] ^= bit(v);
        self.adj[v] ^= bit(u);
        Ok(())
    }

    /// Flips the pair `(u, v)` in place.
    ///
    /// # Panics
    /// On `u == v` or an out-of-range vertex; callers only ever pass pairs
    /// drawn from the vertex set.
    pub fn toggle_edge(&mut self, u: usize, v: usize) {
        if let Err(e) = self.try_toggle(u, v) {
            panic!("{}", e);
        }
    }

    /// Copy-then-mutate neighbour at Hamming distance 1.
    pub fn toggled(&self, u: usize, v: usize) -> Self {
        let mut next = self.clone();
        next.toggle_edge(u, v);
        next
    }

    pub fn to_matrix(&self) -> AdjacencyMatrix {
        let mut m = AdjacencyMatrix::zeros(self.n, self.n);
        for u in 0..self.n {
            for v in 0..self.n {
                if self.has_edge(u, v) {
                    m.set(u, v, true);
                }
            }
        }
        m
    }

    fn check_pair(&self, u: usize, v: usize) -> RfResult<()> {
        if u == v || u >= self.n || v >= self.n {
            return Err(RamseyError::InvalidMove {
                u,
                v,
                vertices: self.n,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_symmetric_loop_free(g: &GraphState) -> bool {
        (0..g.vertex_count()).all(|u| {
            !g.has_edge(u, u) && (0..g.vertex_count()).all(|v| g.has_edge(u, v) == g.has_edge(v, u))
        })
    }

    #[test]
    fn test_complete_graph_edge_count() {
        let g = GraphState::complete(43);
        assert_eq!(g.edge_count(), 903);
        assert_eq!(g.degree(0), 42);
        assert!(is_symmetric_loop_free(&g));
    }

    #[test]
    fn test_complement_of_empty_is_complete() {
        assert_eq!(GraphState::empty(7).complement(), GraphState::complete(7));
        assert_eq!(GraphState::complete(64).complement(), GraphState::empty(64));
    }

    #[test]
    fn test_toggle_is_involution() {
        let g = GraphState::from_edges(6, &[(0, 1), (2, 3)]).unwrap();
        let once = g.toggled(1, 4);
        assert!(once.has_edge(4, 1));
        assert_eq!(once.edge_count(), 3);
        assert_eq!(once.toggled(4, 1), g);
    }

    #[test]
    fn test_try_toggle_rejects_bad_pairs() {
        let mut g = GraphState::empty(5);
        assert!(matches!(
            g.try_toggle(2, 2),
            Err(RamseyError::InvalidMove { u: 2, v: 2, .. })
        ));
        assert!(g.try_toggle(0, 5).is_err());
        assert_eq!(g, GraphState::empty(5));
    }

    #[test]
    #[should_panic(expected = "Invalid move")]
    fn test_toggle_edge_fails_fast() {
        GraphState::empty(5).toggled(3, 3);
    }

    #[test]
    #[should_panic(expected = "Invalid move")]
    fn test_set_edge_rejects_self_loop() {
        GraphState::empty(5).set_edge(2, 2, true);
    }

    #[test]
    #[should_panic(expected = "Invalid move")]
    fn test_set_edge_rejects_out_of_range_vertex() {
        GraphState::empty(5).set_edge(0, 5, false);
    }

    #[test]
    fn test_set_edge_keeps_adjacency_symmetric() {
        let mut g = GraphState::empty(5);
        g.set_edge(3, 1, true);
        assert!(g.has_edge(1, 3) && g.has_edge(3, 1));
        assert!(is_symmetric_loop_free(&g));
        g.set_edge(1, 3, false);
        assert_eq!(g, GraphState::empty(5));
    }

    #[test]
    fn test_random_with_edges_exact_count() {
        let mut rng = Rng::with_seed(7);
        for m in [0, 1, 200, 703, 903] {
            let g = GraphState::random_with_edges(43, m, &mut rng);
            assert_eq!(g.edge_count(), m);
            assert!(is_symmetric_loop_free(&g));
        }
        // Clamped
        let g = GraphState::random_with_edges(5, 100, &mut rng);
        assert_eq!(g.edge_count(), 10);
    }

    #[test]
    fn test_edges_are_ordered_pairs() {
        let g = GraphState::from_edges(4, &[(3, 1), (0, 2)]).unwrap();
        let edges: Vec<_> = g.edges().collect();
        assert_eq!(edges, vec![(0, 2), (1, 3)]);
    }
}
