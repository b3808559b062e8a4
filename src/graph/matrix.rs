use super::GraphState;
use serde::{Deserialize, Serialize};
use std::ops::Range;
use strum_macros::{Display, EnumIter, EnumString};

/// How a possibly asymmetric matrix is folded back into an undirected graph.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, EnumIter, EnumString, Display, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Symmetrize {
    /// Edge iff either `M[i][j]` or `M[j][i]` is set.
    #[default]
    Union,
    /// Edge iff the upper-triangle cell `M[min][max]` is set.
    Upper,
}

/// Row-major boolean matrix. Unlike [`GraphState`] it carries no symmetry
/// guarantee, so crossover can splice row blocks from different parents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjacencyMatrix {
    rows: usize,
    cols: usize,
    cells: Vec<bool>,
}

impl AdjacencyMatrix {
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![false; rows * cols],
        }
    }

    pub fn filled(rows: usize, cols: usize, value: bool) -> Self {
        Self {
            rows,
            cols,
            cells: vec![value; rows * cols],
        }
    }

    #[inline(always)]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline(always)]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline(always)]
    pub fn get(&self, i: usize, j: usize) -> bool {
        self.cells[i * self.cols + j]
    }

    #[inline(always)]
    pub fn set(&mut self, i: usize, j: usize, value: bool) {
        self.cells[i * self.cols + j] = value;
    }

    /// Toggles a single directed cell.
    pub fn flip(&mut self, i: usize, j: usize) {
        let idx = i * self.cols + j;
        self.cells[idx] = !self.cells[idx];
    }

    pub fn row(&self, i: usize) -> &[bool] {
        &self.cells[i * self.cols..(i + 1) * self.cols]
    }

    /// Copies the contiguous row block `range`.
    pub fn slice_rows(&self, range: Range<usize>) -> Self {
        let start = range.start * self.cols;
        let end = range.end * self.cols;
        Self {
            rows: range.len(),
            cols: self.cols,
            cells: self.cells[start..end].to_vec(),
        }
    }

    /// Vertical concatenation of row blocks sharing one column count.
    pub fn stack(blocks: &[AdjacencyMatrix]) -> Self {
        let cols = blocks.first().map_or(0, |b| b.cols);
        let mut cells = Vec::with_capacity(blocks.iter().map(|b| b.cells.len()).sum());
        let mut rows = 0;
        for b in blocks {
            assert_eq!(b.cols, cols, "row blocks disagree on column count");
            cells.extend_from_slice(&b.cells);
            rows += b.rows;
        }
        Self { rows, cols, cells }
    }

    pub fn ones_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Decodes into a graph. The diagonal is always dropped.
    ///
    /// # Panics
    /// If the matrix is not square.
    pub fn to_graph(&self, policy: Symmetrize) -> GraphState {
        assert_eq!(
            self.rows, self.cols,
            "cannot decode a {}x{} matrix into a graph",
            self.rows, self.cols
        );
        let n = self.rows;
        let mut g = GraphState::empty(n);
        for i in 0..n {
            for j in (i + 1)..n {
                let present = match policy {
                    Symmetrize::Union => self.get(i, j) || self.get(j, i),
                    Symmetrize::Upper => self.get(i, j),
                };
                if present {
                    g.set_edge(i, j, true);
                }
            }
        }
        g
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_decode_identity() {
        let g = GraphState::from_edges(5, &[(0, 4), (1, 2), (2, 3)]).unwrap();
        let m = g.to_matrix();
        assert_eq!(m.ones_count(), 6);
        assert_eq!(m.to_graph(Symmetrize::Union), g);
        assert_eq!(m.to_graph(Symmetrize::Upper), g);
    }

    #[test]
    fn test_symmetrize_policies_on_asymmetric_cells() {
        let mut m = AdjacencyMatrix::zeros(3, 3);
        m.set(2, 0, true); // lower triangle only
        m.set(0, 1, true); // upper triangle only
        m.set(1, 1, true); // diagonal

        let union = m.to_graph(Symmetrize::Union);
        assert!(union.has_edge(0, 2));
        assert!(union.has_edge(0, 1));
        assert_eq!(union.edge_count(), 2);

        let upper = m.to_graph(Symmetrize::Upper);
        assert!(!upper.has_edge(0, 2));
        assert!(upper.has_edge(0, 1));
        assert_eq!(upper.edge_count(), 1);
    }

    #[test]
    fn test_slice_and_stack() {
        let ones = AdjacencyMatrix::filled(4, 4, true);
        let zeros = AdjacencyMatrix::zeros(4, 4);
        let m = AdjacencyMatrix::stack(&[ones.slice_rows(0..1), zeros.slice_rows(1..4)]);
        assert_eq!(m.rows(), 4);
        assert!(m.row(0).iter().all(|&c| c));
        assert!((1..4).all(|i| m.row(i).iter().all(|&c| !c)));
    }

    #[test]
    fn test_policy_parsing() {
        assert_eq!("union".parse::<Symmetrize>().unwrap(), Symmetrize::Union);
        assert_eq!("upper".parse::<Symmetrize>().unwrap(), Symmetrize::Upper);
        assert_eq!(Symmetrize::Upper.to_string(), "upper");
        assert!("lower".parse::<Symmetrize>().is_err());
    }
}
