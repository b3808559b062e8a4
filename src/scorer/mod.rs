pub mod cliques;

pub use self::cliques::count_cliques;
use crate::graph::GraphState;
use serde::Serialize;

/// Clique count of a graph plus that of its complement. Lower is better;
/// zero is a Ramsey counterexample.
pub type Fitness = u64;

pub const DEFAULT_CLIQUE_SIZE: usize = 5;

/// Scores a candidate graph. Implementations must be pure: the same graph
/// always yields the same value.
pub trait Evaluator {
    fn evaluate(&self, graph: &GraphState) -> Fitness;
}

impl<F> Evaluator for F
where
    F: Fn(&GraphState) -> Fitness,
{
    fn evaluate(&self, graph: &GraphState) -> Fitness {
        self(graph)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Census {
    /// Cliques in the graph (colour A).
    pub graph: u64,
    /// Cliques in the complement, i.e. independent sets of the graph (colour B).
    pub complement: u64,
}

impl Census {
    #[inline(always)]
    pub fn total(&self) -> Fitness {
        self.graph + self.complement
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FitnessOracle {
    clique_size: usize,
}

impl Default for FitnessOracle {
    fn default() -> Self {
        Self::new(DEFAULT_CLIQUE_SIZE)
    }
}

impl FitnessOracle {
    pub fn new(clique_size: usize) -> Self {
        Self { clique_size }
    }

    pub fn clique_size(&self) -> usize {
        self.clique_size
    }

    pub fn census(&self, graph: &GraphState) -> Census {
        let complement = graph.complement();
        Census {
            graph: count_cliques(graph, self.clique_size),
            complement: count_cliques(&complement, self.clique_size),
        }
    }

    pub fn fitness(&self, graph: &GraphState) -> Fitness {
        self.census(graph).total()
    }
}

impl Evaluator for FitnessOracle {
    fn evaluate(&self, graph: &GraphState) -> Fitness {
        self.fitness(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_k5_scores_one() {
        let oracle = FitnessOracle::default();
        let census = oracle.census(&GraphState::complete(5));
        assert_eq!(census, Census { graph: 1, complement: 0 });
        assert_eq!(census.total(), 1);
    }

    #[test]
    fn test_empty_five_vertex_graph_scores_one() {
        let oracle = FitnessOracle::default();
        let census = oracle.census(&GraphState::empty(5));
        assert_eq!(census, Census { graph: 0, complement: 1 });
    }

    #[test]
    fn test_closures_are_evaluators() {
        let by_edges = |g: &GraphState| g.edge_count() as Fitness;
        assert_eq!(by_edges.evaluate(&GraphState::complete(4)), 6);
    }
}
