use crate::graph::GraphState;
use crate::scorer::Fitness;

/// Lowest-fitness graph observed during one run. Owned by the strategy that
/// runs the search and handed back with its outcome.
#[derive(Debug, Clone, Default)]
pub struct BestTracker {
    best: Option<(GraphState, Fitness)>,
}

impl BestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `graph` if it is strictly better than everything seen so far.
    /// Ties keep the earlier graph.
    pub fn offer(&mut self, graph: &GraphState, fitness: Fitness) -> bool {
        match &self.best {
            Some((_, best)) if fitness >= *best => false,
            _ => {
                self.best = Some((graph.clone(), fitness));
                true
            }
        }
    }

    pub fn fitness(&self) -> Option<Fitness> {
        self.best.as_ref().map(|(_, f)| *f)
    }

    pub fn graph(&self) -> Option<&GraphState> {
        self.best.as_ref().map(|(g, _)| g)
    }

    pub fn is_solved(&self) -> bool {
        self.fitness() == Some(0)
    }

    pub fn into_inner(self) -> Option<(GraphState, Fitness)> {
        self.best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_strict_improvements_replace() {
        let a = GraphState::empty(4);
        let b = GraphState::complete(4);
        let mut best = BestTracker::new();
        assert!(best.fitness().is_none());

        assert!(best.offer(&a, 10));
        assert!(!best.offer(&b, 10));
        assert_eq!(best.graph(), Some(&a));

        assert!(best.offer(&b, 3));
        assert!(!best.offer(&a, 7));
        assert_eq!(best.fitness(), Some(3));
        assert!(!best.is_solved());

        assert!(best.offer(&a, 0));
        assert!(best.is_solved());
        assert_eq!(best.into_inner(), Some((a, 0)));
    }
}
