use super::runner::{Progress, ProgressCallback};
use crate::graph::GraphState;
use crate::scorer::{Evaluator, Fitness};
use strum_macros::{Display, EnumString};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum ClimbStatus {
    /// Still descending; only reported when the run was cancelled.
    Improving,
    /// A full pass over every pair found no strictly better neighbour.
    Peaked,
    /// Fitness reached zero.
    Solved,
}

#[derive(Debug, Clone)]
pub struct ClimbOutcome {
    pub graph: GraphState,
    pub fitness: Fitness,
    pub status: ClimbStatus,
    pub passes: usize,
    pub improvements: usize,
    pub evaluations: usize,
}

/// First-improvement steepest descent over single-edge toggles.
pub struct HillClimb<'a, E: Evaluator> {
    evaluator: &'a E,
}

impl<'a, E: Evaluator> HillClimb<'a, E> {
    pub fn new(evaluator: &'a E) -> Self {
        Self { evaluator }
    }

    /// Scans pairs `(u, v)` with `u` descending from the last vertex and `v`
    /// ascending below it, so each unordered pair is tried once per pass.
    /// Returns the first neighbour strictly better than `cliques`.
    pub fn first_improvement(
        &self,
        graph: &GraphState,
        cliques: Fitness,
        evaluations: &mut usize,
    ) -> Option<(GraphState, Fitness)> {
        let n = graph.vertex_count();
        for u in (0..n).rev() {
            for v in 0..u {
                let neighbour = graph.toggled(u, v);
                let fitness = self.evaluator.evaluate(&neighbour);
                *evaluations += 1;
                if fitness < cliques {
                    return Some((neighbour, fitness));
                }
            }
        }
        None
    }

    pub fn run<CB: ProgressCallback>(&self, start: GraphState, callback: &CB) -> ClimbOutcome {
        let mut graph = start;
        let mut cliques = self.evaluator.evaluate(&graph);
        let mut evaluations = 1;
        let mut passes = 0;
        let mut improvements = 0;

        info!(
            "Hill climbing from fitness {} ({} vertices, {} edges)",
            cliques,
            graph.vertex_count(),
            graph.edge_count()
        );

        let status = loop {
            if cliques == 0 {
                break ClimbStatus::Solved;
            }

            passes += 1;
            match self.first_improvement(&graph, cliques, &mut evaluations) {
                Some((next, fitness)) => {
                    debug!("Pass {}: {} -> {}", passes, cliques, fitness);
                    graph = next;
                    cliques = fitness;
                    improvements += 1;

                    let progress = Progress {
                        iteration: improvements,
                        current: cliques,
                        best: cliques,
                    };
                    if !callback.on_progress(&progress, &graph) {
                        info!("Hill climb cancelled at fitness {}", cliques);
                        break ClimbStatus::Improving;
                    }
                }
                None => break ClimbStatus::Peaked,
            }
        };

        info!(
            "Hill climb finished: {} at fitness {} after {} passes",
            status, cliques, passes
        );

        ClimbOutcome {
            graph,
            fitness: cliques,
            status,
            passes,
            improvements,
            evaluations,
        }
    }
}
