use crate::graph::GraphState;
use crate::scorer::Fitness;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Snapshot handed to a [`ProgressCallback`] at each loop boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// Improvements (hill climbing), iterations (annealing) or generations.
    pub iteration: usize,
    pub current: Fitness,
    pub best: Fitness,
}

/// A trait for receiving updates during a search.
/// Boolean return value indicates if the search should continue (true) or abort (false).
pub trait ProgressCallback {
    fn on_progress(&self, progress: &Progress, best_graph: &GraphState) -> bool;
}

impl<F> ProgressCallback for F
where
    F: Fn(&Progress, &GraphState) -> bool,
{
    fn on_progress(&self, progress: &Progress, best_graph: &GraphState) -> bool {
        self(progress, best_graph)
    }
}

/// Never aborts.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl ProgressCallback for Silent {
    fn on_progress(&self, _progress: &Progress, _best_graph: &GraphState) -> bool {
        true
    }
}

/// Aborts once `limit` reports have been seen.
#[derive(Debug, Default)]
pub struct StopAfter {
    limit: usize,
    seen: AtomicUsize,
}

impl StopAfter {
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            seen: AtomicUsize::new(0),
        }
    }

    pub fn seen(&self) -> usize {
        self.seen.load(Ordering::Relaxed)
    }
}

impl ProgressCallback for StopAfter {
    fn on_progress(&self, _progress: &Progress, _best_graph: &GraphState) -> bool {
        let seen = self.seen.fetch_add(1, Ordering::Relaxed) + 1;
        seen < self.limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_after_counts_reports() {
        let g = GraphState::empty(3);
        let p = Progress {
            iteration: 0,
            current: 1,
            best: 1,
        };
        let stop = StopAfter::new(2);
        assert!(stop.on_progress(&p, &g));
        assert!(!stop.on_progress(&p, &g));
        assert_eq!(stop.seen(), 2);
        assert!(Silent.on_progress(&p, &g));
    }
}
