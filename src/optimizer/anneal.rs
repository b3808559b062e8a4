use super::best::BestTracker;
use super::mutation::random_pair;
use super::runner::{Progress, ProgressCallback};
use super::seeded_rng;
use crate::config::AnnealParams;
use crate::error::{RamseyError, RfResult};
use crate::graph::GraphState;
use crate::scorer::{Evaluator, Fitness};
use fastrand::Rng;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use tracing::{debug, info};

/// Linear cooling in exact decimal arithmetic, so `initial / step`
/// subtractions land on zero exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoolingSchedule {
    pub initial: Decimal,
    pub step: Decimal,
}

impl Default for CoolingSchedule {
    fn default() -> Self {
        Self {
            initial: Decimal::from(5),
            step: Decimal::new(1, 5),
        }
    }
}

impl From<&AnnealParams> for CoolingSchedule {
    fn from(params: &AnnealParams) -> Self {
        Self {
            initial: params.temp_initial,
            step: params.temp_step,
        }
    }
}

impl CoolingSchedule {
    /// Iterations the loop runs before the temperature is no longer positive.
    pub fn iterations(&self) -> u64 {
        if self.initial <= Decimal::ZERO || self.step <= Decimal::ZERO {
            return 0;
        }
        (self.initial / self.step).ceil().to_u64().unwrap_or(u64::MAX)
    }
}

/// Metropolis rule. Strict improvements are always taken; otherwise the move
/// is taken when `exp((current - neighbour) / temperature) > draw`.
pub fn accept(current: Fitness, neighbour: Fitness, temperature: Decimal, draw: f64) -> bool {
    if neighbour < current {
        return true;
    }
    if temperature <= Decimal::ZERO {
        return false;
    }
    let delta = Decimal::from(current) - Decimal::from(neighbour);
    let exponent = delta
        .checked_div(temperature)
        .and_then(|x| x.to_f64())
        .unwrap_or(f64::NEG_INFINITY);
    exponent.exp() > draw
}

#[derive(Debug, Clone)]
pub struct AnnealOutcome {
    pub best: GraphState,
    pub best_fitness: Fitness,
    pub current: GraphState,
    pub current_fitness: Fitness,
    pub iterations: usize,
    pub accepted: usize,
    pub evaluations: usize,
    pub temperature: Decimal,
    pub solved: bool,
}

/// Single-chain simulated annealing over single-edge toggles.
pub struct Annealer<'a, E: Evaluator> {
    evaluator: &'a E,
    pub rng: Rng,
    current: GraphState,
    current_fitness: Fitness,
    temperature: Decimal,
    step: Decimal,
    best: BestTracker,
    iterations: usize,
    accepted: usize,
    evaluations: usize,
    report_every: usize,
}

impl<'a, E: Evaluator> Annealer<'a, E> {
    pub fn new(
        evaluator: &'a E,
        start: GraphState,
        schedule: CoolingSchedule,
        seed: Option<u64>,
    ) -> RfResult<Self> {
        if start.vertex_count() < 2 {
            return Err(RamseyError::Config(format!(
                "annealing needs at least 2 vertices, got {}",
                start.vertex_count()
            )));
        }
        if schedule.step <= Decimal::ZERO {
            return Err(RamseyError::Config(format!(
                "cooling step must be positive, got {}",
                schedule.step
            )));
        }

        let current_fitness = evaluator.evaluate(&start);
        let mut best = BestTracker::new();
        best.offer(&start, current_fitness);

        Ok(Self {
            evaluator,
            rng: seeded_rng(seed),
            current: start,
            current_fitness,
            temperature: schedule.initial,
            step: schedule.step,
            best,
            iterations: 0,
            accepted: 0,
            evaluations: 1,
            report_every: 1_000,
        })
    }

    /// Iterations between progress reports (and cancellation checks).
    pub fn with_report_interval(mut self, every: usize) -> Self {
        self.report_every = every.max(1);
        self
    }

    pub fn temperature(&self) -> Decimal {
        self.temperature
    }

    pub fn current(&self) -> &GraphState {
        &self.current
    }

    pub fn current_fitness(&self) -> Fitness {
        self.current_fitness
    }

    pub fn best(&self) -> &BestTracker {
        &self.best
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn is_cooled(&self) -> bool {
        self.temperature <= Decimal::ZERO
    }

    /// One iteration with a forced pair and uniform draw. Returns whether the
    /// neighbour was accepted.
    pub fn step_with(&mut self, u: usize, v: usize, draw: f64) -> bool {
        let neighbour = self.current.toggled(u, v);
        let neighbour_fitness = self.evaluator.evaluate(&neighbour);
        self.evaluations += 1;

        // Both candidates are checked against history.
        self.best.offer(&self.current, self.current_fitness);
        let taken = if neighbour_fitness < self.current_fitness {
            self.best.offer(&neighbour, neighbour_fitness);
            true
        } else {
            accept(
                self.current_fitness,
                neighbour_fitness,
                self.temperature,
                draw,
            )
        };

        if taken {
            self.current = neighbour;
            self.current_fitness = neighbour_fitness;
            self.accepted += 1;
        }

        self.temperature -= self.step;
        self.iterations += 1;
        taken
    }

    /// One iteration on a uniformly drawn pair of distinct vertices.
    pub fn step(&mut self) -> bool {
        let (u, v) = random_pair(&mut self.rng, self.current.vertex_count());
        let draw = self.rng.f64();
        self.step_with(u, v, draw)
    }

    /// Cools until the temperature is no longer positive, a zero-fitness
    /// graph is found, or the callback aborts.
    pub fn run<CB: ProgressCallback>(mut self, callback: &CB) -> AnnealOutcome {
        info!(
            "Annealing from fitness {} at T = {} (step {})",
            self.current_fitness, self.temperature, self.step
        );

        while self.temperature > Decimal::ZERO {
            // Checked before stepping so a solved start is returned untouched.
            if self.best.is_solved() {
                info!("Solution found after {} iterations", self.iterations);
                break;
            }

            self.step();

            if self.iterations % self.report_every == 0 {
                let best = self.best.fitness().unwrap_or(self.current_fitness);
                debug!(
                    "Iter {} | T = {} | current {} | best {}",
                    self.iterations, self.temperature, self.current_fitness, best
                );
                let progress = Progress {
                    iteration: self.iterations,
                    current: self.current_fitness,
                    best,
                };
                let graph = self.best.graph().unwrap_or(&self.current);
                if !callback.on_progress(&progress, graph) {
                    info!("Annealing cancelled at T = {}", self.temperature);
                    break;
                }
            }
        }

        let solved = self.best.is_solved();
        let current = self.current;
        let current_fitness = self.current_fitness;
        let (best, best_fitness) = self
            .best
            .into_inner()
            .unwrap_or_else(|| (current.clone(), current_fitness));

        info!(
            "Annealing finished: best {} after {} iterations ({} accepted)",
            best_fitness, self.iterations, self.accepted
        );

        AnnealOutcome {
            best,
            best_fitness,
            current,
            current_fitness,
            iterations: self.iterations,
            accepted: self.accepted,
            evaluations: self.evaluations,
            temperature: self.temperature,
            solved,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_improvement_ignores_draw() {
        assert!(accept(10, 9, Decimal::ONE, 0.999_999));
        assert!(accept(10, 0, Decimal::ZERO, 0.5));
    }

    #[test]
    fn test_equal_fitness_always_accepted() {
        // exp(0) = 1 > any draw in [0, 1)
        assert!(accept(4, 4, Decimal::new(1, 5), 0.999_999));
    }

    #[test]
    fn test_worsening_acceptance_threshold() {
        let t = Decimal::ONE;
        // exp(-1) ~ 0.3679
        assert!(accept(5, 6, t, 0.36));
        assert!(!accept(5, 6, t, 0.37));
        // Tiny temperature freezes out worsening moves
        assert!(!accept(5, 6, Decimal::new(1, 5), 0.0));
    }

    #[test]
    fn test_schedule_iteration_count_is_exact() {
        assert_eq!(CoolingSchedule::default().iterations(), 500_000);
        let s = CoolingSchedule {
            initial: Decimal::new(1, 3),
            step: Decimal::new(3, 4),
        };
        assert_eq!(s.iterations(), 4);
        let cold = CoolingSchedule {
            initial: Decimal::ZERO,
            step: Decimal::new(1, 5),
        };
        assert_eq!(cold.iterations(), 0);
    }
}
