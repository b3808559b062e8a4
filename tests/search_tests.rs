use fastrand::Rng;
use ramseyforge::graph::{pair_count, GraphState};
use ramseyforge::optimizer::{
    Annealer, ClimbStatus, CoolingSchedule, HillClimb, Progress, Silent, StopAfter,
};
use ramseyforge::scorer::{Fitness, FitnessOracle};
use rust_decimal::Decimal;
use std::cell::RefCell;

fn short_schedule() -> CoolingSchedule {
    CoolingSchedule {
        initial: Decimal::new(1, 3),
        step: Decimal::new(1, 4),
    }
}

// --- HILL CLIMB ---

#[test]
fn test_climb_empty_five_vertices_solves_in_one_move() {
    let oracle = FitnessOracle::default();
    let out = HillClimb::new(&oracle).run(GraphState::empty(5), &Silent);
    assert_eq!(out.status, ClimbStatus::Solved);
    assert_eq!(out.fitness, 0);
    assert_eq!(out.passes, 1);
    assert_eq!(out.improvements, 1);
    // Start plus the first probe (4, 0).
    assert_eq!(out.evaluations, 2);
    assert_eq!(out.graph, GraphState::from_edges(5, &[(0, 4)]).unwrap());
}

#[test]
fn test_climb_already_solved_start() {
    let oracle = FitnessOracle::new(3);
    let c5 = GraphState::from_edges(5, &[(0, 1), (1, 2), (2, 3), (3, 4), (4, 0)]).unwrap();
    let out = HillClimb::new(&oracle).run(c5.clone(), &Silent);
    assert_eq!(out.status, ClimbStatus::Solved);
    assert_eq!(out.passes, 0);
    assert_eq!(out.evaluations, 1);
    assert_eq!(out.graph, c5);
}

#[test]
fn test_climb_peaks_when_no_toggle_helps() {
    // Minimised at exactly three edges, never zero.
    let target = |g: &GraphState| (g.edge_count() as i64 - 3).unsigned_abs() as Fitness + 1;
    let start = GraphState::from_edges(7, &[(0, 1), (2, 3), (4, 5)]).unwrap();
    let out = HillClimb::new(&target).run(start.clone(), &Silent);
    assert_eq!(out.status, ClimbStatus::Peaked);
    assert_eq!(out.fitness, 1);
    assert_eq!(out.passes, 1);
    assert_eq!(out.improvements, 0);
    assert_eq!(out.evaluations, 1 + pair_count(7));
    assert_eq!(out.graph, start);
}

#[test]
fn test_climb_reports_every_improvement() {
    let by_edges = |g: &GraphState| g.edge_count() as Fitness;
    let seen = RefCell::new(Vec::new());
    let record = |p: &Progress, g: &GraphState| {
        assert_eq!(g.edge_count() as Fitness, p.current);
        seen.borrow_mut().push(p.current);
        true
    };
    let out = HillClimb::new(&by_edges).run(GraphState::complete(5), &record);
    assert_eq!(out.status, ClimbStatus::Solved);
    assert_eq!(*seen.borrow(), (0..10).rev().collect::<Vec<Fitness>>());
}

#[test]
fn test_climb_cancellation_stops_while_improving() {
    let by_edges = |g: &GraphState| g.edge_count() as Fitness;
    let stop = StopAfter::new(1);
    let out = HillClimb::new(&by_edges).run(GraphState::complete(6), &stop);
    assert_eq!(out.status, ClimbStatus::Improving);
    assert_eq!(out.improvements, 1);
    assert_eq!(out.fitness, 14);
    assert_eq!(stop.seen(), 1);
}

// --- ANNEALING ---

#[test]
fn test_anneal_runs_exactly_the_schedule() {
    let constant = |_: &GraphState| 7 as Fitness;
    let start = GraphState::empty(6);
    let out = Annealer::new(&constant, start, short_schedule(), Some(1))
        .unwrap()
        .run(&Silent);
    assert_eq!(out.iterations, 10);
    assert_eq!(out.temperature, Decimal::ZERO);
    assert!(!out.solved);
    // Equal fitness is always accepted.
    assert_eq!(out.accepted, 10);
    assert_eq!(out.best, GraphState::empty(6));
}

#[test]
fn test_anneal_cold_start_does_nothing() {
    let oracle = FitnessOracle::default();
    let start = GraphState::complete(7);
    let schedule = CoolingSchedule {
        initial: Decimal::ZERO,
        step: Decimal::new(1, 5),
    };
    let out = Annealer::new(&oracle, start.clone(), schedule, Some(1))
        .unwrap()
        .run(&Silent);
    assert_eq!(out.iterations, 0);
    assert_eq!(out.best, start);
    assert_eq!(out.best_fitness, 21);
}

#[test]
fn test_anneal_rejects_bad_setup() {
    let oracle = FitnessOracle::default();
    assert!(Annealer::new(&oracle, GraphState::empty(1), short_schedule(), None).is_err());
    let flat = CoolingSchedule {
        initial: Decimal::ONE,
        step: Decimal::ZERO,
    };
    assert!(Annealer::new(&oracle, GraphState::empty(5), flat, None).is_err());
}

#[test]
fn test_anneal_stops_on_solution() {
    let oracle = FitnessOracle::default();
    let out = Annealer::new(&oracle, GraphState::empty(5), CoolingSchedule::default(), Some(9))
        .unwrap()
        .run(&Silent);
    assert!(out.solved);
    assert_eq!(out.iterations, 1);
    assert_eq!(out.best_fitness, 0);
    assert_eq!(out.best.edge_count(), 1);
}

#[test]
fn test_anneal_solved_start_is_returned_untouched() {
    let oracle = FitnessOracle::new(3);
    let c5 = GraphState::from_edges(5, &[(0, 1), (1, 2), (2, 3), (3, 4), (4, 0)]).unwrap();
    let out = Annealer::new(&oracle, c5.clone(), CoolingSchedule::default(), Some(4))
        .unwrap()
        .run(&Silent);
    assert!(out.solved);
    assert_eq!(out.iterations, 0);
    assert_eq!(out.accepted, 0);
    assert_eq!(out.current, c5);
    assert_eq!(out.current_fitness, 0);
    assert_eq!(out.best, c5);
    assert_eq!(out.temperature, Decimal::from(5));
}

#[test]
fn test_anneal_forced_steps() {
    let by_edges = |g: &GraphState| g.edge_count() as Fitness;
    let schedule = CoolingSchedule {
        initial: Decimal::from(5),
        step: Decimal::ONE,
    };
    let mut a = Annealer::new(&by_edges, GraphState::complete(4), schedule, Some(0)).unwrap();

    // Removal improves: taken regardless of the draw.
    assert!(a.step_with(0, 1, 0.999));
    assert_eq!(a.current_fitness(), 5);
    assert_eq!(a.best().fitness(), Some(5));
    assert_eq!(a.temperature(), Decimal::from(4));

    // Re-adding costs 1 at T = 4: exp(-0.25) ~ 0.78.
    assert!(!a.step_with(0, 1, 0.9));
    assert_eq!(a.current_fitness(), 5);
    assert!(a.step_with(0, 1, 0.5));
    assert_eq!(a.current_fitness(), 6);
    // Worse moves never replace the best.
    assert_eq!(a.best().fitness(), Some(5));
    assert_eq!(a.iterations(), 3);
}

#[test]
fn test_anneal_same_seed_same_run() {
    let oracle = FitnessOracle::new(4);
    let mut rng = Rng::with_seed(21);
    let start = GraphState::random_with_edges(14, 45, &mut rng);
    let schedule = CoolingSchedule {
        initial: Decimal::ONE,
        step: Decimal::new(1, 2),
    };
    let run = || {
        Annealer::new(&oracle, start.clone(), schedule, Some(77))
            .unwrap()
            .run(&Silent)
    };
    let (a, b) = (run(), run());
    assert_eq!(a.best, b.best);
    assert_eq!(a.current, b.current);
    assert_eq!(a.iterations, b.iterations);
    assert!(a.best_fitness <= oracle.fitness(&start));
}

#[test]
fn test_anneal_cancellation() {
    let constant = |_: &GraphState| 3 as Fitness;
    let out = Annealer::new(&constant, GraphState::empty(8), CoolingSchedule::default(), Some(2))
        .unwrap()
        .with_report_interval(5)
        .run(&StopAfter::new(2));
    assert_eq!(out.iterations, 10);
    assert!(out.temperature > Decimal::ZERO);
}
