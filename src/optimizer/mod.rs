pub mod anneal;
pub mod best;
pub mod crossover;
pub mod genetic;
pub mod hillclimb;
pub mod initialization;
pub mod mutation;
pub mod runner;

// Re-export specific structs for easier access
pub use self::anneal::{AnnealOutcome, Annealer, CoolingSchedule};
pub use self::best::BestTracker;
pub use self::genetic::{GeneticOptions, GeneticOutcome, GeneticSearch, Member, OffspringPlan, Population};
pub use self::hillclimb::{ClimbOutcome, ClimbStatus, HillClimb};
pub use self::runner::{Progress, ProgressCallback, Silent, StopAfter};

use fastrand::Rng;

pub(crate) fn seeded_rng(seed: Option<u64>) -> Rng {
    if let Some(s) = seed {
        Rng::with_seed(s)
    } else {
        Rng::new()
    }
}
