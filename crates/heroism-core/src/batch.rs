//! Batch statistics over many independent runs.
//!
//! Each run gets its own seed derived from the batch seed and its index, a
//! fresh [`WorldState`] and, when randomized, a freshly drawn capability
//! profile. Runs execute on the rayon pool with nothing shared between
//! them; outcomes are collected in index order and folded into the
//! [`BatchResult`] on the calling thread, so a given seed always produces
//! the same result regardless of thread count.

use heroism_types::{BatchResult, CapabilityProfile, EraInfo, RunOutcome};
use heroism_world::{WorldError, WorldSetup, WorldState};
use rayon::prelude::*;
use tracing::{info, warn};

use crate::config::{ConfigError, SimulationConfig};
use crate::decision::{DecisionEngine, UtilityPolicy};
use crate::era::EraRandomizer;
use crate::runner;
use crate::scenario;

/// Mixes the run index into the batch seed.
const SEED_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

/// Separates the era stream from the world stream of the same run.
const ERA_STREAM: u64 = 0xD1B5_4A32_D192_ED03;

/// Errors that stop a batch before any run starts.
#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    /// A batch of zero runs was requested.
    #[error("a batch needs at least one run")]
    NoRuns,

    /// The configuration failed validation.
    #[error("batch configuration is invalid: {source}")]
    Config {
        /// The underlying configuration error.
        #[from]
        source: ConfigError,
    },

    /// A run's world could not be built.
    #[error("failed to set up run {index}: {source}")]
    Setup {
        /// Index of the run within the batch.
        index: u32,
        /// The underlying world error.
        source: WorldError,
    },
}

/// Parameters of one batch.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchConfig {
    /// Number of runs.
    pub runs: u32,
    /// Batch seed; every run seed is derived from it.
    pub seed: u64,
    /// Draw a fresh era per run instead of the fixed profile.
    pub randomized: bool,
    /// Scenario every run is built from.
    pub simulation: SimulationConfig,
}

impl BatchConfig {
    /// Batch parameters as set in a loaded configuration.
    pub fn from_config(simulation: SimulationConfig) -> Self {
        Self {
            runs: simulation.batch.runs,
            seed: simulation.world.seed,
            randomized: simulation.batch.randomized,
            simulation,
        }
    }

    /// Profile for run `index`: the fixed one, or a fresh era draw.
    pub fn profile_for(&self, index: u32) -> CapabilityProfile {
        self.era_for(index).0
    }

    /// Profile and era label for run `index`; no label for fixed runs.
    pub fn era_for(&self, index: u32) -> (CapabilityProfile, Option<EraInfo>) {
        if !self.randomized {
            return (self.simulation.fixed_profile(), None);
        }
        let era_seed = run_seed(self.seed, index) ^ ERA_STREAM;
        let (mut profile, info) =
            EraRandomizer::seeded(self.simulation.era.clone(), era_seed).draw_era();
        profile.hunger_decay_rate *= self.simulation.capability.hunger_decay_multiplier;
        (profile, Some(info))
    }

    /// World setup for run `index`, with the era's survivor scales applied.
    ///
    /// # Errors
    ///
    /// See [`scenario::world_setup`].
    pub fn setup_for(&self, index: u32) -> Result<WorldSetup, WorldError> {
        let (profile, era) = self.era_for(index);
        let mut setup = scenario::world_setup(&self.simulation, profile, run_seed(self.seed, index))?;
        if let Some(era) = era {
            scenario::apply_era(&mut setup, &era);
        }
        Ok(setup)
    }
}

/// Seed of run `index` within a batch seeded with `batch_seed`.
pub fn run_seed(batch_seed: u64, index: u32) -> u64 {
    batch_seed.wrapping_add(u64::from(index).wrapping_mul(SEED_STRIDE))
}

/// Run a batch under the shipped [`UtilityPolicy`].
///
/// # Errors
///
/// Returns [`BatchError`] if the batch is empty, the configuration is
/// invalid, or a run's world cannot be built.
pub fn run_batch(config: &BatchConfig) -> Result<BatchResult, BatchError> {
    run_batch_with(config, &UtilityPolicy)
}

/// Run a batch under any decision engine.
///
/// # Errors
///
/// See [`run_batch`].
pub fn run_batch_with<E>(config: &BatchConfig, engine: &E) -> Result<BatchResult, BatchError>
where
    E: DecisionEngine + Sync,
{
    let outcomes = run_outcomes(config, engine)?;
    let result = summarize(config.runs, &outcomes);

    if result.faulted_runs > 0 {
        warn!(
            faulted = result.faulted_runs,
            runs = config.runs,
            "Faulted runs excluded from batch rates"
        );
    }
    info!(
        runs = result.n,
        counted = result.counted_runs,
        a_survival_rate = result.a_survival_rate,
        b_survival_rate = result.b_survival_rate,
        child_priority_rate = result.child_priority_rate,
        "Batch complete"
    );
    Ok(result)
}

/// Execute every run of a batch and return the outcomes in index order.
///
/// # Errors
///
/// See [`run_batch`].
pub fn run_outcomes<E>(config: &BatchConfig, engine: &E) -> Result<Vec<RunOutcome>, BatchError>
where
    E: DecisionEngine + Sync,
{
    if config.runs == 0 {
        return Err(BatchError::NoRuns);
    }
    config.simulation.validate()?;

    info!(
        runs = config.runs,
        seed = config.seed,
        randomized = config.randomized,
        scale = %config.simulation.world.scale,
        "Batch starting"
    );

    (0..config.runs)
        .into_par_iter()
        .map(|index| execute_run(config, index, engine))
        .collect()
}

fn execute_run<E>(config: &BatchConfig, index: u32, engine: &E) -> Result<RunOutcome, BatchError>
where
    E: DecisionEngine + Sync,
{
    let world = config
        .setup_for(index)
        .and_then(|setup| WorldState::new(&setup))
        .map_err(|source| BatchError::Setup { index, source })?;
    Ok(runner::run_simulation(world, engine))
}

/// Running totals over counted runs.
#[derive(Debug, Default)]
struct Tally {
    counted: u32,
    faulted: u32,
    contested: u32,
    child_prioritized: u32,
    a_survived: u32,
    b_survived: u32,
    both_survived: u32,
    both_died: u32,
    exhausted: u32,
    child_rescues: u64,
    adult_rescues: u64,
    beams: u64,
    ticks: u64,
    distance_km: f64,
}

impl Tally {
    fn add(&mut self, outcome: &RunOutcome) {
        if outcome.status.is_fault() {
            self.faulted = self.faulted.saturating_add(1);
            return;
        }
        let bump = |count: &mut u32, hit: bool| {
            if hit {
                *count = count.saturating_add(1);
            }
        };
        self.counted = self.counted.saturating_add(1);
        bump(&mut self.a_survived, outcome.a_survived);
        bump(&mut self.b_survived, outcome.b_survived);
        bump(&mut self.both_survived, outcome.a_survived && outcome.b_survived);
        bump(&mut self.both_died, !outcome.a_survived && !outcome.b_survived);
        bump(&mut self.exhausted, outcome.agent_exhausted);
        if outcome.had_decisive_contest() {
            self.contested = self.contested.saturating_add(1);
            bump(&mut self.child_prioritized, outcome.child_prioritized);
        }
        self.child_rescues = self
            .child_rescues
            .saturating_add(u64::from(outcome.child_rescues));
        self.adult_rescues = self
            .adult_rescues
            .saturating_add(u64::from(outcome.adult_rescues));
        self.beams = self.beams.saturating_add(u64::from(outcome.beams_fired));
        self.ticks = self.ticks.saturating_add(outcome.ticks_elapsed);
        self.distance_km += outcome.distance_travelled_km;
    }
}

fn ratio(count: u32, total: u32) -> f64 {
    if total == 0 {
        0.0
    } else {
        f64::from(count) / f64::from(total)
    }
}

#[allow(clippy::cast_precision_loss)]
fn mean(sum: u64, total: u32) -> f64 {
    if total == 0 {
        0.0
    } else {
        sum as f64 / f64::from(total)
    }
}

/// Fold run outcomes into batch statistics.
///
/// Faulted runs are left out of every rate and counted separately. The
/// child-priority rate is taken over runs with at least one decisive
/// contested tick.
pub fn summarize(n: u32, outcomes: &[RunOutcome]) -> BatchResult {
    let mut tally = Tally::default();
    for outcome in outcomes {
        tally.add(outcome);
    }
    let counted = tally.counted;
    BatchResult {
        n,
        counted_runs: counted,
        faulted_runs: tally.faulted,
        contested_runs: tally.contested,
        a_survival_rate: ratio(tally.a_survived, counted),
        b_survival_rate: ratio(tally.b_survived, counted),
        child_priority_rate: ratio(tally.child_prioritized, tally.contested),
        both_survived_rate: ratio(tally.both_survived, counted),
        both_died_rate: ratio(tally.both_died, counted),
        agent_exhausted_rate: ratio(tally.exhausted, counted),
        mean_child_rescues: mean(tally.child_rescues, counted),
        mean_adult_rescues: mean(tally.adult_rescues, counted),
        mean_beams_fired: mean(tally.beams, counted),
        mean_distance_km: if counted == 0 {
            0.0
        } else {
            tally.distance_km / f64::from(counted)
        },
        mean_ticks: mean(tally.ticks, counted),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use heroism_types::{AbortReason, CompletionKind, RunStatus};

    use super::*;
    use crate::config::EraDistribution;

    fn outcome(a: bool, b: bool, child_ticks: u32, adult_ticks: u32) -> RunOutcome {
        RunOutcome {
            a_survived: a,
            b_survived: b,
            child_prioritized: child_ticks > adult_ticks,
            ticks_elapsed: 10,
            status: RunStatus::Completed(CompletionKind::BothSafe),
            child_rescues: 2,
            adult_rescues: 1,
            beams_fired: 0,
            distance_travelled_km: 100.0,
            agent_exhausted: false,
            child_favored_ticks: child_ticks,
            adult_favored_ticks: adult_ticks,
            tied_ticks: 0,
        }
    }

    #[test]
    fn summary_rates() {
        let outcomes = vec![
            outcome(true, true, 0, 0),
            outcome(true, false, 2, 0),
            outcome(false, true, 0, 1),
            outcome(false, false, 0, 0),
        ];
        let result = summarize(4, &outcomes);
        assert_eq!(result.counted_runs, 4);
        assert_eq!(result.contested_runs, 2);
        assert!((result.a_survival_rate - 0.5).abs() < f64::EPSILON);
        assert!((result.b_survival_rate - 0.5).abs() < f64::EPSILON);
        assert!((result.child_priority_rate - 0.5).abs() < f64::EPSILON);
        assert!((result.both_survived_rate - 0.25).abs() < f64::EPSILON);
        assert!((result.both_died_rate - 0.25).abs() < f64::EPSILON);
        assert!((result.mean_child_rescues - 2.0).abs() < f64::EPSILON);
        assert!((result.mean_distance_km - 100.0).abs() < f64::EPSILON);
        assert!((result.mean_ticks - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn faulted_runs_leave_the_denominators() {
        let mut faulted = outcome(false, false, 0, 0);
        faulted.status = RunStatus::Aborted(AbortReason::Fault {
            reason: String::from("child is out of bounds at (20, 20)"),
        });
        let limit = RunOutcome {
            status: RunStatus::Aborted(AbortReason::TickLimitExceeded),
            ..outcome(true, true, 0, 0)
        };
        let result = summarize(3, &[faulted, limit, outcome(true, false, 0, 0)]);
        assert_eq!(result.n, 3);
        assert_eq!(result.faulted_runs, 1);
        assert_eq!(result.counted_runs, 2);
        assert!((result.a_survival_rate - 1.0).abs() < f64::EPSILON);
        assert!((result.b_survival_rate - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn no_contested_runs_means_zero_priority_rate() {
        let result = summarize(2, &[outcome(true, true, 0, 0), outcome(true, true, 0, 0)]);
        assert_eq!(result.contested_runs, 0);
        assert!(result.child_priority_rate.abs() < f64::EPSILON);
    }

    #[test]
    fn all_faulted_yields_zero_rates() {
        let mut faulted = outcome(true, true, 0, 0);
        faulted.status = RunStatus::Aborted(AbortReason::Fault {
            reason: String::from("boom"),
        });
        let result = summarize(1, &[faulted]);
        assert_eq!(result.counted_runs, 0);
        assert!(result.a_survival_rate.abs() < f64::EPSILON);
        assert!(result.mean_ticks.abs() < f64::EPSILON);
    }

    #[test]
    fn empty_batch_is_rejected() {
        let config = BatchConfig {
            runs: 0,
            ..BatchConfig::from_config(SimulationConfig::default())
        };
        assert!(matches!(run_batch(&config), Err(BatchError::NoRuns)));
    }

    #[test]
    fn invalid_config_is_rejected_before_running() {
        let mut simulation = SimulationConfig::default();
        simulation.world.max_ticks = 0;
        let config = BatchConfig {
            runs: 5,
            ..BatchConfig::from_config(simulation)
        };
        assert!(matches!(run_batch(&config), Err(BatchError::Config { .. })));
    }

    #[test]
    fn run_seeds_differ_per_index() {
        assert_ne!(run_seed(42, 0), run_seed(42, 1));
        assert_eq!(run_seed(42, 0), 42);
        assert_eq!(run_seed(u64::MAX, 3), run_seed(u64::MAX, 3));
    }

    #[test]
    fn randomized_profiles_vary_per_run() {
        let config = BatchConfig {
            randomized: true,
            ..BatchConfig::from_config(SimulationConfig::default())
        };
        assert_ne!(config.profile_for(0), config.profile_for(1));
        assert_eq!(config.profile_for(4), config.profile_for(4));
    }

    #[test]
    fn tech_factor_eras_reach_the_survivors() {
        let mut simulation = SimulationConfig::default();
        simulation.era.distribution = EraDistribution::TechFactor;
        let config = BatchConfig {
            randomized: true,
            ..BatchConfig::from_config(simulation)
        };
        let configured = &config.simulation.survivors.child;
        for index in 0..20 {
            let (_, era) = config.era_for(index);
            let era = era.unwrap();
            let setup = config.setup_for(index).unwrap();
            let expected = (configured.danger_threshold * era.danger_threshold_scale)
                .min(scenario::MAX_DANGER_THRESHOLD);
            assert!((setup.child.danger_threshold - expected).abs() < 1e-12);
            assert!(setup.child.danger_threshold >= configured.danger_threshold);
            assert!(setup.adult.rescue_bonus >= config.simulation.survivors.adult.rescue_bonus);
        }
    }

    #[test]
    fn fixed_runs_keep_configured_survivors() {
        let config = BatchConfig::from_config(SimulationConfig::default());
        let setup = config.setup_for(3).unwrap();
        assert!(config.era_for(3).1.is_none());
        assert!(
            (setup.child.danger_threshold - config.simulation.survivors.child.danger_threshold)
                .abs()
                < 1e-12
        );
    }

    #[test]
    fn fixed_profile_is_shared() {
        let config = BatchConfig::from_config(SimulationConfig::default());
        assert_eq!(config.profile_for(0), config.profile_for(9));
    }

    #[test]
    fn small_default_batch_runs() {
        let config = BatchConfig {
            runs: 8,
            ..BatchConfig::from_config(SimulationConfig::default())
        };
        let result = run_batch(&config).unwrap();
        assert_eq!(result.n, 8);
        assert_eq!(result.counted_runs + result.faulted_runs, 8);
        assert!((0.0..=1.0).contains(&result.a_survival_rate));
        assert!((0.0..=1.0).contains(&result.child_priority_rate));
    }
}
