//! Run state machine.
//!
//! [`run_simulation`] drives the tick loop of one run from a fresh world to
//! a terminal [`RunStatus`]:
//!
//! - **Completed** once every survivor is dead or permanently safe
//!   (`BothSafe` if nobody died, `Casualties` otherwise)
//! - **Aborted(`TickLimitExceeded`)** when the tick limit is reached first
//! - **Aborted(Fault)** when a tick fails; the failure ends this run only
//!
//! While ticking it keeps a [`PriorityLedger`] of contested ticks, from
//! which the run's `child_prioritized` flag is derived after the fact.

use heroism_types::{
    AbortReason, CompletionKind, PriorityCall, RunOutcome, RunStatus, SurvivorRole,
};
use heroism_world::WorldState;
use tracing::{debug, warn};

use crate::decision::DecisionEngine;
use crate::tick::{self, TickSummary};

/// Tally of how contested ticks were resolved during a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PriorityLedger {
    /// Contested ticks that favored the child.
    pub child_favored: u32,
    /// Contested ticks that favored the adult.
    pub adult_favored: u32,
    /// Contested ticks decided by a full tie.
    pub tied: u32,
}

impl PriorityLedger {
    /// Record a tick's priority call, if any.
    pub const fn record(&mut self, call: Option<PriorityCall>) {
        match call {
            Some(PriorityCall::ChildFavored) => {
                self.child_favored = self.child_favored.saturating_add(1);
            }
            Some(PriorityCall::AdultFavored) => {
                self.adult_favored = self.adult_favored.saturating_add(1);
            }
            Some(PriorityCall::Tied) => self.tied = self.tied.saturating_add(1),
            None => {}
        }
    }

    /// Whether the child was favored more often than the adult.
    pub const fn child_prioritized(&self) -> bool {
        self.child_favored > self.adult_favored
    }
}

/// Terminal check after a completed tick.
pub fn evaluate_status(world: &WorldState, decay_rate: f64) -> RunStatus {
    if world.all_resolved(decay_rate) {
        let nobody_died = world.survivors().iter().all(|s| s.is_alive());
        let kind = if nobody_died {
            CompletionKind::BothSafe
        } else {
            CompletionKind::Casualties
        };
        return RunStatus::Completed(kind);
    }
    if world.tick >= world.max_ticks {
        return RunStatus::Aborted(AbortReason::TickLimitExceeded);
    }
    RunStatus::Running
}

/// A run in progress: the world, the ledger and the current status.
#[derive(Debug, Clone)]
pub struct Run {
    world: WorldState,
    ledger: PriorityLedger,
    status: RunStatus,
}

impl Run {
    /// Start a run over a fresh world.
    pub const fn new(world: WorldState) -> Self {
        Self {
            world,
            ledger: PriorityLedger {
                child_favored: 0,
                adult_favored: 0,
                tied: 0,
            },
            status: RunStatus::Running,
        }
    }

    /// Current status.
    pub const fn status(&self) -> &RunStatus {
        &self.status
    }

    /// The world as of the last completed tick.
    pub const fn world(&self) -> &WorldState {
        &self.world
    }

    /// Contested-tick tally so far.
    pub const fn ledger(&self) -> &PriorityLedger {
        &self.ledger
    }

    /// Advance one tick. Does nothing once the run is terminal.
    ///
    /// Returns the tick summary when a tick was executed.
    pub fn advance(&mut self, engine: &dyn DecisionEngine) -> Option<TickSummary> {
        if self.status.is_terminal() {
            return None;
        }
        let profile = self.world.profile;
        match tick::step(&mut self.world, engine, &profile) {
            Ok(summary) => {
                self.ledger.record(summary.priority);
                self.status = evaluate_status(&self.world, profile.hunger_decay_rate);
                Some(summary)
            }
            Err(e) => {
                warn!(tick = self.world.tick, error = %e, "Run aborted by fault");
                self.status = RunStatus::Aborted(AbortReason::Fault {
                    reason: e.to_string(),
                });
                None
            }
        }
    }

    /// Tick until terminal and produce the outcome.
    pub fn finish(mut self, engine: &dyn DecisionEngine) -> RunOutcome {
        while !self.status.is_terminal() {
            self.advance(engine);
        }
        self.outcome()
    }

    /// Outcome as of now. Only meaningful once the run is terminal.
    pub fn outcome(&self) -> RunOutcome {
        let world = &self.world;
        RunOutcome {
            a_survived: world.survivor(SurvivorRole::Child).is_alive(),
            b_survived: world.survivor(SurvivorRole::Adult).is_alive(),
            child_prioritized: self.ledger.child_prioritized(),
            ticks_elapsed: world.tick,
            status: self.status.clone(),
            child_rescues: world.survivor(SurvivorRole::Child).rescues,
            adult_rescues: world.survivor(SurvivorRole::Adult).rescues,
            beams_fired: world.agent.beams_fired,
            distance_travelled_km: world.agent.distance_travelled_km,
            agent_exhausted: world.agent.exhausted,
            child_favored_ticks: self.ledger.child_favored,
            adult_favored_ticks: self.ledger.adult_favored,
            tied_ticks: self.ledger.tied,
        }
    }
}

/// Run a fresh world to completion under `engine`.
///
/// The world's own capability profile drives the run.
pub fn run_simulation(world: WorldState, engine: &dyn DecisionEngine) -> RunOutcome {
    let outcome = Run::new(world).finish(engine);
    log_run_end(&outcome);
    outcome
}

/// Log the end of a run.
pub fn log_run_end(outcome: &RunOutcome) {
    debug!(
        status = ?outcome.status,
        ticks = outcome.ticks_elapsed,
        a_survived = outcome.a_survived,
        b_survived = outcome.b_survived,
        child_prioritized = outcome.child_prioritized,
        child_rescues = outcome.child_rescues,
        adult_rescues = outcome.adult_rescues,
        "Run ended"
    );
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use heroism_types::{Action, CapabilityProfile, Position};
    use heroism_world::{DecayJitter, WorldSetup};

    use super::*;
    use crate::decision::{Decision, UtilityPolicy};

    struct AlwaysIdle;

    impl DecisionEngine for AlwaysIdle {
        fn evaluate(&self, _world: &WorldState, _profile: &CapabilityProfile) -> Decision {
            Decision::plain(Action::Idle)
        }
    }

    fn quiet_setup() -> WorldSetup {
        WorldSetup {
            jitter: DecayJitter::NONE,
            wander_chance: 0.0,
            crisis: None,
            max_ticks: 100,
            ..WorldSetup::default()
        }
    }

    #[test]
    fn neglect_ends_in_casualties() {
        let mut setup = quiet_setup();
        setup.child.hunger = 10.0;
        setup.adult.hunger = 12.0;
        let outcome = run_simulation(WorldState::new(&setup).unwrap(), &AlwaysIdle);
        assert_eq!(outcome.status, RunStatus::Completed(CompletionKind::Casualties));
        assert!(!outcome.a_survived);
        assert!(!outcome.b_survived);
        assert_eq!(outcome.ticks_elapsed, 12);
        assert!(!outcome.child_prioritized);
    }

    #[test]
    fn tick_limit_aborts_unresolved_run() {
        // Margin 3 is never more than the remaining ticks.
        let mut setup = quiet_setup();
        setup.max_ticks = 5;
        setup.child.hunger = 33.0;
        setup.adult.hunger = 33.0;
        let outcome = run_simulation(WorldState::new(&setup).unwrap(), &AlwaysIdle);
        assert_eq!(
            outcome.status,
            RunStatus::Aborted(AbortReason::TickLimitExceeded)
        );
        assert_eq!(outcome.ticks_elapsed, 5);
        assert!(outcome.a_survived && outcome.b_survived);
    }

    #[test]
    fn well_fed_survivors_complete_safe() {
        let mut setup = quiet_setup();
        setup.max_ticks = 40;
        setup.child.hunger = 100.0;
        setup.adult.hunger = 100.0;
        let outcome = run_simulation(WorldState::new(&setup).unwrap(), &UtilityPolicy);
        // Margin 69 against 39 ticks left after the first tick.
        assert_eq!(outcome.status, RunStatus::Completed(CompletionKind::BothSafe));
        assert_eq!(outcome.ticks_elapsed, 1);
    }

    #[test]
    fn policy_keeps_close_survivors_alive() {
        let mut setup = quiet_setup();
        setup.child.position = Position::new(7, 9);
        setup.adult.position = Position::new(7, 5);
        let outcome = run_simulation(WorldState::new(&setup).unwrap(), &UtilityPolicy);
        assert!(outcome.a_survived);
        assert!(outcome.b_survived);
        assert!(outcome.child_rescues > 0);
        assert!(outcome.adult_rescues > 0);
        assert!(!outcome.status.is_fault());
    }

    #[test]
    fn fault_aborts_only_with_reason() {
        let mut run = Run::new(WorldState::new(&quiet_setup()).unwrap());
        assert!(run.advance(&UtilityPolicy).is_some());
        let mut world = run.world().clone();
        world.survivor_mut(SurvivorRole::Child).position = Position::new(20, 20);
        let outcome = Run::new(world).finish(&UtilityPolicy);
        assert!(outcome.status.is_fault());
        assert!(matches!(
            &outcome.status,
            RunStatus::Aborted(AbortReason::Fault { reason }) if reason.contains("child")
        ));
    }

    #[test]
    fn terminal_run_does_not_advance() {
        let mut setup = quiet_setup();
        setup.max_ticks = 1;
        let mut run = Run::new(WorldState::new(&setup).unwrap());
        assert!(run.advance(&AlwaysIdle).is_some());
        assert!(run.status().is_terminal());
        assert!(run.advance(&AlwaysIdle).is_none());
        assert_eq!(run.world().tick, 1);
    }

    #[test]
    fn ledger_compares_favored_ticks() {
        let mut ledger = PriorityLedger::default();
        ledger.record(Some(PriorityCall::Tied));
        ledger.record(Some(PriorityCall::Tied));
        assert!(!ledger.child_prioritized());
        ledger.record(Some(PriorityCall::ChildFavored));
        assert!(ledger.child_prioritized());
        ledger.record(Some(PriorityCall::AdultFavored));
        assert!(!ledger.child_prioritized());
        ledger.record(None);
        assert_eq!(
            ledger,
            PriorityLedger {
                child_favored: 1,
                adult_favored: 1,
                tied: 2,
            }
        );
    }
}
