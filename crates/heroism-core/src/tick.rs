//! Tick cycle: one discrete step of a rescue run.
//!
//! Each tick runs through these phases, strictly in order:
//!
//! 1. **Crisis** -- fire the scheduled crisis if it is due.
//! 2. **Decision** -- ask the [`DecisionEngine`] for one action.
//! 3. **Resolution** -- charge the action's energy cost and apply it (move,
//!    beam, head home or idle), feeding on contact. The agent recharges
//!    if it ends the phase on base.
//! 4. **Decay** -- every living survivor loses hunger (with jitter) and may
//!    wander.
//! 5. **Deaths** -- any survivor at zero hunger dies, permanently.
//! 6. **Advance** -- the tick counter moves on.
//!
//! The cycle is deterministic given the same world (including its seed).

use heroism_types::{Action, CapabilityProfile, PriorityCall, SurvivorRole};
use heroism_world::{WorldError, WorldState};
use tracing::debug;

use crate::decision::DecisionEngine;
use crate::feasibility;

/// Errors that can occur during tick execution. Each one is fatal for the
/// run it happens in and for that run only.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TickError {
    /// The decision engine picked an action the agent cannot pay for.
    #[error("infeasible action {action:?}: needs {required:.3} energy, has {available:.3}")]
    Infeasible {
        /// The offending action.
        action: Action,
        /// Energy the action costs.
        required: f64,
        /// Energy the agent holds.
        available: f64,
    },

    /// The decision engine fired the beam at a survivor out of range.
    #[error("beam target {target} is {distance_km:.1} km away, range is {range_km:.1} km")]
    OutOfRange {
        /// The survivor aimed at.
        target: SurvivorRole,
        /// Distance to the target.
        distance_km: f64,
        /// Beam range of the profile.
        range_km: f64,
    },

    /// A world operation failed.
    #[error("world error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: WorldError,
    },
}

/// Summary of a single tick's execution.
#[derive(Debug, Clone, PartialEq)]
pub struct TickSummary {
    /// The tick number that was executed (1-based).
    pub tick: u64,
    /// The action taken.
    pub action: Action,
    /// How a contested tick was resolved, if it was contested.
    pub priority: Option<PriorityCall>,
    /// Survivor fed this tick and the hunger restored.
    pub fed: Option<(SurvivorRole, f64)>,
    /// Energy spent on the action.
    pub energy_spent: f64,
    /// Energy regained on base.
    pub energy_recharged: f64,
    /// Survivors who died this tick.
    pub deaths: Vec<SurvivorRole>,
}

/// Execute one tick.
///
/// # Errors
///
/// Returns [`TickError`] if an entity is off the grid, or if the engine
/// picks an action that cannot be applied. The world is left as it was
/// before the resolution phase in that case.
pub fn step(
    world: &mut WorldState,
    engine: &dyn DecisionEngine,
    profile: &CapabilityProfile,
) -> Result<TickSummary, TickError> {
    let tick = world.tick.saturating_add(1);

    // --- Phase 1: Crisis ---
    world.apply_crisis();
    world.validate_bounds()?;

    // --- Phase 2: Decision ---
    let decision = engine.evaluate(world, profile);
    let action = decision.action;

    // --- Phase 3: Resolution ---
    let required = feasibility::action_cost(world, profile, action);
    let available = world.agent.energy();
    if required > available {
        return Err(TickError::Infeasible {
            action,
            required,
            available,
        });
    }
    let fed = resolve(world, profile, action, required)?;
    let energy_recharged = world.agent.recharge(world.rules.recharge_per_tick);

    // --- Phase 4: Decay ---
    world.decay_survivors(profile.hunger_decay_rate);
    world.wander_survivors();

    // --- Phase 5: Deaths ---
    let deaths = world.lock_in_deaths();
    for role in &deaths {
        debug!(tick, survivor = %role, "Survivor died");
    }

    // --- Phase 6: Advance ---
    world.tick = tick;

    debug!(
        tick,
        action = ?action,
        energy = world.agent.energy(),
        child_hunger = world.survivor(SurvivorRole::Child).hunger(),
        adult_hunger = world.survivor(SurvivorRole::Adult).hunger(),
        "Tick complete"
    );

    Ok(TickSummary {
        tick,
        action,
        priority: decision.priority,
        fed,
        energy_spent: required,
        energy_recharged,
        deaths,
    })
}

/// Apply `action`, charging `cost`. Returns who was fed and by how much.
fn resolve(
    world: &mut WorldState,
    profile: &CapabilityProfile,
    action: Action,
    cost: f64,
) -> Result<Option<(SurvivorRole, f64)>, TickError> {
    let from = world.agent.position;
    match action {
        Action::MoveToward(role) => {
            let next = feasibility::move_step(world, profile, role);
            let km = world.km_between(from, next);
            world.agent.travel(next, km, cost)?;
            let in_contact = world.agent.position.distance_cells(world.survivor(role).position)
                <= world.rules.contact_radius_cells;
            if !in_contact {
                return Ok(None);
            }
            let survivor = world.survivor_mut(role);
            let bonus = survivor.rescue_bonus;
            Ok(fed(role, survivor.feed(bonus)))
        }
        Action::BeamFeed(role) => {
            let distance_km = world.km_between(from, world.survivor(role).position);
            if distance_km > profile.beam_range_km {
                return Err(TickError::OutOfRange {
                    target: role,
                    distance_km,
                    range_km: profile.beam_range_km,
                });
            }
            world.agent.spend(cost)?;
            world.agent.beams_fired = world.agent.beams_fired.saturating_add(1);
            let survivor = world.survivor_mut(role);
            let amount = survivor.rescue_bonus * profile.beam_efficiency;
            Ok(fed(role, survivor.feed(amount)))
        }
        Action::ReturnToBase => {
            let next = feasibility::return_step(world, profile);
            let km = world.km_between(from, next);
            world.agent.travel(next, km, cost)?;
            Ok(None)
        }
        Action::Idle => Ok(None),
    }
}

fn fed(role: SurvivorRole, restored: f64) -> Option<(SurvivorRole, f64)> {
    (restored > 0.0).then_some((role, restored))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use heroism_types::Position;
    use heroism_world::{Crisis, DecayJitter, MAX_ENERGY, WorldSetup};

    use super::*;
    use crate::decision::{Decision, UtilityPolicy};

    /// Always returns the same action, whatever the world looks like.
    struct Scripted(Action);

    impl DecisionEngine for Scripted {
        fn evaluate(&self, _world: &WorldState, _profile: &CapabilityProfile) -> Decision {
            Decision::plain(self.0)
        }
    }

    fn quiet_world() -> WorldState {
        let mut setup = WorldSetup {
            jitter: DecayJitter::NONE,
            wander_chance: 0.0,
            crisis: None,
            ..WorldSetup::default()
        };
        setup.child.position = Position::new(7, 9);
        setup.adult.position = Position::new(7, 3);
        WorldState::new(&setup).unwrap()
    }

    #[test]
    fn idle_tick_decays_and_advances() {
        let mut world = quiet_world();
        let profile = world.profile;
        let summary = step(&mut world, &Scripted(Action::Idle), &profile).unwrap();
        assert_eq!(summary.tick, 1);
        assert_eq!(world.tick, 1);
        assert!(summary.fed.is_none());
        assert!((world.survivor(SurvivorRole::Child).hunger() - 79.0).abs() < 1e-12);
        assert!((world.agent.energy() - MAX_ENERGY).abs() < f64::EPSILON);
    }

    #[test]
    fn contact_rescue_feeds_before_decay() {
        let mut world = quiet_world();
        world.survivor_mut(SurvivorRole::Child).force_hunger(20.0);
        let profile = world.profile;
        let summary = step(
            &mut world,
            &Scripted(Action::MoveToward(SurvivorRole::Child)),
            &profile,
        )
        .unwrap();
        assert_eq!(world.agent.position, Position::new(7, 9));
        assert_eq!(summary.fed, Some((SurvivorRole::Child, 40.0)));
        // 20 + 40 - 1
        assert!((world.survivor(SurvivorRole::Child).hunger() - 59.0).abs() < 1e-12);
        assert!((summary.energy_spent - 2.14).abs() < 1e-9);
        assert!((world.agent.distance_travelled_km - 107.0).abs() < 1e-9);
    }

    #[test]
    fn beam_feed_applies_efficiency() {
        let mut world = quiet_world();
        world.survivor_mut(SurvivorRole::Child).force_hunger(20.0);
        let profile = CapabilityProfile {
            beam_range_km: 500.0,
            ..world.profile
        };
        let summary = step(
            &mut world,
            &Scripted(Action::BeamFeed(SurvivorRole::Child)),
            &profile,
        )
        .unwrap();
        assert_eq!(summary.fed, Some((SurvivorRole::Child, 32.0)));
        assert_eq!(world.agent.beams_fired, 1);
        assert_eq!(world.agent.position, Position::new(7, 7));
        // 100 - 5.35 spent, then +5 recharge on base
        assert!((world.agent.energy() - 99.65).abs() < 1e-9);
    }

    #[test]
    fn beam_out_of_range_is_an_error() {
        let mut world = quiet_world();
        let profile = world.profile;
        let err = step(
            &mut world,
            &Scripted(Action::BeamFeed(SurvivorRole::Adult)),
            &profile,
        )
        .unwrap_err();
        assert!(matches!(err, TickError::OutOfRange { .. }));
    }

    #[test]
    fn infeasible_action_is_refused() {
        let mut setup = WorldSetup {
            jitter: DecayJitter::NONE,
            wander_chance: 0.0,
            crisis: None,
            agent_energy: 1.0,
            ..WorldSetup::default()
        };
        setup.profile.beam_range_km = 5000.0;
        let mut world = WorldState::new(&setup).unwrap();
        let profile = world.profile;
        let err = step(
            &mut world,
            &Scripted(Action::BeamFeed(SurvivorRole::Child)),
            &profile,
        )
        .unwrap_err();
        assert!(matches!(err, TickError::Infeasible { .. }));
        assert!((world.agent.energy() - 1.0).abs() < f64::EPSILON);
        assert_eq!(world.tick, 0);
    }

    #[test]
    fn dead_survivor_is_never_fed() {
        let mut world = quiet_world();
        world.survivor_mut(SurvivorRole::Child).force_hunger(0.5);
        let profile = CapabilityProfile {
            beam_range_km: 500.0,
            ..world.profile
        };
        let summary = step(&mut world, &Scripted(Action::Idle), &profile).unwrap();
        assert_eq!(summary.deaths, vec![SurvivorRole::Child]);

        for action in [
            Action::BeamFeed(SurvivorRole::Child),
            Action::MoveToward(SurvivorRole::Child),
        ] {
            let summary = step(&mut world, &Scripted(action), &profile).unwrap();
            assert!(summary.fed.is_none());
            let child = world.survivor(SurvivorRole::Child);
            assert!(!child.is_alive());
            assert!(child.hunger().abs() < f64::EPSILON);
            assert_eq!(child.rescues, 0);
        }
    }

    #[test]
    fn crisis_hits_before_the_decision() {
        let mut setup = WorldSetup {
            jitter: DecayJitter::NONE,
            wander_chance: 0.0,
            crisis: Some(Crisis {
                at_tick: 0,
                child_hunger: 25.0,
                adult_hunger: 20.0,
            }),
            ..WorldSetup::default()
        };
        setup.child.position = Position::new(7, 9);
        setup.adult.position = Position::new(7, 5);
        let mut world = WorldState::new(&setup).unwrap();
        let profile = world.profile;
        let summary = step(&mut world, &UtilityPolicy, &profile).unwrap();
        assert_eq!(summary.action, Action::MoveToward(SurvivorRole::Adult));
        assert_eq!(summary.priority, Some(PriorityCall::AdultFavored));
    }

    #[test]
    fn off_grid_survivor_faults_the_tick() {
        let mut world = quiet_world();
        world.survivor_mut(SurvivorRole::Adult).position = Position::new(-1, 4);
        let profile = world.profile;
        let err = step(&mut world, &UtilityPolicy, &profile).unwrap_err();
        assert!(matches!(
            err,
            TickError::World {
                source: WorldError::OutOfBounds { .. }
            }
        ));
    }

    #[test]
    fn return_home_recharges_on_arrival() {
        let mut world = quiet_world();
        world.agent.position = Position::new(7, 9);
        world.agent.spend(40.0).unwrap();
        let profile = world.profile;
        let summary = step(&mut world, &Scripted(Action::ReturnToBase), &profile).unwrap();
        assert!(world.agent.at_base());
        assert!((summary.energy_spent - 2.14).abs() < 1e-9);
        assert!((summary.energy_recharged - 5.0).abs() < 1e-12);
    }
}
