//! Decision engine trait and the utility-maximizing rescue policy.
//!
//! Once per tick the runner asks a [`DecisionEngine`] for exactly one
//! [`Action`]. The shipped [`UtilityPolicy`] is a pure, greedy, single-step
//! lookahead: it scores every viable rescue by the survival gain it buys and
//! takes the best one, falling back to self-preservation when nothing is
//! viable.
//!
//! The policy never branches on a survivor's role. Both survivors are scored
//! by the same function, and a full tie is broken by rescue history and
//! tick parity, so any preference for the child in the batch statistics
//! comes from positions and hunger alone.

use std::cmp::Ordering;

use heroism_types::{Action, CapabilityProfile, PriorityCall, SurvivorRole};
use heroism_world::WorldState;

use crate::feasibility;

/// The action chosen for a tick, plus how a contested tick was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    /// The action to apply.
    pub action: Action,
    /// Set only when both survivors were alive and in danger and the action
    /// helps one of them.
    pub priority: Option<PriorityCall>,
}

impl Decision {
    /// A decision that helps nobody in particular.
    pub const fn plain(action: Action) -> Self {
        Self {
            action,
            priority: None,
        }
    }
}

/// A source of per-tick agent actions.
///
/// Implementations must be deterministic functions of their inputs so that
/// a run is reproduced exactly by its seed.
pub trait DecisionEngine {
    /// Choose the action for the current tick and report how a contested
    /// tick was resolved.
    fn evaluate(&self, world: &WorldState, profile: &CapabilityProfile) -> Decision;

    /// Choose the action for the current tick.
    fn decide(&self, world: &WorldState, profile: &CapabilityProfile) -> Action {
        self.evaluate(world, profile).action
    }
}

/// Urgency of a living survivor: 0 at or above the danger threshold, rising
/// linearly to 1 at starvation.
pub fn urgency(hunger: f64, danger_threshold: f64) -> f64 {
    if danger_threshold <= 0.0 || hunger >= danger_threshold {
        return 0.0;
    }
    ((danger_threshold - hunger) / danger_threshold).clamp(0.0, 1.0)
}

/// A scored rescue option.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    /// The rescue action.
    pub action: Action,
    /// Expected survival gain.
    pub gain: f64,
    /// Energy the rescue itself costs (trip or beam).
    pub cost: f64,
}

impl Candidate {
    /// Higher gain first, then lower cost. `Equal` only when both match
    /// bit for bit.
    fn rank(&self, other: &Self) -> Ordering {
        self.gain
            .total_cmp(&other.gain)
            .then_with(|| other.cost.total_cmp(&self.cost))
    }
}

/// The greedy utility-maximizing rescue policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct UtilityPolicy;

impl UtilityPolicy {
    /// Create the policy.
    pub const fn new() -> Self {
        Self
    }

    /// Every viable rescue of `role`, with its expected gain.
    ///
    /// A rescue is viable when, after paying for it, the agent can still
    /// get home and keep its reserve. Survivors out of danger or beyond
    /// saving produce no candidates.
    pub fn candidates(
        world: &WorldState,
        profile: &CapabilityProfile,
        role: SurvivorRole,
    ) -> Vec<Candidate> {
        let survivor = world.survivor(role);
        if !survivor.is_alive() {
            return Vec::new();
        }
        let urgency = urgency(survivor.hunger(), survivor.danger_threshold);
        if urgency <= 0.0 {
            return Vec::new();
        }

        let mut out = Vec::with_capacity(2);

        if let Some(plan) = feasibility::plan_rescue(world, profile, role) {
            let extra = plan.extra_ticks();
            #[allow(clippy::cast_precision_loss)]
            let extra_ticks = extra as f64;
            let starves_first = extra > 0
                && profile.hunger_decay_rate > 0.0
                && extra_ticks >= survivor.hunger() / profile.hunger_decay_rate;
            let gain = if starves_first {
                0.0
            } else {
                urgency / (1.0 + extra_ticks)
            };
            if gain > 0.0 && feasibility::leaves_way_home(world, plan.trip_cost, plan.contact_point)
            {
                out.push(Candidate {
                    action: Action::MoveToward(role),
                    gain,
                    cost: plan.trip_cost,
                });
            }
        }

        if feasibility::in_beam_range(world, profile, role) {
            let action = Action::BeamFeed(role);
            let cost = feasibility::action_cost(world, profile, action);
            if feasibility::leaves_way_home(world, cost, world.agent.position) {
                out.push(Candidate {
                    action,
                    gain: urgency * profile.beam_efficiency,
                    cost,
                });
            }
        }

        out
    }

    /// The best viable rescue of `role`, if any.
    pub fn best_for(
        world: &WorldState,
        profile: &CapabilityProfile,
        role: SurvivorRole,
    ) -> Option<Candidate> {
        Self::candidates(world, profile, role)
            .into_iter()
            .max_by(Candidate::rank)
    }

    /// Resolve a full tie between the two survivors without looking at
    /// their roles: the one rescued fewer times goes first, then the tick
    /// parity alternates.
    fn break_tie(world: &WorldState) -> SurvivorRole {
        let [first, second] = SurvivorRole::ALL;
        let (a, b) = (world.survivor(first), world.survivor(second));
        match a.rescues.cmp(&b.rescues) {
            Ordering::Less => first,
            Ordering::Greater => second,
            Ordering::Equal => {
                if world.tick & 1 == 0 {
                    first
                } else {
                    second
                }
            }
        }
    }

    fn fallback(world: &WorldState) -> Action {
        let anyone_in_danger = world.survivors().iter().any(|s| s.in_danger());
        if anyone_in_danger || world.agent.energy() < world.rules.safety_margin {
            Action::ReturnToBase
        } else {
            Action::Idle
        }
    }
}

impl DecisionEngine for UtilityPolicy {
    fn evaluate(&self, world: &WorldState, profile: &CapabilityProfile) -> Decision {
        let [first, second] = SurvivorRole::ALL;
        let contested = world.survivor(first).in_danger() && world.survivor(second).in_danger();

        let best = (
            Self::best_for(world, profile, first),
            Self::best_for(world, profile, second),
        );
        let (chosen, tied) = match best {
            (None, None) => return Decision::plain(Self::fallback(world)),
            (Some(a), None) => (a, false),
            (None, Some(b)) => (b, false),
            (Some(a), Some(b)) => match a.rank(&b) {
                Ordering::Greater => (a, false),
                Ordering::Less => (b, false),
                Ordering::Equal => {
                    if Self::break_tie(world) == first {
                        (a, true)
                    } else {
                        (b, true)
                    }
                }
            },
        };

        let priority = if contested {
            match (tied, chosen.action.target()) {
                (true, _) => Some(PriorityCall::Tied),
                (false, Some(SurvivorRole::Child)) => Some(PriorityCall::ChildFavored),
                (false, Some(SurvivorRole::Adult)) => Some(PriorityCall::AdultFavored),
                (false, None) => None,
            }
        } else {
            None
        };

        Decision {
            action: chosen.action,
            priority,
        }
    }
}
