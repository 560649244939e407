//! Energy costs and movement planning shared by the decision engine and
//! the tick cycle.
//!
//! Every cost the engine reasons about is computed here, and the tick cycle
//! charges exactly the same figures when it applies an action. The engine
//! therefore cannot pick an action the tick would refuse.

use heroism_types::{Action, CapabilityProfile, Position, SurvivorRole};
use heroism_world::{WorldState, grid};

/// Energy needed to travel `cells` at the world's scale.
pub fn travel_cost(world: &WorldState, cells: f64) -> f64 {
    world.scale.km(cells) * world.rules.travel_cost_per_100km / 100.0
}

/// Energy needed to beam food over `km` kilometers.
pub const fn beam_cost(profile: &CapabilityProfile, km: f64) -> f64 {
    profile.beam_cost_per_km * km
}

/// Cell the agent moves to this tick when heading for `role`.
///
/// Stays put when already within contact radius.
pub fn move_step(world: &WorldState, profile: &CapabilityProfile, role: SurvivorRole) -> Position {
    let from = world.agent.position;
    let target = world.survivor(role).position;
    if from.distance_cells(target) <= world.rules.contact_radius_cells {
        return from;
    }
    grid::step_toward(from, target, world.agent_step_cells(profile))
}

/// Cell the agent moves to this tick when heading home, limited by both
/// speed and the energy it holds.
pub fn return_step(world: &WorldState, profile: &CapabilityProfile) -> Position {
    let from = world.agent.position;
    let per_cell = travel_cost(world, 1.0);
    let affordable = if per_cell > 0.0 {
        world.agent.energy() / per_cell
    } else {
        f64::INFINITY
    };
    let budget = world.agent_step_cells(profile).min(affordable);
    let next = grid::step_toward(from, world.agent.base_position, budget);
    if travel_cost(world, from.distance_cells(next)) > world.agent.energy() {
        return from;
    }
    next
}

/// Whether `role` is within beam range of the agent.
pub fn in_beam_range(world: &WorldState, profile: &CapabilityProfile, role: SurvivorRole) -> bool {
    world.km_between(world.agent.position, world.survivor(role).position) <= profile.beam_range_km
}

/// Energy the agent spends this tick if it takes `action`.
pub fn action_cost(world: &WorldState, profile: &CapabilityProfile, action: Action) -> f64 {
    let from = world.agent.position;
    match action {
        Action::MoveToward(role) => {
            travel_cost(world, from.distance_cells(move_step(world, profile, role)))
        }
        Action::BeamFeed(role) => beam_cost(
            profile,
            world.km_between(from, world.survivor(role).position),
        ),
        Action::ReturnToBase => travel_cost(world, from.distance_cells(return_step(world, profile))),
        Action::Idle => 0.0,
    }
}

/// Whether the agent can pay for `action` this tick.
pub fn is_feasible(world: &WorldState, profile: &CapabilityProfile, action: Action) -> bool {
    action_cost(world, profile, action) <= world.agent.energy()
}

/// A planned trip to a survivor, assuming the survivor stays put.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovePlan {
    /// Cell reached at the end of this tick.
    pub next: Position,
    /// Cell where contact is made.
    pub contact_point: Position,
    /// Moves needed until contact; 0 when already in contact.
    pub ticks_to_contact: u64,
    /// Energy for the whole trip to the contact point.
    pub trip_cost: f64,
    /// Energy to fly home from the contact point afterwards.
    pub return_cost: f64,
}

impl MovePlan {
    /// Ticks after the current one before the survivor is fed.
    pub const fn extra_ticks(&self) -> u64 {
        self.ticks_to_contact.saturating_sub(1)
    }
}

/// Plan a contact rescue of `role`.
///
/// Returns `None` when contact cannot be made before the tick limit, or
/// when the agent is too slow to make progress at all.
pub fn plan_rescue(
    world: &WorldState,
    profile: &CapabilityProfile,
    role: SurvivorRole,
) -> Option<MovePlan> {
    let target = world.survivor(role).position;
    let contact = world.rules.contact_radius_cells;
    let step = world.agent_step_cells(profile);
    let limit = world.remaining_ticks();

    let mut position = world.agent.position;
    let mut next = None;
    let mut ticks: u64 = 0;
    let mut trip_cells = 0.0;
    while position.distance_cells(target) > contact {
        if ticks >= limit {
            return None;
        }
        let moved = grid::step_toward(position, target, step);
        if moved == position {
            return None;
        }
        trip_cells += position.distance_cells(moved);
        position = moved;
        if next.is_none() {
            next = Some(moved);
        }
        ticks = ticks.saturating_add(1);
    }

    Some(MovePlan {
        next: next.unwrap_or(world.agent.position),
        contact_point: position,
        ticks_to_contact: ticks,
        trip_cost: travel_cost(world, trip_cells),
        return_cost: travel_cost(world, position.distance_cells(world.agent.base_position)),
    })
}

/// Whether spending `cost` now still leaves enough to get home from
/// `end_point` with the configured reserve in hand.
pub fn leaves_way_home(world: &WorldState, cost: f64, end_point: Position) -> bool {
    let home = travel_cost(world, end_point.distance_cells(world.agent.base_position));
    cost + home + world.rules.reserve_energy <= world.agent.energy()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use heroism_world::{DecayJitter, WorldSetup};

    use super::*;

    fn world_with(agent: Position, child: Position, energy: f64) -> WorldState {
        let mut setup = WorldSetup {
            jitter: DecayJitter::NONE,
            wander_chance: 0.0,
            crisis: None,
            agent_position: agent,
            base_position: agent,
            agent_energy: energy,
            ..WorldSetup::default()
        };
        setup.child.position = child;
        WorldState::new(&setup).unwrap()
    }

    #[test]
    fn country_travel_cost() {
        let world = world_with(Position::new(7, 7), Position::new(7, 9), 100.0);
        // 2 cells = 107 km at 2 energy per 100 km
        assert!((travel_cost(&world, 2.0) - 2.14).abs() < 1e-9);
    }

    #[test]
    fn move_cost_matches_plan() {
        let world = world_with(Position::new(7, 7), Position::new(7, 12), 100.0);
        let profile = CapabilityProfile::default();
        let plan = plan_rescue(&world, &profile, SurvivorRole::Child).unwrap();
        assert_eq!(plan.ticks_to_contact, 1);
        assert_eq!(plan.extra_ticks(), 0);
        assert_eq!(plan.next, Position::new(7, 12));
        let cost = action_cost(&world, &profile, Action::MoveToward(SurvivorRole::Child));
        assert!((cost - plan.trip_cost).abs() < 1e-12);
        assert!((plan.return_cost - plan.trip_cost).abs() < 1e-12);
    }

    #[test]
    fn contact_range_needs_no_travel() {
        let world = world_with(Position::new(2, 7), Position::new(3, 7), 10.0);
        let profile = CapabilityProfile::default();
        let plan = plan_rescue(&world, &profile, SurvivorRole::Child).unwrap();
        assert_eq!(plan.ticks_to_contact, 0);
        assert!(plan.trip_cost.abs() < f64::EPSILON);
        assert!(
            action_cost(&world, &profile, Action::MoveToward(SurvivorRole::Child)).abs()
                < f64::EPSILON
        );
    }

    #[test]
    fn slow_agent_takes_several_ticks() {
        let mut setup = WorldSetup {
            scale: heroism_world::resolve("settlement").unwrap(),
            jitter: DecayJitter::NONE,
            wander_chance: 0.0,
            crisis: None,
            ..WorldSetup::default()
        };
        setup.child.position = Position::new(7, 14);
        setup.agent_position = Position::new(7, 0);
        setup.base_position = Position::new(7, 0);
        let world = WorldState::new(&setup).unwrap();
        // 6.1 cells per tick at half speed: three moves to close 14 cells
        let slow = CapabilityProfile {
            speed_multiplier: 0.5,
            ..CapabilityProfile::default()
        };
        let plan = plan_rescue(&world, &slow, SurvivorRole::Child).unwrap();
        assert_eq!(plan.ticks_to_contact, 3);
        assert_eq!(plan.extra_ticks(), 2);
    }

    #[test]
    fn beam_cost_and_range() {
        let world = world_with(Position::new(7, 7), Position::new(7, 9), 100.0);
        let profile = CapabilityProfile::default();
        // 107 km is beyond the default 100 km range
        assert!(!in_beam_range(&world, &profile, SurvivorRole::Child));
        let long = CapabilityProfile {
            beam_range_km: 500.0,
            ..profile
        };
        assert!(in_beam_range(&world, &long, SurvivorRole::Child));
        let cost = action_cost(&world, &long, Action::BeamFeed(SurvivorRole::Child));
        assert!((cost - 5.35).abs() < 1e-9);
    }

    #[test]
    fn return_step_is_energy_limited() {
        let mut world = world_with(Position::new(7, 7), Position::new(7, 9), 3.0);
        world.agent.position = Position::new(7, 14);
        let profile = CapabilityProfile::default();
        // 3 energy buys 150 km = 2.8 cells at country scale
        let next = return_step(&world, &profile);
        assert!(next.distance_cells(Position::new(7, 14)) <= 2.81);
        assert!(next != Position::new(7, 14));
        assert!(is_feasible(&world, &profile, Action::ReturnToBase));
    }

    #[test]
    fn return_step_with_no_energy_stays() {
        let mut world = world_with(Position::new(7, 7), Position::new(7, 9), 0.0);
        world.agent.position = Position::new(7, 10);
        let profile = CapabilityProfile::default();
        assert_eq!(return_step(&world, &profile), Position::new(7, 10));
        assert!(is_feasible(&world, &profile, Action::ReturnToBase));
    }

    #[test]
    fn way_home_includes_reserve() {
        let world = world_with(Position::new(7, 7), Position::new(7, 9), 10.0);
        assert!(leaves_way_home(&world, 2.14, Position::new(7, 9)));
        assert!(!leaves_way_home(&world, 4.0, Position::new(7, 9)));
    }
}
