//! World state for a single simulation run.
//!
//! [`WorldState`] is exclusively owned by one run. It carries its own seeded
//! random generator for the stochastic parts of the world (hunger decay
//! jitter and survivor wandering), so two runs never share randomness and a
//! run is fully reproduced by its seed.

use heroism_types::{CapabilityProfile, GRID_SIZE, Position, SurvivorRole};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::agent::Agent;
use crate::error::WorldError;
use crate::geo_scale::GeoScale;
use crate::grid;
use crate::survivor::Survivor;

/// Energy rules for the agent, fixed for the duration of a run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AgentRules {
    /// Energy spent per 100 km of travel.
    pub travel_cost_per_100km: f64,
    /// Energy regained per tick spent on the base cell.
    pub recharge_per_tick: f64,
    /// Below this energy an idle agent heads home.
    pub safety_margin: f64,
    /// Energy a rescue must leave in hand after getting back to base.
    pub reserve_energy: f64,
    /// Cell distance within which the agent can hand food over directly.
    pub contact_radius_cells: f64,
}

impl Default for AgentRules {
    fn default() -> Self {
        Self {
            travel_cost_per_100km: 2.0,
            recharge_per_tick: 5.0,
            safety_margin: 70.0,
            reserve_energy: 5.0,
            contact_radius_cells: 1.5,
        }
    }
}

/// Uniform multiplicative noise applied to each survivor's hunger decay.
///
/// The default is [`DecayJitter::NONE`]; noise is opt-in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecayJitter {
    /// Smallest factor.
    pub min: f64,
    /// Largest factor.
    pub max: f64,
}

impl DecayJitter {
    /// No noise: every tick decays by exactly the nominal rate.
    pub const NONE: Self = Self { min: 1.0, max: 1.0 };

    /// Whether the range is positive, ordered and finite.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.min > 0.0 && self.min <= self.max && self.max.is_finite()
    }
}

impl Default for DecayJitter {
    fn default() -> Self {
        Self::NONE
    }
}

/// A scheduled shock that drops both survivors into danger at once.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Crisis {
    /// Completed-tick count at which the crisis hits, before that tick's
    /// decision.
    pub at_tick: u64,
    /// Hunger the child is set to.
    pub child_hunger: f64,
    /// Hunger the adult is set to.
    pub adult_hunger: f64,
}

impl Default for Crisis {
    fn default() -> Self {
        Self {
            at_tick: 3,
            child_hunger: 25.0,
            adult_hunger: 20.0,
        }
    }
}

/// Initial placement and parameters of one survivor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurvivorSetup {
    /// Starting cell.
    pub position: Position,
    /// Starting hunger reserve.
    pub hunger: f64,
    /// Hunger below which the survivor is in danger.
    pub danger_threshold: f64,
    /// Hunger restored by a contact rescue.
    pub rescue_bonus: f64,
}

/// Everything needed to build a fresh [`WorldState`].
#[derive(Debug, Clone, PartialEq)]
pub struct WorldSetup {
    /// Geographic scale of the grid.
    pub scale: GeoScale,
    /// Capability profile active for the run.
    pub profile: CapabilityProfile,
    /// Agent energy rules.
    pub rules: AgentRules,
    /// Decay noise.
    pub jitter: DecayJitter,
    /// Per-tick probability that a living survivor shuffles to a nearby cell.
    pub wander_chance: f64,
    /// Optional scheduled crisis.
    pub crisis: Option<Crisis>,
    /// Side length of the grid.
    pub grid_size: u8,
    /// Maximum ticks before the run is cut short.
    pub max_ticks: u64,
    /// Agent starting cell.
    pub agent_position: Position,
    /// Recharge station cell.
    pub base_position: Position,
    /// Agent starting energy.
    pub agent_energy: f64,
    /// Child placement.
    pub child: SurvivorSetup,
    /// Adult placement.
    pub adult: SurvivorSetup,
    /// Seed for the world's random generator.
    pub seed: u64,
}

impl Default for WorldSetup {
    fn default() -> Self {
        let survivor = |row, col| SurvivorSetup {
            position: Position::new(row, col),
            hunger: 80.0,
            danger_threshold: 30.0,
            rescue_bonus: 40.0,
        };
        Self {
            scale: GeoScale::default(),
            profile: CapabilityProfile::default(),
            rules: AgentRules::default(),
            jitter: DecayJitter::default(),
            wander_chance: 0.0,
            crisis: Some(Crisis::default()),
            grid_size: GRID_SIZE,
            max_ticks: 200,
            agent_position: Position::new(7, 7),
            base_position: Position::new(7, 7),
            agent_energy: 100.0,
            child: survivor(2, 12),
            adult: survivor(12, 2),
            seed: 42,
        }
    }
}

/// Serializable view of the world for display layers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorldSnapshot {
    /// Completed ticks.
    pub tick: u64,
    /// Tick limit.
    pub max_ticks: u64,
    /// Scale preset key.
    pub scale: &'static str,
    /// Kilometers per cell at this scale.
    pub km_per_cell: f64,
    /// Simulated minutes elapsed.
    pub elapsed_minutes: f64,
    /// The agent.
    pub agent: Agent,
    /// Survivor A.
    pub child: Survivor,
    /// Survivor B.
    pub adult: Survivor,
}

/// Mutable state of one run.
#[derive(Debug, Clone)]
pub struct WorldState {
    /// Completed ticks.
    pub tick: u64,
    /// Tick limit for the run.
    pub max_ticks: u64,
    /// Side length of the grid.
    pub grid_size: u8,
    /// The rescue agent.
    pub agent: Agent,
    /// Geographic scale.
    pub scale: GeoScale,
    /// Capability profile the run was initialized with.
    pub profile: CapabilityProfile,
    /// Agent energy rules.
    pub rules: AgentRules,
    /// Decay noise.
    pub jitter: DecayJitter,
    /// Per-tick wander probability.
    pub wander_chance: f64,
    /// Pending scheduled crisis, cleared once applied.
    pub crisis: Option<Crisis>,
    child: Survivor,
    adult: Survivor,
    rng: StdRng,
}

impl WorldState {
    /// Build a fresh world from a setup.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::OutOfBounds`] if any entity starts off the grid
    /// and [`WorldError::InvalidSetup`] for inconsistent parameters.
    pub fn new(setup: &WorldSetup) -> Result<Self, WorldError> {
        if setup.max_ticks == 0 {
            return Err(WorldError::InvalidSetup {
                reason: String::from("max_ticks must be positive"),
            });
        }
        if !setup.jitter.is_valid() {
            return Err(WorldError::InvalidSetup {
                reason: format!(
                    "decay jitter range [{}, {}] must be positive, ordered and finite",
                    setup.jitter.min, setup.jitter.max
                ),
            });
        }
        if !(0.0..=1.0).contains(&setup.wander_chance) {
            return Err(WorldError::InvalidSetup {
                reason: format!("wander chance {} is not a probability", setup.wander_chance),
            });
        }

        let make = |role, s: &SurvivorSetup| {
            Survivor::new(role, s.position, s.hunger, s.danger_threshold, s.rescue_bonus)
        };
        let world = Self {
            tick: 0,
            max_ticks: setup.max_ticks,
            grid_size: setup.grid_size,
            agent: Agent::new(setup.agent_position, setup.base_position, setup.agent_energy),
            scale: setup.scale,
            profile: setup.profile,
            rules: setup.rules,
            jitter: setup.jitter,
            wander_chance: setup.wander_chance,
            crisis: setup.crisis,
            child: make(SurvivorRole::Child, &setup.child),
            adult: make(SurvivorRole::Adult, &setup.adult),
            rng: StdRng::seed_from_u64(setup.seed),
        };
        world.validate_bounds()?;
        Ok(world)
    }

    /// The survivor playing `role`.
    pub const fn survivor(&self, role: SurvivorRole) -> &Survivor {
        match role {
            SurvivorRole::Child => &self.child,
            SurvivorRole::Adult => &self.adult,
        }
    }

    /// Mutable access to the survivor playing `role`.
    pub const fn survivor_mut(&mut self, role: SurvivorRole) -> &mut Survivor {
        match role {
            SurvivorRole::Child => &mut self.child,
            SurvivorRole::Adult => &mut self.adult,
        }
    }

    /// Both survivors, child first.
    pub fn survivors(&self) -> [&Survivor; 2] {
        [&self.child, &self.adult]
    }

    /// Kilometers between two cells at this world's scale.
    pub fn km_between(&self, a: Position, b: Position) -> f64 {
        self.scale.km(a.distance_cells(b))
    }

    /// Cells the agent can cover this tick under `profile`.
    pub const fn agent_step_cells(&self, profile: &CapabilityProfile) -> f64 {
        self.scale.base_speed_unit * profile.speed_multiplier
    }

    /// Ticks left before the tick limit.
    pub const fn remaining_ticks(&self) -> u64 {
        self.max_ticks.saturating_sub(self.tick)
    }

    /// Whether `role` is alive with enough hunger headroom that even the
    /// fastest possible decay cannot bring it into danger before the limit.
    #[allow(clippy::cast_precision_loss)]
    pub fn permanently_safe(&self, role: SurvivorRole, decay_rate: f64) -> bool {
        let survivor = self.survivor(role);
        let worst_case = decay_rate * self.jitter.max * self.remaining_ticks() as f64;
        survivor.is_alive() && survivor.margin() > worst_case
    }

    /// Whether every survivor is dead or permanently safe.
    pub fn all_resolved(&self, decay_rate: f64) -> bool {
        SurvivorRole::ALL
            .into_iter()
            .all(|role| !self.survivor(role).is_alive() || self.permanently_safe(role, decay_rate))
    }

    /// Apply the scheduled crisis if it is due. Returns whether it fired.
    pub fn apply_crisis(&mut self) -> bool {
        match self.crisis {
            Some(crisis) if crisis.at_tick == self.tick => {
                self.child.force_hunger(crisis.child_hunger);
                self.adult.force_hunger(crisis.adult_hunger);
                self.crisis = None;
                debug!(tick = self.tick, "Crisis: both survivors pushed into danger");
                true
            }
            _ => false,
        }
    }

    /// Decay the hunger of every living survivor by `decay_rate` times a
    /// fresh jitter factor each.
    pub fn decay_survivors(&mut self, decay_rate: f64) {
        let jitter = self.jitter;
        for role in SurvivorRole::ALL {
            let factor = if jitter.max > jitter.min {
                self.rng.random_range(jitter.min..=jitter.max)
            } else {
                jitter.min
            };
            self.survivor_mut(role).decay(decay_rate * factor);
        }
    }

    /// Let living survivors shuffle toward a neighbouring cell.
    ///
    /// Walking distance per tick is capped at one cell; at large scales
    /// survivors barely move.
    pub fn wander_survivors(&mut self) {
        if self.wander_chance <= 0.0 {
            return;
        }
        let reach = self.scale.human_cells_per_tick().min(1.0);
        let size = self.grid_size;
        for role in SurvivorRole::ALL {
            if !self.survivor(role).is_alive() || !self.rng.random_bool(self.wander_chance) {
                continue;
            }
            let d_row = grid::whole_cells(self.rng.random_range(-1.0..=1.0) * reach);
            let d_col = grid::whole_cells(self.rng.random_range(-1.0..=1.0) * reach);
            let survivor = self.survivor_mut(role);
            survivor.position = grid::shifted(survivor.position, d_row, d_col, size);
        }
    }

    /// Lock in the death of any survivor whose hunger reached zero.
    /// Returns the roles that died this call.
    pub fn lock_in_deaths(&mut self) -> Vec<SurvivorRole> {
        SurvivorRole::ALL
            .into_iter()
            .filter(|&role| self.survivor_mut(role).lock_in_death())
            .collect()
    }

    /// Check that every entity lies on the grid.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::OutOfBounds`] naming the first misplaced entity.
    pub fn validate_bounds(&self) -> Result<(), WorldError> {
        let entities = [
            ("agent", self.agent.position),
            ("base", self.agent.base_position),
            ("child", self.child.position),
            ("adult", self.adult.position),
        ];
        for (entity, position) in entities {
            if !position.within(self.grid_size) {
                return Err(WorldError::OutOfBounds {
                    entity: String::from(entity),
                    position,
                });
            }
        }
        Ok(())
    }

    /// Serializable view of the current state.
    #[allow(clippy::cast_precision_loss)]
    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            tick: self.tick,
            max_ticks: self.max_ticks,
            scale: self.scale.name,
            km_per_cell: self.scale.km_per_cell,
            elapsed_minutes: self.tick as f64 * self.scale.minutes_per_tick,
            agent: self.agent.clone(),
            child: self.child.clone(),
            adult: self.adult.clone(),
        }
    }
}
