//! Entry points for display layers.
//!
//! A display drives the simulation through three calls: [`initialize`]
//! builds a world for a scale, [`step`] advances it one tick by value, and
//! [`run_batch`] produces the aggregate statistics for the default
//! scenario.

use heroism_types::{Action, BatchResult, CapabilityProfile};
use heroism_world::{WorldError, WorldState, resolve};
use tracing::info;

use crate::batch::{self, BatchConfig, BatchError};
use crate::config::{ConfigError, ConfigOverrides, SimulationConfig};
use crate::decision::UtilityPolicy;
use crate::scenario;
use crate::tick::{self, TickError};

/// Errors surfaced while initializing a world.
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    /// The configuration or an override is invalid.
    #[error(transparent)]
    Config {
        /// The underlying configuration error.
        #[from]
        source: ConfigError,
    },

    /// The world could not be built (for example an unknown scale).
    #[error(transparent)]
    World {
        /// The underlying world error.
        #[from]
        source: WorldError,
    },
}

/// Build a world for `scale_name` from the default scenario with
/// `overrides` applied.
///
/// # Errors
///
/// Returns [`SetupError::World`] for an unknown scale and
/// [`SetupError::Config`] for an override outside its range. Nothing is
/// built in either case.
pub fn initialize(
    scale_name: &str,
    overrides: &ConfigOverrides,
) -> Result<(WorldState, CapabilityProfile), SetupError> {
    let scale = resolve(scale_name)?;
    let mut config = SimulationConfig::default();
    config.world.scale = scale.name.to_owned();
    initialize_with(&config, overrides)
}

/// Build a world from a loaded configuration with `overrides` applied.
///
/// The world is seeded with the configured seed.
///
/// # Errors
///
/// See [`initialize`].
pub fn initialize_with(
    config: &SimulationConfig,
    overrides: &ConfigOverrides,
) -> Result<(WorldState, CapabilityProfile), SetupError> {
    let config = config.with_overrides(overrides)?;
    let profile = config.fixed_profile();
    let setup = scenario::world_setup(&config, profile, config.world.seed)?;
    let world = WorldState::new(&setup)?;
    info!(
        scale = world.scale.name,
        seed = config.world.seed,
        speed_multiplier = profile.speed_multiplier,
        hunger_decay_rate = profile.hunger_decay_rate,
        "World initialized"
    );
    Ok((world, profile))
}

/// Advance `world` by one tick under the shipped policy.
///
/// Returns the action taken and the updated world.
///
/// # Errors
///
/// Returns the [`TickError`] that ended the tick; the world is consumed.
pub fn step(
    world: WorldState,
    profile: &CapabilityProfile,
) -> Result<(Action, WorldState), TickError> {
    let mut world = world;
    let summary = tick::step(&mut world, &UtilityPolicy, profile)?;
    Ok((summary.action, world))
}

/// Run `n` runs of the default scenario.
///
/// # Errors
///
/// Returns [`BatchError::NoRuns`] when `n` is zero.
pub fn run_batch(n: u32, randomized: bool) -> Result<BatchResult, BatchError> {
    let config = BatchConfig {
        runs: n,
        randomized,
        ..BatchConfig::from_config(SimulationConfig::default())
    };
    batch::run_batch(&config)
}
