//! Building run setups from configuration.
//!
//! A scenario turns a [`SimulationConfig`], the capability profile chosen
//! for the run and a run seed into a [`WorldSetup`]. Both the batch engine
//! and the interactive session go through here so they place survivors the
//! same way.

use heroism_types::{CapabilityProfile, EraInfo, Position};
use heroism_world::{SurvivorSetup, WorldError, WorldSetup, resolve};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::{PlacementMode, SimulationConfig, SurvivorConfig};

/// Minimum cell distance between randomly placed survivors.
pub const MIN_SURVIVOR_SEPARATION: f64 = 5.0;

/// Attempts at placing the adult before falling back to the mirrored cell.
const PLACEMENT_ATTEMPTS: u32 = 64;

/// Largest danger threshold an era can push a survivor to.
pub const MAX_DANGER_THRESHOLD: f64 = 80.0;

/// Largest rescue bonus an era can push a survivor to.
pub const MAX_RESCUE_BONUS: f64 = 100.0;

/// Build the setup for one run.
///
/// The world's own generator is seeded from `seed`; with random placement
/// the survivor cells are drawn from the same stream first.
///
/// # Errors
///
/// Returns [`WorldError::UnknownScale`] if the configured scale does not
/// resolve, or [`WorldError::InvalidSetup`] if random placement is asked
/// for on a grid too small to hold the corner bands.
pub fn world_setup(
    config: &SimulationConfig,
    profile: CapabilityProfile,
    seed: u64,
) -> Result<WorldSetup, WorldError> {
    let scale = resolve(&config.world.scale)?;
    let mut rng = StdRng::seed_from_u64(seed);

    let (child_at, adult_at) = match config.world.placement {
        PlacementMode::Fixed => (
            config.survivors.child.position,
            config.survivors.adult.position,
        ),
        PlacementMode::Random => random_placement(config.world.grid_size, &mut rng)?,
    };

    Ok(WorldSetup {
        scale,
        profile,
        rules: config.agent_rules(),
        jitter: config.decay_jitter(),
        wander_chance: config.simulation.wander_chance,
        crisis: config.crisis(),
        grid_size: config.world.grid_size,
        max_ticks: config.world.max_ticks,
        agent_position: config.agent.start,
        base_position: config.agent.base,
        agent_energy: config.agent.energy,
        child: survivor_setup(&config.survivors.child, child_at),
        adult: survivor_setup(&config.survivors.adult, adult_at),
        seed: rng.random(),
    })
}

/// Scale both survivors' danger thresholds and rescue bonuses by the
/// era's factors, capped at [`MAX_DANGER_THRESHOLD`] and
/// [`MAX_RESCUE_BONUS`].
pub fn apply_era(setup: &mut WorldSetup, era: &EraInfo) {
    for survivor in [&mut setup.child, &mut setup.adult] {
        survivor.danger_threshold =
            (survivor.danger_threshold * era.danger_threshold_scale).min(MAX_DANGER_THRESHOLD);
        survivor.rescue_bonus =
            (survivor.rescue_bonus * era.rescue_bonus_scale).min(MAX_RESCUE_BONUS);
    }
}

const fn survivor_setup(config: &SurvivorConfig, position: Position) -> SurvivorSetup {
    SurvivorSetup {
        position,
        hunger: config.hunger,
        danger_threshold: config.danger_threshold,
        rescue_bonus: config.rescue_bonus,
    }
}

/// Draw both survivors into the corner bands of the grid, at least
/// [`MIN_SURVIVOR_SEPARATION`] cells apart.
///
/// Each coordinate lands in the low band `[1, size/3]` or the high band
/// `[size - size/3, size - 1]`; on the standard grid that is `[1, 5]` or
/// `[10, 14]`.
///
/// # Errors
///
/// Returns [`WorldError::InvalidSetup`] for grids smaller than 6 cells.
pub fn random_placement(
    grid_size: u8,
    rng: &mut StdRng,
) -> Result<(Position, Position), WorldError> {
    if grid_size < 6 {
        return Err(WorldError::InvalidSetup {
            reason: format!("random placement needs a grid of at least 6 cells, got {grid_size}"),
        });
    }
    let size = i16::from(grid_size);
    let band = size.saturating_div(3);

    let coordinate = |rng: &mut StdRng| {
        if rng.random_bool(0.5) {
            rng.random_range(1..=band)
        } else {
            rng.random_range(size.saturating_sub(band)..=size.saturating_sub(1))
        }
    };

    let child = Position::new(coordinate(rng), coordinate(rng));
    for _ in 0..PLACEMENT_ATTEMPTS {
        let adult = Position::new(coordinate(rng), coordinate(rng));
        if child.distance_cells(adult) >= MIN_SURVIVOR_SEPARATION {
            return Ok((child, adult));
        }
    }
    let last = size.saturating_sub(1);
    let mirrored = Position::new(
        last.saturating_sub(child.row),
        last.saturating_sub(child.col),
    );
    Ok((child, mirrored))
}
