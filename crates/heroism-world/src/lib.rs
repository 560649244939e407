//! Geography, survivors and the rescue agent for the Heroism simulation.
//!
//! This crate models the physical side of a run: the scaled grid, the two
//! survivors with their decaying hunger, the energy-limited agent and its
//! base station, and the per-run [`WorldState`] that ties them together
//! with a private seeded random generator.
//!
//! # Modules
//!
//! - [`agent`] -- Energy accounting, travel and recharge for the agent.
//! - [`error`] -- Error types for world construction and mutation.
//! - [`geo_scale`] -- The five geographic scale presets and their lookup.
//! - [`grid`] -- Bounded straight-line steps on the integer grid.
//! - [`state`] -- [`WorldState`], its setup, rules and display snapshot.
//! - [`survivor`] -- Hunger decay, death and feeding.

pub mod agent;
pub mod error;
pub mod geo_scale;
pub mod grid;
pub mod state;
pub mod survivor;

// Re-export primary types at crate root.
pub use agent::{Agent, MAX_ENERGY};
pub use error::WorldError;
pub use geo_scale::{GeoScale, resolve};
pub use state::{
    AgentRules, Crisis, DecayJitter, SurvivorSetup, WorldSetup, WorldSnapshot, WorldState,
};
pub use survivor::{MAX_HUNGER, Survivor};
