//! Decision engine, run state machine and batch statistics for the Heroism
//! simulation.
//!
//! This crate owns everything that happens once a world exists: the
//! per-tick rescue policy, the tick cycle that applies its choices, the
//! state machine that drives a run to a terminal state, and the batch
//! engine that aggregates many seeded runs into survival and
//! child-priority rates.
//!
//! # Modules
//!
//! - [`batch`] -- Parallel batches of seeded runs folded into a
//!   [`BatchResult`](heroism_types::BatchResult).
//! - [`config`] -- Configuration loading from `heroism-config.yaml` into
//!   strongly-typed structs.
//! - [`decision`] -- [`DecisionEngine`] trait and [`UtilityPolicy`].
//! - [`era`] -- Randomized capability profiles behind a [`RandomSource`].
//! - [`feasibility`] -- Energy costs and movement planning.
//! - [`runner`] -- The run state machine.
//! - [`scenario`] -- Run setups built from configuration.
//! - [`session`] -- `initialize` / `step` / `run_batch` for display layers.
//! - [`tick`] -- One tick of the simulation.
//!
//! [`DecisionEngine`]: decision::DecisionEngine
//! [`UtilityPolicy`]: decision::UtilityPolicy
//! [`RandomSource`]: era::RandomSource

pub mod batch;
pub mod config;
pub mod decision;
pub mod era;
pub mod feasibility;
pub mod runner;
pub mod scenario;
pub mod session;
pub mod tick;
