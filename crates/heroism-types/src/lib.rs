//! Shared type definitions for the Heroism rescue simulation.
//!
//! This crate is the single source of truth for the value types that cross
//! crate boundaries. Display-facing types are exported to `TypeScript` via
//! `ts-rs` so the visualization layer can consume them unchanged.
//!
//! # Modules
//!
//! - [`enums`] -- Survivor roles, agent actions, run lifecycle, era labels
//! - [`structs`] -- Positions, capability profiles, run outcomes, batch results

pub mod enums;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{
    AbortReason, Action, CompletionKind, EraPeriod, PriorityCall, RunStatus, SurvivorRole,
};
pub use structs::{
    BatchPercentages, BatchResult, CapabilityProfile, EraInfo, GRID_SIZE, Position, RunOutcome,
};
