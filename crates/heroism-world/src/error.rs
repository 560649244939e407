//! Error types for the `heroism-world` crate.
//!
//! All fallible operations in this crate return [`WorldError`] through the
//! standard [`Result`] type alias.

use heroism_types::Position;

/// Errors that can occur while building or mutating world state.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WorldError {
    /// The requested geographic scale is not one of the presets.
    #[error("unknown geographic scale: {name}")]
    UnknownScale {
        /// The name that failed to resolve.
        name: String,
    },

    /// An entity sits outside the grid.
    #[error("{entity} is out of bounds at {position}")]
    OutOfBounds {
        /// Which entity is misplaced (e.g. "child", "agent", "base").
        entity: String,
        /// The offending position.
        position: Position,
    },

    /// The agent tried to spend more energy than it has.
    #[error("insufficient energy: {required:.3} required, {available:.3} available")]
    InsufficientEnergy {
        /// Energy the operation needs.
        required: f64,
        /// Energy the agent holds.
        available: f64,
    },

    /// The world setup is inconsistent.
    #[error("invalid world setup: {reason}")]
    InvalidSetup {
        /// Explanation of what is wrong.
        reason: String,
    },
}
