//! Enumeration types for the Heroism simulation.
//!
//! Survivor roles, the agent's action set, run lifecycle states, and the
//! labels attached to randomly drawn technological eras.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Survivors
// ---------------------------------------------------------------------------

/// Which of the two survivors an entity or action refers to.
///
/// The ordering of variants carries no meaning for the decision policy.
/// Nothing in the engine may branch on the role itself when choosing whom
/// to help; roles exist only for bookkeeping and reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum SurvivorRole {
    /// Survivor A.
    Child,
    /// Survivor B.
    Adult,
}

impl SurvivorRole {
    /// Both roles, in storage order.
    pub const ALL: [Self; 2] = [Self::Child, Self::Adult];

    /// The other survivor.
    pub const fn other(self) -> Self {
        match self {
            Self::Child => Self::Adult,
            Self::Adult => Self::Child,
        }
    }

    /// Single-letter label used in logs and reports (`A` or `B`).
    pub const fn letter(self) -> char {
        match self {
            Self::Child => 'A',
            Self::Adult => 'B',
        }
    }
}

impl core::fmt::Display for SurvivorRole {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Child => f.write_str("child"),
            Self::Adult => f.write_str("adult"),
        }
    }
}

// ---------------------------------------------------------------------------
// Agent actions
// ---------------------------------------------------------------------------

/// The single action the rescue agent takes in a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(tag = "kind", content = "target")]
pub enum Action {
    /// Travel toward a survivor; feeds them on contact.
    MoveToward(SurvivorRole),
    /// Fire the remote rescue beam at a survivor within range.
    BeamFeed(SurvivorRole),
    /// Head back to the base station, recharging once there.
    ReturnToBase,
    /// Do nothing this tick.
    Idle,
}

impl Action {
    /// The survivor this action helps, if any.
    pub const fn target(self) -> Option<SurvivorRole> {
        match self {
            Self::MoveToward(role) | Self::BeamFeed(role) => Some(role),
            Self::ReturnToBase | Self::Idle => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Run lifecycle
// ---------------------------------------------------------------------------

/// How a completed run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum CompletionKind {
    /// Both survivors are alive and can no longer fall into danger.
    BothSafe,
    /// At least one survivor died; any other is dead or permanently safe.
    Casualties,
}

/// Why a run was cut short.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum AbortReason {
    /// The configured maximum tick count was reached.
    TickLimitExceeded,
    /// A mid-run failure made the run unusable.
    Fault {
        /// Description of what went wrong.
        reason: String,
    },
}

/// State of a single simulation run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum RunStatus {
    /// Ticks are still being executed.
    Running,
    /// Every survivor is resolved (dead or permanently safe).
    Completed(CompletionKind),
    /// The run stopped before every survivor was resolved.
    Aborted(AbortReason),
}

impl RunStatus {
    /// Whether the run has reached a terminal state.
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, Self::Running)
    }

    /// Whether the run ended because of a mid-run failure.
    pub const fn is_fault(&self) -> bool {
        matches!(self, Self::Aborted(AbortReason::Fault { .. }))
    }
}

/// How a contested tick was resolved by the decision engine.
///
/// A tick is contested when both survivors are alive and in danger at
/// decision time and the chosen action helps one of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum PriorityCall {
    /// The child was helped because it scored better.
    ChildFavored,
    /// The adult was helped because it scored better.
    AdultFavored,
    /// Both candidates scored identically; the pick expresses no preference.
    Tied,
}

// ---------------------------------------------------------------------------
// Eras
// ---------------------------------------------------------------------------

/// Coarse label for a randomly generated technology level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum EraPeriod {
    /// Tech factor below 2: today's technology.
    NearPresent,
    /// Tech factor 2 to 5: advanced drones, emerging AI.
    NearFuture,
    /// Tech factor 5 to 15: distributed AI, global networks.
    IntermediateFuture,
    /// Tech factor 15 to 50: superintelligence, nano-drones.
    AdvancedFuture,
    /// Tech factor 50 and beyond: post-singularity.
    FarFuture,
}

impl EraPeriod {
    /// Classify a tech factor into a period.
    pub fn from_tech_factor(tech_factor: f64) -> Self {
        if tech_factor < 2.0 {
            Self::NearPresent
        } else if tech_factor < 5.0 {
            Self::NearFuture
        } else if tech_factor < 15.0 {
            Self::IntermediateFuture
        } else if tech_factor < 50.0 {
            Self::AdvancedFuture
        } else {
            Self::FarFuture
        }
    }

    /// Short human-readable description of the period.
    pub const fn description(self) -> &'static str {
        match self {
            Self::NearPresent => "current technology",
            Self::NearFuture => "advanced drones, emerging AI",
            Self::IntermediateFuture => "distributed AI, global networks",
            Self::AdvancedFuture => "superintelligence, nano-drones",
            Self::FarFuture => "post-singularity technology",
        }
    }
}
