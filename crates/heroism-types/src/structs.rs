//! Core value structs shared between the engine and its consumers.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{EraPeriod, RunStatus};

/// Side length of the square simulation grid, in cells.
pub const GRID_SIZE: u8 = 15;

/// Integer cell coordinate on the grid.
///
/// Valid positions lie in `[0, GRID_SIZE - 1]` on both axes. Construction
/// does not enforce bounds; the world validates positions each tick so an
/// out-of-grid survivor aborts that run instead of panicking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Position {
    /// Row index, growing downward.
    pub row: i16,
    /// Column index, growing rightward.
    pub col: i16,
}

impl Position {
    /// Create a position from a row and column.
    pub const fn new(row: i16, col: i16) -> Self {
        Self { row, col }
    }

    /// Euclidean distance to `other`, in cells.
    ///
    /// This is the only distance metric in the simulation. Travel cost,
    /// beam cost, contact checks and range checks all go through it.
    pub fn distance_cells(self, other: Self) -> f64 {
        let dr = f64::from(other.row) - f64::from(self.row);
        let dc = f64::from(other.col) - f64::from(self.col);
        dr.hypot(dc)
    }

    /// Whether the position lies on a `size` x `size` grid.
    pub fn within(self, size: u8) -> bool {
        let limit = i16::from(size);
        (0..limit).contains(&self.row) && (0..limit).contains(&self.col)
    }
}

impl core::fmt::Display for Position {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Capability parameters of the rescue agent for one run.
///
/// Either taken from configuration or drawn by the era randomizer before
/// the run starts. Immutable for the run's duration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct CapabilityProfile {
    /// Multiplier applied to the scale's base travel speed.
    pub speed_multiplier: f64,
    /// Maximum distance the rescue beam reaches, in kilometers.
    pub beam_range_km: f64,
    /// Energy spent per kilometer of beam distance.
    pub beam_cost_per_km: f64,
    /// Fraction of the rescue bonus a beam delivers (0, 1].
    pub beam_efficiency: f64,
    /// Hunger lost by each survivor per tick, before jitter.
    pub hunger_decay_rate: f64,
}

impl Default for CapabilityProfile {
    fn default() -> Self {
        Self {
            speed_multiplier: 1.0,
            beam_range_km: 100.0,
            beam_cost_per_km: 0.05,
            beam_efficiency: 0.8,
            hunger_decay_rate: 1.0,
        }
    }
}

/// Descriptive metadata for a capability profile drawn from an era.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct EraInfo {
    /// Technology multiplier relative to today (1.0 = present).
    pub tech_factor: f64,
    /// Coarse period label derived from the tech factor.
    pub period: EraPeriod,
    /// Factor applied to each survivor's danger threshold (better
    /// detection raises it). 1.0 under uniform draws.
    pub danger_threshold_scale: f64,
    /// Factor applied to each survivor's rescue bonus. 1.0 under uniform
    /// draws.
    pub rescue_bonus_scale: f64,
}

/// Outcome of one simulation run; the unit batch statistics aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct RunOutcome {
    /// Whether the child (A) was alive when the run ended.
    pub a_survived: bool,
    /// Whether the adult (B) was alive when the run ended.
    pub b_survived: bool,
    /// Whether contested ticks favored the child more often than the adult.
    pub child_prioritized: bool,
    /// Number of ticks executed.
    pub ticks_elapsed: u64,
    /// Terminal state of the run.
    pub status: RunStatus,
    /// Rescues delivered to the child (contact and beam).
    pub child_rescues: u32,
    /// Rescues delivered to the adult (contact and beam).
    pub adult_rescues: u32,
    /// Beam shots fired.
    pub beams_fired: u32,
    /// Kilometers travelled by the agent.
    pub distance_travelled_km: f64,
    /// Whether the agent ran out of energy away from base.
    pub agent_exhausted: bool,
    /// Contested ticks resolved in the child's favor.
    pub child_favored_ticks: u32,
    /// Contested ticks resolved in the adult's favor.
    pub adult_favored_ticks: u32,
    /// Contested ticks where both candidates scored identically.
    pub tied_ticks: u32,
}

impl RunOutcome {
    /// Whether at least one contested tick was decided by a score difference.
    pub const fn had_decisive_contest(&self) -> bool {
        self.child_favored_ticks > 0 || self.adult_favored_ticks > 0
    }
}

/// Aggregate statistics over a batch of runs.
///
/// Rates are fractions in `[0, 1]`. Faulted runs are excluded from every
/// denominator and counted in `faulted_runs`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct BatchResult {
    /// Number of runs requested.
    pub n: u32,
    /// Runs included in the rate denominators.
    pub counted_runs: u32,
    /// Runs aborted by a mid-run failure.
    pub faulted_runs: u32,
    /// Counted runs with at least one decisive contested tick.
    pub contested_runs: u32,
    /// Fraction of counted runs in which the child survived.
    pub a_survival_rate: f64,
    /// Fraction of counted runs in which the adult survived.
    pub b_survival_rate: f64,
    /// Fraction of contested runs in which the child was prioritized.
    pub child_priority_rate: f64,
    /// Fraction of counted runs in which both survived.
    pub both_survived_rate: f64,
    /// Fraction of counted runs in which both died.
    pub both_died_rate: f64,
    /// Fraction of counted runs in which the agent ran dry away from base.
    pub agent_exhausted_rate: f64,
    /// Mean rescues delivered to the child per counted run.
    pub mean_child_rescues: f64,
    /// Mean rescues delivered to the adult per counted run.
    pub mean_adult_rescues: f64,
    /// Mean beam shots per counted run.
    pub mean_beams_fired: f64,
    /// Mean kilometers travelled per counted run.
    pub mean_distance_km: f64,
    /// Mean run length in ticks per counted run.
    pub mean_ticks: f64,
}

/// Percentage view of the headline batch rates, rounded to one decimal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct BatchPercentages {
    /// Child survival, percent.
    pub a_survival_pct: f64,
    /// Adult survival, percent.
    pub b_survival_pct: f64,
    /// Both survived, percent.
    pub both_survived_pct: f64,
    /// Both died, percent.
    pub both_died_pct: f64,
    /// Agent exhausted, percent.
    pub agent_exhausted_pct: f64,
    /// Child prioritized in contested runs, percent.
    pub child_priority_pct: f64,
}

impl BatchResult {
    /// Convert the headline rates to rounded percentages for display.
    pub fn as_percentages(&self) -> BatchPercentages {
        let pct = |rate: f64| (rate * 1000.0).round() / 10.0;
        BatchPercentages {
            a_survival_pct: pct(self.a_survival_rate),
            b_survival_pct: pct(self.b_survival_rate),
            both_survived_pct: pct(self.both_survived_rate),
            both_died_pct: pct(self.both_died_rate),
            agent_exhausted_pct: pct(self.agent_exhausted_rate),
            child_priority_pct: pct(self.child_priority_rate),
        }
    }
}
