//! Configuration loading and typed config structures for the Heroism simulation.
//!
//! The canonical configuration lives in `heroism-config.yaml` at the project
//! root. This module defines strongly-typed structs that mirror the YAML
//! structure, a loader that reads the file, and the range checks every
//! configuration has to pass before a run starts.

use std::path::Path;

use heroism_types::{CapabilityProfile, GRID_SIZE, Position};
use heroism_world::{AgentRules, Crisis, DecayJitter, resolve};
use serde::{Deserialize, Serialize};

/// Errors that can occur when loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// A value is outside its valid range.
    #[error("invalid config value for {field}: {reason}")]
    InvalidConfig {
        /// Dotted path of the offending field.
        field: String,
        /// What is wrong with it.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

impl ConfigError {
    fn invalid(field: &str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field: field.to_owned(),
            reason: reason.into(),
        }
    }
}

/// Top-level simulation configuration.
///
/// Mirrors the structure of `heroism-config.yaml`. All sections default to
/// the reference experiment (country scale, fixed placement, crisis at
/// tick 3).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Scale, seed, grid and run length.
    #[serde(default)]
    pub world: WorldConfig,

    /// Stochastic world dynamics: decay noise, wandering, crisis.
    #[serde(default)]
    pub simulation: DynamicsConfig,

    /// Agent placement and energy rules.
    #[serde(default)]
    pub agent: AgentConfig,

    /// Survivor placement and hunger parameters.
    #[serde(default)]
    pub survivors: SurvivorsConfig,

    /// Fixed capability profile used when eras are not randomized.
    #[serde(default)]
    pub capability: CapabilityConfig,

    /// Ranges for randomized era draws.
    #[serde(default)]
    pub era: EraConfig,

    /// Batch size and randomization.
    #[serde(default)]
    pub batch: BatchSettings,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SimulationConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment variables override YAML values:
    /// - `HEROISM_SEED` overrides `world.seed`
    /// - `HEROISM_RUNS` overrides `batch.runs`
    /// - `HEROISM_SCALE` overrides `world.scale`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::InvalidConfig`] if an override cannot be parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config: Self = serde_yml::from_str(&contents)?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Parse configuration from a YAML string.
    ///
    /// Unlike [`from_file`](Self::from_file), environment variables are not
    /// consulted.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yml::from_str(yaml)?)
    }

    /// Apply `HEROISM_*` environment variable overrides.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup (the environment in
    /// production, a map in tests).
    pub fn apply_overrides_from(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(val) = lookup("HEROISM_SEED") {
            self.world.seed = val.trim().parse().map_err(|e| {
                ConfigError::invalid("world.seed", format!("HEROISM_SEED={val}: {e}"))
            })?;
        }
        if let Some(val) = lookup("HEROISM_RUNS") {
            self.batch.runs = val.trim().parse().map_err(|e| {
                ConfigError::invalid("batch.runs", format!("HEROISM_RUNS={val}: {e}"))
            })?;
        }
        if let Some(val) = lookup("HEROISM_SCALE") {
            self.world.scale = val.trim().to_owned();
        }
        Ok(())
    }

    /// Return a copy with the user-facing overrides applied and validated.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidConfig`] if an override is out of range
    /// or the resulting configuration fails [`validate`](Self::validate).
    pub fn with_overrides(&self, overrides: &ConfigOverrides) -> Result<Self, ConfigError> {
        overrides.validate()?;
        let mut config = self.clone();
        if let Some(speed) = overrides.speed_multiplier {
            config.capability.speed_multiplier = speed;
        }
        if let Some(multiplier) = overrides.hunger_decay_multiplier {
            config.capability.hunger_decay_multiplier = multiplier;
        }
        if let Some(threshold) = overrides.danger_threshold {
            config.survivors.child.danger_threshold = threshold;
            config.survivors.adult.danger_threshold = threshold;
        }
        if let Some(bonus) = overrides.rescue_bonus {
            config.survivors.child.rescue_bonus = bonus;
            config.survivors.adult.rescue_bonus = bonus;
        }
        config.validate()?;
        Ok(config)
    }

    /// Check every value against its valid range.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidConfig`] naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        resolve(&self.world.scale)
            .map_err(|err| ConfigError::invalid("world.scale", err.to_string()))?;
        if self.world.grid_size != GRID_SIZE {
            return Err(ConfigError::invalid(
                "world.grid_size",
                format!("the grid is fixed at {GRID_SIZE}, got {}", self.world.grid_size),
            ));
        }
        if self.world.max_ticks == 0 {
            return Err(ConfigError::invalid("world.max_ticks", "must be positive"));
        }

        let size = self.world.grid_size;
        for (field, position) in [
            ("agent.start", self.agent.start),
            ("agent.base", self.agent.base),
            ("survivors.child.position", self.survivors.child.position),
            ("survivors.adult.position", self.survivors.adult.position),
        ] {
            if !position.within(size) {
                return Err(ConfigError::invalid(
                    field,
                    format!("{position} is outside the {size}x{size} grid"),
                ));
            }
        }

        check_range("agent.energy", self.agent.energy, 0.0, 100.0)?;
        check_positive("agent.travel_cost_per_100km", self.agent.travel_cost_per_100km)?;
        check_range("agent.recharge_per_tick", self.agent.recharge_per_tick, 0.0, 100.0)?;
        check_range("agent.safety_margin", self.agent.safety_margin, 0.0, 100.0)?;
        check_range("agent.reserve_energy", self.agent.reserve_energy, 0.0, 100.0)?;
        check_range("agent.contact_radius_cells", self.agent.contact_radius_cells, 0.0, 15.0)?;

        for (role, survivor) in [
            ("survivors.child", &self.survivors.child),
            ("survivors.adult", &self.survivors.adult),
        ] {
            check_range(&format!("{role}.hunger"), survivor.hunger, 0.0, 100.0)?;
            check_range(
                &format!("{role}.danger_threshold"),
                survivor.danger_threshold,
                10.0,
                80.0,
            )?;
            check_range(&format!("{role}.rescue_bonus"), survivor.rescue_bonus, 10.0, 100.0)?;
        }

        let jitter = &self.simulation;
        if !self.decay_jitter().is_valid() {
            return Err(ConfigError::invalid(
                "simulation.jitter_min",
                format!(
                    "decay jitter [{}, {}] must be positive, ordered and finite",
                    jitter.jitter_min, jitter.jitter_max
                ),
            ));
        }
        check_range("simulation.wander_chance", jitter.wander_chance, 0.0, 1.0)?;
        if jitter.crisis.enabled {
            check_range("simulation.crisis.child_hunger", jitter.crisis.child_hunger, 0.0, 100.0)?;
            check_range("simulation.crisis.adult_hunger", jitter.crisis.adult_hunger, 0.0, 100.0)?;
        }

        let capability = &self.capability;
        let speed = capability.speed_multiplier;
        if !(speed > 0.0 && speed <= 50.0) {
            return Err(ConfigError::invalid(
                "capability.speed_multiplier",
                format!("{speed} is outside (0, 50]"),
            ));
        }
        check_range(
            "capability.hunger_decay_multiplier",
            capability.hunger_decay_multiplier,
            0.1,
            5.0,
        )?;
        check_positive("capability.beam_range_km", capability.beam_range_km)?;
        check_positive("capability.beam_cost_per_km", capability.beam_cost_per_km)?;
        check_positive("capability.hunger_decay_rate", capability.hunger_decay_rate)?;
        if !(capability.beam_efficiency > 0.0 && capability.beam_efficiency <= 1.0) {
            return Err(ConfigError::invalid(
                "capability.beam_efficiency",
                format!("{} is outside (0, 1]", capability.beam_efficiency),
            ));
        }

        self.era.validate()
    }

    /// The fixed capability profile, with the decay multiplier folded in.
    pub fn fixed_profile(&self) -> CapabilityProfile {
        let c = &self.capability;
        CapabilityProfile {
            speed_multiplier: c.speed_multiplier,
            beam_range_km: c.beam_range_km,
            beam_cost_per_km: c.beam_cost_per_km,
            beam_efficiency: c.beam_efficiency,
            hunger_decay_rate: c.hunger_decay_rate * c.hunger_decay_multiplier,
        }
    }

    /// Agent energy rules as configured.
    pub const fn agent_rules(&self) -> AgentRules {
        AgentRules {
            travel_cost_per_100km: self.agent.travel_cost_per_100km,
            recharge_per_tick: self.agent.recharge_per_tick,
            safety_margin: self.agent.safety_margin,
            reserve_energy: self.agent.reserve_energy,
            contact_radius_cells: self.agent.contact_radius_cells,
        }
    }

    /// Decay jitter as configured.
    pub const fn decay_jitter(&self) -> DecayJitter {
        DecayJitter {
            min: self.simulation.jitter_min,
            max: self.simulation.jitter_max,
        }
    }

    /// The scheduled crisis, if enabled.
    pub const fn crisis(&self) -> Option<Crisis> {
        let c = &self.simulation.crisis;
        if c.enabled {
            Some(Crisis {
                at_tick: c.at_tick,
                child_hunger: c.child_hunger,
                adult_hunger: c.adult_hunger,
            })
        } else {
            None
        }
    }
}

fn check_range(field: &str, value: f64, min: f64, max: f64) -> Result<(), ConfigError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::invalid(
            field,
            format!("{value} is outside [{min}, {max}]"),
        ))
    }
}

fn check_positive(field: &str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("{value} must be positive")))
    }
}

// ---------------------------------------------------------------------------
// User-facing overrides
// ---------------------------------------------------------------------------

/// Overrides accepted by `initialize`, each replacing a configured default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigOverrides {
    /// Agent speed multiplier, in `(0, 50]`.
    #[serde(default)]
    pub speed_multiplier: Option<f64>,
    /// Multiplier on the hunger decay rate, in `[0.1, 5]`.
    #[serde(default)]
    pub hunger_decay_multiplier: Option<f64>,
    /// Danger threshold for both survivors, in `[10, 80]`.
    #[serde(default)]
    pub danger_threshold: Option<f64>,
    /// Contact rescue bonus for both survivors, in `[10, 100]`.
    #[serde(default)]
    pub rescue_bonus: Option<f64>,
}

impl ConfigOverrides {
    /// Check each present override against its valid range.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidConfig`] for the first out-of-range value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(speed) = self.speed_multiplier {
            if !(speed > 0.0 && speed <= 50.0) {
                return Err(ConfigError::invalid(
                    "speed_multiplier",
                    format!("{speed} is outside (0, 50]"),
                ));
            }
        }
        if let Some(multiplier) = self.hunger_decay_multiplier {
            check_range("hunger_decay_multiplier", multiplier, 0.1, 5.0)?;
        }
        if let Some(threshold) = self.danger_threshold {
            check_range("danger_threshold", threshold, 10.0, 80.0)?;
        }
        if let Some(bonus) = self.rescue_bonus {
            check_range("rescue_bonus", bonus, 10.0, 100.0)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

/// World-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldConfig {
    /// Geographic scale preset name.
    #[serde(default = "default_scale")]
    pub scale: String,

    /// Random seed for reproducibility.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Side length of the square grid. Only [`GRID_SIZE`] passes
    /// validation; the field exists so the file states it.
    #[serde(default = "default_grid_size")]
    pub grid_size: u8,

    /// Tick limit per run.
    #[serde(default = "default_max_ticks")]
    pub max_ticks: u64,

    /// How survivors are placed at the start of a run.
    #[serde(default)]
    pub placement: PlacementMode,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            scale: default_scale(),
            seed: default_seed(),
            grid_size: default_grid_size(),
            max_ticks: default_max_ticks(),
            placement: PlacementMode::default(),
        }
    }
}

/// Survivor placement strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementMode {
    /// Use the configured survivor positions.
    #[default]
    Fixed,
    /// Draw each survivor into a random corner band, at least five cells
    /// apart from each other.
    Random,
}

/// Stochastic world dynamics.
///
/// Decay noise and wandering are off by default: hunger drops by exactly
/// the decay rate each tick and survivors stay where they were placed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DynamicsConfig {
    /// Smallest per-tick decay jitter factor.
    #[serde(default = "default_jitter_min")]
    pub jitter_min: f64,

    /// Largest per-tick decay jitter factor.
    #[serde(default = "default_jitter_max")]
    pub jitter_max: f64,

    /// Per-tick probability that a survivor wanders.
    #[serde(default = "default_wander_chance")]
    pub wander_chance: f64,

    /// Scheduled crisis.
    #[serde(default)]
    pub crisis: CrisisConfig,
}

impl Default for DynamicsConfig {
    fn default() -> Self {
        Self {
            jitter_min: default_jitter_min(),
            jitter_max: default_jitter_max(),
            wander_chance: default_wander_chance(),
            crisis: CrisisConfig::default(),
        }
    }
}

/// Scheduled crisis configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrisisConfig {
    /// Whether the crisis fires at all.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Completed-tick count at which it fires.
    #[serde(default = "default_crisis_tick")]
    pub at_tick: u64,

    /// Child hunger after the crisis.
    #[serde(default = "default_crisis_child_hunger")]
    pub child_hunger: f64,

    /// Adult hunger after the crisis.
    #[serde(default = "default_crisis_adult_hunger")]
    pub adult_hunger: f64,
}

impl Default for CrisisConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            at_tick: default_crisis_tick(),
            child_hunger: default_crisis_child_hunger(),
            adult_hunger: default_crisis_adult_hunger(),
        }
    }
}

/// Agent configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Starting cell.
    #[serde(default = "default_center")]
    pub start: Position,

    /// Recharge station cell.
    #[serde(default = "default_center")]
    pub base: Position,

    /// Starting energy.
    #[serde(default = "default_energy")]
    pub energy: f64,

    /// Energy per 100 km travelled.
    #[serde(default = "default_travel_cost")]
    pub travel_cost_per_100km: f64,

    /// Energy regained per tick on base.
    #[serde(default = "default_recharge")]
    pub recharge_per_tick: f64,

    /// Idle agents below this energy head home.
    #[serde(default = "default_safety_margin")]
    pub safety_margin: f64,

    /// Energy a rescue must leave after the trip home.
    #[serde(default = "default_reserve")]
    pub reserve_energy: f64,

    /// Direct hand-over distance, in cells.
    #[serde(default = "default_contact_radius")]
    pub contact_radius_cells: f64,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            start: default_center(),
            base: default_center(),
            energy: default_energy(),
            travel_cost_per_100km: default_travel_cost(),
            recharge_per_tick: default_recharge(),
            safety_margin: default_safety_margin(),
            reserve_energy: default_reserve(),
            contact_radius_cells: default_contact_radius(),
        }
    }
}

/// Both survivors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurvivorsConfig {
    /// Survivor A.
    #[serde(default = "default_child")]
    pub child: SurvivorConfig,

    /// Survivor B.
    #[serde(default = "default_adult")]
    pub adult: SurvivorConfig,
}

impl Default for SurvivorsConfig {
    fn default() -> Self {
        Self {
            child: default_child(),
            adult: default_adult(),
        }
    }
}

/// One survivor's starting state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurvivorConfig {
    /// Starting cell (ignored under random placement).
    pub position: Position,

    /// Starting hunger.
    #[serde(default = "default_hunger")]
    pub hunger: f64,

    /// Danger threshold.
    #[serde(default = "default_danger_threshold")]
    pub danger_threshold: f64,

    /// Contact rescue bonus.
    #[serde(default = "default_rescue_bonus")]
    pub rescue_bonus: f64,
}

/// Fixed capability profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapabilityConfig {
    /// Speed multiplier.
    #[serde(default = "default_one")]
    pub speed_multiplier: f64,

    /// Beam range in km.
    #[serde(default = "default_beam_range")]
    pub beam_range_km: f64,

    /// Beam energy per km.
    #[serde(default = "default_beam_cost")]
    pub beam_cost_per_km: f64,

    /// Beam efficiency.
    #[serde(default = "default_beam_efficiency")]
    pub beam_efficiency: f64,

    /// Nominal hunger decay per tick.
    #[serde(default = "default_one")]
    pub hunger_decay_rate: f64,

    /// Multiplier on the decay rate; also applied to era draws.
    #[serde(default = "default_one")]
    pub hunger_decay_multiplier: f64,
}

impl Default for CapabilityConfig {
    fn default() -> Self {
        let profile = CapabilityProfile::default();
        Self {
            speed_multiplier: profile.speed_multiplier,
            beam_range_km: profile.beam_range_km,
            beam_cost_per_km: profile.beam_cost_per_km,
            beam_efficiency: profile.beam_efficiency,
            hunger_decay_rate: profile.hunger_decay_rate,
            hunger_decay_multiplier: 1.0,
        }
    }
}

/// How era draws are distributed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EraDistribution {
    /// Each field independently uniform over its range.
    #[default]
    Uniform,
    /// A single exponentially distributed tech factor drives every field.
    TechFactor,
}

/// Closed float interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FloatRange {
    /// Lower bound.
    pub min: f64,
    /// Upper bound.
    pub max: f64,
}

impl FloatRange {
    /// Build a range.
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Map a unit sample in `[0, 1)` onto the range.
    pub fn lerp(self, unit: f64) -> f64 {
        unit.clamp(0.0, 1.0).mul_add(self.max - self.min, self.min)
    }
}

/// Ranges for randomized era draws.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EraConfig {
    /// Draw distribution.
    #[serde(default)]
    pub distribution: EraDistribution,

    /// Speed multiplier range.
    #[serde(default = "default_era_speed")]
    pub speed_multiplier: FloatRange,

    /// Beam range, km.
    #[serde(default = "default_era_beam_range")]
    pub beam_range_km: FloatRange,

    /// Beam cost per km.
    #[serde(default = "default_era_beam_cost")]
    pub beam_cost_per_km: FloatRange,

    /// Beam efficiency.
    #[serde(default = "default_era_efficiency")]
    pub beam_efficiency: FloatRange,

    /// Hunger decay per tick.
    #[serde(default = "default_era_decay")]
    pub hunger_decay_rate: FloatRange,
}

impl Default for EraConfig {
    fn default() -> Self {
        Self {
            distribution: EraDistribution::default(),
            speed_multiplier: default_era_speed(),
            beam_range_km: default_era_beam_range(),
            beam_cost_per_km: default_era_beam_cost(),
            beam_efficiency: default_era_efficiency(),
            hunger_decay_rate: default_era_decay(),
        }
    }
}

impl EraConfig {
    /// Every range must be positive and ordered; efficiency stays within 1.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidConfig`] for the first bad range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, range) in [
            ("era.speed_multiplier", self.speed_multiplier),
            ("era.beam_range_km", self.beam_range_km),
            ("era.beam_cost_per_km", self.beam_cost_per_km),
            ("era.beam_efficiency", self.beam_efficiency),
            ("era.hunger_decay_rate", self.hunger_decay_rate),
        ] {
            if range.min <= 0.0 || range.min > range.max || !range.max.is_finite() {
                return Err(ConfigError::invalid(
                    field,
                    format!("[{}, {}] must be positive and ordered", range.min, range.max),
                ));
            }
        }
        if self.beam_efficiency.max > 1.0 {
            return Err(ConfigError::invalid(
                "era.beam_efficiency",
                format!("{} exceeds 1", self.beam_efficiency.max),
            ));
        }
        Ok(())
    }
}

/// Batch execution settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSettings {
    /// Number of runs.
    #[serde(default = "default_runs")]
    pub runs: u32,

    /// Draw a fresh era per run instead of using the fixed profile.
    #[serde(default)]
    pub randomized: bool,
}

impl Default for BatchSettings {
    fn default() -> Self {
        Self {
            runs: default_runs(),
            randomized: false,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Human-readable multi-line output.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format.
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions (required by serde)
// ---------------------------------------------------------------------------

fn default_scale() -> String {
    String::from("country")
}
const fn default_seed() -> u64 {
    42
}
const fn default_grid_size() -> u8 {
    GRID_SIZE
}
const fn default_max_ticks() -> u64 {
    200
}
const fn default_jitter_min() -> f64 {
    1.0
}
const fn default_jitter_max() -> f64 {
    1.0
}
const fn default_wander_chance() -> f64 {
    0.0
}
const fn default_true() -> bool {
    true
}
const fn default_crisis_tick() -> u64 {
    3
}
const fn default_crisis_child_hunger() -> f64 {
    25.0
}
const fn default_crisis_adult_hunger() -> f64 {
    20.0
}
const fn default_center() -> Position {
    Position::new(7, 7)
}
const fn default_energy() -> f64 {
    100.0
}
const fn default_travel_cost() -> f64 {
    2.0
}
const fn default_recharge() -> f64 {
    5.0
}
const fn default_safety_margin() -> f64 {
    70.0
}
const fn default_reserve() -> f64 {
    5.0
}
const fn default_contact_radius() -> f64 {
    1.5
}
const fn default_hunger() -> f64 {
    80.0
}
const fn default_danger_threshold() -> f64 {
    30.0
}
const fn default_rescue_bonus() -> f64 {
    40.0
}
const fn default_child() -> SurvivorConfig {
    SurvivorConfig {
        position: Position::new(2, 12),
        hunger: default_hunger(),
        danger_threshold: default_danger_threshold(),
        rescue_bonus: default_rescue_bonus(),
    }
}
const fn default_adult() -> SurvivorConfig {
    SurvivorConfig {
        position: Position::new(12, 2),
        hunger: default_hunger(),
        danger_threshold: default_danger_threshold(),
        rescue_bonus: default_rescue_bonus(),
    }
}
const fn default_one() -> f64 {
    1.0
}
const fn default_beam_range() -> f64 {
    100.0
}
const fn default_beam_cost() -> f64 {
    0.05
}
const fn default_beam_efficiency() -> f64 {
    0.8
}
const fn default_era_speed() -> FloatRange {
    FloatRange::new(1.0, 50.0)
}
const fn default_era_beam_range() -> FloatRange {
    FloatRange::new(100.0, 5000.0)
}
const fn default_era_beam_cost() -> FloatRange {
    FloatRange::new(0.02, 0.05)
}
const fn default_era_efficiency() -> FloatRange {
    FloatRange::new(0.8, 0.95)
}
const fn default_era_decay() -> FloatRange {
    FloatRange::new(0.3, 3.0)
}
const fn default_runs() -> u32 {
    1000
}
fn default_log_level() -> String {
    String::from("info")
}
