//! Geographic scale presets.
//!
//! Every run takes place on the same 15x15 grid; the scale decides how many
//! kilometers one cell spans and how much simulated time one tick covers.
//! The figures are calibrated on real places (Paris, Ile-de-France, France,
//! Europe, the habitable Earth).

use serde::Serialize;

use crate::error::WorldError;

/// Raw figures for one preset, before derived values are computed.
struct ScalePreset {
    name: &'static str,
    label: &'static str,
    area_km2: f64,
    km_per_cell: f64,
    agent_speed_kmh: f64,
    human_speed_kmh: f64,
    minutes_per_tick: f64,
}

const PRESETS: [ScalePreset; 5] = [
    ScalePreset {
        name: "settlement",
        label: "Settlement (Paris)",
        area_km2: 105.0,
        km_per_cell: 0.68,
        agent_speed_kmh: 50.0,
        human_speed_kmh: 5.0,
        minutes_per_tick: 10.0,
    },
    ScalePreset {
        name: "region",
        label: "Region (Ile-de-France)",
        area_km2: 12_012.0,
        km_per_cell: 7.3,
        agent_speed_kmh: 200.0,
        human_speed_kmh: 5.0,
        minutes_per_tick: 60.0,
    },
    ScalePreset {
        name: "country",
        label: "Country (France)",
        area_km2: 643_801.0,
        km_per_cell: 53.5,
        agent_speed_kmh: 500.0,
        human_speed_kmh: 5.0,
        minutes_per_tick: 360.0,
    },
    ScalePreset {
        name: "continent",
        label: "Continent (Europe)",
        area_km2: 10_180_000.0,
        km_per_cell: 213.0,
        agent_speed_kmh: 800.0,
        human_speed_kmh: 5.0,
        minutes_per_tick: 1440.0,
    },
    ScalePreset {
        name: "world",
        label: "World (habitable Earth)",
        area_km2: 150_000_000.0,
        km_per_cell: 816.0,
        agent_speed_kmh: 1000.0,
        human_speed_kmh: 5.0,
        minutes_per_tick: 4320.0,
    },
];

/// A resolved geographic scale. Immutable; selected once per run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoScale {
    /// Preset key (`settlement`, `region`, `country`, `continent`, `world`).
    pub name: &'static str,
    /// Human-readable label.
    pub label: &'static str,
    /// Real-world area the grid represents.
    pub area_km2: f64,
    /// Kilometers spanned by one grid cell. Always positive.
    pub km_per_cell: f64,
    /// Agent cruising speed at speed multiplier 1.
    pub agent_speed_kmh: f64,
    /// Walking speed of the survivors.
    pub human_speed_kmh: f64,
    /// Simulated minutes per tick.
    pub minutes_per_tick: f64,
    /// Cells the agent covers in one tick at speed multiplier 1.
    pub base_speed_unit: f64,
}

impl GeoScale {
    fn from_preset(preset: &ScalePreset) -> Self {
        let km_per_tick = preset.agent_speed_kmh * preset.minutes_per_tick / 60.0;
        Self {
            name: preset.name,
            label: preset.label,
            area_km2: preset.area_km2,
            km_per_cell: preset.km_per_cell,
            agent_speed_kmh: preset.agent_speed_kmh,
            human_speed_kmh: preset.human_speed_kmh,
            minutes_per_tick: preset.minutes_per_tick,
            base_speed_unit: km_per_tick / preset.km_per_cell,
        }
    }

    /// Every preset, smallest first.
    pub fn all() -> Vec<Self> {
        PRESETS.iter().map(Self::from_preset).collect()
    }

    /// Convert a cell distance to kilometers.
    pub const fn km(&self, cells: f64) -> f64 {
        cells * self.km_per_cell
    }

    /// Cells a survivor can walk in one tick.
    pub const fn human_cells_per_tick(&self) -> f64 {
        self.human_speed_kmh * self.minutes_per_tick / 60.0 / self.km_per_cell
    }
}

impl Default for GeoScale {
    fn default() -> Self {
        // "country" is the reference scale of the experiment.
        let [_, _, country, _, _] = &PRESETS;
        Self::from_preset(country)
    }
}

/// Resolve a preset by name (case-insensitive, surrounding whitespace ignored).
///
/// # Errors
///
/// Returns [`WorldError::UnknownScale`] if the name matches no preset.
pub fn resolve(scale_name: &str) -> Result<GeoScale, WorldError> {
    let wanted = scale_name.trim();
    PRESETS
        .iter()
        .find(|p| p.name.eq_ignore_ascii_case(wanted))
        .map(GeoScale::from_preset)
        .ok_or_else(|| WorldError::UnknownScale {
            name: scale_name.to_owned(),
        })
}
