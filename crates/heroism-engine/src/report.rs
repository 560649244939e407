//! The JSON report printed at the end of a batch.

use chrono::{DateTime, Utc};
use heroism_core::config::SimulationConfig;
use heroism_types::{BatchPercentages, BatchResult};
use serde::Serialize;

/// Everything a reader needs to interpret and reproduce a batch.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    /// When the batch finished.
    pub generated_at: DateTime<Utc>,
    /// Geographic scale the runs used.
    pub scale: String,
    /// Batch seed.
    pub seed: u64,
    /// Whether each run drew its own era.
    pub randomized: bool,
    /// Raw statistics, rates as fractions.
    pub result: BatchResult,
    /// Headline rates as rounded percentages.
    pub percentages: BatchPercentages,
    /// The configuration the batch ran with.
    pub config: SimulationConfig,
}

impl BatchReport {
    /// Assemble a report stamped with the current time.
    pub fn new(config: SimulationConfig, result: BatchResult) -> Self {
        Self {
            generated_at: Utc::now(),
            scale: config.world.scale.clone(),
            seed: config.world.seed,
            randomized: config.batch.randomized,
            percentages: result.as_percentages(),
            result,
            config,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn report_serializes_rates_and_config() {
        let result = BatchResult {
            n: 10,
            counted_runs: 10,
            a_survival_rate: 0.9,
            b_survival_rate: 0.4,
            child_priority_rate: 0.75,
            ..BatchResult::default()
        };
        let report = BatchReport::new(SimulationConfig::default(), result);
        let json: serde_json::Value = serde_json::to_value(&report).unwrap();

        assert_eq!(json["scale"], "country");
        assert_eq!(json["seed"], 42);
        assert_eq!(json["result"]["n"], 10);
        assert_eq!(json["percentages"]["a_survival_pct"], 90.0);
        assert_eq!(json["percentages"]["child_priority_pct"], 75.0);
        assert_eq!(json["config"]["world"]["max_ticks"], 200);
        assert!(json["generated_at"].is_string());
    }
}
