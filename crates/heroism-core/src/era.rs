//! Randomized capability profiles ("eras").
//!
//! An era is a capability profile drawn before a run starts, standing in
//! for an unknown future technology level. The [`EraRandomizer`] reads its
//! randomness from a [`RandomSource`], so production code feeds it a seeded
//! generator while tests feed it a fixed sequence and check the exact
//! profile that comes out.

use heroism_types::{CapabilityProfile, EraInfo, EraPeriod};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::{EraConfig, EraDistribution};

/// Upper bound on the tech factor under [`EraDistribution::TechFactor`].
pub const MAX_TECH_FACTOR: f64 = 200.0;

/// Upper bound on the danger threshold and rescue bonus scales.
pub const MAX_SURVIVOR_SCALE: f64 = 2.0;

/// A source of uniform samples in `[0, 1)`.
pub trait RandomSource {
    /// The next sample.
    fn next_unit(&mut self) -> f64;
}

/// [`RandomSource`] backed by a seeded [`StdRng`].
#[derive(Debug, Clone)]
pub struct SeededSource {
    rng: StdRng,
}

impl SeededSource {
    /// Seed a new source.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededSource {
    fn next_unit(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}

/// Draws capability profiles from the configured ranges.
#[derive(Debug, Clone)]
pub struct EraRandomizer<S> {
    ranges: EraConfig,
    source: S,
}

impl EraRandomizer<SeededSource> {
    /// Randomizer over `ranges` seeded with `seed`.
    pub fn seeded(ranges: EraConfig, seed: u64) -> Self {
        Self::new(ranges, SeededSource::new(seed))
    }
}

impl<S: RandomSource> EraRandomizer<S> {
    /// Randomizer over `ranges` reading from `source`.
    pub const fn new(ranges: EraConfig, source: S) -> Self {
        Self { ranges, source }
    }

    /// Draw a capability profile.
    pub fn draw(&mut self) -> CapabilityProfile {
        self.draw_era().0
    }

    /// Draw a capability profile together with its era label.
    ///
    /// Uniform draws report the tech factor implied by the drawn speed
    /// multiplier and leave the survivor scales at 1. Tech-factor draws
    /// also raise the danger threshold by 1/60 and the rescue bonus by 1/50
    /// per tech unit, both capped at [`MAX_SURVIVOR_SCALE`].
    pub fn draw_era(&mut self) -> (CapabilityProfile, EraInfo) {
        match self.ranges.distribution {
            EraDistribution::Uniform => self.draw_uniform(),
            EraDistribution::TechFactor => self.draw_tech_factor(),
        }
    }

    fn draw_uniform(&mut self) -> (CapabilityProfile, EraInfo) {
        let r = &self.ranges;
        let (speed, range, cost, efficiency, decay) = (
            r.speed_multiplier,
            r.beam_range_km,
            r.beam_cost_per_km,
            r.beam_efficiency,
            r.hunger_decay_rate,
        );
        let profile = CapabilityProfile {
            speed_multiplier: speed.lerp(self.source.next_unit()),
            beam_range_km: range.lerp(self.source.next_unit()),
            beam_cost_per_km: cost.lerp(self.source.next_unit()),
            beam_efficiency: efficiency.lerp(self.source.next_unit()),
            hunger_decay_rate: decay.lerp(self.source.next_unit()),
        };
        // Speed grows by 0.25 per tech unit under the correlated model.
        let tech_factor = (profile.speed_multiplier - 1.0).mul_add(4.0, 1.0);
        let info = EraInfo {
            danger_threshold_scale: 1.0,
            rescue_bonus_scale: 1.0,
            ..era_info(tech_factor)
        };
        (profile, info)
    }

    fn draw_tech_factor(&mut self) -> (CapabilityProfile, EraInfo) {
        // Exponential with rate 0.5 by inversion.
        let exp = -(1.0 - self.source.next_unit()).ln() / 0.5;
        let tech_factor = exp.mul_add(10.0, 1.0).min(MAX_TECH_FACTOR);
        let advance = tech_factor - 1.0;

        let decay = if self.source.next_unit() < 0.7 {
            advance.mul_add(-0.02, 1.0).max(0.3)
        } else {
            (1.0 + self.source.next_unit()).min(3.0)
        };

        let r = &self.ranges;
        let profile = CapabilityProfile {
            speed_multiplier: clamp_to(advance.mul_add(0.25, 1.0), r.speed_multiplier),
            beam_range_km: clamp_to(100.0 * advance.mul_add(0.5, 1.0), r.beam_range_km),
            beam_cost_per_km: clamp_to(advance.mul_add(-0.001, 0.05), r.beam_cost_per_km),
            beam_efficiency: clamp_to(advance.mul_add(0.005, 0.8), r.beam_efficiency),
            hunger_decay_rate: clamp_to(decay, r.hunger_decay_rate),
        };
        (profile, era_info(tech_factor))
    }
}

fn clamp_to(value: f64, range: crate::config::FloatRange) -> f64 {
    value.clamp(range.min, range.max)
}

fn era_info(tech_factor: f64) -> EraInfo {
    let advance = tech_factor - 1.0;
    EraInfo {
        tech_factor,
        period: EraPeriod::from_tech_factor(tech_factor),
        danger_threshold_scale: advance.mul_add(1.0 / 60.0, 1.0).min(MAX_SURVIVOR_SCALE),
        rescue_bonus_scale: advance.mul_add(0.02, 1.0).min(MAX_SURVIVOR_SCALE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Replays a fixed list of samples, cycling when exhausted.
    struct FixedSequence {
        values: Vec<f64>,
        next: usize,
    }

    impl FixedSequence {
        fn new(values: &[f64]) -> Self {
            Self {
                values: values.to_vec(),
                next: 0,
            }
        }
    }

    impl RandomSource for FixedSequence {
        fn next_unit(&mut self) -> f64 {
            let value = self.values.get(self.next).copied().unwrap_or(0.0);
            self.next = (self.next + 1) % self.values.len().max(1);
            value
        }
    }

    #[test]
    fn uniform_draw_maps_samples_onto_ranges() {
        let mut era = EraRandomizer::new(
            EraConfig::default(),
            FixedSequence::new(&[0.0, 0.5, 1.0, 0.0, 0.5]),
        );
        let profile = era.draw();
        assert!((profile.speed_multiplier - 1.0).abs() < 1e-12);
        assert!((profile.beam_range_km - 2550.0).abs() < 1e-9);
        assert!((profile.beam_cost_per_km - 0.05).abs() < 1e-12);
        assert!((profile.beam_efficiency - 0.8).abs() < 1e-12);
        assert!((profile.hunger_decay_rate - 1.65).abs() < 1e-12);
    }

    #[test]
    fn uniform_draws_stay_in_range() {
        let ranges = EraConfig::default();
        let mut era = EraRandomizer::seeded(ranges.clone(), 9);
        for _ in 0..500 {
            let p = era.draw();
            assert!((ranges.speed_multiplier.min..=ranges.speed_multiplier.max)
                .contains(&p.speed_multiplier));
            assert!((ranges.beam_range_km.min..=ranges.beam_range_km.max)
                .contains(&p.beam_range_km));
            assert!((ranges.beam_cost_per_km.min..=ranges.beam_cost_per_km.max)
                .contains(&p.beam_cost_per_km));
            assert!((ranges.beam_efficiency.min..=ranges.beam_efficiency.max)
                .contains(&p.beam_efficiency));
            assert!((ranges.hunger_decay_rate.min..=ranges.hunger_decay_rate.max)
                .contains(&p.hunger_decay_rate));
        }
    }

    #[test]
    fn seeded_draws_are_reproducible() {
        let mut a = EraRandomizer::seeded(EraConfig::default(), 1234);
        let mut b = EraRandomizer::seeded(EraConfig::default(), 1234);
        for _ in 0..20 {
            assert_eq!(a.draw(), b.draw());
        }
    }

    #[test]
    fn tech_factor_zero_sample_is_present_day() {
        let ranges = EraConfig {
            distribution: EraDistribution::TechFactor,
            ..EraConfig::default()
        };
        // exp sample 0 -> tech factor 1; 0.0 < 0.7 takes the improving branch.
        let mut era = EraRandomizer::new(ranges, FixedSequence::new(&[0.0, 0.0]));
        let (profile, info) = era.draw_era();
        assert!((info.tech_factor - 1.0).abs() < 1e-12);
        assert_eq!(info.period, EraPeriod::NearPresent);
        assert!((profile.speed_multiplier - 1.0).abs() < 1e-12);
        assert!((profile.beam_range_km - 100.0).abs() < 1e-9);
        assert!((profile.beam_cost_per_km - 0.05).abs() < 1e-12);
        assert!((profile.beam_efficiency - 0.8).abs() < 1e-12);
        assert!((profile.hunger_decay_rate - 1.0).abs() < 1e-12);
        assert!((info.danger_threshold_scale - 1.0).abs() < 1e-12);
        assert!((info.rescue_bonus_scale - 1.0).abs() < 1e-12);
    }

    #[test]
    fn tech_factor_shifts_survivor_scales() {
        let ranges = EraConfig {
            distribution: EraDistribution::TechFactor,
            ..EraConfig::default()
        };
        // 1 - e^-1 gives an exponential draw of 2, so a tech factor of 21.
        let u = 1.0 - (-1.0_f64).exp();
        let mut era = EraRandomizer::new(ranges, FixedSequence::new(&[u, 0.0]));
        let (_, info) = era.draw_era();
        assert!((info.tech_factor - 21.0).abs() < 1e-9);
        assert!((info.danger_threshold_scale - (1.0 + 20.0 / 60.0)).abs() < 1e-9);
        assert!((info.rescue_bonus_scale - 1.4).abs() < 1e-9);
    }

    #[test]
    fn uniform_draws_leave_survivors_alone() {
        let mut era = EraRandomizer::seeded(EraConfig::default(), 5);
        for _ in 0..50 {
            let (_, info) = era.draw_era();
            assert!((info.danger_threshold_scale - 1.0).abs() < 1e-12);
            assert!((info.rescue_bonus_scale - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn tech_factor_is_capped() {
        let ranges = EraConfig {
            distribution: EraDistribution::TechFactor,
            ..EraConfig::default()
        };
        // A sample just below 1 gives a huge exponential draw.
        let mut era = EraRandomizer::new(ranges, FixedSequence::new(&[0.999_999_999, 0.9, 0.5]));
        let (profile, info) = era.draw_era();
        assert!((info.tech_factor - MAX_TECH_FACTOR).abs() < 1e-9);
        assert_eq!(info.period, EraPeriod::FarFuture);
        assert!((profile.speed_multiplier - 50.0).abs() < 1e-9);
        assert!((profile.beam_range_km - 5000.0).abs() < 1e-9);
        assert!((profile.beam_cost_per_km - 0.02).abs() < 1e-12);
        assert!((profile.beam_efficiency - 0.95).abs() < 1e-12);
        // 0.9 >= 0.7 takes the worsening branch: 1 + 0.5
        assert!((profile.hunger_decay_rate - 1.5).abs() < 1e-12);
        assert!((info.danger_threshold_scale - MAX_SURVIVOR_SCALE).abs() < 1e-12);
        assert!((info.rescue_bonus_scale - MAX_SURVIVOR_SCALE).abs() < 1e-12);
    }
}
