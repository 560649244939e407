//! Survivor state and hunger mechanics.
//!
//! Hunger is a reserve in `[0, 100]`: it falls every tick and a rescue tops
//! it back up. A survivor dies the instant hunger reaches zero, and death is
//! permanent -- no later feed can revive them.

use heroism_types::{Position, SurvivorRole};
use serde::Serialize;

/// Upper bound of the hunger reserve.
pub const MAX_HUNGER: f64 = 100.0;

/// One of the two people the agent is trying to keep alive.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Survivor {
    /// Child or adult.
    pub role: SurvivorRole,
    /// Current grid cell.
    pub position: Position,
    /// Remaining food reserve, clamped to `[0, MAX_HUNGER]`.
    hunger: f64,
    /// Hunger below which the survivor is in danger.
    pub danger_threshold: f64,
    /// Hunger restored by a contact rescue.
    pub rescue_bonus: f64,
    /// Whether the survivor is alive. Never flips back to `true`.
    alive: bool,
    /// Rescues delivered so far (contact and beam).
    pub rescues: u32,
}

impl Survivor {
    /// Create a living survivor. Hunger is clamped into range.
    pub fn new(
        role: SurvivorRole,
        position: Position,
        hunger: f64,
        danger_threshold: f64,
        rescue_bonus: f64,
    ) -> Self {
        Self {
            role,
            position,
            hunger: hunger.clamp(0.0, MAX_HUNGER),
            danger_threshold,
            rescue_bonus,
            alive: true,
            rescues: 0,
        }
    }

    /// Current hunger reserve.
    pub const fn hunger(&self) -> f64 {
        self.hunger
    }

    /// Whether the survivor is alive.
    pub const fn is_alive(&self) -> bool {
        self.alive
    }

    /// Alive and below the danger threshold.
    pub const fn in_danger(&self) -> bool {
        self.alive && self.hunger < self.danger_threshold
    }

    /// Headroom above the danger threshold (negative when in danger).
    pub const fn margin(&self) -> f64 {
        self.hunger - self.danger_threshold
    }

    /// Lose `amount` hunger. Dead survivors are unaffected.
    pub fn decay(&mut self, amount: f64) {
        if self.alive {
            self.hunger = (self.hunger - amount.max(0.0)).max(0.0);
        }
    }

    /// Mark the survivor dead if hunger has reached zero.
    ///
    /// Returns `true` only on the tick the death happens.
    pub fn lock_in_death(&mut self) -> bool {
        if self.alive && self.hunger <= 0.0 {
            self.hunger = 0.0;
            self.alive = false;
            return true;
        }
        false
    }

    /// Restore up to `amount` hunger and return how much was restored.
    ///
    /// A dead survivor, or one whose reserve already hit zero, gets nothing
    /// and the rescue is not counted.
    pub fn feed(&mut self, amount: f64) -> f64 {
        if !self.alive || self.hunger <= 0.0 {
            return 0.0;
        }
        let before = self.hunger;
        self.hunger = (self.hunger + amount.max(0.0)).min(MAX_HUNGER);
        self.rescues = self.rescues.saturating_add(1);
        self.hunger - before
    }

    /// Overwrite hunger (scheduled crisis). Dead survivors are unaffected.
    pub fn force_hunger(&mut self, hunger: f64) {
        if self.alive {
            self.hunger = hunger.clamp(0.0, MAX_HUNGER);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn child(hunger: f64) -> Survivor {
        Survivor::new(SurvivorRole::Child, Position::new(3, 3), hunger, 30.0, 40.0)
    }

    #[test]
    fn hunger_is_clamped_on_creation() {
        assert!((child(150.0).hunger() - MAX_HUNGER).abs() < f64::EPSILON);
        assert!(child(-5.0).hunger().abs() < f64::EPSILON);
    }

    #[test]
    fn danger_zone() {
        assert!(!child(30.0).in_danger());
        assert!(child(29.9).in_danger());
    }

    #[test]
    fn decay_floors_at_zero() {
        let mut s = child(1.0);
        s.decay(5.0);
        assert!(s.hunger().abs() < f64::EPSILON);
        assert!(s.is_alive(), "death is only locked in by lock_in_death");
        assert!(s.lock_in_death());
        assert!(!s.is_alive());
        assert!(!s.lock_in_death(), "death is reported once");
    }

    #[test]
    fn feed_caps_at_max() {
        let mut s = child(80.0);
        let restored = s.feed(40.0);
        assert!((restored - 20.0).abs() < 1e-12);
        assert!((s.hunger() - MAX_HUNGER).abs() < f64::EPSILON);
        assert_eq!(s.rescues, 1);
    }

    #[test]
    fn dead_survivor_cannot_be_fed() {
        let mut s = child(0.5);
        s.decay(1.0);
        assert!(s.lock_in_death());
        assert!(s.feed(40.0).abs() < f64::EPSILON);
        assert!(s.hunger().abs() < f64::EPSILON);
        assert!(!s.is_alive());
        assert_eq!(s.rescues, 0);
    }

    #[test]
    fn starved_but_unlocked_survivor_cannot_be_fed() {
        let mut s = child(0.5);
        s.decay(1.0);
        assert!(s.feed(40.0).abs() < f64::EPSILON);
        assert!(s.lock_in_death());
    }

    #[test]
    fn crisis_does_not_revive() {
        let mut s = child(0.0);
        assert!(s.lock_in_death());
        s.force_hunger(50.0);
        assert!(s.hunger().abs() < f64::EPSILON);
    }
}
