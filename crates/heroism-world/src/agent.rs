//! The rescue agent: position, energy reserve and base station.
//!
//! Energy lives in `[0, 100]`. Spending is checked: an operation that costs
//! more than the agent holds is refused with
//! [`WorldError::InsufficientEnergy`] and leaves the agent untouched.

use heroism_types::Position;
use serde::Serialize;

use crate::error::WorldError;

/// Upper bound of the energy reserve.
pub const MAX_ENERGY: f64 = 100.0;

/// The rescue drone.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Agent {
    /// Current grid cell.
    pub position: Position,
    /// Cell of the recharge station.
    pub base_position: Position,
    energy: f64,
    /// Total kilometers flown.
    pub distance_travelled_km: f64,
    /// Beam shots fired.
    pub beams_fired: u32,
    /// Set once the agent runs dry away from base.
    pub exhausted: bool,
}

impl Agent {
    /// Create an agent with clamped starting energy.
    pub fn new(position: Position, base_position: Position, energy: f64) -> Self {
        Self {
            position,
            base_position,
            energy: energy.clamp(0.0, MAX_ENERGY),
            distance_travelled_km: 0.0,
            beams_fired: 0,
            exhausted: false,
        }
    }

    /// Current energy.
    pub const fn energy(&self) -> f64 {
        self.energy
    }

    /// Whether the agent sits on the base cell.
    pub fn at_base(&self) -> bool {
        self.position == self.base_position
    }

    /// Spend `cost` energy.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InsufficientEnergy`] if `cost` exceeds the
    /// current reserve.
    pub fn spend(&mut self, cost: f64) -> Result<(), WorldError> {
        let cost = cost.max(0.0);
        if cost > self.energy {
            return Err(WorldError::InsufficientEnergy {
                required: cost,
                available: self.energy,
            });
        }
        self.energy = (self.energy - cost).max(0.0);
        if self.energy <= 0.0 && !self.at_base() {
            self.exhausted = true;
        }
        Ok(())
    }

    /// Fly to `destination`, paying `cost` for `km` kilometers.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InsufficientEnergy`] if the flight is
    /// unaffordable; the agent does not move.
    pub fn travel(&mut self, destination: Position, km: f64, cost: f64) -> Result<(), WorldError> {
        let previous = self.position;
        self.position = destination;
        if let Err(e) = self.spend(cost) {
            self.position = previous;
            return Err(e);
        }
        self.distance_travelled_km += km.max(0.0);
        Ok(())
    }

    /// Recharge by up to `amount` while on base. Returns the energy gained.
    pub fn recharge(&mut self, amount: f64) -> f64 {
        if !self.at_base() {
            return 0.0;
        }
        let before = self.energy;
        self.energy = (self.energy + amount.max(0.0)).min(MAX_ENERGY);
        self.energy - before
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn agent(energy: f64) -> Agent {
        Agent::new(Position::new(7, 7), Position::new(7, 7), energy)
    }

    #[test]
    fn energy_is_clamped_on_creation() {
        assert!((agent(250.0).energy() - MAX_ENERGY).abs() < f64::EPSILON);
        assert!(agent(-1.0).energy().abs() < f64::EPSILON);
    }

    #[test]
    fn overspending_is_refused() {
        let mut a = agent(3.0);
        let err = a.spend(3.5).unwrap_err();
        assert!(matches!(err, WorldError::InsufficientEnergy { .. }));
        assert!((a.energy() - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn spending_everything_is_allowed() {
        let mut a = agent(3.0);
        a.spend(3.0).unwrap();
        assert!(a.energy().abs() < f64::EPSILON);
        assert!(!a.exhausted, "running dry on base is not exhaustion");
    }

    #[test]
    fn travel_updates_position_and_odometer() {
        let mut a = agent(10.0);
        a.travel(Position::new(7, 9), 107.0, 2.14).unwrap();
        assert_eq!(a.position, Position::new(7, 9));
        assert!((a.energy() - 7.86).abs() < 1e-9);
        assert!((a.distance_travelled_km - 107.0).abs() < 1e-9);
    }

    #[test]
    fn unaffordable_travel_leaves_agent_in_place() {
        let mut a = agent(1.0);
        assert!(a.travel(Position::new(0, 0), 400.0, 8.0).is_err());
        assert_eq!(a.position, Position::new(7, 7));
        assert!(a.distance_travelled_km.abs() < f64::EPSILON);
    }

    #[test]
    fn running_dry_away_from_base_marks_exhaustion() {
        let mut a = agent(2.0);
        a.travel(Position::new(7, 8), 53.5, 2.0).unwrap();
        assert!(a.exhausted);
    }

    #[test]
    fn recharge_only_on_base() {
        let mut a = agent(50.0);
        assert!((a.recharge(5.0) - 5.0).abs() < 1e-12);
        a.travel(Position::new(7, 8), 53.5, 1.07).unwrap();
        assert!(a.recharge(5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn recharge_caps_at_max() {
        let mut a = agent(98.0);
        assert!((a.recharge(5.0) - 2.0).abs() < 1e-12);
        assert!((a.energy() - MAX_ENERGY).abs() < f64::EPSILON);
    }
}
