use crate::control::fuel_managment::{FuelBurn, FuelManagementSystem};
use crate::control::spacecraft::SpacecraftState;
use crate::telemetry_system::fault_log::FaultKind;

/// Per-tick consumption and motion deltas of a mission phase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseProfile {
    pub base_consumption: f64,
    pub altitude_delta: f64, // km per tick
    pub velocity_delta: f64, // km/s per tick
}

impl PhaseProfile {
    pub fn new(base_consumption: f64, altitude_delta: f64, velocity_delta: f64) -> Self {
        PhaseProfile {
            base_consumption,
            altitude_delta,
            velocity_delta,
        }
    }
}

pub struct PhysicsModel;

impl PhysicsModel {
    /// Burns fuel for one tick, then moves the craft by the profile deltas.
    ///
    /// Fuel is charged against the pre-tick velocity and altitude. Once the
    /// tank is empty the craft can no longer climb or accelerate, so only
    /// the non-positive part of each delta is applied.
    pub fn apply_tick(state: &mut SpacecraftState, profile: &PhaseProfile) -> Option<FaultKind> {
        let burn = FuelManagementSystem::consume_fuel(state, profile.base_consumption);

        let (altitude_delta, velocity_delta) = if state.has_fuel() {
            (profile.altitude_delta, profile.velocity_delta)
        } else {
            (profile.altitude_delta.min(0.0), profile.velocity_delta.min(0.0))
        };

        state.altitude += altitude_delta;
        state.velocity = (state.velocity + velocity_delta).max(0.0);

        match burn {
            FuelBurn::Exhausted => Some(FaultKind::FuelExhausted),
            FuelBurn::Consumed(_) => None,
        }
    }

    /// Ground-track drift while orbiting. Bounds are left to the route
    /// validator.
    pub fn drift_coordinates(
        state: &mut SpacecraftState,
        longitude_factor: f64,
        latitude_factor: f64,
    ) {
        state.longitude += state.velocity * longitude_factor;
        state.latitude += state.velocity * latitude_factor;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn launch_profile() -> PhaseProfile {
        PhaseProfile::new(2.0, 10.0, 1.0)
    }

    #[test]
    fn test_first_launch_tick() {
        let mut state = SpacecraftState::default();

        let fault = PhysicsModel::apply_tick(&mut state, &launch_profile());

        assert_eq!(fault, None);
        assert_abs_diff_eq!(state.fuel_level, 98.0, epsilon = 1e-9);
        assert_eq!(state.altitude, 10.0);
        assert_eq!(state.velocity, 1.0);
    }

    #[test]
    fn test_consumption_uses_pre_tick_motion() {
        let mut state = SpacecraftState::default();
        state.altitude = 10.0;
        state.velocity = 1.0;
        state.fuel_level = 98.0;

        PhysicsModel::apply_tick(&mut state, &launch_profile());

        // 2.0 + 1 * 0.1 + 10 * 0.01
        assert_abs_diff_eq!(state.fuel_level, 95.8, epsilon = 1e-9);
        assert_eq!(state.altitude, 20.0);
        assert_eq!(state.velocity, 2.0);
    }

    #[test]
    fn test_velocity_never_negative() {
        let mut state = SpacecraftState::default();
        state.altitude = 100.0;
        state.velocity = 0.2;

        PhysicsModel::apply_tick(&mut state, &PhaseProfile::new(1.5, -10.0, -0.5));

        assert_eq!(state.velocity, 0.0);
        assert_eq!(state.altitude, 90.0);
    }

    #[test]
    fn test_exhaustion_flags_fault_and_blocks_climb() {
        let mut state = SpacecraftState::default();
        state.fuel_level = 1.0;
        state.altitude = 40.0;
        state.velocity = 4.0;

        let fault = PhysicsModel::apply_tick(&mut state, &launch_profile());

        assert_eq!(fault, Some(FaultKind::FuelExhausted));
        assert_eq!(state.fuel_level, 0.0);
        assert!(!state.systems_nominal);
        assert_eq!(state.altitude, 40.0);
        assert_eq!(state.velocity, 4.0);
    }

    #[test]
    fn test_empty_tank_still_descends() {
        let mut state = SpacecraftState::default();
        state.fuel_level = 0.0;
        state.altitude = 40.0;
        state.velocity = 4.0;

        PhysicsModel::apply_tick(&mut state, &PhaseProfile::new(1.0, -10.0, -0.1));

        assert_eq!(state.altitude, 30.0);
        assert_abs_diff_eq!(state.velocity, 3.9, epsilon = 1e-9);
        assert_eq!(state.fuel_level, 0.0);
    }

    #[test]
    fn test_drift_coordinates() {
        let mut state = SpacecraftState::default();
        state.velocity = 10.0;

        PhysicsModel::drift_coordinates(&mut state, 0.01, 0.005);

        assert_abs_diff_eq!(state.longitude, 28.4271, epsilon = 1e-9);
        assert_abs_diff_eq!(state.latitude, 37.1554, epsilon = 1e-9);
    }
}
