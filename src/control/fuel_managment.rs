use crate::constants::{ALTITUDE_CONSUMPTION_FACTOR, VELOCITY_CONSUMPTION_FACTOR};
use crate::control::spacecraft::SpacecraftState;

/// Result of a single burn request against the tank.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum FuelBurn {
    Consumed(f64),
    Exhausted,
}

pub struct FuelManagementSystem;

impl FuelManagementSystem {
    // Consumption grows with the kinetic and potential proxies of the craft
    pub fn dynamic_consumption(base_consumption: f64, velocity: f64, altitude: f64) -> f64 {
        base_consumption
            + velocity * VELOCITY_CONSUMPTION_FACTOR
            + altitude * ALTITUDE_CONSUMPTION_FACTOR
    }

    // Burns fuel for one tick. An insufficient tank is drained to zero and
    // flags a systems fault.
    pub fn consume_fuel(state: &mut SpacecraftState, base_consumption: f64) -> FuelBurn {
        let consumption =
            Self::dynamic_consumption(base_consumption, state.velocity, state.altitude);

        if state.fuel_level > consumption {
            state.fuel_level -= consumption;
            FuelBurn::Consumed(consumption)
        } else {
            state.fuel_level = 0.0;
            state.systems_nominal = false;
            FuelBurn::Exhausted
        }
    }
}
