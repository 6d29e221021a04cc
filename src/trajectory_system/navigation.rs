use crate::constants::{
    ALTITUDE_CEILING, MAX_LATITUDE, MAX_LONGITUDE, MIN_LATITUDE, REACQUISITION_ALTITUDE,
    REACQUISITION_VELOCITY,
};
use crate::control::spacecraft::SpacecraftState;
use crate::telemetry_system::fault_log::FaultKind;

/// Keeps the craft inside the navigational envelope.
pub struct RouteValidator;

impl RouteValidator {
    /// Clamps latitude, wraps longitude and re-baselines an altitude outside
    /// `[0, ALTITUDE_CEILING]`. Never touches phase or fuel.
    pub fn validate(state: &mut SpacecraftState) -> Option<FaultKind> {
        if !Self::in_envelope(state) {
            state.latitude = Self::clamp_latitude(state.latitude);
            state.longitude = Self::wrap_longitude(state.longitude);
        }

        if !(0.0..=ALTITUDE_CEILING).contains(&state.altitude) {
            state.altitude = REACQUISITION_ALTITUDE;
            state.velocity = REACQUISITION_VELOCITY;
            return Some(FaultKind::NavigationDeviation);
        }
        None
    }

    pub fn clamp_latitude(latitude: f64) -> f64 {
        latitude.clamp(MIN_LATITUDE, MAX_LATITUDE)
    }

    /// Wraps into `(-180, 180]`.
    pub fn wrap_longitude(longitude: f64) -> f64 {
        if longitude > -MAX_LONGITUDE && longitude <= MAX_LONGITUDE {
            return longitude;
        }
        let wrapped = (longitude + MAX_LONGITUDE).rem_euclid(2.0 * MAX_LONGITUDE) - MAX_LONGITUDE;
        if wrapped <= -MAX_LONGITUDE {
            wrapped + 2.0 * MAX_LONGITUDE
        } else {
            wrapped
        }
    }

    pub fn in_envelope(state: &SpacecraftState) -> bool {
        (MIN_LATITUDE..=MAX_LATITUDE).contains(&state.latitude)
            && state.longitude > -MAX_LONGITUDE
            && state.longitude <= MAX_LONGITUDE
    }
}
