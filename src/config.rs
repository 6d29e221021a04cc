//! Mission configuration.
//!
//! Every section falls back to the canonical mission values from
//! [`crate::constants`], so an empty TOML document describes the standard
//! launch / orbit / return profile.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::constants::*;
use crate::errors::SimulationError;
use crate::trajectory_system::kinematics::PhaseProfile;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MissionConfig {
    pub initial: InitialConditions,
    pub launch: LaunchConfig,
    pub orbit: OrbitConfig,
    #[serde(rename = "return")]
    pub return_trip: ReturnConfig,
    pub emergency: EmergencyConfig,
    pub safety: SafetyLimits,
    pub simulation: SimulationSettings,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct InitialConditions {
    pub fuel_level: f64,
    pub altitude: f64,
    pub velocity: f64,
    pub latitude: f64,
    pub longitude: f64,
}

impl Default for InitialConditions {
    fn default() -> Self {
        InitialConditions {
            fuel_level: INITIAL_FUEL,
            altitude: 0.0,
            velocity: 0.0,
            latitude: INITIAL_LATITUDE,
            longitude: INITIAL_LONGITUDE,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct LaunchConfig {
    pub base_consumption: f64,
    pub altitude_delta: f64,
    pub velocity_delta: f64,
    pub target_altitude: f64,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        LaunchConfig {
            base_consumption: LAUNCH_BASE_CONSUMPTION,
            altitude_delta: LAUNCH_ALTITUDE_DELTA,
            velocity_delta: LAUNCH_VELOCITY_DELTA,
            target_altitude: ORBIT_ALTITUDE,
        }
    }
}

impl LaunchConfig {
    pub fn profile(&self) -> PhaseProfile {
        PhaseProfile::new(self.base_consumption, self.altitude_delta, self.velocity_delta)
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct OrbitConfig {
    pub base_consumption: f64,
    pub stabilization_ticks: u32,
    pub longitude_drift: f64,
    pub latitude_drift: f64,
    /// Simulated seconds a stalled systems fault may persist before the
    /// emergency procedure is started automatically.
    pub fault_dwell_seconds: f64,
    /// Switch to the backup system when stabilization stalls instead of
    /// waiting out the dwell.
    pub auto_backup: bool,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        OrbitConfig {
            base_consumption: ORBIT_BASE_CONSUMPTION,
            stabilization_ticks: STABILIZATION_TICKS,
            longitude_drift: LONGITUDE_DRIFT_FACTOR,
            latitude_drift: LATITUDE_DRIFT_FACTOR,
            fault_dwell_seconds: FAULT_DWELL_SECONDS,
            auto_backup: false,
        }
    }
}

impl OrbitConfig {
    pub fn profile(&self) -> PhaseProfile {
        PhaseProfile::new(self.base_consumption, 0.0, 0.0)
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct ReturnConfig {
    pub base_consumption: f64,
    pub altitude_delta: f64,
    pub velocity_delta: f64,
}

impl Default for ReturnConfig {
    fn default() -> Self {
        ReturnConfig {
            base_consumption: RETURN_BASE_CONSUMPTION,
            altitude_delta: RETURN_ALTITUDE_DELTA,
            velocity_delta: RETURN_VELOCITY_DELTA,
        }
    }
}

impl ReturnConfig {
    pub fn profile(&self) -> PhaseProfile {
        PhaseProfile::new(self.base_consumption, self.altitude_delta, self.velocity_delta)
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct EmergencyConfig {
    pub base_consumption: f64,
    pub start_altitude: f64,
    pub start_velocity: f64,
    pub altitude_delta: f64,
    pub velocity_delta: f64,
    pub passive_decay: f64,
}

impl Default for EmergencyConfig {
    fn default() -> Self {
        EmergencyConfig {
            base_consumption: EMERGENCY_BASE_CONSUMPTION,
            start_altitude: EMERGENCY_START_ALTITUDE,
            start_velocity: EMERGENCY_START_VELOCITY,
            altitude_delta: EMERGENCY_ALTITUDE_DELTA,
            velocity_delta: EMERGENCY_VELOCITY_DELTA,
            passive_decay: PASSIVE_DECAY_ALTITUDE,
        }
    }
}

impl EmergencyConfig {
    pub fn profile(&self) -> PhaseProfile {
        PhaseProfile::new(self.base_consumption, self.altitude_delta, self.velocity_delta)
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct SafetyLimits {
    pub critical_fuel: f64,
    pub altitude_ceiling: f64,
}

impl Default for SafetyLimits {
    fn default() -> Self {
        SafetyLimits {
            critical_fuel: CRITICAL_FUEL_LEVEL,
            altitude_ceiling: ALTITUDE_CEILING,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    pub tick_seconds: f64,
    pub pacing_millis: u64,
    pub fault_log: PathBuf,
    pub fault_probability: f64,
    pub fault_seed: u64,
    /// Simulated seconds that pass in orbit before the return decision.
    pub operator_delay_seconds: f64,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        SimulationSettings {
            tick_seconds: TIME_STEP,
            pacing_millis: PACING_MILLIS,
            fault_log: PathBuf::from(FAULT_LOG_FILE),
            fault_probability: 0.0,
            fault_seed: DEFAULT_FAULT_SEED,
            operator_delay_seconds: 0.0,
        }
    }
}

impl MissionConfig {
    /// Reads and validates a TOML mission file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SimulationError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| SimulationError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, SimulationError> {
        let config: MissionConfig = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), SimulationError> {
        let initial = &self.initial;
        if !(0.0..=MAX_FUEL).contains(&initial.fuel_level) {
            return Err(SimulationError::ConfigError(format!(
                "initial fuel level {} is outside [0, {MAX_FUEL}]",
                initial.fuel_level
            )));
        }
        if initial.velocity < 0.0 {
            return Err(SimulationError::ConfigError(format!(
                "initial velocity {} must not be negative",
                initial.velocity
            )));
        }
        if !(MIN_LATITUDE..=MAX_LATITUDE).contains(&initial.latitude) {
            return Err(SimulationError::ConfigError(format!(
                "initial latitude {} is outside [{MIN_LATITUDE}, {MAX_LATITUDE}]",
                initial.latitude
            )));
        }
        if self.orbit.stabilization_ticks == 0 {
            return Err(SimulationError::ConfigError(
                "orbit stabilization needs at least one tick".to_string(),
            ));
        }
        if self.simulation.tick_seconds <= 0.0 {
            return Err(SimulationError::ConfigError(format!(
                "tick length {} must be positive",
                self.simulation.tick_seconds
            )));
        }
        if !(0.0..=1.0).contains(&self.simulation.fault_probability) {
            return Err(SimulationError::ConfigError(format!(
                "fault probability {} is outside [0, 1]",
                self.simulation.fault_probability
            )));
        }
        if self.simulation.operator_delay_seconds < 0.0 {
            return Err(SimulationError::ConfigError(format!(
                "operator delay {} must not be negative",
                self.simulation.operator_delay_seconds
            )));
        }
        if self.launch.altitude_delta <= 0.0 {
            return Err(SimulationError::ConfigError(
                "launch must gain altitude every tick".to_string(),
            ));
        }
        if self.return_trip.altitude_delta >= 0.0 || self.emergency.altitude_delta >= 0.0 {
            return Err(SimulationError::ConfigError(
                "return and emergency descents must lose altitude every tick".to_string(),
            ));
        }
        Ok(())
    }
}
