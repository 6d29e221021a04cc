use std::fmt;

use crate::config::InitialConditions;
use crate::telemetry_system::telemetry::TelemetrySnapshot;

#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum MissionPhase {
    Idle,
    Launch,
    Orbit,
    Return,
    Landed,
}

impl MissionPhase {
    /// Phases during which ticks run and the safety monitor is consulted.
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            MissionPhase::Launch | MissionPhase::Orbit | MissionPhase::Return
        )
    }

    pub fn is_terminal(&self) -> bool {
        *self == MissionPhase::Landed
    }
}

impl fmt::Display for MissionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MissionPhase::Idle => "Idle",
            MissionPhase::Launch => "Launch",
            MissionPhase::Orbit => "Orbit",
            MissionPhase::Return => "Return",
            MissionPhase::Landed => "Landed",
        };
        f.write_str(name)
    }
}

/// The single craft aggregate. Owned by the mission state machine and handed
/// to the physics, validation, safety and emergency components by `&mut`.
#[derive(Debug, Clone, PartialEq)]
pub struct SpacecraftState {
    pub phase: MissionPhase,
    pub fuel_level: f64,      // %
    pub altitude: f64,        // km
    pub velocity: f64,        // km/s
    pub systems_nominal: bool,
    pub latitude: f64,
    pub longitude: f64,
    /// Mission-clock seconds at which orbit stabilization stalled on a
    /// systems fault.
    pub fault_time: Option<f64>,
}

impl SpacecraftState {
    pub fn new(initial: &InitialConditions) -> Self {
        SpacecraftState {
            phase: MissionPhase::Idle,
            fuel_level: initial.fuel_level,
            altitude: initial.altitude,
            velocity: initial.velocity.max(0.0),
            systems_nominal: true,
            latitude: initial.latitude,
            longitude: initial.longitude,
            fault_time: None,
        }
    }

    /// Explicit recovery action. This is the only place a systems fault is
    /// cleared.
    pub fn activate_backup_system(&mut self) -> bool {
        self.systems_nominal = true;
        self.fault_time = None;
        true
    }

    pub fn has_fuel(&self) -> bool {
        self.fuel_level > 0.0
    }

    pub fn snapshot(&self) -> TelemetrySnapshot {
        TelemetrySnapshot {
            phase: self.phase,
            latitude: self.latitude,
            longitude: self.longitude,
            altitude: self.altitude,
            velocity: self.velocity,
            fuel_level: self.fuel_level,
        }
    }
}

impl Default for SpacecraftState {
    fn default() -> Self {
        SpacecraftState::new(&InitialConditions::default())
    }
}
