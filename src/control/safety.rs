use crate::config::SafetyLimits;
use crate::control::spacecraft::SpacecraftState;
use crate::telemetry_system::fault_log::FaultKind;

/// Reasons for declaring an emergency, in descending priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultReason {
    CriticalFuel,
    AltitudeCeiling,
    SystemsNotNominal,
}

impl From<FaultReason> for FaultKind {
    fn from(reason: FaultReason) -> Self {
        match reason {
            FaultReason::CriticalFuel => FaultKind::FuelCritical,
            FaultReason::AltitudeCeiling => FaultKind::AltitudeCeiling,
            FaultReason::SystemsNotNominal => FaultKind::SystemsNotNominal,
        }
    }
}

/// Stateless threshold check run on every active tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct SafetyMonitor {
    limits: SafetyLimits,
}

impl SafetyMonitor {
    pub fn new(limits: SafetyLimits) -> Self {
        SafetyMonitor { limits }
    }

    /// First matching fault: fuel, then altitude, then systems.
    pub fn check(&self, state: &SpacecraftState) -> Option<FaultReason> {
        if state.fuel_level <= self.limits.critical_fuel {
            Some(FaultReason::CriticalFuel)
        } else if state.altitude > self.limits.altitude_ceiling {
            Some(FaultReason::AltitudeCeiling)
        } else if !state.systems_nominal {
            Some(FaultReason::SystemsNotNominal)
        } else {
            None
        }
    }
}
