use tracing::{error, info, warn};

use crate::config::EmergencyConfig;
use crate::control::spacecraft::{MissionPhase, SpacecraftState};
use crate::telemetry_system::fault_log::{FaultEvent, FaultKind, FaultSink};
use crate::telemetry_system::telemetry::TelemetrySink;
use crate::trajectory_system::kinematics::PhysicsModel;
use crate::utils::pacing::Pacer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmergencyOutcome {
    /// Forced descent completed after `steps` descent ticks.
    Landed { steps: u32 },
    /// No fuel for a controlled descent; the craft holds in a decaying orbit.
    DegradedHold,
}

/// Safe-return override. Takes the craft from any phase to either `Landed`
/// or a degraded hold.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmergencyController {
    config: EmergencyConfig,
}

impl EmergencyController {
    pub fn new(config: EmergencyConfig) -> Self {
        EmergencyController { config }
    }

    pub fn execute(
        &self,
        state: &mut SpacecraftState,
        telemetry: &mut dyn TelemetrySink,
        faults: &mut dyn FaultSink,
        pacer: &dyn Pacer,
    ) -> EmergencyOutcome {
        if !state.has_fuel() {
            error!("Fuel exhausted, switching to passive orbit decay");
            state.velocity = 0.0;
            state.altitude = (state.altitude - self.config.passive_decay).max(0.0);
            telemetry.send(state.snapshot());
            faults.record(FaultEvent::new(FaultKind::FuelExhaustionProtocol));
            return EmergencyOutcome::DegradedHold;
        }

        info!("Computing safe return trajectory");
        state.velocity = self.config.start_velocity;
        state.altitude = self.config.start_altitude;

        let profile = self.config.profile();
        let mut steps = 0;
        while state.altitude > 0.0 {
            let previous = state.altitude;
            if let Some(kind) = PhysicsModel::apply_tick(state, &profile) {
                warn!("Tank ran dry during forced descent");
                faults.record(FaultEvent::new(kind));
            }
            steps += 1;
            telemetry.send(state.snapshot());
            pacer.pace();

            if state.altitude >= previous {
                error!(
                    "Forced descent stalled at {:.1} km, holding in degraded orbit",
                    state.altitude
                );
                faults.record(FaultEvent::new(FaultKind::DescentStalled));
                return EmergencyOutcome::DegradedHold;
            }
        }

        state.phase = MissionPhase::Landed;
        info!("Emergency descent complete after {} steps", steps);
        EmergencyOutcome::Landed { steps }
    }
}
