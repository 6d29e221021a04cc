use tracing::{error, info, warn};

use crate::config::MissionConfig;
use crate::control::command::{CommandSource, OperatorCommand};
use crate::control::emergency::{EmergencyController, EmergencyOutcome};
use crate::control::fault_injection::FaultInjector;
use crate::control::safety::SafetyMonitor;
use crate::control::spacecraft::{MissionPhase, SpacecraftState};
use crate::telemetry_system::fault_log::{FaultEvent, FaultKind, FaultSink};
use crate::telemetry_system::telemetry::TelemetrySink;
use crate::trajectory_system::kinematics::{PhaseProfile, PhysicsModel};
use crate::trajectory_system::navigation::RouteValidator;
use crate::utils::clock::MissionClock;
use crate::utils::pacing::{pacer_from_millis, Pacer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchOutcome {
    OrbitReached,
    /// Tank ran dry before orbit; the craft is back in `Idle`.
    Aborted,
    Emergency(EmergencyOutcome),
    NotReady,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrbitStatus {
    Stabilized,
    /// A systems fault halted stabilization; `fault_time` is set.
    Stalled,
    Emergency(EmergencyOutcome),
    NotInOrbit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnOutcome {
    Landed { ticks: u32 },
    Emergency(EmergencyOutcome),
    NotInOrbit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoldReason {
    NoResponse,
    InvalidCommand,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrbitDecision {
    /// The stalled fault outlived the dwell period.
    Escalated(EmergencyOutcome),
    Returned(ReturnOutcome),
    Remained(HoldReason),
    NotInOrbit,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MissionReport {
    pub success: bool,
    pub final_state: SpacecraftState,
    pub ticks: u64,
    pub elapsed_seconds: f64,
    pub emergency: Option<EmergencyOutcome>,
}

/// Owns the craft and drives it through launch, orbit and return, one tick
/// at a time.
pub struct MissionStateMachine<T: TelemetrySink, F: FaultSink> {
    state: SpacecraftState,
    config: MissionConfig,
    safety: SafetyMonitor,
    emergency: EmergencyController,
    clock: MissionClock,
    pacer: Box<dyn Pacer>,
    injector: Option<FaultInjector>,
    telemetry: T,
    faults: F,
    ticks: u64,
    last_emergency: Option<EmergencyOutcome>,
}

impl<T: TelemetrySink, F: FaultSink> MissionStateMachine<T, F> {
    pub fn new(config: MissionConfig, telemetry: T, faults: F) -> Self {
        MissionStateMachine {
            state: SpacecraftState::new(&config.initial),
            safety: SafetyMonitor::new(config.safety),
            emergency: EmergencyController::new(config.emergency),
            clock: MissionClock::new(),
            pacer: pacer_from_millis(config.simulation.pacing_millis),
            injector: FaultInjector::from_settings(&config.simulation),
            config,
            telemetry,
            faults,
            ticks: 0,
            last_emergency: None,
        }
    }

    pub fn with_pacer(mut self, pacer: Box<dyn Pacer>) -> Self {
        self.pacer = pacer;
        self
    }

    pub fn with_state(mut self, state: SpacecraftState) -> Self {
        self.state = state;
        self
    }

    pub fn with_fault_injector(mut self, injector: FaultInjector) -> Self {
        self.injector = Some(injector);
        self
    }

    pub fn state(&self) -> &SpacecraftState {
        &self.state
    }

    pub fn telemetry(&self) -> &T {
        &self.telemetry
    }

    pub fn faults(&self) -> &F {
        &self.faults
    }

    pub fn clock(&self) -> &MissionClock {
        &self.clock
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Marks a systems fault, as a failed sensor or actuator would.
    pub fn inject_systems_fault(&mut self) {
        self.state.systems_nominal = false;
    }

    pub fn activate_backup_system(&mut self) -> bool {
        info!("Activating backup system");
        self.state.activate_backup_system()
    }

    /// Lets simulated time pass without ticking the craft.
    pub fn hold(&mut self, seconds: f64) {
        self.clock.advance(seconds);
    }

    fn record(&mut self, kind: FaultKind) {
        self.faults.record(FaultEvent::new(kind));
    }

    fn declare_emergency(&mut self) -> EmergencyOutcome {
        error!("Emergency declared in {} phase", self.state.phase);
        let outcome = self.emergency.execute(
            &mut self.state,
            &mut self.telemetry,
            &mut self.faults,
            self.pacer.as_ref(),
        );
        if let EmergencyOutcome::Landed { steps } = outcome {
            self.ticks += u64::from(steps);
            self.clock
                .advance(f64::from(steps) * self.config.simulation.tick_seconds);
        }
        self.last_emergency = Some(outcome);
        outcome
    }

    // consume fuel -> move -> (drift) -> validate -> telemetry -> safety
    fn active_tick(&mut self, profile: &PhaseProfile, drift: bool) -> Option<EmergencyOutcome> {
        self.ticks += 1;
        self.clock.advance(self.config.simulation.tick_seconds);

        if let Some(kind) = PhysicsModel::apply_tick(&mut self.state, profile) {
            self.record(kind);
        }
        if drift {
            PhysicsModel::drift_coordinates(
                &mut self.state,
                self.config.orbit.longitude_drift,
                self.config.orbit.latitude_drift,
            );
        }
        if let Some(kind) = RouteValidator::validate(&mut self.state) {
            warn!("Route deviation detected, re-acquiring baseline orbit");
            self.record(kind);
        }
        self.telemetry.send(self.state.snapshot());

        let verdict = if self.state.phase.is_active() {
            self.safety.check(&self.state)
        } else {
            None
        };
        self.pacer.pace();

        verdict.map(|reason| {
            self.record(reason.into());
            self.declare_emergency()
        })
    }

    pub fn start_mission(&mut self) -> bool {
        if self.state.phase != MissionPhase::Idle {
            warn!("Mission cannot start from {} phase", self.state.phase);
            return false;
        }
        info!("Launch sequence starting");
        self.state.phase = MissionPhase::Launch;
        true
    }

    pub fn run_launch(&mut self) -> LaunchOutcome {
        if self.state.phase != MissionPhase::Launch {
            warn!("Launch requested in {} phase", self.state.phase);
            return LaunchOutcome::NotReady;
        }

        let profile = self.config.launch.profile();
        let target = self.config.launch.target_altitude;
        while self.state.altitude < target && self.state.has_fuel() {
            if let Some(outcome) = self.active_tick(&profile, false) {
                if outcome == EmergencyOutcome::DegradedHold {
                    error!("Launch aborted, orbit not reached");
                    self.state.phase = MissionPhase::Idle;
                }
                return LaunchOutcome::Emergency(outcome);
            }
        }

        if self.state.has_fuel() {
            info!("Orbit reached at {:.1} km", self.state.altitude);
            self.state.phase = MissionPhase::Orbit;
            LaunchOutcome::OrbitReached
        } else {
            error!("Fuel exhausted, orbit not reached");
            self.state.phase = MissionPhase::Idle;
            LaunchOutcome::Aborted
        }
    }

    pub fn stabilize_orbit(&mut self) -> OrbitStatus {
        if self.state.phase != MissionPhase::Orbit {
            return OrbitStatus::NotInOrbit;
        }

        info!("Stabilizing orbit");
        let profile = self.config.orbit.profile();
        for tick in 1..=self.config.orbit.stabilization_ticks {
            let injected = match self.injector.as_mut() {
                Some(injector) => injector.maybe_inject(&mut self.state),
                None => None,
            };
            if let Some(kind) = injected {
                self.record(kind);
            }

            if !self.state.systems_nominal {
                self.state.fault_time = Some(self.clock.now());
                error!("Systems fault on stabilization tick {}, stabilization failed", tick);
                self.record(FaultKind::SystemsNotNominal);
                return OrbitStatus::Stalled;
            }

            if let Some(outcome) = self.active_tick(&profile, true) {
                return OrbitStatus::Emergency(outcome);
            }
        }

        info!("Orbit stabilized, awaiting return command");
        OrbitStatus::Stabilized
    }

    /// Blocks on the command source for the two-step return confirmation,
    /// unless a stalled fault has already outlived the dwell period.
    pub fn await_orbit_decision(&mut self, commands: &mut dyn CommandSource) -> OrbitDecision {
        if self.state.phase != MissionPhase::Orbit {
            return OrbitDecision::NotInOrbit;
        }

        if !self.state.systems_nominal && self.config.orbit.auto_backup {
            self.activate_backup_system();
        }
        if !self.state.systems_nominal {
            if let Some(fault_time) = self.state.fault_time {
                let dwell = self.clock.since(fault_time);
                if dwell >= self.config.orbit.fault_dwell_seconds {
                    warn!("Systems fault persisted for {:.0} s, escalating", dwell);
                    return OrbitDecision::Escalated(self.declare_emergency());
                }
            }
        }

        info!("Send 'r' to begin the return to Earth");
        match commands.next_token() {
            None => {
                warn!("No command received, remaining in orbit");
                return OrbitDecision::Remained(HoldReason::NoResponse);
            }
            Some(token) if OperatorCommand::parse_request(&token) == OperatorCommand::ReturnRequest => {}
            Some(token) => {
                warn!("Invalid command {:?}, remaining in orbit", token);
                return OrbitDecision::Remained(HoldReason::InvalidCommand);
            }
        }

        info!("Confirm the return to Earth? (y/n)");
        match commands.next_token() {
            Some(token) if OperatorCommand::parse_confirmation(&token) == OperatorCommand::Confirm => {
                OrbitDecision::Returned(self.return_to_earth())
            }
            _ => {
                info!("Return cancelled, remaining in orbit");
                OrbitDecision::Remained(HoldReason::Cancelled)
            }
        }
    }

    pub fn return_to_earth(&mut self) -> ReturnOutcome {
        if !matches!(self.state.phase, MissionPhase::Orbit | MissionPhase::Return) {
            warn!("Return requested in {} phase", self.state.phase);
            return ReturnOutcome::NotInOrbit;
        }

        info!("Return to Earth starting");
        self.state.phase = MissionPhase::Return;
        let profile = self.config.return_trip.profile();
        let mut ticks = 0;
        while self.state.altitude > 0.0 {
            ticks += 1;
            if let Some(outcome) = self.active_tick(&profile, false) {
                return ReturnOutcome::Emergency(outcome);
            }
        }

        self.state.phase = MissionPhase::Landed;
        info!(
            "Landed safely at lat {:.4}, lon {:.4}",
            self.state.latitude, self.state.longitude
        );
        ReturnOutcome::Landed { ticks }
    }

    /// Full lifecycle: launch, stabilize, then wait for the operator.
    pub fn run(&mut self, commands: &mut dyn CommandSource) -> MissionReport {
        if self.start_mission() && self.run_launch() == LaunchOutcome::OrbitReached {
            match self.stabilize_orbit() {
                OrbitStatus::Stabilized | OrbitStatus::Stalled => {
                    self.hold(self.config.simulation.operator_delay_seconds);
                    self.await_orbit_decision(commands);
                }
                OrbitStatus::Emergency(_) | OrbitStatus::NotInOrbit => {}
            }
        }
        self.report()
    }

    pub fn report(&self) -> MissionReport {
        let success = self.state.phase.is_terminal();
        if success {
            info!("Mission complete");
        } else {
            error!("Mission failed in {} phase", self.state.phase);
        }
        MissionReport {
            success,
            final_state: self.state.clone(),
            ticks: self.ticks,
            elapsed_seconds: self.clock.now(),
            emergency: self.last_emergency,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::command::ScriptedCommands;
    use crate::telemetry_system::fault_log::MemoryFaultLog;
    use crate::telemetry_system::telemetry::Telemetry;
    use crate::utils::pacing::NoPacing;
    use approx::assert_abs_diff_eq;

    type TestMachine = MissionStateMachine<Telemetry, MemoryFaultLog>;

    fn machine() -> TestMachine {
        MissionStateMachine::new(MissionConfig::default(), Telemetry::new(), MemoryFaultLog::new())
            .with_pacer(Box::new(NoPacing))
    }

    fn in_orbit(fuel: f64) -> SpacecraftState {
        let mut state = SpacecraftState::default();
        state.phase = MissionPhase::Orbit;
        state.altitude = 100.0;
        state.velocity = 10.0;
        state.fuel_level = fuel;
        state
    }

    #[test]
    fn test_start_only_from_idle() {
        let mut m = machine();
        assert!(m.start_mission());
        assert_eq!(m.state().phase, MissionPhase::Launch);
        assert!(!m.start_mission());
    }

    #[test]
    fn test_launch_requires_start() {
        let mut m = machine();
        assert_eq!(m.run_launch(), LaunchOutcome::NotReady);
        assert_eq!(m.ticks(), 0);
    }

    #[test]
    fn test_launch_reaches_orbit() {
        let mut m = machine();
        m.start_mission();

        assert_eq!(m.run_launch(), LaunchOutcome::OrbitReached);
        assert_eq!(m.state().phase, MissionPhase::Orbit);
        assert_eq!(m.state().altitude, 100.0);
        assert_eq!(m.state().velocity, 10.0);
        assert_eq!(m.ticks(), 10);
        // sum of 2.0 + 0.2 * k for k in 0..10
        assert_abs_diff_eq!(m.state().fuel_level, 71.0, epsilon = 1e-9);
        assert!(m.faults().events().is_empty());
    }

    #[test]
    fn test_launch_with_low_fuel_lands_via_emergency() {
        let mut initial = SpacecraftState::default();
        initial.fuel_level = 30.0;
        let mut m = machine().with_state(initial);
        m.start_mission();

        let outcome = m.run_launch();

        assert!(matches!(
            outcome,
            LaunchOutcome::Emergency(EmergencyOutcome::Landed { .. })
        ));
        assert_eq!(m.state().phase, MissionPhase::Landed);
        assert_eq!(m.faults().kinds()[0], FaultKind::FuelCritical);
    }

    #[test]
    fn test_orbit_stabilization_burns_and_drifts() {
        let mut m = machine().with_state(in_orbit(71.0));

        assert_eq!(m.stabilize_orbit(), OrbitStatus::Stabilized);
        assert_eq!(m.ticks(), 5);
        // 1.0 + 10 * 0.1 + 100 * 0.01 per tick
        assert_abs_diff_eq!(m.state().fuel_level, 56.0, epsilon = 1e-9);
        assert_abs_diff_eq!(m.state().longitude, 28.3271 + 0.5, epsilon = 1e-9);
        assert_abs_diff_eq!(m.state().latitude, 37.1054 + 0.25, epsilon = 1e-9);
        assert_eq!(m.state().phase, MissionPhase::Orbit);
    }

    #[test]
    fn test_orbit_stall_records_fault_time() {
        let mut m = machine().with_state(in_orbit(71.0));
        m.hold(42.0);
        m.inject_systems_fault();

        assert_eq!(m.stabilize_orbit(), OrbitStatus::Stalled);
        assert_eq!(m.state().fault_time, Some(42.0));
        assert_eq!(m.state().phase, MissionPhase::Orbit);
        assert_eq!(m.ticks(), 0);
        assert_eq!(m.faults().kinds(), vec![FaultKind::SystemsNotNominal]);
    }

    #[test]
    fn test_injector_can_stall_orbit() {
        let mut m = machine()
            .with_state(in_orbit(71.0))
            .with_fault_injector(FaultInjector::new(1.0, 1));

        assert_eq!(m.stabilize_orbit(), OrbitStatus::Stalled);
        assert_eq!(
            m.faults().kinds(),
            vec![FaultKind::InjectedSystemsFault, FaultKind::SystemsNotNominal]
        );
    }

    #[test]
    fn test_decision_confirmed_return() {
        let mut m = machine().with_state(in_orbit(56.0));
        let mut commands = ScriptedCommands::new(["r", "y"]);

        let decision = m.await_orbit_decision(&mut commands);

        assert_eq!(
            decision,
            OrbitDecision::Returned(ReturnOutcome::Landed { ticks: 10 })
        );
        assert_eq!(m.state().phase, MissionPhase::Landed);
    }

    #[test]
    fn test_decision_invalid_command_keeps_orbit() {
        let mut m = machine().with_state(in_orbit(56.0));
        let before = m.state().clone();
        let mut commands = ScriptedCommands::new(["x", "y"]);

        assert_eq!(
            m.await_orbit_decision(&mut commands),
            OrbitDecision::Remained(HoldReason::InvalidCommand)
        );
        assert_eq!(m.state(), &before);
        assert_eq!(commands.remaining(), 1);
    }

    #[test]
    fn test_decision_declined_confirmation() {
        let mut m = machine().with_state(in_orbit(56.0));
        let mut commands = ScriptedCommands::new(["R", "n"]);

        assert_eq!(
            m.await_orbit_decision(&mut commands),
            OrbitDecision::Remained(HoldReason::Cancelled)
        );
        assert_eq!(m.state().phase, MissionPhase::Orbit);
    }

    #[test]
    fn test_decision_without_input() {
        let mut m = machine().with_state(in_orbit(56.0));
        let mut commands = ScriptedCommands::default();

        assert_eq!(
            m.await_orbit_decision(&mut commands),
            OrbitDecision::Remained(HoldReason::NoResponse)
        );
    }

    #[test]
    fn test_dwell_escalates_before_reading_commands() {
        let mut m = machine().with_state(in_orbit(56.0));
        m.inject_systems_fault();
        assert_eq!(m.stabilize_orbit(), OrbitStatus::Stalled);
        m.hold(1800.0);
        let mut commands = ScriptedCommands::new(["r", "y"]);

        let decision = m.await_orbit_decision(&mut commands);

        assert!(matches!(
            decision,
            OrbitDecision::Escalated(EmergencyOutcome::Landed { .. })
        ));
        assert_eq!(m.state().phase, MissionPhase::Landed);
        assert_eq!(commands.remaining(), 2);
    }

    #[test]
    fn test_short_dwell_still_accepts_command() {
        let mut m = machine().with_state(in_orbit(56.0));
        m.inject_systems_fault();
        m.stabilize_orbit();
        m.hold(1799.0);
        let mut commands = ScriptedCommands::new(["r", "y"]);

        let decision = m.await_orbit_decision(&mut commands);

        // the first return tick sees the fault and forces the emergency descent
        assert!(matches!(
            decision,
            OrbitDecision::Returned(ReturnOutcome::Emergency(EmergencyOutcome::Landed { .. }))
        ));
        assert_eq!(commands.remaining(), 0);
    }

    #[test]
    fn test_auto_backup_clears_stall() {
        let mut config = MissionConfig::default();
        config.orbit.auto_backup = true;
        let mut m = MissionStateMachine::new(config, Telemetry::new(), MemoryFaultLog::new())
            .with_pacer(Box::new(NoPacing))
            .with_state(in_orbit(56.0));
        m.inject_systems_fault();
        m.stabilize_orbit();
        m.hold(5000.0);
        let mut commands = ScriptedCommands::new(["r", "y"]);

        let decision = m.await_orbit_decision(&mut commands);

        assert_eq!(
            decision,
            OrbitDecision::Returned(ReturnOutcome::Landed { ticks: 10 })
        );
        assert!(m.state().systems_nominal);
        assert_eq!(m.state().fault_time, None);
    }

    #[test]
    fn test_return_requires_orbit() {
        let mut m = machine();
        assert_eq!(m.return_to_earth(), ReturnOutcome::NotInOrbit);
        assert_eq!(m.state().phase, MissionPhase::Idle);
    }

    #[test]
    fn test_emergency_ticks_are_counted() {
        let mut m = machine().with_state(in_orbit(11.0));

        let status = m.stabilize_orbit();

        assert_eq!(
            status,
            OrbitStatus::Emergency(EmergencyOutcome::Landed { steps: 10 })
        );
        assert_eq!(m.ticks(), 11);
        assert_eq!(m.clock().now(), 11.0);
        assert_eq!(m.report().emergency, Some(EmergencyOutcome::Landed { steps: 10 }));
    }

    #[test]
    fn test_safety_only_consulted_in_active_phases() {
        let mut idle = SpacecraftState::default();
        idle.fuel_level = 5.0;
        let mut m = machine().with_state(idle.clone());
        let profile = m.config.orbit.profile();

        assert_eq!(m.active_tick(&profile, false), None);
        assert!(m.faults().events().is_empty());

        idle.phase = MissionPhase::Orbit;
        idle.altitude = 100.0;
        let mut m = machine().with_state(idle);
        assert!(m.active_tick(&profile, false).is_some());
        assert_eq!(m.faults().kinds()[0], FaultKind::FuelCritical);
    }
}
