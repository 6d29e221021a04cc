pub mod config;
pub mod constants;
pub mod control;
pub mod errors;
pub mod telemetry_system;
pub mod trajectory_system;
pub mod utils;

pub use config::MissionConfig;
pub use constants::*;
pub use control::command::{CommandSource, LineCommands, ScriptedCommands};
pub use control::emergency::{EmergencyController, EmergencyOutcome};
pub use control::mission::{
    HoldReason, LaunchOutcome, MissionReport, MissionStateMachine, OrbitDecision, OrbitStatus,
    ReturnOutcome,
};
pub use control::safety::{FaultReason, SafetyMonitor};
pub use control::spacecraft::{MissionPhase, SpacecraftState};

// Re-export commonly used items from trajectory_system
pub use trajectory_system::kinematics::{PhaseProfile, PhysicsModel};
pub use trajectory_system::navigation::RouteValidator;

// Re-export commonly used items from telemetry_system
pub use telemetry_system::fault_log::{
    FaultEvent, FaultKind, FaultSink, FileFaultLog, MemoryFaultLog,
};
pub use telemetry_system::telemetry::{Telemetry, TelemetrySink, TelemetrySnapshot};

// Re-export commonly used utilities
pub use utils::clock::MissionClock;
pub use utils::pacing::{NoPacing, Pacer};
