pub mod fault_log;
pub mod telemetry;
