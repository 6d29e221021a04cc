// Initial Conditions
pub const INITIAL_FUEL: f64 = 100.0; // %
pub const INITIAL_LATITUDE: f64 = 37.1054; // Akyaka launch site
pub const INITIAL_LONGITUDE: f64 = 28.3271;
pub const MAX_FUEL: f64 = 100.0; // %

// Fuel Consumption Model
pub const VELOCITY_CONSUMPTION_FACTOR: f64 = 0.1;
pub const ALTITUDE_CONSUMPTION_FACTOR: f64 = 0.01;

// Launch Profile
pub const LAUNCH_BASE_CONSUMPTION: f64 = 2.0;
pub const LAUNCH_ALTITUDE_DELTA: f64 = 10.0; // km per tick
pub const LAUNCH_VELOCITY_DELTA: f64 = 1.0; // km/s per tick
pub const ORBIT_ALTITUDE: f64 = 100.0; // km

// Orbit Profile
pub const ORBIT_BASE_CONSUMPTION: f64 = 1.0;
pub const STABILIZATION_TICKS: u32 = 5;
pub const LONGITUDE_DRIFT_FACTOR: f64 = 0.01;
pub const LATITUDE_DRIFT_FACTOR: f64 = 0.005;
pub const FAULT_DWELL_SECONDS: f64 = 30.0 * 60.0;

// Return Profile
pub const RETURN_BASE_CONSUMPTION: f64 = 1.5;
pub const RETURN_ALTITUDE_DELTA: f64 = -10.0;
pub const RETURN_VELOCITY_DELTA: f64 = -0.5;

// Emergency Profile
pub const EMERGENCY_BASE_CONSUMPTION: f64 = 1.0;
pub const EMERGENCY_START_ALTITUDE: f64 = 100.0; // km
pub const EMERGENCY_START_VELOCITY: f64 = 1.0; // km/s
pub const EMERGENCY_ALTITUDE_DELTA: f64 = -10.0;
pub const EMERGENCY_VELOCITY_DELTA: f64 = -0.1;
pub const PASSIVE_DECAY_ALTITUDE: f64 = 50.0; // km lost when no fuel is left

// Safety Envelope
pub const CRITICAL_FUEL_LEVEL: f64 = 10.0; // %
pub const ALTITUDE_CEILING: f64 = 300.0; // km
pub const MIN_LATITUDE: f64 = -90.0;
pub const MAX_LATITUDE: f64 = 90.0;
pub const MAX_LONGITUDE: f64 = 180.0;
pub const REACQUISITION_ALTITUDE: f64 = 100.0; // km
pub const REACQUISITION_VELOCITY: f64 = 1.0; // km/s

// Simulation Parameters
pub const TIME_STEP: f64 = 1.0; // s
pub const PACING_MILLIS: u64 = 1_000;
pub const FAULT_LOG_FILE: &str = "error_log.txt";
pub const DEFAULT_FAULT_SEED: u64 = 42;
