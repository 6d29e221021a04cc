use std::fmt::Write;

use tracing::info;

use crate::control::spacecraft::MissionPhase;

/// Structured per-tick snapshot handed to the telemetry sink.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TelemetrySnapshot {
    pub phase: MissionPhase,
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
    pub velocity: f64,
    pub fuel_level: f64,
}

pub trait TelemetrySink {
    fn send(&mut self, snapshot: TelemetrySnapshot);
}

/// Records every snapshot and tracks mission extremes and phase changes.
pub struct Telemetry {
    pub log: Vec<TelemetrySnapshot>,
    echo: bool,
    max_velocity: f64,
    max_altitude: f64,
    min_fuel: f64,
    phase_transitions: Vec<(MissionPhase, usize)>,
}

impl Telemetry {
    pub fn new() -> Self {
        Telemetry {
            log: Vec::new(),
            echo: false,
            max_velocity: 0.0,
            max_altitude: 0.0,
            min_fuel: f64::MAX,
            phase_transitions: Vec::new(),
        }
    }

    /// Recorder that also writes each snapshot to the log stream.
    pub fn with_echo() -> Self {
        Telemetry {
            echo: true,
            ..Telemetry::new()
        }
    }

    fn phase_name(phase: MissionPhase) -> &'static str {
        match phase {
            MissionPhase::Idle => "Standby",
            MissionPhase::Launch => "Liftoff",
            MissionPhase::Orbit => "In orbit",
            MissionPhase::Return => "Returning",
            MissionPhase::Landed => "Landed",
        }
    }

    fn format_coordinates(latitude: f64, longitude: f64) -> String {
        format!("lat {:.4}, lon {:.4}", latitude, longitude)
    }

    pub fn format_snapshot(snapshot: &TelemetrySnapshot) -> String {
        format!(
            "{} | {} | alt {:.1} km | vel {:.1} km/s | fuel {:.1}%",
            Self::phase_name(snapshot.phase),
            Self::format_coordinates(snapshot.latitude, snapshot.longitude),
            snapshot.altitude,
            snapshot.velocity,
            snapshot.fuel_level
        )
    }

    pub fn collect_data(&mut self, snapshot: TelemetrySnapshot) {
        if snapshot.velocity > self.max_velocity {
            self.max_velocity = snapshot.velocity;
        }
        if snapshot.altitude > self.max_altitude {
            self.max_altitude = snapshot.altitude;
        }
        if snapshot.fuel_level < self.min_fuel {
            self.min_fuel = snapshot.fuel_level;
        }

        let index = self.log.len();
        match self.phase_transitions.last() {
            Some((last_phase, _)) if *last_phase == snapshot.phase => {}
            _ => self.phase_transitions.push((snapshot.phase, index)),
        }

        if self.echo {
            info!(target: "telemetry", "{}", Self::format_snapshot(&snapshot));
        }
        self.log.push(snapshot);
    }

    pub fn max_altitude(&self) -> f64 {
        self.max_altitude
    }

    pub fn max_velocity(&self) -> f64 {
        self.max_velocity
    }

    pub fn min_fuel(&self) -> Option<f64> {
        if self.log.is_empty() {
            None
        } else {
            Some(self.min_fuel)
        }
    }

    pub fn phase_transitions(&self) -> &[(MissionPhase, usize)] {
        &self.phase_transitions
    }

    pub fn summary(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "--- Mission Summary ---");
        let _ = writeln!(out, "Telemetry frames: {}", self.log.len());
        let _ = writeln!(out, "Max Altitude: {:.1} km", self.max_altitude);
        let _ = writeln!(out, "Max Velocity: {:.1} km/s", self.max_velocity);
        if let Some(min_fuel) = self.min_fuel() {
            let _ = writeln!(out, "Min Fuel: {:.1}%", min_fuel);
        }
        let _ = writeln!(out, "--- Phase Transitions ---");
        for (phase, frame) in &self.phase_transitions {
            let _ = writeln!(out, "{} from frame {}", Self::phase_name(*phase), frame);
        }
        out
    }
}

impl Default for Telemetry {
    fn default() -> Self {
        Self::new()
    }
}

impl TelemetrySink for Telemetry {
    fn send(&mut self, snapshot: TelemetrySnapshot) {
        self.collect_data(snapshot);
    }
}
