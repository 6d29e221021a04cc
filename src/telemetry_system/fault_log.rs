//! Append-only fault event sinks.

use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::{error, warn};

use crate::errors::SimulationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultKind {
    FuelExhausted,
    FuelCritical,
    AltitudeCeiling,
    SystemsNotNominal,
    NavigationDeviation,
    FuelExhaustionProtocol,
    InjectedSystemsFault,
    DescentStalled,
}

impl fmt::Display for FaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            FaultKind::FuelExhausted => "Fuel ran out at a critical level.",
            FaultKind::FuelCritical => "Fuel dropped to a critical level!",
            FaultKind::AltitudeCeiling => "Altitude is above safe limits!",
            FaultKind::SystemsNotNominal => "Systems are not nominal!",
            FaultKind::NavigationDeviation => "Route deviation detected, redirecting to Earth.",
            FaultKind::FuelExhaustionProtocol => {
                "Fuel exhausted, orbit preservation protocol started."
            }
            FaultKind::InjectedSystemsFault => "Systems fault injected.",
            FaultKind::DescentStalled => "Emergency descent stalled, holding in degraded orbit.",
        };
        f.write_str(message)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FaultEvent {
    pub timestamp: DateTime<Utc>,
    pub kind: FaultKind,
}

impl FaultEvent {
    pub fn new(kind: FaultKind) -> Self {
        FaultEvent {
            timestamp: Utc::now(),
            kind,
        }
    }

    pub fn message(&self) -> String {
        self.kind.to_string()
    }

    /// `[unix_seconds] message`
    pub fn to_log_line(&self) -> String {
        format!("[{}] {}", self.timestamp.timestamp(), self.kind)
    }
}

/// Consumer of fault events. The core never reads events back.
pub trait FaultSink {
    fn record(&mut self, event: FaultEvent);
}

/// Keeps events in memory; used by tests and by callers that want to inspect
/// what went wrong after a run.
#[derive(Debug, Default)]
pub struct MemoryFaultLog {
    events: Vec<FaultEvent>,
}

impl MemoryFaultLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[FaultEvent] {
        &self.events
    }

    pub fn kinds(&self) -> Vec<FaultKind> {
        self.events.iter().map(|event| event.kind).collect()
    }

    pub fn contains(&self, kind: FaultKind) -> bool {
        self.events.iter().any(|event| event.kind == kind)
    }
}

impl FaultSink for MemoryFaultLog {
    fn record(&mut self, event: FaultEvent) {
        self.events.push(event);
    }
}

/// Appends one line per event to a file and mirrors it to the error log.
#[derive(Debug)]
pub struct FileFaultLog {
    path: PathBuf,
    file: File,
    written: usize,
}

impl FileFaultLog {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, SimulationError> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(FileFaultLog {
            path,
            file,
            written: 0,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn written(&self) -> usize {
        self.written
    }
}

impl FaultSink for FileFaultLog {
    fn record(&mut self, event: FaultEvent) {
        error!("{}", event.kind);
        match writeln!(self.file, "{}", event.to_log_line()) {
            Ok(()) => self.written += 1,
            Err(e) => warn!("Could not append to {}: {}", self.path.display(), e),
        }
    }
}
