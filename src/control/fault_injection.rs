use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::SimulationSettings;
use crate::control::spacecraft::SpacecraftState;
use crate::telemetry_system::fault_log::FaultKind;

/// Seeded random systems faults for exercising the stall and escalation
/// paths.
pub struct FaultInjector {
    rng: StdRng,
    probability: f64,
}

impl FaultInjector {
    pub fn new(probability: f64, seed: u64) -> Self {
        FaultInjector {
            rng: StdRng::seed_from_u64(seed),
            probability: probability.clamp(0.0, 1.0),
        }
    }

    /// `None` when injection is disabled.
    pub fn from_settings(settings: &SimulationSettings) -> Option<Self> {
        if settings.fault_probability > 0.0 {
            Some(Self::new(settings.fault_probability, settings.fault_seed))
        } else {
            None
        }
    }

    pub fn maybe_inject(&mut self, state: &mut SpacecraftState) -> Option<FaultKind> {
        if state.systems_nominal && self.rng.gen_bool(self.probability) {
            state.systems_nominal = false;
            Some(FaultKind::InjectedSystemsFault)
        } else {
            None
        }
    }
}
