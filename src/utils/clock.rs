/// Simulated mission-elapsed time in seconds.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MissionClock {
    elapsed: f64,
}

impl MissionClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> f64 {
        self.elapsed
    }

    pub fn advance(&mut self, seconds: f64) {
        if seconds > 0.0 {
            self.elapsed += seconds;
        }
    }

    pub fn since(&self, earlier: f64) -> f64 {
        self.elapsed - earlier
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_advances_monotonically() {
        let mut clock = MissionClock::new();
        clock.advance(1.0);
        clock.advance(1799.0);
        clock.advance(-50.0);
        assert_eq!(clock.now(), 1800.0);
        assert_eq!(clock.since(1.0), 1799.0);
    }
}
