use std::thread;
use std::time::Duration;

/// Real-time pacing between ticks. Only affects observability, never the
/// simulated outcome.
pub trait Pacer {
    fn pace(&self);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoPacing;

impl Pacer for NoPacing {
    fn pace(&self) {}
}

#[derive(Debug, Clone, Copy)]
pub struct FixedDelay {
    delay: Duration,
}

impl FixedDelay {
    pub fn new(delay: Duration) -> Self {
        FixedDelay { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Pacer for FixedDelay {
    fn pace(&self) {
        thread::sleep(self.delay);
    }
}

pub fn pacer_from_millis(millis: u64) -> Box<dyn Pacer> {
    if millis == 0 {
        Box::new(NoPacing)
    } else {
        Box::new(FixedDelay::new(Duration::from_millis(millis)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn test_fixed_delay_sleeps() {
        let pacer = FixedDelay::new(Duration::from_millis(5));
        let start = Instant::now();
        pacer.pace();
        assert!(start.elapsed() >= pacer.delay());
    }

    #[test]
    fn test_zero_millis_disables_pacing() {
        let pacer = pacer_from_millis(0);
        let start = Instant::now();
        for _ in 0..100 {
            pacer.pace();
        }
        assert!(start.elapsed() < Duration::from_millis(50));
    }
}
