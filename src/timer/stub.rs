use crate::timer::Timer;
use core::time::Duration;
use std::sync::Mutex;
use tokio::time::Instant;

/// A timer advancing by a fixed step on every reading.
pub struct StubTimer {
    instant: Mutex<Instant>,
    step: Duration,
}

impl StubTimer {
    pub fn new(step: Duration) -> Self {
        Self {
            instant: Instant::now().into(),
            step,
        }
    }
}

impl Timer for StubTimer {
    fn now(&self) -> Instant {
        let mut instant = self.instant.lock().unwrap();
        let now = *instant;
        *instant += self.step;
        now
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn advance() {
        let timer = StubTimer::new(Duration::from_millis(5));
        let start = timer.now();

        assert_eq!(timer.now().duration_since(start), Duration::from_millis(5));
        assert_eq!(timer.now().duration_since(start), Duration::from_millis(10));
    }
}
