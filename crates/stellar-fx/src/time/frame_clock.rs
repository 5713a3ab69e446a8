use std::time::Instant;

/// Timing handed to an effect on each tick.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Seconds since the clock's epoch. Monotonic and never clamped: the
    /// nebula reads it as absolute shader time.
    pub elapsed: f64,
}

/// Per-controller clock. The epoch is reset when the controller activates,
/// so every effect starts from `elapsed = 0`.
#[derive(Debug, Clone)]
pub struct FrameClock {
    epoch: Instant,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
        }
    }

    /// Moves the epoch to now.
    pub fn restart(&mut self) {
        self.epoch = Instant::now();
    }

    pub fn tick(&self) -> FrameTime {
        FrameTime {
            elapsed: self.epoch.elapsed().as_secs_f64(),
        }
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn elapsed_is_monotonic() {
        let clock = FrameClock::new();
        let a = clock.tick().elapsed;
        std::thread::sleep(Duration::from_millis(2));
        let b = clock.tick().elapsed;
        assert!(a >= 0.0);
        assert!(b > a);
    }

    #[test]
    fn restart_rebases_elapsed() {
        let mut clock = FrameClock::new();
        std::thread::sleep(Duration::from_millis(20));
        let before = clock.tick().elapsed;
        clock.restart();
        let after = clock.tick().elapsed;
        assert!(before >= 0.020);
        assert!(after < before);
    }
}
