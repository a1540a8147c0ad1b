use std::cell::Cell;
use std::time::Instant;

/// Millisecond time source for the transition gate and the wheel gesture
/// window. Injected so tests and scripted drivers can run on a virtual
/// clock instead of wall-clock waits.
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// Monotonic time since construction.
#[derive(Debug)]
pub struct WallClock {
    started: Instant,
}

impl WallClock {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
        }
    }
}

impl Default for WallClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for WallClock {
    fn now_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<u64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get() + ms);
    }

    pub fn set(&self, ms: u64) {
        self.now.set(ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn manual_clock_advances_on_demand() {
        let clock = ManualClock::new();
        assert_eq!(clock.now_ms(), 0);

        clock.advance(250);
        assert_eq!(clock.now_ms(), 250);

        clock.set(1000);
        assert_eq!(clock.now_ms(), 1000);
    }

    #[test]
    fn wall_clock_is_monotonic() {
        let clock = WallClock::new();
        let first = clock.now_ms();
        let second = clock.now_ms();
        assert!(second >= first);
    }
}
