//! Fixed-interval descent timer
//!
//! The caller supplies the current instant; the timer never reads the clock
//! itself, so it can be driven by a real or a simulated clock.

use std::time::{Duration, Instant};

/// Default gap between two gravity steps
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone)]
pub struct DescentTimer {
    interval: Duration,
    /// When the next tick is due; None while stopped
    due: Option<Instant>,
}

impl Default for DescentTimer {
    fn default() -> Self {
        Self::new(DEFAULT_INTERVAL)
    }
}

impl DescentTimer {
    pub fn new(interval: Duration) -> Self {
        Self { interval, due: None }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_running(&self) -> bool {
        self.due.is_some()
    }

    /// (Re)start counting a full interval from `now`
    pub fn start(&mut self, now: Instant) {
        self.due = Some(now + self.interval);
    }

    pub fn stop(&mut self) {
        self.due = None;
    }

    /// Returns true at most once per call when a tick is due. Missed ticks
    /// are not replayed: the next one is scheduled a full interval after `now`.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.due {
            Some(due) if now >= due => {
                self.due = Some(now + self.interval);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stopped_never_fires() {
        let mut timer = DescentTimer::default();
        let now = Instant::now();
        assert!(!timer.poll(now + Duration::from_secs(10)));
        assert!(!timer.is_running());
    }

    #[test]
    fn test_fires_after_interval() {
        let mut timer = DescentTimer::new(Duration::from_millis(100));
        let t0 = Instant::now();
        timer.start(t0);
        assert!(!timer.poll(t0 + Duration::from_millis(99)));
        assert!(timer.poll(t0 + Duration::from_millis(100)));
        assert!(!timer.poll(t0 + Duration::from_millis(150)));
        assert!(timer.poll(t0 + Duration::from_millis(200)));
    }

    #[test]
    fn test_no_catch_up() {
        let mut timer = DescentTimer::new(Duration::from_millis(100));
        let t0 = Instant::now();
        timer.start(t0);
        let late = t0 + Duration::from_millis(1000);
        assert!(timer.poll(late));
        assert!(!timer.poll(late));
    }

    #[test]
    fn test_stop_then_start() {
        let mut timer = DescentTimer::new(Duration::from_millis(100));
        let t0 = Instant::now();
        timer.start(t0);
        timer.stop();
        assert!(!timer.poll(t0 + Duration::from_millis(500)));
        timer.start(t0 + Duration::from_millis(500));
        assert!(timer.poll(t0 + Duration::from_millis(600)));
    }
}
