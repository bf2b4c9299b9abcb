//! Boot readiness gate.
//!
//! One-shot gate shown before the pad grid becomes interactive: it transitions
//! from not-ready to ready once a fixed warm-up interval has elapsed, and never
//! reverts. The core pipeline is only reachable after the transition.

use std::time::{Duration, Instant};

/// Warm-up interval before the grid becomes interactive.
pub const DEFAULT_WARMUP: Duration = Duration::from_millis(1500);

/// One-shot readiness gate.
#[derive(Debug)]
pub struct BootGate {
    ready_at: Instant,
    ready: bool,
}

impl BootGate {
    /// Arms the gate now with the given warm-up interval.
    pub fn new(warmup: Duration) -> Self {
        Self::armed_at(Instant::now(), warmup)
    }

    /// Arms the gate at an explicit instant (deterministic for tests).
    pub fn armed_at(start: Instant, warmup: Duration) -> Self {
        Self {
            ready_at: start + warmup,
            ready: false,
        }
    }

    /// Polls the gate; once it returns `true` it stays ready forever.
    pub fn poll(&mut self, now: Instant) -> bool {
        if !self.ready && now >= self.ready_at {
            self.ready = true;
            log::info!("boot gate open");
        }
        self.ready
    }

    /// Whether the gate has already opened.
    pub fn is_ready(&self) -> bool {
        self.ready
    }
}

impl Default for BootGate {
    fn default() -> Self {
        Self::new(DEFAULT_WARMUP)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_ready_during_warmup() {
        let start = Instant::now();
        let mut gate = BootGate::armed_at(start, Duration::from_millis(1500));

        assert!(!gate.poll(start));
        assert!(!gate.poll(start + Duration::from_millis(1499)));
        assert!(!gate.is_ready());
    }

    #[test]
    fn test_ready_after_warmup() {
        let start = Instant::now();
        let mut gate = BootGate::armed_at(start, Duration::from_millis(1500));

        assert!(gate.poll(start + Duration::from_millis(1500)));
        assert!(gate.is_ready());
    }

    #[test]
    fn test_gate_never_reverts() {
        let start = Instant::now();
        let mut gate = BootGate::armed_at(start, Duration::from_millis(100));

        assert!(gate.poll(start + Duration::from_millis(200)));
        // Polling with an earlier instant cannot close an open gate.
        assert!(gate.poll(start));
    }
}
