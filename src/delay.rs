/// Delay gate: lets a pattern say "pause here" without knowing wall-clock time.
///
/// `arm` records a deadline, `is_pending` stays true until the clock passes it.
/// A gate holds a single deadline; arming again replaces it.

use crate::clock::SharedClock;

pub struct DelayGate {
    clock: SharedClock,
    deadline_ms: Option<u64>,
}

impl DelayGate {
    pub fn new(clock: SharedClock) -> Self {
        Self { clock, deadline_ms: None }
    }

    /// Start a pause of `duration_ms` from now.
    pub fn arm(&mut self, duration_ms: u64) {
        let now = self.clock.now_ms();
        self.deadline_ms = Some(now.saturating_add(duration_ms));
        log::trace!("Delay armed: {duration_ms} ms (deadline {})", now.saturating_add(duration_ms));
    }

    /// True until the clock has moved past the deadline. The deadline
    /// millisecond itself still counts as pending.
    pub fn is_pending(&self) -> bool {
        match self.deadline_ms {
            Some(deadline) => self.clock.now_ms() <= deadline,
            None => false,
        }
    }

    /// Milliseconds until the gate opens, 0 if it already is.
    pub fn remaining_ms(&self) -> u64 {
        match self.deadline_ms {
            Some(deadline) => deadline.saturating_add(1).saturating_sub(self.clock.now_ms()),
            None => 0,
        }
    }
}

impl std::fmt::Debug for DelayGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DelayGate")
            .field("deadline_ms", &self.deadline_ms)
            .field("now_ms", &self.clock.now_ms())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    #[test]
    fn unarmed_gate_is_open() {
        let clock = ManualClock::new();
        let gate = DelayGate::new(clock.shared());
        assert!(!gate.is_pending());
        assert_eq!(gate.remaining_ms(), 0);
    }

    #[test]
    fn pending_until_deadline_passes() {
        let clock = ManualClock::new();
        clock.set(1_000);
        let mut gate = DelayGate::new(clock.shared());
        gate.arm(100);
        assert!(gate.is_pending());
        assert_eq!(gate.remaining_ms(), 101);

        clock.advance(100);
        assert!(gate.is_pending(), "deadline millisecond still pending");
        assert_eq!(gate.remaining_ms(), 1);

        clock.advance(1);
        assert!(!gate.is_pending());
        assert_eq!(gate.remaining_ms(), 0);
    }

    #[test]
    fn rearm_replaces_deadline() {
        let clock = ManualClock::new();
        let mut gate = DelayGate::new(clock.shared());
        gate.arm(1_000);
        clock.advance(10);
        gate.arm(5);
        clock.advance(6);
        assert!(!gate.is_pending());
    }
}
