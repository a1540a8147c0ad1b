/// The two independent navigation dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Section,
    Slide,
}

/// Per-axis lock serializing position changes while a visual transition is
/// assumed to be in flight. Release is purely time-based against the
/// injected clock; there is no animation-end observation and no queueing —
/// a rejected acquire drops the intent.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TransitionGate {
    deadline: [u64; 2],
}

impl TransitionGate {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(axis: Axis) -> usize {
        match axis {
            Axis::Section => 0,
            Axis::Slide => 1,
        }
    }

    pub fn engaged(&self, axis: Axis, now_ms: u64) -> bool {
        now_ms < self.deadline[Self::slot(axis)]
    }

    /// Engages the lock for `duration_ms` when the axis is free. Returns
    /// whether the caller may commit its move.
    pub fn try_acquire(&mut self, axis: Axis, now_ms: u64, duration_ms: u64) -> bool {
        if self.engaged(axis, now_ms) {
            return false;
        }
        self.deadline[Self::slot(axis)] = now_ms + duration_ms;
        true
    }

    /// Idempotent; only used for refresh/destroy symmetry, never in the
    /// normal navigation flow.
    pub fn release(&mut self, axis: Axis) {
        self.deadline[Self::slot(axis)] = 0;
    }

    pub fn release_all(&mut self) {
        self.deadline = [0; 2];
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn acquire_engages_until_deadline() {
        let mut gate = TransitionGate::new();

        assert!(gate.try_acquire(Axis::Section, 0, 700));
        assert!(gate.engaged(Axis::Section, 0));
        assert!(gate.engaged(Axis::Section, 699));
        assert!(!gate.engaged(Axis::Section, 700));
    }

    #[test]
    fn second_acquire_is_rejected_while_engaged() {
        let mut gate = TransitionGate::new();

        assert!(gate.try_acquire(Axis::Section, 0, 700));
        assert!(!gate.try_acquire(Axis::Section, 350, 700));
        assert!(gate.try_acquire(Axis::Section, 700, 700));
    }

    #[test]
    fn axes_lock_independently() {
        let mut gate = TransitionGate::new();

        assert!(gate.try_acquire(Axis::Section, 0, 700));
        assert!(gate.try_acquire(Axis::Slide, 0, 400));
        assert!(!gate.try_acquire(Axis::Section, 100, 700));
        assert!(!gate.try_acquire(Axis::Slide, 100, 400));
        // Slide axis frees first
        assert!(gate.try_acquire(Axis::Slide, 400, 400));
        assert!(!gate.try_acquire(Axis::Section, 400, 700));
    }

    #[test]
    fn release_is_idempotent() {
        let mut gate = TransitionGate::new();

        gate.try_acquire(Axis::Slide, 0, 400);
        gate.release(Axis::Slide);
        gate.release(Axis::Slide);
        assert!(!gate.engaged(Axis::Slide, 0));
    }
}
