use std::time::{Duration, Instant};

/// A delayed transition bound to the generation it was created for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scheduled {
    pub generation: u64,
    pub due: Instant,
}

impl Scheduled {
    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.due
    }

    pub fn remaining(&self, now: Instant) -> Duration {
        self.due.saturating_duration_since(now)
    }
}

/// Holds at most one pending transition. Every state change that makes a
/// pending transition meaningless must call `bump`, which cancels it and
/// invalidates any copy handed out earlier.
#[derive(Debug, Default)]
pub struct Timer {
    generation: u64,
    pending: Option<Scheduled>,
}

impl Timer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn bump(&mut self) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.pending = None;
        self.generation
    }

    pub fn schedule(&mut self, now: Instant, delay: Duration) -> Scheduled {
        let scheduled = Scheduled {
            generation: self.generation,
            due: now + delay,
        };
        self.pending = Some(scheduled);
        scheduled
    }

    pub fn pending(&self) -> Option<Scheduled> {
        self.pending
    }

    pub fn is_current(&self, scheduled: &Scheduled) -> bool {
        self.pending.as_ref() == Some(scheduled) && scheduled.generation == self.generation
    }

    /// Consumes `scheduled` if it is still the live transition and has come due.
    pub fn take(&mut self, scheduled: Scheduled, now: Instant) -> bool {
        if self.is_current(&scheduled) && scheduled.is_due(now) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    pub fn take_due(&mut self, now: Instant) -> bool {
        match self.pending {
            Some(scheduled) => self.take(scheduled, now),
            None => false,
        }
    }
}
