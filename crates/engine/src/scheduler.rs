//! Deferred completion signals driven by the session clock.
//!
//! The controller never waits for an animation. It hands out a completion id
//! and a duration; the scheduler reports the id back exactly once when the
//! clock passes the deadline.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Pending {
    id: u64,
    due_ms: u64,
}

#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    pending: Option<Pending>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arrange for `id` to complete `delay_ms` after `now_ms`.
    ///
    /// Replaces any completion still pending.
    pub fn schedule(&mut self, id: u64, now_ms: u64, delay_ms: u32) {
        self.pending = Some(Pending {
            id,
            due_ms: now_ms.saturating_add(delay_ms as u64),
        });
    }

    /// Return the pending id once its deadline has passed.
    pub fn poll(&mut self, now_ms: u64) -> Option<u64> {
        match self.pending {
            Some(p) if now_ms >= p.due_ms => {
                self.pending = None;
                Some(p.id)
            }
            _ => None,
        }
    }
}
