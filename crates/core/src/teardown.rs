//! Teardown module - timing of the reset sequence
//!
//! When a finished run is reset, the removed blocks shrink away one after the
//! other (top first) while the camera glides back down and the score counts
//! down to zero. The core only knows the schedule; a host clock drives it and
//! reports completion back with the teardown's id.

use serde::{Deserialize, Serialize};

use crate::types::{TEARDOWN_REMOVE_MS, TEARDOWN_STAGGER_MS};

/// Completion token for one reset sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Teardown {
    id: u64,
    removed: u32,
    from_score: u32,
    duration_ms: u32,
}

impl Teardown {
    pub fn new(id: u64, removed: u32, from_score: u32) -> Self {
        Self {
            id,
            removed,
            from_score,
            duration_ms: Self::duration_for(removed),
        }
    }

    /// Total duration for `removed` blocks: two removal spans plus one
    /// stagger step per block.
    pub fn duration_for(removed: u32) -> u32 {
        TEARDOWN_REMOVE_MS * 2 + removed.saturating_mul(TEARDOWN_STAGGER_MS)
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn removed(&self) -> u32 {
        self.removed
    }

    pub fn from_score(&self) -> u32 {
        self.from_score
    }

    pub fn duration_ms(&self) -> u32 {
        self.duration_ms
    }

    /// Normalized progress in `[0, 1]`.
    pub fn progress(&self, elapsed_ms: u32) -> f64 {
        if self.duration_ms == 0 {
            return 1.0;
        }
        (elapsed_ms as f64 / self.duration_ms as f64).clamp(0.0, 1.0)
    }

    /// Score shown while the teardown runs (ease-out from `from_score` to 0).
    pub fn countdown_at(&self, elapsed_ms: u32) -> u32 {
        let t = self.progress(elapsed_ms);
        let eased = 1.0 - (1.0 - t) * (1.0 - t);
        (self.from_score as f64 * (1.0 - eased)).round() as u32
    }

    /// Shrink window `(start_ms, end_ms)` of removed block `i` (0 = lowest).
    ///
    /// Higher blocks start earlier.
    pub fn removal_window(&self, i: u32) -> (u32, u32) {
        let start = self.removed.saturating_sub(i) * TEARDOWN_STAGGER_MS;
        (start, start + TEARDOWN_REMOVE_MS)
    }

    /// Remaining scale of removed block `i` in `[0, 1]` (ease-in).
    pub fn removal_scale(&self, i: u32, elapsed_ms: u32) -> f64 {
        let (start, end) = self.removal_window(i);
        if elapsed_ms <= start {
            return 1.0;
        }
        if elapsed_ms >= end {
            return 0.0;
        }
        let t = (elapsed_ms - start) as f64 / (end - start) as f64;
        1.0 - t * t
    }
}
