//! Placement module - commits a swinging block onto the tower
//!
//! Placement compares the moving block with the block directly below it along
//! the moving block's working axis:
//!
//! - **Perfect**: the uncovered sliver is thinner than [`SNAP_THRESHOLD`]; the
//!   block snaps onto the target's footprint and nothing is cut off. This is
//!   checked first, so a very narrow block just past the edge still lands
//! - **Miss**: no overlap at all; the block is lost and the run ends
//! - **Chop**: the overhang is cut away; the supported slice stays on the
//!   tower and the overhang becomes a falling fragment
//!
//! The supported slice never extends past the target, so the tower footprint
//! can only shrink.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::block::{Block, BoxGeometry};
use crate::types::{Axis, BlockState, SNAP_THRESHOLD};

/// Placement requested for a block that is not swinging.
///
/// This indicates a sequencing bug in the caller, not a player mistake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlaceError {
    #[error("block {index} is not active (state: {state:?})")]
    NotActive { index: u32, state: BlockState },
}

impl PlaceError {
    pub fn code(self) -> &'static str {
        match self {
            PlaceError::NotActive { .. } => "not_active",
        }
    }
}

/// What happened to the committed block.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlaceOutcome {
    /// No overlap; no geometry is produced.
    Missed,
    /// The block now rests on the tower as `placed`.
    Stopped {
        placed: BoxGeometry,
        /// Cut-off overhang; absent on a perfect placement.
        chopped: Option<BoxGeometry>,
        bonus: bool,
    },
}

/// Result of [`place`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub axis: Axis,
    /// Swing direction at the moment of placement.
    pub direction: f64,
    /// Supported extent along `axis` (the raw value for a miss).
    pub overlap: f64,
    pub outcome: PlaceOutcome,
}

impl Placement {
    pub fn is_missed(&self) -> bool {
        matches!(self.outcome, PlaceOutcome::Missed)
    }

    pub fn bonus(&self) -> bool {
        matches!(self.outcome, PlaceOutcome::Stopped { bonus: true, .. })
    }

    pub fn placed(&self) -> Option<BoxGeometry> {
        match self.outcome {
            PlaceOutcome::Stopped { placed, .. } => Some(placed),
            PlaceOutcome::Missed => None,
        }
    }

    pub fn chopped(&self) -> Option<BoxGeometry> {
        match self.outcome {
            PlaceOutcome::Stopped { chopped, .. } => chopped,
            PlaceOutcome::Missed => None,
        }
    }
}

/// Supported extent of `moving` on `target` along the moving block's axis.
///
/// Zero or negative means the two blocks do not overlap.
pub fn overlap(moving: &Block, target: &Block) -> f64 {
    let axis = moving.axis();
    let offset = moving.position().get(axis) - target.position().get(axis);
    target.dimension().along(axis) - offset.abs()
}

/// Commit `moving` on top of `target`.
///
/// On success `moving` leaves the `Active` state for good: it becomes
/// `Stopped` with its footprint reduced to the placed slice, or `Missed`.
///
/// # Panics
///
/// In debug builds, when `moving` is not active.
pub fn place(moving: &mut Block, target: &Block) -> Result<Placement, PlaceError> {
    debug_assert!(
        moving.is_active(),
        "place() on block {} which is not active ({:?})",
        moving.index(),
        moving.state()
    );
    if !moving.is_active() {
        return Err(PlaceError::NotActive {
            index: moving.index(),
            state: moving.state(),
        });
    }

    let axis = moving.axis();
    let direction = moving.direction();
    let mut overlap = overlap(moving, target);

    // A thin enough sliver snaps even when the raw overlap is not positive.
    let bonus = moving.dimension().along(axis) - overlap < SNAP_THRESHOLD;
    if bonus {
        moving.snap_footprint_to(target);
        overlap = moving.dimension().along(axis);
    }

    if overlap <= 0.0 {
        moving.set_state(BlockState::Missed);
        return Ok(Placement {
            axis,
            direction,
            overlap,
            outcome: PlaceOutcome::Missed,
        });
    }

    let whole = moving.geometry();
    let mut placed = whole;
    let mut chopped = whole;
    placed.dimension.set_along(axis, overlap);
    chopped
        .dimension
        .set_along(axis, whole.dimension.along(axis) - overlap);

    let start = whole.position.get(axis);
    let target_start = target.position().get(axis);
    if start < target_start {
        // Overhang on the low side: the kept slice starts at the target's edge.
        placed.position.set(axis, target_start);
    } else {
        chopped.position.set(axis, start + overlap);
    }

    moving.settle(&placed);
    moving.set_state(BlockState::Stopped);

    Ok(Placement {
        axis,
        direction,
        overlap,
        outcome: PlaceOutcome::Stopped {
            placed,
            chopped: if bonus { None } else { Some(chopped) },
            bonus,
        },
    })
}
