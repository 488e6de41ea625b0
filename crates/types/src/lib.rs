//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are plain data with no behavior beyond small accessors, making them
//! usable in any context (core logic, host driver, terminal rendering, event log).
//!
//! # World Geometry
//!
//! The tower lives in a right-handed world where `y` points up. Blocks are
//! axis-aligned boxes anchored at their minimum corner.
//!
//! - **Base block**: 10 x 2 x 10 (width x height x depth) at the origin
//! - **Block height**: 2 units; block `i` sits at `y = 2 * i`
//! - **Sweep bound**: moving blocks travel within `±12` on their working axis
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed timestep interval (~60 FPS) |
//! | `TEARDOWN_REMOVE_MS` | 200 | Shrink time of one removed block |
//! | `TEARDOWN_STAGGER_MS` | 20 | Delay between consecutive removals |
//! | `CAMERA_MOVE_MS` | 300 | Camera glide after a spawn |
//! | `DEBRIS_LIFETIME_MS` | 1000 | Fall time of a chopped fragment |
//!
//! # Examples
//!
//! ```
//! use tower_stack_types::{Axis, Dimension, Vec3};
//!
//! // Odd tiers swing along x, even tiers along z.
//! assert_eq!(Axis::for_index(1), Axis::X);
//! assert_eq!(Axis::for_index(2), Axis::Z);
//!
//! // Axis-addressed access to positions and extents.
//! let mut p = Vec3::new(1.0, 2.0, 3.0);
//! p.set(Axis::Z, 7.0);
//! assert_eq!(p.get(Axis::Z), 7.0);
//!
//! let d = Dimension::new(10.0, 2.0, 4.0);
//! assert_eq!(d.along(Axis::X), 10.0);
//! assert_eq!(d.along(Axis::Z), 4.0);
//! ```

use serde::{Deserialize, Serialize};

/// Sweep bound of a moving block on its working axis (world units).
pub const MOVE_AMOUNT: f64 = 12.0;

/// Residual sliver below which a placement snaps to a perfect match.
pub const SNAP_THRESHOLD: f64 = 0.3;

/// Height of every block.
pub const BLOCK_HEIGHT: f64 = 2.0;

/// Width of the base block.
pub const BASE_WIDTH: f64 = 10.0;

/// Depth of the base block.
pub const BASE_DEPTH: f64 = 10.0;

/// Speed magnitude of a block at index 0.
pub const BASE_SPEED: f64 = 0.1;

/// Speed magnitude gained per tower tier.
pub const SPEED_STEP: f64 = 0.005;

/// Upper bound on the speed magnitude.
pub const MAX_SPEED: f64 = 4.0;

/// Largest color offset drawn for a new tower (inclusive).
pub const COLOR_OFFSET_MAX: u32 = 100;

/// Neutral color of the base block (`#333344`).
pub const BASE_COLOR: Rgb = Rgb::new(0x33, 0x33, 0x44);

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Shrink duration of a single block during the reset teardown.
pub const TEARDOWN_REMOVE_MS: u32 = 200;

/// Stagger between two consecutive block removals during the teardown.
pub const TEARDOWN_STAGGER_MS: u32 = 20;

/// Camera glide duration after each spawn.
pub const CAMERA_MOVE_MS: u32 = 300;

/// Lifetime of a chopped fragment before it is discarded.
pub const DEBRIS_LIFETIME_MS: u32 = 1000;

/// Distance a chopped fragment drops over its lifetime.
pub const DEBRIS_DROP: f64 = 30.0;

/// Outward slide of a chopped fragment per unit of swing speed.
pub const DEBRIS_SLIDE_FACTOR: f64 = 40.0;

/// Blocks in play (base and the swinging block included) at which the
/// instructions hint disappears. Once hidden it stays hidden.
pub const INSTRUCTIONS_HIDE_AT: usize = 5;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn teardown_and_camera_timing_defaults() {
        assert_eq!(TICK_MS, 16);
        assert_eq!(TEARDOWN_REMOVE_MS, 200);
        assert_eq!(TEARDOWN_STAGGER_MS, 20);
        assert_eq!(CAMERA_MOVE_MS, 300);
        assert_eq!(DEBRIS_LIFETIME_MS, 1000);
    }

    #[test]
    fn base_block_is_square() {
        assert_eq!(BASE_WIDTH, BASE_DEPTH);
        assert!(BLOCK_HEIGHT > 0.0);
    }
}

/// Horizontal axis a block swings along.
///
/// - **X**: odd tower tiers; the tested extent is `width`
/// - **Z**: even tower tiers; the tested extent is `depth`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Z,
}

impl Axis {
    /// Working axis of the block at tower `index`.
    pub fn for_index(index: u32) -> Self {
        if index % 2 == 1 {
            Axis::X
        } else {
            Axis::Z
        }
    }
}

/// World-space point (a block's minimum corner).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Coordinate along a horizontal axis.
    pub fn get(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Z => self.z,
        }
    }

    pub fn set(&mut self, axis: Axis, value: f64) {
        match axis {
            Axis::X => self.x = value,
            Axis::Z => self.z = value,
        }
    }
}

/// Box extents.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Dimension {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
}

impl Dimension {
    pub const fn new(width: f64, height: f64, depth: f64) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }

    /// Extent along a horizontal axis (`width` for X, `depth` for Z).
    pub fn along(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.width,
            Axis::Z => self.depth,
        }
    }

    pub fn set_along(&mut self, axis: Axis, value: f64) {
        match axis {
            Axis::X => self.width = value,
            Axis::Z => self.depth = value,
        }
    }
}

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Lifecycle of a single block.
///
/// A block leaves `Active` exactly once, through placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockState {
    /// Swinging, waiting for the player.
    Active,
    /// Committed and supported by the block below.
    Stopped,
    /// Committed with no overlap; ends the run.
    Missed,
}

/// Game progression phase.
///
/// The cycle goes: Loading → Ready → Playing → Ended → Resetting → Playing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GamePhase {
    Loading,
    Ready,
    Playing,
    Ended,
    Resetting,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Loading => "loading",
            GamePhase::Ready => "ready",
            GamePhase::Playing => "playing",
            GamePhase::Ended => "ended",
            GamePhase::Resetting => "resetting",
        }
    }
}

/// Discrete player intents delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// The single gameplay input (press/click/tap), routed by phase.
    Action,
    /// Toggle pause in the host loop.
    Pause,
}
