//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains the stacking rules, the block-in-flight simulation and
//! the game progression state machine. It has **zero dependencies** on
//! rendering, terminals or wall-clock time, making it:
//!
//! - **Deterministic**: Same seed produces identical runs
//! - **Testable**: Every rule is covered by unit tests
//! - **Portable**: Any host can drive it (terminal, GUI, headless)
//!
//! # Module Structure
//!
//! - [`block`]: A single tier; swing simulation and tier colors
//! - [`place`]: Overlap, perfect-placement snapping and chopping
//! - [`tower`]: Committed blocks plus the block in flight
//! - [`game`]: Phase state machine and event stream
//! - [`teardown`]: Timing of the reset sequence
//! - [`rng`]: Seeded LCG for color offsets and spawn sides
//! - [`snapshot`]: Plain-data view of the game for renderers and logs
//!
//! # Game Rules
//!
//! - **Swing**: The newest block sweeps back and forth within `±12` along x on
//!   odd tiers and z on even tiers, a little faster every tier
//! - **Chop**: Committing a block cuts away whatever does not rest on the
//!   block below; the tower only ever gets narrower
//! - **Perfect**: An overhang thinner than `0.3` is forgiven; the block snaps
//!   onto the one below and the footprint is kept
//! - **Miss**: No overlap ends the run
//! - **Score**: One point per committed block
//!
//! # Example
//!
//! ```
//! use tower_stack_core::GameController;
//! use tower_stack_types::GamePhase;
//!
//! let mut game = GameController::new(12345);
//! game.load();
//! assert_eq!(game.phase(), GamePhase::Ready);
//!
//! // First action starts a run and spawns a swinging block.
//! game.on_action();
//! assert_eq!(game.phase(), GamePhase::Playing);
//!
//! // The host ticks every frame...
//! for _ in 0..60 {
//!     game.on_tick();
//! }
//!
//! // ...and forwards the player's action to commit the block.
//! game.on_action();
//! for event in game.drain_events() {
//!     println!("{event:?}");
//! }
//! ```
//!
//! # Timing
//!
//! The core counts ticks, not milliseconds. The only timed sequence, the reset
//! teardown, is described by a [`Teardown`] whose completion the host reports
//! through [`GameController::on_teardown_complete`].

pub mod block;
pub mod game;
pub mod place;
pub mod rng;
pub mod snapshot;
pub mod teardown;
pub mod tower;

pub use tower_stack_types as types;

// Re-export commonly used types for convenience
pub use block::{speed_for_index, tier_color, Block, BoxGeometry};
pub use game::{GameController, GameEvent};
pub use place::{overlap, place, PlaceError, PlaceOutcome, Placement};
pub use rng::SimpleRng;
pub use snapshot::{CurrentSnapshot, GameSnapshot};
pub use teardown::Teardown;
pub use tower::Tower;
