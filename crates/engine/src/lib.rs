//! Engine module - host-side clock, animations and configuration
//!
//! The core game counts ticks and emits events. This crate turns that into a
//! playable session with a fixed-step millisecond clock:
//!
//! - [`session`]: Drives a [`GameController`](crate::core::GameController),
//!   reacts to its events and produces a [`Scene`] per frame
//! - [`camera`]: Eased vertical glide that follows the tower
//! - [`debris`]: Chopped fragments falling away
//! - [`scheduler`]: One-shot deferred completion (teardown)
//! - [`event_log`]: Optional JSONL record of every game event
//! - [`config`]: Environment-driven settings
//!
//! # Example
//!
//! ```
//! use tower_stack_engine::{Session, types::{GameAction, GamePhase, TICK_MS}};
//!
//! let mut session = Session::with_seed(7, TICK_MS);
//! assert_eq!(session.phase(), GamePhase::Ready);
//!
//! session.apply(GameAction::Action);
//! for _ in 0..30 {
//!     session.step();
//! }
//! let scene = session.scene();
//! assert!(scene.game.current.is_some());
//! ```

pub mod camera;
pub mod config;
pub mod debris;
pub mod event_log;
pub mod scene;
pub mod scheduler;
pub mod session;

pub use tower_stack_core as core;
pub use tower_stack_types as types;

pub use camera::Camera;
pub use config::{Config, ConfigError};
pub use debris::{Debris, DebrisField};
pub use event_log::{EventLog, EventRecord};
pub use scene::Scene;
pub use scheduler::Scheduler;
pub use session::Session;
