//! Terminal input module (engine-facing).
//!
//! This module is intentionally independent of any UI framework. It maps
//! `crossterm` key and mouse events into [`crate::types::GameAction`]. The game
//! has a single action, so there is no repeat handling: hosts simply ignore
//! key-repeat and release events.

pub mod map;

pub use tower_stack_types as types;

pub use map::{handle_key_event, handle_mouse_event, should_quit};
