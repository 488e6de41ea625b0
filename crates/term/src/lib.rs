//! Terminal "game renderer" module.
//!
//! This is a small, game-oriented rendering layer for terminal gameplay.
//! It intentionally avoids widget/layout libraries and instead renders into a
//! simple framebuffer that can be flushed to a terminal backend.
//!
//! Goals:
//! - Keep `core` and `engine` deterministic and testable
//! - Flatten the 3D tower into two orthographic side views
//! - Only redraw the cells that changed between frames

pub mod fb;
pub mod game_view;
pub mod render_throttle;
pub mod renderer;

pub use tower_stack_core as core;
pub use tower_stack_engine as engine;
pub use tower_stack_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, Viewport};
pub use render_throttle::{scene_fingerprint, RenderThrottle};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
