//! Tower Stack (workspace facade crate).
//!
//! This package exposes `tower_stack::{core,engine,input,term,types}` while the
//! implementation lives in dedicated crates under `crates/`.

pub use tower_stack_core as core;
pub use tower_stack_engine as engine;
pub use tower_stack_input as input;
pub use tower_stack_term as term;
pub use tower_stack_types as types;
