//! Drag modes and the range mutation rules applied on every pointer move.

mod rules;
mod types;

pub use rules::{apply, resolve};
pub use types::{Axis, Direction, DragMode};
