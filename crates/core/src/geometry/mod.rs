//! Screen geometry and point-to-date resolution.

mod grid;
mod layout;
mod resolver;
mod types;

pub use grid::{ComputedGrid, GridMetrics};
pub use layout::GridLayout;
pub use resolver::GeometryResolver;
pub use types::{CellRef, Point, Rect};
