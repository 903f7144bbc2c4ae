use chrono::NaiveDate;

use super::{CellRef, Point, Rect};

/// Lookups exposed by the calendar grid's rendering layer.
///
/// Implementations answer from whatever they actually rendered, which makes
/// `cell_at_point` exact even when a week wraps onto the next row.
pub trait GridLayout: Send + Sync {
    /// Returns the rendered cell containing `point`, if any.
    fn cell_at_point(&self, point: Point) -> Option<CellRef>;

    /// Returns the rendered cell for `date`, if it is visible.
    fn cell_for_date(&self, date: NaiveDate) -> Option<CellRef>;

    /// Outer bounds of the rendered grid. `None` when the layout cannot be
    /// measured, which leaves the computed fallback unavailable.
    fn grid_bounds(&self) -> Option<Rect> {
        None
    }

    /// Rendered cells in display order (row-major).
    fn rendered_cells(&self) -> Vec<CellRef> {
        Vec::new()
    }
}
