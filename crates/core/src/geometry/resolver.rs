use std::sync::Arc;

use chrono::NaiveDate;

use super::{CellRef, ComputedGrid, GridLayout, Point, Rect};

/// Resolves screen points to calendar cells.
///
/// Direct hit-testing through the injected [`GridLayout`] is tried first. When
/// it finds nothing, the optional [`ComputedGrid`] fallback computes an index
/// from the grid metrics instead. A `None` result means "no change this frame".
#[derive(Clone)]
pub struct GeometryResolver {
    layout: Arc<dyn GridLayout>,
    fallback: Option<ComputedGrid>,
}

impl GeometryResolver {
    pub fn new(layout: Arc<dyn GridLayout>) -> Self {
        Self {
            layout,
            fallback: None,
        }
    }

    /// Installs a computed fallback for points the layout cannot hit-test.
    pub fn with_fallback(mut self, grid: ComputedGrid) -> Self {
        self.fallback = Some(grid);
        self
    }

    /// Replaces the fallback, e.g. after the grid was re-measured.
    pub fn set_fallback(&mut self, grid: Option<ComputedGrid>) {
        self.fallback = grid;
    }

    pub fn fallback(&self) -> Option<&ComputedGrid> {
        self.fallback.as_ref()
    }

    /// Measures a computed fallback from what the layout currently renders.
    ///
    /// Returns `None` when the layout reports no grid bounds.
    pub fn measure(
        &self,
        columns_per_row: usize,
        fallback_cell_height: f64,
    ) -> Option<ComputedGrid> {
        let bounds = self.layout.grid_bounds()?;
        Some(ComputedGrid::from_cells(
            bounds,
            self.layout.rendered_cells(),
            columns_per_row,
            fallback_cell_height,
        ))
    }

    /// Returns the cell under `point`, or `None` outside the grid.
    pub fn resolve(&self, point: Point) -> Option<CellRef> {
        self.layout
            .cell_at_point(point)
            .or_else(|| self.fallback.as_ref()?.cell_at(point))
    }

    /// Returns the cell showing `date`, if any.
    pub fn cell_for_date(&self, date: NaiveDate) -> Option<CellRef> {
        self.layout
            .cell_for_date(date)
            .or_else(|| self.fallback.as_ref()?.cell_for_date(date))
    }
}

impl GridLayout for GeometryResolver {
    fn cell_at_point(&self, point: Point) -> Option<CellRef> {
        self.resolve(point)
    }

    fn cell_for_date(&self, date: NaiveDate) -> Option<CellRef> {
        GeometryResolver::cell_for_date(self, date)
    }

    fn grid_bounds(&self) -> Option<Rect> {
        self.layout.grid_bounds()
    }

    fn rendered_cells(&self) -> Vec<CellRef> {
        self.layout.rendered_cells()
    }
}
