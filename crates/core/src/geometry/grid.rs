//! Computed grid index, used when direct hit-testing finds nothing.

use chrono::{Days, NaiveDate};

use super::{CellRef, GridLayout, Point, Rect};

/// Dimensions the computed fallback needs to turn a point into a cell index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridMetrics {
    /// Top-left corner of the grid.
    pub origin: Point,
    pub cell_width: f64,
    pub cell_height: f64,
    pub columns_per_row: usize,
}

impl GridMetrics {
    pub fn new(origin: Point, cell_width: f64, cell_height: f64, columns_per_row: usize) -> Self {
        Self {
            origin,
            cell_width,
            cell_height,
            columns_per_row,
        }
    }

    /// Measures the grid from its rendered cells.
    ///
    /// Cell size comes from the first cell. With no rendered cell the width is
    /// split evenly across `columns_per_row` and `fallback_cell_height` is used.
    pub fn measure(
        grid_bounds: Rect,
        cells: &[CellRef],
        columns_per_row: usize,
        fallback_cell_height: f64,
    ) -> Self {
        let origin = Point::new(grid_bounds.left, grid_bounds.top);
        match cells.first() {
            Some(cell) => Self::new(
                origin,
                cell.bounds.width,
                cell.bounds.height,
                columns_per_row,
            ),
            None => Self::new(
                origin,
                grid_bounds.width / columns_per_row.max(1) as f64,
                fallback_cell_height,
                columns_per_row,
            ),
        }
    }
}

/// A calendar grid laid out as equal cells in display order.
#[derive(Debug, Clone, PartialEq)]
pub struct ComputedGrid {
    metrics: GridMetrics,
    cells: Vec<CellRef>,
}

impl ComputedGrid {
    /// Creates a grid over `cells`, which must be in display order (row-major).
    pub fn new(metrics: GridMetrics, cells: Vec<CellRef>) -> Self {
        Self { metrics, cells }
    }

    /// Measures `cells` and builds a grid over them.
    pub fn from_cells(
        grid_bounds: Rect,
        cells: Vec<CellRef>,
        columns_per_row: usize,
        fallback_cell_height: f64,
    ) -> Self {
        let metrics =
            GridMetrics::measure(grid_bounds, &cells, columns_per_row, fallback_cell_height);
        Self { metrics, cells }
    }

    /// Lays out `rows` full rows of consecutive days starting at `first_visible`.
    pub fn month_view(first_visible: NaiveDate, rows: usize, metrics: GridMetrics) -> Self {
        let columns = metrics.columns_per_row;
        let cells = (0..rows)
            .flat_map(|row| (0..columns).map(move |column| (row, column)))
            .filter_map(|(row, column)| {
                let offset = (row * columns + column) as u64;
                let date = first_visible.checked_add_days(Days::new(offset))?;
                let bounds = Rect::new(
                    metrics.origin.x + column as f64 * metrics.cell_width,
                    metrics.origin.y + row as f64 * metrics.cell_height,
                    metrics.cell_width,
                    metrics.cell_height,
                );
                Some(CellRef::new(date, row, column, bounds))
            })
            .collect();
        Self { metrics, cells }
    }

    pub fn metrics(&self) -> &GridMetrics {
        &self.metrics
    }

    pub fn cells(&self) -> &[CellRef] {
        &self.cells
    }

    /// Computes the display index under `point`.
    ///
    /// `col` is not clamped to the row width, so a point just past the right
    /// edge of a row lands on the first cell of the next row (and vice versa on
    /// the left edge). Only the final index is bounds-checked.
    pub fn index_at(&self, point: Point) -> Option<usize> {
        let GridMetrics {
            origin,
            cell_width,
            cell_height,
            columns_per_row,
        } = self.metrics;
        if cell_width <= 0.0 || cell_height <= 0.0 || columns_per_row == 0 {
            return None;
        }

        let col = ((point.x - origin.x) / cell_width).floor();
        let row = ((point.y - origin.y) / cell_height).floor();
        if !col.is_finite() || !row.is_finite() {
            return None;
        }

        let index = row as i64 * columns_per_row as i64 + col as i64;
        usize::try_from(index)
            .ok()
            .filter(|index| *index < self.cells.len())
    }

    /// Returns the cell at the computed index under `point`.
    pub fn cell_at(&self, point: Point) -> Option<CellRef> {
        self.index_at(point).map(|index| self.cells[index])
    }

    /// Exact hit test against the cell bounds.
    pub fn hit_test(&self, point: Point) -> Option<CellRef> {
        self.cells
            .iter()
            .find(|cell| cell.bounds.contains(point))
            .copied()
    }
}

impl GridLayout for ComputedGrid {
    fn cell_at_point(&self, point: Point) -> Option<CellRef> {
        self.hit_test(point)
    }

    fn cell_for_date(&self, date: NaiveDate) -> Option<CellRef> {
        self.cells.iter().find(|cell| cell.date == date).copied()
    }

    fn grid_bounds(&self) -> Option<Rect> {
        let (first, rest) = self.cells.split_first()?;
        Some(rest.iter().fold(first.bounds, |bounds, cell| bounds.union(&cell.bounds)))
    }

    fn rendered_cells(&self) -> Vec<CellRef> {
        self.cells.clone()
    }
}
