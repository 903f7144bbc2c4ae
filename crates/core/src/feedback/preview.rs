use serde::Serialize;

use crate::calendar::{DateRange, EventId, LeaveEvent};
use crate::drag::{Direction, DragMode};
use crate::geometry::{GridLayout, Point, Rect};

/// Label that follows the pointer while dragging.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FloatingLabel {
    pub text: String,
    /// Secondary line, shown for moves.
    pub caption: Option<String>,
    pub position: Point,
    pub background: Option<String>,
}

/// Everything a surface needs to draw one preview frame.
///
/// While a preview is shown the event's normal strip is hidden; `frame`
/// increases monotonically within a session so older frames can be dropped.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Preview {
    pub event_id: EventId,
    pub frame: u64,
    pub range: DateRange,
    pub label: FloatingLabel,
    /// One rectangle per calendar row covered by `range`.
    pub highlight: Vec<Rect>,
    pub duration_caption: String,
    pub cursor: &'static str,
}

/// Session state the preview is derived from.
#[derive(Debug, Clone, Copy)]
pub struct PreviewInput<'a> {
    pub event: &'a LeaveEvent,
    pub mode: DragMode,
    pub direction: Option<Direction>,
    pub range: DateRange,
    pub pointer: Point,
    pub frame: u64,
    /// Horizontal distance between the pointer and the floating label.
    pub label_offset: f64,
}

/// Builds the preview for `input`, positioning the highlight from `layout`.
pub fn build_preview(input: &PreviewInput<'_>, layout: &dyn GridLayout) -> Preview {
    let days = input.range.days();
    let is_move = input.mode == DragMode::Move;

    Preview {
        event_id: input.event.id.clone(),
        frame: input.frame,
        range: input.range,
        label: FloatingLabel {
            text: label_text(&input.event.title, input.mode, days),
            caption: is_move.then(|| "Moving...".to_string()),
            position: input.pointer.offset(input.label_offset, 0.0),
            background: input.event.background_color.clone(),
        },
        highlight: highlight_rows(&input.range, layout),
        duration_caption: duration_caption(days),
        cursor: match input.direction {
            Some(direction) => direction.cursor(),
            None => "move",
        },
    }
}

/// Floating label text: the title, plus the length for moves.
pub fn label_text(title: &str, mode: DragMode, days: u64) -> String {
    match mode {
        DragMode::Move => format!("{title} ({days}d)"),
        DragMode::ResizeStart | DragMode::ResizeEnd => title.to_string(),
    }
}

pub fn duration_caption(days: u64) -> String {
    if days == 1 {
        "1 day".to_string()
    } else {
        format!("{days} days")
    }
}

/// Unions the visible cells of `range` row by row.
///
/// Dates without a visible cell are skipped, so a range running off the grid
/// only highlights its visible part.
pub fn highlight_rows(range: &DateRange, layout: &dyn GridLayout) -> Vec<Rect> {
    let mut rows: Vec<(usize, Rect)> = Vec::new();

    for cell in range.dates().filter_map(|date| layout.cell_for_date(date)) {
        match rows.last_mut() {
            Some((row, rect)) if *row == cell.row => *rect = rect.union(&cell.bounds),
            _ => rows.push((cell.row, cell.bounds)),
        }
    }

    rows.into_iter().map(|(_, rect)| rect).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{ComputedGrid, GridMetrics};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // Weeks starting Monday 2025-03-03, 100x100 cells at the origin.
    fn grid() -> ComputedGrid {
        let metrics = GridMetrics::new(Point::new(0.0, 0.0), 100.0, 100.0, 7);
        ComputedGrid::month_view(date(2025, 3, 3), 4, metrics)
    }

    fn event() -> LeaveEvent {
        let range = DateRange::new(date(2025, 3, 10), date(2025, 3, 12)).unwrap();
        LeaveEvent::new("1", "Annual leave", range).with_background_color("#DBEAFE")
    }

    #[test]
    fn test_highlight_single_row() {
        let range = DateRange::new(date(2025, 3, 4), date(2025, 3, 6)).unwrap();

        assert_eq!(
            highlight_rows(&range, &grid()),
            vec![Rect::new(100.0, 0.0, 300.0, 100.0)]
        );
    }

    #[test]
    fn test_highlight_splits_rows() {
        // Saturday of week 1 to Tuesday of week 2.
        let range = DateRange::new(date(2025, 3, 8), date(2025, 3, 11)).unwrap();

        assert_eq!(
            highlight_rows(&range, &grid()),
            vec![
                Rect::new(500.0, 0.0, 200.0, 100.0),
                Rect::new(0.0, 100.0, 200.0, 100.0),
            ]
        );
    }

    #[test]
    fn test_highlight_skips_invisible_dates() {
        let range = DateRange::new(date(2025, 2, 27), date(2025, 3, 4)).unwrap();

        assert_eq!(
            highlight_rows(&range, &grid()),
            vec![Rect::new(0.0, 0.0, 200.0, 100.0)]
        );
    }

    #[test]
    fn test_move_preview() {
        let event = event();
        let input = PreviewInput {
            event: &event,
            mode: DragMode::Move,
            direction: None,
            range: DateRange::new(date(2025, 3, 17), date(2025, 3, 19)).unwrap(),
            pointer: Point::new(150.0, 250.0),
            frame: 4,
            label_offset: 10.0,
        };
        let preview = build_preview(&input, &grid());

        assert_eq!(preview.label.text, "Annual leave (3d)");
        assert_eq!(preview.label.caption.as_deref(), Some("Moving..."));
        assert_eq!(preview.label.position, Point::new(160.0, 250.0));
        assert_eq!(preview.label.background.as_deref(), Some("#DBEAFE"));
        assert_eq!(preview.duration_caption, "3 days");
        assert_eq!(preview.cursor, "move");
        assert_eq!(preview.frame, 4);
        assert_eq!(preview.highlight, vec![Rect::new(0.0, 200.0, 300.0, 100.0)]);
    }

    #[test]
    fn test_resize_preview() {
        let event = event();
        let input = PreviewInput {
            event: &event,
            mode: DragMode::ResizeEnd,
            direction: Some(Direction::Down),
            range: DateRange::new(date(2025, 3, 10), date(2025, 3, 10)).unwrap(),
            pointer: Point::new(0.0, 0.0),
            frame: 0,
            label_offset: 10.0,
        };
        let preview = build_preview(&input, &grid());

        assert_eq!(preview.label.text, "Annual leave");
        assert_eq!(preview.label.caption, None);
        assert_eq!(preview.duration_caption, "1 day");
        assert_eq!(preview.cursor, "ns-resize");
    }
}
