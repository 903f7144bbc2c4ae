use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// What a drag session does to the event's range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragMode {
    /// Moves the start date; the end stays put.
    ResizeStart,
    /// Moves the end date; the start stays put.
    ResizeEnd,
    /// Translates the whole range, keeping its length.
    Move,
}

impl DragMode {
    pub fn is_resize(&self) -> bool {
        matches!(self, DragMode::ResizeStart | DragMode::ResizeEnd)
    }
}

/// Pointer axis a resize handle follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// The resize handle grabbed by the user.
///
/// Left and Up handles sit on the start of the range, Right and Down on its end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// The resize mode this handle drives.
    pub fn mode(&self) -> DragMode {
        match self {
            Direction::Left | Direction::Up => DragMode::ResizeStart,
            Direction::Right | Direction::Down => DragMode::ResizeEnd,
        }
    }

    pub fn axis(&self) -> Axis {
        match self {
            Direction::Left | Direction::Right => Axis::Horizontal,
            Direction::Up | Direction::Down => Axis::Vertical,
        }
    }

    /// The point to resolve for `pointer`, locked to the handle's axis.
    ///
    /// Horizontal handles keep the anchor's `y`; vertical handles keep its `x`.
    pub fn probe(&self, anchor: Point, pointer: Point) -> Point {
        match self.axis() {
            Axis::Horizontal => Point::new(pointer.x, anchor.y),
            Axis::Vertical => Point::new(anchor.x, pointer.y),
        }
    }

    /// CSS cursor shown while this handle is dragged.
    pub fn cursor(&self) -> &'static str {
        match self.axis() {
            Axis::Horizontal => "ew-resize",
            Axis::Vertical => "ns-resize",
        }
    }
}
