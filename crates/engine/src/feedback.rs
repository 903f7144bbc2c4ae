//! Preview rendering and its guaranteed teardown.

use std::sync::Arc;

use leavecal_core::calendar::EventId;
use leavecal_core::feedback::build_preview;
use leavecal_core::geometry::GridLayout;
use leavecal_core::ports::CalendarSurface;

use crate::session::DragSession;

/// Pushes preview frames for the open session to the surface.
#[derive(Clone)]
pub struct FeedbackController {
    surface: Arc<dyn CalendarSurface>,
    label_offset: f64,
}

impl FeedbackController {
    pub fn new(surface: Arc<dyn CalendarSurface>, label_offset: f64) -> Self {
        Self {
            surface,
            label_offset,
        }
    }

    /// Renders the current state of `session`.
    pub fn render(&self, session: &DragSession, layout: &dyn GridLayout) {
        let preview = build_preview(&session.preview_input(self.label_offset), layout);
        tracing::trace!(
            event_id = %preview.event_id,
            frame = preview.frame,
            range = %preview.range,
            "Rendering preview"
        );
        self.surface.render_preview(&preview);
    }

    /// Returns a guard that clears the preview for `event_id` when dropped.
    pub fn guard(&self, event_id: EventId) -> PreviewGuard {
        PreviewGuard {
            surface: Arc::clone(&self.surface),
            event_id,
        }
    }
}

/// Tears down every transient visual of a session when dropped.
///
/// Runs on every exit path of the release flow, including early returns,
/// panics in a collaborator, and the release future being dropped.
pub struct PreviewGuard {
    surface: Arc<dyn CalendarSurface>,
    event_id: EventId,
}

impl Drop for PreviewGuard {
    fn drop(&mut self) {
        tracing::trace!(event_id = %self.event_id, "Clearing preview");
        self.surface.clear_preview(&self.event_id);
    }
}
