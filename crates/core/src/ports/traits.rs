use async_trait::async_trait;
use chrono::NaiveDate;

use super::{CommitError, Notification, RescheduleRequest, TransportError};
use crate::calendar::{DateRange, EventId, LeaveEvent};
use crate::feedback::Preview;
use crate::holiday::Holiday;

/// Source of configured holidays, queried one calendar year at a time.
#[async_trait]
pub trait HolidayProvider: Send + Sync {
    /// Gets every holiday instance falling in `year`, recurring ones included.
    async fn holidays_for_year(&self, year: i32) -> Result<Vec<Holiday>, TransportError>;
}

/// Remote store that owns leave events.
#[async_trait]
pub trait LeaveStore: Send + Sync {
    /// Applies a reschedule and returns the refreshed event view.
    async fn reschedule(
        &self,
        id: &EventId,
        request: &RescheduleRequest,
    ) -> Result<LeaveEvent, CommitError>;
}

/// Fire-and-forget user notifications.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// The rendering surface the preview and the event strip are drawn on.
pub trait CalendarSurface: Send + Sync {
    /// Draws (or redraws) the drag preview, hiding the event's normal strip.
    fn render_preview(&self, preview: &Preview);

    /// Removes every transient visual for `event_id` and shows its strip again.
    fn clear_preview(&self, event_id: &EventId);

    /// Displays `event_id` over `range`.
    fn show_event_range(&self, event_id: &EventId, range: DateRange);
}

/// Source of the current day, used by the forward-only move rule.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}
