//! In-memory collaborators.
//!
//! Stand-ins for the holiday service, the leave store, the notification sink
//! and the rendering surface. Data is not persisted and every call is recorded
//! so tests can assert on what the engine did.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use chrono::Datelike;
use tokio::sync::{Notify, RwLock};

use leavecal_core::calendar::{DateRange, EventId, LeaveEvent};
use leavecal_core::feedback::Preview;
use leavecal_core::holiday::Holiday;
use leavecal_core::ports::{
    CalendarSurface, CommitError, FieldErrors, HolidayProvider, LeaveStore, Notification,
    Notifier, RescheduleRequest, TransportError,
};

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Holiday calendar held in memory.
#[derive(Debug, Default)]
pub struct InMemoryHolidays {
    holidays: RwLock<Vec<Holiday>>,
    unavailable: AtomicBool,
    requested_years: Mutex<Vec<i32>>,
}

impl InMemoryHolidays {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_holidays(holidays: impl IntoIterator<Item = Holiday>) -> Self {
        Self {
            holidays: RwLock::new(holidays.into_iter().collect()),
            ..Self::default()
        }
    }

    /// Makes every lookup fail with a transport error.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Years requested so far, in call order.
    pub fn requested_years(&self) -> Vec<i32> {
        lock(&self.requested_years).clone()
    }
}

#[async_trait]
impl HolidayProvider for InMemoryHolidays {
    async fn holidays_for_year(&self, year: i32) -> Result<Vec<Holiday>, TransportError> {
        lock(&self.requested_years).push(year);
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(TransportError::new("holiday service unavailable"));
        }
        let holidays = self.holidays.read().await;
        Ok(holidays
            .iter()
            .filter(|h| h.date.year() == year)
            .cloned()
            .collect())
    }
}

#[derive(Debug, Clone, Default)]
enum StoreBehavior {
    #[default]
    Accept,
    Reject(FieldErrors),
    Unreachable,
}

/// Leave store held in memory.
///
/// Accepts every reschedule by default; can be switched to answer with
/// validation errors or to behave as unreachable. An optional gate holds each
/// request until it is notified.
#[derive(Debug, Default)]
pub struct InMemoryLeaveStore {
    events: RwLock<HashMap<EventId, LeaveEvent>>,
    requests: Mutex<Vec<(EventId, RescheduleRequest)>>,
    behavior: Mutex<StoreBehavior>,
    gate: Option<Arc<Notify>>,
}

impl InMemoryLeaveStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_events(events: impl IntoIterator<Item = LeaveEvent>) -> Self {
        Self {
            events: RwLock::new(events.into_iter().map(|e| (e.id.clone(), e)).collect()),
            ..Self::default()
        }
    }

    /// Holds every request until `gate` is notified.
    pub fn with_gate(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    /// Answers every following request with `errors`.
    pub fn reject_with(&self, errors: FieldErrors) {
        *lock(&self.behavior) = StoreBehavior::Reject(errors);
    }

    /// Fails every following request with a transport error.
    pub fn set_unreachable(&self) {
        *lock(&self.behavior) = StoreBehavior::Unreachable;
    }

    /// Requests received so far, in call order.
    pub fn requests(&self) -> Vec<(EventId, RescheduleRequest)> {
        lock(&self.requests).clone()
    }

    pub async fn event(&self, id: &EventId) -> Option<LeaveEvent> {
        self.events.read().await.get(id).cloned()
    }
}

#[async_trait]
impl LeaveStore for InMemoryLeaveStore {
    async fn reschedule(
        &self,
        id: &EventId,
        request: &RescheduleRequest,
    ) -> Result<LeaveEvent, CommitError> {
        lock(&self.requests).push((id.clone(), *request));
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        let behavior = lock(&self.behavior).clone();
        match behavior {
            StoreBehavior::Accept => {}
            StoreBehavior::Reject(errors) => return Err(CommitError::Validation(errors)),
            StoreBehavior::Unreachable => {
                return Err(TransportError::new("leave store unreachable").into())
            }
        }

        let range = request.range().ok_or_else(|| {
            CommitError::Validation(
                FieldErrors::new().with("end_date", "The end date must be after the start date."),
            )
        })?;

        let mut events = self.events.write().await;
        let event = events.get_mut(id).ok_or_else(|| {
            CommitError::Validation(FieldErrors::new().with("id", "Leave request not found."))
        })?;
        event.range = range;
        Ok(event.clone())
    }
}

/// Notifier that records every notification.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notifications: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        lock(&self.notifications).clone()
    }

    /// Messages of the error notifications only.
    pub fn errors(&self) -> Vec<String> {
        lock(&self.notifications)
            .iter()
            .filter(|n| n.is_error())
            .map(|n| n.message().to_string())
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        lock(&self.notifications).push(notification);
    }
}

/// A call made against [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCall {
    Rendered(Preview),
    Cleared(EventId),
    Shown(EventId, DateRange),
}

/// Surface that records every call instead of drawing.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    calls: Mutex<Vec<SurfaceCall>>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<SurfaceCall> {
        lock(&self.calls).clone()
    }

    pub fn previews(&self) -> Vec<Preview> {
        lock(&self.calls)
            .iter()
            .filter_map(|call| match call {
                SurfaceCall::Rendered(preview) => Some(preview.clone()),
                _ => None,
            })
            .collect()
    }

    /// The range last shown for `id`, if any.
    pub fn displayed_range(&self, id: &EventId) -> Option<DateRange> {
        lock(&self.calls).iter().rev().find_map(|call| match call {
            SurfaceCall::Shown(shown, range) if shown == id => Some(*range),
            _ => None,
        })
    }

    /// True while a rendered preview has not been cleared yet.
    pub fn preview_active(&self) -> bool {
        lock(&self.calls)
            .iter()
            .rev()
            .find_map(|call| match call {
                SurfaceCall::Rendered(_) => Some(true),
                SurfaceCall::Cleared(_) => Some(false),
                SurfaceCall::Shown(..) => None,
            })
            .unwrap_or(false)
    }
}

impl CalendarSurface for RecordingSurface {
    fn render_preview(&self, preview: &Preview) {
        lock(&self.calls).push(SurfaceCall::Rendered(preview.clone()));
    }

    fn clear_preview(&self, event_id: &EventId) {
        lock(&self.calls).push(SurfaceCall::Cleared(event_id.clone()));
    }

    fn show_event_range(&self, event_id: &EventId, range: DateRange) {
        lock(&self.calls).push(SurfaceCall::Shown(event_id.clone(), range));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn test_holidays_filtered_by_year() {
        let holidays = InMemoryHolidays::with_holidays(vec![
            Holiday::new(date(2025, 12, 25), "Christmas Day"),
            Holiday::new(date(2026, 1, 1), "New Year's Day"),
        ]);

        let found = holidays.holidays_for_year(2026).await.unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "New Year's Day");
        assert_eq!(holidays.requested_years(), vec![2026]);
    }

    #[tokio::test]
    async fn test_unavailable_holidays() {
        let holidays = InMemoryHolidays::new();
        holidays.set_unavailable(true);

        assert!(holidays.holidays_for_year(2025).await.is_err());
    }

    #[tokio::test]
    async fn test_store_applies_reschedule() {
        let range = DateRange::new(date(2025, 3, 10), date(2025, 3, 12)).unwrap();
        let event = LeaveEvent::new("1", "Annual leave", range);
        let store = InMemoryLeaveStore::with_events(vec![event.clone()]);
        let new_range = DateRange::new(date(2025, 3, 10), date(2025, 3, 15)).unwrap();

        let updated = store
            .reschedule(&event.id, &RescheduleRequest::new(new_range))
            .await
            .unwrap();

        assert_eq!(updated.range, new_range);
        assert_eq!(store.event(&event.id).await.unwrap().range, new_range);
        assert_eq!(store.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_store_unknown_event_is_validation_error() {
        let store = InMemoryLeaveStore::new();
        let range = DateRange::single(date(2025, 3, 10));

        let result = store
            .reschedule(&EventId::new("missing"), &RescheduleRequest::new(range))
            .await;

        assert!(matches!(result, Err(CommitError::Validation(_))));
    }

    #[test]
    fn test_recording_surface_tracks_preview_state() {
        let surface = RecordingSurface::new();
        let id = EventId::new("1");

        assert!(!surface.preview_active());
        surface.show_event_range(&id, DateRange::single(date(2025, 3, 10)));
        surface.clear_preview(&id);

        assert!(!surface.preview_active());
        assert_eq!(
            surface.displayed_range(&id),
            Some(DateRange::single(date(2025, 3, 10)))
        );
    }
}
