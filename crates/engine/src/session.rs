//! The drag session state machine.
//!
//! `Idle -> Open -> Closing -> Idle`. At most one session exists per
//! controller; opening a second one while the first is `Open` or `Closing` is
//! refused with [`SessionError::AlreadyActive`].
//!
//! The slot lock is never held while a collaborator runs, so layouts and
//! surfaces may query the controller from inside their callbacks.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::NaiveDate;

use leavecal_core::calendar::{DateRange, EventId, LeaveEvent};
use leavecal_core::drag::{self, Direction, DragMode};
use leavecal_core::feedback::PreviewInput;
use leavecal_core::geometry::{ComputedGrid, GeometryResolver, GridLayout, Point};
use leavecal_core::ports::{
    CalendarSurface, Clock, FieldErrors, HolidayProvider, LeaveStore, Notification, Notifier,
    SystemClock, TransportError,
};

use crate::checker::ConflictChecker;
use crate::commit::{CommitCoordinator, CommitOutcome, CommitTicket};
use crate::config::EngineConfig;
use crate::error::SessionError;
use crate::feedback::FeedbackController;

/// One interactive reschedule gesture, from press to release.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    event: LeaveEvent,
    mode: DragMode,
    direction: Option<Direction>,
    anchor: Point,
    pointer: Point,
    original: DateRange,
    current: DateRange,
    fixed_duration: u64,
    frame: u64,
}

impl DragSession {
    fn open(event: LeaveEvent, mode: DragMode, direction: Option<Direction>, anchor: Point) -> Self {
        let original = event.range;
        Self {
            event,
            mode,
            direction,
            anchor,
            pointer: anchor,
            original,
            current: original,
            fixed_duration: original.days(),
            frame: 0,
        }
    }

    pub fn event(&self) -> &LeaveEvent {
        &self.event
    }

    pub fn mode(&self) -> DragMode {
        self.mode
    }

    /// The grabbed handle; `None` for moves.
    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }

    pub fn anchor(&self) -> Point {
        self.anchor
    }

    pub fn pointer(&self) -> Point {
        self.pointer
    }

    /// The event's range when the session opened.
    pub fn original(&self) -> DateRange {
        self.original
    }

    pub fn current(&self) -> DateRange {
        self.current
    }

    /// Length in days every move candidate keeps.
    pub fn fixed_duration(&self) -> u64 {
        self.fixed_duration
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn is_unchanged(&self) -> bool {
        self.current == self.original
    }

    /// The point to resolve for `pointer`. Resize handles are locked to their
    /// axis; moves follow the pointer freely.
    pub fn probe(&self, pointer: Point) -> Point {
        match self.direction {
            Some(direction) => direction.probe(self.anchor, pointer),
            None => pointer,
        }
    }

    /// Applies the mutation rules for dropping on `target`.
    pub fn retarget(&mut self, target: NaiveDate, today: NaiveDate) -> MoveOutcome {
        match drag::resolve(self.mode, &self.original, &self.current, target, today) {
            None => MoveOutcome::Rejected,
            Some(candidate) if candidate == self.current => MoveOutcome::Unchanged,
            Some(candidate) => {
                self.current = candidate;
                MoveOutcome::Updated(candidate)
            }
        }
    }

    pub fn preview_input(&self, label_offset: f64) -> PreviewInput<'_> {
        PreviewInput {
            event: &self.event,
            mode: self.mode,
            direction: self.direction,
            range: self.current,
            pointer: self.pointer,
            frame: self.frame,
            label_offset,
        }
    }

    fn into_ticket(self) -> CommitTicket {
        CommitTicket::new(self.event, self.original, self.current)
    }
}

/// An open session plus the resolver measured for it when it opened.
struct OpenSession {
    serial: u64,
    session: DragSession,
    resolver: Arc<GeometryResolver>,
}

enum SessionSlot {
    Idle,
    Open(OpenSession),
    Closing { event_id: EventId },
}

/// Observable state of a [`DragController`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Open { event_id: EventId, mode: DragMode },
    Closing { event_id: EventId },
}

/// What a pointer move did to the open session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// No session is open.
    Inactive,
    /// No cell under the pointer.
    Missed,
    /// The rules refused the target; the range is kept.
    Rejected,
    /// The target resolves to the range already shown.
    Unchanged,
    Updated(DateRange),
}

/// How a released session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseOutcome {
    /// The range never changed; nothing was sent.
    Unchanged,
    /// A holiday overlaps the range; the original range was restored.
    Blocked { reasons: Vec<String> },
    Committed { event: LeaveEvent },
    Rejected { errors: FieldErrors },
    Failed { error: TransportError },
}

impl From<CommitOutcome> for ReleaseOutcome {
    fn from(outcome: CommitOutcome) -> Self {
        match outcome {
            CommitOutcome::Committed { event } => ReleaseOutcome::Committed { event },
            CommitOutcome::Rejected { errors } => ReleaseOutcome::Rejected { errors },
            CommitOutcome::Failed { error } => ReleaseOutcome::Failed { error },
        }
    }
}

/// External collaborators the controller drives.
#[derive(Clone)]
pub struct Collaborators {
    pub layout: Arc<dyn GridLayout>,
    pub holidays: Arc<dyn HolidayProvider>,
    pub store: Arc<dyn LeaveStore>,
    pub notifier: Arc<dyn Notifier>,
    pub surface: Arc<dyn CalendarSurface>,
}

/// Resets the slot to `Idle` when the release flow ends, however it ends.
struct ReturnToIdle<'a> {
    slot: &'a Mutex<SessionSlot>,
}

impl Drop for ReturnToIdle<'_> {
    fn drop(&mut self) {
        *lock(self.slot) = SessionSlot::Idle;
        tracing::debug!("Drag session closed");
    }
}

fn lock(slot: &Mutex<SessionSlot>) -> MutexGuard<'_, SessionSlot> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Turns pointer gestures into reschedules of leave events.
pub struct DragController {
    slot: Mutex<SessionSlot>,
    next_serial: AtomicU64,
    resolver: GeometryResolver,
    checker: ConflictChecker,
    coordinator: CommitCoordinator,
    feedback: FeedbackController,
    notifier: Arc<dyn Notifier>,
    clock: Arc<dyn Clock>,
    config: EngineConfig,
}

impl DragController {
    pub fn new(collaborators: Collaborators, config: &EngineConfig) -> Self {
        let Collaborators {
            layout,
            holidays,
            store,
            notifier,
            surface,
        } = collaborators;

        Self {
            slot: Mutex::new(SessionSlot::Idle),
            next_serial: AtomicU64::new(0),
            resolver: GeometryResolver::new(layout),
            checker: ConflictChecker::new(holidays, config.conflict_policy),
            coordinator: CommitCoordinator::new(store, Arc::clone(&notifier), Arc::clone(&surface)),
            feedback: FeedbackController::new(surface, config.label_offset),
            notifier,
            clock: Arc::new(SystemClock),
            config: config.clone(),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Installs a computed grid used when hit-testing finds no cell and the
    /// layout cannot be measured.
    pub fn with_fallback(mut self, grid: ComputedGrid) -> Self {
        self.resolver.set_fallback(Some(grid));
        self
    }

    pub fn resolver(&self) -> &GeometryResolver {
        &self.resolver
    }

    pub fn state(&self) -> SessionState {
        match &*lock(&self.slot) {
            SessionSlot::Idle => SessionState::Idle,
            SessionSlot::Open(open) => SessionState::Open {
                event_id: open.session.event.id.clone(),
                mode: open.session.mode,
            },
            SessionSlot::Closing { event_id } => SessionState::Closing {
                event_id: event_id.clone(),
            },
        }
    }

    /// A snapshot of the open session, if any.
    pub fn session(&self) -> Option<DragSession> {
        match &*lock(&self.slot) {
            SessionSlot::Open(open) => Some(open.session.clone()),
            _ => None,
        }
    }

    /// Opens a resize session from the handle at `direction`.
    pub fn begin_resize(
        &self,
        event: LeaveEvent,
        direction: Direction,
        anchor: Point,
    ) -> Result<(), SessionError> {
        self.begin(event, direction.mode(), Some(direction), anchor)
    }

    /// Opens a session that moves the whole range.
    pub fn begin_move(&self, event: LeaveEvent, anchor: Point) -> Result<(), SessionError> {
        self.begin(event, DragMode::Move, None, anchor)
    }

    fn begin(
        &self,
        event: LeaveEvent,
        mode: DragMode,
        direction: Option<Direction>,
        anchor: Point,
    ) -> Result<(), SessionError> {
        let resolver = Arc::new(self.measure_resolver());
        let session = {
            let mut slot = lock(&self.slot);
            match &*slot {
                SessionSlot::Idle => {}
                SessionSlot::Open(active) => {
                    return Err(SessionError::AlreadyActive {
                        event_id: active.session.event.id.clone(),
                    })
                }
                SessionSlot::Closing { event_id } => {
                    return Err(SessionError::AlreadyActive {
                        event_id: event_id.clone(),
                    })
                }
            }

            let session = DragSession::open(event, mode, direction, anchor);
            *slot = SessionSlot::Open(OpenSession {
                serial: self.next_serial.fetch_add(1, Ordering::Relaxed),
                session: session.clone(),
                resolver: Arc::clone(&resolver),
            });
            session
        };

        tracing::debug!(
            event_id = %session.event.id,
            ?mode,
            range = %session.original,
            "Drag session opened"
        );
        self.feedback.render(&session, resolver.as_ref());
        Ok(())
    }

    /// Re-measures the rendered grid so every session resolves against a
    /// fresh fallback. Keeps the installed fallback when the layout cannot be
    /// measured.
    fn measure_resolver(&self) -> GeometryResolver {
        let resolver = self.resolver.clone();
        match resolver.measure(self.config.columns_per_row, self.config.fallback_cell_height) {
            Some(grid) => {
                tracing::debug!(metrics = ?grid.metrics(), "Measured fallback grid");
                resolver.with_fallback(grid)
            }
            None => resolver,
        }
    }

    /// Feeds one pointer move into the open session.
    ///
    /// Every move renders a new preview frame so the label follows the
    /// pointer, even when the range itself does not change. A move that races
    /// with the session closing reports `Inactive`.
    pub fn pointer_move(&self, pointer: Point) -> MoveOutcome {
        let (serial, probe, resolver) = match &*lock(&self.slot) {
            SessionSlot::Open(open) => (
                open.serial,
                open.session.probe(pointer),
                Arc::clone(&open.resolver),
            ),
            _ => return MoveOutcome::Inactive,
        };

        let cell = resolver.resolve(probe);
        let today = self.clock.today();

        let (outcome, session) = {
            let mut slot = lock(&self.slot);
            let SessionSlot::Open(open) = &mut *slot else {
                return MoveOutcome::Inactive;
            };
            if open.serial != serial {
                return MoveOutcome::Inactive;
            }

            let session = &mut open.session;
            session.pointer = pointer;
            let outcome = match cell {
                Some(cell) => session.retarget(cell.date, today),
                None => MoveOutcome::Missed,
            };
            session.frame += 1;
            (outcome, session.clone())
        };

        if let MoveOutcome::Updated(range) = outcome {
            tracing::trace!(event_id = %session.event.id, range = %range, "Range updated");
        }
        self.feedback.render(&session, resolver.as_ref());
        outcome
    }

    /// Discards the open session without contacting any collaborator.
    ///
    /// A session that is already `Closing` runs to completion and cannot be
    /// cancelled.
    pub fn cancel(&self) -> Result<(), SessionError> {
        let session = {
            let mut slot = lock(&self.slot);
            match std::mem::replace(&mut *slot, SessionSlot::Idle) {
                SessionSlot::Open(open) => open.session,
                other => {
                    *slot = other;
                    return Err(SessionError::NotOpen);
                }
            }
        };
        tracing::debug!(event_id = %session.event.id, "Drag session cancelled");
        drop(self.feedback.guard(session.event.id));
        Ok(())
    }

    /// Ends the gesture.
    ///
    /// An unchanged range finishes immediately. Otherwise the range is checked
    /// for holiday conflicts and, if clear, committed. The preview is torn down
    /// and the controller returns to `Idle` on every path.
    ///
    /// Drive the returned future to completion: dropping it mid-commit tears
    /// down the preview without rolling back or applying the server's answer.
    pub async fn release(&self) -> Result<ReleaseOutcome, SessionError> {
        let session = {
            let mut slot = lock(&self.slot);
            match std::mem::replace(&mut *slot, SessionSlot::Idle) {
                SessionSlot::Open(open) => {
                    *slot = SessionSlot::Closing {
                        event_id: open.session.event.id.clone(),
                    };
                    open.session
                }
                other => {
                    *slot = other;
                    return Err(SessionError::NotOpen);
                }
            }
        };

        // Dropped in reverse order: the preview is cleared before the slot
        // returns to `Idle`.
        let _idle = ReturnToIdle { slot: &self.slot };
        let _preview = self.feedback.guard(session.event.id.clone());

        if session.is_unchanged() {
            tracing::debug!(event_id = %session.event.id, "Range unchanged; nothing to commit");
            return Ok(ReleaseOutcome::Unchanged);
        }

        let conflicts = self.checker.check(&session.current).await;
        if conflicts.blocked {
            tracing::debug!(
                event_id = %session.event.id,
                reasons = ?conflicts.reasons,
                "Reschedule blocked by holidays"
            );
            self.notifier.notify(Notification::error(conflicts.message()));
            self.coordinator.rollback(&session.into_ticket());
            return Ok(ReleaseOutcome::Blocked {
                reasons: conflicts.reasons,
            });
        }

        Ok(self.coordinator.commit(session.into_ticket()).await.into())
    }
}
