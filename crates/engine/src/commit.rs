//! Commit and rollback of a closed drag session.

use std::sync::Arc;

use leavecal_core::calendar::{DateRange, EventId, LeaveEvent};
use leavecal_core::ports::{
    CalendarSurface, CommitError, FieldErrors, LeaveStore, Notification, Notifier,
    RescheduleRequest, TransportError,
};

/// Message shown when the store cannot be reached.
pub const COMMIT_FAILED_MESSAGE: &str = "Failed to update leave request. Please try again.";

/// One-shot permission to commit a closed session's range.
///
/// A ticket is produced once per session and consumed by
/// [`CommitCoordinator::commit`], so a session can never be committed twice.
#[derive(Debug)]
pub struct CommitTicket {
    event: LeaveEvent,
    original: DateRange,
    candidate: DateRange,
}

impl CommitTicket {
    pub(crate) fn new(event: LeaveEvent, original: DateRange, candidate: DateRange) -> Self {
        Self {
            event,
            original,
            candidate,
        }
    }

    pub fn event(&self) -> &LeaveEvent {
        &self.event
    }

    pub fn event_id(&self) -> &EventId {
        &self.event.id
    }

    /// The range captured when the session opened.
    pub fn original(&self) -> DateRange {
        self.original
    }

    /// The range being submitted.
    pub fn candidate(&self) -> DateRange {
        self.candidate
    }
}

/// Result of a commit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    /// The store acknowledged the new range and returned the refreshed event.
    Committed { event: LeaveEvent },
    /// The store refused the range; the original range is displayed again.
    Rejected { errors: FieldErrors },
    /// The store could not be reached; the original range is displayed again.
    Failed { error: TransportError },
}

/// Submits reschedules to the leave store and reconciles the displayed range.
#[derive(Clone)]
pub struct CommitCoordinator {
    store: Arc<dyn LeaveStore>,
    notifier: Arc<dyn Notifier>,
    surface: Arc<dyn CalendarSurface>,
}

impl CommitCoordinator {
    pub fn new(
        store: Arc<dyn LeaveStore>,
        notifier: Arc<dyn Notifier>,
        surface: Arc<dyn CalendarSurface>,
    ) -> Self {
        Self {
            store,
            notifier,
            surface,
        }
    }

    /// Sends the ticket's candidate range, flagged as a reschedule.
    ///
    /// On acknowledgement the candidate range is displayed and a success
    /// notification raised. Validation errors surface every message; transport
    /// errors surface a generic message. Both failure paths roll back.
    pub async fn commit(&self, ticket: CommitTicket) -> CommitOutcome {
        let request = RescheduleRequest::new(ticket.candidate);
        tracing::debug!(
            event_id = %ticket.event_id(),
            start = %request.start_date,
            end = %request.end_date,
            "Submitting reschedule"
        );

        match self.store.reschedule(ticket.event_id(), &request).await {
            Ok(event) => {
                if event.range != ticket.candidate {
                    tracing::warn!(
                        event_id = %ticket.event_id(),
                        submitted = %ticket.candidate,
                        echoed = %event.range,
                        "Store echoed a different range than submitted"
                    );
                }
                self.surface
                    .show_event_range(ticket.event_id(), ticket.candidate);
                self.notifier.notify(Notification::success(format!(
                    "Leave request updated successfully! ({} days)",
                    ticket.candidate.days()
                )));
                tracing::info!(
                    event_id = %ticket.event_id(),
                    range = %ticket.candidate,
                    "Leave request rescheduled"
                );
                CommitOutcome::Committed { event }
            }
            Err(CommitError::Validation(errors)) => {
                tracing::debug!(
                    event_id = %ticket.event_id(),
                    ?errors,
                    "Reschedule rejected by store"
                );
                if errors.is_empty() {
                    self.notifier.notify(Notification::error(COMMIT_FAILED_MESSAGE));
                }
                for message in errors.messages() {
                    self.notifier.notify(Notification::error(message));
                }
                self.rollback(&ticket);
                CommitOutcome::Rejected { errors }
            }
            Err(CommitError::Transport(error)) => {
                tracing::error!(
                    event_id = %ticket.event_id(),
                    error = %error,
                    "Failed to update leave request"
                );
                self.notifier.notify(Notification::error(COMMIT_FAILED_MESSAGE));
                self.rollback(&ticket);
                CommitOutcome::Failed { error }
            }
        }
    }

    /// Displays the ticket's original range again.
    pub fn rollback(&self, ticket: &CommitTicket) {
        tracing::debug!(
            event_id = %ticket.event_id(),
            range = %ticket.original,
            "Restoring original range"
        );
        self.surface
            .show_event_range(ticket.event_id(), ticket.original);
    }
}
