use leavecal_core::calendar::EventId;
use thiserror::Error;

/// Errors returned by the drag session state machine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("A drag session is already active for event {event_id}")]
    AlreadyActive { event_id: EventId },
    #[error("No drag session is open")]
    NotOpen,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_error_display() {
        let error = SessionError::AlreadyActive {
            event_id: EventId::new("42"),
        };
        assert_eq!(
            error.to_string(),
            "A drag session is already active for event 42"
        );
        assert_eq!(SessionError::NotOpen.to_string(), "No drag session is open");
    }
}
