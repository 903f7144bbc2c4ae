//! Interfaces to the collaborators the engine does not own.

mod error;
mod traits;
mod types;

pub use error::{CommitError, FieldErrors, TransportError};
pub use traits::{CalendarSurface, Clock, HolidayProvider, LeaveStore, Notifier};
pub use types::{FixedClock, Notification, RescheduleRequest, SystemClock};
