mod error;
mod types;

pub use error::DateRangeError;
pub use types::{DateRange, EventId, LeaveEvent};
