//! Holiday lookups and the pure day-by-day conflict scan.

mod conflicts;
mod types;

pub use conflicts::{scan_conflicts, years_spanned, HolidayIndex};
pub use types::{ConflictResult, Holiday};
