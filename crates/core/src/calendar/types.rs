use std::fmt;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use super::error::DateRangeError;
use crate::serde::deserialize_lenient_date;

/// Identity of a leave event as known to the persistence collaborator.
///
/// The remote side uses numeric ids for some tenants and UUIDs for others, so
/// the id is kept as an opaque string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "RawEventId", into = "String")]
pub struct EventId(String);

impl EventId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u64> for EventId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for EventId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for EventId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<EventId> for String {
    fn from(id: EventId) -> Self {
        id.0
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawEventId {
    Number(u64),
    Text(String),
}

impl From<RawEventId> for EventId {
    fn from(raw: RawEventId) -> Self {
        match raw {
            RawEventId::Number(n) => n.into(),
            RawEventId::Text(s) => Self(s),
        }
    }
}

/// An inclusive range of calendar days. `start <= end` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawDateRange")]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

/// Accepts the calendar feed's `start`/`end` as well as the leave request's
/// `start_date`/`end_date`.
#[derive(Deserialize)]
struct RawDateRange {
    #[serde(alias = "start_date", deserialize_with = "deserialize_lenient_date")]
    start: NaiveDate,
    #[serde(alias = "end_date", deserialize_with = "deserialize_lenient_date")]
    end: NaiveDate,
}

impl TryFrom<RawDateRange> for DateRange {
    type Error = DateRangeError;

    fn try_from(raw: RawDateRange) -> Result<Self, Self::Error> {
        Self::new(raw.start, raw.end)
    }
}

impl DateRange {
    /// Creates a new date range, validating that start <= end.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DateRangeError> {
        if start > end {
            return Err(DateRangeError::InvalidRange);
        }
        Ok(Self { start, end })
    }

    /// A range covering a single day.
    pub fn single(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    /// Creates a range of `days` days beginning at `start`.
    pub fn starting_at(start: NaiveDate, days: u64) -> Result<Self, DateRangeError> {
        let offset = days.checked_sub(1).ok_or(DateRangeError::InvalidRange)?;
        let end = start
            .checked_add_days(Days::new(offset))
            .ok_or(DateRangeError::OutOfBounds)?;
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of days covered, counting both ends (`end - start + 1`).
    pub fn days(&self) -> u64 {
        (self.end - self.start).num_days().unsigned_abs() + 1
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Iterates every day in the range in ascending order.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d <= end)
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}

/// Read-only snapshot of a leave event as displayed on the calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveEvent {
    pub id: EventId,
    pub title: String,
    #[serde(flatten)]
    pub range: DateRange,
    /// Accent color for the event strip (CSS color value).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(
        default,
        alias = "backgroundColor",
        skip_serializing_if = "Option::is_none"
    )]
    pub background_color: Option<String>,
}

impl LeaveEvent {
    pub fn new(id: impl Into<EventId>, title: impl Into<String>, range: DateRange) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            range,
            color: None,
            background_color: None,
        }
    }

    /// Sets the accent color for this event.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Sets the background color used by the floating label.
    pub fn with_background_color(mut self, color: impl Into<String>) -> Self {
        self.background_color = Some(color.into());
        self
    }

    /// Returns a copy of this event displayed over a different range.
    pub fn with_range(mut self, range: DateRange) -> Self {
        self.range = range;
        self
    }
}
