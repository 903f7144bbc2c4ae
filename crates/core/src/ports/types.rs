use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Clock;
use crate::calendar::DateRange;

/// Body of the commit request sent to the persistence collaborator.
///
/// `is_reschedule` tells the remote side to apply date and policy checks only,
/// not a full revalidation of the leave request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RescheduleRequest {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub is_reschedule: bool,
}

impl RescheduleRequest {
    pub fn new(range: DateRange) -> Self {
        Self {
            start_date: range.start(),
            end_date: range.end(),
            is_reschedule: true,
        }
    }

    /// The submitted range, if the request is well-formed.
    pub fn range(&self) -> Option<DateRange> {
        DateRange::new(self.start_date, self.end_date).ok()
    }
}

/// A fire-and-forget user notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "message", rename_all = "snake_case")]
pub enum Notification {
    Success(String),
    Error(String),
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Notification::Success(message.into())
    }

    pub fn error(message: impl Into<String>) -> Self {
        Notification::Error(message.into())
    }

    pub fn message(&self) -> &str {
        match self {
            Notification::Success(m) | Notification::Error(m) => m,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Notification::Error(_))
    }
}

/// Reads today's date from the local clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}

/// A clock pinned to one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
