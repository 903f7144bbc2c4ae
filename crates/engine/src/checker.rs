//! Holiday conflict checking for candidate ranges.

use std::sync::Arc;

use leavecal_core::calendar::DateRange;
use leavecal_core::holiday::{scan_conflicts, years_spanned, ConflictResult, HolidayIndex};
use leavecal_core::ports::{HolidayProvider, TransportError};

use crate::config::ConflictPolicy;

/// Reason reported when the holiday service is unreachable and the policy is
/// [`ConflictPolicy::FailClosed`].
pub const HOLIDAYS_UNAVAILABLE: &str = "Holiday calendar unavailable";

/// Vetoes candidate ranges that overlap a configured holiday.
#[derive(Clone)]
pub struct ConflictChecker {
    provider: Arc<dyn HolidayProvider>,
    policy: ConflictPolicy,
}

impl ConflictChecker {
    pub fn new(provider: Arc<dyn HolidayProvider>, policy: ConflictPolicy) -> Self {
        Self { provider, policy }
    }

    pub fn policy(&self) -> ConflictPolicy {
        self.policy
    }

    /// Checks every day of `range` against the holidays of the years it spans.
    ///
    /// A failed lookup never surfaces as an error: under `FailOpen` the range
    /// is reported clear, under `FailClosed` it is blocked.
    pub async fn check(&self, range: &DateRange) -> ConflictResult {
        match self.load_index(range).await {
            Ok(index) => {
                let result = scan_conflicts(range, &index);
                tracing::debug!(
                    start = %range.start(),
                    end = %range.end(),
                    blocked = result.blocked,
                    "Holiday conflict check finished"
                );
                result
            }
            Err(err) => match self.policy {
                ConflictPolicy::FailOpen => {
                    tracing::warn!(
                        error = %err,
                        start = %range.start(),
                        end = %range.end(),
                        "Could not check holiday conflicts; continuing"
                    );
                    ConflictResult::clear()
                }
                ConflictPolicy::FailClosed => {
                    tracing::warn!(
                        error = %err,
                        start = %range.start(),
                        end = %range.end(),
                        "Could not check holiday conflicts; blocking"
                    );
                    ConflictResult::from_reasons(vec![HOLIDAYS_UNAVAILABLE.to_string()])
                }
            },
        }
    }

    /// Fetches and indexes the holidays of every year `range` touches, one
    /// request per year.
    pub async fn load_index(&self, range: &DateRange) -> Result<HolidayIndex, TransportError> {
        let mut index = HolidayIndex::new();
        for year in years_spanned(range) {
            let holidays = self.provider.holidays_for_year(year).await?;
            tracing::trace!(year, count = holidays.len(), "Loaded holidays");
            index.extend(holidays);
        }
        Ok(index)
    }
}
