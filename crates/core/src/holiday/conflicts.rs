use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};

use super::{ConflictResult, Holiday};
use crate::calendar::DateRange;

/// Holidays indexed by date for O(1) membership tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HolidayIndex {
    by_date: HashMap<NaiveDate, Vec<String>>,
}

impl HolidayIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, holiday: Holiday) {
        self.by_date.entry(holiday.date).or_default().push(holiday.name);
    }

    /// Names of the holidays falling on `date`.
    pub fn names_on(&self, date: NaiveDate) -> &[String] {
        self.by_date.get(&date).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.by_date.is_empty()
    }

    pub fn len(&self) -> usize {
        self.by_date.values().map(Vec::len).sum()
    }
}

impl FromIterator<Holiday> for HolidayIndex {
    fn from_iter<I: IntoIterator<Item = Holiday>>(iter: I) -> Self {
        let mut index = Self::new();
        index.extend(iter);
        index
    }
}

impl Extend<Holiday> for HolidayIndex {
    fn extend<I: IntoIterator<Item = Holiday>>(&mut self, iter: I) {
        for holiday in iter {
            self.insert(holiday);
        }
    }
}

/// Calendar years touched by `range`, ascending.
pub fn years_spanned(range: &DateRange) -> Vec<i32> {
    (range.start().year()..=range.end().year()).collect()
}

/// Tests every day of `range` (inclusive) against `index`.
pub fn scan_conflicts(range: &DateRange, index: &HolidayIndex) -> ConflictResult {
    let reasons = range
        .dates()
        .flat_map(|date| index.names_on(date).iter().cloned())
        .collect();
    ConflictResult::from_reasons(reasons)
}
