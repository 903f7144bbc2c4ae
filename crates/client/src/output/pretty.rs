//! Pretty output formatting.

use leavecal_core::calendar::{DateRange, LeaveEvent};
use leavecal_core::feedback::duration_caption;
use leavecal_core::holiday::{ConflictResult, Holiday};

/// Format a holiday for display.
pub fn format_holiday(holiday: &Holiday) -> String {
    format!("{}  {}", holiday.date, holiday.name)
}

/// Format holidays for display.
pub fn format_holidays(year: i32, holidays: &[Holiday]) -> String {
    if holidays.is_empty() {
        return format!("No holidays found for {year}.");
    }
    let mut output = format!("HOLIDAYS {year} ({})\n", holidays.len());
    output.push_str(&"-".repeat(40));
    for holiday in holidays {
        output.push_str(&format!("\n{}", format_holiday(holiday)));
    }
    output
}

/// Format a conflict check for display.
pub fn format_conflicts(range: &DateRange, result: &ConflictResult) -> String {
    let header = format!(
        "{} to {} ({})",
        range.start(),
        range.end(),
        duration_caption(range.days())
    );
    if result.blocked {
        format!("{header}\n  Blocked: {}", result.message())
    } else {
        format!("{header}\n  No holiday conflicts")
    }
}

/// Format a leave event for display.
pub fn format_event(event: &LeaveEvent) -> String {
    format!(
        "{}\n  ID: {}\n  Dates: {} to {} ({})",
        event.title,
        event.id,
        event.range.start(),
        event.range.end(),
        duration_caption(event.range.days())
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_format_holidays() {
        assert_eq!(format_holidays(2025, &[]), "No holidays found for 2025.");

        let output = format_holidays(2025, &[Holiday::new(date(2025, 12, 25), "Christmas Day")]);
        assert!(output.starts_with("HOLIDAYS 2025 (1)"));
        assert!(output.ends_with("2025-12-25  Christmas Day"));
    }

    #[test]
    fn test_format_conflicts() {
        let range = DateRange::new(date(2025, 12, 22), date(2025, 12, 26)).unwrap();
        let blocked = ConflictResult::from_reasons(vec!["Christmas Day".to_string()]);

        assert_eq!(
            format_conflicts(&range, &blocked),
            "2025-12-22 to 2025-12-26 (5 days)\n  Blocked: Cannot schedule leave during holidays: Christmas Day"
        );
        assert_eq!(
            format_conflicts(&range, &ConflictResult::clear()),
            "2025-12-22 to 2025-12-26 (5 days)\n  No holiday conflicts"
        );
    }

    #[test]
    fn test_format_event() {
        let event = LeaveEvent::new("7", "Annual leave", DateRange::single(date(2025, 3, 10)));

        assert_eq!(
            format_event(&event),
            "Annual leave\n  ID: 7\n  Dates: 2025-03-10 to 2025-03-10 (1 day)"
        );
    }
}
