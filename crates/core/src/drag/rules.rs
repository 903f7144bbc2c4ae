//! Pure range mutation rules.
//!
//! Rejected candidates are silently ignored, never clamped: the caller keeps its
//! current range for that frame.

use chrono::NaiveDate;

use super::DragMode;
use crate::calendar::DateRange;

/// Computes the candidate range for dropping the dragged handle on `target`.
///
/// Returns `None` when the candidate is rejected:
/// - `ResizeStart` requires `target < current.end`.
/// - `ResizeEnd` requires `target > current.start`.
/// - `Move` requires `target >= today` and `target >= original.start`; the
///   candidate keeps the original length.
pub fn resolve(
    mode: DragMode,
    original: &DateRange,
    current: &DateRange,
    target: NaiveDate,
    today: NaiveDate,
) -> Option<DateRange> {
    match mode {
        DragMode::ResizeStart => {
            if target >= current.end() {
                return None;
            }
            DateRange::new(target, current.end()).ok()
        }
        DragMode::ResizeEnd => {
            if target <= current.start() {
                return None;
            }
            DateRange::new(current.start(), target).ok()
        }
        DragMode::Move => {
            if target < today || target < original.start() {
                return None;
            }
            DateRange::starting_at(target, original.days()).ok()
        }
    }
}

/// Like [`resolve`], but falls back to `current` when the candidate is rejected.
pub fn apply(
    mode: DragMode,
    original: &DateRange,
    current: &DateRange,
    target: NaiveDate,
    today: NaiveDate,
) -> DateRange {
    resolve(mode, original, current, target, today).unwrap_or(*current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn range(start: NaiveDate, end: NaiveDate) -> DateRange {
        DateRange::new(start, end).unwrap()
    }

    fn original() -> DateRange {
        range(date(2025, 3, 10), date(2025, 3, 12))
    }

    fn today() -> NaiveDate {
        date(2025, 2, 1)
    }

    #[test]
    fn test_resize_end_extends_range() {
        let o = original();
        let candidate = resolve(DragMode::ResizeEnd, &o, &o, date(2025, 3, 15), today());

        assert_eq!(candidate, Some(range(date(2025, 3, 10), date(2025, 3, 15))));
        assert_eq!(candidate.unwrap().days(), 6);
    }

    #[test]
    fn test_resize_end_rejects_target_at_or_before_start() {
        let o = original();

        assert_eq!(resolve(DragMode::ResizeEnd, &o, &o, date(2025, 3, 10), today()), None);
        assert_eq!(resolve(DragMode::ResizeEnd, &o, &o, date(2025, 3, 1), today()), None);
    }

    #[test]
    fn test_resize_start_moves_start_only() {
        let o = original();
        let candidate = resolve(DragMode::ResizeStart, &o, &o, date(2025, 3, 3), today());

        assert_eq!(candidate, Some(range(date(2025, 3, 3), date(2025, 3, 12))));
    }

    #[test]
    fn test_resize_start_rejects_target_at_or_after_end() {
        let o = original();

        assert_eq!(resolve(DragMode::ResizeStart, &o, &o, date(2025, 3, 12), today()), None);
        assert_eq!(resolve(DragMode::ResizeStart, &o, &o, date(2025, 3, 20), today()), None);
    }

    #[test]
    fn test_resize_is_relative_to_current_range() {
        let o = original();
        let current = range(date(2025, 3, 10), date(2025, 3, 11));

        // The end already moved in; a start beyond it is rejected even though
        // it lies before the original end.
        assert_eq!(
            resolve(DragMode::ResizeStart, &o, &current, date(2025, 3, 11), today()),
            None
        );
    }

    #[test]
    fn test_move_keeps_duration() {
        let o = original();
        let candidate = resolve(DragMode::Move, &o, &o, date(2025, 3, 28), today()).unwrap();

        assert_eq!(candidate, range(date(2025, 3, 28), date(2025, 3, 30)));
        assert_eq!(candidate.days(), o.days());
    }

    #[test]
    fn test_move_rejects_earlier_than_original_start() {
        let o = original();

        // Future, but earlier than the original start.
        assert_eq!(resolve(DragMode::Move, &o, &o, date(2025, 3, 5), today()), None);
        assert_eq!(apply(DragMode::Move, &o, &o, date(2025, 3, 5), today()), o);
    }

    #[test]
    fn test_move_rejects_past_dates() {
        let o = original();
        let later_today = date(2025, 3, 20);

        assert_eq!(resolve(DragMode::Move, &o, &o, date(2025, 3, 15), later_today), None);
        assert!(resolve(DragMode::Move, &o, &o, later_today, later_today).is_some());
    }

    #[test]
    fn test_apply_is_idempotent_under_invalid_input() {
        let o = original();
        let once = apply(DragMode::ResizeEnd, &o, &o, date(2025, 3, 9), today());
        let twice = apply(DragMode::ResizeEnd, &o, &once, date(2025, 3, 9), today());

        assert_eq!(once, o);
        assert_eq!(twice, o);
    }

    fn day(offset: i64) -> NaiveDate {
        date(2025, 1, 1) + chrono::Duration::days(offset)
    }

    fn any_mode() -> impl Strategy<Value = DragMode> {
        prop_oneof![
            Just(DragMode::ResizeStart),
            Just(DragMode::ResizeEnd),
            Just(DragMode::Move),
        ]
    }

    proptest! {
        #[test]
        fn rules_keep_every_range_valid(
            mode in any_mode(),
            start in 0i64..365,
            length in 0i64..14,
            today in 0i64..400,
            targets in prop::collection::vec(0i64..400, 1..40),
        ) {
            let original = range(day(start), day(start + length));
            let today = day(today);
            let mut current = original;

            for target in targets {
                current = apply(mode, &original, &current, day(target), today);

                prop_assert!(current.start() <= current.end());
                match mode {
                    DragMode::ResizeStart => {
                        prop_assert_eq!(current.end(), original.end());
                    }
                    DragMode::ResizeEnd => {
                        prop_assert_eq!(current.start(), original.start());
                    }
                    DragMode::Move => {
                        prop_assert_eq!(current.days(), original.days());
                        prop_assert!(
                            current == original || current.start() >= today.max(original.start())
                        );
                    }
                }
            }
        }

        #[test]
        fn returning_to_grabbed_day_restores_original(
            mode in any_mode(),
            start in 30i64..365,
            length in 1i64..14,
            days_ahead in 0i64..30,
            targets in prop::collection::vec(0i64..400, 0..40),
        ) {
            let original = range(day(start), day(start + length));
            let today = day(start - days_ahead);
            let grabbed = match mode {
                DragMode::ResizeEnd => original.end(),
                DragMode::ResizeStart | DragMode::Move => original.start(),
            };

            let mut current = original;
            for target in targets {
                current = apply(mode, &original, &current, day(target), today);
            }

            prop_assert_eq!(apply(mode, &original, &current, grabbed, today), original);
        }
    }
}
