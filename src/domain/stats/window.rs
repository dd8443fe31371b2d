//! Calendar-month windows for month-over-month comparison.

use chrono::{DateTime, Datelike, Local, NaiveDate, TimeZone, Utc};
use serde::Serialize;

/// Half-open time interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Window {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Window {
    /// True when `instant` lies within `[start, end)`.
    #[must_use]
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }
}

/// Boundaries of the current and previous calendar months.
///
/// Recomputed from "now" on every use so the windows slide with real time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthWindows {
    pub now: DateTime<Utc>,
    pub start_of_month: DateTime<Utc>,
    pub start_of_previous_month: DateTime<Utc>,
    /// Exclusive end of the previous month, equal to `start_of_month`.
    pub end_of_previous_month: DateTime<Utc>,
}

impl MonthWindows {
    /// Windows for `now`, with month boundaries at local midnight in `now`'s zone.
    pub fn for_instant<Tz: TimeZone>(now: &DateTime<Tz>) -> Self {
        let zone = now.timezone();
        let local = now.naive_local().date();

        let this_month = first_of_month(local.year(), local.month());
        let previous_month = if local.month() == 1 {
            first_of_month(local.year() - 1, 12)
        } else {
            first_of_month(local.year(), local.month() - 1)
        };

        let start_of_month = local_midnight(&zone, this_month);
        Self {
            now: now.with_timezone(&Utc),
            start_of_month,
            start_of_previous_month: local_midnight(&zone, previous_month),
            end_of_previous_month: start_of_month,
        }
    }

    /// Windows for the current wall-clock time in the process time zone.
    #[must_use]
    pub fn now_local() -> Self {
        Self::for_instant(&Local::now())
    }

    /// `[start_of_month, now)`.
    #[must_use]
    pub fn current(&self) -> Window {
        Window {
            start: self.start_of_month,
            end: self.now,
        }
    }

    /// `[start_of_previous_month, start_of_month)`.
    #[must_use]
    pub fn previous(&self) -> Window {
        Window {
            start: self.start_of_previous_month,
            end: self.end_of_previous_month,
        }
    }
}

fn first_of_month(year: i32, month: u32) -> NaiveDate {
    // Day 1 exists in every month of every representable year.
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(NaiveDate::MIN)
}

/// Midnight at the start of `date` in `zone`.
///
/// A midnight skipped by a DST jump falls back to the same wall time read as UTC.
fn local_midnight<Tz: TimeZone>(zone: &Tz, date: NaiveDate) -> DateTime<Utc> {
    let midnight = date.and_time(chrono::NaiveTime::default());
    match zone.from_local_datetime(&midnight).earliest() {
        Some(instant) => instant.with_timezone(&Utc),
        None => Utc.from_utc_datetime(&midnight),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn utc(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn january_rolls_back_to_december() {
        let windows = MonthWindows::for_instant(&utc(2024, 1, 15, 12));
        assert_eq!(windows.start_of_month, utc(2024, 1, 1, 0));
        assert_eq!(windows.start_of_previous_month, utc(2023, 12, 1, 0));
        assert_eq!(windows.end_of_previous_month, utc(2024, 1, 1, 0));
    }

    #[test]
    fn mid_year_month() {
        let windows = MonthWindows::for_instant(&utc(2025, 7, 3, 8));
        assert_eq!(windows.start_of_month, utc(2025, 7, 1, 0));
        assert_eq!(windows.start_of_previous_month, utc(2025, 6, 1, 0));
    }

    #[test]
    fn boundaries_are_local_midnight() {
        let ist = FixedOffset::east_opt(5 * 3600 + 1800).unwrap();
        let now = ist.with_ymd_and_hms(2024, 3, 10, 9, 0, 0).unwrap();
        let windows = MonthWindows::for_instant(&now);
        // 2024-03-01T00:00+05:30
        assert_eq!(
            windows.start_of_month,
            Utc.with_ymd_and_hms(2024, 2, 29, 18, 30, 0).unwrap()
        );
    }

    #[test]
    fn previous_window_precedes_current_and_is_disjoint() {
        let windows = MonthWindows::for_instant(&utc(2024, 3, 1, 0));
        let previous = windows.previous();
        let current = windows.current();
        assert!(previous.end <= current.start);
        assert!(previous.start < previous.end);
        assert!(!previous.contains(current.start));
    }

    #[test]
    fn window_is_half_open() {
        let window = Window {
            start: utc(2024, 1, 1, 0),
            end: utc(2024, 2, 1, 0),
        };
        assert!(window.contains(utc(2024, 1, 1, 0)));
        assert!(window.contains(utc(2024, 1, 31, 23)));
        assert!(!window.contains(utc(2024, 2, 1, 0)));
    }
}
