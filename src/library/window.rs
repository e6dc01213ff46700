//! Date range planning.

use std::fmt;

use chrono::{DateTime, Days, Duration, Local, NaiveDate};

use crate::config::WindowStrategy;

/// A `(start, end)` pair used to query the recording library.
///
/// The library is queried by calendar day, so a window selects every local
/// date from `start`'s to `end`'s, inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: DateTime<Local>,
    pub end: DateTime<Local>,
}

impl DateWindow {
    pub fn new(start: DateTime<Local>, end: DateTime<Local>) -> Self {
        debug_assert!(start <= end, "window start after end");
        Self { start, end }
    }

    /// First calendar day covered.
    pub fn start_date(&self) -> NaiveDate {
        self.start.date_naive()
    }

    /// Last calendar day covered.
    pub fn end_date(&self) -> NaiveDate {
        self.end.date_naive()
    }

    /// Whether the window covers exactly one calendar day.
    pub fn is_single_day(&self) -> bool {
        self.start_date() == self.end_date()
    }
}

impl fmt::Display for DateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_single_day() {
            write!(f, "{}", self.start_date())
        } else {
            write!(f, "{} to {}", self.start_date(), self.end_date())
        }
    }
}

/// Plan the windows covering `[now - days, now]`.
///
/// Windows are yielded lazily, newest first.
pub fn plan_windows(days: u32, now: DateTime<Local>, strategy: WindowStrategy) -> DateWindows {
    DateWindows {
        now,
        days,
        strategy,
        next: 0,
    }
}

/// `now` moved back by whole calendar days.
fn days_before(now: DateTime<Local>, days: u32) -> DateTime<Local> {
    // Falls back to fixed 24h steps when the local time does not exist
    // on the target day (DST gap).
    now.checked_sub_days(Days::new(u64::from(days)))
        .unwrap_or_else(|| now - Duration::days(i64::from(days)))
}

/// Iterator over the planned windows. Consumed once per run.
#[derive(Debug, Clone)]
pub struct DateWindows {
    now: DateTime<Local>,
    days: u32,
    strategy: WindowStrategy,
    next: u32,
}

impl DateWindows {
    fn total(&self) -> u32 {
        match self.strategy {
            WindowStrategy::Single => 1,
            WindowStrategy::Daily => self.days.saturating_add(1),
        }
    }
}

impl Iterator for DateWindows {
    type Item = DateWindow;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.total() {
            return None;
        }

        let window = match self.strategy {
            WindowStrategy::Single => {
                DateWindow::new(days_before(self.now, self.days), self.now)
            }
            WindowStrategy::Daily => {
                let day = days_before(self.now, self.next);
                DateWindow::new(day, day)
            }
        };

        self.next += 1;
        Some(window)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.total().saturating_sub(self.next) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for DateWindows {}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn noon(y: i32, m: u32, d: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_daily_two_days_yields_three_windows() {
        let now = noon(2024, 3, 10);
        let windows: Vec<_> = plan_windows(2, now, WindowStrategy::Daily).collect();

        assert_eq!(windows.len(), 3);
        assert!(windows.iter().all(DateWindow::is_single_day));

        let dates: Vec<_> = windows.iter().map(DateWindow::start_date).collect();
        assert_eq!(
            dates,
            vec![
                NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
                NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
                NaiveDate::from_ymd_opt(2024, 3, 8).unwrap(),
            ]
        );
    }

    #[test]
    fn test_single_window_spans_range() {
        let now = noon(2024, 3, 10);
        let windows: Vec<_> = plan_windows(7, now, WindowStrategy::Single).collect();

        assert_eq!(windows.len(), 1);
        assert_eq!(windows[0].end, now);
        assert_eq!(
            windows[0].start_date(),
            NaiveDate::from_ymd_opt(2024, 3, 3).unwrap()
        );
        assert!(windows[0].start < windows[0].end);
    }

    #[test]
    fn test_zero_days_is_today_only() {
        let now = noon(2024, 1, 1);
        for strategy in [WindowStrategy::Daily, WindowStrategy::Single] {
            let windows: Vec<_> = plan_windows(0, now, strategy).collect();
            assert_eq!(windows, vec![DateWindow::new(now, now)]);
        }
    }

    #[test]
    fn test_crosses_month_boundary() {
        let now = noon(2024, 3, 1);
        let last = plan_windows(1, now, WindowStrategy::Daily).last().unwrap();
        assert_eq!(last.start_date(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    }

    #[test]
    fn test_size_hint_tracks_progress() {
        let mut windows = plan_windows(3, noon(2024, 1, 10), WindowStrategy::Daily);
        assert_eq!(windows.len(), 4);
        windows.next();
        assert_eq!(windows.len(), 3);
    }

    #[test]
    fn test_display() {
        let now = noon(2024, 3, 10);
        assert_eq!(DateWindow::new(now, now).to_string(), "2024-03-10");
        let single = plan_windows(2, now, WindowStrategy::Single).next().unwrap();
        assert_eq!(single.to_string(), "2024-03-08 to 2024-03-10");
    }
}
