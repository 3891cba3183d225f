// src/index/mod.rs

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

/// Half-hour periods in a calendar day.
pub const HH_PER_DAY: usize = 48;

/// First timestamp of every generated index: `2020-01-01 00:00:00`.
pub fn anchor() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2020, 1, 1)
        .expect("2020-01-01 is a valid date")
        .and_time(NaiveTime::MIN)
}

/// `periods` evenly spaced timestamps starting at `start`, `step` apart.
///
/// Stops early if the range runs off the end of chrono's calendar, so
/// callers that care about the length must check it.
pub fn date_range(start: NaiveDateTime, periods: usize, step: Duration) -> Vec<NaiveDateTime> {
    std::iter::successors(Some(start), |t| t.checked_add_signed(step))
        .take(periods)
        .collect()
}

/// Every half-hour over `n_days` days, stacked into one vector.
pub fn flat_index(n_days: usize) -> Vec<NaiveDateTime> {
    date_range(anchor(), n_days * HH_PER_DAY, Duration::minutes(30))
}

/// One timestamp per day.
pub fn square_index(n_days: usize) -> Vec<NaiveDateTime> {
    date_range(anchor(), n_days, Duration::days(1))
}
