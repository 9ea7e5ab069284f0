//! Due-date filters and the time windows they select.
//!
//! Windows are half-open `[start, end)` ranges expressed in UTC. Day and
//! week boundaries are computed in the time zone of the supplied "now", so
//! callers pass local time to get local midnights.

use super::InvalidFilterError;
use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveTime, TimeDelta, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Named due-date filter accepted by task listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DueFilter {
    /// Tasks due during the current local day.
    Today,
    /// Tasks due during the current Sunday-anchored week.
    Week,
    /// Active tasks whose due date has passed.
    Overdue,
}

impl DueFilter {
    /// Returns the canonical filter name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Today => "today",
            Self::Week => "week",
            Self::Overdue => "overdue",
        }
    }
}

impl TryFrom<&str> for DueFilter {
    type Error = InvalidFilterError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "today" => Ok(Self::Today),
            "week" => Ok(Self::Week),
            "overdue" => Ok(Self::Overdue),
            _ => Err(InvalidFilterError(value.to_owned())),
        }
    }
}

impl fmt::Display for DueFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Half-open time range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DueWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl DueWindow {
    /// Creates a window from explicit bounds.
    #[must_use]
    pub const fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Returns the window covering the calendar day of `now`.
    #[must_use]
    pub fn today<Tz: TimeZone>(now: &DateTime<Tz>) -> Self {
        let start = start_of_day(&now.timezone(), now.date_naive());
        Self::new(start, start + TimeDelta::hours(24))
    }

    /// Returns the seven-day window starting at the Sunday midnight on or
    /// before `now`.
    #[must_use]
    pub fn this_week<Tz: TimeZone>(now: &DateTime<Tz>) -> Self {
        let date = now.date_naive();
        let back = Days::new(u64::from(now.weekday().num_days_from_sunday()));
        let sunday = date.checked_sub_days(back).unwrap_or(date);
        let start = start_of_day(&now.timezone(), sunday);
        Self::new(start, start + TimeDelta::days(7))
    }

    /// Returns the window of everything due before `now`, floored at the
    /// Unix epoch.
    #[must_use]
    pub const fn overdue(now: DateTime<Utc>) -> Self {
        Self::new(DateTime::<Utc>::UNIX_EPOCH, now)
    }

    /// Returns the inclusive lower bound.
    #[must_use]
    pub const fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Returns the exclusive upper bound.
    #[must_use]
    pub const fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Returns `true` when `instant` lies in `[start, end)`.
    #[must_use]
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }
}

/// Resolves local midnight of `date` in `tz` as a UTC instant.
///
/// Where a DST gap swallows midnight, the first valid instant of the day is
/// used instead.
fn start_of_day<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> DateTime<Utc> {
    let midnight = date.and_time(NaiveTime::MIN);
    tz.from_local_datetime(&midnight)
        .earliest()
        .or_else(|| {
            tz.from_local_datetime(&(midnight + TimeDelta::hours(1)))
                .earliest()
        })
        .map_or_else(
            || tz.from_utc_datetime(&midnight).with_timezone(&Utc),
            |local| local.with_timezone(&Utc),
        )
}
