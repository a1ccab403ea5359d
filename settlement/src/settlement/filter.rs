//! Date filters and the windows they select

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Days, TimeZone};
use serde::{Deserialize, Serialize};

use crate::utils::time::{day_start_millis, start_of_today};
use crate::utils::{AppError, AppResult};

/// Caller-selected reporting window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DateFilter {
    #[serde(rename = "TODAY")]
    Today,
    #[serde(rename = "YESTERDAY")]
    Yesterday,
    #[serde(rename = "LAST_7_DAYS")]
    Last7Days,
    #[serde(rename = "LAST_30_DAYS")]
    Last30Days,
    #[default]
    #[serde(rename = "ALL_TIME")]
    AllTime,
}

impl DateFilter {
    pub const ALL: [DateFilter; 5] = [
        Self::Today,
        Self::Yesterday,
        Self::Last7Days,
        Self::Last30Days,
        Self::AllTime,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Today => "TODAY",
            Self::Yesterday => "YESTERDAY",
            Self::Last7Days => "LAST_7_DAYS",
            Self::Last30Days => "LAST_30_DAYS",
            Self::AllTime => "ALL_TIME",
        }
    }

    /// Trailing day count for the rolling windows
    pub fn trailing_days(&self) -> Option<u64> {
        match self {
            Self::Last7Days => Some(7),
            Self::Last30Days => Some(30),
            _ => None,
        }
    }

    /// Resolve the window relative to `now`, in `now`'s time zone.
    ///
    /// - TODAY: `[local midnight, now]`
    /// - YESTERDAY: `[previous local midnight, local midnight)`
    /// - LAST_7_DAYS / LAST_30_DAYS: `[now - N calendar days, now]`
    /// - ALL_TIME: unbounded
    pub fn window<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> TimeWindow {
        let now_ms = now.timestamp_millis();
        match self {
            Self::Today => TimeWindow::closed(start_of_today(now), now_ms),
            Self::Yesterday => {
                let today = now.date_naive();
                let yesterday = today.pred_opt().unwrap_or(today);
                TimeWindow::half_open(
                    day_start_millis(yesterday, &now.timezone()),
                    start_of_today(now),
                )
            }
            Self::Last7Days | Self::Last30Days => {
                let days = self.trailing_days().unwrap_or(0);
                let start = now
                    .clone()
                    .checked_sub_days(Days::new(days))
                    .map(|dt| dt.timestamp_millis())
                    .unwrap_or(now_ms - days as i64 * 86_400_000);
                TimeWindow::closed(start, now_ms)
            }
            Self::AllTime => TimeWindow::unbounded(),
        }
    }
}

impl fmt::Display for DateFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DateFilter {
    type Err = AppError;

    /// Accepts the wire names and the console's short forms
    /// (`today`, `yesterday`, `7days`, `30days`, `all`).
    fn from_str(s: &str) -> AppResult<Self> {
        let normalized = s.trim().to_ascii_uppercase().replace('-', "_");
        match normalized.as_str() {
            "TODAY" => Ok(Self::Today),
            "YESTERDAY" => Ok(Self::Yesterday),
            "LAST_7_DAYS" | "7DAYS" => Ok(Self::Last7Days),
            "LAST_30_DAYS" | "30DAYS" => Ok(Self::Last30Days),
            "ALL_TIME" | "ALL" => Ok(Self::AllTime),
            _ => Err(AppError::validation(format!("Unknown date filter '{}'", s))
                .with_detail("value", s)),
        }
    }
}

/// Millisecond window; `None` bounds are open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeWindow {
    pub start: Option<i64>,
    pub end: Option<i64>,
    /// `end` itself is outside the window
    pub end_exclusive: bool,
}

impl TimeWindow {
    pub fn closed(start: i64, end: i64) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
            end_exclusive: false,
        }
    }

    pub fn half_open(start: i64, end: i64) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
            end_exclusive: true,
        }
    }

    pub fn unbounded() -> Self {
        Self {
            start: None,
            end: None,
            end_exclusive: false,
        }
    }

    pub fn contains(&self, millis: i64) -> bool {
        let after_start = self.start.is_none_or(|s| millis >= s);
        let before_end = match self.end {
            None => true,
            Some(e) if self.end_exclusive => millis < e,
            Some(e) => millis <= e,
        };
        after_start && before_end
    }
}
