use crate::models::Exercise;
use chrono::{DateTime, Days, Local, NaiveDate, TimeZone};
use serde::Serialize;
use std::{collections::BTreeMap, fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeRange {
    #[default]
    Week,
    Month,
    Year,
}

impl TimeRange {
    pub const ALL: [TimeRange; 3] = [TimeRange::Week, TimeRange::Month, TimeRange::Year];

    /// Days covered before today; the window also includes today itself.
    pub fn days(self) -> u64 {
        match self {
            TimeRange::Week => 7,
            TimeRange::Month => 30,
            TimeRange::Year => 365,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TimeRange::Week => "Last 7 days",
            TimeRange::Month => "Last 30 days",
            TimeRange::Year => "Last 365 days",
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TimeRange::Week => "week",
            TimeRange::Month => "month",
            TimeRange::Year => "year",
        })
    }
}

impl FromStr for TimeRange {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "week" => Ok(TimeRange::Week),
            "month" => Ok(TimeRange::Month),
            "year" => Ok(TimeRange::Year),
            other => Err(format!("unknown range '{other}', expected week, month or year")),
        }
    }
}

/// Total minutes logged on one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DurationBucket {
    pub date: NaiveDate,
    pub label: String,
    pub minutes: u64,
    /// Bar height relative to the busiest day, 0-100.
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Summary {
    pub count: usize,
    pub total_minutes: u64,
    pub average_minutes: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressReport {
    pub range: TimeRange,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub series: Vec<DurationBucket>,
    pub summary: Summary,
}

pub fn aggregate(exercises: &[Exercise], range: TimeRange) -> ProgressReport {
    aggregate_at(exercises, range, &Local::now())
}

/// Buckets the exercises dated inside `range` (ending on `now`'s calendar day
/// in `now`'s time zone) and summarizes the whole list.
///
/// The summary covers every exercise passed in, not just the window.
pub fn aggregate_at<Tz: TimeZone>(
    exercises: &[Exercise],
    range: TimeRange,
    now: &DateTime<Tz>,
) -> ProgressReport {
    let zone = now.timezone();
    let end = now.date_naive();
    let start = end
        .checked_sub_days(Days::new(range.days()))
        .unwrap_or(NaiveDate::MIN);

    let mut days: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    for exercise in exercises {
        let day = exercise.date.with_timezone(&zone).date_naive();
        if day < start || day > end {
            continue;
        }
        *days.entry(day).or_default() += u64::from(exercise.duration);
    }

    let busiest = days.values().copied().max().unwrap_or(0).max(1);
    let series = days
        .into_iter()
        .map(|(date, minutes)| DurationBucket {
            label: day_label(date),
            height: minutes as f64 / busiest as f64 * 100.0,
            date,
            minutes,
        })
        .collect();

    ProgressReport {
        range,
        start,
        end,
        series,
        summary: summarize(exercises),
    }
}

pub fn summarize(exercises: &[Exercise]) -> Summary {
    let count = exercises.len();
    let total_minutes: u64 = exercises.iter().map(|e| u64::from(e.duration)).sum();
    let average_minutes = if count == 0 {
        0
    } else {
        (total_minutes as f64 / count as f64).round() as u64
    };

    Summary {
        count,
        total_minutes,
        average_minutes,
    }
}

pub fn day_label(date: NaiveDate) -> String {
    date.format("%b %-d").to_string()
}
