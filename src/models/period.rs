//! Budget period representation
//!
//! A period is a calendar year and month. Which month a timestamp belongs to
//! depends on the zone used to read its calendar components, so matching goes
//! through [`CalendarZone`].

use chrono::{DateTime, Datelike, Local, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Zone whose calendar is used to derive year/month components
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CalendarZone {
    /// The system's local time zone
    #[default]
    Local,
    /// Coordinated universal time, independent of the host
    Utc,
}

impl CalendarZone {
    /// Calendar (year, month) of a timestamp as seen in this zone
    pub fn year_month(self, date: &DateTime<Utc>) -> (i32, u32) {
        match self {
            Self::Local => {
                let local = date.with_timezone(&Local);
                (local.year(), local.month())
            }
            Self::Utc => (date.year(), date.month()),
        }
    }

    /// Calendar date of a timestamp as seen in this zone
    pub fn date_of(self, date: &DateTime<Utc>) -> NaiveDate {
        match self {
            Self::Local => date.with_timezone(&Local).date_naive(),
            Self::Utc => date.date_naive(),
        }
    }

    /// Midnight at the start of `date` in this zone, as a UTC timestamp
    pub fn start_of_day(self, date: NaiveDate) -> DateTime<Utc> {
        let naive = date.and_time(chrono::NaiveTime::MIN);
        match self {
            // A DST gap at midnight has no local instant; fall back to UTC
            Self::Local => Local
                .from_local_datetime(&naive)
                .earliest()
                .map(|dt| dt.with_timezone(&Utc))
                .unwrap_or_else(|| naive.and_utc()),
            Self::Utc => naive.and_utc(),
        }
    }
}

impl fmt::Display for CalendarZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => write!(f, "local"),
            Self::Utc => write!(f, "utc"),
        }
    }
}

/// A calendar year and month (e.g., "2025-06")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Period {
    year: i32,
    month: u32,
}

impl Period {
    /// Create a period, rejecting months outside 1..=12
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    /// The period containing the current moment in `zone`
    pub fn current(zone: CalendarZone) -> Self {
        Self::containing(&Utc::now(), zone)
    }

    /// The period containing `date` in `zone`
    pub fn containing(date: &DateTime<Utc>, zone: CalendarZone) -> Self {
        let (year, month) = zone.year_month(date);
        Self { year, month }
    }

    /// Whether `date` falls in this period's calendar year and month in `zone`
    pub fn contains(&self, date: &DateTime<Utc>, zone: CalendarZone) -> bool {
        zone.year_month(date) == (self.year, self.month)
    }

    /// Get the next period
    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// Get the previous period
    pub fn prev(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// Parse a period string in `YYYY-MM` form
    pub fn parse(s: &str) -> Result<Self, PeriodParseError> {
        let s = s.trim();
        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| PeriodParseError::InvalidFormat(s.to_string()))?;

        let year: i32 = year
            .parse()
            .map_err(|_| PeriodParseError::InvalidFormat(s.to_string()))?;
        let month: u32 = month
            .parse()
            .map_err(|_| PeriodParseError::InvalidFormat(s.to_string()))?;

        Self::new(year, month).ok_or(PeriodParseError::InvalidMonth(month))
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Error type for period parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeriodParseError {
    InvalidFormat(String),
    InvalidMonth(u32),
}

impl fmt::Display for PeriodParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodParseError::InvalidFormat(s) => write!(f, "Invalid period format: {}", s),
            PeriodParseError::InvalidMonth(m) => write!(f, "Invalid month: {}", m),
        }
    }
}

impl std::error::Error for PeriodParseError {}
