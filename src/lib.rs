//! Period day selection for cycle tracking.
//!
//! A user taps the calendar days of their last period. [`SelectionState`]
//! keeps those days as one contiguous run capped at [`MaxRun`], and
//! [`CycleConfig::derive`] turns a finished selection plus a picked
//! [`CycleLength`] into the values sent to a profile backend.

pub mod calendar;
pub mod config;
mod consts;
pub mod cycle;
mod prelude;
pub mod selection;
pub mod session;
pub mod submission;
mod types;

pub use calendar::{CellState, DateProvider, FixedDateProvider, MonthGrid, SystemDateProvider};
pub use config::{ConfigError, SelectionMode, SelectorConfig};
pub use consts::*;
pub use cycle::{CycleConfig, CycleError, CycleLength};
pub use selection::{MaxRun, RangeSelection, SelectionError, SelectionState};
pub use session::{CycleSession, SessionError};
pub use submission::{SubmissionError, SubmissionState, error_message};
pub use types::{Day, Month, Weekday, Year, days_in_month, is_leap_year};

use crate::prelude::*;
use std::str::FromStr;
use types::{civil_from_days, days_from_civil};

/// A calendar day with no time component.
///
/// Field order makes the derived ordering chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{:04}-{:02}-{:02}", "year.get()", "month.get()", "day.get()")]
pub struct CalendarDate {
    year:  Year,
    month: Month,
    day:   Day,
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Invalid date format: {_0}")]
    InvalidFormat(String),
    #[display(fmt = "Invalid year: {} (must be 1-{})", "_0", MAX_YEAR)]
    InvalidYear(u16),
    #[display(fmt = "Invalid month: {} (must be 1-{})", "_0", MAX_MONTH)]
    InvalidMonth(u8),
    #[display(fmt = "Invalid day {day} for month {year}-{month:02}")]
    InvalidDay { month: u8, day: u8, year: u16 },
    #[display(fmt = "Empty date string")]
    EmptyInput,
}

impl std::error::Error for ParseError {}

impl CalendarDate {
    /// 0001-01-01
    pub const MIN: Self = Self {
        year:  Year::MIN,
        month: Month::JANUARY,
        day:   Day::FIRST,
    };
    /// 9999-12-31
    pub const MAX: Self = Self {
        year:  Year::MAX,
        month: Month::DECEMBER,
        day:   Day::LAST_OF_DECEMBER,
    };

    /// Creates a validated date.
    ///
    /// # Errors
    /// Returns `ParseError` if any component is out of range for the calendar.
    pub fn new(year: u16, month: u8, day: u8) -> Result<Self, ParseError> {
        Ok(Self {
            year:  Year::new(year)?,
            month: Month::new(month)?,
            day:   Day::new(day, year, month)?,
        })
    }

    /// First day of the given month
    ///
    /// # Errors
    /// Returns `ParseError` if the year or month is invalid.
    pub fn first_of_month(year: Year, month: Month) -> Result<Self, ParseError> {
        Self::new(year.get(), month.get(), MIN_DAY)
    }

    pub const fn year(&self) -> Year {
        self.year
    }

    pub const fn month(&self) -> Month {
        self.month
    }

    pub const fn day(&self) -> Day {
        self.day
    }

    /// Components as plain integers: (year, month, day)
    pub const fn to_tuple(&self) -> (u16, u8, u8) {
        (self.year.get(), self.month.get(), self.day.get())
    }

    /// Days since 1970-01-01 (negative before).
    pub const fn epoch_days(&self) -> i64 {
        days_from_civil(self.year.get(), self.month.get(), self.day.get())
    }

    /// Date for a count of days since 1970-01-01.
    /// Returns `None` outside years `1..=MAX_YEAR`.
    pub fn from_epoch_days(days: i64) -> Option<Self> {
        if !(Self::MIN.epoch_days()..=Self::MAX.epoch_days()).contains(&days) {
            return None;
        }
        let (year, month, day) = civil_from_days(days);
        let year = u16::try_from(year).ok()?;
        Self::new(year, month, day).ok()
    }

    /// Signed number of days from `self` to `other`.
    pub const fn days_until(&self, other: &Self) -> i64 {
        other.epoch_days() - self.epoch_days()
    }

    /// Shifts the date by a signed number of days.
    /// Returns `None` if the result leaves years `1..=MAX_YEAR`.
    pub fn add_days(&self, days: i64) -> Option<Self> {
        Self::from_epoch_days(self.epoch_days().checked_add(days)?)
    }

    /// The following day, rolling over month and year ends.
    pub fn succ(&self) -> Option<Self> {
        let (year, month, day) = self.to_tuple();
        if day < days_in_month(year, month) {
            return Self::new(year, month, day + 1).ok();
        }
        if month < DECEMBER {
            return Self::new(year, month + 1, MIN_DAY).ok();
        }
        // MAX_YEAR-12-31 has no successor
        Self::new(year.checked_add(1)?, JANUARY, MIN_DAY).ok()
    }

    /// The preceding day, rolling back over month and year starts.
    pub fn pred(&self) -> Option<Self> {
        let (year, month, day) = self.to_tuple();
        if day > MIN_DAY {
            return Self::new(year, month, day - 1).ok();
        }
        if month > JANUARY {
            return Self::new(year, month - 1, days_in_month(year, month - 1)).ok();
        }
        Self::new(year.checked_sub(1)?, DECEMBER, DECEMBER_DAYS).ok()
    }

    pub fn weekday(&self) -> Weekday {
        Weekday::from_epoch_days(self.epoch_days())
    }

    /// Helper to parse u16 with better error messages
    fn parse_u16(s: &str) -> Result<u16, ParseError> {
        s.parse::<u16>().map_err(|_| ParseError::InvalidFormat(s.to_owned()))
    }

    /// Helper to parse u8 with better error messages
    fn parse_u8(s: &str) -> Result<u8, ParseError> {
        s.parse::<u8>().map_err(|_| ParseError::InvalidFormat(s.to_owned()))
    }

    fn parse_iso(parts: &[&str]) -> Result<Self, ParseError> {
        let [year, month, day] = parts else {
            return Err(ParseError::InvalidFormat(parts.join("-")));
        };
        Self::new(Self::parse_u16(year)?, Self::parse_u8(month)?, Self::parse_u8(day)?)
    }

    fn parse_month_first(parts: &[&str]) -> Result<Self, ParseError> {
        let [month, day, year] = parts else {
            return Err(ParseError::InvalidFormat(parts.join("/")));
        };
        Self::new(Self::parse_u16(year)?, Self::parse_u8(month)?, Self::parse_u8(day)?)
    }
}

impl FromStr for CalendarDate {
    type Err = ParseError;

    /// Accepts ISO `YYYY-MM-DD` or month-first `MM/DD/YYYY`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyInput);
        }

        let has_hyphen = trimmed.contains(DATE_SEPARATOR);
        let has_slash = trimmed.contains(MONTH_FIRST_SEPARATOR);

        match (has_hyphen, has_slash) {
            (true, true) => Err(ParseError::InvalidFormat(format!(
                "Mixed delimiters ({DATE_SEPARATOR} and {MONTH_FIRST_SEPARATOR})"
            ))),
            (true, false) => {
                let parts: Vec<&str> = trimmed.split(DATE_SEPARATOR).map(str::trim).collect();
                Self::parse_iso(&parts)
            },
            (false, true) => {
                let parts: Vec<&str> = trimmed.split(MONTH_FIRST_SEPARATOR).map(str::trim).collect();
                Self::parse_month_first(&parts)
            },
            (false, false) => Err(ParseError::InvalidFormat(trimmed.to_owned())),
        }
    }
}

impl serde::Serialize for CalendarDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for CalendarDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
