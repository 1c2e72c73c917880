use crate::ParseError;
use crate::consts::{
    CENTURY_CYCLE, DAYS_IN_MONTH, DECEMBER_DAYS, DAYS_PER_ERA, DAYS_PER_WEEK, DAYS_PER_WEEK_I64, FEBRUARY, FEBRUARY_DAYS_LEAP, GREGORIAN_CYCLE,
    LEAP_YEAR_CYCLE, MAX_MONTH, MAX_YEAR, UNIX_EPOCH_OFFSET,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU8;
use std::num::NonZeroU16;

/// A year value guaranteed to be in the range `1..=MAX_YEAR` (1..=9999)
/// Uses `NonZeroU16` internally, so 0 is not a valid year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct Year(NonZeroU16);

impl Year {
    pub const MIN: Self = Self(NonZeroU16::MIN);
    pub const MAX: Self = Self(NonZeroU16::MIN.saturating_add(MAX_YEAR - 1));

    /// Creates a new Year, validating that it's non-zero and <= `MAX_YEAR`
    ///
    /// # Errors
    /// Returns `ParseError::InvalidYear` if the value is 0 or > `MAX_YEAR`.
    pub fn new(value: u16) -> Result<Self, ParseError> {
        let non_zero = NonZeroU16::new(value).ok_or(ParseError::InvalidYear(value))?;
        if value > MAX_YEAR {
            return Err(ParseError::InvalidYear(value));
        }
        Ok(Self(non_zero))
    }

    #[inline]
    pub const fn get(self) -> u16 {
        self.0.get()
    }

    pub const fn is_leap(self) -> bool {
        is_leap_year(self.get())
    }
}

impl TryFrom<u16> for Year {
    type Error = ParseError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Year> for u16 {
    fn from(year: Year) -> Self {
        year.0.get()
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A month value guaranteed to be in the range `1..=MAX_MONTH` (1..=12)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Month(NonZeroU8);

impl Month {
    pub const JANUARY: Self = Self(NonZeroU8::MIN);
    pub const DECEMBER: Self = Self(NonZeroU8::MIN.saturating_add(MAX_MONTH - 1));

    /// Creates a new Month, validating that it's non-zero and <= `MAX_MONTH`
    ///
    /// # Errors
    /// Returns `ParseError::InvalidMonth` if the value is 0 or > `MAX_MONTH`.
    pub fn new(value: u8) -> Result<Self, ParseError> {
        let non_zero = NonZeroU8::new(value).ok_or(ParseError::InvalidMonth(value))?;
        if value > MAX_MONTH {
            return Err(ParseError::InvalidMonth(value));
        }
        Ok(Self(non_zero))
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }

    /// English month name, as shown above a month grid
    pub const fn name(self) -> &'static str {
        match self.get() {
            1 => "January",
            2 => "February",
            3 => "March",
            4 => "April",
            5 => "May",
            6 => "June",
            7 => "July",
            8 => "August",
            9 => "September",
            10 => "October",
            11 => "November",
            _ => "December",
        }
    }
}

impl TryFrom<u8> for Month {
    type Error = ParseError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Month> for u8 {
    fn from(month: Month) -> Self {
        month.0.get()
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A day of month, validated against its year and month on construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Day(NonZeroU8);

impl Day {
    pub(crate) const FIRST: Self = Self(NonZeroU8::MIN);
    pub(crate) const LAST_OF_DECEMBER: Self = Self(NonZeroU8::MIN.saturating_add(DECEMBER_DAYS - 1));

    /// Creates a new Day, validating that it's non-zero and valid for the given year and month
    ///
    /// # Errors
    /// Returns `ParseError::InvalidDay` if the value is 0 or invalid for the given year and month.
    pub fn new(value: u8, year: u16, month: u8) -> Result<Self, ParseError> {
        let invalid = ParseError::InvalidDay {
            month,
            day: value,
            year,
        };
        let non_zero = NonZeroU8::new(value).ok_or_else(|| invalid.clone())?;
        if month == 0 || month > MAX_MONTH || value > days_in_month(year, month) {
            return Err(invalid);
        }
        Ok(Self(non_zero))
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

impl From<Day> for u8 {
    fn from(day: Day) -> Self {
        day.0.get()
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Day of the week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    const ALL: [Self; DAYS_PER_WEEK] = [
        Self::Sunday,
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
    ];

    pub const fn num_days_from_sunday(self) -> u8 {
        self as u8
    }

    /// Weekday for a count of days since 1970-01-01 (a Thursday).
    pub fn from_epoch_days(days: i64) -> Self {
        // rem_euclid keeps the index in 0..7 for dates before the epoch
        let index = (days + i64::from(Self::Thursday.num_days_from_sunday())).rem_euclid(DAYS_PER_WEEK_I64);
        Self::ALL[index as usize]
    }

    /// Column of this weekday in a week that starts on `week_start`.
    pub const fn offset_from(self, week_start: Self) -> usize {
        (self.num_days_from_sunday() as usize + DAYS_PER_WEEK - week_start.num_days_from_sunday() as usize)
            % DAYS_PER_WEEK
    }

    /// Two-letter column header
    pub const fn short_name(self) -> &'static str {
        match self {
            Self::Sunday => "Su",
            Self::Monday => "Mo",
            Self::Tuesday => "Tu",
            Self::Wednesday => "We",
            Self::Thursday => "Th",
            Self::Friday => "Fr",
            Self::Saturday => "Sa",
        }
    }

    /// The seven weekdays in column order for a week starting on `week_start`.
    pub fn week_from(week_start: Self) -> [Self; DAYS_PER_WEEK] {
        let start = week_start.num_days_from_sunday() as usize;
        std::array::from_fn(|i| Self::ALL[(start + i) % DAYS_PER_WEEK])
    }
}

// Helper functions

pub const fn is_leap_year(year: u16) -> bool {
    (year % LEAP_YEAR_CYCLE == 0 && year % CENTURY_CYCLE != 0) || (year % GREGORIAN_CYCLE == 0)
}

pub const fn days_in_month(year: u16, month: u8) -> u8 {
    debug_assert!(month != 0 && month <= MAX_MONTH);

    if month == FEBRUARY && is_leap_year(year) {
        FEBRUARY_DAYS_LEAP
    } else {
        DAYS_IN_MONTH[month as usize]
    }
}

/// Days since 1970-01-01 for a proleptic Gregorian date.
///
/// Counts eras of 400 years from 0000-03-01 so February lands at the end of
/// the computational year.
pub(crate) const fn days_from_civil(year: u16, month: u8, day: u8) -> i64 {
    let y = if month <= FEBRUARY { year as i64 - 1 } else { year as i64 };
    let era = y.div_euclid(GREGORIAN_CYCLE as i64);
    let yoe = y - era * GREGORIAN_CYCLE as i64;
    let shifted_month = if month > FEBRUARY { month as i64 - 3 } else { month as i64 + 9 };
    let doy = (153 * shifted_month + 2) / 5 + day as i64 - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * DAYS_PER_ERA + doe - UNIX_EPOCH_OFFSET
}

/// Inverse of [`days_from_civil`]. Returns `(year, month, day)` with a signed year.
pub(crate) const fn civil_from_days(days: i64) -> (i64, u8, u8) {
    let z = days + UNIX_EPOCH_OFFSET;
    let era = z.div_euclid(DAYS_PER_ERA);
    let doe = z - era * DAYS_PER_ERA;
    let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u8;
    let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u8;
    let year = yoe + era * GREGORIAN_CYCLE as i64 + if month <= FEBRUARY { 1 } else { 0 };
    (year, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_new_valid() {
        assert!(Year::new(1).is_ok());
        assert!(Year::new(2024).is_ok());
        assert!(Year::new(9999).is_ok());
    }

    #[test]
    fn test_year_new_invalid() {
        assert!(matches!(Year::new(0), Err(ParseError::InvalidYear(0))));
        assert!(matches!(Year::new(10000), Err(ParseError::InvalidYear(10000))));
    }

    #[test]
    fn test_year_serde() {
        let year = Year::new(2024).unwrap();
        let json = serde_json::to_string(&year).unwrap();
        assert_eq!(json, "2024");

        let parsed: Year = serde_json::from_str(&json).unwrap();
        assert_eq!(year, parsed);
        assert!(serde_json::from_str::<Year>("0").is_err());
    }

    #[test]
    fn test_month_new() {
        for m in 1..=12 {
            assert!(Month::new(m).is_ok(), "Month {m} should be valid");
        }
        assert!(matches!(Month::new(0), Err(ParseError::InvalidMonth(0))));
        assert!(matches!(Month::new(13), Err(ParseError::InvalidMonth(13))));
    }

    #[test]
    fn test_limit_constants() {
        assert_eq!(Year::MIN.get(), 1);
        assert_eq!(Year::MAX.get(), MAX_YEAR);
        assert_eq!(Month::JANUARY.get(), 1);
        assert_eq!(Month::DECEMBER.get(), 12);
        assert_eq!(Day::FIRST.get(), 1);
        assert_eq!(Day::LAST_OF_DECEMBER.get(), 31);
    }

    #[test]
    fn test_month_name() {
        assert_eq!(Month::new(1).unwrap().name(), "January");
        assert_eq!(Month::new(9).unwrap().name(), "September");
        assert_eq!(Month::new(12).unwrap().name(), "December");
    }

    #[test]
    fn test_day_new_valid() {
        // February non-leap - 28 days
        assert!(Day::new(28, 2023, 2).is_ok());
        assert!(Day::new(29, 2023, 2).is_err());

        // February leap year - 29 days
        assert!(Day::new(29, 2024, 2).is_ok());
        assert!(Day::new(30, 2024, 2).is_err());

        // April - 30 days
        assert!(Day::new(30, 2024, 4).is_ok());
        assert!(Day::new(31, 2024, 4).is_err());
    }

    #[test]
    fn test_day_new_invalid() {
        assert!(matches!(Day::new(0, 2024, 1), Err(ParseError::InvalidDay { .. })));
        assert!(matches!(
            Day::new(32, 2024, 1),
            Err(ParseError::InvalidDay {
                month: 1,
                day: 32,
                year: 2024
            })
        ));
        assert!(Day::new(1, 2024, 13).is_err());
    }

    #[test]
    fn test_is_leap_year_cases() {
        struct TestCase {
            year:        u16,
            is_leap:     bool,
            description: &'static str,
        }

        let cases = [
            TestCase {
                year:        2024,
                is_leap:     true,
                description: "divisible by 4",
            },
            TestCase {
                year:        2023,
                is_leap:     false,
                description: "not divisible by 4",
            },
            TestCase {
                year:        1900,
                is_leap:     false,
                description: "century not divisible by 400",
            },
            TestCase {
                year:        2000,
                is_leap:     true,
                description: "divisible by 400",
            },
        ];

        for case in &cases {
            assert_eq!(
                is_leap_year(case.year),
                case.is_leap,
                "Year {} ({})",
                case.year,
                case.description
            );
        }
    }

    #[test]
    fn test_days_in_month() {
        let expected = [0, 31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
        for month in 1..=12 {
            assert_eq!(days_in_month(2023, month), expected[month as usize], "Month {month}");
        }
        assert_eq!(days_in_month(2024, 2), 29);
    }

    #[test]
    fn test_days_from_civil_known_values() {
        assert_eq!(days_from_civil(1970, 1, 1), 0);
        assert_eq!(days_from_civil(1969, 12, 31), -1);
        assert_eq!(days_from_civil(2000, 3, 1), 11_017);
        assert_eq!(days_from_civil(2024, 1, 1), 19_723);
    }

    #[test]
    fn test_civil_from_days_inverts() {
        for (y, m, d) in [(1, 1, 1), (1970, 1, 1), (2000, 2, 29), (2024, 12, 31), (9999, 12, 31)] {
            let days = days_from_civil(y, m, d);
            assert_eq!(civil_from_days(days), (i64::from(y), m, d));
        }
    }

    #[test]
    fn test_weekday_from_epoch_days() {
        assert_eq!(Weekday::from_epoch_days(0), Weekday::Thursday);
        assert_eq!(Weekday::from_epoch_days(-1), Weekday::Wednesday);
        // 2024-01-01 was a Monday
        assert_eq!(Weekday::from_epoch_days(19_723), Weekday::Monday);
    }

    #[test]
    fn test_weekday_repeats_every_week() {
        for days in [-719_162, -8, -7, 0, 6, 19_723] {
            let step = DAYS_PER_WEEK_I64;
            assert_eq!(Weekday::from_epoch_days(days), Weekday::from_epoch_days(days + step));
            assert_eq!(Weekday::from_epoch_days(days), Weekday::from_epoch_days(days - step));
        }
        // 0001-01-01 was a Monday
        assert_eq!(Weekday::from_epoch_days(-719_162), Weekday::Monday);
    }

    #[test]
    fn test_weekday_offset_from() {
        assert_eq!(Weekday::Sunday.offset_from(Weekday::Sunday), 0);
        assert_eq!(Weekday::Sunday.offset_from(Weekday::Monday), 6);
        assert_eq!(Weekday::Monday.offset_from(Weekday::Monday), 0);
        assert_eq!(Weekday::Saturday.offset_from(Weekday::Sunday), 6);
    }

    #[test]
    fn test_week_from() {
        let week = Weekday::week_from(Weekday::Monday);
        assert_eq!(week[0], Weekday::Monday);
        assert_eq!(week[6], Weekday::Sunday);
        assert_eq!(week.map(Weekday::short_name).join(" "), "Mo Tu We Th Fr Sa Su");
    }
}
