/// Maximum valid year (inclusive)
pub const MAX_YEAR: u16 = 9999;

/// Maximum valid month (December)
pub const MAX_MONTH: u8 = 12;

/// First day of month, used for lower bounds
pub const MIN_DAY: u8 = 1;

/// Month number for January
pub const JANUARY: u8 = 1;
/// Month number for February
pub const FEBRUARY: u8 = 2;
/// Month number for December
pub const DECEMBER: u8 = 12;

/// Last day of December
pub const DECEMBER_DAYS: u8 = 31;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: u8 = 29;

/// Maximum days in each month (index 0 is unused, months are 1-indexed)
/// February shows 28 days (non-leap year default)
pub const DAYS_IN_MONTH: [u8; 13] = [
    0,  // index 0 unused (months are 1-indexed)
    31, // January
    28, // February (non-leap, adjusted by is_leap_year check)
    31, // March
    30, // April
    31, // May
    30, // June
    31, // July
    31, // August
    30, // September
    31, // October
    30, // November
    31, // December
];

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: u16 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: u16 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: u16 = 400;

/// Days in a full 400-year Gregorian era
pub(crate) const DAYS_PER_ERA: i64 = 146_097;
/// Day number of 1970-01-01 counted from 0000-03-01
pub(crate) const UNIX_EPOCH_OFFSET: i64 = 719_468;

/// Number of columns in a rendered month (one per weekday)
pub const DAYS_PER_WEEK: usize = 7;
/// `DAYS_PER_WEEK` for signed epoch-day arithmetic
pub(crate) const DAYS_PER_WEEK_I64: i64 = 7;
/// Enough rows to hold any month at any weekday offset
pub const GRID_ROWS: usize = 6;

/// Default cap on contiguous selectable period days
pub const DEFAULT_MAX_RUN: u8 = 7;
/// Default lower bound of the cycle length picker
pub const DEFAULT_MIN_CYCLE_LENGTH: u16 = 21;
/// Default upper bound of the cycle length picker
pub const DEFAULT_MAX_CYCLE_LENGTH: u16 = 45;
/// Value the cycle length picker starts on
pub const DEFAULT_CYCLE_LENGTH: u16 = 28;

/// Date component separator (ISO 8601 format)
pub const DATE_SEPARATOR: char = '-';
/// Month-first format separator (legacy US format)
pub const MONTH_FIRST_SEPARATOR: char = '/';
