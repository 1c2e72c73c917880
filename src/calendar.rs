//! Month layout for the date picker, and the source of "today".

use chrono::{Datelike, Local, NaiveDate};
use serde::Serialize;

use crate::{CalendarDate, DAYS_PER_WEEK, GRID_ROWS, Month, ParseError, SelectionState, Weekday, Year, days_in_month};

/// Supplies the current date.
pub trait DateProvider {
    fn today(&self) -> CalendarDate;
}

/// Reads today's date in the local time zone from the system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemDateProvider;

impl DateProvider for SystemDateProvider {
    fn today(&self) -> CalendarDate {
        CalendarDate::try_from(Local::now().date_naive()).unwrap_or(CalendarDate::MAX)
    }
}

impl TryFrom<NaiveDate> for CalendarDate {
    type Error = ParseError;

    /// # Errors
    /// Returns `ParseError::InvalidYear` for years outside `1..=MAX_YEAR`.
    fn try_from(date: NaiveDate) -> Result<Self, Self::Error> {
        // Years that do not fit a u16 become 0, which fails validation.
        let year = u16::try_from(date.year()).unwrap_or(0);
        let month = u8::try_from(date.month()).unwrap_or(0);
        let day = u8::try_from(date.day()).unwrap_or(0);
        Self::new(year, month, day)
    }
}

/// Always reports the same date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedDateProvider(pub CalendarDate);

impl DateProvider for FixedDateProvider {
    fn today(&self) -> CalendarDate {
        self.0
    }
}

/// How a renderer should draw one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CellState {
    Selected,
    /// After today, and future days are not allowed
    Future,
    Today,
    Selectable,
}

impl CellState {
    /// Classifies `date` for drawing. Selection wins over every other state.
    pub fn of(date: CalendarDate, selection: &SelectionState, today: CalendarDate, allow_future: bool) -> Self {
        if selection.contains(&date) {
            Self::Selected
        } else if !allow_future && date > today {
            Self::Future
        } else if date == today {
            Self::Today
        } else {
            Self::Selectable
        }
    }

    pub const fn is_tappable(self) -> bool {
        !matches!(self, Self::Future)
    }
}

type Cells = [[Option<CalendarDate>; DAYS_PER_WEEK]; GRID_ROWS];

/// One month laid out as six weeks of seven columns.
///
/// Leading and trailing cells outside the month are `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    year:       Year,
    month:      Month,
    week_start: Weekday,
    cells:      Cells,
}

impl MonthGrid {
    /// # Errors
    /// Returns `ParseError` if the first of the month cannot be built.
    pub fn new(year: Year, month: Month, week_start: Weekday) -> Result<Self, ParseError> {
        let first = CalendarDate::first_of_month(year, month)?;
        let offset = first.weekday().offset_from(week_start);
        let len = usize::from(days_in_month(year.get(), month.get()));

        let mut cells: Cells = [[None; DAYS_PER_WEEK]; GRID_ROWS];
        let days = std::iter::successors(Some(first), CalendarDate::succ).take(len);
        for (index, date) in days.enumerate() {
            let pos = offset + index;
            cells[pos / DAYS_PER_WEEK][pos % DAYS_PER_WEEK] = Some(date);
        }

        Ok(Self {
            year,
            month,
            week_start,
            cells,
        })
    }

    /// Grid for the month containing `date`.
    ///
    /// # Errors
    /// Returns `ParseError` if the first of the month cannot be built.
    pub fn containing(date: CalendarDate, week_start: Weekday) -> Result<Self, ParseError> {
        Self::new(date.year(), date.month(), week_start)
    }

    pub const fn year(&self) -> Year {
        self.year
    }

    pub const fn month(&self) -> Month {
        self.month
    }

    /// Header text, e.g. "January 2024"
    pub fn title(&self) -> String {
        format!("{} {}", self.month.name(), self.year)
    }

    /// Column headers in display order
    pub fn weekday_headers(&self) -> [Weekday; DAYS_PER_WEEK] {
        Weekday::week_from(self.week_start)
    }

    pub const fn rows(&self) -> &Cells {
        &self.cells
    }

    /// Days of the month in order.
    pub fn dates(&self) -> impl Iterator<Item = CalendarDate> + '_ {
        self.cells.iter().flatten().flatten().copied()
    }

    /// The month before this one, or `None` before year 1.
    pub fn preceding(&self) -> Option<Self> {
        CalendarDate::first_of_month(self.year, self.month)
            .ok()?
            .pred()
            .and_then(|date| Self::containing(date, self.week_start).ok())
    }

    /// The month after this one, or `None` past `MAX_YEAR`.
    pub fn following(&self) -> Option<Self> {
        self.dates()
            .last()?
            .succ()
            .and_then(|date| Self::containing(date, self.week_start).ok())
    }

    /// Cell states row by row, for a renderer that does not want to classify dates itself.
    pub fn states(
        &self,
        selection: &SelectionState,
        today: CalendarDate,
        allow_future: bool,
    ) -> Vec<[Option<(CalendarDate, CellState)>; DAYS_PER_WEEK]> {
        self.cells
            .iter()
            .map(|row| row.map(|cell| cell.map(|date| (date, CellState::of(date, selection, today, allow_future)))))
            .collect()
    }
}
