//! Per-screen state of the period picker.
//!
//! A [`CycleSession`] is created when the picker opens and carries everything
//! the flow needs: settings, the current selection, the picked cycle length and
//! the submission progress. Dropping it discards anything unconfirmed.

use tracing::debug;

use crate::{
    CalendarDate, CellState, ConfigError, CycleConfig, CycleError, CycleLength, DateProvider, MonthGrid, ParseError,
    RangeSelection, SelectionError, SelectionMode, SelectionState, SelectorConfig, SubmissionError, SubmissionState,
    SystemDateProvider, error_message,
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Cycle(#[from] CycleError),

    #[error(transparent)]
    Submission(#[from] SubmissionError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Picker {
    Extend(SelectionState),
    Range(RangeSelection),
}

impl Picker {
    fn empty(mode: SelectionMode) -> Self {
        match mode {
            SelectionMode::Extend => Self::Extend(SelectionState::new()),
            SelectionMode::Range => Self::Range(RangeSelection::new()),
        }
    }

    const fn selection(&self) -> &SelectionState {
        match self {
            Self::Extend(selection) => selection,
            Self::Range(range) => range.selection(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CycleSession<P = SystemDateProvider> {
    config:       SelectorConfig,
    dates:        P,
    picker:       Picker,
    cycle_length: CycleLength,
    submission:   SubmissionState<CycleConfig>,
    pending:      Option<CycleConfig>,
}

impl<P: DateProvider> CycleSession<P> {
    /// Opens an empty picker.
    ///
    /// # Errors
    /// Returns `ConfigError` if `config` does not validate.
    pub fn new(config: SelectorConfig, dates: P) -> Result<Self, ConfigError> {
        config.validate()?;
        let cycle_length = config.default_cycle_length().map_err(ConfigError::DefaultCycleLength)?;
        Ok(Self {
            picker: Picker::empty(config.mode),
            config,
            dates,
            cycle_length,
            submission: SubmissionState::default(),
            pending: None,
        })
    }

    /// Pre-fills the picker from a previously saved cycle, for editing it.
    ///
    /// # Errors
    /// Returns `CycleError` if the saved period is longer than the configured
    /// maximum or its cycle length is outside the picker bounds. The session is
    /// unchanged on error.
    pub fn load_saved(&mut self, saved: &CycleConfig) -> Result<(), CycleError> {
        let selection = saved.to_selection(self.config.max_run)?;
        let cycle_length = self.config.cycle_length(saved.cycle_length())?;
        self.picker = match self.config.mode {
            SelectionMode::Extend => Picker::Extend(selection),
            // Range mode starts unarmed; the next tap begins a new range.
            SelectionMode::Range => Picker::Range(RangeSelection::from(selection)),
        };
        self.cycle_length = cycle_length;
        Ok(())
    }

    pub const fn config(&self) -> &SelectorConfig {
        &self.config
    }

    pub const fn selection(&self) -> &SelectionState {
        self.picker.selection()
    }

    pub const fn cycle_length(&self) -> CycleLength {
        self.cycle_length
    }

    pub const fn submission(&self) -> &SubmissionState<CycleConfig> {
        &self.submission
    }

    pub fn today(&self) -> CalendarDate {
        self.dates.today()
    }

    /// Applies a calendar tap according to the configured mode.
    ///
    /// # Errors
    /// Returns `SelectionError::FutureDate` for days after today (unless the
    /// config allows them) and `SelectionError::LimitExceeded` when the run
    /// would exceed the maximum. The selection is unchanged on error.
    pub fn tap(&mut self, date: CalendarDate) -> Result<(), SelectionError> {
        if !self.config.allow_future && date > self.dates.today() {
            debug!(%date, "tap rejected: future date");
            return Err(SelectionError::FutureDate { date });
        }
        let max_run = self.config.max_run;
        match &mut self.picker {
            Picker::Extend(selection) => selection.apply_toggle(date, max_run),
            Picker::Range(range) => range.apply_tap(date, max_run),
        }
    }

    pub fn clear(&mut self) {
        self.picker = Picker::empty(self.config.mode);
    }

    /// # Errors
    /// Returns `CycleError::CycleLengthOutOfRange` outside the configured picker bounds.
    pub fn set_cycle_length(&mut self, value: u16) -> Result<(), CycleError> {
        self.cycle_length = self.config.cycle_length(value)?;
        Ok(())
    }

    /// Derives the values to submit from the current selection.
    ///
    /// # Errors
    /// Returns `CycleError::EmptySelection` when nothing is selected.
    pub fn confirm(&self) -> Result<CycleConfig, CycleError> {
        CycleConfig::derive(self.selection(), self.cycle_length)
    }

    /// Confirms and marks the submission as loading; returns the body to send.
    ///
    /// # Errors
    /// Returns `SessionError::Cycle` if confirmation fails and
    /// `SessionError::Submission` if a request is already in flight.
    pub fn submit(&mut self) -> Result<CycleConfig, SessionError> {
        let config = self.confirm()?;
        self.submission.begin()?;
        self.pending = Some(config);
        Ok(config)
    }

    /// Records a successful response for the request started by [`Self::submit`].
    ///
    /// # Errors
    /// Returns `SubmissionError::NotInFlight` if nothing was submitted.
    pub fn submission_succeeded(&mut self) -> Result<(), SubmissionError> {
        let config = self.pending.take().ok_or(SubmissionError::NotInFlight)?;
        self.submission.succeed(config)
    }

    /// Records a failed response. The shown message comes from `body`, falling
    /// back to `fallback` (for example the transport error text).
    ///
    /// # Errors
    /// Returns `SubmissionError::NotInFlight` if nothing was submitted.
    pub fn submission_failed(&mut self, body: &str, fallback: &str) -> Result<(), SubmissionError> {
        self.submission.fail(error_message(body, fallback))?;
        self.pending = None;
        Ok(())
    }

    /// Grid for the month containing `date`, with this session's week start.
    ///
    /// # Errors
    /// Returns `ParseError` if the month cannot be laid out.
    pub fn month_grid(&self, date: CalendarDate) -> Result<MonthGrid, ParseError> {
        MonthGrid::containing(date, self.config.week_start)
    }

    pub fn cell_state(&self, date: CalendarDate) -> CellState {
        CellState::of(date, self.selection(), self.dates.today(), self.config.allow_future)
    }
}
