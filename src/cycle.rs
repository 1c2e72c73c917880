//! Cycle values derived from a confirmed period selection.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{CalendarDate, MaxRun, SelectionError, SelectionState, prelude::*};

/// Self-reported days from one period start to the next, as picked from a bounded list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize)]
#[display(fmt = "{}", "_0")]
#[serde(transparent)]
pub struct CycleLength(u16);

impl CycleLength {
    /// Validates `value` against the picker bounds `min..=max`.
    ///
    /// # Errors
    /// Returns `CycleError::CycleLengthOutOfRange` outside the bounds.
    pub const fn new(value: u16, min: u16, max: u16) -> Result<Self, CycleError> {
        if value < min || value > max {
            return Err(CycleError::CycleLengthOutOfRange { value, min, max });
        }
        Ok(Self(value))
    }

    #[inline]
    pub const fn get(self) -> u16 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CycleError {
    #[error("Select the days of your last period before continuing")]
    EmptySelection,

    #[error("Cycle length {value} is outside {min}-{max} days")]
    CycleLengthOutOfRange { value: u16, min: u16, max: u16 },

    #[error("Cycle length {cycle_length} is shorter than the period length {period_length}")]
    CycleShorterThanPeriod { cycle_length: u16, period_length: u16 },

    #[error("Period end {end} is before its start {start}")]
    EndBeforeStart { start: CalendarDate, end: CalendarDate },

    #[error("Period length {period_length} does not match {start} to {end}")]
    LengthMismatch {
        period_length: u16,
        start:         CalendarDate,
        end:           CalendarDate,
    },

    #[error(transparent)]
    Selection(#[from] SelectionError),
}

/// The body sent to the profile cycle-update endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawCycleConfig")]
pub struct CycleConfig {
    period_length:          u16,
    cycle_length:           u16,
    last_period_start_date: CalendarDate,
    last_period_end_date:   CalendarDate,
}

/// Unchecked wire form, validated into [`CycleConfig`] on deserialize.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCycleConfig {
    period_length:          u16,
    cycle_length:           u16,
    last_period_start_date: CalendarDate,
    last_period_end_date:   CalendarDate,
}

impl TryFrom<RawCycleConfig> for CycleConfig {
    type Error = CycleError;

    fn try_from(raw: RawCycleConfig) -> Result<Self, Self::Error> {
        let (start, end) = (raw.last_period_start_date, raw.last_period_end_date);
        if end < start {
            return Err(CycleError::EndBeforeStart { start, end });
        }
        if i64::from(raw.period_length) != start.days_until(&end) + 1 {
            return Err(CycleError::LengthMismatch {
                period_length: raw.period_length,
                start,
                end,
            });
        }
        if raw.cycle_length < raw.period_length {
            return Err(CycleError::CycleShorterThanPeriod {
                cycle_length:  raw.cycle_length,
                period_length: raw.period_length,
            });
        }
        Ok(Self {
            period_length:          raw.period_length,
            cycle_length:           raw.cycle_length,
            last_period_start_date: start,
            last_period_end_date:   end,
        })
    }
}

impl CycleConfig {
    /// Derives the cycle values from a finished selection.
    ///
    /// # Errors
    /// Returns `CycleError::EmptySelection` for an empty selection and
    /// `CycleError::CycleShorterThanPeriod` when the picked cycle cannot contain the period.
    pub fn derive(selection: &SelectionState, cycle_length: CycleLength) -> Result<Self, CycleError> {
        let (Some(start), Some(end)) = (selection.first(), selection.last()) else {
            debug!("confirmation rejected: no period days selected");
            return Err(CycleError::EmptySelection);
        };

        // A selection is capped by MaxRun (a u8), so its length always fits.
        let period_length = u16::try_from(selection.len()).unwrap_or(u16::MAX);
        if cycle_length.get() < period_length {
            debug!(
                cycle_length = cycle_length.get(),
                period_length, "confirmation rejected: cycle shorter than period"
            );
            return Err(CycleError::CycleShorterThanPeriod {
                cycle_length: cycle_length.get(),
                period_length,
            });
        }

        info!(%start, %end, period_length, cycle_length = cycle_length.get(), "cycle confirmed");
        Ok(Self {
            period_length,
            cycle_length: cycle_length.get(),
            last_period_start_date: start,
            last_period_end_date: end,
        })
    }

    pub const fn period_length(&self) -> u16 {
        self.period_length
    }

    pub const fn cycle_length(&self) -> u16 {
        self.cycle_length
    }

    pub const fn last_period_start_date(&self) -> CalendarDate {
        self.last_period_start_date
    }

    pub const fn last_period_end_date(&self) -> CalendarDate {
        self.last_period_end_date
    }

    /// Expected start of the following period, `cycle_length` days after the last one started.
    pub fn next_period_start(&self) -> Option<CalendarDate> {
        self.last_period_start_date.add_days(i64::from(self.cycle_length))
    }

    /// Rebuilds the selection a saved cycle came from, for editing it.
    ///
    /// # Errors
    /// Returns `CycleError::Selection` if the saved period is longer than `max_run`.
    pub fn to_selection(&self, max_run: MaxRun) -> Result<SelectionState, CycleError> {
        Ok(SelectionState::span(
            self.last_period_start_date,
            self.last_period_end_date,
            max_run,
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{date, jan};

    fn cycle(value: u16) -> CycleLength {
        CycleLength::new(value, 21, 45).expect("within default bounds")
    }

    fn run(a: u8, b: u8) -> SelectionState {
        SelectionState::span(jan(a), jan(b), MaxRun::default()).expect("within max run")
    }

    #[test]
    fn test_cycle_length_bounds() {
        assert!(CycleLength::new(21, 21, 45).is_ok());
        assert!(CycleLength::new(45, 21, 45).is_ok());
        assert_eq!(
            CycleLength::new(20, 21, 45),
            Err(CycleError::CycleLengthOutOfRange {
                value: 20,
                min:   21,
                max:   45,
            })
        );
        assert!(CycleLength::new(46, 21, 45).is_err());
    }

    #[test]
    fn test_derive() {
        let config = CycleConfig::derive(&run(4, 8), cycle(28)).unwrap();
        assert_eq!(config.period_length(), 5);
        assert_eq!(config.cycle_length(), 28);
        assert_eq!(config.last_period_start_date(), jan(4));
        assert_eq!(config.last_period_end_date(), jan(8));
    }

    #[test]
    fn test_derive_single_day() {
        let config = CycleConfig::derive(&SelectionState::single(jan(9)), cycle(30)).unwrap();
        assert_eq!(config.period_length(), 1);
        assert_eq!(config.last_period_start_date(), config.last_period_end_date());
    }

    #[test]
    fn test_derive_empty_selection_rejected() {
        let err = CycleConfig::derive(&SelectionState::new(), cycle(28)).unwrap_err();
        assert_eq!(err, CycleError::EmptySelection);
        assert_eq!(err.to_string(), "Select the days of your last period before continuing");
    }

    #[test]
    fn test_derive_cycle_shorter_than_period() {
        let short = CycleLength::new(3, 1, 45).unwrap();
        let err = CycleConfig::derive(&run(1, 5), short).unwrap_err();
        assert_eq!(
            err,
            CycleError::CycleShorterThanPeriod {
                cycle_length:  3,
                period_length: 5,
            }
        );
    }

    #[test]
    fn test_json_body() {
        let config = CycleConfig::derive(&run(4, 8), cycle(28)).unwrap();
        let json = serde_json::to_value(config).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "periodLength": 5,
                "cycleLength": 28,
                "lastPeriodStartDate": "2024-01-04",
                "lastPeriodEndDate": "2024-01-08",
            })
        );

        let parsed: CycleConfig = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_deserialize_rejects_inconsistent_body() {
        let bad_length = serde_json::json!({
            "periodLength": 3,
            "cycleLength": 28,
            "lastPeriodStartDate": "2024-01-04",
            "lastPeriodEndDate": "2024-01-08",
        });
        assert!(serde_json::from_value::<CycleConfig>(bad_length).is_err());

        let reversed = serde_json::json!({
            "periodLength": 5,
            "cycleLength": 28,
            "lastPeriodStartDate": "2024-01-08",
            "lastPeriodEndDate": "2024-01-04",
        });
        assert!(serde_json::from_value::<CycleConfig>(reversed).is_err());
    }

    #[test]
    fn test_next_period_start() {
        let config = CycleConfig::derive(&run(20, 24), cycle(28)).unwrap();
        assert_eq!(config.next_period_start(), Some(date(2024, 2, 17)));
    }

    #[test]
    fn test_to_selection_for_editing() {
        let config = CycleConfig::derive(&run(4, 8), cycle(28)).unwrap();
        assert_eq!(config.to_selection(MaxRun::default()).unwrap(), run(4, 8));

        let tight = MaxRun::new(3).unwrap();
        assert!(matches!(
            config.to_selection(tight),
            Err(CycleError::Selection(SelectionError::LimitExceeded { .. }))
        ));
    }

    #[test]
    fn test_period_length_matches_cardinality() {
        for end in 1..=7 {
            let selection = run(1, end);
            let config = CycleConfig::derive(&selection, cycle(28)).unwrap();
            assert_eq!(usize::from(config.period_length()), selection.len());
        }
    }
}
