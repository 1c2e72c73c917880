//! Period day selection.
//!
//! Two tap policies share [`SelectionState`]:
//!
//! - extend mode ([`SelectionState::toggle`]) grows a run one adjacent day at a time;
//! - range mode ([`RangeSelection::tap`]) fills every day between two anchor taps.
//!
//! In both modes tapping a day that is already selected resets the selection
//! to that single day, and a tap that would push the run past [`MaxRun`] is
//! rejected with [`SelectionError::LimitExceeded`] leaving the state untouched.

use std::{collections::BTreeSet, iter, num::NonZeroU8};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::{CalendarDate, ConfigError, DEFAULT_MAX_RUN, prelude::*};

/// Upper bound on the number of contiguous days a selection may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize)]
#[display(fmt = "{}", "_0")]
#[serde(try_from = "u8", into = "u8")]
pub struct MaxRun(NonZeroU8);

impl MaxRun {
    /// Returns `None` for zero.
    pub const fn new(value: u8) -> Option<Self> {
        match NonZeroU8::new(value) {
            Some(non_zero) => Some(Self(non_zero)),
            None => None,
        }
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }

    #[inline]
    const fn as_usize(self) -> usize {
        self.0.get() as usize
    }
}

impl Default for MaxRun {
    fn default() -> Self {
        Self(NonZeroU8::MIN.saturating_add(DEFAULT_MAX_RUN - 1))
    }
}

impl TryFrom<u8> for MaxRun {
    type Error = ConfigError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(ConfigError::ZeroMaxRun)
    }
}

impl From<MaxRun> for u8 {
    fn from(max_run: MaxRun) -> Self {
        max_run.get()
    }
}

/// Why a tap was not applied. The selection it was applied to is unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    /// The run would grow past the configured maximum.
    #[error("You can select at most {max_run} consecutive days ({attempted} requested)")]
    LimitExceeded { max_run: u8, attempted: usize },

    /// The tapped day lies after today.
    #[error("{date} is in the future and cannot be selected")]
    FutureDate { date: CalendarDate },
}

/// An ordered set of selected days.
///
/// Holds either nothing, a single day, or one gap-free run of days; the
/// constructors and tap operations are the only way to build one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct SelectionState {
    dates: BTreeSet<CalendarDate>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(date: CalendarDate) -> Self {
        Self {
            dates: BTreeSet::from([date]),
        }
    }

    /// Every day from `a` to `b` inclusive, in either order.
    ///
    /// # Errors
    /// Returns `SelectionError::LimitExceeded` if the span is longer than `max_run`.
    pub fn span(a: CalendarDate, b: CalendarDate, max_run: MaxRun) -> Result<Self, SelectionError> {
        let (start, end) = if a <= b { (a, b) } else { (b, a) };
        let attempted = usize::try_from(start.days_until(&end)).map_or(usize::MAX, |gap| gap.saturating_add(1));
        if attempted > max_run.as_usize() {
            return Err(SelectionError::LimitExceeded {
                max_run: max_run.get(),
                attempted,
            });
        }
        let dates = iter::successors(Some(start), CalendarDate::succ).take(attempted).collect();
        Ok(Self { dates })
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn contains(&self, date: &CalendarDate) -> bool {
        self.dates.contains(date)
    }

    /// Earliest selected day
    pub fn first(&self) -> Option<CalendarDate> {
        self.dates.first().copied()
    }

    /// Latest selected day
    pub fn last(&self) -> Option<CalendarDate> {
        self.dates.last().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CalendarDate> {
        self.dates.iter()
    }

    /// True when `date` sits one day before the first or one day after the last selected day.
    pub fn is_adjacent(&self, date: CalendarDate) -> bool {
        match (self.first(), self.last()) {
            (Some(first), Some(last)) => first.pred() == Some(date) || last.succ() == Some(date),
            _ => false,
        }
    }

    /// Applies an extend-mode tap and returns the resulting selection.
    ///
    /// - empty selection, already-selected day, or a day not touching the run: `{tapped}`
    /// - a day touching either end of the run: the run grows by one
    ///
    /// # Errors
    /// Returns `SelectionError::LimitExceeded` when growing would exceed `max_run`.
    pub fn toggle(&self, tapped: CalendarDate, max_run: MaxRun) -> Result<Self, SelectionError> {
        if self.contains(&tapped) || !self.is_adjacent(tapped) {
            trace!(date = %tapped, "period selection restarted");
            return Ok(Self::single(tapped));
        }

        let attempted = self.len() + 1;
        if attempted > max_run.as_usize() {
            debug!(date = %tapped, max_run = max_run.get(), attempted, "period selection limit exceeded");
            return Err(SelectionError::LimitExceeded {
                max_run: max_run.get(),
                attempted,
            });
        }

        let mut dates = self.dates.clone();
        dates.insert(tapped);
        trace!(date = %tapped, len = attempted, "period selection extended");
        Ok(Self { dates })
    }

    /// In-place form of [`Self::toggle`]; on error `self` is left as it was.
    ///
    /// # Errors
    /// Returns `SelectionError::LimitExceeded` when growing would exceed `max_run`.
    pub fn apply_toggle(&mut self, tapped: CalendarDate, max_run: MaxRun) -> Result<(), SelectionError> {
        *self = self.toggle(tapped, max_run)?;
        Ok(())
    }
}

impl<'a> IntoIterator for &'a SelectionState {
    type IntoIter = std::collections::btree_set::Iter<'a, CalendarDate>;
    type Item = &'a CalendarDate;

    fn into_iter(self) -> Self::IntoIter {
        self.dates.iter()
    }
}

/// Two-tap range selection: the first tap arms an anchor, the second fills the span.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RangeSelection {
    anchor:    Option<CalendarDate>,
    selection: SelectionState,
}

impl RangeSelection {
    pub fn new() -> Self {
        Self::default()
    }

    fn anchored(date: CalendarDate) -> Self {
        Self {
            anchor:    Some(date),
            selection: SelectionState::single(date),
        }
    }

    /// The armed anchor, if the next tap will close a range.
    pub const fn anchor(&self) -> Option<CalendarDate> {
        self.anchor
    }

    pub const fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn into_selection(self) -> SelectionState {
        self.selection
    }

    /// Applies a range-mode tap.
    ///
    /// With no anchor armed (fresh, or a range was just completed) the tap arms
    /// a new anchor. Tapping the anchor itself re-arms it. Otherwise the span
    /// between anchor and tap becomes the selection and the anchor is released.
    ///
    /// # Errors
    /// Returns `SelectionError::LimitExceeded` if the span is longer than
    /// `max_run`; the anchor stays armed.
    pub fn tap(&self, tapped: CalendarDate, max_run: MaxRun) -> Result<Self, SelectionError> {
        let Some(anchor) = self.anchor.filter(|anchor| *anchor != tapped) else {
            trace!(date = %tapped, "range anchor set");
            return Ok(Self::anchored(tapped));
        };

        let selection = SelectionState::span(anchor, tapped, max_run).inspect_err(|err| {
            debug!(anchor = %anchor, date = %tapped, error = %err, "range selection rejected");
        })?;
        trace!(anchor = %anchor, date = %tapped, len = selection.len(), "range selected");
        Ok(Self {
            anchor: None,
            selection,
        })
    }

    /// In-place form of [`Self::tap`]; on error `self` is left as it was.
    ///
    /// # Errors
    /// Returns `SelectionError::LimitExceeded` if the span is longer than `max_run`.
    pub fn apply_tap(&mut self, tapped: CalendarDate, max_run: MaxRun) -> Result<(), SelectionError> {
        *self = self.tap(tapped, max_run)?;
        Ok(())
    }
}

impl From<SelectionState> for RangeSelection {
    /// Wraps an existing selection with no anchor armed.
    fn from(selection: SelectionState) -> Self {
        Self {
            anchor: None,
            selection,
        }
    }
}
