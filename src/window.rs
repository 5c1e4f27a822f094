use serde::Serialize;
use tracing::debug;

use crate::{CalendarDate, Year, prelude::*};

/// A page of consecutive years shown by the year picker (inclusive).
///
/// Windows tile `[min, max]` in steps of `size` starting at `min`; the last
/// window is shorter when `max` does not fall on a window boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
#[display(fmt = "{}/{}", "start.year_typed()", "end.year_typed()")]
pub struct YearWindow {
    start: CalendarDate,
    end:   CalendarDate,
    #[serde(skip)]
    min:   Year,
    #[serde(skip)]
    max:   Year,
    #[serde(skip)]
    size:  u16,
}

/// Error type for year window construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WindowError {
    /// Lower bound is after the upper bound.
    #[error("Invalid year bounds: min ({min}) is after max ({max})")]
    InvalidBounds { min: Year, max: Year },

    /// A window must hold at least one year.
    #[error("Window size must be at least 1")]
    ZeroWindowSize,
}

impl YearWindow {
    /// Computes the window that contains `reference`'s year.
    ///
    /// A reference year outside `[min, max]` is clamped into the range first.
    ///
    /// # Errors
    /// Returns `WindowError::InvalidBounds` if `min > max` and
    /// `WindowError::ZeroWindowSize` if `size == 0`.
    pub fn compute(
        min: Year,
        max: Year,
        reference: CalendarDate,
        size: u16,
    ) -> Result<Self, WindowError> {
        if min > max {
            return Err(WindowError::InvalidBounds { min, max });
        }
        if size == 0 {
            return Err(WindowError::ZeroWindowSize);
        }

        Ok(Self::align(min, max, reference.year_typed(), size))
    }

    fn align(min: Year, max: Year, reference: Year, size: u16) -> Self {
        let reference = reference.clamp_to(min, max);
        let offset = (reference.get() - min.get()) % size;

        // reference - offset never drops below min
        let start = reference.checked_sub(offset).unwrap_or(min);
        let end = if offset == size - 1 {
            reference
        } else {
            let ahead = (size - 1 - offset).min(max.get() - reference.get());
            reference.checked_add(ahead).unwrap_or(max)
        };

        Self {
            start: CalendarDate::new_year(start),
            end: CalendarDate::new_year(end),
            min,
            max,
            size,
        }
    }

    /// The following window, or `self` when `start + size` passes `max`.
    #[must_use]
    pub fn next(&self) -> Self {
        match self.start_year().checked_add(self.size) {
            Some(start) if start <= self.max => self.recentre(start),
            _ => {
                debug!(window = %self, max = %self.max, "next year window clamped");
                *self
            },
        }
    }

    /// The preceding window, or `self` when `start - size` passes `min`.
    #[must_use]
    pub fn previous(&self) -> Self {
        match self.start_year().checked_sub(self.size) {
            Some(start) if start >= self.min => self.recentre(start),
            _ => {
                debug!(window = %self, min = %self.min, "previous year window clamped");
                *self
            },
        }
    }

    /// The window holding `year` under the same bounds and size.
    #[must_use]
    pub fn recentre(&self, year: Year) -> Self {
        Self::align(self.min, self.max, year, self.size)
    }

    /// Jan 1 of the first year in the window
    pub const fn start(&self) -> CalendarDate {
        self.start
    }

    /// Jan 1 of the last year in the window
    pub const fn end(&self) -> CalendarDate {
        self.end
    }

    pub const fn start_year(&self) -> Year {
        self.start.year_typed()
    }

    pub const fn end_year(&self) -> Year {
        self.end.year_typed()
    }

    pub const fn size(&self) -> u16 {
        self.size
    }

    /// Number of years actually in the window; below `size` only for a clamped final window.
    pub const fn year_count(&self) -> u16 {
        self.end.year() - self.start.year() + 1
    }

    pub fn contains(&self, year: Year) -> bool {
        self.start_year() <= year && year <= self.end_year()
    }
}
