use crate::{CalendarDate, Month, Year, prelude::*};

/// The month shown in the day grid, held as the first day of that month.
///
/// Every constructor truncates to the 1st, so a `MonthAnchor` is never
/// un-normalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Deref)]
#[display(fmt = "{} {}", "_0.month_typed()", "_0.year_typed()")]
pub struct MonthAnchor(CalendarDate);

impl MonthAnchor {
    pub const fn new(year: Year, month: Month) -> Self {
        Self(CalendarDate::first_of(year, month))
    }

    /// The anchor of the month `date` falls in.
    pub const fn containing(date: CalendarDate) -> Self {
        Self(date.first_of_month())
    }

    /// January of `year`.
    pub const fn january(year: Year) -> Self {
        Self(CalendarDate::new_year(year))
    }

    pub const fn first_day(&self) -> CalendarDate {
        self.0
    }

    pub const fn last_day(&self) -> CalendarDate {
        self.0.last_of_month()
    }

    pub const fn year(&self) -> Year {
        self.0.year_typed()
    }

    pub const fn month(&self) -> Month {
        self.0.month_typed()
    }

    /// Whether `date` lies between the first and last day of this month.
    pub fn contains(&self, date: &CalendarDate) -> bool {
        self.first_day() <= *date && *date <= self.last_day()
    }

    /// The following month, or `None` after December 9999.
    pub fn next(&self) -> Option<Self> {
        let month = self.month();
        if month.is_december() {
            self.year().checked_add(1).map(Self::january)
        } else {
            Month::new(month.get() + 1)
                .ok()
                .map(|m| Self::new(self.year(), m))
        }
    }

    /// The preceding month, or `None` before January of year 1.
    pub fn previous(&self) -> Option<Self> {
        let month = self.month();
        if month.is_january() {
            self.year()
                .checked_sub(1)
                .and_then(|y| Month::new(crate::DECEMBER).ok().map(|m| Self::new(y, m)))
        } else {
            Month::new(month.get() - 1)
                .ok()
                .map(|m| Self::new(self.year(), m))
        }
    }
}

impl From<CalendarDate> for MonthAnchor {
    fn from(date: CalendarDate) -> Self {
        Self::containing(date)
    }
}

impl From<MonthAnchor> for CalendarDate {
    fn from(anchor: MonthAnchor) -> Self {
        anchor.0
    }
}
