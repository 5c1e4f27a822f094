mod anchor;
mod config;
mod consts;
mod grid;
mod picker;
mod policy;
mod prelude;
mod types;
mod window;

pub use anchor::MonthAnchor;
pub use config::{ConfigError, Granularity, PickerConfig};
pub use consts::*;
pub use grid::{DisplayMode, days_for_month, months_for_year, years_in_window};
pub use picker::{Cell, CellKind, DatePicker, Header, View, ViewMode};
pub use policy::{
    DateRangePolicy, grid_column_for_first_cell, is_out_of_month_disabled,
    is_past_or_future_disabled,
};
pub use types::{Day, Month, Year, days_in_month, is_leap_year};
pub use window::{WindowError, YearWindow};

use crate::prelude::*;
use chrono::{DateTime, Datelike, Days, Local, NaiveDate, NaiveDateTime, TimeZone, Weekday};
use std::str::FromStr;

/// A calendar day with no time-of-day component.
///
/// Field order is year, month, day so the derived ordering is chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{}-{:02}-{:02}", "year", "month.get()", "day.get()")]
pub struct CalendarDate {
    year: Year,
    month: Month,
    day: Day,
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Invalid date format: {_0}")]
    InvalidFormat(String),
    #[display(fmt = "Invalid year: {} (must be {}-{})", "_0", MIN_YEAR, MAX_YEAR)]
    InvalidYear(u16),
    #[display(fmt = "Year {} is outside the supported range {}-{}", "_0", MIN_YEAR, MAX_YEAR)]
    YearOutOfRange(i32),
    #[display(fmt = "Invalid month: {} (must be 1-{})", "_0", MAX_MONTH)]
    InvalidMonth(u8),
    #[display(fmt = "Invalid day {day} for month {year}-{month:02}")]
    InvalidDay { month: u8, day: u8, year: u16 },
    #[display(fmt = "Empty date string")]
    EmptyInput,
}

impl std::error::Error for ParseError {}

impl CalendarDate {
    /// Creates a date, validating every component.
    ///
    /// # Errors
    /// Returns a `ParseError` naming the first invalid component.
    pub fn new(year: u16, month: u8, day: u8) -> Result<Self, ParseError> {
        let year = Year::new(year)?;
        let month = Month::new(month)?;
        let day = Day::new(day, year, month)?;
        Ok(Self { year, month, day })
    }

    /// The first day of `month` in `year`.
    pub const fn first_of(year: Year, month: Month) -> Self {
        Self {
            year,
            month,
            day: Day::FIRST,
        }
    }

    /// January 1st of `year`.
    pub const fn new_year(year: Year) -> Self {
        Self::first_of(year, Month::JANUARY)
    }

    /// January `day` of the year after `MAX_YEAR`.
    ///
    /// Only the trailing padding of December 9999 is built this way.
    pub(crate) fn past_max(day: u8) -> Result<Self, ParseError> {
        let year = Year::PAST_MAX;
        let month = Month::JANUARY;
        let day = Day::new(day, year, month)?;
        Ok(Self { year, month, day })
    }

    /// Today's date in the local time zone.
    ///
    /// # Errors
    /// Returns `ParseError::YearOutOfRange` if the clock reports a year outside `1..=9999`.
    pub fn today() -> Result<Self, ParseError> {
        Self::try_from(Local::now().date_naive())
    }

    /// Truncates a zoned timestamp to its calendar day.
    ///
    /// # Errors
    /// Returns `ParseError::YearOutOfRange` if the year is unsupported.
    pub fn from_datetime<Tz: TimeZone>(datetime: &DateTime<Tz>) -> Result<Self, ParseError> {
        Self::try_from(datetime.date_naive())
    }

    pub const fn year(&self) -> u16 {
        self.year.get()
    }

    pub const fn month(&self) -> u8 {
        self.month.get()
    }

    pub const fn day(&self) -> u8 {
        self.day.get()
    }

    pub const fn year_typed(&self) -> Year {
        self.year
    }

    pub const fn month_typed(&self) -> Month {
        self.month
    }

    pub const fn day_typed(&self) -> Day {
        self.day
    }

    /// Whether the year is within `1..=MAX_YEAR`; false only for padding past 9999-12-31.
    pub const fn is_supported(&self) -> bool {
        self.year.get() <= MAX_YEAR
    }

    #[must_use]
    pub const fn first_of_month(&self) -> Self {
        Self::first_of(self.year, self.month)
    }

    #[must_use]
    pub const fn last_of_month(&self) -> Self {
        Self {
            year: self.year,
            month: self.month,
            day: Day::last_of(self.year, self.month),
        }
    }

    #[must_use]
    pub const fn first_of_year(&self) -> Self {
        Self::new_year(self.year)
    }

    pub fn weekday(&self) -> Weekday {
        self.naive().weekday()
    }

    /// The following day, or `None` after 9999-12-31.
    pub fn succ(&self) -> Option<Self> {
        self.checked_add_days(1)
    }

    /// The preceding day, or `None` before 0001-01-01.
    pub fn pred(&self) -> Option<Self> {
        self.checked_sub_days(1)
    }

    pub fn checked_add_days(&self, days: u64) -> Option<Self> {
        self.naive()
            .checked_add_days(Days::new(days))
            .and_then(|d| Self::try_from(d).ok())
    }

    pub fn checked_sub_days(&self, days: u64) -> Option<Self> {
        self.naive()
            .checked_sub_days(Days::new(days))
            .and_then(|d| Self::try_from(d).ok())
    }

    /// Every day from `self` through `end` inclusive; empty when `end` is earlier.
    pub fn days_through(self, end: Self) -> impl Iterator<Item = Self> {
        std::iter::successors(Some(self), Self::succ).take_while(move |d| *d <= end)
    }

    fn naive(self) -> NaiveDate {
        // Components are validated on construction, so this always resolves.
        NaiveDate::from_ymd_opt(
            i32::from(self.year.get()),
            u32::from(self.month.get()),
            u32::from(self.day.get()),
        )
        .unwrap_or_default()
    }
}

impl TryFrom<NaiveDate> for CalendarDate {
    type Error = ParseError;

    fn try_from(date: NaiveDate) -> Result<Self, Self::Error> {
        let year = u16::try_from(date.year())
            .map_err(|_| ParseError::YearOutOfRange(date.year()))
            .and_then(|y| Year::new(y).map_err(|_| ParseError::YearOutOfRange(date.year())))?;
        // chrono guarantees month 1..=12 and day 1..=31
        let month = Month::new(u8::try_from(date.month()).unwrap_or(0))?;
        let day = Day::new(u8::try_from(date.day()).unwrap_or(0), year, month)?;
        Ok(Self { year, month, day })
    }
}

impl TryFrom<NaiveDateTime> for CalendarDate {
    type Error = ParseError;

    fn try_from(datetime: NaiveDateTime) -> Result<Self, Self::Error> {
        Self::try_from(datetime.date())
    }
}

impl From<CalendarDate> for NaiveDate {
    fn from(date: CalendarDate) -> Self {
        date.naive()
    }
}

impl FromStr for CalendarDate {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyInput);
        }

        // ISO format only: YYYY-MM-DD
        let parts: Vec<&str> = trimmed.split(DATE_SEPARATOR).map(str::trim).collect();
        if parts.len() != 3 {
            return Err(ParseError::InvalidFormat(format!(
                "Expected YYYY{DATE_SEPARATOR}MM{DATE_SEPARATOR}DD, found {} {DATE_SEPARATOR} separators: {trimmed}",
                parts.len() - 1
            )));
        }

        let year = Self::parse_u16(parts[0])?;
        let month = Self::parse_u8(parts[1])?;
        let day = Self::parse_u8(parts[2])?;
        Self::new(year, month, day)
    }
}

impl CalendarDate {
    fn parse_u16(s: &str) -> Result<u16, ParseError> {
        s.parse::<u16>()
            .map_err(|_| ParseError::InvalidFormat(s.to_owned()))
    }

    fn parse_u8(s: &str) -> Result<u8, ParseError> {
        s.parse::<u8>()
            .map_err(|_| ParseError::InvalidFormat(s.to_owned()))
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

#[cfg(test)]
pub(crate) mod test_utils {
    use crate::{CalendarDate, MonthAnchor, Year};

    pub fn date(year: u16, month: u8, day: u8) -> CalendarDate {
        CalendarDate::new(year, month, day).unwrap()
    }

    pub fn year(value: u16) -> Year {
        Year::new(value).unwrap()
    }

    pub fn anchor(year: u16, month: u8) -> MonthAnchor {
        MonthAnchor::containing(date(year, month, 1))
    }
}
