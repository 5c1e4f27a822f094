use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::{CalendarDate, DAYS_PER_WEEK, Month, MonthAnchor, Year, YearWindow, prelude::*};

/// How much of the surrounding weeks the day grid shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayMode {
    /// Only the days of the anchor month.
    #[display(fmt = "exact_month")]
    ExactMonth,
    /// Extended back to Monday and forward to Sunday so every row is a full week.
    #[default]
    #[display(fmt = "padded_to_weeks")]
    PaddedToWeeks,
}

/// The days shown for `anchor`'s month, ascending.
///
/// In `PaddedToWeeks` mode the first day is a Monday and the last a Sunday.
/// December 9999 pads into January 10000; see [`CalendarDate::is_supported`].
pub fn days_for_month(anchor: MonthAnchor, mode: DisplayMode) -> Vec<CalendarDate> {
    let mut start = anchor.first_day();
    let mut end = anchor.last_day();

    if mode == DisplayMode::PaddedToWeeks {
        let back = start.weekday().num_days_from_monday();
        start = start.checked_sub_days(u64::from(back)).unwrap_or(start);

        let forward = u32::from(DAYS_PER_WEEK) - 1 - end.weekday().num_days_from_monday();
        end = end.checked_add_days(u64::from(forward)).unwrap_or(end);
    }

    let mut days: Vec<_> = start.days_through(end).collect();
    if mode == DisplayMode::PaddedToWeeks {
        // non-zero only when the week ran past 9999-12-31
        let week = usize::from(DAYS_PER_WEEK);
        let short = (week - days.len() % week) % week;
        days.extend((1..=short).filter_map(|d| {
            u8::try_from(d)
                .ok()
                .and_then(|d| CalendarDate::past_max(d).ok())
        }));
    }

    trace!(%anchor, %mode, cells = days.len(), "generated day grid");
    days
}

/// The twelve months of `year`, January first.
pub fn months_for_year(year: Year) -> Vec<MonthAnchor> {
    Month::all().map(|month| MonthAnchor::new(year, month)).collect()
}

/// Jan 1 of every year in `window`, ascending.
pub fn years_in_window(window: &YearWindow) -> Vec<CalendarDate> {
    (window.start().year()..=window.end().year())
        .filter_map(|y| Year::new(y).ok())
        .map(CalendarDate::new_year)
        .collect()
}
