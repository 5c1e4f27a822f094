use crate::{CalendarDate, MonthAnchor, PickerConfig};

/// Whether `date` is disabled for lying before or after `today`.
///
/// `today` itself is never disabled by this rule.
pub fn is_past_or_future_disabled(
    date: CalendarDate,
    today: CalendarDate,
    disable_past: bool,
    disable_future: bool,
) -> bool {
    (disable_past && date < today) || (disable_future && date > today)
}

/// Whether `date` is disabled for falling outside `anchor`'s month.
pub fn is_out_of_month_disabled(
    date: CalendarDate,
    anchor: MonthAnchor,
    disable_out_of_month: bool,
) -> bool {
    disable_out_of_month && !anchor.contains(&date)
}

/// Grid column (1-7, Monday first) for the first cell of an unpadded day grid.
pub fn grid_column_for_first_cell(date: CalendarDate) -> u8 {
    // number_from_monday is 1..=7 with Sunday as 7
    date.weekday().number_from_monday() as u8
}

/// The disabling flags of a picker, applied per day cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DateRangePolicy {
    pub disable_past:         bool,
    pub disable_future:       bool,
    pub disable_out_of_month: bool,
}

impl DateRangePolicy {
    pub const fn from_config(config: &PickerConfig) -> Self {
        Self {
            disable_past:         config.disable_past,
            disable_future:       config.disable_future,
            disable_out_of_month: config.disable_out_of_month,
        }
    }

    /// Days past the supported year range are always disabled.
    pub fn is_day_disabled(
        &self,
        date: CalendarDate,
        anchor: MonthAnchor,
        today: CalendarDate,
    ) -> bool {
        !date.is_supported()
            || is_past_or_future_disabled(date, today, self.disable_past, self.disable_future)
            || is_out_of_month_disabled(date, anchor, self.disable_out_of_month)
    }
}

impl From<&PickerConfig> for DateRangePolicy {
    fn from(config: &PickerConfig) -> Self {
        Self::from_config(config)
    }
}
