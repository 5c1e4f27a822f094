use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::{
    CalendarDate, ConfigError, DateRangePolicy, Granularity, MonthAnchor, PickerConfig,
    WEEKDAY_LABELS, Year, YearWindow, days_for_month, grid_column_for_first_cell,
    months_for_year, prelude::*, years_in_window,
};

/// Which grid the picker is showing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    #[default]
    #[display(fmt = "day")]
    Day,
    #[display(fmt = "month")]
    Month,
    #[display(fmt = "year")]
    Year,
}

/// What activating a cell selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CellKind {
    Day,
    Month,
    Year,
}

/// One clickable cell handed to the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cell {
    pub date:         CalendarDate,
    pub kind:         CellKind,
    pub label:        String,
    pub disabled:     bool,
    pub selected:     bool,
    /// Weekday column (1-7) of the first day cell, so unpadded grids line up.
    pub column_start: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Header {
    /// Month-granularity title, e.g. "March 2024".
    Title(String),
    /// Clickable month and year labels that open the month and year grids.
    DrillDown { month: String, year: String },
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct View {
    pub mode:       ViewMode,
    pub header:     Header,
    /// Whether prev/next controls are shown.
    pub navigation: bool,
    /// Column headers, present only in the day grid.
    pub weekdays:   Option<[&'static str; 7]>,
    pub cells:      Vec<Cell>,
}

type ChangeCallback = Box<dyn FnMut(CalendarDate)>;

/// Picker session state; [`DatePicker::view`] derives the visible grid from it.
pub struct DatePicker {
    config:    PickerConfig,
    policy:    DateRangePolicy,
    mode:      ViewMode,
    anchor:    MonthAnchor,
    window:    YearWindow,
    selected:  CalendarDate,
    today:     CalendarDate,
    on_change: Option<ChangeCallback>,
}

impl DatePicker {
    /// Creates a picker, using the local clock for "today".
    ///
    /// # Errors
    /// Returns `ConfigError` if the configuration is invalid or the local
    /// date is outside the supported year range.
    pub fn new(config: PickerConfig) -> Result<Self, ConfigError> {
        Self::new_at(config, CalendarDate::today()?)
    }

    /// Creates a picker with an explicit "today".
    ///
    /// The initial month keeps the selection's month but its year is clamped
    /// into `[min_year, max_year]`.
    ///
    /// # Errors
    /// Returns `ConfigError` if the configuration is invalid.
    pub fn new_at(config: PickerConfig, today: CalendarDate) -> Result<Self, ConfigError> {
        config.validate()?;

        let selected = config.value.unwrap_or(today);
        let year = selected
            .year_typed()
            .clamp_to(config.min_year, config.max_year);
        let anchor = MonthAnchor::new(year, selected.month_typed());
        let window = YearWindow::compute(
            config.min_year,
            config.max_year,
            anchor.first_day(),
            config.window_size,
        )?;

        debug!(%selected, %anchor, %window, granularity = %config.granularity, "date picker created");

        Ok(Self {
            policy: DateRangePolicy::from_config(&config),
            config,
            mode: ViewMode::Day,
            anchor,
            window,
            selected,
            today,
            on_change: None,
        })
    }

    /// Registers the callback fired when a day is committed.
    #[must_use]
    pub fn on_change(mut self, callback: impl FnMut(CalendarDate) + 'static) -> Self {
        self.on_change = Some(Box::new(callback));
        self
    }

    pub const fn config(&self) -> &PickerConfig {
        &self.config
    }

    pub const fn mode(&self) -> ViewMode {
        self.mode
    }

    pub const fn anchor(&self) -> MonthAnchor {
        self.anchor
    }

    pub const fn window(&self) -> YearWindow {
        self.window
    }

    pub const fn selected(&self) -> CalendarDate {
        self.selected
    }

    pub const fn active_year(&self) -> Year {
        self.anchor.year()
    }

    pub const fn today(&self) -> CalendarDate {
        self.today
    }

    /// Moves "today" forward, e.g. when a session crosses midnight.
    pub fn set_today(&mut self, today: CalendarDate) {
        self.today = today;
    }

    /// Opens the month grid from the header's month label.
    ///
    /// Returns `false` when the picker has no drill-down views.
    pub fn open_month_view(&mut self) -> bool {
        self.drill_to(ViewMode::Month)
    }

    /// Opens the year grid from the header's year label.
    ///
    /// Returns `false` when the picker has no drill-down views.
    pub fn open_year_view(&mut self) -> bool {
        self.drill_to(ViewMode::Year)
    }

    fn drill_to(&mut self, mode: ViewMode) -> bool {
        if self.config.granularity != Granularity::Year {
            debug!(%mode, "drill-down ignored for month granularity");
            return false;
        }
        self.set_mode(mode);
        true
    }

    fn set_mode(&mut self, mode: ViewMode) {
        if self.mode != mode {
            debug!(from = %self.mode, to = %mode, "view changed");
            self.mode = mode;
        }
    }

    /// Steps forward: one month for month granularity, one year window otherwise.
    pub fn next(&mut self) {
        match self.config.granularity {
            Granularity::Month => {
                let max = self.config.max_year;
                self.step_month(self.anchor.next().filter(|a| a.year() <= max));
            },
            Granularity::Year => self.window = self.window.next(),
        }
    }

    /// Steps backward: one month for month granularity, one year window otherwise.
    pub fn previous(&mut self) {
        match self.config.granularity {
            Granularity::Month => {
                let min = self.config.min_year;
                self.step_month(self.anchor.previous().filter(|a| a.year() >= min));
            },
            Granularity::Year => self.window = self.window.previous(),
        }
    }

    fn step_month(&mut self, target: Option<MonthAnchor>) {
        match target {
            Some(anchor) => {
                debug!(from = %self.anchor, to = %anchor, "month changed");
                self.anchor = anchor;
            },
            None => debug!(anchor = %self.anchor, "month navigation clamped"),
        }
    }

    /// Commits `date` as the selection and fires the change callback.
    ///
    /// Returns `false` without side effects when the day is disabled.
    pub fn select_day(&mut self, date: CalendarDate) -> bool {
        if self.policy.is_day_disabled(date, self.anchor, self.today) {
            debug!(%date, "disabled day ignored");
            return false;
        }
        self.selected = date;
        debug!(%date, "day committed");
        if let Some(callback) = self.on_change.as_mut() {
            callback(date);
        }
        true
    }

    /// Shows the day grid of `anchor`'s month.
    pub fn select_month(&mut self, anchor: MonthAnchor) {
        self.anchor = anchor;
        self.set_mode(ViewMode::Day);
    }

    /// Shows the month grid of `year`, moving the window to contain it.
    pub fn select_year(&mut self, year: Year) {
        let year = year.clamp_to(self.config.min_year, self.config.max_year);
        self.anchor = MonthAnchor::january(year);
        self.window = self.window.recentre(year);
        self.set_mode(ViewMode::Month);
    }

    /// Dispatches a cell from the current view.
    ///
    /// Cells from another view and disabled day cells are ignored and
    /// return `false`.
    pub fn activate(&mut self, cell: &Cell) -> bool {
        match (cell.kind, self.mode) {
            (CellKind::Day, ViewMode::Day) => self.select_day(cell.date),
            (CellKind::Month, ViewMode::Month) => {
                self.select_month(MonthAnchor::containing(cell.date));
                true
            },
            (CellKind::Year, ViewMode::Year) => {
                self.select_year(cell.date.year_typed());
                true
            },
            (kind, mode) => {
                debug!(?kind, %mode, "stale cell ignored");
                false
            },
        }
    }

    /// Builds the render model for the current state.
    pub fn view(&self) -> View {
        let cells = match self.mode {
            ViewMode::Day => self.day_cells(),
            ViewMode::Month => self.month_cells(),
            ViewMode::Year => self.year_cells(),
        };

        View {
            mode: self.mode,
            header: self.header(),
            navigation: self.config.granularity == Granularity::Month
                || self.mode == ViewMode::Year,
            weekdays: (self.mode == ViewMode::Day).then_some(WEEKDAY_LABELS),
            cells,
        }
    }

    fn header(&self) -> Header {
        match self.config.granularity {
            Granularity::Month => Header::Title(self.anchor.to_string()),
            Granularity::Year => Header::DrillDown {
                month: self.anchor.month().name().to_owned(),
                year:  self.active_year().to_string(),
            },
        }
    }

    fn day_cells(&self) -> Vec<Cell> {
        days_for_month(self.anchor, self.config.display_mode)
            .into_iter()
            .enumerate()
            .map(|(index, date)| Cell {
                date,
                kind: CellKind::Day,
                label: date.day().to_string(),
                disabled: self.policy.is_day_disabled(date, self.anchor, self.today),
                selected: date == self.selected,
                column_start: (index == 0).then(|| grid_column_for_first_cell(date)),
            })
            .collect()
    }

    fn month_cells(&self) -> Vec<Cell> {
        months_for_year(self.active_year())
            .into_iter()
            .map(|month| Cell {
                date:         month.first_day(),
                kind:         CellKind::Month,
                label:        month.month().name().to_owned(),
                disabled:     false,
                selected:     month == self.anchor,
                column_start: None,
            })
            .collect()
    }

    fn year_cells(&self) -> Vec<Cell> {
        let active = self.active_year();
        years_in_window(&self.window)
            .into_iter()
            .map(|year| Cell {
                date:         year,
                kind:         CellKind::Year,
                label:        year.year_typed().to_string(),
                disabled:     false,
                selected:     year.year_typed() == active,
                column_start: None,
            })
            .collect()
    }
}

impl fmt::Debug for DatePicker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatePicker")
            .field("config", &self.config)
            .field("mode", &self.mode)
            .field("anchor", &self.anchor)
            .field("window", &self.window)
            .field("selected", &self.selected)
            .field("today", &self.today)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::test_utils::{anchor, date, year};
    use crate::DisplayMode;

    fn picker(config: PickerConfig) -> DatePicker {
        DatePicker::new_at(config, date(2024, 6, 15)).unwrap()
    }

    fn recording(config: PickerConfig) -> (DatePicker, Rc<RefCell<Vec<CalendarDate>>>) {
        let committed = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&committed);
        let picker = picker(config).on_change(move |d| sink.borrow_mut().push(d));
        (picker, committed)
    }

    fn find<'a>(view: &'a View, label: &str) -> &'a Cell {
        view.cells
            .iter()
            .find(|c| c.label == label && !c.disabled)
            .unwrap()
    }

    #[test]
    fn test_march_2024_padded_grid() {
        let p = picker(PickerConfig {
            value: Some(date(2024, 3, 10)),
            ..PickerConfig::default()
        });
        let view = p.view();

        assert_eq!(view.mode, ViewMode::Day);
        assert_eq!(view.cells.len(), 35);

        let first = &view.cells[0];
        assert_eq!(first.date, date(2024, 2, 26));
        assert!(first.disabled, "out of month");
        assert_eq!(first.label, "26");
        assert_eq!(first.column_start, Some(1));

        let last = &view.cells[34];
        assert_eq!(last.date, date(2024, 3, 31));
        assert!(!last.disabled);
        assert_eq!(last.column_start, None);

        let selected: Vec<_> = view.cells.iter().filter(|c| c.selected).collect();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].date, date(2024, 3, 10));
    }

    #[test]
    fn test_exact_month_grid_aligns_first_column() {
        let p = picker(PickerConfig {
            value: Some(date(2024, 3, 10)),
            display_mode: DisplayMode::ExactMonth,
            ..PickerConfig::default()
        });
        let view = p.view();
        assert_eq!(view.cells.len(), 31);
        assert_eq!(view.cells[0].date, date(2024, 3, 1));
        assert_eq!(view.cells[0].column_start, Some(5));
    }

    #[test]
    fn test_default_value_is_today() {
        let p = picker(PickerConfig::default());
        assert_eq!(p.selected(), date(2024, 6, 15));
        assert_eq!(p.anchor(), anchor(2024, 6));
        assert_eq!(p.window().to_string(), "2020/2031");
    }

    #[test]
    fn test_day_view_header_and_chrome() {
        let p = picker(PickerConfig {
            value: Some(date(2024, 3, 10)),
            ..PickerConfig::default()
        });
        let view = p.view();
        assert_eq!(
            view.header,
            Header::DrillDown {
                month: "March".into(),
                year:  "2024".into(),
            }
        );
        assert!(!view.navigation);
        assert_eq!(view.weekdays, Some(WEEKDAY_LABELS));
    }

    #[test]
    fn test_disable_past_blocks_selection() {
        let (mut p, committed) = recording(PickerConfig {
            disable_past: true,
            ..PickerConfig::default()
        });

        let view = p.view();
        let yesterday = view.cells.iter().find(|c| c.date == date(2024, 6, 14)).unwrap();
        assert!(yesterday.disabled);
        assert!(!p.activate(yesterday));
        assert_eq!(p.selected(), date(2024, 6, 15));

        let tomorrow = view.cells.iter().find(|c| c.date == date(2024, 6, 16)).unwrap();
        assert!(!tomorrow.disabled);
        assert!(p.activate(tomorrow));
        assert_eq!(p.selected(), date(2024, 6, 16));
        assert_eq!(*committed.borrow(), vec![date(2024, 6, 16)]);
    }

    #[test]
    fn test_out_of_month_days_selectable_when_allowed() {
        let (mut p, committed) = recording(PickerConfig {
            value: Some(date(2024, 3, 10)),
            disable_out_of_month: false,
            ..PickerConfig::default()
        });
        let view = p.view();
        assert!(view.cells.iter().all(|c| !c.disabled));
        assert!(p.activate(&view.cells[0]));
        assert_eq!(*committed.borrow(), vec![date(2024, 2, 26)]);
    }

    #[test]
    fn test_drill_down_round_trip() {
        let (mut p, committed) = recording(PickerConfig {
            min_year: year(2000),
            max_year: year(2050),
            value: Some(date(2024, 3, 10)),
            ..PickerConfig::default()
        });

        assert!(p.open_month_view());
        let months = p.view();
        assert_eq!(months.mode, ViewMode::Month);
        assert_eq!(months.cells.len(), 12);
        assert!(months.weekdays.is_none());
        assert!(!months.navigation);
        assert!(find(&months, "March").selected);

        assert!(p.open_year_view());
        let years = p.view();
        assert_eq!(years.mode, ViewMode::Year);
        assert!(years.navigation);
        let labels: Vec<_> = years.cells.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels.first(), Some(&"2024"));
        assert_eq!(labels.last(), Some(&"2035"));
        assert!(find(&years, "2024").selected);

        p.next();
        let later = p.view();
        assert_eq!(find(&later, "2036").date, date(2036, 1, 1));
        assert!(later.cells.iter().all(|c| !c.selected));

        assert!(p.activate(find(&later, "2040")));
        assert_eq!(p.mode(), ViewMode::Month);
        assert_eq!(p.anchor(), anchor(2040, 1));
        assert_eq!(p.window().to_string(), "2036/2047");

        let months = p.view();
        assert!(find(&months, "January").selected);
        assert!(p.activate(find(&months, "May")));
        assert_eq!(p.mode(), ViewMode::Day);
        assert_eq!(p.anchor(), anchor(2040, 5));
        assert_eq!(
            p.view().header,
            Header::DrillDown {
                month: "May".into(),
                year:  "2040".into(),
            }
        );

        assert!(committed.borrow().is_empty(), "drill-down never commits");
        assert_eq!(p.selected(), date(2024, 3, 10));
    }

    #[test]
    fn test_year_window_paging_clamps_at_bounds() {
        let mut p = picker(PickerConfig {
            min_year: year(2000),
            max_year: year(2050),
            value: Some(date(2049, 1, 1)),
            ..PickerConfig::default()
        });
        assert_eq!(p.window().to_string(), "2048/2050");
        p.next();
        assert_eq!(p.window().to_string(), "2048/2050");

        for _ in 0..10 {
            p.previous();
        }
        assert_eq!(p.window().to_string(), "2000/2011");
    }

    #[test]
    fn test_stale_cells_are_ignored() {
        let mut p = picker(PickerConfig::default());
        let day_cell = p.view().cells[10].clone();
        p.open_year_view();
        assert!(!p.activate(&day_cell));
        assert_eq!(p.mode(), ViewMode::Year);
    }

    #[test]
    fn test_month_granularity_navigation() {
        let mut p = picker(PickerConfig {
            granularity: Granularity::Month,
            min_year: year(2024),
            max_year: year(2024),
            value: Some(date(2024, 11, 5)),
            ..PickerConfig::default()
        });
        let view = p.view();
        assert_eq!(view.header, Header::Title("November 2024".into()));
        assert!(view.navigation);

        assert!(!p.open_month_view());
        assert!(!p.open_year_view());
        assert_eq!(p.mode(), ViewMode::Day);

        p.next();
        assert_eq!(p.anchor(), anchor(2024, 12));
        p.next();
        assert_eq!(p.anchor(), anchor(2024, 12), "clamped at max_year");

        for _ in 0..12 {
            p.previous();
        }
        assert_eq!(p.anchor(), anchor(2024, 1), "clamped at min_year");
    }

    #[test]
    fn test_month_navigation_crosses_year_boundary() {
        let mut p = picker(PickerConfig {
            granularity: Granularity::Month,
            value: Some(date(2024, 1, 20)),
            ..PickerConfig::default()
        });
        p.previous();
        assert_eq!(p.anchor(), anchor(2023, 12));
        assert_eq!(p.view().header, Header::Title("December 2023".into()));
        p.next();
        p.next();
        assert_eq!(p.anchor(), anchor(2024, 2));
    }

    #[test]
    fn test_initial_value_outside_bounds_is_clamped() {
        let bounded = |granularity| PickerConfig {
            granularity,
            min_year: year(2030),
            max_year: year(2050),
            value: Some(date(2024, 3, 10)),
            ..PickerConfig::default()
        };

        let mut p = picker(bounded(Granularity::Year));
        assert_eq!(p.anchor(), anchor(2030, 3));
        assert_eq!(p.selected(), date(2024, 3, 10));
        assert!(p.window().contains(p.active_year()));
        assert_eq!(
            p.view().header,
            Header::DrillDown {
                month: "March".into(),
                year:  "2030".into(),
            }
        );
        p.open_year_view();
        let years = p.view();
        assert_eq!(years.cells.iter().filter(|c| c.selected).count(), 1);
        assert!(find(&years, "2030").selected);

        let mut p = picker(bounded(Granularity::Month));
        assert_eq!(p.anchor(), anchor(2030, 3));
        p.previous();
        assert_eq!(p.anchor(), anchor(2030, 2));
        p.next();
        p.next();
        assert_eq!(p.anchor(), anchor(2030, 4));

        let mut p = picker(PickerConfig {
            value: Some(date(2070, 8, 1)),
            ..bounded(Granularity::Month)
        });
        assert_eq!(p.anchor(), anchor(2050, 8));
        assert!(p.window().contains(p.active_year()));
        for _ in 0..6 {
            p.next();
        }
        assert_eq!(p.anchor(), anchor(2050, 12), "clamped at max_year");
    }

    #[test]
    fn test_december_9999_pads_to_full_weeks() {
        let (mut p, committed) = recording(PickerConfig {
            disable_out_of_month: false,
            ..PickerConfig::default()
        });
        p.select_month(anchor(9999, 12));
        let view = p.view();

        assert_eq!(view.cells.len() % 7, 0);
        assert_eq!(view.cells.len(), 35);
        let last = &view.cells[34];
        assert_eq!(last.date.weekday(), chrono::Weekday::Sun);
        assert_eq!(last.label, "2");
        assert!(last.disabled);
        assert!(!p.activate(last));
        assert!(!view.cells[32].disabled, "9999-12-31");
        assert!(committed.borrow().is_empty());
    }

    #[test]
    fn test_view_is_idempotent() {
        let p = picker(PickerConfig::default());
        assert_eq!(p.view(), p.view());
    }

    #[test]
    fn test_set_today_moves_disabling() {
        let mut p = picker(PickerConfig {
            disable_future: true,
            ..PickerConfig::default()
        });
        assert!(!p.select_day(date(2024, 6, 20)));
        p.set_today(date(2024, 6, 25));
        assert!(p.select_day(date(2024, 6, 20)));
    }

    #[test]
    fn test_invalid_config_fails_fast() {
        let err = DatePicker::new_at(
            PickerConfig {
                min_year: year(2050),
                max_year: year(2000),
                ..PickerConfig::default()
            },
            date(2024, 6, 15),
        )
        .unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidBounds {
                min: year(2050),
                max: year(2000)
            }
        );
    }

    #[test]
    fn test_new_uses_local_clock() {
        let p = DatePicker::new(PickerConfig::default()).unwrap();
        assert_eq!(p.selected(), p.today());
    }

    #[test]
    fn test_view_serializes_for_renderers() {
        let p = picker(PickerConfig {
            value: Some(date(2024, 3, 10)),
            ..PickerConfig::default()
        });
        let json = serde_json::to_value(p.view()).unwrap();
        assert_eq!(json["mode"], "day");
        assert_eq!(json["header"]["drill_down"]["month"], "March");
        assert_eq!(json["cells"][0]["date"], "2024-02-26");
        assert_eq!(json["cells"][0]["kind"], "day");
        assert_eq!(json["weekdays"][6], "Sun");
    }
}
