use serde::{Deserialize, Serialize};

use crate::{
    CalendarDate, DEFAULT_MAX_YEAR, DEFAULT_MIN_YEAR, DEFAULT_WINDOW_SIZE, DisplayMode, ParseError,
    WindowError, Year, prelude::*,
};

/// The smallest unit the header navigates by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    /// Prev/next step one month; no drill-down views.
    #[display(fmt = "month")]
    Month,
    /// Month and year labels drill into month and year grids; prev/next page years.
    #[default]
    #[display(fmt = "year")]
    Year,
}

/// Per-instance picker settings.
///
/// Every field is optional when deserializing; missing fields take the
/// values of `PickerConfig::default()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct PickerConfig {
    pub disable_past:         bool,
    pub disable_future:       bool,
    pub disable_out_of_month: bool,
    pub display_mode:         DisplayMode,
    pub granularity:          Granularity,
    pub min_year:             Year,
    pub max_year:             Year,
    /// Years per page of the year grid.
    pub window_size:          u16,
    /// Initially selected day; today when absent.
    pub value:                Option<CalendarDate>,
}

/// Error type for picker configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// `min_year` is after `max_year`.
    #[error("Invalid year bounds: min_year ({min}) is after max_year ({max})")]
    InvalidBounds { min: Year, max: Year },

    /// `window_size` is zero.
    #[error("window_size must be at least 1")]
    ZeroWindowSize,

    /// Error resolving a date, e.g. today's date from the local clock.
    #[error(transparent)]
    Date(#[from] ParseError),
}

impl From<WindowError> for ConfigError {
    fn from(err: WindowError) -> Self {
        match err {
            WindowError::InvalidBounds { min, max } => Self::InvalidBounds { min, max },
            WindowError::ZeroWindowSize => Self::ZeroWindowSize,
        }
    }
}

impl PickerConfig {
    /// Checks the invariants construction relies on.
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidBounds` if `min_year > max_year` and
    /// `ConfigError::ZeroWindowSize` if `window_size == 0`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_year > self.max_year {
            return Err(ConfigError::InvalidBounds {
                min: self.min_year,
                max: self.max_year,
            });
        }
        if self.window_size == 0 {
            return Err(ConfigError::ZeroWindowSize);
        }
        Ok(())
    }
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            disable_past:         false,
            disable_future:       false,
            disable_out_of_month: true,
            display_mode:         DisplayMode::default(),
            granularity:          Granularity::default(),
            min_year:             Year::saturating(DEFAULT_MIN_YEAR),
            max_year:             Year::saturating(DEFAULT_MAX_YEAR),
            window_size:          DEFAULT_WINDOW_SIZE,
            value:                None,
        }
    }
}
