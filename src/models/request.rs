use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{DashboardError, Result};

/// Widget state for one dashboard refresh: the year-range slider value and
/// the selected country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct DashboardRequest {
    #[validate(range(min = 1901, max = 2022))]
    pub start_year: i32,

    #[validate(range(min = 1901, max = 2022))]
    pub end_year: i32,

    pub country: String,
}

impl DashboardRequest {
    pub fn new(start_year: i32, end_year: i32, country: impl Into<String>) -> Self {
        Self {
            start_year,
            end_year,
            country: country.into(),
        }
    }

    /// Check the slider bounds and that the range is not inverted.
    pub fn check(&self) -> Result<()> {
        self.validate()?;

        if self.start_year > self.end_year {
            return Err(DashboardError::InvalidYearRange {
                start: self.start_year,
                end: self.end_year,
            });
        }

        Ok(())
    }
}

/// Partial widget state. Missing fields keep their current value, so a
/// client can change only the country or only the range.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RequestOverrides {
    #[serde(default)]
    pub start_year: Option<i32>,
    #[serde(default)]
    pub end_year: Option<i32>,
    #[serde(default)]
    pub country: Option<String>,
}

impl RequestOverrides {
    pub fn apply(self, base: DashboardRequest) -> DashboardRequest {
        DashboardRequest {
            start_year: self.start_year.unwrap_or(base.start_year),
            end_year: self.end_year.unwrap_or(base.end_year),
            country: self.country.unwrap_or(base.country),
        }
    }
}
