use crate::models::{TemperatureRecord, TemperatureTable};
use tracing::debug;

/// Produces the range-filtered and country-filtered views of a table.
///
/// Both operations are pure: they never touch the input table and return
/// rows in their original order. Unmatched filters yield empty views.
pub struct FilterEngine;

impl FilterEngine {
    pub fn new() -> Self {
        Self
    }

    /// Rows with `low <= year <= high`. An inverted range yields an empty view.
    pub fn filter_by_year_range(&self, table: &TemperatureTable, low: i32, high: i32) -> TemperatureTable {
        let view = self.select(table, |r| (low..=high).contains(&r.year));
        debug!(low, high, rows = view.len(), "Range-filtered view");
        view
    }

    /// Rows whose country equals `name` exactly (case-sensitive).
    pub fn filter_by_country(&self, table: &TemperatureTable, name: &str) -> TemperatureTable {
        let view = self.select(table, |r| r.country == name);
        debug!(country = name, rows = view.len(), "Country-filtered view");
        view
    }

    fn select<F>(&self, table: &TemperatureTable, predicate: F) -> TemperatureTable
    where
        F: Fn(&TemperatureRecord) -> bool,
    {
        table.iter().filter(|&r| predicate(r)).cloned().collect()
    }
}

impl Default for FilterEngine {
    fn default() -> Self {
        Self::new()
    }
}
