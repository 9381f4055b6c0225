use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use validator::Validate;

use crate::error::Result;

/// One (country, year) observation in °C.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct TemperatureRecord {
    #[validate(length(min = 1))]
    pub country: String,

    #[validate(range(min = 1901, max = 2022))]
    pub year: i32,

    #[validate(range(min = -100.0, max = 100.0))]
    pub avg_temp: f64,

    #[validate(range(min = -100.0, max = 100.0))]
    pub min_temp: f64,

    #[validate(range(min = -100.0, max = 100.0))]
    pub max_temp: f64,
}

impl TemperatureRecord {
    pub fn new(country: String, year: i32, avg_temp: f64, min_temp: f64, max_temp: f64) -> Self {
        Self {
            country,
            year,
            avg_temp,
            min_temp,
            max_temp,
        }
    }

    pub fn is_ordered(&self) -> bool {
        self.min_temp <= self.avg_temp && self.avg_temp <= self.max_temp
    }

    pub fn check(&self) -> Result<()> {
        self.validate()?;
        Ok(())
    }
}

/// Immutable in-memory table of temperature records.
///
/// Views produced by the filter engine are new tables; the loaded base table
/// is never mutated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TemperatureTable {
    records: Vec<TemperatureRecord>,
}

impl TemperatureTable {
    pub fn new(records: Vec<TemperatureRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[TemperatureRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TemperatureRecord> {
        self.records.iter()
    }

    /// Distinct countries, sorted. These are the country dropdown options.
    pub fn countries(&self) -> Vec<String> {
        self.records
            .iter()
            .map(|r| r.country.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    pub fn year_span(&self) -> Option<(i32, i32)> {
        let min = self.records.iter().map(|r| r.year).min()?;
        let max = self.records.iter().map(|r| r.year).max()?;
        Some((min, max))
    }

    /// Number of rows repeating an earlier (country, year) pair.
    pub fn duplicate_count(&self) -> usize {
        let mut seen = HashSet::with_capacity(self.records.len());
        self.records
            .iter()
            .filter(|r| !seen.insert((r.country.as_str(), r.year)))
            .count()
    }
}

impl From<Vec<TemperatureRecord>> for TemperatureTable {
    fn from(records: Vec<TemperatureRecord>) -> Self {
        Self::new(records)
    }
}

impl FromIterator<TemperatureRecord> for TemperatureTable {
    fn from_iter<I: IntoIterator<Item = TemperatureRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a TemperatureTable {
    type Item = &'a TemperatureRecord;
    type IntoIter = std::slice::Iter<'a, TemperatureRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(country: &str, year: i32, avg: f64) -> TemperatureRecord {
        TemperatureRecord::new(country.to_string(), year, avg, avg - 5.0, avg + 5.0)
    }

    #[test]
    fn test_record_validation() {
        assert!(record("India", 1950, 24.5).check().is_ok());
        assert!(record("India", 1850, 24.5).check().is_err());
        assert!(record("", 1950, 24.5).check().is_err());

        let hot = TemperatureRecord::new("Nowhere".to_string(), 2000, 150.0, 10.0, 20.0);
        assert!(hot.check().is_err());
    }

    #[test]
    fn test_record_ordering() {
        assert!(record("Chad", 2001, 27.0).is_ordered());

        let inverted = TemperatureRecord::new("Chad".to_string(), 2001, 27.0, 30.0, 20.0);
        assert!(!inverted.is_ordered());
    }

    #[test]
    fn test_countries_are_distinct_and_sorted() {
        let table = TemperatureTable::new(vec![
            record("Norway", 1901, 1.0),
            record("India", 1901, 24.0),
            record("Norway", 1902, 1.2),
            record("Brazil", 1901, 25.0),
        ]);

        assert_eq!(table.countries(), vec!["Brazil", "India", "Norway"]);
        assert_eq!(table.year_span(), Some((1901, 1902)));
        assert_eq!(table.duplicate_count(), 0);
    }

    #[test]
    fn test_duplicates_and_empty_table() {
        let table = TemperatureTable::new(vec![
            record("Norway", 1901, 1.0),
            record("Norway", 1901, 1.1),
        ]);
        assert_eq!(table.duplicate_count(), 1);

        let empty = TemperatureTable::default();
        assert!(empty.is_empty());
        assert_eq!(empty.year_span(), None);
        assert!(empty.countries().is_empty());
    }
}
