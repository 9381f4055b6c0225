use crate::models::TemperatureTable;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Mean average temperature of one country over a view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryMean {
    pub country: String,
    pub avg_temp: f64,
    pub count: usize,
}

/// Groups a view by country and averages `avg_temp`.
pub struct CountryAggregator;

impl CountryAggregator {
    pub fn new() -> Self {
        Self
    }

    /// One entry per country, sorted by country name. Missing (NaN)
    /// measurements are skipped; a country with none left has a NaN mean.
    pub fn mean_by_country(&self, view: &TemperatureTable) -> Vec<CountryMean> {
        let mut groups: BTreeMap<&str, (f64, usize)> = BTreeMap::new();

        for record in view {
            let entry = groups.entry(record.country.as_str()).or_insert((0.0, 0));
            if !record.avg_temp.is_nan() {
                entry.0 += record.avg_temp;
                entry.1 += 1;
            }
        }

        groups
            .into_iter()
            .map(|(country, (sum, count))| CountryMean {
                country: country.to_string(),
                avg_temp: if count > 0 { sum / count as f64 } else { f64::NAN },
                count,
            })
            .collect()
    }
}

impl Default for CountryAggregator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TemperatureRecord;

    fn record(country: &str, year: i32, avg: f64) -> TemperatureRecord {
        TemperatureRecord::new(country.to_string(), year, avg, avg - 5.0, avg + 5.0)
    }

    #[test]
    fn test_mean_matches_arithmetic_mean() {
        let view = TemperatureTable::new(vec![
            record("India", 2000, 24.0),
            record("Norway", 2000, 1.0),
            record("India", 2001, 25.0),
            record("India", 2002, 26.5),
            record("Norway", 2001, 2.0),
        ]);

        let means = CountryAggregator::new().mean_by_country(&view);

        assert_eq!(means.len(), 2);
        assert_eq!(means[0].country, "India");
        assert!((means[0].avg_temp - (24.0 + 25.0 + 26.5) / 3.0).abs() < 1e-9);
        assert_eq!(means[0].count, 3);
        assert_eq!(means[1].country, "Norway");
        assert!((means[1].avg_temp - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_missing_measurements_are_skipped() {
        let view = TemperatureTable::new(vec![
            record("Chad", 2000, 28.0),
            record("Chad", 2001, f64::NAN),
            record("Mali", 2000, f64::NAN),
        ]);

        let means = CountryAggregator::new().mean_by_country(&view);

        assert_eq!(means[0].avg_temp, 28.0);
        assert_eq!(means[0].count, 1);
        assert!(means[1].avg_temp.is_nan());
    }

    #[test]
    fn test_empty_view() {
        let means = CountryAggregator::new().mean_by_country(&TemperatureTable::default());
        assert!(means.is_empty());
    }
}
