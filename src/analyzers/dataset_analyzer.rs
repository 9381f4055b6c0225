use crate::error::{DashboardError, Result};
use crate::models::TemperatureTable;
use std::collections::HashSet;

#[derive(Debug)]
pub struct DatasetStatistics {
    pub total_records: usize,
    pub unique_countries: usize,
    pub year_range: (i32, i32),
    pub temperature_stats: TemperatureStats,
    pub duplicate_records: usize,
    pub incomplete_records: usize,
    /// Records outside the valid year or temperature bounds
    pub invalid_records: usize,
    /// Complete records where min <= avg <= max does not hold
    pub unordered_records: usize,
}

#[derive(Debug)]
pub struct TemperatureStats {
    pub min_temp: f64,
    pub max_temp: f64,
    pub avg_temp: f64,
    pub min_temp_location: String,
    pub max_temp_location: String,
}

pub struct DatasetAnalyzer;

impl DatasetAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(&self, table: &TemperatureTable) -> Result<DatasetStatistics> {
        let (first_year, last_year) = table
            .year_span()
            .ok_or_else(|| DashboardError::InvalidFormat("No records to analyze".to_string()))?;

        let mut countries = HashSet::new();
        let mut min_temp = f64::INFINITY;
        let mut max_temp = f64::NEG_INFINITY;
        let mut temp_sum = 0.0;
        let mut temp_count = 0usize;
        let mut min_temp_location = String::new();
        let mut max_temp_location = String::new();
        let mut incomplete = 0;
        let mut invalid = 0;
        let mut unordered = 0;

        for record in table {
            countries.insert(record.country.as_str());

            if record.min_temp < min_temp {
                min_temp = record.min_temp;
                min_temp_location = format!("{} ({})", record.country, record.year);
            }

            if record.max_temp > max_temp {
                max_temp = record.max_temp;
                max_temp_location = format!("{} ({})", record.country, record.year);
            }

            if !record.avg_temp.is_nan() {
                temp_sum += record.avg_temp;
                temp_count += 1;
            }

            if record.avg_temp.is_nan() || record.min_temp.is_nan() || record.max_temp.is_nan() {
                incomplete += 1;
            } else if !record.is_ordered() {
                unordered += 1;
            }

            if record.check().is_err() {
                invalid += 1;
            }
        }

        let avg_temp = if temp_count > 0 {
            temp_sum / temp_count as f64
        } else {
            f64::NAN
        };

        // Still infinite when every measurement was missing
        if min_temp == f64::INFINITY {
            min_temp = f64::NAN;
            min_temp_location = "No valid measurements".to_string();
        }
        if max_temp == f64::NEG_INFINITY {
            max_temp = f64::NAN;
            max_temp_location = "No valid measurements".to_string();
        }

        Ok(DatasetStatistics {
            total_records: table.len(),
            unique_countries: countries.len(),
            year_range: (first_year, last_year),
            temperature_stats: TemperatureStats {
                min_temp,
                max_temp,
                avg_temp,
                min_temp_location,
                max_temp_location,
            },
            duplicate_records: table.duplicate_count(),
            incomplete_records: incomplete,
            invalid_records: invalid,
            unordered_records: unordered,
        })
    }
}

impl Default for DatasetAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl DatasetStatistics {
    pub fn summary(&self) -> String {
        let temp_range = if self.temperature_stats.min_temp.is_nan()
            || self.temperature_stats.max_temp.is_nan()
        {
            "No valid measurements".to_string()
        } else {
            format!(
                "{:.1}°C to {:.1}°C",
                self.temperature_stats.min_temp, self.temperature_stats.max_temp
            )
        };

        format!(
            "Countries: {}\n\
            Years: {} to {} ({} years)\n\
            Records: {} total, {} incomplete, {} duplicate (country, year)\n\
            Suspect Records: {} out of bounds, {} with min/avg/max out of order\n\
            Temperature Range: {}",
            self.unique_countries,
            self.year_range.0,
            self.year_range.1,
            self.year_range.1 - self.year_range.0 + 1,
            self.total_records,
            self.incomplete_records,
            self.duplicate_records,
            self.invalid_records,
            self.unordered_records,
            temp_range
        )
    }

    pub fn detailed_summary(&self) -> String {
        let coldest = if self.temperature_stats.min_temp.is_nan() {
            "No valid measurements".to_string()
        } else {
            format!(
                "{:.1}°C in {}",
                self.temperature_stats.min_temp, self.temperature_stats.min_temp_location
            )
        };

        let hottest = if self.temperature_stats.max_temp.is_nan() {
            "No valid measurements".to_string()
        } else {
            format!(
                "{:.1}°C in {}",
                self.temperature_stats.max_temp, self.temperature_stats.max_temp_location
            )
        };

        let average = if self.temperature_stats.avg_temp.is_nan() {
            "No valid measurements".to_string()
        } else {
            format!("{:.1}°C", self.temperature_stats.avg_temp)
        };

        format!(
            "{}\n\n\
            Extreme Temperatures:\n\
            - Coldest: {}\n\
            - Hottest: {}\n\
            - Average: {}",
            self.summary(),
            coldest,
            hottest,
            average
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TemperatureRecord;

    #[test]
    fn test_statistics() {
        let table = TemperatureTable::new(vec![
            TemperatureRecord::new("India".to_string(), 1901, 24.0, 17.5, 31.0),
            TemperatureRecord::new("Norway".to_string(), 1901, 1.0, -6.5, 8.0),
            TemperatureRecord::new("Norway".to_string(), 1950, f64::NAN, -5.0, 9.0),
        ]);

        let stats = DatasetAnalyzer::new().analyze(&table).unwrap();

        assert_eq!(stats.total_records, 3);
        assert_eq!(stats.unique_countries, 2);
        assert_eq!(stats.year_range, (1901, 1950));
        assert_eq!(stats.temperature_stats.min_temp, -6.5);
        assert_eq!(stats.temperature_stats.min_temp_location, "Norway (1901)");
        assert_eq!(stats.temperature_stats.max_temp, 31.0);
        assert_eq!(stats.temperature_stats.avg_temp, 12.5);
        assert_eq!(stats.incomplete_records, 1);
        assert!(stats.detailed_summary().contains("Coldest: -6.5°C in Norway (1901)"));
    }

    #[test]
    fn test_suspect_records_are_counted() {
        let loader = crate::readers::TemperatureLoader::new();
        let table = loader
            .parse_csv(
                "c,y,a,mn,mx\n\
                 India,1850,500.0,0.0,0.0\n\
                 Chad,2001,27.0,30.0,20.0\n\
                 Chad,2002,27.5,21.0,34.0\n\
                 Chad,2003,,21.0,34.0\n",
            )
            .unwrap();

        let stats = DatasetAnalyzer::new().analyze(&table).unwrap();

        assert_eq!(stats.total_records, 4);
        assert_eq!(stats.invalid_records, 1);
        assert_eq!(stats.unordered_records, 2);
        assert_eq!(stats.incomplete_records, 1);
        assert!(stats
            .summary()
            .contains("Suspect Records: 1 out of bounds, 2 with min/avg/max out of order"));
    }

    #[test]
    fn test_empty_table_is_an_error() {
        assert!(DatasetAnalyzer::new().analyze(&TemperatureTable::default()).is_err());
    }
}
