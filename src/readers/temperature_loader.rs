use crate::error::{DashboardError, Result};
use crate::models::{TemperatureRecord, TemperatureTable};
use crate::utils::constants::{COLUMN_COUNT, COLUMN_NAMES, DEFAULT_HTTP_TIMEOUT_SECS, YEAR_FORMAT};
use crate::utils::progress::ProgressReporter;
use chrono::{Datelike, NaiveDate};
use csv::{ReaderBuilder, StringRecord, Trim};
use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};
use std::borrow::Cow;
use std::io::ErrorKind;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Loads the country temperature CSV from a URL or a local file.
///
/// Columns are mapped by position to
/// `country, year, avg_temp, min_temp, max_temp`; header names are ignored.
pub struct TemperatureLoader {
    timeout: Duration,
}

impl TemperatureLoader {
    pub fn new() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn is_remote(source: &str) -> bool {
        source.starts_with("http://") || source.starts_with("https://")
    }

    /// Fetch and parse the whole dataset. One fetch, no retry.
    pub async fn load(
        &self,
        source: &str,
        progress: Option<&ProgressReporter>,
    ) -> Result<TemperatureTable> {
        if let Some(p) = progress {
            p.set_message(&format!("Fetching {}...", source));
        }

        let bytes = if Self::is_remote(source) {
            self.fetch_remote(source).await?
        } else {
            tokio::fs::read(Path::new(source)).await.map_err(|e| match e.kind() {
                ErrorKind::NotFound => DashboardError::SourceNotFound(source.to_string()),
                _ => DashboardError::Io(e),
            })?
        };

        if let Some(p) = progress {
            p.set_message("Parsing temperature records...");
        }

        let table = self.parse_bytes(&bytes)?;
        info!(source, records = table.len(), "Loaded temperature records");

        let duplicates = table.duplicate_count();
        if duplicates > 0 {
            warn!(duplicates, "Source repeats (country, year) pairs");
        }

        let invalid = table.iter().filter(|r| r.check().is_err()).count();
        if invalid > 0 {
            warn!(invalid, "Records outside the valid year or temperature bounds");
        }

        if let Some(p) = progress {
            p.finish_with_message(&format!("Loaded {} records", table.len()));
        }

        Ok(table)
    }

    async fn fetch_remote(&self, url: &str) -> Result<Vec<u8>> {
        let client = reqwest::Client::builder().timeout(self.timeout).build()?;

        debug!(url, "Requesting remote CSV");
        let response = client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(DashboardError::SourceStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.bytes().await?.to_vec())
    }

    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<TemperatureTable> {
        let text = decode_source(bytes);
        self.parse_csv(&text)
    }

    pub fn parse_csv(&self, text: &str) -> Result<TemperatureTable> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(text.as_bytes());

        let header_len = reader.headers()?.len();
        if header_len != COLUMN_COUNT {
            return Err(DashboardError::InvalidFormat(format!(
                "Expected {} columns ({}), found {}",
                COLUMN_COUNT,
                COLUMN_NAMES.join(", "),
                header_len
            )));
        }

        let mut records = Vec::new();
        for row in reader.records() {
            let row = row?;

            // Blank lines come through as a single empty field
            if row.iter().all(str::is_empty) {
                continue;
            }

            records.push(self.parse_row(&row)?);
        }

        Ok(TemperatureTable::new(records))
    }

    fn parse_row(&self, row: &StringRecord) -> Result<TemperatureRecord> {
        let line = row.position().map(|p| p.line()).unwrap_or(0);

        if row.len() != COLUMN_COUNT {
            return Err(DashboardError::InvalidFormat(format!(
                "line {}: expected {} fields, found {}",
                line,
                COLUMN_COUNT,
                row.len()
            )));
        }

        let country = row[0].to_string();

        let year = parse_year(&row[1]).map_err(|e| {
            DashboardError::InvalidFormat(format!("line {}: invalid year '{}': {}", line, &row[1], e))
        })?;

        let avg_temp = parse_temperature(&row[2], line)?;
        let min_temp = parse_temperature(&row[3], line)?;
        let max_temp = parse_temperature(&row[4], line)?;

        Ok(TemperatureRecord::new(
            country, year, avg_temp, min_temp, max_temp,
        ))
    }
}

impl Default for TemperatureLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a textual `%Y` year into a calendar year.
pub fn parse_year(value: &str) -> Result<i32> {
    let date = NaiveDate::parse_from_str(
        &format!("{}-01-01", value.trim()),
        &format!("{}-%m-%d", YEAR_FORMAT),
    )?;
    Ok(date.year())
}

/// Empty fields are missing measurements and become NaN.
fn parse_temperature(value: &str, line: u64) -> Result<f64> {
    if value.is_empty() {
        return Ok(f64::NAN);
    }

    value.parse::<f64>().map_err(|_| {
        DashboardError::InvalidFormat(format!("line {}: invalid temperature '{}'", line, value))
    })
}

/// Decode source bytes: BOM first, then strict UTF-8, then Windows-1252.
pub fn decode_source(bytes: &[u8]) -> Cow<'_, str> {
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        let (text, _) = encoding.decode_without_bom_handling(&bytes[bom_len..]);
        return text;
    }

    match UTF_8.decode_without_bom_handling_and_without_replacement(bytes) {
        Some(text) => text,
        None => {
            debug!("Source is not valid UTF-8, decoding as Windows-1252");
            let (text, _) = WINDOWS_1252.decode_without_bom_handling(bytes);
            text
        }
    }
}
