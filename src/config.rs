use crate::charts::ChartOptions;
use crate::error::{DashboardError, Result};
use crate::utils::constants::{
    DEFAULT_CHART_HEIGHT, DEFAULT_CHART_WIDTH, DEFAULT_COLOR_SCALE, DEFAULT_CONFIG_FILE,
    DEFAULT_DATA_SOURCE, DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_THEME, ENV_PREFIX, MAX_YEAR, MIN_YEAR,
    PAGE_TITLE,
};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use validator::Validate;

/// Dashboard settings, layered as built-in defaults, then an optional TOML
/// file, then `TEMPDASH_*` environment variables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Settings {
    #[validate(length(min = 1))]
    pub data_source: String,

    #[validate(range(min = 1, max = 600))]
    pub http_timeout_secs: u64,

    pub page_title: String,

    #[validate(range(min = 1901, max = 2022))]
    pub default_start_year: i32,

    #[validate(range(min = 1901, max = 2022))]
    pub default_end_year: i32,

    /// Falls back to the first dropdown option when empty or absent from the data.
    pub default_country: String,

    pub theme: String,

    #[validate(length(min = 1))]
    pub color_scale: String,

    #[validate(range(min = 100, max = 4000))]
    pub chart_width: u32,

    #[validate(range(min = 100, max = 4000))]
    pub chart_height: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_source: DEFAULT_DATA_SOURCE.to_string(),
            http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
            page_title: PAGE_TITLE.to_string(),
            default_start_year: MIN_YEAR,
            default_end_year: MAX_YEAR,
            default_country: String::new(),
            theme: DEFAULT_THEME.to_string(),
            color_scale: DEFAULT_COLOR_SCALE.to_string(),
            chart_width: DEFAULT_CHART_WIDTH,
            chart_height: DEFAULT_CHART_HEIGHT,
        }
    }
}

impl Settings {
    /// Load settings. `path` must exist when given; otherwise
    /// `tempdash.toml` in the working directory is used if present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, Environment::with_prefix(ENV_PREFIX))
    }

    fn load_with_env(path: Option<&Path>, env: Environment) -> Result<Self> {
        let defaults = Settings::default();

        let mut builder = Config::builder()
            .set_default("data_source", defaults.data_source)?
            .set_default("http_timeout_secs", defaults.http_timeout_secs as i64)?
            .set_default("page_title", defaults.page_title)?
            .set_default("default_start_year", i64::from(defaults.default_start_year))?
            .set_default("default_end_year", i64::from(defaults.default_end_year))?
            .set_default("default_country", defaults.default_country)?
            .set_default("theme", defaults.theme)?
            .set_default("color_scale", defaults.color_scale)?
            .set_default("chart_width", i64::from(defaults.chart_width))?
            .set_default("chart_height", i64::from(defaults.chart_height))?;

        builder = match path {
            Some(path) => builder.add_source(File::from(path).required(true)),
            None => builder.add_source(File::with_name(DEFAULT_CONFIG_FILE).required(false)),
        };

        let settings: Settings = builder
            .add_source(env)
            .build()?
            .try_deserialize()?;

        settings.check()?;
        Ok(settings)
    }

    pub fn check(&self) -> Result<()> {
        self.validate()?;

        if self.default_start_year > self.default_end_year {
            return Err(DashboardError::InvalidYearRange {
                start: self.default_start_year,
                end: self.default_end_year,
            });
        }

        Ok(())
    }

    pub fn with_data_source(mut self, source: impl Into<String>) -> Self {
        self.data_source = source.into();
        self
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    pub fn chart_options(&self) -> ChartOptions {
        ChartOptions {
            width: self.chart_width,
            height: self.chart_height,
            theme: self.theme.clone(),
            color_scale: self.color_scale.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.check().is_ok());
        assert_eq!(settings.default_start_year, 1901);
        assert_eq!(settings.default_end_year, 2022);
        assert_eq!(settings.chart_options().color_scale, "Plasma");
    }

    #[test]
    fn test_file_overrides_defaults() -> Result<()> {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile()?;
        writeln!(file, "data_source = \"https://example.org/temps.csv\"")?;
        writeln!(file, "default_country = \"India\"")?;
        writeln!(file, "default_start_year = 1950")?;

        let settings = Settings::load(Some(file.path()))?;

        assert_eq!(settings.data_source, "https://example.org/temps.csv");
        assert_eq!(settings.default_country, "India");
        assert_eq!(settings.default_start_year, 1950);
        assert_eq!(settings.default_end_year, 2022);
        assert_eq!(settings.theme, "dark");
        Ok(())
    }

    #[test]
    fn test_environment_overrides_file() -> Result<()> {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile()?;
        writeln!(file, "default_country = \"India\"")?;
        writeln!(file, "chart_width = 640")?;

        let mut vars = config::Map::new();
        vars.insert("TEMPDASH_DEFAULT_COUNTRY".to_string(), "Norway".to_string());
        vars.insert("TEMPDASH_CHART_WIDTH".to_string(), "1024".to_string());
        vars.insert("OTHER_CHART_HEIGHT".to_string(), "900".to_string());
        let env = Environment::with_prefix(ENV_PREFIX).source(Some(vars));

        let settings = Settings::load_with_env(Some(file.path()), env)?;

        assert_eq!(settings.default_country, "Norway");
        assert_eq!(settings.chart_width, 1024);
        assert_eq!(settings.chart_height, 400);
        Ok(())
    }

    #[test]
    fn test_invalid_environment_value_is_rejected() {
        let mut vars = config::Map::new();
        vars.insert("TEMPDASH_CHART_WIDTH".to_string(), "10".to_string());
        let env = Environment::with_prefix(ENV_PREFIX).source(Some(vars));
        let file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();

        assert!(matches!(
            Settings::load_with_env(Some(file.path()), env),
            Err(DashboardError::Validation(_))
        ));
    }

    #[test]
    fn test_invalid_file_values_are_rejected() -> Result<()> {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile()?;
        writeln!(file, "default_start_year = 2010")?;
        writeln!(file, "default_end_year = 2000")?;

        assert!(matches!(
            Settings::load(Some(file.path())),
            Err(DashboardError::InvalidYearRange { .. })
        ));
        Ok(())
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let result = Settings::load(Some(Path::new("/nonexistent/tempdash.toml")));
        assert!(matches!(result, Err(DashboardError::Config(_))));
    }
}
