/// Year bounds covered by the dataset and the range slider
pub const MIN_YEAR: i32 = 1901;
pub const MAX_YEAR: i32 = 2022;

/// Positional column schema of the source CSV
pub const COLUMN_COUNT: usize = 5;
pub const COLUMN_NAMES: [&str; COLUMN_COUNT] =
    ["country", "year", "avg_temp", "min_temp", "max_temp"];

/// Year column format
pub const YEAR_FORMAT: &str = "%Y";

/// Page configuration
pub const PAGE_TITLE: &str = "Average Temperature of Countries from 1901 - 2022";
pub const PAGE_ICON: &str = "🌐";

/// Chart styling
pub const DEFAULT_COLOR_SCALE: &str = "Plasma";
pub const DEFAULT_THEME: &str = "dark";
pub const VEGA_LITE_SCHEMA: &str = "https://vega.github.io/schema/vega-lite/v5.json";

/// Renderer scripts embedded in HTML output
pub const VEGA_SCRIPTS: [&str; 3] = [
    "https://cdn.jsdelivr.net/npm/vega@5",
    "https://cdn.jsdelivr.net/npm/vega-lite@5",
    "https://cdn.jsdelivr.net/npm/vega-embed@6",
];
pub const PLOTLY_SCRIPT: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

/// Loader defaults
pub const DEFAULT_DATA_SOURCE: &str = "data/average_temperature_1901_2022.csv";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONFIG_FILE: &str = "tempdash.toml";
pub const ENV_PREFIX: &str = "TEMPDASH";

/// Output defaults
pub const DEFAULT_OUTPUT_DIR: &str = "output";
pub const DEFAULT_CHART_WIDTH: u32 = 800;
pub const DEFAULT_CHART_HEIGHT: u32 = 400;
