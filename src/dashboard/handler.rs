use crate::charts::{bar, choropleth, line, ChartOptions, ChartSpec};
use crate::config::Settings;
use crate::error::Result;
use crate::models::{DashboardRequest, TemperatureTable};
use crate::processors::FilterEngine;
use crate::readers::TemperatureLoader;
use crate::utils::progress::ProgressReporter;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Everything the page needs for one refresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardResponse {
    pub title: String,
    pub request: DashboardRequest,
    pub range_rows: usize,
    pub country_rows: usize,
    pub line_chart: ChartSpec,
    pub bar_chart: ChartSpec,
    pub map_chart: ChartSpec,
}

/// Request/response handler over a table loaded once per process.
pub struct Dashboard {
    table: TemperatureTable,
    settings: Settings,
    filter: FilterEngine,
    options: ChartOptions,
}

impl Dashboard {
    pub fn new(table: TemperatureTable, settings: Settings) -> Self {
        let options = settings.chart_options();
        Self {
            table,
            settings,
            filter: FilterEngine::new(),
            options,
        }
    }

    /// Fetch the configured data source and build a dashboard over it.
    pub async fn load(settings: Settings, progress: Option<&ProgressReporter>) -> Result<Self> {
        let loader = TemperatureLoader::new().with_timeout(settings.http_timeout());
        let table = loader.load(&settings.data_source, progress).await?;
        Ok(Self::new(table, settings))
    }

    pub fn table(&self) -> &TemperatureTable {
        &self.table
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Country dropdown options.
    pub fn country_options(&self) -> Vec<String> {
        self.table.countries()
    }

    /// Initial widget state: the configured range and country, or the first
    /// dropdown option when the configured country is not in the data.
    pub fn default_request(&self) -> DashboardRequest {
        let options = self.country_options();
        let configured = &self.settings.default_country;

        let country = if options.iter().any(|c| c == configured) {
            configured.clone()
        } else {
            options.into_iter().next().unwrap_or_default()
        };

        DashboardRequest::new(
            self.settings.default_start_year,
            self.settings.default_end_year,
            country,
        )
    }

    pub fn handle(&self, request: &DashboardRequest) -> Result<DashboardResponse> {
        request.check()?;

        let range_view =
            self.filter
                .filter_by_year_range(&self.table, request.start_year, request.end_year);
        let country_view = self.filter.filter_by_country(&self.table, &request.country);

        let line_chart = line::build(&country_view, &request.country, &self.options);
        let bar_chart = bar::build(&range_view, request.start_year, request.end_year, &self.options);
        let map_chart =
            choropleth::build(&range_view, request.start_year, request.end_year, &self.options);

        debug!(
            line_points = line_chart.data_len(),
            bars = bar_chart.data_len(),
            map_countries = map_chart.data_len(),
            "Built charts"
        );
        info!(
            start_year = request.start_year,
            end_year = request.end_year,
            country = %request.country,
            "Handled dashboard request"
        );

        Ok(DashboardResponse {
            title: self.settings.page_title.clone(),
            request: request.clone(),
            range_rows: range_view.len(),
            country_rows: country_view.len(),
            line_chart,
            bar_chart,
            map_chart,
        })
    }
}
