use super::{theme, ChartKind, ChartOptions, ChartSpec, Renderer};
use crate::models::TemperatureTable;
use crate::utils::constants::VEGA_LITE_SCHEMA;
use serde_json::json;
use std::cmp::Ordering;

/// Country against average temperature for the range-filtered view, tallest
/// bar first.
///
/// Values are the view's rows sorted descending. Rows sharing a country are
/// averaged by the encoding, so a multi-year range still draws one bar per
/// country.
pub fn build(view: &TemperatureTable, start_year: i32, end_year: i32, options: &ChartOptions) -> ChartSpec {
    let mut rows: Vec<_> = view.iter().collect();
    rows.sort_by(|a, b| descending(a.avg_temp, b.avg_temp).then_with(|| a.country.cmp(&b.country)));

    let values: Vec<_> = rows
        .iter()
        .map(|r| json!({ "country": r.country, "year": r.year, "avg_temp": r.avg_temp }))
        .collect();

    let title = if start_year == end_year {
        format!("Average Temperature by Country in {}", start_year)
    } else {
        format!("Average Temperature by Country, {} - {}", start_year, end_year)
    };

    let spec = json!({
        "$schema": VEGA_LITE_SCHEMA,
        "title": title,
        "width": options.width,
        "height": options.height,
        "data": { "values": values },
        "mark": "bar",
        "encoding": {
            "x": { "field": "country", "type": "nominal", "sort": "-y", "title": "Country" },
            "y": {
                "field": "avg_temp",
                "type": "quantitative",
                "aggregate": "mean",
                "title": "Average Temperature (°C)"
            },
            "color": { "field": "avg_temp", "type": "quantitative", "aggregate": "mean", "legend": null },
            "tooltip": [
                { "field": "country", "type": "nominal" },
                { "field": "avg_temp", "type": "quantitative", "aggregate": "mean", "format": ".2f" }
            ]
        },
        "config": theme::vega_config(&options.theme),
    });

    ChartSpec {
        kind: ChartKind::Bar,
        renderer: Renderer::VegaLite,
        title,
        spec,
    }
}

/// NaN sorts last.
fn descending(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a)
        .unwrap_or_else(|| a.is_nan().cmp(&b.is_nan()))
}
