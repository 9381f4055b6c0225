use super::{theme, ChartKind, ChartOptions, ChartSpec, Renderer};
use crate::models::TemperatureTable;
use crate::utils::constants::VEGA_LITE_SCHEMA;
use serde_json::json;

/// Year against average temperature for one country's view.
pub fn build(view: &TemperatureTable, country: &str, options: &ChartOptions) -> ChartSpec {
    let mut rows: Vec<_> = view.iter().collect();
    rows.sort_by_key(|r| r.year);

    let values: Vec<_> = rows
        .iter()
        .map(|r| {
            json!({
                "year": r.year,
                "avg_temp": r.avg_temp,
                "min_temp": r.min_temp,
                "max_temp": r.max_temp,
            })
        })
        .collect();

    let title = format!("Average Temperature in {}", country);

    let spec = json!({
        "$schema": VEGA_LITE_SCHEMA,
        "title": title,
        "width": options.width,
        "height": options.height,
        "data": { "values": values },
        "mark": { "type": "line", "point": true },
        "encoding": {
            "x": { "field": "year", "type": "ordinal", "title": "Year" },
            "y": { "field": "avg_temp", "type": "quantitative", "title": "Average Temperature (°C)" },
            "tooltip": [
                { "field": "year", "type": "ordinal" },
                { "field": "avg_temp", "type": "quantitative", "format": ".2f" },
                { "field": "min_temp", "type": "quantitative", "format": ".2f" },
                { "field": "max_temp", "type": "quantitative", "format": ".2f" }
            ]
        },
        "config": theme::vega_config(&options.theme),
    });

    ChartSpec {
        kind: ChartKind::Line,
        renderer: Renderer::VegaLite,
        title,
        spec,
    }
}
