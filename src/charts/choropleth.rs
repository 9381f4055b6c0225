use super::{theme, ChartKind, ChartOptions, ChartSpec, Renderer};
use crate::models::TemperatureTable;
use crate::processors::CountryAggregator;
use serde_json::json;

/// World map of mean average temperature per country over the
/// range-filtered view.
pub fn build(view: &TemperatureTable, start_year: i32, end_year: i32, options: &ChartOptions) -> ChartSpec {
    let means = CountryAggregator::new().mean_by_country(view);

    let locations: Vec<_> = means.iter().map(|m| m.country.as_str()).collect();
    let z: Vec<_> = means.iter().map(|m| m.avg_temp).collect();
    let counts: Vec<_> = means.iter().map(|m| m.count).collect();

    let title = format!("Mean Average Temperature, {} - {}", start_year, end_year);

    let mut layout = json!({
        "title": { "text": title },
        "height": options.height,
        "margin": { "l": 0, "r": 0, "t": 40, "b": 0 },
        "geo": {
            "showframe": false,
            "showcoastlines": false,
            "projection": { "type": "natural earth" }
        }
    });
    theme::merge(&mut layout, theme::plotly_layout_colors(&options.theme));

    let spec = json!({
        "data": [{
            "type": "choropleth",
            "locationmode": "country names",
            "locations": locations,
            "z": z,
            "customdata": counts,
            "colorscale": options.color_scale,
            "colorbar": { "title": { "text": "avg_temp" } },
            "hovertemplate": "%{location}<br>avg_temp=%{z:.2f} °C<br>years=%{customdata}<extra></extra>"
        }],
        "layout": layout,
    });

    ChartSpec {
        kind: ChartKind::Choropleth,
        renderer: Renderer::Plotly,
        title,
        spec,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TemperatureRecord;

    #[test]
    fn test_map_aggregates_per_country() {
        let view = TemperatureTable::new(vec![
            TemperatureRecord::new("India".to_string(), 2000, 24.0, 18.0, 30.0),
            TemperatureRecord::new("India".to_string(), 2001, 26.0, 19.0, 31.0),
            TemperatureRecord::new("Norway".to_string(), 2000, 1.0, -4.0, 6.0),
        ]);

        let chart = build(&view, 2000, 2001, &ChartOptions::default());

        assert_eq!(chart.renderer, Renderer::Plotly);
        assert_eq!(chart.data_len(), 2);
        let trace = &chart.spec["data"][0];
        assert_eq!(trace["locations"], json!(["India", "Norway"]));
        assert_eq!(trace["z"], json!([25.0, 1.0]));
        assert_eq!(trace["colorscale"], "Plasma");
        assert_eq!(trace["locationmode"], "country names");
        assert_eq!(chart.spec["layout"]["paper_bgcolor"], theme::DARK_PAPER);
        assert_eq!(chart.spec["layout"]["geo"]["showframe"], false);
    }

    #[test]
    fn test_light_theme_keeps_plotly_defaults() {
        let options = ChartOptions {
            theme: "default".to_string(),
            ..ChartOptions::default()
        };
        let chart = build(&TemperatureTable::default(), 1901, 2022, &options);

        assert!(chart.is_empty());
        assert!(chart.spec["layout"].get("paper_bgcolor").is_none());
    }
}
