use super::handler::DashboardResponse;
use crate::charts::{theme, ChartSpec, Renderer};
use crate::error::Result;
use crate::utils::constants::{MAX_YEAR, MIN_YEAR, PAGE_ICON, PLOTLY_SCRIPT, VEGA_SCRIPTS};
use maud::{html, Markup, PreEscaped, DOCTYPE};

const PAGE_STYLE: &str = r#"
body { margin: 0; font-family: "Source Sans Pro", Arial, sans-serif; display: flex; }
.sidebar { width: 280px; min-height: 100vh; padding: 24px; box-sizing: border-box; }
.sidebar h1 { font-size: 22px; margin-top: 0; }
.sidebar label { display: block; margin-top: 18px; font-size: 14px; opacity: 0.8; }
.sidebar .value { font-size: 18px; margin-top: 4px; }
.sidebar select { width: 100%; margin-top: 4px; }
.main { flex-grow: 1; padding: 24px; }
.chart { margin-bottom: 32px; }
.chart h2 { font-size: 18px; }
.empty { opacity: 0.6; font-style: italic; }
"#;

/// Render a self-contained HTML page: a sidebar with the widget state and a
/// main panel with the three charts.
pub fn render_html(response: &DashboardResponse, country_options: &[String], dark: bool) -> Result<String> {
    Ok(page(response, country_options, dark)?.into_string())
}

fn page(response: &DashboardResponse, country_options: &[String], dark: bool) -> Result<Markup> {
    let (background, foreground, sidebar) = if dark {
        (theme::DARK_PAPER, theme::DARK_FOREGROUND, "#262730")
    } else {
        ("#ffffff", "#262730", "#f0f2f6")
    };

    let request = &response.request;
    let charts = [
        ("line-chart", &response.line_chart),
        ("bar-chart", &response.bar_chart),
        ("map-chart", &response.map_chart),
    ];

    let mut scripts = Vec::with_capacity(charts.len());
    for (id, chart) in charts {
        scripts.push(embed_script(id, chart)?);
    }

    Ok(html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                title { (PAGE_ICON) " " (response.title) }
                @for script in VEGA_SCRIPTS {
                    script src=(script) {}
                }
                script src=(PLOTLY_SCRIPT) {}
                style {
                    (PreEscaped(PAGE_STYLE))
                    (PreEscaped(format!(
                        "body {{ background: {}; color: {}; }} .sidebar {{ background: {}; }}",
                        background, foreground, sidebar
                    )))
                }
            }
            body {
                div class="sidebar" {
                    h1 { (PAGE_ICON) " " (response.title) }
                    label { "Year range (" (MIN_YEAR) " - " (MAX_YEAR) ")" }
                    div class="value" { (request.start_year) " - " (request.end_year) }
                    label { "Country" }
                    select disabled {
                        @for option in country_options {
                            option selected[*option == request.country] { (option) }
                        }
                    }
                    label { "Rows" }
                    div class="value" {
                        (response.range_rows) " in range, " (response.country_rows) " for " (request.country)
                    }
                }
                div class="main" {
                    @for (id, chart) in charts {
                        div class="chart" {
                            h2 { (chart.title) }
                            div id=(id) {}
                            @if chart.is_empty() {
                                p class="empty" { "No data for the current selection." }
                            }
                        }
                    }
                }
                script {
                    @for script in &scripts {
                        (PreEscaped(script))
                    }
                }
            }
        }
    })
}

fn embed_script(id: &str, chart: &ChartSpec) -> Result<String> {
    let spec = script_safe_json(&serde_json::to_string(&chart.spec)?);

    Ok(match chart.renderer {
        Renderer::VegaLite => format!("vegaEmbed('#{}', {}, {{ actions: false }});", id, spec),
        Renderer::Plotly => format!(
            "(function () {{ const fig = {}; Plotly.newPlot('{}', fig.data, fig.layout, {{ responsive: true }}); }})();",
            spec, id
        ),
    })
}

/// Keep `</script>` inside string values from closing the script element.
fn script_safe_json(json: &str) -> String {
    json.replace("</", "<\\/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::dashboard::Dashboard;
    use crate::models::{DashboardRequest, TemperatureRecord, TemperatureTable};

    fn response(country: &str) -> (DashboardResponse, Vec<String>) {
        let table = TemperatureTable::new(vec![
            TemperatureRecord::new("Côte d'Ivoire".to_string(), 2000, 26.5, 21.0, 32.0),
            TemperatureRecord::new("India".to_string(), 2000, 24.0, 18.0, 30.0),
            TemperatureRecord::new("<Trinidad & Tobago>".to_string(), 2000, 26.0, 22.0, 31.0),
        ]);
        let dashboard = Dashboard::new(table, Settings::default());
        let response = dashboard
            .handle(&DashboardRequest::new(1901, 2022, country))
            .unwrap();
        (response, dashboard.country_options())
    }

    #[test]
    fn test_page_embeds_all_charts() {
        let (response, options) = response("India");
        let html = render_html(&response, &options, true).unwrap();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>🌐 Average Temperature of Countries from 1901 - 2022</title>"));
        assert!(html.contains("vegaEmbed('#line-chart'"));
        assert!(html.contains("vegaEmbed('#bar-chart'"));
        assert!(html.contains("Plotly.newPlot('map-chart'"));
        assert!(html.contains("<option selected>India</option>"));
        assert!(html.contains("<option>Côte d'Ivoire</option>"));
        assert!(html.contains(theme::DARK_PAPER));
    }

    #[test]
    fn test_country_names_are_escaped() {
        let (response, options) = response("<Trinidad & Tobago>");
        let html = render_html(&response, &options, true).unwrap();

        assert!(html.contains("<option selected>&lt;Trinidad &amp; Tobago&gt;</option>"));
        assert!(html.contains("3 in range, 1 for &lt;Trinidad &amp; Tobago&gt;"));
    }

    #[test]
    fn test_empty_selection_is_flagged() {
        let (response, options) = response("Atlantis");
        let html = render_html(&response, &options, false).unwrap();
        assert!(html.contains("No data for the current selection."));
    }

    #[test]
    fn test_script_safe_json() {
        assert_eq!(script_safe_json(r#"{"t":"</script>"}"#), r#"{"t":"<\/script>"}"#);
    }
}
