use serde_json::{json, Value};

pub const DARK_BACKGROUND: &str = "#333";
pub const DARK_PAPER: &str = "rgb(17,17,17)";
pub const DARK_FOREGROUND: &str = "#f2f5fa";

pub fn is_dark(theme: &str) -> bool {
    theme.eq_ignore_ascii_case("dark")
}

/// Vega-Lite `config` block for a named theme. Unknown themes use the
/// renderer's defaults.
pub fn vega_config(theme: &str) -> Value {
    if !is_dark(theme) {
        return json!({});
    }

    json!({
        "background": DARK_BACKGROUND,
        "title": { "color": "#fff" },
        "style": { "guide-label": { "fill": "#fff" }, "guide-title": { "fill": "#fff" } },
        "axis": { "domainColor": "#fff", "gridColor": "#888", "tickColor": "#fff" },
        "view": { "stroke": "#888" }
    })
}

/// Plotly layout colours for a named theme.
pub fn plotly_layout_colors(theme: &str) -> Value {
    if !is_dark(theme) {
        return json!({});
    }

    json!({
        "paper_bgcolor": DARK_PAPER,
        "plot_bgcolor": DARK_PAPER,
        "font": { "color": DARK_FOREGROUND },
        "geo": { "bgcolor": DARK_PAPER, "lakecolor": DARK_PAPER, "landcolor": "rgb(51,51,51)" }
    })
}

/// Deep merge of `overlay` into `base`; objects merge at every level, other
/// values replace.
pub fn merge(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Object(base), Value::Object(overlay)) => {
            for (key, value) in overlay {
                merge(base.entry(key).or_insert(Value::Null), value);
            }
        }
        (base, overlay) => *base = overlay,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dark_theme_detection() {
        assert!(is_dark("dark"));
        assert!(is_dark("Dark"));
        assert!(!is_dark("default"));
        assert_eq!(vega_config("default"), json!({}));
    }

    #[test]
    fn test_merge_keeps_nested_keys() {
        let mut layout = json!({ "geo": { "showframe": false }, "height": 400 });
        merge(&mut layout, plotly_layout_colors("dark"));

        assert_eq!(layout["geo"]["showframe"], json!(false));
        assert_eq!(layout["geo"]["bgcolor"], json!(DARK_PAPER));
        assert_eq!(layout["height"], json!(400));
    }
}
