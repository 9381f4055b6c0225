//! Chart builders.
//!
//! Each builder is a pure function from a data view to a [`ChartSpec`], a
//! declarative JSON description handed to an external renderer: Vega-Lite
//! for the line and bar charts, Plotly for the choropleth map.

pub mod bar;
pub mod choropleth;
pub mod line;
pub mod theme;

use crate::utils::constants::{
    DEFAULT_CHART_HEIGHT, DEFAULT_CHART_WIDTH, DEFAULT_COLOR_SCALE, DEFAULT_THEME,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Line,
    Bar,
    Choropleth,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Renderer {
    VegaLite,
    Plotly,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub renderer: Renderer,
    pub title: String,
    pub spec: Value,
}

impl ChartSpec {
    /// Number of data items the renderer will draw: data values for
    /// Vega-Lite, locations for Plotly.
    pub fn data_len(&self) -> usize {
        let items = match self.renderer {
            Renderer::VegaLite => self.spec.pointer("/data/values"),
            Renderer::Plotly => self.spec.pointer("/data/0/locations"),
        };
        items.and_then(Value::as_array).map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.data_len() == 0
    }
}

/// Encoding parameters shared by the builders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartOptions {
    pub width: u32,
    pub height: u32,
    pub theme: String,
    pub color_scale: String,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            width: DEFAULT_CHART_WIDTH,
            height: DEFAULT_CHART_HEIGHT,
            theme: DEFAULT_THEME.to_string(),
            color_scale: DEFAULT_COLOR_SCALE.to_string(),
        }
    }
}
