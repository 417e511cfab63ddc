// Area chart widget configuration
use super::palette::Palette;
use super::series::SeriesPoint;
use serde::Serialize;

pub const X_FIELD: &str = "date";
pub const Y_FIELD: &str = "value";
pub const SERIES_FIELD: &str = "category";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct XAxis {
    pub range: [f64; 2],
    pub tick_count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaStyle {
    pub fill_opacity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    pub position: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slider {
    pub start: f64,
    pub end: f64,
}

/// Presentation knobs of the area chart that do not depend on the data.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartStyle {
    pub x_axis: XAxis,
    pub area_style: AreaStyle,
    pub legend: Legend,
    pub smooth: bool,
    pub slider: Slider,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            x_axis: XAxis {
                range: [0.0, 1.0],
                tick_count: 5,
            },
            area_style: AreaStyle { fill_opacity: 0.6 },
            legend: Legend {
                position: "top-right".to_string(),
            },
            smooth: true,
            slider: Slider {
                start: 0.1,
                end: 0.9,
            },
        }
    }
}

/// Declarative configuration consumed by the area chart widget.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartConfig {
    pub data: Vec<SeriesPoint>,
    pub x_field: &'static str,
    pub y_field: &'static str,
    pub series_field: &'static str,
    pub color: Vec<String>,
    pub x_axis: XAxis,
    pub area_style: AreaStyle,
    pub legend: Legend,
    pub smooth: bool,
    pub slider: Slider,
}

impl ChartConfig {
    pub fn new(data: Vec<SeriesPoint>, palette: &Palette, style: &ChartStyle) -> Self {
        let color = palette.colors_for(&data);
        Self {
            data,
            x_field: X_FIELD,
            y_field: Y_FIELD,
            series_field: SERIES_FIELD,
            color,
            x_axis: style.x_axis.clone(),
            area_style: style.area_style.clone(),
            legend: style.legend.clone(),
            smooth: style.smooth,
            slider: style.slider.clone(),
        }
    }
}
