use crate::chart_type::ChartType;
use crate::data::Value;
use serde::{Deserialize, Serialize};

// =============================================================================
// Presentation defaults
// =============================================================================

/// Fixed look applied to every chart. Not business logic, so freely configurable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Presentation {
    #[serde(default = "default_height")]
    pub height: u32,
    #[serde(default = "default_template")]
    pub template: String,
    #[serde(default = "default_color")]
    pub color: String,
}

fn default_height() -> u32 { 500 }
fn default_template() -> String { "plotly_white".to_string() }
fn default_color() -> String { "#3b82f6".to_string() }

impl Default for Presentation {
    fn default() -> Self {
        Self {
            height: default_height(),
            template: default_template(),
            color: default_color(),
        }
    }
}

impl Presentation {
    /// Base color at the given opacity, as an `rgba()` string.
    /// Falls back to the base color when it is not a `#rrggbb` hex value.
    pub fn translucent(&self, alpha: f64) -> String {
        let hex = self.color.trim_start_matches('#');
        let channel = |i: usize| hex.get(i..i + 2).and_then(|c| u8::from_str_radix(c, 16).ok());
        match (hex.len(), channel(0), channel(2), channel(4)) {
            (6, Some(r), Some(g), Some(b)) => format!("rgba({}, {}, {}, {})", r, g, b, alpha),
            _ => self.color.clone(),
        }
    }
}

// =============================================================================
// Traces
// =============================================================================

/// One drawn series, tagged by its geometry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "geometry", rename_all = "snake_case")]
pub enum Trace {
    Line(LineTrace),
    Bar(BarTrace),
    Point(PointTrace),
    Slice(SliceTrace),
    Bin(BinTrace),
    Box(BoxTrace),
    Candle(CandleTrace),
    Cell(CellTrace),
    Area(AreaTrace),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stroke {
    pub width: f64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineTrace {
    pub name: String,
    pub x: Vec<Value>,
    pub y: Vec<Option<f64>>,
    pub line: Stroke,
    pub marker_size: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarTrace {
    pub x: Vec<Value>,
    pub y: Vec<f64>,
    /// Value labels drawn on the bars (rounded to 2 decimals).
    pub text: Vec<f64>,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointTrace {
    /// Group value when points are color-partitioned.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub x: Vec<Option<f64>>,
    pub y: Vec<Option<f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SliceTrace {
    pub labels: Vec<Value>,
    pub values: Vec<f64>,
    pub hole: f64,
    pub text_info: String,
    pub text_position: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BinTrace {
    pub bins: Vec<HistogramBin>,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxStats {
    pub lower_whisker: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub upper_whisker: f64,
    pub outliers: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxTrace {
    pub name: String,
    pub values: Vec<f64>,
    pub stats: BoxStats,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandleTrace {
    pub x: Vec<Value>,
    pub open: Vec<Option<f64>>,
    pub high: Vec<Option<f64>>,
    pub low: Vec<Option<f64>>,
    pub close: Vec<Option<f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CellTrace {
    /// Column categories
    pub x: Vec<Value>,
    /// Row categories
    pub y: Vec<Value>,
    /// `z[row][col]`, `None` where no rows share the pair.
    pub z: Vec<Vec<Option<f64>>>,
    pub colorscale: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AreaTrace {
    pub x: Vec<Value>,
    pub y: Vec<Option<f64>>,
    pub line: Stroke,
    pub fill: String,
    pub fill_color: String,
}

// =============================================================================
// Figure
// =============================================================================

/// What a chart handler produces before title and presentation are applied.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Plot {
    pub traces: Vec<Trace>,
    pub x_axis_title: Option<String>,
    pub y_axis_title: Option<String>,
    pub hover_mode: Option<String>,
    pub range_slider_visible: Option<bool>,
}

impl Plot {
    pub fn new(traces: Vec<Trace>) -> Self {
        Self {
            traces,
            ..Default::default()
        }
    }

    pub fn axes(mut self, x: impl Into<String>, y: impl Into<String>) -> Self {
        self.x_axis_title = Some(x.into());
        self.y_axis_title = Some(y.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_axis_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_axis_title: Option<String>,
    pub height: u32,
    pub template: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hover_mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range_slider_visible: Option<bool>,
}

/// The renderable artifact handed to the external renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpecification {
    pub chart_type: ChartType,
    pub traces: Vec<Trace>,
    pub layout: Layout,
}

impl ChartSpecification {
    pub fn assemble(chart_type: ChartType, title: &str, plot: Plot, presentation: &Presentation) -> Self {
        Self {
            chart_type,
            traces: plot.traces,
            layout: Layout {
                title: title.to_string(),
                x_axis_title: plot.x_axis_title,
                y_axis_title: plot.y_axis_title,
                height: presentation.height,
                template: presentation.template.clone(),
                hover_mode: plot.hover_mode,
                range_slider_visible: plot.range_slider_visible,
            },
        }
    }
}
