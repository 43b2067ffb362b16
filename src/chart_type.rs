use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// The closed set of charts this service can build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    Line,
    Bar,
    Scatter,
    Pie,
    Histogram,
    Box,
    Candlestick,
    Heatmap,
    Area,
}

impl ChartType {
    pub const ALL: [ChartType; 9] = [
        ChartType::Line,
        ChartType::Bar,
        ChartType::Scatter,
        ChartType::Pie,
        ChartType::Histogram,
        ChartType::Box,
        ChartType::Candlestick,
        ChartType::Heatmap,
        ChartType::Area,
    ];

    /// Wire identifier, as sent in `graph_type`.
    pub fn as_str(self) -> &'static str {
        match self {
            ChartType::Line => "line",
            ChartType::Bar => "bar",
            ChartType::Scatter => "scatter",
            ChartType::Pie => "pie",
            ChartType::Histogram => "histogram",
            ChartType::Box => "box",
            ChartType::Candlestick => "candlestick",
            ChartType::Heatmap => "heatmap",
            ChartType::Area => "area",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ChartType::Line => "Line Chart",
            ChartType::Bar => "Bar Chart",
            ChartType::Scatter => "Scatter Plot",
            ChartType::Pie => "Pie Chart",
            ChartType::Histogram => "Histogram",
            ChartType::Box => "Box Plot",
            ChartType::Candlestick => "Candlestick",
            ChartType::Heatmap => "Heatmap",
            ChartType::Area => "Area Chart",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ChartType::Line => "Show trends over time",
            ChartType::Bar => "Compare categories",
            ChartType::Scatter => "Show correlation",
            ChartType::Pie => "Show proportions",
            ChartType::Histogram => "Show distribution",
            ChartType::Box => "Show statistical distribution",
            ChartType::Candlestick => "Stock price movement",
            ChartType::Heatmap => "Show patterns in matrix",
            ChartType::Area => "Show cumulative trends",
        }
    }
}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A `graph_type` that names none of the supported charts.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("Graph type '{0}' not supported")]
pub struct UnsupportedChartType(pub String);

impl FromStr for ChartType {
    type Err = UnsupportedChartType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChartType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnsupportedChartType(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogueEntry {
    pub value: &'static str,
    pub label: &'static str,
    pub description: &'static str,
}

/// Static list of supported charts, in menu order.
pub fn catalogue() -> Vec<CatalogueEntry> {
    ChartType::ALL
        .into_iter()
        .map(|t| CatalogueEntry {
            value: t.as_str(),
            label: t.label(),
            description: t.description(),
        })
        .collect()
}
