//! One handler per chart type. Each owns both its validation rules and its
//! data transform, so the two can never disagree about what a type needs.

use crate::chart_type::ChartType;
use crate::ir::{Plot, Presentation};
use crate::validate::{Report, Resolved, Role};
use anyhow::Result;

mod area;
mod bar;
mod boxplot;
mod candlestick;
mod heatmap;
mod histogram;
mod line;
mod pie;
mod scatter;
pub mod stats;

pub trait ChartHandler: Sync {
    /// Roles that must name an existing column.
    fn required_roles(&self) -> &'static [Role];

    /// Append this type's blocking errors and advisory warnings.
    fn check(&self, input: &Resolved<'_>, report: &mut Report);

    /// Transform the (already validated) columns into traces.
    fn build(&self, input: &Resolved<'_>, presentation: &Presentation) -> Result<Plot>;
}

impl ChartType {
    pub fn handler(self) -> &'static dyn ChartHandler {
        match self {
            ChartType::Line => &line::LineChart,
            ChartType::Bar => &bar::BarChart,
            ChartType::Scatter => &scatter::ScatterChart,
            ChartType::Pie => &pie::PieChart,
            ChartType::Histogram => &histogram::HistogramChart,
            ChartType::Box => &boxplot::BoxChart,
            ChartType::Candlestick => &candlestick::CandlestickChart,
            ChartType::Heatmap => &heatmap::HeatmapChart,
            ChartType::Area => &area::AreaChart,
        }
    }
}

/// Optional numeric view of every row of a column.
pub(crate) fn numeric_series(column: &crate::data::Column) -> Vec<Option<f64>> {
    column.values().iter().map(|v| v.as_f64()).collect()
}
