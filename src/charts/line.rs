use super::{numeric_series, ChartHandler};
use crate::ir::{LineTrace, Plot, Presentation, Stroke, Trace};
use crate::validate::{Report, Resolved, Role};
use anyhow::Result;

pub struct LineChart;

impl ChartHandler for LineChart {
    fn required_roles(&self) -> &'static [Role] {
        &[Role::X, Role::Y]
    }

    fn check(&self, input: &Resolved<'_>, report: &mut Report) {
        if let Some(y) = input.y {
            if !y.is_numeric() {
                report.error(format!("Y-axis '{}' must be numeric for line charts", y.name()));
            }
        }
        if input.rows() < 3 {
            report.error("Line chart needs at least 3 data points");
        }
    }

    fn build(&self, input: &Resolved<'_>, presentation: &Presentation) -> Result<Plot> {
        let x = input.require(Role::X)?;
        let y = input.require(Role::Y)?;

        let trace = Trace::Line(LineTrace {
            name: y.name().to_string(),
            x: x.column.values().to_vec(),
            y: numeric_series(y.column),
            line: Stroke {
                width: 2.0,
                color: presentation.color.clone(),
            },
            marker_size: 4.0,
        });

        let mut plot = Plot::new(vec![trace]).axes(x.name(), y.name());
        plot.hover_mode = Some("x unified".to_string());
        Ok(plot)
    }
}
