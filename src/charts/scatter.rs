use super::stats::group_rows;
use super::{numeric_series, ChartHandler};
use crate::ir::{Plot, PointTrace, Presentation, Trace};
use crate::validate::{Report, Resolved, Role};
use anyhow::Result;

pub struct ScatterChart;

impl ChartHandler for ScatterChart {
    fn required_roles(&self) -> &'static [Role] {
        &[Role::X, Role::Y]
    }

    fn check(&self, input: &Resolved<'_>, report: &mut Report) {
        if let Some(x) = input.x {
            if !x.is_numeric() {
                report.error(format!("X-axis '{}' must be numeric for scatter plots", x.name()));
            }
        }
        if let Some(y) = input.y {
            if !y.is_numeric() {
                report.error(format!("Y-axis '{}' must be numeric for scatter plots", y.name()));
            }
        }
        if input.rows() < 5 {
            report.warn("Scatter plots work best with at least 5 points");
        }
    }

    fn build(&self, input: &Resolved<'_>, _presentation: &Presentation) -> Result<Plot> {
        let x = input.require(Role::X)?;
        let y = input.require(Role::Y)?;
        let xs = numeric_series(x.column);
        let ys = numeric_series(y.column);

        let traces = match input.group {
            None => vec![Trace::Point(PointTrace { name: None, x: xs, y: ys })],
            Some(group) => group_rows(group.column)
                .into_iter()
                .map(|(key, rows)| {
                    Trace::Point(PointTrace {
                        name: Some(key.to_string()),
                        x: rows.iter().map(|&r| xs[r]).collect(),
                        y: rows.iter().map(|&r| ys[r]).collect(),
                    })
                })
                .collect(),
        };

        Ok(Plot::new(traces).axes(x.name(), y.name()))
    }
}
