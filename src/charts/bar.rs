use super::stats::{group_sum, top_n};
use super::ChartHandler;
use crate::ir::{BarTrace, Plot, Presentation, Trace};
use crate::validate::{Report, Resolved, Role};
use anyhow::Result;

const MAX_BARS: usize = 20;
const CATEGORY_WARNING: usize = 50;

pub struct BarChart;

impl ChartHandler for BarChart {
    fn required_roles(&self) -> &'static [Role] {
        &[Role::X, Role::Y]
    }

    fn check(&self, input: &Resolved<'_>, report: &mut Report) {
        if let Some(y) = input.y {
            if !y.is_numeric() {
                report.error(format!("Y-axis '{}' must be numeric", y.name()));
            }
        }
        if let Some(x) = input.x {
            if x.distinct() > CATEGORY_WARNING {
                report.warn(format!(
                    "Too many categories ({}). Consider filtering.",
                    x.distinct()
                ));
            }
        }
    }

    fn build(&self, input: &Resolved<'_>, presentation: &Presentation) -> Result<Plot> {
        let x = input.require(Role::X)?;
        let y = input.require(Role::Y)?;

        let groups = top_n(group_sum(x.column, y.column), MAX_BARS);
        let (labels, totals): (Vec<_>, Vec<_>) = groups.into_iter().unzip();
        let text = totals.iter().map(|v| (v * 100.0).round() / 100.0).collect();

        let trace = Trace::Bar(BarTrace {
            x: labels,
            y: totals,
            text,
            color: presentation.color.clone(),
        });

        Ok(Plot::new(vec![trace]).axes(x.name(), y.name()))
    }
}
