use super::stats::{group_sum, top_n};
use super::ChartHandler;
use crate::ir::{Plot, Presentation, SliceTrace, Trace};
use crate::validate::{Report, Resolved, Role};
use anyhow::Result;

const MAX_SLICES: usize = 8;

pub struct PieChart;

impl ChartHandler for PieChart {
    fn required_roles(&self) -> &'static [Role] {
        &[Role::X, Role::Y]
    }

    fn check(&self, input: &Resolved<'_>, report: &mut Report) {
        if let Some(values) = input.y {
            if !values.is_numeric() {
                report.error(format!("Values column '{}' must be numeric", values.name()));
            }
        }
        if let Some(labels) = input.x {
            if labels.distinct() > MAX_SLICES {
                report.warn(format!(
                    "Too many categories ({}). Pie charts work best with ≤8.",
                    labels.distinct()
                ));
            }
            if labels.distinct() < 2 {
                report.error("Pie chart needs at least 2 categories");
            }
        }
    }

    fn build(&self, input: &Resolved<'_>, _presentation: &Presentation) -> Result<Plot> {
        let labels = input.require(Role::X)?;
        let values = input.require(Role::Y)?;

        let groups = top_n(group_sum(labels.column, values.column), MAX_SLICES);
        let (labels, values): (Vec<_>, Vec<_>) = groups.into_iter().unzip();

        Ok(Plot::new(vec![Trace::Slice(SliceTrace {
            labels,
            values,
            hole: 0.3,
            text_info: "percent+label".to_string(),
            text_position: "inside".to_string(),
        })]))
    }
}
