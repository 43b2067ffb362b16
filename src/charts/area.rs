use super::{numeric_series, ChartHandler};
use crate::ir::{AreaTrace, Plot, Presentation, Stroke, Trace};
use crate::validate::{Report, Resolved, Role};
use anyhow::Result;

pub struct AreaChart;

impl ChartHandler for AreaChart {
    fn required_roles(&self) -> &'static [Role] {
        &[Role::X, Role::Y]
    }

    // Only the column lookups apply.
    fn check(&self, _input: &Resolved<'_>, _report: &mut Report) {}

    fn build(&self, input: &Resolved<'_>, presentation: &Presentation) -> Result<Plot> {
        let x = input.require(Role::X)?;
        let y = input.require(Role::Y)?;

        let trace = Trace::Area(AreaTrace {
            x: x.column.values().to_vec(),
            y: numeric_series(y.column),
            line: Stroke {
                width: 2.0,
                color: presentation.color.clone(),
            },
            fill: "tozeroy".to_string(),
            fill_color: presentation.translucent(0.3),
        });

        Ok(Plot::new(vec![trace]).axes(x.name(), y.name()))
    }
}
