use super::stats::pivot_mean;
use super::ChartHandler;
use crate::ir::{CellTrace, Plot, Presentation, Trace};
use crate::validate::{Report, Resolved, Role};
use anyhow::{bail, Result};

pub struct HeatmapChart;

// x: grid columns, group: grid rows, y: the averaged cell value
impl ChartHandler for HeatmapChart {
    fn required_roles(&self) -> &'static [Role] {
        &[Role::X, Role::Y, Role::Group]
    }

    fn check(&self, input: &Resolved<'_>, report: &mut Report) {
        if let Some(value) = input.y {
            if !value.is_numeric() {
                report.error("Value column must be numeric");
            }
        }
    }

    fn build(&self, input: &Resolved<'_>, _presentation: &Presentation) -> Result<Plot> {
        let columns = input.require(Role::X)?;
        let rows = input.require(Role::Group)?;
        let value = input.require(Role::Y)?;

        let (y, x, z) = pivot_mean(rows.column, columns.column, value.column);
        if z.is_empty() {
            bail!("Column '{}' has no numeric values to aggregate", value.name());
        }

        let trace = Trace::Cell(CellTrace {
            x,
            y,
            z,
            colorscale: "RdYlBu_r".to_string(),
        });

        Ok(Plot::new(vec![trace]).axes(columns.name(), rows.name()))
    }
}
