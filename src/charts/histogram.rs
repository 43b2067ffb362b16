use super::stats::histogram;
use super::ChartHandler;
use crate::ir::{BinTrace, Plot, Presentation, Trace};
use crate::validate::{Report, Resolved, Role};
use anyhow::{Context, Result};

const BIN_COUNT: usize = 30;

pub struct HistogramChart;

impl ChartHandler for HistogramChart {
    fn required_roles(&self) -> &'static [Role] {
        &[Role::X]
    }

    fn check(&self, input: &Resolved<'_>, report: &mut Report) {
        if let Some(x) = input.x {
            if !x.is_numeric() {
                report.error(format!("Column '{}' must be numeric for histogram", x.name()));
            }
        }
        if input.rows() < 10 {
            report.warn("Histograms work best with at least 10 data points");
        }
    }

    fn build(&self, input: &Resolved<'_>, presentation: &Presentation) -> Result<Plot> {
        let x = input.require(Role::X)?;
        let values: Vec<f64> = x.column.finite_numbers().collect();
        let bins = histogram(&values, BIN_COUNT)
            .with_context(|| format!("Column '{}' cannot be binned", x.name()))?;

        let trace = Trace::Bin(BinTrace {
            bins,
            color: presentation.color.clone(),
        });

        Ok(Plot::new(vec![trace]).axes(x.name(), "Frequency"))
    }
}
