use super::stats::{box_stats, group_rows};
use super::ChartHandler;
use crate::ir::{BoxTrace, Plot, Presentation, Trace};
use crate::validate::{Report, Resolved, Role};
use anyhow::{bail, Context, Result};

pub struct BoxChart;

impl ChartHandler for BoxChart {
    fn required_roles(&self) -> &'static [Role] {
        &[Role::Y]
    }

    fn check(&self, input: &Resolved<'_>, report: &mut Report) {
        if let Some(y) = input.y {
            if !y.is_numeric() {
                report.error(format!("Column '{}' must be numeric for box plot", y.name()));
            }
        }
    }

    fn build(&self, input: &Resolved<'_>, _presentation: &Presentation) -> Result<Plot> {
        let y = input.require(Role::Y)?;
        let cells = y.column.values();

        let Some(group) = input.group else {
            let values: Vec<f64> = y.column.finite_numbers().collect();
            let stats = box_stats(&values)
                .with_context(|| format!("Column '{}' has no numeric values", y.name()))?;
            let trace = Trace::Box(BoxTrace {
                name: y.name().to_string(),
                values,
                stats,
            });
            return Ok(Plot::new(vec![trace]));
        };

        let mut traces = Vec::new();
        for (key, rows) in group_rows(group.column) {
            let values: Vec<f64> = rows
                .iter()
                .filter_map(|&r| cells[r].as_f64())
                .filter(|v| v.is_finite())
                .collect();
            // a group whose values are all missing has nothing to draw
            if values.is_empty() {
                continue;
            }
            let stats = box_stats(&values)?;
            traces.push(Trace::Box(BoxTrace {
                name: key.to_string(),
                values,
                stats,
            }));
        }

        if traces.is_empty() {
            bail!("Column '{}' has no numeric values in any group", y.name());
        }

        Ok(Plot::new(traces).axes(group.name(), y.name()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::test_support::{resolve, sales};
    use crate::data::{Column, ColumnKind, Dataset, Value};

    #[test]
    fn test_single_box() {
        let data = sales();
        let input = resolve(&data, None, Some("units"), None);
        let plot = BoxChart.build(&input, &Presentation::default()).unwrap();
        assert_eq!(plot.traces.len(), 1);

        let Trace::Box(b) = &plot.traces[0] else { panic!("expected box trace") };
        assert_eq!(b.name, "units");
        assert_eq!(b.stats.median, 3.0);
        assert!(plot.x_axis_title.is_none());
    }

    #[test]
    fn test_box_per_group() {
        let data = sales();
        let input = resolve(&data, None, Some("amount"), Some("region"));
        let plot = BoxChart.build(&input, &Presentation::default()).unwrap();
        assert_eq!(plot.traces.len(), 3);

        let names: Vec<&str> = plot
            .traces
            .iter()
            .map(|t| match t {
                Trace::Box(b) => b.name.as_str(),
                _ => "",
            })
            .collect();
        assert_eq!(names, vec!["north", "south", "east"]);
        assert_eq!(plot.x_axis_title.as_deref(), Some("region"));

        let Trace::Box(north) = &plot.traces[0] else { panic!("expected box trace") };
        assert_eq!(north.values, vec![10.0, 5.0]);
        assert_eq!(north.stats.median, 7.5);
    }

    #[test]
    fn test_grouped_without_values_is_fault() {
        let data = Dataset::new(vec![
            Column::texts("desk", ["fx", "rates", "fx"]),
            Column::new("pnl", ColumnKind::Float, vec![Value::Missing; 3]),
        ])
        .unwrap();

        let grouped = resolve(&data, None, Some("pnl"), Some("desk"));
        let err = BoxChart.build(&grouped, &Presentation::default()).unwrap_err();
        assert!(err.to_string().contains("no numeric values"));

        let single = resolve(&data, None, Some("pnl"), None);
        assert!(BoxChart.build(&single, &Presentation::default()).is_err());
    }
}
