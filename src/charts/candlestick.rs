use super::{numeric_series, ChartHandler};
use crate::data::Column;
use crate::ir::{CandleTrace, Plot, Presentation, Trace};
use crate::validate::{Report, Resolved, Role};
use anyhow::{bail, Result};

/// Columns a candlestick chart reads, independent of the chosen roles.
const OHLC_COLUMNS: [&str; 5] = ["Date", "Open", "High", "Low", "Close"];

const RECENT_ROWS: usize = 100;

pub struct CandlestickChart;

impl ChartHandler for CandlestickChart {
    fn required_roles(&self) -> &'static [Role] {
        &[]
    }

    fn check(&self, input: &Resolved<'_>, report: &mut Report) {
        let missing: Vec<&str> = OHLC_COLUMNS
            .iter()
            .copied()
            .filter(|c| !input.dataset.has_column(c))
            .collect();
        if !missing.is_empty() {
            report.error(format!("Missing required columns: {}", missing.join(", ")));
        }
    }

    fn build(&self, input: &Resolved<'_>, _presentation: &Presentation) -> Result<Plot> {
        let data = input.dataset;
        let start = data.len().saturating_sub(RECENT_ROWS);

        let price = |name: &str| -> Result<Vec<Option<f64>>> {
            let column = data.require_column(name)?;
            if !column.is_numeric() {
                bail!("Column '{}' must hold prices", name);
            }
            Ok(numeric_series(column)[start..].to_vec())
        };
        let dates: &Column = data.require_column("Date")?;

        let trace = Trace::Candle(CandleTrace {
            x: dates.values()[start..].to_vec(),
            open: price("Open")?,
            high: price("High")?,
            low: price("Low")?,
            close: price("Close")?,
        });

        let mut plot = Plot::new(vec![trace]).axes("Date", "Price");
        plot.range_slider_visible = Some(false);
        Ok(plot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::test_support::resolve;
    use crate::data::{Dataset, Value};
    use chrono::NaiveDate;

    fn ohlc(rows: usize) -> Dataset {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        Dataset::new(vec![
            Column::dates("Date", start.iter_days().take(rows)),
            Column::numbers("Open", (0..rows).map(|i| i as f64)),
            Column::numbers("High", (0..rows).map(|i| i as f64 + 2.0)),
            Column::numbers("Low", (0..rows).map(|i| i as f64 - 2.0)),
            Column::numbers("Close", (0..rows).map(|i| i as f64 + 1.0)),
        ])
        .unwrap()
    }

    #[test]
    fn test_last_hundred_rows() {
        let data = ohlc(150);
        let input = resolve(&data, None, None, None);
        let plot = CandlestickChart.build(&input, &Presentation::default()).unwrap();

        let Trace::Candle(c) = &plot.traces[0] else { panic!("expected candle trace") };
        assert_eq!(c.x.len(), 100);
        assert_eq!(c.open[0], Some(50.0));
        assert_eq!(c.close[99], Some(150.0));
        assert_eq!(
            c.x[0],
            Value::Date(NaiveDate::from_ymd_opt(2024, 2, 20).unwrap())
        );
        assert_eq!(plot.range_slider_visible, Some(false));
    }

    #[test]
    fn test_short_dataset_uses_all_rows() {
        let data = ohlc(7);
        let input = resolve(&data, None, None, None);
        let plot = CandlestickChart.build(&input, &Presentation::default()).unwrap();
        let Trace::Candle(c) = &plot.traces[0] else { panic!("expected candle trace") };
        assert_eq!(c.x.len(), 7);
        assert_eq!(c.open[0], Some(0.0));
    }

    #[test]
    fn test_missing_columns_listed() {
        let data = Dataset::new(vec![
            Column::numbers("Open", [1.0]),
            Column::numbers("Close", [1.0]),
        ])
        .unwrap();
        let input = resolve(&data, None, None, None);
        let mut report = Report::default();
        CandlestickChart.check(&input, &mut report);
        assert_eq!(
            report.finish().errors,
            vec!["Missing required columns: Date, High, Low"]
        );
    }

    #[test]
    fn test_text_prices_are_fault() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let data = Dataset::new(vec![
            Column::dates("Date", [start]),
            Column::texts("Open", ["n/a"]),
            Column::numbers("High", [1.0]),
            Column::numbers("Low", [1.0]),
            Column::numbers("Close", [1.0]),
        ])
        .unwrap();
        let input = resolve(&data, None, None, None);
        let err = CandlestickChart.build(&input, &Presentation::default()).unwrap_err();
        assert!(err.to_string().contains("'Open'"));
    }
}
