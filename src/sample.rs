//! Synthetic financial data used when no CSV file is supplied at startup.

use crate::data::{Column, Dataset};
use anyhow::{Context, Result};
use chrono::{Datelike, Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

const SECTORS: [&str; 4] = ["Technology", "Finance", "Healthcare", "Energy"];

#[derive(Debug, Clone)]
pub struct SampleOptions {
    pub days: u32,
    pub seed: u64,
    pub end_date: NaiveDate,
}

impl SampleOptions {
    pub fn new(days: u32, seed: u64, end_date: NaiveDate) -> Self {
        Self { days, seed, end_date }
    }
}

/// Build a daily price/fundamentals table ending on `end_date`.
/// The same options always produce the same dataset.
pub fn generate_financial_data(opts: &SampleOptions) -> Result<Dataset> {
    let mut rng = StdRng::seed_from_u64(opts.seed);
    let drift = Normal::new(0.001, 0.02).context("Invalid price drift distribution")?;

    let start = opts.end_date - Duration::days(i64::from(opts.days));
    let dates: Vec<NaiveDate> = start
        .iter_days()
        .take_while(|d| *d <= opts.end_date)
        .collect();
    let n = dates.len();

    // Geometric random walk, floored so prices never go negative
    let mut price = 100.0_f64;
    let mut close = Vec::with_capacity(n);
    for _ in 0..n {
        price *= 1.0 + drift.sample(&mut rng);
        close.push(price.max(10.0));
    }

    let open: Vec<f64> = close.iter().map(|p| p * rng.gen_range(0.98..1.02)).collect();
    let high_raw: Vec<f64> = close.iter().map(|p| p * rng.gen_range(1.00..1.05)).collect();
    let low_raw: Vec<f64> = close.iter().map(|p| p * rng.gen_range(0.95..1.00)).collect();
    let volume: Vec<i64> = (0..n).map(|_| rng.gen_range(1_000_000..10_000_000)).collect();
    let revenue: Vec<f64> = (0..n).map(|_| rng.gen_range(50_000.0..200_000.0)).collect();
    let expenses: Vec<f64> = (0..n).map(|_| rng.gen_range(30_000.0..150_000.0)).collect();
    let sector: Vec<&str> = (0..n).map(|_| SECTORS[rng.gen_range(0..SECTORS.len())]).collect();
    let market_cap: Vec<f64> = (0..n).map(|_| rng.gen_range(1e9..1e11)).collect();
    let pe_ratio: Vec<f64> = (0..n).map(|_| rng.gen_range(10.0..50.0)).collect();
    let roi: Vec<f64> = (0..n).map(|_| rng.gen_range(-10.0..30.0)).collect();

    // High/Low must bracket the open and close of the same day
    let high: Vec<f64> = (0..n)
        .map(|i| high_raw[i].max(open[i]).max(close[i]))
        .collect();
    let low: Vec<f64> = (0..n)
        .map(|i| low_raw[i].min(open[i]).min(close[i]))
        .collect();

    let profit: Vec<f64> = revenue.iter().zip(&expenses).map(|(r, e)| r - e).collect();
    let returns: Vec<f64> = (0..n)
        .map(|i| {
            if i == 0 {
                0.0
            } else {
                (close[i] / close[i - 1] - 1.0) * 100.0
            }
        })
        .collect();

    let month = dates.iter().map(|d| d.format("%Y-%m").to_string());
    let quarter = dates
        .iter()
        .map(|d| format!("{}Q{}", d.year(), (d.month() - 1) / 3 + 1));
    let year = dates.iter().map(|d| i64::from(d.year()));
    let weekday = dates.iter().map(|d| d.format("%A").to_string());

    Dataset::new(vec![
        Column::dates("Date", dates.iter().copied()),
        Column::numbers("Open", open),
        Column::numbers("High", high),
        Column::numbers("Low", low),
        Column::numbers("Close", close),
        Column::integers("Volume", volume),
        Column::numbers("Revenue", revenue),
        Column::numbers("Expenses", expenses),
        Column::texts("Sector", sector),
        Column::numbers("Market_Cap", market_cap),
        Column::numbers("PE_Ratio", pe_ratio),
        Column::numbers("ROI", roi),
        Column::numbers("Profit", profit),
        Column::numbers("Returns", returns),
        Column::texts("Month", month),
        Column::texts("Quarter", quarter),
        Column::integers("Year", year),
        Column::texts("Day_of_Week", weekday),
    ])
}
