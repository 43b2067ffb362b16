use crate::data::{Column, Value};
use crate::ir::{BoxStats, HistogramBin};
use anyhow::{bail, Result};
use std::collections::{HashMap, HashSet};

/// Row indices per distinct key, in order of first appearance.
/// Rows with a missing key are dropped.
pub fn group_rows(keys: &Column) -> Vec<(Value, Vec<usize>)> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<(Value, Vec<usize>)> = Vec::new();

    for (row, key) in keys.values().iter().enumerate() {
        if key.is_missing() {
            continue;
        }
        let slot = *index.entry(key.to_string()).or_insert_with(|| {
            groups.push((key.clone(), Vec::new()));
            groups.len() - 1
        });
        groups[slot].1.push(row);
    }

    groups
}

/// Sum of `values` per distinct key of `keys`, missing values skipped.
pub fn group_sum(keys: &Column, values: &Column) -> Vec<(Value, f64)> {
    let cells = values.values();
    group_rows(keys)
        .into_iter()
        .map(|(key, rows)| {
            let total = rows.iter().filter_map(|&r| cells[r].as_f64()).sum();
            (key, total)
        })
        .collect()
}

/// Largest `n` groups by value, descending. Ties keep their incoming order.
pub fn top_n(mut groups: Vec<(Value, f64)>, n: usize) -> Vec<(Value, f64)> {
    groups.sort_by(|a, b| b.1.total_cmp(&a.1));
    groups.truncate(n);
    groups
}

/// Linear-interpolated quantile of an ascending sample.
pub fn percentile(sorted: &[f64], q: f64) -> f64 {
    match sorted {
        [] => 0.0,
        [only] => *only,
        _ => {
            let rank = q * (sorted.len() - 1) as f64;
            let below = rank.floor() as usize;
            let above = rank.ceil() as usize;
            let frac = rank - below as f64;
            sorted[below] + (sorted[above] - sorted[below]) * frac
        }
    }
}

/// Quartiles, Tukey whiskers (1.5 IQR) and outliers of a sample.
pub fn box_stats(values: &[f64]) -> Result<BoxStats> {
    if values.is_empty() {
        bail!("Cannot summarise an empty sample");
    }
    let mut ys = values.to_vec();
    ys.sort_by(f64::total_cmp);

    let q1 = percentile(&ys, 0.25);
    let median = percentile(&ys, 0.50);
    let q3 = percentile(&ys, 0.75);
    let iqr = q3 - q1;

    let lower_fence = q1 - 1.5 * iqr;
    let upper_fence = q3 + 1.5 * iqr;

    // Whiskers: extent of data within the fences
    let lower_whisker = ys.iter().copied().find(|&v| v >= lower_fence).unwrap_or(q1);
    let upper_whisker = ys.iter().rev().copied().find(|&v| v <= upper_fence).unwrap_or(q3);

    let outliers = ys
        .iter()
        .copied()
        .filter(|&v| v < lower_fence || v > upper_fence)
        .collect();

    Ok(BoxStats {
        lower_whisker,
        q1,
        median,
        q3,
        upper_whisker,
        outliers,
    })
}

/// Equal-width bins over the observed range. The last bin is closed on the right.
pub fn histogram(values: &[f64], bin_count: usize) -> Result<Vec<HistogramBin>> {
    if bin_count == 0 {
        bail!("Histogram needs at least one bin");
    }
    if values.is_empty() {
        bail!("No numeric values to bin");
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if !min.is_finite() || !max.is_finite() {
        bail!("Cannot bin a non-finite range [{}, {}]", min, max);
    }

    // A constant column gets a unit-wide range centred on its value
    let (start, end) = if max > min { (min, max) } else { (min - 0.5, min + 0.5) };
    let width = (end - start) / bin_count as f64;

    let mut counts = vec![0usize; bin_count];
    for &v in values {
        let idx = (((v - start) / width).floor() as usize).min(bin_count - 1);
        counts[idx] += 1;
    }

    Ok(counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            start: start + i as f64 * width,
            end: if i + 1 == bin_count { end } else { start + (i + 1) as f64 * width },
            count,
        })
        .collect())
}

/// Mean-aggregated grid: rows keyed by `row_keys`, columns by `col_keys`.
/// Only keys with at least one numeric value become categories, so no row or
/// column is entirely empty. Categories come back sorted; combinations
/// without data are `None`.
pub fn pivot_mean(
    row_keys: &Column,
    col_keys: &Column,
    values: &Column,
) -> (Vec<Value>, Vec<Value>, Vec<Vec<Option<f64>>>) {
    let cells: Vec<(&Value, &Value, f64)> = row_keys
        .values()
        .iter()
        .zip(col_keys.values())
        .zip(values.values())
        .filter(|((r, c), _)| !r.is_missing() && !c.is_missing())
        .filter_map(|((r, c), v)| Some((r, c, v.as_f64()?)))
        .collect();

    let rows = sorted_categories(cells.iter().map(|(r, _, _)| *r));
    let cols = sorted_categories(cells.iter().map(|(_, c, _)| *c));

    let row_index: HashMap<String, usize> =
        rows.iter().enumerate().map(|(i, k)| (k.to_string(), i)).collect();
    let col_index: HashMap<String, usize> =
        cols.iter().enumerate().map(|(i, k)| (k.to_string(), i)).collect();

    let mut sums = vec![vec![(0.0_f64, 0usize); cols.len()]; rows.len()];
    for (r, c, v) in cells {
        let (Some(&ri), Some(&ci)) = (row_index.get(&r.to_string()), col_index.get(&c.to_string()))
        else {
            continue;
        };
        sums[ri][ci].0 += v;
        sums[ri][ci].1 += 1;
    }

    let grid = sums
        .into_iter()
        .map(|row| {
            row.into_iter()
                .map(|(sum, n)| if n == 0 { None } else { Some(sum / n as f64) })
                .collect()
        })
        .collect();

    (rows, cols, grid)
}

fn sorted_categories<'a>(keys: impl Iterator<Item = &'a Value>) -> Vec<Value> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut out: Vec<Value> = keys
        .filter(|k| seen.insert(k.to_string()))
        .cloned()
        .collect();
    out.sort_by(|a, b| a.cmp_category(b));
    out
}
