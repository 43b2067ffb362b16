use chartsmith::chart_type::ChartType;
use chartsmith::ir::Trace;
use chartsmith::sample::{generate_financial_data, SampleOptions};
use chartsmith::{
    generate, validate, ChartBuilder, Column, ColumnKind, ColumnRoles, Dataset, GraphPayload, Value,
};
use chrono::NaiveDate;

fn financial(days: u32) -> Dataset {
    let end = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
    generate_financial_data(&SampleOptions::new(days, 42, end)).unwrap()
}

fn categories(n: usize) -> Dataset {
    Dataset::new(vec![
        Column::texts("cat", (0..n).map(|i| format!("c{:02}", i))),
        Column::numbers("val", (0..n).map(|i| ((i * 7) % 13) as f64 + 1.0)),
    ])
    .unwrap()
}

#[test]
fn test_line_three_rows() {
    let data = financial(2);
    assert_eq!(data.len(), 3);

    let res = generate(&data, ChartType::Line, "T", Some("Date"), Some("Close"), None);
    assert!(res.success, "{:?}", res.errors);
    let chart = res.chart.unwrap();
    assert_eq!(chart.traces.len(), 1);

    let Trace::Line(line) = &chart.traces[0] else { panic!("expected line trace") };
    assert_eq!(line.x.len(), 3);
    let dates = data.column("Date").unwrap().values();
    assert_eq!(line.x, dates.to_vec());
}

#[test]
fn test_pie_ten_categories() {
    let data = categories(10);
    let res = generate(&data, ChartType::Pie, "T", Some("cat"), Some("val"), None);
    assert!(res.success);
    assert_eq!(res.warnings.len(), 1);
    assert!(res.warnings[0].contains("(10)"));

    let chart = res.chart.unwrap();
    let Trace::Slice(pie) = &chart.traces[0] else { panic!("expected slice trace") };
    assert_eq!(pie.labels.len(), 8);

    // the rendered slices are exactly the 8 largest sums
    let mut all: Vec<f64> = data.column("val").unwrap().finite_numbers().collect();
    all.sort_by(|a, b| b.total_cmp(a));
    let mut rendered = pie.values.clone();
    rendered.sort_by(|a, b| b.total_cmp(a));
    assert_eq!(rendered, all[..8].to_vec());
}

#[test]
fn test_pie_eight_categories_no_warning() {
    let res = generate(&categories(8), ChartType::Pie, "T", Some("cat"), Some("val"), None);
    assert!(res.success);
    assert!(res.warnings.is_empty());

    let res = generate(&categories(9), ChartType::Pie, "T", Some("cat"), Some("val"), None);
    assert!(res.success);
    assert_eq!(res.warnings.len(), 1);
}

#[test]
fn test_histogram_ignores_infinite_cells() {
    let csv = "v\n1\n2\ninf\n3\n4\n5\n6\n7\n8\n9\n";
    let data = Dataset::from_csv_reader(csv.as_bytes()).unwrap();
    let res = generate(&data, ChartType::Histogram, "T", Some("v"), None, None);
    assert!(res.success, "{:?}", res.errors);

    let json = serde_json::to_value(res.chart.unwrap()).unwrap();
    let bins = json["traces"][0]["bins"].as_array().unwrap();
    assert_eq!(bins.len(), 30);
    assert!(bins.iter().all(|b| b["start"].is_f64() && b["end"].is_f64()));
}

#[test]
fn test_grouped_box_without_values_fails() {
    let data = Dataset::new(vec![
        Column::texts("g", ["a", "b", "a"]),
        Column::new("v", ColumnKind::Float, vec![Value::Missing; 3]),
    ])
    .unwrap();
    let res = generate(&data, ChartType::Box, "T", None, Some("v"), Some("g"));
    assert!(!res.success);
    assert!(res.chart.is_none());
    assert!(res.errors()[0].starts_with("Error generating graph:"));
}

#[test]
fn test_scatter_text_x_fails() {
    let data = financial(10);
    let res = generate(&data, ChartType::Scatter, "T", Some("Sector"), Some("Close"), None);
    assert!(!res.success);
    assert!(res.chart.is_none());
    assert!(res.errors().iter().any(|e| e.contains("X-axis") && e.contains("must be numeric")));
}

#[test]
fn test_candlestick_missing_high() {
    let data = Dataset::new(vec![
        Column::dates("Date", [NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()]),
        Column::numbers("Open", [1.0]),
        Column::numbers("Low", [1.0]),
        Column::numbers("Close", [1.0]),
    ])
    .unwrap();
    let res = generate(&data, ChartType::Candlestick, "T", None, None, None);
    assert!(!res.success);
    assert_eq!(res.errors().len(), 1);
    assert!(res.errors()[0].contains("High"));
}

#[test]
fn test_candlestick_most_recent_rows() {
    let data = financial(150);
    let res = generate(&data, ChartType::Candlestick, "T", None, None, None);
    let chart = res.chart.unwrap();
    let Trace::Candle(c) = &chart.traces[0] else { panic!("expected candle trace") };
    assert_eq!(c.x.len(), 100);
    let dates = data.column("Date").unwrap().values();
    assert_eq!(c.x, dates[data.len() - 100..].to_vec());
}

#[test]
fn test_unsupported_type_independent_of_columns() {
    let data = financial(10);
    let builder = ChartBuilder::new(&data);
    for (x, y) in [(None, None), (Some("Close"), Some("Nope"))] {
        let res = builder.generate_payload(GraphPayload {
            graph_type: Some("sunburst".to_string()),
            title: Some("T".to_string()),
            x_axis: x.map(str::to_string),
            y_axis: y.map(str::to_string),
            group_by: None,
        });
        assert!(!res.success);
        assert_eq!(res.errors(), ["Graph type 'sunburst' not supported"]);
    }
}

#[test]
fn test_generate_is_idempotent() {
    let data = financial(60);
    let a = generate(&data, ChartType::Heatmap, "T", Some("Day_of_Week"), Some("Close"), Some("Month"));
    let b = generate(&data, ChartType::Heatmap, "T", Some("Day_of_Week"), Some("Close"), Some("Month"));
    assert!(a.success, "{:?}", a.errors);
    assert_eq!(a, b);
}

#[test]
fn test_bar_sum_matches_rendered_groups() {
    let data = categories(30);
    let res = generate(&data, ChartType::Bar, "T", Some("cat"), Some("val"), None);
    let chart = res.chart.unwrap();
    let Trace::Bar(bar) = &chart.traces[0] else { panic!("expected bar trace") };
    assert_eq!(bar.x.len(), 20);

    let cats = data.column("cat").unwrap().values();
    let vals = data.column("val").unwrap().values();
    let expected: f64 = cats
        .iter()
        .zip(vals)
        .filter(|(c, _)| bar.x.contains(c))
        .filter_map(|(_, v)| v.as_f64())
        .sum();
    assert_eq!(bar.y.iter().sum::<f64>(), expected);

    // descending, with ties in encounter order
    for pair in bar.y.windows(2) {
        assert!(pair[0] >= pair[1]);
    }
}

#[test]
fn test_every_type_builds_on_sample_data() {
    let data = financial(365);
    let cases = [
        (ChartType::Line, Some("Date"), Some("Close"), None),
        (ChartType::Bar, Some("Sector"), Some("Revenue"), None),
        (ChartType::Scatter, Some("Revenue"), Some("Profit"), Some("Sector")),
        (ChartType::Pie, Some("Sector"), Some("Market_Cap"), None),
        (ChartType::Histogram, Some("Returns"), None, None),
        (ChartType::Box, None, Some("ROI"), Some("Quarter")),
        (ChartType::Candlestick, None, None, None),
        (ChartType::Heatmap, Some("Day_of_Week"), Some("Volume"), Some("Month")),
        (ChartType::Area, Some("Date"), Some("Volume"), None),
    ];
    assert_eq!(cases.len(), ChartType::ALL.len());

    for (chart_type, x, y, group) in cases {
        let res = generate(&data, chart_type, "Sample", x, y, group);
        assert!(res.success, "{}: {:?}", chart_type, res.errors);
        let chart = res.chart.unwrap();
        assert_eq!(chart.chart_type, chart_type);
        assert!(!chart.traces.is_empty());
        assert_eq!(chart.layout.height, 500);
    }
}

#[test]
fn test_validity_tracks_errors_only() {
    let data = categories(3);
    for chart_type in ChartType::ALL {
        let res = validate(&data, chart_type, &ColumnRoles::new(Some("cat"), Some("val"), Some("cat")));
        assert_eq!(res.valid, res.errors.is_empty(), "{}", chart_type);
    }
}

#[test]
fn test_csv_dataset_end_to_end() {
    let csv = "region,amount\nnorth,10\nsouth,20\nnorth,5\n";
    let data = Dataset::from_csv_reader(csv.as_bytes()).unwrap();
    let res = generate(&data, ChartType::Bar, "T", Some("region"), Some("amount"), None);
    let chart = res.chart.unwrap();
    let Trace::Bar(bar) = &chart.traces[0] else { panic!("expected bar trace") };
    assert_eq!(bar.x, vec![Value::Text("south".into()), Value::Text("north".into())]);
    assert_eq!(bar.y, vec![20.0, 15.0]);
}
