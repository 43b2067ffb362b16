use anyhow::{anyhow, bail, Context, Result};
use chrono::NaiveDate;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value as JsonValue};
use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use std::io::Read;
use std::path::Path;

/// Text format used for dates everywhere they leave the process.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A single cell of a dataset.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(f64),
    Text(String),
    Date(NaiveDate),
    Missing,
}

impl Value {
    /// Numeric view of the cell. NaN counts as missing.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) if !n.is_nan() => Some(*n),
            _ => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        match self {
            Value::Missing => true,
            Value::Number(n) => n.is_nan(),
            _ => false,
        }
    }

    pub fn to_json(&self) -> JsonValue {
        match self {
            Value::Number(n) => serde_json::Number::from_f64(*n)
                .map(JsonValue::Number)
                .unwrap_or(JsonValue::Null),
            Value::Text(s) => JsonValue::String(s.clone()),
            Value::Date(d) => JsonValue::String(d.format(DATE_FORMAT).to_string()),
            Value::Missing => JsonValue::Null,
        }
    }

    /// Ordering used for category axes: numbers numerically, dates
    /// chronologically, text lexically. Mixed kinds fall back to a fixed rank.
    pub fn cmp_category(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a.total_cmp(b),
            (Value::Date(a), Value::Date(b)) => a.cmp(b),
            (Value::Text(a), Value::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Value::Number(_) => 0,
            Value::Date(_) => 1,
            Value::Text(_) => 2,
            Value::Missing => 3,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{}", n),
            Value::Text(s) => f.write_str(s),
            Value::Date(d) => write!(f, "{}", d.format(DATE_FORMAT)),
            Value::Missing => Ok(()),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Value::Number(n) if n.is_finite() => serializer.serialize_f64(*n),
            Value::Number(_) | Value::Missing => serializer.serialize_none(),
            Value::Text(s) => serializer.serialize_str(s),
            Value::Date(d) => serializer.collect_str(&d.format(DATE_FORMAT)),
        }
    }
}

/// Declared storage type of a column, fixed for the dataset's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Integer,
    Float,
    Text,
    Date,
}

impl ColumnKind {
    /// The dtype name reported to API callers.
    pub fn dtype(self) -> &'static str {
        match self {
            ColumnKind::Integer => "int64",
            ColumnKind::Float => "float64",
            ColumnKind::Text => "object",
            ColumnKind::Date => "datetime64[ns]",
        }
    }

    pub fn is_numeric(self) -> bool {
        matches!(self, ColumnKind::Integer | ColumnKind::Float)
    }

    pub fn is_datetime(self) -> bool {
        matches!(self, ColumnKind::Date)
    }

    fn accepts(self, value: &Value) -> bool {
        match (self, value) {
            (_, Value::Missing) => true,
            (ColumnKind::Integer | ColumnKind::Float, Value::Number(_)) => true,
            (ColumnKind::Text, Value::Text(_)) => true,
            (ColumnKind::Date, Value::Date(_)) => true,
            _ => false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Column {
    name: String,
    kind: ColumnKind,
    values: Vec<Value>,
}

impl Column {
    pub fn new(name: impl Into<String>, kind: ColumnKind, values: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            kind,
            values,
        }
    }

    pub fn numbers(name: impl Into<String>, values: impl IntoIterator<Item = f64>) -> Self {
        Self::new(name, ColumnKind::Float, values.into_iter().map(Value::Number).collect())
    }

    pub fn integers(name: impl Into<String>, values: impl IntoIterator<Item = i64>) -> Self {
        Self::new(
            name,
            ColumnKind::Integer,
            values.into_iter().map(|v| Value::Number(v as f64)).collect(),
        )
    }

    pub fn texts<S: Into<String>>(name: impl Into<String>, values: impl IntoIterator<Item = S>) -> Self {
        Self::new(
            name,
            ColumnKind::Text,
            values.into_iter().map(|s| Value::Text(s.into())).collect(),
        )
    }

    pub fn dates(name: impl Into<String>, values: impl IntoIterator<Item = NaiveDate>) -> Self {
        Self::new(name, ColumnKind::Date, values.into_iter().map(Value::Date).collect())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ColumnKind {
        self.kind
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn is_numeric(&self) -> bool {
        self.kind.is_numeric()
    }

    /// Numeric values in row order, skipping missing cells and infinities.
    pub fn finite_numbers(&self) -> impl Iterator<Item = f64> + '_ {
        self.values
            .iter()
            .filter_map(Value::as_f64)
            .filter(|v| v.is_finite())
    }

    fn describe(&self) -> ColumnDescriptor {
        let distinct: HashSet<String> = self
            .values
            .iter()
            .filter(|v| !v.is_missing())
            .map(|v| v.to_string())
            .collect();

        ColumnDescriptor {
            name: self.name.clone(),
            dtype: self.kind.dtype().to_string(),
            is_numeric: self.kind.is_numeric(),
            is_datetime: self.kind.is_datetime(),
            unique_values: distinct.len(),
            has_nulls: self.values.iter().any(Value::is_missing),
        }
    }
}

/// Read-only metadata derived once per column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub dtype: String,
    pub is_numeric: bool,
    pub is_datetime: bool,
    pub unique_values: usize,
    pub has_nulls: bool,
}

/// Leading rows of a dataset, ready for JSON.
#[derive(Debug, Clone, Serialize)]
pub struct Preview {
    pub preview: Vec<Map<String, JsonValue>>,
    pub total_rows: usize,
    pub columns: Vec<String>,
}

/// An immutable, column-oriented table. Every column holds one value per row.
#[derive(Debug, Clone)]
pub struct Dataset {
    columns: Vec<Column>,
    descriptors: Vec<ColumnDescriptor>,
    row_count: usize,
}

impl Dataset {
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let row_count = columns.first().map(|c| c.values.len()).unwrap_or(0);

        let mut seen: HashSet<&str> = HashSet::new();
        for column in &columns {
            if !seen.insert(column.name.as_str()) {
                bail!("Duplicate column '{}'", column.name);
            }
            if column.values.len() != row_count {
                bail!(
                    "Column '{}' has {} rows, expected {}",
                    column.name,
                    column.values.len(),
                    row_count
                );
            }
            if let Some(bad) = column.values.iter().find(|v| !column.kind.accepts(v)) {
                bail!(
                    "Column '{}' is declared {} but holds '{}'",
                    column.name,
                    column.kind.dtype(),
                    bad
                );
            }
        }

        let descriptors = columns.iter().map(Column::describe).collect();

        Ok(Self {
            columns,
            descriptors,
            row_count,
        })
    }

    /// Load a dataset from CSV text, inferring one type per column.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::Reader::from_reader(reader);
        let headers: Vec<String> = rdr
            .headers()
            .context("Failed to read CSV headers")?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        if headers.is_empty() {
            bail!("CSV input has no header row");
        }

        let mut cells: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
        for (line, record) in rdr.records().enumerate() {
            let record = record.with_context(|| format!("Failed to read CSV record {}", line + 1))?;
            if record.len() != headers.len() {
                bail!(
                    "CSV record {} has {} fields, expected {}",
                    line + 1,
                    record.len(),
                    headers.len()
                );
            }
            for (idx, field) in record.iter().enumerate() {
                cells[idx].push(field.trim().to_string());
            }
        }

        if cells[0].is_empty() {
            bail!("CSV input must contain at least one data row");
        }

        let columns = headers
            .into_iter()
            .zip(cells)
            .map(|(name, raw)| infer_column(name, raw))
            .collect();

        Self::new(columns)
    }

    pub fn from_csv_path(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)
            .with_context(|| format!("Failed to open {}", path.display()))?;
        Self::from_csv_reader(file).with_context(|| format!("Failed to load {}", path.display()))
    }

    pub fn len(&self) -> usize {
        self.row_count
    }

    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn require_column(&self, name: &str) -> Result<&Column> {
        self.column(name)
            .ok_or_else(|| anyhow!("Column '{}' not found", name))
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    pub fn descriptors(&self) -> &[ColumnDescriptor] {
        &self.descriptors
    }

    pub fn descriptor(&self, name: &str) -> Option<&ColumnDescriptor> {
        self.descriptors.iter().find(|d| d.name == name)
    }

    pub fn preview(&self, rows: usize) -> Preview {
        let preview: Vec<Map<String, JsonValue>> = (0..rows.min(self.row_count))
            .map(|row| {
                self.columns
                    .iter()
                    .map(|c| (c.name.clone(), c.values[row].to_json()))
                    .collect()
            })
            .collect();

        Preview {
            preview,
            total_rows: self.row_count,
            columns: self.column_names(),
        }
    }
}

fn infer_column(name: String, raw: Vec<String>) -> Column {
    let present: Vec<&str> = raw.iter().map(String::as_str).filter(|s| !s.is_empty()).collect();

    let kind = if present.is_empty() {
        ColumnKind::Float
    } else if present.iter().all(|s| s.parse::<i64>().is_ok()) {
        ColumnKind::Integer
    } else if present.iter().all(|s| s.parse::<f64>().is_ok()) {
        ColumnKind::Float
    } else if present
        .iter()
        .all(|s| NaiveDate::parse_from_str(s, DATE_FORMAT).is_ok())
    {
        ColumnKind::Date
    } else {
        ColumnKind::Text
    };

    // Every cell was checked against `kind` above, so the fallbacks only see empty cells.
    let values = raw
        .into_iter()
        .map(|s| {
            if s.is_empty() {
                return Value::Missing;
            }
            match kind {
                ColumnKind::Integer | ColumnKind::Float => {
                    s.parse::<f64>().map(Value::Number).unwrap_or(Value::Missing)
                }
                ColumnKind::Date => NaiveDate::parse_from_str(&s, DATE_FORMAT)
                    .map(Value::Date)
                    .unwrap_or(Value::Missing),
                ColumnKind::Text => Value::Text(s),
            }
        })
        .collect();

    Column::new(name, kind, values)
}
