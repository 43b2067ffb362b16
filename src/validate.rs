//! Request validation.
//!
//! Column roles are resolved against the dataset first; anything unresolvable
//! becomes an error message instead of a fault. The chart handler then applies
//! its own structural rules to whatever did resolve.

use crate::chart_type::ChartType;
use crate::data::{Column, ColumnDescriptor, Dataset};
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

/// A column slot a chart can draw from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    X,
    Y,
    Group,
}

impl Role {
    pub fn label(self) -> &'static str {
        match self {
            Role::X => "X-axis",
            Role::Y => "Y-axis",
            Role::Group => "Group-by",
        }
    }
}

/// Column names chosen by the caller. Blank names count as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColumnRoles {
    pub x: Option<String>,
    pub y: Option<String>,
    pub group: Option<String>,
}

impl ColumnRoles {
    pub fn new(x: Option<&str>, y: Option<&str>, group: Option<&str>) -> Self {
        Self {
            x: x.map(str::to_string),
            y: y.map(str::to_string),
            group: group.map(str::to_string),
        }
    }

    pub fn get(&self, role: Role) -> Option<&str> {
        let name = match role {
            Role::X => &self.x,
            Role::Y => &self.y,
            Role::Group => &self.group,
        };
        name.as_deref().map(str::trim).filter(|n| !n.is_empty())
    }
}

/// A resolved column together with its precomputed metadata.
#[derive(Debug, Clone, Copy)]
pub struct Field<'a> {
    pub column: &'a Column,
    pub descriptor: &'a ColumnDescriptor,
}

impl<'a> Field<'a> {
    pub fn name(&self) -> &'a str {
        self.column.name()
    }

    pub fn is_numeric(&self) -> bool {
        self.descriptor.is_numeric
    }

    pub fn distinct(&self) -> usize {
        self.descriptor.unique_values
    }
}

/// Role assignments after lookup. `None` means absent or unknown.
#[derive(Debug, Clone, Copy)]
pub struct Resolved<'a> {
    pub dataset: &'a Dataset,
    pub x: Option<Field<'a>>,
    pub y: Option<Field<'a>>,
    pub group: Option<Field<'a>>,
}

impl<'a> Resolved<'a> {
    pub fn rows(&self) -> usize {
        self.dataset.len()
    }

    pub fn require(&self, role: Role) -> Result<Field<'a>> {
        let field = match role {
            Role::X => self.x,
            Role::Y => self.y,
            Role::Group => self.group,
        };
        field.ok_or_else(|| anyhow!("{} column is not set", role.label()))
    }
}

/// Accumulates messages while rules run.
#[derive(Debug, Clone, Default)]
pub struct Report {
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl Report {
    pub fn error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    pub fn warn(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    pub fn finish(self) -> ValidationResult {
        ValidationResult {
            valid: self.errors.is_empty(),
            errors: self.errors,
            warnings: self.warnings,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

/// Check a request against the chart type's data requirements.
pub fn validate(dataset: &Dataset, chart_type: ChartType, roles: &ColumnRoles) -> ValidationResult {
    check(dataset, chart_type, roles).1
}

/// Resolve roles and run the chart's rules, keeping the resolution for the builder.
pub(crate) fn check<'a>(
    dataset: &'a Dataset,
    chart_type: ChartType,
    roles: &ColumnRoles,
) -> (Resolved<'a>, ValidationResult) {
    let handler = chart_type.handler();
    let mut report = Report::default();

    let mut lookup = |role: Role| -> Option<Field<'a>> {
        let Some(name) = roles.get(role) else {
            if handler.required_roles().contains(&role) {
                report.error(format!(
                    "{} column is required for {}",
                    role.label(),
                    chart_type.label().to_lowercase()
                ));
            }
            return None;
        };
        match (dataset.column(name), dataset.descriptor(name)) {
            (Some(column), Some(descriptor)) => Some(Field { column, descriptor }),
            _ => {
                report.error(format!("{} column '{}' not found in dataset", role.label(), name));
                None
            }
        }
    };

    let resolved = Resolved {
        dataset,
        x: lookup(Role::X),
        y: lookup(Role::Y),
        group: lookup(Role::Group),
    };

    handler.check(&resolved, &mut report);
    (resolved, report.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Column;

    fn make_data(rows: usize) -> Dataset {
        Dataset::new(vec![
            Column::numbers("x", (0..rows).map(|i| i as f64)),
            Column::numbers("y", (0..rows).map(|i| (i * 2) as f64)),
            Column::texts("cat", (0..rows).map(|i| format!("c{}", i))),
        ])
        .unwrap()
    }

    #[test]
    fn test_valid_line() {
        let data = make_data(5);
        let res = validate(&data, ChartType::Line, &ColumnRoles::new(Some("x"), Some("y"), None));
        assert!(res.valid);
        assert!(res.errors.is_empty());
        assert!(res.warnings.is_empty());
    }

    #[test]
    fn test_unknown_column_is_error() {
        let data = make_data(5);
        let res = validate(&data, ChartType::Line, &ColumnRoles::new(Some("x"), Some("nope"), None));
        assert!(!res.valid);
        assert_eq!(res.errors, vec!["Y-axis column 'nope' not found in dataset"]);
    }

    #[test]
    fn test_missing_required_role() {
        let data = make_data(5);
        let res = validate(&data, ChartType::Histogram, &ColumnRoles::new(Some(" "), None, None));
        assert!(!res.valid);
        assert_eq!(res.errors, vec!["X-axis column is required for histogram"]);
    }

    #[test]
    fn test_all_errors_reported() {
        let data = make_data(2);
        let res = validate(&data, ChartType::Line, &ColumnRoles::new(Some("x"), Some("cat"), None));
        assert!(!res.valid);
        assert_eq!(res.errors.len(), 2);
        assert!(res.errors[0].contains("must be numeric"));
        assert!(res.errors[1].contains("at least 3"));
    }

    #[test]
    fn test_warnings_do_not_block() {
        let data = make_data(3);
        let res = validate(&data, ChartType::Scatter, &ColumnRoles::new(Some("x"), Some("y"), None));
        assert!(res.valid);
        assert_eq!(res.warnings.len(), 1);
    }

    #[test]
    fn test_blank_names_are_absent() {
        let roles = ColumnRoles::new(Some(""), Some("y"), Some("  "));
        assert_eq!(roles.get(Role::X), None);
        assert_eq!(roles.get(Role::Y), Some("y"));
        assert_eq!(roles.get(Role::Group), None);
    }
}
