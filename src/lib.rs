// Library exports for chartsmith

pub mod chart_type;
pub mod charts;
pub mod config;
pub mod data;
pub mod generate;
pub mod ir;
pub mod sample;
pub mod services;
pub mod validate;

pub use chart_type::ChartType;
pub use data::{Column, ColumnDescriptor, ColumnKind, Dataset, Value};
pub use generate::{generate, ChartBuilder, ChartRequest, GenerateResponse, GraphPayload};
pub use ir::{ChartSpecification, Presentation, Trace};
pub use validate::{validate, ColumnRoles, ValidationResult};
