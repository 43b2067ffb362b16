//! HTTP surface.
//!
//! Routes under `/api`:
//! - `GET /api/columns`: column descriptors of the served dataset.
//! - `GET /api/data-preview`: leading rows, JSON-safe.
//! - `GET /api/graph-types`: the chart catalogue.
//! - `POST /api/generate-graph`: validate and build a chart. Always answers
//!   `200` with a `success` flag; failures are carried in `errors`.

use crate::config::Args;
use crate::data::Dataset;
use crate::ir::Presentation;
use actix_web::web::{get, scope};
use actix_web::Scope;
use anyhow::Result;

mod charts;
mod dataset;

const API_PATH: &str = "/api";

/// Everything handlers share. Built once by the composition root, never mutated.
#[derive(Debug)]
pub struct AppState {
    pub dataset: Dataset,
    pub presentation: Presentation,
    pub preview_rows: usize,
}

impl AppState {
    pub fn new(dataset: Dataset) -> Self {
        Self {
            dataset,
            presentation: Presentation::default(),
            preview_rows: 10,
        }
    }

    pub fn from_args(args: &Args) -> Result<Self> {
        Ok(Self {
            dataset: args.load_dataset()?,
            presentation: args.presentation(),
            preview_rows: args.preview_rows,
        })
    }
}

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/columns", get().to(dataset::columns))
        .route("/data-preview", get().to(dataset::preview))
        .route("/graph-types", get().to(charts::graph_types))
        .service(charts::generate_resource())
}
