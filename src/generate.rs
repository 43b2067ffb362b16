//! The chart builder: validation, dispatch and fault containment.

use crate::chart_type::ChartType;
use crate::data::Dataset;
use crate::ir::{ChartSpecification, Presentation};
use crate::validate::{check, ColumnRoles};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// A request after transport decoding.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartRequest {
    pub chart_type: ChartType,
    pub title: String,
    pub roles: ColumnRoles,
}

/// Raw payload of `POST /api/generate-graph`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GraphPayload {
    pub graph_type: Option<String>,
    pub title: Option<String>,
    pub x_axis: Option<String>,
    pub y_axis: Option<String>,
    pub group_by: Option<String>,
}

impl GraphPayload {
    /// Request-level checks. Errors here never reach the validator.
    pub fn into_request(self) -> Result<ChartRequest, String> {
        let graph_type = self
            .graph_type
            .filter(|t| !t.trim().is_empty())
            .ok_or("Graph type is required")?;
        let title = self
            .title
            .filter(|t| !t.trim().is_empty())
            .ok_or("Title is required")?;
        let chart_type = graph_type
            .trim()
            .parse::<ChartType>()
            .map_err(|e| e.to_string())?;

        Ok(ChartRequest {
            chart_type,
            title,
            roles: ColumnRoles {
                x: self.x_axis,
                y: self.y_axis,
                group: self.group_by,
            },
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerateResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart: Option<ChartSpecification>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
    pub warnings: Vec<String>,
}

impl GenerateResponse {
    pub fn success(chart: ChartSpecification, warnings: Vec<String>) -> Self {
        Self {
            success: true,
            chart: Some(chart),
            errors: None,
            warnings,
        }
    }

    pub fn failure(errors: Vec<String>, warnings: Vec<String>) -> Self {
        Self {
            success: false,
            chart: None,
            errors: Some(errors),
            warnings,
        }
    }

    pub fn errors(&self) -> &[String] {
        self.errors.as_deref().unwrap_or_default()
    }
}

/// Builds charts over one shared, read-only dataset.
#[derive(Debug, Clone)]
pub struct ChartBuilder<'a> {
    dataset: &'a Dataset,
    presentation: Presentation,
}

impl<'a> ChartBuilder<'a> {
    pub fn new(dataset: &'a Dataset) -> Self {
        Self::with_presentation(dataset, Presentation::default())
    }

    pub fn with_presentation(dataset: &'a Dataset, presentation: Presentation) -> Self {
        Self { dataset, presentation }
    }

    pub fn generate(&self, request: &ChartRequest) -> GenerateResponse {
        let chart_type = request.chart_type;
        let (resolved, validation) = check(self.dataset, chart_type, &request.roles);
        if !validation.valid {
            debug!("{} request rejected: {:?}", chart_type, validation.errors);
            return GenerateResponse::failure(validation.errors, validation.warnings);
        }

        match chart_type.handler().build(&resolved, &self.presentation) {
            Ok(plot) => {
                let chart =
                    ChartSpecification::assemble(chart_type, &request.title, plot, &self.presentation);
                debug!("Generated {} chart with {} trace(s)", chart_type, chart.traces.len());
                GenerateResponse::success(chart, validation.warnings)
            }
            Err(e) => {
                warn!("Error in {} generation: {:#}", chart_type, e);
                GenerateResponse::failure(
                    vec![format!("Error generating graph: {:#}", e)],
                    validation.warnings,
                )
            }
        }
    }

    /// Decode a transport payload and build it. Never fails outright.
    pub fn generate_payload(&self, payload: GraphPayload) -> GenerateResponse {
        match payload.into_request() {
            Ok(request) => self.generate(&request),
            Err(e) => GenerateResponse::failure(vec![e], Vec::new()),
        }
    }
}

/// Free-function form of [`ChartBuilder::generate`] with default presentation.
pub fn generate(
    dataset: &Dataset,
    chart_type: ChartType,
    title: &str,
    x_col: Option<&str>,
    y_col: Option<&str>,
    group_col: Option<&str>,
) -> GenerateResponse {
    let request = ChartRequest {
        chart_type,
        title: title.to_string(),
        roles: ColumnRoles::new(x_col, y_col, group_col),
    };
    ChartBuilder::new(dataset).generate(&request)
}
