use super::AppState;
use crate::chart_type::{catalogue, CatalogueEntry};
use crate::generate::{ChartBuilder, GenerateResponse, GraphPayload};
use actix_web::error::InternalError;
use actix_web::web::{self, post, resource};
use actix_web::{HttpResponse, Resource, Responder};
use log::warn;
use serde::Serialize;

#[derive(Serialize)]
struct GraphTypesResponse {
    graph_types: Vec<CatalogueEntry>,
}

pub(crate) async fn graph_types() -> impl Responder {
    HttpResponse::Ok().json(GraphTypesResponse {
        graph_types: catalogue(),
    })
}

pub(crate) async fn generate(
    payload: web::Json<GraphPayload>,
    state: web::Data<AppState>,
) -> impl Responder {
    let builder = ChartBuilder::with_presentation(&state.dataset, state.presentation.clone());
    HttpResponse::Ok().json(builder.generate_payload(payload.into_inner()))
}

/// The generate route, with undecodable bodies answered in the usual failure shape.
pub(crate) fn generate_resource() -> Resource {
    let json_config = web::JsonConfig::default().error_handler(|err, _req| {
        warn!("Rejected generate-graph payload: {}", err);
        let body = GenerateResponse::failure(vec![format!("Server error: {}", err)], Vec::new());
        InternalError::from_response(err, HttpResponse::Ok().json(body)).into()
    });

    resource("/generate-graph")
        .app_data(json_config)
        .route(post().to(generate))
}
