use super::AppState;
use crate::data::ColumnDescriptor;
use actix_web::{web, HttpResponse, Responder};
use serde::Serialize;

#[derive(Serialize)]
struct ColumnsResponse<'a> {
    columns: &'a [ColumnDescriptor],
}

pub(crate) async fn columns(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(ColumnsResponse {
        columns: state.dataset.descriptors(),
    })
}

pub(crate) async fn preview(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(state.dataset.preview(state.preview_rows))
}
