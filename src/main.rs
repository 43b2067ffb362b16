use actix_web::{web, App, HttpServer};
use anyhow::{Context, Result};
use chartsmith::config::Args;
use chartsmith::services::{self, AppState};
use clap::Parser;
use env_logger::Env;
use log::info;

#[actix_web::main]
async fn main() -> Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));
    let args = Args::parse();

    let state = AppState::from_args(&args).context("Failed to load dataset")?;
    info!(
        "Data loaded: {} rows, {} columns",
        state.dataset.len(),
        state.dataset.columns().len()
    );
    let state = web::Data::new(state);

    info!("Server running at http://{}:{}", args.host, args.port);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(services::configure_routes())
    })
    .bind((args.host.as_str(), args.port))
    .with_context(|| format!("Failed to bind {}:{}", args.host, args.port))?
    .run()
    .await
    .context("Server terminated")
}
