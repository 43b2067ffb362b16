use crate::data::Dataset;
use crate::ir::Presentation;
use crate::sample::{generate_financial_data, SampleOptions};
use anyhow::Result;
use clap::Parser;
use log::info;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "chartsmith")]
#[command(about = "Serve validated chart specifications over a tabular dataset", long_about = None)]
pub struct Args {
    /// Address to listen on
    #[arg(long, env = "CHARTSMITH_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long, env = "CHARTSMITH_PORT", default_value_t = 5000)]
    pub port: u16,

    /// CSV file to serve. Without it a synthetic financial dataset is generated.
    #[arg(long, env = "CHARTSMITH_DATA")]
    pub data: Option<PathBuf>,

    /// Days of synthetic history (ignored with --data)
    #[arg(long, default_value_t = 365)]
    pub days: u32,

    /// Seed for the synthetic dataset
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Rows returned by /api/data-preview
    #[arg(long, default_value_t = 10)]
    pub preview_rows: usize,

    #[arg(long, default_value_t = 500)]
    pub chart_height: u32,

    #[arg(long, default_value = "plotly_white")]
    pub template: String,

    /// Base trace color
    #[arg(long, default_value = "#3b82f6")]
    pub color: String,
}

impl Args {
    pub fn presentation(&self) -> Presentation {
        Presentation {
            height: self.chart_height,
            template: self.template.clone(),
            color: self.color.clone(),
        }
    }

    /// Build the process-wide dataset: the CSV file if given, sample data otherwise.
    pub fn load_dataset(&self) -> Result<Dataset> {
        match &self.data {
            Some(path) => {
                info!("Loading dataset from {}", path.display());
                Dataset::from_csv_path(path)
            }
            None => {
                info!("Generating sample financial data...");
                let today = chrono::Local::now().date_naive();
                generate_financial_data(&SampleOptions::new(self.days, self.seed, today))
            }
        }
    }
}
