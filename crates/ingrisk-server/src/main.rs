mod app;

use std::path::PathBuf;

use clap::Parser;
use tracing::info;

use ingrisk_ai::RiskClassifier;

use crate::app::{AppState, router};

/// HTTP inference service for the ingredient risk classifier.
#[derive(Parser, Debug)]
#[command(name = "ingrisk-server", version, about)]
struct Args {
    /// Interface to bind.
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Port to bind.
    #[arg(long, default_value_t = 8000)]
    port: u16,

    /// Directory containing model.onnx and tokenizer.json.
    #[arg(
        long,
        env = "INGRISK_MODEL_DIR",
        default_value = "models/deberta-v3-base-ingredients"
    )]
    model_dir: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    dotenv::dotenv().ok();

    let args = Args::parse();

    // Fail fast: a process that cannot load the model never serves.
    let classifier = RiskClassifier::load(&args.model_dir)?;
    let state = AppState::new(classifier);

    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(
        addr = %addr,
        version = env!("CARGO_PKG_VERSION"),
        "ingrisk-server listening"
    );
    axum::serve(listener, router(state)).await?;
    Ok(())
}
