//! motormate-server - chat backend for the MotorMate automotive assistant

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use motormate_server::{AppState, DEFAULT_OLLAMA_URL, OllamaModel, router};
use tracing_subscriber::EnvFilter;

/// motormate-server - serve POST /chat backed by a local Ollama model
#[derive(Parser, Debug)]
#[command(name = "motormate-server")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Address to bind
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value_t = 5000)]
    port: u16,

    /// Ollama base URL
    #[arg(long, default_value = DEFAULT_OLLAMA_URL)]
    ollama_url: String,

    /// Model name
    #[arg(short, long, default_value = "mistral")]
    model: String,

    /// Sampling temperature
    #[arg(short, long, default_value_t = 0.7)]
    temperature: f32,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose {
        "motormate_server=debug"
    } else {
        "motormate_server=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    let model = OllamaModel::new(&args.ollama_url, &args.model).with_temperature(args.temperature);

    // Make sure Ollama is running before accepting requests
    match model.check().await {
        Ok(true) => tracing::info!(url = %model.base_url(), "connected to Ollama"),
        Ok(false) => tracing::warn!(
            model = %model.model(),
            "connected to Ollama, but the model is not installed (try `ollama pull {}`)",
            model.model()
        ),
        Err(e) => {
            anyhow::bail!(
                "could not reach Ollama at {}. Make sure Ollama is running and the {} model is installed. ({})",
                model.base_url(),
                model.model(),
                e
            );
        }
    }

    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!("listening on http://{}", listener.local_addr()?);

    let app = router(AppState::new(Arc::new(model)));
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("shutting down");
        })
        .await?;

    Ok(())
}
