mod config;

use anyhow::{Context, Result};
use axum::Router;
use axum::http::HeaderValue;
use clap::Parser;
use colored::*;
use parley_server::{AppState, RegistryHandle, SignalConfig, generate_client_key, router};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::{Cli, Commands, ServeArgs};

const API_PREFIX: &str = "/api/parley";

#[tokio::main]
async fn main() -> Result<()> {
    match Cli::parse().into_command() {
        Commands::Serve(args) => serve(args).await,
        Commands::Keygen => {
            println!("{}", generate_client_key());
            Ok(())
        }
    }
}

async fn serve(args: ServeArgs) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&args.log_level).context("Invalid log filter")?)
        .init();

    let registry = RegistryHandle::new(SignalConfig::default());
    let cors = cors_layer(&args.allowed_origins)?;

    let app = Router::new()
        .nest(API_PREFIX, router(AppState::new(registry)))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(args.bind)
        .await
        .with_context(|| format!("Failed to bind {}", args.bind))?;

    println!(
        "{} {}",
        "📡 parley listening on".green().bold(),
        format!("http://{}{}", args.bind, API_PREFIX).cyan()
    );
    info!(bind = %args.bind, "server started");

    axum::serve(listener, app).await.context("Server error")
}

fn cors_layer(origins: &[String]) -> Result<CorsLayer> {
    let allow_origin = if origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        let origins = origins
            .iter()
            .map(|o| HeaderValue::from_str(o).with_context(|| format!("Invalid origin {o}")))
            .collect::<Result<Vec<_>>>()?;
        AllowOrigin::list(origins)
    };

    Ok(CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any))
}
