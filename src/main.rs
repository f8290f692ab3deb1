use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod forecast;
mod geocode;
mod pipeline;
mod routes;
mod templates;

use config::Config;
use forecast::OpenMeteoForecaster;
use geocode::OpenMeteoGeocoder;
use pipeline::ForecastPipeline;
use routes::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::load()?;

    let geocoder = Arc::new(OpenMeteoGeocoder::new()?);
    let forecaster = Arc::new(OpenMeteoForecaster::new()?);
    let pipeline = Arc::new(ForecastPipeline::new(geocoder, forecaster));

    let app = routes::app(AppState { pipeline }, &config.public_dir);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server has started on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
