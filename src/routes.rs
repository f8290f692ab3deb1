use std::sync::Arc;

use axum::{
    extract::{Query, State},
    handler::HandlerWithoutStateExt,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::{compression::CompressionLayer, cors::CorsLayer, services::ServeDir};
use tracing::warn;

use crate::pipeline::{ForecastPipeline, PipelineError};
use crate::templates::{
    render_page, AboutTemplate, HelpTemplate, IndexTemplate, NotFoundTemplate, SITE_AUTHOR,
};

#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<ForecastPipeline>,
}

#[derive(Deserialize)]
pub struct WeatherQuery {
    address: Option<String>,
}

#[derive(Deserialize)]
pub struct ProductsQuery {
    search: Option<String>,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    error: String,
}

#[derive(Serialize)]
pub struct ProductsResponse {
    products: Vec<serde_json::Value>,
}

/// Builds the application router. Explicit routes win; anything else falls
/// through to the static asset directory, and asset misses render the
/// generic not-found page.
pub fn app(state: AppState, public_dir: &str) -> Router {
    let assets = ServeDir::new(public_dir).not_found_service(page_not_found.into_service());

    Router::new()
        .route("/", get(index))
        .route("/about", get(about))
        .route("/help", get(help))
        .route("/help/*article", get(help_article_not_found))
        .route("/weather", get(weather))
        .route("/products", get(products))
        .fallback_service(assets)
        .layer(CompressionLayer::new())
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

async fn index() -> impl IntoResponse {
    render_page(&IndexTemplate {
        title: "Weather App",
        name: SITE_AUTHOR,
    })
}

async fn about() -> impl IntoResponse {
    render_page(&AboutTemplate {
        title: "About",
        name: SITE_AUTHOR,
    })
}

async fn help() -> impl IntoResponse {
    render_page(&HelpTemplate {
        title: "Help",
        message: "This is the help page.",
        name: SITE_AUTHOR,
    })
}

async fn help_article_not_found() -> impl IntoResponse {
    render_page(&NotFoundTemplate::help_article())
}

async fn page_not_found() -> impl IntoResponse {
    render_page(&NotFoundTemplate::page())
}

/// Every outcome is returned with the default success status; failures are
/// told apart by the body shape alone, matching the original contract.
async fn weather(
    State(state): State<AppState>,
    Query(params): Query<WeatherQuery>,
) -> impl IntoResponse {
    let address = params.address.unwrap_or_default();

    match state.pipeline.resolve(&address).await {
        Ok(report) => Json(report).into_response(),
        Err(e) => {
            if let PipelineError::Upstream(_) = e {
                warn!("Weather lookup for \"{}\" failed: {}", address, e);
            }
            Json(ErrorResponse { error: e.to_string() }).into_response()
        }
    }
}

async fn products(Query(params): Query<ProductsQuery>) -> impl IntoResponse {
    match params.search {
        Some(search) if !search.is_empty() => {
            Json(ProductsResponse { products: Vec::new() }).into_response()
        }
        _ => Json(ErrorResponse {
            error: "You must provide a search term".to_string(),
        })
        .into_response(),
    }
}
