//! HTTP Server for the evaluation API.
//!
//! # API Endpoints
//!
//! | Method | Path          | Description                                  |
//! |--------|---------------|----------------------------------------------|
//! | GET    | `/evaluation` | Evaluate CSV sources given as `url1..urlN`   |
//! | GET    | `/api-docs/openapi.json` | OpenAPI document of this API      |
//!
//! Every other path answers 404.

use axum::{
    extract::{RawQuery, State},
    http::{header, Method},
    response::Json,
    routing::get,
    Router,
};
use std::{
    net::{IpAddr, SocketAddr},
    sync::Arc,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::Instrument;
use utoipa::OpenApi;
use uuid::Uuid;

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::evaluation::evaluate_params;
use crate::ingest::SourceFetcher;
use crate::models::Evaluation;

/// OpenAPI description of the service
#[derive(OpenApi)]
#[openapi(
    info(title = "speechstats", description = "Speech statistics over CSV sources"),
    paths(evaluation),
    components(schemas(Evaluation))
)]
pub struct ApiDoc;

/// Shared, read-only state of the server
#[derive(Debug, Clone)]
pub struct AppState {
    pub fetcher: SourceFetcher,
}

/// Build the application router
pub fn router(fetcher: SourceFetcher) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/evaluation", get(evaluation))
        .route("/api-docs/openapi.json", get(openapi))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(AppState { fetcher }))
}

/// Start the HTTP server
pub async fn start_server(config: &ServerConfig) -> ServerResult<()> {
    let fetcher = SourceFetcher::with_timeout(config.fetch_timeout)?;

    let addr = listen_addr(config)?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("speechstats server running on http://{}", listener.local_addr()?);
    tracing::info!("GET /evaluation?url1=...&url2=... - Evaluate CSV sources");
    tracing::info!("GET /api-docs/openapi.json - OpenAPI document");

    axum::serve(listener, router(fetcher)).await?;

    Ok(())
}

/// Socket address from the configured host and port. IPv6 hosts such as
/// `::` are accepted without brackets.
pub fn listen_addr(config: &ServerConfig) -> ServerResult<SocketAddr> {
    let host = config.host.trim().trim_start_matches('[').trim_end_matches(']');
    let ip: IpAddr = host
        .parse()
        .map_err(|_| ServerError::InvalidAddress(config.host.clone()))?;

    Ok(SocketAddr::new(ip, config.port))
}

/// Split a raw query string into ordered `(name, value)` pairs.
///
/// Decoding never fails, so a garbled query still gets a 200.
pub fn query_pairs(query: Option<&str>) -> Vec<(String, String)> {
    url::form_urlencoded::parse(query.unwrap_or_default().as_bytes())
        .into_owned()
        .collect()
}

/// Evaluation endpoint
#[utoipa::path(
    get,
    path = "/evaluation",
    params(
        ("url1" = Option<String>, Query, description = "First CSV source; further sources follow as url2, url3, ... in order"),
    ),
    responses(
        (status = 200, description = "Evaluation over all readable sources", body = Evaluation),
    )
)]
async fn evaluation(
    State(state): State<Arc<AppState>>,
    RawQuery(query): RawQuery,
) -> Json<Evaluation> {
    let params = query_pairs(query.as_deref());
    let span = tracing::info_span!("evaluation", request_id = %Uuid::new_v4());

    let report = evaluate_params(&params, &state.fetcher)
        .instrument(span.clone())
        .await;

    span.in_scope(|| {
        tracing::info!(
            sources = report.sources_accepted,
            failed = report.sources_failed,
            records = report.unique_records,
            "evaluation finished"
        );
    });

    Json(report.evaluation)
}

async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
