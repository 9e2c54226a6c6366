mod metrics;
mod models;
mod proxy;

use anyhow::Result;
use askama::Template;
use axum::extract::{Query, State};
use axum::response::{Html, IntoResponse};
use axum::routing::get;
use axum::Router;
use common::types::AnalysisResponse;
use common::upstream::{AnalysisClient, AnalysisQuery};
use metrics_exporter_prometheus::PrometheusHandle;
use models::{token_cards, SummaryView, TokenCard};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::warn;

pub struct AppState {
    pub client: AnalysisClient,
    pub prometheus: PrometheusHandle,
}

impl AppState {
    pub fn new(upstream_base_url: &str, timeout_secs: u64) -> Result<Self> {
        Ok(Self {
            client: AnalysisClient::new(upstream_base_url, timeout_secs),
            prometheus: metrics::init_global()?,
        })
    }
}

// --- Templates ---

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate;

#[derive(Template)]
#[template(path = "partials/analysis.html")]
struct AnalysisTemplate {
    summary: SummaryView,
    tokens: Vec<TokenCard>,
}

#[derive(Template)]
#[template(path = "partials/error.html")]
struct ErrorTemplate {
    message: String,
}

fn error_partial(message: String) -> Html<String> {
    Html(ErrorTemplate { message }.to_string())
}

// --- Handlers ---

async fn index() -> impl IntoResponse {
    Html(IndexTemplate.to_string())
}

/// Server-rendered results for the htmx form. Always responds 200 with a
/// fragment; errors render as an inline error box.
async fn analysis_partial(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AnalysisQuery>,
) -> Html<String> {
    if query.trimmed_address().is_none() {
        // Validation failure, no upstream call is made.
        return error_partial("Lütfen bir cüzdan adresi girin".to_string());
    }

    let reply = match state.client.fetch_analysis(&query).await {
        Ok(reply) => reply,
        Err(err) => {
            ::metrics::counter!("wallet_web_upstream_errors_total").increment(1);
            warn!(error = %err, "analysis request failed");
            return error_partial(format!("{}: {err}", proxy::ERR_UPSTREAM_FAILED));
        }
    };

    if !reply.status.is_success() {
        let detail = reply
            .body
            .get("error")
            .and_then(|v| v.as_str())
            .unwrap_or("ayrıntı yok");
        return error_partial(format!(
            "Analiz servisi hata döndürdü ({}): {detail}",
            reply.status
        ));
    }

    let response: AnalysisResponse = match serde_json::from_value(reply.body) {
        Ok(response) => response,
        Err(err) => {
            warn!(error = %err, "analysis response did not match the expected shape");
            return error_partial("Analiz yanıtı beklenen biçimde değil".to_string());
        }
    };

    if !response.success {
        let detail = response.error.unwrap_or_else(|| "bilinmeyen hata".to_string());
        return error_partial(format!("Analiz başarısız: {detail}"));
    }

    let Some(data) = response.data else {
        return error_partial("Analiz yanıtı beklenen biçimde değil".to_string());
    };

    Html(
        AnalysisTemplate {
            summary: SummaryView::from_data(&data),
            tokens: token_cards(&data),
        }
        .to_string(),
    )
}

async fn metrics_endpoint(State(state): State<Arc<AppState>>) -> String {
    state.prometheus.run_upkeep();
    state.prometheus.render()
}

// --- Router ---

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/partials/analysis", get(analysis_partial))
        .route("/api/wallet/analysis", get(proxy::wallet_analysis))
        .route("/metrics", get(metrics_endpoint))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = common::config::Config::load()?;
    common::observability::init("wallet-analysis-web", &config.general.log_level);

    let state = Arc::new(AppState::new(
        &config.upstream.base_url,
        config.upstream.timeout_secs,
    )?);

    let app = create_router(state);
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    tracing::info!(addr = %addr, upstream = %config.upstream.base_url, "wallet analysis web listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
