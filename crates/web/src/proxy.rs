//! JSON relay for `GET /api/wallet/analysis`.
//!
//! Contract: validate the address locally, forward only the supplied query
//! parameters upstream, and relay the upstream status and JSON body
//! verbatim. Only transport-level failures are collapsed, into a 502 that
//! keeps the failure detail.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::upstream::AnalysisQuery;
use serde_json::json;
use std::sync::Arc;
use tracing::error;

use crate::AppState;

/// Validation message shipped by the product; callers match on it.
pub const ERR_ADDRESS_REQUIRED: &str = "Cüzdan adresi gereklidir";
/// Generic prefix for transport failures; detail is appended.
pub const ERR_UPSTREAM_FAILED: &str = "API isteği sırasında bir hata oluştu";

pub async fn wallet_analysis(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AnalysisQuery>,
) -> Response {
    metrics::counter!("wallet_web_proxy_requests_total").increment(1);

    if query.trimmed_address().is_none() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "success": false, "error": ERR_ADDRESS_REQUIRED })),
        )
            .into_response();
    }

    match state.client.fetch_analysis(&query).await {
        Ok(reply) => (reply.status, Json(reply.body)).into_response(),
        Err(err) => {
            metrics::counter!("wallet_web_upstream_errors_total").increment(1);
            error!(error = %err, "analysis proxy request failed");
            (
                StatusCode::BAD_GATEWAY,
                Json(json!({
                    "success": false,
                    "error": format!("{ERR_UPSTREAM_FAILED}: {err}"),
                })),
            )
                .into_response()
        }
    }
}
