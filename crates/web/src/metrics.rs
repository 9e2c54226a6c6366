use anyhow::Result;
use metrics::{describe_counter, describe_gauge};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;

static PROM_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

pub fn describe() {
    describe_gauge!(
        "wallet_web_build_info",
        "Build info for the wallet analysis web service (value is always 1)."
    );
    describe_counter!(
        "wallet_web_proxy_requests_total",
        "Inbound requests to the /api/wallet/analysis relay."
    );
    describe_counter!(
        "wallet_web_upstream_errors_total",
        "Transport or decode failures talking to the analysis backend."
    );
}

/// Install a global Prometheus recorder exactly once and return a handle for rendering `/metrics`.
///
/// Note: `PrometheusBuilder::install_recorder` requires the caller to run upkeep periodically.
/// We run upkeep opportunistically on each `/metrics` request.
pub fn init_global() -> Result<PrometheusHandle> {
    let handle = PROM_HANDLE.get_or_init(|| {
        // Descriptor registration is idempotent, so it's fine to call each time.
        describe();

        PrometheusBuilder::new()
            .install_recorder()
            .expect("failed to install Prometheus recorder for web")
    });

    ::metrics::gauge!(
        "wallet_web_build_info",
        "version" => env!("CARGO_PKG_VERSION"),
    )
    .set(1.0);

    Ok(handle.clone())
}
