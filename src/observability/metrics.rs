//! Metrics emission and exposition.

use std::net::SocketAddr;

use metrics::{describe_gauge, gauge};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Gauge reporting the outcome of watch-open attempts, labeled by `result`.
pub const WATCH_HEALTH: &str = "authmap_watch_health";

const RESULT_SUCCESS: &str = "success";
const RESULT_FAIL: &str = "fail";

/// Install the Prometheus exporter on the given address.
///
/// Must run inside a tokio runtime. Failure to install is logged, not fatal:
/// the store can synchronize without an exporter.
pub fn init_metrics(addr: SocketAddr) {
    let builder = PrometheusBuilder::new().with_http_listener(addr);
    match builder.install() {
        Ok(()) => {
            describe_gauge!(
                WATCH_HEALTH,
                "Outcome of the most recent watch-open attempt per result label \
                 (success=1.0, fail=0.0)"
            );
            tracing::info!(address = %addr, "metrics exporter listening");
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to install metrics exporter");
        }
    }
}

/// Record the outcome of a watch-open attempt.
pub fn record_watch_health(success: bool) {
    if success {
        gauge!(WATCH_HEALTH, "result" => RESULT_SUCCESS).set(1.0);
    } else {
        gauge!(WATCH_HEALTH, "result" => RESULT_FAIL).set(0.0);
    }
}
