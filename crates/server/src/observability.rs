use once_cell::sync::Lazy;
use prometheus::{
    register_histogram_vec, register_int_counter, register_int_counter_vec, Encoder, HistogramVec,
    IntCounter, IntCounterVec, TextEncoder,
};

// Prometheus metrics (default registry), labelled by store operation:
// `get`, `put` or `purge`.
pub static REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "city_store_requests_total",
        "Total record store requests by operation",
        &["op"]
    )
    .expect("register requests_total")
});

pub static STORE_ERRORS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "city_store_store_errors_total",
        "Total requests that failed inside the record store"
    )
    .expect("register store_errors_total")
});

pub static REQUEST_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        "city_store_request_duration_seconds",
        "Record store request duration in seconds",
        &["op"],
        vec![0.0005, 0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0]
    )
    .expect("register request_duration")
});

/// Count one request for `op` and time it until the returned timer drops.
pub fn observe(op: &str) -> prometheus::HistogramTimer {
    REQUESTS_TOTAL.with_label_values(&[op]).inc();
    REQUEST_DURATION.with_label_values(&[op]).start_timer()
}

pub fn encode_metrics() -> (axum::http::StatusCode, String) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            format!("metrics encode error: {e}"),
        );
    }
    (
        axum::http::StatusCode::OK,
        String::from_utf8(buffer).unwrap_or_default(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encoded_metrics_include_request_counter() {
        drop(observe("get"));
        let (status, body) = encode_metrics();
        assert_eq!(status, axum::http::StatusCode::OK);
        assert!(body.contains("city_store_requests_total"));
    }
}
