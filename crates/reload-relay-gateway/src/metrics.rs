use prometheus::{
    register_int_counter_vec, register_int_gauge, Encoder, IntCounterVec, IntGauge, TextEncoder,
};
use std::sync::LazyLock;

pub static INTAKE_REQUESTS: LazyLock<IntCounterVec> = LazyLock::new(|| {
    register_int_counter_vec!(
        "reload_gateway_intake_total",
        "Reload intake requests",
        &["result"]
    )
    .unwrap()
});

pub static QUEUE_SIZE: LazyLock<IntGauge> = LazyLock::new(|| {
    register_int_gauge!("reload_gateway_queue_size", "Transactions held in the queue").unwrap()
});

pub static STATUS_LOOKUPS: LazyLock<IntCounterVec> = LazyLock::new(|| {
    register_int_counter_vec!(
        "reload_gateway_status_lookups_total",
        "Status lookups by outcome",
        &["result"]
    )
    .unwrap()
});

pub fn metrics_output() -> String {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if encoder.encode(&metric_families, &mut buffer).is_err() {
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}
