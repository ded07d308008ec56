//! Prometheus metrics for post-service.
//!
//! Exposes interaction collectors and an HTTP handler for the `/metrics`
//! endpoint.

use actix_web::HttpResponse;
use lazy_static::lazy_static;
use prometheus::{
    register_int_counter, register_int_counter_vec, Encoder, IntCounter, IntCounterVec,
    TextEncoder,
};

lazy_static! {
    /// Interaction attempts segmented by kind (like, dislike, comment) and
    /// outcome (accepted, rejected).
    pub static ref INTERACTIONS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "piazza_interactions_total",
        "Interaction attempts segmented by kind and outcome",
        &["kind", "outcome"]
    )
    .expect("failed to register piazza_interactions_total");

    /// Total posts created.
    pub static ref POSTS_CREATED_TOTAL: IntCounter = register_int_counter!(
        "piazza_posts_created_total",
        "Total posts created"
    )
    .expect("failed to register piazza_posts_created_total");
}

/// Record one interaction attempt.
pub fn record_interaction(kind: &str, accepted: bool) {
    let outcome = if accepted { "accepted" } else { "rejected" };
    INTERACTIONS_TOTAL.with_label_values(&[kind, outcome]).inc();
}

/// Actix handler that renders Prometheus metrics in text format.
pub async fn serve_metrics() -> HttpResponse {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();

    let mut buffer = Vec::new();
    if let Err(err) = encoder.encode(&metric_families, &mut buffer) {
        return HttpResponse::InternalServerError().body(err.to_string());
    }

    HttpResponse::Ok()
        .content_type(encoder.format_type())
        .body(buffer)
}
