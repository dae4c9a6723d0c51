use once_cell::sync::Lazy;
use prometheus::{
    register_int_counter_vec_with_registry, register_int_counter_with_registry, Encoder, IntCounter,
    IntCounterVec, Registry, TextEncoder,
};

use crate::error::UploadError;

pub static REGISTRY: Lazy<Registry> = Lazy::new(Registry::new);

pub static UPLOADS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec_with_registry!(
        "forceplate_uploads_total",
        "Processed uploads by outcome",
        &["outcome"],
        REGISTRY
    )
    .expect("register forceplate_uploads_total")
});

pub static SAMPLES_INGESTED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter_with_registry!(
        "forceplate_samples_ingested_total",
        "Force samples that reached the extractor",
        REGISTRY
    )
    .expect("register forceplate_samples_ingested_total")
});

pub static INGEST_WARNINGS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter_with_registry!(
        "forceplate_ingest_warnings_total",
        "Fields coerced to 0 or flagged during ingestion",
        REGISTRY
    )
    .expect("register forceplate_ingest_warnings_total")
});

pub fn record_success(samples: usize, warnings: usize) {
    UPLOADS_TOTAL.with_label_values(&["ok"]).inc();
    SAMPLES_INGESTED_TOTAL.inc_by(samples as u64);
    INGEST_WARNINGS_TOTAL.inc_by(warnings as u64);
}

pub fn record_failure(err: &UploadError) {
    UPLOADS_TOTAL.with_label_values(&[err.kind()]).inc();
}

pub fn uploads_with_outcome(outcome: &str) -> u64 {
    UPLOADS_TOTAL.with_label_values(&[outcome]).get()
}

/// Prometheus text exposition of every counter above.
pub fn gather_text() -> String {
    // touch the lazies so they show up even before the first upload
    Lazy::force(&UPLOADS_TOTAL);
    Lazy::force(&SAMPLES_INGESTED_TOTAL);
    Lazy::force(&INGEST_WARNINGS_TOTAL);

    let mut buf = Vec::new();
    let encoder = TextEncoder::new();
    if encoder.encode(&REGISTRY.gather(), &mut buf).is_err() {
        return String::new();
    }
    String::from_utf8(buf).unwrap_or_default()
}
