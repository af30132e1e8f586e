//! Tracing initialization with OpenTelemetry export.

use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::{
    trace::{RandomIdGenerator, Sampler, TracerProvider},
    Resource,
};
use opentelemetry_stdout::SpanExporter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Install the global tracing subscriber with OpenTelemetry export.
///
/// Spans go two places: an OpenTelemetry stdout exporter (swap in an OTLP
/// exporter for deployment) and a fmt layer for human-readable logs. Both
/// honor `RUST_LOG`.
///
/// Call once at startup. The library crates only emit spans; none of them
/// installs a subscriber.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_telemetry() -> Result<(), Box<dyn std::error::Error>> {
    let provider = TracerProvider::builder()
        .with_simple_exporter(SpanExporter::default())
        .with_id_generator(RandomIdGenerator::default())
        .with_sampler(Sampler::AlwaysOn)
        .with_resource(Resource::default())
        .build();

    let otel = tracing_opentelemetry::layer()
        .with_tracer(provider.tracer("atelier"))
        .with_filter(EnvFilter::from_default_env());
    let fmt = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_filter(EnvFilter::from_default_env());

    tracing_subscriber::registry()
        .with(otel)
        .with(fmt)
        .try_init()?;

    Ok(())
}

/// Flush pending spans and shut the tracer provider down.
///
/// Call before exit so spans buffered by the exporter are not lost.
pub fn shutdown_telemetry() {
    opentelemetry::global::shutdown_tracer_provider();
}
