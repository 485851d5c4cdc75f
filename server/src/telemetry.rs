//! Console logging plus optional OpenTelemetry export.
//!
//! `RUST_LOG` drives the filter. When `OTEL_EXPORTER_OTLP_ENDPOINT` names a
//! collector that accepts a TCP connection, spans and log events are also
//! shipped over OTLP/gRPC under `OTEL_SERVICE_NAME`.

use anyhow::{Context, Result};
use opentelemetry::trace::TracerProvider;
use opentelemetry_appender_tracing::layer::OpenTelemetryTracingBridge;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::logs::SdkLoggerProvider;
use opentelemetry_sdk::trace::SdkTracerProvider;
use opentelemetry_sdk::Resource;
use std::env;
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const DEFAULT_SERVICE_NAME: &str = "foodgram-server";
const PROBE_TIMEOUT: Duration = Duration::from_millis(100);

/// Where telemetry goes besides the console.
enum Export {
    ConsoleOnly,
    Unreachable(String),
    Collector { endpoint: String, service: String },
}

fn export_target() -> Export {
    let Ok(endpoint) = env::var("OTEL_EXPORTER_OTLP_ENDPOINT") else {
        return Export::ConsoleOnly;
    };
    if !collector_reachable(&endpoint) {
        return Export::Unreachable(endpoint);
    }
    let service =
        env::var("OTEL_SERVICE_NAME").unwrap_or_else(|_| DEFAULT_SERVICE_NAME.to_string());
    Export::Collector { endpoint, service }
}

/// Install the global subscriber. Call once, before anything logs.
pub fn init_telemetry() -> Result<()> {
    let target = export_target();

    let providers = match &target {
        Export::Collector { endpoint, service } => Some(otlp_providers(endpoint, service)?),
        _ => None,
    };

    let (trace_layer, log_layer) = match providers {
        Some((traces, logs)) => {
            let tracer = traces.tracer(DEFAULT_SERVICE_NAME);
            opentelemetry::global::set_tracer_provider(traces);
            (
                Some(tracing_opentelemetry::layer().with_tracer(tracer)),
                Some(OpenTelemetryTracingBridge::new(&logs)),
            )
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .with(trace_layer)
        .with(log_layer)
        .init();

    match target {
        Export::ConsoleOnly => {
            tracing::debug!("OTEL_EXPORTER_OTLP_ENDPOINT not set, logging to console only")
        }
        Export::Unreachable(endpoint) => tracing::info!(
            %endpoint,
            "OpenTelemetry collector not reachable, logging to console only"
        ),
        Export::Collector { endpoint, service } => tracing::info!(
            %endpoint,
            %service,
            "exporting traces and logs over OTLP"
        ),
    }
    Ok(())
}

fn otlp_providers(endpoint: &str, service: &str) -> Result<(SdkTracerProvider, SdkLoggerProvider)> {
    let resource = Resource::builder()
        .with_service_name(service.to_string())
        .build();

    let spans = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(endpoint)
        .build()
        .context("Failed to create OTLP span exporter")?;
    let traces = SdkTracerProvider::builder()
        .with_batch_exporter(spans)
        .with_resource(resource.clone())
        .build();

    let records = opentelemetry_otlp::LogExporter::builder()
        .with_tonic()
        .with_endpoint(endpoint)
        .build()
        .context("Failed to create OTLP log exporter")?;
    let logs = SdkLoggerProvider::builder()
        .with_batch_exporter(records)
        .with_resource(resource)
        .build();

    Ok((traces, logs))
}

/// `host:port` part of an OTLP endpoint URL.
fn collector_addr(endpoint: &str) -> &str {
    let rest = endpoint
        .strip_prefix("http://")
        .or_else(|| endpoint.strip_prefix("https://"))
        .unwrap_or(endpoint);
    rest.split('/').next().unwrap_or(rest)
}

fn collector_reachable(endpoint: &str) -> bool {
    collector_addr(endpoint)
        .to_socket_addrs()
        .ok()
        .and_then(|mut addrs| addrs.next())
        .is_some_and(|addr| TcpStream::connect_timeout(&addr, PROBE_TIMEOUT).is_ok())
}
