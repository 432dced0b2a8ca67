//! OTLP/HTTP pipelines and the sinks that feed them.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use opentelemetry::metrics::{Meter, MeterProvider as _, ObservableGauge};
use opentelemetry::trace::{Span as _, Tracer, TracerProvider as _};
use opentelemetry::KeyValue;
use opentelemetry_otlp::{MetricExporter, SpanExporter, WithExportConfig};
use opentelemetry_sdk::metrics::{PeriodicReader, SdkMeterProvider};
use opentelemetry_sdk::trace::{self as sdktrace, TracerProvider};
use opentelemetry_sdk::{runtime, Resource};

use super::collector::{ItemSample, ProblemSpan};
use super::exporter::TelemetrySink;
use crate::error::TelemetryError;

/// Instrumentation scope used for meters and tracers.
pub const SCOPE_NAME: &str = "zabbix-dna-collector";

pub const METRICS_PATH: &str = "/v1/metrics";
pub const TRACES_PATH: &str = "/v1/traces";

const MAX_UNIT_LEN: usize = 63;

/// Full signal URL for an OTLP/HTTP collector base endpoint.
///
/// `localhost:4318` becomes `http://localhost:4318/v1/metrics`; an endpoint
/// that already ends in the signal path is kept.
pub fn signal_endpoint(base: &str, path: &str) -> String {
    let base = base.trim().trim_end_matches('/');
    let base = if base.contains("://") {
        base.to_string()
    } else {
        format!("http://{}", base)
    };

    if base.ends_with(path) {
        base
    } else {
        format!("{}{}", base, path)
    }
}

/// Builds meter and tracer providers for one collector endpoint.
pub struct OtlpEngine {
    endpoint: String,
    service_name: String,
}

impl OtlpEngine {
    pub fn new(endpoint: &str, service_name: &str) -> Result<Self, TelemetryError> {
        if endpoint.trim().is_empty() {
            return Err(TelemetryError::MissingEndpoint);
        }

        Ok(Self {
            endpoint: endpoint.trim().to_string(),
            service_name: service_name.to_string(),
        })
    }

    pub fn metrics_endpoint(&self) -> String {
        signal_endpoint(&self.endpoint, METRICS_PATH)
    }

    pub fn traces_endpoint(&self) -> String {
        signal_endpoint(&self.endpoint, TRACES_PATH)
    }

    fn resource(&self) -> Resource {
        Resource::new(vec![KeyValue::new("service.name", self.service_name.clone())])
    }

    /// Meter provider pushing every `export_interval`.
    pub fn meter_provider(&self, export_interval: Duration) -> Result<SdkMeterProvider, TelemetryError> {
        let exporter = MetricExporter::builder()
            .with_http()
            .with_endpoint(self.metrics_endpoint())
            .build()
            .map_err(|e| TelemetryError::Exporter {
                signal: "metrics",
                message: e.to_string(),
            })?;

        let reader = PeriodicReader::builder(exporter, runtime::Tokio)
            .with_interval(export_interval)
            .build();

        Ok(SdkMeterProvider::builder()
            .with_reader(reader)
            .with_resource(self.resource())
            .build())
    }

    /// Tracer provider with a batch span processor.
    pub fn tracer_provider(&self) -> Result<TracerProvider, TelemetryError> {
        let exporter = SpanExporter::builder()
            .with_http()
            .with_endpoint(self.traces_endpoint())
            .build()
            .map_err(|e| TelemetryError::Exporter {
                signal: "traces",
                message: e.to_string(),
            })?;

        Ok(TracerProvider::builder()
            .with_batch_exporter(exporter, runtime::Tokio)
            .with_config(sdktrace::Config::default().with_resource(self.resource()))
            .build())
    }
}

#[derive(Debug, Clone)]
struct Reading {
    value: f64,
    attributes: Vec<KeyValue>,
}

type Readings = Arc<RwLock<HashMap<String, Vec<Reading>>>>;

/// Publishes item samples through observable gauges.
///
/// One gauge is registered per distinct metric name the first time it is
/// seen. Each tick replaces the shared snapshot the gauge callbacks read.
pub struct GaugeSink {
    meter: Meter,
    readings: Readings,
    gauges: HashMap<String, ObservableGauge<f64>>,
}

impl GaugeSink {
    pub fn new(meter: Meter) -> Self {
        Self {
            meter,
            readings: Arc::new(RwLock::new(HashMap::new())),
            gauges: HashMap::new(),
        }
    }

    /// Sink on the collector scope of `provider`.
    pub fn for_provider(provider: &SdkMeterProvider) -> Self {
        Self::new(provider.meter(SCOPE_NAME))
    }

    /// Metric names with a registered gauge.
    pub fn registered(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.gauges.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Observations currently held for `metric`.
    pub fn reading_count(&self, metric: &str) -> usize {
        self.readings
            .read()
            .map(|map| map.get(metric).map(Vec::len).unwrap_or(0))
            .unwrap_or(0)
    }

    fn register(&mut self, sample: &ItemSample) {
        let readings = self.readings.clone();
        let metric = sample.metric.clone();

        let mut description = format!("{} ({})", sample.name, sample.key);
        if !sample.units.is_empty() && !is_valid_unit(&sample.units) {
            // the SDK drops instruments whose unit it rejects
            description.push_str(&format!(" [{}]", sample.units));
        }

        let mut builder = self
            .meter
            .f64_observable_gauge(sample.metric.clone())
            .with_description(description);
        if !sample.units.is_empty() && is_valid_unit(&sample.units) {
            builder = builder.with_unit(sample.units.clone());
        }

        let gauge = builder
            .with_callback(move |observer| {
                if let Ok(map) = readings.read() {
                    for reading in map.get(&metric).into_iter().flatten() {
                        observer.observe(reading.value, &reading.attributes);
                    }
                }
            })
            .build();

        self.gauges.insert(sample.metric.clone(), gauge);
    }
}

/// Units the SDK accepts: printable ASCII, at most 63 bytes.
pub fn is_valid_unit(units: &str) -> bool {
    units.len() <= MAX_UNIT_LEN && units.bytes().all(|b| b.is_ascii() && !b.is_ascii_control())
}

impl TelemetrySink for GaugeSink {
    fn publish_items(&mut self, samples: Vec<ItemSample>) {
        let mut snapshot: HashMap<String, Vec<Reading>> = HashMap::new();

        for sample in samples {
            if !self.gauges.contains_key(&sample.metric) {
                self.register(&sample);
            }
            snapshot.entry(sample.metric).or_default().push(Reading {
                value: sample.value,
                attributes: sample.attributes,
            });
        }

        match self.readings.write() {
            Ok(mut current) => *current = snapshot,
            Err(_) => tracing::warn!("gauge snapshot lock poisoned, dropping tick"),
        }
    }

    fn publish_problems(&mut self, _spans: Vec<ProblemSpan>) {}
}

/// Emits one span per problem.
pub struct SpanSink<T: Tracer> {
    tracer: T,
    emitted: usize,
}

impl SpanSink<sdktrace::Tracer> {
    /// Sink on the collector scope of `provider`.
    pub fn for_provider(provider: &TracerProvider) -> Self {
        Self::new(provider.tracer(SCOPE_NAME))
    }
}

impl<T: Tracer> SpanSink<T> {
    pub fn new(tracer: T) -> Self {
        Self { tracer, emitted: 0 }
    }

    /// Spans emitted since creation.
    pub fn emitted(&self) -> usize {
        self.emitted
    }
}

impl<T: Tracer> TelemetrySink for SpanSink<T> {
    fn publish_items(&mut self, _samples: Vec<ItemSample>) {}

    fn publish_problems(&mut self, spans: Vec<ProblemSpan>) {
        for problem in spans {
            let mut span = self
                .tracer
                .span_builder(problem.name)
                .with_attributes(problem.attributes)
                .start(&self.tracer);
            span.end();
            self.emitted += 1;
        }
    }
}
