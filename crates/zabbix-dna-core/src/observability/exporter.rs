//! Polling loop that re-exports Zabbix data as OpenTelemetry signals.
//!
//! Every tick performs exactly one bounded API call (`item.get` for metrics,
//! `problem.get` for traces), converts the rows and hands them to a
//! [`TelemetrySink`]. A failed tick is logged and the loop moves on; the next
//! tick starts from scratch.

use std::future::Future;
use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

use super::collector::{collect_samples, problem_span, ItemSample, ProblemSpan};
use crate::api::ZabbixClient;
use crate::error::{ApiError, TelemetryError};
use crate::protocol::records::{Item, Problem};
use crate::protocol::Params;

/// Receives converted telemetry once per tick.
pub trait TelemetrySink {
    fn publish_items(&mut self, samples: Vec<ItemSample>);
    fn publish_problems(&mut self, spans: Vec<ProblemSpan>);
}

/// Which signal the exporter produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    Metrics,
    Traces,
}

impl ExportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportKind::Metrics => "metrics",
            ExportKind::Traces => "traces",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExporterState {
    Stopped,
    Running,
}

/// Result of a single tick.
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// Rows were fetched; `skipped` rows could not be converted
    Exported { exported: usize, skipped: usize },
    /// The API call failed and nothing was exported
    Failed { error: String, reauthenticated: bool },
}

/// Totals over the lifetime of one [`Exporter::run`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExporterReport {
    pub ticks: u64,
    pub failed_ticks: u64,
    pub exported: u64,
    pub skipped: u64,
}

impl ExporterReport {
    fn record(&mut self, outcome: &TickOutcome) {
        self.ticks += 1;
        match outcome {
            TickOutcome::Exported { exported, skipped } => {
                self.exported += *exported as u64;
                self.skipped += *skipped as u64;
            }
            TickOutcome::Failed { .. } => self.failed_ticks += 1,
        }
    }
}

/// Parse a polling interval such as `60s`, `5m` or `1h 30m`.
pub fn parse_interval(value: &str) -> Result<Duration, TelemetryError> {
    let interval = humantime::parse_duration(value.trim())
        .map_err(|e| TelemetryError::InvalidInterval(value.to_string(), e.to_string()))?;

    if interval.is_zero() {
        return Err(TelemetryError::InvalidInterval(
            value.to_string(),
            "interval must be greater than zero".to_string(),
        ));
    }

    Ok(interval)
}

pub struct Exporter<S: TelemetrySink> {
    client: ZabbixClient,
    sink: S,
    kind: ExportKind,
    interval: Duration,
    state: ExporterState,
}

impl<S: TelemetrySink> Exporter<S> {
    pub fn new(client: ZabbixClient, sink: S, kind: ExportKind, interval: Duration) -> Self {
        Self {
            client,
            sink,
            kind,
            interval,
            state: ExporterState::Stopped,
        }
    }

    pub fn state(&self) -> ExporterState {
        self.state
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Run one poll-transform-export cycle.
    pub async fn tick(&mut self) -> TickOutcome {
        let result = match self.kind {
            ExportKind::Metrics => self.export_items().await,
            ExportKind::Traces => self.export_problems().await,
        };

        match result {
            Ok((exported, skipped)) => {
                info!(kind = self.kind.as_str(), exported, skipped, "tick exported");
                TickOutcome::Exported { exported, skipped }
            }
            Err(e) => {
                warn!(kind = self.kind.as_str(), "tick failed: {}", e);
                let reauthenticated = self.renew_session(&e).await;
                TickOutcome::Failed {
                    error: e.to_string(),
                    reauthenticated,
                }
            }
        }
    }

    async fn export_items(&mut self) -> Result<(usize, usize), ApiError> {
        let items: Vec<Item> = self.client.get("item.get", Params::exporter_items()).await?;
        let (samples, skipped) = collect_samples(&items);
        let exported = samples.len();
        self.sink.publish_items(samples);
        Ok((exported, skipped))
    }

    async fn export_problems(&mut self) -> Result<(usize, usize), ApiError> {
        let problems: Vec<Problem> = self
            .client
            .get("problem.get", Params::exporter_problems())
            .await?;
        let spans: Vec<ProblemSpan> = problems.iter().map(problem_span).collect();
        let exported = spans.len();
        self.sink.publish_problems(spans);
        Ok((exported, 0))
    }

    /// Log in again after an expired session so the next tick can succeed.
    async fn renew_session(&mut self, error: &ApiError) -> bool {
        if !error.is_auth_error() || !self.client.has_credentials() {
            return false;
        }

        match self.client.relogin().await {
            Ok(_) => {
                info!("zabbix session renewed");
                true
            }
            Err(e) => {
                warn!("re-login failed: {}", e);
                false
            }
        }
    }

    /// Tick at the configured interval until `shutdown` resolves.
    ///
    /// The first tick fires immediately. A tick always runs to completion;
    /// shutdown is only observed between ticks, and ticks delayed by a slow
    /// API are not made up for.
    pub async fn run<F, C>(&mut self, shutdown: F, mut on_tick: C) -> ExporterReport
    where
        F: Future<Output = ()>,
        C: FnMut(&TickOutcome),
    {
        let mut report = ExporterReport::default();
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(shutdown);

        self.state = ExporterState::Running;
        info!(kind = self.kind.as_str(), interval = ?self.interval, "exporter started");

        loop {
            tokio::select! {
                biased;
                _ = &mut shutdown => break,
                _ = ticker.tick() => {
                    let outcome = self.tick().await;
                    report.record(&outcome);
                    on_tick(&outcome);
                }
            }
        }

        self.state = ExporterState::Stopped;
        info!(ticks = report.ticks, failed = report.failed_ticks, "exporter stopped");
        report
    }
}
