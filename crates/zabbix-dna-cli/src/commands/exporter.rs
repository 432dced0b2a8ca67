//! Long-running OTLP exporter.

use tracing::warn;
use zabbix_dna_core::observability::{
    parse_interval, ExportKind, Exporter, ExporterReport, GaugeSink, OtlpEngine, SpanSink,
    TickOutcome,
};

use crate::cli::{ExporterArgs, ExporterCommands};
use crate::context::Context;
use crate::error::{CliError, TelemetryError};

/// Run exporter command until Ctrl-C
pub async fn run_exporter(args: ExporterArgs, ctx: &Context) -> Result<(), CliError> {
    let (kind, run) = match args.command {
        ExporterCommands::Metrics(run) => (ExportKind::Metrics, run),
        ExporterCommands::Traces(run) => (ExportKind::Traces, run),
    };

    let interval = parse_interval(&run.interval)?;
    let endpoint = run
        .endpoint
        .or_else(|| ctx.config.otlp.endpoint.clone())
        .ok_or(TelemetryError::MissingEndpoint)?;
    let engine = OtlpEngine::new(&endpoint, &ctx.config.otlp.service_name)?;
    let client = ctx.connect().await?;

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("cannot listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    let report = match kind {
        ExportKind::Metrics => {
            let provider = engine.meter_provider(interval)?;
            ctx.message(&format!(
                "Exporting metrics to {} every {} (Ctrl-C to stop)",
                engine.metrics_endpoint(),
                run.interval
            ));

            let mut exporter = Exporter::new(client, GaugeSink::for_provider(&provider), kind, interval);
            let report = exporter.run(shutdown, print_tick).await;
            if let Err(e) = provider.shutdown() {
                warn!("meter provider shutdown failed: {}", e);
            }
            report
        }
        ExportKind::Traces => {
            let provider = engine.tracer_provider()?;
            ctx.message(&format!(
                "Exporting traces to {} every {} (Ctrl-C to stop)",
                engine.traces_endpoint(),
                run.interval
            ));

            let mut exporter = Exporter::new(client, SpanSink::for_provider(&provider), kind, interval);
            let report = exporter.run(shutdown, print_tick).await;
            if let Err(e) = provider.shutdown() {
                warn!("tracer provider shutdown failed: {}", e);
            }
            report
        }
    };

    ctx.message(&summary(&report));
    Ok(())
}

fn print_tick(outcome: &TickOutcome) {
    match outcome {
        TickOutcome::Exported { exported, skipped } => {
            println!("[{}] exported {} (skipped {})", timestamp(), exported, skipped)
        }
        TickOutcome::Failed {
            error,
            reauthenticated,
        } => {
            let note = if *reauthenticated { ", session renewed" } else { "" };
            eprintln!("[{}] tick failed: {}{}", timestamp(), error, note)
        }
    }
}

fn timestamp() -> String {
    chrono::Local::now().format("%H:%M:%S").to_string()
}

fn summary(report: &ExporterReport) -> String {
    format!(
        "Exporter stopped: {} tick(s), {} failed, {} exported, {} skipped",
        report.ticks, report.failed_ticks, report.exported, report.skipped
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary() {
        let report = ExporterReport {
            ticks: 3,
            failed_ticks: 1,
            exported: 200,
            skipped: 4,
        };
        assert_eq!(
            summary(&report),
            "Exporter stopped: 3 tick(s), 1 failed, 200 exported, 4 skipped"
        );
    }
}
