//! Application loop for `tele`.
//!
//! Wires the feed listener, the ingest pipeline and the dashboard together.
//! The listener runs on its own task; this loop is the only owner of the
//! pipeline and handles one message completely before taking the next.

use tele_config::{TelemetryConfig, TransportKind};
use tele_core::{Result, TelemetryObserver};
use tele_ingest::{IngestPipeline, Outcome, TelemetryListener};
use tele_view::{format::format_reading, ChartFrame, Dashboard};
use tracing::{info, warn};

// ── Entry point ───────────────────────────────────────────────────────────────

/// Run until the feed ends or Ctrl-C is received.
pub async fn run(config: TelemetryConfig) -> Result<()> {
    let listener = TelemetryListener::new(&config.transport)?;
    let mut app = App::new(&config);

    let source = match config.transport.kind {
        TransportKind::Tcp => listener.address().to_string(),
        TransportKind::Stdin => "stdin".to_string(),
    };
    info!(
        "Listening for telemetry on {source}, {} samples per device",
        config.buffer.capacity
    );
    let mut rx = listener.spawn_listener();

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            line = rx.recv() => match line {
                Some(line) => {
                    if let Some(frame) = app.process(&line) {
                        info!("{frame}");
                    }
                }
                None => {
                    info!("Telemetry feed closed");
                    break;
                }
            },
            _ = &mut shutdown => {
                info!("Shutdown requested");
                break;
            }
        }
    }

    info!("Tracked {}", app.dashboard.count_label());
    for line in app.summary() {
        info!("  {line}");
    }
    Ok(())
}

// ── State ─────────────────────────────────────────────────────────────────────

/// Pipeline plus the presentation state it drives.
#[derive(Debug)]
pub struct App {
    pipeline:  IngestPipeline,
    dashboard: Dashboard,
}

impl App {
    pub fn new(config: &TelemetryConfig) -> Self {
        Self {
            pipeline:  IngestPipeline::new(config.buffer.capacity),
            dashboard: Dashboard::new(config.chart.clone()),
        }
    }

    /// Handle one raw feed message.
    ///
    /// Returns a fresh chart frame when the dashboard's view went stale,
    /// `None` otherwise (including for dropped messages).
    pub fn process(&mut self, raw: &str) -> Option<ChartFrame> {
        let outcome = match self.pipeline.handle(raw) {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!("Dropping malformed telemetry message: {e}");
                return None;
            }
        };

        let Outcome::Accepted(notifications) = outcome else {
            return None;
        };

        let mut stale = false;
        for notification in &notifications {
            stale |= self.dashboard.on_notification(notification);
        }

        if stale {
            self.dashboard.frame(self.pipeline.registry())
        } else {
            None
        }
    }

    pub fn pipeline(&self) -> &IngestPipeline {
        &self.pipeline
    }

    pub fn dashboard(&self) -> &Dashboard {
        &self.dashboard
    }

    /// Point the chart at another tracked device.
    pub fn select(&mut self, device_id: &str) -> bool {
        self.dashboard.select(device_id, self.pipeline.registry())
    }

    /// One line per device, first-seen order: window fill and newest sample.
    pub fn summary(&self) -> Vec<String> {
        let registry = self.pipeline.registry();
        registry
            .list()
            .into_iter()
            .filter_map(|device_id| {
                let buffer = registry.get(&device_id)?;
                let latest = buffer.latest()?;
                Some(format!(
                    "{device_id}: {}/{} samples, last {} ({} | {})",
                    buffer.len(),
                    buffer.capacity(),
                    latest.timestamp,
                    format_reading(latest.primary, ""),
                    format_reading(latest.secondary, ""),
                ))
            })
            .collect()
    }
}
