use serde::{Deserialize, Serialize};
use tele_core::DEFAULT_CAPACITY;

/// Root configuration structure parsed from `tele.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// Per-device history settings.
    pub buffer: BufferConfig,
    /// Where raw telemetry messages come from.
    pub transport: TransportConfig,
    /// Labels and suggested ranges for the chart datasets.
    pub chart: ChartConfig,
}

/// Sliding-window settings shared by every device buffer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BufferConfig {
    /// Samples kept per device. Must be at least 1.
    pub capacity: usize,
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
        }
    }
}

/// Message source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransportKind {
    /// Newline-delimited JSON over a TCP connection.
    #[default]
    Tcp,
    /// Newline-delimited JSON on standard input.
    Stdin,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    pub kind: TransportKind,
    /// `host:port` of the telemetry feed (TCP only).
    pub address: String,
    /// Delay before reconnecting after the feed drops (TCP only).
    pub reconnect_secs: u64,
    /// Raw messages buffered between the listener task and the pipeline.
    pub channel_capacity: usize,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            kind:             TransportKind::Tcp,
            address:          "127.0.0.1:9000".to_string(),
            reconnect_secs:   2,
            channel_capacity: 32,
        }
    }
}

/// Display settings for the two telemetry series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Dataset label of the primary metric.
    pub primary_label: String,
    /// Axis title of the primary metric, including units.
    pub primary_axis: String,
    /// Suggested upper bound of the primary axis.
    pub primary_max: f64,
    pub secondary_label: String,
    pub secondary_axis: String,
    pub secondary_max: f64,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            primary_label:   "Altitude".to_string(),
            primary_axis:    "Altitude (m)".to_string(),
            primary_max:     15_000.0,
            secondary_label: "Pressure".to_string(),
            secondary_axis:  "Pressure (psi)".to_string(),
            secondary_max:   100.0,
        }
    }
}
