use crate::message::decode;
use tele_core::{DeviceRegistry, Notification, Result, Series, TelemetryEvent, Timestamp};
use tracing::{debug, info};

/// Why a well-formed event was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// `MessageDate` absent or empty.
    MissingTimestamp,
    /// Neither the primary nor the secondary metric was reported.
    MissingMetrics,
}

/// Result of handling one decodable event.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The sample was stored. Notifications are in emission order.
    Accepted(Vec<Notification>),
    /// The event was ignored; no state changed.
    Rejected(Rejection),
}

impl Outcome {
    /// Notifications to forward to observers (empty when rejected).
    pub fn notifications(&self) -> &[Notification] {
        match self {
            Self::Accepted(notifications) => notifications,
            Self::Rejected(_) => &[],
        }
    }
}

/// Validates decoded telemetry and routes it into per-device buffers.
///
/// Each call to [`handle`](Self::handle) is an independent transaction:
/// a decode error or rejection leaves every buffer and the registry
/// untouched, an accepted event resolves the device, appends one sample
/// and reports what changed.
#[derive(Debug, Default)]
pub struct IngestPipeline {
    registry: DeviceRegistry,
}

impl IngestPipeline {
    /// Pipeline whose device buffers hold `capacity` samples each.
    pub fn new(capacity: usize) -> Self {
        Self::with_registry(DeviceRegistry::new(capacity))
    }

    pub fn with_registry(registry: DeviceRegistry) -> Self {
        Self { registry }
    }

    /// Decode and process one raw feed message.
    ///
    /// Returns `Err(TelemetryError::Decode)` for malformed payloads; nothing
    /// is mutated in that case.
    pub fn handle(&mut self, raw: &str) -> Result<Outcome> {
        let event = decode(raw)?;
        Ok(self.handle_event(event))
    }

    /// Validate and store an already-decoded event.
    pub fn handle_event(&mut self, event: TelemetryEvent) -> Outcome {
        let TelemetryEvent {
            device_id,
            timestamp,
            primary,
            secondary,
        } = event;

        let timestamp = match timestamp {
            Some(ts) if !ts.is_empty() => ts,
            _ => {
                debug!("Dropping event from '{device_id}': no timestamp");
                return Outcome::Rejected(Rejection::MissingTimestamp);
            }
        };

        if primary.is_none() && secondary.is_none() {
            debug!("Dropping event from '{device_id}': no metrics");
            return Outcome::Rejected(Rejection::MissingMetrics);
        }

        let (buffer, is_new) = self.registry.resolve_or_create(&device_id);
        buffer.append(timestamp, primary, secondary);

        let mut notifications = Vec::with_capacity(2);
        if is_new {
            let ordinal_count = self.registry.count();
            info!("Discovered device '{device_id}' ({ordinal_count} tracked)");
            notifications.push(Notification::DeviceDiscovered {
                device_id: device_id.clone(),
                ordinal_count,
            });
        }
        notifications.push(Notification::DataAppended { device_id });

        Outcome::Accepted(notifications)
    }

    pub fn registry(&self) -> &DeviceRegistry {
        &self.registry
    }

    /// Snapshot of one device's buffer.
    pub fn series(&self, device_id: &str) -> Option<Series<Timestamp>> {
        self.registry.series(device_id)
    }

    /// Known device ids in first-seen order.
    pub fn list(&self) -> Vec<String> {
        self.registry.list()
    }

    pub fn count(&self) -> usize {
        self.registry.count()
    }
}
