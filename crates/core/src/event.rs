/// A decoded telemetry event, before validation.
///
/// Every field except the device id may be missing on the wire; the ingest
/// pipeline decides whether the event is usable.
#[derive(Debug, Clone, PartialEq)]
pub struct TelemetryEvent {
    pub device_id: String,
    /// Opaque timestamp as sent by the device. Never parsed.
    pub timestamp: Option<String>,
    /// Primary metric (altitude).
    pub primary:   Option<f64>,
    /// Secondary metric (pressure).
    pub secondary: Option<f64>,
}

/// Notifications emitted by the ingest pipeline for presentation consumers.
///
/// For the first accepted event of a device, `DeviceDiscovered` is always
/// emitted before `DataAppended`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// A device was seen for the first time.
    DeviceDiscovered {
        device_id:     String,
        /// Registry size right after this device was inserted.
        ordinal_count: usize,
    },
    /// A sample was appended to the device's buffer.
    DataAppended { device_id: String },
}
