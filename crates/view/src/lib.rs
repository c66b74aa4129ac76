//! Headless presentation layer: device selector state, device counter and
//! chart frames built from buffer snapshots.
//!
//! Nothing here touches telemetry state; everything is driven by
//! [`tele_core::Notification`]s and read-only registry access.

pub mod chart;
pub mod dashboard;
pub mod format;

pub use chart::{ChartFrame, Dataset};
pub use dashboard::Dashboard;
pub use format::device_count_label;
