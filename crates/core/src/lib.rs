pub mod buffer;
pub mod error;
pub mod event;
pub mod observer;
pub mod registry;

pub use buffer::{Sample, Series, SlidingWindowBuffer, DEFAULT_CAPACITY};
pub use error::{Result, TelemetryError};
pub use event::{Notification, TelemetryEvent};
pub use observer::TelemetryObserver;
pub use registry::{DeviceRegistry, Timestamp};
