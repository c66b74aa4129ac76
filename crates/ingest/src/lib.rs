pub mod client;
pub mod message;
pub mod pipeline;

pub use client::{spawn_reader, TelemetryListener};
pub use message::{decode, IotData, TelemetryMessage};
pub use pipeline::{IngestPipeline, Outcome, Rejection};
