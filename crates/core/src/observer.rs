use crate::event::Notification;

/// Anything that reacts to pipeline notifications (device lists, charts,
/// counters).
///
/// Observers are purely reactive: they never mutate telemetry state and read
/// buffers only through snapshots taken after a notification.
pub trait TelemetryObserver: std::fmt::Debug {
    /// Called once per notification, in emission order.
    /// Returns `true` when the observer's rendered output is now stale.
    fn on_notification(&mut self, notification: &Notification) -> bool;
}
