use crate::{chart::ChartFrame, format::device_count_label};
use tele_config::ChartConfig;
use tele_core::{DeviceRegistry, Notification, TelemetryObserver};
use tracing::debug;

/// Presentation state for the device selector, device counter and chart.
///
/// Driven purely by pipeline notifications: the first discovered device is
/// selected automatically, exactly once; afterwards only [`select`] changes
/// the selection.
///
/// [`select`]: Dashboard::select
#[derive(Debug)]
pub struct Dashboard {
    chart:             ChartConfig,
    /// Selector entries, first-seen order.
    devices:           Vec<String>,
    selected:          Option<String>,
    needs_auto_select: bool,
    count_label:       String,
}

impl Dashboard {
    pub fn new(chart: ChartConfig) -> Self {
        Self {
            chart,
            devices:           Vec::new(),
            selected:          None,
            needs_auto_select: true,
            count_label:       device_count_label(0),
        }
    }

    /// Switch the chart to another device tracked by `registry`.
    /// Returns `false` (and keeps the current selection) for unknown ids.
    pub fn select(&mut self, device_id: &str, registry: &DeviceRegistry) -> bool {
        if !registry.contains(device_id) {
            return false;
        }
        self.selected = Some(device_id.to_string());
        true
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn devices(&self) -> &[String] {
        &self.devices
    }

    /// `"N device(s)"` text for the counter.
    pub fn count_label(&self) -> &str {
        &self.count_label
    }

    /// Chart frame for the selected device, from a fresh buffer snapshot.
    pub fn frame(&self, registry: &DeviceRegistry) -> Option<ChartFrame> {
        let device_id = self.selected.as_deref()?;
        let series = registry.series(device_id)?;
        Some(ChartFrame::build(device_id, series, &self.chart))
    }
}

impl TelemetryObserver for Dashboard {
    fn on_notification(&mut self, notification: &Notification) -> bool {
        match notification {
            Notification::DeviceDiscovered {
                device_id,
                ordinal_count,
            } => {
                self.devices.push(device_id.clone());
                self.count_label = device_count_label(*ordinal_count);

                if self.needs_auto_select {
                    self.needs_auto_select = false;
                    self.selected = Some(device_id.clone());
                    debug!("Auto-selected first device '{device_id}'");
                }
                true
            }
            Notification::DataAppended { device_id } => {
                self.selected.as_deref() == Some(device_id.as_str())
            }
        }
    }
}
