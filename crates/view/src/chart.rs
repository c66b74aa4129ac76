use crate::format::{axis_unit, format_reading};
use std::fmt;
use tele_config::ChartConfig;
use tele_core::{Series, Timestamp};

/// One plotted line of the chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    /// Legend label, e.g. `"Altitude"`.
    pub label:         String,
    /// Axis title including units, e.g. `"Altitude (m)"`.
    pub axis:          String,
    /// Suggested axis range; the axis always starts at zero.
    pub suggested_min: f64,
    pub suggested_max: f64,
    /// One point per label. `None` leaves a gap that the line spans.
    pub points:        Vec<Option<f64>>,
}

impl Dataset {
    fn latest(&self) -> Option<f64> {
        self.points.last().copied().flatten()
    }
}

/// Everything a renderer needs to draw one device's two-axis line chart.
///
/// Built from a [`Series`] snapshot, so it never changes underneath the
/// renderer while new telemetry arrives.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartFrame {
    pub device_id: String,
    /// X-axis labels (device timestamps, arrival order).
    pub labels:    Vec<Timestamp>,
    pub primary:   Dataset,
    pub secondary: Dataset,
}

impl ChartFrame {
    pub fn build(device_id: &str, series: Series<Timestamp>, config: &ChartConfig) -> Self {
        let Series {
            timestamps,
            primary,
            secondary,
        } = series;

        Self {
            device_id: device_id.to_string(),
            labels:    timestamps,
            primary: Dataset {
                label:         config.primary_label.clone(),
                axis:          config.primary_axis.clone(),
                suggested_min: 0.0,
                suggested_max: config.primary_max,
                points:        primary,
            },
            secondary: Dataset {
                label:         config.secondary_label.clone(),
                axis:          config.secondary_axis.clone(),
                suggested_min: 0.0,
                suggested_max: config.secondary_max,
                points:        secondary,
            },
        }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl fmt::Display for ChartFrame {
    /// One-line summary of the newest sample, e.g.
    /// `dev-1 [3 samples @ t3] Altitude 40.0 m | Pressure n/a`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(last) = self.labels.last() else {
            return write!(f, "{} [no samples]", self.device_id);
        };

        let plural = if self.len() == 1 { "" } else { "s" };
        write!(
            f,
            "{} [{} sample{plural} @ {last}] {} {} | {} {}",
            self.device_id,
            self.len(),
            self.primary.label,
            format_reading(self.primary.latest(), axis_unit(&self.primary.axis)),
            self.secondary.label,
            format_reading(self.secondary.latest(), axis_unit(&self.secondary.axis)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series() -> Series<Timestamp> {
        Series {
            timestamps: vec!["t1".into(), "t2".into()],
            primary:    vec![Some(10.0), Some(20.0)],
            secondary:  vec![Some(14.7), None],
        }
    }

    #[test]
    fn build_uses_config_labels() {
        let frame = ChartFrame::build("dev-1", series(), &ChartConfig::default());

        assert_eq!(frame.labels, vec!["t1", "t2"]);
        assert_eq!(frame.primary.label, "Altitude");
        assert_eq!(frame.primary.suggested_max, 15_000.0);
        assert_eq!(frame.secondary.axis, "Pressure (psi)");
        assert_eq!(frame.secondary.points, vec![Some(14.7), None]);
    }

    #[test]
    fn display_summarises_latest_sample() {
        let frame = ChartFrame::build("dev-1", series(), &ChartConfig::default());
        assert_eq!(
            frame.to_string(),
            "dev-1 [2 samples @ t2] Altitude 20.0 m | Pressure n/a"
        );
    }

    #[test]
    fn display_empty_frame() {
        let frame = ChartFrame::build("dev-1", Series::default(), &ChartConfig::default());
        assert!(frame.is_empty());
        assert_eq!(frame.to_string(), "dev-1 [no samples]");
    }
}
