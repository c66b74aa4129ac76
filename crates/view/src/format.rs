/// Human-readable device count, e.g. `"1 device"` or `"3 devices"`.
pub fn device_count_label(count: usize) -> String {
    if count == 1 {
        format!("{count} device")
    } else {
        format!("{count} devices")
    }
}

/// Format an optional reading with its unit, `"n/a"` when not reported.
pub fn format_reading(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(v) if unit.is_empty() => format!("{v:.1}"),
        Some(v) => format!("{v:.1} {unit}"),
        None => "n/a".to_string(),
    }
}

/// Units from an axis title like `"Altitude (m)"` → `"m"`.
pub fn axis_unit(axis: &str) -> &str {
    axis.rsplit_once('(')
        .and_then(|(_, rest)| rest.strip_suffix(')'))
        .map(str::trim)
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn device_count_singular() {
        assert_eq!(device_count_label(1), "1 device");
    }

    #[test]
    fn device_count_plural() {
        assert_eq!(device_count_label(0), "0 devices");
        assert_eq!(device_count_label(4), "4 devices");
    }

    #[test]
    fn reading_with_unit() {
        assert_eq!(format_reading(Some(812.46), "m"), "812.5 m");
        assert_eq!(format_reading(Some(0.0), ""), "0.0");
        assert_eq!(format_reading(None, "psi"), "n/a");
    }

    #[test]
    fn unit_from_axis_title() {
        assert_eq!(axis_unit("Pressure (psi)"), "psi");
        assert_eq!(axis_unit("Altitude"), "");
    }
}
