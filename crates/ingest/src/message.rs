use serde::Deserialize;
use serde_json::Value;
use tele_core::{Result, TelemetryError, TelemetryEvent};

/// JSON shape of one message on the telemetry feed.
///
/// ```json
/// {"DeviceId": "sensor-1", "MessageDate": "2024-05-01T12:00:00Z",
///  "IotData": {"altitude": 812.5, "pressure": 14.2}}
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TelemetryMessage {
    pub device_id:    String,
    /// String or number; `null` and a missing field both decode to `None`.
    #[serde(default)]
    pub message_date: Option<Value>,
    pub iot_data:     IotData,
}

/// Sensor readings. Extra fields sent by devices are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IotData {
    #[serde(default)]
    pub altitude: Option<f64>,
    #[serde(default)]
    pub pressure: Option<f64>,
}

impl TryFrom<TelemetryMessage> for TelemetryEvent {
    type Error = TelemetryError;

    fn try_from(msg: TelemetryMessage) -> Result<Self> {
        let timestamp = match msg.message_date {
            None | Some(Value::Null) => None,
            Some(Value::String(date)) => Some(date),
            // Epoch-style dates are kept as their JSON text.
            Some(Value::Number(date)) => Some(date.to_string()),
            Some(other) => {
                return Err(TelemetryError::Decode(format!(
                    "MessageDate must be a string or number, got {other}"
                )))
            }
        };

        Ok(TelemetryEvent {
            device_id: msg.device_id,
            timestamp,
            primary:   msg.iot_data.altitude,
            secondary: msg.iot_data.pressure,
        })
    }
}

/// Decode one raw feed message into a [`TelemetryEvent`].
///
/// Anything that isn't a JSON object with a string `DeviceId`, a string or
/// numeric `MessageDate` and an `IotData` object (numeric or null readings)
/// is a decode error.
pub fn decode(raw: &str) -> Result<TelemetryEvent> {
    let msg: TelemetryMessage =
        serde_json::from_str(raw).map_err(|e| TelemetryError::Decode(e.to_string()))?;
    TelemetryEvent::try_from(msg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_full_message() {
        let event = decode(
            r#"{"DeviceId":"dev-1","MessageDate":"2024-05-01T12:00:00Z",
                "IotData":{"altitude":812.5,"pressure":14.2}}"#,
        )
        .unwrap();

        assert_eq!(event.device_id, "dev-1");
        assert_eq!(event.timestamp.as_deref(), Some("2024-05-01T12:00:00Z"));
        assert_eq!(event.primary, Some(812.5));
        assert_eq!(event.secondary, Some(14.2));
    }

    #[test]
    fn missing_and_null_fields_are_absent() {
        let event = decode(r#"{"DeviceId":"dev-1","MessageDate":null,"IotData":{"pressure":null}}"#)
            .unwrap();
        assert_eq!(event.timestamp, None);
        assert_eq!(event.primary, None);
        assert_eq!(event.secondary, None);
    }

    #[test]
    fn numeric_date_is_kept_as_text() {
        let event =
            decode(r#"{"DeviceId":"n","MessageDate":1714564800000,"IotData":{"altitude":5}}"#)
                .unwrap();
        assert_eq!(event.timestamp.as_deref(), Some("1714564800000"));
        assert_eq!(event.primary, Some(5.0));
    }

    #[test]
    fn empty_date_decodes_and_is_left_to_validation() {
        let event = decode(r#"{"DeviceId":"n","MessageDate":"","IotData":{"altitude":5}}"#).unwrap();
        assert_eq!(event.timestamp.as_deref(), Some(""));
    }

    #[test]
    fn boolean_date_is_a_decode_error() {
        let err = decode(r#"{"DeviceId":"n","MessageDate":true,"IotData":{"altitude":5}}"#)
            .unwrap_err();
        assert!(matches!(err, TelemetryError::Decode(_)));
    }

    #[test]
    fn extra_fields_are_ignored() {
        let event = decode(
            r#"{"DeviceId":"d","MessageDate":"t","Extra":1,"IotData":{"altitude":0,"humidity":40}}"#,
        )
        .unwrap();
        assert_eq!(event.primary, Some(0.0));
    }

    #[test]
    fn not_json_is_a_decode_error() {
        assert!(matches!(decode("hello"), Err(TelemetryError::Decode(_))));
    }

    #[test]
    fn missing_iot_data_is_a_decode_error() {
        let err = decode(r#"{"DeviceId":"d","MessageDate":"t"}"#).unwrap_err();
        assert!(matches!(err, TelemetryError::Decode(_)));
    }

    #[test]
    fn non_object_iot_data_is_a_decode_error() {
        assert!(decode(r#"{"DeviceId":"d","MessageDate":"t","IotData":"n/a"}"#).is_err());
    }

    #[test]
    fn non_numeric_reading_is_a_decode_error() {
        assert!(decode(r#"{"DeviceId":"d","MessageDate":"t","IotData":{"altitude":"high"}}"#).is_err());
    }

    #[test]
    fn missing_device_id_is_a_decode_error() {
        assert!(decode(r#"{"MessageDate":"t","IotData":{"altitude":1}}"#).is_err());
    }
}
