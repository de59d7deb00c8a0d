use crate::{ArtItem, CurrentArtwork, ServiceError, ServiceResult};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

const PROVIDER: &str = "samsung";

pub(crate) const ART_CHANNEL: &str = "com.samsung.art-app";

// REST device descriptor served on port 8001 at `/api/v2/`.

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeviceInfo {
    #[serde(default)]
    pub device: Option<DeviceDetails>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeviceDetails {
    #[serde(rename = "FrameTVSupport", default)]
    pub frame_tv_support: Option<String>,
    #[serde(rename = "modelName", default)]
    pub model_name: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl DeviceInfo {
    pub fn supports_art_mode(&self) -> bool {
        self.device
            .as_ref()
            .and_then(|device| device.frame_tv_support.as_deref())
            == Some("true")
    }
}

/// A message received on the websocket channel.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ChannelMessage {
    Connect { token: Option<String> },
    Ready,
    Unauthorized,
    /// The decoded payload of a `d2d_service_message`.
    Art(Value),
    Other,
}

#[derive(Deserialize)]
struct ChannelEvent {
    event: String,
    #[serde(default)]
    data: Value,
}

pub(crate) fn parse_channel_message(text: &str) -> ServiceResult<ChannelMessage> {
    let Ok(envelope) = serde_json::from_str::<ChannelEvent>(text) else {
        return Ok(ChannelMessage::Other);
    };

    let message = match envelope.event.as_str() {
        "ms.channel.connect" => ChannelMessage::Connect {
            token: envelope
                .data
                .get("token")
                .and_then(Value::as_str)
                .map(ToString::to_string),
        },
        "ms.channel.ready" => ChannelMessage::Ready,
        "ms.channel.unauthorized" => ChannelMessage::Unauthorized,
        "d2d_service_message" => ChannelMessage::Art(decode_embedded(envelope.data)?),
        _ => ChannelMessage::Other,
    };

    Ok(message)
}

/// Art payloads carry JSON encoded as a string inside the JSON envelope.
fn decode_embedded(data: Value) -> ServiceResult<Value> {
    match data {
        Value::String(text) => serde_json::from_str(&text).map_err(|e| {
            ServiceError::Invariant(PROVIDER, format!("Failed to parse art response: {e}"))
        }),
        other => Ok(other),
    }
}

/// Wrap an art request in the channel's emit envelope.
pub(crate) fn emit_envelope(request: &Value) -> Value {
    json!({
        "method": "ms.channel.emit",
        "params": {
            "event": "art_app_request",
            "to": "host",
            "data": request.to_string(),
        }
    })
}

pub(crate) fn response_event(response: &Value) -> Option<&str> {
    response.get("event").and_then(Value::as_str)
}

/// Fail on an `error` event, which the TV sends instead of the awaited
/// response.
pub(crate) fn check_error(response: &Value) -> ServiceResult<()> {
    if response_event(response) != Some("error") {
        return Ok(());
    }
    let code = response
        .get("error_code")
        .map_or_else(|| "unknown".to_string(), ToString::to_string);
    let request = response
        .get("request_data")
        .map(ToString::to_string)
        .unwrap_or_default();
    Err(ServiceError::Device(format!(
        "art request failed with error_code {code} {request}"
    )))
}

/// Whether `response` answers the request with `id`. When an event name is
/// awaited, only that event matches. Otherwise the ids must be equal; the TV
/// broadcasts status events without one.
pub(crate) fn is_response_to(response: &Value, id: Option<&str>, event: Option<&str>) -> bool {
    if let Some(event) = event {
        return response_event(response) == Some(event);
    }
    match id {
        Some(expected) => response.get("id").and_then(Value::as_str) == Some(expected),
        None => true,
    }
}

pub(crate) fn parse_content_list(response: &Value) -> ServiceResult<Vec<ArtItem>> {
    let list = response.get("content_list").ok_or_else(|| {
        ServiceError::Invariant(PROVIDER, "Response has no content_list".to_string())
    })?;
    let list = decode_embedded(list.clone())?;
    serde_json::from_value(list).map_err(|e| {
        ServiceError::Invariant(PROVIDER, format!("Failed to parse content_list: {e}"))
    })
}

pub(crate) fn parse_current_artwork(mut response: Value) -> ServiceResult<CurrentArtwork> {
    if let Some(fields) = response.as_object_mut() {
        for key in ["event", "id", "request_id", "target_client_id"] {
            fields.remove(key);
        }
    }
    serde_json::from_value(response).map_err(|e| {
        ServiceError::Invariant(PROVIDER, format!("Failed to parse current artwork: {e}"))
    })
}

/// Socket details the TV hands out in `ready_to_use` for an image upload.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ConnInfo {
    pub ip: String,
    pub port: Value,
    pub key: String,
    #[serde(default)]
    pub secured: bool,
}

impl ConnInfo {
    /// The TV reports the port as either a number or a string.
    pub fn port(&self) -> ServiceResult<u16> {
        let port = match &self.port {
            Value::Number(number) => number.as_u64().and_then(|p| u16::try_from(p).ok()),
            Value::String(text) => text.parse().ok(),
            _ => None,
        };
        port.ok_or_else(|| {
            ServiceError::Invariant(PROVIDER, format!("Invalid upload port {}", self.port))
        })
    }
}

pub(crate) fn parse_conn_info(response: &Value) -> ServiceResult<ConnInfo> {
    let conn_info = response.get("conn_info").ok_or_else(|| {
        ServiceError::Invariant(PROVIDER, "ready_to_use has no conn_info".to_string())
    })?;
    let conn_info = decode_embedded(conn_info.clone())?;
    serde_json::from_value(conn_info).map_err(|e| {
        ServiceError::Invariant(PROVIDER, format!("Failed to parse conn_info: {e}"))
    })
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UploadHeader<'a> {
    pub num: u32,
    pub total: u32,
    pub file_length: usize,
    pub file_name: &'a str,
    pub file_type: &'a str,
    pub sec_key: &'a str,
    pub version: &'a str,
}

impl<'a> UploadHeader<'a> {
    pub fn new(file_length: usize, file_type: &'a str, sec_key: &'a str) -> Self {
        Self {
            num: 0,
            total: 1,
            file_length,
            file_name: "dummy",
            file_type,
            sec_key,
            version: "0.0.1",
        }
    }
}

pub(crate) fn content_id(response: &Value) -> ServiceResult<String> {
    response
        .get("content_id")
        .and_then(Value::as_str)
        .map(ToString::to_string)
        .ok_or_else(|| ServiceError::Invariant(PROVIDER, "Response has no content_id".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_string_encoded_art_payload() {
        let text = json!({
            "event": "d2d_service_message",
            "data": json!({"event": "current_artwork", "content_id": "MY-F0003"}).to_string(),
        })
        .to_string();

        let message = parse_channel_message(&text).unwrap();
        let ChannelMessage::Art(response) = message else {
            panic!("expected art message, got {message:?}");
        };
        assert_eq!(response_event(&response), Some("current_artwork"));
        assert_eq!(content_id(&response).unwrap(), "MY-F0003");
    }

    #[test]
    fn error_event_is_device_error() {
        let response = json!({"event": "error", "error_code": -1});
        assert!(matches!(
            check_error(&response),
            Err(ServiceError::Device(message)) if message.contains("-1")
        ));
    }

    #[test]
    fn awaited_event_overrides_id_matching() {
        let response = json!({"event": "image_deleted", "id": "other"});
        assert!(is_response_to(&response, Some("mine"), Some("image_deleted")));
        assert!(!is_response_to(&response, Some("mine"), None));
        assert!(!is_response_to(&json!({"event": "artmode_status"}), Some("mine"), None));
        assert!(!is_response_to(
            &json!({"event": "artmode_status", "id": null}),
            Some("mine"),
            None
        ));
        assert!(is_response_to(&json!({"event": "x", "id": "mine"}), Some("mine"), None));
        assert!(is_response_to(&json!({"event": "x"}), None, None));
    }

    #[test]
    fn conn_info_port_accepts_string_and_number() {
        let response = json!({
            "event": "ready_to_use",
            "conn_info": json!({"ip": "10.0.0.2", "port": "38000", "key": "k", "secured": true}).to_string(),
        });
        let info = parse_conn_info(&response).unwrap();
        assert_eq!(info.port().unwrap(), 38000);
        assert!(info.secured);

        let info: ConnInfo =
            serde_json::from_value(json!({"ip": "10.0.0.2", "port": 38001, "key": "k"})).unwrap();
        assert_eq!(info.port().unwrap(), 38001);
    }

    #[test]
    fn frame_support_flag() {
        let info: DeviceInfo =
            serde_json::from_value(json!({"device": {"FrameTVSupport": "true"}})).unwrap();
        assert!(info.supports_art_mode());
        let info: DeviceInfo =
            serde_json::from_value(json!({"device": {"FrameTVSupport": "false"}})).unwrap();
        assert!(!info.supports_art_mode());
        assert!(!DeviceInfo::default().supports_art_mode());
    }
}
