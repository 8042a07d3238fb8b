//! Cross-frame messages between the pad and an embedding page.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A request posted to the pad's window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncomingMessage {
    /// `{getImage: true}`: reply with the composited PNG.
    GetImage,
    /// `{recenter: true}`: reset pan and zoom.
    Recenter,
}

impl IncomingMessage {
    /// Interpret message data. `getImage` wins when both flags are set.
    #[must_use]
    pub fn from_value(data: &Value) -> Option<Self> {
        if truthy(data.get("getImage")) {
            Some(Self::GetImage)
        } else if truthy(data.get("recenter")) {
            Some(Self::Recenter)
        } else {
            None
        }
    }

    /// Interpret message data serialized as JSON.
    #[must_use]
    pub fn from_json(json: &str) -> Option<Self> {
        serde_json::from_str::<Value>(json)
            .ok()
            .and_then(|value| Self::from_value(&value))
    }
}

fn truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_) | Value::Object(_)) => true,
    }
}

/// A reply posted back to the requesting window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum OutgoingMessage {
    /// The composited canvas as a PNG data URL.
    #[serde(rename = "getImage")]
    Image {
        /// `data:image/png;base64,...`
        image: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn get_image_request() {
        assert_eq!(
            IncomingMessage::from_value(&json!({"getImage": true})),
            Some(IncomingMessage::GetImage)
        );
    }

    #[test]
    fn recenter_request() {
        assert_eq!(
            IncomingMessage::from_value(&json!({"recenter": true})),
            Some(IncomingMessage::Recenter)
        );
    }

    #[test]
    fn get_image_takes_precedence() {
        assert_eq!(
            IncomingMessage::from_json(r#"{"recenter": true, "getImage": 1}"#),
            Some(IncomingMessage::GetImage)
        );
    }

    #[test]
    fn falsy_and_foreign_messages_ignored() {
        assert_eq!(IncomingMessage::from_value(&json!({"getImage": false})), None);
        assert_eq!(IncomingMessage::from_value(&json!({"recenter": 0})), None);
        assert_eq!(IncomingMessage::from_value(&json!({"recenter": ""})), None);
        assert_eq!(IncomingMessage::from_value(&json!("hello")), None);
        assert_eq!(IncomingMessage::from_json("not json"), None);
    }

    #[test]
    fn image_reply_shape() {
        let reply = OutgoingMessage::Image {
            image: "data:image/png;base64,AAAA".to_string(),
        };
        let value = serde_json::to_value(&reply).expect("serialize");
        assert_eq!(
            value,
            json!({"type": "getImage", "image": "data:image/png;base64,AAAA"})
        );
    }
}
