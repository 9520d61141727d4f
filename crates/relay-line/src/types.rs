//! LINE Messaging API types

use serde::{Deserialize, Serialize};

/// LINE message payload, keyed by its `type` field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LineMessage {
    Text {
        #[serde(default)]
        id: String,
        text: String,
    },
    Sticker {
        #[serde(default)]
        id: String,
        #[serde(rename = "packageId", default)]
        package_id: String,
        #[serde(rename = "stickerId", default)]
        sticker_id: String,
    },
    Image {
        #[serde(default)]
        id: String,
    },
    /// Video, audio, file, location and anything added later
    #[serde(other)]
    Other,
}

/// LINE source (user, group, or room)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineSource {
    #[serde(rename = "type")]
    pub source_type: String,
    #[serde(rename = "userId", default)]
    pub user_id: Option<String>,
    #[serde(rename = "groupId", default)]
    pub group_id: Option<String>,
    #[serde(rename = "roomId", default)]
    pub room_id: Option<String>,
}

/// LINE webhook event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(rename = "replyToken", default)]
    pub reply_token: Option<String>,
    #[serde(default)]
    pub timestamp: i64,
    #[serde(default)]
    pub source: Option<LineSource>,
    #[serde(default)]
    pub message: Option<LineMessage>,
    #[serde(rename = "webhookEventId", default)]
    pub webhook_event_id: Option<String>,
}

/// What the handler needs to know about an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind<'a> {
    Text {
        text: &'a str,
        reply_token: Option<&'a str>,
    },
    Sticker,
    Image,
    Other,
}

impl LineEvent {
    /// Classify the event. Anything that is not a `message` event is `Other`.
    pub fn kind(&self) -> EventKind<'_> {
        if self.event_type != "message" {
            return EventKind::Other;
        }

        match &self.message {
            Some(LineMessage::Text { text, .. }) => EventKind::Text {
                text: text.as_str(),
                reply_token: self.reply_token.as_deref(),
            },
            Some(LineMessage::Sticker { .. }) => EventKind::Sticker,
            Some(LineMessage::Image { .. }) => EventKind::Image,
            Some(LineMessage::Other) | None => EventKind::Other,
        }
    }
}

/// Webhook request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookBody {
    #[serde(default)]
    pub destination: String,
    #[serde(default)]
    pub events: Vec<LineEvent>,
}

/// Reply message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplyMessage {
    #[serde(rename = "replyToken")]
    pub reply_token: String,
    pub messages: Vec<MessageContent>,
}

/// Message content
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
#[serde(rename_all = "lowercase")]
pub enum MessageContent {
    Text { text: String },
}

/// Error body returned by the Messaging API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineApiResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub details: Option<Vec<ErrorDetail>>,
}

/// Error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub message: String,
    pub property: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_text_event() {
        let body = r#"{
            "destination": "U0000",
            "events": [{
                "type": "message",
                "replyToken": "R1",
                "timestamp": 1700000000000,
                "webhookEventId": "01H000",
                "source": {"type": "user", "userId": "U1234"},
                "message": {"type": "text", "id": "m1", "text": "Hello"}
            }]
        }"#;

        let webhook: WebhookBody = serde_json::from_str(body).unwrap();
        assert_eq!(webhook.destination, "U0000");
        assert_eq!(webhook.events.len(), 1);

        let event = &webhook.events[0];
        assert_eq!(event.source.as_ref().unwrap().user_id.as_deref(), Some("U1234"));
        assert_eq!(
            event.kind(),
            EventKind::Text {
                text: "Hello",
                reply_token: Some("R1")
            }
        );
    }

    #[test]
    fn test_parse_sticker_and_image_events() {
        let sticker: LineEvent = serde_json::from_str(
            r#"{"type": "message", "replyToken": "R2",
                "message": {"type": "sticker", "id": "m2",
                            "packageId": "446", "stickerId": "1988"}}"#,
        )
        .unwrap();
        assert_eq!(sticker.kind(), EventKind::Sticker);
        assert_eq!(
            sticker.message,
            Some(LineMessage::Sticker {
                id: "m2".to_string(),
                package_id: "446".to_string(),
                sticker_id: "1988".to_string(),
            })
        );

        let image: LineEvent = serde_json::from_str(
            r#"{"type": "message", "replyToken": "R3", "message": {"type": "image", "id": "m3"}}"#,
        )
        .unwrap();
        assert_eq!(image.kind(), EventKind::Image);
    }

    #[test]
    fn test_unknown_message_type_is_other() {
        let event: LineEvent = serde_json::from_str(
            r#"{"type": "message", "replyToken": "R4",
                "message": {"type": "location", "id": "m4",
                            "latitude": 35.0, "longitude": 139.0}}"#,
        )
        .unwrap();
        assert_eq!(event.message, Some(LineMessage::Other));
        assert_eq!(event.kind(), EventKind::Other);
    }

    #[test]
    fn test_non_message_event_is_other() {
        let event: LineEvent = serde_json::from_str(
            r#"{"type": "follow", "replyToken": "R5", "source": {"type": "user", "userId": "U1"}}"#,
        )
        .unwrap();
        assert!(event.message.is_none());
        assert_eq!(event.kind(), EventKind::Other);
    }

    #[test]
    fn test_empty_verification_body() {
        let webhook: WebhookBody =
            serde_json::from_str(r#"{"destination": "U0000", "events": []}"#).unwrap();
        assert!(webhook.events.is_empty());
    }

    #[test]
    fn test_reply_message_serialization() {
        let reply = ReplyMessage {
            reply_token: "R1".to_string(),
            messages: vec![MessageContent::Text {
                text: "Hi".to_string(),
            }],
        };
        let json = serde_json::to_value(&reply).unwrap();
        assert_eq!(json["replyToken"], "R1");
        assert_eq!(json["messages"][0]["type"], "text");
        assert_eq!(json["messages"][0]["text"], "Hi");
    }
}
