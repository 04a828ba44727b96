//! Chat messages.

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique message identifier, used as the render key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(Uuid);

impl MessageId {
    fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Who wrote a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// The person typing into the widget.
    User,
    /// The chat service.
    Bot,
}

impl Sender {
    /// Short label used by text renderings.
    pub fn label(self) -> &'static str {
        match self {
            Self::User => "you",
            Self::Bot => "bot",
        }
    }
}

/// A single entry of the message list.
///
/// Messages are immutable once created; the list only ever grows, except for
/// the wholesale reset done by clearing the chat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    id: MessageId,
    text: String,
    sender: Sender,
    timestamp: DateTime<Utc>,
    #[serde(default)]
    is_error: bool,
}

impl Message {
    /// A message typed by the user.
    pub fn user(text: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self::new(text.into(), Sender::User, timestamp, false)
    }

    /// A reply from the chat service.
    pub fn bot(text: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self::new(text.into(), Sender::Bot, timestamp, false)
    }

    /// A bot-side message reporting that the reply could not be obtained.
    pub fn error(text: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self::new(text.into(), Sender::Bot, timestamp, true)
    }

    fn new(text: String, sender: Sender, timestamp: DateTime<Utc>, is_error: bool) -> Self {
        Self {
            id: MessageId::generate(),
            text,
            sender,
            timestamp,
            is_error,
        }
    }

    pub fn id(&self) -> MessageId {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn sender(&self) -> Sender {
        self.sender
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn is_error(&self) -> bool {
        self.is_error
    }

    /// Hour and minute in local time, e.g. `09:41`.
    pub fn display_time(&self) -> String {
        self.timestamp.with_timezone(&Local).format("%H:%M").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_constructors_set_sender_and_error_flag() {
        let now = Utc::now();

        let user = Message::user("hi", now);
        assert_eq!(user.sender(), Sender::User);
        assert!(!user.is_error());

        let bot = Message::bot("hello", now);
        assert_eq!(bot.sender(), Sender::Bot);
        assert!(!bot.is_error());

        let failed = Message::error("oops", now);
        assert_eq!(failed.sender(), Sender::Bot);
        assert!(failed.is_error());

        assert_ne!(user.id(), bot.id());
    }

    #[test]
    fn test_display_time_is_hour_and_minute() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 1, 12, 34, 56).unwrap();
        let message = Message::user("hi", ts);

        let shown = message.display_time();
        assert_eq!(shown.len(), 5);
        assert_eq!(&shown[2..3], ":");
        assert!(shown.chars().filter(char::is_ascii_digit).count() == 4);
    }
}
