//! Wire types of the chat service.

use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// `status` value of a successful chat payload.
pub const STATUS_SUCCESS: &str = "success";

/// Body of `POST /api/chat`.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    /// The user's message, as typed.
    pub message: String,
    /// Correlation token of the widget instance.
    pub session_id: String,
}

/// Payload returned by `POST /api/chat`, successful or not.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatReply {
    /// `"success"` or anything else.
    pub status: String,
    /// Reply text, present on success.
    #[serde(default)]
    pub response: Option<String>,
    /// Failure description, present on failure.
    #[serde(default)]
    pub error: Option<String>,
}

impl ChatReply {
    /// Collapse the payload into the reply text or an application error.
    pub fn into_result(self) -> Result<String, ApiError> {
        match self {
            Self {
                status,
                response: Some(text),
                ..
            } if status == STATUS_SUCCESS => Ok(text),
            Self { status, error, .. } => Err(ApiError::Rejected {
                status,
                message: error.unwrap_or_else(|| "Failed to get response".to_string()),
            }),
        }
    }
}

/// Response of `GET /api/stats/{session_id}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    /// Messages stored for the session.
    pub total_messages: u64,
    /// Of which sent by the user.
    pub user_messages: u64,
    /// Of which produced by the bot.
    pub bot_messages: u64,
}
