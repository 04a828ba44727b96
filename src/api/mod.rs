//! Calls to the external chat service.
//!
//! Every call is a single attempt: no retries, no backoff. Front ends talk to
//! the service through [`ChatBackend`] so tests can substitute a scripted one.

mod client;
mod types;

use async_trait::async_trait;

pub use client::HttpClient;
pub use types::{ChatReply, ChatRequest, STATUS_SUCCESS, SessionStats};

use crate::error::Result;
use crate::session::SessionId;

/// Operations offered by the chat service.
///
/// Browser futures are not `Send`, so on `wasm32` the trait is declared
/// without that bound.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait ChatBackend: Send + Sync {
    /// `POST /api/chat`: obtain the bot's reply to `message`.
    ///
    /// Application-level failures (`status != "success"`) are returned as
    /// [`ApiError::Rejected`](crate::error::ApiError::Rejected).
    async fn send_message(&self, session: &SessionId, message: &str) -> Result<String>;

    /// `DELETE /api/clear/{session_id}`
    async fn clear_session(&self, session: &SessionId) -> Result<()>;

    /// `GET /api/export/{session_id}`: the conversation as arbitrary JSON.
    async fn export_session(&self, session: &SessionId) -> Result<serde_json::Value>;

    /// `GET /api/stats/{session_id}`
    async fn session_stats(&self, session: &SessionId) -> Result<SessionStats>;

    /// `GET /api/health`
    async fn health(&self) -> Result<()>;
}
