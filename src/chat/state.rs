//! Conversation state shared by every front end.
//!
//! The widget's behaviour lives here as plain data plus transitions; the
//! browser and terminal front ends only feed events in and render what comes
//! out. Each exchange with the chat service is identified by a [`Ticket`], and
//! every transition that completes an exchange checks the ticket first, so a
//! reply that outlived a clear (or the widget itself) is dropped instead of
//! being appended to a list it no longer belongs to.

use chrono::{DateTime, Utc};
use thiserror::Error;

use super::message::{Message, MessageId, Sender};

/// Greeting placed in every fresh message list.
pub const DEFAULT_WELCOME: &str = "Hello! I'm your AI assistant. How can I help you today?";

/// Text of the error-marked message shown when a reply could not be obtained.
pub const DEFAULT_ERROR: &str = "Sorry, I'm having trouble connecting. Please try again.";

/// Identifies one send/reply exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(u64);

/// What the widget is doing with the chat service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Activity {
    /// No exchange in progress.
    #[default]
    Idle,
    /// Request issued, no response yet.
    Sending(Ticket),
    /// Response received, waiting out the composing pause before showing it.
    AwaitingReply(Ticket),
}

impl Activity {
    fn ticket(self) -> Option<Ticket> {
        match self {
            Self::Idle => None,
            Self::Sending(ticket) | Self::AwaitingReply(ticket) => Some(ticket),
        }
    }
}

/// Whether the environment reports network connectivity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Connectivity {
    #[default]
    Online,
    Offline,
}

impl Connectivity {
    pub fn from_online(online: bool) -> Self {
        if online { Self::Online } else { Self::Offline }
    }

    pub fn is_online(self) -> bool {
        self == Self::Online
    }
}

/// What the composer should present, derived from activity and connectivity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposerStatus {
    /// Accepting input.
    Ready,
    /// Request in flight: submission disabled, spinner shown.
    Sending,
    /// Reply pending display: submission disabled, typing indicator shown.
    AwaitingReply,
    /// No connectivity: composer disabled, offline banner shown.
    Offline,
}

/// Why a submit did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmitBlocked {
    #[error("nothing to send")]
    EmptyInput,
    #[error("still waiting for the previous reply")]
    Busy,
    #[error("you are offline")]
    Offline,
}

/// A message accepted for sending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outbound {
    pub ticket: Ticket,
    pub text: String,
}

/// Texts the state machine inserts on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatTexts {
    pub welcome: String,
    pub error: String,
}

impl Default for ChatTexts {
    fn default() -> Self {
        Self {
            welcome: DEFAULT_WELCOME.to_string(),
            error: DEFAULT_ERROR.to_string(),
        }
    }
}

/// Message list, draft input and exchange progress of one widget.
#[derive(Debug, Clone)]
pub struct ChatState {
    messages: Vec<Message>,
    draft: String,
    activity: Activity,
    connectivity: Connectivity,
    next_ticket: u64,
    texts: ChatTexts,
}

impl ChatState {
    /// A conversation holding only the welcome message.
    pub fn new(texts: ChatTexts, now: DateTime<Utc>) -> Self {
        Self {
            messages: vec![Message::bot(texts.welcome.clone(), now)],
            draft: String::new(),
            activity: Activity::Idle,
            connectivity: Connectivity::Online,
            next_ticket: 0,
            texts,
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn activity(&self) -> Activity {
        self.activity
    }

    pub fn connectivity(&self) -> Connectivity {
        self.connectivity
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    pub fn set_connectivity(&mut self, connectivity: Connectivity) {
        self.connectivity = connectivity;
    }

    /// Request in flight; the send button shows a spinner.
    pub fn is_loading(&self) -> bool {
        matches!(self.activity, Activity::Sending(_))
    }

    /// Any exchange in progress; the typing indicator is visible.
    pub fn is_typing(&self) -> bool {
        self.activity != Activity::Idle
    }

    pub fn composer_status(&self) -> ComposerStatus {
        match (self.connectivity, self.activity) {
            (Connectivity::Offline, _) => ComposerStatus::Offline,
            (Connectivity::Online, Activity::Idle) => ComposerStatus::Ready,
            (Connectivity::Online, Activity::Sending(_)) => ComposerStatus::Sending,
            (Connectivity::Online, Activity::AwaitingReply(_)) => ComposerStatus::AwaitingReply,
        }
    }

    /// Whether the send control should be enabled for the current draft.
    pub fn can_submit(&self) -> bool {
        self.check_submit().is_ok()
    }

    fn check_submit(&self) -> Result<(), SubmitBlocked> {
        if !self.connectivity.is_online() {
            return Err(SubmitBlocked::Offline);
        }
        if self.activity != Activity::Idle {
            return Err(SubmitBlocked::Busy);
        }
        if self.draft.trim().is_empty() {
            return Err(SubmitBlocked::EmptyInput);
        }
        Ok(())
    }

    /// Accept the draft for sending.
    ///
    /// On success the draft becomes a user message, the input is cleared and
    /// the exchange enters [`Activity::Sending`]. When blocked, nothing changes.
    pub fn submit(&mut self, now: DateTime<Utc>) -> Result<Outbound, SubmitBlocked> {
        self.check_submit()?;

        let text = std::mem::take(&mut self.draft);
        self.messages.push(Message::user(text.clone(), now));

        let ticket = Ticket(self.next_ticket);
        self.next_ticket += 1;
        self.activity = Activity::Sending(ticket);

        Ok(Outbound { ticket, text })
    }

    /// The service answered successfully; start the composing pause.
    ///
    /// Returns `false` when the ticket is stale.
    pub fn response_received(&mut self, ticket: Ticket) -> bool {
        if self.activity != Activity::Sending(ticket) {
            return false;
        }
        self.activity = Activity::AwaitingReply(ticket);
        true
    }

    /// Show the reply and finish the exchange.
    ///
    /// Returns `false` (and changes nothing) when the ticket is stale.
    pub fn deliver_reply(
        &mut self,
        ticket: Ticket,
        text: impl Into<String>,
        now: DateTime<Utc>,
    ) -> bool {
        if self.activity.ticket() != Some(ticket) {
            return false;
        }
        self.messages.push(Message::bot(text, now));
        self.activity = Activity::Idle;
        true
    }

    /// The reply could not be obtained; show the error message and finish.
    ///
    /// Returns `false` (and changes nothing) when the ticket is stale.
    pub fn fail_reply(&mut self, ticket: Ticket, now: DateTime<Utc>) -> bool {
        if self.activity.ticket() != Some(ticket) {
            return false;
        }
        self.messages.push(Message::error(self.texts.error.clone(), now));
        self.activity = Activity::Idle;
        true
    }

    /// Replace the list with a fresh welcome message.
    ///
    /// Any exchange in progress is abandoned: its ticket no longer matches and
    /// a late reply is dropped. The draft is left alone.
    pub fn clear(&mut self, now: DateTime<Utc>) {
        self.messages = vec![Message::bot(self.texts.welcome.clone(), now)];
        self.activity = Activity::Idle;
    }

    /// Identifies the current contents of the message list.
    ///
    /// The list only grows or is replaced wholesale, so its length and last
    /// id change whenever it does; draft edits leave this untouched.
    pub fn revision(&self) -> (usize, Option<MessageId>) {
        (self.messages.len(), self.messages.last().map(Message::id))
    }

    /// Number of messages sent by `sender` since the last clear.
    pub fn count_by(&self, sender: Sender) -> usize {
        self.messages.iter().filter(|m| m.sender() == sender).count()
    }
}
