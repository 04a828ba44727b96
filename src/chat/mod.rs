//! Platform-independent chat model.
//!
//! - [`Message`]: an immutable entry of the message list
//! - [`ChatState`]: the message list plus draft, activity and connectivity
//! - [`ReplyDelay`]: the randomized pause before a reply is shown
//!
//! # Example
//!
//! ```rust
//! use chat_widget::chat::{ChatState, ChatTexts};
//! use chrono::Utc;
//!
//! let mut state = ChatState::new(ChatTexts::default(), Utc::now());
//! state.set_draft("hi");
//! let outbound = state.submit(Utc::now()).unwrap();
//!
//! assert!(state.response_received(outbound.ticket));
//! assert!(state.deliver_reply(outbound.ticket, "hello!", Utc::now()));
//! assert_eq!(state.messages().len(), 3);
//! ```

mod delay;
mod message;
mod state;

pub use delay::{DEFAULT_MAX_DELAY, DEFAULT_MIN_DELAY, ReplyDelay};
pub use message::{Message, MessageId, Sender};
pub use state::{
    Activity, ChatState, ChatTexts, ComposerStatus, Connectivity, DEFAULT_ERROR, DEFAULT_WELCOME,
    Outbound, SubmitBlocked, Ticket,
};
