//! Reactive state of one mounted widget and the actions its views trigger.

use std::sync::Arc;

use chrono::Utc;
use futures::future::{Aborted, abortable};
use leptos::prelude::*;
use leptos::task::spawn_local;
use tracing::{debug, error, info, warn};

use super::browser::{self, PendingWork};
use crate::api::{ChatBackend, HttpClient, SessionStats};
use crate::chat::{ChatState, Connectivity, ReplyDelay, Ticket};
use crate::config::WidgetConfig;
use crate::export::ExportFile;
use crate::preferences::{FontSize, Preferences};
use crate::session::SessionId;

/// Everything the widget's views share, provided as context by
/// [`ChatWidget`](super::ChatWidget).
#[derive(Debug, Clone)]
pub struct WidgetContext {
    pub config: Arc<WidgetConfig>,
    pub chat: RwSignal<ChatState>,
    pub prefs: RwSignal<Preferences>,
    pub show_settings: RwSignal<bool>,
    /// The statistics modal is open exactly while this holds a snapshot.
    pub stats: RwSignal<Option<SessionStats>>,
    client: HttpClient,
    session: SessionId,
    delay: ReplyDelay,
    pending: PendingWork,
}

impl WidgetContext {
    pub fn new(config: WidgetConfig, client: HttpClient) -> Self {
        let chat = ChatState::new(config.chat_texts(), Utc::now());
        let delay = config.reply_delay();
        Self {
            config: Arc::new(config),
            chat: RwSignal::new(chat),
            prefs: RwSignal::new(Preferences::default()),
            show_settings: RwSignal::new(false),
            stats: RwSignal::new(None),
            client,
            session: SessionId::generate(),
            delay,
            pending: PendingWork::default(),
        }
    }

    pub fn session(&self) -> &SessionId {
        &self.session
    }

    pub fn set_draft(&self, text: String) {
        self.chat.update(|chat| chat.set_draft(text));
    }

    pub fn set_connectivity(&self, connectivity: Connectivity) {
        info!(name: "chat.connectivity.changed", online = connectivity.is_online());
        self.chat.try_update(|chat| chat.set_connectivity(connectivity));
    }

    /// Send the draft, if the composer accepts it.
    pub fn submit(&self) {
        let outbound = match self.chat.try_update(|chat| chat.submit(Utc::now())) {
            Some(Ok(outbound)) => outbound,
            Some(Err(blocked)) => {
                debug!(name: "chat.submit.blocked", reason = %blocked);
                return;
            }
            None => return,
        };
        debug!(name: "chat.submit.accepted", session = %self.session);

        let ticket = outbound.ticket;
        let text = outbound.text;
        let client = self.client.clone();
        let session = self.session.clone();
        let (request, handle) =
            abortable(async move { client.send_message(&session, &text).await });
        self.pending.set_request(handle);

        let ctx = self.clone();
        spawn_local(async move {
            let result = match request.await {
                Ok(result) => result,
                Err(Aborted) => {
                    debug!(name: "chat.reply.aborted", "Request aborted");
                    return;
                }
            };
            ctx.pending.finish_request();

            match result {
                Ok(reply) => ctx.schedule_reply(ticket, reply),
                Err(err) => {
                    error!(
                        name: "chat.reply.failed",
                        error = %err,
                        transport = err.is_transport(),
                        "Failed to get reply"
                    );
                    ctx.chat.try_update(|chat| chat.fail_reply(ticket, Utc::now()));
                }
            }
        });
    }

    /// Hold `reply` back for the composing pause, then show it.
    fn schedule_reply(&self, ticket: Ticket, reply: String) {
        let accepted = self
            .chat
            .try_update(|chat| chat.response_received(ticket))
            .unwrap_or(false);
        if !accepted {
            debug!(name: "chat.reply.stale", "Dropping reply for a cleared conversation");
            return;
        }

        let pause = self.delay.sample(&mut rand::thread_rng());
        let chat = self.chat;
        let pending = self.pending.clone();
        let shown = reply.clone();
        let timer = set_timeout_with_handle(
            move || {
                pending.finish_timer();
                chat.try_update(|chat| chat.deliver_reply(ticket, shown, Utc::now()));
            },
            pause,
        );

        match timer {
            Ok(handle) => self.pending.set_timer(handle),
            Err(err) => {
                warn!(name: "chat.reply.timer_failed", error = ?err, "Showing reply without pause");
                self.chat
                    .try_update(|chat| chat.deliver_reply(ticket, reply, Utc::now()));
            }
        }
    }

    /// Start over locally, then ask the service to forget the session.
    pub fn clear(&self) {
        self.pending.cancel();
        self.chat.update(|chat| chat.clear(Utc::now()));
        info!(name: "chat.cleared", session = %self.session);

        let client = self.client.clone();
        let session = self.session.clone();
        spawn_local(async move {
            if let Err(err) = client.clear_session(&session).await {
                error!(name: "chat.clear.failed", error = %err, "Failed to clear session on server");
            }
        });
    }

    /// Fetch the conversation and download it as a JSON file.
    pub fn export(&self) {
        let client = self.client.clone();
        let session = self.session.clone();
        spawn_local(async move {
            let payload = match client.export_session(&session).await {
                Ok(payload) => payload,
                Err(err) => {
                    error!(name: "chat.export.failed", error = %err, "Failed to export session");
                    return;
                }
            };
            let file = match ExportFile::new(&payload, Utc::now()) {
                Ok(file) => file,
                Err(err) => {
                    error!(name: "chat.export.failed", error = %err, "Failed to format export");
                    return;
                }
            };
            match browser::download(&file) {
                Ok(()) => info!(name: "chat.export.saved", filename = file.filename()),
                Err(err) => error!(name: "chat.export.failed", error = ?err, "Failed to start download"),
            }
        });
    }

    /// Fetch fresh statistics; the modal opens once they arrive.
    pub fn open_stats(&self) {
        let client = self.client.clone();
        let session = self.session.clone();
        let stats = self.stats;
        spawn_local(async move {
            match client.session_stats(&session).await {
                Ok(snapshot) => {
                    stats.try_set(Some(snapshot));
                }
                Err(err) => {
                    error!(name: "chat.stats.failed", error = %err, "Failed to fetch statistics");
                }
            }
        });
    }

    pub fn close_stats(&self) {
        self.stats.set(None);
    }

    pub fn toggle_settings(&self) {
        self.show_settings.update(|open| *open = !*open);
    }

    pub fn toggle_dark_mode(&self) {
        self.prefs.update(Preferences::toggle_dark_mode);
    }

    pub fn set_font_size(&self, size: FontSize) {
        self.prefs.update(|prefs| prefs.font_size = size);
    }

    /// Drop whatever exchange is still pending; called when the widget unmounts.
    pub fn teardown(&self) {
        self.pending.cancel();
        debug!(name: "chat.widget.unmounted", session = %self.session);
    }
}
