//! Terminal front end driven by scripted input against a scripted backend.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chat_widget::api::{ChatBackend, SessionStats};
use chat_widget::chat::{Connectivity, DEFAULT_ERROR, Sender};
use chat_widget::config::WidgetConfig;
use chat_widget::error::{ApiError, Result};
use chat_widget::session::SessionId;
use chat_widget::terminal::{Terminal, spawn_probe};
use serde_json::{Value, json};
use tokio::sync::watch;

#[derive(Default)]
struct ScriptedBackend {
    replies: Mutex<VecDeque<Result<String>>>,
    sent: Mutex<Vec<String>>,
    clears: AtomicUsize,
    unhealthy: AtomicBool,
}

impl ScriptedBackend {
    fn with_replies(replies: impl IntoIterator<Item = Result<String>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into_iter().collect()),
            ..Self::default()
        })
    }

    fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatBackend for ScriptedBackend {
    async fn send_message(&self, _session: &SessionId, message: &str) -> Result<String> {
        self.sent.lock().unwrap().push(message.to_string());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(format!("echo: {message}")))
    }

    async fn clear_session(&self, _session: &SessionId) -> Result<()> {
        self.clears.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn export_session(&self, session: &SessionId) -> Result<Value> {
        Ok(json!({ "session_id": session.as_str(), "messages": [] }))
    }

    async fn session_stats(&self, _session: &SessionId) -> Result<SessionStats> {
        Ok(SessionStats {
            total_messages: 4,
            user_messages: 2,
            bot_messages: 2,
        })
    }

    async fn health(&self) -> Result<()> {
        if self.unhealthy.load(Ordering::SeqCst) {
            Err(ApiError::Api {
                status: 503,
                message: "down".to_string(),
            })
        } else {
            Ok(())
        }
    }
}

fn rejected() -> ApiError {
    ApiError::Rejected {
        status: "error".to_string(),
        message: "boom".to_string(),
    }
}

fn terminal(
    backend: &Arc<ScriptedBackend>,
    config: &WidgetConfig,
) -> (Terminal<ScriptedBackend>, watch::Sender<Connectivity>) {
    let (tx, rx) = watch::channel(Connectivity::Online);
    let terminal = Terminal::new(Arc::clone(backend), SessionId::new("s-1"), config, rx);
    (terminal, tx)
}

async fn run(terminal: &mut Terminal<ScriptedBackend>, input: &str) -> String {
    let mut output = Vec::new();
    terminal.run(input.as_bytes(), &mut output).await.unwrap();
    String::from_utf8(output).unwrap()
}

#[tokio::test(start_paused = true)]
async fn test_send_shows_user_message_then_reply() {
    let backend = ScriptedBackend::with_replies([Ok("Hello there".to_string())]);
    let (mut terminal, _tx) = terminal(&backend, &WidgetConfig::default());

    let output = run(&mut terminal, "hi\n").await;

    assert!(output.contains("] you: hi\n"));
    assert!(output.contains("bot is typing...\n"));
    assert!(output.contains("] bot: Hello there\n"));
    assert_eq!(backend.sent(), vec!["hi".to_string()]);

    let messages = terminal.state().messages();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[1].sender(), Sender::User);
    assert_eq!(messages[2].text(), "Hello there");
    assert!(!terminal.state().is_typing());
}

#[tokio::test(start_paused = true)]
async fn test_failed_reply_shows_error_message() {
    let backend = ScriptedBackend::with_replies([Err(rejected())]);
    let (mut terminal, _tx) = terminal(&backend, &WidgetConfig::default());

    let output = run(&mut terminal, "hi\n").await;

    assert!(output.contains(&format!("] bot (error): {DEFAULT_ERROR}\n")));
    let last = terminal.state().messages().last().unwrap();
    assert!(last.is_error());
    assert!(!terminal.state().is_loading());
}

#[tokio::test(start_paused = true)]
async fn test_malformed_reply_shows_error_message() {
    let malformed = serde_json::from_str::<Value>("{not json").unwrap_err();
    let backend = ScriptedBackend::with_replies([Err(ApiError::Json(malformed))]);
    let (mut terminal, _tx) = terminal(&backend, &WidgetConfig::default());

    let output = run(&mut terminal, "hi\n").await;

    assert!(output.contains(&format!("] bot (error): {DEFAULT_ERROR}\n")));
    assert!(terminal.state().messages().last().unwrap().is_error());
}

#[tokio::test(start_paused = true)]
async fn test_reply_waits_for_composing_pause() {
    let backend = ScriptedBackend::with_replies([Ok("Hello there".to_string())]);
    let config = WidgetConfig::default();
    let (mut terminal, _tx) = terminal(&backend, &config);

    let start = tokio::time::Instant::now();
    run(&mut terminal, "hi\n").await;
    let elapsed = start.elapsed();

    assert!(elapsed >= Duration::from_millis(config.reply.min_delay_ms));
    assert_eq!(terminal.state().messages().last().unwrap().text(), "Hello there");
}

#[tokio::test(start_paused = true)]
async fn test_replies_follow_their_messages() {
    let backend = ScriptedBackend::with_replies([Ok("one".to_string()), Err(rejected())]);
    let (mut terminal, _tx) = terminal(&backend, &WidgetConfig::default());

    run(&mut terminal, "first\nsecond\nthird\n").await;

    let texts: Vec<_> = terminal
        .state()
        .messages()
        .iter()
        .map(|m| m.text().to_string())
        .collect();
    assert_eq!(texts.len(), 7);
    assert_eq!(texts[1..3], ["first".to_string(), "one".to_string()]);
    assert_eq!(texts[3..5], ["second".to_string(), DEFAULT_ERROR.to_string()]);
    assert_eq!(texts[5..7], ["third".to_string(), "echo: third".to_string()]);
}

#[tokio::test(start_paused = true)]
async fn test_blank_lines_are_ignored() {
    let backend = ScriptedBackend::with_replies([]);
    let (mut terminal, _tx) = terminal(&backend, &WidgetConfig::default());

    let output = run(&mut terminal, "\n   \n").await;

    assert!(backend.sent().is_empty());
    assert_eq!(terminal.state().messages().len(), 1);
    assert!(!output.contains("not sent"));
}

#[tokio::test(start_paused = true)]
async fn test_offline_blocks_until_reconnected() {
    let backend = ScriptedBackend::with_replies([]);
    let (mut terminal, tx) = terminal(&backend, &WidgetConfig::default());

    tx.send(Connectivity::Offline).unwrap();
    let output = run(&mut terminal, "hi\n").await;
    assert!(output.contains("(not sent: you are offline)"));
    assert!(backend.sent().is_empty());
    assert_eq!(terminal.state().messages().len(), 1);

    // Nothing typed while offline is sent on reconnection
    tx.send(Connectivity::Online).unwrap();
    run(&mut terminal, "").await;
    assert!(backend.sent().is_empty());

    run(&mut terminal, "again\n").await;
    assert_eq!(backend.sent(), vec!["again".to_string()]);
    assert_eq!(terminal.state().messages().len(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_clear_leaves_only_welcome() {
    let backend = ScriptedBackend::with_replies([]);
    let config = WidgetConfig::default();
    let (mut terminal, _tx) = terminal(&backend, &config);

    let output = run(&mut terminal, "a\nb\n/clear\n").await;

    assert!(output.contains("-- chat cleared --\n"));
    let messages = terminal.state().messages();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].text(), config.text.welcome);
    assert_eq!(backend.clears.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn test_export_writes_pretty_json() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = WidgetConfig::default();
    config.terminal.export_dir = dir.path().to_string_lossy().to_string();

    let backend = ScriptedBackend::with_replies([]);
    let (mut terminal, _tx) = terminal(&backend, &config);

    let output = run(&mut terminal, "/export\n").await;
    assert!(output.contains("Exported to "));

    let entries: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .collect();
    assert_eq!(entries.len(), 1);

    let name = entries[0].file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("chat-export-"));
    assert!(name.ends_with(".json"));

    let contents = std::fs::read_to_string(&entries[0]).unwrap();
    let expected = json!({ "session_id": "s-1", "messages": [] });
    assert_eq!(contents, serde_json::to_string_pretty(&expected).unwrap());
}

#[tokio::test(start_paused = true)]
async fn test_stats_help_and_unknown_commands() {
    let backend = ScriptedBackend::with_replies([]);
    let (mut terminal, _tx) = terminal(&backend, &WidgetConfig::default());

    let output = run(&mut terminal, "/stats\n/help\n/bogus\n").await;

    assert!(output.contains("Messages: 4 total, 2 from you, 2 from the bot\n"));
    assert!(output.contains("/export"));
    assert!(output.contains("Unknown command /bogus"));
    assert!(backend.sent().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_quit_stops_reading() {
    let backend = ScriptedBackend::with_replies([]);
    let (mut terminal, _tx) = terminal(&backend, &WidgetConfig::default());

    run(&mut terminal, "/quit\nhi\n").await;

    assert!(backend.sent().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_probe_reports_connectivity_changes() {
    let backend = ScriptedBackend::with_replies([]);
    backend.unhealthy.store(true, Ordering::SeqCst);

    let (mut rx, probe) = spawn_probe(Arc::clone(&backend), Duration::from_secs(5));
    rx.changed().await.unwrap();
    assert_eq!(*rx.borrow_and_update(), Connectivity::Offline);

    backend.unhealthy.store(false, Ordering::SeqCst);
    rx.changed().await.unwrap();
    assert_eq!(*rx.borrow_and_update(), Connectivity::Online);

    probe.abort();
}
