//! Terminal front end.
//!
//! Drives the same [`ChatState`] as the browser widget from a line-oriented
//! stream: plain lines are sent as messages, slash commands trigger the
//! auxiliary actions. Each exchange, including the composing pause, completes
//! before the next line is read.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::api::{ChatBackend, HttpClient, SessionStats};
use crate::chat::{ChatState, Connectivity, Message, ReplyDelay, Sender, SubmitBlocked};
use crate::config::WidgetConfig;
use crate::export::{ExportError, ExportFile};
use crate::session::SessionId;

const HELP: &str = "\
Commands:
  /clear   start over (also clears the conversation on the server)
  /export  save the conversation as JSON
  /stats   show message statistics
  /help    show this help
  /quit    leave
Anything else is sent as a message.
";

/// One line of input, interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Send(String),
    Clear,
    Export,
    Stats,
    Help,
    Quit,
    Unknown(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        if !trimmed.starts_with('/') {
            return Self::Send(line.to_string());
        }
        match trimmed {
            "/clear" => Self::Clear,
            "/export" => Self::Export,
            "/stats" => Self::Stats,
            "/help" | "/?" => Self::Help,
            "/quit" | "/exit" => Self::Quit,
            other => Self::Unknown(other.to_string()),
        }
    }
}

/// `[HH:MM] who: text`
pub fn format_line(message: &Message) -> String {
    let who = match (message.sender(), message.is_error()) {
        (Sender::Bot, true) => "bot (error)",
        (sender, _) => sender.label(),
    };
    format!("[{}] {who}: {}", message.display_time(), message.text())
}

/// A chat session bound to one backend and one session id.
#[derive(Debug)]
pub struct Terminal<B> {
    backend: Arc<B>,
    session: SessionId,
    state: ChatState,
    delay: ReplyDelay,
    export_dir: PathBuf,
    title: String,
    connectivity: watch::Receiver<Connectivity>,
    rendered: usize,
}

impl<B: ChatBackend> Terminal<B> {
    pub fn new(
        backend: Arc<B>,
        session: SessionId,
        config: &WidgetConfig,
        connectivity: watch::Receiver<Connectivity>,
    ) -> Self {
        Self {
            backend,
            session,
            state: ChatState::new(config.chat_texts(), Utc::now()),
            delay: config.reply_delay(),
            export_dir: PathBuf::from(&config.terminal.export_dir),
            title: config.text.title.clone(),
            connectivity,
            rendered: 0,
        }
    }

    pub fn state(&self) -> &ChatState {
        &self.state
    }

    pub fn session(&self) -> &SessionId {
        &self.session
    }

    /// Process `input` line by line until EOF or `/quit`.
    pub async fn run<R, W>(&mut self, input: R, output: &mut W) -> io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let banner = format!(
            "{} (session {}). Type /help for commands.\n",
            self.title, self.session
        );
        output.write_all(banner.as_bytes()).await?;
        self.render_new(output).await?;
        output.flush().await?;

        let mut lines = input.lines();
        while let Some(line) = lines.next_line().await? {
            match Command::parse(&line) {
                Command::Send(text) => self.send(text, output).await?,
                Command::Clear => self.clear(output).await?,
                Command::Export => self.export(output).await?,
                Command::Stats => self.stats(output).await?,
                Command::Help => output.write_all(HELP.as_bytes()).await?,
                Command::Quit => break,
                Command::Unknown(cmd) => {
                    let note = format!("Unknown command {cmd}. Type /help for commands.\n");
                    output.write_all(note.as_bytes()).await?;
                }
            }
            output.flush().await?;
        }
        Ok(())
    }

    async fn send<W: AsyncWrite + Unpin>(&mut self, text: String, output: &mut W) -> io::Result<()> {
        let connectivity = *self.connectivity.borrow();
        self.state.set_connectivity(connectivity);
        self.state.set_draft(text);

        let outbound = match self.state.submit(Utc::now()) {
            Ok(outbound) => outbound,
            Err(SubmitBlocked::EmptyInput) => return Ok(()),
            Err(blocked) => {
                debug!(name: "chat.submit.blocked", reason = %blocked);
                let note = format!("(not sent: {blocked})\n");
                return output.write_all(note.as_bytes()).await;
            }
        };
        self.render_new(output).await?;
        output.write_all(b"bot is typing...\n").await?;
        output.flush().await?;

        match self.backend.send_message(&self.session, &outbound.text).await {
            Ok(reply) => {
                self.state.response_received(outbound.ticket);
                let pause = self.delay.sample(&mut rand::thread_rng());
                tokio::time::sleep(pause).await;
                self.state.deliver_reply(outbound.ticket, reply, Utc::now());
            }
            Err(err) => {
                error!(
                    name: "chat.reply.failed",
                    error = %err,
                    transport = err.is_transport(),
                    "Failed to get reply"
                );
                self.state.fail_reply(outbound.ticket, Utc::now());
            }
        }
        self.render_new(output).await
    }

    async fn clear<W: AsyncWrite + Unpin>(&mut self, output: &mut W) -> io::Result<()> {
        self.state.clear(Utc::now());
        self.rendered = 0;
        output.write_all(b"-- chat cleared --\n").await?;
        self.render_new(output).await?;

        if let Err(err) = self.backend.clear_session(&self.session).await {
            error!(name: "chat.clear.failed", error = %err, "Failed to clear session on server");
        }
        Ok(())
    }

    async fn export<W: AsyncWrite + Unpin>(&mut self, output: &mut W) -> io::Result<()> {
        let payload = match self.backend.export_session(&self.session).await {
            Ok(payload) => payload,
            Err(err) => {
                error!(name: "chat.export.failed", error = %err, "Failed to export session");
                return Ok(());
            }
        };
        match write_export(&self.export_dir, &payload).await {
            Ok(path) => {
                info!(name: "chat.export.saved", path = %path.display());
                let note = format!("Exported to {}\n", path.display());
                output.write_all(note.as_bytes()).await
            }
            Err(err) => {
                error!(name: "chat.export.failed", error = %err, "Failed to save export");
                Ok(())
            }
        }
    }

    async fn stats<W: AsyncWrite + Unpin>(&mut self, output: &mut W) -> io::Result<()> {
        match self.backend.session_stats(&self.session).await {
            Ok(stats) => output.write_all(format_stats(&stats).as_bytes()).await,
            Err(err) => {
                error!(name: "chat.stats.failed", error = %err, "Failed to fetch statistics");
                Ok(())
            }
        }
    }

    async fn render_new<W: AsyncWrite + Unpin>(&mut self, output: &mut W) -> io::Result<()> {
        let messages = self.state.messages();
        let mut text = String::new();
        for message in messages.iter().skip(self.rendered) {
            text.push_str(&format_line(message));
            text.push('\n');
        }
        self.rendered = messages.len();
        output.write_all(text.as_bytes()).await
    }
}

fn format_stats(stats: &SessionStats) -> String {
    format!(
        "Messages: {} total, {} from you, {} from the bot\n",
        stats.total_messages, stats.user_messages, stats.bot_messages
    )
}

async fn write_export(dir: &Path, payload: &serde_json::Value) -> Result<PathBuf, ExportError> {
    let export = ExportFile::new(payload, Utc::now())?;
    let path = dir.join(export.filename());
    tokio::fs::write(&path, export.contents()).await?;
    Ok(path)
}

/// Probe the service's health endpoint now and every `interval` afterwards,
/// publishing the result. The task ends once every receiver is dropped.
pub fn spawn_probe<B>(
    backend: Arc<B>,
    interval: Duration,
) -> (watch::Receiver<Connectivity>, JoinHandle<()>)
where
    B: ChatBackend + 'static,
{
    let (tx, rx) = watch::channel(Connectivity::Online);
    let handle = tokio::spawn(async move {
        loop {
            let observed = match backend.health().await {
                Ok(()) => Connectivity::Online,
                Err(err) => {
                    debug!(name: "chat.probe.failed", error = %err);
                    Connectivity::Offline
                }
            };
            tx.send_if_modified(|current| {
                if *current == observed {
                    return false;
                }
                info!(name: "chat.connectivity.changed", online = observed.is_online());
                *current = observed;
                true
            });
            if tx.is_closed() {
                break;
            }
            tokio::time::sleep(interval).await;
        }
    });
    (rx, handle)
}

/// Run an interactive session on stdin/stdout against the configured service.
pub async fn run_stdio(config: &WidgetConfig) -> anyhow::Result<()> {
    let backend = Arc::new(HttpClient::from_config(&config.api)?);
    info!(
        name: "chat.config.loaded",
        base_url = %backend.base_url(),
        "Chat service configured"
    );

    let (connectivity, probe) = spawn_probe(Arc::clone(&backend), config.probe_interval());
    let mut terminal = Terminal::new(backend, SessionId::generate(), config, connectivity);

    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = tokio::io::stdout();
    let result = terminal.run(stdin, &mut stdout).await;

    probe.abort();
    Ok(result?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("hello"), Command::Send("hello".to_string()));
        assert_eq!(Command::parse("  /clear "), Command::Clear);
        assert_eq!(Command::parse("/export"), Command::Export);
        assert_eq!(Command::parse("/stats"), Command::Stats);
        assert_eq!(Command::parse("/exit"), Command::Quit);
        assert_eq!(Command::parse("/nope"), Command::Unknown("/nope".to_string()));
        assert_eq!(Command::parse(""), Command::Send(String::new()));
    }

    #[test]
    fn test_format_line_marks_errors() {
        let now = Utc::now();
        assert!(format_line(&Message::user("hi", now)).ends_with("] you: hi"));
        assert!(format_line(&Message::bot("yo", now)).ends_with("] bot: yo"));
        assert!(format_line(&Message::error("down", now)).ends_with("] bot (error): down"));
    }

    #[test]
    fn test_format_stats() {
        let stats = SessionStats {
            total_messages: 4,
            user_messages: 2,
            bot_messages: 2,
        };
        assert_eq!(
            format_stats(&stats),
            "Messages: 4 total, 2 from you, 2 from the bot\n"
        );
    }
}
