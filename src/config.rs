use std::time::Duration;

use clap::Parser;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;

use crate::chat::{ChatTexts, DEFAULT_ERROR, DEFAULT_WELCOME, ReplyDelay};

/// Prefix of environment variables read as configuration, e.g.
/// `CHAT_WIDGET_API__BASE_URL=http://localhost:8080`.
pub const ENV_PREFIX: &str = "CHAT_WIDGET";

const DEFAULT_BASE_URL: &str = "http://localhost:5000";
const DEFAULT_TITLE: &str = "AI Assistant";
const DEFAULT_PLACEHOLDER: &str = "Type your message...";
const DEFAULT_EXPORT_DIR: &str = ".";
const DEFAULT_PROBE_INTERVAL_SECS: u64 = 15;
const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file path
    #[arg(short, long, env = "CHAT_WIDGET_CONFIG")]
    pub config: Option<String>,

    /// Base URL of the chat service
    #[arg(long)]
    pub api_base: Option<String>,

    /// Directory exports are written to
    #[arg(long)]
    pub export_dir: Option<String>,

    /// Log filter directive (e.g. "debug", "chat_widget=trace")
    #[arg(long)]
    pub log: Option<String>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct WidgetConfig {
    pub api: ApiConfig,
    pub reply: ReplyConfig,
    pub text: TextConfig,
    pub terminal: TerminalConfig,
    pub log: LogConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ApiConfig {
    pub base_url: String,
    /// Whole-request timeout; 0 leaves it to the transport. Ignored in the browser.
    pub request_timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ReplyConfig {
    pub min_delay_ms: u64,
    pub max_delay_ms: u64,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct TextConfig {
    pub title: String,
    pub welcome: String,
    pub error: String,
    pub placeholder: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct TerminalConfig {
    pub export_dir: String,
    pub probe_interval_secs: u64,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct LogConfig {
    pub filter: String,
}

impl WidgetConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from_args(std::env::args())
    }

    /// Layer defaults, the optional config file, `CHAT_WIDGET_*` environment
    /// variables and finally the command line.
    pub fn load_from_args<I, T>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let cli = Cli::try_parse_from(args).map_err(|e| ConfigError::Message(e.to_string()))?;

        let mut builder = defaults()?;

        if let Some(path) = &cli.config {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        // CHAT_WIDGET_API__BASE_URL -> api.base_url
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        if let Some(base) = cli.api_base {
            builder = builder.set_override("api.base_url", base)?;
        }
        if let Some(dir) = cli.export_dir {
            builder = builder.set_override("terminal.export_dir", dir)?;
        }
        if let Some(filter) = cli.log {
            builder = builder.set_override("log.filter", filter)?;
        }

        builder.build()?.try_deserialize()
    }

    /// Defaults overlaid with a JSON document, as embedded in a host page.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        defaults()?
            .add_source(File::from_str(json, FileFormat::Json))
            .build()?
            .try_deserialize()
    }

    pub fn reply_delay(&self) -> ReplyDelay {
        ReplyDelay::new(
            Duration::from_millis(self.reply.min_delay_ms),
            Duration::from_millis(self.reply.max_delay_ms),
        )
    }

    pub fn chat_texts(&self) -> ChatTexts {
        ChatTexts {
            welcome: self.text.welcome.clone(),
            error: self.text.error.clone(),
        }
    }

    pub fn probe_interval(&self) -> Duration {
        Duration::from_secs(self.terminal.probe_interval_secs.max(1))
    }
}

impl Default for WidgetConfig {
    fn default() -> Self {
        let delay = ReplyDelay::default();
        Self {
            api: ApiConfig {
                base_url: DEFAULT_BASE_URL.to_string(),
                request_timeout_secs: 0,
            },
            reply: ReplyConfig {
                min_delay_ms: millis(delay.min()),
                max_delay_ms: millis(delay.max()),
            },
            text: TextConfig {
                title: DEFAULT_TITLE.to_string(),
                welcome: DEFAULT_WELCOME.to_string(),
                error: DEFAULT_ERROR.to_string(),
                placeholder: DEFAULT_PLACEHOLDER.to_string(),
            },
            terminal: TerminalConfig {
                export_dir: DEFAULT_EXPORT_DIR.to_string(),
                probe_interval_secs: DEFAULT_PROBE_INTERVAL_SECS,
            },
            log: LogConfig {
                filter: DEFAULT_LOG_FILTER.to_string(),
            },
        }
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let d = WidgetConfig::default();
    Config::builder()
        .set_default("api.base_url", d.api.base_url)?
        .set_default("api.request_timeout_secs", d.api.request_timeout_secs)?
        .set_default("reply.min_delay_ms", d.reply.min_delay_ms)?
        .set_default("reply.max_delay_ms", d.reply.max_delay_ms)?
        .set_default("text.title", d.text.title)?
        .set_default("text.welcome", d.text.welcome)?
        .set_default("text.error", d.text.error)?
        .set_default("text.placeholder", d.text.placeholder)?
        .set_default("terminal.export_dir", d.terminal.export_dir)?
        .set_default("terminal.probe_interval_secs", d.terminal.probe_interval_secs)?
        .set_default("log.filter", d.log.filter)
}
