//! Chat widget entry point.
//!
//! Built for `wasm32`, mounts the widget in the page. Built natively, runs the
//! terminal front end against the configured chat service.

#[cfg(not(target_arch = "wasm32"))]
use mimalloc::MiMalloc;

/// Global allocator for improved performance (M-MIMALLOC-APPS).
#[cfg(not(target_arch = "wasm32"))]
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[cfg(target_arch = "wasm32")]
fn main() {
    chat_widget::ui::mount();
}

#[cfg(not(target_arch = "wasm32"))]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use chat_widget::config::WidgetConfig;
    use chat_widget::{telemetry, terminal};

    // Load .env (if present)
    let _ = dotenvy::dotenv();

    let config = WidgetConfig::load()?;

    // Initialize tracing (M-LOG-STRUCTURED)
    telemetry::init(&config.log.filter);

    terminal::run_stdio(&config).await
}
