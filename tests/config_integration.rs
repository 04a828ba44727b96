use chat_widget::config::WidgetConfig;
use serial_test::serial;
use std::env;
use std::fs;

const ARGV0: &str = "chat-widget";

// Helper to clear environment variables that might interfere with tests
fn clear_env_vars() {
    unsafe {
        env::remove_var("CHAT_WIDGET_API__BASE_URL");
        env::remove_var("CHAT_WIDGET_REPLY__MIN_DELAY_MS");
        env::remove_var("CHAT_WIDGET_REPLY__MAX_DELAY_MS");
        env::remove_var("CHAT_WIDGET_CONFIG");
        env::remove_var("CHAT_API_BASE");
    }
}

#[test]
#[serial]
fn test_default_config() {
    clear_env_vars();

    let config = WidgetConfig::load_from_args([ARGV0]).expect("Failed to load config");
    assert_eq!(config, WidgetConfig::default());
    assert_eq!(config.api.base_url, "http://localhost:5000");
    assert_eq!(config.reply.min_delay_ms, 500);
    assert_eq!(config.reply.max_delay_ms, 1500);
}

#[test]
#[serial]
fn test_env_override() {
    clear_env_vars();
    unsafe {
        env::set_var("CHAT_WIDGET_API__BASE_URL", "http://chat.internal:8080");
        env::set_var("CHAT_WIDGET_REPLY__MIN_DELAY_MS", "0");
        env::set_var("CHAT_WIDGET_REPLY__MAX_DELAY_MS", "10");
    }

    let config = WidgetConfig::load_from_args([ARGV0]).expect("Failed to load config");
    assert_eq!(config.api.base_url, "http://chat.internal:8080");
    assert_eq!(config.reply.min_delay_ms, 0);
    assert_eq!(config.reply.max_delay_ms, 10);

    clear_env_vars();
}

#[test]
#[serial]
fn test_file_load() {
    clear_env_vars();

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let file_path = dir.path().join("widget.yaml");
    let config_content = r#"
api:
  base_url: "http://from-file:5000"
text:
  title: "Support"
    "#;
    fs::write(&file_path, config_content).expect("Failed to write temp config");

    let path = file_path.to_string_lossy().to_string();
    let config = WidgetConfig::load_from_args([ARGV0, "--config", path.as_str()])
        .expect("Failed to load config from file");
    assert_eq!(config.api.base_url, "http://from-file:5000");
    assert_eq!(config.text.title, "Support");
    // Untouched keys keep their defaults
    assert_eq!(config.text.placeholder, "Type your message...");
}

#[test]
#[serial]
fn test_config_file_from_env() {
    clear_env_vars();

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let file_path = dir.path().join("widget.toml");
    fs::write(&file_path, "[terminal]\nexport_dir = \"/tmp/exports\"\n")
        .expect("Failed to write temp config");

    unsafe {
        env::set_var("CHAT_WIDGET_CONFIG", &file_path);
    }

    let config = WidgetConfig::load_from_args([ARGV0]).expect("Failed to load config from file");
    assert_eq!(config.terminal.export_dir, "/tmp/exports");

    clear_env_vars();
}

#[test]
#[serial]
fn test_cli_overrides_env_and_file() {
    clear_env_vars();

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let file_path = dir.path().join("widget.yaml");
    fs::write(&file_path, "api:\n  base_url: \"http://from-file:5000\"\n")
        .expect("Failed to write temp config");

    unsafe {
        env::set_var("CHAT_WIDGET_API__BASE_URL", "http://from-env:5000");
    }

    let path = file_path.to_string_lossy().to_string();
    let config = WidgetConfig::load_from_args([
        ARGV0,
        "--config",
        path.as_str(),
        "--api-base",
        "http://from-cli:5000",
        "--log",
        "debug",
    ])
    .expect("Failed to load config");
    assert_eq!(config.api.base_url, "http://from-cli:5000");
    assert_eq!(config.log.filter, "debug");

    clear_env_vars();
}

#[test]
#[serial]
fn test_env_beats_file() {
    clear_env_vars();

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let file_path = dir.path().join("widget.yaml");
    fs::write(&file_path, "api:\n  base_url: \"http://from-file:5000\"\n")
        .expect("Failed to write temp config");

    unsafe {
        env::set_var("CHAT_WIDGET_API__BASE_URL", "http://from-env:5000");
    }

    let path = file_path.to_string_lossy().to_string();
    let config =
        WidgetConfig::load_from_args([ARGV0, "--config", path.as_str()]).expect("Failed to load");
    assert_eq!(config.api.base_url, "http://from-env:5000");

    clear_env_vars();
}

#[test]
#[serial]
fn test_missing_config_file_is_an_error() {
    clear_env_vars();

    let result = WidgetConfig::load_from_args([ARGV0, "--config", "/nonexistent/widget.yaml"]);
    assert!(result.is_err());
}

#[test]
#[serial]
fn test_env_vars_outside_prefix_are_ignored() {
    clear_env_vars();
    unsafe {
        env::set_var("CHAT_API_BASE", "http://stray:9000");
    }

    let config = WidgetConfig::load_from_args([ARGV0]).expect("Failed to load config");
    assert_eq!(config.api.base_url, "http://localhost:5000");

    unsafe {
        env::set_var("CHAT_WIDGET_API__BASE_URL", "http://prefixed:9000");
    }
    let config = WidgetConfig::load_from_args([ARGV0]).expect("Failed to load config");
    assert_eq!(config.api.base_url, "http://prefixed:9000");

    clear_env_vars();
}
