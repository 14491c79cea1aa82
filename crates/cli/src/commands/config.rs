use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use sufra_core::config::{AppConfig, LoadOptions};
use toml::Value;

pub fn run() -> String {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => return format!("config validation failed: {error}"),
    };

    let config_file_path = detect_config_path();
    let config_file_doc = load_config_file_doc(config_file_path.as_deref());
    let source = |key_path: &str, env_key: &str| {
        field_source(key_path, Some(env_key), config_file_doc.as_ref(), config_file_path.as_deref())
    };

    let catalog_path = config
        .catalog
        .path
        .as_ref()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "<built-in>".to_string());

    let entries = [
        ("storage.url", config.storage.url.clone(), "SUFRA_STORAGE_URL"),
        (
            "storage.max_connections",
            config.storage.max_connections.to_string(),
            "SUFRA_STORAGE_MAX_CONNECTIONS",
        ),
        (
            "storage.timeout_secs",
            config.storage.timeout_secs.to_string(),
            "SUFRA_STORAGE_TIMEOUT_SECS",
        ),
        ("server.bind_address", config.server.bind_address.clone(), "SUFRA_SERVER_BIND_ADDRESS"),
        ("server.port", config.server.port.to_string(), "SUFRA_SERVER_PORT"),
        ("catalog.path", catalog_path, "SUFRA_CATALOG_PATH"),
        ("logging.level", config.logging.level.clone(), "SUFRA_LOGGING_LEVEL"),
        ("logging.format", format!("{:?}", config.logging.format), "SUFRA_LOGGING_FORMAT"),
    ];

    let mut lines = vec!["effective config (source precedence: env > file > default):".to_string()];
    lines.extend(
        entries.iter().map(|(key, value, env_key)| render_line(key, value, source(*key, *env_key))),
    );
    lines.join("\n")
}

fn detect_config_path() -> Option<PathBuf> {
    let root = PathBuf::from("sufra.toml");
    if root.exists() {
        return Some(root);
    }

    let nested = PathBuf::from("config/sufra.toml");
    if nested.exists() {
        return Some(nested);
    }

    None
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let path = path?;
    let raw = fs::read_to_string(path).ok()?;
    raw.parse::<Value>().ok()
}

fn field_source(
    key_path: &str,
    env_key: Option<&str>,
    config_file_doc: Option<&Value>,
    config_file_path: Option<&Path>,
) -> String {
    if let Some(env_key) = env_key {
        if env::var_os(env_key).is_some() {
            return format!("env ({env_key})");
        }
    }

    if let Some(doc) = config_file_doc {
        if contains_path(doc, key_path) {
            let file_path = config_file_path
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "config file".to_string());
            return format!("file ({file_path})");
        }
    }

    "default".to_string()
}

fn contains_path(root: &Value, key_path: &str) -> bool {
    let mut current = root;
    for key in key_path.split('.') {
        let Some(next) = current.get(key) else {
            return false;
        };
        current = next;
    }
    true
}

fn render_line(key: &str, value: &str, source: String) -> String {
    format!("- {key} = {value} (source: {source})")
}
