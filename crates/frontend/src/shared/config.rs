//! Конфигурация клиента.
//!
//! `config.toml` встраивается в бинарник при сборке. Если его не удалось
//! разобрать, используется встроенная конфигурация по умолчанию.

use once_cell::sync::Lazy;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub search: SearchConfig,
    pub scanner: ScannerConfig,
    pub notifications: NotificationsConfig,
    pub lists: ListsConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ApiConfig {
    #[serde(default)]
    pub base_url: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SearchConfig {
    pub debounce_ms: u32,
    pub min_query_len: usize,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ScannerConfig {
    pub max_key_interval_ms: u32,
    pub min_length: usize,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct NotificationsConfig {
    pub timeout_ms: u32,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ListsConfig {
    pub default_page_size: usize,
    #[serde(default = "default_page_size_options")]
    pub page_size_options: Vec<usize>,
}

fn default_page_size_options() -> Vec<usize> {
    vec![10, 25, 50, 100]
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[api]
base_url = ""
port = 8080

[search]
debounce_ms = 300
min_query_len = 2

[scanner]
max_key_interval_ms = 50
min_length = 6

[notifications]
timeout_ms = 4000

[lists]
default_page_size = 25
page_size_options = [10, 25, 50, 100]
"#;

const BUNDLED_CONFIG: &str = include_str!("../../config.toml");

static CONFIG: Lazy<AppConfig> = Lazy::new(|| parse_or_default(BUNDLED_CONFIG));

/// Разбирает TOML; при ошибке пишет warning и возвращает конфигурацию по умолчанию
pub fn parse_or_default(contents: &str) -> AppConfig {
    match toml::from_str::<AppConfig>(contents) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("config.toml is invalid, using defaults: {}", e);
            default_config()
        }
    }
}

pub fn default_config() -> AppConfig {
    // DEFAULT_CONFIG покрыт тестом test_default_config_loads
    toml::from_str(DEFAULT_CONFIG).unwrap_or_else(|_| AppConfig {
        api: ApiConfig {
            base_url: String::new(),
            port: 8080,
        },
        search: SearchConfig {
            debounce_ms: 300,
            min_query_len: 2,
        },
        scanner: ScannerConfig {
            max_key_interval_ms: 50,
            min_length: 6,
        },
        notifications: NotificationsConfig { timeout_ms: 4000 },
        lists: ListsConfig {
            default_page_size: 25,
            page_size_options: default_page_size_options(),
        },
    })
}

pub fn config() -> &'static AppConfig {
    &CONFIG
}

/// Базовый URL API без завершающего слэша.
///
/// Пустой `base_url` означает тот же хост, что и у страницы, на порту `api.port`.
pub fn api_base() -> String {
    let api = &config().api;
    let configured = api.base_url.trim().trim_end_matches('/');
    if !configured.is_empty() {
        return configured.to_string();
    }

    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:{}", protocol, hostname, api.port)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config: Result<AppConfig, _> = toml::from_str(DEFAULT_CONFIG);
        assert!(config.is_ok());
        let config = config.unwrap();
        assert_eq!(config.api.port, 8080);
        assert_eq!(config.search.debounce_ms, 300);
    }

    #[test]
    fn test_bundled_config_loads() {
        let config: Result<AppConfig, _> = toml::from_str(BUNDLED_CONFIG);
        assert!(config.is_ok());
    }

    #[test]
    fn test_invalid_config_falls_back() {
        let config = parse_or_default("[api]\nport = \"not a number\"");
        assert_eq!(config, default_config());
    }

    #[test]
    fn test_custom_values() {
        let config = parse_or_default(
            r#"
            [api]
            base_url = "https://api.stockeate.com.ar"
            port = 443
            [search]
            debounce_ms = 150
            min_query_len = 3
            [scanner]
            max_key_interval_ms = 30
            min_length = 8
            [notifications]
            timeout_ms = 2500
            [lists]
            default_page_size = 50
            "#,
        );
        assert_eq!(config.api.base_url, "https://api.stockeate.com.ar");
        assert_eq!(config.scanner.max_key_interval_ms, 30);
        assert_eq!(config.lists.default_page_size, 50);
        assert_eq!(config.lists.page_size_options, vec![10, 25, 50, 100]);
    }
}
