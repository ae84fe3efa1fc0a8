// Configuration for the terminal client
//
// Configuration is loaded in order of precedence:
// 1. Environment variables (highest priority)
// 2. Config file (~/.config/hackterm/config.toml)
// 3. Built-in defaults (lowest priority)

use serde::Deserialize;
use std::path::PathBuf;

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Log file rotation cadence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogRotation {
    Hourly,
    Daily,
    Never,
}

impl LogRotation {
    fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "hourly" => LogRotation::Hourly,
            "never" => LogRotation::Never,
            _ => LogRotation::Daily,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    pub level: String,

    /// Write logs to rotating files in addition to the TUI buffer
    pub file_enabled: bool,

    /// Directory for log files
    pub file_dir: PathBuf,

    /// Log file name prefix
    pub file_prefix: String,

    /// Rotation cadence for log files
    pub file_rotation: LogRotation,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_enabled: false,
            file_dir: PathBuf::from("./logs"),
            file_prefix: "hackterm".to_string(),
            file_rotation: LogRotation::Daily,
        }
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the mission server
    pub server_url: String,

    /// Boot animation inter-character delay in milliseconds
    pub typing_delay_ms: u64,

    /// Per-request timeout for mission server calls, in seconds
    pub request_timeout_secs: u64,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Logging settings as loaded from the config file
#[derive(Debug, Deserialize, Default)]
struct FileLogging {
    level: Option<String>,
    file_enabled: Option<bool>,
    file_dir: Option<String>,
    file_prefix: Option<String>,
    file_rotation: Option<String>,
}

/// Config file structure (subset of Config that makes sense to persist)
#[derive(Debug, Deserialize, Default)]
struct FileConfig {
    server_url: Option<String>,
    typing_delay_ms: Option<u64>,
    request_timeout_secs: Option<u64>,

    /// Optional [logging] section
    logging: Option<FileLogging>,
}

impl Config {
    /// Get the config file path: ~/.config/hackterm/config.toml
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("hackterm").join("config.toml"))
    }

    /// Create config template if it doesn't exist
    /// Called during startup to help users discover configuration options
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };

        // Don't overwrite existing config
        if path.exists() {
            return;
        }

        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return; // Silently fail - config is optional
            }
        }

        let template = r#"# hackterm configuration
# Uncomment and modify options as needed

# Mission server base URL (default: http://127.0.0.1:8000)
# server_url = "http://127.0.0.1:8000"

# Boot animation inter-character delay in milliseconds (default: 50)
# typing_delay_ms = 50

# Per-request timeout for mission server calls, in seconds (default: 10)
# request_timeout_secs = 10

# Logging configuration
# [logging]
# level = "info"          # trace, debug, info, warn, error (RUST_LOG env var overrides this)
# file_enabled = false    # also write logs to rotating files
# file_dir = "./logs"
# file_prefix = "hackterm"
# file_rotation = "daily" # hourly, daily, never
"#;

        // Write template (ignore errors - config is optional)
        let _ = std::fs::write(&path, template);
    }

    /// Load file config if it exists
    fn load_file_config() -> FileConfig {
        let Some(path) = Self::config_path() else {
            return FileConfig::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(contents) => toml::from_str(&contents).unwrap_or_else(|e| {
                eprintln!("Warning: Failed to parse {}: {}", path.display(), e);
                FileConfig::default()
            }),
            Err(_) => FileConfig::default(), // File doesn't exist, use defaults
        }
    }

    /// Serialize config to TOML string (single source of truth for format)
    pub fn to_toml(&self) -> String {
        format!(
            r#"# hackterm configuration

# Mission server base URL
server_url = "{server}"

# Boot animation inter-character delay in milliseconds
typing_delay_ms = {delay}

# Per-request timeout for mission server calls, in seconds
request_timeout_secs = {timeout}

# Logging configuration (RUST_LOG env var overrides the level)
[logging]
level = "{log_level}"
file_enabled = {file_enabled}
file_dir = "{file_dir}"
file_prefix = "{file_prefix}"
file_rotation = "{rotation}"
"#,
            server = self.server_url,
            delay = self.typing_delay_ms,
            timeout = self.request_timeout_secs,
            log_level = self.logging.level,
            file_enabled = self.logging.file_enabled,
            file_dir = self.logging.file_dir.display(),
            file_prefix = self.logging.file_prefix,
            rotation = match self.logging.file_rotation {
                LogRotation::Hourly => "hourly",
                LogRotation::Daily => "daily",
                LogRotation::Never => "never",
            },
        )
    }

    /// Load configuration: env vars -> file -> defaults
    pub fn from_env() -> Self {
        let file = Self::load_file_config();

        // Server URL: env > file > default
        let server_url = std::env::var("HACKTERM_SERVER_URL")
            .ok()
            .or(file.server_url)
            .unwrap_or_else(|| "http://127.0.0.1:8000".to_string());

        // Typing delay: env > file > default (50ms per character)
        let typing_delay_ms = std::env::var("HACKTERM_TYPING_DELAY_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .or(file.typing_delay_ms)
            .unwrap_or(50);

        // Request timeout: env > file > default
        let request_timeout_secs = std::env::var("HACKTERM_REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .or(file.request_timeout_secs)
            .unwrap_or(10);

        // Logging settings: file config only (RUST_LOG env var handled in main.rs)
        let file_logging = file.logging.unwrap_or_default();
        let defaults = LoggingConfig::default();
        let logging = LoggingConfig {
            level: file_logging.level.unwrap_or(defaults.level),
            file_enabled: file_logging.file_enabled.unwrap_or(defaults.file_enabled),
            file_dir: file_logging
                .file_dir
                .map(PathBuf::from)
                .unwrap_or(defaults.file_dir),
            file_prefix: file_logging.file_prefix.unwrap_or(defaults.file_prefix),
            file_rotation: file_logging
                .file_rotation
                .as_deref()
                .map(LogRotation::parse)
                .unwrap_or(defaults.file_rotation),
        };

        Self {
            server_url,
            typing_delay_ms,
            request_timeout_secs,
            logging,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:8000".to_string(),
            typing_delay_ms: 50,
            request_timeout_secs: 10,
            logging: LoggingConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_config_parses_partial_toml() {
        let parsed: FileConfig = toml::from_str(
            r#"
            server_url = "http://10.0.0.1:9000"

            [logging]
            level = "debug"
            file_rotation = "hourly"
            "#,
        )
        .unwrap();
        assert_eq!(parsed.server_url.as_deref(), Some("http://10.0.0.1:9000"));
        assert!(parsed.typing_delay_ms.is_none());
        let logging = parsed.logging.unwrap();
        assert_eq!(logging.level.as_deref(), Some("debug"));
        assert_eq!(
            logging.file_rotation.as_deref().map(LogRotation::parse),
            Some(LogRotation::Hourly)
        );
    }

    #[test]
    fn template_round_trips_through_the_parser() {
        let config = Config::default();
        let parsed: FileConfig = toml::from_str(&config.to_toml()).unwrap();
        assert_eq!(parsed.server_url.as_deref(), Some("http://127.0.0.1:8000"));
        assert_eq!(parsed.typing_delay_ms, Some(50));
        assert_eq!(parsed.logging.unwrap().file_enabled, Some(false));
    }

    #[test]
    fn unknown_rotation_falls_back_to_daily() {
        assert_eq!(LogRotation::parse("weekly"), LogRotation::Daily);
        assert_eq!(LogRotation::parse("NEVER"), LogRotation::Never);
    }
}
