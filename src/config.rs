// Configuration for reelview
//
// Configuration is loaded in order of precedence:
// 1. Environment variables (highest priority)
// 2. Config file (~/.config/reelview/config.toml)
// 3. Built-in defaults (lowest priority)

use serde::Deserialize;
use std::path::PathBuf;

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default catalog endpoint
pub const DEFAULT_API_URL: &str = "https://api.tvmaze.com";

// ─────────────────────────────────────────────────────────────────────────────
// Response ordering
// ─────────────────────────────────────────────────────────────────────────────

/// How overlapping fetches are reconciled
///
/// Typing fires one fetch per keystroke and none of them are cancelled, so
/// responses can land out of order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResponseOrdering {
    /// Only the most recently issued request may update the list
    #[default]
    LatestRequest,
    /// Whichever response completes last wins, even if it is older
    CompletionOrder,
}

impl ResponseOrdering {
    /// Parse ordering string from config
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "completion-order" | "completion" => Self::CompletionOrder,
            _ => Self::LatestRequest,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LatestRequest => "latest-request",
            Self::CompletionOrder => "completion-order",
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Logging Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Log file rotation policy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogRotation {
    Hourly,
    #[default]
    Daily,
    Never,
}

impl LogRotation {
    /// Parse rotation string from config
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "hourly" => Self::Hourly,
            "never" => Self::Never,
            _ => Self::Daily,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Never => "never",
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    pub level: String,
    /// Write JSON logs to rotating files (in addition to the logs panel or stderr)
    pub file_enabled: bool,
    pub file_dir: PathBuf,
    pub file_rotation: LogRotation,
    /// Prefix for log file names (e.g., "reelview" -> "reelview.2024-01-15")
    pub file_prefix: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_enabled: false,
            file_dir: PathBuf::from("./logs"),
            file_rotation: LogRotation::Daily,
            file_prefix: "reelview".to_string(),
        }
    }
}

/// Logging settings as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub struct FileLogging {
    pub level: Option<String>,
    pub file_enabled: Option<bool>,
    pub file_dir: Option<String>,
    pub file_rotation: Option<String>,
    pub file_prefix: Option<String>,
}

impl LoggingConfig {
    /// Create from file config with defaults
    pub fn from_file(file: Option<FileLogging>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            level: file.level.unwrap_or(defaults.level),
            file_enabled: file.file_enabled.unwrap_or(defaults.file_enabled),
            file_dir: file
                .file_dir
                .map(PathBuf::from)
                .unwrap_or(defaults.file_dir),
            file_rotation: file
                .file_rotation
                .map(|s| LogRotation::from_str(&s))
                .unwrap_or(defaults.file_rotation),
            file_prefix: file.file_prefix.unwrap_or(defaults.file_prefix),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Application Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Application configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Catalog service base URL
    pub api_url: String,

    /// Per-request timeout for catalog and poster fetches
    pub request_timeout_secs: u64,

    /// Whether to run the TUI (false = print logs to stderr only)
    pub enable_tui: bool,

    /// Theme name: "auto", "dark", "nord", "gruvbox"
    pub theme: String,

    /// Reconciliation policy for overlapping fetches
    pub response_ordering: ResponseOrdering,

    /// Download poster images
    pub posters: bool,

    /// Show the logs panel at startup
    pub show_logs: bool,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout_secs: 10,
            enable_tui: true,
            theme: "auto".to_string(),
            response_ordering: ResponseOrdering::default(),
            posters: true,
            show_logs: false,
            logging: LoggingConfig::default(),
        }
    }
}

/// Config file structure (subset of Config that makes sense to persist)
#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileConfig {
    pub api_url: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub theme: Option<String>,
    pub response_ordering: Option<String>,
    pub posters: Option<bool>,
    pub show_logs: Option<bool>,

    /// Optional [logging] section
    pub logging: Option<FileLogging>,
}

impl Config {
    /// Get the config file path: ~/.config/reelview/config.toml
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("reelview").join("config.toml"))
    }

    /// Create config file with defaults if it doesn't exist
    /// Called during startup to help users discover configuration options
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };

        if path.exists() {
            return;
        }

        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return; // Config is optional
            }
        }

        let _ = std::fs::write(&path, Self::default().to_toml());
    }

    /// Load file config if it exists
    ///
    /// # Panics
    /// Exits the process if the file exists but cannot be read or parsed.
    /// A broken config should fail fast, not silently fall back to defaults.
    fn load_file_config() -> FileConfig {
        let Some(path) = Self::config_path() else {
            return FileConfig::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("\nCONFIG ERROR - Failed to parse configuration file\n");
                    eprintln!("  File: {}\n", path.display());
                    eprintln!("  Error: {}\n", e);
                    eprintln!("  To reset, run `reelview config --reset` or delete the file.\n");
                    std::process::exit(1);
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => FileConfig::default(),
            Err(e) => {
                eprintln!("\nCONFIG ERROR - Cannot read configuration file\n");
                eprintln!("  File: {}\n", path.display());
                eprintln!("  Error: {}\n", e);
                std::process::exit(1);
            }
        }
    }

    /// Load configuration: env vars -> file -> defaults
    pub fn from_env() -> Self {
        Self::resolve(Self::load_file_config(), |key| std::env::var(key).ok())
    }

    /// Merge a parsed file with an environment lookup
    pub(crate) fn resolve(file: FileConfig, env: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let api_url = env("REELVIEW_API_URL")
            .or(file.api_url)
            .unwrap_or(defaults.api_url);

        let theme = env("REELVIEW_THEME")
            .or(file.theme)
            .unwrap_or(defaults.theme);

        // TUI toggle: env only (runtime flag)
        let enable_tui = env("REELVIEW_NO_TUI")
            .map(|v| v != "1" && v.to_lowercase() != "true")
            .unwrap_or(true);

        Self {
            api_url,
            request_timeout_secs: match file.request_timeout_secs {
                // A zero timeout fails every request instantly
                Some(0) => {
                    eprintln!(
                        "Warning: request_timeout_secs = 0 is not usable, using {}",
                        defaults.request_timeout_secs
                    );
                    defaults.request_timeout_secs
                }
                Some(secs) => secs,
                None => defaults.request_timeout_secs,
            },
            enable_tui,
            theme,
            response_ordering: file
                .response_ordering
                .map(|s| ResponseOrdering::from_str(&s))
                .unwrap_or(defaults.response_ordering),
            posters: file.posters.unwrap_or(defaults.posters),
            show_logs: file.show_logs.unwrap_or(defaults.show_logs),
            logging: LoggingConfig::from_file(file.logging),
        }
    }

    /// Render as a commented TOML document
    pub fn to_toml(&self) -> String {
        format!(
            r#"# reelview configuration

# Catalog service base URL (TVMaze-compatible)
api_url = "{api_url}"

# Timeout for catalog and poster requests, in seconds
request_timeout_secs = {timeout}

# Theme: auto, dark, nord, gruvbox
theme = "{theme}"

# How overlapping search requests are reconciled:
#   "latest-request"   - only the newest request may update the list
#   "completion-order" - the response that finishes last wins
response_ordering = "{ordering}"

# Download poster images
posters = {posters}

# Show the logs panel at startup (toggle with 'l')
show_logs = {show_logs}

[logging]
# trace, debug, info, warn, error (RUST_LOG overrides)
level = "{level}"
file_enabled = {file_enabled}
file_dir = "{file_dir}"
# hourly, daily, never
file_rotation = "{rotation}"
file_prefix = "{prefix}"
"#,
            api_url = self.api_url,
            timeout = self.request_timeout_secs,
            theme = self.theme,
            ordering = self.response_ordering.as_str(),
            posters = self.posters,
            show_logs = self.show_logs,
            level = self.logging.level,
            file_enabled = self.logging.file_enabled,
            file_dir = self.logging.file_dir.display(),
            rotation = self.logging.file_rotation.as_str(),
            prefix = self.logging.file_prefix,
        )
    }
}
