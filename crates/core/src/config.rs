//! Configuration management for the FAQ Assistant.
//!
//! Configuration is merged from several sources, later ones winning:
//! - Built-in defaults
//! - A YAML config file (`faq-assistant.yaml`, or the path in `FAQ_CONFIG`)
//! - Environment variables
//! - Command-line flags (see [`AppConfig::with_overrides`])

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

/// Default config file name, looked up in the current directory.
pub const DEFAULT_CONFIG_FILE: &str = "faq-assistant.yaml";

/// Providers `faq-llm` knows how to build a client for.
pub const KNOWN_PROVIDERS: [&str; 2] = ["openai", "ollama"];

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Address the HTTP server binds to
    pub host: String,

    /// Port the HTTP server listens on
    pub port: u16,

    /// Path to the SQLite database holding both collections
    pub database: PathBuf,

    /// Directory searched for `index.html`
    pub templates_dir: PathBuf,

    /// Optional config file path
    pub config_file: Option<PathBuf>,

    /// LLM provider ("openai" or "ollama")
    pub provider: String,

    /// Model identifier sent with every generation request
    pub model: String,

    /// Custom LLM endpoint (base URL)
    pub endpoint: Option<String>,

    /// API key for the LLM provider
    pub api_key: Option<String>,

    /// Log level override
    pub log_level: Option<String>,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,
}

/// Full configuration file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ConfigFile {
    server: Option<ServerSection>,
    database: Option<DatabaseSection>,
    llm: Option<LlmSection>,
    logging: Option<LoggingSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ServerSection {
    host: Option<String>,
    port: Option<u16>,
    #[serde(rename = "templatesDir")]
    templates_dir: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct DatabaseSection {
    path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LlmSection {
    provider: Option<String>,
    model: Option<String>,
    endpoint: Option<String>,
    #[serde(rename = "apiKeyEnv")]
    api_key_env: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LoggingSection {
    level: Option<String>,
    color: Option<bool>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            database: PathBuf::from("faq_assistant.sqlite"),
            templates_dir: PathBuf::from("templates"),
            config_file: None,
            provider: "openai".to_string(),
            model: "gpt-4".to_string(),
            endpoint: None,
            api_key: None,
            log_level: None,
            verbose: false,
            no_color: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from a config file, environment variables and
    /// defaults.
    ///
    /// `config_file` takes precedence over `FAQ_CONFIG`; a named file must
    /// exist, while the default `faq-assistant.yaml` is optional.
    ///
    /// Environment variables:
    /// - `FAQ_CONFIG`: Path to config file
    /// - `FAQ_HOST`, `FAQ_PORT`: Listen address
    /// - `FAQ_DATABASE`: SQLite database path
    /// - `FAQ_PROVIDER`, `FAQ_MODEL`, `FAQ_LLM_ENDPOINT`: LLM backend
    /// - `OPENAI_API_KEY`: API key
    /// - `RUST_LOG`: Log level
    /// - `NO_COLOR`: Disable colored output
    pub fn load_from(config_file: Option<PathBuf>) -> AppResult<Self> {
        let mut config = Self {
            config_file: config_file
                .or_else(|| std::env::var("FAQ_CONFIG").ok().map(PathBuf::from)),
            ..Self::default()
        };

        let config_path = config
            .config_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

        let mut api_key_env = "OPENAI_API_KEY".to_string();
        if config_path.exists() {
            let (merged, key_env) = config.merge_yaml(&config_path)?;
            config = merged;
            if let Some(key_env) = key_env {
                api_key_env = key_env;
            }
        } else if config.config_file.is_some() {
            return Err(AppError::Config(format!(
                "Config file does not exist: {:?}",
                config_path
            )));
        }

        // Environment variables override YAML config
        if let Ok(host) = std::env::var("FAQ_HOST") {
            config.host = host;
        }

        if let Ok(port) = std::env::var("FAQ_PORT") {
            config.port = port
                .parse()
                .map_err(|e| AppError::Config(format!("Invalid FAQ_PORT '{}': {}", port, e)))?;
        }

        if let Ok(database) = std::env::var("FAQ_DATABASE") {
            config.database = PathBuf::from(database);
        }

        if let Ok(provider) = std::env::var("FAQ_PROVIDER") {
            config.provider = provider;
        }

        if let Ok(model) = std::env::var("FAQ_MODEL") {
            config.model = model;
        }

        if let Ok(endpoint) = std::env::var("FAQ_LLM_ENDPOINT") {
            config.endpoint = Some(endpoint);
        }

        config.api_key = std::env::var(&api_key_env).ok().filter(|k| !k.is_empty());

        if let Ok(level) = std::env::var("RUST_LOG") {
            config.log_level = Some(level);
        }

        if std::env::var("NO_COLOR").is_ok() {
            config.no_color = true;
        }

        Ok(config)
    }

    /// Merge a YAML configuration file into this config.
    ///
    /// Returns the merged config and the API key environment variable name,
    /// if the file names one.
    fn merge_yaml(&self, path: &Path) -> AppResult<(Self, Option<String>)> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        self.merge_yaml_str(&contents).map_err(|e| {
            AppError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })
    }

    fn merge_yaml_str(&self, contents: &str) -> AppResult<(Self, Option<String>)> {
        // An empty file deserializes to unit, not to an empty mapping
        let config_file: ConfigFile = if contents.trim().is_empty() {
            ConfigFile::default()
        } else {
            serde_yaml::from_str(contents)?
        };

        let mut result = self.clone();
        let mut api_key_env = None;

        if let Some(server) = config_file.server {
            if let Some(host) = server.host {
                result.host = host;
            }
            if let Some(port) = server.port {
                result.port = port;
            }
            if let Some(dir) = server.templates_dir {
                result.templates_dir = PathBuf::from(dir);
            }
        }

        if let Some(path) = config_file.database.and_then(|db| db.path) {
            result.database = PathBuf::from(path);
        }

        if let Some(llm) = config_file.llm {
            if let Some(provider) = llm.provider {
                result.provider = provider;
            }
            if let Some(model) = llm.model {
                result.model = model;
            }
            if llm.endpoint.is_some() {
                result.endpoint = llm.endpoint;
            }
            api_key_env = llm.api_key_env;
        }

        if let Some(logging) = config_file.logging {
            if let Some(level) = logging.level {
                result.log_level = Some(level);
            }
            if let Some(color) = logging.color {
                result.no_color = !color;
            }
        }

        Ok((result, api_key_env))
    }

    /// Apply CLI overrides to the configuration.
    ///
    /// CLI flags take precedence over environment variables and the config
    /// file.
    #[allow(clippy::too_many_arguments)]
    pub fn with_overrides(
        mut self,
        host: Option<String>,
        port: Option<u16>,
        database: Option<PathBuf>,
        provider: Option<String>,
        model: Option<String>,
        log_level: Option<String>,
        verbose: bool,
        no_color: bool,
    ) -> Self {
        if let Some(host) = host {
            self.host = host;
        }

        if let Some(port) = port {
            self.port = port;
        }

        if let Some(database) = database {
            self.database = database;
        }

        if let Some(provider) = provider {
            self.provider = provider;
        }

        if let Some(model) = model {
            self.model = model;
        }

        if let Some(log_level) = log_level {
            self.log_level = Some(log_level);
        }

        if verbose {
            self.verbose = true;
            // Verbose mode implies debug logging
            if self.log_level.is_none() {
                self.log_level = Some("debug".to_string());
            }
        }

        if no_color {
            self.no_color = true;
        }

        self
    }

    /// The `host:port` string the server binds to.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Validate the merged configuration.
    ///
    /// A missing API key is deliberately not an error: generation then fails
    /// per request and the caller receives the fallback answer.
    pub fn validate(&self) -> AppResult<()> {
        if !KNOWN_PROVIDERS.contains(&self.provider.to_lowercase().as_str()) {
            return Err(AppError::Config(format!(
                "Unknown provider: {}. Supported: {}",
                self.provider,
                KNOWN_PROVIDERS.join(", ")
            )));
        }

        if self.port == 0 {
            return Err(AppError::Config("Port must be non-zero".to_string()));
        }

        if self.model.trim().is_empty() {
            return Err(AppError::Config("Model identifier is empty".to_string()));
        }

        if self.provider.eq_ignore_ascii_case("openai") && self.api_key.is_none() {
            tracing::warn!("No API key configured; LLM fallback answers will be unavailable");
        }

        Ok(())
    }
}
