//! Configuration management
//!
//! Settings are read once at startup from a structured file (`config.yaml` in
//! the working directory by default) and passed by reference to the components
//! that need them. Files ending in `.toml` are parsed as TOML, everything else
//! as YAML.
//!
//! `${VAR_NAME}` references inside the file are replaced with the value of the
//! environment variable before parsing. Unset variables expand to an empty
//! string.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};

/// Default configuration file name, resolved against the working directory
pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Main configuration for the relay
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// LINE Messaging API settings
    pub line: LineConfig,

    /// OpenAI-compatible completion API settings
    pub openai: OpenAiConfig,

    /// Webhook server settings
    #[serde(default)]
    pub server: ServerConfig,
}

/// LINE channel configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineConfig {
    /// Channel access token used for the reply API
    pub channel_access_token: String,

    /// Channel secret used to verify webhook signatures
    pub channel_secret: String,

    /// Messaging API base URL
    #[serde(default = "default_line_api_base_url")]
    pub api_base_url: String,

    /// Reply API request timeout in seconds
    #[serde(default = "default_line_timeout_secs")]
    pub timeout_secs: u64,
}

/// Completion API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiConfig {
    /// Base URL, e.g. `https://api.openai.com/v1`
    pub base_url: String,

    /// API key sent as a bearer token
    pub api_key: String,

    /// Model identifier
    pub model: String,

    /// Completion request timeout in seconds
    #[serde(default = "default_openai_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind the webhook server to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port for the webhook server
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// `host:port` string suitable for `TcpListener::bind`
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn default_line_api_base_url() -> String {
    "https://api.line.me/v2".to_string()
}

fn default_line_timeout_secs() -> u64 {
    30
}

fn default_openai_timeout_secs() -> u64 {
    120
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Config {
    /// Expand `${VAR_NAME}` references with environment variable values
    fn expand_env_vars(value: &str) -> String {
        let mut result = String::new();
        let mut chars = value.chars().peekable();

        while let Some(c) = chars.next() {
            if c == '$' && chars.peek() == Some(&'{') {
                chars.next();

                let mut var_name = String::new();
                for c in chars.by_ref() {
                    if c == '}' {
                        break;
                    }
                    var_name.push(c);
                }

                if let Ok(env_value) = std::env::var(&var_name) {
                    result.push_str(&env_value);
                }
            } else {
                result.push(c);
            }
        }

        result
    }

    /// Parse a YAML document
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let expanded = Self::expand_env_vars(content);
        serde_yaml::from_str(&expanded)
            .map_err(|e| Error::Config(format!("Failed to parse YAML: {}", e)))
    }

    /// Parse a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let expanded = Self::expand_env_vars(content);
        toml::from_str(&expanded)
            .map_err(|e| Error::Config(format!("Failed to parse TOML: {}", e)))
    }

    /// Load and validate configuration from a file
    ///
    /// The format is chosen from the extension: `.toml` is TOML, anything
    /// else is YAML.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;

        let is_toml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

        let config = if is_toml {
            Self::from_toml_str(&content)?
        } else {
            Self::from_yaml_str(&content)?
        };

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from `config.yaml` in the working directory
    pub fn load() -> Result<Self> {
        let path = std::env::current_dir()?.join(DEFAULT_CONFIG_PATH);
        Self::from_file(path)
    }

    /// Reject settings that would make every request fail
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("line.channel_access_token", &self.line.channel_access_token),
            ("line.channel_secret", &self.line.channel_secret),
            ("openai.base_url", &self.openai.base_url),
            ("openai.api_key", &self.openai.api_key),
            ("openai.model", &self.openai.model),
        ];

        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(Error::Config(format!("{} is not set", name)));
            }
        }

        Ok(())
    }
}
