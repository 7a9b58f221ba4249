use crate::domain::error::GatewayError;
use crate::domain::model::ProviderId;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_provider")]
    pub default_provider: ProviderId,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: Logging,
    #[serde(default)]
    pub xai: XaiConfig,
    #[serde(default)]
    pub claude: ClaudeConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Logging {
    #[serde(default = "default_enable")]
    pub enable: bool,
    pub path: Option<String>,
    #[serde(default = "default_log_level")]
    pub level: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct XaiConfig {
    pub api_key: Option<String>,
    #[serde(default = "default_xai_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default = "default_xai_base_url")]
    pub base_url: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ClaudeConfig {
    pub api_key: Option<String>,
    #[serde(default = "default_claude_model")]
    pub model: String,
    #[serde(default = "default_claude_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default = "default_claude_base_url")]
    pub base_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_provider: default_provider(),
            request_timeout_secs: default_request_timeout_secs(),
            server: ServerConfig::default(),
            logging: Logging::default(),
            xai: XaiConfig::default(),
            claude: ClaudeConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            enable: true,
            path: None,
            level: "INFO".to_string(),
        }
    }
}

impl Logging {
    /// `EnvFilter` directive for the configured level; unknown levels mean info.
    pub fn filter_directive(&self) -> &'static str {
        match self.level.trim().to_uppercase().as_str() {
            "TRACE" => "trace",
            "DEBUG" => "debug",
            "INFO" => "info",
            "WARN" => "warn",
            "ERROR" => "error",
            _ => "info",
        }
    }
}

impl Default for XaiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_xai_model(),
            temperature: default_temperature(),
            base_url: default_xai_base_url(),
        }
    }
}

impl Default for ClaudeConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_claude_model(),
            max_tokens: default_claude_max_tokens(),
            temperature: default_temperature(),
            base_url: default_claude_base_url(),
        }
    }
}

// Defaults
fn default_provider() -> ProviderId {
    ProviderId::Xai
}
fn default_request_timeout_secs() -> u64 {
    60
}
fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    3000
}
fn default_enable() -> bool {
    true
}
fn default_log_level() -> String {
    "INFO".to_string()
}
fn default_temperature() -> f64 {
    0.2
}
fn default_xai_model() -> String {
    "grok-3-mini".to_string()
}
fn default_xai_base_url() -> String {
    "https://api.x.ai".to_string()
}
fn default_claude_model() -> String {
    "claude-3-5-haiku-latest".to_string()
}
fn default_claude_max_tokens() -> u32 {
    1024
}
fn default_claude_base_url() -> String {
    "https://api.anthropic.com".to_string()
}

impl Config {
    /// Overlay environment variables on top of file/default values.
    ///
    /// `lookup` is usually `|key| std::env::var(key).ok()`; tests pass a map.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        if let Some(port) = parse_env(&get, "PORT") {
            self.server.port = port;
        }
        if let Some(host) = get("HOST") {
            self.server.host = host;
        }
        if let Some(raw) = get("DEFAULT_PROVIDER") {
            match ProviderId::parse(&raw) {
                Some(id) => self.default_provider = id,
                None => eprintln!(
                    "Warning: DEFAULT_PROVIDER={} is not a known provider. Keeping {}.",
                    raw, self.default_provider
                ),
            }
        }
        if let Some(secs) = parse_env(&get, "REQUEST_TIMEOUT_SECS") {
            self.request_timeout_secs = secs;
        }

        if let Some(key) = get("XAI_API_KEY") {
            self.xai.api_key = Some(key);
        }
        if let Some(model) = get("XAI_MODEL") {
            self.xai.model = model;
        }
        if let Some(temperature) = parse_env(&get, "XAI_TEMPERATURE") {
            self.xai.temperature = temperature;
        }
        if let Some(url) = get("XAI_BASE_URL") {
            self.xai.base_url = url;
        }

        if let Some(key) = get("ANTHROPIC_API_KEY") {
            self.claude.api_key = Some(key);
        }
        if let Some(model) = get("ANTHROPIC_MODEL") {
            self.claude.model = model;
        }
        if let Some(max_tokens) = parse_env(&get, "ANTHROPIC_MAX_TOKENS") {
            self.claude.max_tokens = max_tokens;
        }
        if let Some(temperature) = parse_env(&get, "ANTHROPIC_TEMPERATURE") {
            self.claude.temperature = temperature;
        }
        if let Some(url) = get("ANTHROPIC_BASE_URL") {
            self.claude.base_url = url;
        }
    }
}

fn parse_env<T, G>(get: &G, key: &str) -> Option<T>
where
    T: FromStr,
    G: Fn(&str) -> Option<String>,
{
    let raw = get(key)?;
    match raw.parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            eprintln!("Warning: Ignoring {}={}: not a valid number.", key, raw);
            None
        }
    }
}

pub fn get_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("translate-gateway").join("config.toml"))
}

/// Load config from `path` (or the default location), then overlay the process environment.
pub fn load_config(path: Option<&Path>) -> Result<Config, GatewayError> {
    let resolved = path.map(Path::to_path_buf).or_else(get_config_path);
    let mut config = read_config_file(resolved.as_deref())?;
    config.apply_env(|key| std::env::var(key).ok());
    Ok(config)
}

/// Read the TOML file alone, without the environment overlay.
///
/// A missing or unparsable file yields the defaults.
pub fn read_config_file(path: Option<&Path>) -> Result<Config, GatewayError> {
    if let Some(path) = path {
        if path.exists() {
            let content = fs::read_to_string(path)?;
            match toml::from_str::<Config>(&content) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    eprintln!(
                        "Warning: Failed to parse config file: {}. Using defaults.",
                        e
                    );
                }
            }
        }
    }

    Ok(Config::default())
}

pub fn generate_config_sample(path: Option<&Path>) -> Result<PathBuf, GatewayError> {
    let path = match path.map(Path::to_path_buf).or_else(get_config_path) {
        Some(path) => path,
        None => {
            return Err(GatewayError::ConfigFile(
                "Cannot determine config directory".to_string(),
            ))
        }
    };

    if path.exists() {
        eprintln!("Config file already exists at: {}", path.display());
        return Ok(path);
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let sample = Config::default();
    let toml_content = toml::to_string_pretty(&sample)
        .map_err(|e| GatewayError::ConfigFile(format!("Failed to serialize config: {}", e)))?;
    fs::write(&path, toml_content)
        .map_err(|e| GatewayError::ConfigFile(format!("Failed to write config file: {}", e)))?;
    println!("Generated config file at: {}", path.display());

    Ok(path)
}
