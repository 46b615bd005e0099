//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Solver configuration.
    #[serde(default)]
    pub solver: SolverConfig,
    /// Result cache configuration.
    #[serde(default)]
    pub cache: CacheConfig,
    /// Logging configuration.
    #[serde(default)]
    pub log: LogConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Overall request timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    /// Maximum accepted request body size in bytes.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_request_timeout() -> u64 {
    30
}

fn default_max_body_bytes() -> usize {
    64 * 1024
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout_secs: default_request_timeout(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

/// Solver configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SolverConfig {
    /// Fixed number of decimal places for the smallest unit.
    ///
    /// When unset the scale is inferred from the inputs of each request.
    #[serde(default)]
    pub scale: Option<u32>,
    /// Largest scale accepted, fixed or inferred.
    #[serde(default = "default_max_scale")]
    pub max_scale: u32,
    /// Ceiling on DP table entries (target units + 1).
    #[serde(default = "default_max_table_entries")]
    pub max_table_entries: usize,
    /// Ceiling on distinct denominations per request.
    #[serde(default = "default_max_denominations")]
    pub max_denominations: usize,
}

fn default_max_scale() -> u32 {
    8
}

fn default_max_table_entries() -> usize {
    1_000_000
}

fn default_max_denominations() -> usize {
    256
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            scale: None,
            max_scale: default_max_scale(),
            max_table_entries: default_max_table_entries(),
            max_denominations: default_max_denominations(),
        }
    }
}

/// Result cache configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// Whether solved requests are cached.
    #[serde(default = "default_cache_enabled")]
    pub enabled: bool,
    /// Maximum number of cached entries.
    #[serde(default = "default_cache_capacity")]
    pub capacity: u64,
    /// Time-to-live per entry in seconds.
    #[serde(default = "default_cache_ttl")]
    pub ttl_secs: u64,
}

fn default_cache_enabled() -> bool {
    true
}

fn default_cache_capacity() -> u64 {
    1000
}

fn default_cache_ttl() -> u64 {
    300 // 5 minutes
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: default_cache_enabled(),
            capacity: default_cache_capacity(),
            ttl_secs: default_cache_ttl(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// Default `EnvFilter` directive, used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,
    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

fn default_log_filter() -> String {
    "coinchange=info,tower_http=info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("COINCHANGE").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
