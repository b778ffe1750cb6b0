//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If incomplete, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//! 5. Falls back to built-in defaults (local Ollama) when neither source
//!    is available
//!
//! ## Environment Variables
//! - `FORESIGHT_LLM_HOST`: Base URL of the Ollama-compatible server
//! - `FORESIGHT_LLM_MODEL`: Model name
//! - `FORESIGHT_LLM_TEMPERATURE`: Sampling temperature (optional)
//! - `FORESIGHT_LLM_TIMEOUT_SECS`: Explanation call timeout (optional)
//! - `FORESIGHT_SESSION_MAX`: Maximum retained sessions (optional)
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.json` or `./config.toml` (current working directory)
//! 2. `./foresight.json` or `./foresight.toml` (current working directory)
//! 3. `../config.json` or `../config.toml` (parent directory)
//! 4. `../../config.json` or `../../config.toml` (grandparent directory)
//! 5. Relative to executable location

use std::path::{Path, PathBuf};

use foresight_domain::{Config, ForesightError, LlmConfig, Result, SessionConfig};

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables, then from a config
/// file, and finally falls back to the built-in defaults.
pub fn load() -> Result<Config> {
    // .env files are a development convenience; absence is fine
    dotenvy::dotenv().ok();

    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            return Ok(config);
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
        }
    }

    match load_from_file(None) {
        Ok(config) => Ok(config),
        Err(e) => {
            tracing::info!(error = ?e, "No configuration source found, using defaults");
            Ok(Config::default())
        }
    }
}

/// Load configuration from environment variables
///
/// `FORESIGHT_LLM_HOST` and `FORESIGHT_LLM_MODEL` must be present; the
/// remaining variables default when unset.
///
/// # Errors
/// Returns `ForesightError::Config` if required variables are missing
/// or have invalid values.
pub fn load_from_env() -> Result<Config> {
    let host = env_var("FORESIGHT_LLM_HOST")?;
    let model = env_var("FORESIGHT_LLM_MODEL")?;

    let defaults = LlmConfig::default();
    let temperature = env_parsed("FORESIGHT_LLM_TEMPERATURE", defaults.temperature)?;
    let timeout_seconds = env_parsed("FORESIGHT_LLM_TIMEOUT_SECS", defaults.timeout_seconds)?;
    let max_sessions =
        env_parsed("FORESIGHT_SESSION_MAX", SessionConfig::default().max_sessions)?;

    Ok(Config {
        llm: LlmConfig { host, model, temperature, timeout_seconds },
        session: SessionConfig { max_sessions },
    })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `ForesightError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(ForesightError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            ForesightError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| ForesightError::Config(format!("Failed to read config file: {}", e)))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| ForesightError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| ForesightError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(ForesightError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Probe multiple paths for configuration files
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    // Try current working directory
    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(vec![
            cwd.join("config.json"),
            cwd.join("config.toml"),
            cwd.join("foresight.json"),
            cwd.join("foresight.toml"),
            cwd.join("../config.json"),
            cwd.join("../config.toml"),
            cwd.join("../../config.json"),
            cwd.join("../../config.toml"),
        ]);
    }

    // Try relative to executable
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(vec![
                exe_dir.join("config.json"),
                exe_dir.join("config.toml"),
                exe_dir.join("foresight.json"),
                exe_dir.join("foresight.toml"),
            ]);
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

/// Get required environment variable
fn env_var(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| {
        ForesightError::Config(format!("Missing required environment variable: {}", key))
    })
}

/// Parse an optional environment variable, falling back to `default`.
fn env_parsed<T: std::str::FromStr>(key: &str, default: T) -> Result<T> {
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .map_err(|_| ForesightError::Config(format!("Invalid value for {}: {}", key, raw))),
        Err(_) => Ok(default),
    }
}
