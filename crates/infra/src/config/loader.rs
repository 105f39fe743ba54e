//! Configuration loader
//!
//! Loads the client configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If the required ones are missing, falls back to a config file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `NLMARKET_USER_ID`: Account user id (required)
//! - `NLMARKET_SECRET`: Signing secret (required)
//! - `NLMARKET_INTEGRATION_ID`: Reseller integration id
//! - `NLMARKET_BASE_URL`: API base URL
//! - `NLMARKET_TIMEOUT_MS`: Per-attempt timeout in milliseconds
//! - `NLMARKET_MAX_RETRIES`: Retries after the first attempt
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./nlmarket.{json,toml}` then `./config.{json,toml}` (current working
//!    directory)
//! 2. The same names in each parent directory
//! 3. The same names next to the executable

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use nlmarket_domain::{ClientConfig, Credentials, MarketError, Result};

const REQUIRED_VARS: [&str; 2] = ["NLMARKET_USER_ID", "NLMARKET_SECRET"];

const FILE_NAMES: [&str; 4] = ["nlmarket.json", "nlmarket.toml", "config.json", "config.toml"];

/// Load configuration with automatic fallback strategy
///
/// Uses environment variables when both required ones are set; a malformed
/// optional variable is then reported, not skipped. Otherwise falls back to
/// loading from a config file.
///
/// # Errors
/// Returns a `Configuration` error if:
/// - An environment variable does not parse
/// - No config file is found when the environment is incomplete
/// - File format is invalid
/// - Required fields are missing
pub fn load() -> Result<ClientConfig> {
    if REQUIRED_VARS.iter().all(|key| env_opt(key).is_some()) {
        let config = load_from_env()?;
        tracing::info!("Configuration loaded from environment variables");
        return Ok(config);
    }

    tracing::debug!("Required environment variables missing, trying file");
    load_from_file(None)
}

/// Load configuration from environment variables
///
/// # Errors
/// Returns a `Configuration` error if `NLMARKET_USER_ID` or
/// `NLMARKET_SECRET` is missing, or an optional variable does not parse.
pub fn load_from_env() -> Result<ClientConfig> {
    let [user_id, secret] = REQUIRED_VARS;
    let user_id = env_var(user_id)?;
    let secret = env_var(secret)?;

    let mut credentials = Credentials::new(user_id, secret);
    if let Some(integration_id) = env_parse::<u64>("NLMARKET_INTEGRATION_ID")? {
        credentials = credentials.with_integration_id(integration_id);
    }

    let mut config = ClientConfig::new(credentials);
    if let Some(base_url) = env_opt("NLMARKET_BASE_URL") {
        config = config.with_base_url(base_url);
    }
    if let Some(timeout_ms) = env_parse::<u64>("NLMARKET_TIMEOUT_MS")? {
        config = config.with_timeout(Duration::from_millis(timeout_ms));
    }
    if let Some(max_retries) = env_parse::<u32>("NLMARKET_MAX_RETRIES")? {
        config = config.with_max_retries(max_retries);
    }

    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes the standard locations (see
/// [`probe_config_paths`]). Format is detected by extension.
///
/// # Errors
/// Returns a `Configuration` error if the file is missing, unreadable, or
/// not valid JSON/TOML for [`ClientConfig`].
pub fn load_from_file(path: Option<PathBuf>) -> Result<ClientConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(MarketError::configuration(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            MarketError::configuration("No config file found in any of the standard locations")
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| MarketError::configuration(format!("Failed to read config file: {}", e)))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<ClientConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| MarketError::configuration(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| MarketError::configuration(format!("Invalid JSON format: {}", e))),
        _ => Err(MarketError::configuration(format!("Unsupported config format: {}", extension))),
    }
}

/// Probe multiple paths for configuration files
///
/// Searches the working directory and each of its ancestors, then the
/// executable's directory, for `nlmarket.{json,toml}` and
/// `config.{json,toml}`.
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut dirs: Vec<PathBuf> = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        dirs.extend(cwd.ancestors().map(Path::to_path_buf));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            dirs.push(exe_dir.to_path_buf());
        }
    }

    find_in_dirs(&dirs)
}

fn find_in_dirs(dirs: &[PathBuf]) -> Option<PathBuf> {
    dirs.iter()
        .flat_map(|dir| FILE_NAMES.iter().map(move |name| dir.join(name)))
        .find(|path| path.is_file())
}

/// Get required environment variable
fn env_var(key: &str) -> Result<String> {
    env_opt(key).ok_or_else(|| {
        MarketError::configuration(format!("Missing required environment variable: {}", key))
    })
}

/// Optional variable; empty values count as unset
fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn env_parse<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    env_opt(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|e| MarketError::configuration(format!("Invalid {}: {}", key, e)))
        })
        .transpose()
}
