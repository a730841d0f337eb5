//! Configuration management for the playlist credits analyzer.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and `.env` files. Credentials for the Spotify Web API and the Muso
//! credit API are required; everything else has a default.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (where applicable)

use std::{env, path::PathBuf, str::FromStr, time::Duration};

use crate::{Res, error::PlcreditsError};

pub const DEFAULT_SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_SPOTIFY_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_MUSO_API_URL: &str = "https://api.developer.muso.ai/v4";
pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8501";
pub const DEFAULT_RATE_LIMIT_DELAY_SECS: u64 = 2;
pub const DEFAULT_SEARCH_LIMIT: u32 = 10;
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Creates the directory structure if it doesn't exist and loads variables
/// from `plcredits/.env` under the platform-specific local data directory:
/// - Linux: `~/.local/share/plcredits/.env`
/// - macOS: `~/Library/Application Support/plcredits/.env`
/// - Windows: `%LOCALAPPDATA%/plcredits/.env`
///
/// A missing `.env` file is not an error, since every value can also come from
/// the process environment.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or an existing `.env`
/// file cannot be parsed.
pub async fn load_env() -> Result<(), String> {
    let path = env_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }
    Ok(())
}

/// Location of the `.env` file read by [`load_env`].
pub fn env_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("plcredits/.env");
    path
}

/// Runtime settings, resolved once at startup.
#[derive(Debug, Clone)]
pub struct Settings {
    pub spotify_client_id: String,
    pub spotify_client_secret: String,
    pub spotify_api_url: String,
    pub spotify_token_url: String,
    pub muso_api_key: String,
    pub muso_api_url: String,
    pub server_address: String,
    pub rate_limit_delay: Duration,
    pub search_limit: u32,
    pub http_timeout: Duration,
}

impl Settings {
    /// Reads all settings from the environment.
    ///
    /// # Errors
    ///
    /// Fails with [`PlcreditsError::MissingConfig`] when a credential is unset,
    /// or with a parse error when a numeric variable is malformed.
    pub fn from_env() -> Res<Self> {
        Ok(Self {
            spotify_client_id: required("SPOTIFY_CLIENT_ID")?,
            spotify_client_secret: required("SPOTIFY_CLIENT_SECRET")?,
            spotify_api_url: optional("SPOTIFY_API_URL", DEFAULT_SPOTIFY_API_URL),
            spotify_token_url: optional("SPOTIFY_API_TOKEN_URL", DEFAULT_SPOTIFY_TOKEN_URL),
            muso_api_key: required("MUSO_API_KEY")?,
            muso_api_url: optional("MUSO_API_URL", DEFAULT_MUSO_API_URL),
            server_address: optional("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS),
            rate_limit_delay: Duration::from_secs(parsed(
                "RATE_LIMIT_DELAY_SECS",
                DEFAULT_RATE_LIMIT_DELAY_SECS,
            )?),
            search_limit: parsed("SEARCH_LIMIT", DEFAULT_SEARCH_LIMIT)?,
            http_timeout: Duration::from_secs(parsed(
                "HTTP_TIMEOUT_SECS",
                DEFAULT_HTTP_TIMEOUT_SECS,
            )?),
        })
    }

    /// Builds the shared HTTP client with the configured request timeout.
    pub fn http_client(&self) -> Res<reqwest::Client> {
        Ok(reqwest::Client::builder()
            .timeout(self.http_timeout)
            .build()?)
    }
}

fn required(name: &str) -> Result<String, PlcreditsError> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(PlcreditsError::MissingConfig(name.to_string())),
    }
}

fn optional(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn parsed<T>(name: &str, default: T) -> Res<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<T>()
            .map_err(|e| format!("{} has an invalid value '{}': {}", name, raw, e).into()),
        _ => Ok(default),
    }
}
