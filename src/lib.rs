//! Playlist Credits Library
//!
//! This library collects songwriter, producer and performer credits for the
//! tracks of a Spotify playlist. Tracks are read from the Spotify Web API, each
//! track is looked up in the Muso credit database, and the results are reshaped
//! into a detailed credit table and a per-track summary table that can be
//! exported as CSV.
//!
//! # Modules
//!
//! - `api` - HTTP handlers for the local web form
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `credits` - Credit matching, batch processing and table formatting
//! - `error` - Domain error type
//! - `export` - CSV rendering and report files
//! - `management` - State of the web form's analysis job
//! - `muso` - Muso credit API client
//! - `server` - Local HTTP server for the web form
//! - `spotify` - Spotify Web API client implementation
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use plcredits::{config, cli};
//!
//! #[tokio::main]
//! async fn main() -> plcredits::Res<()> {
//!     config::load_env().await?;
//!     let settings = config::Settings::from_env()?;
//!     cli::analyze(&settings, "https://open.spotify.com/playlist/abc".into(), None, false).await;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod credits;
pub mod error;
pub mod export;
pub mod management;
pub mod muso;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Provides a standard error handling pattern throughout the application
/// using a boxed dynamic error trait object. This allows for flexible
/// error handling while maintaining Send + Sync bounds for async contexts.
///
/// # Example
///
/// ```
/// use plcredits::Res;
///
/// async fn fetch_data() -> Res<String> {
///     Ok("data".to_string())
/// }
/// ```
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Fetching playlist tracks...");
/// info!("Found {} tracks", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// Used to provide positive feedback when operations complete successfully.
///
/// # Example
///
/// ```
/// success!("Saved detailed credits to {}", path.display());
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Terminates the program with exit code 1. Only used for unrecoverable
/// startup errors such as missing credentials, never inside a running batch.
///
/// # Example
///
/// ```
/// error!("Missing required environment variable: {}", var_name);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable issues: a track without credits, a retried request,
/// a playlist where nothing could be matched.
///
/// # Example
///
/// ```
/// warning!("No matching track found for: {}", track.name);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
