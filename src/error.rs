use std::fmt;

use reqwest::StatusCode;

/// Errors raised by the playlist and credit lookups.
///
/// Transport failures from reqwest are propagated as they are; this enum covers
/// the cases where a request technically succeeded but the run cannot go on.
#[derive(Debug)]
pub enum PlcreditsError {
    /// The input could not be turned into a playlist id.
    InvalidPlaylistUrl(String),
    /// The playlist exists but yielded zero tracks.
    NoTracksFound(String),
    /// A required environment variable is not set.
    MissingConfig(String),
    /// A remote API answered with a non-success status.
    Http {
        status: StatusCode,
        retry_after: Option<u64>,
        body: String,
    },
}

impl PlcreditsError {
    /// Whether a retry of the failed request has a chance to succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            PlcreditsError::Http { status, .. } => {
                *status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
            }
            _ => false,
        }
    }
}

impl fmt::Display for PlcreditsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlcreditsError::InvalidPlaylistUrl(url) => {
                write!(f, "'{}' does not contain a playlist id", url)
            }
            PlcreditsError::NoTracksFound(id) => {
                write!(f, "no tracks found in playlist {}", id)
            }
            PlcreditsError::MissingConfig(name) => write!(f, "{} must be set", name),
            PlcreditsError::Http { status, body, .. } => {
                write!(f, "request failed with status {}: {}", status, body)
            }
        }
    }
}

impl std::error::Error for PlcreditsError {}
