use std::{cmp::Ordering, future::Future, time::Duration};

use reqwest::{Response, header::RETRY_AFTER};
use tokio::time::sleep;

use crate::{Res, error::PlcreditsError, types::CreditRow, warning};

/// Longest `Retry-After` we are willing to wait for inside a batch.
pub const MAX_RETRY_AFTER_SECS: u64 = 120;

/// Extracts the playlist id from a Spotify playlist URL or URI.
///
/// The id is the path segment following `playlist/`, with any query string
/// or fragment removed. `spotify:playlist:<id>` URIs and bare ids are
/// accepted as well. A URL that ends right after `playlist/` has no id.
pub fn parse_playlist_id(input: &str) -> Result<String, PlcreditsError> {
    let trimmed = input.trim();
    let candidate = match trimmed.strip_prefix("spotify:playlist:") {
        Some(id) => id,
        None => {
            let without_fragment = trimmed.split('#').next().unwrap_or_default();
            let path = without_fragment.split('?').next().unwrap_or_default();
            match path.rsplit_once("playlist/") {
                Some((_, rest)) => rest.split('/').next().unwrap_or_default(),
                None => path.rsplit('/').next().unwrap_or_default(),
            }
        }
    };

    if candidate.is_empty() || !candidate.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(PlcreditsError::InvalidPlaylistUrl(input.to_string()));
    }
    Ok(candidate.to_string())
}

/// Lowercases and trims, the comparison form for titles, albums and artists.
pub fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Removes exact duplicate rows, keeping the first occurrence.
pub fn remove_duplicate_rows(rows: &mut Vec<CreditRow>) {
    let mut unique: Vec<CreditRow> = Vec::with_capacity(rows.len());
    for row in rows.drain(..) {
        if !unique.contains(&row) {
            unique.push(row);
        }
    }
    *rows = unique;
}

/// Sorts rows ascending by track, role and name.
///
/// The formatter numbers writer and producer columns in this order.
pub fn sort_credit_rows(rows: &mut [CreditRow]) {
    rows.sort_by(|a, b| match a.track.cmp(&b.track) {
        Ordering::Equal => match a.role.cmp(&b.role) {
            Ordering::Equal => a.name.cmp(&b.name),
            other => other,
        },
        other => other,
    });
}

/// Turns a non-success response into [`PlcreditsError::Http`].
pub async fn ensure_success(response: Response) -> Res<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let retry_after = response
        .headers()
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok());
    let body = response.text().await.unwrap_or_default();

    Err(Box::new(PlcreditsError::Http {
        status,
        retry_after,
        body,
    }))
}

/// How often and how patiently a remote call is retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 3,
            initial_delay: Duration::from_secs(4),
            max_delay: Duration::from_secs(10),
        }
    }
}

impl RetryPolicy {
    /// Same attempt count without any waiting in between.
    pub fn immediate(attempts: u32) -> Self {
        Self {
            attempts,
            initial_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
        }
    }

    /// Delay after the `failed_attempt`-th failure (1-based).
    pub fn delay_for(&self, failed_attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(failed_attempt.saturating_sub(1));
        self.initial_delay.saturating_mul(factor).min(self.max_delay)
    }
}

/// Runs `operation` until it succeeds, fails permanently, or the policy's
/// attempts are used up.
///
/// Transport errors, 429 and 5xx answers are retried with exponential backoff.
/// A `Retry-After` header replaces the backoff delay as long as it stays
/// within [`MAX_RETRY_AFTER_SECS`].
pub async fn retry<T, F, Fut>(policy: &RetryPolicy, operation_name: &str, mut operation: F) -> Res<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Res<T>>,
{
    let mut attempt: u32 = 1;

    loop {
        let err = match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };

        if attempt >= policy.attempts || !is_retryable(err.as_ref()) {
            return Err(err);
        }

        let delay = match retry_after(err.as_ref()) {
            Some(secs) if secs <= MAX_RETRY_AFTER_SECS => Duration::from_secs(secs),
            Some(secs) => {
                warning!(
                    "Retry after has reached an abnormal high of {} seconds for {}. Giving up.",
                    secs,
                    operation_name
                );
                return Err(err);
            }
            None => policy.delay_for(attempt),
        };

        warning!(
            "{} failed (attempt {}/{}): {}. Retrying in {}s",
            operation_name,
            attempt,
            policy.attempts,
            err,
            delay.as_secs()
        );
        sleep(delay).await;
        attempt += 1;
    }
}

fn is_retryable(err: &(dyn std::error::Error + Send + Sync + 'static)) -> bool {
    if let Some(e) = err.downcast_ref::<PlcreditsError>() {
        return e.is_transient();
    }
    if let Some(e) = err.downcast_ref::<reqwest::Error>() {
        return !e.is_decode() && !e.is_builder();
    }
    false
}

fn retry_after(err: &(dyn std::error::Error + Send + Sync + 'static)) -> Option<u64> {
    match err.downcast_ref::<PlcreditsError>() {
        Some(PlcreditsError::Http { retry_after, .. }) => *retry_after,
        _ => None,
    }
}
