use std::time::Duration;

use tokio::time::sleep;

use crate::{
    config::{DEFAULT_RATE_LIMIT_DELAY_SECS, DEFAULT_SEARCH_LIMIT, Settings},
    types::{CreditRow, Progress, Track, UnmatchedTrack},
    warning,
};

use super::{
    CreditCatalog,
    resolver::{self, Resolution},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchOptions {
    /// Pause after every track except the last one.
    pub delay: Duration,
    pub search_limit: u32,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            delay: Duration::from_secs(DEFAULT_RATE_LIMIT_DELAY_SECS),
            search_limit: DEFAULT_SEARCH_LIMIT,
        }
    }
}

impl BatchOptions {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            delay: settings.rate_limit_delay,
            search_limit: settings.search_limit,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchOutcome {
    /// Rows of all matched tracks, in playlist order.
    pub rows: Vec<CreditRow>,
    /// Tracks without credits, in playlist order. Includes failed tracks.
    pub unmatched: Vec<UnmatchedTrack>,
    pub matched: usize,
    /// Tracks whose lookup errored out after retries.
    pub failed: usize,
}

/// Resolves every track in order, one at a time.
///
/// A failing track never stops the batch: the error is logged and the track is
/// listed as unmatched. `on_progress` is called after each attempt, before the
/// rate limit pause.
pub async fn run<C, F>(
    catalog: &C,
    tracks: &[Track],
    options: &BatchOptions,
    mut on_progress: F,
) -> BatchOutcome
where
    C: CreditCatalog + Sync,
    F: FnMut(&Progress),
{
    let total = tracks.len();
    let mut outcome = BatchOutcome::default();

    for (idx, track) in tracks.iter().enumerate() {
        match resolver::resolve(catalog, track, options.search_limit).await {
            Ok(Resolution::Matched(rows)) => {
                outcome.matched += 1;
                outcome.rows.extend(rows);
            }
            Ok(Resolution::Unmatched(unmatched)) => outcome.unmatched.push(unmatched),
            Err(e) => {
                warning!("Error processing track {}: {}", track.name, e);
                outcome.failed += 1;
                outcome.unmatched.push(UnmatchedTrack::from(track));
            }
        }

        on_progress(&Progress {
            index: idx + 1,
            total,
            track_name: track.name.clone(),
        });

        // the pause spaces out requests, so none is needed after the last track
        if idx + 1 < total && !options.delay.is_zero() {
            sleep(options.delay).await;
        }
    }

    outcome
}
