//! # Credits Module
//!
//! The core of plcredits: turning a list of playlist tracks into credit
//! tables.
//!
//! ```text
//! Vec<Track>
//!     ↓ batch::run            (sequential, fixed delay between tracks)
//! resolver::resolve per track (search → strict match → credits → rows)
//!     ↓
//! BatchOutcome { rows, unmatched }
//!     ↓ formatter::format
//! FormattedTable (Song, Artist, Writer 1..N, Producer 1..M)
//! ```
//!
//! Unmatched tracks travel as data through every stage. Nothing here keeps
//! state between runs.

pub mod batch;
pub mod formatter;
pub mod resolver;

use std::future::Future;

pub use batch::{BatchOptions, BatchOutcome};
pub use formatter::format;
pub use resolver::{Resolution, resolve};

use crate::{
    Res, info,
    spotify::SpotifyClient,
    types::{CreditCandidate, CreditGroup, Progress, Report, Track},
    warning,
};

/// Source of credit data, implemented by [`crate::muso::MusoClient`].
pub trait CreditCatalog {
    /// Track search by keyword, at most `limit` candidates in ranking order.
    fn search(
        &self,
        keyword: &str,
        limit: u32,
    ) -> impl Future<Output = Res<Vec<CreditCandidate>>> + Send;

    /// Credit groups for one candidate id.
    fn credits(&self, track_id: &str) -> impl Future<Output = Res<Vec<CreditGroup>>> + Send;
}

/// Runs the full pipeline for one playlist.
///
/// # Errors
///
/// Only the playlist lookup can fail the run. Credit lookups that fail are
/// reported as unmatched tracks inside the returned [`Report`].
pub async fn analyze<C, F>(
    spotify: &SpotifyClient,
    catalog: &C,
    playlist_url: &str,
    options: &BatchOptions,
    on_progress: F,
) -> Res<Report>
where
    C: CreditCatalog + Sync,
    F: FnMut(&Progress),
{
    let tracks = spotify.list_tracks(playlist_url).await?;
    info!("Found {} tracks in the playlist", tracks.len());

    let outcome = batch::run(catalog, &tracks, options, on_progress).await;
    Ok(build_report(playlist_url, &tracks, outcome))
}

/// Assembles the report for a finished batch.
pub fn build_report(playlist_url: &str, tracks: &[Track], outcome: BatchOutcome) -> Report {
    if outcome.rows.is_empty() {
        warning!("No track credits loaded. Please try again later.");
    } else if !outcome.unmatched.is_empty() {
        warning!(
            "Could not find credits for {} of {} tracks",
            outcome.unmatched.len(),
            tracks.len()
        );
    }

    let formatted = formatter::format(&outcome.rows, &outcome.unmatched);
    Report {
        playlist_url: playlist_url.to_string(),
        tracks_total: tracks.len(),
        detailed: outcome.rows,
        formatted,
        unmatched: outcome.unmatched,
    }
}
