use std::{path::PathBuf, time::Duration};

use indicatif::{ProgressBar, ProgressStyle};
use tabled::{Table, builder::Builder};

use crate::{
    config::Settings,
    credits::{self, BatchOptions},
    error, export, info,
    muso::MusoClient,
    spotify::SpotifyClient,
    success,
    types::{FormattedTable, Progress},
    warning,
};

/// Runs the credit analysis for one playlist from the command line.
///
/// Shows a spinner while the playlist is read, then a progress bar over the
/// tracks. The summary table is printed when done and both CSV reports are
/// written to `out_dir` (current directory by default) unless `no_export` is
/// set.
///
/// # Error Handling
///
/// - HTTP client setup or playlist failures terminate with an error message
/// - Tracks without credits are listed as a warning, not an error
/// - Export failures are reported as a warning after the table is printed
pub async fn analyze(
    settings: &Settings,
    playlist_url: String,
    out_dir: Option<PathBuf>,
    no_export: bool,
) {
    let spotify = match SpotifyClient::from_settings(settings) {
        Ok(client) => client,
        Err(e) => error!("Cannot create Spotify client. Err: {}", e),
    };
    let muso = match MusoClient::from_settings(settings) {
        Ok(client) => client,
        Err(e) => error!("Cannot create Muso client. Err: {}", e),
    };
    let options = BatchOptions::from_settings(settings);

    let pb = ProgressBar::new_spinner();
    pb.set_message("Fetching playlist tracks...");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    let bar_style = ProgressStyle::with_template("{bar:40.blue/white} {pos}/{len} {msg}")
        .unwrap()
        .progress_chars("=> ");

    let on_progress = |p: &Progress| {
        if p.index == 1 {
            pb.set_style(bar_style.clone());
            pb.set_length(p.total as u64);
        }
        pb.set_position(p.index as u64);
        pb.set_message(format!("Processing track {}/{}: {}", p.index, p.total, p.track_name));
    };

    let report =
        match credits::analyze(&spotify, &muso, &playlist_url, &options, on_progress).await {
            Ok(report) => report,
            Err(e) => {
                pb.finish_and_clear();
                error!("Failed to analyze playlist {}. Err: {}", playlist_url, e);
            }
        };
    pb.finish_and_clear();

    println!("{}", summary_table(&report.formatted));

    if !report.unmatched.is_empty() {
        warning!(
            "Could not find credits for {} tracks:",
            report.unmatched.len()
        );
        println!("{}", Table::new(&report.unmatched));
    }

    if no_export {
        return;
    }

    let dir = out_dir.unwrap_or_else(|| PathBuf::from("."));
    info!("Writing reports to {}", dir.display());
    match export::write_reports(&report, &dir).await {
        Ok((detailed, formatted)) => {
            success!("Saved detailed credits to {}", detailed.display());
            success!("Saved formatted credits to {}", formatted.display());
        }
        Err(e) => warning!("Failed to write reports. Err: {}", e),
    }
}

fn summary_table(table: &FormattedTable) -> Table {
    let mut builder = Builder::default();
    builder.push_record(table.headers());
    for record in table.records() {
        builder.push_record(record.into_iter().map(String::from));
    }
    builder.build()
}
