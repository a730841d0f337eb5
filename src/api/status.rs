use axum::{
    Extension,
    response::{Html, Json},
};
use serde_json::{Value, json};

use crate::{
    export,
    management::JobState,
    server::ApiContext,
    types::Report,
};

use super::page;

const TITLE: &str = "Spotify Playlist Credits Analyzer";

pub async fn status(Extension(context): Extension<ApiContext>) -> Html<String> {
    let jobs = context.jobs.lock().await;

    let html = match jobs.state() {
        JobState::Idle => page::layout(
            TITLE,
            r#"<p class="info">No analysis has been started yet.</p><p><a class="button" href="/">New analysis</a></p>"#,
            None,
        ),
        JobState::Running {
            playlist_url,
            progress,
            ..
        } => {
            let (status_line, bar) = match progress {
                Some(p) => (
                    format!(
                        "Processing track {}/{}: {}",
                        p.index,
                        p.total,
                        page::escape(&p.track_name)
                    ),
                    format!(r#"<progress value="{}" max="{}"></progress>"#, p.index, p.total),
                ),
                None => (
                    "Fetching playlist tracks...".to_string(),
                    "<progress></progress>".to_string(),
                ),
            };

            let body = format!(
                r#"<p class="info">Analyzing {url}</p>{bar}<p>{status}</p>"#,
                url = page::escape(playlist_url),
                bar = bar,
                status = status_line
            );
            page::layout(TITLE, &body, Some(2))
        }
        JobState::Finished { report, .. } => page::layout(TITLE, &finished_body(report), None),
        JobState::Failed {
            playlist_url,
            error,
            ..
        } => {
            let body = format!(
                r#"{}<p><a class="button" href="/">Try again</a></p>"#,
                page::warning(&format!(
                    "An error occurred while analyzing {}: {}",
                    playlist_url, error
                ))
            );
            page::layout(TITLE, &body, None)
        }
    };

    Html(html)
}

fn finished_body(report: &Report) -> String {
    let mut body = String::new();

    if report.detailed.is_empty() {
        body.push_str(&page::warning(
            "No track credits loaded. Please try again later.",
        ));
    } else {
        body.push_str(r#"<p class="success">Analysis complete! Here are the results:</p>"#);
    }

    if !report.unmatched.is_empty() {
        body.push_str(&page::warning(&format!(
            "Could not find credits for {} tracks",
            report.unmatched.len()
        )));
    }

    body.push_str("<h2>All Tracks</h2>");
    body.push_str(&page::table_html(&report.formatted));

    body.push_str("<h3>Download Results</h3><p>");
    match export::formatted_csv(&report.formatted) {
        Ok(csv) => body.push_str(&page::csv_data_link(&csv, export::FORMATTED_FILE_NAME)),
        Err(e) => body.push_str(&page::warning(&format!("Cannot render CSV: {}", e))),
    }
    match export::detailed_csv(&report.detailed) {
        Ok(csv) => body.push_str(&page::csv_data_link(&csv, export::DETAILED_FILE_NAME)),
        Err(e) => body.push_str(&page::warning(&format!("Cannot render CSV: {}", e))),
    }
    body.push_str(r#"</p><p><a href="/">New analysis</a></p>"#);

    body
}

pub async fn status_json(Extension(context): Extension<ApiContext>) -> Json<Value> {
    let jobs = context.jobs.lock().await;

    let value = match jobs.state() {
        JobState::Finished {
            report,
            started_at,
            finished_at,
        } => json!({
            "state": "finished",
            "playlist_url": report.playlist_url,
            "tracks_total": report.tracks_total,
            "credit_rows": report.detailed.len(),
            "unmatched": report.unmatched,
            "started_at": started_at,
            "finished_at": finished_at,
        }),
        other => serde_json::to_value(other).unwrap_or_else(|e| json!({ "error": e.to_string() })),
    };

    Json(value)
}
