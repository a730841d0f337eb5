use axum::{
    Extension, Form,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tokio::sync::mpsc;

use crate::{
    Res,
    config::Settings,
    credits::{self, BatchOptions},
    management,
    muso::MusoClient,
    server::ApiContext,
    spotify::SpotifyClient,
    success,
    types::{Progress, Report},
    utils, warning,
};

use super::page;

#[derive(Debug, Deserialize)]
pub struct AnalyzeForm {
    pub playlist_url: String,
}

/// Starts an analysis in the background and sends the browser to `/status`.
pub async fn analyze(
    Extension(context): Extension<ApiContext>,
    Form(form): Form<AnalyzeForm>,
) -> Response {
    let playlist_url = form.playlist_url.trim().to_string();

    if let Err(e) = utils::parse_playlist_id(&playlist_url) {
        return rejected(StatusCode::BAD_REQUEST, &e.to_string());
    }

    if let Err(e) = context.jobs.lock().await.start(playlist_url.clone()) {
        return rejected(StatusCode::CONFLICT, &e);
    }

    let jobs = context.jobs.clone();
    management::spawn_supervised(jobs, run_job(context, playlist_url));
    Redirect::to("/status").into_response()
}

fn rejected(status: StatusCode, message: &str) -> Response {
    let body = format!(
        r#"{}<p><a class="button" href="/">Back</a></p>"#,
        page::warning(message)
    );
    (
        status,
        Html(page::layout("Spotify Playlist Credits Analyzer", &body, None)),
    )
        .into_response()
}

async fn run_job(context: ApiContext, playlist_url: String) {
    // progress is reported synchronously by the batch, the job lock is async
    let (tx, mut rx) = mpsc::unbounded_channel::<Progress>();
    let jobs = context.jobs.clone();
    let forwarder = tokio::spawn(async move {
        while let Some(progress) = rx.recv().await {
            jobs.lock().await.update_progress(progress);
        }
    });

    let result = run_analysis(&context.settings, &playlist_url, move |p: &Progress| {
        let _ = tx.send(p.clone());
    })
    .await;
    let _ = forwarder.await;

    let mut jobs = context.jobs.lock().await;
    match result {
        Ok(report) => {
            success!("Analysis of {} complete", playlist_url);
            jobs.finish(report);
        }
        Err(e) => {
            warning!("Analysis of {} failed: {}", playlist_url, e);
            jobs.fail(e.to_string());
        }
    }
}

async fn run_analysis<F>(settings: &Settings, playlist_url: &str, on_progress: F) -> Res<Report>
where
    F: FnMut(&Progress) + Send,
{
    let spotify = SpotifyClient::from_settings(settings)?;
    let muso = MusoClient::from_settings(settings)?;
    let options = BatchOptions::from_settings(settings);

    credits::analyze(&spotify, &muso, playlist_url, &options, on_progress).await
}
