use std::{sync::Arc, time::Duration};

use axum::{
    Json, Router,
    extract::Path,
    routing::{get, post},
};
use reqwest::{StatusCode, header, redirect};
use serde_json::{Value, json};

use plcredits::config::Settings;
use plcredits::credits::format;
use plcredits::management::{JobManager, JobState, spawn_supervised};
use plcredits::server::{ApiContext, router};
use plcredits::types::{CreditRow, Progress, Report, UnmatchedTrack};

fn credit_row(track: &str, role: &str, name: &str) -> CreditRow {
    CreditRow {
        track: track.to_string(),
        name: name.to_string(),
        role: role.to_string(),
        track_id: "t1".to_string(),
        release_date: "2015-10-23".to_string(),
        popularity: Some(88.0),
        isrcs: "GBBKS1500214".to_string(),
        album_title: "25".to_string(),
        album_id: "alb25".to_string(),
        album_art: String::new(),
        artists: "Adele".to_string(),
    }
}

fn sample_report() -> Report {
    let rows = vec![
        credit_row("Hello", "Composer", "Adele Adkins"),
        credit_row("Hello", "Producer", "Greg Kurstin"),
    ];
    let unmatched = vec![UnmatchedTrack {
        track_name: "<Lost>".to_string(),
        artist: "nobody".to_string(),
    }];
    Report {
        playlist_url: "spotify:playlist:abc".to_string(),
        tracks_total: 2,
        formatted: format(&rows, &unmatched),
        detailed: rows,
        unmatched,
    }
}

fn settings(upstream: &str) -> Settings {
    Settings {
        spotify_client_id: "client-id".to_string(),
        spotify_client_secret: "client-secret".to_string(),
        spotify_api_url: format!("{}/v1", upstream),
        spotify_token_url: format!("{}/api/token", upstream),
        muso_api_key: "muso-key".to_string(),
        muso_api_url: upstream.to_string(),
        server_address: "127.0.0.1:0".to_string(),
        rate_limit_delay: Duration::ZERO,
        search_limit: 10,
        http_timeout: Duration::from_secs(5),
    }
}

async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    base
}

// Helper function to serve fake Spotify and credit APIs from one address
async fn spawn_upstream() -> String {
    let app = Router::new()
        .route(
            "/api/token",
            post(|| async { Json(json!({ "access_token": "token", "token_type": "Bearer" })) }),
        )
        .route(
            "/v1/playlists/{id}/tracks",
            get(|Path(_id): Path<String>| async {
                Json(json!({
                    "items": [
                        { "track": { "name": "Hello", "artists": [{ "name": "Adele" }], "album": { "name": "25" } } },
                        { "track": { "name": "Unknown", "artists": [{ "name": "Nobody" }], "album": { "name": "None" } } }
                    ],
                    "next": null
                }))
            }),
        )
        .route(
            "/search",
            post(|Json(body): Json<Value>| async move {
                let items = if body["keyword"] == "Adele : Hello" {
                    json!([{ "id": "t1", "title": "Hello", "album": { "id": "alb25", "title": "25" } }])
                } else {
                    json!([])
                };
                Json(json!({ "data": { "tracks": { "items": items } } }))
            }),
        )
        .route(
            "/track/id/{id}",
            get(|Path(_id): Path<String>| async {
                Json(json!({
                    "data": { "credits": [{ "parent": "Writing", "credits": [
                        { "child": "Composer", "collaborators": [{ "name": "Adele Adkins" }] },
                        { "child": "Producer", "collaborators": [{ "name": "Greg Kurstin" }] }
                    ] }] }
                }))
            }),
        );
    serve(app).await
}

fn http() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(redirect::Policy::none())
        .build()
        .unwrap()
}

#[test]
fn test_job_manager_lifecycle() {
    let mut jobs = JobManager::new();
    assert!(matches!(jobs.state(), JobState::Idle));
    assert!(jobs.report().is_none());

    jobs.start("spotify:playlist:abc".to_string()).unwrap();
    assert!(jobs.is_running());

    // A second job is refused while the first one runs
    assert!(jobs.start("spotify:playlist:other".to_string()).is_err());

    jobs.update_progress(Progress {
        index: 1,
        total: 2,
        track_name: "Hello".to_string(),
    });
    match jobs.state() {
        JobState::Running {
            playlist_url,
            progress: Some(progress),
            ..
        } => {
            assert_eq!(playlist_url, "spotify:playlist:abc");
            assert_eq!(progress.index, 1);
        }
        other => panic!("unexpected state {:?}", other),
    }

    jobs.finish(sample_report());
    assert!(!jobs.is_running());
    assert_eq!(jobs.report().unwrap().tracks_total, 2);

    // Starting again drops the old report
    jobs.start("spotify:playlist:abc".to_string()).unwrap();
    assert!(jobs.report().is_none());
}

#[test]
fn test_job_manager_failure() {
    let mut jobs = JobManager::default();
    jobs.start("spotify:playlist:abc".to_string()).unwrap();

    jobs.fail("no tracks found in playlist abc".to_string());

    match jobs.state() {
        JobState::Failed {
            playlist_url,
            error,
            started_at,
            finished_at,
        } => {
            assert_eq!(playlist_url, "spotify:playlist:abc");
            assert_eq!(error, "no tracks found in playlist abc");
            assert!(finished_at >= started_at);
        }
        other => panic!("unexpected state {:?}", other),
    }
    assert!(!jobs.is_running());
}

#[test]
fn test_progress_updates_ignored_when_not_running() {
    let mut jobs = JobManager::new();

    jobs.update_progress(Progress {
        index: 1,
        total: 1,
        track_name: "Hello".to_string(),
    });

    assert!(matches!(jobs.state(), JobState::Idle));
}

#[tokio::test]
async fn test_panicking_job_is_marked_failed() {
    let jobs = Arc::new(tokio::sync::Mutex::new(JobManager::new()));
    jobs.lock()
        .await
        .start("spotify:playlist:abc".to_string())
        .unwrap();

    spawn_supervised(jobs.clone(), async { panic!("lookup crashed") })
        .await
        .unwrap();

    let mut jobs = jobs.lock().await;
    match jobs.state() {
        JobState::Failed {
            playlist_url,
            error,
            ..
        } => {
            assert_eq!(playlist_url, "spotify:playlist:abc");
            assert!(error.contains("stopped unexpectedly"));
        }
        other => panic!("unexpected state {:?}", other),
    }
    // A new analysis may start right away
    assert!(jobs.start("spotify:playlist:def".to_string()).is_ok());
}

#[tokio::test]
async fn test_completed_job_keeps_its_result() {
    let jobs = Arc::new(tokio::sync::Mutex::new(JobManager::new()));
    jobs.lock()
        .await
        .start("spotify:playlist:abc".to_string())
        .unwrap();

    let worker = jobs.clone();
    spawn_supervised(jobs.clone(), async move {
        worker.lock().await.finish(sample_report());
    })
    .await
    .unwrap();

    assert!(jobs.lock().await.report().is_some());
}

#[tokio::test]
async fn test_health() {
    let base = serve(router(ApiContext::new(settings("http://127.0.0.1:1")))).await;

    let body: Value = http()
        .get(format!("{}/health", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "plcredits");
}

#[tokio::test]
async fn test_index_and_idle_status() {
    let base = serve(router(ApiContext::new(settings("http://127.0.0.1:1")))).await;
    let client = http();

    let index = client.get(format!("{}/", base)).send().await.unwrap();
    assert_eq!(index.status(), StatusCode::OK);
    let html = index.text().await.unwrap();
    assert!(html.contains(r#"name="playlist_url""#));
    assert!(html.contains("Analyze Credits"));

    let state: Value = client
        .get(format!("{}/status.json", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(state, json!({ "state": "idle" }));

    let download = client
        .get(format!("{}/download/detailed.csv", base))
        .send()
        .await
        .unwrap();
    assert_eq!(download.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_analyze_rejects_invalid_url() {
    let context = ApiContext::new(settings("http://127.0.0.1:1"));
    let base = serve(router(context.clone())).await;

    let response = http()
        .post(format!("{}/analyze", base))
        .form(&[("playlist_url", "https://open.spotify.com/playlist/")])
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(response.text().await.unwrap().contains("class=\"warning\""));
    assert!(matches!(context.jobs.lock().await.state(), JobState::Idle));
}

#[tokio::test]
async fn test_analyze_refuses_second_job() {
    let context = ApiContext::new(settings("http://127.0.0.1:1"));
    context
        .jobs
        .lock()
        .await
        .start("spotify:playlist:abc".to_string())
        .unwrap();
    let base = serve(router(context)).await;

    let response = http()
        .post(format!("{}/analyze", base))
        .form(&[("playlist_url", "spotify:playlist:other")])
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_finished_job_pages_and_downloads() {
    let context = ApiContext::new(settings("http://127.0.0.1:1"));
    {
        let mut jobs = context.jobs.lock().await;
        jobs.start("spotify:playlist:abc".to_string()).unwrap();
        jobs.finish(sample_report());
    }
    let base = serve(router(context)).await;
    let client = http();

    let html = client
        .get(format!("{}/status", base))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(html.contains("Analysis complete!"));
    assert!(html.contains("Could not find credits for 1 tracks"));
    assert!(html.contains("<td>&lt;Lost&gt;</td>"));
    assert!(html.contains("data:text/csv;base64,"));
    assert!(!html.contains("http-equiv=\"refresh\""));

    let state: Value = client
        .get(format!("{}/status.json", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(state["state"], "finished");
    assert_eq!(state["credit_rows"], 2);
    assert_eq!(state["unmatched"][0]["track_name"], "<Lost>");

    let download = client
        .get(format!("{}/download/formatted.csv", base))
        .send()
        .await
        .unwrap();
    assert_eq!(download.status(), StatusCode::OK);
    assert_eq!(
        download.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"playlist_credits_formatted.csv\""
    );
    let csv = download.text().await.unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Song,Artist,Writer 1,Producer 1",
            "Hello,,Adele Adkins,Greg Kurstin",
            "<Lost>,nobody,,"
        ]
    );
}

#[tokio::test]
async fn test_analysis_job_end_to_end() {
    let upstream = spawn_upstream().await;
    let context = ApiContext::new(settings(&upstream));
    let base = serve(router(context)).await;
    let client = http();

    let response = client
        .post(format!("{}/analyze", base))
        .form(&[("playlist_url", "https://open.spotify.com/playlist/abc123?si=x")])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/status");

    let mut state = Value::Null;
    for _ in 0..100 {
        state = client
            .get(format!("{}/status.json", base))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        if state["state"] != "running" {
            break;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }

    assert_eq!(state["state"], "finished", "final state: {}", state);
    assert_eq!(state["tracks_total"], 2);
    assert_eq!(state["credit_rows"], 2);
    assert_eq!(
        state["unmatched"],
        json!([{ "track_name": "Unknown", "artist": "nobody" }])
    );

    let detailed = client
        .get(format!("{}/download/detailed.csv", base))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    let mut lines = detailed.lines();
    assert_eq!(
        lines.next(),
        Some("Track,Name,Rolle,track_id,release_date,popularity,isrcs,album_title,album_id,album_art,artists")
    );
    assert_eq!(lines.next(), Some("Hello,Adele Adkins,Composer,t1,,,,25,alb25,,"));
    assert_eq!(lines.next(), Some("Hello,Greg Kurstin,Producer,t1,,,,25,alb25,,"));
    assert_eq!(lines.next(), None);
}
