use axum::{Extension, response::Html};

use crate::server::ApiContext;

use super::page;

pub async fn index(Extension(context): Extension<ApiContext>) -> Html<String> {
    let running = context.jobs.lock().await.is_running();

    let notice = if running {
        r#"<p class="info">An analysis is running. <a href="/status">Show progress</a></p>"#
    } else {
        ""
    };

    let body = format!(
        r#"<p>This app analyzes a Spotify playlist and retrieves detailed credits information for each track using the Muso API.
Enter a Spotify playlist URL to get started!</p>
{notice}
<form method="post" action="/analyze">
    <label for="playlist_url">Enter Spotify Playlist URL:</label><br>
    <input type="text" id="playlist_url" name="playlist_url" placeholder="https://open.spotify.com/playlist/..." required>
    <button type="submit">Analyze Credits</button>
</form>"#,
        notice = notice
    );

    Html(page::layout("Spotify Playlist Credits Analyzer", &body, None))
}
