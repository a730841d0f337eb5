use crate::{
    Res,
    error::PlcreditsError,
    types::{PlaylistItem, PlaylistTrack, PlaylistTracksPage, Track},
    utils,
};

use super::SpotifyClient;

/// Spotify's maximum page size for playlist items.
pub const PAGE_LIMIT: u32 = 100;

impl SpotifyClient {
    /// Lists the tracks of a playlist in playlist order.
    ///
    /// Accepts a playlist URL (`https://open.spotify.com/playlist/<id>?si=..`),
    /// a `spotify:playlist:<id>` URI or a bare id. All pages are fetched by
    /// following the `next` link of each response.
    ///
    /// # Errors
    ///
    /// - [`PlcreditsError::InvalidPlaylistUrl`] if no id can be extracted
    /// - [`PlcreditsError::NoTracksFound`] if the playlist has no usable tracks
    /// - HTTP/transport errors once the retry policy is exhausted
    pub async fn list_tracks(&self, playlist_url: &str) -> Res<Vec<Track>> {
        let playlist_id = utils::parse_playlist_id(playlist_url)?;
        let token = self.access_token().await?;

        let mut items: Vec<PlaylistItem> = Vec::new();
        let mut next_url = Some(format!(
            "{api}/playlists/{id}/tracks?limit={limit}",
            api = self.api_url,
            id = playlist_id,
            limit = PAGE_LIMIT
        ));

        while let Some(url) = next_url {
            let page = utils::retry(&self.retry, "Spotify playlist request", || {
                self.fetch_page(&url, &token)
            })
            .await?;

            items.extend(page.items);
            next_url = page.next;
        }

        let tracks = tracks_from_items(items);
        if tracks.is_empty() {
            return Err(Box::new(PlcreditsError::NoTracksFound(playlist_id)));
        }
        Ok(tracks)
    }

    async fn fetch_page(&self, url: &str, token: &str) -> Res<PlaylistTracksPage> {
        let response = self.client.get(url).bearer_auth(token).send().await?;
        let response = utils::ensure_success(response).await?;
        Ok(response.json::<PlaylistTracksPage>().await?)
    }
}

/// Converts playlist items into tracks, skipping entries without track data
/// (removed or unavailable songs).
pub fn tracks_from_items(items: Vec<PlaylistItem>) -> Vec<Track> {
    items
        .into_iter()
        .filter_map(|item| item.track)
        .map(to_track)
        .collect()
}

/// Builds the lookup record for one playlist track.
///
/// Only the first listed artist is used, matching what the search keyword and
/// the unmatched report show.
pub fn to_track(track: PlaylistTrack) -> Track {
    let first_artist = track
        .artists
        .first()
        .map(|a| a.name.clone())
        .unwrap_or_default();

    Track {
        search_string: format!("{} : {}", first_artist, track.name),
        artist: utils::normalize(&first_artist),
        album: utils::normalize(&track.album.name),
        release_date: track.album.release_date.unwrap_or_default(),
        name: track.name,
    }
}
