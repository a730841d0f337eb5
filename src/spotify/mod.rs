//! # Spotify Integration Module
//!
//! The read side of the Spotify Web API that plcredits needs: an app-only
//! access token and the track listing of a playlist.
//!
//! ## Architecture
//!
//! ```text
//! Track Lister (playlist::list_tracks)
//!          ↓
//! Authentication (client credentials)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//!          ↓
//! Spotify Web API
//! ```
//!
//! ## Authentication
//!
//! Only public playlist data is read, so the module uses the OAuth 2.0 client
//! credentials grant: the client id and secret are exchanged for a short-lived
//! bearer token. No user login or callback server is involved.
//!
//! ## API Coverage
//!
//! - `POST /api/token` - client credentials token
//! - `GET /playlists/{id}/tracks` - playlist items, followed through `next`
//!
//! ## Error Handling
//!
//! Every request goes through [`crate::utils::retry`]: transport errors, 429
//! and 5xx answers are retried three times with exponential backoff before the
//! error reaches the caller.

pub mod auth;
pub mod playlist;

use reqwest::Client;

use crate::{Res, config::Settings, utils::RetryPolicy};

/// Spotify Web API client bound to one set of app credentials.
#[derive(Debug, Clone)]
pub struct SpotifyClient {
    client: Client,
    api_url: String,
    token_url: String,
    client_id: String,
    client_secret: String,
    retry: RetryPolicy,
}

impl SpotifyClient {
    pub fn new(
        client: Client,
        api_url: impl Into<String>,
        token_url: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            token_url: token_url.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            retry: RetryPolicy::default(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Res<Self> {
        Ok(Self::new(
            settings.http_client()?,
            &settings.spotify_api_url,
            &settings.spotify_token_url,
            &settings.spotify_client_id,
            &settings.spotify_client_secret,
        ))
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}
