//! # Muso Credit API Client
//!
//! Thin client for the two Muso endpoints the credit lookup needs:
//!
//! - `POST /search` - keyword search restricted to tracks
//! - `GET /track/id/{id}` - full credit listing of one track
//!
//! Requests carry the API key in the `x-api-key` header. Both calls are
//! wrapped in [`crate::utils::retry`], so a flaky connection or a 429 costs a
//! few seconds instead of the whole track.

use std::future::Future;

use reqwest::Client;

use crate::{
    Res,
    config::Settings,
    credits::CreditCatalog,
    types::{CreditCandidate, CreditGroup, SearchRequest, SearchResponse, TrackDetailsResponse},
    utils::{self, RetryPolicy},
};

#[derive(Debug, Clone)]
pub struct MusoClient {
    client: Client,
    base_url: String,
    api_key: String,
    retry: RetryPolicy,
}

impl MusoClient {
    pub fn new(client: Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            retry: RetryPolicy::default(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Res<Self> {
        Ok(Self::new(
            settings.http_client()?,
            &settings.muso_api_url,
            &settings.muso_api_key,
        ))
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Searches tracks by keyword, returning at most `limit` candidates in the
    /// order the API ranks them.
    pub async fn search_tracks(&self, keyword: &str, limit: u32) -> Res<Vec<CreditCandidate>> {
        let response = utils::retry(&self.retry, "Muso search", || {
            self.post_search(keyword, limit)
        })
        .await?;
        Ok(response.data.tracks.items)
    }

    /// Fetches the credit groups of one track.
    pub async fn track_details(&self, track_id: &str) -> Res<Vec<CreditGroup>> {
        let response = utils::retry(&self.retry, "Muso track details", || {
            self.get_details(track_id)
        })
        .await?;
        Ok(response.data.credits)
    }

    async fn post_search(&self, keyword: &str, limit: u32) -> Res<SearchResponse> {
        let body = SearchRequest {
            keyword,
            kinds: vec!["track"],
            limit,
        };
        let response = self
            .client
            .post(format!("{}/search", self.base_url))
            .header("x-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;
        let response = utils::ensure_success(response).await?;
        Ok(response.json::<SearchResponse>().await?)
    }

    async fn get_details(&self, track_id: &str) -> Res<TrackDetailsResponse> {
        let response = self
            .client
            .get(format!("{}/track/id/{}", self.base_url, track_id))
            .header("x-api-key", &self.api_key)
            .send()
            .await?;
        let response = utils::ensure_success(response).await?;
        Ok(response.json::<TrackDetailsResponse>().await?)
    }
}

impl CreditCatalog for MusoClient {
    fn search(
        &self,
        keyword: &str,
        limit: u32,
    ) -> impl Future<Output = Res<Vec<CreditCandidate>>> + Send {
        self.search_tracks(keyword, limit)
    }

    fn credits(&self, track_id: &str) -> impl Future<Output = Res<Vec<CreditGroup>>> + Send {
        self.track_details(track_id)
    }
}
