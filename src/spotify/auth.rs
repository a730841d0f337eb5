use crate::{Res, types::TokenResponse, utils};

use super::SpotifyClient;

impl SpotifyClient {
    /// Exchanges the app credentials for an access token.
    ///
    /// Uses the client credentials grant with the id and secret sent as HTTP
    /// basic auth. The token is only good for public data, which is all the
    /// playlist lookup needs.
    ///
    /// # Errors
    ///
    /// Fails when the token endpoint rejects the credentials (4xx, not
    /// retried) or stays unreachable after the retry policy is exhausted.
    pub async fn access_token(&self) -> Res<String> {
        let token = utils::retry(&self.retry, "Spotify token request", || {
            self.request_token()
        })
        .await?;

        Ok(token.access_token)
    }

    async fn request_token(&self) -> Res<TokenResponse> {
        let response = self
            .client
            .post(&self.token_url)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;
        let response = utils::ensure_success(response).await?;
        Ok(response.json::<TokenResponse>().await?)
    }
}
