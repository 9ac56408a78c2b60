use std::time::Duration;

use reqwest::Client;

use super::{AuthApi, AuthError, AuthReply, Credentials};
use crate::config::Config;

/// [`AuthApi`] backed by the HTTP authentication service at `base_url`.
#[derive(Debug, Clone)]
pub struct HttpAuthApi {
    base_url: String,
    client: Client,
}

impl HttpAuthApi {
    pub fn new(base_url: impl AsRef<str>, timeout: Duration) -> Result<HttpAuthApi, AuthError> {
        Ok(HttpAuthApi {
            base_url: base_url.as_ref().trim_end_matches('/').to_string(),
            client: Client::builder().timeout(timeout).build()?,
        })
    }

    pub fn from_config(config: &Config) -> Result<HttpAuthApi, AuthError> {
        HttpAuthApi::new(
            &config.auth_api_url,
            Duration::from_secs(config.auth_timeout_secs),
        )
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn post(&self, path: &str, credentials: &Credentials) -> Result<AuthReply, AuthError> {
        let resp = self
            .client
            .post(self.endpoint(path))
            .json(credentials)
            .send()
            .await?;

        let status = resp.status();
        tracing::debug!(%status, path, "auth backend replied");

        // Rejections may come back with an error status and a JSON message.
        match resp.json::<AuthReply>().await {
            Ok(reply) => Ok(reply),
            Err(_) if !status.is_success() => Err(AuthError::Status(status.as_u16())),
            Err(e) => Err(e.into()),
        }
    }
}

#[rocket::async_trait]
impl AuthApi for HttpAuthApi {
    #[tracing::instrument(skip(self))]
    async fn login(&self, credentials: &Credentials) -> Result<AuthReply, AuthError> {
        self.post("login", credentials).await
    }

    #[tracing::instrument(skip(self))]
    async fn signup(&self, credentials: &Credentials) -> Result<AuthReply, AuthError> {
        self.post("signup", credentials).await
    }
}
