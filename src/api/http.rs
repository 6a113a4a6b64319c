// src/api/http.rs

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use url::Url;

use crate::{
    api::QuizBackend,
    config::Config,
    error::ApiError,
    models::attempt::{StartAttemptResponse, SubmitAttemptRequest, SubmitAttemptResponse},
};

/// `QuizBackend` over the portal's JSON REST API.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: Url,
    token: Option<String>,
}

impl HttpBackend {
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_base_url.clone(),
            token: config.api_token.clone(),
        })
    }

    /// Replaces the bearer token, e.g. after the user signs in again.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Appends path segments to the base url, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = self.authorize(request).send().await?;
        let response = error_for_status(response).await?;
        Ok(response.json::<T>().await?)
    }
}

/// Maps non-2xx responses to `ApiError::Status`, keeping the server's
/// explanation from the JSON body's `error` or `message` field.
async fn error_for_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|value| {
            value
                .get("error")
                .or_else(|| value.get("message"))
                .and_then(|m| m.as_str())
                .map(str::to_owned)
        });

    tracing::warn!("Backend responded with {}: {:?}", status, message);

    Err(ApiError::Status {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl QuizBackend for HttpBackend {
    async fn start_attempt(&self, quiz_id: &str) -> Result<StartAttemptResponse, ApiError> {
        let url = self.endpoint(&["attempt", quiz_id, "start"])?;
        tracing::debug!("POST {}", url);
        self.send(self.client.post(url)).await
    }

    async fn submit_attempt(
        &self,
        attempt_id: &str,
        request: &SubmitAttemptRequest,
    ) -> Result<SubmitAttemptResponse, ApiError> {
        let url = self.endpoint(&["attempt", attempt_id, "submit"])?;
        tracing::debug!("POST {} ({} answers)", url, request.answers.len());
        self.send(self.client.post(url).json(request)).await
    }
}
