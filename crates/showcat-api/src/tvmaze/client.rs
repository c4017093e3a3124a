//! `TvMazeClient` - TVmaze API client implementation.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;
use tracing::instrument;
use url::Url;

use super::api::LocalTvMazeApi;
use super::error::TvMazeError;
use super::rate_limiter::TvMazeRateLimiter;
use super::types::{CastMember, CrewMember, Season, Show};
use super::wire::{WireCastCredit, WireCrewCredit, WireSeason, WireShow};

/// Default base URL for the TVmaze API.
pub const DEFAULT_BASE_URL: &str = "https://api.tvmaze.com/";

/// Maximum number of retries for HTTP 429 responses.
const MAX_RETRIES: u32 = 3;

/// Backoff duration between retries.
const RETRY_BACKOFF: Duration = Duration::from_secs(1);

/// TVmaze API client.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TvMazeClient {
    /// HTTP client.
    http_client: Client,
    /// Base URL for API requests.
    base_url: Url,
    /// Rate limiter.
    rate_limiter: Arc<Mutex<TvMazeRateLimiter>>,
}

/// Builder for `TvMazeClient`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TvMazeClientBuilder {
    base_url: Option<Url>,
    user_agent: Option<String>,
    min_interval: Option<Duration>,
    timeout: Option<Duration>,
}

impl TvMazeClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            base_url: None,
            user_agent: None,
            min_interval: None,
            timeout: None,
        }
    }

    /// Overrides the base URL (for wiremock in tests).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the User-Agent (required).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Sets the minimum request interval (default: 50ms).
    #[must_use]
    pub const fn min_interval(mut self, interval: Duration) -> Self {
        self.min_interval = Some(interval);
        self
    }

    /// Sets a total per-request timeout. Without one, a hung request waits
    /// for the transport default.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - `user_agent` is not set.
    /// - `reqwest::Client` build fails.
    pub fn build(self) -> Result<TvMazeClient> {
        let user_agent = self.user_agent.context("user_agent is required")?;

        let base_url = if let Some(url) = self.base_url {
            url
        } else {
            Url::parse(DEFAULT_BASE_URL).context("invalid default base URL")?
        };

        let rate_limiter = self
            .min_interval
            .map_or_else(TvMazeRateLimiter::default_interval, TvMazeRateLimiter::new);

        let mut http_client = Client::builder().user_agent(&user_agent).gzip(true);
        if let Some(timeout) = self.timeout {
            http_client = http_client.timeout(timeout);
        }
        let http_client = http_client
            .build()
            .context("failed to build HTTP client")?;

        Ok(TvMazeClient {
            http_client,
            base_url,
            rate_limiter: Arc::new(Mutex::new(rate_limiter)),
        })
    }
}

impl TvMazeClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> TvMazeClientBuilder {
        TvMazeClientBuilder::new()
    }

    /// Sends a rate-limited GET and returns the body, or `None` on HTTP 404.
    /// Retries up to `MAX_RETRIES` times on HTTP 429.
    #[instrument(skip_all)]
    async fn get_body(&self, path: &str, query: &[(&str, String)]) -> Result<Option<String>> {
        self.rate_limiter.lock().await.wait().await;

        let url = self
            .base_url
            .join(path)
            .with_context(|| format!("failed to join URL path: {path}"))?;

        let mut retries = 0u32;
        loop {
            let request = self
                .http_client
                .get(url.clone())
                .query(query)
                .build()
                .with_context(|| format!("failed to build request: {path}"))?;

            tracing::debug!(url = %request.url(), "TVmaze API request");

            let response = self
                .http_client
                .execute(request)
                .await
                .map_err(|err| TvMazeError::Transport {
                    path: String::from(path),
                    message: err.to_string(),
                })?;

            let status = response.status();

            if status == StatusCode::TOO_MANY_REQUESTS {
                retries = retries.saturating_add(1);
                if retries > MAX_RETRIES {
                    return Err(TvMazeError::RateLimited {
                        path: String::from(path),
                        retries: MAX_RETRIES,
                    }
                    .into());
                }
                tracing::warn!(
                    retry = retries,
                    max_retries = MAX_RETRIES,
                    "TVmaze API rate limited (429). Retrying..."
                );
                tokio::time::sleep(RETRY_BACKOFF.saturating_mul(retries)).await;
                self.rate_limiter.lock().await.wait().await;
                continue;
            }

            if status == StatusCode::NOT_FOUND {
                return Ok(None);
            }

            if !status.is_success() {
                return Err(TvMazeError::Status {
                    path: String::from(path),
                    status: status.as_u16(),
                }
                .into());
            }

            let body = response
                .text()
                .await
                .map_err(|err| TvMazeError::Transport {
                    path: String::from(path),
                    message: err.to_string(),
                })?;
            return Ok(Some(body));
        }
    }

    /// Sends a GET and decodes the JSON body. HTTP 404 is an error here.
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let body = self
            .get_body(path, &[])
            .await?
            .ok_or_else(|| TvMazeError::Status {
                path: String::from(path),
                status: StatusCode::NOT_FOUND.as_u16(),
            })?;
        decode(path, &body)
    }
}

/// Decodes a JSON body, reporting failures as `TvMazeError::Decode`.
fn decode<T: DeserializeOwned>(path: &str, body: &str) -> Result<T> {
    let parsed = serde_json::from_str(body).map_err(|err| TvMazeError::Decode {
        path: String::from(path),
        message: err.to_string(),
    })?;
    Ok(parsed)
}

impl LocalTvMazeApi for TvMazeClient {
    #[instrument(skip_all, fields(page = page))]
    async fn show_page(&self, page: u32) -> Result<Vec<Show>> {
        let query = [("page", page.to_string())];
        let Some(body) = self.get_body("shows", &query).await? else {
            tracing::debug!(page, "show index exhausted (404)");
            return Ok(Vec::new());
        };
        let raw: Vec<WireShow> = decode("shows", &body)?;
        Ok(raw.into_iter().map(Show::from).collect())
    }

    #[instrument(skip_all, fields(show_id = show_id))]
    async fn seasons(&self, show_id: u64) -> Result<Vec<Season>> {
        let path = format!("shows/{show_id}/seasons");
        let raw: Vec<WireSeason> = self.get_json(&path).await?;
        Ok(raw.into_iter().map(Season::from).collect())
    }

    #[instrument(skip_all, fields(show_id = show_id))]
    async fn cast(&self, show_id: u64) -> Result<Vec<CastMember>> {
        let path = format!("shows/{show_id}/cast");
        let raw: Vec<WireCastCredit> = self.get_json(&path).await?;
        Ok(raw.into_iter().map(CastMember::from).collect())
    }

    #[instrument(skip_all, fields(show_id = show_id))]
    async fn crew(&self, show_id: u64) -> Result<Vec<CrewMember>> {
        let path = format!("shows/{show_id}/crew");
        let raw: Vec<WireCrewCredit> = self.get_json(&path).await?;
        Ok(raw.into_iter().map(CrewMember::from).collect())
    }
}
