//! Sportradar NFL schedule client.

use reqwest::header::CONTENT_TYPE;
use reqwest::Url;
use std::time::Instant;
use tracing::{info, warn};

use crate::config::Config;
use crate::models::Season;
use crate::{Error, Result};

/// Raw upstream reply, body fully buffered.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl UpstreamResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Client for the regular-season schedule feed.
#[derive(Debug, Clone)]
pub struct ScheduleClient {
    http_client: reqwest::Client,
    base_url: String,
    access_level: String,
}

impl ScheduleClient {
    pub fn new(config: &Config) -> Result<Self> {
        // One GET per invocation: a 3xx is relayed like any other status.
        let mut builder = reqwest::Client::builder().redirect(reqwest::redirect::Policy::none());
        if let Some(timeout) = config.upstream_timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder
            .build()
            .map_err(|e| Error::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            access_level: config.access_level.clone(),
        })
    }

    /// Build the schedule URL for a season. The key is appended once, percent-encoded.
    pub fn schedule_url(&self, season: Season, api_key: &str) -> Result<Url> {
        let raw = format!(
            "{}/nfl/official/{}/v7/en/games/{}/reg/schedule.xml",
            self.base_url, self.access_level, season
        );
        let mut url = Url::parse(&raw)
            .map_err(|e| Error::Config(format!("Invalid upstream URL: {}", e)))?;
        url.query_pairs_mut().append_pair("api_key", api_key);
        Ok(url)
    }

    /// Fetch the schedule for a season.
    ///
    /// Any HTTP status counts as a completed exchange; only network-level
    /// failures come back as `Error::Transport`.
    pub async fn fetch(&self, season: Season, api_key: &str) -> Result<UpstreamResponse> {
        let url = self.schedule_url(season, api_key)?;
        let started = Instant::now();

        let result = async {
            let response = self.http_client.get(url).send().await?;
            let status = response.status().as_u16();
            let content_type = response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);
            let body = response.bytes().await?.to_vec();

            Ok::<_, Error>(UpstreamResponse {
                status,
                content_type,
                body,
            })
        }
        .await;

        let elapsed_ms = started.elapsed().as_millis() as u64;
        match &result {
            Ok(upstream) => info!(
                season = %season,
                status = upstream.status,
                bytes = upstream.body.len(),
                elapsed_ms,
                "Upstream schedule fetched"
            ),
            Err(e) => warn!(season = %season, elapsed_ms, error = %e, "Upstream schedule fetch failed"),
        }

        result
    }
}
