//! Fetch Games Lambda - proxies the Sportradar NFL regular-season schedule.
//!
//! `GET ?year=2023` is forwarded to
//! `/nfl/official/{level}/v7/en/games/2023/reg/schedule.xml` and the XML
//! payload is relayed back untouched.

use aws_sdk_secretsmanager::Client as SecretsClient;
use lambda_http::http::Method;
use lambda_http::{Body, Error, Request, RequestExt, Response};
use shared::config::{ApiKeySource, UpstreamStatusPolicy};
use shared::http::{error_response, error_to_response, raw_response, xml_response, CONTENT_TYPE_XML};
use shared::models::YEAR_PARAM;
use shared::{resolve_api_key, Config, ScheduleClient, Season, UpstreamResponse};
use std::sync::Arc;
use tracing::{info, warn};

/// Application state, built once per cold start.
pub struct AppState {
    pub config: Config,
    pub schedule_client: ScheduleClient,
    pub secrets_client: Option<SecretsClient>,
}

impl AppState {
    pub async fn new() -> Result<Self, Error> {
        let config = Config::from_env()?;

        // Only pay for SDK setup when the key actually lives in Secrets Manager
        let secrets_client = match config.api_key {
            ApiKeySource::SecretArn(_) => {
                let sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
                    .region(aws_config::Region::new(config.aws_region.clone()))
                    .load()
                    .await;
                Some(SecretsClient::new(&sdk_config))
            }
            ApiKeySource::Literal(_) => None,
        };

        info!(
            base_url = %config.base_url,
            access_level = %config.access_level,
            status_policy = ?config.status_policy,
            "Fetch games lambda initialised"
        );

        Self::from_parts(config, secrets_client)
    }

    pub fn from_parts(config: Config, secrets_client: Option<SecretsClient>) -> Result<Self, Error> {
        let schedule_client = ScheduleClient::new(&config)?;
        Ok(Self {
            config,
            schedule_client,
            secrets_client,
        })
    }
}

/// Shape the upstream reply according to the configured status policy.
fn relay(policy: UpstreamStatusPolicy, upstream: UpstreamResponse) -> Result<Response<Body>, Error> {
    match policy {
        UpstreamStatusPolicy::Mask => xml_response(200, upstream.body),
        UpstreamStatusPolicy::Propagate if upstream.is_success() => {
            xml_response(upstream.status, upstream.body)
        }
        UpstreamStatusPolicy::Propagate => {
            let content_type = upstream.content_type.as_deref().unwrap_or(CONTENT_TYPE_XML);
            raw_response(upstream.status, content_type, upstream.body)
        }
    }
}

pub async fn handler(state: Arc<AppState>, event: Request) -> Result<Response<Body>, Error> {
    if *event.method() != Method::GET {
        return error_response(405, "Method not allowed");
    }

    let params = event.query_string_parameters();
    let season = match Season::parse(params.first(YEAR_PARAM)) {
        Ok(season) => season,
        Err(e) => {
            info!("Rejected schedule request: {}", e);
            return error_to_response(&e);
        }
    };

    let api_key = match resolve_api_key(&state.config.api_key, state.secrets_client.as_ref()).await {
        Ok(key) => key,
        Err(e) => {
            warn!("Failed to resolve API key: {}", e);
            return error_to_response(&e);
        }
    };

    match state.schedule_client.fetch(season, &api_key).await {
        Ok(upstream) => {
            if !upstream.is_success() {
                warn!(
                    season = %season,
                    status = upstream.status,
                    "Upstream returned a non-success status"
                );
            }
            relay(state.config.status_policy, upstream)
        }
        Err(e) => error_to_response(&e),
    }
}
