//! AWS Secrets Manager integration.

use aws_sdk_secretsmanager::Client as SecretsClient;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::OnceLock;
use tokio::sync::RwLock;
use tracing::debug;

use crate::config::ApiKeySource;
use crate::{Error, Result};

/// Cached secrets with lazy initialization.
static SECRETS_CACHE: OnceLock<RwLock<HashMap<String, String>>> = OnceLock::new();

fn get_cache() -> &'static RwLock<HashMap<String, String>> {
    SECRETS_CACHE.get_or_init(|| RwLock::new(HashMap::new()))
}

/// JSON shape of an API key secret.
#[derive(Debug, Deserialize)]
struct ApiKeySecret {
    api_key: String,
}

/// Get a secret value from Secrets Manager with caching.
pub async fn get_secret(client: &SecretsClient, secret_arn: &str) -> Result<String> {
    // Check cache first
    {
        let cache = get_cache().read().await;
        if let Some(value) = cache.get(secret_arn) {
            return Ok(value.clone());
        }
    }

    debug!("Fetching secret {} from Secrets Manager", secret_arn);

    let response = client
        .get_secret_value()
        .secret_id(secret_arn)
        .send()
        .await
        .map_err(|e| Error::Aws(format!("Failed to get secret: {}", e)))?;

    let secret_string = response
        .secret_string()
        .ok_or_else(|| Error::Aws("Secret has no string value".to_string()))?
        .to_string();

    // Cache the result
    {
        let mut cache = get_cache().write().await;
        cache.insert(secret_arn.to_string(), secret_string.clone());
    }

    Ok(secret_string)
}

/// Pull the API key out of a secret string.
///
/// Accepts either a bare key or a JSON object with an `api_key` field.
pub fn parse_api_key(secret_string: &str) -> Result<String> {
    let trimmed = secret_string.trim();

    let key = if trimmed.starts_with('{') {
        serde_json::from_str::<ApiKeySecret>(trimmed)?.api_key
    } else {
        trimmed.to_string()
    };

    if key.is_empty() {
        return Err(Error::Config("API key secret is empty".to_string()));
    }
    Ok(key)
}

/// Resolve the upstream API key for the current invocation.
pub async fn resolve_api_key(
    source: &ApiKeySource,
    client: Option<&SecretsClient>,
) -> Result<String> {
    match source {
        ApiKeySource::Literal(key) => Ok(key.clone()),
        ApiKeySource::SecretArn(arn) => {
            let client = client.ok_or_else(|| {
                Error::Internal("Secrets Manager client not initialised".to_string())
            })?;
            parse_api_key(&get_secret(client, arn).await?)
        }
    }
}

/// Clear the secrets cache (useful for testing or credential rotation).
pub async fn clear_cache() {
    let mut cache = get_cache().write().await;
    cache.clear();
}
