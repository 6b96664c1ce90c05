//! Configuration management for Lambda functions.

use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::{Error, Result};

pub const DEFAULT_BASE_URL: &str = "https://api.sportradar.com";
pub const DEFAULT_ACCESS_LEVEL: &str = "trial";

/// Where the upstream API key comes from.
#[derive(Clone, PartialEq, Eq)]
pub enum ApiKeySource {
    /// Key injected directly into the environment
    Literal(String),
    /// ARN of a Secrets Manager secret holding the key
    SecretArn(String),
}

impl fmt::Debug for ApiKeySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiKeySource::Literal(_) => f.write_str("Literal(<redacted>)"),
            ApiKeySource::SecretArn(arn) => f.debug_tuple("SecretArn").field(arn).finish(),
        }
    }
}

/// How a non-2xx upstream status is reported to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpstreamStatusPolicy {
    /// Return the upstream status code alongside its body.
    #[default]
    Propagate,
    /// Always answer 200 once the transport succeeded.
    Mask,
}

impl FromStr for UpstreamStatusPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "propagate" => Ok(Self::Propagate),
            "mask" => Ok(Self::Mask),
            other => Err(Error::Config(format!(
                "UPSTREAM_STATUS_POLICY must be 'propagate' or 'mask', got '{}'",
                other
            ))),
        }
    }
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Upstream API key source
    pub api_key: ApiKeySource,
    /// Upstream origin, scheme and host only
    pub base_url: String,
    /// Sportradar access level path segment (trial, production)
    pub access_level: String,
    /// Status reporting for upstream failures
    pub status_policy: UpstreamStatusPolicy,
    /// Optional ceiling on each upstream request
    pub upstream_timeout: Option<Duration>,
    /// AWS region
    pub aws_region: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let api_key = match (var("SPORTRADAR_API_KEY_SECRET_ARN"), var("SPORTRADAR_API_KEY")) {
            (Some(arn), _) => ApiKeySource::SecretArn(arn),
            (None, Some(key)) => ApiKeySource::Literal(key),
            (None, None) => {
                return Err(Error::Config(
                    "one of SPORTRADAR_API_KEY_SECRET_ARN or SPORTRADAR_API_KEY must be set"
                        .to_string(),
                ))
            }
        };

        let status_policy: UpstreamStatusPolicy = var("UPSTREAM_STATUS_POLICY")
            .map(|v| v.parse::<UpstreamStatusPolicy>())
            .transpose()?
            .unwrap_or_default();

        let upstream_timeout: Option<Duration> = var("UPSTREAM_TIMEOUT_SECS")
            .map(|v| {
                v.trim()
                    .parse::<u64>()
                    .map(Duration::from_secs)
                    .map_err(|e| Error::Config(format!("UPSTREAM_TIMEOUT_SECS: {}", e)))
            })
            .transpose()?;

        Ok(Self {
            api_key,
            base_url: var("SPORTRADAR_BASE_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            access_level: var("SPORTRADAR_ACCESS_LEVEL")
                .unwrap_or_else(|| DEFAULT_ACCESS_LEVEL.to_string()),
            status_policy,
            upstream_timeout,
            aws_region: var("AWS_REGION").unwrap_or_else(|| "us-east-1".to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[("SPORTRADAR_API_KEY", "abc123")]).unwrap();
        assert_eq!(config.api_key, ApiKeySource::Literal("abc123".to_string()));
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.access_level, "trial");
        assert_eq!(config.status_policy, UpstreamStatusPolicy::Propagate);
        assert_eq!(config.upstream_timeout, None);
        assert_eq!(config.aws_region, "us-east-1");
    }

    #[test]
    fn test_secret_arn_wins_over_literal() {
        let config = config_from(&[
            ("SPORTRADAR_API_KEY", "abc123"),
            ("SPORTRADAR_API_KEY_SECRET_ARN", "arn:aws:secretsmanager:us-east-1:1:secret:sr"),
        ])
        .unwrap();
        assert!(matches!(config.api_key, ApiKeySource::SecretArn(_)));
    }

    #[test]
    fn test_missing_key_is_config_error() {
        let err = config_from(&[("SPORTRADAR_API_KEY", "  ")]).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("SPORTRADAR_API_KEY", "abc123"),
            ("SPORTRADAR_BASE_URL", "http://127.0.0.1:9000/"),
            ("SPORTRADAR_ACCESS_LEVEL", "production"),
            ("UPSTREAM_STATUS_POLICY", "MASK"),
            ("UPSTREAM_TIMEOUT_SECS", "8"),
        ])
        .unwrap();
        assert_eq!(config.base_url, "http://127.0.0.1:9000");
        assert_eq!(config.access_level, "production");
        assert_eq!(config.status_policy, UpstreamStatusPolicy::Mask);
        assert_eq!(config.upstream_timeout, Some(Duration::from_secs(8)));
    }

    #[test]
    fn test_bad_policy_and_timeout() {
        let err = config_from(&[
            ("SPORTRADAR_API_KEY", "abc123"),
            ("UPSTREAM_STATUS_POLICY", "retry"),
        ])
        .unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let err = config_from(&[
            ("SPORTRADAR_API_KEY", "abc123"),
            ("UPSTREAM_TIMEOUT_SECS", "soon"),
        ])
        .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_debug_redacts_literal_key() {
        let config = config_from(&[("SPORTRADAR_API_KEY", "abc123")]).unwrap();
        assert!(!format!("{:?}", config).contains("abc123"));
    }
}
