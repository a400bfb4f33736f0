//! Configuration management for the IAM gateway.
//!
//! All configuration is driven by environment variables, matching LocalStack conventions.

use crate::types::{AccountId, AwsRegion};

/// Default cap on a buffered awsQuery POST body.
const DEFAULT_MAX_BODY_SIZE: usize = 1024 * 1024;

/// Global configuration for the IAM gateway.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RustStackConfig {
    /// Bind address for the gateway.
    pub gateway_listen: String,
    /// Default AWS region.
    pub default_region: AwsRegion,
    /// Log level.
    pub log_level: String,
    /// Skip signature validation and grant the default identity.
    pub iam_skip_signature_validation: bool,
    /// Largest POST body the IAM endpoint will buffer, in bytes.
    pub iam_max_body_size: usize,
    /// Account that owns the default identity, if any.
    pub default_account_id: Option<AccountId>,
    /// Prefix the frontend mounts the IAM endpoint under.
    pub iam_frontend_prefix: String,
}

impl Default for RustStackConfig {
    fn default() -> Self {
        Self {
            gateway_listen: "0.0.0.0:4566".to_owned(),
            default_region: AwsRegion::default(),
            log_level: "info".to_owned(),
            iam_skip_signature_validation: true,
            iam_max_body_size: DEFAULT_MAX_BODY_SIZE,
            default_account_id: None,
            iam_frontend_prefix: String::new(),
        }
    }
}

impl RustStackConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    /// Returns [`crate::RustStackError::Config`] when a numeric variable does not
    /// parse, or [`crate::RustStackError::InvalidAccountId`] for a malformed
    /// `IAM_DEFAULT_ACCOUNT_ID`.
    pub fn from_env() -> crate::RustStackResult<Self> {
        let mut config = Self::default();

        if let Ok(v) = std::env::var("GATEWAY_LISTEN") {
            config.gateway_listen = v;
        }
        if let Ok(v) = std::env::var("DEFAULT_REGION") {
            config.default_region = AwsRegion::new(v);
        }
        if let Ok(v) = std::env::var("LOG_LEVEL") {
            config.log_level = v;
        }
        if let Ok(v) = std::env::var("IAM_SKIP_SIGNATURE_VALIDATION") {
            config.iam_skip_signature_validation = parse_bool(&v);
        }
        if let Ok(v) = std::env::var("IAM_MAX_BODY_SIZE") {
            config.iam_max_body_size = v.parse().map_err(|e| {
                crate::RustStackError::Config(format!("invalid IAM_MAX_BODY_SIZE {v:?}: {e}"))
            })?;
        }
        if let Ok(v) = std::env::var("IAM_DEFAULT_ACCOUNT_ID") {
            config.default_account_id = Some(AccountId::new(v)?);
        }
        if let Ok(v) = std::env::var("IAM_FRONTEND_PREFIX") {
            config.iam_frontend_prefix = v;
        }

        Ok(config)
    }
}

fn parse_bool(v: &str) -> bool {
    v == "1" || v.eq_ignore_ascii_case("true") || v.eq_ignore_ascii_case("yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_create_default_config() {
        let config = RustStackConfig::default();
        assert_eq!(config.gateway_listen, "0.0.0.0:4566");
        assert_eq!(config.default_region.as_str(), "us-east-1");
        assert!(config.iam_skip_signature_validation);
        assert_eq!(config.iam_max_body_size, 1024 * 1024);
        assert!(config.default_account_id.is_none());
        assert!(config.iam_frontend_prefix.is_empty());
    }

    #[test]
    fn test_should_parse_bool_values() {
        assert!(parse_bool("1"));
        assert!(parse_bool("TRUE"));
        assert!(parse_bool("yes"));
        assert!(!parse_bool("0"));
        assert!(!parse_bool("off"));
    }
}
