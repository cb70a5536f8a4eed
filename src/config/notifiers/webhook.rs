use serde::{Deserialize, Serialize};

use super::impl_http_integration;
use crate::config::duration::FractionalDuration;
use crate::config::http::HttpClientConfig;
use crate::config::url::SecretUrl;
use crate::config::validation::{Validate, exactly_one, validated_serde};
use crate::error::ConfigError;

/// Generic webhook receiver.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(remote = "Self", default)]
pub struct WebhookConfig {
    pub send_resolved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_config: Option<HttpClientConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<SecretUrl>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub url_file: String,
    /// Zero means every alert of the group is sent.
    pub max_alerts: u64,
    #[serde(skip_serializing_if = "FractionalDuration::is_zero")]
    pub timeout: FractionalDuration,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            send_resolved: true,
            http_config: None,
            url: None,
            url_file: String::new(),
            max_alerts: 0,
            timeout: FractionalDuration::default(),
        }
    }
}

validated_serde!(WebhookConfig);
impl_http_integration!(WebhookConfig, "webhook");

impl Validate for WebhookConfig {
    fn validate(&mut self) -> Result<(), ConfigError> {
        exactly_one(&[
            ("url", self.url.is_some()),
            ("url_file", !self.url_file.is_empty()),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn webhook_requires_url_or_file() {
        let err = serde_yaml::from_str::<WebhookConfig>("max_alerts: 3").unwrap_err();
        assert!(err.to_string().contains("one of url or url_file must be configured"));
    }

    #[test]
    fn webhook_rejects_both() {
        let yaml = "url: http://example.com/hook\nurl_file: /hook";
        let err = serde_yaml::from_str::<WebhookConfig>(yaml).unwrap_err();
        assert!(err.to_string().contains("at most one of url & url_file"));
    }

    #[test]
    fn webhook_timeout_accepts_fractions() {
        let yaml = "url: http://example.com/hook\ntimeout: 1.5s";
        let cfg: WebhookConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cfg.timeout.0, Duration::from_millis(1500));
        assert!(cfg.send_resolved);
        assert_eq!(cfg.max_alerts, 0);
    }
}
