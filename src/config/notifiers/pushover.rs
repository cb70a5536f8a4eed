use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{impl_http_integration, template_ref};
use crate::config::duration::FractionalDuration;
use crate::config::http::HttpClientConfig;
use crate::config::secret::Secret;
use crate::config::validation::{Validate, exactly_one, validated_serde};
use crate::error::ConfigError;

/// Pushover notifier.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(remote = "Self", default)]
pub struct PushoverConfig {
    pub send_resolved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_config: Option<HttpClientConfig>,
    #[serde(skip_serializing_if = "Secret::is_empty")]
    pub user_key: Secret,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub user_key_file: String,
    #[serde(skip_serializing_if = "Secret::is_empty")]
    pub token: Secret,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub token_file: String,
    pub title: String,
    pub message: String,
    pub url: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub url_title: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub device: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub sound: String,
    pub priority: String,
    pub retry: FractionalDuration,
    pub expire: FractionalDuration,
    #[serde(skip_serializing_if = "FractionalDuration::is_zero")]
    pub ttl: FractionalDuration,
    pub html: bool,
}

impl Default for PushoverConfig {
    fn default() -> Self {
        Self {
            send_resolved: true,
            http_config: None,
            user_key: Secret::default(),
            user_key_file: String::new(),
            token: Secret::default(),
            token_file: String::new(),
            title: template_ref("pushover.default.title"),
            message: template_ref("pushover.default.message"),
            url: template_ref("pushover.default.url"),
            url_title: String::new(),
            device: String::new(),
            sound: String::new(),
            priority: r#"{{ if eq .Status "firing" }}2{{ else }}0{{ end }}"#.to_string(),
            retry: FractionalDuration(Duration::from_secs(60)),
            expire: FractionalDuration(Duration::from_secs(3600)),
            ttl: FractionalDuration::default(),
            html: false,
        }
    }
}

validated_serde!(PushoverConfig);
impl_http_integration!(PushoverConfig, "pushover");

impl Validate for PushoverConfig {
    fn validate(&mut self) -> Result<(), ConfigError> {
        exactly_one(&[
            ("user_key", !self.user_key.is_empty()),
            ("user_key_file", !self.user_key_file.is_empty()),
        ])?;
        exactly_one(&[
            ("token", !self.token.is_empty()),
            ("token_file", !self.token_file.is_empty()),
        ])
    }
}
