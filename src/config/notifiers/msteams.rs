//! Microsoft Teams notifiers: the legacy connector card (`msteams`) and the
//! Power Automate workflow flavor (`msteamsv2`).

use serde::{Deserialize, Serialize};

use super::{impl_http_integration, template_ref};
use crate::config::http::HttpClientConfig;
use crate::config::url::SecretUrl;
use crate::config::validation::{Validate, exactly_one, validated_serde};
use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(remote = "Self", default)]
pub struct MsTeamsConfig {
    pub send_resolved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_config: Option<HttpClientConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook_url: Option<SecretUrl>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub webhook_url_file: String,
    pub title: String,
    pub summary: String,
    pub text: String,
}

impl Default for MsTeamsConfig {
    fn default() -> Self {
        Self {
            send_resolved: true,
            http_config: None,
            webhook_url: None,
            webhook_url_file: String::new(),
            title: template_ref("msteams.default.title"),
            summary: template_ref("msteams.default.summary"),
            text: template_ref("msteams.default.text"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(remote = "Self", default)]
pub struct MsTeamsV2Config {
    pub send_resolved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_config: Option<HttpClientConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook_url: Option<SecretUrl>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub webhook_url_file: String,
    pub title: String,
    pub text: String,
}

impl Default for MsTeamsV2Config {
    fn default() -> Self {
        Self {
            send_resolved: true,
            http_config: None,
            webhook_url: None,
            webhook_url_file: String::new(),
            title: template_ref("msteamsv2.default.title"),
            text: template_ref("msteamsv2.default.text"),
        }
    }
}

validated_serde!(MsTeamsConfig, MsTeamsV2Config);
impl_http_integration!(MsTeamsConfig, "msteams");
impl_http_integration!(MsTeamsV2Config, "msteamsv2");

impl Validate for MsTeamsConfig {
    fn validate(&mut self) -> Result<(), ConfigError> {
        exactly_one(&[
            ("webhook_url", self.webhook_url.is_some()),
            ("webhook_url_file", !self.webhook_url_file.is_empty()),
        ])
    }
}

impl Validate for MsTeamsV2Config {
    fn validate(&mut self) -> Result<(), ConfigError> {
        exactly_one(&[
            ("webhook_url", self.webhook_url.is_some()),
            ("webhook_url_file", !self.webhook_url_file.is_empty()),
        ])
    }
}
