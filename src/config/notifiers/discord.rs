use serde::{Deserialize, Serialize};

use super::{impl_http_integration, template_ref};
use crate::config::http::HttpClientConfig;
use crate::config::url::SecretUrl;
use crate::config::validation::{Validate, exactly_one, validated_serde};
use crate::error::ConfigError;

/// Discord webhook notifier.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(remote = "Self", default)]
pub struct DiscordConfig {
    pub send_resolved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_config: Option<HttpClientConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook_url: Option<SecretUrl>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub webhook_url_file: String,
    pub title: String,
    pub message: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub content: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub username: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub avatar_url: String,
}

impl Default for DiscordConfig {
    fn default() -> Self {
        Self {
            send_resolved: true,
            http_config: None,
            webhook_url: None,
            webhook_url_file: String::new(),
            title: template_ref("discord.default.title"),
            message: template_ref("discord.default.message"),
            content: String::new(),
            username: String::new(),
            avatar_url: String::new(),
        }
    }
}

validated_serde!(DiscordConfig);
impl_http_integration!(DiscordConfig, "discord");

impl Validate for DiscordConfig {
    fn validate(&mut self) -> Result<(), ConfigError> {
        exactly_one(&[
            ("webhook_url", self.webhook_url.is_some()),
            ("webhook_url_file", !self.webhook_url_file.is_empty()),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discord_requires_webhook() {
        let err = serde_yaml::from_str::<DiscordConfig>("title: t").unwrap_err();
        assert!(err.to_string().contains("one of webhook_url or webhook_url_file"));
    }

    #[test]
    fn discord_masked_url_is_accepted() {
        let cfg: DiscordConfig = serde_yaml::from_str("webhook_url: <secret>").unwrap();
        assert!(cfg.webhook_url.unwrap().is_masked());
    }
}
