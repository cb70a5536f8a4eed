//! Slack notifier.

use serde::{Deserialize, Serialize};

use super::{impl_http_integration, template_ref};
use crate::config::http::HttpClientConfig;
use crate::config::url::SecretUrl;
use crate::config::validation::{Validate, at_most_one, validated_serde};
use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(remote = "Self", default)]
pub struct SlackConfig {
    pub send_resolved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_config: Option<HttpClientConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_url: Option<SecretUrl>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub api_url_file: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub channel: String,
    pub username: String,
    pub color: String,
    pub title: String,
    pub title_link: String,
    pub pretext: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<SlackField>>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub short_fields: bool,
    pub footer: String,
    pub fallback: String,
    pub callback_id: String,
    pub icon_emoji: String,
    pub icon_url: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub image_url: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub thumb_url: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub link_names: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mrkdwn_in: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actions: Option<Vec<SlackAction>>,
}

impl Default for SlackConfig {
    fn default() -> Self {
        Self {
            send_resolved: false,
            http_config: None,
            api_url: None,
            api_url_file: String::new(),
            channel: String::new(),
            username: template_ref("slack.default.username"),
            color: r#"{{ if eq .Status "firing" }}danger{{ else }}good{{ end }}"#.to_string(),
            title: template_ref("slack.default.title"),
            title_link: template_ref("slack.default.titlelink"),
            pretext: template_ref("slack.default.pretext"),
            text: template_ref("slack.default.text"),
            fields: None,
            short_fields: false,
            footer: template_ref("slack.default.footer"),
            fallback: template_ref("slack.default.fallback"),
            callback_id: template_ref("slack.default.callbackid"),
            icon_emoji: template_ref("slack.default.iconemoji"),
            icon_url: template_ref("slack.default.iconurl"),
            image_url: String::new(),
            thumb_url: String::new(),
            link_names: false,
            mrkdwn_in: None,
            actions: None,
        }
    }
}

/// An attachment field rendered as a small table cell.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(remote = "Self", default)]
pub struct SlackField {
    pub title: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short: Option<bool>,
}

/// An interactive message button.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(remote = "Self", default)]
pub struct SlackAction {
    #[serde(rename = "type")]
    pub action_type: String,
    pub text: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub url: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub style: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirm: Option<SlackConfirmationField>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(remote = "Self", default)]
pub struct SlackConfirmationField {
    pub text: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub title: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub ok_text: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub dismiss_text: String,
}

validated_serde!(SlackConfig, SlackField, SlackAction, SlackConfirmationField);
impl_http_integration!(SlackConfig, "slack");

impl Validate for SlackConfig {
    fn validate(&mut self) -> Result<(), ConfigError> {
        at_most_one(&[
            ("api_url", self.api_url.is_some()),
            ("api_url_file", !self.api_url_file.is_empty()),
        ])
    }
}

impl Validate for SlackField {
    fn validate(&mut self) -> Result<(), ConfigError> {
        if self.title.is_empty() {
            return Err(ConfigError::invalid(
                "missing title in Slack field configuration",
            ));
        }
        if self.value.is_empty() {
            return Err(ConfigError::invalid(
                "missing value in Slack field configuration",
            ));
        }
        Ok(())
    }
}

impl Validate for SlackAction {
    fn validate(&mut self) -> Result<(), ConfigError> {
        if self.action_type.is_empty() {
            return Err(ConfigError::invalid(
                "missing type in Slack action configuration",
            ));
        }
        if self.text.is_empty() {
            return Err(ConfigError::invalid(
                "missing text in Slack action configuration",
            ));
        }
        if self.url.is_empty() && self.name.is_empty() {
            return Err(ConfigError::invalid(
                "missing name or url in Slack action configuration",
            ));
        }
        Ok(())
    }
}

impl Validate for SlackConfirmationField {
    fn validate(&mut self) -> Result<(), ConfigError> {
        if self.text.is_empty() {
            return Err(ConfigError::invalid(
                "missing text in Slack confirmation configuration",
            ));
        }
        Ok(())
    }
}
