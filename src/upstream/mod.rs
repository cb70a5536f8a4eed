//! The upstream (Mimir / Alertmanager) wire shapes.
//!
//! These are plain data types without decode-time rules: they are produced
//! from validated local values by [`crate::compat`], or read from documents
//! that the upstream side has already checked. Field names match the local
//! schema; the differences are structural (nested proxy settings, an
//! embedded [`NotifierConfig`], a transparent [`Duration`]).

mod http;
mod notifiers;

pub use http::{HttpClientConfig, OAuth2, ProxyConfig};
pub use notifiers::{
    DiscordConfig, EmailConfig, JiraConfig, MsTeamsConfig, MsTeamsV2Config, OpsGenieConfig,
    OpsGenieResponder, PagerdutyConfig, PagerdutyImage, PagerdutyLink, PushoverConfig,
    SigV4Config, SlackAction, SlackConfig, SlackConfirmationField, SlackField, SnsConfig,
    TelegramConfig, VictorOpsConfig, WebexConfig, WebhookConfig, WechatConfig,
};

use serde::{Deserialize, Serialize};

use crate::config::{format_go_duration, parse_go_duration};

/// A plain span of time.
///
/// Serialized in Go notation (`1.5s`); decoding also accepts a number of
/// seconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Duration(pub std::time::Duration);

impl Duration {
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl From<std::time::Duration> for Duration {
    fn from(d: std::time::Duration) -> Self {
        Duration(d)
    }
}

impl Serialize for Duration {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&format_go_duration(self.0))
    }
}

impl<'de> Deserialize<'de> for Duration {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Seconds(f64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Seconds(secs) => std::time::Duration::try_from_secs_f64(secs)
                .map(Duration)
                .map_err(|_| serde::de::Error::custom(format!("invalid duration {}", secs))),
            Raw::Text(s) => parse_go_duration(&s)
                .map(Duration)
                .map_err(serde::de::Error::custom),
        }
    }
}

/// Settings every upstream integration embeds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct NotifierConfig {
    pub send_resolved: bool,
}

impl NotifierConfig {
    pub fn new(send_resolved: bool) -> Self {
        NotifierConfig { send_resolved }
    }
}

/// An upstream receiver. It has no slot for Grafana-managed integrations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Receiver {
    pub name: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub discord_configs: Vec<DiscordConfig>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub email_configs: Vec<EmailConfig>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub pagerduty_configs: Vec<PagerdutyConfig>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub slack_configs: Vec<SlackConfig>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub webhook_configs: Vec<WebhookConfig>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub opsgenie_configs: Vec<OpsGenieConfig>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub wechat_configs: Vec<WechatConfig>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub pushover_configs: Vec<PushoverConfig>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub victorops_configs: Vec<VictorOpsConfig>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sns_configs: Vec<SnsConfig>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub telegram_configs: Vec<TelegramConfig>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub webex_configs: Vec<WebexConfig>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub msteams_configs: Vec<MsTeamsConfig>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub msteamsv2_configs: Vec<MsTeamsV2Config>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub jira_configs: Vec<JiraConfig>,
}
