//! Receivers: a named bundle of integrations a route notifies.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::http::HttpClientConfig;
use super::notifiers::{
    DiscordConfig, EmailConfig, Integration, JiraConfig, MsTeamsConfig, MsTeamsV2Config,
    OpsGenieConfig, PagerdutyConfig, PushoverConfig, SlackConfig, SnsConfig, TelegramConfig,
    VictorOpsConfig, WebexConfig, WebhookConfig, WechatConfig,
};
use super::validation::{Validate, validated_serde};
use crate::error::{ConfigError, SecretsError};

/// Which flavor of integrations a receiver holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReceiverType {
    /// Grafana-managed integrations only.
    Grafana,
    /// Upstream Alertmanager integrations only.
    Alertmanager,
    /// No integration at all; compatible with either flavor.
    Empty,
}

impl ReceiverType {
    pub fn is_compatible(self, other: ReceiverType) -> bool {
        self == other || self == ReceiverType::Empty || other == ReceiverType::Empty
    }
}

impl std::fmt::Display for ReceiverType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReceiverType::Grafana => f.write_str("grafana"),
            ReceiverType::Alertmanager => f.write_str("alertmanager"),
            ReceiverType::Empty => f.write_str("empty"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(remote = "Self", default)]
pub struct Receiver {
    pub name: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub grafana_managed_receiver_configs: Vec<GrafanaReceiver>,

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

validated_serde!(Receiver);

impl Validate for Receiver {
    fn validate(&mut self) -> Result<(), ConfigError> {
        if self.name.is_empty() {
            return Err(ConfigError::invalid("missing name in receiver"));
        }
        if !self.grafana_managed_receiver_configs.is_empty() && self.alertmanager_integrations() > 0
        {
            return Err(ConfigError::invalid(format!(
                "receiver {:?} cannot mix Alertmanager & Grafana integrations",
                self.name
            )));
        }
        Ok(())
    }
}

fn http_slots<'a, T: Integration>(
    slots: &mut Vec<&'a mut Option<HttpClientConfig>>,
    configs: &'a mut [T],
) {
    slots.extend(configs.iter_mut().filter_map(|c| c.http_config_mut()));
}

impl Receiver {
    pub fn new(name: impl Into<String>) -> Self {
        Receiver {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Number of upstream integrations across all kinds.
    pub fn alertmanager_integrations(&self) -> usize {
        self.discord_configs.len()
            + self.email_configs.len()
            + self.pagerduty_configs.len()
            + self.slack_configs.len()
            + self.webhook_configs.len()
            + self.opsgenie_configs.len()
            + self.wechat_configs.len()
            + self.pushover_configs.len()
            + self.victorops_configs.len()
            + self.sns_configs.len()
            + self.telegram_configs.len()
            + self.webex_configs.len()
            + self.msteams_configs.len()
            + self.msteamsv2_configs.len()
            + self.jira_configs.len()
    }

    pub fn receiver_type(&self) -> ReceiverType {
        if !self.grafana_managed_receiver_configs.is_empty() {
            ReceiverType::Grafana
        } else if self.alertmanager_integrations() > 0 {
            ReceiverType::Alertmanager
        } else {
            ReceiverType::Empty
        }
    }

    pub fn is_empty(&self) -> bool {
        self.receiver_type() == ReceiverType::Empty
    }

    /// HTTP client slots of every upstream integration that speaks HTTP.
    pub fn http_configs_mut(&mut self) -> Vec<&mut Option<HttpClientConfig>> {
        let mut slots = Vec::new();
        http_slots(&mut slots, &mut self.discord_configs);
        http_slots(&mut slots, &mut self.pagerduty_configs);
        http_slots(&mut slots, &mut self.slack_configs);
        http_slots(&mut slots, &mut self.webhook_configs);
        http_slots(&mut slots, &mut self.opsgenie_configs);
        http_slots(&mut slots, &mut self.wechat_configs);
        http_slots(&mut slots, &mut self.pushover_configs);
        http_slots(&mut slots, &mut self.victorops_configs);
        http_slots(&mut slots, &mut self.sns_configs);
        http_slots(&mut slots, &mut self.telegram_configs);
        http_slots(&mut slots, &mut self.webex_configs);
        http_slots(&mut slots, &mut self.msteams_configs);
        http_slots(&mut slots, &mut self.msteamsv2_configs);
        http_slots(&mut slots, &mut self.jira_configs);
        slots
    }
}

/// A Grafana-managed integration. Its settings are opaque to this crate;
/// `secure_settings` values are base64 of the encrypted bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(remote = "Self", default, rename_all = "camelCase")]
pub struct GrafanaReceiver {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub uid: String,
    pub name: String,
    #[serde(rename = "type")]
    pub integration_type: String,
    pub disable_resolve_message: bool,
    pub settings: serde_json::Value,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub secure_settings: BTreeMap<String, String>,
}

validated_serde!(GrafanaReceiver);

impl Validate for GrafanaReceiver {
    fn validate(&mut self) -> Result<(), ConfigError> {
        if self.integration_type.is_empty() {
            return Err(ConfigError::invalid(format!(
                "missing type in Grafana receiver {:?}",
                self.name
            )));
        }
        if self.settings.is_null() {
            self.settings = serde_json::Value::Object(serde_json::Map::new());
        }
        Ok(())
    }
}

impl GrafanaReceiver {
    /// Decodes and decrypts every secure setting with the caller's `decrypt`
    /// function. The first failure aborts; nothing is retried.
    pub fn decrypt_secure_settings<F, E>(
        &self,
        decrypt: F,
    ) -> Result<BTreeMap<String, String>, SecretsError>
    where
        F: Fn(&[u8]) -> Result<Vec<u8>, E>,
        E: std::fmt::Display,
    {
        let mut decrypted = BTreeMap::new();
        for (key, encoded) in &self.secure_settings {
            let bytes = STANDARD.decode(encoded).map_err(|e| SecretsError::Decode {
                key: key.clone(),
                message: e.to_string(),
            })?;
            let plain = decrypt(&bytes).map_err(|e| SecretsError::Decrypt {
                key: key.clone(),
                message: e.to_string(),
            })?;
            let value =
                String::from_utf8(plain).map_err(|_| SecretsError::Utf8 { key: key.clone() })?;
            decrypted.insert(key.clone(), value);
        }
        Ok(decrypted)
    }
}
