//! PagerDuty notifier (Events API v1 service keys and v2 routing keys).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{impl_http_integration, template_ref};
use crate::config::http::HttpClientConfig;
use crate::config::secret::Secret;
use crate::config::url::Url;
use crate::config::validation::{Validate, at_most_one, validated_serde};
use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(remote = "Self", default)]
pub struct PagerdutyConfig {
    pub send_resolved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_config: Option<HttpClientConfig>,
    #[serde(skip_serializing_if = "Secret::is_empty")]
    pub service_key: Secret,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub service_key_file: String,
    #[serde(skip_serializing_if = "Secret::is_empty")]
    pub routing_key: Secret,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub routing_key_file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<Url>,
    pub client: String,
    pub client_url: String,
    pub description: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub details: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<PagerdutyImage>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<PagerdutyLink>>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub source: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub severity: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub class: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub component: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub group: String,
}

impl Default for PagerdutyConfig {
    fn default() -> Self {
        Self {
            send_resolved: true,
            http_config: None,
            service_key: Secret::default(),
            service_key_file: String::new(),
            routing_key: Secret::default(),
            routing_key_file: String::new(),
            url: None,
            client: template_ref("pagerduty.default.client"),
            client_url: template_ref("pagerduty.default.clientURL"),
            description: template_ref("pagerduty.default.description"),
            details: default_pagerduty_details(),
            images: None,
            links: None,
            source: String::new(),
            severity: "error".to_string(),
            class: String::new(),
            component: String::new(),
            group: String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PagerdutyImage {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub src: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub alt: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub href: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PagerdutyLink {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub href: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub text: String,
}

/// Details attached to every event unless the config overrides the key.
pub fn default_pagerduty_details() -> BTreeMap<String, String> {
    BTreeMap::from([
        (
            "firing".to_string(),
            r#"{{ template "pagerduty.default.instances" .Alerts.Firing }}"#.to_string(),
        ),
        (
            "resolved".to_string(),
            r#"{{ template "pagerduty.default.instances" .Alerts.Resolved }}"#.to_string(),
        ),
        ("num_firing".to_string(), "{{ .Alerts.Firing | len }}".to_string()),
        ("num_resolved".to_string(), "{{ .Alerts.Resolved | len }}".to_string()),
    ])
}

validated_serde!(PagerdutyConfig);
impl_http_integration!(PagerdutyConfig, "pagerduty");

impl Validate for PagerdutyConfig {
    fn validate(&mut self) -> Result<(), ConfigError> {
        if self.routing_key.is_empty()
            && self.service_key.is_empty()
            && self.routing_key_file.is_empty()
            && self.service_key_file.is_empty()
        {
            return Err(ConfigError::invalid(
                "missing service or routing key in PagerDuty config",
            ));
        }
        at_most_one(&[
            ("routing_key", !self.routing_key.is_empty()),
            ("routing_key_file", !self.routing_key_file.is_empty()),
        ])?;
        at_most_one(&[
            ("service_key", !self.service_key.is_empty()),
            ("service_key_file", !self.service_key_file.is_empty()),
        ])?;

        for (key, value) in default_pagerduty_details() {
            self.details.entry(key).or_insert(value);
        }
        if self.source.is_empty() {
            self.source = self.client.clone();
        }
        Ok(())
    }
}
