//! OpsGenie notifier.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{impl_http_integration, template_ref};
use crate::config::http::HttpClientConfig;
use crate::config::secret::Secret;
use crate::config::url::Url;
use crate::config::validation::{Validate, at_most_one, is_templated, validated_serde};
use crate::error::ConfigError;

const RESPONDER_TYPES: &[&str] = &["team", "teams", "user", "escalation", "schedule"];

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(remote = "Self", default)]
pub struct OpsGenieConfig {
    pub send_resolved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_config: Option<HttpClientConfig>,
    #[serde(skip_serializing_if = "Secret::is_empty")]
    pub api_key: Secret,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub api_key_file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_url: Option<Url>,
    pub message: String,
    pub description: String,
    pub source: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub details: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub entity: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responders: Option<Vec<OpsGenieResponder>>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub actions: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub tags: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub note: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub priority: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub update_alerts: bool,
}

impl Default for OpsGenieConfig {
    fn default() -> Self {
        Self {
            send_resolved: true,
            http_config: None,
            api_key: Secret::default(),
            api_key_file: String::new(),
            api_url: None,
            message: template_ref("opsgenie.default.message"),
            description: template_ref("opsgenie.default.description"),
            source: template_ref("opsgenie.default.source"),
            details: BTreeMap::new(),
            entity: String::new(),
            responders: None,
            actions: String::new(),
            tags: String::new(),
            note: String::new(),
            priority: String::new(),
            update_alerts: false,
        }
    }
}

/// A team, user, escalation or schedule the alert is routed to.
///
/// Exactly how OpsGenie resolves it depends on which of `id`, `name` and
/// `username` is set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpsGenieResponder {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub username: String,
    #[serde(rename = "type", skip_serializing_if = "String::is_empty")]
    pub responder_type: String,
}

validated_serde!(OpsGenieConfig);
impl_http_integration!(OpsGenieConfig, "opsgenie");

impl Validate for OpsGenieConfig {
    fn validate(&mut self) -> Result<(), ConfigError> {
        at_most_one(&[
            ("api_key", !self.api_key.is_empty()),
            ("api_key_file", !self.api_key_file.is_empty()),
        ])?;

        for responder in self.responders.iter().flatten() {
            if responder.id.is_empty() && responder.username.is_empty() && responder.name.is_empty()
            {
                return Err(ConfigError::invalid(format!(
                    "opsGenieConfig responder {:?} has to have at least one of id, username or name specified",
                    responder
                )));
            }
            if is_templated(&responder.responder_type) {
                continue;
            }
            let kind = responder.responder_type.to_lowercase();
            if !RESPONDER_TYPES.contains(&kind.as_str()) {
                return Err(ConfigError::invalid(format!(
                    "opsGenieConfig responder type {:?} does not match valid options {}",
                    responder.responder_type,
                    RESPONDER_TYPES.join("|")
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opsgenie_defaults() {
        let cfg: OpsGenieConfig = serde_yaml::from_str("api_key: k").unwrap();
        assert!(cfg.send_resolved);
        assert_eq!(cfg.message, "{{ template \"opsgenie.default.message\" . }}");
        assert!(cfg.responders.is_none());
    }

    #[test]
    fn opsgenie_responder_needs_identity() {
        let yaml = "responders:\n  - type: team";
        let err = serde_yaml::from_str::<OpsGenieConfig>(yaml).unwrap_err();
        assert!(err.to_string().contains("at least one of id, username or name"));
    }

    #[test]
    fn opsgenie_responder_type_is_case_insensitive() {
        let yaml = "responders:\n  - name: sre\n    type: Team";
        let cfg: OpsGenieConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cfg.responders.unwrap()[0].responder_type, "Team");
    }

    #[test]
    fn opsgenie_responder_type_rejects_unknown() {
        let yaml = "responders:\n  - name: sre\n    type: squad";
        let err = serde_yaml::from_str::<OpsGenieConfig>(yaml).unwrap_err();
        assert!(err.to_string().contains("does not match valid options"));
    }

    #[test]
    fn opsgenie_templated_responder_type_is_accepted() {
        let yaml = "responders:\n  - name: sre\n    type: '{{ .CommonLabels.kind }}'";
        assert!(serde_yaml::from_str::<OpsGenieConfig>(yaml).is_ok());
    }
}
