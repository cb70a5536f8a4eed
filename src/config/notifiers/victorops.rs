use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{impl_http_integration, template_ref};
use crate::config::http::HttpClientConfig;
use crate::config::secret::Secret;
use crate::config::url::Url;
use crate::config::validation::{Validate, at_most_one, validated_serde};
use crate::error::ConfigError;

/// Fields VictorOps fills itself; a config may not override them.
const RESERVED_FIELDS: &[&str] = &[
    "routing_key",
    "message_type",
    "state_message",
    "entity_display_name",
    "monitoring_tool",
    "entity_id",
    "entity_state",
];

/// Splunk On-Call (VictorOps) notifier.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(remote = "Self", default)]
pub struct VictorOpsConfig {
    pub send_resolved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_config: Option<HttpClientConfig>,
    #[serde(skip_serializing_if = "Secret::is_empty")]
    pub api_key: Secret,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub api_key_file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_url: Option<Url>,
    pub routing_key: String,
    pub message_type: String,
    pub state_message: String,
    pub entity_display_name: String,
    pub monitoring_tool: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub custom_fields: BTreeMap<String, String>,
}

impl Default for VictorOpsConfig {
    fn default() -> Self {
        Self {
            send_resolved: true,
            http_config: None,
            api_key: Secret::default(),
            api_key_file: String::new(),
            api_url: None,
            routing_key: String::new(),
            message_type: "CRITICAL".to_string(),
            state_message: template_ref("victorops.default.state_message"),
            entity_display_name: template_ref("victorops.default.entity_display_name"),
            monitoring_tool: template_ref("victorops.default.monitoring_tool"),
            custom_fields: BTreeMap::new(),
        }
    }
}

validated_serde!(VictorOpsConfig);
impl_http_integration!(VictorOpsConfig, "victorops");

impl Validate for VictorOpsConfig {
    fn validate(&mut self) -> Result<(), ConfigError> {
        if self.routing_key.is_empty() {
            return Err(ConfigError::invalid("missing Routing key in VictorOps config"));
        }
        at_most_one(&[
            ("api_key", !self.api_key.is_empty()),
            ("api_key_file", !self.api_key_file.is_empty()),
        ])?;
        if let Some(reserved) = self
            .custom_fields
            .keys()
            .find(|key| RESERVED_FIELDS.contains(&key.as_str()))
        {
            return Err(ConfigError::invalid(format!(
                "victorOps config contains custom field {} which cannot be used as it conflicts with the fixed/static fields",
                reserved
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn victorops_requires_routing_key() {
        let err = serde_yaml::from_str::<VictorOpsConfig>("api_key: k").unwrap_err();
        assert!(err.to_string().contains("missing Routing key in VictorOps config"));
    }

    #[test]
    fn victorops_reserved_custom_field_fails() {
        let yaml = "routing_key: ops\ncustom_fields:\n  entity_state: x";
        let err = serde_yaml::from_str::<VictorOpsConfig>(yaml).unwrap_err();
        assert!(err.to_string().contains("custom field entity_state"));
    }

    #[test]
    fn victorops_defaults() {
        let yaml = "routing_key: ops\ncustom_fields:\n  team: sre";
        let cfg: VictorOpsConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cfg.message_type, "CRITICAL");
        assert_eq!(cfg.custom_fields.get("team").unwrap(), "sre");
    }
}
