use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{impl_http_integration, template_ref};
use crate::config::duration::ModelDuration;
use crate::config::http::HttpClientConfig;
use crate::config::url::Url;
use crate::config::validation::{Validate, validated_serde};
use crate::error::ConfigError;

/// Jira issue notifier.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(remote = "Self", default)]
pub struct JiraConfig {
    pub send_resolved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_config: Option<HttpClientConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_url: Option<Url>,
    pub project: String,
    pub summary: String,
    pub description: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
    pub priority: String,
    pub issue_type: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub reopen_transition: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub resolve_transition: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub wont_fix_resolution: String,
    #[serde(skip_serializing_if = "ModelDuration::is_zero")]
    pub reopen_duration: ModelDuration,
    /// Custom issue fields, passed through as-is.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub fields: BTreeMap<String, serde_json::Value>,
}

impl Default for JiraConfig {
    fn default() -> Self {
        Self {
            send_resolved: true,
            http_config: None,
            api_url: None,
            project: String::new(),
            summary: template_ref("jira.default.summary"),
            description: template_ref("jira.default.description"),
            labels: Vec::new(),
            priority: template_ref("jira.default.priority"),
            issue_type: String::new(),
            reopen_transition: String::new(),
            resolve_transition: String::new(),
            wont_fix_resolution: String::new(),
            reopen_duration: ModelDuration::default(),
            fields: BTreeMap::new(),
        }
    }
}

validated_serde!(JiraConfig);
impl_http_integration!(JiraConfig, "jira");

impl Validate for JiraConfig {
    fn validate(&mut self) -> Result<(), ConfigError> {
        if self.project.is_empty() {
            return Err(ConfigError::invalid("missing project in jira_config"));
        }
        if self.issue_type.is_empty() {
            return Err(ConfigError::invalid("missing issue_type in jira_config"));
        }
        Ok(())
    }
}
