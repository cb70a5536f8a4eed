use serde::{Deserialize, Serialize};

use super::{impl_http_integration, template_ref};
use crate::config::http::HttpClientConfig;
use crate::config::secret::Secret;
use crate::config::url::Url;
use crate::config::validation::{Validate, validated_serde};
use crate::error::ConfigError;

/// WeChat Work notifier.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(remote = "Self", default)]
pub struct WechatConfig {
    pub send_resolved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_config: Option<HttpClientConfig>,
    #[serde(skip_serializing_if = "Secret::is_empty")]
    pub api_secret: Secret,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub corp_id: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_url: Option<Url>,
    pub to_user: String,
    pub to_party: String,
    pub to_tag: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub agent_id: String,
    pub message_type: String,
}

impl Default for WechatConfig {
    fn default() -> Self {
        Self {
            send_resolved: false,
            http_config: None,
            api_secret: Secret::default(),
            corp_id: String::new(),
            message: template_ref("wechat.default.message"),
            api_url: None,
            to_user: template_ref("wechat.default.to_user"),
            to_party: template_ref("wechat.default.to_party"),
            to_tag: template_ref("wechat.default.to_tag"),
            agent_id: template_ref("wechat.default.agent_id"),
            message_type: "text".to_string(),
        }
    }
}

validated_serde!(WechatConfig);
impl_http_integration!(WechatConfig, "wechat");

impl Validate for WechatConfig {
    fn validate(&mut self) -> Result<(), ConfigError> {
        if self.message_type.is_empty() {
            self.message_type = "text".to_string();
        }
        if self.message_type != "text" && self.message_type != "markdown" {
            return Err(ConfigError::invalid(format!(
                "weChat message type {:?} does not match valid options text,markdown",
                self.message_type
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wechat_message_type_defaults_to_text() {
        let cfg: WechatConfig = serde_yaml::from_str("message_type: ''").unwrap();
        assert_eq!(cfg.message_type, "text");
        assert!(!cfg.send_resolved);
    }

    #[test]
    fn wechat_markdown_is_accepted() {
        let cfg: WechatConfig = serde_yaml::from_str("message_type: markdown").unwrap();
        assert_eq!(cfg.message_type, "markdown");
    }

    #[test]
    fn wechat_unknown_message_type_fails() {
        let err = serde_yaml::from_str::<WechatConfig>("message_type: html").unwrap_err();
        assert!(err.to_string().contains("does not match valid options"));
    }
}
