use serde::{Deserialize, Serialize};

use super::{impl_http_integration, template_ref};
use crate::config::http::HttpClientConfig;
use crate::config::url::Url;
use crate::config::validation::{Validate, validated_serde};
use crate::error::ConfigError;

/// Cisco Webex room notifier. The bot token travels in
/// `http_config.authorization`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(remote = "Self", default)]
pub struct WebexConfig {
    pub send_resolved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_config: Option<HttpClientConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_url: Option<Url>,
    pub message: String,
    pub room_id: String,
}

impl Default for WebexConfig {
    fn default() -> Self {
        Self {
            send_resolved: true,
            http_config: None,
            api_url: None,
            message: template_ref("webex.default.message"),
            room_id: String::new(),
        }
    }
}

validated_serde!(WebexConfig);
impl_http_integration!(WebexConfig, "webex");

impl Validate for WebexConfig {
    fn validate(&mut self) -> Result<(), ConfigError> {
        if self.room_id.is_empty() {
            return Err(ConfigError::invalid("missing room_id on webex_config"));
        }
        match &self.http_config {
            None => Err(ConfigError::invalid("missing webex_configs.http_config")),
            Some(http) if http.authorization.is_none() => Err(ConfigError::invalid(
                "missing webex_configs.http_config.authorization",
            )),
            Some(_) => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn webex_requires_room_and_authorization() {
        let err = serde_yaml::from_str::<WebexConfig>("message: hi").unwrap_err();
        assert!(err.to_string().contains("missing room_id"));

        let err = serde_yaml::from_str::<WebexConfig>("room_id: r").unwrap_err();
        assert!(err.to_string().contains("missing webex_configs.http_config"));

        let yaml = "room_id: r\nhttp_config:\n  follow_redirects: false";
        let err = serde_yaml::from_str::<WebexConfig>(yaml).unwrap_err();
        assert!(err.to_string().contains("http_config.authorization"));
    }

    #[test]
    fn webex_accepts_bearer_token_folded_into_authorization() {
        let yaml = "room_id: r\nhttp_config:\n  bearer_token: xyz";
        let cfg: WebexConfig = serde_yaml::from_str(yaml).unwrap();
        let auth = cfg.http_config.unwrap().authorization.unwrap();
        assert_eq!(auth.auth_type, "Bearer");
        assert_eq!(auth.credentials.expose(), "xyz");
    }
}
