use serde::{Deserialize, Serialize};

use super::{impl_http_integration, template_ref};
use crate::config::http::HttpClientConfig;
use crate::config::secret::Secret;
use crate::config::url::Url;
use crate::config::validation::{Validate, at_most_one, validated_serde};
use crate::error::ConfigError;

const PARSE_MODES: &[&str] = &["", "Markdown", "MarkdownV2", "HTML"];

/// Telegram bot notifier.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(remote = "Self", default)]
pub struct TelegramConfig {
    pub send_resolved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_config: Option<HttpClientConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_url: Option<Url>,
    #[serde(skip_serializing_if = "Secret::is_empty")]
    pub bot_token: Secret,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub bot_token_file: String,
    pub chat_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_thread_id: Option<i64>,
    pub message: String,
    pub disable_notifications: bool,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub parse_mode: String,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            send_resolved: true,
            http_config: None,
            api_url: None,
            bot_token: Secret::default(),
            bot_token_file: String::new(),
            chat_id: 0,
            message_thread_id: None,
            message: template_ref("telegram.default.message"),
            disable_notifications: false,
            parse_mode: "HTML".to_string(),
        }
    }
}

validated_serde!(TelegramConfig);
impl_http_integration!(TelegramConfig, "telegram");

impl Validate for TelegramConfig {
    fn validate(&mut self) -> Result<(), ConfigError> {
        if self.bot_token.is_empty() && self.bot_token_file.is_empty() {
            return Err(ConfigError::invalid(
                "missing bot_token or bot_token_file on telegram_config",
            ));
        }
        at_most_one(&[
            ("bot_token", !self.bot_token.is_empty()),
            ("bot_token_file", !self.bot_token_file.is_empty()),
        ])?;
        if self.chat_id == 0 {
            return Err(ConfigError::invalid("missing chat_id on telegram_config"));
        }
        if !PARSE_MODES.contains(&self.parse_mode.as_str()) {
            return Err(ConfigError::invalid(
                "unknown parse_mode on telegram_config, must be Markdown, MarkdownV2, HTML or empty string",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn telegram_requires_token_and_chat() {
        let err = serde_yaml::from_str::<TelegramConfig>("chat_id: 12").unwrap_err();
        assert!(err.to_string().contains("missing bot_token or bot_token_file"));
        let err = serde_yaml::from_str::<TelegramConfig>("bot_token: t").unwrap_err();
        assert!(err.to_string().contains("missing chat_id"));
    }

    #[test]
    fn telegram_parse_mode_whitelist() {
        let cfg: TelegramConfig =
            serde_yaml::from_str("bot_token: t\nchat_id: -100\nparse_mode: MarkdownV2").unwrap();
        assert_eq!(cfg.parse_mode, "MarkdownV2");
        let err = serde_yaml::from_str::<TelegramConfig>("bot_token: t\nchat_id: 1\nparse_mode: md")
            .unwrap_err();
        assert!(err.to_string().contains("unknown parse_mode"));
    }

    #[test]
    fn telegram_defaults_to_html() {
        let cfg: TelegramConfig = serde_yaml::from_str("bot_token: t\nchat_id: 5").unwrap();
        assert_eq!(cfg.parse_mode, "HTML");
        assert!(cfg.message_thread_id.is_none());
    }
}
