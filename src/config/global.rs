//! Global defaults shared by every receiver.
//!
//! Upstream-only documents may leave per-integration endpoints and SMTP
//! settings unset; [`GlobalConfig::apply_to`] fills them from here the way
//! Alertmanager does when it loads a config.

use serde::{Deserialize, Serialize};

use super::duration::ModelDuration;
use super::http::HttpClientConfig;
use super::receiver::Receiver;
use super::secret::Secret;
use super::url::{HostPort, SecretUrl, Url};
use super::validation::{Validate, at_most_one, validated_serde};
use crate::error::ConfigError;

pub const DEFAULT_PAGERDUTY_URL: &str = "https://events.pagerduty.com/v2/enqueue";
pub const DEFAULT_OPSGENIE_API_URL: &str = "https://api.opsgenie.com/";
pub const DEFAULT_WECHAT_API_URL: &str = "https://qyapi.weixin.qq.com/cgi-bin/";
pub const DEFAULT_VICTOROPS_API_URL: &str =
    "https://alert.victorops.com/integrations/generic/20131114/alert/";
pub const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";
pub const DEFAULT_WEBEX_API_URL: &str = "https://webexapis.com/v1/messages";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(remote = "Self", default)]
pub struct GlobalConfig {
    pub resolve_timeout: ModelDuration,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_config: Option<HttpClientConfig>,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub smtp_from: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub smtp_hello: String,
    #[serde(skip_serializing_if = "HostPort::is_empty")]
    pub smtp_smarthost: HostPort,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub smtp_auth_username: String,
    #[serde(skip_serializing_if = "Secret::is_empty")]
    pub smtp_auth_password: Secret,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub smtp_auth_password_file: String,
    #[serde(skip_serializing_if = "Secret::is_empty")]
    pub smtp_auth_secret: Secret,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub smtp_auth_identity: String,
    pub smtp_require_tls: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub slack_api_url: Option<SecretUrl>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub slack_api_url_file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagerduty_url: Option<Url>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opsgenie_api_url: Option<Url>,
    #[serde(skip_serializing_if = "Secret::is_empty")]
    pub opsgenie_api_key: Secret,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub opsgenie_api_key_file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wechat_api_url: Option<Url>,
    #[serde(skip_serializing_if = "Secret::is_empty")]
    pub wechat_api_secret: Secret,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub wechat_api_corp_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub victorops_api_url: Option<Url>,
    #[serde(skip_serializing_if = "Secret::is_empty")]
    pub victorops_api_key: Secret,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub victorops_api_key_file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telegram_api_url: Option<Url>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webex_api_url: Option<Url>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jira_api_url: Option<Url>,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        // The constants above are valid URLs.
        let url = |s: &str| Url::parse(s).ok();
        Self {
            resolve_timeout: ModelDuration::from_secs(5 * 60),
            http_config: Some(HttpClientConfig::default()),
            smtp_from: String::new(),
            smtp_hello: "localhost".to_string(),
            smtp_smarthost: HostPort::default(),
            smtp_auth_username: String::new(),
            smtp_auth_password: Secret::default(),
            smtp_auth_password_file: String::new(),
            smtp_auth_secret: Secret::default(),
            smtp_auth_identity: String::new(),
            smtp_require_tls: true,
            slack_api_url: None,
            slack_api_url_file: String::new(),
            pagerduty_url: url(DEFAULT_PAGERDUTY_URL),
            opsgenie_api_url: url(DEFAULT_OPSGENIE_API_URL),
            opsgenie_api_key: Secret::default(),
            opsgenie_api_key_file: String::new(),
            wechat_api_url: url(DEFAULT_WECHAT_API_URL),
            wechat_api_secret: Secret::default(),
            wechat_api_corp_id: String::new(),
            victorops_api_url: url(DEFAULT_VICTOROPS_API_URL),
            victorops_api_key: Secret::default(),
            victorops_api_key_file: String::new(),
            telegram_api_url: url(DEFAULT_TELEGRAM_API_URL),
            webex_api_url: url(DEFAULT_WEBEX_API_URL),
            jira_api_url: None,
        }
    }
}

validated_serde!(GlobalConfig);

impl Validate for GlobalConfig {
    fn validate(&mut self) -> Result<(), ConfigError> {
        at_most_one(&[
            ("smtp_auth_password", !self.smtp_auth_password.is_empty()),
            ("smtp_auth_password_file", !self.smtp_auth_password_file.is_empty()),
        ])?;
        at_most_one(&[
            ("slack_api_url", self.slack_api_url.is_some()),
            ("slack_api_url_file", !self.slack_api_url_file.is_empty()),
        ])?;
        at_most_one(&[
            ("opsgenie_api_key", !self.opsgenie_api_key.is_empty()),
            ("opsgenie_api_key_file", !self.opsgenie_api_key_file.is_empty()),
        ])?;
        at_most_one(&[
            ("victorops_api_key", !self.victorops_api_key.is_empty()),
            ("victorops_api_key_file", !self.victorops_api_key_file.is_empty()),
        ])
    }
}

fn require<T>(value: Option<T>, setting: &'static str) -> Result<T, ConfigError> {
    value.ok_or(ConfigError::MissingGlobalSetting(setting))
}

impl GlobalConfig {
    /// Fills every integration of `receiver` that leaves a setting unset with
    /// the global value, failing when neither side provides a required one.
    pub fn apply_to(&self, receiver: &mut Receiver) -> Result<(), ConfigError> {
        for slot in receiver.http_configs_mut() {
            if slot.is_none() {
                *slot = self.http_config.clone();
            }
        }

        for email in &mut receiver.email_configs {
            if email.smarthost.is_empty() {
                if self.smtp_smarthost.is_empty() {
                    return Err(ConfigError::MissingGlobalSetting("SMTP smarthost"));
                }
                email.smarthost = self.smtp_smarthost.clone();
            }
            if email.from.is_empty() {
                if self.smtp_from.is_empty() {
                    return Err(ConfigError::MissingGlobalSetting("SMTP from"));
                }
                email.from = self.smtp_from.clone();
            }
            if email.hello.is_empty() {
                email.hello = self.smtp_hello.clone();
            }
            if email.auth_username.is_empty() {
                email.auth_username = self.smtp_auth_username.clone();
            }
            // Password and password file are filled together or not at all.
            if email.auth_password.is_empty() && email.auth_password_file.is_empty() {
                email.auth_password = self.smtp_auth_password.clone();
                email.auth_password_file = self.smtp_auth_password_file.clone();
            }
            if email.auth_secret.is_empty() {
                email.auth_secret = self.smtp_auth_secret.clone();
            }
            if email.auth_identity.is_empty() {
                email.auth_identity = self.smtp_auth_identity.clone();
            }
            if email.require_tls.is_none() {
                email.require_tls = Some(self.smtp_require_tls);
            }
        }

        for slack in &mut receiver.slack_configs {
            if slack.api_url.is_none() && slack.api_url_file.is_empty() {
                if self.slack_api_url.is_none() && self.slack_api_url_file.is_empty() {
                    return Err(ConfigError::MissingGlobalSetting("Slack API URL"));
                }
                slack.api_url = self.slack_api_url.clone();
                slack.api_url_file = self.slack_api_url_file.clone();
            }
        }

        for pagerduty in &mut receiver.pagerduty_configs {
            if pagerduty.url.is_none() {
                pagerduty.url = Some(require(self.pagerduty_url.clone(), "PagerDuty URL")?);
            }
        }

        for opsgenie in &mut receiver.opsgenie_configs {
            if opsgenie.api_url.is_none() {
                opsgenie.api_url =
                    Some(require(self.opsgenie_api_url.clone(), "OpsGenie API URL")?);
            }
            if opsgenie.api_key.is_empty() && opsgenie.api_key_file.is_empty() {
                if self.opsgenie_api_key.is_empty() && self.opsgenie_api_key_file.is_empty() {
                    return Err(ConfigError::MissingGlobalSetting("OpsGenie API key"));
                }
                opsgenie.api_key = self.opsgenie_api_key.clone();
                opsgenie.api_key_file = self.opsgenie_api_key_file.clone();
            }
        }

        for wechat in &mut receiver.wechat_configs {
            if wechat.api_url.is_none() {
                wechat.api_url = Some(require(self.wechat_api_url.clone(), "WeChat URL")?);
            }
            if wechat.api_secret.is_empty() {
                if self.wechat_api_secret.is_empty() {
                    return Err(ConfigError::MissingGlobalSetting("WeChat API secret"));
                }
                wechat.api_secret = self.wechat_api_secret.clone();
            }
            if wechat.corp_id.is_empty() {
                if self.wechat_api_corp_id.is_empty() {
                    return Err(ConfigError::MissingGlobalSetting("WeChat corp ID"));
                }
                wechat.corp_id = self.wechat_api_corp_id.clone();
            }
        }

        for victorops in &mut receiver.victorops_configs {
            if victorops.api_url.is_none() {
                victorops.api_url =
                    Some(require(self.victorops_api_url.clone(), "VictorOps URL")?);
            }
            if victorops.api_key.is_empty() && victorops.api_key_file.is_empty() {
                if self.victorops_api_key.is_empty() && self.victorops_api_key_file.is_empty() {
                    return Err(ConfigError::MissingGlobalSetting("VictorOps API key"));
                }
                victorops.api_key = self.victorops_api_key.clone();
                victorops.api_key_file = self.victorops_api_key_file.clone();
            }
        }

        for telegram in &mut receiver.telegram_configs {
            if telegram.api_url.is_none() {
                telegram.api_url = Some(require(self.telegram_api_url.clone(), "Telegram URL")?);
            }
        }

        for webex in &mut receiver.webex_configs {
            if webex.api_url.is_none() {
                webex.api_url = Some(require(self.webex_api_url.clone(), "Webex URL")?);
            }
        }

        for jira in &mut receiver.jira_configs {
            if jira.api_url.is_none() {
                jira.api_url = Some(require(self.jira_api_url.clone(), "Jira URL")?);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn receiver(yaml: &str) -> Receiver {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn defaults_match_alertmanager() {
        let global: GlobalConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(global.resolve_timeout, ModelDuration::from_secs(300));
        assert_eq!(global.smtp_hello, "localhost");
        assert!(global.smtp_require_tls);
        assert_eq!(
            global.pagerduty_url.as_ref().map(Url::as_str),
            Some(DEFAULT_PAGERDUTY_URL)
        );
        assert!(global.http_config.is_some());
        assert!(global.jira_api_url.is_none());
    }

    #[test]
    fn password_and_file_are_exclusive() {
        let yaml = "smtp_auth_password: p\nsmtp_auth_password_file: /p";
        assert!(serde_yaml::from_str::<GlobalConfig>(yaml).is_err());
    }

    #[test]
    fn email_is_filled_from_global() {
        let global: GlobalConfig = serde_yaml::from_str(
            "smtp_smarthost: smtp.example.com:25\nsmtp_from: am@example.com\nsmtp_auth_username: am\nsmtp_require_tls: false",
        )
        .unwrap();
        let mut r = receiver("name: mail\nemail_configs:\n  - to: ops@example.com");
        global.apply_to(&mut r).unwrap();
        let email = &r.email_configs[0];
        assert_eq!(email.smarthost.host, "smtp.example.com");
        assert_eq!(email.from, "am@example.com");
        assert_eq!(email.hello, "localhost");
        assert_eq!(email.auth_username, "am");
        assert_eq!(email.require_tls, Some(false));
    }

    #[test]
    fn email_auth_is_filled_per_field() {
        let global: GlobalConfig = serde_yaml::from_str(
            "smtp_smarthost: smtp.example.com:25\nsmtp_from: am@example.com\nsmtp_auth_username: am\nsmtp_auth_password: globalpw\nsmtp_auth_identity: gid\nsmtp_auth_secret: gsecret",
        )
        .unwrap();
        let mut r = receiver(
            "name: mail\nemail_configs:\n  - to: ops@example.com\n    auth_username: alice\n  - to: dev@example.com\n    auth_password: own\n    auth_identity: mine",
        );
        global.apply_to(&mut r).unwrap();

        let first = &r.email_configs[0];
        assert_eq!(first.auth_username, "alice");
        assert_eq!(first.auth_password.expose(), "globalpw");
        assert_eq!(first.auth_identity, "gid");
        assert_eq!(first.auth_secret.expose(), "gsecret");

        let second = &r.email_configs[1];
        assert_eq!(second.auth_username, "am");
        assert_eq!(second.auth_password.expose(), "own");
        assert_eq!(second.auth_identity, "mine");
    }

    #[test]
    fn email_without_from_fails() {
        let global: GlobalConfig =
            serde_yaml::from_str("smtp_smarthost: smtp.example.com:25").unwrap();
        let mut r = receiver("name: mail\nemail_configs:\n  - to: ops@example.com");
        let err = global.apply_to(&mut r).unwrap_err();
        assert_eq!(err.to_string(), "no global SMTP from set");
    }

    #[test]
    fn email_without_smarthost_fails() {
        let global = GlobalConfig::default();
        let mut r = receiver("name: mail\nemail_configs:\n  - to: ops@example.com");
        let err = global.apply_to(&mut r).unwrap_err();
        assert_eq!(err, ConfigError::MissingGlobalSetting("SMTP smarthost"));
        assert_eq!(err.to_string(), "no global SMTP smarthost set");
    }

    #[test]
    fn explicit_http_config_is_kept() {
        let global = GlobalConfig::default();
        let mut r = receiver(
            "name: hooks\nwebhook_configs:\n  - url: http://a.example.com\n  - url: http://b.example.com\n    http_config:\n      follow_redirects: false",
        );
        global.apply_to(&mut r).unwrap();
        assert!(r.webhook_configs[0].http_config.as_ref().unwrap().follow_redirects);
        assert!(!r.webhook_configs[1].http_config.as_ref().unwrap().follow_redirects);
    }

    #[test]
    fn slack_requires_api_url_somewhere() {
        let mut r = receiver("name: chat\nslack_configs:\n  - channel: '#ops'");
        let err = GlobalConfig::default().apply_to(&mut r).unwrap_err();
        assert_eq!(err.to_string(), "no global Slack API URL set");

        let global: GlobalConfig =
            serde_yaml::from_str("slack_api_url: https://hooks.slack.com/services/x").unwrap();
        global.apply_to(&mut r).unwrap();
        assert!(r.slack_configs[0].api_url.is_some());
    }

    #[test]
    fn endpoints_default_from_global() {
        let mut r = receiver(
            "name: pd\npagerduty_configs:\n  - routing_key: k\ntelegram_configs:\n  - bot_token: t\n    chat_id: 1",
        );
        GlobalConfig::default().apply_to(&mut r).unwrap();
        assert_eq!(
            r.pagerduty_configs[0].url.as_ref().map(Url::as_str),
            Some(DEFAULT_PAGERDUTY_URL)
        );
        assert!(r.telegram_configs[0].api_url.is_some());
    }

    #[test]
    fn opsgenie_key_is_required() {
        let mut r = receiver("name: og\nopsgenie_configs:\n  - message: m");
        let err = GlobalConfig::default().apply_to(&mut r).unwrap_err();
        assert_eq!(err.to_string(), "no global OpsGenie API key set");
    }
}
