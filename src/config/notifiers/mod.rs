//! Per-integration notifier configurations.
//!
//! Each type is decoded default-then-populate: `#[serde(default)]` starts from
//! the type's `Default` (which carries the Alertmanager default templates) and
//! the document overrides what it sets. Field rules run right after decoding.

mod discord;
mod email;
mod jira;
mod msteams;
mod opsgenie;
mod pagerduty;
mod pushover;
mod slack;
mod sns;
mod telegram;
mod victorops;
mod webex;
mod webhook;
mod wechat;

pub use discord::DiscordConfig;
pub use email::EmailConfig;
pub use jira::JiraConfig;
pub use msteams::{MsTeamsConfig, MsTeamsV2Config};
pub use opsgenie::{OpsGenieConfig, OpsGenieResponder};
pub use pagerduty::{PagerdutyConfig, PagerdutyImage, PagerdutyLink, default_pagerduty_details};
pub use pushover::PushoverConfig;
pub use slack::{SlackAction, SlackConfig, SlackConfirmationField, SlackField};
pub use sns::{SigV4Config, SnsConfig};
pub use telegram::TelegramConfig;
pub use victorops::VictorOpsConfig;
pub use webex::WebexConfig;
pub use webhook::WebhookConfig;
pub use wechat::WechatConfig;

use super::http::HttpClientConfig;

/// Behavior shared by every integration config.
pub trait Integration {
    /// Wire name of the integration, as in `<kind>_configs`.
    const KIND: &'static str;

    fn send_resolved(&self) -> bool;

    /// The integration's HTTP client slot, `None` for integrations that do
    /// not speak HTTP.
    fn http_config_mut(&mut self) -> Option<&mut Option<HttpClientConfig>>;
}

macro_rules! impl_http_integration {
    ($ty:ty, $kind:literal) => {
        impl $crate::config::notifiers::Integration for $ty {
            const KIND: &'static str = $kind;

            fn send_resolved(&self) -> bool {
                self.send_resolved
            }

            fn http_config_mut(
                &mut self,
            ) -> Option<&mut Option<$crate::config::http::HttpClientConfig>> {
                Some(&mut self.http_config)
            }
        }
    };
}

pub(crate) use impl_http_integration;

/// Renders `{{ template "<name>" . }}`.
pub(crate) fn template_ref(name: &str) -> String {
    format!("{{{{ template \"{}\" . }}}}", name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_ref_renders_go_template_call() {
        assert_eq!(
            template_ref("slack.default.title"),
            "{{ template \"slack.default.title\" . }}"
        );
    }

    #[test]
    fn integration_kinds_match_wire_names() {
        assert_eq!(SlackConfig::KIND, "slack");
        assert_eq!(EmailConfig::KIND, "email");
        assert_eq!(MsTeamsV2Config::KIND, "msteamsv2");
        assert_eq!(SnsConfig::KIND, "sns");
    }

    #[test]
    fn send_resolved_defaults_follow_alertmanager() {
        assert!(!EmailConfig::default().send_resolved());
        assert!(!SlackConfig::default().send_resolved());
        assert!(!WechatConfig::default().send_resolved());
        assert!(WebhookConfig::default().send_resolved());
        assert!(PagerdutyConfig::default().send_resolved());
        assert!(OpsGenieConfig::default().send_resolved());
        assert!(PushoverConfig::default().send_resolved());
        assert!(DiscordConfig::default().send_resolved());
    }

    #[test]
    fn email_has_no_http_slot() {
        let mut email = EmailConfig::default();
        assert!(email.http_config_mut().is_none());
        let mut slack = SlackConfig::default();
        assert!(slack.http_config_mut().is_some());
    }
}
