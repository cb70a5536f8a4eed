use super::{vec_from_upstream, vec_to_upstream};
use crate::config::{Receiver, ReceiverType};
use crate::error::ConfigError;
use crate::upstream;

/// Converts a receiver to the upstream shape, integration kind by
/// integration kind.
///
/// Fails for receivers holding Grafana-managed integrations, which have no
/// upstream counterpart.
pub fn receiver_to_upstream(receiver: &Receiver) -> Result<upstream::Receiver, ConfigError> {
    if receiver.receiver_type() == ReceiverType::Grafana {
        return Err(ConfigError::invalid(format!(
            "receiver {:?} has Grafana-managed integrations and cannot be converted",
            receiver.name
        )));
    }
    Ok(upstream::Receiver {
        name: receiver.name.clone(),
        discord_configs: vec_to_upstream(&receiver.discord_configs),
        email_configs: vec_to_upstream(&receiver.email_configs),
        pagerduty_configs: vec_to_upstream(&receiver.pagerduty_configs),
        slack_configs: vec_to_upstream(&receiver.slack_configs),
        webhook_configs: vec_to_upstream(&receiver.webhook_configs),
        opsgenie_configs: vec_to_upstream(&receiver.opsgenie_configs),
        wechat_configs: vec_to_upstream(&receiver.wechat_configs),
        pushover_configs: vec_to_upstream(&receiver.pushover_configs),
        victorops_configs: vec_to_upstream(&receiver.victorops_configs),
        sns_configs: vec_to_upstream(&receiver.sns_configs),
        telegram_configs: vec_to_upstream(&receiver.telegram_configs),
        webex_configs: vec_to_upstream(&receiver.webex_configs),
        msteams_configs: vec_to_upstream(&receiver.msteams_configs),
        msteamsv2_configs: vec_to_upstream(&receiver.msteamsv2_configs),
        jira_configs: vec_to_upstream(&receiver.jira_configs),
    })
}

pub fn receiver_from_upstream(upstream: &upstream::Receiver) -> Receiver {
    Receiver {
        name: upstream.name.clone(),
        grafana_managed_receiver_configs: Vec::new(),
        discord_configs: vec_from_upstream(&upstream.discord_configs),
        email_configs: vec_from_upstream(&upstream.email_configs),
        pagerduty_configs: vec_from_upstream(&upstream.pagerduty_configs),
        slack_configs: vec_from_upstream(&upstream.slack_configs),
        webhook_configs: vec_from_upstream(&upstream.webhook_configs),
        opsgenie_configs: vec_from_upstream(&upstream.opsgenie_configs),
        wechat_configs: vec_from_upstream(&upstream.wechat_configs),
        pushover_configs: vec_from_upstream(&upstream.pushover_configs),
        victorops_configs: vec_from_upstream(&upstream.victorops_configs),
        sns_configs: vec_from_upstream(&upstream.sns_configs),
        telegram_configs: vec_from_upstream(&upstream.telegram_configs),
        webex_configs: vec_from_upstream(&upstream.webex_configs),
        msteams_configs: vec_from_upstream(&upstream.msteams_configs),
        msteamsv2_configs: vec_from_upstream(&upstream.msteamsv2_configs),
        jira_configs: vec_from_upstream(&upstream.jira_configs),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GrafanaReceiver;
    use crate::config::notifiers::{EmailConfig, WebhookConfig};

    #[test]
    fn empty_receiver_round_trip() {
        let r = Receiver::new("blackhole");
        let up = receiver_to_upstream(&r).unwrap();
        assert_eq!(up.name, "blackhole");
        assert_eq!(receiver_from_upstream(&up), r);
    }

    #[test]
    fn integrations_keep_their_order() {
        let mut r = Receiver::new("team");
        r.email_configs.push(EmailConfig {
            to: "a@example.com".to_string(),
            ..Default::default()
        });
        r.email_configs.push(EmailConfig {
            to: "b@example.com".to_string(),
            ..Default::default()
        });
        r.webhook_configs.push(WebhookConfig {
            max_alerts: 5,
            ..Default::default()
        });
        let up = receiver_to_upstream(&r).unwrap();
        assert_eq!(up.email_configs[1].to, "b@example.com");
        assert_eq!(up.webhook_configs[0].max_alerts, 5);
        assert_eq!(receiver_from_upstream(&up), r);
    }

    #[test]
    fn grafana_receivers_are_rejected() {
        let mut r = Receiver::new("g");
        r.grafana_managed_receiver_configs.push(GrafanaReceiver {
            name: "g".to_string(),
            integration_type: "email".to_string(),
            ..Default::default()
        });
        let err = receiver_to_upstream(&r).unwrap_err();
        assert!(err.to_string().contains("Grafana-managed"));
    }
}
