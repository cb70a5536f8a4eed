//! `Compat` impls for every integration and its nested types.

use super::{Compat, list_from_upstream, list_to_upstream, opt_from_upstream, opt_to_upstream};
use crate::config::FractionalDuration;
use crate::config::notifiers::{
    DiscordConfig, EmailConfig, JiraConfig, MsTeamsConfig, MsTeamsV2Config, OpsGenieConfig,
    OpsGenieResponder, PagerdutyConfig, PagerdutyImage, PagerdutyLink, PushoverConfig,
    SigV4Config, SlackAction, SlackConfig, SlackConfirmationField, SlackField, SnsConfig,
    TelegramConfig, VictorOpsConfig, WebexConfig, WebhookConfig, WechatConfig,
};
use crate::upstream::{self, NotifierConfig};

fn duration_to_upstream(d: FractionalDuration) -> upstream::Duration {
    upstream::Duration(d.0)
}

fn duration_from_upstream(d: upstream::Duration) -> FractionalDuration {
    FractionalDuration(d.0)
}

impl Compat for DiscordConfig {
    type Upstream = upstream::DiscordConfig;

    fn to_upstream(&self) -> upstream::DiscordConfig {
        upstream::DiscordConfig {
            notifier: NotifierConfig::new(self.send_resolved),
            http_config: opt_to_upstream(&self.http_config),
            webhook_url: self.webhook_url.clone(),
            webhook_url_file: self.webhook_url_file.clone(),
            title: self.title.clone(),
            message: self.message.clone(),
            content: self.content.clone(),
            username: self.username.clone(),
            avatar_url: self.avatar_url.clone(),
        }
    }

    fn from_upstream(up: &upstream::DiscordConfig) -> Self {
        DiscordConfig {
            send_resolved: up.notifier.send_resolved,
            http_config: opt_from_upstream(&up.http_config),
            webhook_url: up.webhook_url.clone(),
            webhook_url_file: up.webhook_url_file.clone(),
            title: up.title.clone(),
            message: up.message.clone(),
            content: up.content.clone(),
            username: up.username.clone(),
            avatar_url: up.avatar_url.clone(),
        }
    }
}

impl Compat for EmailConfig {
    type Upstream = upstream::EmailConfig;

    fn to_upstream(&self) -> upstream::EmailConfig {
        upstream::EmailConfig {
            notifier: NotifierConfig::new(self.send_resolved),
            to: self.to.clone(),
            from: self.from.clone(),
            hello: self.hello.clone(),
            smarthost: self.smarthost.clone(),
            auth_username: self.auth_username.clone(),
            auth_password: self.auth_password.clone(),
            auth_password_file: self.auth_password_file.clone(),
            auth_secret: self.auth_secret.clone(),
            auth_identity: self.auth_identity.clone(),
            headers: self.headers.clone(),
            html: self.html.clone(),
            text: self.text.clone(),
            require_tls: self.require_tls,
            tls_config: self.tls_config.clone(),
        }
    }

    fn from_upstream(up: &upstream::EmailConfig) -> Self {
        EmailConfig {
            send_resolved: up.notifier.send_resolved,
            to: up.to.clone(),
            from: up.from.clone(),
            hello: up.hello.clone(),
            smarthost: up.smarthost.clone(),
            auth_username: up.auth_username.clone(),
            auth_password: up.auth_password.clone(),
            auth_password_file: up.auth_password_file.clone(),
            auth_secret: up.auth_secret.clone(),
            auth_identity: up.auth_identity.clone(),
            headers: up.headers.clone(),
            html: up.html.clone(),
            text: up.text.clone(),
            require_tls: up.require_tls,
            tls_config: up.tls_config.clone(),
        }
    }
}

impl Compat for PagerdutyImage {
    type Upstream = upstream::PagerdutyImage;

    fn to_upstream(&self) -> upstream::PagerdutyImage {
        upstream::PagerdutyImage {
            src: self.src.clone(),
            alt: self.alt.clone(),
            href: self.href.clone(),
        }
    }

    fn from_upstream(up: &upstream::PagerdutyImage) -> Self {
        PagerdutyImage {
            src: up.src.clone(),
            alt: up.alt.clone(),
            href: up.href.clone(),
        }
    }
}

impl Compat for PagerdutyLink {
    type Upstream = upstream::PagerdutyLink;

    fn to_upstream(&self) -> upstream::PagerdutyLink {
        upstream::PagerdutyLink {
            href: self.href.clone(),
            text: self.text.clone(),
        }
    }

    fn from_upstream(up: &upstream::PagerdutyLink) -> Self {
        PagerdutyLink {
            href: up.href.clone(),
            text: up.text.clone(),
        }
    }
}

impl Compat for PagerdutyConfig {
    type Upstream = upstream::PagerdutyConfig;

    fn to_upstream(&self) -> upstream::PagerdutyConfig {
        upstream::PagerdutyConfig {
            notifier: NotifierConfig::new(self.send_resolved),
            http_config: opt_to_upstream(&self.http_config),
            service_key: self.service_key.clone(),
            service_key_file: self.service_key_file.clone(),
            routing_key: self.routing_key.clone(),
            routing_key_file: self.routing_key_file.clone(),
            url: self.url.clone(),
            client: self.client.clone(),
            client_url: self.client_url.clone(),
            description: self.description.clone(),
            details: self.details.clone(),
            images: list_to_upstream(&self.images),
            links: list_to_upstream(&self.links),
            source: self.source.clone(),
            severity: self.severity.clone(),
            class: self.class.clone(),
            component: self.component.clone(),
            group: self.group.clone(),
        }
    }

    fn from_upstream(up: &upstream::PagerdutyConfig) -> Self {
        PagerdutyConfig {
            send_resolved: up.notifier.send_resolved,
            http_config: opt_from_upstream(&up.http_config),
            service_key: up.service_key.clone(),
            service_key_file: up.service_key_file.clone(),
            routing_key: up.routing_key.clone(),
            routing_key_file: up.routing_key_file.clone(),
            url: up.url.clone(),
            client: up.client.clone(),
            client_url: up.client_url.clone(),
            description: up.description.clone(),
            details: up.details.clone(),
            images: list_from_upstream(&up.images),
            links: list_from_upstream(&up.links),
            source: up.source.clone(),
            severity: up.severity.clone(),
            class: up.class.clone(),
            component: up.component.clone(),
            group: up.group.clone(),
        }
    }
}

impl Compat for SlackField {
    type Upstream = upstream::SlackField;

    fn to_upstream(&self) -> upstream::SlackField {
        upstream::SlackField {
            title: self.title.clone(),
            value: self.value.clone(),
            short: self.short,
        }
    }

    fn from_upstream(up: &upstream::SlackField) -> Self {
        SlackField {
            title: up.title.clone(),
            value: up.value.clone(),
            short: up.short,
        }
    }
}

impl Compat for SlackConfirmationField {
    type Upstream = upstream::SlackConfirmationField;

    fn to_upstream(&self) -> upstream::SlackConfirmationField {
        upstream::SlackConfirmationField {
            text: self.text.clone(),
            title: self.title.clone(),
            ok_text: self.ok_text.clone(),
            dismiss_text: self.dismiss_text.clone(),
        }
    }

    fn from_upstream(up: &upstream::SlackConfirmationField) -> Self {
        SlackConfirmationField {
            text: up.text.clone(),
            title: up.title.clone(),
            ok_text: up.ok_text.clone(),
            dismiss_text: up.dismiss_text.clone(),
        }
    }
}

impl Compat for SlackAction {
    type Upstream = upstream::SlackAction;

    fn to_upstream(&self) -> upstream::SlackAction {
        upstream::SlackAction {
            action_type: self.action_type.clone(),
            text: self.text.clone(),
            url: self.url.clone(),
            style: self.style.clone(),
            name: self.name.clone(),
            value: self.value.clone(),
            confirm: opt_to_upstream(&self.confirm),
        }
    }

    fn from_upstream(up: &upstream::SlackAction) -> Self {
        SlackAction {
            action_type: up.action_type.clone(),
            text: up.text.clone(),
            url: up.url.clone(),
            style: up.style.clone(),
            name: up.name.clone(),
            value: up.value.clone(),
            confirm: opt_from_upstream(&up.confirm),
        }
    }
}

impl Compat for SlackConfig {
    type Upstream = upstream::SlackConfig;

    fn to_upstream(&self) -> upstream::SlackConfig {
        upstream::SlackConfig {
            notifier: NotifierConfig::new(self.send_resolved),
            http_config: opt_to_upstream(&self.http_config),
            api_url: self.api_url.clone(),
            api_url_file: self.api_url_file.clone(),
            channel: self.channel.clone(),
            username: self.username.clone(),
            color: self.color.clone(),
            title: self.title.clone(),
            title_link: self.title_link.clone(),
            pretext: self.pretext.clone(),
            text: self.text.clone(),
            fields: list_to_upstream(&self.fields),
            short_fields: self.short_fields,
            footer: self.footer.clone(),
            fallback: self.fallback.clone(),
            callback_id: self.callback_id.clone(),
            icon_emoji: self.icon_emoji.clone(),
            icon_url: self.icon_url.clone(),
            image_url: self.image_url.clone(),
            thumb_url: self.thumb_url.clone(),
            link_names: self.link_names,
            mrkdwn_in: self.mrkdwn_in.clone(),
            actions: list_to_upstream(&self.actions),
        }
    }

    fn from_upstream(up: &upstream::SlackConfig) -> Self {
        SlackConfig {
            send_resolved: up.notifier.send_resolved,
            http_config: opt_from_upstream(&up.http_config),
            api_url: up.api_url.clone(),
            api_url_file: up.api_url_file.clone(),
            channel: up.channel.clone(),
            username: up.username.clone(),
            color: up.color.clone(),
            title: up.title.clone(),
            title_link: up.title_link.clone(),
            pretext: up.pretext.clone(),
            text: up.text.clone(),
            fields: list_from_upstream(&up.fields),
            short_fields: up.short_fields,
            footer: up.footer.clone(),
            fallback: up.fallback.clone(),
            callback_id: up.callback_id.clone(),
            icon_emoji: up.icon_emoji.clone(),
            icon_url: up.icon_url.clone(),
            image_url: up.image_url.clone(),
            thumb_url: up.thumb_url.clone(),
            link_names: up.link_names,
            mrkdwn_in: up.mrkdwn_in.clone(),
            actions: list_from_upstream(&up.actions),
        }
    }
}

impl Compat for WebhookConfig {
    type Upstream = upstream::WebhookConfig;

    fn to_upstream(&self) -> upstream::WebhookConfig {
        upstream::WebhookConfig {
            notifier: NotifierConfig::new(self.send_resolved),
            http_config: opt_to_upstream(&self.http_config),
            url: self.url.clone(),
            url_file: self.url_file.clone(),
            max_alerts: self.max_alerts,
            timeout: duration_to_upstream(self.timeout),
        }
    }

    fn from_upstream(up: &upstream::WebhookConfig) -> Self {
        WebhookConfig {
            send_resolved: up.notifier.send_resolved,
            http_config: opt_from_upstream(&up.http_config),
            url: up.url.clone(),
            url_file: up.url_file.clone(),
            max_alerts: up.max_alerts,
            timeout: duration_from_upstream(up.timeout),
        }
    }
}

impl Compat for OpsGenieResponder {
    type Upstream = upstream::OpsGenieResponder;

    fn to_upstream(&self) -> upstream::OpsGenieResponder {
        upstream::OpsGenieResponder {
            id: self.id.clone(),
            name: self.name.clone(),
            username: self.username.clone(),
            responder_type: self.responder_type.clone(),
        }
    }

    fn from_upstream(up: &upstream::OpsGenieResponder) -> Self {
        OpsGenieResponder {
            id: up.id.clone(),
            name: up.name.clone(),
            username: up.username.clone(),
            responder_type: up.responder_type.clone(),
        }
    }
}

impl Compat for OpsGenieConfig {
    type Upstream = upstream::OpsGenieConfig;

    fn to_upstream(&self) -> upstream::OpsGenieConfig {
        upstream::OpsGenieConfig {
            notifier: NotifierConfig::new(self.send_resolved),
            http_config: opt_to_upstream(&self.http_config),
            api_key: self.api_key.clone(),
            api_key_file: self.api_key_file.clone(),
            api_url: self.api_url.clone(),
            message: self.message.clone(),
            description: self.description.clone(),
            source: self.source.clone(),
            details: self.details.clone(),
            entity: self.entity.clone(),
            responders: list_to_upstream(&self.responders),
            actions: self.actions.clone(),
            tags: self.tags.clone(),
            note: self.note.clone(),
            priority: self.priority.clone(),
            update_alerts: self.update_alerts,
        }
    }

    fn from_upstream(up: &upstream::OpsGenieConfig) -> Self {
        OpsGenieConfig {
            send_resolved: up.notifier.send_resolved,
            http_config: opt_from_upstream(&up.http_config),
            api_key: up.api_key.clone(),
            api_key_file: up.api_key_file.clone(),
            api_url: up.api_url.clone(),
            message: up.message.clone(),
            description: up.description.clone(),
            source: up.source.clone(),
            details: up.details.clone(),
            entity: up.entity.clone(),
            responders: list_from_upstream(&up.responders),
            actions: up.actions.clone(),
            tags: up.tags.clone(),
            note: up.note.clone(),
            priority: up.priority.clone(),
            update_alerts: up.update_alerts,
        }
    }
}

impl Compat for WechatConfig {
    type Upstream = upstream::WechatConfig;

    fn to_upstream(&self) -> upstream::WechatConfig {
        upstream::WechatConfig {
            notifier: NotifierConfig::new(self.send_resolved),
            http_config: opt_to_upstream(&self.http_config),
            api_secret: self.api_secret.clone(),
            corp_id: self.corp_id.clone(),
            message: self.message.clone(),
            api_url: self.api_url.clone(),
            to_user: self.to_user.clone(),
            to_party: self.to_party.clone(),
            to_tag: self.to_tag.clone(),
            agent_id: self.agent_id.clone(),
            message_type: self.message_type.clone(),
        }
    }

    fn from_upstream(up: &upstream::WechatConfig) -> Self {
        WechatConfig {
            send_resolved: up.notifier.send_resolved,
            http_config: opt_from_upstream(&up.http_config),
            api_secret: up.api_secret.clone(),
            corp_id: up.corp_id.clone(),
            message: up.message.clone(),
            api_url: up.api_url.clone(),
            to_user: up.to_user.clone(),
            to_party: up.to_party.clone(),
            to_tag: up.to_tag.clone(),
            agent_id: up.agent_id.clone(),
            message_type: up.message_type.clone(),
        }
    }
}

impl Compat for PushoverConfig {
    type Upstream = upstream::PushoverConfig;

    fn to_upstream(&self) -> upstream::PushoverConfig {
        upstream::PushoverConfig {
            notifier: NotifierConfig::new(self.send_resolved),
            http_config: opt_to_upstream(&self.http_config),
            user_key: self.user_key.clone(),
            user_key_file: self.user_key_file.clone(),
            token: self.token.clone(),
            token_file: self.token_file.clone(),
            title: self.title.clone(),
            message: self.message.clone(),
            url: self.url.clone(),
            url_title: self.url_title.clone(),
            device: self.device.clone(),
            sound: self.sound.clone(),
            priority: self.priority.clone(),
            retry: duration_to_upstream(self.retry),
            expire: duration_to_upstream(self.expire),
            ttl: duration_to_upstream(self.ttl),
            html: self.html,
        }
    }

    fn from_upstream(up: &upstream::PushoverConfig) -> Self {
        PushoverConfig {
            send_resolved: up.notifier.send_resolved,
            http_config: opt_from_upstream(&up.http_config),
            user_key: up.user_key.clone(),
            user_key_file: up.user_key_file.clone(),
            token: up.token.clone(),
            token_file: up.token_file.clone(),
            title: up.title.clone(),
            message: up.message.clone(),
            url: up.url.clone(),
            url_title: up.url_title.clone(),
            device: up.device.clone(),
            sound: up.sound.clone(),
            priority: up.priority.clone(),
            retry: duration_from_upstream(up.retry),
            expire: duration_from_upstream(up.expire),
            ttl: duration_from_upstream(up.ttl),
            html: up.html,
        }
    }
}

impl Compat for VictorOpsConfig {
    type Upstream = upstream::VictorOpsConfig;

    fn to_upstream(&self) -> upstream::VictorOpsConfig {
        upstream::VictorOpsConfig {
            notifier: NotifierConfig::new(self.send_resolved),
            http_config: opt_to_upstream(&self.http_config),
            api_key: self.api_key.clone(),
            api_key_file: self.api_key_file.clone(),
            api_url: self.api_url.clone(),
            routing_key: self.routing_key.clone(),
            message_type: self.message_type.clone(),
            state_message: self.state_message.clone(),
            entity_display_name: self.entity_display_name.clone(),
            monitoring_tool: self.monitoring_tool.clone(),
            custom_fields: self.custom_fields.clone(),
        }
    }

    fn from_upstream(up: &upstream::VictorOpsConfig) -> Self {
        VictorOpsConfig {
            send_resolved: up.notifier.send_resolved,
            http_config: opt_from_upstream(&up.http_config),
            api_key: up.api_key.clone(),
            api_key_file: up.api_key_file.clone(),
            api_url: up.api_url.clone(),
            routing_key: up.routing_key.clone(),
            message_type: up.message_type.clone(),
            state_message: up.state_message.clone(),
            entity_display_name: up.entity_display_name.clone(),
            monitoring_tool: up.monitoring_tool.clone(),
            custom_fields: up.custom_fields.clone(),
        }
    }
}

impl Compat for SigV4Config {
    type Upstream = upstream::SigV4Config;

    fn to_upstream(&self) -> upstream::SigV4Config {
        upstream::SigV4Config {
            region: self.region.clone(),
            access_key: self.access_key.clone(),
            secret_key: self.secret_key.clone(),
            profile: self.profile.clone(),
            role_arn: self.role_arn.clone(),
        }
    }

    fn from_upstream(up: &upstream::SigV4Config) -> Self {
        SigV4Config {
            region: up.region.clone(),
            access_key: up.access_key.clone(),
            secret_key: up.secret_key.clone(),
            profile: up.profile.clone(),
            role_arn: up.role_arn.clone(),
        }
    }
}

impl Compat for SnsConfig {
    type Upstream = upstream::SnsConfig;

    fn to_upstream(&self) -> upstream::SnsConfig {
        upstream::SnsConfig {
            notifier: NotifierConfig::new(self.send_resolved),
            http_config: opt_to_upstream(&self.http_config),
            api_url: self.api_url.clone(),
            sigv4: self.sigv4.to_upstream(),
            topic_arn: self.topic_arn.clone(),
            phone_number: self.phone_number.clone(),
            target_arn: self.target_arn.clone(),
            subject: self.subject.clone(),
            message: self.message.clone(),
            attributes: self.attributes.clone(),
        }
    }

    fn from_upstream(up: &upstream::SnsConfig) -> Self {
        SnsConfig {
            send_resolved: up.notifier.send_resolved,
            http_config: opt_from_upstream(&up.http_config),
            api_url: up.api_url.clone(),
            sigv4: SigV4Config::from_upstream(&up.sigv4),
            topic_arn: up.topic_arn.clone(),
            phone_number: up.phone_number.clone(),
            target_arn: up.target_arn.clone(),
            subject: up.subject.clone(),
            message: up.message.clone(),
            attributes: up.attributes.clone(),
        }
    }
}

impl Compat for TelegramConfig {
    type Upstream = upstream::TelegramConfig;

    fn to_upstream(&self) -> upstream::TelegramConfig {
        upstream::TelegramConfig {
            notifier: NotifierConfig::new(self.send_resolved),
            http_config: opt_to_upstream(&self.http_config),
            api_url: self.api_url.clone(),
            bot_token: self.bot_token.clone(),
            bot_token_file: self.bot_token_file.clone(),
            chat_id: self.chat_id,
            message_thread_id: self.message_thread_id,
            message: self.message.clone(),
            disable_notifications: self.disable_notifications,
            parse_mode: self.parse_mode.clone(),
        }
    }

    fn from_upstream(up: &upstream::TelegramConfig) -> Self {
        TelegramConfig {
            send_resolved: up.notifier.send_resolved,
            http_config: opt_from_upstream(&up.http_config),
            api_url: up.api_url.clone(),
            bot_token: up.bot_token.clone(),
            bot_token_file: up.bot_token_file.clone(),
            chat_id: up.chat_id,
            message_thread_id: up.message_thread_id,
            message: up.message.clone(),
            disable_notifications: up.disable_notifications,
            parse_mode: up.parse_mode.clone(),
        }
    }
}

impl Compat for WebexConfig {
    type Upstream = upstream::WebexConfig;

    fn to_upstream(&self) -> upstream::WebexConfig {
        upstream::WebexConfig {
            notifier: NotifierConfig::new(self.send_resolved),
            http_config: opt_to_upstream(&self.http_config),
            api_url: self.api_url.clone(),
            message: self.message.clone(),
            room_id: self.room_id.clone(),
        }
    }

    fn from_upstream(up: &upstream::WebexConfig) -> Self {
        WebexConfig {
            send_resolved: up.notifier.send_resolved,
            http_config: opt_from_upstream(&up.http_config),
            api_url: up.api_url.clone(),
            message: up.message.clone(),
            room_id: up.room_id.clone(),
        }
    }
}

impl Compat for MsTeamsConfig {
    type Upstream = upstream::MsTeamsConfig;

    fn to_upstream(&self) -> upstream::MsTeamsConfig {
        upstream::MsTeamsConfig {
            notifier: NotifierConfig::new(self.send_resolved),
            http_config: opt_to_upstream(&self.http_config),
            webhook_url: self.webhook_url.clone(),
            webhook_url_file: self.webhook_url_file.clone(),
            title: self.title.clone(),
            summary: self.summary.clone(),
            text: self.text.clone(),
        }
    }

    fn from_upstream(up: &upstream::MsTeamsConfig) -> Self {
        MsTeamsConfig {
            send_resolved: up.notifier.send_resolved,
            http_config: opt_from_upstream(&up.http_config),
            webhook_url: up.webhook_url.clone(),
            webhook_url_file: up.webhook_url_file.clone(),
            title: up.title.clone(),
            summary: up.summary.clone(),
            text: up.text.clone(),
        }
    }
}

impl Compat for MsTeamsV2Config {
    type Upstream = upstream::MsTeamsV2Config;

    fn to_upstream(&self) -> upstream::MsTeamsV2Config {
        upstream::MsTeamsV2Config {
            notifier: NotifierConfig::new(self.send_resolved),
            http_config: opt_to_upstream(&self.http_config),
            webhook_url: self.webhook_url.clone(),
            webhook_url_file: self.webhook_url_file.clone(),
            title: self.title.clone(),
            text: self.text.clone(),
        }
    }

    fn from_upstream(up: &upstream::MsTeamsV2Config) -> Self {
        MsTeamsV2Config {
            send_resolved: up.notifier.send_resolved,
            http_config: opt_from_upstream(&up.http_config),
            webhook_url: up.webhook_url.clone(),
            webhook_url_file: up.webhook_url_file.clone(),
            title: up.title.clone(),
            text: up.text.clone(),
        }
    }
}

impl Compat for JiraConfig {
    type Upstream = upstream::JiraConfig;

    fn to_upstream(&self) -> upstream::JiraConfig {
        upstream::JiraConfig {
            notifier: NotifierConfig::new(self.send_resolved),
            http_config: opt_to_upstream(&self.http_config),
            api_url: self.api_url.clone(),
            project: self.project.clone(),
            summary: self.summary.clone(),
            description: self.description.clone(),
            labels: self.labels.clone(),
            priority: self.priority.clone(),
            issue_type: self.issue_type.clone(),
            reopen_transition: self.reopen_transition.clone(),
            resolve_transition: self.resolve_transition.clone(),
            wont_fix_resolution: self.wont_fix_resolution.clone(),
            reopen_duration: self.reopen_duration,
            fields: self.fields.clone(),
        }
    }

    fn from_upstream(up: &upstream::JiraConfig) -> Self {
        JiraConfig {
            send_resolved: up.notifier.send_resolved,
            http_config: opt_from_upstream(&up.http_config),
            api_url: up.api_url.clone(),
            project: up.project.clone(),
            summary: up.summary.clone(),
            description: up.description.clone(),
            labels: up.labels.clone(),
            priority: up.priority.clone(),
            issue_type: up.issue_type.clone(),
            reopen_transition: up.reopen_transition.clone(),
            resolve_transition: up.resolve_transition.clone(),
            wont_fix_resolution: up.wont_fix_resolution.clone(),
            reopen_duration: up.reopen_duration,
            fields: up.fields.clone(),
        }
    }
}
