//! Centralized error types for the alerting definition crate using thiserror.
//!
//! Every public operation returns one of these enums. Nothing here is logged by
//! the library; callers decide what to do with a failure.

use thiserror::Error;

/// Errors related to configuration decoding, validation and loading.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("empty input")]
    EmptyInput,
    /// The document could not be decoded. Field-local validation failures
    /// raised while decoding end up here too.
    #[error("failed to parse configuration: {0}")]
    Parse(String),
    /// A field-local rule was violated.
    #[error("{0}")]
    Invalid(String),
    #[error("no routes provided")]
    NoRoute,
    #[error("missing name in {kind}")]
    MissingTimeIntervalName { kind: TimeIntervalKind },
    #[error("{kind} \"{name}\" is not unique")]
    DuplicateTimeInterval { kind: TimeIntervalKind, name: String },
    #[error("notification config name \"{0}\" is not unique")]
    DuplicateReceiver(String),
    #[error("undefined receiver \"{0}\" used in route")]
    UndefinedReceiver(String),
    #[error("undefined time interval \"{0}\" used in route")]
    UndefinedTimeInterval(String),
    #[error("cannot mix Alertmanager & Grafana receiver types")]
    MixedReceiverTypes,
    #[error("cannot have continue in root route")]
    ContinueInRootRoute,
    #[error("no global {0} set")]
    MissingGlobalSetting(&'static str),
    #[error("receiver \"{0}\" has Grafana-managed integrations, which upstream configurations cannot hold")]
    GrafanaReceiverNotAllowed(String),
}

impl ConfigError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        ConfigError::Invalid(message.into())
    }
}

/// Which of the two time interval lists an entry came from.
///
/// Both lists share one namespace but errors name the list explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeIntervalKind {
    MuteTimeInterval,
    TimeInterval,
}

impl std::fmt::Display for TimeIntervalKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimeIntervalKind::MuteTimeInterval => f.write_str("mute time interval"),
            TimeIntervalKind::TimeInterval => f.write_str("time interval"),
        }
    }
}

/// Errors returned by the merge engine. All of them are terminal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MergeError {
    #[error("no matchers")]
    NoMatchers,
    #[error("only equality matchers are allowed")]
    InvalidMatchers,
    #[error("matchers should be unique")]
    DuplicateMatchers,
    #[error(
        "subtree matchers conflict with existing Grafana routes, merging will break existing notifications"
    )]
    SubtreeMatchersConflict,
    #[error("{0} configuration has no route")]
    MissingRoute(&'static str),
}

/// Forbidden field categories found by the firewall validator.
///
/// The concrete field path is deliberately not included.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FirewallError {
    #[error("setting password_file, bearer_token_file and credentials_file is not allowed")]
    PasswordFileNotAllowed,
    #[error("setting OAuth2 client_secret_file is not allowed")]
    OAuth2SecretFileNotAllowed,
    #[error("setting OAuth2 proxy_url and proxy_from_environment is not allowed")]
    OAuth2ProxyNotAllowed,
    #[error("setting TLS ca_file, cert_file and key_file is not allowed")]
    TlsFileNotAllowed,
    #[error("setting TLS ca, cert and key is not allowed")]
    TlsConfigNotAllowed,
    #[error("setting proxy_url is not allowed")]
    ProxyUrlNotAllowed,
    #[error("setting proxy_from_environment is not allowed")]
    ProxyFromEnvironmentNotAllowed,
    #[error("setting SMTP auth_password_file is not allowed")]
    SmtpAuthPasswordFileNotAllowed,
    #[error("setting Slack api_url_file and global slack_api_url_file is not allowed")]
    SlackApiUrlFileNotAllowed,
    #[error("setting OpsGenie api_key_file and global opsgenie_api_key_file is not allowed")]
    OpsGenieApiKeyFileNotAllowed,
    #[error("setting VictorOps api_key_file and global victorops_api_key_file is not allowed")]
    VictorOpsApiKeyFileNotAllowed,
    #[error("setting PagerDuty service_key_file is not allowed")]
    PagerdutyServiceKeyFileNotAllowed,
    #[error("setting PagerDuty routing_key_file is not allowed")]
    PagerdutyRoutingKeyFileNotAllowed,
    #[error("setting Pushover user_key_file is not allowed")]
    PushoverUserKeyFileNotAllowed,
    #[error("setting Pushover token_file is not allowed")]
    PushoverTokenFileNotAllowed,
    #[error("setting Telegram bot_token_file is not allowed")]
    TelegramBotTokenFileNotAllowed,
    #[error("setting Webhook url_file is not allowed")]
    WebhookUrlFileNotAllowed,
    #[error("setting MSTeams webhook_url_file is not allowed")]
    MsTeamsWebhookUrlFileNotAllowed,
    #[error("setting Discord webhook_url_file is not allowed")]
    DiscordWebhookUrlFileNotAllowed,
}

/// Errors related to decrypting Grafana-managed secure settings.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SecretsError {
    #[error("failed to decode secure setting '{key}': {message}")]
    Decode { key: String, message: String },
    #[error("failed to decrypt secure setting '{key}': {message}")]
    Decrypt { key: String, message: String },
    #[error("secure setting '{key}' is not valid UTF-8")]
    Utf8 { key: String },
}
