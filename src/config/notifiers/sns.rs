//! Amazon SNS notifier.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{impl_http_integration, template_ref};
use crate::config::http::HttpClientConfig;
use crate::config::secret::Secret;
use crate::config::validation::{Validate, exactly_one, validated_serde};
use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(remote = "Self", default)]
pub struct SnsConfig {
    pub send_resolved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_config: Option<HttpClientConfig>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub api_url: String,
    pub sigv4: SigV4Config,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub topic_arn: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub phone_number: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub target_arn: String,
    pub subject: String,
    pub message: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
}

impl Default for SnsConfig {
    fn default() -> Self {
        Self {
            send_resolved: true,
            http_config: None,
            api_url: String::new(),
            sigv4: SigV4Config::default(),
            topic_arn: String::new(),
            phone_number: String::new(),
            target_arn: String::new(),
            subject: template_ref("sns.default.subject"),
            message: template_ref("sns.default.message"),
            attributes: BTreeMap::new(),
        }
    }
}

/// AWS Signature V4 credentials.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(remote = "Self", default)]
pub struct SigV4Config {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub region: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub access_key: String,
    #[serde(skip_serializing_if = "Secret::is_empty")]
    pub secret_key: Secret,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub profile: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub role_arn: String,
}

validated_serde!(SnsConfig, SigV4Config);
impl_http_integration!(SnsConfig, "sns");

impl Validate for SnsConfig {
    fn validate(&mut self) -> Result<(), ConfigError> {
        exactly_one(&[
            ("target_arn", !self.target_arn.is_empty()),
            ("topic_arn", !self.topic_arn.is_empty()),
            ("phone_number", !self.phone_number.is_empty()),
        ])
        .map_err(|_| {
            ConfigError::invalid(
                "must provide either a Target ARN, Topic ARN, or Phone Number for SNS config",
            )
        })
    }
}

impl Validate for SigV4Config {
    fn validate(&mut self) -> Result<(), ConfigError> {
        if self.access_key.is_empty() != self.secret_key.is_empty() {
            return Err(ConfigError::invalid(
                "must provide a AWS SigV4 Access key and Secret Key if credentials are specified in the SigV4 config",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MESSAGE: &str = "must provide either a Target ARN, Topic ARN, or Phone Number";

    #[test]
    fn sns_needs_exactly_one_destination() {
        let err = serde_yaml::from_str::<SnsConfig>("subject: s").unwrap_err();
        assert!(err.to_string().contains(MESSAGE));

        let yaml = "topic_arn: arn:aws:sns:a\ntarget_arn: arn:aws:sns:b\nphone_number: '+1'";
        let err = serde_yaml::from_str::<SnsConfig>(yaml).unwrap_err();
        assert!(err.to_string().contains(MESSAGE));

        let yaml = "topic_arn: arn:aws:sns:a\nphone_number: '+1'";
        assert!(serde_yaml::from_str::<SnsConfig>(yaml).is_err());
    }

    #[test]
    fn sns_single_destination_is_valid() {
        let cfg: SnsConfig = serde_yaml::from_str("phone_number: '+15551234'").unwrap();
        assert_eq!(cfg.phone_number, "+15551234");
        assert_eq!(cfg.subject, "{{ template \"sns.default.subject\" . }}");
    }

    #[test]
    fn sigv4_keys_come_in_pairs() {
        let yaml = "topic_arn: arn:aws:sns:a\nsigv4:\n  access_key: AKIA";
        let err = serde_yaml::from_str::<SnsConfig>(yaml).unwrap_err();
        assert!(err.to_string().contains("SigV4 Access key and Secret Key"));
    }
}
