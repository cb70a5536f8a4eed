//! Email (SMTP) notifier.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{Integration, template_ref};
use crate::config::http::{HttpClientConfig, TlsConfig};
use crate::config::secret::Secret;
use crate::config::url::HostPort;
use crate::config::validation::{Validate, at_most_one, validated_serde};
use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(remote = "Self", default)]
pub struct EmailConfig {
    pub send_resolved: bool,
    pub to: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub from: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub hello: String,
    #[serde(skip_serializing_if = "HostPort::is_empty")]
    pub smarthost: HostPort,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub auth_username: String,
    #[serde(skip_serializing_if = "Secret::is_empty")]
    pub auth_password: Secret,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub auth_password_file: String,
    #[serde(skip_serializing_if = "Secret::is_empty")]
    pub auth_secret: Secret,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub auth_identity: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub html: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub require_tls: Option<bool>,
    pub tls_config: TlsConfig,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            send_resolved: false,
            to: String::new(),
            from: String::new(),
            hello: String::new(),
            smarthost: HostPort::default(),
            auth_username: String::new(),
            auth_password: Secret::default(),
            auth_password_file: String::new(),
            auth_secret: Secret::default(),
            auth_identity: String::new(),
            headers: BTreeMap::new(),
            html: template_ref("email.default.html"),
            text: String::new(),
            require_tls: None,
            tls_config: TlsConfig::default(),
        }
    }
}

impl EmailConfig {
    /// True when no SMTP authentication field is set.
    pub fn has_no_auth(&self) -> bool {
        self.auth_username.is_empty()
            && self.auth_password.is_empty()
            && self.auth_password_file.is_empty()
            && self.auth_secret.is_empty()
            && self.auth_identity.is_empty()
    }
}

validated_serde!(EmailConfig);

impl Validate for EmailConfig {
    fn validate(&mut self) -> Result<(), ConfigError> {
        if self.to.is_empty() {
            return Err(ConfigError::invalid("missing to address in email config"));
        }
        at_most_one(&[
            ("auth_password", !self.auth_password.is_empty()),
            ("auth_password_file", !self.auth_password_file.is_empty()),
        ])?;

        // Header names are case-insensitive.
        let mut normalized = BTreeMap::new();
        for (name, value) in std::mem::take(&mut self.headers) {
            let canonical = canonical_header(&name);
            if normalized.contains_key(&canonical) {
                return Err(ConfigError::invalid(format!(
                    "duplicate header {:?} in email config",
                    canonical
                )));
            }
            normalized.insert(canonical, value);
        }
        self.headers = normalized;
        Ok(())
    }
}

impl Integration for EmailConfig {
    const KIND: &'static str = "email";

    fn send_resolved(&self) -> bool {
        self.send_resolved
    }

    fn http_config_mut(&mut self) -> Option<&mut Option<HttpClientConfig>> {
        None
    }
}

/// `content-type` -> `Content-Type`.
fn canonical_header(name: &str) -> String {
    name.split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_defaults_when_only_to_is_set() {
        let cfg: EmailConfig = serde_yaml::from_str("to: ops@example.com").unwrap();
        assert_eq!(cfg.to, "ops@example.com");
        assert!(!cfg.send_resolved);
        assert_eq!(cfg.html, "{{ template \"email.default.html\" . }}");
        assert!(cfg.smarthost.is_empty());
        assert!(cfg.has_no_auth());
    }

    #[test]
    fn email_requires_to() {
        let err = serde_yaml::from_str::<EmailConfig>("from: a@example.com").unwrap_err();
        assert!(err.to_string().contains("missing to address in email config"));
    }

    #[test]
    fn email_password_and_file_are_exclusive() {
        let yaml = "to: a@example.com\nauth_password: p\nauth_password_file: /p";
        assert!(serde_yaml::from_str::<EmailConfig>(yaml).is_err());
    }

    #[test]
    fn email_headers_are_canonicalized() {
        let yaml = "to: a@example.com\nheaders:\n  content-type: text/plain\n  x-TEAM: ops";
        let cfg: EmailConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cfg.headers.get("Content-Type").unwrap(), "text/plain");
        assert_eq!(cfg.headers.get("X-Team").unwrap(), "ops");
    }

    #[test]
    fn email_duplicate_headers_fail() {
        let yaml = "to: a@example.com\nheaders:\n  subject: a\n  Subject: b";
        let err = serde_yaml::from_str::<EmailConfig>(yaml).unwrap_err();
        assert!(err.to_string().contains("duplicate header \"Subject\""));
    }

    #[test]
    fn email_smarthost_parses() {
        let yaml = "to: a@example.com\nsmarthost: smtp.example.com:587\nrequire_tls: false";
        let cfg: EmailConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cfg.smarthost.port, "587");
        assert_eq!(cfg.require_tls, Some(false));
    }
}
