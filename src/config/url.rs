//! URL and address value types used by receiver and global configs.

use serde::{Deserialize, Serialize};

use super::secret::{SECRET_TOKEN, plaintext_secrets};
use crate::error::ConfigError;

/// An absolute `http`/`https` URL with a non-empty host.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Url(::url::Url);

impl Url {
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        let parsed = ::url::Url::parse(s)
            .map_err(|e| ConfigError::invalid(format!("invalid URL {:?}: {}", s, e)))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(ConfigError::invalid(format!(
                "unsupported scheme {:?} for URL",
                parsed.scheme()
            )));
        }
        if parsed.host_str().is_none_or(str::is_empty) {
            return Err(ConfigError::invalid("host for URL must not be empty"));
        }
        Ok(Url(parsed))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn inner(&self) -> &::url::Url {
        &self.0
    }
}

impl std::fmt::Debug for Url {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Url({})", self.0)
    }
}

impl std::fmt::Display for Url {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for Url {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Url::parse(s)
    }
}

impl Serialize for Url {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.0.as_str())
    }
}

impl<'de> Deserialize<'de> for Url {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Url::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// A URL that embeds credentials (webhook URLs with tokens and the like).
///
/// Serializes as [`SECRET_TOKEN`] unless plaintext mode is active. Reading
/// [`SECRET_TOKEN`] back yields a masked value with no URL behind it, so a
/// previously serialized document can be decoded again.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SecretUrl(Option<Url>);

impl SecretUrl {
    pub fn new(url: Url) -> Self {
        SecretUrl(Some(url))
    }

    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        if s == SECRET_TOKEN {
            return Ok(SecretUrl(None));
        }
        Url::parse(s).map(SecretUrl::new)
    }

    /// The URL, or `None` when this value was decoded from a mask.
    pub fn expose(&self) -> Option<&Url> {
        self.0.as_ref()
    }

    pub fn is_masked(&self) -> bool {
        self.0.is_none()
    }
}

impl std::fmt::Debug for SecretUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[REDACTED]")
    }
}

impl Serialize for SecretUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match &self.0 {
            Some(url) if plaintext_secrets() => serializer.serialize_str(url.as_str()),
            _ => serializer.serialize_str(SECRET_TOKEN),
        }
    }
}

impl<'de> Deserialize<'de> for SecretUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        SecretUrl::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// A `host:port` pair such as an SMTP smarthost.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct HostPort {
    pub host: String,
    pub port: String,
}

impl HostPort {
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        if s.is_empty() {
            return Ok(HostPort::default());
        }
        let (host, port) = if let Some(rest) = s.strip_prefix('[') {
            let (host, after) = rest
                .split_once(']')
                .ok_or_else(|| ConfigError::invalid(format!("address {:?}: missing ']'", s)))?;
            let port = after.strip_prefix(':').ok_or_else(|| {
                ConfigError::invalid(format!("address {:?}: missing port in address", s))
            })?;
            (host, port)
        } else {
            let (host, port) = s.rsplit_once(':').ok_or_else(|| {
                ConfigError::invalid(format!("address {:?}: missing port in address", s))
            })?;
            if host.contains(':') {
                return Err(ConfigError::invalid(format!(
                    "address {:?}: too many colons in address",
                    s
                )));
            }
            (host, port)
        };
        if port.is_empty() {
            return Err(ConfigError::invalid(format!(
                "address {:?}: port cannot be empty",
                s
            )));
        }
        Ok(HostPort {
            host: host.to_string(),
            port: port.to_string(),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.host.is_empty() && self.port.is_empty()
    }
}

impl std::fmt::Display for HostPort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            Ok(())
        } else if self.host.contains(':') {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}

impl Serialize for HostPort {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for HostPort {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        HostPort::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret::marshal_json_with_secrets;

    #[test]
    fn url_requires_http_scheme() {
        let err = Url::parse("ftp://example.com").unwrap_err();
        assert!(err.to_string().contains("unsupported scheme \"ftp\""));
    }

    #[test]
    fn url_rejects_relative() {
        assert!(Url::parse("/just/a/path").is_err());
    }

    #[test]
    fn url_accepts_https() {
        let url = Url::parse("https://hooks.slack.com/services/x").unwrap();
        assert_eq!(url.as_str(), "https://hooks.slack.com/services/x");
    }

    #[test]
    fn secret_url_masks_by_default() {
        let url = SecretUrl::parse("https://example.com/hook?token=abc").unwrap();
        assert_eq!(serde_json::to_string(&url).unwrap(), "\"<secret>\"");
        assert_eq!(
            marshal_json_with_secrets(&url).unwrap(),
            "\"https://example.com/hook?token=abc\""
        );
        assert!(!format!("{:?}", url).contains("token"));
    }

    #[test]
    fn secret_url_accepts_mask_on_input() {
        let url: SecretUrl = serde_json::from_str("\"<secret>\"").unwrap();
        assert!(url.is_masked());
        assert!(url.expose().is_none());
    }

    #[test]
    fn host_port_parses_and_formats() {
        let hp = HostPort::parse("smtp.example.com:587").unwrap();
        assert_eq!(hp.host, "smtp.example.com");
        assert_eq!(hp.port, "587");
        assert_eq!(hp.to_string(), "smtp.example.com:587");

        let v6 = HostPort::parse("[::1]:25").unwrap();
        assert_eq!(v6.host, "::1");
        assert_eq!(v6.to_string(), "[::1]:25");
    }

    #[test]
    fn host_port_rejects_missing_port() {
        assert!(HostPort::parse("smtp.example.com").is_err());
        assert!(HostPort::parse("smtp.example.com:").is_err());
        assert!(HostPort::parse("").unwrap().is_empty());
    }
}
