//! HTTP client settings shared by integrations and the global section.
//!
//! Decoding applies the Prometheus common-config rules: defaults for
//! `follow_redirects`/`enable_http2`, mutually exclusive auth methods, and
//! folding `bearer_token` into `authorization`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::secret::Secret;
use super::validation::{Validate, at_most_one, validated_serde};
use crate::error::ConfigError;

/// Local HTTP client configuration.
///
/// Proxy settings are kept flat on this type, the upstream shape nests them
/// (see [`crate::upstream::ProxyConfig`]).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(remote = "Self", default)]
pub struct HttpClientConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub basic_auth: Option<BasicAuth>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorization: Option<Authorization>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oauth2: Option<OAuth2>,
    #[serde(skip_serializing_if = "Secret::is_empty")]
    pub bearer_token: Secret,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub bearer_token_file: String,
    pub tls_config: TlsConfig,
    pub follow_redirects: bool,
    pub enable_http2: bool,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub proxy_url: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub no_proxy: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub proxy_from_environment: bool,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub proxy_connect_header: BTreeMap<String, Vec<Secret>>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub http_headers: BTreeMap<String, Header>,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            basic_auth: None,
            authorization: None,
            oauth2: None,
            bearer_token: Secret::default(),
            bearer_token_file: String::new(),
            tls_config: TlsConfig::default(),
            follow_redirects: true,
            enable_http2: true,
            proxy_url: String::new(),
            no_proxy: String::new(),
            proxy_from_environment: false,
            proxy_connect_header: BTreeMap::new(),
            http_headers: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct BasicAuth {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub username: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub username_file: String,
    #[serde(skip_serializing_if = "Secret::is_empty")]
    pub password: Secret,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub password_file: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Authorization {
    #[serde(rename = "type", skip_serializing_if = "String::is_empty")]
    pub auth_type: String,
    #[serde(skip_serializing_if = "Secret::is_empty")]
    pub credentials: Secret,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub credentials_file: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(remote = "Self", default)]
pub struct OAuth2 {
    pub client_id: String,
    #[serde(skip_serializing_if = "Secret::is_empty")]
    pub client_secret: Secret,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub client_secret_file: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub scopes: Vec<String>,
    pub token_url: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub endpoint_params: BTreeMap<String, String>,
    pub tls_config: TlsConfig,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub proxy_url: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub no_proxy: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub proxy_from_environment: bool,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub proxy_connect_header: BTreeMap<String, Vec<Secret>>,
}

/// TLS settings. Inline material and file references are mutually exclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(remote = "Self", default)]
pub struct TlsConfig {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub ca: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub cert: String,
    #[serde(skip_serializing_if = "Secret::is_empty")]
    pub key: Secret,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub ca_file: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub cert_file: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub key_file: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub server_name: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub insecure_skip_verify: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_version: Option<TlsVersion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_version: Option<TlsVersion>,
}

impl TlsConfig {
    pub fn has_files(&self) -> bool {
        !self.ca_file.is_empty() || !self.cert_file.is_empty() || !self.key_file.is_empty()
    }

    pub fn has_inline_material(&self) -> bool {
        !self.ca.is_empty() || !self.cert.is_empty() || !self.key.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
pub enum TlsVersion {
    #[serde(rename = "TLS10")]
    Tls10,
    #[serde(rename = "TLS11")]
    Tls11,
    #[serde(rename = "TLS12")]
    Tls12,
    #[serde(rename = "TLS13")]
    Tls13,
}

/// Extra request header: literal values, secret values, or files to read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Header {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub secrets: Vec<Secret>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<String>,
}

validated_serde!(HttpClientConfig, OAuth2, TlsConfig);

impl Validate for HttpClientConfig {
    fn validate(&mut self) -> Result<(), ConfigError> {
        let has_bearer = !self.bearer_token.is_empty() || !self.bearer_token_file.is_empty();
        at_most_one(&[
            ("bearer_token", !self.bearer_token.is_empty()),
            ("bearer_token_file", !self.bearer_token_file.is_empty()),
        ])?;
        if (self.basic_auth.is_some() || self.oauth2.is_some()) && has_bearer {
            return Err(ConfigError::invalid(
                "at most one of basic_auth, oauth2, bearer_token & bearer_token_file must be configured",
            ));
        }
        if let Some(basic) = &self.basic_auth {
            at_most_one(&[
                ("basic_auth username", !basic.username.is_empty()),
                ("username_file", !basic.username_file.is_empty()),
            ])?;
            at_most_one(&[
                ("basic_auth password", !basic.password.is_empty()),
                ("password_file", !basic.password_file.is_empty()),
            ])?;
        }

        if let Some(auth) = &mut self.authorization {
            if has_bearer {
                return Err(ConfigError::invalid(
                    "authorization is not compatible with bearer_token & bearer_token_file",
                ));
            }
            at_most_one(&[
                ("authorization credentials", !auth.credentials.is_empty()),
                ("credentials_file", !auth.credentials_file.is_empty()),
            ])?;
            auth.auth_type = auth.auth_type.trim().to_string();
            if auth.auth_type.is_empty() {
                auth.auth_type = "Bearer".to_string();
            }
            if auth.auth_type.eq_ignore_ascii_case("basic") {
                return Err(ConfigError::invalid(
                    "authorization type cannot be set to \"basic\", use \"basic_auth\" instead",
                ));
            }
            if self.basic_auth.is_some() || self.oauth2.is_some() {
                return Err(ConfigError::invalid(
                    "at most one of basic_auth, oauth2 & authorization must be configured",
                ));
            }
        } else if has_bearer {
            self.authorization = Some(Authorization {
                auth_type: "Bearer".to_string(),
                credentials: std::mem::take(&mut self.bearer_token),
                credentials_file: std::mem::take(&mut self.bearer_token_file),
            });
        }

        if self.oauth2.is_some() && self.basic_auth.is_some() {
            return Err(ConfigError::invalid(
                "at most one of basic_auth, oauth2 & authorization must be configured",
            ));
        }

        validate_proxy(
            &self.proxy_url,
            &self.no_proxy,
            self.proxy_from_environment,
            &self.proxy_connect_header,
        )
    }
}

impl Validate for OAuth2 {
    fn validate(&mut self) -> Result<(), ConfigError> {
        if self.client_id.is_empty() {
            return Err(ConfigError::invalid("oauth2 client_id must be configured"));
        }
        if self.token_url.is_empty() {
            return Err(ConfigError::invalid("oauth2 token_url must be configured"));
        }
        at_most_one(&[
            ("oauth2 client_secret", !self.client_secret.is_empty()),
            ("client_secret_file", !self.client_secret_file.is_empty()),
        ])?;
        validate_proxy(
            &self.proxy_url,
            &self.no_proxy,
            self.proxy_from_environment,
            &self.proxy_connect_header,
        )
    }
}

impl Validate for TlsConfig {
    fn validate(&mut self) -> Result<(), ConfigError> {
        at_most_one(&[("ca", !self.ca.is_empty()), ("ca_file", !self.ca_file.is_empty())])?;
        at_most_one(&[
            ("cert", !self.cert.is_empty()),
            ("cert_file", !self.cert_file.is_empty()),
        ])?;
        at_most_one(&[("key", !self.key.is_empty()), ("key_file", !self.key_file.is_empty())])?;

        let has_cert = !self.cert.is_empty() || !self.cert_file.is_empty();
        let has_key = !self.key.is_empty() || !self.key_file.is_empty();
        if has_cert && !has_key {
            return Err(ConfigError::invalid(
                "exactly one of key or key_file must be configured when a client certificate is configured",
            ));
        }
        if has_key && !has_cert {
            return Err(ConfigError::invalid(
                "exactly one of cert or cert_file must be configured when a client key is configured",
            ));
        }
        if let (Some(min), Some(max)) = (self.min_version, self.max_version)
            && min > max
        {
            return Err(ConfigError::invalid(
                "tls_config max_version must be greater than or equal to min_version",
            ));
        }
        Ok(())
    }
}

fn validate_proxy(
    proxy_url: &str,
    no_proxy: &str,
    from_environment: bool,
    connect_header: &BTreeMap<String, Vec<Secret>>,
) -> Result<(), ConfigError> {
    if !proxy_url.is_empty() {
        ::url::Url::parse(proxy_url)
            .map_err(|e| ConfigError::invalid(format!("invalid proxy_url {:?}: {}", proxy_url, e)))?;
    }
    if !connect_header.is_empty() && !from_environment && proxy_url.is_empty() {
        return Err(ConfigError::invalid(
            "if proxy_connect_header is configured, proxy_url or proxy_from_environment must also be configured",
        ));
    }
    if from_environment && !proxy_url.is_empty() {
        return Err(ConfigError::invalid(
            "if proxy_from_environment is configured, proxy_url must not be configured",
        ));
    }
    if from_environment && !no_proxy.is_empty() {
        return Err(ConfigError::invalid(
            "if proxy_from_environment is configured, no_proxy must not be configured",
        ));
    }
    if proxy_url.is_empty() && !no_proxy.is_empty() {
        return Err(ConfigError::invalid(
            "if no_proxy is configured, proxy_url must also be configured",
        ));
    }
    Ok(())
}
