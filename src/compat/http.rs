use super::{Compat, opt_from_upstream, opt_to_upstream};
use crate::config::{HttpClientConfig, OAuth2};
use crate::upstream;

impl Compat for HttpClientConfig {
    type Upstream = upstream::HttpClientConfig;

    fn to_upstream(&self) -> upstream::HttpClientConfig {
        upstream::HttpClientConfig {
            basic_auth: self.basic_auth.clone(),
            authorization: self.authorization.clone(),
            oauth2: opt_to_upstream(&self.oauth2),
            bearer_token: self.bearer_token.clone(),
            bearer_token_file: self.bearer_token_file.clone(),
            tls_config: self.tls_config.clone(),
            follow_redirects: self.follow_redirects,
            enable_http2: self.enable_http2,
            proxy_config: upstream::ProxyConfig {
                proxy_url: self.proxy_url.clone(),
                no_proxy: self.no_proxy.clone(),
                proxy_from_environment: self.proxy_from_environment,
                proxy_connect_header: self.proxy_connect_header.clone(),
            },
            http_headers: self.http_headers.clone(),
        }
    }

    fn from_upstream(upstream: &upstream::HttpClientConfig) -> Self {
        let proxy = &upstream.proxy_config;
        HttpClientConfig {
            basic_auth: upstream.basic_auth.clone(),
            authorization: upstream.authorization.clone(),
            oauth2: opt_from_upstream(&upstream.oauth2),
            bearer_token: upstream.bearer_token.clone(),
            bearer_token_file: upstream.bearer_token_file.clone(),
            tls_config: upstream.tls_config.clone(),
            follow_redirects: upstream.follow_redirects,
            enable_http2: upstream.enable_http2,
            proxy_url: proxy.proxy_url.clone(),
            no_proxy: proxy.no_proxy.clone(),
            proxy_from_environment: proxy.proxy_from_environment,
            proxy_connect_header: proxy.proxy_connect_header.clone(),
            http_headers: upstream.http_headers.clone(),
        }
    }
}

impl Compat for OAuth2 {
    type Upstream = upstream::OAuth2;

    fn to_upstream(&self) -> upstream::OAuth2 {
        upstream::OAuth2 {
            client_id: self.client_id.clone(),
            client_secret: self.client_secret.clone(),
            client_secret_file: self.client_secret_file.clone(),
            scopes: self.scopes.clone(),
            token_url: self.token_url.clone(),
            endpoint_params: self.endpoint_params.clone(),
            tls_config: self.tls_config.clone(),
            proxy_config: upstream::ProxyConfig {
                proxy_url: self.proxy_url.clone(),
                no_proxy: self.no_proxy.clone(),
                proxy_from_environment: self.proxy_from_environment,
                proxy_connect_header: self.proxy_connect_header.clone(),
            },
        }
    }

    fn from_upstream(upstream: &upstream::OAuth2) -> Self {
        let proxy = &upstream.proxy_config;
        OAuth2 {
            client_id: upstream.client_id.clone(),
            client_secret: upstream.client_secret.clone(),
            client_secret_file: upstream.client_secret_file.clone(),
            scopes: upstream.scopes.clone(),
            token_url: upstream.token_url.clone(),
            endpoint_params: upstream.endpoint_params.clone(),
            tls_config: upstream.tls_config.clone(),
            proxy_url: proxy.proxy_url.clone(),
            no_proxy: proxy.no_proxy.clone(),
            proxy_from_environment: proxy.proxy_from_environment,
            proxy_connect_header: proxy.proxy_connect_header.clone(),
        }
    }
}
