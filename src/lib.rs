// src/lib.rs
//! Alerting definitions - Alertmanager compatible configuration for Grafana and Mimir.
//!
//! Decodes and validates alerting configuration documents, converts
//! receivers to and from the upstream Alertmanager shapes, merges a
//! Grafana-authored configuration into a Mimir-authored one and rejects
//! settings that would read local files or use proxies.

pub mod compat;
pub mod config;
pub mod error;
pub mod firewall;
pub mod merge;
pub mod upstream;

// Re-export commonly used types
pub use compat::{Compat, receiver_from_upstream, receiver_to_upstream};
pub use config::{
    Config, LoadOptions, Receiver, ReceiverType, Route, load, load_compat, load_json,
    marshal_json_with_secrets,
};
pub use error::{ConfigError, FirewallError, MergeError, SecretsError};
pub use firewall::validate_alertmanager_config;
pub use merge::{MergeOpts, MergeResult, merge};
