//! The root configuration aggregate.

use serde::{Deserialize, Serialize};

use super::global::GlobalConfig;
use super::inhibit::InhibitRule;
use super::receiver::{Receiver, ReceiverType};
use super::route::Route;
use super::time_interval::TimeInterval;

/// A full alerting configuration: routing tree, receivers, time intervals
/// and inhibition rules.
///
/// Decoding a `Config` with serde only applies the field-local rules; use
/// [`load`](super::load) for the root-route and referential-integrity checks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub global: Option<GlobalConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route: Option<Route>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub inhibit_rules: Vec<InhibitRule>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub mute_time_intervals: Vec<TimeInterval>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub time_intervals: Vec<TimeInterval>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub templates: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub receivers: Vec<Receiver>,
}

impl Config {
    pub fn receiver(&self, name: &str) -> Option<&Receiver> {
        self.receivers.iter().find(|r| r.name == name)
    }

    /// Names from both interval lists, mute intervals first.
    pub fn time_interval_names(&self) -> impl Iterator<Item = &str> {
        self.mute_time_intervals
            .iter()
            .chain(&self.time_intervals)
            .map(|ti| ti.name.as_str())
    }

    /// The single non-empty receiver flavor used by the receivers the route
    /// tree reaches, `Empty` when none of them has an integration.
    ///
    /// Returns `None` when both flavors are reachable.
    pub fn reachable_receiver_type(&self) -> Option<ReceiverType> {
        let Some(route) = &self.route else {
            return Some(ReceiverType::Empty);
        };
        let mut found = ReceiverType::Empty;
        for name in route.all_receivers() {
            let Some(receiver) = self.receiver(name) else {
                continue;
            };
            let kind = receiver.receiver_type();
            if !found.is_compatible(kind) {
                return None;
            }
            if kind != ReceiverType::Empty {
                found = kind;
            }
        }
        Some(found)
    }

    pub fn has_grafana_receivers(&self) -> bool {
        self.receivers
            .iter()
            .any(|r| r.receiver_type() == ReceiverType::Grafana)
    }
}
