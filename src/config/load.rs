//! Loading a configuration document and checking it as a whole.

use std::collections::HashSet;

use super::global::GlobalConfig;
use super::labels::{LabelNameMode, with_label_name_mode};
use super::route::Route;
use super::types::Config;
use crate::error::{ConfigError, TimeIntervalKind};

/// Knobs for [`load_with`] and friends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadOptions {
    /// Label name rules used while decoding matchers, `group_by` and
    /// `equal` lists.
    pub label_names: LabelNameMode,
}

#[derive(Clone, Copy)]
enum Format {
    Yaml,
    Json,
}

/// Loads a YAML (or JSON) document with the default options.
pub fn load(input: impl AsRef<[u8]>) -> Result<Config, ConfigError> {
    load_with(input, LoadOptions::default())
}

pub fn load_with(input: impl AsRef<[u8]>, opts: LoadOptions) -> Result<Config, ConfigError> {
    let mut config = decode(input.as_ref(), Format::Yaml, opts)?;
    check(&mut config)?;
    Ok(config)
}

/// Loads a JSON document with the default options.
pub fn load_json(input: impl AsRef<[u8]>) -> Result<Config, ConfigError> {
    load_json_with(input, LoadOptions::default())
}

pub fn load_json_with(input: impl AsRef<[u8]>, opts: LoadOptions) -> Result<Config, ConfigError> {
    let mut config = decode(input.as_ref(), Format::Json, opts)?;
    check(&mut config)?;
    Ok(config)
}

/// Loads an upstream-only document. Grafana-managed receivers are rejected;
/// after the regular checks, missing
/// global settings get their defaults and are pushed down into every
/// receiver integration that leaves them unset.
pub fn load_compat(input: impl AsRef<[u8]>) -> Result<Config, ConfigError> {
    load_compat_with(input, LoadOptions::default())
}

pub fn load_compat_with(input: impl AsRef<[u8]>, opts: LoadOptions) -> Result<Config, ConfigError> {
    let mut config = load_with(input, opts)?;
    if let Some(receiver) = config
        .receivers
        .iter()
        .find(|r| !r.grafana_managed_receiver_configs.is_empty())
    {
        return Err(ConfigError::GrafanaReceiverNotAllowed(receiver.name.clone()));
    }
    if config.global.is_none() {
        tracing::debug!("no global section, using defaults");
    }
    let global = config.global.get_or_insert_with(GlobalConfig::default);
    for receiver in &mut config.receivers {
        global.apply_to(receiver)?;
        tracing::trace!(receiver = %receiver.name, "global defaults applied");
    }
    Ok(config)
}

fn decode(input: &[u8], format: Format, opts: LoadOptions) -> Result<Config, ConfigError> {
    if input.trim_ascii().is_empty() {
        return Err(ConfigError::EmptyInput);
    }
    with_label_name_mode(opts.label_names, || match format {
        Format::Yaml => serde_yaml::from_slice(input).map_err(|e| ConfigError::Parse(e.to_string())),
        Format::Json => serde_json::from_slice(input).map_err(|e| ConfigError::Parse(e.to_string())),
    })
}

/// Document-wide rules, run after every field decoded cleanly.
fn check(config: &mut Config) -> Result<(), ConfigError> {
    let route = config.route.as_mut().ok_or(ConfigError::NoRoute)?;
    route.validate()?;

    let mut interval_names = HashSet::new();
    let lists = [
        (&config.mute_time_intervals, TimeIntervalKind::MuteTimeInterval),
        (&config.time_intervals, TimeIntervalKind::TimeInterval),
    ];
    for (list, kind) in lists {
        for interval in list {
            if interval.name.is_empty() {
                return Err(ConfigError::MissingTimeIntervalName { kind });
            }
            if !interval_names.insert(interval.name.as_str()) {
                return Err(ConfigError::DuplicateTimeInterval {
                    kind,
                    name: interval.name.clone(),
                });
            }
        }
    }

    let mut receiver_names = HashSet::new();
    for receiver in &config.receivers {
        if !receiver_names.insert(receiver.name.as_str()) {
            return Err(ConfigError::DuplicateReceiver(receiver.name.clone()));
        }
    }

    if let Some(route) = &config.route {
        check_references(route, &receiver_names, &interval_names)?;
    }

    if config.reachable_receiver_type().is_none() {
        return Err(ConfigError::MixedReceiverTypes);
    }

    if config.route.as_ref().is_some_and(|r| r.continue_matching) && config.has_grafana_receivers()
    {
        return Err(ConfigError::ContinueInRootRoute);
    }
    Ok(())
}

/// Every receiver and time interval a route names must exist. Children of
/// an auto-generated route are filled in later and are not checked.
fn check_references(
    route: &Route,
    receivers: &HashSet<&str>,
    intervals: &HashSet<&str>,
) -> Result<(), ConfigError> {
    if !route.receiver.is_empty() && !receivers.contains(route.receiver.as_str()) {
        return Err(ConfigError::UndefinedReceiver(route.receiver.clone()));
    }
    for name in route
        .mute_time_intervals
        .iter()
        .chain(&route.active_time_intervals)
    {
        if !intervals.contains(name.as_str()) {
            return Err(ConfigError::UndefinedTimeInterval(name.clone()));
        }
    }
    if route.is_autogenerated() {
        return Ok(());
    }
    for child in &route.routes {
        check_references(child, receivers, intervals)?;
    }
    Ok(())
}
