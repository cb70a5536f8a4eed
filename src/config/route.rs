//! The routing tree and its validation.
//!
//! Every node is checked when it is decoded ([`Route::validate_child`] rules,
//! without re-walking the already-checked children); the loader then runs
//! [`Route::validate`] on the root for the root-only rules.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::time::Duration;

use super::duration::ModelDuration;
use super::labels::current_label_name_mode;
use super::matchers::{
    MatchType, Matcher, Matchers, ObjectMatchers, anchored_regex, validate_label_map,
};
use super::validation::{Validate, validated_serde};
use crate::error::ConfigError;

/// `group_by` token meaning "group by every label".
pub const GROUP_BY_ALL: &str = "...";

/// Label of the matcher that tags routes generated by Grafana itself.
pub const AUTOGENERATED_ROUTE_LABEL: &str = "__grafana_autogenerated__";
pub const AUTOGENERATED_ROUTE_VALUE: &str = "true";

pub const DEFAULT_GROUP_WAIT: Duration = Duration::from_secs(30);
pub const DEFAULT_GROUP_INTERVAL: Duration = Duration::from_secs(5 * 60);
pub const DEFAULT_REPEAT_INTERVAL: Duration = Duration::from_secs(4 * 60 * 60);

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(remote = "Self", default)]
pub struct Route {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub receiver: String,

    /// Raw `group_by` list as written, possibly the wildcard.
    #[serde(rename = "group_by", skip_serializing_if = "Option::is_none")]
    pub group_by_str: Option<Vec<String>>,
    /// Parsed labels; `None` when grouping by everything or unset.
    #[serde(skip)]
    pub group_by: Option<Vec<String>>,
    #[serde(skip)]
    pub group_by_all: bool,

    #[serde(rename = "match", skip_serializing_if = "BTreeMap::is_empty")]
    pub match_labels: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub match_re: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Matchers::is_empty")]
    pub matchers: Matchers,
    #[serde(skip_serializing_if = "ObjectMatchers::is_empty")]
    pub object_matchers: ObjectMatchers,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub mute_time_intervals: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub active_time_intervals: Vec<String>,

    #[serde(rename = "continue", skip_serializing_if = "std::ops::Not::not")]
    pub continue_matching: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub routes: Vec<Route>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_wait: Option<ModelDuration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_interval: Option<ModelDuration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repeat_interval: Option<ModelDuration>,
}

validated_serde!(Route);

impl Validate for Route {
    fn validate(&mut self) -> Result<(), ConfigError> {
        // Children were checked as they were decoded.
        self.validate_node()
    }
}

impl Route {
    /// Validates this node and, recursively, its children. Normalizes
    /// `group_by`/`group_by_all` from `group_by_str`; running it again on the
    /// result is a no-op.
    pub fn validate_child(&mut self) -> Result<(), ConfigError> {
        self.validate_node()?;
        for child in &mut self.routes {
            child.validate_child()?;
        }
        Ok(())
    }

    /// Validates the tree root: the root-only rules, then
    /// [`validate_child`](Self::validate_child).
    pub fn validate(&mut self) -> Result<(), ConfigError> {
        if self.receiver.is_empty() {
            return Err(ConfigError::invalid(
                "root route must specify a default receiver",
            ));
        }
        if !self.match_labels.is_empty()
            || !self.match_re.is_empty()
            || !self.matchers.is_empty()
            || !self.object_matchers.is_empty()
        {
            return Err(ConfigError::invalid("root route must not have any matchers"));
        }
        if !self.mute_time_intervals.is_empty() {
            return Err(ConfigError::invalid(
                "root route must not have any mute time intervals",
            ));
        }
        self.validate_child()
    }

    fn validate_node(&mut self) -> Result<(), ConfigError> {
        if self.group_interval.is_some_and(|d| d.is_zero()) {
            return Err(ConfigError::invalid("group_interval cannot be zero"));
        }
        if self.repeat_interval.is_some_and(|d| d.is_zero()) {
            return Err(ConfigError::invalid("repeat_interval cannot be zero"));
        }

        validate_label_map(self.match_labels.keys(), "route match")?;
        validate_label_map(self.match_re.keys(), "route match_re")?;
        for pattern in self.match_re.values() {
            anchored_regex(pattern)?;
        }

        self.normalize_group_by()
    }

    fn normalize_group_by(&mut self) -> Result<(), ConfigError> {
        let Some(raw) = &self.group_by_str else {
            self.group_by = None;
            self.group_by_all = false;
            return Ok(());
        };

        let (wildcards, labels): (Vec<&String>, Vec<&String>) =
            raw.iter().partition(|l| l.as_str() == GROUP_BY_ALL);
        if !wildcards.is_empty() && !labels.is_empty() {
            return Err(ConfigError::invalid(
                "cannot have wildcard and other labels simultaneously in group_by",
            ));
        }

        let mode = current_label_name_mode();
        let mut seen = HashSet::new();
        for label in &labels {
            if !seen.insert(label.as_str()) {
                return Err(ConfigError::invalid(format!(
                    "duplicated label {} in group_by",
                    label
                )));
            }
            if !mode.is_valid(label) {
                return Err(ConfigError::invalid(format!(
                    "invalid label name {:?} in group_by list",
                    label
                )));
            }
        }

        if wildcards.is_empty() {
            self.group_by = Some(labels.into_iter().cloned().collect());
            self.group_by_all = false;
        } else {
            self.group_by = None;
            self.group_by_all = true;
        }
        Ok(())
    }

    /// True when this route carries the auto-generated marker matcher.
    pub fn is_autogenerated(&self) -> bool {
        self.object_matchers.iter().any(|m| {
            m.match_type == MatchType::Equal
                && m.name == AUTOGENERATED_ROUTE_LABEL
                && m.value == AUTOGENERATED_ROUTE_VALUE
        })
    }

    /// Every receiver named anywhere in the tree rooted here.
    pub fn all_receivers(&self) -> BTreeSet<&str> {
        let mut names = BTreeSet::new();
        self.collect_receivers(&mut names);
        names
    }

    fn collect_receivers<'a>(&'a self, names: &mut BTreeSet<&'a str>) {
        if !self.receiver.is_empty() {
            names.insert(self.receiver.as_str());
        }
        for child in &self.routes {
            child.collect_receivers(names);
        }
    }

    /// Legacy `match`/`match_re` maps, `matchers` and `object_matchers`
    /// compiled into one list.
    pub fn all_matchers(&self) -> Result<Vec<Matcher>, ConfigError> {
        let mut all = Vec::new();
        for (name, value) in &self.match_labels {
            all.push(Matcher::new(MatchType::Equal, name, value)?);
        }
        for (name, pattern) in &self.match_re {
            all.push(Matcher::new(MatchType::Regexp, name, pattern)?);
        }
        all.extend(self.matchers.iter().cloned());
        all.extend(self.object_matchers.iter().cloned());
        Ok(all)
    }

    /// Options in effect at this node given its parent's.
    pub fn effective_opts(&self, parent: &RouteOpts) -> RouteOpts {
        let mut opts = parent.clone();
        if self.group_by_str.is_some() {
            opts.group_by = self.group_by.clone().unwrap_or_default();
            opts.group_by_all = self.group_by_all;
        }
        if let Some(d) = self.group_wait {
            opts.group_wait = d.0;
        }
        if let Some(d) = self.group_interval {
            opts.group_interval = d.0;
        }
        if let Some(d) = self.repeat_interval {
            opts.repeat_interval = d.0;
        }
        opts
    }

    /// Calls `f` on this node and every descendant, parents first.
    pub fn walk_mut(&mut self, f: &mut impl FnMut(&mut Route)) {
        f(self);
        for child in &mut self.routes {
            child.walk_mut(f);
        }
    }
}

/// Grouping and timing options a node ends up with once inheritance is
/// applied. The `Default` holds the notification pipeline's own defaults,
/// which apply when nothing in the tree sets a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteOpts {
    pub group_by: Vec<String>,
    pub group_by_all: bool,
    pub group_wait: Duration,
    pub group_interval: Duration,
    pub repeat_interval: Duration,
}

impl Default for RouteOpts {
    fn default() -> Self {
        Self {
            group_by: Vec::new(),
            group_by_all: false,
            group_wait: DEFAULT_GROUP_WAIT,
            group_interval: DEFAULT_GROUP_INTERVAL,
            repeat_interval: DEFAULT_REPEAT_INTERVAL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(yaml: &str) -> Result<Route, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    #[test]
    fn group_by_labels_are_normalized() {
        let r = route("receiver: r\ngroup_by: [alertname, cluster]").unwrap();
        assert_eq!(
            r.group_by,
            Some(vec!["alertname".to_string(), "cluster".to_string()])
        );
        assert!(!r.group_by_all);
    }

    #[test]
    fn group_by_wildcard() {
        let r = route("receiver: r\ngroup_by: ['...']").unwrap();
        assert!(r.group_by_all);
        assert!(r.group_by.is_none());
    }

    #[test]
    fn wildcard_and_labels_fail() {
        let err = route("group_by: ['...', alertname]").unwrap_err();
        assert!(err.to_string().contains("cannot have wildcard"));
    }

    #[test]
    fn duplicate_group_by_fails() {
        let err = route("group_by: [abc, abc]").unwrap_err();
        assert!(err.to_string().contains("duplicated label"));
    }

    #[test]
    fn invalid_group_by_label_fails() {
        let err = route("group_by: ['not-a-label']").unwrap_err();
        assert!(err.to_string().contains("invalid label name"));
    }

    #[test]
    fn zero_intervals_fail() {
        let err = route("group_interval: 0s").unwrap_err();
        assert!(err.to_string().contains("group_interval cannot be zero"));
        let err = route("repeat_interval: 0s").unwrap_err();
        assert!(err.to_string().contains("repeat_interval cannot be zero"));
        assert!(route("group_wait: 0s").is_ok());
    }

    #[test]
    fn nested_child_is_checked_while_decoding() {
        let err = route("receiver: r\nroutes:\n  - routes:\n      - group_by: [a, a]").unwrap_err();
        assert!(err.to_string().contains("duplicated label a"));
    }

    #[test]
    fn validate_child_is_idempotent() {
        let mut r = route("receiver: r\ngroup_by: [a, b]\nroutes:\n  - group_by: ['...']").unwrap();
        r.validate_child().unwrap();
        let once = r.clone();
        r.validate_child().unwrap();
        assert_eq!(r, once);
        assert!(r.routes[0].group_by_all);
    }

    #[test]
    fn validate_child_sees_programmatic_changes() {
        let mut r = route("receiver: r").unwrap();
        r.routes.push(Route {
            group_by_str: Some(vec!["x".to_string(), "...".to_string()]),
            ..Default::default()
        });
        assert!(r.validate_child().is_err());
    }

    #[test]
    fn root_rules() {
        let mut r = route("group_by: [a]").unwrap();
        let err = r.validate().unwrap_err();
        assert!(err.to_string().contains("must specify a default receiver"));

        let mut r = route("receiver: r\nmatch:\n  foo: bar").unwrap();
        let err = r.validate().unwrap_err();
        assert!(err.to_string().contains("must not have any matchers"));

        let mut r = route("receiver: r\nobject_matchers: [[a, '=', b]]").unwrap();
        assert!(r.validate().is_err());

        let mut r = route("receiver: r\nmute_time_intervals: [weekends]").unwrap();
        let err = r.validate().unwrap_err();
        assert!(err.to_string().contains("must not have any mute time intervals"));
    }

    #[test]
    fn legacy_match_maps() {
        let r = route("match:\n  team: ops\nmatch_re:\n  service: 'api|db'").unwrap();
        let all = r.all_matchers().unwrap();
        assert_eq!(all.len(), 2);
        assert!(all[1].matches("db"));
        assert!(!all[1].matches("dbx"));
        assert!(route("match_re:\n  service: '(['").is_err());
    }

    #[test]
    fn effective_opts_inherit() {
        let r = route(
            "receiver: r\ngroup_wait: 10s\nroutes:\n  - receiver: c\n    group_by: [team]\n    repeat_interval: 1h",
        )
        .unwrap();
        let root = r.effective_opts(&RouteOpts::default());
        assert_eq!(root.group_wait, Duration::from_secs(10));
        assert_eq!(root.group_interval, DEFAULT_GROUP_INTERVAL);

        let child = r.routes[0].effective_opts(&root);
        assert_eq!(child.group_wait, Duration::from_secs(10));
        assert_eq!(child.repeat_interval, Duration::from_secs(3600));
        assert_eq!(child.group_by, vec!["team".to_string()]);
    }

    #[test]
    fn all_receivers_and_autogenerated_marker() {
        let r = route(
            "receiver: a\nroutes:\n  - receiver: b\n    object_matchers: [['__grafana_autogenerated__', '=', 'true']]\n    routes:\n      - receiver: c",
        )
        .unwrap();
        let names: Vec<_> = r.all_receivers().into_iter().collect();
        assert_eq!(names, vec!["a", "b", "c"]);
        assert!(r.routes[0].is_autogenerated());
        assert!(!r.is_autogenerated());
    }

    #[test]
    fn serializes_raw_group_by_and_continue() {
        let r = route("receiver: r\ngroup_by: ['...']\ncontinue: true\ngroup_wait: 30s").unwrap();
        let out = serde_json::to_value(&r).unwrap();
        assert_eq!(out["group_by"][0], "...");
        assert_eq!(out["continue"], true);
        assert_eq!(out["group_wait"], "30s");
        assert!(out.get("group_by_all").is_none());
    }
}
