//! Merging a Grafana-authored configuration into a Mimir-authored one.
//!
//! The Grafana routing tree is spliced under the Mimir root behind a set of
//! equality matchers. Grafana receivers and time intervals whose names are
//! already taken on the Mimir side are renamed, and every route reference to
//! them is rewritten before splicing. Neither input is modified.

use std::collections::{BTreeMap, HashSet};

use crate::config::{Config, MatchType, Matcher, ObjectMatchers, Route, TimeInterval};
use crate::error::MergeError;

/// Merge parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeOpts {
    /// Appended to a Grafana name that collides with a Mimir one.
    pub dedup_suffix: String,
    /// Equality matchers routing alerts into the Grafana subtree.
    pub subtree_matchers: Vec<Matcher>,
}

impl MergeOpts {
    /// Checks the matchers: at least one, equality only, one per label name.
    pub fn validate(&self) -> Result<(), MergeError> {
        if self.subtree_matchers.is_empty() {
            return Err(MergeError::NoMatchers);
        }
        let mut names = HashSet::new();
        for m in &self.subtree_matchers {
            if m.match_type != MatchType::Equal {
                return Err(MergeError::InvalidMatchers);
            }
            if !names.insert(m.name.as_str()) {
                return Err(MergeError::DuplicateMatchers);
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeResult {
    pub config: Config,
    /// Old Grafana receiver name to new name.
    pub renamed_receivers: BTreeMap<String, String>,
    /// Old Grafana time interval name to new name, both lists combined.
    pub renamed_time_intervals: BTreeMap<String, String>,
}

/// Merges `grafana` into `mimir`.
///
/// The result has Mimir's global section, Mimir's routing tree with the
/// Grafana tree appended as the last child of the root, and the receivers,
/// time intervals, inhibition rules and templates of both sides, Mimir's
/// first.
pub fn merge(grafana: &Config, mimir: &Config, opts: &MergeOpts) -> Result<MergeResult, MergeError> {
    opts.validate()?;

    let grafana_route = grafana.route.as_ref().ok_or(MergeError::MissingRoute("grafana"))?;
    let mimir_route = mimir.route.as_ref().ok_or(MergeError::MissingRoute("mimir"))?;

    if has_conflicting_route(grafana_route, &opts.subtree_matchers) {
        return Err(MergeError::SubtreeMatchersConflict);
    }

    let renamed_receivers = plan_renames(
        &grafana.receivers.iter().map(|r| r.name.as_str()).collect::<Vec<_>>(),
        &mimir.receivers.iter().map(|r| r.name.as_str()).collect::<Vec<_>>(),
        &opts.dedup_suffix,
    );
    let renamed_time_intervals = plan_renames(
        &grafana.time_interval_names().collect::<Vec<_>>(),
        &mimir.time_interval_names().collect::<Vec<_>>(),
        &opts.dedup_suffix,
    );
    for (old, new) in &renamed_receivers {
        tracing::debug!(old = %old, new = %new, "renaming Grafana receiver");
    }
    for (old, new) in &renamed_time_intervals {
        tracing::debug!(old = %old, new = %new, "renaming Grafana time interval");
    }

    let mut subtree = grafana_route.clone();
    rename_references(&mut subtree, &renamed_receivers, &renamed_time_intervals);
    subtree.object_matchers = ObjectMatchers(opts.subtree_matchers.clone());
    subtree.continue_matching = false;

    let mut route = mimir_route.clone();
    route.routes.push(subtree);

    let mut receivers = mimir.receivers.clone();
    receivers.extend(grafana.receivers.iter().map(|r| {
        let mut r = r.clone();
        if let Some(new) = renamed_receivers.get(&r.name) {
            r.name = new.clone();
        }
        r
    }));

    let mut inhibit_rules = mimir.inhibit_rules.clone();
    for rule in &mut inhibit_rules {
        rule.source_matchers.0.extend(opts.subtree_matchers.iter().cloned());
        rule.target_matchers.0.extend(opts.subtree_matchers.iter().cloned());
    }
    inhibit_rules.extend(grafana.inhibit_rules.iter().cloned());

    let mut templates = mimir.templates.clone();
    templates.extend(grafana.templates.iter().cloned());

    let config = Config {
        global: mimir.global.clone(),
        route: Some(route),
        inhibit_rules,
        mute_time_intervals: concat_intervals(
            &mimir.mute_time_intervals,
            &grafana.mute_time_intervals,
            &renamed_time_intervals,
        ),
        time_intervals: concat_intervals(
            &mimir.time_intervals,
            &grafana.time_intervals,
            &renamed_time_intervals,
        ),
        templates,
        receivers,
    };

    Ok(MergeResult {
        config,
        renamed_receivers,
        renamed_time_intervals,
    })
}

/// True when some route of the tree already carries every subtree matcher.
fn has_conflicting_route(route: &Route, subtree_matchers: &[Matcher]) -> bool {
    if subtree_matchers.iter().all(|m| route_has_matcher(route, m)) {
        return true;
    }
    route
        .routes
        .iter()
        .any(|child| has_conflicting_route(child, subtree_matchers))
}

fn route_has_matcher(route: &Route, m: &Matcher) -> bool {
    route.match_labels.get(&m.name).is_some_and(|v| *v == m.value)
        || route.matchers.iter().any(|x| x == m)
        || route.object_matchers.iter().any(|x| x == m)
}

/// Picks a new name for every Grafana name also used on the Mimir side:
/// `<name><suffix>`, then `<name><suffix>_01`, `_02`... until unused by
/// either side and by earlier picks.
fn plan_renames(grafana: &[&str], mimir: &[&str], suffix: &str) -> BTreeMap<String, String> {
    let mimir: HashSet<&str> = mimir.iter().copied().collect();
    let mut taken: HashSet<String> = grafana
        .iter()
        .chain(mimir.iter())
        .map(|name| name.to_string())
        .collect();

    let mut renames = BTreeMap::new();
    for &name in grafana {
        if !mimir.contains(name) || renames.contains_key(name) {
            continue;
        }
        let mut candidate = format!("{}{}", name, suffix);
        let mut n = 1;
        while taken.contains(&candidate) {
            candidate = format!("{}{}_{:02}", name, suffix, n);
            n += 1;
        }
        taken.insert(candidate.clone());
        renames.insert(name.to_string(), candidate);
    }
    renames
}

fn rename_references(
    route: &mut Route,
    receivers: &BTreeMap<String, String>,
    intervals: &BTreeMap<String, String>,
) {
    route.walk_mut(&mut |node| {
        if let Some(new) = receivers.get(&node.receiver) {
            node.receiver = new.clone();
        }
        for name in node
            .mute_time_intervals
            .iter_mut()
            .chain(node.active_time_intervals.iter_mut())
        {
            if let Some(new) = intervals.get(name.as_str()) {
                *name = new.clone();
            }
        }
    });
}

fn concat_intervals(
    mimir: &[TimeInterval],
    grafana: &[TimeInterval],
    renames: &BTreeMap<String, String>,
) -> Vec<TimeInterval> {
    let mut all = mimir.to_vec();
    all.extend(grafana.iter().map(|ti| {
        let mut ti = ti.clone();
        if let Some(new) = renames.get(&ti.name) {
            ti.name = new.clone();
        }
        ti
    }));
    all
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Receiver, RouteOpts, load};
    use proptest::prelude::*;
    use std::time::Duration;

    fn opts() -> MergeOpts {
        MergeOpts {
            dedup_suffix: "_mimir-12345".to_string(),
            subtree_matchers: vec![Matcher::equal("__mimir__", "true").unwrap()],
        }
    }

    fn config(route: Route, receivers: &[&str], intervals: &[&str]) -> Config {
        Config {
            route: Some(route),
            receivers: receivers.iter().map(|n| Receiver::new(*n)).collect(),
            time_intervals: intervals
                .iter()
                .map(|n| TimeInterval {
                    name: n.to_string(),
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        }
    }

    fn route_to(receiver: &str) -> Route {
        Route {
            receiver: receiver.to_string(),
            ..Default::default()
        }
    }

    // ============================================================
    // Options
    // ============================================================

    #[test]
    fn opts_need_matchers() {
        let o = MergeOpts {
            subtree_matchers: vec![],
            ..opts()
        };
        assert_eq!(o.validate(), Err(MergeError::NoMatchers));
    }

    #[test]
    fn opts_need_equality_matchers() {
        for match_type in [MatchType::NotEqual, MatchType::Regexp, MatchType::NotRegexp] {
            let o = MergeOpts {
                subtree_matchers: vec![Matcher::new(match_type, "a", "b").unwrap()],
                ..opts()
            };
            assert_eq!(o.validate(), Err(MergeError::InvalidMatchers));
        }
    }

    #[test]
    fn opts_reject_duplicate_label_names() {
        let o = MergeOpts {
            subtree_matchers: vec![
                Matcher::equal("a", "1").unwrap(),
                Matcher::equal("a", "2").unwrap(),
            ],
            ..opts()
        };
        assert_eq!(o.validate(), Err(MergeError::DuplicateMatchers));
    }

    #[test]
    fn missing_routes() {
        let with_route = config(route_to("r"), &["r"], &[]);
        let without = Config::default();
        assert_eq!(
            merge(&without, &with_route, &opts()).unwrap_err(),
            MergeError::MissingRoute("grafana")
        );
        assert_eq!(
            merge(&with_route, &without, &opts()).unwrap_err(),
            MergeError::MissingRoute("mimir")
        );
    }

    // ============================================================
    // Renaming
    // ============================================================

    #[test]
    fn colliding_receiver_is_renamed_with_suffix() {
        let grafana_route = Route {
            routes: vec![route_to("grafana-default-email")],
            ..route_to("grafana-default-email")
        };
        let grafana = config(grafana_route, &["grafana-default-email"], &[]);
        let mimir = config(route_to("grafana-default-email"), &["grafana-default-email"], &[]);

        let result = merge(&grafana, &mimir, &opts()).unwrap();
        let new = "grafana-default-email_mimir-12345";
        assert_eq!(result.renamed_receivers["grafana-default-email"], new);

        let names: Vec<_> = result.config.receivers.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["grafana-default-email", new]);

        let root = result.config.route.unwrap();
        assert_eq!(root.receiver, "grafana-default-email");
        let subtree = root.routes.last().unwrap();
        assert_eq!(subtree.receiver, new);
        assert_eq!(subtree.routes[0].receiver, new);
    }

    #[test]
    fn suffixed_name_collision_gets_a_counter() {
        let grafana = config(route_to("a"), &["a", "a_x"], &[]);
        let mimir = config(route_to("a"), &["a", "a_x_01"], &[]);
        let o = MergeOpts {
            dedup_suffix: "_x".to_string(),
            ..opts()
        };
        let result = merge(&grafana, &mimir, &o).unwrap();
        assert_eq!(result.renamed_receivers["a"], "a_x_02");
        assert_eq!(result.renamed_receivers.len(), 1);
    }

    #[test]
    fn time_intervals_share_a_namespace() {
        let mut grafana_route = route_to("g");
        grafana_route.routes.push(Route {
            mute_time_intervals: vec!["weekends".to_string()],
            active_time_intervals: vec!["nights".to_string()],
            ..Default::default()
        });
        let mut grafana = config(grafana_route, &["g"], &["nights"]);
        grafana.mute_time_intervals.push(TimeInterval {
            name: "weekends".to_string(),
            ..Default::default()
        });
        let mut mimir = config(route_to("m"), &["m"], &["weekends"]);
        mimir.mute_time_intervals.push(TimeInterval {
            name: "nights".to_string(),
            ..Default::default()
        });

        let result = merge(&grafana, &mimir, &opts()).unwrap();
        assert_eq!(result.renamed_time_intervals.len(), 2);
        assert!(result.renamed_receivers.is_empty());

        let root = result.config.route.unwrap();
        let child = &root.routes[0].routes[0];
        assert_eq!(child.mute_time_intervals, vec!["weekends_mimir-12345"]);
        assert_eq!(child.active_time_intervals, vec!["nights_mimir-12345"]);
        assert_eq!(
            result.config.mute_time_intervals[1].name,
            "weekends_mimir-12345"
        );
    }

    // ============================================================
    // Splicing
    // ============================================================

    #[test]
    fn subtree_is_appended_behind_matchers() {
        let mut mimir_route = route_to("m");
        mimir_route.routes.push(route_to("m"));
        let mimir = config(mimir_route, &["m"], &[]);
        let grafana = config(route_to("g"), &["g"], &[]);

        let result = merge(&grafana, &mimir, &opts()).unwrap();
        let root = result.config.route.unwrap();
        assert_eq!(root.routes.len(), 2);
        let subtree = &root.routes[1];
        assert_eq!(subtree.object_matchers.0, opts().subtree_matchers);
        assert_eq!(subtree.receiver, "g");
        assert!(!subtree.continue_matching);
    }

    #[test]
    fn unset_intervals_inherit_from_mimir_root() {
        let mimir_route = Route {
            group_wait: Some(crate::config::ModelDuration::from_secs(45)),
            ..route_to("m")
        };
        let mimir = config(mimir_route, &["m"], &[]);
        let grafana = config(route_to("g"), &["g"], &[]);

        let result = merge(&grafana, &mimir, &opts()).unwrap();
        let root = result.config.route.unwrap();
        let subtree = &root.routes[0];
        assert!(subtree.group_wait.is_none());
        assert!(subtree.repeat_interval.is_none());

        let effective = subtree.effective_opts(&root.effective_opts(&RouteOpts::default()));
        assert_eq!(effective.group_wait, Duration::from_secs(45));
        assert_eq!(effective.repeat_interval, RouteOpts::default().repeat_interval);
    }

    #[test]
    fn conflicting_grafana_route_is_rejected() {
        let yaml = r#"
route:
  receiver: g
  routes:
    - receiver: g
      routes:
        - receiver: g
          matchers: ['__mimir__="true"', 'team="a"']
receivers: [{name: g}]
"#;
        let grafana = load(yaml).unwrap();
        let mimir = config(route_to("m"), &["m"], &[]);
        assert_eq!(
            merge(&grafana, &mimir, &opts()).unwrap_err(),
            MergeError::SubtreeMatchersConflict
        );

        // A partial match is fine.
        let o = MergeOpts {
            subtree_matchers: vec![
                Matcher::equal("__mimir__", "true").unwrap(),
                Matcher::equal("tenant", "x").unwrap(),
            ],
            ..opts()
        };
        assert!(merge(&grafana, &mimir, &o).is_ok());
    }

    #[test]
    fn legacy_match_map_counts_as_conflict() {
        let mut child = route_to("g");
        child.match_labels.insert("__mimir__".to_string(), "true".to_string());
        let grafana = config(
            Route {
                routes: vec![child],
                ..route_to("g")
            },
            &["g"],
            &[],
        );
        let mimir = config(route_to("m"), &["m"], &[]);
        assert_eq!(
            merge(&grafana, &mimir, &opts()).unwrap_err(),
            MergeError::SubtreeMatchersConflict
        );
    }

    #[test]
    fn mimir_inhibit_rules_get_subtree_matchers() {
        let yaml = r#"
route:
  receiver: m
receivers: [{name: m}]
inhibit_rules:
  - source_matchers: ['severity="critical"']
    target_matchers: ['severity="warning"']
"#;
        let mimir = load(yaml).unwrap();
        let grafana = config(route_to("g"), &["g"], &[]);

        let result = merge(&grafana, &mimir, &opts()).unwrap();
        let rule = &result.config.inhibit_rules[0];
        assert_eq!(rule.source_matchers.0.len(), 2);
        assert_eq!(rule.target_matchers.0[1], opts().subtree_matchers[0]);
    }

    // ============================================================
    // Properties
    // ============================================================

    fn names() -> impl Strategy<Value = Vec<String>> {
        prop::collection::btree_set("[a-c]{1,2}(_x)?(_0[1-2])?", 1..6)
            .prop_map(|set| set.into_iter().collect())
    }

    fn arb_config(receivers: Vec<String>, intervals: Vec<String>) -> Config {
        let mut route = route_to(&receivers[0]);
        for (i, name) in receivers.iter().enumerate() {
            route.routes.push(Route {
                receiver: name.clone(),
                active_time_intervals: intervals.get(i).cloned().into_iter().collect(),
                ..Default::default()
            });
        }
        let (mute, active) = intervals.split_at(intervals.len() / 2);
        Config {
            route: Some(route),
            receivers: receivers.iter().map(Receiver::new).collect(),
            mute_time_intervals: mute
                .iter()
                .map(|n| TimeInterval {
                    name: n.clone(),
                    ..Default::default()
                })
                .collect(),
            time_intervals: active
                .iter()
                .map(|n| TimeInterval {
                    name: n.clone(),
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        }
    }

    proptest! {
        #[test]
        fn merged_names_are_unique(
            g_receivers in names(),
            m_receivers in names(),
            g_intervals in names(),
            m_intervals in names(),
        ) {
            let grafana = arb_config(g_receivers, g_intervals);
            let mimir = arb_config(m_receivers, m_intervals);
            let o = MergeOpts { dedup_suffix: "_x".to_string(), ..opts() };
            let result = merge(&grafana, &mimir, &o).unwrap();

            let mut seen = HashSet::new();
            for r in &result.config.receivers {
                prop_assert!(seen.insert(r.name.clone()), "duplicate receiver {}", r.name);
            }
            let mut seen = HashSet::new();
            for name in result.config.time_interval_names() {
                prop_assert!(seen.insert(name.to_string()), "duplicate interval {}", name);
            }

            // Every reference in the spliced subtree resolves.
            let receivers: HashSet<_> = result.config.receivers.iter().map(|r| r.name.as_str()).collect();
            let root = result.config.route.as_ref().unwrap();
            for name in root.routes.last().unwrap().all_receivers() {
                prop_assert!(receivers.contains(name));
            }
        }

        #[test]
        fn inputs_are_not_mutated(
            g_receivers in names(),
            m_receivers in names(),
            g_intervals in names(),
            m_intervals in names(),
        ) {
            let grafana = arb_config(g_receivers, g_intervals);
            let mimir = arb_config(m_receivers, m_intervals);
            let (g_before, m_before) = (grafana.clone(), mimir.clone());
            let _ = merge(&grafana, &mimir, &opts());
            prop_assert_eq!(grafana, g_before);
            prop_assert_eq!(mimir, m_before);
        }
    }
}
