use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::labels::current_label_name_mode;
use super::matchers::{Matchers, anchored_regex, validate_label_map};
use super::validation::{Validate, validated_serde};
use crate::error::ConfigError;

/// Mutes alerts matching the target matchers while an alert matching the
/// source matchers fires, provided both agree on every label in `equal`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(remote = "Self", default)]
pub struct InhibitRule {
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub source_match: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub source_match_re: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Matchers::is_empty")]
    pub source_matchers: Matchers,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub target_match: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub target_match_re: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Matchers::is_empty")]
    pub target_matchers: Matchers,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub equal: Vec<String>,
}

validated_serde!(InhibitRule);

impl Validate for InhibitRule {
    fn validate(&mut self) -> Result<(), ConfigError> {
        validate_label_map(self.source_match.keys(), "source_match")?;
        validate_label_map(self.source_match_re.keys(), "source_match_re")?;
        validate_label_map(self.target_match.keys(), "target_match")?;
        validate_label_map(self.target_match_re.keys(), "target_match_re")?;
        for pattern in self
            .source_match_re
            .values()
            .chain(self.target_match_re.values())
        {
            anchored_regex(pattern)?;
        }

        let mode = current_label_name_mode();
        if let Some(bad) = self.equal.iter().find(|name| !mode.is_valid(name)) {
            return Err(ConfigError::invalid(format!(
                "invalid label name {:?} in equal list",
                bad
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::labels::{LabelNameMode, with_label_name_mode};

    #[test]
    fn inhibit_rule_parses_all_matcher_forms() {
        let yaml = r#"
source_match:
  severity: critical
target_match_re:
  severity: "warning|info"
source_matchers: ['alertname="NodeDown"']
target_matchers: ['team=~"ops.*"']
equal: [cluster, instance]
"#;
        let rule: InhibitRule = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(rule.source_match["severity"], "critical");
        assert_eq!(rule.source_matchers.0[0].value, "NodeDown");
        assert!(rule.target_matchers.0[0].matches("ops-eu"));
        assert_eq!(rule.equal, vec!["cluster", "instance"]);
    }

    #[test]
    fn invalid_regex_fails() {
        let err = serde_yaml::from_str::<InhibitRule>("target_match_re:\n  a: '(['").unwrap_err();
        assert!(err.to_string().contains("invalid regular expression"));
    }

    #[test]
    fn equal_labels_follow_label_name_mode() {
        let yaml = "equal: ['foo.bar']";
        let err = serde_yaml::from_str::<InhibitRule>(yaml).unwrap_err();
        assert!(err.to_string().contains("invalid label name \"foo.bar\" in equal list"));

        let rule = with_label_name_mode(LabelNameMode::Utf8, || {
            serde_yaml::from_str::<InhibitRule>(yaml)
        })
        .unwrap();
        assert_eq!(rule.equal, vec!["foo.bar"]);
    }

    #[test]
    fn invalid_source_match_label_fails() {
        let err = serde_yaml::from_str::<InhibitRule>("source_match:\n  '1abc': x").unwrap_err();
        assert!(err.to_string().contains("in source_match"));
    }
}
