//! Label matchers in their two wire forms.
//!
//! `matchers: ['severity="critical"', 'team=~"a|b"']` is the string form,
//! `object_matchers: [["severity", "=", "critical"]]` the triple form. Both
//! decode to the same [`Matcher`] list.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

use super::labels::{current_label_name_mode, is_valid_label_name, LabelNameMode};
use crate::error::ConfigError;

/// Comparison performed by a [`Matcher`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MatchType {
    Equal,
    NotEqual,
    Regexp,
    NotRegexp,
}

impl MatchType {
    pub fn as_str(self) -> &'static str {
        match self {
            MatchType::Equal => "=",
            MatchType::NotEqual => "!=",
            MatchType::Regexp => "=~",
            MatchType::NotRegexp => "!~",
        }
    }

    pub fn parse(op: &str) -> Result<Self, ConfigError> {
        match op {
            "=" => Ok(MatchType::Equal),
            "!=" => Ok(MatchType::NotEqual),
            "=~" => Ok(MatchType::Regexp),
            "!~" => Ok(MatchType::NotRegexp),
            other => Err(ConfigError::invalid(format!(
                "unsupported match type {:?} in matcher",
                other
            ))),
        }
    }

    fn is_regex(self) -> bool {
        matches!(self, MatchType::Regexp | MatchType::NotRegexp)
    }
}

impl std::fmt::Display for MatchType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single label predicate.
///
/// Equality and hashing consider the name, type and value only.
#[derive(Clone)]
pub struct Matcher {
    pub name: String,
    pub match_type: MatchType,
    pub value: String,
    regex: Option<Regex>,
}

impl Matcher {
    pub fn new(
        match_type: MatchType,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let name = name.into();
        let value = value.into();
        if !is_valid_label_name(&name) {
            return Err(ConfigError::invalid(format!(
                "invalid label name {:?} in matcher",
                name
            )));
        }
        let regex = if match_type.is_regex() {
            Some(anchored_regex(&value)?)
        } else {
            None
        };
        Ok(Matcher {
            name,
            match_type,
            value,
            regex,
        })
    }

    /// Shorthand for an equality matcher.
    pub fn equal(name: impl Into<String>, value: impl Into<String>) -> Result<Self, ConfigError> {
        Matcher::new(MatchType::Equal, name, value)
    }

    /// Parses the string form, e.g. `team="ops"` or `job=~api.*`.
    ///
    /// Double quotes around the value are optional and stripped.
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        let (name, match_type, value) = split_matcher(s)?;
        let name = unquote(name.trim())?;
        let value = unquote(value.trim())?;
        Matcher::new(match_type, name, value)
    }

    /// Reports whether `value` satisfies this matcher.
    pub fn matches(&self, value: &str) -> bool {
        match self.match_type {
            MatchType::Equal => self.value == value,
            MatchType::NotEqual => self.value != value,
            MatchType::Regexp => self.regex.as_ref().is_some_and(|re| re.is_match(value)),
            MatchType::NotRegexp => !self.regex.as_ref().is_some_and(|re| re.is_match(value)),
        }
    }
}

impl PartialEq for Matcher {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.match_type == other.match_type && self.value == other.value
    }
}

impl Eq for Matcher {}

impl Hash for Matcher {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.match_type.hash(state);
        self.value.hash(state);
    }
}

impl std::fmt::Debug for Matcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Matcher({})", self)
    }
}

impl std::fmt::Display for Matcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if LabelNameMode::Classic.is_valid(&self.name) {
            f.write_str(&self.name)?;
        } else {
            f.write_str(&quote(&self.name))?;
        }
        write!(f, "{}{}", self.match_type, quote(&self.value))
    }
}

/// Compiles `pattern` anchored at both ends, the way Alertmanager does.
pub(crate) fn anchored_regex(pattern: &str) -> Result<Regex, ConfigError> {
    Regex::new(&format!("^(?:{})$", pattern))
        .map_err(|e| ConfigError::invalid(format!("invalid regular expression {:?}: {}", pattern, e)))
}

fn split_matcher(s: &str) -> Result<(&str, MatchType, &str), ConfigError> {
    let bad = || ConfigError::invalid(format!("bad matcher format: {}", s));
    // The operator is the first '=' or '!' outside a quoted label name.
    let mut in_quotes = false;
    let mut escaped = false;
    for (i, c) in s.char_indices() {
        if in_quotes {
            match c {
                '\\' if !escaped => escaped = true,
                '"' if !escaped => in_quotes = false,
                _ => escaped = false,
            }
            continue;
        }
        match c {
            '"' => in_quotes = true,
            '=' | '!' => {
                let rest = &s[i..];
                let op = ["=~", "!~", "!=", "="]
                    .into_iter()
                    .find(|op| rest.starts_with(op))
                    .ok_or_else(bad)?;
                let name = &s[..i];
                if name.trim().is_empty() {
                    return Err(bad());
                }
                return Ok((name, MatchType::parse(op)?, &rest[op.len()..]));
            }
            _ => {}
        }
    }
    Err(bad())
}

fn unquote(s: &str) -> Result<String, ConfigError> {
    let Some(inner) = s.strip_prefix('"').and_then(|s| s.strip_suffix('"')) else {
        return Ok(s.to_string());
    };
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some(other) => out.push(other),
            None => {
                return Err(ConfigError::invalid(format!(
                    "invalid escape sequence at end of {}",
                    s
                )));
            }
        }
    }
    Ok(out)
}

fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Splits `{a="b", c=~"d"}` or `a="b",c=~"d"` into individual matchers.
pub fn parse_matchers(s: &str) -> Result<Vec<Matcher>, ConfigError> {
    let trimmed = s.trim();
    let body = trimmed
        .strip_prefix('{')
        .and_then(|b| b.strip_suffix('}'))
        .unwrap_or(trimmed);

    let mut matchers = Vec::new();
    let mut start = 0;
    let mut in_quotes = false;
    let mut escaped = false;
    for (i, c) in body.char_indices() {
        match c {
            '\\' if in_quotes && !escaped => {
                escaped = true;
                continue;
            }
            '"' if !escaped => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                push_matcher(&mut matchers, &body[start..i])?;
                start = i + 1;
            }
            _ => {}
        }
        escaped = false;
    }
    push_matcher(&mut matchers, &body[start..])?;
    Ok(matchers)
}

fn push_matcher(matchers: &mut Vec<Matcher>, part: &str) -> Result<(), ConfigError> {
    if !part.trim().is_empty() {
        matchers.push(Matcher::parse(part)?);
    }
    Ok(())
}

/// Matchers in string form (`matchers:` on routes and inhibit rules).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Matchers(pub Vec<Matcher>);

impl Matchers {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Matcher> {
        self.0.iter()
    }
}

impl Serialize for Matchers {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_seq(self.0.iter().map(ToString::to_string))
    }
}

impl<'de> Deserialize<'de> for Matchers {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let lines = Vec::<String>::deserialize(deserializer)?;
        let mut matchers = Vec::with_capacity(lines.len());
        for line in &lines {
            matchers.extend(parse_matchers(line).map_err(serde::de::Error::custom)?);
        }
        Ok(Matchers(matchers))
    }
}

/// Matchers in triple form (`object_matchers:`), e.g. `["team", "=", "ops"]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectMatchers(pub Vec<Matcher>);

impl ObjectMatchers {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Matcher> {
        self.0.iter()
    }
}

impl Serialize for ObjectMatchers {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_seq(
            self.0
                .iter()
                .map(|m| [m.name.as_str(), m.match_type.as_str(), m.value.as_str()]),
        )
    }
}

impl<'de> Deserialize<'de> for ObjectMatchers {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = Vec::<Vec<String>>::deserialize(deserializer)?;
        let mut matchers = Vec::with_capacity(raw.len());
        for fields in raw {
            let [name, op, value] = <[String; 3]>::try_from(fields).map_err(|fields| {
                serde::de::Error::custom(format!(
                    "unexpected number of fields in object matcher: expected 3, got {}",
                    fields.len()
                ))
            })?;
            let match_type = MatchType::parse(op.trim()).map_err(serde::de::Error::custom)?;
            let value = value.trim();
            let value = value
                .strip_prefix('"')
                .and_then(|v| v.strip_suffix('"'))
                .unwrap_or(value);
            let matcher = Matcher::new(match_type, name.trim(), value)
                .map_err(serde::de::Error::custom)?;
            matchers.push(matcher);
        }
        Ok(ObjectMatchers(matchers))
    }
}

/// Validates the keys of a legacy `match`/`match_re` map.
pub(crate) fn validate_label_map<'a>(
    names: impl IntoIterator<Item = &'a String>,
    context: &str,
) -> Result<(), ConfigError> {
    let mode = current_label_name_mode();
    for name in names {
        if !mode.is_valid(name) {
            return Err(ConfigError::invalid(format!(
                "invalid label name {:?} in {}",
                name, context
            )));
        }
    }
    Ok(())
}
