//! Decode-time validation shared by every configuration type.
//!
//! Types that carry field rules derive serde with `#[serde(remote = "Self")]`
//! and register through [`validated_serde!`]. Their `Deserialize` impl first
//! decodes the fields (defaults filled in by `#[serde(default)]`), then runs
//! [`Validate::validate`], so JSON and YAML input go through the same checks.

use crate::error::ConfigError;

/// Field-local rules applied right after a value is decoded.
///
/// Implementations may normalize the value in place (defaulting, folding a
/// deprecated field into its replacement) before checking it.
pub(crate) trait Validate {
    fn validate(&mut self) -> Result<(), ConfigError>;
}

macro_rules! validated_serde {
    ($($ty:ty),+ $(,)?) => {$(
        impl<'de> ::serde::Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: ::serde::Deserializer<'de>,
            {
                let mut value = <$ty>::deserialize(deserializer)?;
                $crate::config::validation::Validate::validate(&mut value)
                    .map_err(<D::Error as ::serde::de::Error>::custom)?;
                Ok(value)
            }
        }

        impl ::serde::Serialize for $ty {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: ::serde::Serializer,
            {
                <$ty>::serialize(self, serializer)
            }
        }
    )+};
}

pub(crate) use validated_serde;

/// Fails unless at most one of the named fields is set.
pub(crate) fn at_most_one(fields: &[(&str, bool)]) -> Result<(), ConfigError> {
    if fields.iter().filter(|(_, set)| *set).count() > 1 {
        return Err(ConfigError::invalid(format!(
            "at most one of {} must be configured",
            join_names(fields)
        )));
    }
    Ok(())
}

/// Fails unless exactly one of the named fields is set.
pub(crate) fn exactly_one(fields: &[(&str, bool)]) -> Result<(), ConfigError> {
    match fields.iter().filter(|(_, set)| *set).count() {
        1 => Ok(()),
        0 => Err(ConfigError::invalid(format!(
            "one of {} must be configured",
            fields
                .iter()
                .map(|(name, _)| *name)
                .collect::<Vec<_>>()
                .join(" or ")
        ))),
        _ => at_most_one(fields),
    }
}

fn join_names(fields: &[(&str, bool)]) -> String {
    let names: Vec<_> = fields.iter().map(|(name, _)| *name).collect();
    match names.split_last() {
        Some((last, rest)) if !rest.is_empty() => format!("{} & {}", rest.join(", "), last),
        _ => names.join(""),
    }
}

/// True when `s` contains template syntax and cannot be checked statically.
pub(crate) fn is_templated(s: &str) -> bool {
    s.contains("{{")
}
