//! Secret values that never appear in logs or default serialization.

use serde::{Deserialize, Serialize};
use std::cell::Cell;

/// Placeholder written instead of a secret value.
pub const SECRET_TOKEN: &str = "<secret>";

thread_local! {
    static PLAINTEXT_SECRETS: Cell<bool> = const { Cell::new(false) };
}

/// Restores the previous plaintext mode when dropped, even on panic.
struct PlaintextGuard(bool);

impl Drop for PlaintextGuard {
    fn drop(&mut self) {
        PLAINTEXT_SECRETS.with(|flag| flag.set(self.0));
    }
}

/// Runs `f` with secrets serialized in plaintext on the current thread.
pub(crate) fn with_plaintext_secrets<T>(f: impl FnOnce() -> T) -> T {
    let previous = PLAINTEXT_SECRETS.with(|flag| flag.replace(true));
    let _guard = PlaintextGuard(previous);
    f()
}

pub(crate) fn plaintext_secrets() -> bool {
    PLAINTEXT_SECRETS.with(Cell::get)
}

/// Serializes `value` to JSON with every secret revealed.
///
/// This is the only way to get secret material back out of a configuration.
/// Plain `serde_json::to_string` and `serde_yaml::to_string` always mask.
pub fn marshal_json_with_secrets<T: Serialize + ?Sized>(
    value: &T,
) -> Result<String, serde_json::Error> {
    with_plaintext_secrets(|| serde_json::to_string(value))
}

/// Wrapper for secrets such as passwords, API keys and tokens.
///
/// `Debug` and `Display` always show `[REDACTED]`. Serialization writes
/// [`SECRET_TOKEN`] for non-empty values unless plaintext mode is active.
///
/// # Example
///
/// ```
/// use alerting_definition::config::Secret;
///
/// let secret = Secret::new("my-api-key");
/// assert_eq!(format!("{:?}", secret), "[REDACTED]");
/// assert_eq!(secret.expose(), "my-api-key");
/// assert_eq!(serde_json::to_string(&secret).unwrap(), "\"<secret>\"");
/// ```
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Secret(String);

impl Secret {
    pub fn new(s: impl Into<String>) -> Self {
        Secret(s.into())
    }

    /// Exposes the underlying secret value.
    ///
    /// Never pass the result to logging functions.
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Debug for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[REDACTED]")
    }
}

impl std::fmt::Display for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[REDACTED]")
    }
}

impl Serialize for Secret {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        if self.0.is_empty() || plaintext_secrets() {
            serializer.serialize_str(&self.0)
        } else {
            serializer.serialize_str(SECRET_TOKEN)
        }
    }
}

impl<'de> Deserialize<'de> for Secret {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Secret::new(s))
    }
}
