//! Label name validation.
//!
//! Classic Prometheus label names match `[a-zA-Z_][a-zA-Z0-9_]*`. With UTF-8
//! names enabled any non-empty string is accepted. The mode is scoped to the
//! current thread for the duration of a decode so concurrent loads with
//! different modes never observe each other.

use regex::Regex;
use std::cell::Cell;
use std::sync::LazyLock;

static CLASSIC_LABEL_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z_][a-zA-Z0-9_]*$").expect("valid regex"));

/// Which label names are considered valid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LabelNameMode {
    #[default]
    Classic,
    Utf8,
}

impl LabelNameMode {
    pub fn is_valid(self, name: &str) -> bool {
        match self {
            LabelNameMode::Classic => CLASSIC_LABEL_NAME.is_match(name),
            LabelNameMode::Utf8 => !name.is_empty(),
        }
    }
}

thread_local! {
    static MODE: Cell<LabelNameMode> = const { Cell::new(LabelNameMode::Classic) };
}

struct ModeGuard(LabelNameMode);

impl Drop for ModeGuard {
    fn drop(&mut self) {
        MODE.with(|m| m.set(self.0));
    }
}

/// Runs `f` with `mode` active on the current thread.
pub fn with_label_name_mode<T>(mode: LabelNameMode, f: impl FnOnce() -> T) -> T {
    let previous = MODE.with(|m| m.replace(mode));
    let _guard = ModeGuard(previous);
    f()
}

/// The mode in effect on the current thread.
pub fn current_label_name_mode() -> LabelNameMode {
    MODE.with(Cell::get)
}

/// Validates a label name against the current mode.
pub fn is_valid_label_name(name: &str) -> bool {
    current_label_name_mode().is_valid(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classic_names() {
        assert!(is_valid_label_name("alertname"));
        assert!(is_valid_label_name("_private"));
        assert!(is_valid_label_name("team_2"));
        assert!(!is_valid_label_name("2team"));
        assert!(!is_valid_label_name("service.name"));
        assert!(!is_valid_label_name(""));
    }

    #[test]
    fn utf8_mode_accepts_any_non_empty_name() {
        with_label_name_mode(LabelNameMode::Utf8, || {
            assert!(is_valid_label_name("service.name"));
            assert!(is_valid_label_name("équipe"));
            assert!(!is_valid_label_name(""));
        });
        assert_eq!(current_label_name_mode(), LabelNameMode::Classic);
        assert!(!is_valid_label_name("service.name"));
    }
}
