//! Duration value types.
//!
//! Two textual syntaxes are in use. Route timers and `resolve_timeout` use the
//! Prometheus syntax (`1d`, `4h30m`), integration timeouts use the Go syntax
//! which allows fractions (`1.5h`, `250ms`).

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use std::time::Duration;

use crate::error::ConfigError;

const MS_PER_SECOND: u128 = 1000;
const MS_PER_MINUTE: u128 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: u128 = 60 * MS_PER_MINUTE;
const MS_PER_DAY: u128 = 24 * MS_PER_HOUR;
const MS_PER_WEEK: u128 = 7 * MS_PER_DAY;
const MS_PER_YEAR: u128 = 365 * MS_PER_DAY;

static PROMETHEUS_DURATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:([0-9]+)y)?(?:([0-9]+)w)?(?:([0-9]+)d)?(?:([0-9]+)h)?(?:([0-9]+)m)?(?:([0-9]+)s)?(?:([0-9]+)ms)?$",
    )
    .expect("valid regex")
});

/// A duration in Prometheus notation, e.g. `5m`, `1h30m`, `2w`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ModelDuration(pub Duration);

impl ModelDuration {
    pub fn from_secs(secs: u64) -> Self {
        ModelDuration(Duration::from_secs(secs))
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        if s.is_empty() {
            return Err(ConfigError::invalid("empty duration string"));
        }
        if s == "0" {
            return Ok(ModelDuration::default());
        }
        let caps = PROMETHEUS_DURATION
            .captures(s)
            .ok_or_else(|| ConfigError::invalid(format!("not a valid duration string: {:?}", s)))?;

        let units = [
            MS_PER_YEAR,
            MS_PER_WEEK,
            MS_PER_DAY,
            MS_PER_HOUR,
            MS_PER_MINUTE,
            MS_PER_SECOND,
            1,
        ];
        let mut total_ms: u128 = 0;
        for (i, unit) in units.iter().enumerate() {
            if let Some(m) = caps.get(i + 1) {
                let v: u128 = m
                    .as_str()
                    .parse()
                    .map_err(|_| ConfigError::invalid(format!("duration out of range: {:?}", s)))?;
                total_ms = v
                    .checked_mul(*unit)
                    .and_then(|x| x.checked_add(total_ms))
                    .ok_or_else(|| ConfigError::invalid(format!("duration out of range: {:?}", s)))?;
            }
        }
        let ms = u64::try_from(total_ms)
            .map_err(|_| ConfigError::invalid(format!("duration out of range: {:?}", s)))?;
        Ok(ModelDuration(Duration::from_millis(ms)))
    }
}

impl std::fmt::Display for ModelDuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut ms = self.0.as_millis();
        if ms == 0 {
            return f.write_str("0s");
        }
        // Years and weeks only when exact, 90d reads better than 12w6d.
        let parts: [(&str, u128, bool); 7] = [
            ("y", MS_PER_YEAR, true),
            ("w", MS_PER_WEEK, true),
            ("d", MS_PER_DAY, false),
            ("h", MS_PER_HOUR, false),
            ("m", MS_PER_MINUTE, false),
            ("s", MS_PER_SECOND, false),
            ("ms", 1, false),
        ];
        for (unit, mult, exact) in parts {
            if exact && ms % mult != 0 {
                continue;
            }
            let v = ms / mult;
            if v > 0 {
                write!(f, "{}{}", v, unit)?;
                ms -= v * mult;
            }
        }
        Ok(())
    }
}

impl std::str::FromStr for ModelDuration {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ModelDuration::parse(s)
    }
}

impl Serialize for ModelDuration {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ModelDuration {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ModelDuration::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// A duration in Go notation that may carry fractions (`1.5h`, `300ms`).
///
/// Also accepts a bare number of seconds on input, which is how some UIs
/// submit timeouts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FractionalDuration(pub Duration);

impl FractionalDuration {
    pub fn from_secs(secs: u64) -> Self {
        FractionalDuration(Duration::from_secs(secs))
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        parse_go_duration(s).map(FractionalDuration)
    }
}

impl std::fmt::Display for FractionalDuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&format_go_duration(self.0))
    }
}

impl Serialize for FractionalDuration {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for FractionalDuration {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Seconds(f64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Seconds(secs) => Duration::try_from_secs_f64(secs)
                .map(FractionalDuration)
                .map_err(|_| serde::de::Error::custom(format!("invalid duration {}", secs))),
            Raw::Text(s) => FractionalDuration::parse(&s).map_err(serde::de::Error::custom),
        }
    }
}

/// Parses Go duration syntax: a sequence of decimal numbers with optional
/// fraction and a unit suffix (`ns`, `us`, `µs`, `ms`, `s`, `m`, `h`).
/// Negative durations are rejected.
pub(crate) fn parse_go_duration(s: &str) -> Result<Duration, ConfigError> {
    let invalid = || ConfigError::invalid(format!("invalid duration {:?}", s));
    if s.is_empty() {
        return Err(invalid());
    }
    if s == "0" {
        return Ok(Duration::ZERO);
    }
    let mut rest = s.strip_prefix('+').unwrap_or(s);
    if rest.is_empty() {
        return Err(invalid());
    }

    let mut total: u128 = 0;
    while !rest.is_empty() {
        let int_len = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
        let (int_part, after_int) = rest.split_at(int_len);
        let (frac_part, after_num) = match after_int.strip_prefix('.') {
            Some(after_dot) => {
                let frac_len = after_dot
                    .find(|c: char| !c.is_ascii_digit())
                    .unwrap_or(after_dot.len());
                after_dot.split_at(frac_len)
            }
            None => ("", after_int),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(invalid());
        }
        let unit_len = after_num
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(after_num.len());
        let (unit, after_unit) = after_num.split_at(unit_len);
        let nanos_per_unit: u128 = match unit {
            "ns" => 1,
            "us" | "µs" | "μs" => 1_000,
            "ms" => 1_000_000,
            "s" => 1_000_000_000,
            "m" => 60 * 1_000_000_000,
            "h" => 3600 * 1_000_000_000,
            "" => {
                return Err(ConfigError::invalid(format!(
                    "missing unit in duration {:?}",
                    s
                )));
            }
            other => {
                return Err(ConfigError::invalid(format!(
                    "unknown unit {:?} in duration {:?}",
                    other, s
                )));
            }
        };

        let int_value: u128 = if int_part.is_empty() {
            0
        } else {
            int_part.parse().map_err(|_| invalid())?
        };
        let mut value = int_value.checked_mul(nanos_per_unit).ok_or_else(invalid)?;
        if !frac_part.is_empty() {
            // Digits beyond nanosecond precision cannot contribute.
            let digits = &frac_part[..frac_part.len().min(18)];
            let numerator: u128 = digits.parse().map_err(|_| invalid())?;
            let scale = 10u128.pow(digits.len() as u32);
            value += numerator * nanos_per_unit / scale;
        }
        total = total.checked_add(value).ok_or_else(invalid)?;
        rest = after_unit;
    }

    let secs = u64::try_from(total / 1_000_000_000).map_err(|_| invalid())?;
    Ok(Duration::new(secs, (total % 1_000_000_000) as u32))
}

/// Formats a duration the way Go's `time.Duration.String` does (`1h0m0s`,
/// `1.5s`, `300ms`).
pub(crate) fn format_go_duration(d: Duration) -> String {
    let nanos = d.as_nanos();
    if nanos == 0 {
        return "0s".to_string();
    }
    if nanos < 1_000 {
        return format!("{}ns", nanos);
    }
    if nanos < 1_000_000 {
        return format!("{}µs", with_fraction(nanos, 1_000, 3));
    }
    if nanos < 1_000_000_000 {
        return format!("{}ms", with_fraction(nanos, 1_000_000, 6));
    }

    let secs = nanos / 1_000_000_000;
    let seconds = with_fraction(nanos % 60_000_000_000, 1_000_000_000, 9);
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    if hours > 0 {
        format!("{}h{}m{}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m{}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}

fn with_fraction(value: u128, unit: u128, digits: usize) -> String {
    let whole = value / unit;
    let frac = value % unit;
    if frac == 0 {
        return whole.to_string();
    }
    let frac = format!("{:0width$}", frac, width = digits);
    format!("{}.{}", whole, frac.trim_end_matches('0'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_duration_parses_prometheus_syntax() {
        assert_eq!(ModelDuration::parse("5m").unwrap(), ModelDuration::from_secs(300));
        assert_eq!(
            ModelDuration::parse("1h30m").unwrap(),
            ModelDuration::from_secs(5400)
        );
        assert_eq!(
            ModelDuration::parse("1d").unwrap(),
            ModelDuration::from_secs(86400)
        );
        assert_eq!(
            ModelDuration::parse("250ms").unwrap(),
            ModelDuration(Duration::from_millis(250))
        );
        assert!(ModelDuration::parse("0").unwrap().is_zero());
        assert!(ModelDuration::parse("0s").unwrap().is_zero());
    }

    #[test]
    fn model_duration_rejects_bad_input() {
        assert!(ModelDuration::parse("").is_err());
        assert!(ModelDuration::parse("5").is_err());
        assert!(ModelDuration::parse("1.5h").is_err());
        assert!(ModelDuration::parse("m5").is_err());
        assert!(ModelDuration::parse("5m1h").is_err());
    }

    #[test]
    fn model_duration_formats_like_prometheus() {
        assert_eq!(ModelDuration::from_secs(0).to_string(), "0s");
        assert_eq!(ModelDuration::from_secs(300).to_string(), "5m");
        assert_eq!(ModelDuration::from_secs(5400).to_string(), "1h30m");
        assert_eq!(ModelDuration::from_secs(4 * 3600).to_string(), "4h");
        assert_eq!(ModelDuration::from_secs(14 * 86400).to_string(), "2w");
        assert_eq!(ModelDuration::from_secs(90 * 86400).to_string(), "90d");
    }

    #[test]
    fn go_duration_parses_fractions() {
        assert_eq!(parse_go_duration("1.5h").unwrap(), Duration::from_secs(5400));
        assert_eq!(parse_go_duration("300ms").unwrap(), Duration::from_millis(300));
        assert_eq!(parse_go_duration("1h2m3s").unwrap(), Duration::from_secs(3723));
        assert_eq!(parse_go_duration(".5s").unwrap(), Duration::from_millis(500));
        assert_eq!(parse_go_duration("0").unwrap(), Duration::ZERO);
    }

    #[test]
    fn go_duration_rejects_bad_input() {
        assert!(parse_go_duration("").is_err());
        assert!(parse_go_duration("10").is_err());
        assert!(parse_go_duration("1d").is_err());
        assert!(parse_go_duration("-1s").is_err());
        assert!(parse_go_duration(".s").is_err());
    }

    #[test]
    fn go_duration_formats_like_go() {
        assert_eq!(format_go_duration(Duration::ZERO), "0s");
        assert_eq!(format_go_duration(Duration::from_secs(3600)), "1h0m0s");
        assert_eq!(format_go_duration(Duration::from_secs(90)), "1m30s");
        assert_eq!(format_go_duration(Duration::from_millis(1500)), "1.5s");
        assert_eq!(format_go_duration(Duration::from_millis(300)), "300ms");
        assert_eq!(format_go_duration(Duration::from_nanos(42)), "42ns");
    }

    #[test]
    fn go_duration_format_parses_back() {
        for d in [
            Duration::from_secs(3723),
            Duration::from_millis(1500),
            Duration::from_micros(1500),
            Duration::from_nanos(1_000_000_001),
        ] {
            assert_eq!(parse_go_duration(&format_go_duration(d)).unwrap(), d);
        }
    }

    #[test]
    fn fractional_duration_accepts_numbers_and_strings() {
        let d: FractionalDuration = serde_json::from_str("1.5").unwrap();
        assert_eq!(d.0, Duration::from_millis(1500));
        let d: FractionalDuration = serde_json::from_str("\"2m\"").unwrap();
        assert_eq!(d.0, Duration::from_secs(120));
        let d: FractionalDuration = serde_yaml::from_str("30s").unwrap();
        assert_eq!(d.0, Duration::from_secs(30));
        assert!(serde_json::from_str::<FractionalDuration>("-1").is_err());
    }
}
