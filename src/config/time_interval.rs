//! Named time intervals referenced by routes through
//! `mute_time_intervals` / `active_time_intervals`.
//!
//! Every range is parsed and checked at decode time and serialized back in
//! the textual form Alertmanager documents (`monday:friday`, `1:5`, `-1`).

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ConfigError;

const WEEKDAYS: [&str; 7] = [
    "sunday",
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
];

const MONTHS: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// A named list of time interval rules. Used for both `mute_time_intervals`
/// and `time_intervals`, which share one namespace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeInterval {
    pub name: String,
    pub time_intervals: Vec<TimeIntervalRule>,
}

/// One rule. An alert time matches the rule when every non-empty field
/// matches; empty fields match everything. Each range checks itself while
/// decoding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeIntervalRule {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub times: Vec<TimeRange>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub weekdays: Vec<WeekdayRange>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub days_of_month: Vec<DayOfMonthRange>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub months: Vec<MonthRange>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub years: Vec<YearRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

/// Minutes since midnight, `end` exclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TimeRange {
    pub start_minute: u32,
    pub end_minute: u32,
}

impl TimeRange {
    pub fn parse(start: &str, end: &str) -> Result<Self, ConfigError> {
        let start_minute = parse_clock(start)?;
        let end_minute = parse_clock(end)?;
        if start_minute >= end_minute {
            return Err(ConfigError::invalid(format!(
                "start time cannot be equal or greater than end time: {}-{}",
                start, end
            )));
        }
        Ok(TimeRange {
            start_minute,
            end_minute,
        })
    }
}

fn parse_clock(s: &str) -> Result<u32, ConfigError> {
    let invalid = || ConfigError::invalid(format!("couldn't parse timestamp {}, invalid format", s));
    let (hours, minutes) = s.split_once(':').ok_or_else(invalid)?;
    if hours.is_empty() || hours.len() > 2 || minutes.len() != 2 {
        return Err(invalid());
    }
    let hours: u32 = hours.parse().map_err(|_| invalid())?;
    let minutes: u32 = minutes.parse().map_err(|_| invalid())?;
    if minutes > 59 || hours > 24 || (hours == 24 && minutes != 0) {
        return Err(ConfigError::invalid(format!(
            "timestamp {} out of range",
            s
        )));
    }
    Ok(hours * 60 + minutes)
}

fn format_clock(minute: u32) -> String {
    format!("{:02}:{:02}", minute / 60, minute % 60)
}

#[derive(Serialize, Deserialize)]
struct RawTimeRange {
    start_time: String,
    end_time: String,
}

impl Serialize for TimeRange {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        RawTimeRange {
            start_time: format_clock(self.start_minute),
            end_time: format_clock(self.end_minute),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for TimeRange {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = RawTimeRange::deserialize(deserializer)?;
        TimeRange::parse(&raw.start_time, &raw.end_time).map_err(serde::de::Error::custom)
    }
}

/// Inclusive `begin:end` bounds shared by the calendar ranges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct InclusiveRange {
    pub begin: i32,
    pub end: i32,
}

impl InclusiveRange {
    fn split(s: &str) -> (&str, &str) {
        s.split_once(':').unwrap_or((s, s))
    }

    fn format(self, name: impl Fn(i32) -> String) -> String {
        if self.begin == self.end {
            name(self.begin)
        } else {
            format!("{}:{}", name(self.begin), name(self.end))
        }
    }
}

/// `table[index]`, or `number` when the index falls outside the table.
fn name_or_number(table: &[&str], index: i32, number: i32) -> String {
    usize::try_from(index)
        .ok()
        .and_then(|i| table.get(i))
        .map_or_else(|| number.to_string(), |name| name.to_string())
}

/// Sunday is 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct WeekdayRange(pub InclusiveRange);

impl FromStr for WeekdayRange {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lookup = |day: &str| {
            WEEKDAYS
                .iter()
                .position(|name| *name == day.to_lowercase())
                .map(|i| i as i32)
                .ok_or_else(|| ConfigError::invalid(format!("{} is not a valid weekday", day)))
        };
        let (begin, end) = InclusiveRange::split(s);
        let range = InclusiveRange {
            begin: lookup(begin)?,
            end: lookup(end)?,
        };
        if range.begin > range.end {
            return Err(ConfigError::invalid("start day cannot be before end day"));
        }
        Ok(WeekdayRange(range))
    }
}

impl std::fmt::Display for WeekdayRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0.format(|i| name_or_number(&WEEKDAYS, i, i)))
    }
}

/// Negative days count back from the end of the month (`-1` is the last day).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DayOfMonthRange(pub InclusiveRange);

impl FromStr for DayOfMonthRange {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lookup = |day: &str| {
            let n: i32 = day
                .parse()
                .map_err(|_| ConfigError::invalid(format!("invalid day of month {:?}", day)))?;
            if n == 0 || !(-31..=31).contains(&n) {
                return Err(ConfigError::invalid(format!(
                    "{} is not a valid day of the month: out of range",
                    n
                )));
            }
            Ok(n)
        };
        let (begin, end) = InclusiveRange::split(s);
        let range = InclusiveRange {
            begin: lookup(begin)?,
            end: lookup(end)?,
        };
        if range.begin < 0 && range.end > 0 {
            return Err(ConfigError::invalid(
                "end day must be negative if start day is negative",
            ));
        }
        if range.begin.signum() == range.end.signum() && range.begin > range.end {
            return Err(ConfigError::invalid(
                "end day must be greater than or equal to start day",
            ));
        }
        Ok(DayOfMonthRange(range))
    }
}

impl std::fmt::Display for DayOfMonthRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0.format(|i| i.to_string()))
    }
}

/// January is 1. Accepts names or numbers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct MonthRange(pub InclusiveRange);

impl FromStr for MonthRange {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lookup = |month: &str| {
            let n = match month.parse::<i32>() {
                Ok(n) => n,
                Err(_) => MONTHS
                    .iter()
                    .position(|name| *name == month.to_lowercase())
                    .map(|i| i as i32 + 1)
                    .ok_or_else(|| {
                        ConfigError::invalid(format!("{} is not a valid month", month))
                    })?,
            };
            if !(1..=12).contains(&n) {
                return Err(ConfigError::invalid(format!(
                    "{} is not a valid month: out of range",
                    n
                )));
            }
            Ok(n)
        };
        let (begin, end) = InclusiveRange::split(s);
        let range = InclusiveRange {
            begin: lookup(begin)?,
            end: lookup(end)?,
        };
        if range.begin > range.end {
            return Err(ConfigError::invalid(
                "end month must be greater than or equal to start month",
            ));
        }
        Ok(MonthRange(range))
    }
}

impl std::fmt::Display for MonthRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0.format(|i| name_or_number(&MONTHS, i - 1, i)))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct YearRange(pub InclusiveRange);

impl FromStr for YearRange {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lookup = |year: &str| {
            year.parse::<i32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| ConfigError::invalid(format!("{} is not a valid year", year)))
        };
        let (begin, end) = InclusiveRange::split(s);
        let range = InclusiveRange {
            begin: lookup(begin)?,
            end: lookup(end)?,
        };
        if range.begin > range.end {
            return Err(ConfigError::invalid(
                "end year must be greater than or equal to start year",
            ));
        }
        Ok(YearRange(range))
    }
}

impl std::fmt::Display for YearRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0.format(|i| i.to_string()))
    }
}

macro_rules! string_serde {
    ($($ty:ty),+) => {$(
        impl Serialize for $ty {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.collect_str(self)
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    )+};
}

string_serde!(WeekdayRange, DayOfMonthRange, MonthRange, YearRange, Location);

/// Time zone a rule is evaluated in: an IANA name, or `Local` for the
/// host's zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Location {
    Local,
    Zone(chrono_tz::Tz),
}

impl FromStr for Location {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "Local" {
            return Ok(Location::Local);
        }
        chrono_tz::Tz::from_str(s)
            .map(Location::Zone)
            .map_err(|_| ConfigError::invalid(format!("unknown time zone {}", s)))
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Location::Local => f.write_str("Local"),
            Location::Zone(tz) => f.write_str(tz.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(yaml: &str) -> Result<TimeIntervalRule, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    #[test]
    fn full_rule_parses() {
        let yaml = r#"
times:
  - start_time: "09:00"
    end_time: "17:30"
weekdays: ["monday:friday", "sunday"]
days_of_month: ["1:5", "-3:-1"]
months: ["january:march", "11"]
years: ["2024:2026"]
location: Europe/Paris
"#;
        let r = rule(yaml).unwrap();
        assert_eq!(
            r.times[0],
            TimeRange {
                start_minute: 540,
                end_minute: 1050
            }
        );
        assert_eq!(r.weekdays[0].0, InclusiveRange { begin: 1, end: 5 });
        assert_eq!(r.days_of_month[1].0, InclusiveRange { begin: -3, end: -1 });
        assert_eq!(r.months[1].0, InclusiveRange { begin: 11, end: 11 });
        assert_eq!(r.location, Some(Location::Zone(chrono_tz::Europe::Paris)));
    }

    #[test]
    fn serializes_in_textual_form() {
        let yaml = "weekdays: ['Monday:Friday']\nmonths: ['3']\ntimes:\n  - {start_time: '00:00', end_time: '24:00'}";
        let r = rule(yaml).unwrap();
        let out = serde_json::to_value(&r).unwrap();
        assert_eq!(out["weekdays"][0], "monday:friday");
        assert_eq!(out["months"][0], "march");
        assert_eq!(out["times"][0]["end_time"], "24:00");
        assert!(out.get("years").is_none());
    }

    #[test]
    fn time_range_rules() {
        assert!(TimeRange::parse("10:00", "09:00").is_err());
        assert!(TimeRange::parse("10:00", "10:00").is_err());
        assert!(TimeRange::parse("00:00", "24:01").is_err());
        assert!(TimeRange::parse("9:00", "10:60").is_err());
        assert!(TimeRange::parse("9:00", "10:15").is_ok());
    }

    #[test]
    fn invalid_ranges_fail() {
        assert!("funday".parse::<WeekdayRange>().is_err());
        assert!("friday:monday".parse::<WeekdayRange>().is_err());
        assert!("0".parse::<DayOfMonthRange>().is_err());
        assert!("32".parse::<DayOfMonthRange>().is_err());
        assert!("-5:3".parse::<DayOfMonthRange>().is_err());
        assert!("5:1".parse::<DayOfMonthRange>().is_err());
        assert!("3:-1".parse::<DayOfMonthRange>().is_ok());
        assert!("13".parse::<MonthRange>().is_err());
        assert!("december:january".parse::<MonthRange>().is_err());
        assert!("2026:2024".parse::<YearRange>().is_err());
        assert!("Mars/Olympus".parse::<Location>().is_err());
    }

    #[test]
    fn local_location_round_trips() {
        let loc: Location = "Local".parse().unwrap();
        assert_eq!(loc.to_string(), "Local");
        assert_eq!("UTC".parse::<Location>().unwrap().to_string(), "UTC");
    }

    #[test]
    fn interval_decodes_from_json() {
        let interval: TimeInterval = serde_json::from_str(
            r#"{"name":"weekdays","time_intervals":[{"weekdays":["monday:friday"]}]}"#,
        )
        .unwrap();
        assert_eq!(interval.name, "weekdays");
        assert_eq!(interval.time_intervals.len(), 1);
    }

    #[test]
    fn weekend_range_must_be_ascending() {
        let err = rule("weekdays: ['saturday:sunday']").unwrap_err();
        assert!(err.to_string().contains("start day cannot be before end day"));
    }

    #[test]
    fn out_of_table_ranges_print_as_numbers() {
        assert_eq!(MonthRange::default().to_string(), "0");
        let weekdays = WeekdayRange(InclusiveRange { begin: 5, end: 9 });
        assert_eq!(weekdays.to_string(), "friday:9");

        let r = TimeIntervalRule {
            months: vec![MonthRange::default()],
            ..Default::default()
        };
        assert_eq!(serde_json::to_string(&r).unwrap(), r#"{"months":["0"]}"#);
    }
}
