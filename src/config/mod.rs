//! The local ("definition") configuration schema.
//!
//! A superset of the Alertmanager configuration format that also accepts
//! Grafana-managed receivers. Every type validates itself while it is
//! decoded, identically for JSON and YAML; [`load`] adds the document-wide
//! checks.

mod duration;
mod global;
mod http;
mod inhibit;
mod labels;
mod load;
mod matchers;
pub mod notifiers;
mod receiver;
mod route;
mod secret;
mod time_interval;
mod types;
mod url;
mod validation;

pub use duration::{FractionalDuration, ModelDuration};
pub use global::{
    DEFAULT_OPSGENIE_API_URL, DEFAULT_PAGERDUTY_URL, DEFAULT_TELEGRAM_API_URL,
    DEFAULT_VICTOROPS_API_URL, DEFAULT_WEBEX_API_URL, DEFAULT_WECHAT_API_URL, GlobalConfig,
};
pub use http::{Authorization, BasicAuth, Header, HttpClientConfig, OAuth2, TlsConfig, TlsVersion};
pub use inhibit::InhibitRule;
pub use labels::{LabelNameMode, current_label_name_mode, is_valid_label_name, with_label_name_mode};
pub use load::{
    LoadOptions, load, load_compat, load_compat_with, load_json, load_json_with, load_with,
};
pub use matchers::{MatchType, Matcher, Matchers, ObjectMatchers, parse_matchers};
pub use receiver::{GrafanaReceiver, Receiver, ReceiverType};
pub use route::{
    AUTOGENERATED_ROUTE_LABEL, AUTOGENERATED_ROUTE_VALUE, DEFAULT_GROUP_INTERVAL,
    DEFAULT_GROUP_WAIT, DEFAULT_REPEAT_INTERVAL, GROUP_BY_ALL, Route, RouteOpts,
};
pub use secret::{SECRET_TOKEN, Secret, marshal_json_with_secrets};
pub use time_interval::{
    DayOfMonthRange, InclusiveRange, Location, MonthRange, TimeInterval, TimeIntervalRule,
    TimeRange, WeekdayRange, YearRange,
};
pub use types::Config;
pub use url::{HostPort, SecretUrl, Url};

pub(crate) use duration::{format_go_duration, parse_go_duration};
