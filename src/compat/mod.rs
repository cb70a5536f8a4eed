//! Conversion between the local schema and the upstream wire shapes.
//!
//! Every conversion is a pure field-by-field mapping and never fails.
//! `T::from_upstream(&x.to_upstream()) == x` holds for every integration
//! kind and for the HTTP client config, including the difference between an
//! absent list and an empty one.

mod http;
mod notifiers;
mod receiver;

pub use receiver::{receiver_from_upstream, receiver_to_upstream};

/// A local type with an upstream counterpart.
pub trait Compat: Sized {
    type Upstream;

    fn to_upstream(&self) -> Self::Upstream;

    fn from_upstream(upstream: &Self::Upstream) -> Self;
}

/// Converts an optional value, keeping `None` as `None`.
pub(crate) fn opt_to_upstream<T: Compat>(value: &Option<T>) -> Option<T::Upstream> {
    value.as_ref().map(T::to_upstream)
}

pub(crate) fn opt_from_upstream<T: Compat>(value: &Option<T::Upstream>) -> Option<T> {
    value.as_ref().map(T::from_upstream)
}

/// Converts a list that distinguishes "absent" from "empty".
pub(crate) fn list_to_upstream<T: Compat>(list: &Option<Vec<T>>) -> Option<Vec<T::Upstream>> {
    list.as_ref()
        .map(|items| items.iter().map(T::to_upstream).collect())
}

pub(crate) fn list_from_upstream<T: Compat>(list: &Option<Vec<T::Upstream>>) -> Option<Vec<T>> {
    list.as_ref()
        .map(|items| items.iter().map(T::from_upstream).collect())
}

pub(crate) fn vec_to_upstream<T: Compat>(items: &[T]) -> Vec<T::Upstream> {
    items.iter().map(T::to_upstream).collect()
}

pub(crate) fn vec_from_upstream<T: Compat>(items: &[T::Upstream]) -> Vec<T> {
    items.iter().map(T::from_upstream).collect()
}
