//! Immutable script context and its coordinate iterator.

pub(crate) mod coords;
pub(crate) mod store;
