//! Composition driver: replays a context's coordinates through an image tool.

pub(crate) mod driver;
