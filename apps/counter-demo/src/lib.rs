//! Counter demo shared by the binary and its tests.

pub mod app;
pub mod host;
