pub mod actor;
#[cfg(windows)]
pub mod app;
pub mod common;
pub mod model;
pub mod sys;
