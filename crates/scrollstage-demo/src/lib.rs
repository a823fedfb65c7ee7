#![forbid(unsafe_code)]

//! Scrollstage demo: the stacked-card "what we do" section in a terminal.

pub mod app;
pub mod catalog;
pub mod cli;
pub mod host;
pub mod logging;
pub mod render;
pub mod scene;
pub mod session;
