// src/lib.rs

pub mod app;
pub mod chat;
pub mod config;
pub mod constants;
pub mod errors;
pub mod gateway;
pub mod image;
pub mod key_handlers;
pub mod logging;
pub mod merge;
pub mod prompt;
pub mod status_indicator;
pub mod suggestions;
pub mod ui;
pub mod upload;

pub use app::{App, Focus};
pub use errors::{TimeWeaverError, TimeWeaverResult};
