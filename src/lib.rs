// Library surface for the binary and headless integration tests.
pub mod app;
pub mod app_dirs;
pub mod config;
pub mod error;
pub mod key;
pub mod language;
pub mod logging;
pub mod metrics;
pub mod prompt;
pub mod runtime;
pub mod session;
pub mod ui;
pub mod view;

pub use error::{DoomtypeError, PromptError, Result};
