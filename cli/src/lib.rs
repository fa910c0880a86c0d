//! `prodtrack` command-line front end
//!
//! Argument parsing, config loading, stage resolution and plain-text
//! rendering on top of `prodtrack-store` and `prodtrack-report`.

pub mod cli;
pub mod config;
pub mod render;
pub mod stages;

pub use cli::Cli;
pub use config::{AppConfig, ConfigError};
