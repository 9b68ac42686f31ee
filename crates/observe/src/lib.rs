//! This crate is intended to contain code that is required to provide or
//! improve the observability of a system. For a one-shot tool that boils
//! down to logging initialization and logging helpers.
pub mod config;
pub mod tracing;

pub use config::Config;
