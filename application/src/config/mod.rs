//! Application-level configuration.
//!
//! - [`ScriptConfig`] — guest environment limits and console formatting

pub mod script_config;

pub use script_config::ScriptConfig;
