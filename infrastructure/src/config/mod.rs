//! Configuration file loading for spritebox
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Environment: `SPRITEBOX_SCRIPT__ERROR_PREFIX=...`
//! 2. `--config <path>` specified file
//! 3. Project root: `./spritebox.toml` or `./.spritebox.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/spritebox/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigIssue, FileConfig, FileInputConfig, FileRenderConfig, FileScriptConfig,
};
pub use loader::{ConfigLoadError, ConfigLoader};
