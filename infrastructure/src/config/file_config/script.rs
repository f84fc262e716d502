//! Script configuration from TOML (`[script]` section)

use serde::{Deserialize, Serialize};
use spritebox_application::ScriptConfig;

/// Raw script configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileScriptConfig {
    /// Deepest table nesting converted to host values
    pub max_table_depth: usize,
    /// Prefix of console lines reporting script failures
    pub error_prefix: String,
    /// Remove file loading and process control from the guest
    pub sandbox: bool,
    /// Chunk name shown in guest error messages
    pub chunk_name: String,
}

impl Default for FileScriptConfig {
    fn default() -> Self {
        let defaults = ScriptConfig::default();
        Self {
            max_table_depth: defaults.max_table_depth,
            error_prefix: defaults.error_prefix,
            sandbox: defaults.sandbox,
            chunk_name: defaults.chunk_name,
        }
    }
}

impl FileScriptConfig {
    pub fn to_script_config(&self) -> ScriptConfig {
        ScriptConfig::default()
            .with_max_table_depth(self.max_table_depth)
            .with_error_prefix(self.error_prefix.clone())
            .with_sandbox(self.sandbox)
            .with_chunk_name(self.chunk_name.clone())
    }
}
