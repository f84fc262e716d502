//! Script configuration — how the guest environment and driver behave.

/// Guest environment and script driver settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptConfig {
    /// Deepest table nesting converted to host values.
    pub max_table_depth: usize,
    /// Prefix of console lines reporting script failures.
    pub error_prefix: String,
    /// Strip file/module loading and process control from the guest.
    pub sandbox: bool,
    /// Chunk name shown in guest diagnostics (`[string "cart"]:3: ...`).
    pub chunk_name: String,
}

impl Default for ScriptConfig {
    fn default() -> Self {
        Self {
            max_table_depth: 32,
            error_prefix: "!! ".to_string(),
            sandbox: true,
            chunk_name: "cart".to_string(),
        }
    }
}

impl ScriptConfig {
    // ==================== Builder Methods ====================

    pub fn with_max_table_depth(mut self, depth: usize) -> Self {
        self.max_table_depth = depth;
        self
    }

    pub fn with_error_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.error_prefix = prefix.into();
        self
    }

    pub fn with_sandbox(mut self, enabled: bool) -> Self {
        self.sandbox = enabled;
        self
    }

    pub fn with_chunk_name(mut self, name: impl Into<String>) -> Self {
        self.chunk_name = name.into();
        self
    }

    /// Format a failure for the console.
    pub fn error_line(&self, error: &impl std::fmt::Display) -> String {
        format!("{}{}", self.error_prefix, error)
    }
}
