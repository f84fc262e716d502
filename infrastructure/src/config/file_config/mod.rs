//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They convert into the runtime types (`ScriptConfig`, `RenderLimits`)
//! once loaded.

mod input;
mod render;
mod script;

pub use input::FileInputConfig;
pub use render::FileRenderConfig;
pub use script::FileScriptConfig;

use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Guest environment and driver settings
    pub script: FileScriptConfig,
    /// Render queue bounds
    pub render: FileRenderConfig,
    /// Keys reported as held by the headless runner
    pub input: FileInputConfig,
}

/// A configuration value that loads but cannot be used as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    /// Dotted path of the offending field
    pub field: String,
    pub message: String,
}

impl ConfigIssue {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self.script.max_table_depth == 0 {
            issues.push(ConfigIssue::new(
                "script.max_table_depth",
                "must be at least 1; every table would be rejected",
            ));
        }
        if self.render.sprite_count == 0 {
            issues.push(ConfigIssue::new(
                "render.sprite_count",
                "must be at least 1; every spr() call would fail",
            ));
        }
        if self.render.palette_size == 0 {
            issues.push(ConfigIssue::new(
                "render.palette_size",
                "must be at least 1; every cls() and pal() call would fail",
            ));
        } else if self.render.palette_size > 256 {
            issues.push(ConfigIssue::new(
                "render.palette_size",
                format!(
                    "{} exceeds 256; indices above 255 are rejected",
                    self.render.palette_size
                ),
            ));
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[script]
max_table_depth = 8
error_prefix = "ERR "
sandbox = false
chunk_name = "level1"

[render]
sprite_count = 128
palette_size = 32

[input]
held = ["left", "x"]
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        let script = config.script.to_script_config();
        assert_eq!(script.max_table_depth, 8);
        assert_eq!(script.error_prefix, "ERR ");
        assert!(!script.sandbox);
        assert_eq!(script.chunk_name, "level1");
        assert_eq!(config.render.to_render_limits().palette_size, 32);
        assert_eq!(config.input.held.len(), 2);
    }

    #[test]
    fn test_deserialize_partial_config() {
        let config: FileConfig = toml::from_str("[render]\nsprite_count = 64\n").unwrap();
        assert_eq!(config.render.sprite_count, 64);
        // Defaults should apply
        assert_eq!(config.render.palette_size, 16);
        assert_eq!(config.script, FileScriptConfig::default());
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(FileConfig::default().validate().is_empty());
    }

    #[test]
    fn test_validate_reports_every_issue() {
        let config: FileConfig = toml::from_str(
            r#"
[script]
max_table_depth = 0

[render]
sprite_count = 0
palette_size = 0
"#,
        )
        .unwrap();

        let fields: Vec<_> = config
            .validate()
            .into_iter()
            .map(|issue| issue.field)
            .collect();
        assert_eq!(
            fields,
            vec![
                "script.max_table_depth",
                "render.sprite_count",
                "render.palette_size"
            ]
        );
    }
}
