//! Input configuration from TOML (`[input]` section)

use serde::{Deserialize, Serialize};

/// Raw input configuration from TOML
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileInputConfig {
    /// Key names reported as held on every frame
    pub held: Vec<String>,
}
