//! Render configuration from TOML (`[render]` section)

use serde::{Deserialize, Serialize};
use spritebox_domain::RenderLimits;

/// Raw render configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRenderConfig {
    /// Number of cells on the sprite sheet
    pub sprite_count: u32,
    /// Number of palette slots
    pub palette_size: u32,
}

impl Default for FileRenderConfig {
    fn default() -> Self {
        let limits = RenderLimits::default();
        Self {
            sprite_count: limits.sprite_count,
            palette_size: limits.palette_size,
        }
    }
}

impl FileRenderConfig {
    pub fn to_render_limits(&self) -> RenderLimits {
        RenderLimits {
            sprite_count: self.sprite_count,
            palette_size: self.palette_size,
        }
    }
}
