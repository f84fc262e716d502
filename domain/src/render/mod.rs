//! Render value objects
//!
//! Requests the scripting core hands to the sprite renderer. The renderer
//! itself is an external collaborator behind `RenderQueuePort`.

use serde::{Deserialize, Serialize};

use crate::core::error::RenderError;

/// A queued sprite blit, in sprite-sheet cells and screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteDraw {
    pub sprite: i64,
    pub x: i64,
    pub y: i64,
    /// Width in sprite cells
    pub w: i64,
    /// Height in sprite cells
    pub h: i64,
    pub flip_h: bool,
    pub flip_v: bool,
}

impl SpriteDraw {
    /// A 1×1 unflipped sprite at `(x, y)`.
    pub fn new(sprite: i64, x: i64, y: i64) -> Self {
        Self {
            sprite,
            x,
            y,
            w: 1,
            h: 1,
            flip_h: false,
            flip_v: false,
        }
    }

    pub fn with_size(mut self, w: i64, h: i64) -> Self {
        self.w = w;
        self.h = h;
        self
    }

    pub fn with_flip(mut self, flip_h: bool, flip_v: bool) -> Self {
        self.flip_h = flip_h;
        self.flip_v = flip_v;
        self
    }
}

/// One recorded render request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderCommand {
    Draw(SpriteDraw),
    Clear { color: u8 },
    SetPaletteSlot { slot: u8, source: u8 },
    ResetPalette,
}

impl std::fmt::Display for RenderCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Draw(d) => write!(
                f,
                "spr {} at ({}, {}) size {}x{}{}{}",
                d.sprite,
                d.x,
                d.y,
                d.w,
                d.h,
                if d.flip_h { " flip-h" } else { "" },
                if d.flip_v { " flip-v" } else { "" },
            ),
            Self::Clear { color } => write!(f, "cls {}", color),
            Self::SetPaletteSlot { slot, source } => write!(f, "pal {} <- {}", slot, source),
            Self::ResetPalette => write!(f, "pal reset"),
        }
    }
}

/// Bounds enforced by a render queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderLimits {
    pub sprite_count: u32,
    pub palette_size: u32,
}

impl Default for RenderLimits {
    fn default() -> Self {
        Self {
            sprite_count: 256,
            palette_size: 16,
        }
    }
}

impl RenderLimits {
    pub fn check_sprite(&self, index: i64) -> Result<(), RenderError> {
        if (0..i64::from(self.sprite_count)).contains(&index) {
            Ok(())
        } else {
            Err(RenderError::SpriteOutOfRange {
                index,
                limit: self.sprite_count,
            })
        }
    }

    /// Validate a palette index and narrow it to a color slot.
    pub fn check_color(&self, index: i64) -> Result<u8, RenderError> {
        let limit = i64::from(self.palette_size.min(256));
        if (0..limit).contains(&index) {
            Ok(index as u8)
        } else {
            Err(RenderError::PaletteOutOfRange {
                index,
                limit: self.palette_size,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limits_accept_in_range() {
        let limits = RenderLimits::default();
        assert!(limits.check_sprite(0).is_ok());
        assert!(limits.check_sprite(255).is_ok());
        assert_eq!(limits.check_color(15), Ok(15));
    }

    #[test]
    fn test_limits_reject_out_of_range() {
        let limits = RenderLimits::default();
        assert_eq!(
            limits.check_sprite(256),
            Err(RenderError::SpriteOutOfRange { index: 256, limit: 256 })
        );
        assert_eq!(
            limits.check_color(-1),
            Err(RenderError::PaletteOutOfRange { index: -1, limit: 16 })
        );
    }

    #[test]
    fn test_sprite_draw_builder() {
        let draw = SpriteDraw::new(3, 10, 20).with_size(2, 2).with_flip(true, false);
        assert_eq!(draw.w, 2);
        assert!(draw.flip_h);
        assert_eq!(
            RenderCommand::Draw(draw).to_string(),
            "spr 3 at (10, 20) size 2x2 flip-h"
        );
    }
}
