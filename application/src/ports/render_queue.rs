//! Render queue port — the sprite/palette renderer as seen by scripts.
//!
//! Requests are synchronous. Implementations validate indices and return a
//! [`RenderError`] instead of clamping, so the script driver can report the
//! offending call on the console.

use spritebox_domain::{RenderError, SpriteDraw};

pub trait RenderQueuePort: Send {
    /// Queue a sprite blit for the current frame.
    fn queue_draw(&mut self, draw: SpriteDraw) -> Result<(), RenderError>;

    /// Clear the screen to a palette index.
    fn clear(&mut self, palette_index: i64) -> Result<(), RenderError>;

    /// Draw palette slot `slot` using the color currently at `source_slot`.
    fn set_palette_slot(&mut self, slot: i64, source_slot: i64) -> Result<(), RenderError>;

    /// Undo every palette remap.
    fn reset_palette(&mut self);
}
