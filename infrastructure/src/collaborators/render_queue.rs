//! Render queue that records every accepted request as a [`RenderCommand`].

use spritebox_application::RenderQueuePort;
use spritebox_domain::{RenderCommand, RenderError, RenderLimits, SpriteDraw};
use tracing::trace;

/// Validates requests against [`RenderLimits`] and buffers the valid ones.
///
/// Rejected requests leave the buffer untouched.
#[derive(Debug, Default)]
pub struct CommandBufferRenderQueue {
    limits: RenderLimits,
    commands: Vec<RenderCommand>,
}

impl CommandBufferRenderQueue {
    pub fn new(limits: RenderLimits) -> Self {
        Self {
            limits,
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    /// Drain the buffer, e.g. at the end of a frame.
    pub fn take_commands(&mut self) -> Vec<RenderCommand> {
        std::mem::take(&mut self.commands)
    }

    fn push(&mut self, command: RenderCommand) {
        trace!(%command, "Render command queued");
        self.commands.push(command);
    }
}

impl RenderQueuePort for CommandBufferRenderQueue {
    fn queue_draw(&mut self, draw: SpriteDraw) -> Result<(), RenderError> {
        self.limits.check_sprite(draw.sprite)?;
        self.push(RenderCommand::Draw(draw));
        Ok(())
    }

    fn clear(&mut self, palette_index: i64) -> Result<(), RenderError> {
        let color = self.limits.check_color(palette_index)?;
        self.push(RenderCommand::Clear { color });
        Ok(())
    }

    fn set_palette_slot(&mut self, slot: i64, source_slot: i64) -> Result<(), RenderError> {
        let slot = self.limits.check_color(slot)?;
        let source = self.limits.check_color(source_slot)?;
        self.push(RenderCommand::SetPaletteSlot { slot, source });
        Ok(())
    }

    fn reset_palette(&mut self) {
        self.push(RenderCommand::ResetPalette);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_valid_requests_in_order() {
        let mut queue = CommandBufferRenderQueue::default();
        queue.clear(1).unwrap();
        queue.queue_draw(SpriteDraw::new(255, 0, 0)).unwrap();
        queue.set_palette_slot(0, 15).unwrap();
        queue.reset_palette();

        assert_eq!(
            queue.commands(),
            &[
                RenderCommand::Clear { color: 1 },
                RenderCommand::Draw(SpriteDraw::new(255, 0, 0)),
                RenderCommand::SetPaletteSlot { slot: 0, source: 15 },
                RenderCommand::ResetPalette,
            ]
        );
    }

    #[test]
    fn test_rejects_out_of_range_without_recording() {
        let mut queue = CommandBufferRenderQueue::new(RenderLimits {
            sprite_count: 8,
            palette_size: 4,
        });

        assert_eq!(
            queue.queue_draw(SpriteDraw::new(8, 0, 0)),
            Err(RenderError::SpriteOutOfRange { index: 8, limit: 8 })
        );
        assert!(queue.clear(-1).is_err());
        assert!(queue.set_palette_slot(1, 4).is_err());
        assert!(queue.commands().is_empty());
    }

    #[test]
    fn test_take_commands_drains() {
        let mut queue = CommandBufferRenderQueue::default();
        queue.reset_palette();
        assert_eq!(queue.take_commands().len(), 1);
        assert!(queue.commands().is_empty());
    }
}
