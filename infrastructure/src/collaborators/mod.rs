//! In-memory collaborators for the scripting core.
//!
//! The real sprite renderer, input system and console live in the editor.
//! These implementations record or answer requests in memory so the
//! headless runner and the tests can drive a cartridge.

mod console;
mod input;
mod render_queue;

pub use console::ConsoleBuffer;
pub use input::HeldKeys;
pub use render_queue::CommandBufferRenderQueue;
