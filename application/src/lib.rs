//! Application layer for spritebox
//!
//! This crate contains the port definitions the scripting core talks
//! through, script configuration, and the per-frame scheduler.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::ScriptConfig;
pub use ports::{
    ApiMember, ApiObject, InputStatePort, NoScriptRuntime, OutputSinkPort, RenderQueuePort,
    ScriptRuntimePort,
};
pub use use_cases::run_frames::{FrameReport, RunFramesInput, RunFramesUseCase};
