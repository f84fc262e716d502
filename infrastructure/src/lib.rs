//! Infrastructure layer for spritebox
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: the mlua-backed scripting core, in-memory
//! collaborators and configuration file loading.

pub mod collaborators;
pub mod config;
pub mod scripting;

// Re-export commonly used types
pub use collaborators::{CommandBufferRenderQueue, ConsoleBuffer, HeldKeys};
pub use config::{
    ConfigIssue, ConfigLoadError, ConfigLoader, FileConfig, FileInputConfig, FileRenderConfig,
    FileScriptConfig,
};
pub use scripting::{
    ApiRegistrar, CapabilityTable, GuestEnvironment, Marshaller, ScriptDriver, apply_sandbox,
    register_engine_api,
};
