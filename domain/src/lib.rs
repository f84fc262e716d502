//! Domain layer for spritebox
//!
//! This crate contains the VM-agnostic core of the scripting boundary:
//! host values, the error taxonomy, the member naming convention and the
//! script session lifecycle. It has no dependency on the Lua runtime.
//!
//! # Core Concepts
//!
//! - **Host value**: the dynamic value model guest values convert into
//! - **Sentinel prefix**: `$` marks a host API member as guest-exposed
//! - **Session**: Unloaded → Loaded → Running, never terminated by a fault

pub mod core;
pub mod render;
pub mod scripting;

// Re-export commonly used types
pub use crate::core::error::{Direction, RegistrationError, RenderError, ScriptError};
pub use render::{RenderCommand, RenderLimits, SpriteDraw};
pub use scripting::{
    HostCallable, HostMap, HostValue, SENTINEL_PREFIX, SessionState, format_number, guest_name,
    host_name,
};
