//! Scripting domain types
//!
//! Defines the host-side value model, member naming convention and session
//! lifecycle for the Lua scripting core. These types are VM-agnostic; the
//! actual Lua runtime lives in the infrastructure layer.

pub mod naming;
pub mod session;
pub mod value;

pub use naming::{SENTINEL_PREFIX, guest_name, host_name};
pub use session::SessionState;
pub use value::{HostCallable, HostMap, HostValue, format_number};
