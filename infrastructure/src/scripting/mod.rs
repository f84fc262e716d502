//! Lua scripting core (mlua, Lua 5.4)
//!
//! # Modules
//!
//! - `marshal` — `Marshaller`: Lua values ⇄ `HostValue`
//! - `bridge` — functions crossing the boundary in both directions
//! - `guest_env` — `GuestEnvironment`: the VM and the operations run on it
//! - `registrar` — `ApiRegistrar`: `$`-prefixed host members as a guest table
//! - `engine_api` — `spr`, `cls`, `print`, `btn`, `pal`, `pal_reset`
//! - `script_driver` — `ScriptDriver`: load/init/update/draw with fault containment
//! - `sandbox` — strips file loading and process control

mod bridge;
mod engine_api;
mod guest_env;
mod lua_error;
mod marshal;
mod registrar;
mod sandbox;
mod script_driver;

pub use engine_api::register_engine_api;
pub use guest_env::GuestEnvironment;
pub use marshal::Marshaller;
pub use registrar::{ApiRegistrar, CapabilityTable};
pub use sandbox::apply_sandbox;
pub use script_driver::ScriptDriver;
