//! Ports (interfaces) for external dependencies
//!
//! The scripting core calls out to a renderer, an input query and a console,
//! and is driven through [`ScriptRuntimePort`]. Host objects that expose
//! capabilities to scripts implement [`ApiObject`].

pub mod api_object;
pub mod input_state;
pub mod output_sink;
pub mod render_queue;
pub mod script_runtime;

pub use api_object::{ApiMember, ApiObject};
pub use input_state::InputStatePort;
pub use output_sink::OutputSinkPort;
pub use render_queue::RenderQueuePort;
pub use script_runtime::{NoScriptRuntime, ScriptRuntimePort};
