//! Script runtime port — the per-frame interface to a loaded cartridge.
//!
//! This port abstracts the script driver so that:
//! - The frame scheduler doesn't depend on mlua
//! - A no-op implementation (`NoScriptRuntime`) is always available
//!
//! Every method contains its own faults: failures are reported on the
//! console by the implementation and surface here only as `false`.

use spritebox_domain::SessionState;

pub trait ScriptRuntimePort {
    /// Load a script, replacing the console contents. Returns success.
    fn load(&mut self, source: &str) -> bool;

    /// Invoke `_init` if the script defines it.
    fn init(&mut self) -> bool;

    /// Invoke `_update` if the script defines it.
    fn update(&mut self) -> bool;

    /// Invoke `_draw` if the script defines it.
    fn draw(&mut self) -> bool;

    /// Current session state.
    fn state(&self) -> SessionState;

    /// Whether a real runtime backs this port (i.e. not `NoScriptRuntime`).
    fn is_available(&self) -> bool;
}

/// No-op runtime used when no cartridge is attached.
///
/// Loads report failure, lifecycle calls do nothing, and the session
/// stays unloaded.
pub struct NoScriptRuntime;

impl ScriptRuntimePort for NoScriptRuntime {
    fn load(&mut self, _source: &str) -> bool {
        false
    }

    fn init(&mut self) -> bool {
        false
    }

    fn update(&mut self) -> bool {
        false
    }

    fn draw(&mut self) -> bool {
        false
    }

    fn state(&self) -> SessionState {
        SessionState::Unloaded
    }

    fn is_available(&self) -> bool {
        false
    }
}
