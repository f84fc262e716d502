//! Mapping mlua errors onto the domain error taxonomy.

use mlua::prelude::*;
use spritebox_domain::ScriptError;

/// Convert an mlua error raised while running guest code to a `ScriptError`.
///
/// Typed errors raised by host callables travel through the guest as
/// external errors and keep their variant; everything else is a runtime
/// error carrying the VM's message.
pub(crate) fn lua_to_script_error(e: LuaError) -> ScriptError {
    match e {
        LuaError::SyntaxError { message, .. } => ScriptError::Load(message),
        LuaError::RuntimeError(message) => ScriptError::Runtime(message),
        LuaError::CallbackError { cause, .. } => lua_to_script_error(cause.as_ref().clone()),
        LuaError::ExternalError(inner) => match inner.downcast_ref::<ScriptError>() {
            Some(typed) => typed.clone(),
            None => ScriptError::Runtime(inner.to_string()),
        },
        other => ScriptError::Runtime(other.to_string()),
    }
}

/// Convert an mlua error raised while compiling a chunk.
///
/// Anything that goes wrong before the chunk runs is a load error.
pub(crate) fn lua_to_load_error(e: LuaError) -> ScriptError {
    match e {
        LuaError::SyntaxError { message, .. } => ScriptError::Load(message),
        other => ScriptError::Load(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spritebox_domain::Direction;
    use std::sync::Arc;

    #[test]
    fn test_runtime_error_keeps_message() {
        let error = lua_to_script_error(LuaError::RuntimeError("boom".into()));
        assert_eq!(error, ScriptError::Runtime("boom".into()));
    }

    #[test]
    fn test_callback_error_unwraps_typed_cause() {
        let typed = ScriptError::unsupported("thread", Direction::ToHost);
        let wrapped = LuaError::CallbackError {
            traceback: String::new(),
            cause: Arc::new(LuaError::external(typed.clone())),
        };
        assert_eq!(lua_to_script_error(wrapped), typed);
    }

    #[test]
    fn test_syntax_error_is_load_error() {
        let lua = Lua::new();
        let err = lua.load("this is not lua {{").into_function().unwrap_err();
        assert!(lua_to_load_error(err).is_load());
    }
}
