//! Callable bridge — functions crossing the host/guest boundary.
//!
//! A Lua function handed to the host becomes a [`HostCallable`] that
//! returns every guest result as a `HostValue::Sequence`. A host callable
//! handed to Lua becomes a native function whose result count depends on
//! what the host returns:
//!
//! | Host return                 | Lua results          |
//! |-----------------------------|----------------------|
//! | `Boolean`/`Number`/`String` | 1                    |
//! | `Sequence(n items)`         | n, each converted    |
//! | `Absent`                    | 1 (`nil`)            |
//! | `Map` / `Callable`          | 0                    |

use mlua::prelude::*;
use spritebox_domain::{HostCallable, HostValue, ScriptError};

use super::lua_error::lua_to_script_error;
use super::marshal::Marshaller;

/// Wrap a Lua function as a host callable.
///
/// The callable holds only a weak reference to the VM; invoking it after
/// the guest environment has been released is a runtime error.
pub(crate) fn guest_function_to_host(
    lua: &Lua,
    func: LuaFunction,
    marshaller: Marshaller,
) -> HostCallable {
    let weak = lua.weak();
    HostCallable::new(describe(&func), move |args| {
        let lua = weak
            .try_upgrade()
            .ok_or_else(|| ScriptError::runtime("guest environment has been released"))?;

        let mut guest_args = Vec::with_capacity(args.len());
        for arg in &args {
            guest_args.push(marshaller.to_guest(&lua, arg)?);
        }

        let results = func
            .call::<LuaMultiValue>(LuaMultiValue::from_vec(guest_args))
            .map_err(|e| match lua_to_script_error(e) {
                ScriptError::Load(message) => ScriptError::Runtime(message),
                other => other,
            })?;

        let mut values = Vec::with_capacity(results.len());
        for value in results {
            values.push(marshaller.to_host(&lua, value)?);
        }
        Ok(HostValue::Sequence(values))
    })
}

/// Register a host callable as a native Lua function.
pub(crate) fn host_callable_to_guest(
    lua: &Lua,
    callable: HostCallable,
    marshaller: Marshaller,
) -> LuaResult<LuaFunction> {
    lua.create_function(move |lua, args: LuaMultiValue| {
        let mut host_args = Vec::with_capacity(args.len());
        for arg in args {
            host_args.push(marshaller.to_host(lua, arg).map_err(LuaError::external)?);
        }

        let result = callable.call(host_args).map_err(LuaError::external)?;
        results_to_guest(lua, result, marshaller).map_err(LuaError::external)
    })
}

fn results_to_guest(
    lua: &Lua,
    result: HostValue,
    marshaller: Marshaller,
) -> Result<LuaMultiValue, ScriptError> {
    let values = match result {
        HostValue::Absent => vec![LuaValue::Nil],
        scalar @ (HostValue::Boolean(_) | HostValue::Number(_) | HostValue::String(_)) => {
            vec![marshaller.to_guest(lua, &scalar)?]
        }
        HostValue::Sequence(items) => {
            let mut values = Vec::with_capacity(items.len());
            for item in &items {
                values.push(marshaller.to_guest(lua, item)?);
            }
            values
        }
        HostValue::Map(_) | HostValue::Callable(_) => Vec::new(),
    };
    Ok(LuaMultiValue::from_vec(values))
}

fn describe(func: &LuaFunction) -> String {
    format!("guest function: {:p}", func.to_pointer())
}
