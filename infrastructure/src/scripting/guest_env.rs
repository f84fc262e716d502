//! Guest environment — one Lua VM and the operations the host runs on it.
//!
//! The environment is the only owner of the VM. Everything the host needs
//! (evaluate a snippet, bind or read a global, attach an `__index`
//! fallback) goes through here and comes back as owned [`HostValue`]s, so
//! nothing is ever left on the Lua stack between calls.
//!
//! A failed compile or protected call leaves its error object on the stack;
//! mlua reads it and pops it before returning, which keeps every later call
//! at the right stack depth no matter how many faults came before.

use mlua::prelude::*;
use spritebox_application::ScriptConfig;
use spritebox_domain::{Direction, HostValue, ScriptError};
use tracing::debug;

use super::lua_error::{lua_to_load_error, lua_to_script_error};
use super::marshal::Marshaller;
use super::sandbox::apply_sandbox;

/// Owns one Lua 5.4 VM for its whole lifetime.
pub struct GuestEnvironment {
    lua: Lua,
    marshaller: Marshaller,
    chunk_name: String,
}

impl GuestEnvironment {
    /// Acquire a fresh VM with the standard library loaded.
    pub fn new(config: &ScriptConfig) -> Result<Self, ScriptError> {
        let lua = Lua::new();

        if config.sandbox {
            apply_sandbox(&lua).map_err(|e| {
                ScriptError::runtime(format!("sandbox setup failed: {}", e))
            })?;
        }

        debug!(
            sandbox = config.sandbox,
            max_table_depth = config.max_table_depth,
            "Guest environment created"
        );

        Ok(Self {
            lua,
            marshaller: Marshaller::new(config.max_table_depth),
            chunk_name: config.chunk_name.clone(),
        })
    }

    /// Compile and run a snippet, returning every value it returns.
    pub fn evaluate(&self, source: &str) -> Result<Vec<HostValue>, ScriptError> {
        let func = self
            .lua
            .load(source)
            .set_name(self.chunk_name.as_str())
            .into_function()
            .map_err(lua_to_load_error)?;

        let results = func
            .call::<LuaMultiValue>(())
            .map_err(|e| match lua_to_script_error(e) {
                ScriptError::Load(message) => ScriptError::Runtime(message),
                other => other,
            })?;

        results
            .into_iter()
            .map(|value| self.marshaller.to_host(&self.lua, value))
            .collect()
    }

    /// Bind `value` to the global `name`.
    pub fn set_global(&self, name: &str, value: &HostValue) -> Result<(), ScriptError> {
        let value = self.marshaller.to_guest(&self.lua, value)?;
        self.lua
            .globals()
            .set(name, value)
            .map_err(lua_to_script_error)
    }

    /// Read the global `name` (`Absent` when undefined).
    pub fn get_global(&self, name: &str) -> Result<HostValue, ScriptError> {
        let value: LuaValue = self.lua.globals().get(name).map_err(lua_to_script_error)?;
        self.marshaller.to_host(&self.lua, value)
    }

    /// Attach a metatable to the table bound at `global` whose `__index`
    /// asks `fallback` for missing string keys.
    ///
    /// Keys that are not strings, or that `fallback` does not know, read as
    /// `nil`.
    pub fn set_metatable<F>(&self, global: &str, fallback: F) -> Result<(), ScriptError>
    where
        F: Fn(&str) -> Option<HostValue> + Send + Sync + 'static,
    {
        let table = match self
            .lua
            .globals()
            .get::<LuaValue>(global)
            .map_err(lua_to_script_error)?
        {
            LuaValue::Table(table) => table,
            other => {
                return Err(ScriptError::unsupported(
                    format!("{} global '{}' (metatable target)", other.type_name(), global),
                    Direction::ToGuest,
                ));
            }
        };

        let marshaller = self.marshaller;
        let index_fn = self
            .lua
            .create_function(move |lua, (_table, key): (LuaValue, LuaValue)| {
                let LuaValue::String(key) = key else {
                    return Ok(LuaValue::Nil);
                };
                match fallback(&key.to_string_lossy()) {
                    Some(value) => marshaller.to_guest(lua, &value).map_err(LuaError::external),
                    None => Ok(LuaValue::Nil),
                }
            })
            .map_err(lua_to_script_error)?;

        let meta = self.lua.create_table().map_err(lua_to_script_error)?;
        meta.set("__index", index_fn).map_err(lua_to_script_error)?;
        table.set_metatable(Some(meta));
        Ok(())
    }

    /// Release the VM.
    ///
    /// Host callables that wrap guest functions fail with a runtime error
    /// once the VM is gone.
    pub fn release(self) {
        debug!("Guest environment released");
        drop(self.lua);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spritebox_domain::HostMap;

    fn env() -> GuestEnvironment {
        GuestEnvironment::new(&ScriptConfig::default()).unwrap()
    }

    #[test]
    fn test_evaluate_returns_all_results_in_order() {
        let env = env();
        let results = env.evaluate("return 1, 'two', true").unwrap();
        assert_eq!(results, vec![1.into(), "two".into(), true.into()]);
    }

    #[test]
    fn test_evaluate_statement_returns_nothing() {
        let env = env();
        assert!(env.evaluate("x = 1 + 1").unwrap().is_empty());
        assert_eq!(env.evaluate("return x").unwrap(), vec![HostValue::Number(2.0)]);
    }

    #[test]
    fn test_compile_failure_is_load_error() {
        let env = env();
        let err = env.evaluate("this is not lua {{").unwrap_err();
        assert!(err.is_load());
        assert!(err.to_string().contains("cart"));
    }

    #[test]
    fn test_runtime_failure_is_runtime_error() {
        let env = env();
        match env.evaluate("error('boom')").unwrap_err() {
            ScriptError::Runtime(message) => assert!(message.contains("boom")),
            other => panic!("expected runtime error, got {:?}", other),
        }
    }

    #[test]
    fn test_faults_do_not_disturb_later_results() {
        let env = env();
        for _ in 0..500 {
            assert!(env.evaluate("error('again')").is_err());
            assert!(env.evaluate("local = ").is_err());
            assert!(env.evaluate("return nil + 1").is_err());
        }
        assert_eq!(env.evaluate("return 1, 2").unwrap(), vec![1.into(), 2.into()]);
    }

    #[test]
    fn test_set_and_get_global() {
        let env = env();
        let mut map = HostMap::new();
        map.insert("hp".into(), 3.into());
        env.set_global("player", &HostValue::Map(map.clone())).unwrap();
        assert_eq!(env.get_global("player").unwrap(), HostValue::Map(map));
        assert_eq!(env.evaluate("return player.hp").unwrap(), vec![3.into()]);
        assert_eq!(env.get_global("missing").unwrap(), HostValue::Absent);
    }

    #[test]
    fn test_metatable_fallback() {
        let env = env();
        env.set_global("api", &HostValue::Map(HostMap::new())).unwrap();
        env.set_metatable("api", |key| (key == "late").then(|| HostValue::from(99)))
            .unwrap();

        assert_eq!(env.evaluate("return api.late").unwrap(), vec![99.into()]);
        assert_eq!(env.evaluate("return api.other").unwrap(), vec![HostValue::Absent]);
        assert_eq!(env.evaluate("return api[1]").unwrap(), vec![HostValue::Absent]);
    }

    #[test]
    fn test_metatable_requires_table_global() {
        let env = env();
        env.set_global("n", &HostValue::Number(1.0)).unwrap();
        let err = env.set_metatable("n", |_| None).unwrap_err();
        assert!(matches!(err, ScriptError::UnsupportedType { .. }));
    }

    #[test]
    fn test_sandbox_follows_config() {
        let open = GuestEnvironment::new(&ScriptConfig::default().with_sandbox(false)).unwrap();
        assert_ne!(open.get_global("require").unwrap(), HostValue::Absent);
        assert_eq!(env().get_global("require").unwrap(), HostValue::Absent);
    }

    #[test]
    fn test_returned_function_is_callable_from_host() {
        let env = env();
        let results = env
            .evaluate("return function(a) return a * 2 end")
            .unwrap();
        let double = results[0].as_callable().unwrap();
        assert_eq!(
            double.call(vec![21.into()]).unwrap(),
            HostValue::Sequence(vec![42.into()])
        );
    }

    #[test]
    fn test_guest_function_fails_after_release() {
        let env = env();
        let results = env.evaluate("return function(a) return a end").unwrap();
        let identity = results[0].as_callable().unwrap().clone();
        env.release();

        match identity.call(vec![1.into()]) {
            Err(ScriptError::Runtime(message)) => assert!(message.contains("released")),
            other => panic!("expected runtime error, got {:?}", other),
        }
    }
}
