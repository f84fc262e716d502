//! Value marshalling between Lua values and [`HostValue`].
//!
//! | Lua                      | Host                              |
//! |--------------------------|-----------------------------------|
//! | `nil`                    | `Absent`                          |
//! | boolean                  | `Boolean`                         |
//! | integer / number         | `Number` (integral → Lua integer) |
//! | string                   | `String` (lossy UTF-8)            |
//! | table                    | `Map` (keys stringified)          |
//! | function                 | `Callable` (see `bridge`)         |
//! | userdata, thread, ...    | unsupported                       |
//!
//! Host sequences become dense 1-based tables, so a sequence comes back
//! as a map keyed `"1".."N"`.
//!
//! Table conversion tracks the tables on the current descent path: a table
//! that contains itself (directly or through children) is a `CyclicTable`
//! error, and nesting beyond `max_depth` is a `NestingTooDeep` error.

use mlua::prelude::*;
use spritebox_domain::{Direction, HostMap, HostValue, ScriptError, format_number};
use std::ffi::c_void;

use super::bridge::{guest_function_to_host, host_callable_to_guest};
use super::lua_error::lua_to_script_error;

/// Converts values across the host/guest boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Marshaller {
    max_depth: usize,
}

impl Marshaller {
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// Convert a Lua value to a host value.
    pub fn to_host(&self, lua: &Lua, value: LuaValue) -> Result<HostValue, ScriptError> {
        let mut path = Vec::new();
        self.to_host_inner(lua, value, &mut path)
    }

    fn to_host_inner(
        &self,
        lua: &Lua,
        value: LuaValue,
        path: &mut Vec<*const c_void>,
    ) -> Result<HostValue, ScriptError> {
        match value {
            LuaValue::Nil => Ok(HostValue::Absent),
            LuaValue::Boolean(b) => Ok(HostValue::Boolean(b)),
            LuaValue::Integer(n) => Ok(HostValue::Number(n as f64)),
            LuaValue::Number(n) => Ok(HostValue::Number(n)),
            LuaValue::String(s) => Ok(HostValue::String(lua_string(&s))),
            LuaValue::Table(table) => self.table_to_host(lua, table, path),
            LuaValue::Function(func) => Ok(HostValue::Callable(guest_function_to_host(
                lua, func, *self,
            ))),
            other => Err(ScriptError::unsupported(
                other.type_name(),
                Direction::ToHost,
            )),
        }
    }

    fn table_to_host(
        &self,
        lua: &Lua,
        table: LuaTable,
        path: &mut Vec<*const c_void>,
    ) -> Result<HostValue, ScriptError> {
        let id = table.to_pointer();
        if path.contains(&id) {
            return Err(ScriptError::CyclicTable);
        }
        if path.len() >= self.max_depth {
            return Err(ScriptError::NestingTooDeep {
                limit: self.max_depth,
            });
        }

        path.push(id);
        let mut map = HostMap::new();
        for pair in table.pairs::<LuaValue, LuaValue>() {
            let (key, value) = pair.map_err(lua_to_script_error)?;
            let key = map_key(key)?;
            let value = self.to_host_inner(lua, value, path)?;
            map.insert(key, value);
        }
        path.pop();

        Ok(HostValue::Map(map))
    }

    /// Convert a host value to exactly one Lua value.
    pub fn to_guest(&self, lua: &Lua, value: &HostValue) -> Result<LuaValue, ScriptError> {
        match value {
            HostValue::Absent => Ok(LuaValue::Nil),
            HostValue::Boolean(b) => Ok(LuaValue::Boolean(*b)),
            HostValue::Number(n) => Ok(number_to_lua(*n)),
            HostValue::String(s) => lua
                .create_string(s)
                .map(LuaValue::String)
                .map_err(lua_to_script_error),
            HostValue::Sequence(items) => {
                let table = lua.create_table().map_err(lua_to_script_error)?;
                for (i, item) in items.iter().enumerate() {
                    let item = self.to_guest(lua, item)?;
                    table.raw_set(i + 1, item).map_err(lua_to_script_error)?;
                }
                Ok(LuaValue::Table(table))
            }
            HostValue::Map(map) => {
                let table = lua.create_table().map_err(lua_to_script_error)?;
                for (key, item) in map {
                    let item = self.to_guest(lua, item)?;
                    table.set(key.as_str(), item).map_err(lua_to_script_error)?;
                }
                Ok(LuaValue::Table(table))
            }
            HostValue::Callable(callable) => {
                host_callable_to_guest(lua, callable.clone(), *self)
                    .map(LuaValue::Function)
                    .map_err(lua_to_script_error)
            }
        }
    }
}

impl Default for Marshaller {
    fn default() -> Self {
        Self::new(32)
    }
}

/// Stringify a table key for a host map.
fn map_key(key: LuaValue) -> Result<String, ScriptError> {
    match key {
        LuaValue::String(s) => Ok(lua_string(&s)),
        LuaValue::Integer(n) => Ok(n.to_string()),
        LuaValue::Number(n) => Ok(format_number(n)),
        LuaValue::Boolean(b) => Ok(b.to_string()),
        other => Err(ScriptError::unsupported(
            format!("{} key", other.type_name()),
            Direction::ToHost,
        )),
    }
}

/// Integral numbers in `i64` range become Lua integers.
fn number_to_lua(n: f64) -> LuaValue {
    if n.fract() == 0.0 && n >= i64::MIN as f64 && n < i64::MAX as f64 {
        LuaValue::Integer(n as i64)
    } else {
        LuaValue::Number(n)
    }
}

fn lua_string(s: &LuaString) -> String {
    s.to_string_lossy().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use spritebox_domain::HostCallable;

    fn roundtrip(lua: &Lua, value: &HostValue) -> HostValue {
        let m = Marshaller::default();
        let guest = m.to_guest(lua, value).unwrap();
        m.to_host(lua, guest).unwrap()
    }

    #[test]
    fn test_scalars_roundtrip() {
        let lua = Lua::new();
        for value in [
            HostValue::Boolean(true),
            HostValue::Boolean(false),
            HostValue::Number(0.0),
            HostValue::Number(-42.0),
            HostValue::Number(3.25),
            HostValue::Number(1e300),
            HostValue::String(String::new()),
            HostValue::String("héllo".into()),
        ] {
            assert_eq!(roundtrip(&lua, &value), value);
        }
    }

    #[test]
    fn test_absent_roundtrips_through_nil() {
        let lua = Lua::new();
        assert_eq!(roundtrip(&lua, &HostValue::Absent), HostValue::Absent);
    }

    #[test]
    fn test_integral_numbers_become_lua_integers() {
        let lua = Lua::new();
        let m = Marshaller::default();
        let value = m.to_guest(&lua, &HostValue::Number(7.0)).unwrap();
        assert_eq!(value, LuaValue::Integer(7));
        let value = m.to_guest(&lua, &HostValue::Number(7.5)).unwrap();
        assert_eq!(value, LuaValue::Number(7.5));
    }

    #[test]
    fn test_sequence_comes_back_as_string_keyed_map() {
        let lua = Lua::new();
        let seq = HostValue::Sequence(vec!["a".into(), 2.into(), true.into()]);
        let map = roundtrip(&lua, &seq);
        let map = map.as_map().unwrap();
        assert_eq!(map.len(), 3);
        assert_eq!(map["1"], HostValue::String("a".into()));
        assert_eq!(map["2"], HostValue::Number(2.0));
        assert_eq!(map["3"], HostValue::Boolean(true));
    }

    #[test]
    fn test_sequence_is_dense_one_based_guest_table() {
        let lua = Lua::new();
        let m = Marshaller::default();
        let seq = HostValue::Sequence(vec![10.into(), 20.into()]);
        lua.globals().set("seq", m.to_guest(&lua, &seq).unwrap()).unwrap();
        let (len, first): (i64, i64) = lua.load("return #seq, seq[1]").eval().unwrap();
        assert_eq!(len, 2);
        assert_eq!(first, 10);
    }

    #[test]
    fn test_nested_map_roundtrip() {
        let lua = Lua::new();
        let mut inner = HostMap::new();
        inner.insert("hp".into(), 3.into());
        let mut outer = HostMap::new();
        outer.insert("player".into(), HostValue::Map(inner));
        outer.insert("name".into(), "ada".into());
        let value = HostValue::Map(outer);
        assert_eq!(roundtrip(&lua, &value), value);
    }

    #[test]
    fn test_non_string_keys_are_stringified() {
        let lua = Lua::new();
        let m = Marshaller::default();
        let table: LuaValue = lua
            .load("return { [1] = 'a', [2.5] = 'b', [true] = 'c' }")
            .eval()
            .unwrap();
        let map = m.to_host(&lua, table).unwrap();
        let map = map.as_map().unwrap();
        assert_eq!(map["1"], HostValue::String("a".into()));
        assert_eq!(map["2.5"], HostValue::String("b".into()));
        assert_eq!(map["true"], HostValue::String("c".into()));
    }

    #[test]
    fn test_table_key_is_unsupported() {
        let lua = Lua::new();
        let m = Marshaller::default();
        let table: LuaValue = lua.load("return { [{}] = 1 }").eval().unwrap();
        let err = m.to_host(&lua, table).unwrap_err();
        assert!(matches!(err, ScriptError::UnsupportedType { .. }));
    }

    #[test]
    fn test_cyclic_table_is_rejected() {
        let lua = Lua::new();
        let m = Marshaller::default();
        let table: LuaValue = lua
            .load("local t = { name = 'loop' }; t.self = t; return t")
            .eval()
            .unwrap();
        assert_eq!(m.to_host(&lua, table).unwrap_err(), ScriptError::CyclicTable);
    }

    #[test]
    fn test_shared_subtable_is_not_a_cycle() {
        let lua = Lua::new();
        let m = Marshaller::default();
        let table: LuaValue = lua
            .load("local shared = { v = 1 }; return { a = shared, b = shared }")
            .eval()
            .unwrap();
        let map = m.to_host(&lua, table).unwrap();
        let map = map.as_map().unwrap();
        assert_eq!(map["a"], map["b"]);
    }

    #[test]
    fn test_depth_cap() {
        let lua = Lua::new();
        let m = Marshaller::new(3);
        let ok: LuaValue = lua.load("return { { { 1 } } }").eval().unwrap();
        assert!(m.to_host(&lua, ok).is_ok());
        let deep: LuaValue = lua.load("return { { { { 1 } } } }").eval().unwrap();
        assert_eq!(
            m.to_host(&lua, deep).unwrap_err(),
            ScriptError::NestingTooDeep { limit: 3 }
        );
    }

    #[test]
    fn test_userdata_and_threads_are_unsupported() {
        let lua = Lua::new();
        let m = Marshaller::default();
        let thread: LuaValue = lua
            .load("return coroutine.create(function() end)")
            .eval()
            .unwrap();
        assert_eq!(
            m.to_host(&lua, thread).unwrap_err(),
            ScriptError::unsupported("thread", Direction::ToHost)
        );
    }

    #[test]
    fn test_callable_becomes_guest_function() {
        let lua = Lua::new();
        let m = Marshaller::default();
        let double = HostCallable::new("double", |args| {
            let n = args.first().and_then(HostValue::as_number).unwrap_or(0.0);
            Ok(HostValue::Number(n * 2.0))
        });
        let func = m.to_guest(&lua, &HostValue::Callable(double)).unwrap();
        lua.globals().set("double", func).unwrap();
        let result: i64 = lua.load("return double(21)").eval().unwrap();
        assert_eq!(result, 42);
    }
}
