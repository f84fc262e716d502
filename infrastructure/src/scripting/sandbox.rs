//! Lua sandbox — cartridges run single snippets, never load files.
//!
//! Cartridge code is authored by end users and shared between players, so
//! the guest gets the pure standard library only. Module and file loading,
//! C extensions and process control are removed; `string`, `table`, `math`,
//! `coroutine`, `os.time` and `os.clock` stay available.

use mlua::prelude::*;

/// Apply sandbox restrictions to the Lua VM.
///
/// Currently removes:
/// - `require`, `dofile`, `loadfile` — no module or file loading
/// - `package.loadlib` / `package.cpath` — no C modules
/// - `io` — no file handles
/// - `os.execute`, `os.exit`, `os.remove`, `os.rename`, `os.getenv`, `os.tmpname`
pub fn apply_sandbox(lua: &Lua) -> LuaResult<()> {
    lua.load(
        r#"
        require = nil
        dofile = nil
        loadfile = nil

        package.loadlib = nil
        package.cpath = ''
        package.path = ''
        package.loaded.io = nil
        io = nil

        os.execute = nil
        os.exit = nil
        os.remove = nil
        os.rename = nil
        os.getenv = nil
        os.tmpname = nil
    "#,
    )
    .set_name("=sandbox")
    .exec()
}
