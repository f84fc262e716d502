//! Engine globals — the direct functions every cartridge can call.
//!
//! ```lua
//! cls(1)
//! spr(3, 10, 20)                    -- sprite 3 at (10, 20)
//! spr(4, 0, 0, 2, 2, true)          -- 2x2 cells, flipped horizontally
//! pal(8, 12)                        -- draw color 8 as color 12
//! pal()                             -- reset every remap
//! if btn("left") then x = x - 1 end
//! print("x is", x)
//! ```
//!
//! Wrong argument types raise into the guest like any Lua library error.
//! Collaborator failures (out-of-range indices) are written to the console
//! and the call returns `nil`, so one bad draw does not abort the frame.

use spritebox_application::{InputStatePort, OutputSinkPort, RenderQueuePort, ScriptConfig};
use spritebox_domain::{HostCallable, HostValue, RenderError, ScriptError, SpriteDraw};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

use super::guest_env::GuestEnvironment;

/// Bind `spr`, `cls`, `print`, `btn`, `pal` and `pal_reset` as guest globals.
pub fn register_engine_api(
    env: &GuestEnvironment,
    render: Arc<Mutex<dyn RenderQueuePort>>,
    input: Arc<Mutex<dyn InputStatePort>>,
    sink: Arc<Mutex<dyn OutputSinkPort>>,
    config: &ScriptConfig,
) -> Result<(), ScriptError> {
    let report = ErrorReporter {
        sink: Arc::clone(&sink),
        config: config.clone(),
    };

    let bindings = [
        spr_binding(Arc::clone(&render), report.clone()),
        cls_binding(Arc::clone(&render), report.clone()),
        pal_binding(Arc::clone(&render), report),
        pal_reset_binding(render),
        btn_binding(input),
        print_binding(sink),
    ];

    for binding in bindings {
        env.set_global(binding.name(), &HostValue::Callable(binding.clone()))?;
    }

    debug!("Engine API registered");
    Ok(())
}

// ==================== Bindings ====================

fn spr_binding(render: Arc<Mutex<dyn RenderQueuePort>>, report: ErrorReporter) -> HostCallable {
    HostCallable::new("spr", move |args| {
        let args = Args::new("spr", &args);
        let draw = SpriteDraw::new(args.integer(0)?, args.integer(1)?, args.integer(2)?)
            .with_size(args.opt_integer(3, 1)?, args.opt_integer(4, 1)?)
            .with_flip(args.flag(5), args.flag(6));

        let result = lock(&render, "render queue")?.queue_draw(draw);
        report.contain("spr", result)
    })
}

fn cls_binding(render: Arc<Mutex<dyn RenderQueuePort>>, report: ErrorReporter) -> HostCallable {
    HostCallable::new("cls", move |args| {
        let color = Args::new("cls", &args).opt_integer(0, 0)?;
        let result = lock(&render, "render queue")?.clear(color);
        report.contain("cls", result)
    })
}

fn pal_binding(render: Arc<Mutex<dyn RenderQueuePort>>, report: ErrorReporter) -> HostCallable {
    HostCallable::new("pal", move |args| {
        if args.iter().all(HostValue::is_absent) {
            lock(&render, "render queue")?.reset_palette();
            return Ok(HostValue::Absent);
        }

        let args = Args::new("pal", &args);
        let (slot, source) = (args.integer(0)?, args.integer(1)?);
        let result = lock(&render, "render queue")?.set_palette_slot(slot, source);
        report.contain("pal", result)
    })
}

fn pal_reset_binding(render: Arc<Mutex<dyn RenderQueuePort>>) -> HostCallable {
    HostCallable::new("pal_reset", move |_| {
        lock(&render, "render queue")?.reset_palette();
        Ok(HostValue::Absent)
    })
}

fn btn_binding(input: Arc<Mutex<dyn InputStatePort>>) -> HostCallable {
    HostCallable::new("btn", move |args| {
        let args = Args::new("btn", &args);
        let key = args.string(0)?;
        let held = lock(&input, "input state")?.is_held(key);
        Ok(HostValue::Boolean(held))
    })
}

fn print_binding(sink: Arc<Mutex<dyn OutputSinkPort>>) -> HostCallable {
    HostCallable::new("print", move |args| {
        let line = args
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ");
        lock(&sink, "console")?.append(line);
        Ok(HostValue::Absent)
    })
}

// ==================== Helpers ====================

/// Writes collaborator failures to the console instead of raising them.
#[derive(Clone)]
struct ErrorReporter {
    sink: Arc<Mutex<dyn OutputSinkPort>>,
    config: ScriptConfig,
}

impl ErrorReporter {
    fn contain(
        &self,
        binding: &str,
        result: Result<(), RenderError>,
    ) -> Result<HostValue, ScriptError> {
        if let Err(e) = result {
            let line = self.config.error_line(&format!("{}: {}", binding, e));
            lock(&self.sink, "console")?.append(line);
        }
        Ok(HostValue::Absent)
    }
}

fn lock<'a, T: ?Sized>(
    mutex: &'a Mutex<T>,
    what: &str,
) -> Result<MutexGuard<'a, T>, ScriptError> {
    mutex
        .lock()
        .map_err(|e| ScriptError::runtime(format!("{} lock poisoned: {}", what, e)))
}

/// Positional argument access with Lua-style error messages.
struct Args<'a> {
    function: &'static str,
    values: &'a [HostValue],
}

impl<'a> Args<'a> {
    fn new(function: &'static str, values: &'a [HostValue]) -> Self {
        Self { function, values }
    }

    fn get(&self, index: usize) -> &'a HostValue {
        const NIL: &HostValue = &HostValue::Absent;
        self.values.get(index).unwrap_or(NIL)
    }

    /// A required number, floored to an integer.
    fn integer(&self, index: usize) -> Result<i64, ScriptError> {
        match self.get(index) {
            HostValue::Number(n) => Ok(n.floor() as i64),
            other => Err(self.bad_argument(index, "number", other)),
        }
    }

    fn opt_integer(&self, index: usize, default: i64) -> Result<i64, ScriptError> {
        match self.get(index) {
            HostValue::Absent => Ok(default),
            _ => self.integer(index),
        }
    }

    /// Lua truthiness; a missing flag is false.
    fn flag(&self, index: usize) -> bool {
        self.get(index).is_truthy()
    }

    fn string(&self, index: usize) -> Result<&'a str, ScriptError> {
        match self.get(index) {
            HostValue::String(s) => Ok(s),
            other => Err(self.bad_argument(index, "string", other)),
        }
    }

    fn bad_argument(&self, index: usize, expected: &str, got: &HostValue) -> ScriptError {
        ScriptError::runtime(format!(
            "bad argument #{} to '{}' ({} expected, got {})",
            index + 1,
            self.function,
            expected,
            guest_type_name(got)
        ))
    }
}

/// Guest-facing name of a value's type.
fn guest_type_name(value: &HostValue) -> &'static str {
    match value {
        HostValue::Absent => "nil",
        HostValue::Sequence(_) | HostValue::Map(_) => "table",
        HostValue::Callable(_) => "function",
        other => other.type_name(),
    }
}
