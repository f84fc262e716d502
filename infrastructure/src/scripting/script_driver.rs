//! Script driver — the cartridge lifecycle on top of one guest environment.
//!
//! Every entry point contains its own faults. A load error, a raise inside
//! `_update` or a value the boundary cannot convert becomes one console
//! line (`!! <error>`) and a `false` return; the host never sees a panic
//! or an `Err` from a script fault. Only configuration errors from
//! [`ScriptDriver::register_api`] reach the caller.

use spritebox_application::{
    ApiObject, InputStatePort, OutputSinkPort, RenderQueuePort, ScriptConfig, ScriptRuntimePort,
};
use spritebox_domain::{HostValue, RegistrationError, ScriptError, SessionState};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::debug;

use super::engine_api::register_engine_api;
use super::guest_env::GuestEnvironment;
use super::registrar::{ApiRegistrar, CapabilityTable};

/// Guarded hook invocations: an undefined hook is a silent no-op.
const INIT_HOOK: &str = "if _init then _init() end";
const UPDATE_HOOK: &str = "if _update then _update() end";
const DRAW_HOOK: &str = "if _draw then _draw() end";

/// Runs one cartridge against a render queue, an input query and a console.
pub struct ScriptDriver {
    env: GuestEnvironment,
    sink: Arc<Mutex<dyn OutputSinkPort>>,
    config: ScriptConfig,
    state: SessionState,
}

impl ScriptDriver {
    /// Build a guest environment and bind the engine globals into it.
    pub fn new(
        render: Arc<Mutex<dyn RenderQueuePort>>,
        input: Arc<Mutex<dyn InputStatePort>>,
        sink: Arc<Mutex<dyn OutputSinkPort>>,
        config: ScriptConfig,
    ) -> Result<Self, ScriptError> {
        let env = GuestEnvironment::new(&config)?;
        register_engine_api(&env, render, input, Arc::clone(&sink), &config)?;

        Ok(Self {
            env,
            sink,
            config,
            state: SessionState::Unloaded,
        })
    }

    /// Expose a host API object under `global_name`.
    pub fn register_api<A: ApiObject>(
        &self,
        global_name: &str,
        api: Arc<A>,
    ) -> Result<CapabilityTable, RegistrationError> {
        ApiRegistrar::register(global_name, &self.env, api)
    }

    /// Clear the console and run `source` as the cartridge body.
    pub fn load(&mut self, source: &str) -> bool {
        self.console().clear();

        let ok = match self.env.evaluate(source) {
            Ok(_) => true,
            Err(e) => {
                self.report(&e);
                false
            }
        };

        self.state = SessionState::after_load(ok);
        debug!(ok, state = %self.state, "Script load finished");
        ok
    }

    pub fn init(&mut self) -> bool {
        self.run_hook(INIT_HOOK)
    }

    /// Run `_update` and advance the frame counter.
    pub fn update(&mut self) -> bool {
        if !self.state.accepts_calls() {
            return false;
        }
        let ok = self.run_hook(UPDATE_HOOK);
        self.state = self.state.after_update();
        ok
    }

    pub fn draw(&mut self) -> bool {
        if !self.state.accepts_calls() {
            return false;
        }
        let ok = self.run_hook(DRAW_HOOK);
        self.state = self.state.after_draw();
        ok
    }

    /// Evaluate a snippet in the cartridge's environment and return its
    /// results. Faults are returned, not written to the console.
    pub fn evaluate(&self, source: &str) -> Result<Vec<HostValue>, ScriptError> {
        self.env.evaluate(source)
    }

    pub fn environment(&self) -> &GuestEnvironment {
        &self.env
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn frame(&self) -> u64 {
        self.state.frame()
    }

    pub fn shutdown(self) {
        debug!(state = %self.state, "Script driver shut down");
        self.env.release();
    }

    fn run_hook(&mut self, hook: &str) -> bool {
        if !self.state.accepts_calls() {
            return false;
        }
        match self.env.evaluate(hook) {
            Ok(_) => true,
            Err(e) => {
                self.report(&e);
                false
            }
        }
    }

    fn report(&self, error: &ScriptError) {
        let line = self.config.error_line(error);
        self.console().append(line);
    }

    fn console(&self) -> MutexGuard<'_, dyn OutputSinkPort + 'static> {
        self.sink.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ScriptRuntimePort for ScriptDriver {
    fn load(&mut self, source: &str) -> bool {
        ScriptDriver::load(self, source)
    }

    fn init(&mut self) -> bool {
        ScriptDriver::init(self)
    }

    fn update(&mut self) -> bool {
        ScriptDriver::update(self)
    }

    fn draw(&mut self) -> bool {
        ScriptDriver::draw(self)
    }

    fn state(&self) -> SessionState {
        self.state
    }

    fn is_available(&self) -> bool {
        true
    }
}
