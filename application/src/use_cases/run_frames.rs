//! Run Frames use case.
//!
//! The per-frame scheduler: calls `init` once, then `update` followed by
//! `draw` for each frame, strictly in sequence. Script faults are contained
//! by the runtime; this use case only counts them.

use crate::ports::script_runtime::ScriptRuntimePort;
use tracing::{debug, info};

/// Input for the [`RunFramesUseCase`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunFramesInput {
    /// Number of update+draw pairs to run.
    pub frames: u64,
    /// Skip the `_init` call (e.g. when resuming a running session).
    pub skip_init: bool,
}

impl RunFramesInput {
    pub fn new(frames: u64) -> Self {
        Self {
            frames,
            skip_init: false,
        }
    }

    pub fn without_init(mut self) -> Self {
        self.skip_init = true;
        self
    }
}

/// What happened over a run of frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameReport {
    pub frames_run: u64,
    pub init_failed: bool,
    pub failed_updates: u64,
    pub failed_draws: u64,
}

impl FrameReport {
    pub fn is_clean(&self) -> bool {
        !self.init_failed && self.failed_updates == 0 && self.failed_draws == 0
    }
}

/// Use case for driving a loaded script for a number of frames.
pub struct RunFramesUseCase;

impl RunFramesUseCase {
    pub fn execute(runtime: &mut dyn ScriptRuntimePort, input: RunFramesInput) -> FrameReport {
        let mut report = FrameReport::default();

        if !runtime.state().accepts_calls() {
            debug!("No script loaded, skipping {} frames", input.frames);
            return report;
        }

        if !input.skip_init {
            report.init_failed = !runtime.init();
        }

        for _ in 0..input.frames {
            if !runtime.update() {
                report.failed_updates += 1;
            }
            if !runtime.draw() {
                report.failed_draws += 1;
            }
            report.frames_run += 1;
        }

        info!(
            frames = report.frames_run,
            failed_updates = report.failed_updates,
            failed_draws = report.failed_draws,
            "Frame run finished"
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::script_runtime::NoScriptRuntime;
    use spritebox_domain::SessionState;

    /// Records the call order and fails `update` on odd frames.
    struct ScriptedRuntime {
        calls: Vec<&'static str>,
        state: SessionState,
    }

    impl ScriptedRuntime {
        fn loaded() -> Self {
            Self {
                calls: Vec::new(),
                state: SessionState::Loaded,
            }
        }
    }

    impl ScriptRuntimePort for ScriptedRuntime {
        fn load(&mut self, _source: &str) -> bool {
            true
        }

        fn init(&mut self) -> bool {
            self.calls.push("init");
            true
        }

        fn update(&mut self) -> bool {
            self.calls.push("update");
            self.state = self.state.after_update();
            self.state.frame() % 2 == 0
        }

        fn draw(&mut self) -> bool {
            self.calls.push("draw");
            true
        }

        fn state(&self) -> SessionState {
            self.state
        }

        fn is_available(&self) -> bool {
            true
        }
    }

    #[test]
    fn test_calls_are_sequential() {
        let mut runtime = ScriptedRuntime::loaded();
        RunFramesUseCase::execute(&mut runtime, RunFramesInput::new(2));
        assert_eq!(
            runtime.calls,
            vec!["init", "update", "draw", "update", "draw"]
        );
    }

    #[test]
    fn test_failures_are_counted_not_fatal() {
        let mut runtime = ScriptedRuntime::loaded();
        let report = RunFramesUseCase::execute(&mut runtime, RunFramesInput::new(4));
        assert_eq!(report.frames_run, 4);
        assert_eq!(report.failed_updates, 2);
        assert_eq!(report.failed_draws, 0);
        assert!(!report.is_clean());
    }

    #[test]
    fn test_skip_init() {
        let mut runtime = ScriptedRuntime::loaded();
        RunFramesUseCase::execute(&mut runtime, RunFramesInput::new(1).without_init());
        assert_eq!(runtime.calls, vec!["update", "draw"]);
    }

    #[test]
    fn test_unloaded_runtime_runs_nothing() {
        let mut runtime = NoScriptRuntime;
        let report = RunFramesUseCase::execute(&mut runtime, RunFramesInput::new(10));
        assert_eq!(report, FrameReport::default());
    }
}
