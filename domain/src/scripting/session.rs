//! Script session lifecycle.
//!
//! ```text
//! Unloaded ──load ok──▶ Loaded ──update/draw──▶ Running(frame N)
//!     ▲                    │                          │
//!     └──────load failed───┴──────────load failed─────┘
//! ```
//!
//! Faults inside lifecycle calls never change the state; only `load` does.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SessionState {
    /// No script loaded, or the last load failed. Lifecycle calls are no-ops.
    #[default]
    Unloaded,
    /// A script loaded successfully; no frame has run yet.
    Loaded,
    /// Frames are being driven. `frame` counts completed `update` calls.
    Running { frame: u64 },
}

impl SessionState {
    /// Whether lifecycle hooks should be invoked in this state.
    pub fn accepts_calls(&self) -> bool {
        !matches!(self, Self::Unloaded)
    }

    pub fn frame(&self) -> u64 {
        match self {
            Self::Running { frame } => *frame,
            _ => 0,
        }
    }

    /// State after a `load` attempt.
    pub fn after_load(ok: bool) -> Self {
        if ok { Self::Loaded } else { Self::Unloaded }
    }

    /// State after an `update` call, successful or not.
    pub fn after_update(self) -> Self {
        match self {
            Self::Unloaded => Self::Unloaded,
            Self::Loaded => Self::Running { frame: 1 },
            Self::Running { frame } => Self::Running { frame: frame + 1 },
        }
    }

    /// State after a `draw` call, successful or not.
    pub fn after_draw(self) -> Self {
        match self {
            Self::Loaded => Self::Running { frame: 0 },
            other => other,
        }
    }
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unloaded => write!(f, "unloaded"),
            Self::Loaded => write!(f, "loaded"),
            Self::Running { frame } => write!(f, "running (frame {})", frame),
        }
    }
}
