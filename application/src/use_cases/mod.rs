//! Use cases
//!
//! - [`run_frames`] — per-frame scheduling of a loaded script

pub mod run_frames;
