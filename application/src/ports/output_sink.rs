//! Output sink port — the in-app console.
//!
//! The console is the only channel through which script output and script
//! failures reach the user. It is append-only between loads.

pub trait OutputSinkPort: Send {
    /// Append one line.
    fn append(&mut self, line: String);

    /// Drop every line (called at the start of each load).
    fn clear(&mut self);

    /// Lines appended since the last clear, oldest first.
    fn lines(&self) -> Vec<String>;
}
