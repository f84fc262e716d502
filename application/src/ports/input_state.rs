//! Input state port — which named inputs are currently held.

pub trait InputStatePort: Send {
    /// Whether the input named `key` (e.g. `"left"`, `"x"`) is held this frame.
    ///
    /// Unknown names are simply not held; this never fails.
    fn is_held(&self, key: &str) -> bool;
}
