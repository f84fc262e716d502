//! Input state backed by a fixed set of held key names.

use spritebox_application::InputStatePort;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeldKeys {
    held: BTreeSet<String>,
}

impl HeldKeys {
    pub fn from_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            held: keys.into_iter().map(Into::into).collect(),
        }
    }

    pub fn press(&mut self, key: impl Into<String>) {
        self.held.insert(key.into());
    }

    pub fn release(&mut self, key: &str) {
        self.held.remove(key);
    }
}

impl InputStatePort for HeldKeys {
    fn is_held(&self, key: &str) -> bool {
        self.held.contains(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_and_release() {
        let mut keys = HeldKeys::from_keys(["x"]);
        assert!(keys.is_held("x"));
        assert!(!keys.is_held("left"));

        keys.press("left");
        keys.release("x");
        assert!(keys.is_held("left"));
        assert!(!keys.is_held("x"));
    }

    #[test]
    fn test_unknown_names_are_not_held() {
        assert!(!HeldKeys::default().is_held("not-a-button"));
    }
}
