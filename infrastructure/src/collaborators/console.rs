//! Console sink that keeps lines in memory.

use spritebox_application::OutputSinkPort;

#[derive(Debug, Clone, Default)]
pub struct ConsoleBuffer {
    lines: Vec<String>,
}

impl ConsoleBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl OutputSinkPort for ConsoleBuffer {
    fn append(&mut self, line: String) {
        self.lines.push(line);
    }

    fn clear(&mut self) {
        self.lines.clear();
    }

    fn lines(&self) -> Vec<String> {
        self.lines.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_and_clear() {
        let mut console = ConsoleBuffer::new();
        console.append("one".into());
        console.append("two".into());
        assert_eq!(console.lines(), vec!["one", "two"]);

        console.clear();
        assert!(console.is_empty());
    }
}
