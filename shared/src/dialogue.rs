//! Dialogue progress and the text sink it feeds.

use std::sync::{Arc, Mutex, PoisonError};

/// Destination for the current line of dialogue.
///
/// Implementations must tolerate being called with the same text repeatedly.
pub trait TextSink: Send + Sync {
    fn display(&self, text: &str);
}

/// A text sink that just remembers the last line it was given.
///
/// The client polls this each frame and copies changes into its UI node.
#[derive(Clone, Debug, Default)]
pub struct SharedText {
    text: Arc<Mutex<String>>,
}

impl SharedText {
    pub fn text(&self) -> String {
        self.text
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl TextSink for SharedText {
    fn display(&self, text: &str) {
        let mut guard = self.text.lock().unwrap_or_else(PoisonError::into_inner);
        guard.clear();
        guard.push_str(text);
    }
}

/// Ordered dialogue script plus a remaining-steps counter.
///
/// The line shown is `script[total - remaining]`, clamped to the script. `remaining` never
/// increases and never goes below zero.
#[derive(Clone, Debug, Default)]
pub struct DialogueProgress {
    script: Vec<String>,
    remaining: usize,
}

impl DialogueProgress {
    pub fn new(script: Vec<String>) -> Self {
        let remaining = script.len();
        Self { script, remaining }
    }

    #[inline]
    pub fn total(&self) -> usize {
        self.script.len()
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    /// The line for the current step, or `""` when the script is empty.
    ///
    /// Once every step is consumed this keeps returning the last line.
    pub fn current_line(&self) -> &str {
        let Some(last) = self.script.len().checked_sub(1) else {
            return "";
        };
        let index = (self.total() - self.remaining).min(last);
        &self.script[index]
    }

    /// Consume `steps` steps, saturating at zero.
    pub fn advance(&mut self, steps: usize) {
        self.remaining = self.remaining.saturating_sub(steps);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn script() -> Vec<String> {
        vec!["hello".into(), "again".into(), "bye".into()]
    }

    #[test]
    fn starts_on_first_line_with_full_counter() {
        let progress = DialogueProgress::new(script());
        assert_eq!(progress.total(), 3);
        assert_eq!(progress.remaining(), 3);
        assert_eq!(progress.current_line(), "hello");
    }

    #[test]
    fn zero_advance_keeps_first_line() {
        let mut progress = DialogueProgress::new(script());
        for _ in 0..5 {
            progress.advance(0);
        }
        assert_eq!(progress.remaining(), 3);
        assert_eq!(progress.current_line(), "hello");
    }

    #[test]
    fn advance_walks_lines_and_clamps_at_the_end() {
        let mut progress = DialogueProgress::new(script());
        progress.advance(1);
        assert_eq!(progress.current_line(), "again");
        progress.advance(1);
        assert_eq!(progress.current_line(), "bye");
        progress.advance(1);
        assert_eq!(progress.remaining(), 0);
        assert_eq!(progress.current_line(), "bye");

        progress.advance(10);
        assert_eq!(progress.remaining(), 0);
        assert_eq!(progress.current_line(), "bye");
    }

    #[test]
    fn empty_script_yields_empty_line() {
        let mut progress = DialogueProgress::new(Vec::new());
        assert_eq!(progress.current_line(), "");
        progress.advance(3);
        assert_eq!(progress.remaining(), 0);
        assert_eq!(progress.current_line(), "");
    }

    #[test]
    fn shared_text_keeps_last_line() {
        let sink = SharedText::default();
        let reader = sink.clone();
        sink.display("first");
        sink.display("second");
        assert_eq!(reader.text(), "second");
        sink.display("");
        assert_eq!(reader.text(), "");
    }
}
