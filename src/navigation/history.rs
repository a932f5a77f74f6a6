//! Back/forward stack standing in for the browser history.
//!
//! Pushing after going back discards the forward entries, and pushing the
//! fragment that is already current is ignored.

#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<String>,
    cursor: usize,
}

impl History {
    #[must_use]
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            entries: vec![initial.into()],
            cursor: 0,
        }
    }

    #[must_use]
    pub fn current(&self) -> &str {
        &self.entries[self.cursor]
    }

    pub fn push(&mut self, fragment: impl Into<String>) {
        let fragment = fragment.into();
        if fragment == self.current() {
            return;
        }
        self.entries.truncate(self.cursor + 1);
        self.entries.push(fragment);
        self.cursor = self.entries.len() - 1;
    }

    /// Replaces the current entry without touching the rest of the stack.
    pub fn replace(&mut self, fragment: impl Into<String>) {
        self.entries[self.cursor] = fragment.into();
    }

    /// Steps back and returns the new current entry, if there was one.
    pub fn back(&mut self) -> Option<&str> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(self.current())
    }

    pub fn forward(&mut self) -> Option<&str> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        Some(self.current())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn back_and_forward() {
        let mut history = History::new("#home");
        history.push("#faq");
        history.push("#terms");

        assert_eq!(history.back(), Some("#faq"));
        assert_eq!(history.back(), Some("#home"));
        assert_eq!(history.back(), None);
        assert_eq!(history.forward(), Some("#faq"));
    }

    #[test]
    fn push_after_back_drops_forward_entries() {
        let mut history = History::new("#home");
        history.push("#faq");
        history.push("#terms");
        history.back();
        history.push("#support");

        assert_eq!(history.forward(), None);
        assert_eq!(history.len(), 3);
    }

    #[test]
    fn replace_keeps_forward_entries() {
        let mut history = History::new("#home");
        history.push("#faq");
        history.push("#terms");
        history.back();
        history.replace("#support");

        assert_eq!(history.current(), "#support");
        assert_eq!(history.len(), 3);
        assert_eq!(history.forward(), Some("#terms"));
    }

    #[test]
    fn duplicate_push_is_ignored() {
        let mut history = History::new("#home");
        history.push("#home");
        assert_eq!(history.len(), 1);
    }
}
