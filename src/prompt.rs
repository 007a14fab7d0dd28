use crate::constants::DEFAULT_PROMPT;

/// The free-text scene description. Overwritten by direct edits or by a
/// selected chat suggestion; read untransformed at merge time. Never cleared
/// as a side effect of a merge attempt.
#[derive(Debug, Clone)]
pub struct PromptStore {
    text: String,
}

impl PromptStore {
    pub fn new() -> Self {
        Self {
            text: DEFAULT_PROMPT.to_string(),
        }
    }

    /// Unconditional overwrite, no validation.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn push_char(&mut self, c: char) {
        self.text.push(c);
    }

    pub fn pop_char(&mut self) {
        self.text.pop();
    }
}

impl Default for PromptStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_with_default_scene() {
        let prompt = PromptStore::new();
        assert_eq!(prompt.text(), DEFAULT_PROMPT);
        assert!(!prompt.is_empty());
    }

    #[test]
    fn test_set_text_overwrites() {
        let mut prompt = PromptStore::new();
        prompt.set_text("sunset beach walk");
        assert_eq!(prompt.text(), "sunset beach walk");

        prompt.set_text("");
        assert!(prompt.is_empty());
    }
}
