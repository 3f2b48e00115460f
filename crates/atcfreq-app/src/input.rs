// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

/// Single-line text field that keeps its buffer upper-cased as it is edited.
///
/// The cursor counts chars, not bytes. Case folding can change the char count
/// (`ß` becomes `SS`), so the cursor is re-derived from the folded text that
/// was actually inserted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NormalizedInput {
    buffer: String,
    cursor: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditCommand {
    Insert(char),
    Backspace,
    Delete,
    Left,
    Right,
    Home,
    End,
    Clear,
}

impl NormalizedInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: &str) -> Self {
        let mut input = Self::new();
        input.insert_str(text);
        input
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// The value a submission reads.
    pub fn current_value(&self) -> &str {
        self.buffer.trim()
    }

    /// Returns whether the buffer changed.
    pub fn apply(&mut self, command: EditCommand) -> bool {
        match command {
            EditCommand::Insert(ch) => {
                self.insert_char(ch);
                true
            }
            EditCommand::Backspace => self.backspace(),
            EditCommand::Delete => self.delete(),
            EditCommand::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                false
            }
            EditCommand::Right => {
                self.cursor = (self.cursor + 1).min(self.char_len());
                false
            }
            EditCommand::Home => {
                self.cursor = 0;
                false
            }
            EditCommand::End => {
                self.cursor = self.char_len();
                false
            }
            EditCommand::Clear => {
                let changed = !self.buffer.is_empty();
                self.buffer.clear();
                self.cursor = 0;
                changed
            }
        }
    }

    pub fn insert_char(&mut self, ch: char) {
        let folded = ch.to_uppercase().collect::<String>();
        self.splice_at_cursor(&folded);
    }

    pub fn insert_str(&mut self, text: &str) {
        self.splice_at_cursor(&text.to_uppercase());
    }

    fn splice_at_cursor(&mut self, folded: &str) {
        let at = self.byte_index(self.cursor);
        self.buffer.insert_str(at, folded);
        self.cursor += folded.chars().count();
    }

    fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        let at = self.byte_index(self.cursor);
        self.buffer.remove(at);
        true
    }

    fn delete(&mut self) -> bool {
        if self.cursor >= self.char_len() {
            return false;
        }
        let at = self.byte_index(self.cursor);
        self.buffer.remove(at);
        true
    }

    fn char_len(&self) -> usize {
        self.buffer.chars().count()
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.buffer
            .char_indices()
            .nth(char_index)
            .map(|(index, _)| index)
            .unwrap_or(self.buffer.len())
    }
}

#[cfg(test)]
mod tests {
    use super::{EditCommand, NormalizedInput};

    #[test]
    fn typing_folds_every_intermediate_step() {
        let mut input = NormalizedInput::new();
        let mut seen = Vec::new();
        for ch in "eddb".chars() {
            input.apply(EditCommand::Insert(ch));
            seen.push(input.text().to_owned());
        }
        assert_eq!(seen, vec!["E", "ED", "EDD", "EDDB"]);
        assert_eq!(input.cursor(), 4);
    }

    #[test]
    fn insert_in_the_middle_keeps_order() {
        let mut input = NormalizedInput::with_text("edb");
        input.apply(EditCommand::Left);
        input.apply(EditCommand::Insert('d'));
        assert_eq!(input.text(), "EDDB");
        assert_eq!(input.cursor(), 3);
    }

    #[test]
    fn current_value_is_trimmed() {
        let input = NormalizedInput::with_text("  uumi ");
        assert_eq!(input.text(), "  UUMI ");
        assert_eq!(input.current_value(), "UUMI");
        assert_eq!(NormalizedInput::with_text("   ").current_value(), "");
    }

    #[test]
    fn expanding_fold_advances_cursor_past_inserted_chars() {
        let mut input = NormalizedInput::new();
        input.apply(EditCommand::Insert('ß'));
        input.apply(EditCommand::Insert('x'));
        assert_eq!(input.text(), "SSX");
        assert_eq!(input.cursor(), 3);
    }

    #[test]
    fn backspace_and_delete_respect_cursor() {
        let mut input = NormalizedInput::with_text("EDDBX");
        assert!(input.apply(EditCommand::Backspace));
        assert_eq!(input.text(), "EDDB");

        input.apply(EditCommand::Home);
        assert!(!input.apply(EditCommand::Backspace));
        assert!(input.apply(EditCommand::Delete));
        assert_eq!(input.text(), "DDB");

        input.apply(EditCommand::End);
        assert!(!input.apply(EditCommand::Delete));
        assert!(input.apply(EditCommand::Clear));
        assert!(input.is_empty());
        assert_eq!(input.cursor(), 0);
    }

    #[test]
    fn cursor_moves_are_clamped() {
        let mut input = NormalizedInput::with_text("ab");
        input.apply(EditCommand::Right);
        assert_eq!(input.cursor(), 2);
        input.apply(EditCommand::Left);
        input.apply(EditCommand::Left);
        input.apply(EditCommand::Left);
        assert_eq!(input.cursor(), 0);
    }
}
