//! Draft state for the command input line.

use unicode_segmentation::UnicodeSegmentation;

/// Single-line text editor with grapheme-aware cursor.
#[derive(Debug, Default, Clone)]
pub struct DraftInput {
    text: String,
    cursor: usize,
}

impl DraftInput {
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Cursor position in graphemes.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn take_text(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.text)
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        self.cursor = self.cursor.saturating_add(1).min(self.grapheme_count());
    }

    pub fn move_cursor_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_cursor_end(&mut self) {
        self.cursor = self.grapheme_count();
    }

    pub fn enter_char(&mut self, new_char: char) {
        let index = self.byte_index();
        self.text.insert(index, new_char);
        self.move_cursor_right();
    }

    /// Backspace.
    pub fn delete_char(&mut self) {
        if self.cursor == 0 {
            return;
        }

        let start = self.byte_index_at(self.cursor - 1);
        let end = self.byte_index_at(self.cursor);
        self.text.replace_range(start..end, "");
        self.move_cursor_left();
    }

    /// Delete.
    pub fn delete_char_forward(&mut self) {
        if self.cursor >= self.grapheme_count() {
            return;
        }

        let start = self.byte_index_at(self.cursor);
        let end = self.byte_index_at(self.cursor + 1);
        self.text.replace_range(start..end, "");
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Replace the contents and park the cursor at the end.
    pub fn set_text(&mut self, text: String) {
        self.text = text;
        self.cursor = self.grapheme_count();
    }

    #[must_use]
    pub fn grapheme_count(&self) -> usize {
        self.text.graphemes(true).count()
    }

    fn byte_index(&self) -> usize {
        self.byte_index_at(self.cursor)
    }

    fn byte_index_at(&self, grapheme_index: usize) -> usize {
        self.text
            .grapheme_indices(true)
            .nth(grapheme_index)
            .map_or(self.text.len(), |(index, _)| index)
    }
}

#[cfg(test)]
mod tests {
    use super::DraftInput;

    fn draft(text: &str) -> DraftInput {
        let mut draft = DraftInput::default();
        draft.set_text(text.to_owned());
        draft
    }

    #[test]
    fn insert_at_cursor() {
        let mut input = draft("hep");
        input.move_cursor_left();
        input.enter_char('l');
        assert_eq!(input.text(), "help");
        assert_eq!(input.cursor(), 3);
    }

    #[test]
    fn backspace_and_delete() {
        let mut input = draft("lss");
        input.delete_char();
        assert_eq!(input.text(), "ls");
        input.move_cursor_home();
        input.delete_char_forward();
        assert_eq!(input.text(), "s");
        input.move_cursor_home();
        input.delete_char();
        assert_eq!(input.text(), "s");
    }

    #[test]
    fn multibyte_graphemes() {
        let mut input = draft("c\u{e9}t");
        input.move_cursor_left();
        input.delete_char();
        assert_eq!(input.text(), "ct");
        assert_eq!(input.cursor(), 1);
    }

    #[test]
    fn take_text_resets() {
        let mut input = draft("whoami");
        assert_eq!(input.take_text(), "whoami");
        assert_eq!(input.text(), "");
        assert_eq!(input.cursor(), 0);
    }
}
