//! Single-line text editor backing the form fields.
//!
//! A lightweight replacement for external textarea helpers: the cursor
//! is a byte offset that always sits on a grapheme boundary, so moves
//! and deletions never split a combining sequence.

use unicode_segmentation::UnicodeSegmentation;

#[derive(Debug, Clone, Default)]
pub struct LineEditor {
    text: String,
    /// Byte offset of the cursor within `text`, on a grapheme boundary.
    cursor: usize,
}

impl LineEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an editor with the cursor parked at the end.
    pub fn with_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.len();
        Self { text, cursor }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn insert_char(&mut self, c: char) {
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn insert_str(&mut self, s: &str) {
        self.text.insert_str(self.cursor, s);
        self.cursor += s.len();
    }

    /// Deletes the grapheme before the cursor.
    /// Returns true if anything was removed.
    pub fn backspace(&mut self) -> bool {
        let Some(start) = self.prev_boundary() else {
            return false;
        };
        self.text.replace_range(start..self.cursor, "");
        self.cursor = start;
        true
    }

    /// Deletes the grapheme under the cursor.
    /// Returns true if anything was removed.
    pub fn delete(&mut self) -> bool {
        let Some(end) = self.next_boundary() else {
            return false;
        };
        self.text.replace_range(self.cursor..end, "");
        true
    }

    pub fn move_left(&mut self) {
        if let Some(start) = self.prev_boundary() {
            self.cursor = start;
        }
    }

    pub fn move_right(&mut self) {
        if let Some(end) = self.next_boundary() {
            self.cursor = end;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.text.len();
    }

    /// Splits the text at the cursor for rendering.
    pub fn split_at_cursor(&self) -> (&str, &str) {
        self.text.split_at(self.cursor)
    }

    /// Start of the grapheme before the cursor, if any.
    fn prev_boundary(&self) -> Option<usize> {
        self.text[..self.cursor]
            .grapheme_indices(true)
            .last()
            .map(|(i, _)| i)
    }

    /// End of the grapheme under the cursor, if any.
    fn next_boundary(&self) -> Option<usize> {
        self.text[self.cursor..]
            .graphemes(true)
            .next()
            .map(|g| self.cursor + g.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_text() {
        let mut editor = LineEditor::new();
        editor.insert_char('a');
        editor.insert_char('b');
        editor.insert_str("cd");
        assert_eq!(editor.text(), "abcd");
        assert_eq!(editor.split_at_cursor(), ("abcd", ""));
    }

    #[test]
    fn test_insert_mid_line() {
        let mut editor = LineEditor::with_text("ad");
        editor.move_left();
        editor.insert_str("bc");
        assert_eq!(editor.text(), "abcd");
    }

    #[test]
    fn test_backspace_at_start_is_noop() {
        let mut editor = LineEditor::with_text("ab");
        editor.move_home();
        assert!(!editor.backspace());
        assert_eq!(editor.text(), "ab");
    }

    #[test]
    fn test_delete_under_cursor() {
        let mut editor = LineEditor::with_text("abc");
        editor.move_home();
        assert!(editor.delete());
        assert_eq!(editor.text(), "bc");

        editor.move_end();
        assert!(!editor.delete());
    }

    /// A combining sequence is one grapheme: backspace removes all of it.
    #[test]
    fn test_backspace_removes_whole_grapheme() {
        let mut editor = LineEditor::with_text("ae\u{301}"); // "aé"
        assert!(editor.backspace());
        assert_eq!(editor.text(), "a");
    }

    #[test]
    fn test_moves_clamp_at_ends() {
        let mut editor = LineEditor::with_text("ab");
        editor.move_right();
        assert_eq!(editor.split_at_cursor(), ("ab", ""));
        editor.move_home();
        editor.move_left();
        assert_eq!(editor.split_at_cursor(), ("", "ab"));
    }

    #[test]
    fn test_split_at_cursor() {
        let mut editor = LineEditor::with_text("abcd");
        editor.move_left();
        assert_eq!(editor.split_at_cursor(), ("abc", "d"));
        editor.move_home();
        assert_eq!(editor.split_at_cursor(), ("", "abcd"));
    }
}
