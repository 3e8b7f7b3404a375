/// Single-line edit buffer for the prompt. The cursor is a char index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineEditor {
    text: String,
    cursor: usize,
}

impl LineEditor {
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_index)
            .map_or(self.text.len(), |(i, _)| i)
    }

    fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn insert(&mut self, ch: char) {
        let at = self.byte_index(self.cursor);
        self.text.insert(at, ch);
        self.cursor += 1;
    }

    /// Delete the char before the cursor. Returns false if there was none.
    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        let at = self.byte_index(self.cursor);
        self.text.remove(at);
        true
    }

    /// Delete the char under the cursor
    pub fn delete(&mut self) {
        if self.cursor < self.char_len() {
            let at = self.byte_index(self.cursor);
            self.text.remove(at);
        }
    }

    pub const fn left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.char_len());
    }

    pub const fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.char_len();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Replace the whole line and put the cursor at its end
    pub fn set(&mut self, text: &str) {
        self.text = text.to_string();
        self.end();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_move() {
        // Arrange
        let mut line = LineEditor::default();

        // Act
        for ch in "acd".chars() {
            line.insert(ch);
        }
        line.left();
        line.left();
        line.insert('b');

        // Assert
        assert_eq!(line.text(), "abcd");
        assert_eq!(line.cursor(), 2);
    }

    #[test]
    fn test_backspace_and_delete() {
        let mut line = LineEditor::default();
        line.set("héllo");

        assert!(line.backspace());
        assert_eq!(line.text(), "héll");

        line.home();
        line.right();
        line.delete();
        assert_eq!(line.text(), "hll");

        line.home();
        assert!(!line.backspace());
    }

    #[test]
    fn test_clear() {
        let mut line = LineEditor::default();
        line.set("1234");
        line.clear();
        assert!(line.is_empty());
        assert_eq!(line.cursor(), 0);
    }
}
