//! Chat input buffer and cursor management

/// Multi-line text being composed in the chat input box
#[derive(Debug, Default, Clone)]
pub struct InputState {
    /// Text typed so far
    pub buffer: String,

    /// Cursor position within `buffer` (byte offset)
    pub cursor: usize,
}

impl InputState {
    /// Create an empty input
    #[must_use]
    pub const fn new() -> Self {
        Self {
            buffer: String::new(),
            cursor: 0,
        }
    }

    /// Clear the buffer and reset the cursor
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
    }

    /// Replace the buffer and move the cursor to the end
    pub fn set(&mut self, content: impl Into<String>) {
        self.buffer = content.into();
        self.cursor = self.buffer.len();
    }

    /// Insert a character at the cursor
    pub fn insert_char(&mut self, c: char) {
        self.buffer.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Insert a line break at the cursor
    pub fn insert_newline(&mut self) {
        self.insert_char('\n');
    }

    /// Delete the character before the cursor
    pub fn backspace(&mut self) {
        if let Some((prev, _)) = self.buffer[..self.cursor].char_indices().next_back() {
            self.buffer.remove(prev);
            self.cursor = prev;
        }
    }

    /// Delete the character at the cursor
    pub fn delete(&mut self) {
        if self.cursor < self.buffer.len() {
            self.buffer.remove(self.cursor);
        }
    }

    /// Delete the word before the cursor, along with any whitespace after it
    pub fn delete_word(&mut self) {
        let before = &self.buffer[..self.cursor];
        let trimmed = before.trim_end();
        let start = trimmed
            .char_indices()
            .rev()
            .find(|(_, c)| c.is_whitespace())
            .map_or(0, |(i, c)| i + c.len_utf8());
        self.buffer.drain(start..self.cursor);
        self.cursor = start;
    }

    /// Move the cursor left by one character
    pub fn cursor_left(&mut self) {
        self.cursor = self.buffer[..self.cursor]
            .char_indices()
            .next_back()
            .map_or(0, |(i, _)| i);
    }

    /// Move the cursor right by one character
    pub fn cursor_right(&mut self) {
        if let Some(c) = self.buffer[self.cursor..].chars().next() {
            self.cursor += c.len_utf8();
        }
    }

    /// Move the cursor to the start of the current line
    pub fn cursor_home(&mut self) {
        self.cursor = self.line_start(self.cursor);
    }

    /// Move the cursor to the end of the current line
    pub fn cursor_end(&mut self) {
        let rest = &self.buffer[self.cursor..];
        self.cursor += rest.find('\n').unwrap_or(rest.len());
    }

    /// Move the cursor up one line, keeping the column where possible
    pub fn cursor_up(&mut self) {
        let start = self.line_start(self.cursor);
        if start == 0 {
            return;
        }
        let column = self.buffer[start..self.cursor].chars().count();
        let prev_start = self.line_start(start - 1);
        self.cursor = self.offset_in_line(prev_start, column);
    }

    /// Move the cursor down one line, keeping the column where possible
    pub fn cursor_down(&mut self) {
        let start = self.line_start(self.cursor);
        let column = self.buffer[start..self.cursor].chars().count();
        if let Some(newline) = self.buffer[self.cursor..].find('\n') {
            let next_start = self.cursor + newline + 1;
            self.cursor = self.offset_in_line(next_start, column);
        }
    }

    /// Line index and character column of the cursor
    #[must_use]
    pub fn cursor_position(&self) -> (usize, usize) {
        let before = &self.buffer[..self.cursor];
        let line = before.matches('\n').count();
        let start = self.line_start(self.cursor);
        (line, self.buffer[start..self.cursor].chars().count())
    }

    /// Number of lines in the buffer (at least one)
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.buffer.matches('\n').count() + 1
    }

    /// The buffer with surrounding whitespace removed
    #[must_use]
    pub fn trimmed(&self) -> &str {
        self.buffer.trim()
    }

    /// Whether the buffer holds only whitespace
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.trimmed().is_empty()
    }

    fn line_start(&self, offset: usize) -> usize {
        self.buffer[..offset].rfind('\n').map_or(0, |i| i + 1)
    }

    fn offset_in_line(&self, line_start: usize, column: usize) -> usize {
        let line = &self.buffer[line_start..];
        let line_end = line.find('\n').unwrap_or(line.len());
        line[..line_end]
            .char_indices()
            .nth(column)
            .map_or(line_start + line_end, |(i, _)| line_start + i)
    }
}
