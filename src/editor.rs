//! Body editor module
//!
//! A small multi-line text buffer for the JSON request body. The cursor is a
//! byte offset that is always kept on a UTF-8 character boundary.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde_json::Value;

/// A text editor for editing request bodies
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BodyEditor {
    /// The content being edited
    content: String,

    /// Cursor position (byte offset in content)
    cursor: usize,
}

impl BodyEditor {
    /// Create a new editor with initial content, cursor at the end
    pub fn with_content(content: String) -> Self {
        let cursor = content.len();
        Self { content, cursor }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    #[cfg(test)]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Clear all content
    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor = 0;
    }

    /// Replace all content and move the cursor to the end
    pub fn set_content(&mut self, content: String) {
        self.cursor = content.len();
        self.content = content;
    }

    /// Insert a character at the current cursor position
    pub fn insert_char(&mut self, c: char) {
        let cursor = self.clamp_cursor_to_boundary(self.cursor);
        self.content.insert(cursor, c);
        self.cursor = cursor + c.len_utf8();
    }

    /// Insert a line break, carrying over the current line's indentation
    pub fn insert_newline(&mut self) {
        let cursor = self.clamp_cursor_to_boundary(self.cursor);
        let line_start = self.content[..cursor].rfind('\n').map_or(0, |i| i + 1);
        let indent: String = self.content[line_start..cursor]
            .chars()
            .take_while(|c| *c == ' ')
            .collect();

        self.insert_str(&format!("\n{indent}"));
    }

    /// Insert a string at the current cursor position
    pub fn insert_str(&mut self, s: &str) {
        let cursor = self.clamp_cursor_to_boundary(self.cursor);
        self.content.insert_str(cursor, s);
        self.cursor = cursor + s.len();
    }

    /// Insert pasted text, converting curly quotes to straight ones so the
    /// result can still parse as JSON
    pub fn insert_str_normalized(&mut self, s: &str) {
        let normalized = s
            .replace(['\u{201C}', '\u{201D}'], "\"")
            .replace(['\u{2018}', '\u{2019}'], "'");

        self.insert_str(&normalized);
    }

    /// Delete the character before the cursor (backspace)
    pub fn delete_char_before_cursor(&mut self) -> bool {
        let cursor = self.clamp_cursor_to_boundary(self.cursor);
        let Some((prev, _)) = self.content[..cursor].char_indices().next_back() else {
            return false;
        };

        self.content.remove(prev);
        self.cursor = prev;
        true
    }

    /// Delete the character after the cursor (delete key)
    pub fn delete_char_after_cursor(&mut self) -> bool {
        let cursor = self.clamp_cursor_to_boundary(self.cursor);
        if cursor >= self.content.len() {
            return false;
        }

        self.content.remove(cursor);
        true
    }

    /// Move cursor to the left by one character
    pub fn move_cursor_left(&mut self) -> bool {
        let cursor = self.clamp_cursor_to_boundary(self.cursor);
        match self.content[..cursor].char_indices().next_back() {
            Some((prev, _)) => {
                self.cursor = prev;
                true
            }
            None => false,
        }
    }

    /// Move cursor to the right by one character
    pub fn move_cursor_right(&mut self) -> bool {
        let cursor = self.clamp_cursor_to_boundary(self.cursor);
        match self.content[cursor..].chars().next() {
            Some(c) => {
                self.cursor = cursor + c.len_utf8();
                true
            }
            None => false,
        }
    }

    /// Move cursor one line up, keeping the column where possible
    pub fn move_cursor_up(&mut self) -> bool {
        let (line, col) = self.cursor_line_col();
        if line == 0 {
            return false;
        }
        self.cursor = self.offset_for(line - 1, col);
        true
    }

    /// Move cursor one line down, keeping the column where possible
    pub fn move_cursor_down(&mut self) -> bool {
        let (line, col) = self.cursor_line_col();
        if line + 1 >= self.line_count() {
            return false;
        }
        self.cursor = self.offset_for(line + 1, col);
        true
    }

    pub fn move_cursor_to_start(&mut self) {
        self.cursor = 0;
    }

    pub fn move_cursor_to_end(&mut self) {
        self.cursor = self.content.len();
    }

    /// Zero-based (line, column) of the cursor, column counted in characters
    pub fn cursor_line_col(&self) -> (usize, usize) {
        let cursor = self.clamp_cursor_to_boundary(self.cursor);
        let before = &self.content[..cursor];
        let line = before.matches('\n').count();
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);
        (line, before[line_start..].chars().count())
    }

    fn line_count(&self) -> usize {
        self.content.split('\n').count()
    }

    /// Byte offset of (line, col), clamped to the end of that line
    fn offset_for(&self, line: usize, col: usize) -> usize {
        let mut start = 0;
        for (idx, text) in self.content.split('\n').enumerate() {
            if idx == line {
                let within = text
                    .char_indices()
                    .nth(col)
                    .map_or(text.len(), |(offset, _)| offset);
                return start + within;
            }
            start += text.len() + 1;
        }
        self.content.len()
    }

    /// Format content as JSON (prettify)
    /// Returns Err with the parse error if the content is not valid JSON
    pub fn format_json(&mut self) -> Result<(), String> {
        match serde_json::from_str::<Value>(&self.content) {
            Ok(json) => {
                self.content =
                    serde_json::to_string_pretty(&json).unwrap_or_else(|_| self.content.clone());
                self.cursor = self.content.len();
                Ok(())
            }
            Err(e) => Err(format!("Invalid JSON: {e}")),
        }
    }

    /// Handle an editing key - returns true if the event was handled
    pub fn handle_key_event(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Backspace => self.delete_char_before_cursor(),
            KeyCode::Delete => self.delete_char_after_cursor(),
            KeyCode::Left => self.move_cursor_left(),
            KeyCode::Right => self.move_cursor_right(),
            KeyCode::Up => self.move_cursor_up(),
            KeyCode::Down => self.move_cursor_down(),
            KeyCode::Enter => {
                self.insert_newline();
                true
            }
            KeyCode::Tab => {
                self.insert_str("  ");
                true
            }
            KeyCode::Home => {
                self.move_cursor_to_start();
                true
            }
            KeyCode::End => {
                self.move_cursor_to_end();
                true
            }
            KeyCode::Char('a') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.move_cursor_to_start();
                true
            }
            KeyCode::Char('e') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.move_cursor_to_end();
                true
            }
            KeyCode::Char('l') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.clear();
                true
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.insert_char(c);
                true
            }
            _ => false,
        }
    }

    /// Clamp cursor to valid UTF-8 character boundary
    fn clamp_cursor_to_boundary(&self, cursor: usize) -> usize {
        let mut pos = cursor.min(self.content.len());
        while pos > 0 && !self.content.is_char_boundary(pos) {
            pos -= 1;
        }
        pos
    }
}
