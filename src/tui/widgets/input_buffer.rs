//! Single-field edit buffer for the wizard's text steps.
//!
//! The cursor is a character index, never a byte offset, so multi-byte input
//! cannot split a code point. An optional limit caps the character count;
//! typing past it is refused and pastes are cut to fit.

#[derive(Debug, Default)]
pub struct InputBuffer {
    content: String,
    /// Character index, `0..=char_count()`.
    cursor: usize,
    limit: Option<usize>,
}

impl InputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(max: usize) -> Self {
        Self {
            limit: Some(max),
            ..Self::default()
        }
    }

    /// Change the cap. Content already over the new cap is cut.
    pub fn set_limit(&mut self, limit: Option<usize>) {
        self.limit = limit;
        self.enforce_limit();
    }

    pub fn char_count(&self) -> usize {
        self.content.chars().count()
    }

    fn room(&self) -> usize {
        self.limit
            .map_or(usize::MAX, |max| max.saturating_sub(self.char_count()))
    }

    fn byte_offset(&self, char_idx: usize) -> usize {
        self.content
            .char_indices()
            .nth(char_idx)
            .map_or(self.content.len(), |(i, _)| i)
    }

    fn enforce_limit(&mut self) {
        if let Some(max) = self.limit {
            let end = self.byte_offset(max);
            self.content.truncate(end);
            self.cursor = self.cursor.min(self.char_count());
        }
    }

    /// Returns false when the limit is reached.
    pub fn insert_char(&mut self, c: char) -> bool {
        if self.room() == 0 {
            return false;
        }
        let at = self.byte_offset(self.cursor);
        self.content.insert(at, c);
        self.cursor += 1;
        true
    }

    /// Insert pasted text, dropping `\r` and whatever does not fit.
    pub fn insert_str(&mut self, s: &str) {
        let fitted: String = s.chars().filter(|&c| c != '\r').take(self.room()).collect();
        let at = self.byte_offset(self.cursor);
        self.content.insert_str(at, &fitted);
        self.cursor += fitted.chars().count();
    }

    /// Replace everything; the cursor lands at the end.
    pub fn set_text(&mut self, s: &str) {
        self.content = s.to_owned();
        self.enforce_limit();
        self.cursor = self.char_count();
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let at = self.byte_offset(self.cursor);
        self.content.remove(at);
    }

    pub fn delete(&mut self) {
        if self.cursor < self.char_count() {
            let at = self.byte_offset(self.cursor);
            self.content.remove(at);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.char_count());
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.char_count();
    }

    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor = 0;
    }

    /// Blank or whitespace only.
    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty()
    }

    pub fn text(&self) -> &str {
        &self.content
    }

    pub fn cursor_position(&self) -> usize {
        self.cursor
    }

    /// Text before and after the cursor.
    pub fn split_at_cursor(&self) -> (&str, &str) {
        self.content.split_at(self.byte_offset(self.cursor))
    }
}
