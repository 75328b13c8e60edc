/// Tallest the input box grows, in rows, before it stops expanding.
pub const MAX_INPUT_HEIGHT: u16 = 6;

/// Convert a character index to a byte index for UTF-8 safe string operations
fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

/// Multi-line chat input with a character cursor and auto-grow height.
#[derive(Debug, Clone)]
pub struct ChatInput {
    text: String,
    cursor: usize,
    height: u16,
}

impl Default for ChatInput {
    fn default() -> Self {
        Self {
            text: String::new(),
            cursor: 0,
            height: 1,
        }
    }
}

impl ChatInput {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn insert_char(&mut self, c: char) {
        let byte_pos = char_to_byte_index(&self.text, self.cursor);
        self.text.insert(byte_pos, c);
        self.cursor += 1;
    }

    pub fn insert_str(&mut self, s: &str) {
        for c in s.chars() {
            self.insert_char(c);
        }
    }

    pub fn insert_newline(&mut self) {
        self.insert_char('\n');
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let byte_pos = char_to_byte_index(&self.text, self.cursor);
            self.text.remove(byte_pos);
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.text.chars().count() {
            let byte_pos = char_to_byte_index(&self.text, self.cursor);
            self.text.remove(byte_pos);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.text.chars().count());
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.text.chars().count();
    }

    /// Empty the field and shrink it back to a single row.
    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
        self.height = 1;
    }

    /// Grow to fit the wrapped content at `width` columns, capped at
    /// [`MAX_INPUT_HEIGHT`].
    pub fn auto_resize(&mut self, width: u16) {
        let width = width.max(1) as usize;
        let rows: usize = self
            .text
            .split('\n')
            .map(|line| line.chars().count().div_ceil(width).max(1))
            .sum();
        self.height = (rows.min(MAX_INPUT_HEIGHT as usize) as u16).max(1);
    }

    /// Row and column of the cursor within the unwrapped text.
    pub fn cursor_position(&self) -> (u16, u16) {
        let before: String = self.text.chars().take(self.cursor).collect();
        let row = before.matches('\n').count();
        let col = before.rsplit('\n').next().map(|l| l.chars().count()).unwrap_or(0);
        (row as u16, col as u16)
    }
}
