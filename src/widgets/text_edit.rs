use unicode_width::UnicodeWidthChar;

/// Single-line edit buffer with a char-indexed cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBuffer {
    value: String,
    cursor: usize,
}

impl TextBuffer {
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        let cursor = char_count(&value);
        Self { value, cursor }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        clamp_cursor(self.cursor, &self.value)
    }

    pub fn len(&self) -> usize {
        char_count(&self.value)
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Replaces the content and parks the cursor at the end.
    pub fn set(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = char_count(&self.value);
    }

    pub fn insert_char(&mut self, ch: char) {
        let pos = self.cursor();
        let byte_pos = byte_index_at_char(&self.value, pos);
        self.value.insert(byte_pos, ch);
        self.cursor = pos + 1;
    }

    pub fn backspace(&mut self) -> bool {
        let pos = self.cursor();
        if pos == 0 {
            return false;
        }
        let byte_pos = byte_index_at_char(&self.value, pos - 1);
        self.value.remove(byte_pos);
        self.cursor = pos - 1;
        true
    }

    pub fn delete(&mut self) -> bool {
        let pos = self.cursor();
        if pos >= self.len() {
            return false;
        }
        let byte_pos = byte_index_at_char(&self.value, pos);
        self.value.remove(byte_pos);
        true
    }

    pub fn move_left(&mut self) -> bool {
        let pos = self.cursor();
        if pos == 0 {
            return false;
        }
        self.cursor = pos - 1;
        true
    }

    pub fn move_right(&mut self) -> bool {
        let pos = self.cursor();
        if pos >= self.len() {
            return false;
        }
        self.cursor = pos + 1;
        true
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.len();
    }

    pub fn delete_word_left(&mut self) -> bool {
        let mut chars: Vec<char> = self.value.chars().collect();
        let pos = self.cursor().min(chars.len());

        let mut start = pos;
        while start > 0 && is_separator(chars[start - 1]) {
            start -= 1;
        }
        while start > 0 && !is_separator(chars[start - 1]) {
            start -= 1;
        }
        if start == pos {
            return false;
        }

        chars.drain(start..pos);
        self.value = chars.into_iter().collect();
        self.cursor = start;
        true
    }

    pub fn delete_word_right(&mut self) -> bool {
        let mut chars: Vec<char> = self.value.chars().collect();
        let pos = self.cursor().min(chars.len());

        let mut end = pos;
        while end < chars.len() && is_separator(chars[end]) {
            end += 1;
        }
        while end < chars.len() && !is_separator(chars[end]) {
            end += 1;
        }
        if end == pos {
            return false;
        }

        chars.drain(pos..end);
        self.value = chars.into_iter().collect();
        self.cursor = pos;
        true
    }

    /// Display column of the cursor.
    pub fn cursor_col(&self) -> u16 {
        self.value
            .chars()
            .take(self.cursor())
            .map(|ch| UnicodeWidthChar::width(ch).unwrap_or(0))
            .sum::<usize>() as u16
    }
}

pub fn char_count(value: &str) -> usize {
    value.chars().count()
}

fn clamp_cursor(cursor: usize, value: &str) -> usize {
    cursor.min(char_count(value))
}

fn is_separator(ch: char) -> bool {
    ch.is_whitespace() || matches!(ch, '.' | '/' | ',' | '-' | '@' | '_' | ':')
}

fn byte_index_at_char(value: &str, char_idx: usize) -> usize {
    value
        .char_indices()
        .nth(char_idx)
        .map(|(idx, _)| idx)
        .unwrap_or(value.len())
}

#[cfg(test)]
mod tests {
    use super::TextBuffer;

    #[test]
    fn edits_respect_multibyte_chars() {
        let mut buffer = TextBuffer::new("zażółć");
        buffer.move_left();
        buffer.backspace();
        buffer.insert_char('l');
        assert_eq!(buffer.as_str(), "zażólć");
        assert_eq!(buffer.cursor(), 5);
    }

    #[test]
    fn word_deletion_stops_at_separators() {
        let mut buffer = TextBuffer::new("alice@example.com");
        assert!(buffer.delete_word_left());
        assert_eq!(buffer.as_str(), "alice@example.");
        buffer.move_home();
        assert!(buffer.delete_word_right());
        assert_eq!(buffer.as_str(), "@example.");
    }

    #[test]
    fn delete_at_end_is_a_no_op() {
        let mut buffer = TextBuffer::new("ab");
        assert!(!buffer.delete());
        buffer.move_home();
        assert!(buffer.delete());
        assert_eq!(buffer.as_str(), "b");
        assert_eq!(buffer.cursor(), 0);
    }
}
