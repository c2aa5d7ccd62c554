use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Single-line text field with a character-indexed cursor
#[derive(Debug, Default, Clone)]
pub struct InputState {
    pub value: String,
    pub cursor: usize,
    /// Replace every character with a bullet when displayed
    pub masked: bool,
}

impl InputState {
    pub fn masked() -> Self {
        Self {
            masked: true,
            ..Self::default()
        }
    }

    pub fn set(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = self.value.chars().count();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    fn byte_index(&self, char_idx: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_idx)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    pub fn insert(&mut self, c: char) {
        let idx = self.byte_index(self.cursor);
        self.value.insert(idx, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            let idx = self.byte_index(self.cursor - 1);
            self.value.remove(idx);
            self.cursor -= 1;
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.value.chars().count() {
            let idx = self.byte_index(self.cursor);
            self.value.remove(idx);
        }
    }

    fn word_start_before(&self, from: usize) -> usize {
        let chars: Vec<char> = self.value.chars().collect();
        let mut idx = from.min(chars.len());
        while idx > 0 && chars[idx - 1].is_whitespace() {
            idx -= 1;
        }
        while idx > 0 && !chars[idx - 1].is_whitespace() {
            idx -= 1;
        }
        idx
    }

    pub fn backspace_word(&mut self) {
        let start = self.word_start_before(self.cursor);
        let (from, to) = (self.byte_index(start), self.byte_index(self.cursor));
        self.value.replace_range(from..to, "");
        self.cursor = start;
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.value.chars().count() {
            self.cursor += 1;
        }
    }

    pub fn move_word_left(&mut self) {
        self.cursor = self.word_start_before(self.cursor);
    }

    pub fn move_word_right(&mut self) {
        let chars: Vec<char> = self.value.chars().collect();
        let mut idx = self.cursor;
        while idx < chars.len() && !chars[idx].is_whitespace() {
            idx += 1;
        }
        while idx < chars.len() && chars[idx].is_whitespace() {
            idx += 1;
        }
        self.cursor = idx;
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.value.chars().count();
    }

    /// Handle common editing keys. Returns true if the value changed.
    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        let word = key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);
        let before = self.value.len();

        match key.code {
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.insert(c);
                return true;
            }
            KeyCode::Backspace if word => self.backspace_word(),
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left if word => self.move_word_left(),
            KeyCode::Left => self.move_left(),
            KeyCode::Right if word => self.move_word_right(),
            KeyCode::Right => self.move_right(),
            KeyCode::Home => self.move_home(),
            KeyCode::End => self.move_end(),
            _ => {}
        }

        self.value.len() != before
    }

    /// Text to draw in a field `width` cells wide and the cursor column in it.
    /// Scrolls so the cursor stays visible.
    pub fn visible_window(&self, width: usize) -> (String, usize) {
        let display: Vec<char> = if self.masked {
            self.value.chars().map(|_| '•').collect()
        } else {
            self.value.chars().collect()
        };

        if width == 0 {
            return (String::new(), 0);
        }
        if display.len() < width {
            return (display.into_iter().collect(), self.cursor);
        }
        if self.cursor >= width {
            let skip = self.cursor - width + 1;
            let text = display.iter().skip(skip).take(width).collect();
            (text, width - 1)
        } else {
            (display.iter().take(width).collect(), self.cursor)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn inserts_multibyte_characters_at_cursor() {
        let mut input = InputState::default();
        input.set("cafe");
        input.move_left();
        input.backspace();
        input.insert('é');
        assert_eq!(input.value, "caée");
        assert_eq!(input.cursor, 3);
    }

    #[test]
    fn ctrl_backspace_removes_previous_word() {
        let mut input = InputState::default();
        input.set("hello big world");
        let changed = input.handle_key(&KeyEvent::new(KeyCode::Backspace, KeyModifiers::CONTROL));
        assert!(changed);
        assert_eq!(input.value, "hello big ");
        assert_eq!(input.cursor, 10);
    }

    #[test]
    fn cursor_movement_does_not_report_change() {
        let mut input = InputState::default();
        input.set("abc");
        assert!(!input.handle_key(&key(KeyCode::Home)));
        assert_eq!(input.cursor, 0);
        assert!(!input.handle_key(&key(KeyCode::Left)));
        assert!(input.handle_key(&key(KeyCode::Delete)));
        assert_eq!(input.value, "bc");
    }

    #[test]
    fn word_motion_skips_whitespace() {
        let mut input = InputState::default();
        input.set("one two  three");
        input.move_home();
        input.move_word_right();
        assert_eq!(input.cursor, 4);
        input.move_end();
        input.move_word_left();
        assert_eq!(input.cursor, 9);
    }

    #[test]
    fn masked_window_hides_characters() {
        let mut input = InputState::masked();
        input.set("secret");
        assert_eq!(input.visible_window(10), ("••••••".to_string(), 6));
    }

    #[test]
    fn long_values_scroll_with_cursor() {
        let mut input = InputState::default();
        input.set("abcdefghij");
        // cursor sits past the end, so the last cell is left for it
        assert_eq!(input.visible_window(4), ("hij".to_string(), 3));
        input.move_home();
        assert_eq!(input.visible_window(4), ("abcd".to_string(), 0));
    }
}
