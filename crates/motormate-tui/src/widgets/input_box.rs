//! Text input widget

use crate::input::Action;
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Paragraph, Widget},
};
use unicode_width::UnicodeWidthChar;

/// Drawn in place of a line break so the box stays one row high
const NEWLINE_GLYPH: char = '↵';

fn display_width(c: char) -> usize {
    if c == '\n' {
        NEWLINE_GLYPH.width().unwrap_or(1)
    } else {
        c.width().unwrap_or(0)
    }
}

/// One-row message editor. Line breaks are kept in the content and shown as `↵`.
#[derive(Debug, Default)]
pub struct InputBox {
    /// Current input text
    content: String,
    /// Cursor position (character index, not byte index)
    cursor: usize,
    /// Horizontal scroll offset (in display width)
    scroll: usize,
    /// Placeholder text
    placeholder: String,
    /// Placeholder while disabled
    disabled_placeholder: String,
    /// Whether the input is focused
    focused: bool,
    /// Disabled boxes ignore every editing action
    disabled: bool,
}

impl InputBox {
    /// Create a new input box
    pub fn new() -> Self {
        Self::default()
    }

    /// Set placeholder text
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Set the text shown while disabled
    pub fn with_disabled_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.disabled_placeholder = placeholder.into();
        self
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Get the current content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Clear the content
    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor = 0;
        self.scroll = 0;
    }

    fn byte_offset(&self, char_index: usize) -> usize {
        self.content
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.content.len())
    }

    fn cursor_display_width(&self) -> usize {
        self.content
            .chars()
            .take(self.cursor)
            .map(display_width)
            .sum()
    }

    /// Remove `count` chars starting at char index `start`
    fn remove_chars(&mut self, start: usize, count: usize) {
        let from = self.byte_offset(start);
        let to = self.byte_offset(start + count);
        self.content.drain(from..to);
    }

    /// Handle an editing action. Returns true if anything changed.
    pub fn handle_action(&mut self, action: &Action, width: u16) -> bool {
        if self.disabled {
            return false;
        }

        let char_count = self.content.chars().count();
        let changed = match action {
            Action::Char(c) => {
                self.insert_char(*c);
                true
            }
            Action::Newline => {
                self.insert_char('\n');
                true
            }
            Action::Backspace if self.cursor > 0 => {
                self.cursor -= 1;
                self.remove_chars(self.cursor, 1);
                true
            }
            Action::Delete if self.cursor < char_count => {
                self.remove_chars(self.cursor, 1);
                true
            }
            Action::Left if self.cursor > 0 => {
                self.cursor -= 1;
                true
            }
            Action::Right if self.cursor < char_count => {
                self.cursor += 1;
                true
            }
            Action::Home => {
                self.cursor = 0;
                true
            }
            Action::End => {
                self.cursor = char_count;
                true
            }
            Action::ClearLine => {
                self.clear();
                true
            }
            Action::DeleteWord => {
                let chars: Vec<char> = self.content.chars().collect();
                let mut start = self.cursor;
                while start > 0 && chars[start - 1].is_whitespace() {
                    start -= 1;
                }
                while start > 0 && !chars[start - 1].is_whitespace() {
                    start -= 1;
                }
                let removed = self.cursor - start;
                self.remove_chars(start, removed);
                self.cursor = start;
                removed > 0
            }
            Action::Paste(text) => {
                for c in text.chars() {
                    // Pasted line breaks become spaces; only Shift+Enter adds breaks
                    if c == '\n' || c == '\r' {
                        if !self.content.ends_with(' ') && self.cursor > 0 {
                            self.insert_char(' ');
                        }
                    } else {
                        self.insert_char(c);
                    }
                }
                true
            }
            _ => false,
        };

        if changed {
            self.update_scroll(width as usize);
        }
        changed
    }

    fn insert_char(&mut self, c: char) {
        let byte_offset = self.byte_offset(self.cursor);
        self.content.insert(byte_offset, c);
        self.cursor += 1;
    }

    fn update_scroll(&mut self, width: usize) {
        let visible_width = width.saturating_sub(4); // borders and padding
        let cursor_pos = self.cursor_display_width();

        if cursor_pos < self.scroll {
            self.scroll = cursor_pos;
        } else if cursor_pos >= self.scroll + visible_width {
            self.scroll = cursor_pos - visible_width + 1;
        }
    }

    fn visible_text(&self, visible_width: usize) -> String {
        let mut skipped = 0;
        let mut used = 0;
        let mut visible = String::new();

        for c in self.content.chars() {
            let w = display_width(c);
            if skipped < self.scroll {
                skipped += w;
                continue;
            }
            if used + w > visible_width {
                break;
            }
            visible.push(if c == '\n' { NEWLINE_GLYPH } else { c });
            used += w;
        }
        visible
    }

    /// Render the input box
    pub fn render(&self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        let border_style = if self.focused && !self.disabled {
            theme.accent_style()
        } else {
            theme.border_style()
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style);

        let inner = block.inner(area);
        block.render(area, buf);

        let (text, style) = if self.disabled && self.content.is_empty() {
            (self.disabled_placeholder.clone(), theme.dim_style())
        } else if self.content.is_empty() {
            (self.placeholder.clone(), theme.dim_style())
        } else if self.disabled {
            (self.visible_text(inner.width as usize), theme.dim_style())
        } else {
            (self.visible_text(inner.width as usize), theme.base_style())
        };

        Paragraph::new(text).style(style).render(inner, buf);

        if self.focused && !self.disabled && inner.width > 0 {
            let cursor_x = self.cursor_display_width().saturating_sub(self.scroll);
            if cursor_x < inner.width as usize {
                let x = inner.x + cursor_x as u16;
                if let Some(cell) = buf.cell_mut((x, inner.y)) {
                    cell.set_style(Style::default().bg(theme.accent));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(text: &str) -> InputBox {
        let mut input = InputBox::new();
        for c in text.chars() {
            input.handle_action(&Action::Char(c), 80);
        }
        input
    }

    #[test]
    fn test_typing_and_backspace() {
        let mut input = typed("sedan");
        assert_eq!(input.content(), "sedan");
        input.handle_action(&Action::Backspace, 80);
        assert_eq!(input.content(), "seda");
    }

    #[test]
    fn test_newline_inserted_not_submitted() {
        let mut input = typed("line one");
        assert!(input.handle_action(&Action::Newline, 80));
        input.handle_action(&Action::Char('x'), 80);
        assert_eq!(input.content(), "line one\nx");
    }

    #[test]
    fn test_disabled_ignores_edits() {
        let mut input = typed("abc");
        input.set_disabled(true);
        assert!(!input.handle_action(&Action::Char('d'), 80));
        assert!(!input.handle_action(&Action::ClearLine, 80));
        assert_eq!(input.content(), "abc");

        input.set_disabled(false);
        assert!(input.handle_action(&Action::Char('d'), 80));
        assert_eq!(input.content(), "abcd");
    }

    #[test]
    fn test_delete_word_multibyte() {
        let mut input = typed("café crème");
        input.handle_action(&Action::DeleteWord, 80);
        assert_eq!(input.content(), "café ");
    }

    #[test]
    fn test_paste_flattens_newlines() {
        let mut input = InputBox::new();
        input.handle_action(&Action::Paste("a\r\nb".into()), 80);
        assert_eq!(input.content(), "a b");
    }

    #[test]
    fn test_visible_text_shows_newline_glyph() {
        let mut input = typed("a");
        input.handle_action(&Action::Newline, 80);
        input.handle_action(&Action::Char('b'), 80);
        assert_eq!(input.visible_text(10), "a↵b");
    }
}
