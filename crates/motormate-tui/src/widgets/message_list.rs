//! Message list widget for displaying the conversation

use crate::theme::Theme;
use crate::widgets::markdown::render_markdown;
use crate::widgets::spinner::frame_at;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use std::time::Duration;

/// Who a message is from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Bot,
    Error,
    /// Reply not in yet
    Thinking,
    /// Local output (command results), never part of the conversation
    Notice,
}

/// A single message in the chat
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// Lay out `messages` as display lines for a column `width` cells wide.
///
/// `thinking_elapsed` picks the spinner frame for a [`Role::Thinking`] entry.
pub fn message_lines(
    messages: &[ChatMessage],
    theme: &Theme,
    width: usize,
    thinking_elapsed: Duration,
) -> Vec<Line<'static>> {
    let content_width = width.saturating_sub(2).max(1);
    let mut lines = Vec::new();

    for msg in messages {
        match msg.role {
            Role::User => lines.push(Line::from(Span::styled("▶ You", theme.user_header()))),
            Role::Bot | Role::Thinking => {
                lines.push(Line::from(Span::styled("◀ Bot", theme.bot_header())))
            }
            Role::Error | Role::Notice => {}
        }

        match msg.role {
            Role::Bot => {
                for line in render_markdown(&msg.content, theme, content_width) {
                    let mut spans = vec![Span::raw("  ")];
                    spans.extend(line.spans);
                    lines.push(Line::from(spans));
                }
            }
            Role::Thinking => {
                lines.push(Line::from(Span::styled(
                    format!("  {} {}", frame_at(thinking_elapsed), msg.content),
                    theme.pending_style(),
                )));
            }
            Role::User | Role::Error | Role::Notice => {
                let (style, prefix) = match msg.role {
                    Role::Error => (theme.error_style(), "✖ "),
                    Role::Notice => (theme.dim_style(), "● "),
                    _ => (theme.base_style(), "  "),
                };
                for (i, line) in textwrap::wrap(&msg.content, content_width)
                    .into_iter()
                    .enumerate()
                {
                    let lead = if i == 0 { prefix } else { "  " };
                    lines.push(Line::from(Span::styled(format!("{}{}", lead, line), style)));
                }
            }
        }

        // Empty line between messages
        lines.push(Line::from(""));
    }

    lines
}

/// Total height of `messages` at `width`, matching what [`MessageList`] draws
pub fn calculate_message_height(messages: &[ChatMessage], width: usize) -> usize {
    message_lines(messages, &Theme::dark(), width, Duration::ZERO).len()
}

/// Widget for displaying a list of chat messages
pub struct MessageList<'a> {
    messages: &'a [ChatMessage],
    theme: &'a Theme,
    scroll: usize,
    thinking_elapsed: Duration,
}

impl<'a> MessageList<'a> {
    pub fn new(messages: &'a [ChatMessage], theme: &'a Theme) -> Self {
        Self {
            messages,
            theme,
            scroll: 0,
            thinking_elapsed: Duration::ZERO,
        }
    }

    /// Set scroll offset (in lines)
    pub fn scroll(mut self, scroll: usize) -> Self {
        self.scroll = scroll;
        self
    }

    /// Time since the outstanding request started, for the spinner
    pub fn thinking_elapsed(mut self, elapsed: Duration) -> Self {
        self.thinking_elapsed = elapsed;
        self
    }
}

impl Widget for MessageList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let visible: Vec<Line> = message_lines(
            self.messages,
            self.theme,
            area.width as usize,
            self.thinking_elapsed,
        )
        .into_iter()
        .skip(self.scroll)
        .take(area.height as usize)
        .collect();

        Paragraph::new(visible).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(lines: &[Line]) -> Vec<String> {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn test_user_and_bot_layout() {
        let messages = vec![
            ChatMessage::new(Role::User, "Is a Prius reliable?"),
            ChatMessage::new(Role::Bot, "Very."),
        ];
        let lines = message_lines(&messages, &Theme::dark(), 40, Duration::ZERO);
        assert_eq!(
            texts(&lines),
            vec!["▶ You", "  Is a Prius reliable?", "", "◀ Bot", "  Very.", ""]
        );
    }

    #[test]
    fn test_error_has_no_header() {
        let messages = vec![ChatMessage::new(Role::Error, "Sorry")];
        let lines = message_lines(&messages, &Theme::dark(), 40, Duration::ZERO);
        assert_eq!(texts(&lines), vec!["✖ Sorry", ""]);
    }

    #[test]
    fn test_notice_keeps_line_breaks() {
        let messages = vec![ChatMessage::new(Role::Notice, "first\nsecond")];
        let lines = message_lines(&messages, &Theme::dark(), 40, Duration::ZERO);
        assert_eq!(texts(&lines), vec!["● first", "  second", ""]);
    }

    #[test]
    fn test_thinking_shows_spinner() {
        let messages = vec![ChatMessage::new(Role::Thinking, "Thinking...")];
        let lines = message_lines(&messages, &Theme::dark(), 40, Duration::ZERO);
        assert_eq!(texts(&lines)[1], "  ⠋ Thinking...");
    }

    #[test]
    fn test_height_matches_lines() {
        let messages = vec![
            ChatMessage::new(Role::User, "word ".repeat(30)),
            ChatMessage::new(Role::Bot, "- one\n- two\n\nsome *more* text"),
        ];
        let lines = message_lines(&messages, &Theme::dark(), 20, Duration::ZERO);
        assert_eq!(calculate_message_height(&messages, 20), lines.len());
        assert!(lines.iter().all(|l| l.width() <= 20));
    }
}
