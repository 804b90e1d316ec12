//! Markdown rendering for bot replies

use crate::theme::Theme;
use pulldown_cmark::{Event, HeadingLevel, Parser, Tag, TagEnd};
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};
use unicode_width::UnicodeWidthStr;

/// Finish a wrapped line, dropping the space it broke at
fn push_line(lines: &mut Vec<Line<'static>>, current: &mut Vec<Span<'static>>) {
    let mut spans = std::mem::take(current);
    if let Some(last) = spans.last_mut() {
        let trimmed = last.content.trim_end().to_string();
        last.content = trimmed.into();
    }
    lines.push(Line::from(spans));
}

/// Break a run of styled spans into lines no wider than `width`.
///
/// Splits at spaces; a single word wider than `width` is split by character.
pub fn wrap_spans(spans: Vec<Span<'static>>, width: usize) -> Vec<Line<'static>> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current: Vec<Span<'static>> = Vec::new();
    let mut used = 0;

    for span in spans {
        let style = span.style;
        for word in span.content.split_inclusive(' ') {
            let mut word = word.to_string();
            let word_width = word.trim_end().width();

            if used > 0 && used + word_width > width {
                push_line(&mut lines, &mut current);
                used = 0;
                word = word.trim_start().to_string();
            }

            while word.trim_end().width() > width {
                let mut head = String::new();
                let mut head_width = 0;
                let mut split_at = word.len();
                for (i, c) in word.char_indices() {
                    let w = c.to_string().width();
                    if head_width + w > width && !head.is_empty() {
                        split_at = i;
                        break;
                    }
                    head.push(c);
                    head_width += w;
                }
                current.push(Span::styled(head, style));
                push_line(&mut lines, &mut current);
                used = 0;
                word = word[split_at..].to_string();
            }

            if !word.is_empty() {
                used += word.width();
                current.push(Span::styled(word, style));
            }
        }
    }

    if !current.is_empty() {
        push_line(&mut lines, &mut current);
    }
    lines
}

/// Convert markdown text to styled, width-wrapped lines
pub fn render_markdown(text: &str, theme: &Theme, width: usize) -> Vec<Line<'static>> {
    let mut lines: Vec<Line<'static>> = Vec::new();
    let mut pending: Vec<Span<'static>> = Vec::new();
    let mut style_stack: Vec<Style> = vec![theme.base_style()];
    let mut in_code_block = false;
    let mut code_block = String::new();
    let mut list_depth: usize = 0;

    let flush = |pending: &mut Vec<Span<'static>>, lines: &mut Vec<Line<'static>>| {
        if !pending.is_empty() {
            lines.extend(wrap_spans(std::mem::take(pending), width));
        }
    };

    for event in Parser::new(text) {
        let style = *style_stack.last().unwrap_or(&Style::default());
        match event {
            Event::Start(tag) => match tag {
                Tag::Heading { level, .. } => {
                    flush(&mut pending, &mut lines);
                    let heading = match level {
                        HeadingLevel::H1 => theme
                            .accent_style()
                            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
                        HeadingLevel::H2 => theme.accent_style().add_modifier(Modifier::BOLD),
                        _ => theme.accent_style(),
                    };
                    style_stack.push(heading);
                }
                Tag::Paragraph => flush(&mut pending, &mut lines),
                Tag::CodeBlock(_) => {
                    flush(&mut pending, &mut lines);
                    in_code_block = true;
                    code_block.clear();
                }
                Tag::List(_) => {
                    flush(&mut pending, &mut lines);
                    list_depth += 1;
                }
                Tag::Item => {
                    flush(&mut pending, &mut lines);
                    let indent = "  ".repeat(list_depth.saturating_sub(1));
                    pending.push(Span::styled(format!("{}• ", indent), theme.dim_style()));
                }
                Tag::Emphasis => style_stack.push(style.add_modifier(Modifier::ITALIC)),
                Tag::Strong => style_stack.push(style.add_modifier(Modifier::BOLD)),
                Tag::Strikethrough => style_stack.push(style.add_modifier(Modifier::CROSSED_OUT)),
                Tag::Link { .. } => style_stack.push(Style::default().fg(theme.link)),
                _ => {}
            },
            Event::End(tag_end) => match tag_end {
                TagEnd::Heading(_) => {
                    flush(&mut pending, &mut lines);
                    style_stack.pop();
                }
                TagEnd::Paragraph => {
                    flush(&mut pending, &mut lines);
                    lines.push(Line::from(""));
                }
                TagEnd::CodeBlock => {
                    in_code_block = false;
                    let code_style = theme.code_style().add_modifier(Modifier::DIM);
                    let max = width.saturating_sub(4);
                    for code_line in code_block.lines() {
                        let display = if code_line.chars().count() > max {
                            let cut: String =
                                code_line.chars().take(max.saturating_sub(1)).collect();
                            format!("  {}…", cut)
                        } else {
                            format!("  {}", code_line)
                        };
                        lines.push(Line::from(Span::styled(display, code_style)));
                    }
                    lines.push(Line::from(""));
                }
                TagEnd::List(_) => {
                    flush(&mut pending, &mut lines);
                    list_depth = list_depth.saturating_sub(1);
                    if list_depth == 0 {
                        lines.push(Line::from(""));
                    }
                }
                TagEnd::Item => flush(&mut pending, &mut lines),
                TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough | TagEnd::Link => {
                    if style_stack.len() > 1 {
                        style_stack.pop();
                    }
                }
                _ => {}
            },
            Event::Text(text) => {
                if in_code_block {
                    code_block.push_str(&text);
                } else {
                    pending.push(Span::styled(text.to_string(), style));
                }
            }
            Event::Code(code) => {
                let code_style = theme.code_style().add_modifier(Modifier::BOLD);
                pending.push(Span::styled(format!("`{}`", code), code_style));
            }
            Event::SoftBreak => pending.push(Span::styled(" ", style)),
            Event::HardBreak => flush(&mut pending, &mut lines),
            _ => {}
        }
    }

    flush(&mut pending, &mut lines);

    while lines.last().is_some_and(|l| l.width() == 0) {
        lines.pop();
    }

    lines
}
