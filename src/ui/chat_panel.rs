use crate::app::{App, Focus};
use crate::chat::ChatRole;
use crate::suggestions::{parse_segments, MessageSegment};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use textwrap::wrap;
use unicode_width::UnicodeWidthStr;

/// Right column: the assistant transcript with selectable suggestions, the
/// status line and the input box.
pub fn draw_chat_panel(f: &mut Frame<'_>, area: Rect, app: &mut App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("AI Prompt Assistant")
        .style(Style::default().fg(Color::LightYellow));

    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Min(1),
                Constraint::Length(1),
                Constraint::Length(3),
            ]
            .as_ref(),
        )
        .split(inner);

    draw_messages(f, app, chunks[0]);
    app.status_indicator.render(f, chunks[1]);
    draw_input(f, app, chunks[2]);
}

fn draw_messages(f: &mut Frame<'_>, app: &App, area: Rect) {
    let wrap_width = (area.width as usize).saturating_sub(2).max(8);
    let mut lines = Vec::new();
    let mut suggestion_idx = 0;

    for message in app.chat.messages() {
        if !lines.is_empty() {
            lines.push(Line::from(""));
        }
        match message.role {
            ChatRole::User => {
                render_plain(&mut lines, "You: ", &message.text, wrap_width, user_style());
            }
            ChatRole::Assistant => {
                render_assistant(app, &mut lines, &message.text, wrap_width, &mut suggestion_idx);
            }
        }
    }

    // Clamp scroll to the last full page, like any transcript view.
    let total_lines = lines.len() as u16;
    let max_scroll = total_lines.saturating_sub(area.height);
    let chat_scroll = app.chat_scroll.min(max_scroll);

    let paragraph = Paragraph::new(lines)
        .block(Block::default())
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph.scroll((chat_scroll, 0)), area);
}

fn render_plain(
    lines: &mut Vec<Line<'static>>,
    prefix: &str,
    text: &str,
    wrap_width: usize,
    style: Style,
) {
    let full = format!("{}{}", prefix, text);
    for wrapped in wrap(&full, wrap_width) {
        lines.push(Line::from(Span::styled(wrapped.to_string(), style)));
    }
}

fn render_assistant(
    app: &App,
    lines: &mut Vec<Line<'static>>,
    text: &str,
    wrap_width: usize,
    suggestion_idx: &mut usize,
) {
    let mut plain_buffer = String::from("AI: ");

    for segment in parse_segments(text) {
        match segment {
            MessageSegment::Plain(plain) => plain_buffer.push_str(&plain),
            MessageSegment::Suggestion(suggestion) => {
                flush_plain(lines, &mut plain_buffer, wrap_width);

                let selected = app.suggestion_cursor == Some(*suggestion_idx);
                let style = if selected {
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::LightMagenta)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                        .fg(Color::LightMagenta)
                        .add_modifier(Modifier::BOLD)
                };
                lines.push(Line::from(Span::styled(
                    format!("  ❝{}❞", suggestion),
                    style,
                )));
                *suggestion_idx += 1;
            }
        }
    }

    flush_plain(lines, &mut plain_buffer, wrap_width);
}

fn flush_plain(lines: &mut Vec<Line<'static>>, buffer: &mut String, wrap_width: usize) {
    if buffer.trim().is_empty() {
        buffer.clear();
        return;
    }
    for wrapped in wrap(buffer.as_str(), wrap_width) {
        lines.push(Line::from(Span::styled(
            wrapped.to_string(),
            assistant_style(),
        )));
    }
    buffer.clear();
}

fn draw_input(f: &mut Frame<'_>, app: &App, area: Rect) {
    let focused = app.focus == Focus::Chat;
    let border_style = if focused {
        Style::default().fg(Color::LightCyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let input = Paragraph::new(app.chat.input())
        .style(Style::default().fg(Color::LightYellow))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title("Ask for ideas..."),
        );
    f.render_widget(input, area);

    if focused {
        let x = area.x + 1 + app.chat.input().width() as u16;
        let y = area.y + 1;
        f.set_cursor_position((x.min(area.x + area.width.saturating_sub(2)), y));
    }
}

fn user_style() -> Style {
    Style::default().fg(Color::LightGreen)
}

fn assistant_style() -> Style {
    Style::default().fg(Color::LightBlue)
}
