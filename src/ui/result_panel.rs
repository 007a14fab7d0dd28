use crate::app::App;
use crate::constants::MERGE_BUSY_DETAIL;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Center column: the merge outcome. A terminal cannot show the image
/// itself, so a ready result is presented as metadata plus the save action.
pub fn draw_result_panel(f: &mut Frame<'_>, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("3. Your Timeless Photo")
        .style(Style::default().fg(Color::LightYellow));

    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut lines: Vec<Line<'static>> = vec![Line::from("")];

    if app.merge.is_in_flight() {
        lines.push(Line::from(Span::styled(
            MERGE_BUSY_DETAIL,
            Style::default()
                .fg(Color::LightMagenta)
                .add_modifier(Modifier::BOLD),
        )));
    } else if let Some(image) = app.merge.result() {
        lines.push(Line::from(Span::styled(
            "Merged image ready",
            Style::default()
                .fg(Color::LightGreen)
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(""));
        lines.push(Line::from(format!("Type: {}", image.mime_type())));
        lines.push(Line::from(format!("Size: {} bytes", image.byte_len())));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Press Ctrl+O to save it to disk.",
            Style::default().fg(Color::LightCyan),
        )));
        if let Some(status) = &app.save_status {
            lines.push(Line::from(Span::styled(
                status.clone(),
                Style::default().fg(Color::Yellow),
            )));
        }
    } else {
        lines.push(Line::from(Span::styled(
            "Your merged photo will appear here.",
            Style::default().fg(Color::DarkGray),
        )));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Upload your photos, describe a scene, and merge to start.",
            Style::default().fg(Color::DarkGray),
        )));
    }

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, inner);
}
