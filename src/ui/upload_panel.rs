use crate::app::{App, Focus};
use crate::constants::{MERGE_BUSY_LABEL, MISSING_INPUTS_ERROR};
use crate::upload::Subject;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Left column: the two upload slots, the prompt editor and the merge
/// trigger state.
pub fn draw_upload_panel(f: &mut Frame<'_>, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("1. Upload Your Photos  /  2. Describe the Scene")
        .style(Style::default().fg(Color::LightYellow));

    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut lines = Vec::new();

    slot_lines(&mut lines, app, Subject::Younger, Focus::YoungerPath);
    lines.push(Line::from(""));
    slot_lines(&mut lines, app, Subject::Older, Focus::OlderPath);

    if let Some(status) = &app.upload_status {
        lines.push(Line::from(Span::styled(
            status.clone(),
            Style::default().fg(Color::Red),
        )));
    }

    lines.push(Line::from(""));
    prompt_lines(&mut lines, app);
    lines.push(Line::from(""));
    trigger_lines(&mut lines, app);

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
    f.render_widget(paragraph, inner);
}

fn slot_lines(lines: &mut Vec<Line<'static>>, app: &App, subject: Subject, focus: Focus) {
    let focused = app.focus == focus;
    let label_style = if focused {
        Style::default().fg(Color::LightCyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };

    lines.push(Line::from(Span::styled(subject.label(), label_style)));

    let prefix = if focused { "→ " } else { "  " };
    lines.push(Line::from(vec![
        Span::styled(prefix, Style::default().fg(Color::Yellow)),
        Span::raw(app.path_buffer(subject).to_string()),
    ]));

    let state = match app.slot(subject).content() {
        Some(image) => Line::from(Span::styled(
            format!(
                "  ✓ {} ({})",
                image.mime_type(),
                format_size(image.byte_len())
            ),
            Style::default().fg(Color::LightGreen),
        )),
        None => Line::from(Span::styled(
            "  empty - type a path and press Enter",
            Style::default().fg(Color::DarkGray),
        )),
    };
    lines.push(state);
}

fn prompt_lines(lines: &mut Vec<Line<'static>>, app: &App) {
    let focused = app.focus == Focus::Prompt;
    let label_style = if focused {
        Style::default().fg(Color::LightCyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };

    lines.push(Line::from(Span::styled("Scene description", label_style)));

    let prefix = if focused { "→ " } else { "  " };
    lines.push(Line::from(vec![
        Span::styled(prefix, Style::default().fg(Color::Yellow)),
        Span::raw(app.prompt.text().to_string()),
    ]));
}

fn trigger_lines(lines: &mut Vec<Line<'static>>, app: &App) {
    let enabled = app.merge.can_trigger(&app.younger, &app.older, &app.prompt);

    let label = if app.merge.is_in_flight() {
        Span::styled(
            MERGE_BUSY_LABEL,
            Style::default().fg(Color::Yellow).add_modifier(Modifier::DIM),
        )
    } else if enabled {
        Span::styled(
            "[ Merge Photos ]  (Enter in the scene field)",
            Style::default()
                .fg(Color::LightMagenta)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled(
            "[ Merge Photos ]  (disabled)",
            Style::default().fg(Color::DarkGray),
        )
    };
    lines.push(Line::from(label));

    if !enabled && !app.merge.is_in_flight() && app.merge.error().is_none() {
        lines.push(Line::from(Span::styled(
            MISSING_INPUTS_ERROR,
            Style::default().fg(Color::DarkGray),
        )));
    }

    if let Some(error) = app.merge.error() {
        lines.push(Line::from(Span::styled(
            error.to_string(),
            Style::default().fg(Color::Red),
        )));
    }
}

fn format_size(bytes: usize) -> String {
    if bytes >= 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    } else if bytes >= 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.0 MB");
    }
}
