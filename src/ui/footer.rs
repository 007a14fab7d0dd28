use crate::app::{App, Focus};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    widgets::{Paragraph, Wrap},
    Frame,
};

/// Draws the footer with dynamic instructions
pub fn draw_footer(f: &mut Frame<'_>, area: Rect, app: &App) {
    let instructions = match app.focus {
        Focus::YoungerPath | Focus::OlderPath => {
            "Type an image path and press Enter to upload. Del removes the image. Tab switches panels, Esc quits."
        }
        Focus::Prompt => {
            "Edit the scene description. Enter merges the photos, Ctrl+O saves the result. Tab switches panels, Esc quits."
        }
        Focus::Chat => {
            "Type a message and press Enter to send. Ctrl+S cycles suggestions, Ctrl+A adopts one as the prompt. Tab switches panels, Esc quits."
        }
    };

    let footer = Paragraph::new(instructions)
        .style(Style::default().fg(Color::LightCyan))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    f.render_widget(footer, area);
}
