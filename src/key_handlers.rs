use crate::app::{App, Focus};
use crate::chat::OutboundTurn;
use crate::merge::MergeRequest;
use crate::upload::Subject;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::path::PathBuf;

/// Work a keystroke asks the event loop to start. Everything that needs a
/// spawned task comes back as a command; pure state edits happen in place.
#[derive(Debug)]
pub enum AppCommand {
    EncodeUpload { subject: Subject, path: PathBuf },
    TriggerMerge(MergeRequest),
    SendChat(OutboundTurn),
}

pub fn handle_key(app: &mut App, key: KeyEvent) -> Option<AppCommand> {
    // Global bindings first
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('c') => {
                app.should_quit = true;
                return None;
            }
            KeyCode::Char('o') => {
                app.save_result();
                return None;
            }
            KeyCode::Char('s') => {
                app.cycle_suggestion();
                return None;
            }
            KeyCode::Char('a') => {
                app.apply_selected_suggestion();
                return None;
            }
            // Other control chords are not text input
            _ => return None,
        }
    }

    match key.code {
        KeyCode::Esc => {
            app.should_quit = true;
            None
        }
        KeyCode::Tab => {
            app.focus = app.focus.next();
            None
        }
        _ => match app.focus {
            Focus::YoungerPath => handle_path_input(app, key, Subject::Younger),
            Focus::OlderPath => handle_path_input(app, key, Subject::Older),
            Focus::Prompt => handle_prompt_input(app, key),
            Focus::Chat => handle_chat_input(app, key),
        },
    }
}

fn handle_path_input(app: &mut App, key: KeyEvent, subject: Subject) -> Option<AppCommand> {
    match key.code {
        KeyCode::Char(c) => {
            app.path_buffer_mut(subject).push(c);
            None
        }
        KeyCode::Backspace => {
            app.path_buffer_mut(subject).pop();
            None
        }
        KeyCode::Delete => {
            app.clear_slot(subject);
            None
        }
        KeyCode::Enter => {
            let path = app.path_buffer(subject).trim().to_string();
            if path.is_empty() {
                return None;
            }
            Some(AppCommand::EncodeUpload {
                subject,
                path: PathBuf::from(path),
            })
        }
        _ => None,
    }
}

fn handle_prompt_input(app: &mut App, key: KeyEvent) -> Option<AppCommand> {
    match key.code {
        KeyCode::Char(c) => {
            app.prompt.push_char(c);
            None
        }
        KeyCode::Backspace => {
            app.prompt.pop_char();
            None
        }
        KeyCode::Enter => app
            .merge
            .begin(&app.younger, &app.older, &app.prompt)
            .map(AppCommand::TriggerMerge),
        _ => None,
    }
}

fn handle_chat_input(app: &mut App, key: KeyEvent) -> Option<AppCommand> {
    match key.code {
        KeyCode::Char(c) => {
            app.chat.push_input_char(c);
            None
        }
        KeyCode::Backspace => {
            app.chat.pop_input_char();
            None
        }
        KeyCode::Enter => app.chat.begin_send().map(AppCommand::SendChat),
        KeyCode::Up => {
            app.chat_scroll = app.chat_scroll.saturating_sub(1);
            None
        }
        KeyCode::Down => {
            app.chat_scroll = app.chat_scroll.saturating_add(1);
            None
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::EncodedImage;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            handle_key(app, key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_enter_on_path_field_requests_encoding() {
        let mut app = App::new();
        type_text(&mut app, "/photos/young.png");

        let command = handle_key(&mut app, key(KeyCode::Enter));
        match command {
            Some(AppCommand::EncodeUpload { subject, path }) => {
                assert_eq!(subject, Subject::Younger);
                assert_eq!(path, PathBuf::from("/photos/young.png"));
            }
            other => panic!("expected EncodeUpload, got {:?}", other),
        }
    }

    #[test]
    fn test_enter_on_empty_path_does_nothing() {
        let mut app = App::new();
        assert!(handle_key(&mut app, key(KeyCode::Enter)).is_none());
    }

    #[test]
    fn test_merge_trigger_requires_populated_slots() {
        let mut app = App::new();
        app.focus = Focus::Prompt;

        // Both slots empty: no command, specific error surfaced instead.
        assert!(handle_key(&mut app, key(KeyCode::Enter)).is_none());
        assert!(app.merge.error().is_some());

        app.slot_populated(Subject::Younger, EncodedImage::from_parts("image/png", b"a"));
        app.slot_populated(Subject::Older, EncodedImage::from_parts("image/png", b"b"));

        let command = handle_key(&mut app, key(KeyCode::Enter));
        assert!(matches!(command, Some(AppCommand::TriggerMerge(_))));
    }

    #[test]
    fn test_chat_enter_emits_turn() {
        let mut app = App::new();
        app.focus = Focus::Chat;
        type_text(&mut app, "suggest a scene");

        let command = handle_key(&mut app, key(KeyCode::Enter));
        match command {
            Some(AppCommand::SendChat(turn)) => {
                assert_eq!(turn.message, "suggest a scene");
                assert_eq!(turn.history.len(), 1);
            }
            other => panic!("expected SendChat, got {:?}", other),
        }
    }

    #[test]
    fn test_suggestion_bindings() {
        let mut app = App::new();
        app.chat.complete_send(Ok("Pick **a beach**".to_string()));

        handle_key(&mut app, ctrl('s'));
        handle_key(&mut app, ctrl('a'));
        assert_eq!(app.prompt.text(), "a beach");
    }

    #[test]
    fn test_tab_cycles_focus() {
        let mut app = App::new();
        assert_eq!(app.focus, Focus::YoungerPath);
        handle_key(&mut app, key(KeyCode::Tab));
        assert_eq!(app.focus, Focus::OlderPath);
        handle_key(&mut app, key(KeyCode::Tab));
        assert_eq!(app.focus, Focus::Prompt);
        handle_key(&mut app, key(KeyCode::Tab));
        assert_eq!(app.focus, Focus::Chat);
        handle_key(&mut app, key(KeyCode::Tab));
        assert_eq!(app.focus, Focus::YoungerPath);
    }

    #[test]
    fn test_esc_quits() {
        let mut app = App::new();
        handle_key(&mut app, key(KeyCode::Esc));
        assert!(app.should_quit);
    }
}
