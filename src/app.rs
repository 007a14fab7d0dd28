use crate::chat::ChatOrchestrator;
use crate::constants::{CHAT_BUSY_LABEL, MERGE_BUSY_LABEL};
use crate::image::EncodedImage;
use crate::merge::MergeOrchestrator;
use crate::prompt::PromptStore;
use crate::status_indicator::StatusIndicator;
use crate::suggestions::extract_suggestions;
use crate::upload::{Subject, UploadSlot};
use chrono::Local;

/// Which panel keystrokes go to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    YoungerPath,
    OlderPath,
    Prompt,
    Chat,
}

impl Focus {
    pub fn next(self) -> Focus {
        match self {
            Focus::YoungerPath => Focus::OlderPath,
            Focus::OlderPath => Focus::Prompt,
            Focus::Prompt => Focus::Chat,
            Focus::Chat => Focus::YoungerPath,
        }
    }
}

/// All application state: the two upload slots, the prompt, the two
/// orchestrators, and the widget bookkeeping around them. Owned by the event
/// loop; spawned gateway tasks only ever hand outcomes back through it.
pub struct App {
    pub focus: Focus,
    pub younger: UploadSlot,
    pub older: UploadSlot,
    pub younger_path: String,
    pub older_path: String,
    pub upload_status: Option<String>,
    pub prompt: PromptStore,
    pub merge: MergeOrchestrator,
    pub chat: ChatOrchestrator,
    pub status_indicator: StatusIndicator,
    pub chat_scroll: u16,
    pub suggestion_cursor: Option<usize>,
    pub save_status: Option<String>,
    pub should_quit: bool,
}

impl App {
    pub fn new() -> App {
        App {
            focus: Focus::YoungerPath,
            younger: UploadSlot::new(),
            older: UploadSlot::new(),
            younger_path: String::new(),
            older_path: String::new(),
            upload_status: None,
            prompt: PromptStore::new(),
            merge: MergeOrchestrator::new(),
            chat: ChatOrchestrator::new(),
            status_indicator: StatusIndicator::new(),
            chat_scroll: 0,
            suggestion_cursor: None,
            save_status: None,
            should_quit: false,
        }
    }

    pub fn slot(&self, subject: Subject) -> &UploadSlot {
        match subject {
            Subject::Younger => &self.younger,
            Subject::Older => &self.older,
        }
    }

    pub fn path_buffer(&self, subject: Subject) -> &str {
        match subject {
            Subject::Younger => &self.younger_path,
            Subject::Older => &self.older_path,
        }
    }

    pub fn path_buffer_mut(&mut self, subject: Subject) -> &mut String {
        match subject {
            Subject::Younger => &mut self.younger_path,
            Subject::Older => &mut self.older_path,
        }
    }

    /// Stores a freshly encoded image in the subject's slot.
    pub fn slot_populated(&mut self, subject: Subject, image: EncodedImage) {
        self.upload_status = None;
        match subject {
            Subject::Younger => self.younger.set(image),
            Subject::Older => self.older.set(image),
        }
    }

    /// Surfaces a file-read failure on the upload panel. The slot keeps
    /// whatever it held before.
    pub fn slot_failed(&mut self, subject: Subject, message: String) {
        log::error!("Upload for {} failed: {}", subject.label(), message);
        self.upload_status = Some(format!("{}: {}", subject.label(), message));
    }

    /// Empties the slot and resets its path entry so the same file can be
    /// picked again.
    pub fn clear_slot(&mut self, subject: Subject) {
        match subject {
            Subject::Younger => self.younger.clear(),
            Subject::Older => self.older.clear(),
        }
        self.path_buffer_mut(subject).clear();
        self.upload_status = None;
    }

    /// Every selectable suggestion in the transcript, in reading order.
    pub fn visible_suggestions(&self) -> Vec<String> {
        self.chat
            .messages()
            .iter()
            .filter(|m| m.role == crate::chat::ChatRole::Assistant)
            .flat_map(|m| extract_suggestions(&m.text))
            .collect()
    }

    /// Moves the suggestion cursor to the next suggestion, wrapping.
    pub fn cycle_suggestion(&mut self) {
        let count = self.visible_suggestions().len();
        if count == 0 {
            self.suggestion_cursor = None;
            return;
        }
        self.suggestion_cursor = Some(match self.suggestion_cursor {
            Some(idx) => (idx + 1) % count,
            None => 0,
        });
    }

    /// Overwrites the prompt with the selected suggestion, markers stripped.
    pub fn apply_selected_suggestion(&mut self) {
        let suggestions = self.visible_suggestions();
        if let Some(text) = self
            .suggestion_cursor
            .and_then(|idx| suggestions.get(idx).cloned())
        {
            self.prompt.set_text(text);
            self.suggestion_cursor = None;
        }
    }

    /// Writes the merged image next to the working directory.
    pub fn save_result(&mut self) {
        let Some(image) = self.merge.result() else {
            return;
        };

        let filename = format!(
            "timeweaver-{}.{}",
            Local::now().format("%Y%m%d-%H%M%S"),
            image.extension()
        );
        let outcome = image
            .decode_bytes()
            .and_then(|bytes| {
                std::fs::write(&filename, bytes).map_err(|e| {
                    crate::errors::TimeWeaverError::image_error(format!(
                        "Failed to write {}: {}",
                        filename, e
                    ))
                })
            });

        self.save_status = Some(match outcome {
            Ok(()) => format!("Saved {}", filename),
            Err(e) => {
                log::error!("Saving merged image failed: {}", e);
                "Failed to save image".to_string()
            }
        });
    }

    /// Keeps the spinner and status line in sync with the orchestrators.
    pub fn refresh_status(&mut self) {
        let merge_busy = self.merge.is_in_flight();
        let chat_busy = self.chat.is_in_flight();
        self.status_indicator.set_busy(merge_busy || chat_busy);
        if merge_busy {
            self.status_indicator.set_status(MERGE_BUSY_LABEL);
        } else if chat_busy {
            self.status_indicator.set_status(CHAT_BUSY_LABEL);
        } else {
            self.status_indicator.clear_status();
        }
        self.status_indicator.update_spinner();
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DEFAULT_PROMPT;

    fn sample_image(tag: &str) -> EncodedImage {
        EncodedImage::from_parts("image/png", tag.as_bytes())
    }

    #[test]
    fn test_clear_slot_resets_path_entry_only_for_that_subject() {
        let mut app = App::new();
        app.younger_path = "/photos/young.png".to_string();
        app.older_path = "/photos/old.png".to_string();
        app.slot_populated(Subject::Younger, sample_image("y"));
        app.slot_populated(Subject::Older, sample_image("o"));

        app.clear_slot(Subject::Younger);

        assert!(!app.younger.is_populated());
        assert!(app.younger_path.is_empty());
        assert!(app.older.is_populated());
        assert_eq!(app.older_path, "/photos/old.png");
        assert_eq!(app.prompt.text(), DEFAULT_PROMPT);
    }

    #[test]
    fn test_slot_failure_leaves_slot_unchanged() {
        let mut app = App::new();
        let kept = sample_image("kept");
        app.slot_populated(Subject::Younger, kept.clone());

        app.slot_failed(Subject::Younger, "Failed to read /bad/path".to_string());

        assert_eq!(app.younger.content(), Some(&kept));
        assert!(app.upload_status.as_deref().unwrap().contains("Younger Self"));
    }

    #[test]
    fn test_suggestion_cycle_and_apply() {
        let mut app = App::new();
        app.chat
            .complete_send(Ok("Try **a beach** or **a forest**".to_string()));
        // complete_send without begin_send only happens in tests; the
        // transcript content is what matters here.

        assert_eq!(app.visible_suggestions().len(), 2);

        app.cycle_suggestion();
        app.cycle_suggestion();
        app.apply_selected_suggestion();

        assert_eq!(app.prompt.text(), "a forest");
        assert_eq!(app.suggestion_cursor, None);
    }

    #[test]
    fn test_cycle_with_no_suggestions_is_noop() {
        let mut app = App::new();
        app.cycle_suggestion();
        assert_eq!(app.suggestion_cursor, None);
        app.apply_selected_suggestion();
        assert_eq!(app.prompt.text(), DEFAULT_PROMPT);
    }
}
