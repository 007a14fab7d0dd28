use crate::image::EncodedImage;

/// The two subject photos the merge needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subject {
    Younger,
    Older,
}

impl Subject {
    pub fn label(&self) -> &'static str {
        match self {
            Subject::Younger => "Younger Self",
            Subject::Older => "Older Self",
        }
    }
}

/// Holds at most one encoded image. Two independent instances exist, one per
/// subject. Content only changes through explicit user actions; a merge
/// attempt never touches it.
#[derive(Debug, Default)]
pub struct UploadSlot {
    content: Option<EncodedImage>,
}

impl UploadSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores an encoded image, discarding any prior content.
    pub fn set(&mut self, image: EncodedImage) {
        self.content = Some(image);
    }

    /// Resets the slot to empty. The caller also resets its path entry so the
    /// same file can be re-selected.
    pub fn clear(&mut self) {
        self.content = None;
    }

    pub fn is_populated(&self) -> bool {
        self.content.is_some()
    }

    pub fn content(&self) -> Option<&EncodedImage> {
        self.content.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_image(tag: &str) -> EncodedImage {
        EncodedImage::from_parts("image/png", tag.as_bytes())
    }

    #[test]
    fn test_set_populates_and_replaces() {
        let mut slot = UploadSlot::new();
        assert!(!slot.is_populated());

        slot.set(sample_image("first"));
        assert!(slot.is_populated());

        let replacement = sample_image("second");
        slot.set(replacement.clone());
        assert_eq!(slot.content(), Some(&replacement));
    }

    #[test]
    fn test_clear_resets_to_empty() {
        let mut slot = UploadSlot::new();
        slot.set(sample_image("photo"));
        slot.clear();
        assert!(!slot.is_populated());
        assert_eq!(slot.content(), None);
    }

    #[test]
    fn test_clear_leaves_other_slot_alone() {
        let mut younger = UploadSlot::new();
        let mut older = UploadSlot::new();
        let kept = sample_image("older");
        younger.set(sample_image("younger"));
        older.set(kept.clone());

        younger.clear();

        assert!(!younger.is_populated());
        assert_eq!(older.content(), Some(&kept));
    }
}
