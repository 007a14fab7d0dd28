use crate::constants::{MERGE_FAILED_ERROR, MISSING_INPUTS_ERROR};
use crate::errors::TimeWeaverResult;
use crate::image::EncodedImage;
use crate::prompt::PromptStore;
use crate::upload::UploadSlot;

/// What `begin` hands to the gateway task: both encoded images and the
/// prompt text, captured at trigger time.
#[derive(Debug, Clone)]
pub struct MergeRequest {
    pub younger: EncodedImage,
    pub older: EncodedImage,
    pub prompt: String,
}

/// The central merge state machine.
///
/// Result and error are mutually exclusive with each other and with the
/// in-flight flag. At most one request is outstanding; re-triggering after a
/// terminal state re-runs the same entry logic, clearing the previous
/// result/error first. No retry, no cancellation, no timeout.
#[derive(Debug, Default)]
pub struct MergeOrchestrator {
    in_flight: bool,
    result: Option<EncodedImage>,
    error: Option<String>,
}

impl MergeOrchestrator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn result(&self) -> Option<&EncodedImage> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether the merge trigger is enabled: both slots populated, prompt
    /// non-empty, nothing in flight.
    pub fn can_trigger(
        &self,
        younger: &UploadSlot,
        older: &UploadSlot,
        prompt: &PromptStore,
    ) -> bool {
        younger.is_populated() && older.is_populated() && !prompt.is_empty() && !self.in_flight
    }

    /// Runs the entry logic for one merge attempt.
    ///
    /// With preconditions unmet the gateway is never involved: the specific
    /// actionable message is surfaced instead and `None` comes back. While a
    /// request is in flight the trigger is a plain no-op. Otherwise prior
    /// result and error are cleared and the captured inputs are returned for
    /// the gateway call. The slots and prompt themselves are only read,
    /// never modified.
    pub fn begin(
        &mut self,
        younger: &UploadSlot,
        older: &UploadSlot,
        prompt: &PromptStore,
    ) -> Option<MergeRequest> {
        if self.in_flight {
            return None;
        }

        let (Some(younger), Some(older)) = (younger.content(), older.content()) else {
            self.error = Some(MISSING_INPUTS_ERROR.to_string());
            return None;
        };
        if prompt.is_empty() {
            self.error = Some(MISSING_INPUTS_ERROR.to_string());
            return None;
        }

        self.error = None;
        self.result = None;
        self.in_flight = true;

        Some(MergeRequest {
            younger: younger.clone(),
            older: older.clone(),
            prompt: prompt.text().to_string(),
        })
    }

    /// Records the gateway outcome for the outstanding request.
    ///
    /// The failure detail is logged only; the user sees one generic message
    /// no matter the cause. The in-flight flag clears on every path so the
    /// UI can never get stuck showing progress.
    pub fn complete(&mut self, outcome: TimeWeaverResult<EncodedImage>) {
        match outcome {
            Ok(image) => {
                self.result = Some(image);
                self.error = None;
            }
            Err(e) => {
                log::error!("Merge request failed: {}", e);
                self.result = None;
                self.error = Some(MERGE_FAILED_ERROR.to_string());
            }
        }
        self.in_flight = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::TimeWeaverError;

    fn populated_slot(tag: &str) -> UploadSlot {
        let mut slot = UploadSlot::new();
        slot.set(EncodedImage::from_parts("image/png", tag.as_bytes()));
        slot
    }

    #[test]
    fn test_trigger_disabled_until_all_inputs_present() {
        let merge = MergeOrchestrator::new();
        let younger = populated_slot("a");
        let older = populated_slot("b");
        let prompt = PromptStore::new();
        let empty_slot = UploadSlot::new();
        let mut empty_prompt = PromptStore::new();
        empty_prompt.set_text("");

        assert!(merge.can_trigger(&younger, &older, &prompt));
        assert!(!merge.can_trigger(&empty_slot, &older, &prompt));
        assert!(!merge.can_trigger(&younger, &empty_slot, &prompt));
        assert!(!merge.can_trigger(&younger, &older, &empty_prompt));
    }

    #[test]
    fn test_trigger_disabled_while_in_flight() {
        let mut merge = MergeOrchestrator::new();
        let younger = populated_slot("a");
        let older = populated_slot("b");
        let prompt = PromptStore::new();

        assert!(merge.begin(&younger, &older, &prompt).is_some());
        assert!(merge.is_in_flight());
        assert!(!merge.can_trigger(&younger, &older, &prompt));
        assert!(merge.begin(&younger, &older, &prompt).is_none());
    }

    #[test]
    fn test_missing_inputs_surface_specific_message() {
        let mut merge = MergeOrchestrator::new();
        let younger = UploadSlot::new();
        let older = populated_slot("b");
        let prompt = PromptStore::new();

        assert!(merge.begin(&younger, &older, &prompt).is_none());
        assert_eq!(merge.error(), Some(MISSING_INPUTS_ERROR));
        assert!(!merge.is_in_flight());
    }

    #[test]
    fn test_success_exposes_exactly_the_returned_image() {
        let mut merge = MergeOrchestrator::new();
        let younger = populated_slot("a");
        let older = populated_slot("b");
        let prompt = PromptStore::new();
        let generated = EncodedImage::from_parts("image/png", b"result");

        merge.begin(&younger, &older, &prompt).unwrap();
        merge.complete(Ok(generated.clone()));

        assert_eq!(merge.result(), Some(&generated));
        assert_eq!(merge.error(), None);
        assert!(!merge.is_in_flight());
    }

    #[test]
    fn test_failure_exposes_generic_error_only() {
        let mut merge = MergeOrchestrator::new();
        let younger = populated_slot("a");
        let older = populated_slot("b");
        let prompt = PromptStore::new();

        merge.begin(&younger, &older, &prompt).unwrap();
        merge.complete(Err(TimeWeaverError::gateway_error(
            "connection reset by peer",
        )));

        assert_eq!(merge.result(), None);
        assert_eq!(merge.error(), Some(MERGE_FAILED_ERROR));
        assert!(!merge.is_in_flight());
    }

    #[test]
    fn test_retrigger_clears_previous_outcome() {
        let mut merge = MergeOrchestrator::new();
        let younger = populated_slot("a");
        let older = populated_slot("b");
        let prompt = PromptStore::new();

        merge.begin(&younger, &older, &prompt).unwrap();
        merge.complete(Err(TimeWeaverError::gateway_error("boom")));
        assert!(merge.error().is_some());

        // Second attempt clears the stale error before the call resolves.
        merge.begin(&younger, &older, &prompt).unwrap();
        assert_eq!(merge.error(), None);
        assert_eq!(merge.result(), None);
        assert!(merge.is_in_flight());

        merge.complete(Ok(EncodedImage::from_parts("image/png", b"second")));
        assert!(merge.result().is_some());
    }

    #[test]
    fn test_request_captures_prompt_at_trigger_time() {
        let mut merge = MergeOrchestrator::new();
        let younger = populated_slot("a");
        let older = populated_slot("b");
        let mut prompt = PromptStore::new();
        prompt.set_text("sunset beach walk");

        let request = merge.begin(&younger, &older, &prompt).unwrap();
        assert_eq!(request.prompt, "sunset beach walk");
        assert_eq!(request.younger, *younger.content().unwrap());
        assert_eq!(request.older, *older.content().unwrap());

        // The inputs themselves are untouched by the attempt.
        merge.complete(Err(TimeWeaverError::gateway_error("boom")));
        assert!(younger.is_populated());
        assert!(older.is_populated());
        assert_eq!(prompt.text(), "sunset beach walk");
    }
}
