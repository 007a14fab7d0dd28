// API Constants
pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image-preview";
pub const DEFAULT_CHAT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 1024;

/// Scene description the prompt editor starts with.
pub const DEFAULT_PROMPT: &str = "standing together in a serene, magical forest at dusk";

/// Synthetic first message of the assistant transcript. Inserted at
/// construction, never sent to or returned by the gateway.
pub const CHAT_GREETING: &str =
    "Hello! Need help crafting the perfect scene for your photo? Just ask!";

/// System instruction for the prompt assistant. Suggestions must be wrapped
/// in ** so the chat panel can offer them as selectable prompt overwrites.
pub const CHAT_SYSTEM_INSTRUCTION: &str = "You are a friendly creative assistant helping a user \
describe a scene for an AI photo merge. The merged photo will show the same person at two ages \
together. When you propose a concrete scene description, wrap it in double asterisks like \
**a snowy mountain cabin at dawn** so the user can select it. Keep replies short.";

/// Instruction prefixed to the user's scene text in the merge request.
pub const MERGE_INSTRUCTION: &str = "Merge the two people from these photos into a single \
photorealistic image. They are the same person at different ages. Depict both of them";

// User-facing strings
pub const MISSING_INPUTS_ERROR: &str = "Please upload both images and provide a prompt.";
pub const MERGE_FAILED_ERROR: &str =
    "Failed to generate image. Please check your prompt or try again later.";
pub const CHAT_FAILED_REPLY: &str = "Sorry, I encountered an error. Please try again.";

// Busy labels
pub const MERGE_BUSY_LABEL: &str = "Weaving Time...";
pub const MERGE_BUSY_DETAIL: &str = "Generating your memory...";
pub const CHAT_BUSY_LABEL: &str = "Thinking...";
