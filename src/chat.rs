use crate::constants::{CHAT_FAILED_REPLY, CHAT_GREETING};
use crate::errors::TimeWeaverResult;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

impl ChatRole {
    /// Role name the Gemini API expects.
    pub fn wire_role(&self) -> &'static str {
        match self {
            ChatRole::User => "user",
            ChatRole::Assistant => "model",
        }
    }
}

/// One turn of the transcript. Never mutated after insertion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            text: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            text: text.into(),
        }
    }
}

/// What `begin_send` hands to the gateway task: the transcript as it existed
/// before the new message, and the new message itself (passed separately as
/// the current turn, not duplicated inside the history).
#[derive(Debug, Clone)]
pub struct OutboundTurn {
    pub history: Vec<ChatMessage>,
    pub message: String,
}

/// Owns the assistant transcript and its in-flight guard.
///
/// The transcript is append-only and starts with a synthetic greeting that
/// never reaches the gateway as anything but history context. Exactly one
/// send may be outstanding; a second trigger while in flight is rejected,
/// not queued.
#[derive(Debug)]
pub struct ChatOrchestrator {
    messages: Vec<ChatMessage>,
    input: String,
    in_flight: bool,
}

impl ChatOrchestrator {
    pub fn new() -> Self {
        Self {
            messages: vec![ChatMessage::assistant(CHAT_GREETING)],
            input: String::new(),
            in_flight: false,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn push_input_char(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn pop_input_char(&mut self) {
        self.input.pop();
    }

    /// Starts a send of the current input buffer.
    ///
    /// No-op (returns `None`) when the input is empty/whitespace-only or a
    /// send is already in flight. Otherwise the user message is appended
    /// immediately so it renders before the reply arrives, the input buffer
    /// is cleared, and the caller gets the turn to hand to the gateway.
    pub fn begin_send(&mut self) -> Option<OutboundTurn> {
        if self.input.trim().is_empty() || self.in_flight {
            return None;
        }

        let message = std::mem::take(&mut self.input);
        let history = self.messages.clone();
        self.messages.push(ChatMessage::user(message.clone()));
        self.in_flight = true;

        Some(OutboundTurn { history, message })
    }

    /// Records the gateway outcome for the outstanding send.
    ///
    /// Failures are absorbed into the transcript as a generic assistant
    /// reply; the conversation continues uninterrupted. The in-flight flag
    /// clears on every path.
    pub fn complete_send(&mut self, outcome: TimeWeaverResult<String>) {
        match outcome {
            Ok(reply) => self.messages.push(ChatMessage::assistant(reply)),
            Err(e) => {
                log::error!("Chat request failed: {}", e);
                self.messages.push(ChatMessage::assistant(CHAT_FAILED_REPLY));
            }
        }
        self.in_flight = false;
    }
}

impl Default for ChatOrchestrator {
    fn default() -> Self {
        Self::new()
    }
}
