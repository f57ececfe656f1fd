//! # Conversation State
//!
//! Core business state for Parlo. This module contains domain data only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! ConversationState
//! ├── mode: Mode                    // current view (input / result / chat)
//! ├── target_language: Language     // last confirmed language pick
//! ├── transcript: Transcript        // conversation history
//! ├── pending: bool                 // waiting for API; gates submissions
//! └── error: Option<String>         // last surfaced failure
//! ```
//!
//! One instance per process, owned by the controller, never persisted.
//! State changes only happen through the controller's operations in
//! controller.rs, so no surprise mutations.

use crate::core::language::Language;
use crate::inference::Transcript;

/// The current view. Moves forward only:
/// `AwaitingInput → Result → Chat`, with `Chat` terminal until restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    AwaitingInput,
    Result,
    Chat,
}

pub struct ConversationState {
    pub mode: Mode,
    /// Defaults to English until a submission confirms a pick; changeable
    /// mid-chat without touching the transcript.
    pub target_language: Language,
    /// Empty until the first translation succeeds.
    pub transcript: Transcript,
    /// True while a request is in flight. Cleared on success and failure
    /// alike.
    pub pending: bool,
    pub error: Option<String>,
}

impl ConversationState {
    pub fn new() -> Self {
        Self {
            mode: Mode::AwaitingInput,
            target_language: Language::default(),
            transcript: Transcript::new(),
            pending: false,
            error: None,
        }
    }
}

impl Default for ConversationState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_new_defaults() {
        let state = ConversationState::new();
        assert_eq!(state.mode, Mode::AwaitingInput);
        assert_eq!(state.target_language, Language::English);
        assert!(state.transcript.is_empty());
        assert!(!state.pending);
        assert!(state.error.is_none());
    }
}
