//! # Conversation Controller
//!
//! Owns the [`ConversationState`] and mediates every call to the completion
//! service. Each operation checks its preconditions locally, issues at most
//! one outbound request, and applies the resulting transition:
//!
//! ```text
//! AwaitingInput --submit_translation ok--> Result --enter_chat_mode--> Chat
//! ```
//!
//! A failed submission leaves the mode where it was; the failed input text
//! stays in the view for resubmission. Duplicate submissions while a request
//! is pending are ignored, never queued.

use std::fmt;
use std::sync::Arc;

use log::{debug, info, warn};

use crate::core::language::Language;
use crate::core::state::{ConversationState, Mode};
use crate::inference::{CompletionProvider, CompletionRequest, ProviderError, Turn};

/// Fixed instruction for translation turns.
pub const TRANSLATOR_INSTRUCTIONS: &str =
    "You are a helpful translator. Translate the user's text accurately.";

/// Errors surfaced by controller operations.
#[derive(Debug)]
pub enum ControllerError {
    /// Missing/invalid local input. Detected before any network call;
    /// state unchanged.
    Validation(&'static str),
    /// The outbound call rejected, timed out, or returned a malformed
    /// payload. The underlying provider error is kept for diagnostics.
    Request(ProviderError),
}

impl fmt::Display for ControllerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControllerError::Validation(msg) => write!(f, "validation error: {msg}"),
            ControllerError::Request(e) => write!(f, "request failed: {e}"),
        }
    }
}

impl std::error::Error for ControllerError {}

fn translation_input(language: Language, raw_text: &str) -> String {
    format!(
        "Translate the following text to {}: {}",
        language.display_name(),
        raw_text
    )
}

fn chat_directive(language: Language) -> String {
    format!(
        "You are a helpful assistant. Reply in {}.",
        language.display_name()
    )
}

pub struct Controller {
    provider: Arc<dyn CompletionProvider>,
    model_name: String,
    pub state: ConversationState,
}

impl Controller {
    pub fn new(provider: Arc<dyn CompletionProvider>, model_name: String) -> Self {
        Self {
            provider,
            model_name,
            state: ConversationState::new(),
        }
    }

    /// Submits `raw_text` for translation into `target`.
    ///
    /// Validation failures never reach the network. A submission while a
    /// request is already in flight is a silent no-op. On success the raw
    /// reply becomes the transcript's first assistant message and the mode
    /// moves to `Result`; on failure the mode stays put and the error is
    /// surfaced on the state.
    pub async fn submit_translation(
        &mut self,
        raw_text: &str,
        target: Option<Language>,
    ) -> Result<(), ControllerError> {
        if self.state.pending {
            debug!("submit_translation ignored: request already in flight");
            return Ok(());
        }
        if self.state.mode != Mode::AwaitingInput {
            debug!("submit_translation ignored in {:?} mode", self.state.mode);
            return Ok(());
        }
        if raw_text.is_empty() {
            return Err(ControllerError::Validation("empty input"));
        }
        let Some(target) = target else {
            return Err(ControllerError::Validation("no language selected"));
        };

        self.state.error = None;
        self.state.target_language = target;
        self.state.pending = true;
        info!("Submitting translation to {}", target.display_name());

        let result = self
            .provider
            .complete(CompletionRequest {
                model: &self.model_name,
                turn: Turn::Translation {
                    instructions: TRANSLATOR_INSTRUCTIONS,
                    input: translation_input(target, raw_text),
                },
            })
            .await;

        // Busy indicator is cleared on both paths.
        self.state.pending = false;

        match result {
            Ok(text) => {
                self.state.transcript.push_assistant(text);
                self.state.mode = Mode::Result;
                Ok(())
            }
            Err(e) => {
                warn!("Translation request failed: {e}");
                self.state.error = Some(e.to_string());
                Err(ControllerError::Request(e))
            }
        }
    }

    /// Moves from the result view into the chat session. The transcript
    /// already holds the translation as its first assistant message, so
    /// this is a pure mode transition.
    pub fn enter_chat_mode(&mut self) {
        if self.state.mode != Mode::Result {
            debug!("enter_chat_mode ignored in {:?} mode", self.state.mode);
            return;
        }
        info!(
            "Entering chat mode in {}",
            self.state.target_language.display_name()
        );
        self.state.mode = Mode::Chat;
    }

    /// Sends one chat message. Whitespace-only input is silently ignored.
    ///
    /// The trimmed text is appended before the request goes out, so a
    /// failed turn leaves the user message in place for retry by
    /// resubmission.
    pub async fn send_chat_message(&mut self, raw_text: &str) -> Result<(), ControllerError> {
        if self.state.mode != Mode::Chat {
            debug!("send_chat_message ignored in {:?} mode", self.state.mode);
            return Ok(());
        }
        if self.state.pending {
            debug!("send_chat_message ignored: request already in flight");
            return Ok(());
        }
        let text = raw_text.trim();
        if text.is_empty() {
            return Ok(());
        }

        self.state.error = None;
        self.state.transcript.push_user(text);
        self.state.pending = true;

        let result = self
            .provider
            .complete(CompletionRequest {
                model: &self.model_name,
                turn: Turn::Chat {
                    directive: chat_directive(self.state.target_language),
                    transcript: &self.state.transcript,
                },
            })
            .await;

        self.state.pending = false;

        match result {
            Ok(reply) => {
                self.state.transcript.push_assistant(reply);
                Ok(())
            }
            Err(e) => {
                warn!("Chat request failed: {e}");
                self.state.error = Some(e.to_string());
                Err(ControllerError::Request(e))
            }
        }
    }

    /// Switches the reply language mid-chat. Takes effect on the next
    /// turn's directive only; the transcript is untouched.
    pub fn set_chat_language(&mut self, language: Language) {
        if self.state.mode != Mode::Chat {
            debug!("set_chat_language ignored in {:?} mode", self.state.mode);
            return;
        }
        self.state.target_language = language;
    }
}
