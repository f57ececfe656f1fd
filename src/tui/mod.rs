//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI, and
//! translates keyboard events into controller calls.
//!
//! This is the only module that knows about ratatui and crossterm. It is a
//! deliberately thin observer: every view is a pure function of
//! `ConversationState` plus the presentation state below, and the event
//! loop awaits each controller operation inline — a busy frame is drawn
//! before the await, and nothing else runs while a request is in flight.

mod event;
mod ui;

use std::sync::Arc;
use std::time::Duration;

use log::info;

use crate::core::config::ResolvedConfig;
use crate::core::controller::{Controller, ControllerError};
use crate::core::language::{Language, SELECTABLE_LANGUAGES};
use crate::core::state::Mode;
use crate::inference::{CompletionProvider, OpenAiProvider};
use crate::tui::event::{TuiEvent, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    /// The input buffer. Kept across a failed translation so the text can
    /// be resubmitted.
    pub input: String,
    /// Picker selection before the first submission confirms it.
    pub selected_language: Option<Language>,
    /// Chat history scroll offset.
    pub scroll: u16,
    /// Busy text shown while a request is in flight.
    pub status: Option<String>,
    /// Validation notice; cleared on the next keystroke.
    pub notice: Option<String>,
}

impl TuiState {
    pub fn new(preselected: Option<Language>) -> Self {
        Self {
            input: String::new(),
            selected_language: preselected,
            scroll: 0,
            status: None,
            notice: None,
        }
    }
}

/// Build the completion provider from resolved config. A missing API key is
/// passed through; it surfaces when the first request goes out.
pub fn build_provider(config: &ResolvedConfig) -> Arc<dyn CompletionProvider> {
    Arc::new(OpenAiProvider::new(
        config.api_key.clone(),
        Some(config.base_url.clone()),
    ))
}

/// Advance the picker selection: unset → first, otherwise the next entry.
fn next_language(current: Option<Language>) -> Language {
    match current {
        None => SELECTABLE_LANGUAGES[0],
        Some(lang) => {
            let index = SELECTABLE_LANGUAGES
                .iter()
                .position(|&l| l == lang)
                .map(|i| (i + 1) % SELECTABLE_LANGUAGES.len())
                .unwrap_or(0);
            SELECTABLE_LANGUAGES[index]
        }
    }
}

pub async fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let provider = build_provider(&config);
    let mut controller = Controller::new(provider, config.model_name.clone());
    let mut tui = TuiState::new(config.language);

    let mut terminal = ratatui::init();
    info!("TUI started (model: {})", config.model_name);

    loop {
        terminal.draw(|f| ui::draw_ui(f, &controller.state, &tui))?;

        let Some(tui_event) = poll_event_timeout(Duration::from_millis(250)) else {
            continue;
        };

        match tui_event {
            TuiEvent::Quit => break,
            TuiEvent::Resize => {}
            TuiEvent::ScrollUp => tui.scroll = tui.scroll.saturating_sub(1),
            TuiEvent::ScrollDown => tui.scroll = tui.scroll.saturating_add(1),
            TuiEvent::InputChar(c) => {
                tui.notice = None;
                tui.input.push(c);
            }
            TuiEvent::Backspace => {
                tui.notice = None;
                tui.input.pop();
            }
            TuiEvent::CycleLanguage => match controller.state.mode {
                Mode::AwaitingInput => {
                    tui.selected_language = Some(next_language(tui.selected_language));
                }
                Mode::Chat => {
                    let next = next_language(Some(controller.state.target_language));
                    controller.set_chat_language(next);
                }
                Mode::Result => {}
            },
            TuiEvent::Submit => match controller.state.mode {
                Mode::AwaitingInput => {
                    let text = tui.input.clone();
                    tui.status = Some("Translating...".to_string());
                    terminal.draw(|f| ui::draw_ui(f, &controller.state, &tui))?;

                    let result = controller
                        .submit_translation(&text, tui.selected_language)
                        .await;
                    tui.status = None;

                    match result {
                        Ok(()) => {
                            if controller.state.mode == Mode::Result {
                                tui.input.clear();
                            }
                        }
                        Err(e @ ControllerError::Validation(_)) => {
                            tui.notice = Some(e.to_string());
                        }
                        // Request failures land on state.error; the input
                        // text stays put for resubmission.
                        Err(ControllerError::Request(_)) => {}
                    }
                }
                Mode::Result => controller.enter_chat_mode(),
                Mode::Chat => {
                    let text = tui.input.clone();
                    if text.trim().is_empty() {
                        continue;
                    }
                    tui.input.clear();
                    tui.status = Some("Sending...".to_string());
                    terminal.draw(|f| ui::draw_ui(f, &controller.state, &tui))?;

                    // Failures surface via state.error; the user message is
                    // already in the transcript for retry.
                    let _ = controller.send_chat_message(&text).await;
                    tui.status = None;
                    tui.scroll = 0;
                }
            },
        }
    }

    ratatui::restore();
    info!("TUI shut down");
    Ok(())
}
