//! Per-mode draw functions. Rendering is a pure function of
//! `ConversationState` plus the TUI's own presentation state.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::core::language::{Language, SELECTABLE_LANGUAGES};
use crate::core::state::{ConversationState, Mode};
use crate::inference::Role;

use super::TuiState;

pub fn draw_ui(frame: &mut Frame<'_>, state: &ConversationState, tui: &TuiState) {
    match state.mode {
        Mode::AwaitingInput => draw_input_view(frame, state, tui),
        Mode::Result => draw_result_view(frame, state, tui),
        Mode::Chat => draw_chat_view(frame, state, tui),
    }
}

fn draw_input_view(frame: &mut Frame<'_>, state: &ConversationState, tui: &TuiState) {
    let [title, input, languages, status] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(3),
        Constraint::Length(3),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    frame.render_widget(
        Paragraph::new("parlo").style(Style::default().add_modifier(Modifier::BOLD)),
        title,
    );
    frame.render_widget(
        Paragraph::new(tui.input.as_str())
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title("Your text")),
        input,
    );
    frame.render_widget(
        Paragraph::new(language_row(tui.selected_language))
            .block(Block::default().borders(Borders::ALL).title("Translate to (Tab)")),
        languages,
    );
    frame.render_widget(status_line(state, tui, "Enter: translate · Esc: quit"), status);
}

fn draw_result_view(frame: &mut Frame<'_>, state: &ConversationState, tui: &TuiState) {
    let [title, output, status] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    frame.render_widget(
        Paragraph::new("parlo").style(Style::default().add_modifier(Modifier::BOLD)),
        title,
    );
    let translated = state
        .transcript
        .last()
        .map(|m| m.content.as_str())
        .unwrap_or_default();
    frame.render_widget(
        Paragraph::new(translated)
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title("Your translation")),
        output,
    );
    frame.render_widget(
        status_line(state, tui, "Enter: chat in this language · Esc: quit"),
        status,
    );
}

fn draw_chat_view(frame: &mut Frame<'_>, state: &ConversationState, tui: &TuiState) {
    let [history, input, languages, status] = Layout::vertical([
        Constraint::Min(3),
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    frame.render_widget(
        Paragraph::new(transcript_lines(state, history))
            .scroll((tui.scroll, 0))
            .block(Block::default().borders(Borders::ALL).title("Chat")),
        history,
    );
    frame.render_widget(
        Paragraph::new(tui.input.as_str())
            .block(Block::default().borders(Borders::ALL).title("Type a message")),
        input,
    );
    frame.render_widget(Paragraph::new(language_row(Some(state.target_language))), languages);
    frame.render_widget(status_line(state, tui, "Enter: send · Tab: language · Esc: quit"), status);
}

/// One picker row: each language with a marker on the active one.
fn language_row(selected: Option<Language>) -> Line<'static> {
    let mut spans = Vec::new();
    for lang in SELECTABLE_LANGUAGES {
        let active = selected == Some(lang);
        let marker = if active { "●" } else { "○" };
        let style = if active {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(
            format!("{marker} {}  ", lang.display_name()),
            style,
        ));
    }
    Line::from(spans)
}

/// Wraps each transcript message to the panel width with a role prefix on
/// the first line and a hanging indent on the rest.
fn transcript_lines(state: &ConversationState, area: Rect) -> Vec<Line<'static>> {
    let width = area.width.saturating_sub(2).max(10) as usize;
    let mut lines = Vec::new();
    for message in state.transcript.messages() {
        let (prefix, style) = match message.role {
            Role::User => ("you ", Style::default().fg(Color::Cyan)),
            Role::Assistant => ("ai  ", Style::default().fg(Color::Green)),
        };
        let options = textwrap::Options::new(width)
            .initial_indent(prefix)
            .subsequent_indent("    ");
        for wrapped in textwrap::wrap(&message.content, options) {
            lines.push(Line::from(Span::styled(wrapped.into_owned(), style)));
        }
        lines.push(Line::default());
    }
    lines
}

fn status_line<'a>(state: &'a ConversationState, tui: &'a TuiState, help: &'a str) -> Paragraph<'a> {
    if let Some(status) = &tui.status {
        return Paragraph::new(status.as_str()).style(Style::default().fg(Color::Yellow));
    }
    if let Some(notice) = &tui.notice {
        return Paragraph::new(notice.as_str()).style(Style::default().fg(Color::Red));
    }
    if let Some(error) = &state.error {
        return Paragraph::new(format!("Error: {error}")).style(Style::default().fg(Color::Red));
    }
    Paragraph::new(help).style(Style::default().fg(Color::DarkGray))
}
