//! # Core Application Logic
//!
//! This module contains Parlo's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • ConversationState    │
//!                    │  • Controller (ops)     │
//!                    │  • Language table       │
//!                    │  • Config resolution    │
//!                    │                         │
//!                    │  No UI. One owner.      │
//!                    └───────────┬─────────────┘
//!                                │
//!                                ▼
//!                         ┌────────────┐
//!                         │    TUI     │
//!                         │  Adapter   │
//!                         │ (ratatui)  │
//!                         └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: `ConversationState` — all session state in one place
//! - [`controller`]: the operations that mutate it and talk to the service
//! - [`language`]: the fixed target-language enumeration
//! - [`config`]: TOML config loading and override resolution

pub mod config;
pub mod controller;
pub mod language;
pub mod state;
