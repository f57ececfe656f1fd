use std::fmt;

use async_trait::async_trait;

use super::types::Transcript;

/// Errors that can occur during provider operations.
/// The controller collapses all of these into a single request failure;
/// the split exists for logging and diagnostics.
#[derive(Debug)]
pub enum ProviderError {
    /// Provider misconfigured (missing API key, bad URL). Detected at
    /// request time, never at startup.
    Config(String),
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// API returned an error response.
    Api { status: u16, message: String },
    /// The response payload was malformed or carried no text.
    Parse(String),
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderError::Config(msg) => write!(f, "config error: {msg}"),
            ProviderError::Network(msg) => write!(f, "network error: {msg}"),
            ProviderError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            ProviderError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for ProviderError {}

/// The two turn shapes the controller issues.
#[derive(Debug)]
pub enum Turn<'a> {
    /// Single-turn: a fixed instruction plus one literal input string.
    Translation {
        instructions: &'a str,
        input: String,
    },
    /// Multi-turn: a developer directive plus the full conversation so far.
    /// The Responses API is stateless, so the whole transcript goes out on
    /// every turn.
    Chat {
        directive: String,
        transcript: &'a Transcript,
    },
}

/// Everything a provider needs to fulfill a completion request.
#[derive(Debug)]
pub struct CompletionRequest<'a> {
    pub model: &'a str,
    pub turn: Turn<'a>,
}

#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Returns the name of the provider.
    fn name(&self) -> &str;

    /// Performs one completion exchange and returns the raw reply text.
    /// Exactly one outbound call per invocation; no retries, no caching.
    async fn complete(&self, request: CompletionRequest<'_>) -> Result<String, ProviderError>;
}
