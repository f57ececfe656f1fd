//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::core::controller::Controller;
use crate::inference::{
    CompletionProvider, CompletionRequest, Message, ProviderError, Turn,
};

/// Owned snapshot of one request, captured at call time so assertions see
/// exactly what went over the wire.
#[derive(Debug, Clone)]
pub enum RecordedTurn {
    Translation {
        instructions: String,
        input: String,
    },
    Chat {
        directive: String,
        messages: Vec<Message>,
    },
}

struct Script {
    replies: Mutex<VecDeque<Result<String, ProviderError>>>,
    calls: Mutex<Vec<RecordedTurn>>,
}

/// A provider that records every request and plays back queued results.
#[derive(Clone)]
pub struct ScriptedProvider {
    inner: Arc<Script>,
}

impl ScriptedProvider {
    /// Creates a provider that answers with `replies` in order.
    pub fn replying(replies: &[&str]) -> Self {
        Self {
            inner: Arc::new(Script {
                replies: Mutex::new(replies.iter().map(|r| Ok(r.to_string())).collect()),
                calls: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Creates a provider whose first call fails with an API error.
    pub fn failing(message: &str) -> Self {
        let provider = Self::replying(&[]);
        provider.push_failure(message);
        provider
    }

    /// Queues a failure as the next scripted result.
    pub fn push_failure(&self, message: &str) {
        self.inner
            .replies
            .lock()
            .unwrap()
            .push_back(Err(ProviderError::Api {
                status: 500,
                message: message.to_string(),
            }));
    }

    /// Everything this provider has been asked so far.
    pub fn calls(&self) -> Vec<RecordedTurn> {
        self.inner.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn complete(&self, request: CompletionRequest<'_>) -> Result<String, ProviderError> {
        let recorded = match &request.turn {
            Turn::Translation {
                instructions,
                input,
            } => RecordedTurn::Translation {
                instructions: (*instructions).to_string(),
                input: input.clone(),
            },
            Turn::Chat {
                directive,
                transcript,
            } => RecordedTurn::Chat {
                directive: directive.clone(),
                messages: transcript.messages().to_vec(),
            },
        };
        self.inner.calls.lock().unwrap().push(recorded);

        self.inner
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(ProviderError::Parse("no scripted reply left".to_string()))
            })
    }
}

/// Creates a Controller backed by the given scripted provider.
pub fn test_controller(provider: ScriptedProvider) -> Controller {
    Controller::new(Arc::new(provider), "test-model".to_string())
}
