//! OpenAI provider implementation using the Responses API.
//!
//! This module uses OpenAI Responses API terminology:
//! - "instructions" (single-turn system directive)
//! - "input" (either a literal string or an array of role/content messages)
//! - reply text lives in `output[].content[]` parts of type `output_text`

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::inference::{
    CompletionProvider, CompletionRequest, ProviderError, Role, Transcript, Turn,
};

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

// ============================================================================
// OpenAI Responses API Types
// ============================================================================

/// Role of an input message. `Developer` carries the per-turn chat
/// directive; it is built fresh for every request, never persisted.
#[derive(Serialize, Debug, Clone, Copy)]
#[serde(rename_all = "lowercase")]
enum InputRole {
    Developer,
    User,
    Assistant,
}

/// A single message in the input array (chat turns only)
#[derive(Serialize, Debug, Clone)]
struct InputMessage {
    role: InputRole,
    content: String,
}

/// Input is polymorphic: a literal string for translation turns,
/// an array of messages for chat turns.
#[derive(Serialize, Debug)]
#[serde(untagged)]
enum Input {
    Text(String),
    Messages(Vec<InputMessage>),
}

/// Configuration for reasoning tokens
#[derive(Serialize, Debug)]
struct Reasoning {
    effort: &'static str,
}

/// The request body for the Responses API
#[derive(Serialize, Debug)]
struct ResponsesRequest {
    model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    instructions: Option<String>,
    input: Input,
    #[serde(skip_serializing_if = "Option::is_none")]
    reasoning: Option<Reasoning>,
}

/// Non-streaming reply envelope. Only the output array matters here.
#[derive(Deserialize, Debug)]
struct ResponsesReply {
    #[serde(default)]
    output: Vec<OutputItem>,
}

/// One item of the output array. Reasoning items arrive with an empty
/// content array and are skipped.
#[derive(Deserialize, Debug)]
struct OutputItem {
    #[serde(rename = "type")]
    item_type: String,
    #[serde(default)]
    content: Vec<ContentPart>,
}

#[derive(Deserialize, Debug)]
struct ContentPart {
    #[serde(rename = "type")]
    part_type: String,
    #[serde(default)]
    text: String,
}

// ============================================================================
// Translation Layer
// ============================================================================

/// Converts a transcript into Responses API input messages, with the
/// developer directive as the first entry.
fn transcript_to_input(directive: String, transcript: &Transcript) -> Vec<InputMessage> {
    let mut input = Vec::with_capacity(transcript.len() + 1);
    input.push(InputMessage {
        role: InputRole::Developer,
        content: directive,
    });
    input.extend(transcript.messages().iter().map(|message| InputMessage {
        role: match message.role {
            Role::User => InputRole::User,
            Role::Assistant => InputRole::Assistant,
        },
        content: message.content.clone(),
    }));
    input
}

/// Builds the request body for either turn shape.
fn build_request(request: &CompletionRequest<'_>) -> ResponsesRequest {
    match &request.turn {
        Turn::Translation {
            instructions,
            input,
        } => ResponsesRequest {
            model: request.model.to_string(),
            instructions: Some((*instructions).to_string()),
            input: Input::Text(input.clone()),
            reasoning: None,
        },
        Turn::Chat {
            directive,
            transcript,
        } => ResponsesRequest {
            model: request.model.to_string(),
            instructions: None,
            input: Input::Messages(transcript_to_input(directive.clone(), transcript)),
            // Chat turns run with low reasoning effort; translations omit
            // the field entirely.
            reasoning: Some(Reasoning { effort: "low" }),
        },
    }
}

/// Pulls the reply text out of the output array: concatenated `output_text`
/// parts of `message` items.
fn extract_output_text(reply: &ResponsesReply) -> Option<String> {
    let mut text = String::new();
    for item in &reply.output {
        if item.item_type != "message" {
            continue;
        }
        for part in &item.content {
            if part.part_type == "output_text" {
                text.push_str(&part.text);
            }
        }
    }
    if text.is_empty() { None } else { Some(text) }
}

// ============================================================================
// Provider Implementation
// ============================================================================

/// OpenAI API provider using the Responses API (non-streaming).
pub struct OpenAiProvider {
    api_key: Option<String>,
    base_url: String,
    client: reqwest::Client,
}

impl OpenAiProvider {
    /// Creates a new OpenAI provider.
    ///
    /// # Arguments
    /// * `api_key` - API key; `None` surfaces as a request-time config error
    /// * `base_url` - Optional custom base URL (defaults to OpenAI's API)
    pub fn new(api_key: Option<String>, base_url: Option<String>) -> Self {
        Self {
            api_key,
            base_url: base_url.unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
            client: reqwest::Client::new(),
        }
    }

    /// Sends a request to the Responses endpoint and returns the response.
    async fn send_request(
        &self,
        request: &ResponsesRequest,
    ) -> Result<reqwest::Response, ProviderError> {
        // Absent/invalid credentials are a request-time failure, not a
        // startup failure.
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| ProviderError::Config("OPENAI_API_KEY is not set".to_string()))?;

        let response = self
            .client
            .post(format!("{}/responses", self.base_url))
            .header("Authorization", format!("Bearer {api_key}"))
            .json(request)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        debug!("OpenAI response status: {}", response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let err_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("OpenAI API error: {} - {}", status, err_body);
            return Err(ProviderError::Api {
                status,
                message: err_body,
            });
        }

        Ok(response)
    }
}

#[async_trait]
impl CompletionProvider for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    async fn complete(&self, request: CompletionRequest<'_>) -> Result<String, ProviderError> {
        let responses_request = build_request(&request);

        info!(
            "OpenAI Responses API request: model={}, turn={}",
            request.model,
            match request.turn {
                Turn::Translation { .. } => "translation",
                Turn::Chat { .. } => "chat",
            }
        );

        let response = self.send_request(&responses_request).await?;

        let reply: ResponsesReply = response
            .json()
            .await
            .map_err(|e| ProviderError::Parse(e.to_string()))?;

        let text = extract_output_text(&reply)
            .ok_or_else(|| ProviderError::Parse("response carried no output text".to_string()))?;

        info!("OpenAI reply received: {} bytes", text.len());
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translation_request_serializes_literal_input() {
        let request = CompletionRequest {
            model: "test-model",
            turn: Turn::Translation {
                instructions: "Translate accurately.",
                input: "Translate the following text to French: Hello".to_string(),
            },
        };

        let json = serde_json::to_string(&build_request(&request)).unwrap();
        assert!(json.contains(r#""instructions":"Translate accurately.""#));
        assert!(json.contains(r#""input":"Translate the following text to French: Hello""#));
        assert!(!json.contains("reasoning"));
    }

    #[test]
    fn test_chat_request_puts_directive_first() {
        let mut transcript = Transcript::new();
        transcript.push_assistant("Comment allez-vous?");
        transcript.push_user("Je vais bien");

        let request = CompletionRequest {
            model: "test-model",
            turn: Turn::Chat {
                directive: "Reply in French.".to_string(),
                transcript: &transcript,
            },
        };

        let body = build_request(&request);
        let Input::Messages(messages) = &body.input else {
            panic!("chat turn must serialize to a message array");
        };
        assert_eq!(messages.len(), 3);
        assert!(matches!(messages[0].role, InputRole::Developer));
        assert_eq!(messages[0].content, "Reply in French.");
        assert!(matches!(messages[1].role, InputRole::Assistant));
        assert!(matches!(messages[2].role, InputRole::User));

        let json = serde_json::to_string(&body).unwrap();
        assert!(json.contains(r#""role":"developer""#));
        assert!(json.contains(r#""effort":"low""#));
        assert!(!json.contains("instructions"));
    }

    #[test]
    fn test_extract_output_text_concatenates_message_parts() {
        let json = r#"{
            "output": [
                {"type": "reasoning", "content": []},
                {"type": "message", "content": [
                    {"type": "output_text", "text": "Comment "},
                    {"type": "output_text", "text": "allez-vous?"}
                ]}
            ]
        }"#;
        let reply: ResponsesReply = serde_json::from_str(json).unwrap();
        assert_eq!(
            extract_output_text(&reply).as_deref(),
            Some("Comment allez-vous?")
        );
    }

    #[test]
    fn test_extract_output_text_empty_payload_is_none() {
        let reply: ResponsesReply = serde_json::from_str(r#"{"output": []}"#).unwrap();
        assert!(extract_output_text(&reply).is_none());

        let reply: ResponsesReply =
            serde_json::from_str(r#"{"output": [{"type": "reasoning", "content": []}]}"#).unwrap();
        assert!(extract_output_text(&reply).is_none());
    }

    #[test]
    fn test_input_role_serialization() {
        assert_eq!(
            serde_json::to_string(&InputRole::Developer).unwrap(),
            "\"developer\""
        );
        assert_eq!(serde_json::to_string(&InputRole::User).unwrap(), "\"user\"");
        assert_eq!(
            serde_json::to_string(&InputRole::Assistant).unwrap(),
            "\"assistant\""
        );
    }
}
