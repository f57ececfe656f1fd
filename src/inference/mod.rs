pub mod provider;
pub mod providers;
pub mod types;

pub use provider::{CompletionProvider, CompletionRequest, ProviderError, Turn};
pub use providers::OpenAiProvider;
pub use types::{Message, Role, Transcript};
