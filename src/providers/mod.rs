//! Completion providers

pub mod openai;

// Re-export for convenience
pub use openai::OpenAiClient;

use async_trait::async_trait;

/// Shown in place of a completion whenever a request fails.
pub const FALLBACK_MESSAGE: &str
  = "Sorry, something went wrong. Please try again.";

/// Anything that can turn a message list into display text.
///
/// Implementations never fail: every error is folded into
/// [`FALLBACK_MESSAGE`] before it reaches the caller.
#[async_trait]
pub trait CompletionSource: Send + Sync
{   async fn fetch_completion(
      &self
    , messages: Vec<crate::request::ChatMessage>
    ) -> String;
}
