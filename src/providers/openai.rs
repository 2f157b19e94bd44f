use async_trait::async_trait;
use log::{debug, error, trace};

use crate::config::{ApiConfig, Credential};
use crate::request::{ChatMessage, ChatRequest, ChatResponse};

/// Client for an OpenAI-compatible chat-completion endpoint.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct OpenAiClient
{   config: ApiConfig
  , credential: Credential
  , http_client: reqwest::Client
}

impl OpenAiClient
{   /// Create a client for `config`, authenticating with `credential`
    pub fn new(
      config: ApiConfig
    , credential: Credential
    ) -> Result<Self, crate::error::Error>
    {   debug!(
          "Creating OpenAiClient for {} ({})",
          config.endpoint, config.model
        );
        config.validate()?;
        if credential.is_empty()
        {   debug!("Credential is empty; requests will be rejected");
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout()
        {   builder = builder.timeout(timeout);
        }
        let http_client = builder.build().map_err(|e| {
          error!("Failed to build HTTP client: {}", e);
          crate::error::Error::InvalidConfiguration(e.to_string())
        })?;

        Ok(OpenAiClient
        {   config
          , credential
          , http_client
        })
    }

    pub fn config(&self) -> &ApiConfig
    {   &self.config
    }

    /// Post `messages` and return the first choice's trimmed content
    pub async fn try_fetch_completion(
      &self
    , messages: &[ChatMessage]
    ) -> Result<String, crate::error::Error>
    {   let request = ChatRequest
        {   model: &self.config.model
          , messages
          , max_tokens: self.config.max_tokens
        };

        trace!("Completion request: {:?}", request);

        let response = self.http_client
          .post(&self.config.endpoint)
          .header("Authorization", self.credential.bearer())
          .header("Content-Type", "application/json")
          .json(&request)
          .send()
          .await
          .map_err(|e| {
            error!("HTTP error: {}", e);
            crate::error::Error::from(e)
          })?;

        let status = response.status();
        trace!("Completion response status: {}", status);

        if !status.is_success()
        {   let error_text = response.text().await
              .unwrap_or_else(|_|
                "Unknown error".to_string()
              );
            error!("Completion API error ({}): {}", status, error_text);
            return Err(crate::error::Error::ApiError(
              format!("{}: {}", status, error_text)
            ));
        }

        let chat_response: ChatResponse
          = response.json().await.map_err(|e| {
            error!("Parse error: {}", e);
            crate::error::Error::ParseError(e.to_string())
          })?;

        chat_response.choices.first()
          .map(|c| c.message.content.trim().to_string())
          .ok_or_else(|| {
            error!("No choices in response");
            crate::error::Error::NoChoicesInResponse
          })
    }
}

#[async_trait]
impl crate::providers::CompletionSource for OpenAiClient
{   async fn fetch_completion(
      &self
    , messages: Vec<ChatMessage>
    ) -> String
    {   match self.try_fetch_completion(&messages).await
        {   Ok(text) => {
              debug!("Completion received ({} chars)", text.len());
              text
            }
          , Err(e) => {
              error!("Completion failed: {}", e);
              crate::providers::FALLBACK_MESSAGE.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests
{   use super::*;

    #[test]
    fn rejects_invalid_config()
    {   let config = ApiConfig
        {   model: String::new()
          , ..ApiConfig::default()
        };
        let err = OpenAiClient::new(config, Credential::new("k"))
          .unwrap_err();
        assert!(matches!(
          err,
          crate::error::Error::InvalidConfiguration(_)
        ));
    }

    #[test]
    fn empty_credential_is_accepted()
    {   let client = OpenAiClient::new(
          ApiConfig::default(),
          Credential::default()
        ).unwrap();
        assert_eq!(client.config().max_tokens, 60);
    }
}
