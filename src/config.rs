//! Configuration for the completion endpoint and initial selections

use std::fs;
use std::path::Path;
use std::time::Duration;
use log::debug;
use serde::{Deserialize, Serialize};

pub const DEFAULT_ENDPOINT: &str
  = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-4.1";
pub const DEFAULT_MAX_TOKENS: usize = 60;

/// Completion endpoint configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig
{   /// Full chat-completion URL
    pub endpoint: String
  , /// Model name sent with every request
    pub model: String
  , /// Max tokens to generate
    pub max_tokens: usize
  , /// Request timeout in seconds; none means wait forever
    pub timeout_secs: Option<u64>
}

impl Default for ApiConfig
{   fn default() -> Self
    {   ApiConfig
        {   endpoint: DEFAULT_ENDPOINT.to_string()
          , model: DEFAULT_MODEL.to_string()
          , max_tokens: DEFAULT_MAX_TOKENS
          , timeout_secs: None
        }
    }
}

impl ApiConfig
{   /// Reject settings that can never produce a valid request
    pub fn validate(&self) -> Result<(), crate::error::Error>
    {   if self.endpoint.trim().is_empty()
        {   return Err(crate::error::Error::InvalidConfiguration(
              "endpoint is empty".to_string()
            ));
        }
        if self.model.trim().is_empty()
        {   return Err(crate::error::Error::InvalidConfiguration(
              "model is empty".to_string()
            ));
        }
        if self.max_tokens == 0
        {   return Err(crate::error::Error::InvalidConfiguration(
              "max_tokens must be positive".to_string()
            ));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Option<Duration>
    {   self.timeout_secs.map(Duration::from_secs)
    }
}

/// Bearer credential handed to the API client.
/// Never validated; an empty value is sent as-is.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credential(String);

impl Credential
{   pub fn new(key: impl Into<String>) -> Self
    {   Credential(key.into())
    }

    pub fn bearer(&self) -> String
    {   format!("Bearer {}", self.0)
    }

    pub fn is_empty(&self) -> bool
    {   self.0.is_empty()
    }
}

impl std::fmt::Debug for Credential
{   fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result
    {   f.write_str("Credential(<redacted>)")
    }
}

/// banter configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BanterConfig
{   /// Endpoint configuration
    pub api: ApiConfig
  , /// Initial context selector value
    pub context: String
  , /// Initial persona selector value
    pub persona: String
}

impl Default for BanterConfig
{   fn default() -> Self
    {   BanterConfig
        {   api: ApiConfig::default()
          , context: "meeting".to_string()
          , persona: "friendlyCoworker".to_string()
        }
    }
}

impl BanterConfig
{   /// Load configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>)
      -> Result<Self, crate::error::Error>
    {   let path = path.as_ref();
        debug!("Loading config from {}", path.display());
        let raw = fs::read_to_string(path).map_err(|e| {
          crate::error::Error::InvalidConfiguration(
            format!("{}: {}", path.display(), e)
          )
        })?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str)
      -> Result<Self, crate::error::Error>
    {   let config: BanterConfig = serde_json::from_str(raw)
          .map_err(|e| {
            crate::error::Error::InvalidConfiguration(e.to_string())
          })?;
        config.api.validate()?;
        Ok(config)
    }
}
