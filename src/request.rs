//! Chat-completion request and response types

use serde::{Deserialize, Serialize};

/// Speaker of a single chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role
{   System
  , User
  , Assistant
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage
{   pub role: Role
  , pub content: String
}

impl ChatMessage
{   pub fn system(content: impl Into<String>) -> Self
    {   ChatMessage
        {   role: Role::System
          , content: content.into()
        }
    }

    pub fn user(content: impl Into<String>) -> Self
    {   ChatMessage
        {   role: Role::User
          , content: content.into()
        }
    }
}

/// Request body posted to the completion endpoint
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest<'a>
{   pub model: &'a str
  , pub messages: &'a [ChatMessage]
  , pub max_tokens: usize
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse
{   pub choices: Vec<Choice>
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice
{   pub message: ChoiceMessage
  , #[serde(default)]
    pub finish_reason: Option<String>
}

/// Only the content of a returned message is read
#[derive(Debug, Clone, Deserialize)]
pub struct ChoiceMessage
{   pub content: String
}

/// Build the system + user pair sent for one activation.
/// No earlier turns are ever included.
pub fn compose_messages(
  system_instruction: impl Into<String>
, user_prompt: impl Into<String>
) -> Vec<ChatMessage>
{   vec![
      ChatMessage::system(system_instruction)
    , ChatMessage::user(user_prompt)
    ]
}

#[cfg(test)]
mod tests
{   use super::*;

    #[test]
    fn request_body_has_exact_shape()
    {   let messages = compose_messages("be nice", "hello");
        let body = ChatRequest
        {   model: "gpt-4.1"
          , messages: &messages
          , max_tokens: 60
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json, serde_json::json!({
          "model": "gpt-4.1",
          "messages": [
            { "role": "system", "content": "be nice" },
            { "role": "user", "content": "hello" }
          ],
          "max_tokens": 60
        }));
    }

    #[test]
    fn response_parses_assistant_choice()
    {   let raw = r#"{
          "id": "chatcmpl-1",
          "choices": [
            { "index": 0,
              "message": { "role": "assistant", "content": " hi " },
              "finish_reason": "stop" }
          ]
        }"#;
        let parsed: ChatResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.choices.len(), 1);
        assert_eq!(parsed.choices[0].message.content, " hi ");
        assert_eq!(parsed.choices[0].finish_reason.as_deref(), Some("stop"));
    }

    #[test]
    fn response_role_is_not_required()
    {   let raw = r#"{
          "choices": [
            { "message": { "content": "no role here" } },
            { "message": { "role": "model", "content": "odd role" } }
          ]
        }"#;
        let parsed: ChatResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.choices[0].message.content, "no role here");
        assert_eq!(parsed.choices[1].message.content, "odd role");
    }
}
