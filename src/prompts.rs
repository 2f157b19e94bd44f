//! The four canned prompts and the controls that fire them

/// One of the four trigger controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action
{   Icebreaker
  , FunFact
  , Joke
  , Weather
}

impl Action
{   pub const ALL: [Action; 4]
      = [Action::Icebreaker, Action::FunFact, Action::Joke, Action::Weather];

    /// Only the four literal action names are accepted.
    pub fn from_value(value: &str)
      -> Result<Action, crate::error::Error>
    {   Action::ALL
          .into_iter()
          .find(|action| action.value() == value)
          .ok_or_else(|| {
            crate::error::Error::UnknownAction(value.to_string())
          })
    }

    pub fn value(self) -> &'static str
    {   match self
        {   Action::Icebreaker => "icebreaker"
          , Action::FunFact => "funfact"
          , Action::Joke => "joke"
          , Action::Weather => "weather"
        }
    }

    /// Id of the host control bound to this action
    pub fn control_id(self) -> &'static str
    {   match self
        {   Action::Icebreaker => "iceBtn"
          , Action::FunFact => "factBtn"
          , Action::Joke => "jokeBtn"
          , Action::Weather => "weatherBtn"
        }
    }

    /// User message sent for this action
    pub fn prompt(self) -> &'static str
    {   match self
        {   Action::Icebreaker =>
              "Give me a simple icebreaker question for a group of new friends."
          , Action::FunFact =>
              "Share a fun fact that is interesting and easy to understand."
          , Action::Joke =>
              "Tell me a friendly, clean joke suitable for all ages."
          , Action::Weather =>
              "Write a friendly prompt encouraging people to share \
               what the weather is like in their location."
        }
    }
}

impl std::str::FromStr for Action
{   type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err>
    {   Action::from_value(s)
    }
}

impl std::fmt::Display for Action
{   fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result
    {   f.write_str(self.value())
    }
}
