//! Context and persona instruction tables, and the system message built
//! from them.

/// Situational setting that picks the base tone instruction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Context
{   #[default]
    Meeting
  , Classroom
  , Gamenight
}

const CONTEXT_INSTRUCTIONS: [(Context, &str, &str); 3] = [
  ( Context::Meeting
  , "meeting"
  , "You are a friendly, helpful assistant for team meetings. \
     Keep responses professional, positive, and concise."
  )
, ( Context::Classroom
  , "classroom"
  , "You are a fun, encouraging assistant for a classroom. \
     Use simple words and keep things light and educational."
  )
, ( Context::Gamenight
  , "gamenight"
  , "You are a playful, energetic assistant for game nights. \
     Make responses lively and fun for everyone!"
  )
];

impl Context
{   pub const ALL: [Context; 3]
      = [Context::Meeting, Context::Classroom, Context::Gamenight];

    /// Resolve a raw selector value. Anything unrecognised is a meeting.
    pub fn from_value(value: &str) -> Context
    {   CONTEXT_INSTRUCTIONS
          .iter()
          .find(|(_, key, _)| *key == value)
          .map(|(context, _, _)| *context)
          .unwrap_or_default()
    }

    pub fn value(self) -> &'static str
    {   CONTEXT_INSTRUCTIONS[self as usize].1
    }

    pub fn instruction(self) -> &'static str
    {   CONTEXT_INSTRUCTIONS[self as usize].2
    }
}

/// Optional stylistic overlay appended to the context instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Persona
{   FriendlyCoworker
  , SassyIntern
  , ProfessorBot
}

const PERSONA_INSTRUCTIONS: [(Persona, &str, &str); 3] = [
  (Persona::FriendlyCoworker, "friendlyCoworker", "")
, ( Persona::SassyIntern
  , "sassyIntern"
  , "Respond in the voice of a friendly, casual intern who uses emojis."
  )
, ( Persona::ProfessorBot
  , "professorBot"
  , "Respond in the voice of a knowledgeable professor \
     who explains things clearly."
  )
];

impl Persona
{   pub const ALL: [Persona; 3] = [
      Persona::FriendlyCoworker
    , Persona::SassyIntern
    , Persona::ProfessorBot
    ];

    pub fn from_value(value: &str) -> Option<Persona>
    {   PERSONA_INSTRUCTIONS
          .iter()
          .find(|(_, key, _)| *key == value)
          .map(|(persona, _, _)| *persona)
    }

    pub fn value(self) -> &'static str
    {   PERSONA_INSTRUCTIONS[self as usize].1
    }

    /// May be empty: the friendly coworker adds nothing.
    pub fn instruction(self) -> &'static str
    {   PERSONA_INSTRUCTIONS[self as usize].2
    }
}

/// Combine the selected context and persona into one system instruction.
///
/// Never fails. An unknown context resolves to the meeting instruction and
/// an unknown persona contributes nothing.
pub fn system_message(context_value: &str, persona_value: &str) -> String
{   let base = Context::from_value(context_value).instruction();
    let overlay = Persona::from_value(persona_value)
      .map(Persona::instruction)
      .unwrap_or("");
    if overlay.is_empty()
    {   base.to_string()
    } else
    {   format!("{} {}", base, overlay)
    }
}

#[cfg(test)]
mod tests
{   use super::*;

    #[test]
    fn friendly_coworker_leaves_each_context_unchanged()
    {   for context in Context::ALL
        {   assert_eq!(
              system_message(context.value(), "friendlyCoworker"),
              context.instruction()
            );
        }
    }

    #[test]
    fn classroom_sassy_intern_is_joined_by_one_space()
    {   assert_eq!(
          system_message("classroom", "sassyIntern"),
          "You are a fun, encouraging assistant for a classroom. \
           Use simple words and keep things light and educational. \
           Respond in the voice of a friendly, casual intern who uses emojis."
        );
    }

    #[test]
    fn unknown_context_falls_back_to_meeting()
    {   let meeting = Context::Meeting.instruction();
        assert_eq!(system_message("", "friendlyCoworker"), meeting);
        assert_eq!(system_message("disco", ""), meeting);
        assert_eq!(system_message("Classroom", "nobody"), meeting);
    }

    #[test]
    fn unknown_persona_appends_nothing()
    {   assert_eq!(
          system_message("gamenight", "pirate"),
          Context::Gamenight.instruction()
        );
        assert_eq!(
          system_message("gamenight", ""),
          Context::Gamenight.instruction()
        );
    }

    #[test]
    fn professor_bot_overlay_on_meeting()
    {   let msg = system_message("meeting", "professorBot");
        assert!(msg.starts_with(Context::Meeting.instruction()));
        assert!(msg.ends_with(
          "Respond in the voice of a knowledgeable professor \
           who explains things clearly."
        ));
    }

    #[test]
    fn table_order_matches_enum_order()
    {   for context in Context::ALL
        {   assert_eq!(Context::from_value(context.value()), context);
        }
        for persona in Persona::ALL
        {   assert_eq!(Persona::from_value(persona.value()), Some(persona));
        }
    }
}
