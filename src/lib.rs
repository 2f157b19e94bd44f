pub mod error;
pub mod config;
pub mod instructions;
pub mod prompts;
pub mod request;
pub mod providers;
pub mod page;
pub mod client;

pub use client::{BanterBackend, LOADING_MESSAGE};
pub use config::{ApiConfig, BanterConfig, Credential};
pub use error::Error;
pub use instructions::{system_message, Context, Persona};
pub use page::{MemoryPage, Page};
pub use prompts::Action;
pub use providers::{CompletionSource, OpenAiClient, FALLBACK_MESSAGE};

/*

banter: pick a context and a persona, press one of four buttons, read
what the model says back.

banter/
├── Cargo.toml
├── src/
│   ├── lib.rs           # Re-exports and the controller channel types
│   ├── main.rs          # Terminal host
│   ├── error.rs         # Error type
│   ├── config.rs        # Endpoint config and credential
│   ├── instructions.rs  # Context/persona tables, system message
│   ├── prompts.rs       # The four canned prompts
│   ├── request.rs       # Chat request/response wire types
│   ├── providers/       # Completion sources
│   │   ├── mod.rs
│   │   └── openai.rs
│   ├── page.rs          # Host seam: selectors, triggers, display
│   └── client.rs        # Controller backend
└── tests/

*/

// BANTER CONTROLLER INTERFACE:

// ===== Activate =====

/// Progress of one activation, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivateEvent
{   /// Loading placeholder has been written to the display
    Loading
  , /// Final text (completion or fallback) has been written
    Displayed(String)
}

pub type ActivateReplySender
  = tokio::sync::mpsc::UnboundedSender<ActivateEvent>;

/// One activation, composed at trigger time. The loading placeholder
/// is already on the display when this is queued.
pub struct ActivateArgs
{   pub action: crate::Action
  , pub messages: Vec<crate::request::ChatMessage>
  , pub reply: Option<ActivateReplySender>
}

// ===== KillProcess =====

pub type KillProcessReply = Result<(), crate::error::Error>;
pub type KillProcessReplySender
  = tokio::sync::mpsc::UnboundedSender<KillProcessReply>;

pub struct KillProcessArgs
{   pub reply: KillProcessReplySender
}

// ===== BanterHand (sender side) =====

#[derive(Clone)]
pub struct BanterHand
{   pub activate_tx
      : tokio::sync::mpsc::UnboundedSender<ActivateArgs>
  , pub kill_process_tx
      : tokio::sync::mpsc::UnboundedSender<KillProcessArgs>
}

// ===== BanterFoot (receiver side) =====

pub struct BanterFoot
{   pub activate_rx
      : tokio::sync::mpsc::UnboundedReceiver<ActivateArgs>
  , pub kill_process_rx
      : tokio::sync::mpsc::UnboundedReceiver<KillProcessArgs>
}
