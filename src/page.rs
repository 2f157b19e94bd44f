//! Host page seam: selectors, trigger controls and the text display.
//!
//! The controller only ever reads selector values, writes display text and
//! registers activation handlers, so any UI toolkit can sit behind these
//! traits. In-memory versions are provided for tests and the terminal host.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use log::{debug, trace};

use crate::prompts::Action;

pub const CONTEXT_SELECTOR_ID: &str = "contextDropdown";
pub const PERSONA_SELECTOR_ID: &str = "personaDropdown";
pub const DISPLAY_ID: &str = "response";

/// Called every time a trigger control fires
pub type ActivateHandler = Arc<dyn Fn() + Send + Sync>;

type LoadedCallback = Box<dyn FnOnce(&Page) + Send>;

pub trait Selector: Send + Sync
{   fn value(&self) -> String;
}

pub trait TextDisplay: Send + Sync
{   fn set_text(&self, text: &str);
}

pub trait TriggerControl: Send + Sync
{   fn on_activate(&self, handler: ActivateHandler);
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T>
{   mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

enum LoadState
{   Pending(Vec<LoadedCallback>)
  , Loaded
}

/// The elements the controller talks to, plus the loaded signal
pub struct Page
{   context: Arc<dyn Selector>
  , persona: Arc<dyn Selector>
  , triggers: HashMap<Action, Arc<dyn TriggerControl>>
  , display: Arc<dyn TextDisplay>
  , load_state: Mutex<LoadState>
}

impl Page
{   pub fn new(
      context: Arc<dyn Selector>
    , persona: Arc<dyn Selector>
    , display: Arc<dyn TextDisplay>
    ) -> Self
    {   Page
        {   context
          , persona
          , triggers: HashMap::new()
          , display
          , load_state: Mutex::new(LoadState::Pending(vec![]))
        }
    }

    /// Attach the control that fires `action`
    pub fn with_trigger(
      mut self
    , action: Action
    , control: Arc<dyn TriggerControl>
    ) -> Self
    {   self.triggers.insert(action, control);
        self
    }

    pub fn trigger(&self, action: Action)
      -> Option<&Arc<dyn TriggerControl>>
    {   self.triggers.get(&action)
    }

    pub fn context_value(&self) -> String
    {   self.context.value()
    }

    pub fn persona_value(&self) -> String
    {   self.persona.value()
    }

    /// System instruction for the current selector values
    pub fn system_message(&self) -> String
    {   crate::instructions::system_message(
          &self.context_value(),
          &self.persona_value()
        )
    }

    pub fn set_text(&self, text: &str)
    {   trace!("#{} <- {:?}", DISPLAY_ID, text);
        self.display.set_text(text);
    }

    pub fn is_loaded(&self) -> bool
    {   matches!(*lock(&self.load_state), LoadState::Loaded)
    }

    /// Run `callback` once the page has loaded, or right away if it
    /// already has.
    pub fn when_loaded(
      &self
    , callback: impl FnOnce(&Page) + Send + 'static
    )
    {   {   let mut state = lock(&self.load_state);
            if let LoadState::Pending(waiting) = &mut *state
            {   waiting.push(Box::new(callback));
                return;
            }
        }
        callback(self);
    }

    /// Mark the page loaded. Pending callbacks run exactly once; later
    /// signals are ignored.
    pub fn signal_loaded(&self)
    {   let waiting = {
          let mut state = lock(&self.load_state);
          match std::mem::replace(&mut *state, LoadState::Loaded)
          {   LoadState::Pending(waiting) => waiting
            , LoadState::Loaded => {
                debug!("Page already loaded");
                return;
              }
          }
        };
        debug!("Page loaded; running {} callbacks", waiting.len());
        for callback in waiting
        {   callback(self);
        }
    }
}

// ===== In-memory elements =====

/// Selector holding a plain string value
#[derive(Debug, Default)]
pub struct Dropdown
{   value: Mutex<String>
}

impl Dropdown
{   pub fn new(value: impl Into<String>) -> Self
    {   Dropdown
        {   value: Mutex::new(value.into())
        }
    }

    pub fn select(&self, value: impl Into<String>)
    {   *lock(&self.value) = value.into();
    }
}

impl Selector for Dropdown
{   fn value(&self) -> String
    {   lock(&self.value).clone()
    }
}

/// Trigger fired by calling [`Button::click`]
#[derive(Default)]
pub struct Button
{   handlers: Mutex<Vec<ActivateHandler>>
}

impl Button
{   pub fn new() -> Self
    {   Button::default()
    }

    pub fn click(&self)
    {   let handlers = lock(&self.handlers).clone();
        for handler in handlers
        {   handler();
        }
    }

    pub fn handler_count(&self) -> usize
    {   lock(&self.handlers).len()
    }
}

impl TriggerControl for Button
{   fn on_activate(&self, handler: ActivateHandler)
    {   lock(&self.handlers).push(handler);
    }
}

/// Display that remembers everything written to it
#[derive(Debug, Default)]
pub struct TextPanel
{   writes: Mutex<Vec<String>>
}

impl TextPanel
{   pub fn new() -> Self
    {   TextPanel::default()
    }

    /// Current text; empty before the first write
    pub fn text(&self) -> String
    {   lock(&self.writes).last().cloned().unwrap_or_default()
    }

    pub fn history(&self) -> Vec<String>
    {   lock(&self.writes).clone()
    }
}

impl TextDisplay for TextPanel
{   fn set_text(&self, text: &str)
    {   lock(&self.writes).push(text.to_string());
    }
}

/// A fully in-memory page with one button per action
pub struct MemoryPage
{   pub context: Arc<Dropdown>
  , pub persona: Arc<Dropdown>
  , pub display: Arc<TextPanel>
  , buttons: HashMap<Action, Arc<Button>>
  , page: Arc<Page>
}

impl MemoryPage
{   pub fn new(
      context: impl Into<String>
    , persona: impl Into<String>
    ) -> Self
    {   let context = Arc::new(Dropdown::new(context));
        let persona = Arc::new(Dropdown::new(persona));
        let display = Arc::new(TextPanel::new());
        let buttons: HashMap<Action, Arc<Button>> = Action::ALL
          .into_iter()
          .map(|action| (action, Arc::new(Button::new())))
          .collect();

        let page = buttons.iter().fold(
          Page::new(context.clone(), persona.clone(), display.clone()),
          |page, (action, button)| {
            page.with_trigger(*action, button.clone())
          }
        );

        MemoryPage
        {   context
          , persona
          , display
          , buttons
          , page: Arc::new(page)
        }
    }

    pub fn page(&self) -> Arc<Page>
    {   self.page.clone()
    }

    pub fn button(&self, action: Action) -> &Button
    {   &self.buttons[&action]
    }

    pub fn click(&self, action: Action)
    {   self.button(action).click();
    }
}
