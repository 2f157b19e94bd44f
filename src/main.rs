use std::collections::HashMap;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use log::{debug, info, warn};
use tokio::io::{AsyncBufReadExt, BufReader};

use banter::page::{Button, Dropdown, TextDisplay};
use banter::{
  Action, ActivateEvent, BanterBackend, BanterConfig, Credential,
  OpenAiClient, Page,
};

/// Ask a chat model for an icebreaker, fun fact, joke or weather prompt
#[derive(Parser, Debug)]
#[command(name = "banter", version, about)]
struct Cli
{   /// JSON config file
    #[arg(long)]
    config: Option<PathBuf>
  , /// Bearer credential for the completion endpoint
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    api_key: Option<String>
  , /// meeting, classroom or gamenight
    #[arg(long)]
    context: Option<String>
  , /// friendlyCoworker, sassyIntern or professorBot
    #[arg(long)]
    persona: Option<String>
  , /// Override the configured model
    #[arg(long)]
    model: Option<String>
  , /// icebreaker, funfact, joke or weather; omit for interactive mode
    action: Option<Action>
}

/// Display that writes each update to stdout
struct TerminalDisplay;

impl TextDisplay for TerminalDisplay
{   fn set_text(&self, text: &str)
    {   let mut out = std::io::stdout().lock();
        let _ = writeln!(out, "{}", text);
        let _ = out.flush();
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Command
{   Trigger(Action)
  , Context(String)
  , Persona(String)
  , Help
  , Quit
}

fn parse_command(line: &str) -> Result<Command, banter::Error>
{   let mut words = line.split_whitespace();
    let head = words.next().unwrap_or("");
    let rest = words.collect::<Vec<_>>().join(" ");
    match head
    {   "context" => Ok(Command::Context(rest))
      , "persona" => Ok(Command::Persona(rest))
      , "help" | "?" => Ok(Command::Help)
      , "quit" | "exit" => Ok(Command::Quit)
      , other => Action::from_value(other).map(Command::Trigger)
    }
}

const HELP: &str = "\
commands:
  icebreaker | funfact | joke | weather
  context <meeting|classroom|gamenight>
  persona <friendlyCoworker|sassyIntern|professorBot>
  quit";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>>
{   env_logger::init();
    let cli = Cli::parse();

    let mut config = match &cli.config
    {   Some(path) => BanterConfig::from_file(path)?
      , None => BanterConfig::default()
    };
    if let Some(model) = cli.model
    {   config.api.model = model;
    }
    let context = cli.context.unwrap_or(config.context);
    let persona = cli.persona.unwrap_or(config.persona);

    let credential = match cli.api_key
    {   Some(key) => Credential::new(key)
      , None => {
          warn!("No API key given; requests will fail");
          Credential::default()
        }
    };
    let client = OpenAiClient::new(config.api, credential)?;

    let context_dropdown = Arc::new(Dropdown::new(context));
    let persona_dropdown = Arc::new(Dropdown::new(persona));
    let buttons: HashMap<Action, Arc<Button>> = Action::ALL
      .into_iter()
      .map(|action| (action, Arc::new(Button::new())))
      .collect();
    let page = buttons.iter().fold(
      Page::new(
        context_dropdown.clone(),
        persona_dropdown.clone(),
        Arc::new(TerminalDisplay)
      ),
      |page, (action, button)| page.with_trigger(*action, button.clone())
    );
    let page = Arc::new(page);

    let backend = BanterBackend::new(Arc::new(client), page.clone());
    page.signal_loaded();
    debug!("Page ready, triggers bound: {}", backend.is_bound());

    if let Some(action) = cli.action
    {   let mut events = backend.activate(action)?;
        while let Some(event) = events.recv().await
        {   if let ActivateEvent::Displayed(_) = event
            {   break;
            }
        }
        return Ok(backend.shutdown().await?);
    }

    println!("{}", HELP);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await?
    {   let line = line.trim();
        if line.is_empty()
        {   continue;
        }
        match parse_command(line)
        {   Ok(Command::Trigger(action)) => buttons[&action].click()
          , Ok(Command::Context(value)) => {
              info!("context -> {:?}", value);
              context_dropdown.select(value);
            }
          , Ok(Command::Persona(value)) => {
              info!("persona -> {:?}", value);
              persona_dropdown.select(value);
            }
          , Ok(Command::Help) => println!("{}", HELP)
          , Ok(Command::Quit) => break
          , Err(e) => eprintln!("{}", e)
        }
    }

    backend.shutdown().await?;
    Ok(())
}
