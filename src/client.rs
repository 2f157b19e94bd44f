use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};
use tokio::sync::mpsc;
use log::{debug, trace, error, info};

use crate::page::Page;
use crate::providers::CompletionSource;
use crate::request::compose_messages;
use crate::{
  ActivateArgs, ActivateEvent, ActivateReplySender, BanterFoot, BanterHand,
};

/// Written to the display while a request is outstanding
pub const LOADING_MESSAGE: &str = "Loading...";

/// Idle -> Loading, done on the caller's side of the channel.
///
/// The placeholder is written and the selectors are read before this
/// returns, so later selector changes never leak into the request.
fn prepare_activation(
  page: &Page
, action: crate::Action
, reply: Option<ActivateReplySender>
) -> ActivateArgs
{   page.set_text(LOADING_MESSAGE);
    if let Some(reply) = &reply
    {   let _ = reply.send(ActivateEvent::Loading);
    }

    let messages = compose_messages(
      page.system_message(),
      action.prompt()
    );
    trace!("Messages for {}: {:?}", action, messages);

    ActivateArgs
    {   action
      , messages
      , reply
    }
}

/// Backend state for the controller loop
pub struct BanterBackendState
{   pub source: Arc<dyn CompletionSource>
  , pub page: Arc<Page>
}

impl BanterBackendState
{   pub fn new(
      source: Arc<dyn CompletionSource>
    , page: Arc<Page>
    ) -> Self
    {   debug!("Initializing BanterBackendState");
        BanterBackendState
        {   source
          , page
        }
    }

    /// Hand the request to its own task, which moves
    /// Loading -> Displaying whenever it finishes.
    /// Overlapping activations are not serialized.
    fn begin(&self, cmd: ActivateArgs)
    {   let ActivateArgs { action, messages, reply } = cmd;

        let source = self.source.clone();
        let page = self.page.clone();
        tokio::spawn(async move {
          let text = source.fetch_completion(messages).await;
          debug!("Displaying result for {}", action);
          page.set_text(&text);
          if let Some(reply) = reply
          {   let _ = reply.send(ActivateEvent::Displayed(text));
          }
        });
    }
}

/// Public API for the controller - owns the task
pub struct BanterBackend
{   hand: BanterHand
  , page: Arc<Page>
  , bound: Arc<AtomicBool>
  , _task_handle: tokio::task::JoinHandle<()>
}

impl BanterBackend
{   /// Create and spawn a new controller for `page`.
    ///
    /// Trigger controls are bound as soon as the page signals it has
    /// loaded (immediately if it already has). Must be called inside a
    /// tokio runtime. Dropping the backend ends the loop.
    pub fn new(
      source: Arc<dyn CompletionSource>
    , page: Arc<Page>
    ) -> Self
    {   debug!("Creating BanterBackend with task ownership");

        let (activate_tx, activate_rx)
          = mpsc::unbounded_channel();
        let (kill_process_tx, kill_process_rx)
          = mpsc::unbounded_channel();

        let hand = BanterHand
        {   activate_tx
          , kill_process_tx
        };

        let foot = BanterFoot
        {   activate_rx
          , kill_process_rx
        };

        // Only weak handles go into the page; the loop holds it strongly.
        let bound = Arc::new(AtomicBool::new(false));
        {   let activate_tx = hand.activate_tx.downgrade();
            let weak_page = Arc::downgrade(&page);
            let bound = bound.clone();
            page.when_loaded(move |page| {
              if let Err(e)
                = bind_triggers(page, &weak_page, &activate_tx, &bound)
              {   error!("Binding on load failed: {}", e);
              }
            });
        }

        let state = BanterBackendState::new(source, page.clone());
        let _task_handle = tokio::spawn(async move {
          run_backend_loop(foot, state).await
        });

        BanterBackend
        {   hand
          , page
          , bound
          , _task_handle
        }
    }

    /// Bind the trigger controls of this backend's page.
    /// Binding happens at most once.
    pub fn bind(&self)
      -> Result<(), crate::error::Error>
    {   bind_triggers(
          &self.page,
          &Arc::downgrade(&self.page),
          &self.hand.activate_tx.downgrade(),
          &self.bound
        )
    }

    pub fn is_bound(&self) -> bool
    {   self.bound.load(Ordering::SeqCst)
    }

    /// Activate `action`. The placeholder is on the display when this
    /// returns; the receiver sees `Loading` and then `Displayed`.
    pub fn activate(
      &self
    , action: crate::Action
    ) -> Result<
        mpsc::UnboundedReceiver<ActivateEvent>,
        crate::error::Error
      >
    {   debug!("activate queuing command for {}", action);
        let (reply_tx, reply_rx)
          = mpsc::unbounded_channel();

        let cmd = prepare_activation(&self.page, action, Some(reply_tx));

        self.hand.activate_tx
          .send(cmd)
          .map_err(|_| {
            error!("Backend channel closed");
            crate::error::Error::Other(
              "Backend disconnected".to_string()
            )
          })?;

        Ok(reply_rx)
    }

    /// Gracefully shutdown the controller loop.
    /// Requests already in flight still finish and write.
    pub async fn shutdown(self)
      -> Result<(), crate::error::Error>
    {   debug!("Shutting down BanterBackend");
        let (reply_tx, mut reply_rx)
          = mpsc::unbounded_channel();

        let cmd = crate::KillProcessArgs
        {   reply: reply_tx
        };

        self.hand.kill_process_tx
          .send(cmd)
          .map_err(|_| {
            error!("Backend channel already closed");
            crate::error::Error::Other(
              "Backend already shutdown".to_string()
            )
          })?;

        // Wait for shutdown confirmation
        if let Some(result) = reply_rx.recv().await
        {   debug!("Backend shutdown confirmed");
            result
        } else
        {   error!("Backend shutdown timeout");
            Err(crate::error::Error::Timeout)
        }
    }
}

fn bind_triggers(
  page: &Page
, weak_page: &Weak<Page>
, activate_tx: &mpsc::WeakUnboundedSender<ActivateArgs>
, bound: &AtomicBool
) -> Result<(), crate::error::Error>
{   let missing: Vec<&str> = crate::Action::ALL
      .iter()
      .filter(|action| page.trigger(**action).is_none())
      .map(|action| action.control_id())
      .collect();
    if !missing.is_empty()
    {   return Err(crate::error::Error::InvalidConfiguration(
          format!("page has no control for: {}", missing.join(", "))
        ));
    }

    if bound.swap(true, Ordering::SeqCst)
    {   debug!("Triggers already bound");
        return Err(crate::error::Error::AlreadyBound);
    }

    for action in crate::Action::ALL
    {   let Some(control) = page.trigger(action) else { continue };
        let weak_page = weak_page.clone();
        let activate_tx = activate_tx.clone();
        control.on_activate(Arc::new(move || {
          trace!("#{} activated", action.control_id());
          let (Some(page), Some(tx))
            = (weak_page.upgrade(), activate_tx.upgrade())
          else
          {   error!("Backend gone; ignoring {}", action);
              return;
          };
          let cmd = prepare_activation(&page, action, None);
          if tx.send(cmd).is_err()
          {   error!("Backend loop stopped; {} not sent", action);
          }
        }));
        debug!("Bound #{} to {}", action.control_id(), action);
    }
    Ok(())
}

/// Main controller event loop
///
/// tokio::select! is ONLY for fast queueing. Each activation
/// arrives already composed; the loop spawns its request and returns.
/// Ends once every strong sender is gone.
async fn run_backend_loop(
  foot: BanterFoot
, state: BanterBackendState
)
{   debug!("Starting BanterBackend event loop");
    let BanterFoot
    {   mut activate_rx
      , mut kill_process_rx
    } = foot;

    loop
    { tokio::select!
      { Some(cmd) = activate_rx.recv() => {
          debug!("Received Activate for {}", cmd.action);
          state.begin(cmd);
        }
      , Some(cmd) = kill_process_rx.recv() => {
          debug!("Received KillProcess");
          let _ = cmd.reply.send(Ok(()));
          info!("BanterBackend shutting down");
          break;
        }
      , else => {
          debug!("All controller channels closed");
          break;
        }
      }
    }
}
