//! Async host for the explorer on tokio.
//!
//! Performs [`Effect`]s: fetches and debounce timers run as spawned tasks
//! whose completions come back as [`Message`]s over an unbounded channel.
//! In-flight fetches are never aborted; the coordinator's token check
//! decides whether a late result is shown.

use std::sync::Arc;

use nsc_client::{CatalogBackend, CatalogClient};
use tokio::sync::mpsc;
use tokio::time::sleep;

use crate::error::{FetchFailure, Result};
use crate::explorer::Explorer;
use crate::history::History;
use crate::message::{Effect, Message};
use crate::route::CatalogUrl;
use crate::settings::ExplorerSettings;

/// Drives an [`Explorer`] against a [`CatalogBackend`].
pub struct ExplorerRuntime<B: CatalogBackend, H: History> {
    explorer: Explorer<H>,
    backend: Arc<B>,
    sender: mpsc::UnboundedSender<Message>,
    receiver: mpsc::UnboundedReceiver<Message>,
    /// Location already queued as a navigation and not yet applied.
    queued_navigation: Option<CatalogUrl>,
}

impl<H: History> ExplorerRuntime<CatalogClient, H> {
    /// Runtime talking HTTP to the backend configured in `settings`.
    pub fn from_settings(settings: &ExplorerSettings, history: H) -> Result<Self> {
        let client = CatalogClient::new(&settings.client)?;
        let explorer = Explorer::with_quiet_window(history, settings.search_debounce());
        Ok(Self::new(client, explorer))
    }
}

impl<B: CatalogBackend, H: History> ExplorerRuntime<B, H> {
    /// Wrap an explorer.
    pub fn new(backend: B, explorer: Explorer<H>) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self {
            explorer,
            backend: Arc::new(backend),
            sender,
            receiver,
            queued_navigation: None,
        }
    }

    /// Sender for user input and host navigation events.
    pub fn sender(&self) -> mpsc::UnboundedSender<Message> {
        self.sender.clone()
    }

    /// The explorer being driven.
    pub fn explorer(&self) -> &Explorer<H> {
        &self.explorer
    }

    /// Mutable access, for hosts that move history themselves.
    pub fn explorer_mut(&mut self) -> &mut Explorer<H> {
        &mut self.explorer
    }

    /// Start the explorer and perform its initial effects.
    pub fn start(&mut self) {
        let effects = self.explorer.start();
        self.perform(effects);
    }

    /// Process one message immediately.
    pub fn dispatch(&mut self, message: Message) {
        let effects = self.explorer.update(message);
        self.perform(effects);

        // History backends without popstate report a Back only through the
        // changed location; queue it once, like a browser would.
        if !self.explorer.awaiting_navigation() {
            self.queued_navigation = None;
            return;
        }
        let url = self.explorer.history().current();
        if self.queued_navigation.as_ref() != Some(&url) {
            self.queued_navigation = Some(url.clone());
            self.send(Message::Navigated(url));
        }
    }

    /// Wait for the next queued message and process it.
    pub async fn step(&mut self) {
        if let Some(message) = self.receiver.recv().await {
            self.dispatch(message);
        }
    }

    /// Process messages until `done` holds for the explorer.
    pub async fn run_until(&mut self, mut done: impl FnMut(&Explorer<H>) -> bool) {
        while !done(&self.explorer) {
            self.step().await;
        }
    }

    fn perform(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchTaxonomy => {
                    let backend = Arc::clone(&self.backend);
                    let sender = self.sender.clone();
                    tokio::spawn(async move {
                        let result = backend
                            .fetch_taxonomy()
                            .await
                            .map_err(FetchFailure::from);
                        deliver(&sender, Message::TaxonomyLoaded(result));
                    });
                }
                Effect::FetchDesigns(request) => {
                    let backend = Arc::clone(&self.backend);
                    let sender = self.sender.clone();
                    tokio::spawn(async move {
                        let result = backend
                            .fetch_designs(&request.query)
                            .await
                            .map_err(FetchFailure::from);
                        deliver(
                            &sender,
                            Message::DesignsLoaded {
                                token: request.token,
                                result,
                            },
                        );
                    });
                }
                Effect::ScheduleDebounce { ticket, after } => {
                    let sender = self.sender.clone();
                    tokio::spawn(async move {
                        sleep(after).await;
                        deliver(&sender, Message::SearchQuietElapsed(ticket));
                    });
                }
            }
        }
    }

    fn send(&self, message: Message) {
        deliver(&self.sender, message);
    }
}

fn deliver(sender: &mpsc::UnboundedSender<Message>, message: Message) {
    if sender.send(message).is_err() {
        tracing::debug!("Explorer runtime dropped, discarding completion");
    }
}
