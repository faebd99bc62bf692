//! Background lookups feeding a single display slot.
//!
//! The caller's loop never waits on the network: [`LookupDispatcher::submit`]
//! spawns one task per lookup and returns immediately. Each finished task
//! writes its text into a `watch` channel holding the current display text.
//! When lookups overlap the last writer wins; with `cancel_superseded` the
//! older task is aborted first, and every submit bumps a generation number
//! that a finishing task must still hold to publish. A task that is past its
//! last await when it is superseded therefore cannot overwrite newer text.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::error::EMPTY_INPUT_TEXT;
use crate::query::FlightQuery;
use crate::service::FlightLookupService;

/// Display text before the first lookup.
pub const INITIAL_TEXT: &str = "Enter flight number and track";

/// Runs lookups off the caller's loop and publishes their results.
#[derive(Debug)]
pub struct LookupDispatcher {
    service: Arc<FlightLookupService>,
    display: Arc<watch::Sender<String>>,
    generation: Arc<AtomicU64>,
    in_flight: Mutex<Option<JoinHandle<()>>>,
    cancel_superseded: bool,
}

impl LookupDispatcher {
    /// Create a dispatcher around a service.
    #[must_use]
    pub fn new(service: FlightLookupService, cancel_superseded: bool) -> Self {
        let (display, _) = watch::channel(INITIAL_TEXT.to_string());
        Self {
            service: Arc::new(service),
            display: Arc::new(display),
            generation: Arc::new(AtomicU64::new(0)),
            in_flight: Mutex::new(None),
            cancel_superseded,
        }
    }

    /// Subscribe to display text updates.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.display.subscribe()
    }

    /// The current display text.
    #[must_use]
    pub fn current(&self) -> String {
        self.display.borrow().clone()
    }

    /// Start a lookup. Must be called from within a tokio runtime.
    ///
    /// Blank input updates the display immediately and spawns nothing.
    pub fn submit(&self, identifier: &str) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        if FlightQuery::parse(identifier).is_err() {
            if self.cancel_superseded {
                self.abort_in_flight();
            }
            self.display.send_replace(EMPTY_INPUT_TEXT.to_string());
            return;
        }

        let service = Arc::clone(&self.service);
        let display = Arc::clone(&self.display);
        let current = Arc::clone(&self.generation);
        let guarded = self.cancel_superseded;
        let identifier = identifier.to_string();
        let handle = tokio::spawn(async move {
            let text = service.lookup(&identifier).await;
            // Checked under the channel's write lock, so a newer submit either
            // sees this text already published or makes it stale.
            display.send_if_modified(|slot| {
                if guarded && current.load(Ordering::SeqCst) != generation {
                    debug!(generation, "dropping superseded result");
                    return false;
                }
                *slot = text;
                true
            });
        });

        let previous = self.slot().replace(handle);
        if let Some(previous) = previous {
            if self.cancel_superseded && !previous.is_finished() {
                debug!("aborting superseded lookup");
                previous.abort();
            }
        }
    }

    /// Wait for the most recent lookup, if any, to finish.
    pub async fn wait_idle(&self) {
        let handle = self.slot().take();
        if let Some(handle) = handle {
            // An aborted task resolves to a cancellation error; nothing to report.
            let _ = handle.await;
        }
    }

    fn abort_in_flight(&self) {
        if let Some(handle) = self.slot().take() {
            handle.abort();
        }
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<JoinHandle<()>>> {
        self.in_flight.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
