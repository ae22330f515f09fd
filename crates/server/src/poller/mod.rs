// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Periodic story refresh.
//!
//! A single background task runs a fetch cycle on a fixed interval and
//! publishes the result into a [`StoryStore`]. Cycles can also be triggered
//! out of band through a [`Refresher`]. Cycle errors end at the cycle
//! boundary; they are recorded in the store and never stop the poller.
//! A poller spawned from a [`Refresher`] shares its cancellation signal, so
//! shutting the poller down also stops in-flight and future refreshes.

pub mod fetcher;
pub mod store;

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::metrics::registry::POLL_CYCLES;

pub use fetcher::{FetchError, StoryFetcher};
pub use store::{StorySnapshot, StoryStore};

/// Run one fetch cycle and publish its outcome. Returns whether it succeeded.
pub async fn run_cycle(fetcher: &StoryFetcher, store: &StoryStore) -> bool {
    let outcome = fetcher.fetch().await;
    match &outcome {
        Ok(entries) => {
            info!(entries = entries.len(), "Story refreshed");
            POLL_CYCLES.with_label_values(&["ok"]).inc();
        }
        Err(err) => {
            warn!(error = %err, "Story fetch failed");
            POLL_CYCLES.with_label_values(&["failed"]).inc();
        }
    }
    store.apply(outcome)
}

/// Resolves once cancellation is requested or the sender is gone.
async fn cancelled(cancel_rx: &mut watch::Receiver<bool>) {
    let _ = cancel_rx.wait_for(|cancelled| *cancelled).await;
}

/// Handle to the background poller. Dropping it cancels the poller.
pub struct PollerHandle {
    cancel: Arc<watch::Sender<bool>>,
    task: Option<JoinHandle<()>>,
}

impl PollerHandle {
    /// Stop the poller and wait for the task to finish.
    pub async fn shutdown(mut self) {
        self.cancel.send_replace(true);
        if let Some(task) = self.task.take()
            && let Err(err) = task.await
        {
            warn!(error = %err, "Poller task ended abnormally");
        }
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.cancel.send_replace(true);
    }
}

/// Start polling. The first cycle runs immediately; later ticks that fall
/// behind a slow cycle are delayed rather than bunched up.
pub fn spawn_poller(
    fetcher: Arc<StoryFetcher>,
    store: StoryStore,
    interval: Duration,
) -> PollerHandle {
    let (cancel, _) = watch::channel(false);
    spawn_with_cancel(fetcher, store, interval, Arc::new(cancel))
}

fn spawn_with_cancel(
    fetcher: Arc<StoryFetcher>,
    store: StoryStore,
    interval: Duration,
    cancel: Arc<watch::Sender<bool>>,
) -> PollerHandle {
    let mut cancel_rx = cancel.subscribe();

    let task = tokio::spawn(async move {
        info!(
            interval_ms = interval.as_millis() as u64,
            mode = ?fetcher.mode(),
            "Starting story poller"
        );

        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                _ = cancelled(&mut cancel_rx) => break,
                _ = ticker.tick() => {}
            }
            tokio::select! {
                biased;
                _ = cancelled(&mut cancel_rx) => break,
                _ = run_cycle(&fetcher, &store) => {}
            }
        }

        info!("Story poller stopped");
    });

    PollerHandle {
        cancel,
        task: Some(task),
    }
}

/// Triggers out-of-band fetch cycles, e.g. after a word submission.
#[derive(Clone)]
pub struct Refresher {
    fetcher: Arc<StoryFetcher>,
    store: StoryStore,
    cancel: Arc<watch::Sender<bool>>,
}

impl Refresher {
    pub fn new(fetcher: Arc<StoryFetcher>, store: StoryStore) -> Self {
        let (cancel, _) = watch::channel(false);
        Self {
            fetcher,
            store,
            cancel: Arc::new(cancel),
        }
    }

    /// Start the timer poller. Its handle also cancels this refresher.
    pub fn spawn_poller(&self, interval: Duration) -> PollerHandle {
        spawn_with_cancel(
            self.fetcher.clone(),
            self.store.clone(),
            interval,
            self.cancel.clone(),
        )
    }

    /// Spawn a cycle now. It may overlap a timer cycle; whichever completes
    /// last determines the snapshot. Resolves to `false` without touching the
    /// store once the poller has been shut down.
    pub fn refresh_now(&self) -> JoinHandle<bool> {
        let mut cancel_rx = self.cancel.subscribe();
        if *cancel_rx.borrow_and_update() {
            debug!("Refresh skipped after shutdown");
            return tokio::spawn(async { false });
        }

        self.store.begin_loading();
        let fetcher = self.fetcher.clone();
        let store = self.store.clone();
        tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = cancelled(&mut cancel_rx) => {
                    debug!("Refresh cancelled");
                    false
                }
                succeeded = run_cycle(&fetcher, &store) => succeeded,
            }
        })
    }
}
