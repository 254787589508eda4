//! Background upload task and its trigger signaling.
//!
//! ```text
//! ┌──────────────────┐  try_send(())   ┌─────────────────────────┐
//! │  Foreground loop │────────────────▶│  Trigger channel (cap 1) │
//! │  (send cadence)  │                 └───────────┬─────────────┘
//! └──────────────────┘                             │ receive().await
//!                                                  ▼
//!                                      ┌─────────────────────────┐
//!                                      │  Upload thread (parked) │
//!                                      │  re-check mode + link   │
//!                                      │  snapshot → POST → park │
//!                                      └─────────────────────────┘
//! ```
//!
//! The channel has capacity 1, so extra signals coalesce: at most one
//! trigger is ever pending.  The thread parks in a blocking `receive()`
//! and wakes exactly once per token.  Uploads are fire-and-forget — no
//! retry, no backoff, and an in-flight attempt is never cancelled;
//! deactivation only suppresses the *next* trigger.

pub mod payload;
pub mod transport;

use std::sync::Arc;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use log::{info, warn};

use crate::activation::ActivationFlag;
use crate::adapters::wifi::LinkState;
use crate::config::SystemConfig;
use crate::drivers::task_pin::{self, Core};
use crate::error::CommsError;
use crate::reading::ReadingStore;
use payload::UploadPayload;
use transport::UploadTransport;

/// Capacity-1 trigger channel bridging the sync foreground loop to the
/// upload thread.
pub type TriggerChannel = Channel<CriticalSectionRawMutex, (), 1>;

// ───────────────────────────────────────────────────────────────
// Signal handle (foreground side)
// ───────────────────────────────────────────────────────────────

/// Foreground-side handle: fires one trigger token, coalescing extras.
pub struct UploadSignal {
    channel: Arc<TriggerChannel>,
}

impl UploadSignal {
    pub fn new(channel: Arc<TriggerChannel>) -> Self {
        Self { channel }
    }

    /// Wake the upload task.  Returns `false` when a trigger was already
    /// pending (the signals coalesce into one attempt).
    pub fn trigger(&self) -> bool {
        self.channel.try_send(()).is_ok()
    }
}

// ───────────────────────────────────────────────────────────────
// Upload task (background side)
// ───────────────────────────────────────────────────────────────

/// Outcome of one wake, surfaced for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// Device went Idle between signal and wake — no network I/O.
    SkippedInactive,
    /// Link dropped between signal and wake.
    SkippedOffline,
    /// Some field has never been read; the server needs all three.
    SkippedIncomplete,
    /// POST went out; carries the HTTP status (content ignored).
    Sent(u16),
    /// Transport-level failure — logged, never retried.
    Failed(CommsError),
}

/// The demand-triggered background unit of execution.
pub struct UploadTask<T: UploadTransport> {
    channel: Arc<TriggerChannel>,
    activation: Arc<ActivationFlag>,
    link: Arc<LinkState>,
    store: Arc<ReadingStore>,
    transport: T,
    device_id: heapless::String<16>,
    endpoint_url: heapless::String<96>,
}

impl<T: UploadTransport> UploadTask<T> {
    pub fn new(
        config: &SystemConfig,
        channel: Arc<TriggerChannel>,
        activation: Arc<ActivationFlag>,
        link: Arc<LinkState>,
        store: Arc<ReadingStore>,
        transport: T,
    ) -> Self {
        Self {
            channel,
            activation,
            link,
            store,
            transport,
            device_id: config.device_id.clone(),
            endpoint_url: config.endpoint_url.clone(),
        }
    }

    /// One wake's worth of work: re-check mode and link, then at most one
    /// upload attempt.
    pub fn attempt(&mut self) -> AttemptOutcome {
        if !self.activation.is_active() {
            return AttemptOutcome::SkippedInactive;
        }
        if !self.link.is_connected() {
            return AttemptOutcome::SkippedOffline;
        }

        let snapshot = self.store.snapshot();
        let Some(payload) = UploadPayload::from_reading(self.device_id.as_str(), &snapshot)
        else {
            return AttemptOutcome::SkippedIncomplete;
        };
        let Ok(body) = serde_json::to_vec(&payload) else {
            return AttemptOutcome::Failed(CommsError::TransportFailed);
        };

        match self.transport.post_json(self.endpoint_url.as_str(), &body) {
            Ok(status) => AttemptOutcome::Sent(status),
            Err(e) => AttemptOutcome::Failed(e),
        }
    }

    /// Access the transport (host tests poke the sim).
    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Park on the trigger channel forever; one attempt per token.
    fn run(mut self) {
        info!("Upload: task parked, waiting for triggers");
        loop {
            futures_lite::future::block_on(self.channel.receive());
            match self.attempt() {
                AttemptOutcome::Sent(status) => info!("Upload: sent (HTTP {})", status),
                AttemptOutcome::SkippedInactive => info!("Upload: skipped — device idle"),
                AttemptOutcome::SkippedOffline => info!("Upload: skipped — no link"),
                AttemptOutcome::SkippedIncomplete => {
                    info!("Upload: skipped — reading incomplete")
                }
                AttemptOutcome::Failed(e) => warn!("Upload: failed — {}", e),
            }
        }
    }

    /// Spawn the task on Core 0 (PRO_CPU, co-located with lwIP).
    pub fn spawn(self) -> std::thread::JoinHandle<()>
    where
        T: Send + 'static,
    {
        task_pin::spawn_on_core(Core::Pro, 5, 8, "upload\0", move || self.run())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
