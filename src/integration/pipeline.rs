//! TrackerPipeline for combining frame-paced detection with identity tracking.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{info, warn};

use super::scheduler::{FrameScheduler, PipelineEvent, SchedulerExit, ShutdownHandle};
use super::{Detector, VideoSource};
use crate::clock::Clock;
use crate::config::PipelineConfig;
use crate::error::PipelineError;
use crate::notifier::Notifier;
use crate::tracker::{ClassFilter, IdentityTracker};

/// A running detection stream.
///
/// Frames flow scheduler → class filter → identity tracker → notifier, and
/// every reconciled set (including the empty interim set published at the
/// start of each cycle) is delivered through [`TrackerPipeline::next`] in
/// cycle order. The stream ends after its first error.
pub struct TrackerPipeline {
    events: mpsc::Receiver<PipelineEvent>,
    shutdown: ShutdownHandle,
    in_flight: Arc<AtomicBool>,
    scheduler: JoinHandle<SchedulerExit>,
    stage: JoinHandle<()>,
}

impl TrackerPipeline {
    /// Validate `config` and start the detection loop on the current runtime.
    ///
    /// A `None` source is not rejected here: the stream reports
    /// [`PipelineError::NoVideoSource`] as its only item.
    pub fn spawn<D, V>(
        detector: D,
        source: Option<V>,
        config: &PipelineConfig,
        notifier: Option<Arc<Notifier>>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, PipelineError>
    where
        D: Detector + 'static,
        V: VideoSource + 'static,
    {
        config.validate()?;

        let filter = ClassFilter::new(&config.class_allow_list);
        let scheduler =
            FrameScheduler::new(detector, source, filter, clock).with_idle_hint(config.idle_hint);
        let shutdown = scheduler.shutdown_handle();
        let in_flight = scheduler.in_flight();

        // Capacity 1 keeps at most one finished cycle waiting on the tracker.
        let (filtered_tx, filtered_rx) = mpsc::channel(1);
        let (events_tx, events) = mpsc::channel(1);

        let tracker = IdentityTracker::new(config.tracker.clone());
        let scheduler = tokio::spawn(scheduler.run(filtered_tx));
        let stage = tokio::spawn(reconcile_stage(filtered_rx, events_tx, tracker, notifier));

        info!("tracker pipeline started");
        Ok(Self {
            events,
            shutdown,
            in_flight,
            scheduler,
            stage,
        })
    }

    /// Next reconciled set, or `None` once the stream has closed.
    pub async fn next(&mut self) -> Option<PipelineEvent> {
        self.events.recv().await
    }

    /// Whether a detection is currently running.
    pub fn is_detecting(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Ask the detection loop to stop before its next cycle.
    pub fn shutdown(&self) {
        self.shutdown.shutdown();
    }

    pub fn shutdown_handle(&self) -> ShutdownHandle {
        self.shutdown.clone()
    }

    /// Stop the loop and wait for both tasks to finish.
    pub async fn close(self) -> SchedulerExit {
        self.shutdown.shutdown();
        drop(self.events);
        let exit = self.scheduler.await.unwrap_or(SchedulerExit::Disconnected);
        if let Err(e) = self.stage.await {
            warn!("reconcile stage failed: {}", e);
        }
        info!(?exit, "tracker pipeline stopped");
        exit
    }
}

async fn reconcile_stage(
    mut filtered: mpsc::Receiver<PipelineEvent>,
    events: mpsc::Sender<PipelineEvent>,
    mut tracker: IdentityTracker,
    notifier: Option<Arc<Notifier>>,
) {
    // Wakes the stage for held-back announcements while no cycle completes.
    let mut flush_at = None;

    loop {
        tokio::select! {
            event = filtered.recv() => {
                let Some(event) = event else { break };
                let event = event.map(|current| {
                    let reconciled = tracker.update(current);
                    if let Some(notifier) = &notifier {
                        notifier.observe_all(&reconciled);
                    }
                    reconciled
                });
                flush_at = notifier.as_ref().and_then(|n| n.next_flush_at());

                if events.send(event).await.is_err() {
                    break;
                }
            }
            _ = flush_deadline(flush_at) => {
                let Some(notifier) = &notifier else { break };
                // Nothing due yet on this clock; the next cycle flushes instead.
                flush_at = match notifier.flush_due() {
                    0 => None,
                    _ => notifier.next_flush_at(),
                };
            }
        }
    }
}

async fn flush_deadline(at: Option<Instant>) {
    match at {
        Some(at) => tokio::time::sleep_until(at).await,
        None => std::future::pending().await,
    }
}
