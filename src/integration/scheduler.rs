//! Frame-paced detection loop.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

use super::{Detector, VideoSource};
use crate::clock::Clock;
use crate::error::PipelineError;
use crate::tracker::{ClassFilter, TrackedObject};

/// One item of the detection stream. An `Err` is always the last item.
pub type PipelineEvent = Result<Vec<TrackedObject>, PipelineError>;

/// Why the detection loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerExit {
    /// Shutdown was requested
    Cancelled,
    /// A terminal error was published to the stream
    Terminated,
    /// The stream receiver went away
    Disconnected,
}

/// Requests a clean stop of a running detection loop.
#[derive(Debug, Clone)]
pub struct ShutdownHandle(Arc<watch::Sender<bool>>);

impl ShutdownHandle {
    pub fn shutdown(&self) {
        self.0.send_replace(true);
    }

    pub fn is_shutdown(&self) -> bool {
        *self.0.borrow()
    }
}

/// Drives detection cycles one at a time, each aligned to the next video frame.
///
/// A cycle publishes an empty interim set, runs the detector, and publishes the
/// class-filtered result. The next frame is only requested once the cycle has
/// finished, so there is never more than one detection in flight and frames
/// arriving meanwhile are skipped rather than queued.
pub struct FrameScheduler<D, V> {
    detector: D,
    source: Option<V>,
    filter: ClassFilter,
    clock: Arc<dyn Clock>,
    idle_hint: bool,
    in_flight: Arc<AtomicBool>,
    shutdown_tx: Arc<watch::Sender<bool>>,
    shutdown_rx: watch::Receiver<bool>,
}

impl<D: Detector, V: VideoSource> FrameScheduler<D, V> {
    pub fn new(detector: D, source: Option<V>, filter: ClassFilter, clock: Arc<dyn Clock>) -> Self {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        Self {
            detector,
            source,
            filter,
            clock,
            idle_hint: true,
            in_flight: Arc::new(AtomicBool::new(false)),
            shutdown_tx: Arc::new(shutdown_tx),
            shutdown_rx,
        }
    }

    /// Whether to yield to the runtime before the first cycle.
    pub fn with_idle_hint(mut self, idle_hint: bool) -> Self {
        self.idle_hint = idle_hint;
        self
    }

    /// Flag that is set while the detector is running.
    pub fn in_flight(&self) -> Arc<AtomicBool> {
        self.in_flight.clone()
    }

    pub fn shutdown_handle(&self) -> ShutdownHandle {
        ShutdownHandle(self.shutdown_tx.clone())
    }

    /// Run cycles until the source ends, the detector fails, shutdown is
    /// requested or `results` is dropped.
    pub async fn run(mut self, results: mpsc::Sender<PipelineEvent>) -> SchedulerExit {
        let Some(mut source) = self.source.take() else {
            warn!("no video source, detection loop not started");
            return publish_error(&results, PipelineError::NoVideoSource).await;
        };

        if self.idle_hint {
            tokio::task::yield_now().await;
        }
        info!("detection loop started");

        loop {
            if *self.shutdown_rx.borrow() {
                info!("detection loop cancelled");
                return SchedulerExit::Cancelled;
            }

            let frame = tokio::select! {
                frame = source.next_frame() => frame,
                _ = cancelled(&mut self.shutdown_rx) => {
                    info!("detection loop cancelled");
                    return SchedulerExit::Cancelled;
                }
            };
            let Some(frame) = frame else {
                warn!("video source ended");
                return publish_error(&results, PipelineError::VideoEnded).await;
            };

            self.in_flight.store(true, Ordering::SeqCst);
            if results.send(Ok(Vec::new())).await.is_err() {
                self.in_flight.store(false, Ordering::SeqCst);
                return self.disconnected();
            }

            let started = self.clock.now();
            let outcome = self.detector.detect(&frame).await;
            let finished = self.clock.now();
            self.in_flight.store(false, Ordering::SeqCst);

            let detections = match outcome {
                Ok(detections) => detections,
                Err(e) => {
                    warn!("Unable to detect objects in video frame: {}", e);
                    return publish_error(&results, PipelineError::detection(e)).await;
                }
            };

            let raw = detections.len();
            let filtered = self.filter.filter(detections, finished);
            debug!(
                raw,
                kept = filtered.len(),
                elapsed_ms = finished.saturating_duration_since(started).as_millis() as u64,
                "detection cycle finished"
            );

            if results.send(Ok(filtered)).await.is_err() {
                return self.disconnected();
            }
        }
    }

    /// A closed receiver after a shutdown request counts as a cancellation.
    fn disconnected(&self) -> SchedulerExit {
        if *self.shutdown_rx.borrow() {
            SchedulerExit::Cancelled
        } else {
            SchedulerExit::Disconnected
        }
    }
}

/// Resolves once shutdown has been requested.
async fn cancelled(shutdown: &mut watch::Receiver<bool>) {
    while !*shutdown.borrow_and_update() {
        if shutdown.changed().await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}

async fn publish_error(results: &mpsc::Sender<PipelineEvent>, err: PipelineError) -> SchedulerExit {
    match results.send(Err(err)).await {
        Ok(()) => SchedulerExit::Terminated,
        Err(_) => SchedulerExit::Disconnected,
    }
}
