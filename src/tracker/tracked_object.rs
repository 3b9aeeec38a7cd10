//! Identified detections carried through the tracking stream.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::time::Instant;

use crate::tracker::matching::RawDetection;
use crate::tracker::rect::Rect;

/// Global object ID counter for unique ID generation.
static OBJECT_ID_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Opaque identifier of a tracked object.
///
/// Ids come from a process-wide monotonic counter and are never handed out twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(u64);

impl ObjectId {
    /// Get the next unique object ID.
    pub fn next() -> Self {
        Self(OBJECT_ID_COUNTER.fetch_add(1, Ordering::Relaxed) + 1)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A detection enriched with an identity and overlap metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackedObject {
    /// Stable identity; provisional until reconciled by the tracker
    pub id: ObjectId,
    /// Detected class label as reported by the detector
    pub class: String,
    /// Confidence in `[0, 1]`
    pub score: f32,
    /// Box in TLWH format, non-negative size
    pub bbox: Rect,
    /// Overlap ratio with the best-matching predecessor, 0 if none
    pub overlap: f32,
    /// Capture time of the detection cycle
    pub timestamp: Instant,
}

impl TrackedObject {
    /// Wrap a raw detection with a fresh id.
    pub fn new(detection: RawDetection, timestamp: Instant) -> Self {
        Self {
            id: ObjectId::next(),
            class: detection.class,
            score: detection.score,
            bbox: detection.bbox,
            overlap: 0.0,
            timestamp,
        }
    }
}
