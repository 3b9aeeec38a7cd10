//! Allow-list filtering of raw detections.

use std::collections::HashSet;

use tokio::time::Instant;
use tracing::trace;

use crate::tracker::matching::RawDetection;
use crate::tracker::tracked_object::TrackedObject;

/// Keeps detections whose class is in a configured allow-list.
#[derive(Debug, Clone, Default)]
pub struct ClassFilter {
    allowed: HashSet<String>,
}

impl ClassFilter {
    pub fn new<I, S>(classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            allowed: classes
                .into_iter()
                .map(|c| c.as_ref().to_lowercase())
                .collect(),
        }
    }

    pub fn allows(&self, class: &str) -> bool {
        self.allowed.contains(&class.to_lowercase())
    }

    /// Drop disallowed or malformed detections, preserving order.
    ///
    /// Survivors get a fresh provisional id and the cycle's capture time.
    /// Scores are clamped to `[0, 1]` and box extents to non-negative.
    pub fn filter(&self, detections: Vec<RawDetection>, timestamp: Instant) -> Vec<TrackedObject> {
        detections
            .into_iter()
            .filter(|d| {
                if !d.score.is_finite() || !d.bbox.is_finite() {
                    trace!(class = %d.class, "dropping malformed detection");
                    return false;
                }
                self.allows(&d.class)
            })
            .map(|mut d| {
                d.score = d.score.clamp(0.0, 1.0);
                d.bbox = d.bbox.clamped();
                TrackedObject::new(d, timestamp)
            })
            .collect()
    }
}
