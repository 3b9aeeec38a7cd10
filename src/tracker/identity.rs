//! Identity reconciliation between consecutive detection sets.

use std::collections::HashSet;
use std::mem;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::tracker::matching::{self, BestMatch};
use crate::tracker::phase::TrackerPhase;
use crate::tracker::tracked_object::TrackedObject;

/// Thresholds driving identity continuation and box stabilization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TrackerConfig {
    /// Overlap above which a detection inherits its predecessor's id
    pub id_overlap_threshold: f32,
    /// Overlap above which the predecessor's box is kept
    pub bbox_overlap_threshold: f32,
    /// Score above which a box may be frozen
    pub unknown_score_threshold: f32,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            id_overlap_threshold: 0.6,
            bbox_overlap_threshold: 0.9,
            unknown_score_threshold: 0.7,
        }
    }
}

/// Reconcile `current` against `previous`.
///
/// Returns `(reconciled, new_previous)`. An empty `current` is passed straight
/// through and leaves `previous` as the buffer for the next call. With an empty
/// `previous` every detection keeps its fresh id, score and box.
///
/// Each detection picks the first predecessor with maximal class-aware overlap.
/// Above `id_overlap_threshold` it takes the predecessor's id and the higher of
/// both scores; above `bbox_overlap_threshold` with a carried score over
/// `unknown_score_threshold` it takes the predecessor's box. An id is continued
/// at most once per set: later detections matching an already claimed
/// predecessor keep their fresh id.
pub fn reconcile(
    previous: Vec<TrackedObject>,
    current: Vec<TrackedObject>,
    config: &TrackerConfig,
) -> (Vec<TrackedObject>, Vec<TrackedObject>) {
    if current.is_empty() {
        return (current, previous);
    }
    if previous.is_empty() {
        return (current.clone(), current);
    }

    let overlaps = matching::class_overlap_matrix(&current, &previous);
    let mut claimed = HashSet::new();

    let reconciled: Vec<TrackedObject> = current
        .into_iter()
        .enumerate()
        .map(|(row, mut object)| {
            let Some(BestMatch { index, overlap }) = matching::best_match(&overlaps, row) else {
                return object;
            };
            let best = &previous[index];
            let max_score = object.score.max(best.score);
            object.overlap = overlap;

            if overlap > config.id_overlap_threshold && claimed.insert(best.id) {
                object.id = best.id;
                object.score = max_score;
            }

            if max_score > config.unknown_score_threshold
                && overlap > config.bbox_overlap_threshold
            {
                object.bbox = best.bbox;
            }

            object
        })
        .collect();

    debug!(
        objects = reconciled.len(),
        continued = claimed.len(),
        "reconciled detection set"
    );

    (reconciled.clone(), reconciled)
}

/// Holds the single previous-frame buffer and reconciles each new set against it.
#[derive(Debug, Default)]
pub struct IdentityTracker {
    config: TrackerConfig,
    previous: Vec<TrackedObject>,
}

impl IdentityTracker {
    pub fn new(config: TrackerConfig) -> Self {
        Self {
            config,
            previous: Vec::new(),
        }
    }

    /// Reconcile the next filtered set and remember the result.
    pub fn update(&mut self, current: Vec<TrackedObject>) -> Vec<TrackedObject> {
        let previous = mem::take(&mut self.previous);
        let (reconciled, previous) = reconcile(previous, current, &self.config);
        self.previous = previous;
        reconciled
    }

    pub fn phase(&self) -> TrackerPhase {
        if self.previous.is_empty() {
            TrackerPhase::AwaitingFirstSet
        } else {
            TrackerPhase::Steady
        }
    }

    /// The most recently emitted non-empty set.
    pub fn previous(&self) -> &[TrackedObject] {
        &self.previous
    }
}
