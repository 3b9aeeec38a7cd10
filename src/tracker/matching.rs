//! Matching utilities between consecutive detection sets.

use ndarray::Array2;

use crate::tracker::rect::{Rect, overlap_batch};
use crate::tracker::tracked_object::TrackedObject;

/// Detector output for one object in one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct RawDetection {
    /// Class label, e.g. "person"
    pub class: String,
    /// Detection confidence score
    pub score: f32,
    /// Bounding box in TLWH format
    pub bbox: Rect,
}

impl RawDetection {
    pub fn new(class: impl Into<String>, score: f32, bbox: Rect) -> Self {
        Self {
            class: class.into(),
            score,
            bbox,
        }
    }
}

/// Best predecessor for one current detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BestMatch {
    /// Index into the previous set
    pub index: usize,
    pub overlap: f32,
}

/// Overlap matrix of shape (current, previous).
///
/// Pairs of different classes score 0 regardless of geometry.
pub fn class_overlap_matrix(current: &[TrackedObject], previous: &[TrackedObject]) -> Array2<f32> {
    let current_rects: Vec<Rect> = current.iter().map(|c| c.bbox).collect();
    let previous_rects: Vec<Rect> = previous.iter().map(|p| p.bbox).collect();
    let mut overlaps = overlap_batch(&current_rects, &previous_rects);

    for ((i, j), overlap) in overlaps.indexed_iter_mut() {
        if current[i].class != previous[j].class {
            *overlap = 0.0;
        }
    }
    overlaps
}

/// Pick the first maximal column of `row` in the overlap matrix.
///
/// Returns `None` when there are no predecessors. A row of zeros still
/// yields its first column.
pub fn best_match(overlaps: &Array2<f32>, row: usize) -> Option<BestMatch> {
    let mut best: Option<BestMatch> = None;
    for (index, &overlap) in overlaps.row(row).iter().enumerate() {
        match best {
            Some(b) if overlap <= b.overlap => {}
            _ => best = Some(BestMatch { index, overlap }),
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    fn obj(class: &str, bbox: Rect) -> TrackedObject {
        TrackedObject::new(RawDetection::new(class, 0.9, bbox), Instant::now())
    }

    #[test]
    fn test_class_mismatch_scores_zero() {
        let current = [obj("dog", Rect::new(0.0, 0.0, 10.0, 10.0))];
        let previous = [
            obj("cat", Rect::new(0.0, 0.0, 10.0, 10.0)),
            obj("dog", Rect::new(0.0, 0.0, 10.0, 10.0)),
        ];
        let m = class_overlap_matrix(&current, &previous);
        assert_eq!(m[[0, 0]], 0.0);
        assert!((m[[0, 1]] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_best_match_first_maximum_wins() {
        let current = [obj("dog", Rect::new(0.0, 0.0, 10.0, 10.0))];
        let previous = [
            obj("dog", Rect::new(5.0, 0.0, 10.0, 10.0)),
            obj("dog", Rect::new(-5.0, 0.0, 10.0, 10.0)),
        ];
        let m = class_overlap_matrix(&current, &previous);
        let best = best_match(&m, 0).unwrap();
        assert_eq!(best.index, 0);
    }

    #[test]
    fn test_best_match_empty_previous() {
        let current = [obj("dog", Rect::new(0.0, 0.0, 10.0, 10.0))];
        let m = class_overlap_matrix(&current, &[]);
        assert_eq!(best_match(&m, 0), None);
    }

    #[test]
    fn test_best_match_all_zero_picks_first() {
        let current = [obj("dog", Rect::new(0.0, 0.0, 10.0, 10.0))];
        let previous = [obj("cat", Rect::new(0.0, 0.0, 10.0, 10.0))];
        let m = class_overlap_matrix(&current, &previous);
        assert_eq!(best_match(&m, 0), Some(BestMatch { index: 0, overlap: 0.0 }));
    }
}
