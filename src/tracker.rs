mod class_filter;
mod identity;
mod matching;
mod phase;
mod rect;
mod tracked_object;

pub use class_filter::ClassFilter;
pub use identity::{IdentityTracker, TrackerConfig, reconcile};
pub use matching::{BestMatch, RawDetection, best_match, class_overlap_matrix};
pub use phase::TrackerPhase;
pub use rect::{Rect, overlap_batch};
pub use tracked_object::{ObjectId, TrackedObject};
