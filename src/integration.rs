//! Integration module connecting a detector and a video feed to the tracker.
//!
//! The detector and the video source are external collaborators reached
//! through the [`Detector`] and [`VideoSource`] traits. [`FrameScheduler`]
//! paces detection to the feed and [`TrackerPipeline`] wires the whole stream
//! together.

mod builder;
mod detector;
mod pipeline;
mod scheduler;
mod video;

pub use builder::DetectionBuilder;
pub use detector::{Detector, Frame};
pub use pipeline::TrackerPipeline;
pub use scheduler::{FrameScheduler, PipelineEvent, SchedulerExit, ShutdownHandle};
pub use video::VideoSource;
