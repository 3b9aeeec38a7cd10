//! Real-time detection stream with overlap-based identity tracking.
//!
//! A [`FrameScheduler`] samples one video frame at a time and runs an opaque
//! [`Detector`] on it. Detections outside the class allow-list are dropped,
//! the [`IdentityTracker`] reconciles each set with the previous one to keep
//! ids stable and smooth scores and boxes, and the [`Notifier`] announces new
//! classes by speech and vibration under per-class and per-actuator cooldowns.

pub mod clock;
pub mod config;
pub mod error;
pub mod integration;
pub mod notifier;
pub mod tracker;

pub use clock::{Clock, ManualClock, TokioClock};
pub use config::PipelineConfig;
pub use error::{ActuatorError, PipelineError};
pub use integration::{
    DetectionBuilder, Detector, Frame, FrameScheduler, PipelineEvent, SchedulerExit,
    ShutdownHandle, TrackerPipeline, VideoSource,
};
pub use notifier::{Haptics, Notifier, Speaker, Utterance};
pub use tracker::{
    ClassFilter, IdentityTracker, ObjectId, RawDetection, Rect, TrackedObject, TrackerConfig,
    TrackerPhase,
};
