//! Trait for object detection inference backends.

use async_trait::async_trait;

use crate::tracker::RawDetection;

/// A single video frame handed to the detector.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    /// Raw image bytes, layout defined by the detector
    pub data: Vec<u8>,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
}

impl Frame {
    pub fn new(data: Vec<u8>, width: u32, height: u32) -> Self {
        Self {
            data,
            width,
            height,
        }
    }
}

/// Trait for object detection inference backends.
///
/// The model behind it is opaque: given a frame it returns unlabeled boxes with
/// a class label and a confidence score, in source-frame pixel coordinates.
/// Implementations are constructed (model loaded, backend selected) before the
/// pipeline starts.
///
/// # Example
///
/// ```ignore
/// use dashcam_track::{Detector, Frame, RawDetection};
///
/// struct MyDetector {
///     // Your model here
/// }
///
/// #[async_trait::async_trait]
/// impl Detector for MyDetector {
///     type Error = std::io::Error;
///
///     async fn detect(&mut self, frame: &Frame) -> Result<Vec<RawDetection>, Self::Error> {
///         // Run inference and return detections
///         Ok(vec![])
///     }
/// }
/// ```
#[async_trait]
pub trait Detector: Send {
    /// Error type for detection failures.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Run inference on one frame.
    async fn detect(&mut self, frame: &Frame) -> Result<Vec<RawDetection>, Self::Error>;
}
