//! Frame source driving the detection loop.

use async_trait::async_trait;

use super::Frame;

/// A live video feed.
///
/// Each call is a one-shot "notify me at the next available frame" request.
/// Frames produced while nobody is waiting are expected to be dropped by the
/// source rather than queued, so a slow detector always sees the latest frame.
#[async_trait]
pub trait VideoSource: Send {
    /// Resolve with the next available frame, or `None` once the feed has
    /// ended or errored.
    async fn next_frame(&mut self) -> Option<Frame>;
}
