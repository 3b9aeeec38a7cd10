//! Error types for the detection pipeline

use thiserror::Error;

/// Errors surfaced on the detection stream.
///
/// Every variant except `Config` is terminal: the stream closes after it.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("no video source")]
    NoVideoSource,

    #[error("video source ended")]
    VideoEnded,

    #[error("unable to detect objects in video frame: {0}")]
    Detection(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("configuration error: {0}")]
    Config(String),
}

impl PipelineError {
    pub fn detection<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Detection(Box::new(err))
    }
}

/// Failures of speech or haptic actuators. Never propagated to the stream.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ActuatorError {
    #[error("{0} not supported")]
    Unavailable(&'static str),
}
